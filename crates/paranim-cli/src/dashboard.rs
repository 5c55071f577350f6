use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use paranim_core::{AnimationConfig, AnimationOverrides, ParanimError, ParanimResult};
use paranim_encode::{encode_png, ExportArtifact, ExportFormat, Exporter};

/// Shared state for the dashboard. Read-only: every request builds its own
/// config from the base plus its query string.
#[derive(Clone)]
pub struct AppState {
    base: Arc<AnimationConfig>,
    exporter: Exporter,
}

impl AppState {
    pub fn new(base: AnimationConfig, exporter: Exporter) -> Self {
        Self {
            base: Arc::new(base),
            exporter,
        }
    }

    /// Validate the request config and render its preview frame as PNG.
    pub fn render_preview(&self, overrides: &AnimationOverrides) -> ParanimResult<Vec<u8>> {
        let config = overrides.apply(&self.base).validate()?;
        let frame = self.exporter.generator().render_preview(&config);
        encode_png(&frame)
    }

    /// Validate the request config and export the full animation.
    pub fn render_export(
        &self,
        overrides: &AnimationOverrides,
        format: ExportFormat,
    ) -> ParanimResult<ExportArtifact> {
        let config = overrides.apply(&self.base).validate()?;
        self.exporter.export(&config, format)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    format: Option<String>,
}

pub async fn run_dashboard(host: &str, port: u16, state: AppState) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind dashboard to {}:{}", host, port))?;
    let addr = listener.local_addr()?;
    println!("📡 Paranim dashboard listening on http://{}", addr);
    tracing::info!(%addr, "dashboard started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down dashboard");
        })
        .await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_html))
        .route("/api/defaults", get(defaults))
        .route("/api/preview", get(preview))
        .route("/api/export", get(export))
        .with_state(state)
}

// --- HTTP Handlers ---

async fn index_html() -> Html<&'static str> {
    Html(include_str!("dashboard_ui.html"))
}

async fn defaults(State(state): State<AppState>) -> Json<AnimationConfig> {
    Json(state.base.as_ref().clone())
}

async fn preview(
    State(state): State<AppState>,
    overrides: Result<Query<AnimationOverrides>, QueryRejection>,
) -> Result<Response, ApiError> {
    let overrides = query(overrides)?;
    // Render in a blocking task so we don't stall the async executor.
    let png = tokio::task::spawn_blocking(move || state.render_preview(&overrides))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        png,
    )
        .into_response())
}

async fn export(
    State(state): State<AppState>,
    overrides: Result<Query<AnimationOverrides>, QueryRejection>,
    format: Result<Query<FormatQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let overrides = query(overrides)?;
    let format = match query(format)?.format.as_deref() {
        Some(name) => name
            .parse::<ExportFormat>()
            .map_err(|e| ApiError::BadQuery(format!("format: {}", e)))?,
        None => ExportFormat::Gif,
    };

    let artifact = tokio::task::spawn_blocking(move || state.render_export(&overrides, format))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    let file_name = crate::output::export_file_name(format, &chrono::Local::now());
    Ok((
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        artifact.bytes,
    )
        .into_response())
}

/// Unwrap a query extractor, turning a malformed query string into a JSON 400.
fn query<T>(extracted: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    match extracted {
        Ok(Query(value)) => Ok(value),
        Err(rejection) => {
            let detail = rejection.body_text();
            // axum prefixes the serde path ("fps: invalid digit ...") with its own context.
            let detail = detail
                .strip_prefix("Failed to deserialize query string: ")
                .unwrap_or(&detail)
                .to_string();
            Err(ApiError::BadQuery(detail))
        }
    }
}

/// Error returned by the API handlers, rendered as a JSON body.
#[derive(Debug)]
pub enum ApiError {
    Paranim(ParanimError),
    /// The query string could not be parsed into parameters.
    BadQuery(String),
    Internal(String),
}

impl From<ParanimError> for ApiError {
    fn from(e: ParanimError) -> Self {
        ApiError::Paranim(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Paranim(e) => {
                let status = if e.is_validation() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                let issues: Vec<String> = e.issues().iter().map(ToString::to_string).collect();
                (
                    status,
                    serde_json::json!({ "error": e.to_string(), "issues": issues }),
                )
            }
            ApiError::BadQuery(detail) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": "invalid query string", "issues": [detail] }),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": msg, "issues": [] }),
            ),
        };
        tracing::warn!(%status, error = %body["error"], "request failed");
        (status, Json(body)).into_response()
    }
}
