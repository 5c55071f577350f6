/// Core error types for Paranim.
use std::fmt;

/// A specialized Result type for Paranim operations.
pub type ParanimResult<T> = Result<T, ParanimError>;

/// A single rejected configuration field.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    /// Name of the offending field, as it appears in `paranim.toml`.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl ConfigIssue {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Top-level error type shared by every Paranim crate.
#[derive(Debug, thiserror::Error)]
pub enum ParanimError {
    #[error("invalid configuration: {}", join_issues(.0))]
    ConfigValidation(Vec<ConfigIssue>),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ParanimError {
    /// Create a validation error for a single field.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ParanimError::ConfigValidation(vec![ConfigIssue::new(field, message)])
    }

    /// Whether this error was caused by user input rather than the encoder or the system.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ParanimError::ConfigValidation(_) | ParanimError::ConfigParse(_)
        )
    }

    /// The individual field issues, empty for non-validation errors.
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            ParanimError::ConfigValidation(issues) => issues,
            _ => &[],
        }
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
