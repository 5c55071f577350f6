use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ParanimResult;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "paranim.toml";

/// User-tunable parameters for one preview or export run.
///
/// Colors stay as hex strings here; they are parsed during validation so a
/// malformed color is reported together with every other bad field.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Phase speed multiplier applied to the parameter `t`.
    pub frequency: f64,
    /// Scale of the point displacement term.
    pub amplitude: f64,
    /// Number of frames in an exported animation.
    pub frame_count: u32,
    /// Playback rate of the exported animation.
    pub fps: u32,
    /// Marker area in points squared.
    pub point_size: f64,
    pub background: String,
    pub dot_color: String,
    /// Edge length of the square canvas in pixels.
    pub size: u32,
    /// Parameter value rendered by the preview.
    pub preview_t: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            amplitude: 1.0,
            frame_count: 180,
            fps: 30,
            point_size: 0.6,
            background: "#090909".to_string(),
            dot_color: Color::WHITE.to_string(),
            size: 900,
            preview_t: 0.0,
        }
    }
}

/// Partial [`AnimationConfig`] used to layer CLI flags or query parameters
/// over a base config. Unset fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnimationOverrides {
    pub frequency: Option<f64>,
    pub amplitude: Option<f64>,
    pub frame_count: Option<u32>,
    pub fps: Option<u32>,
    pub point_size: Option<f64>,
    pub background: Option<String>,
    pub dot_color: Option<String>,
    pub size: Option<u32>,
    #[serde(alias = "t")]
    pub preview_t: Option<f64>,
}

impl AnimationOverrides {
    /// Produce a fresh config: `base` with every set field replaced.
    pub fn apply(&self, base: &AnimationConfig) -> AnimationConfig {
        let mut config = base.clone();
        if let Some(v) = self.frequency {
            config.frequency = v;
        }
        if let Some(v) = self.amplitude {
            config.amplitude = v;
        }
        if let Some(v) = self.frame_count {
            config.frame_count = v;
        }
        if let Some(v) = self.fps {
            config.fps = v;
        }
        if let Some(v) = self.point_size {
            config.point_size = v;
        }
        if let Some(v) = &self.background {
            config.background = v.clone();
        }
        if let Some(v) = &self.dot_color {
            config.dot_color = v.clone();
        }
        if let Some(v) = self.size {
            config.size = v;
        }
        if let Some(v) = self.preview_t {
            config.preview_t = v;
        }
        config
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportSettings {
    /// "gif" | "apng"
    pub format: String,
    pub output_dir: String,
    /// Total number of plays; `None` or 0 loops forever.
    pub loop_count: Option<u16>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: "gif".to_string(),
            output_dir: "output".to_string(),
            loop_count: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

/// Contents of `paranim.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ParanimConfig {
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub server: ServerConfig,
}

impl ParanimConfig {
    pub fn from_toml_str(contents: &str) -> ParanimResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load_from_file(path: &std::path::Path) -> ParanimResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &std::path::Path) -> ParanimResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
