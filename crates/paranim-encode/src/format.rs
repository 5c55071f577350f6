use std::fmt;
use std::path::Path;
use std::str::FromStr;

use paranim_core::ParanimError;

/// Animated image formats the exporter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Gif,
    Apng,
}

impl ExportFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ParanimError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                ParanimError::Encode(format!(
                    "cannot detect export format of '{}': no extension",
                    path.display()
                ))
            })?;
        ext.parse()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Gif => "gif",
            ExportFormat::Apng => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Gif => "image/gif",
            ExportFormat::Apng => "image/apng",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ParanimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gif" => Ok(ExportFormat::Gif),
            "apng" | "png" => Ok(ExportFormat::Apng),
            other => Err(ParanimError::Encode(format!(
                "unsupported export format '{}' (expected gif or apng)",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Gif => write!(f, "gif"),
            ExportFormat::Apng => write!(f, "apng"),
        }
    }
}
