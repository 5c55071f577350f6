use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use paranim_encode::ExportFormat;

/// `parametric_YYYYmmdd_HHMMSS.<ext>`, the download name for exports.
pub fn export_file_name<Tz: TimeZone>(format: ExportFormat, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "parametric_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Default export destination inside `output_dir`.
pub fn default_export_path(output_dir: &Path, format: ExportFormat) -> PathBuf {
    output_dir.join(export_file_name(format, &chrono::Local::now()))
}

/// Default preview destination inside `output_dir`.
pub fn default_preview_path(output_dir: &Path) -> PathBuf {
    output_dir.join("preview.png")
}
