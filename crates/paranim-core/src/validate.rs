use std::ops::RangeInclusive;

use crate::config::AnimationConfig;
use crate::error::{ConfigIssue, ParanimError, ParanimResult};
use crate::Color;

pub const FREQUENCY_MAX: f64 = 100.0;
pub const AMPLITUDE_MAX: f64 = 10.0;
pub const POINT_SIZE_MAX: f64 = 50.0;
pub const FRAME_COUNT_RANGE: RangeInclusive<u32> = 1..=1000;
pub const FPS_RANGE: RangeInclusive<u32> = 1..=100;
pub const SIZE_RANGE: RangeInclusive<u32> = 16..=2048;
/// Upper bound on `frame_count * size * size` for a single export.
pub const MAX_EXPORT_PIXELS: u64 = 500_000_000;

/// An [`AnimationConfig`] that passed validation, with its colors parsed.
///
/// Only [`AnimationConfig::validate`] can build one, so anything holding a
/// `ValidConfig` never has to re-check ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidConfig {
    frequency: f64,
    amplitude: f64,
    frame_count: u32,
    fps: u32,
    point_size: f64,
    background: Color,
    dot_color: Color,
    size: u32,
    preview_t: f64,
}

impl ValidConfig {
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn point_size(&self) -> f64 {
        self.point_size
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn dot_color(&self) -> Color {
        self.dot_color
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn preview_t(&self) -> f64 {
        self.preview_t
    }
}

impl AnimationConfig {
    /// Check every field and collect all problems at once.
    pub fn validate(&self) -> ParanimResult<ValidConfig> {
        let mut issues = Vec::new();

        check_float(
            &mut issues,
            "frequency",
            self.frequency,
            |v| v > 0.0 && v <= FREQUENCY_MAX,
            format!("must be greater than 0 and at most {}", FREQUENCY_MAX),
        );
        check_float(
            &mut issues,
            "amplitude",
            self.amplitude,
            |v| (0.0..=AMPLITUDE_MAX).contains(&v),
            format!("must be between 0 and {}", AMPLITUDE_MAX),
        );
        check_float(
            &mut issues,
            "point_size",
            self.point_size,
            |v| v > 0.0 && v <= POINT_SIZE_MAX,
            format!("must be greater than 0 and at most {}", POINT_SIZE_MAX),
        );
        // Any finite scrub position is fine; it wraps through the trig terms.
        check_float(&mut issues, "preview_t", self.preview_t, |_| true, String::new());

        check_range(&mut issues, "frame_count", self.frame_count, FRAME_COUNT_RANGE);
        check_range(&mut issues, "fps", self.fps, FPS_RANGE);
        check_range(&mut issues, "size", self.size, SIZE_RANGE);
        if FRAME_COUNT_RANGE.contains(&self.frame_count) && SIZE_RANGE.contains(&self.size) {
            check_pixel_budget(&mut issues, self.frame_count, self.size);
        }

        let background = parse_color(&mut issues, "background", &self.background);
        let dot_color = parse_color(&mut issues, "dot_color", &self.dot_color);

        match (background, dot_color) {
            (Some(background), Some(dot_color)) if issues.is_empty() => Ok(ValidConfig {
                frequency: self.frequency,
                amplitude: self.amplitude,
                frame_count: self.frame_count,
                fps: self.fps,
                point_size: self.point_size,
                background,
                dot_color,
                size: self.size,
                preview_t: self.preview_t,
            }),
            _ => Err(ParanimError::ConfigValidation(issues)),
        }
    }
}

fn check_float(
    issues: &mut Vec<ConfigIssue>,
    field: &'static str,
    value: f64,
    ok: impl Fn(f64) -> bool,
    message: String,
) {
    if !value.is_finite() {
        issues.push(ConfigIssue::new(field, "must be a finite number"));
    } else if !ok(value) {
        issues.push(ConfigIssue::new(field, format!("{} (got {})", message, value)));
    }
}

fn check_range(
    issues: &mut Vec<ConfigIssue>,
    field: &'static str,
    value: u32,
    range: RangeInclusive<u32>,
) {
    if !range.contains(&value) {
        issues.push(ConfigIssue::new(
            field,
            format!(
                "must be between {} and {} (got {})",
                range.start(),
                range.end(),
                value
            ),
        ));
    }
}

fn check_pixel_budget(issues: &mut Vec<ConfigIssue>, frame_count: u32, size: u32) {
    let pixels = frame_count as u64 * size as u64 * size as u64;
    if pixels > MAX_EXPORT_PIXELS {
        let max_frames = MAX_EXPORT_PIXELS / (size as u64 * size as u64);
        issues.push(ConfigIssue::new(
            "frame_count",
            format!(
                "{} frames at {}x{} exceeds the export budget of {} pixels (at most {} frames at this size)",
                frame_count, size, size, MAX_EXPORT_PIXELS, max_frames
            ),
        ));
    }
}

fn parse_color(issues: &mut Vec<ConfigIssue>, field: &'static str, value: &str) -> Option<Color> {
    match Color::from_hex(value) {
        Ok(c) => Some(c),
        Err(e) => {
            issues.push(ConfigIssue::new(field, format!("{} '{}'", e, value)));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(err: &ParanimError) -> Vec<&'static str> {
        err.issues().iter().map(|i| i.field).collect()
    }

    #[test]
    fn test_default_config_is_valid() {
        let valid = AnimationConfig::default().validate().unwrap();
        assert_eq!(valid.frame_count(), 180);
        assert_eq!(valid.background().to_rgba8(), [9, 9, 9, 255]);
        assert_eq!(valid.dot_color(), Color::WHITE);
    }

    #[test]
    fn test_small_export_config_is_valid() {
        let config = AnimationConfig {
            frequency: 1.0,
            amplitude: 1.0,
            frame_count: 24,
            fps: 12,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_frame_count_rejected() {
        let config = AnimationConfig {
            frame_count: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(fields(&err), vec!["frame_count"]);
    }

    #[test]
    fn test_negative_frequency_rejected() {
        let config = AnimationConfig {
            frequency: -1.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(fields(&err), vec!["frequency"]);
        assert!(err.to_string().contains("got -1"));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let config = AnimationConfig {
            amplitude: f64::NAN,
            preview_t: f64::INFINITY,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(fields(&err), vec!["amplitude", "preview_t"]);
    }

    #[test]
    fn test_all_issues_collected() {
        let config = AnimationConfig {
            frequency: 0.0,
            fps: 0,
            size: 4,
            point_size: 0.0,
            background: "not-a-color".into(),
            dot_color: "#12345".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            fields(&err),
            vec!["frequency", "point_size", "fps", "size", "background", "dot_color"]
        );
    }

    #[test]
    fn test_boundaries_accepted() {
        let config = AnimationConfig {
            frequency: FREQUENCY_MAX,
            amplitude: 0.0,
            frame_count: *FRAME_COUNT_RANGE.end(),
            fps: *FPS_RANGE.start(),
            size: *SIZE_RANGE.start(),
            point_size: POINT_SIZE_MAX,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pixel_budget_caps_large_exports() {
        let config = AnimationConfig {
            frame_count: *FRAME_COUNT_RANGE.end(),
            size: *SIZE_RANGE.end(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(fields(&err), vec!["frame_count"]);
        assert!(err.to_string().contains("at most 119 frames"));

        let config = AnimationConfig {
            frame_count: 119,
            size: *SIZE_RANGE.end(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pixel_budget_skipped_when_out_of_range() {
        let config = AnimationConfig {
            frame_count: 5000,
            size: *SIZE_RANGE.end(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert!(err.to_string().contains("between 1 and 1000"));
    }
}
