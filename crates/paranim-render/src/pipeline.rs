use std::f64::consts::{PI, TAU};
use std::sync::Arc;
use std::time::Instant;

use paranim_core::{FrameBuffer, ValidConfig};

use crate::field::{PointField, DATA_BOUNDS};
use crate::raster::Rasterizer;
use crate::viewport::Viewport;

/// Opacity applied on top of the dot color's own alpha.
pub const DOT_OPACITY: f64 = 0.9;

/// The canvas is treated as a figure this many inches wide, which fixes the
/// DPI used to turn marker areas (points squared) into pixel radii.
pub const FIGURE_INCHES: f64 = 6.0;

/// `frame_count` parameter values evenly spaced over one period, both
/// endpoints included. A single frame samples only `t = 0`.
pub fn parameter_values(frame_count: u32) -> Vec<f64> {
    match frame_count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let step = TAU / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { TAU } else { i as f64 * step })
                .collect()
        }
    }
}

/// Marker radius in pixels for a scatter size given in points squared.
pub fn marker_radius(point_size: f64, canvas_size: u32) -> f64 {
    let dpi = canvas_size as f64 / FIGURE_INCHES;
    (point_size / PI).sqrt() * dpi / 72.0
}

/// Renders one frame of the point cloud for a parameter value.
///
/// Cheap to clone: the precomputed field is shared.
#[derive(Debug, Clone, Default)]
pub struct FrameGenerator {
    field: Arc<PointField>,
}

impl FrameGenerator {
    pub fn new() -> Self {
        Self {
            field: Arc::new(PointField::new()),
        }
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    /// Render the frame at parameter `t`. Identical inputs always produce
    /// byte-identical buffers.
    pub fn render(&self, t: f64, config: &ValidConfig) -> FrameBuffer {
        let start = Instant::now();
        let size = config.size();
        let mut fb = FrameBuffer::solid(size, size, &config.background());

        let viewport = Viewport::fit(DATA_BOUNDS, size);
        let raster = Rasterizer::new(
            marker_radius(config.point_size(), size),
            config.dot_color(),
            DOT_OPACITY,
        );

        let phase = config.frequency() * t;
        for p in self.field.points(phase, config.amplitude()) {
            raster.draw_disc(&mut fb, viewport.to_pixel(p));
        }

        tracing::debug!(
            t,
            size,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "rendered frame"
        );
        fb
    }

    /// Render the frame at the configured preview position.
    pub fn render_preview(&self, config: &ValidConfig) -> FrameBuffer {
        self.render(config.preview_t(), config)
    }
}
