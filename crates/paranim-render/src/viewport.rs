use paranim_core::{Bounds2D, Point2D};

/// Fraction of the canvas left empty on each side of the plot.
pub const MARGIN: f64 = 0.05;

/// Maps data coordinates onto a square pixel canvas with equal aspect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    data: Bounds2D,
    canvas_size: u32,
    scale: f64,
}

impl Viewport {
    /// Fit `data` into a `canvas_size` square, centered, Y pointing up.
    pub fn fit(data: Bounds2D, canvas_size: u32) -> Self {
        let usable = canvas_size as f64 * (1.0 - 2.0 * MARGIN);
        let scale = (usable / data.width()).min(usable / data.height());
        Self {
            data,
            canvas_size,
            scale,
        }
    }

    /// Pixels per data unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }

    /// Convert a data-space point to continuous pixel coordinates.
    pub fn to_pixel(&self, p: Point2D) -> Point2D {
        let half = self.canvas_size as f64 * 0.5;
        let center = self.data.center();
        Point2D::new(
            half + (p.x - center.x) * self.scale,
            half - (p.y - center.y) * self.scale,
        )
    }
}
