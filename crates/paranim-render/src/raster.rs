//! Anti-aliased disc splatting onto a [`FrameBuffer`].

use paranim_core::{Color, FrameBuffer, Point2D};

/// Below this radius a marker is drawn as a bilinear splat carrying the
/// disc's area instead of an edge-distance coverage mask.
const SPLAT_RADIUS: f64 = 0.5;

/// Draws scatter markers of a fixed radius and color.
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    radius: f64,
    rgb: [u8; 3],
    alpha: f64,
}

impl Rasterizer {
    /// `radius` in pixels; `color` alpha is multiplied by `opacity`.
    pub fn new(radius: f64, color: Color, opacity: f64) -> Self {
        let color = color.with_opacity(opacity as f32);
        let [r, g, b, _] = color.to_rgba8();
        Self {
            radius,
            rgb: [r, g, b],
            alpha: color.a as f64,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Blend one disc centered at `center` (pixel coordinates, continuous).
    /// Parts outside the buffer are clipped.
    pub fn draw_disc(&self, fb: &mut FrameBuffer, center: Point2D) {
        if self.radius <= 0.0 || self.alpha <= 0.0 || !center.is_finite() {
            return;
        }

        let reach = self.radius.max(SPLAT_RADIUS) + 0.5;
        let x0 = (center.x - reach).floor().max(0.0);
        let y0 = (center.y - reach).floor().max(0.0);
        let x1 = (center.x + reach).ceil().min(fb.width as f64 - 1.0);
        let y1 = (center.y + reach).ceil().min(fb.height as f64 - 1.0);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let area = std::f64::consts::PI * self.radius * self.radius;
        for py in y0 as u32..=y1 as u32 {
            for px in x0 as u32..=x1 as u32 {
                let dx = px as f64 + 0.5 - center.x;
                let dy = py as f64 + 0.5 - center.y;
                let coverage = if self.radius < SPLAT_RADIUS {
                    let wx = (1.0 - dx.abs()).max(0.0);
                    let wy = (1.0 - dy.abs()).max(0.0);
                    wx * wy * area
                } else {
                    (self.radius + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0)
                };
                let a = (self.alpha * coverage * 255.0).round() as u8;
                if a > 0 {
                    fb.blend_pixel(px, py, [self.rgb[0], self.rgb[1], self.rgb[2], a]);
                }
            }
        }
    }
}
