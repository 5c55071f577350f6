//! The parametric point cloud.
//!
//! Ten thousand points are indexed from 9999 down to 0. Their seed
//! coordinates never change, so they are computed once and every frame only
//! evaluates the phase-dependent terms.

use paranim_core::{Bounds2D, Point2D};

/// Number of points in the cloud.
pub const POINT_COUNT: usize = 10_000;

/// Plot range in data coordinates (Y up).
pub const DATA_BOUNDS: Bounds2D = Bounds2D::new(70.0, 330.0, 30.0, 350.0);

/// Precomputed seed coordinates of the point cloud.
#[derive(Debug, Clone)]
pub struct PointField {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl PointField {
    pub fn new() -> Self {
        let (xs, ys) = (0..POINT_COUNT)
            .rev()
            .map(|i| {
                let i = i as f64;
                (i, i / 235.0)
            })
            .unzip();
        Self { xs, ys }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Evaluate every point at `phase`, in draw order.
    ///
    /// `amplitude` scales the displacement term; 1.0 is the reference shape.
    pub fn points(&self, phase: f64, amplitude: f64) -> Vec<Point2D> {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| evaluate(x, y, phase, amplitude))
            .collect()
    }
}

impl Default for PointField {
    fn default() -> Self {
        Self::new()
    }
}

fn evaluate(x: f64, y: f64, p: f64, amplitude: f64) -> Point2D {
    let k = (4.0 + (x / 11.0 + 8.0 * p).sin()) * (x / 14.0).cos();
    let e = y / 8.0 - 19.0;
    let d = (k * k + e * e).sqrt() + (y / 9.0 + 2.0 * p).sin();
    let q = amplitude
        * (2.0 * (2.0 * k).sin() + (y / 17.0).sin() * k * (9.0 + 2.0 * (y - 3.0 * d).sin()));
    let c = d * d / 49.0 - p;
    let xp = q + 50.0 * c.cos() + 200.0;
    let yp = q * c.sin() + d * 39.0 - 440.0;
    Point2D::new(xp, 400.0 - yp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_and_seeds() {
        let field = PointField::new();
        assert_eq!(field.len(), POINT_COUNT);
        assert_eq!(field.xs[0], 9999.0);
        assert_eq!(field.xs[POINT_COUNT - 1], 0.0);
        assert!((field.ys[0] - 9999.0 / 235.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_point_at_phase_zero() {
        // Point i = 0: k = 4 + sin(0) = 4, e = -19, d = sqrt(16 + 361) + 0.
        let field = PointField::new();
        let last = field.points(0.0, 1.0)[POINT_COUNT - 1];
        let k: f64 = 4.0;
        let d = (k * k + 361.0).sqrt();
        let q = 2.0 * (2.0 * k).sin();
        let c = d * d / 49.0;
        let expected_x = q + 50.0 * c.cos() + 200.0;
        let expected_y = 400.0 - (q * c.sin() + d * 39.0 - 440.0);
        assert!((last.x - expected_x).abs() < 1e-9);
        assert!((last.y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn test_zero_amplitude_lies_on_base_curve() {
        let field = PointField::new();
        for p in field.points(0.7, 0.0) {
            // With q = 0 every x sits on the 50-unit cosine band around 200.
            assert!(p.x >= 150.0 - 1e-9 && p.x <= 250.0 + 1e-9);
        }
    }

    #[test]
    fn test_points_are_finite_and_mostly_in_range() {
        let field = PointField::new();
        let pts = field.points(1.3, 1.0);
        assert!(pts.iter().all(|p| p.is_finite()));
        let inside = pts.iter().filter(|p| DATA_BOUNDS.contains(**p)).count();
        assert!(inside > POINT_COUNT * 9 / 10, "only {} points in range", inside);
    }

    #[test]
    fn test_phase_changes_points() {
        let field = PointField::new();
        assert_ne!(field.points(0.0, 1.0), field.points(0.5, 1.0));
    }
}
