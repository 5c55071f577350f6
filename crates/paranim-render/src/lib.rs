//! # paranim-render
//!
//! The frame generator. Evaluates the parametric point cloud for a
//! parameter value and rasterizes it as a scatter plot into a frame buffer.
//! Single-threaded and deterministic.

pub mod field;
pub mod pipeline;
pub mod raster;
pub mod viewport;

pub use field::{PointField, DATA_BOUNDS, POINT_COUNT};
pub use pipeline::{marker_radius, parameter_values, FrameGenerator};
pub use raster::Rasterizer;
pub use viewport::Viewport;
