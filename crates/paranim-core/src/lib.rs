//! # paranim-core
//!
//! Core types shared by every Paranim crate: frame buffers, colors, the
//! animation configuration and its validation, content hashing, and the
//! error type.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod hash;
pub mod math;
pub mod validate;

pub use config::*;

pub use color::Color;
pub use error::{ConfigIssue, ParanimError, ParanimResult};
pub use frame::FrameBuffer;
pub use hash::ContentHash;
pub use math::{Bounds2D, Point2D};
pub use validate::ValidConfig;
