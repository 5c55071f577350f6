//! # paranim-encode
//!
//! The animation exporter. Sweeps the frame generator over one period,
//! streams the frames through an [`AnimationSequence`] and encodes them as
//! an animated GIF (or APNG). Artifacts are built in memory and only written
//! to disk once complete.

pub mod apng;
pub mod export;
pub mod format;
pub mod gif;
pub mod sequence;
pub mod still;

pub use apng::ApngEncoder;
pub use export::{write_artifact_atomic, ExportArtifact, Exporter};
pub use format::ExportFormat;
pub use gif::GifEncoder;
pub use sequence::{AnimationSequence, FrameDelay, LoopMode};
pub use still::encode_png;
