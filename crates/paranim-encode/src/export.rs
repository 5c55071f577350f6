//! The animation exporter: sweeps the frame generator over one period and
//! streams the frames into a single animated image.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use paranim_core::{ContentHash, FrameBuffer, ParanimError, ParanimResult, ValidConfig};
use paranim_render::{parameter_values, FrameGenerator};

use crate::apng::ApngEncoder;
use crate::format::ExportFormat;
use crate::gif::GifEncoder;
use crate::sequence::{AnimationSequence, FrameDelay, LoopMode};

/// A fully encoded animation.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
    pub frame_count: usize,
    pub width: u32,
    pub height: u32,
    pub delay: FrameDelay,
    /// Hash of the raw frames before encoding.
    pub content_hash: ContentHash,
}

/// Drives a [`FrameGenerator`] across a parameter sweep and encodes the frames.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    generator: FrameGenerator,
    loop_mode: LoopMode,
}

impl Exporter {
    pub fn new(generator: FrameGenerator) -> Self {
        Self {
            generator,
            loop_mode: LoopMode::Infinite,
        }
    }

    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    pub fn generator(&self) -> &FrameGenerator {
        &self.generator
    }

    /// Lazily render the sweep, one frame per parameter value, in order.
    pub fn frames<'a>(
        &'a self,
        config: &'a ValidConfig,
    ) -> impl ExactSizeIterator<Item = FrameBuffer> + 'a {
        parameter_values(config.frame_count())
            .into_iter()
            .map(move |t| self.generator.render(t, config))
    }

    /// Render and encode. Returns either a complete artifact or an error.
    ///
    /// Frames are rendered as the encoder consumes them, so only one raw
    /// frame is alive at a time.
    pub fn export(&self, config: &ValidConfig, format: ExportFormat) -> ParanimResult<ExportArtifact> {
        let start = Instant::now();
        let delay = FrameDelay::from_fps(config.fps())?;
        let mut sequence = AnimationSequence::new(self.frames(config), delay)?;

        let bytes = match format {
            ExportFormat::Gif => GifEncoder::encode(&mut sequence, self.loop_mode)?,
            ExportFormat::Apng => ApngEncoder::encode(&mut sequence, self.loop_mode)?,
        };

        let artifact = ExportArtifact {
            format,
            frame_count: sequence.len(),
            width: sequence.width(),
            height: sequence.height(),
            delay: sequence.delay(),
            content_hash: sequence.content_hash(),
            bytes,
        };

        tracing::info!(
            format = %artifact.format,
            frames = artifact.frame_count,
            width = artifact.width,
            height = artifact.height,
            delay_ms = artifact.delay.as_millis_f64(),
            bytes = artifact.bytes.len(),
            total_ms = start.elapsed().as_secs_f64() * 1000.0,
            "export complete"
        );

        Ok(artifact)
    }

    /// Export and write the artifact to `path` atomically.
    pub fn export_to_file(
        &self,
        config: &ValidConfig,
        format: ExportFormat,
        path: &Path,
    ) -> ParanimResult<ExportArtifact> {
        let artifact = self.export(config, format)?;
        write_artifact_atomic(path, &artifact.bytes)?;
        Ok(artifact)
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    path.with_file_name(format!(".{}.part", name))
}

/// Write `bytes` to a sibling temp file, then rename it over `path`.
///
/// A failed write removes the temp file and leaves `path` untouched.
pub fn write_artifact_atomic(path: &Path, bytes: &[u8]) -> ParanimResult<()> {
    if path.file_name().is_none() {
        return Err(ParanimError::Encode(format!(
            "output path '{}' has no file name",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp = temp_path_for(path);
    let result = File::create(&tmp)
        .and_then(|mut f| {
            f.write_all(bytes)?;
            f.sync_all()
        })
        .and_then(|_| std::fs::rename(&tmp, path));

    if let Err(e) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(ParanimError::Io(e));
    }
    Ok(())
}
