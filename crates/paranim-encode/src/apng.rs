use paranim_core::{FrameBuffer, ParanimError, ParanimResult};

use crate::sequence::{AnimationSequence, LoopMode};

/// Native APNG (Animated PNG) encoder using the `png` crate.
/// Lossless alternative to GIF, no palette quantization.
pub struct ApngEncoder;

impl ApngEncoder {
    /// Encode a sequence to an Animated PNG held entirely in memory.
    ///
    /// The acTL chunk announces the frame count up front, which is why the
    /// sequence knows its length before any frame is rendered past the first.
    pub fn encode<I>(
        sequence: &mut AnimationSequence<I>,
        loop_mode: LoopMode,
    ) -> ParanimResult<Vec<u8>>
    where
        I: Iterator<Item = FrameBuffer>,
    {
        let (delay_num, delay_den) = sequence.delay().apng_fraction()?;
        // num_plays counts total plays; 0 means forever.
        let num_plays = loop_mode.plays().map_or(0, u32::from);
        let frame_total = u32::try_from(sequence.len())
            .map_err(|_| ParanimError::Encode("too many frames for APNG".into()))?;

        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, sequence.width(), sequence.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .set_animated(frame_total, num_plays)
            .map_err(|e| ParanimError::Encode(format!("failed to set APNG animation: {}", e)))?;
        encoder
            .set_frame_delay(delay_num, delay_den)
            .map_err(|e| ParanimError::Encode(format!("failed to set APNG frame delay: {}", e)))?;

        let mut writer = encoder
            .write_header()
            .map_err(|e| ParanimError::Encode(format!("failed to write APNG header: {}", e)))?;

        for (i, frame) in sequence.by_ref().enumerate() {
            let frame = frame?;
            writer.set_frame_delay(delay_num, delay_den).map_err(|e| {
                ParanimError::Encode(format!("failed to set delay on frame {}: {}", i, e))
            })?;
            writer.write_image_data(&frame.data).map_err(|e| {
                ParanimError::Encode(format!("failed to write APNG frame {}: {}", i, e))
            })?;
        }
        sequence.ensure_complete()?;

        writer
            .finish()
            .map_err(|e| ParanimError::Encode(format!("failed to finalize APNG: {}", e)))?;

        tracing::info!(
            "Encoded {} frames to APNG ({}x{} @ {}fps, {} bytes)",
            sequence.len(),
            sequence.width(),
            sequence.height(),
            sequence.delay().fps(),
            out.len(),
        );

        Ok(out)
    }
}
