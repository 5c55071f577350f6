use image::codecs::gif::{GifEncoder as ImageGifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use paranim_core::{FrameBuffer, ParanimError, ParanimResult};

use crate::sequence::{AnimationSequence, LoopMode};

/// NeuQuant sampling speed passed to the `image` GIF encoder (1 = best, 30 = fastest).
const QUANTIZER_SPEED: i32 = 10;

/// Native GIF encoder using the `image` crate.
pub struct GifEncoder;

impl GifEncoder {
    /// Encode a sequence to an animated GIF held entirely in memory.
    ///
    /// Frames are quantized and written as they are pulled from the sequence.
    /// Nothing is returned unless every frame and the trailer were written.
    pub fn encode<I>(
        sequence: &mut AnimationSequence<I>,
        loop_mode: LoopMode,
    ) -> ParanimResult<Vec<u8>>
    where
        I: Iterator<Item = FrameBuffer>,
    {
        let delay_cs = sequence.delay().gif_centiseconds();
        let (width, height) = (sequence.width(), sequence.height());

        let mut out = Vec::new();
        {
            let mut encoder = ImageGifEncoder::new_with_speed(&mut out, QUANTIZER_SPEED);

            if let Some(repeat) = gif_repeat(loop_mode) {
                encoder.set_repeat(repeat).map_err(|e| {
                    ParanimError::Encode(format!("failed to set GIF repeat: {}", e))
                })?;
            }

            for (i, frame) in sequence.by_ref().enumerate() {
                let image = RgbaImage::from_raw(width, height, frame?.data).ok_or_else(|| {
                    ParanimError::Encode(format!("invalid frame data at frame {}", i))
                })?;
                let gif_frame = Frame::from_parts(
                    image,
                    0,
                    0,
                    Delay::from_numer_denom_ms(delay_cs as u32 * 10, 1),
                );
                encoder.encode_frame(gif_frame).map_err(|e| {
                    ParanimError::Encode(format!("failed to encode GIF frame {}: {}", i, e))
                })?;
            }
            sequence.ensure_complete()?;
            // Dropping the encoder writes the GIF trailer.
        }

        tracing::info!(
            "Encoded {} frames to GIF ({}x{}, delay={}cs, {} bytes)",
            sequence.len(),
            width,
            height,
            delay_cs,
            out.len(),
        );

        Ok(out)
    }
}

/// The NETSCAPE extension counts repeats after the first play, and a file
/// without it plays once.
fn gif_repeat(loop_mode: LoopMode) -> Option<Repeat> {
    match loop_mode.plays() {
        None => Some(Repeat::Infinite),
        Some(1) => None,
        Some(plays) => Some(Repeat::Finite(plays - 1)),
    }
}
