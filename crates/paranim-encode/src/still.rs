use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use paranim_core::{FrameBuffer, ParanimError, ParanimResult};

/// Encode a single frame as PNG, for previews.
pub fn encode_png(frame: &FrameBuffer) -> ParanimResult<Vec<u8>> {
    // The image encoders panic on a size mismatch.
    if !frame.is_well_formed() {
        return Err(ParanimError::Encode(format!(
            "frame buffer holds {} bytes, expected {} for {}x{}",
            frame.data.len(),
            frame.pixel_count() * paranim_core::frame::BYTES_PER_PIXEL,
            frame.width,
            frame.height
        )));
    }
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            &frame.data,
            frame.width,
            frame.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| ParanimError::Encode(format!("failed to encode PNG: {}", e)))?;
    Ok(out)
}
