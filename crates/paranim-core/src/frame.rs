use crate::Color;

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A single rendered frame as a raw RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Raw pixel data, row-major, 4 bytes per pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with zeros (transparent black).
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
        Self {
            data: vec![0u8; size],
            width,
            height,
        }
    }

    /// Create a frame buffer filled with a solid color.
    pub fn solid(width: u32, height: u32, color: &Color) -> Self {
        let pixel = color.to_rgba8();
        let pixel_count = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixel_count * BYTES_PER_PIXEL);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Whether `data` holds exactly `width * height` RGBA8 pixels. The public
    /// fields can be edited freely, so encoders check this before use.
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.pixel_count() * BYTES_PER_PIXEL
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * BYTES_PER_PIXEL)
    }

    /// Get the RGBA value at a pixel coordinate. Returns None if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let o = self.offset(x, y)?;
        Some([
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ])
    }

    /// Set the RGBA value at a pixel coordinate. No-op if out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(o) = self.offset(x, y) {
            self.data[o..o + BYTES_PER_PIXEL].copy_from_slice(&rgba);
        }
    }

    /// Source-over blend `src` onto the pixel at (x, y). No-op if out of bounds.
    ///
    /// Integer arithmetic only, so the result is bit-exact across platforms.
    pub fn blend_pixel(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let sa = src[3] as u32;
        if sa == 0 {
            return;
        }
        if sa == 255 {
            self.set_pixel(x, y, src);
            return;
        }
        let Some(dst) = self.get_pixel(x, y) else {
            return;
        };

        let da = dst[3] as u32;
        let inv_sa = 255 - sa;
        let out_a = sa + (da * inv_sa) / 255;
        if out_a == 0 {
            return;
        }

        let mut out = [0u8; 4];
        for c in 0..3 {
            let s = src[c] as u32;
            let dc = dst[c] as u32;
            out[c] = ((s * sa * 255 + dc * da * inv_sa) / (out_a * 255)) as u8;
        }
        out[3] = out_a as u8;
        self.set_pixel(x, y, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_buffer_new() {
        let fb = FrameBuffer::new(900, 900);
        assert_eq!(fb.width, 900);
        assert_eq!(fb.data.len(), 900 * 900 * 4);
        assert_eq!(fb.pixel_count(), 900 * 900);
        assert!(fb.is_well_formed());
        assert_eq!(fb.get_pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_frame_buffer_solid() {
        let fb = FrameBuffer::solid(2, 2, &Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(fb.get_pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(fb.get_pixel(1, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_frame_buffer_get_set_pixel() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.set_pixel(5, 5, [128, 64, 32, 255]);
        assert_eq!(fb.get_pixel(5, 5), Some([128, 64, 32, 255]));
    }

    #[test]
    fn test_frame_buffer_out_of_bounds() {
        let mut fb = FrameBuffer::new(10, 10);
        assert_eq!(fb.get_pixel(10, 0), None);
        assert_eq!(fb.get_pixel(0, 10), None);
        fb.set_pixel(10, 10, [1, 2, 3, 4]);
        fb.blend_pixel(10, 10, [1, 2, 3, 4]);
        assert!(fb.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_truncated_buffer_is_not_well_formed() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.data.truncate(10);
        assert!(!fb.is_well_formed());
    }

    #[test]
    fn test_blend_opaque_replaces() {
        let mut fb = FrameBuffer::solid(1, 1, &Color::rgb(0.0, 0.0, 1.0));
        fb.blend_pixel(0, 0, [255, 0, 0, 255]);
        assert_eq!(fb.get_pixel(0, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_blend_transparent_is_noop() {
        let mut fb = FrameBuffer::solid(1, 1, &Color::WHITE);
        fb.blend_pixel(0, 0, [255, 0, 0, 0]);
        assert_eq!(fb.get_pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_blend_semi_transparent_over_opaque() {
        let mut fb = FrameBuffer::solid(1, 1, &Color::BLACK);
        fb.blend_pixel(0, 0, [255, 255, 255, 128]);
        let p = fb.get_pixel(0, 0).unwrap();
        // Opaque destination stays opaque; color lands near the midpoint.
        assert_eq!(p[3], 255);
        assert!(p[0] > 120 && p[0] < 135, "got {:?}", p);
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
    }
}
