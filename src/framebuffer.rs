//! Core framebuffer for pixel rendering.
//!
//! Provides an RGBA pixel buffer that every panel renders into. Panels are
//! composed into the shared figure by [`Framebuffer::blit`], so rows are kept
//! tightly packed (stride == width * 4) and encoders can consume
//! [`Framebuffer::pixels`] directly.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// RGBA framebuffer with tightly packed rows.
///
/// Each pixel is 4 bytes `[R, G, B, A]` in row-major order. One framebuffer
/// is created per facet panel and one for the composed figure; there is no
/// shared or ambient figure state.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGBA pixels in row-major order.
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a new framebuffer with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use jointgrid::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let size = (width as usize) * (height as usize) * 4;
        let pixels = vec![0u8; size];

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Get the raw pixel data as a slice.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get the raw pixel data as a mutable slice.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Get a row of pixels as a slice.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * (self.width as usize) * 4;
        let end = start + (self.width as usize) * 4;
        Some(&self.pixels[start..end])
    }

    /// Get a row of pixels as a mutable slice.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * (self.width as usize) * 4;
        let end = start + (self.width as usize) * 4;
        Some(&mut self.pixels[start..end])
    }

    /// Clear the framebuffer to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        let [r, g, b, a] = color.to_array();

        // 64-byte pattern (16 pixels) so the fill runs as wide copies
        let pattern: [u8; 64] = {
            let mut p = [0u8; 64];
            for i in 0..16 {
                p[i * 4] = r;
                p[i * 4 + 1] = g;
                p[i * 4 + 2] = b;
                p[i * 4 + 3] = a;
            }
            p
        };

        let mut offset = 0;
        while offset + 64 <= self.pixels.len() {
            self.pixels[offset..offset + 64].copy_from_slice(&pattern);
            offset += 64;
        }

        for chunk in self.pixels[offset..].chunks_exact_mut(4) {
            chunk[0] = r;
            chunk[1] = g;
            chunk[2] = b;
            chunk[3] = a;
        }
    }

    /// Fill a rectangular region with a solid color.
    ///
    /// Coordinates are clamped to framebuffer bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let [r, g, b, a] = color.to_array();
        let rect_width = (x2 - x1) as usize;

        for row_y in y1..y2 {
            let row_start = ((row_y as usize) * (self.width as usize) + (x1 as usize)) * 4;
            let row = &mut self.pixels[row_start..row_start + rect_width * 4];

            for chunk in row.chunks_exact_mut(4) {
                chunk[0] = r;
                chunk[1] = g;
                chunk[2] = b;
                chunk[3] = a;
            }
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        Some(Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Set the color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        let [r, g, b, a] = color.to_array();
        self.pixels[idx] = r;
        self.pixels[idx + 1] = g;
        self.pixels[idx + 2] = b;
        self.pixels[idx + 3] = a;
    }

    /// Blend a color at a specific pixel coordinate using alpha blending.
    ///
    /// Uses the standard "over" compositing operation:
    /// `out = src * src_alpha + dst * dst_alpha * (1 - src_alpha)`
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(self.pixels[idx + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        if out_a > 0.0 {
            let blend = |src: u8, dst: u8| -> u8 {
                let src_f = f32::from(src) / 255.0;
                let dst_f = f32::from(dst) / 255.0;
                let out = (src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a;
                (out * 255.0) as u8
            };

            self.pixels[idx] = blend(color.r, self.pixels[idx]);
            self.pixels[idx + 1] = blend(color.g, self.pixels[idx + 1]);
            self.pixels[idx + 2] = blend(color.b, self.pixels[idx + 2]);
            self.pixels[idx + 3] = (out_a * 255.0) as u8;
        }
    }

    /// Copy another framebuffer's pixels into this one at `(dest_x, dest_y)`.
    ///
    /// Source rows falling outside this framebuffer are clipped. This is the
    /// merge operation of the grid composer: each finished panel is blitted
    /// into its cell rectangle.
    pub fn blit(&mut self, src: &Framebuffer, dest_x: u32, dest_y: u32) {
        if dest_x >= self.width || dest_y >= self.height {
            return;
        }

        let copy_width = (src.width.min(self.width - dest_x) as usize) * 4;
        let copy_height = src.height.min(self.height - dest_y);

        for sy in 0..copy_height {
            let src_start = (sy as usize) * (src.width as usize) * 4;
            let dst_start =
                (((dest_y + sy) as usize) * (self.width as usize) + (dest_x as usize)) * 4;
            self.pixels[dst_start..dst_start + copy_width]
                .copy_from_slice(&src.pixels[src_start..src_start + copy_width]);
        }
    }

    /// Calculate the byte index for a pixel coordinate.
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_framebuffer() {
        let fb = Framebuffer::new(100, 50).unwrap();
        assert_eq!(fb.width(), 100);
        assert_eq!(fb.height(), 50);
        assert_eq!(fb.pixel_count(), 5000);
        assert_eq!(fb.pixels().len(), 5000 * 4);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Framebuffer::new(0, 100).is_err());
        assert!(Framebuffer::new(100, 0).is_err());
        assert!(Framebuffer::new(0, 0).is_err());
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::RED);

        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(fb.get_pixel(x, y), Some(Rgba::RED));
            }
        }
    }

    #[test]
    fn test_clear_large() {
        let mut fb = Framebuffer::new(1920, 1080).unwrap();
        fb.clear(Rgba::BLUE);

        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(959, 539), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(1919, 1079), Some(Rgba::BLUE));
    }

    #[test]
    fn test_fill_rect() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);
        fb.fill_rect(10, 10, 20, 20, Rgba::RED);

        // Inside rect
        assert_eq!(fb.get_pixel(15, 15), Some(Rgba::RED));
        // Outside rect
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_fill_rect_clamps() {
        let mut fb = Framebuffer::new(20, 20).unwrap();
        fb.clear(Rgba::WHITE);
        fb.fill_rect(15, 15, 100, 100, Rgba::RED);

        assert_eq!(fb.get_pixel(19, 19), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(14, 14), Some(Rgba::WHITE));
    }

    #[test]
    fn test_set_get_pixel() {
        let mut fb = Framebuffer::new(10, 10).unwrap();

        fb.set_pixel(5, 5, Rgba::BLUE);
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::BLUE));

        // Out of bounds
        assert_eq!(fb.get_pixel(100, 100), None);
    }

    #[test]
    fn test_blend_pixel() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::WHITE);

        // Blend semi-transparent red
        let semi_red = Rgba::new(255, 0, 0, 128);
        fb.blend_pixel(5, 5, semi_red);

        let result = fb.get_pixel(5, 5).unwrap();
        // Should be pinkish (blend of red and white)
        assert!(result.r > 200);
        assert!(result.g > 100);
        assert!(result.b > 100);
    }

    #[test]
    fn test_blit_inside() {
        let mut dst = Framebuffer::new(40, 40).unwrap();
        dst.clear(Rgba::WHITE);

        let mut src = Framebuffer::new(10, 10).unwrap();
        src.clear(Rgba::GREEN);

        dst.blit(&src, 20, 5);

        assert_eq!(dst.get_pixel(20, 5), Some(Rgba::GREEN));
        assert_eq!(dst.get_pixel(29, 14), Some(Rgba::GREEN));
        assert_eq!(dst.get_pixel(19, 5), Some(Rgba::WHITE));
        assert_eq!(dst.get_pixel(30, 5), Some(Rgba::WHITE));
        assert_eq!(dst.get_pixel(20, 15), Some(Rgba::WHITE));
    }

    #[test]
    fn test_blit_clips_at_edges() {
        let mut dst = Framebuffer::new(20, 20).unwrap();
        dst.clear(Rgba::WHITE);

        let mut src = Framebuffer::new(10, 10).unwrap();
        src.clear(Rgba::RED);

        dst.blit(&src, 15, 15);

        assert_eq!(dst.get_pixel(19, 19), Some(Rgba::RED));
        assert_eq!(dst.get_pixel(14, 14), Some(Rgba::WHITE));

        // Entirely out of bounds is a no-op
        dst.blit(&src, 25, 25);
        assert_eq!(dst.get_pixel(0, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_blit_preserves_source() {
        let mut dst = Framebuffer::new(20, 20).unwrap();
        let mut src = Framebuffer::new(5, 5).unwrap();
        src.clear(Rgba::BLUE);

        dst.blit(&src, 0, 0);
        assert_eq!(src.get_pixel(2, 2), Some(Rgba::BLUE));
    }

    #[test]
    fn test_row_access() {
        let mut fb = Framebuffer::new(10, 5).unwrap();
        fb.clear(Rgba::BLACK);

        // Modify a row
        if let Some(row) = fb.row_mut(2) {
            for chunk in row.chunks_exact_mut(4) {
                chunk[0] = 255; // Set red
            }
        }

        // Verify
        assert_eq!(fb.get_pixel(5, 2).unwrap().r, 255);
        assert_eq!(fb.get_pixel(5, 1).unwrap().r, 0);
    }
}
