//! Text rasterization for titles and axis captions.
//!
//! Glyphs come from a system font loaded through `fontdue`. When no font can
//! be found the renderer degrades gracefully: layout and label bookkeeping
//! still happen, only the glyph pixels are skipped. Panels therefore render
//! on fontless CI machines without erroring.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use fontdue::{Font, FontSettings};

/// Candidate sans-serif font files probed in order on Linux.
#[cfg(target_os = "linux")]
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

/// Candidate sans-serif font files probed in order on macOS.
#[cfg(target_os = "macos")]
const FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/HelveticaNeue.ttc",
];

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
const FONT_PATHS: &[&str] = &[];

/// Rasterizes horizontal and rotated text into a framebuffer.
#[derive(Debug)]
pub struct TextRenderer {
    font: Option<Font>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    /// Create a renderer, probing for a usable system font.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font: load_system_font(),
        }
    }

    /// Whether a font was found; without one, drawing is a no-op.
    #[must_use]
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Pixel width and height a text line occupies at the given size.
    ///
    /// Returns `(0, 0)` when no font is loaded or the text is empty.
    #[must_use]
    pub fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        let Some(font) = &self.font else {
            return (0, 0);
        };
        if text.is_empty() {
            return (0, 0);
        }

        let width: f32 = text
            .chars()
            .map(|ch| font.metrics(ch, size).advance_width)
            .sum();

        (width.ceil() as u32, size.ceil() as u32)
    }

    /// Draw a single line of text with `(x, y)` as the top-left corner.
    pub fn draw_text(&self, fb: &mut Framebuffer, x: i32, y: i32, text: &str, size: f32, color: Rgba) {
        let Some(font) = &self.font else {
            return;
        };

        // Baseline sits a full em below the top of the line box
        let baseline = y + size.ceil() as i32;
        let mut pen_x = x as f32;

        for ch in text.chars() {
            let (metrics, bitmap) = font.rasterize(ch, size);

            let glyph_x = (pen_x + metrics.xmin as f32).round() as i32;
            let glyph_y = baseline - metrics.height as i32 - metrics.ymin;

            for (row_idx, row) in bitmap.chunks(metrics.width.max(1)).enumerate() {
                let py = glyph_y + row_idx as i32;
                if py < 0 {
                    continue;
                }
                for (col_idx, &coverage) in row.iter().enumerate() {
                    if coverage == 0 {
                        continue;
                    }
                    let px = glyph_x + col_idx as i32;
                    if px < 0 {
                        continue;
                    }
                    let src_a = ((u16::from(coverage) * u16::from(color.a)) / 255) as u8;
                    fb.blend_pixel(px as u32, py as u32, color.with_alpha(src_a));
                }
            }

            pen_x += metrics.advance_width;
        }
    }

    /// Draw a line of text centered horizontally around `center_x`.
    pub fn draw_text_centered(
        &self,
        fb: &mut Framebuffer,
        center_x: i32,
        y: i32,
        text: &str,
        size: f32,
        color: Rgba,
    ) {
        let (w, _) = self.measure(text, size);
        self.draw_text(fb, center_x - (w as i32) / 2, y, text, size, color);
    }

    /// Draw text rotated 90 degrees counter-clockwise, reading bottom-to-top.
    ///
    /// `(x, y)` is the top-left corner of the rotated text box, whose width
    /// is the line height and whose height is the text width.
    pub fn draw_text_vertical(
        &self,
        fb: &mut Framebuffer,
        x: i32,
        y: i32,
        text: &str,
        size: f32,
        color: Rgba,
    ) {
        let (w, h) = self.measure(text, size);
        if w == 0 || h == 0 {
            return;
        }

        // Render horizontally into a scratch buffer, then transpose the
        // pixels 90 degrees counter-clockwise into the destination.
        let Ok(mut scratch) = Framebuffer::new(w, h) else {
            return;
        };
        scratch.clear(Rgba::TRANSPARENT);
        self.draw_text(&mut scratch, 0, 0, text, size, color);

        for ty in 0..h {
            for tx in 0..w {
                let Some(pixel) = scratch.get_pixel(tx, ty) else {
                    continue;
                };
                if pixel.a == 0 {
                    continue;
                }
                let dx = x + ty as i32;
                let dy = y + (w - 1 - tx) as i32;
                if dx >= 0 && dy >= 0 {
                    fb.blend_pixel(dx as u32, dy as u32, pixel);
                }
            }
        }
    }
}

/// Probe the platform font paths; `None` when no font file parses.
fn load_system_font() -> Option<Font> {
    let settings = FontSettings::default();

    for path in FONT_PATHS {
        if let Ok(data) = std::fs::read(path) {
            if let Ok(font) = Font::from_bytes(data, settings) {
                return Some(font);
            }
        }
    }

    None
}
