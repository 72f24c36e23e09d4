//! # Overlay Module
//!
//! Draws a short caption onto a raster image using the built-in 8x8 bitmap
//! font. Glyphs are scaled by an integer factor and clipped at the image
//! border.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

/// Caption drawn on every generated image
pub const OVERLAY_TEXT: &str = "Hook Text";
/// Top-left pixel offset of the caption
pub const OVERLAY_ORIGIN: (u32, u32) = (10, 10);
/// Caption fill color
pub const OVERLAY_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Width and height of one unscaled glyph cell
pub const GLYPH_SIZE: u32 = 8;

/// Placement and look of an overlay caption
#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    pub origin: (u32, u32),
    pub color: Rgba<u8>,
    /// Integer upscale applied to each glyph pixel
    pub scale: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            origin: OVERLAY_ORIGIN,
            color: OVERLAY_COLOR,
            scale: 2,
        }
    }
}

impl OverlayStyle {
    /// Pixel size (width, height) of `text` before clipping
    pub fn text_extent(&self, text: &str) -> (u32, u32) {
        let cell = GLYPH_SIZE * self.scale;
        (text.chars().count() as u32 * cell, cell)
    }
}

/// Draw `text` onto `image` in place.
///
/// Characters outside the basic Latin range render as blanks.
pub fn draw_text(image: &mut RgbaImage, text: &str, style: &OverlayStyle) {
    let (width, height) = image.dimensions();
    let cell = GLYPH_SIZE * style.scale;
    let (x0, y0) = style.origin;

    for (index, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch) else {
            continue;
        };
        let glyph_x = x0.saturating_add(index as u32 * cell);
        if glyph_x >= width {
            break;
        }

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = glyph_x + col * style.scale;
                let py = y0.saturating_add(row as u32 * style.scale);
                fill_block(image, px, py, style.scale, style.color, width, height);
            }
        }
    }
}

fn fill_block(
    image: &mut RgbaImage,
    x: u32,
    y: u32,
    size: u32,
    color: Rgba<u8>,
    width: u32,
    height: u32,
) {
    for dy in 0..size {
        for dx in 0..size {
            let (px, py) = (x.saturating_add(dx), y.saturating_add(dy));
            if px < width && py < height {
                image.put_pixel(px, py, color);
            }
        }
    }
}
