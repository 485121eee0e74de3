use std::{fmt, path::Path, sync::Arc};

use font8x8::{
    UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, HIRAGANA_FONTS, LATIN_FONTS,
    MISC_FONTS,
};
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

const BITMAP_GLYPH_SIZE: u32 = 8;

#[derive(Debug, thiserror::Error)]
pub enum TypefaceError {
    #[error("failed to read font file: {0}")]
    Io(#[from] std::io::Error),
    #[error("font file is not a usable TrueType/OpenType font")]
    InvalidFont,
}

/// The face card text is drawn with.
///
/// `Outline` uses a TrueType/OpenType font from disk. `Bitmap` is the
/// built-in 8×8 face, scaled in whole pixels, used when no font is
/// configured.
#[derive(Clone, Default)]
pub enum Typeface {
    Outline(Arc<Font<'static>>),
    #[default]
    Bitmap,
}

impl Typeface {
    pub fn load(path: &Path) -> Result<Self, TypefaceError> {
        let bytes = std::fs::read(path)?;
        let font = Font::try_from_vec(bytes).ok_or(TypefaceError::InvalidFont)?;
        Ok(Self::Outline(Arc::new(font)))
    }

    /// Width in pixels of `text` drawn at `px` pixels high.
    pub fn text_width(&self, px: f32, text: &str) -> u32 {
        match self {
            Self::Outline(font) => {
                let scale = Scale::uniform(px);
                let ascent = font.v_metrics(scale).ascent;
                font.layout(text, scale, point(0.0, ascent))
                    .filter_map(|glyph| glyph.pixel_bounding_box())
                    .map(|bb| bb.max.x.max(0) as u32)
                    .max()
                    .unwrap_or(0)
            }
            Self::Bitmap => text.chars().count() as u32 * BITMAP_GLYPH_SIZE * bitmap_scale(px),
        }
    }

    /// Draws `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, image: &mut RgbaImage, px: f32, x: i32, y: i32, color: Rgba<u8>, text: &str) {
        match self {
            Self::Outline(font) => draw_outline(image, font, px, x, y, color, text),
            Self::Bitmap => draw_bitmap(image, px, x, y, color, text),
        }
    }
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outline(_) => f.write_str("Typeface::Outline"),
            Self::Bitmap => f.write_str("Typeface::Bitmap"),
        }
    }
}

fn bitmap_scale(px: f32) -> u32 {
    ((px / BITMAP_GLYPH_SIZE as f32).round() as u32).max(1)
}

fn draw_outline(
    image: &mut RgbaImage,
    font: &Font<'static>,
    px: f32,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    let scale = Scale::uniform(px);
    let ascent = font.v_metrics(scale).ascent;

    for glyph in font.layout(text, scale, point(x as f32, y as f32 + ascent)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            blend(
                image,
                gx as i32 + bb.min.x,
                gy as i32 + bb.min.y,
                color,
                coverage,
            );
        });
    }
}

/// Looks `c` up across every `font8x8` table, falling back to `?`.
fn bitmap_glyph(c: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| GREEK_FONTS.get(c))
        .or_else(|| MISC_FONTS.get(c))
        .or_else(|| BOX_FONTS.get(c))
        .or_else(|| BLOCK_FONTS.get(c))
        .or_else(|| HIRAGANA_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
}

fn draw_bitmap(image: &mut RgbaImage, px: f32, x: i32, y: i32, color: Rgba<u8>, text: &str) {
    let scale = bitmap_scale(px) as i32;
    let advance = BITMAP_GLYPH_SIZE as i32 * scale;

    for (i, c) in text.chars().enumerate() {
        let Some(rows) = bitmap_glyph(c) else {
            continue;
        };
        let left = x + i as i32 * advance;

        for (row, bits) in rows.iter().enumerate() {
            for col in 0..BITMAP_GLYPH_SIZE as i32 {
                if bits & (1 << col) == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        blend(
                            image,
                            left + col * scale + sx,
                            y + row as i32 * scale + sy,
                            color,
                            1.0,
                        );
                    }
                }
            }
        }
    }
}

fn blend(image: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= image.width() || y as u32 >= image.height() {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0) * color.0[3] as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }

    let dst = image.get_pixel_mut(x as u32, y as u32);
    let inv = 1.0 - alpha;
    for channel in 0..3 {
        dst.0[channel] =
            (color.0[channel] as f32 * alpha + dst.0[channel] as f32 * inv).round() as u8;
    }
    dst.0[3] = 255;
}
