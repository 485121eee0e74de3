mod info_renderer;
mod qr_encoder;
mod typeface;

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

pub use info_renderer::*;
pub use qr_encoder::*;
pub use typeface::*;

fn encode_png(image: RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Whether the pixel at `(x, y)` lies inside a `w`×`h` rectangle with
/// corners rounded to radius `r`. Pixels are sampled at their centres.
fn rounded_rect_contains(x: i32, y: i32, w: i32, h: i32, r: i32) -> bool {
    if x < 0 || y < 0 || x >= w || y >= h {
        return false;
    }
    if r <= 0 || (x >= r && x < w - r) || (y >= r && y < h - r) {
        return true;
    }

    let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
    let cx = if x < r { r as f32 } else { (w - r) as f32 };
    let cy = if y < r { r as f32 } else { (h - r) as f32 };
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= (r * r) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_rect_excludes_corners_only() {
        assert!(!rounded_rect_contains(0, 0, 10, 10, 3));
        assert!(!rounded_rect_contains(9, 9, 10, 10, 3));
        assert!(rounded_rect_contains(0, 5, 10, 10, 3));
        assert!(rounded_rect_contains(5, 0, 10, 10, 3));
        assert!(rounded_rect_contains(2, 2, 10, 10, 3));
    }

    #[test]
    fn zero_radius_is_a_plain_rectangle() {
        assert!(rounded_rect_contains(0, 0, 4, 4, 0));
        assert!(!rounded_rect_contains(4, 0, 4, 4, 0));
    }
}
