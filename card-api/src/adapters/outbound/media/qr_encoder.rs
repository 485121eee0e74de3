use std::path::Path;

use image::{imageops, imageops::FilterType, DynamicImage, Rgba, RgbaImage};
use qrcode::{types::QrError, Color, QrCode};

use super::{encode_png, rounded_rect_contains};
use crate::domain::{
    models::{EcLevel, ModuleShape, QrStyle},
    ports::outbound::QrEncoder,
    CardError,
};

/// Share of the QR image width a logo is scaled to.
const LOGO_WIDTH_RATIO: f32 = 0.2;
/// Corner radius of a rounded module relative to the module size.
const ROUNDED_MODULE_RATIO: f32 = 0.3;

/// A logo drawn over the centre of every QR code.
#[derive(Debug, Clone)]
pub struct QrLogo {
    image: DynamicImage,
}

impl QrLogo {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn open(path: &Path) -> Result<Self, image::ImageError> {
        image::open(path).map(Self::new)
    }

    fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }
}

/// Renders QR codes with configurable colours, module shape and logo.
pub struct StyledQrEncoder {
    style: QrStyle,
    logo: Option<QrLogo>,
}

impl StyledQrEncoder {
    pub fn new(style: QrStyle) -> Self {
        Self { style, logo: None }
    }

    pub fn with_logo(mut self, logo: QrLogo) -> Self {
        self.logo = Some(logo);
        self
    }

    fn draw_modules(&self, code: &QrCode) -> RgbaImage {
        let modules = code.width() as u32;
        let module_size = self.style.module_size.max(1);
        let border = self.style.border;
        let side = (modules + 2 * border) * module_size;

        let background = Rgba(self.style.background.channels());
        let foreground = Rgba(self.style.foreground.channels());
        let radius = match self.style.shape {
            ModuleShape::Square => 0,
            ModuleShape::Rounded => (module_size as f32 * ROUNDED_MODULE_RATIO).round() as i32,
        };

        let mut image = RgbaImage::from_pixel(side, side, background);
        let colors = code.to_colors();

        for (index, color) in colors.iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }

            let mx = index as u32 % modules;
            let my = index as u32 / modules;
            let left = (mx + border) * module_size;
            let top = (my + border) * module_size;

            for dy in 0..module_size {
                for dx in 0..module_size {
                    let inside = radius == 0
                        || rounded_rect_contains(
                            dx as i32,
                            dy as i32,
                            module_size as i32,
                            module_size as i32,
                            radius,
                        );
                    if inside {
                        image.put_pixel(left + dx, top + dy, foreground);
                    }
                }
            }
        }

        image
    }

    fn place_logo(&self, image: &mut RgbaImage, logo: &QrLogo) {
        let (logo_width, logo_height) = (logo.image.width(), logo.image.height());
        if logo_width == 0 || logo_height == 0 {
            return;
        }

        let target_width = ((image.width() as f32 * LOGO_WIDTH_RATIO) as u32).max(1);
        let target_height =
            ((logo_height as u64 * target_width as u64 / logo_width as u64) as u32).max(1);

        let resized = imageops::resize(
            &logo.image.to_rgba8(),
            target_width,
            target_height,
            FilterType::Lanczos3,
        );

        let x = (image.width() as i64 - target_width as i64) / 2;
        let y = (image.height() as i64 - target_height as i64) / 2;

        if logo.has_alpha() {
            imageops::overlay(image, &resized, x, y);
        } else {
            imageops::replace(image, &resized, x, y);
        }
    }
}

impl QrEncoder for StyledQrEncoder {
    fn encode(&self, payload: &str) -> Result<Vec<u8>, CardError> {
        let code = QrCode::with_error_correction_level(
            payload.as_bytes(),
            to_qrcode_level(self.style.ec_level),
        )
        .map_err(|err| match err {
            QrError::DataTooLong => CardError::Encoding(format!(
                "payload of {} bytes does not fit any QR version at level {:?}",
                payload.len(),
                self.style.ec_level
            )),
            other => CardError::Encoding(other.to_string()),
        })?;

        let mut image = self.draw_modules(&code);
        if let Some(logo) = &self.logo {
            self.place_logo(&mut image, logo);
        }

        encode_png(image).map_err(|err| CardError::Encoding(err.to_string()))
    }
}

fn to_qrcode_level(level: EcLevel) -> qrcode::EcLevel {
    match level {
        EcLevel::L => qrcode::EcLevel::L,
        EcLevel::M => qrcode::EcLevel::M,
        EcLevel::Q => qrcode::EcLevel::Q,
        EcLevel::H => qrcode::EcLevel::H,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::HexColor;

    fn decode(png: &[u8]) -> String {
        let luma = image::load_from_memory(png).unwrap().to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            luma.width() as usize,
            luma.height() as usize,
            |x, y| luma.get_pixel(x as u32, y as u32).0[0],
        );
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one QR grid");
        let (_meta, content) = grids[0].decode().unwrap();
        content
    }

    #[test]
    fn round_trips_vcard_payload() {
        let payload = "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nTEL;TYPE=CELL:+1-555-0100\n\
                       EMAIL:jane@example.com\nEND:VCARD\n";
        let png = StyledQrEncoder::new(QrStyle::default()).encode(payload).unwrap();

        assert_eq!(decode(&png), payload);
    }

    #[test]
    fn round_trips_at_low_correction_with_custom_colors() {
        let style = QrStyle {
            ec_level: EcLevel::L,
            foreground: HexColor::rgb(0x10, 0x20, 0x60),
            background: HexColor::rgb(0xf0, 0xf0, 0xe0),
            ..QrStyle::default()
        };
        let payload = "https://cards.example/info_image?full_name=Jane+Doe";
        let png = StyledQrEncoder::new(style).encode(payload).unwrap();

        assert_eq!(decode(&png), payload);
    }

    #[test]
    fn image_side_follows_modules_border_and_module_size() {
        let style = QrStyle {
            module_size: 3,
            border: 2,
            ..QrStyle::default()
        };
        let png = StyledQrEncoder::new(style).encode("hi").unwrap();
        let image = image::load_from_memory(&png).unwrap();

        // "hi" fits version 1 (21 modules) even at level H.
        assert_eq!(image.width(), (21 + 4) * 3);
        assert_eq!(image.height(), image.width());
    }

    #[test]
    fn rounded_modules_leave_module_corners_clear() {
        let style = QrStyle {
            shape: ModuleShape::Rounded,
            module_size: 10,
            border: 0,
            ..QrStyle::default()
        };
        let png = StyledQrEncoder::new(style).encode("hi").unwrap();
        let image = image::load_from_memory(&png).unwrap().to_rgba8();

        // The top-left module is always dark (finder pattern).
        assert_eq!(image.get_pixel(5, 5).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn oversized_payload_is_an_encoding_error() {
        let payload = "x".repeat(4000);
        let err = StyledQrEncoder::new(QrStyle::default())
            .encode(&payload)
            .unwrap_err();

        assert!(matches!(err, CardError::Encoding(_)));
    }

    #[test]
    fn opaque_logo_is_centred_at_a_fifth_of_the_width() {
        let logo = QrLogo::new(DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            40,
            20,
            image::Rgb([255, 0, 0]),
        )));
        let encoder = StyledQrEncoder::new(QrStyle::default()).with_logo(logo);
        let png = encoder.encode("hello logo").unwrap();
        let image = image::load_from_memory(&png).unwrap().to_rgba8();

        let side = image.width();
        let logo_width = (side as f32 * LOGO_WIDTH_RATIO) as u32;
        let centre = side / 2;

        let [r, g, b, _] = image.get_pixel(centre, centre).0;
        assert!(r > 200 && g < 50 && b < 50);
        // Aspect ratio 2:1 keeps the logo out of the row a quarter-width above centre.
        let [r, g, _, _] = image.get_pixel(centre, centre - logo_width / 2).0;
        assert_eq!(r, g, "expected a plain QR pixel above the logo");
    }

    #[test]
    fn fully_transparent_logo_leaves_the_code_untouched() {
        let logo = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 0]));
        let plain = StyledQrEncoder::new(QrStyle::default()).encode("hello logo").unwrap();
        let with_logo = StyledQrEncoder::new(QrStyle::default())
            .with_logo(QrLogo::new(DynamicImage::ImageRgba8(logo)))
            .encode("hello logo")
            .unwrap();

        assert_eq!(
            image::load_from_memory(&plain).unwrap().to_rgba8(),
            image::load_from_memory(&with_logo).unwrap().to_rgba8()
        );
    }
}
