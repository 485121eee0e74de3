use std::{fmt, str::FromStr};

use thiserror::Error;

/// An RGBA colour written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(pub [u8; 4]);

#[derive(Error, Debug, PartialEq)]
#[error("invalid color '{0}': expected #rrggbb or #rrggbbaa")]
pub struct HexColorError(String);

impl HexColor {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub fn channels(&self) -> [u8; 4] {
        self.0
    }
}

impl FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HexColorError(s.to_string()));
        }

        let mut channels = [255u8; 4];
        for (i, channel) in channels.iter_mut().take(hex.len() / 2).enumerate() {
            *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| HexColorError(s.to_string()))?;
        }

        Ok(Self(channels))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        assert_eq!("#1a2b3c".parse::<HexColor>().unwrap(), HexColor([0x1a, 0x2b, 0x3c, 255]));
        assert_eq!("00000080".parse::<HexColor>().unwrap(), HexColor([0, 0, 0, 0x80]));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!("#abc".parse::<HexColor>().is_err());
        assert!("#gg0000".parse::<HexColor>().is_err());
    }

    #[test]
    fn rejects_signs_inside_channels() {
        assert!("#+f+f+f".parse::<HexColor>().is_err());
        assert!("#-1ffff".parse::<HexColor>().is_err());
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(HexColor::rgb(255, 0, 16).to_string(), "#ff0010");
    }
}
