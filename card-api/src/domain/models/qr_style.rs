use serde::Deserialize;

use super::HexColor;

/// QR error-correction level, from lowest redundancy to highest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum EcLevel {
    #[serde(alias = "l")]
    L,
    #[serde(alias = "m")]
    M,
    #[serde(alias = "q")]
    Q,
    #[default]
    #[serde(alias = "h")]
    H,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleShape {
    #[default]
    Square,
    Rounded,
}

/// What the QR code on a card encodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrPayload {
    /// The full vCard text.
    #[default]
    Vcard,
    /// A callback URL to the info image endpoint.
    InfoUrl,
    /// Plain `Label: value` lines.
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrStyle {
    pub ec_level: EcLevel,
    /// Side of one module in pixels.
    pub module_size: u32,
    /// Quiet zone width in modules.
    pub border: u32,
    pub foreground: HexColor,
    pub background: HexColor,
    pub shape: ModuleShape,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::H,
            module_size: 10,
            border: 4,
            foreground: HexColor::BLACK,
            background: HexColor::WHITE,
            shape: ModuleShape::Square,
        }
    }
}
