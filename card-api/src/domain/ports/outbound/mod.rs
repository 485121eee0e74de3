mod info_rendering;
mod packaging;
mod qr_encoding;

pub use info_rendering::*;
pub use packaging::*;
pub use qr_encoding::*;
