mod color;
mod package;
mod qr_style;

pub use color::*;
pub use package::*;
pub use qr_style::*;
