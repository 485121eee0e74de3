mod contact;
mod email;
mod error;
pub mod models;
pub mod payload;
pub mod ports;
pub mod services;
pub mod vcard;
mod website;

pub use contact::*;
pub use email::*;
pub use error::*;
pub use website::*;

#[cfg(test)]
pub(crate) use contact::fixtures;
