use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// The six form fields a contact card is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ContactField {
    FullName,
    Phone,
    Email,
    JobTitle,
    Company,
    Website,
}

/// Errors that can occur while building a contact card.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("invalid {field}: {reason}")]
    Validation { field: ContactField, reason: String },
    #[error("qr encoding failed: {0}")]
    Encoding(String),
    #[error("image rendering failed: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("card task failed: {0}")]
    Task(String),
}

impl CardError {
    pub fn validation(field: ContactField, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> Option<ContactField> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}
