pub(crate) mod card;
pub(crate) mod error;
pub(crate) mod form;

pub(crate) use error::ApiError;
