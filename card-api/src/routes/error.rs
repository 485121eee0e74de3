use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::domain::{CardError, ContactField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidField,
    QrEncodingFailed,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
    field: Option<ContactField>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
            field: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_field(mut self, field: ContactField) -> Self {
        self.field = Some(field);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
            field: self.field.map(<&'static str>::from),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<CardError> for ApiError {
    fn from(err: CardError) -> Self {
        match err {
            CardError::Validation { field, .. } => Self::bad_request(err.to_string())
                .with_code(ErrorCode::InvalidField)
                .with_field(field),
            CardError::Encoding(ref message) => {
                tracing::error!("QR encoding failed: {}", message);
                Self::internal(err.to_string()).with_code(ErrorCode::QrEncodingFailed)
            }
            CardError::Render(ref message) => {
                tracing::error!("Info image rendering failed: {}", message);
                Self::internal("failed to render card image")
            }
            CardError::Io(ref e) => {
                tracing::error!("Card package I/O error: {:?}", e);
                Self::internal("failed to build card package")
            }
            CardError::Task(ref message) => {
                tracing::error!("Card task failed: {}", message);
                Self::internal("failed to build card package")
            }
        }
    }
}
