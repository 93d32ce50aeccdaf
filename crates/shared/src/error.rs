use serde::{Deserialize, Serialize};

use crate::{token::MalformedTokenError, validation::ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    MalformedToken,
    NotFound,
}

/// Error body returned by the HTTP surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::new(ErrorCode::Validation, value.to_string())
    }
}

impl From<MalformedTokenError> for ApiError {
    fn from(value: MalformedTokenError) -> Self {
        Self::new(ErrorCode::MalformedToken, value.to_string())
    }
}
