//! Client error kinds.
//!
//! The console distinguishes exactly two failures:
//!
//! | Kind | Raised when | Surfaced as |
//! |------|-------------|-------------|
//! | [`ClientError::Validation`] | input is empty after trimming | warning toast, no request |
//! | [`ClientError::Operation`] | transport, HTTP status, or decode failure | error toast plus fallback rendering |
//!
//! There is no retry and no finer classification.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("{context}: {message}")]
    Operation {
        context: &'static str,
        message: String,
    },
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    pub fn operation(context: &'static str, err: impl std::fmt::Display) -> Self {
        ClientError::Operation {
            context,
            message: err.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
