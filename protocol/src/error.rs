use minecipher_core::{CipherError, GameError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned to hosts in place of a response.
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<CipherError> for ErrorResponse {
    fn from(err: CipherError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<GameError> for ErrorResponse {
    fn from(err: GameError) -> Self {
        Self::new(err.to_string())
    }
}
