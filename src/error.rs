// bingo/src/error.rs
// Error type shared by the game and board codecs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BingoError {
    /// A game or board identifier could not be decoded.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
    /// An in-memory game or board breaks its invariants and cannot be encoded.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl BingoError {
    pub fn invalid_id(message: impl Into<String>) -> Self {
        BingoError::InvalidId(message.into())
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        BingoError::InvalidValue(message.into())
    }
}
