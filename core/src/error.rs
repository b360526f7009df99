use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("Invalid key: {0}")]
    InvalidKey(&'static str),
    #[error("Invalid {0} format")]
    InvalidFormat(&'static str),
    #[error("Unsupported cipher type")]
    UnknownCipher,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown difficulty")]
    InvalidDifficulty,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape must be at least 1x1")]
    InvalidBoardShape,
    #[error("Not enough safe cells to hide the word, needed {needed} but only {available} available")]
    InsufficientSafeCells {
        needed: CellCount,
        available: CellCount,
    },
    #[error("Target word must be non-empty uppercase letters")]
    InvalidWord,
    #[error("Cipher cannot be used to hide letters on the board")]
    NotAGameCipher,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

pub type Result<T> = core::result::Result<T, GameError>;
