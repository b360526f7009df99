//! Serializable messages exchanged between a host and the MineCipher engine.

pub use cipher::*;
pub use error::*;
pub use game::*;
pub use info::*;

mod cipher;
mod error;
mod game;
mod info;
