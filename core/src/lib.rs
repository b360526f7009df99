#![no_std]

extern crate alloc;

use rand::Rng;

pub use board::*;
pub use cipher::{Cipher, CipherKind};
pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use placement::*;
pub use reveal::*;
pub use session::*;
pub use types::*;
pub use words::*;

pub mod cipher;

mod board;
mod difficulty;
mod error;
mod generator;
mod placement;
mod reveal;
mod session;
mod types;
mod words;

/// Starts a round from the names a host receives, drawing the word from the
/// built-in bank.
pub fn new_session<R: Rng + ?Sized>(
    difficulty: &str,
    cipher_id: &str,
    key: Option<&str>,
    rng: &mut R,
) -> Result<GameSession> {
    let config = SessionConfig::parse(difficulty, cipher_id, key)?;
    GameSession::setup(&config, &WordBank::builtin(), rng)
}
