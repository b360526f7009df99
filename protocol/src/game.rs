use minecipher_core::{
    Coord, GameSession, GuessReport, RevealReport, SessionConfig, SessionSnapshot, WordBank,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ErrorResponse;

fn default_difficulty() -> String {
    "Medium".into()
}

fn default_cipher() -> String {
    "caesar".into()
}

/// One line of input from a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum GameCommand {
    /// Throws away the current round and starts another one.
    New {
        #[serde(default = "default_difficulty")]
        difficulty: String,
        #[serde(default = "default_cipher")]
        cipher: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },
    Reveal {
        row: Coord,
        col: Coord,
    },
    Flag {
        row: Coord,
        col: Coord,
    },
    Guess {
        text: String,
    },
    Snapshot,
}

/// Reply to a [`GameCommand`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Started {
        snapshot: SessionSnapshot,
    },
    Revealed {
        report: RevealReport,
        message: String,
    },
    Flagged {
        row: Coord,
        col: Coord,
        flagged: bool,
    },
    Guessed {
        report: GuessReport,
        message: String,
    },
    Snapshot {
        snapshot: SessionSnapshot,
    },
    Error {
        message: String,
    },
}

impl From<ErrorResponse> for GameEvent {
    fn from(err: ErrorResponse) -> Self {
        Self::Error {
            message: err.message,
        }
    }
}

/// Owns the active round and the random source used to set up new ones.
///
/// Sessions are never shared, a host serving many players keeps one
/// `GameHost` per player.
#[derive(Debug)]
pub struct GameHost<R> {
    rng: R,
    words: WordBank,
    session: Option<GameSession>,
}

impl<R: Rng> GameHost<R> {
    pub fn new(rng: R) -> Self {
        Self::with_words(rng, WordBank::builtin())
    }

    pub fn with_words(rng: R, words: WordBank) -> Self {
        Self {
            rng,
            words,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Replaces the current round. A failed setup keeps the previous one.
    pub fn start(
        &mut self,
        difficulty: &str,
        cipher: &str,
        key: Option<&str>,
    ) -> Result<&GameSession, ErrorResponse> {
        let config = SessionConfig::parse(difficulty, cipher, key)?;
        let session = GameSession::setup(&config, &self.words, &mut self.rng)?;
        Ok(self.session.insert(session))
    }

    pub fn handle(&mut self, command: GameCommand) -> GameEvent {
        log::debug!("command: {command:?}");
        self.apply(command).unwrap_or_else(|err| {
            log::debug!("command rejected: {err}");
            err.into()
        })
    }

    fn apply(&mut self, command: GameCommand) -> Result<GameEvent, ErrorResponse> {
        use GameCommand::*;

        let event = match command {
            New {
                difficulty,
                cipher,
                key,
            } => GameEvent::Started {
                snapshot: self.start(&difficulty, &cipher, key.as_deref())?.snapshot(),
            },
            Reveal { row, col } => {
                let session = self.session_mut()?;
                GameEvent::Revealed {
                    report: session.reveal_at((row, col))?,
                    message: session.status().to_string(),
                }
            }
            Flag { row, col } => GameEvent::Flagged {
                row,
                col,
                flagged: self.session_mut()?.toggle_flag((row, col))?.flagged,
            },
            Guess { text } => {
                let session = self.session_mut()?;
                GameEvent::Guessed {
                    report: session.submit_guess(&text)?,
                    message: session.status().to_string(),
                }
            }
            Snapshot => GameEvent::Snapshot {
                snapshot: self.session_mut()?.snapshot(),
            },
        };
        Ok(event)
    }

    fn session_mut(&mut self) -> Result<&mut GameSession, ErrorResponse> {
        self.session
            .as_mut()
            .ok_or_else(|| ErrorResponse::new("No game in progress, start a new one first"))
    }
}
