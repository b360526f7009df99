use minecipher_core::{CipherKind, Coord, Difficulty, MAX_GUESSES};
use serde::{Deserialize, Serialize};

pub const OVERVIEW: &str = "Solve the jumbled cipher hidden in the Minesweeper board.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoCards {
    pub win: String,
    pub lose: String,
    pub how: String,
}

impl Default for InfoCards {
    fn default() -> Self {
        Self {
            win: "Reveal non-mine tiles, decode the cipher letters, then submit the final word without triggering a mine.".into(),
            lose: "Hit a mine or use up five incorrect final-word guesses and the board will explode.".into(),
            how: "Click safe tiles to glimpse cipher letters. Use the hints to crack the transformed word, then submit your guess.".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyInfo {
    pub name: String,
    pub rows: Coord,
    pub cols: Coord,
    pub word_length: usize,
}

impl From<Difficulty> for DifficultyInfo {
    fn from(difficulty: Difficulty) -> Self {
        let profile = difficulty.profile();
        Self {
            name: profile.name.into(),
            rows: profile.size.0,
            cols: profile.size.1,
            word_length: profile.word_length,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherInfo {
    pub id: String,
    pub name: String,
    pub example: String,
}

impl From<CipherKind> for CipherInfo {
    fn from(kind: CipherKind) -> Self {
        Self {
            id: kind.id().into(),
            name: kind.display_name().into(),
            example: kind.example().into(),
        }
    }
}

/// Static game description shown before a round starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineCipherInfo {
    pub overview: String,
    pub max_guesses: u8,
    pub info_cards: InfoCards,
    pub difficulties: Vec<DifficultyInfo>,
    pub ciphers: Vec<CipherInfo>,
}

impl Default for MineCipherInfo {
    fn default() -> Self {
        Self {
            overview: OVERVIEW.into(),
            max_guesses: MAX_GUESSES,
            info_cards: InfoCards::default(),
            difficulties: Difficulty::ALL.into_iter().map(Into::into).collect(),
            ciphers: CipherKind::GAME.into_iter().map(Into::into).collect(),
        }
    }
}

pub fn minecipher_info() -> MineCipherInfo {
    MineCipherInfo::default()
}
