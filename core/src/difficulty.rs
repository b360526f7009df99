use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Board dimensions and target word length of a difficulty preset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DifficultyProfile {
    pub name: &'static str,
    pub size: Coord2,
    pub word_length: usize,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn profile(self) -> DifficultyProfile {
        match self {
            Self::Easy => DifficultyProfile {
                name: "Easy",
                size: (6, 15),
                word_length: 5,
            },
            Self::Medium => DifficultyProfile {
                name: "Medium",
                size: (10, 25),
                word_length: 6,
            },
            Self::Hard => DifficultyProfile {
                name: "Hard",
                size: (14, 35),
                word_length: 7,
            },
        }
    }

    pub const fn name(self) -> &'static str {
        self.profile().name
    }

    pub const fn size(self) -> Coord2 {
        self.profile().size
    }

    pub const fn word_length(self) -> usize {
        self.profile().word_length
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::InvalidDifficulty)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
