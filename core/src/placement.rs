use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// One letter of the target word hidden under a safe cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundLetter {
    pub position: Coord2,
    pub encoded: char,
    pub plain: char,
    pub index: usize,
}

/// Letters of the target word bound to distinct safe cells, stored in word order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherBinding {
    letters: Vec<BoundLetter>,
}

impl CipherBinding {
    /// Encodes `target_word` and hides each encoded letter under a random safe cell.
    ///
    /// Letter `i` of the word goes to the `i`-th sampled cell, so which cell
    /// holds which letter depends on sampling order, not on board order.
    pub fn bind<R: Rng + ?Sized>(
        board: &Board,
        target_word: &str,
        cipher: &Cipher,
        rng: &mut R,
    ) -> Result<Self> {
        if target_word.is_empty() || !target_word.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(GameError::InvalidWord);
        }
        if !cipher.kind().is_game_cipher() {
            return Err(GameError::NotAGameCipher);
        }

        let encoded: Vec<char> = cipher.encode(target_word).chars().collect();
        if encoded.len() != target_word.len() {
            return Err(GameError::NotAGameCipher);
        }

        let safe_positions = board.safe_positions();
        if safe_positions.len() < target_word.len() {
            return Err(GameError::InsufficientSafeCells {
                needed: target_word.len() as CellCount,
                available: safe_positions.len() as CellCount,
            });
        }

        let letters = rand::seq::index::sample(rng, safe_positions.len(), target_word.len())
            .into_iter()
            .zip(encoded.into_iter().zip(target_word.chars()))
            .enumerate()
            .map(|(index, (sampled, (encoded, plain)))| BoundLetter {
                position: safe_positions[sampled],
                encoded,
                plain,
                index,
            })
            .collect();
        Ok(Self { letters })
    }

    pub fn letters(&self) -> &[BoundLetter] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn at(&self, coords: Coord2) -> Option<&BoundLetter> {
        self.letters.iter().find(|letter| letter.position == coords)
    }

    pub fn encoded_word(&self) -> String {
        self.letters.iter().map(|letter| letter.encoded).collect()
    }
}
