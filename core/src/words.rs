use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::*;

/// Length used when a difficulty asks for a word length the bank lacks.
pub const FALLBACK_WORD_LENGTH: usize = 5;

const FIVE_LETTER_WORDS: &[&str] = &[
    "APPLE", "BRAVO", "DELTA", "FROST", "GAMMA", "HONEY", "IRONY", "JAZZY", "KNIFE", "ORBIT",
    "LEMON", "MANGO", "NINJA", "OPERA", "PIXEL", "QUEST", "RIVER", "SOLAR", "SWEET", "TABLE",
    "TIDES", "UNITY", "VIVID", "WISER", "XENON", "YIELD", "ZESTY",
];

const SIX_LETTER_WORDS: &[&str] = &[
    "ORCHID", "FATHER", "PLANET", "SILVER", "RHYTHM", "FLOWER", "CIRCLE", "MYSTIC", "SPRING",
    "CRIMES",
];

const SEVEN_LETTER_WORDS: &[&str] = &[
    "LIBERTY", "VOYAGER", "MYSTERY", "CRYSTAL", "HELIXES", "WEATHER", "JOURNEY",
];

/// Candidate target words grouped by length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordBank {
    by_length: BTreeMap<usize, Vec<String>>,
}

impl WordBank {
    pub fn builtin() -> Self {
        Self::from_words(
            FIVE_LETTER_WORDS
                .iter()
                .chain(SIX_LETTER_WORDS)
                .chain(SEVEN_LETTER_WORDS),
        )
    }

    /// Upper-cases every entry, drops anything that is not made of ASCII
    /// letters and keeps the first occurrence of duplicates.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bank = Self::default();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() || !word.bytes().all(|b| b.is_ascii_alphabetic()) {
                continue;
            }
            let word = word.to_ascii_uppercase();
            let bucket = bank.by_length.entry(word.len()).or_default();
            if !bucket.contains(&word) {
                bucket.push(word);
            }
        }
        bank
    }

    pub fn words(&self, length: usize) -> &[String] {
        self.by_length
            .get(&length)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_length.is_empty()
    }

    /// Picks a word of `length`, falling back to [`FALLBACK_WORD_LENGTH`].
    pub fn choose<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Result<&str> {
        let candidates = match self.words(length) {
            [] => {
                log::warn!("No {length} letter words, falling back to {FALLBACK_WORD_LENGTH} letters");
                self.words(FALLBACK_WORD_LENGTH)
            }
            words => words,
        };
        candidates
            .choose(rng)
            .map(String::as_str)
            .ok_or(GameError::InvalidWord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn builtin_bank_covers_every_difficulty() {
        let bank = WordBank::builtin();

        for difficulty in Difficulty::ALL {
            let length = difficulty.word_length();
            assert!(!bank.words(length).is_empty());
            assert!(bank.words(length).iter().all(|word| word.len() == length));
        }
    }

    #[test]
    fn custom_words_are_normalized() {
        let bank = WordBank::from_words(["apple", " Lemon ", "APPLE", "two words", "r2d2x", ""]);

        assert_eq!(bank.words(5), ["APPLE", "LEMON"]);
        assert!(bank.words(9).is_empty());
    }

    #[test]
    fn choose_returns_word_of_requested_length() {
        let bank = WordBank::builtin();
        let mut rng = SmallRng::seed_from_u64(5);

        for _ in 0..20 {
            assert_eq!(bank.choose(7, &mut rng).unwrap().len(), 7);
        }
    }

    #[test]
    fn choose_falls_back_to_five_letters() {
        let bank = WordBank::from_words(["apple", "mango"]);
        let mut rng = SmallRng::seed_from_u64(5);

        let word = bank.choose(6, &mut rng).unwrap();
        assert!(word == "APPLE" || word == "MANGO");
    }

    #[test]
    fn empty_bank_has_nothing_to_choose() {
        let mut rng = SmallRng::seed_from_u64(5);

        assert!(WordBank::default().is_empty());
        assert_eq!(WordBank::default().choose(5, &mut rng), Err(GameError::InvalidWord));
    }
}
