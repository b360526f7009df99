//! Letter substitution ciphers over the 26-letter Latin alphabet.
//!
//! Only ASCII letters are transformed, their case is kept, and everything
//! else passes through untouched.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::CipherError;

const ALPHABET_LEN: u8 = 26;

/// Applies `map` to the alphabet index (`0..26`) of every ASCII letter.
///
/// `map` is only invoked for letters, so stateful closures (like a key
/// cursor) advance once per letter.
fn map_letters(text: &str, mut map: impl FnMut(u8) -> u8) -> String {
    text.chars()
        .map(|c| {
            if !c.is_ascii_alphabetic() {
                return c;
            }
            let base = if c.is_ascii_uppercase() { b'A' } else { b'a' };
            let index = c as u8 - base;
            char::from(base + map(index) % ALPHABET_LEN)
        })
        .collect()
}

fn normalize_shift(shift: i64) -> u8 {
    shift.rem_euclid(ALPHABET_LEN.into()) as u8
}

pub fn caesar_encode(text: &str, shift: i64) -> String {
    let shift = normalize_shift(shift);
    map_letters(text, |x| x + shift)
}

pub fn caesar_decode(text: &str, shift: i64) -> String {
    let shift = ALPHABET_LEN - normalize_shift(shift);
    map_letters(text, |x| x + shift)
}

/// Mirrors each letter across the alphabet, it is its own inverse.
pub fn atbash(text: &str) -> String {
    map_letters(text, |x| ALPHABET_LEN - 1 - x)
}

pub fn rot13(text: &str) -> String {
    caesar_encode(text, 13)
}

/// Repeating-key shift cipher.
///
/// Serialized as its upper-cased key, deserializing goes through
/// [`Vigenere::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Vigenere {
    shifts: Vec<u8>,
}

impl Vigenere {
    pub fn new(key: &str) -> Result<Self, CipherError> {
        if key.is_empty() {
            return Err(CipherError::InvalidKey("vigenere cipher requires a key"));
        }
        if !key.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CipherError::InvalidKey("vigenere key must only contain letters"));
        }

        let shifts = key
            .bytes()
            .map(|b| b.to_ascii_uppercase() - b'A')
            .collect();
        Ok(Self { shifts })
    }

    pub fn key(&self) -> String {
        self.shifts.iter().map(|&shift| char::from(b'A' + shift)).collect()
    }

    pub fn encode(&self, text: &str) -> String {
        let mut keys = self.shifts.iter().cycle();
        map_letters(text, |x| x + keys.next().copied().unwrap_or(0))
    }

    pub fn decode(&self, text: &str) -> String {
        let mut keys = self.shifts.iter().cycle();
        map_letters(text, |y| y + ALPHABET_LEN - keys.next().copied().unwrap_or(0))
    }
}

/// `y = a * x + b (mod 26)`, only valid when `a` is coprime with 26.
///
/// Serialized in the `"a,b"` key form read by [`Affine::parse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Affine {
    a: u8,
    b: u8,
    a_inverse: u8,
}

impl Affine {
    pub fn new(a: i64, b: i64) -> Result<Self, CipherError> {
        let a = normalize_shift(a);
        let a_inverse = (1..ALPHABET_LEN)
            .find(|&i| (u16::from(a) * u16::from(i)) % u16::from(ALPHABET_LEN) == 1)
            .ok_or(CipherError::InvalidKey("affine 'a' must be coprime to 26"))?;
        Ok(Self {
            a,
            b: normalize_shift(b),
            a_inverse,
        })
    }

    /// Parses the `"a,b"` key form.
    pub fn parse(key: &str) -> Result<Self, CipherError> {
        const FORMAT: CipherError = CipherError::InvalidKey("affine cipher requires key format 'a,b'");

        let (a, b) = key.split_once(',').ok_or(FORMAT)?;
        let a = a.trim().parse().map_err(|_| FORMAT)?;
        let b = b.trim().parse().map_err(|_| FORMAT)?;
        Self::new(a, b)
    }

    pub fn key(&self) -> String {
        format!("{},{}", self.a, self.b)
    }

    pub fn encode(&self, text: &str) -> String {
        let (a, b) = (u16::from(self.a), u16::from(self.b));
        map_letters(text, |x| ((a * u16::from(x) + b) % 26) as u8)
    }

    pub fn decode(&self, text: &str) -> String {
        let (a_inverse, b) = (u16::from(self.a_inverse), u16::from(self.b));
        map_letters(text, |y| ((a_inverse * (u16::from(y) + 26 - b)) % 26) as u8)
    }
}

impl TryFrom<String> for Vigenere {
    type Error = CipherError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        Self::new(&key)
    }
}

impl From<Vigenere> for String {
    fn from(cipher: Vigenere) -> Self {
        cipher.key()
    }
}

impl TryFrom<String> for Affine {
    type Error = CipherError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        Self::parse(&key)
    }
}

impl From<Affine> for String {
    fn from(cipher: Affine) -> Self {
        cipher.key()
    }
}
