use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use classical::{Affine, Vigenere};

use crate::CipherError;

pub mod classical;
pub mod encoding;
pub mod rail_fence;

/// Identifier of every transform offered, keyless or not.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherKind {
    Affine,
    Atbash,
    Caesar,
    RailFence,
    Rot13,
    Vigenere,
    Binary,
    Hex,
    Base64,
    Morse,
}

impl CipherKind {
    pub const ALL: [Self; 10] = [
        Self::Affine,
        Self::Atbash,
        Self::Caesar,
        Self::RailFence,
        Self::Rot13,
        Self::Vigenere,
        Self::Binary,
        Self::Hex,
        Self::Base64,
        Self::Morse,
    ];

    /// Ciphers that keep one output letter per input letter, in menu order.
    pub const GAME: [Self; 6] = [
        Self::Affine,
        Self::Atbash,
        Self::Caesar,
        Self::RailFence,
        Self::Rot13,
        Self::Vigenere,
    ];

    pub const fn id(self) -> &'static str {
        use CipherKind::*;
        match self {
            Affine => "affine",
            Atbash => "atbash",
            Caesar => "caesar",
            RailFence => "rail_fence",
            Rot13 => "rot13",
            Vigenere => "vigenere",
            Binary => "binary",
            Hex => "hex",
            Base64 => "base64",
            Morse => "morse",
        }
    }

    pub const fn display_name(self) -> &'static str {
        use CipherKind::*;
        match self {
            Affine => "Affine Cipher",
            Atbash => "Atbash Cipher",
            Caesar => "Caesar Cipher",
            RailFence => "Rail Fence Cipher",
            Rot13 => "ROT13 Cipher",
            Vigenere => "Vigenère Cipher",
            Binary => "Binary Encoding",
            Hex => "Hexadecimal Encoding",
            Base64 => "Base64 Encoding",
            Morse => "Morse Code",
        }
    }

    pub const fn requires_key(self) -> bool {
        matches!(
            self,
            Self::Affine | Self::Caesar | Self::RailFence | Self::Vigenere
        )
    }

    pub const fn is_game_cipher(self) -> bool {
        matches!(
            self,
            Self::Affine
                | Self::Atbash
                | Self::Caesar
                | Self::RailFence
                | Self::Rot13
                | Self::Vigenere
        )
    }

    /// Key used on the board when the player does not pick one.
    pub const fn default_key(self) -> Option<&'static str> {
        use CipherKind::*;
        match self {
            Affine => Some("5,8"),
            Caesar => Some("3"),
            RailFence => Some("3"),
            Vigenere => Some("MINE"),
            Atbash | Rot13 | Binary | Hex | Base64 | Morse => None,
        }
    }

    /// Worked example shown next to the board.
    pub const fn example(self) -> &'static str {
        use CipherKind::*;
        match self {
            Affine => {
                "Affine uses coefficients a=5, b=8. Message HELLO becomes RCLLA; decoding applies a⁻¹=21 and subtracts b to recover HELLO."
            }
            Atbash => {
                "Atbash mirrors A↔Z, B↔Y etc. Example: HELLO → SVOOL by swapping each letter across the alphabet."
            }
            Caesar => {
                "Caesar shifts by +3. HELLO becomes KHOOR; decoding shifts letters by -3 to get the original word."
            }
            RailFence => {
                "Rail Fence with depth 3 writes HELLO as HOELL when read row-wise; decoding re-interleaves the rows to reconstruct HELLO."
            }
            Rot13 => {
                "ROT13 rotates each letter by 13 places. HELLO → URYYB; applying ROT13 again returns the original."
            }
            Vigenere => {
                "Vigenère with key MINE shifts letters by key letters. Using key MINE, HELLO → TMYPA; decode by reversing each shift with the key."
            }
            Binary => "Each byte becomes eight bits. Hi → 01001000 01101001.",
            Hex => "Each byte becomes two hex digits. Hi → 4869.",
            Base64 => "Every three bytes become four symbols. HELLO → SEVMTE8=.",
            Morse => "Letters become dots and dashes, words are split by /. SOS → ... --- ...",
        }
    }
}

impl FromStr for CipherKind {
    type Err = CipherError;

    /// Accepts identifiers (`rail_fence`) and display names (`Rail Fence Cipher`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(s) || kind.display_name().eq_ignore_ascii_case(s))
            .ok_or(CipherError::UnknownCipher)
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A cipher together with its validated key.
///
/// Serialized as `{"kind": ..., "key": ...}`, deserializing validates the key
/// the same way [`Cipher::new`] does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CipherSpec", into = "CipherSpec")]
pub enum Cipher {
    Affine(Affine),
    Atbash,
    Caesar { shift: i64 },
    RailFence { rails: usize },
    Rot13,
    Vigenere(Vigenere),
    Binary,
    Hex,
    Base64,
    Morse,
}

impl Cipher {
    /// Validates `key` for `kind`. Keyless ciphers ignore the key.
    pub fn new(kind: CipherKind, key: Option<&str>) -> Result<Self, CipherError> {
        let key = key.map(str::trim).filter(|key| !key.is_empty());
        let require_key = || key.ok_or(CipherError::InvalidKey("this cipher requires a key"));

        Ok(match kind {
            CipherKind::Affine => Self::Affine(Affine::parse(require_key()?)?),
            CipherKind::Atbash => Self::Atbash,
            CipherKind::Caesar => {
                let shift = require_key()?
                    .parse()
                    .map_err(|_| CipherError::InvalidKey("caesar shift must be an integer"))?;
                Self::Caesar { shift }
            }
            CipherKind::RailFence => {
                let rails: i64 = require_key()?
                    .parse()
                    .map_err(|_| CipherError::InvalidKey("rail count must be an integer"))?;
                Self::RailFence {
                    rails: usize::try_from(rails).unwrap_or(0),
                }
            }
            CipherKind::Rot13 => Self::Rot13,
            CipherKind::Vigenere => Self::Vigenere(Vigenere::new(require_key()?)?),
            CipherKind::Binary => Self::Binary,
            CipherKind::Hex => Self::Hex,
            CipherKind::Base64 => Self::Base64,
            CipherKind::Morse => Self::Morse,
        })
    }

    /// Same as [`Cipher::new`] but falls back to [`CipherKind::default_key`].
    pub fn with_default_key(kind: CipherKind, key: Option<&str>) -> Result<Self, CipherError> {
        Self::new(kind, key.or(kind.default_key()))
    }

    pub fn kind(&self) -> CipherKind {
        match self {
            Self::Affine(_) => CipherKind::Affine,
            Self::Atbash => CipherKind::Atbash,
            Self::Caesar { .. } => CipherKind::Caesar,
            Self::RailFence { .. } => CipherKind::RailFence,
            Self::Rot13 => CipherKind::Rot13,
            Self::Vigenere(_) => CipherKind::Vigenere,
            Self::Binary => CipherKind::Binary,
            Self::Hex => CipherKind::Hex,
            Self::Base64 => CipherKind::Base64,
            Self::Morse => CipherKind::Morse,
        }
    }

    /// Key in the form accepted by [`Cipher::new`], `None` for keyless ciphers.
    pub fn key(&self) -> Option<String> {
        match self {
            Self::Affine(affine) => Some(affine.key()),
            Self::Caesar { shift } => Some(shift.to_string()),
            Self::RailFence { rails } => Some(rails.to_string()),
            Self::Vigenere(vigenere) => Some(vigenere.key()),
            _ => None,
        }
    }

    pub fn encode(&self, text: &str) -> String {
        match self {
            Self::Affine(affine) => affine.encode(text),
            Self::Atbash => classical::atbash(text),
            Self::Caesar { shift } => classical::caesar_encode(text, *shift),
            Self::RailFence { rails } => rail_fence::encode(text, *rails),
            Self::Rot13 => classical::rot13(text),
            Self::Vigenere(vigenere) => vigenere.encode(text),
            Self::Binary => encoding::binary_encode(text),
            Self::Hex => encoding::hex_encode(text),
            Self::Base64 => encoding::base64_encode(text),
            Self::Morse => encoding::morse_encode(text),
        }
    }

    pub fn decode(&self, text: &str) -> Result<String, CipherError> {
        Ok(match self {
            Self::Affine(affine) => affine.decode(text),
            Self::Atbash => classical::atbash(text),
            Self::Caesar { shift } => classical::caesar_decode(text, *shift),
            Self::RailFence { rails } => rail_fence::decode(text, *rails),
            Self::Rot13 => classical::rot13(text),
            Self::Vigenere(vigenere) => vigenere.decode(text),
            Self::Binary => encoding::binary_decode(text)?,
            Self::Hex => encoding::hex_decode(text)?,
            Self::Base64 => encoding::base64_decode(text)?,
            Self::Morse => encoding::morse_decode(text),
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct CipherSpec {
    kind: CipherKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
}

impl TryFrom<CipherSpec> for Cipher {
    type Error = CipherError;

    fn try_from(spec: CipherSpec) -> Result<Self, Self::Error> {
        Self::new(spec.kind, spec.key.as_deref())
    }
}

impl From<Cipher> for CipherSpec {
    fn from(cipher: Cipher) -> Self {
        Self {
            kind: cipher.kind(),
            key: cipher.key(),
        }
    }
}

/// Encodes `text` with the cipher named by `cipher_id`.
pub fn encode(cipher_id: &str, text: &str, key: Option<&str>) -> Result<String, CipherError> {
    Ok(Cipher::new(cipher_id.parse()?, key)?.encode(text))
}

/// Decodes `text` with the cipher named by `cipher_id`.
pub fn decode(cipher_id: &str, text: &str, key: Option<&str>) -> Result<String, CipherError> {
    Cipher::new(cipher_id.parse()?, key)?.decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn parses_ids_and_display_names() {
        assert_eq!("rail_fence".parse(), Ok(CipherKind::RailFence));
        assert_eq!(" ROT13 ".parse(), Ok(CipherKind::Rot13));
        assert_eq!("Caesar Cipher".parse(), Ok(CipherKind::Caesar));
        assert_eq!("Vigenère Cipher".parse(), Ok(CipherKind::Vigenere));
        assert_eq!("enigma".parse::<CipherKind>(), Err(CipherError::UnknownCipher));
    }

    #[test]
    fn ids_round_trip_through_display() {
        for kind in CipherKind::ALL {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }

    #[test]
    fn game_ciphers_have_usable_default_keys() {
        for kind in CipherKind::GAME {
            assert!(kind.is_game_cipher());
            assert_eq!(kind.requires_key(), kind.default_key().is_some());
            assert!(Cipher::with_default_key(kind, None).is_ok());
        }
    }

    #[test]
    fn game_examples_match_the_default_keys() {
        let encoded = |kind| Cipher::with_default_key(kind, None).unwrap().encode("HELLO");
        for kind in CipherKind::GAME {
            let expected = encoded(kind);
            assert!(kind.example().contains(expected.as_str()), "{kind}: {expected}");
        }
    }

    #[test]
    fn keyed_ciphers_reject_missing_keys() {
        for kind in CipherKind::ALL.into_iter().filter(|kind| kind.requires_key()) {
            assert!(matches!(Cipher::new(kind, None), Err(CipherError::InvalidKey(_))));
            assert!(matches!(Cipher::new(kind, Some("  ")), Err(CipherError::InvalidKey(_))));
        }
    }

    #[test]
    fn keyless_ciphers_ignore_keys() {
        assert_eq!(Cipher::new(CipherKind::Atbash, Some("whatever")), Ok(Cipher::Atbash));
        assert_eq!(encode("rot13", "HELLO", None), Ok("URYYB".into()));
    }

    #[test]
    fn rejects_malformed_numeric_keys() {
        assert!(matches!(encode("caesar", "abc", Some("three")), Err(CipherError::InvalidKey(_))));
        assert!(matches!(encode("rail_fence", "abc", Some("2.5")), Err(CipherError::InvalidKey(_))));
        assert!(matches!(encode("affine", "abc", Some("13,2")), Err(CipherError::InvalidKey(_))));
        assert!(matches!(decode("affine", "abc", Some("2,1")), Err(CipherError::InvalidKey(_))));
        assert!(matches!(encode("vigenere", "abc", Some("")), Err(CipherError::InvalidKey(_))));
    }

    #[test]
    fn negative_rail_counts_are_a_no_op() {
        assert_eq!(encode("rail_fence", "HELLO", Some("-4")), Ok("HELLO".into()));
    }

    #[test]
    fn every_cipher_round_trips_by_id() {
        let text = "Meet me at the Old Mill, 9pm!";
        let cases = [
            ("affine", Some("7,3")),
            ("atbash", None),
            ("caesar", Some("-11")),
            ("rail_fence", Some("4")),
            ("rot13", None),
            ("vigenere", Some("Lemon")),
            ("binary", None),
            ("hex", None),
            ("base64", None),
        ];
        for (id, key) in cases {
            let encoded = encode(id, text, key).unwrap();
            assert_eq!(decode(id, &encoded, key).unwrap(), text, "{id}");
        }
    }

    #[test]
    fn morse_round_trip_upper_cases_letters() {
        let encoded = encode("morse", "Meet at 9", None).unwrap();
        assert_eq!(decode("morse", &encoded, None), Ok("MEET AT 9".into()));
    }

    #[test]
    fn decode_surfaces_format_errors() {
        assert_eq!(decode("hex", "ABC", None), Err(CipherError::InvalidFormat("hexadecimal")));
    }

    #[test]
    fn keys_rebuild_the_same_cipher() {
        for (kind, key) in [
            (CipherKind::Affine, Some("7,3")),
            (CipherKind::Caesar, Some("-11")),
            (CipherKind::RailFence, Some("0")),
            (CipherKind::Vigenere, Some("lemon")),
            (CipherKind::Morse, None),
        ] {
            let cipher = Cipher::new(kind, key).unwrap();
            assert_eq!(Cipher::new(kind, cipher.key().as_deref()), Ok(cipher), "{kind}");
        }
    }

    #[test]
    fn serializes_kind_and_key() {
        let cipher = Cipher::with_default_key(CipherKind::Affine, None).unwrap();
        let json = serde_json::to_string(&cipher).unwrap();
        assert_eq!(json, r#"{"kind":"affine","key":"5,8"}"#);
        assert_eq!(serde_json::from_str::<Cipher>(&json).unwrap(), cipher);

        assert_eq!(serde_json::to_string(&Cipher::Hex).unwrap(), r#"{"kind":"hex"}"#);
        let ciphers: Vec<Cipher> = serde_json::from_str(r#"[{"kind":"atbash"},{"kind":"caesar","key":"3"}]"#).unwrap();
        assert_eq!(ciphers, vec![Cipher::Atbash, Cipher::Caesar { shift: 3 }]);
    }

    #[test]
    fn deserializing_validates_keys() {
        for json in [
            r#"{"kind":"affine","key":"2,0"}"#,
            r#"{"kind":"vigenere","key":"Z1"}"#,
            r#"{"kind":"vigenere"}"#,
            r#"{"kind":"caesar","key":"three"}"#,
            r#"{"kind":"enigma"}"#,
            r#"{"Affine":{"a":2,"b":0,"a_inverse":0}}"#,
        ] {
            assert!(serde_json::from_str::<Cipher>(json).is_err(), "{json}");
        }
    }
}
