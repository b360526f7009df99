//! Plain text encodings offered next to the ciphers on the encode/decode API.
//!
//! Binary, hex and base64 work on the UTF-8 bytes of the text, so decoding
//! fails when the bytes are malformed or do not form valid UTF-8.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::CipherError;

pub fn binary_encode(text: &str) -> String {
    text.bytes()
        .map(|byte| format!("{byte:08b}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn binary_decode(text: &str) -> Result<String, CipherError> {
    const INVALID: CipherError = CipherError::InvalidFormat("binary");

    let bytes = text
        .split_ascii_whitespace()
        .map(|group| {
            if group.len() != 8 || !group.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(INVALID);
            }
            Ok(group.bytes().fold(0u8, |acc, b| (acc << 1) | (b - b'0')))
        })
        .collect::<Result<Vec<u8>, _>>()?;
    String::from_utf8(bytes).map_err(|_| INVALID)
}

pub fn hex_encode(text: &str) -> String {
    hex::encode_upper(text)
}

pub fn hex_decode(text: &str) -> Result<String, CipherError> {
    const INVALID: CipherError = CipherError::InvalidFormat("hexadecimal");

    let bytes = hex::decode(text.trim()).map_err(|_| INVALID)?;
    String::from_utf8(bytes).map_err(|_| INVALID)
}

pub fn base64_encode(text: &str) -> String {
    STANDARD.encode(text)
}

/// Standard padded base64, ASCII whitespace between symbols is ignored.
pub fn base64_decode(text: &str) -> Result<String, CipherError> {
    const INVALID: CipherError = CipherError::InvalidFormat("base64");

    let symbols: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(symbols).map_err(|_| INVALID)?;
    String::from_utf8(bytes).map_err(|_| INVALID)
}

const MORSE: [(char, &str); 37] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    (' ', "/"),
];

/// Letters are matched case-insensitively, characters without a code are
/// kept as their own token.
pub fn morse_encode(text: &str) -> String {
    let mut out = String::new();
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let upper = c.to_ascii_uppercase();
        match MORSE.iter().find(|(letter, _)| *letter == upper) {
            Some((_, code)) => out.push_str(code),
            None => out.push(c),
        }
    }
    out
}

/// Lossy: unknown tokens are copied to the output unchanged.
pub fn morse_decode(text: &str) -> String {
    text.split_ascii_whitespace()
        .fold(String::new(), |mut out, token| {
            match MORSE.iter().find(|(_, code)| *code == token) {
                Some(&(letter, _)) => out.push(letter),
                None => out.push_str(token),
            }
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_uses_eight_bit_groups() {
        assert_eq!(binary_encode("Hi"), "01001000 01101001");
        assert_eq!(binary_decode("01001000   01101001\n").unwrap(), "Hi");
        assert_eq!(binary_decode(&binary_encode("ünï 1")).unwrap(), "ünï 1");
    }

    #[test]
    fn binary_rejects_malformed_groups() {
        assert!(matches!(binary_decode("0100100"), Err(CipherError::InvalidFormat(_))));
        assert!(matches!(binary_decode("0100100a"), Err(CipherError::InvalidFormat(_))));
        assert!(matches!(binary_decode("11111111"), Err(CipherError::InvalidFormat(_))));
    }

    #[test]
    fn hex_uses_uppercase_byte_pairs() {
        assert_eq!(hex_encode("Hi!"), "486921");
        assert_eq!(hex_decode("486921").unwrap(), "Hi!");
        assert_eq!(hex_decode("6869").unwrap(), "hi");
        assert_eq!(hex_decode(" 6a6B \n").unwrap(), "jk");
        assert_eq!(hex_encode("ü"), "C3BC");
    }

    #[test]
    fn hex_rejects_odd_length_and_bad_digits() {
        assert!(matches!(hex_decode("486"), Err(CipherError::InvalidFormat(_))));
        assert!(matches!(hex_decode("4G"), Err(CipherError::InvalidFormat(_))));
        assert!(matches!(hex_decode("+F"), Err(CipherError::InvalidFormat(_))));
        assert!(matches!(hex_decode("C3"), Err(CipherError::InvalidFormat(_))));
    }

    #[test]
    fn base64_pads_output() {
        assert_eq!(base64_encode(""), "");
        assert_eq!(base64_encode("M"), "TQ==");
        assert_eq!(base64_encode("Ma"), "TWE=");
        assert_eq!(base64_encode("Man"), "TWFu");
        assert_eq!(base64_encode("HELLO"), "SEVMTE8=");
    }

    #[test]
    fn base64_decodes_padded_input() {
        assert_eq!(base64_decode("TQ==").unwrap(), "M");
        assert_eq!(base64_decode("TWE=").unwrap(), "Ma");
        assert_eq!(base64_decode("SEVM\nTE8=").unwrap(), "HELLO");
        let text = "Zebra crossing? ünïcode";
        assert_eq!(base64_decode(&base64_encode(text)).unwrap(), text);
    }

    #[test]
    fn base64_rejects_malformed_input() {
        for input in ["TQ=", "T===", "TQ==TWFu", "TW!u", "A=BC"] {
            assert!(
                matches!(base64_decode(input), Err(CipherError::InvalidFormat(_))),
                "{input}"
            );
        }
    }

    #[test]
    fn morse_encodes_with_word_separator() {
        assert_eq!(morse_encode("SOS"), "... --- ...");
        assert_eq!(morse_encode("hi 2"), ".... .. / ..---");
        assert_eq!(morse_encode("A!"), ".- !");
    }

    #[test]
    fn morse_decode_passes_unknown_tokens_through() {
        assert_eq!(morse_decode(".... .. / ..---"), "HI 2");
        assert_eq!(morse_decode(".- ! -..."), "A!B");
        assert_eq!(morse_decode(""), "");
    }
}
