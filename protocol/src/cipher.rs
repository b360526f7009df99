use minecipher_core::{Cipher, CipherKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::ErrorResponse;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Encode,
    Decode,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Encode => "encode",
            Self::Decode => "decode",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherRequest {
    pub text: String,
    pub cipher_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherResponse {
    pub result: String,
    pub cipher_type: String,
    pub operation: Operation,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherTypeInfo {
    pub requires_key: bool,
}

impl CipherRequest {
    pub fn new(text: impl Into<String>, cipher_type: impl Into<String>, key: Option<String>) -> Self {
        Self {
            text: text.into(),
            cipher_type: cipher_type.into(),
            key,
        }
    }

    pub fn apply(&self, operation: Operation) -> Result<CipherResponse, ErrorResponse> {
        let kind: CipherKind = self.cipher_type.parse().map_err(|_| {
            ErrorResponse::new(format!("Unsupported cipher type: {}", self.cipher_type))
        })?;

        let key = self.key.as_deref().map(str::trim).filter(|key| !key.is_empty());
        if kind.requires_key() && key.is_none() {
            return Err(ErrorResponse::new(format!("{} cipher requires a key", kind.id())));
        }

        let cipher = Cipher::new(kind, key)?;
        let result = match operation {
            Operation::Encode => cipher.encode(&self.text),
            Operation::Decode => cipher.decode(&self.text)?,
        };
        log::debug!("{operation} with {kind}: {} -> {} chars", self.text.len(), result.len());

        Ok(CipherResponse {
            result,
            cipher_type: kind.id().into(),
            operation,
        })
    }

    pub fn encode(&self) -> Result<CipherResponse, ErrorResponse> {
        self.apply(Operation::Encode)
    }

    pub fn decode(&self) -> Result<CipherResponse, ErrorResponse> {
        self.apply(Operation::Decode)
    }
}

/// Every supported cipher id and whether it needs a key.
pub fn cipher_types() -> BTreeMap<&'static str, CipherTypeInfo> {
    CipherKind::ALL
        .into_iter()
        .map(|kind| {
            let info = CipherTypeInfo {
                requires_key: kind.requires_key(),
            };
            (kind.id(), info)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, cipher_type: &str, key: Option<&str>) -> CipherRequest {
        CipherRequest::new(text, cipher_type, key.map(String::from))
    }

    #[test]
    fn encodes_and_decodes() {
        let response = request("HELLO", "caesar", Some("3")).encode().unwrap();
        assert_eq!(
            response,
            CipherResponse {
                result: "KHOOR".into(),
                cipher_type: "caesar".into(),
                operation: Operation::Encode,
            }
        );

        let response = request("SGVsbG8=", "base64", None).decode().unwrap();
        assert_eq!(response.result, "Hello");
        assert_eq!(response.operation, Operation::Decode);
    }

    #[test]
    fn keyed_cipher_without_key_is_rejected() {
        for key in [None, Some(""), Some("   ")] {
            assert_eq!(
                request("HELLO", "vigenere", key).encode(),
                Err(ErrorResponse::new("vigenere cipher requires a key"))
            );
        }
    }

    #[test]
    fn unsupported_cipher_is_rejected() {
        assert_eq!(
            request("HELLO", "enigma", None).encode(),
            Err(ErrorResponse::new("Unsupported cipher type: enigma"))
        );
    }

    #[test]
    fn bad_input_reports_the_core_error() {
        assert_eq!(
            request("ZZ", "hex", None).decode(),
            Err(ErrorResponse::new("Invalid hexadecimal format"))
        );
        assert_eq!(
            request("HELLO", "affine", Some("2,3")).encode(),
            Err(ErrorResponse::new("Invalid key: affine 'a' must be coprime to 26"))
        );
    }

    #[test]
    fn request_json_matches_the_api() {
        let request: CipherRequest =
            serde_json::from_str(r#"{"text": "URYYB", "cipher_type": "rot13"}"#).unwrap();
        let response = request.decode().unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "result": "HELLO",
                "cipher_type": "rot13",
                "operation": "decode",
            })
        );
    }

    #[test]
    fn lists_every_cipher_type() {
        let types = cipher_types();

        assert_eq!(types.len(), 10);
        assert!(types["affine"].requires_key);
        assert!(types["rail_fence"].requires_key);
        assert!(!types["morse"].requires_key);
        assert!(!types["atbash"].requires_key);
    }
}
