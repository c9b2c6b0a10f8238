//! # Hex Encoding/Decoding Utilities
//!
//! The CUL dongle exchanges MAX! frames as ASCII hex. This module wraps the
//! `hex` crate with the error reporting the frame codec needs and adds a
//! compact formatter for log output.
//!
//! ## Usage
//!
//! ```rust
//! use maxcul_rs::util::hex::{encode_hex_upper, decode_hex, format_hex_compact};
//!
//! let data = [0x0B, 0x01, 0x00, 0xF1];
//! let hex_str = encode_hex_upper(&data);
//! assert_eq!(hex_str, "0B0100F1");
//!
//! let decoded = decode_hex(&hex_str).unwrap();
//! assert_eq!(decoded, data);
//!
//! assert_eq!(format_hex_compact(&data), "0b 01 00 f1");
//! ```

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Invalid hex character {character:?} at position {index}")]
    InvalidCharacter { character: char, index: usize },

    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,
}

impl From<hex::FromHexError> for HexError {
    fn from(err: hex::FromHexError) -> Self {
        match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => HexError::InvalidCharacter {
                character: c,
                index,
            },
            hex::FromHexError::OddLength => HexError::OddLength(0),
            hex::FromHexError::InvalidStringLength => HexError::OddLength(0),
        }
    }
}

/// Encode bytes to lowercase hex string
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Encode bytes to uppercase hex string
///
/// This is the form the CUL firmware prints and expects.
pub fn encode_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters. Anything else,
/// whitespace included, is rejected.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    if hex_str.is_empty() {
        return Err(HexError::EmptyString);
    }

    if hex_str.len() % 2 != 0 {
        return Err(HexError::OddLength(hex_str.len()));
    }

    hex::decode(hex_str).map_err(HexError::from)
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "0b 01 00 f1" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Helper for creating test data from hex strings
///
/// Panics on invalid hex (intended for test code only).
pub fn hex_to_bytes(hex: &str) -> Vec<u8> {
    decode_hex(hex).expect("Invalid hex in test data")
}
