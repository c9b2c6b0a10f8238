//! # Utility Modules
//!
//! This module provides the bit manipulation, quantization and hex helpers
//! shared by the frame envelope and the payload codecs.

pub mod bits;
pub mod hex;

// Re-export commonly used types and functions
pub use bits::{bit_at, byte_to_percent, percent_to_byte, raw_to_temperature, temperature_to_raw};
pub use hex::{decode_hex, encode_hex, encode_hex_upper, format_hex_compact, hex_to_bytes, HexError};
