//! # MAX! Error Handling
//!
//! This module defines the MaxError enum, which represents the different error
//! types that can occur while parsing and building MAX! frames.

use crate::constants::MAX_PAYLOAD_LEN;
use crate::message::MessageType;
use crate::util::hex::HexError;
use thiserror::Error;

/// Represents the different error types that can occur in the maxcul crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaxError {
    /// The hex string or the frame envelope is inconsistent.
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// The frame could not be hex-decoded.
    #[error("Malformed frame: {0}")]
    InvalidHex(#[from] HexError),

    /// The payload length matches no known layout for the message type.
    #[error("Unsupported payload length {length} for {message_type:?}")]
    UnsupportedPayloadLength {
        message_type: MessageType,
        length: usize,
    },

    /// No codec is registered for the type code.
    #[error("Unsupported message type: 0x{0:02X}")]
    UnsupportedMessageType(u8),

    /// A decoded field holds an index the protocol assigns no meaning to.
    #[error("Value out of range for {field}: {value}")]
    ValueOutOfRange { field: &'static str, value: u8 },

    /// The half indicator of a week-profile payload disagrees with the caller.
    #[error("Week profile half mismatch: expected {}", half_name(.expected_second_half))]
    WeekProfileHalfMismatch { expected_second_half: bool },

    /// The payload is too long for the frame's length byte.
    #[error(
        "Frame too long: {} payload bytes exceed the limit of {}",
        .payload_length,
        MAX_PAYLOAD_LEN
    )]
    FrameTooLong { payload_length: usize },

    /// A week profile that cannot be put on the wire.
    #[error("Invalid week profile: {0}")]
    InvalidWeekProfile(String),

    /// Codec configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn half_name(second_half: &bool) -> &'static str {
    if *second_half {
        "second half"
    } else {
        "first half"
    }
}

impl MaxError {
    /// Returns true for faults in the hex string or the envelope.
    pub fn is_malformed_frame(&self) -> bool {
        matches!(self, MaxError::MalformedFrame(_) | MaxError::InvalidHex(_))
    }
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for MaxError {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => MaxError::MalformedFrame("incomplete input".to_string()),
            nom::Err::Error(e) | nom::Err::Failure(e) => MaxError::MalformedFrame(format!(
                "{:?} with {} bytes remaining",
                e.code,
                e.input.len()
            )),
        }
    }
}
