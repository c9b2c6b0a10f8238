//! # MAX! Frame Envelope
//!
//! Every MAX! message travels in the same envelope:
//!
//! ```text
//! +-----+-----+-------+------+---------+---------+-------+---------+
//! | len | seq | flags | type | src (3) | dst (3) | group | payload |
//! +-----+-----+-------+------+---------+---------+-------+---------+
//! ```
//!
//! `len` counts every byte after itself, so a frame with an empty payload
//! has `len == 10`. The envelope carries no checksum; the CUL dongle only
//! forwards frames whose RF-level CRC was good.
//!
//! Parsing a frame received from the dongle:
//! ```
//! use maxcul_rs::maxcul::frame::parse_frame;
//!
//! let frame = parse_frame("0B0100021234560ABCDE0000").unwrap();
//! assert_eq!(frame.type_code, 0x02);
//! assert_eq!(frame.header.source.to_string(), "123456");
//! assert_eq!(frame.payload, vec![0x00]);
//! ```

use std::fmt;
use std::str::FromStr;

use log::{trace, warn};
use nom::bytes::complete::take;
use nom::number::complete::be_u8;
use nom::sequence::tuple;
use nom::IResult;
use serde::{Serialize, Serializer};

use crate::constants::{
    MAX_FLAGS_GROUP, MAX_FLAGS_NONE, MAX_HEADER_LEN, MAX_MIN_FRAME_LEN, MAX_PAYLOAD_LEN,
};
use crate::error::MaxError;
use crate::util::hex::{decode_hex, encode_hex, encode_hex_upper};

/// 24-bit RF address of a MAX! device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 3]);

impl Address {
    /// Destination of broadcast frames.
    pub const BROADCAST: Address = Address([0x00, 0x00, 0x00]);

    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Address(bytes)
    }

    pub const fn as_bytes(&self) -> [u8; 3] {
        self.0
    }

    /// Address as a 24-bit integer.
    pub fn value(&self) -> u32 {
        u32::from_be_bytes([0, self.0[0], self.0[1], self.0[2]])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_hex(&self.0))
    }
}

impl FromStr for Address {
    type Err = MaxError;

    /// Parses six hex digits, e.g. `0a1b2c`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s)?;
        let bytes: [u8; 3] = bytes.as_slice().try_into().map_err(|_| {
            MaxError::MalformedFrame(format!("address must be 3 bytes, got {}", bytes.len()))
        })?;
        Ok(Address(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Envelope fields shared by every message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageHeader {
    pub sequence_counter: u8,
    pub flags: u8,
    pub group_id: u8,
    pub source: Address,
    pub destination: Address,
}

impl MessageHeader {
    /// Header of an ordinary frame outside any group.
    pub fn new(sequence_counter: u8, source: Address, destination: Address) -> Self {
        MessageHeader {
            sequence_counter,
            flags: MAX_FLAGS_NONE,
            group_id: 0,
            source,
            destination,
        }
    }

    /// Addresses the frame to a device group.
    pub fn with_group(mut self, group_id: u8) -> Self {
        self.flags = MAX_FLAGS_GROUP;
        self.group_id = group_id;
        self
    }
}

/// A decoded frame envelope with its raw payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Byte count after the length byte
    pub length: u8,
    pub type_code: u8,
    pub header: MessageHeader,
    pub payload: Vec<u8>,
}

impl Frame {
    /// Assembles a frame and computes its length byte.
    ///
    /// A payload longer than 245 bytes saturates the length byte at 255, and
    /// `parse_frame` rejects the result. Use [`Frame::try_from_parts`] to get
    /// an error instead.
    pub fn from_parts(header: MessageHeader, type_code: u8, payload: Vec<u8>) -> Self {
        let total = MAX_HEADER_LEN + payload.len();
        let length = u8::try_from(total).unwrap_or_else(|_| {
            warn!("Frame of {} bytes does not fit a length byte", total);
            u8::MAX
        });
        Frame {
            length,
            type_code,
            header,
            payload,
        }
    }

    /// Assembles a frame, failing with `FrameTooLong` when the payload does
    /// not fit the length byte.
    pub fn try_from_parts(
        header: MessageHeader,
        type_code: u8,
        payload: Vec<u8>,
    ) -> Result<Self, MaxError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(MaxError::FrameTooLong {
                payload_length: payload.len(),
            });
        }
        Ok(Frame {
            length: (MAX_HEADER_LEN + payload.len()) as u8,
            type_code,
            header,
            payload,
        })
    }

    /// Wire bytes of the frame, length byte first.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(MAX_MIN_FRAME_LEN + self.payload.len());
        bytes.push(self.length);
        bytes.push(self.header.sequence_counter);
        bytes.push(self.header.flags);
        bytes.push(self.type_code);
        bytes.extend_from_slice(&self.header.source.as_bytes());
        bytes.extend_from_slice(&self.header.destination.as_bytes());
        bytes.push(self.header.group_id);
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Uppercase hex, the form the CUL dongle prints.
    pub fn to_hex(&self) -> String {
        encode_hex_upper(&self.to_bytes())
    }

    pub fn to_hex_lower(&self) -> String {
        encode_hex(&self.to_bytes())
    }
}

/// Parses a hex-encoded frame.
pub fn parse_frame(hex: &str) -> Result<Frame, MaxError> {
    let bytes = decode_hex(hex)?;
    parse_frame_bytes(&bytes)
}

/// Parses a frame from its wire bytes.
pub fn parse_frame_bytes(bytes: &[u8]) -> Result<Frame, MaxError> {
    if bytes.len() < MAX_MIN_FRAME_LEN {
        return Err(MaxError::MalformedFrame(format!(
            "frame of {} bytes is shorter than the {}-byte envelope",
            bytes.len(),
            MAX_MIN_FRAME_LEN
        )));
    }

    let (payload, (length, type_code, header)) = parse_envelope(bytes)?;

    if length as usize != bytes.len() - 1 {
        return Err(MaxError::MalformedFrame(format!(
            "length byte {} does not match the {} bytes that follow it",
            length,
            bytes.len() - 1
        )));
    }

    trace!(
        "Parsed frame type 0x{:02X} from {} to {} with {} payload bytes",
        type_code,
        header.source,
        header.destination,
        payload.len()
    );

    Ok(Frame {
        length,
        type_code,
        header,
        payload: payload.to_vec(),
    })
}

/// Wraps a payload into a hex-encoded frame.
///
/// Never fails. Payloads longer than 245 bytes get a saturated length byte
/// (see [`Frame::from_parts`]); every message payload is far below that.
pub fn build_frame(header: &MessageHeader, type_code: u8, payload: &[u8]) -> String {
    Frame::from_parts(*header, type_code, payload.to_vec()).to_hex()
}

fn parse_address(input: &[u8]) -> IResult<&[u8], Address> {
    let (input, bytes) = take(3usize)(input)?;
    Ok((input, Address([bytes[0], bytes[1], bytes[2]])))
}

fn parse_envelope(input: &[u8]) -> IResult<&[u8], (u8, u8, MessageHeader)> {
    let (input, (length, sequence_counter, flags, type_code, source, destination, group_id)) =
        tuple((be_u8, be_u8, be_u8, be_u8, parse_address, parse_address, be_u8))(input)?;

    Ok((
        input,
        (
            length,
            type_code,
            MessageHeader {
                sequence_counter,
                flags,
                group_id,
                source,
                destination,
            },
        ),
    ))
}
