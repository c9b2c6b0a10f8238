//! # maxcul-rs - A Rust Crate for the MAX! Heating Protocol
//!
//! The maxcul-rs crate decodes and builds the RF frames exchanged between
//! MAX! radiator thermostats, wall thermostats, shutter contacts, eco push
//! buttons and a controller speaking through a CUL dongle.
//!
//! ## Features
//!
//! - Parse and build the frame envelope shared by all MAX! messages
//! - Typed codecs for every message kind, selected by type code and payload length
//! - Set-point, valve, until-date and week-profile encodings
//! - CUL text line handling, including RSSI reporting
//! - Configurable handling of payloads with unknown lengths
//!
//! ## Usage
//!
//! ```rust
//! use maxcul_rs::{
//!     decode_message, encode_message, Address, ControlMode, Message, MessageHeader,
//!     MessagePayload, SetTemperature,
//! };
//!
//! let header = MessageHeader::new(
//!     0x01,
//!     Address::from_bytes([0x12, 0x34, 0x56]),
//!     Address::from_bytes([0x0A, 0xBC, 0xDE]),
//! );
//! let message = Message::new(
//!     header,
//!     MessagePayload::SetTemperature(SetTemperature::new(ControlMode::Manual, 21.0)),
//! );
//! let hex = encode_message(&message);
//! assert_eq!(hex, "0B0100401234560ABCDE006A");
//! assert_eq!(decode_message(&hex).unwrap(), message);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod maxcul;
pub mod message;
pub mod payload;
pub mod util;

pub use crate::config::{CodecConfig, LengthPolicy};
pub use crate::error::MaxError;
pub use crate::logging::{init_logger, log_frame_hex, log_info, log_warn};

// Envelope and link layer
pub use maxcul::{
    build_frame, parse_cul_line, parse_frame, to_send_command, Address, CulLine, Frame,
    MessageHeader,
};

// Message registry
pub use message::{decode_message, encode_message, Codec, Message, MessagePayload, MessageType};

// Payload types
pub use payload::{
    Acknowledgement, AddLinkPartner, BoostDuration, ButtonMode, ButtonStatus, ConfigureTemperatures,
    ControlMode, ControlPoint, DaySchedule, DeviceFlags, DeviceType, PairPing, PairPong,
    PayloadCodec, PushButtonNotification, RemoveGroupId, RemoveLinkPartner, ReportExtension, Reset,
    SetComfortTemperature, SetDstAdjust, SetEcoTemperature, SetGroupId, SetTemperature,
    ShutterContactStateReport, ThermostatStateReport, TimeInformation, UntilDateTime,
    ValveConfiguration, Wakeup, WeekProfile, WeekProfilePart, DEFAULT_WEEK_PROFILE,
};
