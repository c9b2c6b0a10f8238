//! The payload module contains one codec per MAX! message kind.
//!
//! The protocol overloads message meaning by payload size rather than an
//! explicit variant tag, so every codec lists the payload lengths it knows
//! and picks its decoding path from the observed length.

pub mod ack;
pub mod control;
pub mod datetime;
pub mod state;
pub mod status;
pub mod temperature;
pub mod valve;
pub mod week_profile;

pub use ack::{AckThermostatState, Acknowledgement};
pub use control::{
    AddLinkPartner, DeviceType, PairPing, PairPong, RemoveGroupId, RemoveLinkPartner, Reset,
    SetDstAdjust, SetGroupId, TimeInformation, Wakeup,
};
pub use datetime::{decode_until_date, encode_until_date, UntilDateTime};
pub use state::{
    ButtonMode, ButtonStatus, PushButtonNotification, ReportExtension, ShutterContactStateReport,
    ThermostatStateReport,
};
pub use status::{ControlMode, DeviceFlags};
pub use temperature::{
    ConfigureTemperatures, SetComfortTemperature, SetEcoTemperature, SetTemperature,
};
pub use valve::{BoostDuration, ValveConfiguration};
pub use week_profile::{
    decode_week_profile, encode_week_profile, ControlPoint, DaySchedule, WeekProfile,
    WeekProfilePart, DEFAULT_WEEK_PROFILE,
};

use crate::error::MaxError;
use crate::message::MessageType;

/// Encoding and decoding of one message kind's payload.
pub trait PayloadCodec: Sized {
    /// Type code this payload travels under.
    const MESSAGE_TYPE: MessageType;

    /// Payload lengths the codec understands, shortest first.
    const LENGTHS: &'static [usize];

    /// Decodes a payload whose length is one of [`Self::LENGTHS`].
    fn decode(payload: &[u8]) -> Result<Self, MaxError>;

    /// Encodes the payload. Out-of-range values are clamped.
    fn encode(&self) -> Vec<u8>;
}

/// Fails with `UnsupportedPayloadLength` unless the payload length is known to `T`.
pub fn check_length<T: PayloadCodec>(payload: &[u8]) -> Result<(), MaxError> {
    if T::LENGTHS.contains(&payload.len()) {
        Ok(())
    } else {
        Err(unsupported_length::<T>(payload.len()))
    }
}

/// Builds the error for a payload length `T` does not know.
pub fn unsupported_length<T: PayloadCodec>(length: usize) -> MaxError {
    MaxError::UnsupportedPayloadLength {
        message_type: T::MESSAGE_TYPE,
        length,
    }
}

/// Longest known layout of `T` that fits into `length` bytes.
pub fn longest_fitting_length<T: PayloadCodec>(length: usize) -> Option<usize> {
    T::LENGTHS.iter().copied().filter(|&l| l <= length).max()
}
