//! # Message Registry
//!
//! Maps MAX! type codes to payload codecs and ties the envelope and the
//! payload together into a typed [`Message`].
//!
//! ```
//! use maxcul_rs::message::{decode_message, MessagePayload};
//!
//! let message = decode_message("0B0100021234560ABCDE0000").unwrap();
//! assert!(matches!(message.payload, MessagePayload::Acknowledgement(_)));
//! ```

use log::{debug, warn};
use serde::Serialize;

use crate::config::{CodecConfig, LengthPolicy};
use crate::error::MaxError;
use crate::maxcul::frame::{parse_frame, Frame, MessageHeader};
use crate::payload::{
    longest_fitting_length, unsupported_length, Acknowledgement, AddLinkPartner,
    ConfigureTemperatures, DeviceFlags, PairPing, PairPong, PayloadCodec,
    PushButtonNotification, RemoveGroupId, RemoveLinkPartner, Reset, SetComfortTemperature,
    SetDstAdjust, SetEcoTemperature, SetGroupId, SetTemperature, ShutterContactStateReport,
    ThermostatStateReport, TimeInformation, UntilDateTime, ValveConfiguration, Wakeup,
    WeekProfilePart,
};

/// MAX! message type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum MessageType {
    PairPing = 0x00,
    PairPong = 0x01,
    Acknowledgement = 0x02,
    TimeInformation = 0x03,
    ConfigureWeekProfile = 0x10,
    ConfigureTemperatures = 0x11,
    ConfigureValve = 0x12,
    AddLinkPartner = 0x20,
    RemoveLinkPartner = 0x21,
    SetGroupId = 0x22,
    RemoveGroupId = 0x23,
    ShutterContactStateReport = 0x30,
    SetTemperature = 0x40,
    SetComfortTemperature = 0x43,
    SetEcoTemperature = 0x44,
    PushButtonNotification = 0x50,
    ThermostatStateReport = 0x60,
    SetDstAdjust = 0x81,
    Reset = 0xF0,
    Wakeup = 0xF1,
}

impl MessageType {
    /// Every type code with a registered codec.
    pub const ALL: [MessageType; 20] = [
        MessageType::PairPing,
        MessageType::PairPong,
        MessageType::Acknowledgement,
        MessageType::TimeInformation,
        MessageType::ConfigureWeekProfile,
        MessageType::ConfigureTemperatures,
        MessageType::ConfigureValve,
        MessageType::AddLinkPartner,
        MessageType::RemoveLinkPartner,
        MessageType::SetGroupId,
        MessageType::RemoveGroupId,
        MessageType::ShutterContactStateReport,
        MessageType::SetTemperature,
        MessageType::SetComfortTemperature,
        MessageType::SetEcoTemperature,
        MessageType::PushButtonNotification,
        MessageType::ThermostatStateReport,
        MessageType::SetDstAdjust,
        MessageType::Reset,
        MessageType::Wakeup,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MessageType {
    type Error = MaxError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        MessageType::ALL
            .iter()
            .copied()
            .find(|message_type| message_type.code() == code)
            .ok_or(MaxError::UnsupportedMessageType(code))
    }
}

/// Typed payload of a MAX! message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "fields")]
pub enum MessagePayload {
    PairPing(PairPing),
    PairPong(PairPong),
    Acknowledgement(Acknowledgement),
    TimeInformation(TimeInformation),
    ConfigureWeekProfile(WeekProfilePart),
    ConfigureTemperatures(ConfigureTemperatures),
    ConfigureValve(ValveConfiguration),
    AddLinkPartner(AddLinkPartner),
    RemoveLinkPartner(RemoveLinkPartner),
    SetGroupId(SetGroupId),
    RemoveGroupId(RemoveGroupId),
    ShutterContactStateReport(ShutterContactStateReport),
    SetTemperature(SetTemperature),
    SetComfortTemperature(SetComfortTemperature),
    SetEcoTemperature(SetEcoTemperature),
    PushButtonNotification(PushButtonNotification),
    ThermostatStateReport(ThermostatStateReport),
    SetDstAdjust(SetDstAdjust),
    Reset(Reset),
    Wakeup(Wakeup),
}

fn decode_with<T: PayloadCodec>(payload: &[u8], policy: LengthPolicy) -> Result<T, MaxError> {
    if policy == LengthPolicy::Strict || T::LENGTHS.contains(&payload.len()) {
        return T::decode(payload);
    }

    let length = longest_fitting_length::<T>(payload.len())
        .ok_or_else(|| unsupported_length::<T>(payload.len()))?;
    warn!(
        "Ignoring {} trailing bytes of a {:?} payload",
        payload.len() - length,
        T::MESSAGE_TYPE
    );
    T::decode(&payload[..length])
}

impl MessagePayload {
    /// Decodes a payload with the codec registered for `message_type`.
    pub fn decode(
        message_type: MessageType,
        payload: &[u8],
        policy: LengthPolicy,
    ) -> Result<Self, MaxError> {
        use self::MessagePayload as P;

        Ok(match message_type {
            MessageType::PairPing => P::PairPing(decode_with(payload, policy)?),
            MessageType::PairPong => P::PairPong(decode_with(payload, policy)?),
            MessageType::Acknowledgement => P::Acknowledgement(decode_with(payload, policy)?),
            MessageType::TimeInformation => P::TimeInformation(decode_with(payload, policy)?),
            MessageType::ConfigureWeekProfile => {
                P::ConfigureWeekProfile(decode_with(payload, policy)?)
            }
            MessageType::ConfigureTemperatures => {
                P::ConfigureTemperatures(decode_with(payload, policy)?)
            }
            MessageType::ConfigureValve => P::ConfigureValve(decode_with(payload, policy)?),
            MessageType::AddLinkPartner => P::AddLinkPartner(decode_with(payload, policy)?),
            MessageType::RemoveLinkPartner => P::RemoveLinkPartner(decode_with(payload, policy)?),
            MessageType::SetGroupId => P::SetGroupId(decode_with(payload, policy)?),
            MessageType::RemoveGroupId => P::RemoveGroupId(decode_with(payload, policy)?),
            MessageType::ShutterContactStateReport => {
                P::ShutterContactStateReport(decode_with(payload, policy)?)
            }
            MessageType::SetTemperature => P::SetTemperature(decode_with(payload, policy)?),
            MessageType::SetComfortTemperature => {
                P::SetComfortTemperature(decode_with(payload, policy)?)
            }
            MessageType::SetEcoTemperature => P::SetEcoTemperature(decode_with(payload, policy)?),
            MessageType::PushButtonNotification => {
                P::PushButtonNotification(decode_with(payload, policy)?)
            }
            MessageType::ThermostatStateReport => {
                P::ThermostatStateReport(decode_with(payload, policy)?)
            }
            MessageType::SetDstAdjust => P::SetDstAdjust(decode_with(payload, policy)?),
            MessageType::Reset => P::Reset(decode_with(payload, policy)?),
            MessageType::Wakeup => P::Wakeup(decode_with(payload, policy)?),
        })
    }

    /// Payload bytes of the message.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            MessagePayload::PairPing(p) => p.encode(),
            MessagePayload::PairPong(p) => p.encode(),
            MessagePayload::Acknowledgement(p) => p.encode(),
            MessagePayload::TimeInformation(p) => p.encode(),
            MessagePayload::ConfigureWeekProfile(p) => p.encode(),
            MessagePayload::ConfigureTemperatures(p) => p.encode(),
            MessagePayload::ConfigureValve(p) => p.encode(),
            MessagePayload::AddLinkPartner(p) => p.encode(),
            MessagePayload::RemoveLinkPartner(p) => p.encode(),
            MessagePayload::SetGroupId(p) => p.encode(),
            MessagePayload::RemoveGroupId(p) => p.encode(),
            MessagePayload::ShutterContactStateReport(p) => p.encode(),
            MessagePayload::SetTemperature(p) => p.encode(),
            MessagePayload::SetComfortTemperature(p) => p.encode(),
            MessagePayload::SetEcoTemperature(p) => p.encode(),
            MessagePayload::PushButtonNotification(p) => p.encode(),
            MessagePayload::ThermostatStateReport(p) => p.encode(),
            MessagePayload::SetDstAdjust(p) => p.encode(),
            MessagePayload::Reset(p) => p.encode(),
            MessagePayload::Wakeup(p) => p.encode(),
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            MessagePayload::PairPing(_) => MessageType::PairPing,
            MessagePayload::PairPong(_) => MessageType::PairPong,
            MessagePayload::Acknowledgement(_) => MessageType::Acknowledgement,
            MessagePayload::TimeInformation(_) => MessageType::TimeInformation,
            MessagePayload::ConfigureWeekProfile(_) => MessageType::ConfigureWeekProfile,
            MessagePayload::ConfigureTemperatures(_) => MessageType::ConfigureTemperatures,
            MessagePayload::ConfigureValve(_) => MessageType::ConfigureValve,
            MessagePayload::AddLinkPartner(_) => MessageType::AddLinkPartner,
            MessagePayload::RemoveLinkPartner(_) => MessageType::RemoveLinkPartner,
            MessagePayload::SetGroupId(_) => MessageType::SetGroupId,
            MessagePayload::RemoveGroupId(_) => MessageType::RemoveGroupId,
            MessagePayload::ShutterContactStateReport(_) => MessageType::ShutterContactStateReport,
            MessagePayload::SetTemperature(_) => MessageType::SetTemperature,
            MessagePayload::SetComfortTemperature(_) => MessageType::SetComfortTemperature,
            MessagePayload::SetEcoTemperature(_) => MessageType::SetEcoTemperature,
            MessagePayload::PushButtonNotification(_) => MessageType::PushButtonNotification,
            MessagePayload::ThermostatStateReport(_) => MessageType::ThermostatStateReport,
            MessagePayload::SetDstAdjust(_) => MessageType::SetDstAdjust,
            MessagePayload::Reset(_) => MessageType::Reset,
            MessagePayload::Wakeup(_) => MessageType::Wakeup,
        }
    }
}

/// A decoded MAX! message: envelope header plus typed payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub header: MessageHeader,
    pub payload: MessagePayload,
}

impl Message {
    pub fn new(header: MessageHeader, payload: MessagePayload) -> Self {
        Message { header, payload }
    }

    pub fn message_type(&self) -> MessageType {
        self.payload.message_type()
    }

    /// Device flags, for message kinds that report them.
    pub fn flags(&self) -> Option<DeviceFlags> {
        match &self.payload {
            MessagePayload::Acknowledgement(ack) => Some(ack.flags),
            MessagePayload::ThermostatStateReport(report) => Some(report.flags),
            MessagePayload::ShutterContactStateReport(report) => Some(report.flags),
            MessagePayload::PushButtonNotification(notification) => Some(notification.flags()),
            _ => None,
        }
    }

    /// End of a temporary set-point, where the message carries one.
    pub fn until(&self) -> Option<UntilDateTime> {
        match &self.payload {
            MessagePayload::SetTemperature(msg) => msg.until,
            MessagePayload::ThermostatStateReport(report) => report.until(),
            MessagePayload::Acknowledgement(ack) => {
                ack.thermostat.as_ref().and_then(|state| state.until)
            }
            _ => None,
        }
    }

    pub fn battery_low(&self) -> bool {
        self.flags().map_or(false, DeviceFlags::battery_low)
    }

    pub fn rf_error(&self) -> bool {
        self.flags().map_or(false, DeviceFlags::rf_error)
    }
}

/// Decodes and encodes messages under a [`CodecConfig`].
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Codec { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decodes a hex-encoded frame into a message.
    pub fn decode(&self, hex: &str) -> Result<Message, MaxError> {
        let frame = parse_frame(hex)?;
        self.decode_frame(&frame)
    }

    /// Decodes the payload of an already parsed frame.
    pub fn decode_frame(&self, frame: &Frame) -> Result<Message, MaxError> {
        let message_type = MessageType::try_from(frame.type_code)?;
        let payload = MessagePayload::decode(message_type, &frame.payload, self.config.length_policy)?;
        debug!(
            "Decoded {:?} from {} (seq {})",
            message_type, frame.header.source, frame.header.sequence_counter
        );
        Ok(Message {
            header: frame.header,
            payload,
        })
    }

    /// Wraps the message into a frame.
    pub fn to_frame(&self, message: &Message) -> Frame {
        Frame::from_parts(
            message.header,
            message.message_type().code(),
            message.payload.encode(),
        )
    }

    /// Encodes the message as a hex frame.
    pub fn encode(&self, message: &Message) -> String {
        let frame = self.to_frame(message);
        if self.config.uppercase_hex {
            frame.to_hex()
        } else {
            frame.to_hex_lower()
        }
    }
}

/// Decodes a hex frame with the default configuration.
pub fn decode_message(hex: &str) -> Result<Message, MaxError> {
    Codec::default().decode(hex)
}

/// Encodes a message as an uppercase hex frame.
pub fn encode_message(message: &Message) -> String {
    Codec::default().encode(message)
}
