//! # Pairing, Linking and Control Frames
//!
//! Small fixed-layout payloads. Most of them are only ever built by the
//! controller; PairPing and TimeInformation requests arrive from devices.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use super::{check_length, PayloadCodec};
use crate::constants::{MAX_BASE_YEAR, MAX_SERIAL_NUMBER_LEN, MAX_WAKEUP_PAYLOAD};
use crate::error::MaxError;
use crate::maxcul::frame::Address;
use crate::message::MessageType;

/// Kind of MAX! device, as announced in pairing and link frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeviceType {
    Cube = 0,
    HeatingThermostat = 1,
    HeatingThermostatPlus = 2,
    WallThermostat = 3,
    ShutterContact = 4,
    PushButton = 5,
}

impl DeviceType {
    pub fn from_code(code: u8) -> Result<Self, MaxError> {
        match code {
            0 => Ok(DeviceType::Cube),
            1 => Ok(DeviceType::HeatingThermostat),
            2 => Ok(DeviceType::HeatingThermostatPlus),
            3 => Ok(DeviceType::WallThermostat),
            4 => Ok(DeviceType::ShutterContact),
            5 => Ok(DeviceType::PushButton),
            other => Err(MaxError::ValueOutOfRange {
                field: "device_type",
                value: other,
            }),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Pairing request broadcast by a device in pairing mode.
///
/// `b0 firmware version | b1 device type | b2 self-test result | b3..b12 serial number`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairPing {
    /// Major version in the high nibble, minor version in the low nibble
    pub firmware_version: u8,
    pub device_type: DeviceType,
    pub test_result: u8,
    /// 10 ASCII characters
    pub serial_number: String,
}

impl PairPing {
    /// Firmware version as `major.minor`.
    pub fn firmware(&self) -> String {
        format!("{}.{}", self.firmware_version >> 4, self.firmware_version & 0x0F)
    }
}

impl PayloadCodec for PairPing {
    const MESSAGE_TYPE: MessageType = MessageType::PairPing;
    const LENGTHS: &'static [usize] = &[3 + MAX_SERIAL_NUMBER_LEN];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;

        Ok(PairPing {
            firmware_version: payload[0],
            device_type: DeviceType::from_code(payload[1])?,
            test_result: payload[2],
            serial_number: payload[3..].iter().map(|&b| b as char).collect(),
        })
    }

    fn encode(&self) -> Vec<u8> {
        let mut payload = vec![self.firmware_version, self.device_type.code(), self.test_result];
        let serial = self
            .serial_number
            .chars()
            .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
            .chain(std::iter::repeat(b' '))
            .take(MAX_SERIAL_NUMBER_LEN);
        payload.extend(serial);
        payload
    }
}

/// Answer to a pair ping that accepts the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PairPong;

impl PayloadCodec for PairPong {
    const MESSAGE_TYPE: MessageType = MessageType::PairPong;
    const LENGTHS: &'static [usize] = &[1];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;
        Ok(PairPong)
    }

    fn encode(&self) -> Vec<u8> {
        vec![0x00]
    }
}

/// Keeps a device's receiver awake for a burst of commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Wakeup;

impl PayloadCodec for Wakeup {
    const MESSAGE_TYPE: MessageType = MessageType::Wakeup;
    const LENGTHS: &'static [usize] = &[1];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;
        Ok(Wakeup)
    }

    fn encode(&self) -> Vec<u8> {
        vec![MAX_WAKEUP_PAYLOAD]
    }
}

/// Factory reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Reset;

impl PayloadCodec for Reset {
    const MESSAGE_TYPE: MessageType = MessageType::Reset;
    const LENGTHS: &'static [usize] = &[0];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;
        Ok(Reset)
    }

    fn encode(&self) -> Vec<u8> {
        Vec::new()
    }
}

/// Assigns the device to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetGroupId {
    pub group_id: u8,
}

impl PayloadCodec for SetGroupId {
    const MESSAGE_TYPE: MessageType = MessageType::SetGroupId;
    const LENGTHS: &'static [usize] = &[1];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;
        Ok(SetGroupId {
            group_id: payload[0],
        })
    }

    fn encode(&self) -> Vec<u8> {
        vec![self.group_id]
    }
}

/// Removes the device from its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RemoveGroupId;

impl PayloadCodec for RemoveGroupId {
    const MESSAGE_TYPE: MessageType = MessageType::RemoveGroupId;
    const LENGTHS: &'static [usize] = &[1];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;
        Ok(RemoveGroupId)
    }

    fn encode(&self) -> Vec<u8> {
        vec![0x00]
    }
}

/// Link partner payload: `b0..b2 partner address | b3 device type`.
fn decode_link_partner(payload: &[u8]) -> Result<(Address, DeviceType), MaxError> {
    let partner = Address::from_bytes([payload[0], payload[1], payload[2]]);
    Ok((partner, DeviceType::from_code(payload[3])?))
}

fn encode_link_partner(partner: &Address, device_type: DeviceType) -> Vec<u8> {
    let mut payload = partner.as_bytes().to_vec();
    payload.push(device_type.code());
    payload
}

/// Links the device with a partner (e.g. a thermostat with a shutter contact).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddLinkPartner {
    pub partner: Address,
    pub device_type: DeviceType,
}

impl PayloadCodec for AddLinkPartner {
    const MESSAGE_TYPE: MessageType = MessageType::AddLinkPartner;
    const LENGTHS: &'static [usize] = &[4];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;
        let (partner, device_type) = decode_link_partner(payload)?;
        Ok(AddLinkPartner {
            partner,
            device_type,
        })
    }

    fn encode(&self) -> Vec<u8> {
        encode_link_partner(&self.partner, self.device_type)
    }
}

/// Removes a link partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveLinkPartner {
    pub partner: Address,
    pub device_type: DeviceType,
}

impl PayloadCodec for RemoveLinkPartner {
    const MESSAGE_TYPE: MessageType = MessageType::RemoveLinkPartner;
    const LENGTHS: &'static [usize] = &[4];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;
        let (partner, device_type) = decode_link_partner(payload)?;
        Ok(RemoveLinkPartner {
            partner,
            device_type,
        })
    }

    fn encode(&self) -> Vec<u8> {
        encode_link_partner(&self.partner, self.device_type)
    }
}

/// Enables or disables automatic daylight-saving adjustment.
///
/// `b0 bit0: adjustment enabled`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetDstAdjust {
    pub enabled: bool,
}

impl PayloadCodec for SetDstAdjust {
    const MESSAGE_TYPE: MessageType = MessageType::SetDstAdjust;
    const LENGTHS: &'static [usize] = &[1];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;
        Ok(SetDstAdjust {
            enabled: payload[0] & 0x01 == 0x01,
        })
    }

    fn encode(&self) -> Vec<u8> {
        vec![u8::from(self.enabled)]
    }
}

/// Wall-clock time pushed to devices. An empty payload is a device asking
/// for the time.
///
/// ```text
/// b0 year - 2000 | b1 day | b2 hour
/// b3 bits0-5 minute, bits6-7 month bits 2-3
/// b4 bits0-5 second, bits6-7 month bits 0-1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeInformation {
    /// `None` for a time request
    pub datetime: Option<NaiveDateTime>,
}

impl TimeInformation {
    pub fn request() -> Self {
        TimeInformation { datetime: None }
    }

    pub fn new(datetime: NaiveDateTime) -> Self {
        TimeInformation {
            datetime: Some(datetime),
        }
    }
}

impl PayloadCodec for TimeInformation {
    const MESSAGE_TYPE: MessageType = MessageType::TimeInformation;
    const LENGTHS: &'static [usize] = &[0, 5];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;
        if payload.is_empty() {
            return Ok(TimeInformation::request());
        }

        let year = MAX_BASE_YEAR + payload[0] as i32;
        let day = payload[1] & 0x1F;
        let hour = payload[2] & 0x1F;
        let minute = payload[3] & 0x3F;
        let second = payload[4] & 0x3F;
        let month = ((payload[3] & 0xC0) >> 4) | (payload[4] >> 6);

        let datetime = NaiveDate::from_ymd_opt(year, month as u32, day as u32)
            .and_then(|date| date.and_hms_opt(hour as u32, minute as u32, second as u32))
            .ok_or(MaxError::ValueOutOfRange {
                field: "time_information",
                value: month,
            })?;

        Ok(TimeInformation::new(datetime))
    }

    fn encode(&self) -> Vec<u8> {
        let Some(datetime) = &self.datetime else {
            return Vec::new();
        };

        let month = datetime.month() as u8;
        let year_offset = (datetime.year() - MAX_BASE_YEAR).clamp(0, u8::MAX as i32) as u8;
        vec![
            year_offset,
            datetime.day() as u8,
            datetime.hour() as u8,
            datetime.minute() as u8 | ((month & 0x0C) << 4),
            datetime.second() as u8 | ((month & 0x03) << 6),
        ]
    }
}
