//! # Device State Reports
//!
//! Reports that battery-powered devices send on their own:
//!
//! - ThermostatStateReport (0x60), 3, 5 or 6 bytes
//! - ShutterContactStateReport (0x30), 1 byte
//! - PushButtonNotification (0x50), 2 bytes

use log::debug;
use serde::Serialize;

use super::datetime::{decode_until_date, encode_until_date, UntilDateTime};
use super::status::{decode_status, encode_status, ControlMode, DeviceFlags};
use super::{check_length, PayloadCodec};
use crate::constants::{
    MAX_MEASURED_TEMPERATURE_FLOOR, MAX_MEASURED_TEMPERATURE_MASK, MAX_PUSH_BUTTON_RETRANSMISSION,
    MAX_SHUTTER_STATE_BIT,
};
use crate::error::MaxError;
use crate::message::MessageType;
use crate::util::bits::{bit_at, raw_to_temperature, temperature_to_raw, TEMP_MASK_7BIT};

/// Periodic state of a heating thermostat.
///
/// ```text
/// len 3: b0 mode + flags | b1 valve position | b2 bits0-6 desired temperature
/// len 5: + b3 bit0 / b4 measured temperature in 0.1 °C (9 bits)
/// len 6: + b3..b5 until-date
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermostatStateReport {
    pub mode: ControlMode,
    pub flags: DeviceFlags,
    /// Raw valve position byte
    pub valve_position: u8,
    /// Desired temperature in °C
    pub desired_temperature: f64,
    /// The optional tail of the 5- and 6-byte reports
    pub extension: ReportExtension,
}

/// Tail of a thermostat state report. A report carries either a
/// measurement or an until-date, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportExtension {
    /// 3-byte report
    Basic,
    /// 5-byte report with the measured temperature in °C. Decodes as `None`
    /// in temporary mode and below 4.5 °C; encoding `None` writes a zero
    /// reading.
    MeasuredTemperature(Option<f64>),
    /// 6-byte report
    Until(UntilDateTime),
}

impl ThermostatStateReport {
    /// Measured temperature in °C, if the report carries a valid one.
    pub fn measured_temperature(&self) -> Option<f64> {
        match self.extension {
            ReportExtension::MeasuredTemperature(measured) => measured,
            _ => None,
        }
    }

    pub fn until(&self) -> Option<UntilDateTime> {
        match self.extension {
            ReportExtension::Until(until) => Some(until),
            _ => None,
        }
    }
}

impl PayloadCodec for ThermostatStateReport {
    const MESSAGE_TYPE: MessageType = MessageType::ThermostatStateReport;
    const LENGTHS: &'static [usize] = &[3, 5, 6];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;

        let (mode, flags) = decode_status(payload[0]);
        let extension = match payload.len() {
            5 => {
                let raw = (((payload[3] & 0x01) as u16) << 8) | payload[4] as u16;
                let measured = raw as f64 / 10.0;
                if mode == ControlMode::Temporary {
                    debug!("Measured temperature suppressed in temporary mode");
                    ReportExtension::MeasuredTemperature(None)
                } else if measured < MAX_MEASURED_TEMPERATURE_FLOOR {
                    debug!("Discarding measured temperature {} °C", measured);
                    ReportExtension::MeasuredTemperature(None)
                } else {
                    ReportExtension::MeasuredTemperature(Some(measured))
                }
            }
            6 => ReportExtension::Until(decode_until_date(payload[3], payload[4], payload[5])),
            _ => ReportExtension::Basic,
        };

        Ok(ThermostatStateReport {
            mode,
            flags,
            valve_position: payload[1],
            desired_temperature: raw_to_temperature(payload[2], TEMP_MASK_7BIT),
            extension,
        })
    }

    fn encode(&self) -> Vec<u8> {
        let mut payload = vec![
            encode_status(self.mode, self.flags),
            self.valve_position,
            temperature_to_raw(self.desired_temperature, TEMP_MASK_7BIT),
        ];

        match self.extension {
            ReportExtension::Basic => {}
            ReportExtension::MeasuredTemperature(measured) => {
                if measured.is_some() && self.mode == ControlMode::Temporary {
                    debug!("Measured temperature is not reported in temporary mode");
                }
                let raw = match measured {
                    Some(measured) if self.mode != ControlMode::Temporary => {
                        ((measured * 10.0).round().max(0.0) as u16).min(MAX_MEASURED_TEMPERATURE_MASK)
                    }
                    _ => 0,
                };
                payload.push((raw >> 8) as u8);
                payload.push((raw & 0xFF) as u8);
            }
            ReportExtension::Until(until) => payload.extend_from_slice(&encode_until_date(&until)),
        }

        payload
    }
}

/// Window or door state from a shutter contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShutterContactStateReport {
    pub open: bool,
    /// Only RF_ERROR and BATTERY_LOW are meaningful
    pub flags: DeviceFlags,
}

impl PayloadCodec for ShutterContactStateReport {
    const MESSAGE_TYPE: MessageType = MessageType::ShutterContactStateReport;
    const LENGTHS: &'static [usize] = &[1];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;

        Ok(ShutterContactStateReport {
            // bit set means closed
            open: !bit_at(payload[0], MAX_SHUTTER_STATE_BIT),
            flags: DeviceFlags::from_status(payload[0]) & DeviceFlags::SENSOR,
        })
    }

    fn encode(&self) -> Vec<u8> {
        let state = if self.open { 0 } else { 1 << MAX_SHUTTER_STATE_BIT };
        vec![state | (self.flags & DeviceFlags::SENSOR).bits()]
    }
}

/// Mode requested by an eco push button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ButtonMode {
    Eco = 0,
    Auto = 1,
}

/// Status byte of a push-button notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStatus {
    /// Only RF_ERROR and BATTERY_LOW are meaningful
    Flags(DeviceFlags),
    /// The button repeats a press nobody acknowledged. The status byte is
    /// then a fixed marker and carries no battery state.
    Retransmission,
}

/// Button press on an eco push button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushButtonNotification {
    pub mode: ButtonMode,
    pub status: ButtonStatus,
}

impl PushButtonNotification {
    pub fn new(mode: ButtonMode, flags: DeviceFlags) -> Self {
        PushButtonNotification {
            mode,
            status: ButtonStatus::Flags(flags & DeviceFlags::SENSOR),
        }
    }

    /// Flags as read from the status byte. The retransmission marker has
    /// the rf-error bit set.
    pub fn flags(&self) -> DeviceFlags {
        match self.status {
            ButtonStatus::Flags(flags) => flags & DeviceFlags::SENSOR,
            ButtonStatus::Retransmission => {
                DeviceFlags::from_status(MAX_PUSH_BUTTON_RETRANSMISSION) & DeviceFlags::SENSOR
            }
        }
    }

    pub fn is_retransmission(&self) -> bool {
        self.status == ButtonStatus::Retransmission
    }
}

impl PayloadCodec for PushButtonNotification {
    const MESSAGE_TYPE: MessageType = MessageType::PushButtonNotification;
    const LENGTHS: &'static [usize] = &[2];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;

        let mode = match payload[1] {
            0 => ButtonMode::Eco,
            1 => ButtonMode::Auto,
            other => {
                return Err(MaxError::ValueOutOfRange {
                    field: "button_mode",
                    value: other,
                })
            }
        };

        let status = if payload[0] == MAX_PUSH_BUTTON_RETRANSMISSION {
            ButtonStatus::Retransmission
        } else {
            ButtonStatus::Flags(DeviceFlags::from_status(payload[0]) & DeviceFlags::SENSOR)
        };

        Ok(PushButtonNotification { mode, status })
    }

    fn encode(&self) -> Vec<u8> {
        let status = match self.status {
            ButtonStatus::Flags(flags) => (flags & DeviceFlags::SENSOR).bits(),
            ButtonStatus::Retransmission => MAX_PUSH_BUTTON_RETRANSMISSION,
        };
        vec![status, self.mode as u8]
    }
}
