//! # Temperature Commands
//!
//! Set-point related commands sent to thermostats:
//!
//! - SetTemperature (0x40): `b0 bits0-5 desired temperature, bits6-7 mode`,
//!   optionally followed by a 3-byte until-date.
//! - SetComfortTemperature (0x43) / SetEcoTemperature (0x44): no payload,
//!   switch to the stored preset.
//! - ConfigureTemperatures (0x11): the stored presets and window-open settings.
//!
//! Set-points are clamped to the range the thermostat accepts before they
//! are encoded. Clamping succeeds silently apart from a debug log line.

use log::debug;
use serde::Serialize;

use super::datetime::{decode_until_date, encode_until_date, UntilDateTime};
use super::status::ControlMode;
use super::{check_length, PayloadCodec};
use crate::constants::{MAX_MEASUREMENT_OFFSET_BIAS, MAX_TEMPERATURE_MAX, MAX_TEMPERATURE_MIN};
use crate::error::MaxError;
use crate::message::MessageType;
use crate::util::bits::{raw_to_temperature, temperature_to_raw, TEMP_MASK_6BIT, TEMP_MASK_7BIT};

/// Clamps a set-point to [4.5, 30.5] °C.
pub fn clamp_set_point(celsius: f64) -> f64 {
    let clamped = if celsius.is_nan() {
        MAX_TEMPERATURE_MIN
    } else {
        celsius.clamp(MAX_TEMPERATURE_MIN, MAX_TEMPERATURE_MAX)
    };
    if clamped != celsius {
        debug!("Set-point {} °C clamped to {} °C", celsius, clamped);
    }
    clamped
}

/// Sets the desired temperature and mode of a thermostat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetTemperature {
    pub mode: ControlMode,
    /// Desired temperature in °C
    pub temperature: f64,
    /// End of a temporary set-point
    pub until: Option<UntilDateTime>,
}

impl SetTemperature {
    pub fn new(mode: ControlMode, temperature: f64) -> Self {
        SetTemperature {
            mode,
            temperature,
            until: None,
        }
    }

    /// Temporary set-point that expires at `until`.
    pub fn temporary(temperature: f64, until: UntilDateTime) -> Self {
        SetTemperature {
            mode: ControlMode::Temporary,
            temperature,
            until: Some(until),
        }
    }
}

impl PayloadCodec for SetTemperature {
    const MESSAGE_TYPE: MessageType = MessageType::SetTemperature;
    const LENGTHS: &'static [usize] = &[1, 4];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;

        let until = if payload.len() == 4 {
            Some(decode_until_date(payload[1], payload[2], payload[3]))
        } else {
            None
        };

        Ok(SetTemperature {
            mode: ControlMode::from_bits(payload[0] >> 6),
            temperature: raw_to_temperature(payload[0], TEMP_MASK_6BIT),
            until,
        })
    }

    fn encode(&self) -> Vec<u8> {
        let raw = temperature_to_raw(clamp_set_point(self.temperature), TEMP_MASK_6BIT);
        let mut payload = vec![raw | (self.mode.bits() << 6)];
        if let Some(until) = &self.until {
            payload.extend_from_slice(&encode_until_date(until));
        }
        payload
    }
}

/// Switches a thermostat to its stored comfort temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SetComfortTemperature;

impl PayloadCodec for SetComfortTemperature {
    const MESSAGE_TYPE: MessageType = MessageType::SetComfortTemperature;
    const LENGTHS: &'static [usize] = &[0];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;
        Ok(SetComfortTemperature)
    }

    fn encode(&self) -> Vec<u8> {
        Vec::new()
    }
}

/// Switches a thermostat to its stored eco temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SetEcoTemperature;

impl PayloadCodec for SetEcoTemperature {
    const MESSAGE_TYPE: MessageType = MessageType::SetEcoTemperature;
    const LENGTHS: &'static [usize] = &[0];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;
        Ok(SetEcoTemperature)
    }

    fn encode(&self) -> Vec<u8> {
        Vec::new()
    }
}

/// Stored temperature presets of a thermostat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigureTemperatures {
    pub comfort: f64,
    pub eco: f64,
    pub max: f64,
    pub min: f64,
    /// Correction applied to the measured temperature, -3.5 to +3.5 °C
    pub measurement_offset: f64,
    /// Set-point while a paired shutter contact reports an open window
    pub window_open_temperature: f64,
    /// How long the window-open set-point is held, in minutes (5-minute steps)
    pub window_open_minutes: u16,
}

impl Default for ConfigureTemperatures {
    /// Factory presets of a heating thermostat.
    fn default() -> Self {
        ConfigureTemperatures {
            comfort: 21.0,
            eco: 17.0,
            max: 30.5,
            min: 4.5,
            measurement_offset: 0.0,
            window_open_temperature: 12.0,
            window_open_minutes: 15,
        }
    }
}

impl PayloadCodec for ConfigureTemperatures {
    const MESSAGE_TYPE: MessageType = MessageType::ConfigureTemperatures;
    const LENGTHS: &'static [usize] = &[7];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;

        Ok(ConfigureTemperatures {
            comfort: raw_to_temperature(payload[0], TEMP_MASK_7BIT),
            eco: raw_to_temperature(payload[1], TEMP_MASK_7BIT),
            max: raw_to_temperature(payload[2], TEMP_MASK_7BIT),
            min: raw_to_temperature(payload[3], TEMP_MASK_7BIT),
            measurement_offset: payload[4] as f64 / 2.0 - MAX_MEASUREMENT_OFFSET_BIAS,
            window_open_temperature: raw_to_temperature(payload[5], TEMP_MASK_7BIT),
            window_open_minutes: payload[6] as u16 * 5,
        })
    }

    fn encode(&self) -> Vec<u8> {
        let offset = self
            .measurement_offset
            .clamp(-MAX_MEASUREMENT_OFFSET_BIAS, MAX_MEASUREMENT_OFFSET_BIAS);
        vec![
            temperature_to_raw(clamp_set_point(self.comfort), TEMP_MASK_7BIT),
            temperature_to_raw(clamp_set_point(self.eco), TEMP_MASK_7BIT),
            temperature_to_raw(clamp_set_point(self.max), TEMP_MASK_7BIT),
            temperature_to_raw(clamp_set_point(self.min), TEMP_MASK_7BIT),
            ((offset + MAX_MEASUREMENT_OFFSET_BIAS) * 2.0).round() as u8,
            temperature_to_raw(clamp_set_point(self.window_open_temperature), TEMP_MASK_7BIT),
            (self.window_open_minutes / 5).min(u8::MAX as u16) as u8,
        ]
    }
}
