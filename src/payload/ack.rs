//! # Acknowledgement (0x02)
//!
//! ```text
//! len 2: b0 bit7 nack, bits0-1 mode | b1 bits3-7 device flags
//! len 4: + b2 valve position | b3 bits0-6 desired temperature, bit7 display measured
//! len 7: + b4..b6 until-date
//! ```

use log::debug;
use serde::Serialize;

use super::datetime::{decode_until_date, encode_until_date, UntilDateTime};
use super::status::{ControlMode, DeviceFlags};
use super::{check_length, PayloadCodec};
use crate::constants::{MAX_ACK_DISPLAY_MEASURED_BIT, MAX_ACK_NACK_BIT};
use crate::error::MaxError;
use crate::message::MessageType;
use crate::util::bits::{bit_at, raw_to_temperature, temperature_to_raw, with_bit, TEMP_MASK_7BIT};

/// Acknowledgement sent by a device after it processed a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Acknowledgement {
    /// The device rejected the command
    pub nack: bool,
    pub mode: ControlMode,
    pub flags: DeviceFlags,
    /// Present in the 4- and 7-byte variants sent by thermostats
    pub thermostat: Option<AckThermostatState>,
}

/// Thermostat state echoed in the longer acknowledgement variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AckThermostatState {
    /// Raw valve position byte
    pub valve_position: u8,
    /// Desired temperature in °C
    pub desired_temperature: f64,
    /// Wall thermostat shows the measured instead of the desired temperature
    pub display_measured: bool,
    pub until: Option<UntilDateTime>,
}

impl Acknowledgement {
    /// Plain positive acknowledgement as sent by sensors and the cube.
    pub fn ok(mode: ControlMode, flags: DeviceFlags) -> Self {
        Acknowledgement {
            nack: false,
            mode,
            flags,
            thermostat: None,
        }
    }
}

impl PayloadCodec for Acknowledgement {
    const MESSAGE_TYPE: MessageType = MessageType::Acknowledgement;
    const LENGTHS: &'static [usize] = &[2, 4, 7];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        check_length::<Self>(payload)?;

        let nack = bit_at(payload[0], MAX_ACK_NACK_BIT);
        let mode = ControlMode::from_bits(payload[0]);
        let flags = DeviceFlags::from_status(payload[1]);

        let thermostat = if payload.len() >= 4 {
            let until = if payload.len() == 7 {
                Some(decode_until_date(payload[4], payload[5], payload[6]))
            } else {
                None
            };
            Some(AckThermostatState {
                valve_position: payload[2],
                desired_temperature: raw_to_temperature(payload[3], TEMP_MASK_7BIT),
                // Some protocol notes put this flag in b2, which is the full
                // valve byte here. Bit 7 of b3 is unconfirmed against captures.
                display_measured: bit_at(payload[3], MAX_ACK_DISPLAY_MEASURED_BIT),
                until,
            })
        } else {
            None
        };

        if nack {
            debug!("Negative acknowledgement received (mode {:?})", mode);
        }

        Ok(Acknowledgement {
            nack,
            mode,
            flags,
            thermostat,
        })
    }

    fn encode(&self) -> Vec<u8> {
        let mut payload = vec![
            with_bit(self.mode.bits(), MAX_ACK_NACK_BIT, self.nack),
            self.flags.bits(),
        ];

        if let Some(state) = &self.thermostat {
            payload.push(state.valve_position);
            payload.push(with_bit(
                temperature_to_raw(state.desired_temperature, TEMP_MASK_7BIT),
                MAX_ACK_DISPLAY_MEASURED_BIT,
                state.display_measured,
            ));
            if let Some(until) = &state.until {
                payload.extend_from_slice(&encode_until_date(until));
            }
        }

        payload
    }
}
