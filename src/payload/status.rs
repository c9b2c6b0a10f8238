//! # Device Status Fields
//!
//! Thermostat-family messages share a status byte: the control mode in
//! bits 0-1 and a set of device flags in bits 3-7. Shutter contacts and push
//! buttons reuse the RF-error and battery bits at the same positions.

use bitflags::bitflags;
use serde::Serialize;

use crate::constants::{MAX_STATUS_MASK_FLAGS, MAX_STATUS_MASK_MODE};

/// Thermostat operating mode (2 bits on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ControlMode {
    /// Follows the week profile
    Auto = 0,
    /// Holds a manually chosen set-point
    Manual = 1,
    /// Holds a set-point until a given date; measured temperature is not reported
    Temporary = 2,
    /// Runs the boost valve cycle
    Boost = 3,
}

impl ControlMode {
    /// Decodes the mode from the two low bits of `bits`.
    pub fn from_bits(bits: u8) -> Self {
        match bits & MAX_STATUS_MASK_MODE {
            0 => ControlMode::Auto,
            1 => ControlMode::Manual,
            2 => ControlMode::Temporary,
            _ => ControlMode::Boost,
        }
    }

    /// The two-bit wire value.
    pub fn bits(self) -> u8 {
        self as u8
    }
}

bitflags! {
    /// Orthogonal device facts carried in bits 3-7 of a status byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(transparent)]
    pub struct DeviceFlags: u8 {
        /// Daylight saving time is active
        const DST_ACTIVE  = 0b0000_1000;
        /// The device is paired with a LAN gateway (cube)
        const LAN_GATEWAY = 0b0001_0000;
        /// Manual set-point changes on the device are locked
        const LOCKED      = 0b0010_0000;
        /// The device lost RF contact with a partner
        const RF_ERROR    = 0b0100_0000;
        /// The battery is low
        const BATTERY_LOW = 0b1000_0000;
    }
}

impl DeviceFlags {
    /// Flags that battery-powered sensors (shutter contact, push button) report.
    pub const SENSOR: DeviceFlags = DeviceFlags::RF_ERROR.union(DeviceFlags::BATTERY_LOW);

    /// Extracts the flags from a status byte, ignoring the mode bits.
    pub fn from_status(status: u8) -> Self {
        DeviceFlags::from_bits_truncate(status & MAX_STATUS_MASK_FLAGS)
    }

    pub fn battery_low(self) -> bool {
        self.contains(DeviceFlags::BATTERY_LOW)
    }

    pub fn rf_error(self) -> bool {
        self.contains(DeviceFlags::RF_ERROR)
    }

    pub fn dst_active(self) -> bool {
        self.contains(DeviceFlags::DST_ACTIVE)
    }

    pub fn lan_gateway(self) -> bool {
        self.contains(DeviceFlags::LAN_GATEWAY)
    }

    pub fn locked(self) -> bool {
        self.contains(DeviceFlags::LOCKED)
    }
}

/// Splits a combined status byte into mode and flags.
pub fn decode_status(status: u8) -> (ControlMode, DeviceFlags) {
    (ControlMode::from_bits(status), DeviceFlags::from_status(status))
}

/// Packs mode and flags into a combined status byte.
pub fn encode_status(mode: ControlMode, flags: DeviceFlags) -> u8 {
    mode.bits() | flags.bits()
}
