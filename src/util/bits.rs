//! # Bit and Quantization Utilities
//!
//! MAX! payloads pack most values into a few bits of a byte and quantize
//! them to the protocol's resolution: temperatures travel in half degrees,
//! valve settings as a 0-255 byte and week-profile times in 5-minute steps.
//!
//! ## Usage
//!
//! ```rust
//! use maxcul_rs::util::bits::{bit_at, percent_to_byte, temperature_to_raw, TEMP_MASK_6BIT};
//!
//! assert!(bit_at(0b1000_0000, 7));
//! assert_eq!(percent_to_byte(100), 0xFF);
//! assert_eq!(temperature_to_raw(21.0, TEMP_MASK_6BIT), 42);
//! ```

/// Mask for temperatures carried in 6 bits (max 31.5 °C)
pub const TEMP_MASK_6BIT: u8 = 0x3F;

/// Mask for temperatures carried in 7 bits (max 63.5 °C)
pub const TEMP_MASK_7BIT: u8 = 0x7F;

/// Returns true if bit `index` (0 = least significant) of `value` is set.
#[inline]
pub fn bit_at(value: u8, index: u8) -> bool {
    (value >> (index & 0x07)) & 0x01 == 0x01
}

/// Sets or clears bit `index` of `value` and returns the result.
#[inline]
pub fn with_bit(value: u8, index: u8, set: bool) -> u8 {
    let mask = 1u8 << (index & 0x07);
    if set {
        value | mask
    } else {
        value & !mask
    }
}

/// Scales a percentage (0-100) to the 0-255 byte range.
///
/// Values above 100 are treated as 100.
#[inline]
pub fn percent_to_byte(percent: u8) -> u8 {
    let percent = percent.min(100) as f64;
    (percent * 255.0 / 100.0).round() as u8
}

/// Scales a 0-255 byte back to a percentage (0-100).
#[inline]
pub fn byte_to_percent(value: u8) -> u8 {
    (value as f64 * 100.0 / 255.0).round() as u8
}

/// Converts a temperature in °C to half-degree units, masked to the field width.
///
/// Negative temperatures encode as 0.
#[inline]
pub fn temperature_to_raw(celsius: f64, mask: u8) -> u8 {
    let raw = (celsius * 2.0).round().max(0.0).min(u8::MAX as f64) as u8;
    raw & mask
}

/// Converts half-degree units back to °C, honouring the field width.
#[inline]
pub fn raw_to_temperature(raw: u8, mask: u8) -> f64 {
    (raw & mask) as f64 / 2.0
}

/// Converts a time of day to the number of 5-minute steps since midnight.
///
/// Minutes that are not a multiple of 5 are rounded down.
#[inline]
pub fn time_to_five_minute_units(hour: u8, minute: u8) -> u16 {
    (hour as u16 * 60 + minute as u16) / 5
}

/// Converts 5-minute steps since midnight to `(hour, minute)`.
#[inline]
pub fn five_minute_units_to_time(units: u16) -> (u8, u8) {
    let minutes = units * 5;
    ((minutes / 60) as u8, (minutes % 60) as u8)
}
