//! MAX! Protocol Constants
//!
//! This module defines constants of the MAX! RF frame format and its
//! payload encodings.

/// Bytes in the envelope after the length byte: sequence counter, flags,
/// message type, source (3), destination (3) and group id.
pub const MAX_HEADER_LEN: usize = 10;

/// Smallest valid frame: length byte plus header, empty payload.
pub const MAX_MIN_FRAME_LEN: usize = MAX_HEADER_LEN + 1;

/// Largest payload whose frame length still fits the length byte.
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize - MAX_HEADER_LEN;

/// Flags byte value used for frames addressed to a group
pub const MAX_FLAGS_GROUP: u8 = 0x04;

/// Flags byte value used for ordinary frames
pub const MAX_FLAGS_NONE: u8 = 0x00;

/// Lowest set-point a thermostat accepts (the device's "OFF" position)
pub const MAX_TEMPERATURE_MIN: f64 = 4.5;

/// Highest set-point a thermostat accepts (the device's "ON" position)
pub const MAX_TEMPERATURE_MAX: f64 = 30.5;

/// Measured temperatures below this value are not real measurements
pub const MAX_MEASURED_TEMPERATURE_FLOOR: f64 = 4.5;

/// Mask of the 9-bit measured temperature
pub const MAX_MEASURED_TEMPERATURE_MASK: u16 = 0x01FF;

/// Status byte mask for the control mode
pub const MAX_STATUS_MASK_MODE: u8 = 0x03;

/// Status byte mask for the device flags (bits 3-7)
pub const MAX_STATUS_MASK_FLAGS: u8 = 0xF8;

/// Acknowledgement status bit marking a negative acknowledgement
pub const MAX_ACK_NACK_BIT: u8 = 7;

/// Bit in the desired-temperature byte of an acknowledgement that selects
/// the measured temperature for the display
pub const MAX_ACK_DISPLAY_MEASURED_BIT: u8 = 7;

/// Push-button status byte value signalling a retransmission
pub const MAX_PUSH_BUTTON_RETRANSMISSION: u8 = 0x50;

/// Shutter-contact bit carrying the open/closed state
pub const MAX_SHUTTER_STATE_BIT: u8 = 1;

/// Payload byte sent with a wakeup command
pub const MAX_WAKEUP_PAYLOAD: u8 = 0x3F;

/// Week-profile slot value meaning "no control point"
pub const MAX_WEEK_PROFILE_PADDING: u16 = 0x4520;

/// Control points carried by the first week-profile frame of a day
pub const MAX_WEEK_PROFILE_FIRST_HALF_POINTS: usize = 7;

/// Control points carried by the second week-profile frame of a day
pub const MAX_WEEK_PROFILE_SECOND_HALF_POINTS: usize = 6;

/// Control points per day
pub const MAX_WEEK_PROFILE_POINTS_PER_DAY: usize =
    MAX_WEEK_PROFILE_FIRST_HALF_POINTS + MAX_WEEK_PROFILE_SECOND_HALF_POINTS;

/// Week-profile slot mask for the time in 5-minute units
pub const MAX_WEEK_PROFILE_TIME_MASK: u16 = 0x01FF;

/// Week-profile slot mask for the temperature in half degrees (after shifting)
pub const MAX_WEEK_PROFILE_TEMP_MASK: u16 = 0x3F;

/// Base year of the until-date and time-information encodings
pub const MAX_BASE_YEAR: i32 = 2000;

/// Offset applied to the measurement offset before quantization
pub const MAX_MEASUREMENT_OFFSET_BIAS: f64 = 3.5;

/// Length of the serial number in a pair ping
pub const MAX_SERIAL_NUMBER_LEN: usize = 10;

/// Prefix of CUL lines carrying MAX! frames
pub const CUL_MAX_RECEIVE_PREFIX: char = 'Z';

/// CUL command that transmits a MAX! frame
pub const CUL_MAX_SEND_COMMAND: &str = "Zs";
