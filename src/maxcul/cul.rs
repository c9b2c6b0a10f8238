//! # CUL Dongle Lines
//!
//! With MAX! reporting enabled the CUL firmware prints each received frame
//! as a text line: `Z`, the frame in hex and, when RSSI reporting is on, one
//! extra hex byte with the signal strength. Frames are sent with `Zs` plus
//! the frame in hex.

use log::debug;
use serde::Serialize;

use super::frame::{parse_frame_bytes, Frame};
use crate::constants::{CUL_MAX_RECEIVE_PREFIX, CUL_MAX_SEND_COMMAND};
use crate::error::MaxError;
use crate::util::hex::decode_hex;

/// A frame received through the CUL dongle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CulLine {
    pub frame: Frame,
    /// Signal strength in dBm, when the firmware reports it
    pub rssi_dbm: Option<f64>,
}

/// Converts the raw CUL RSSI byte to dBm.
pub fn rssi_to_dbm(raw: u8) -> f64 {
    let raw = raw as f64;
    if raw >= 128.0 {
        (raw - 256.0) / 2.0 - 74.0
    } else {
        raw / 2.0 - 74.0
    }
}

/// Parses a line printed by the CUL firmware, e.g. `Z0B0100021234560ABCDE0000`.
pub fn parse_cul_line(line: &str) -> Result<CulLine, MaxError> {
    let line = line.trim_end();
    let hex = line.strip_prefix(CUL_MAX_RECEIVE_PREFIX).ok_or_else(|| {
        MaxError::MalformedFrame(format!(
            "CUL line does not start with '{}'",
            CUL_MAX_RECEIVE_PREFIX
        ))
    })?;

    let bytes = decode_hex(hex)?;
    let declared = bytes.first().map(|&len| len as usize + 1);

    // one byte past the declared frame is the RSSI
    let (frame_bytes, rssi_dbm) = match declared {
        Some(frame_len) if bytes.len() == frame_len + 1 => {
            let rssi = rssi_to_dbm(bytes[frame_len]);
            debug!("CUL frame received at {} dBm", rssi);
            (&bytes[..frame_len], Some(rssi))
        }
        _ => (&bytes[..], None),
    };

    Ok(CulLine {
        frame: parse_frame_bytes(frame_bytes)?,
        rssi_dbm,
    })
}

/// Wraps a hex frame into the command that makes the CUL transmit it.
pub fn to_send_command(frame_hex: &str) -> String {
    format!("{}{}", CUL_MAX_SEND_COMMAND, frame_hex)
}
