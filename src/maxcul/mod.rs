//! # MAX! Envelope and CUL Link Layer
//!
//! `frame` parses and builds the header every MAX! message shares.
//! `cul` deals with the text lines a CUL dongle prints and accepts.

pub mod cul;
pub mod frame;

pub use cul::{parse_cul_line, rssi_to_dbm, to_send_command, CulLine};
pub use frame::{build_frame, parse_frame, parse_frame_bytes, Address, Frame, MessageHeader};
