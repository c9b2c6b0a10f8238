//! # MAX! Date and Time Encoding
//!
//! Temporary set-points carry an "until" instant packed into three bytes at
//! half-hour resolution:
//!
//! ```text
//! byte1: bits 0-4 day
//! byte2: bits 5-7 month bits 1-3, bits 0-5 year offset from 2000
//! byte3: bit 7 month bit 0, bits 0-5 half-hour index of the day
//! ```
//!
//! Bit 5 of byte2 is read by both the month and the year field, so the
//! packing is only lossless when month bit 1 and year-offset bit 5 agree.
//! Decoding is total and does not validate ranges; conversion to a chrono
//! value is where invalid dates surface.
//!
//! The module also maps the protocol's weekday numbering (0 = Saturday) to
//! `chrono::Weekday`.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::Serialize;

use crate::constants::MAX_BASE_YEAR;

/// Calendar instant of an until-date, as decoded from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UntilDateTime {
    /// Day of month, 0-31 as decoded
    pub day: u8,
    /// Month, 0-15 as decoded
    pub month: u8,
    /// Full year (2000-2063)
    pub year: u16,
    /// Hour, 0-31 as decoded (24 means midnight of the following day)
    pub hour: u8,
    /// Minute, 0 or 30
    pub minute: u8,
}

impl UntilDateTime {
    /// Builds an until-date from a chrono value, rounding down to the half hour.
    pub fn from_naive_datetime(datetime: &NaiveDateTime) -> Self {
        UntilDateTime {
            day: datetime.day() as u8,
            month: datetime.month() as u8,
            year: datetime.year().clamp(MAX_BASE_YEAR, MAX_BASE_YEAR + 0x3F) as u16,
            hour: datetime.hour() as u8,
            minute: if datetime.minute() >= 30 { 30 } else { 0 },
        }
    }

    /// Converts to a chrono value. Returns `None` when the decoded fields do
    /// not form a real calendar instant.
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, self.day as u32)?;
        if self.hour == 24 && self.minute == 0 {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight + Duration::days(1));
        }
        let time = NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, 0)?;
        Some(NaiveDateTime::new(date, time))
    }

    /// Index of the half hour within the day (`hour * 2 + minute / 30`).
    pub fn half_hour_index(&self) -> u8 {
        self.hour.saturating_mul(2).saturating_add(u8::from(self.minute >= 30))
    }
}

/// Decodes the packed until-date.
pub fn decode_until_date(byte1: u8, byte2: u8, byte3: u8) -> UntilDateTime {
    let day = byte1 & 0x1F;
    let month = ((byte2 & 0xE0) >> 4) | (byte3 >> 7);
    let year = MAX_BASE_YEAR as u16 + (byte2 & 0x3F) as u16;
    let half_hour = byte3 & 0x3F;

    UntilDateTime {
        day,
        month,
        year,
        hour: half_hour / 2,
        minute: if half_hour % 2 == 0 { 0 } else { 30 },
    }
}

/// Packs an until-date into its three wire bytes.
pub fn encode_until_date(until: &UntilDateTime) -> [u8; 3] {
    let year_offset = until.year.saturating_sub(MAX_BASE_YEAR as u16) as u8 & 0x3F;
    [
        until.day & 0x1F,
        ((until.month & 0x0E) << 4) | year_offset,
        ((until.month & 0x01) << 7) | (until.half_hour_index() & 0x3F),
    ]
}

/// Maps a protocol weekday index (0 = Saturday … 6 = Friday).
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sat),
        1 => Some(Weekday::Sun),
        2 => Some(Weekday::Mon),
        3 => Some(Weekday::Tue),
        4 => Some(Weekday::Wed),
        5 => Some(Weekday::Thu),
        6 => Some(Weekday::Fri),
        _ => None,
    }
}

/// Protocol index of a weekday (0 = Saturday … 6 = Friday).
pub fn weekday_index(day: Weekday) -> u8 {
    ((day.num_days_from_monday() + 2) % 7) as u8
}
