//! # Week Profiles (0x10)
//!
//! A thermostat's weekly schedule is programmed one day at a time. Each day
//! holds up to 13 control points and travels in one or two frames: the first
//! frame carries up to 7 points, the second up to 6 more.
//!
//! ```text
//! b0: bits4-5 half indicator (0 first, 1 second), bits0-3 weekday (0 = Saturday)
//! then one big-endian u16 per slot:
//!     bits0-8  time of day in 5-minute units
//!     bits9-14 temperature in half degrees
//! ```
//!
//! Unused slots hold the padding value `0x4520`. A slot decoding to 00:00
//! ends the scan. Both conventions make a genuine "17.0 °C until 24:00"
//! point and a midnight point unrepresentable, so the constructors reject
//! them. Neither convention has been confirmed against device captures.

use chrono::Weekday;
use log::{debug, warn};
use nom::multi::count;
use nom::number::complete::be_u16;
use nom::IResult;
use once_cell::sync::Lazy;
use serde::Serialize;

use super::datetime::{weekday_from_index, weekday_index};
use super::PayloadCodec;
use crate::constants::{
    MAX_WEEK_PROFILE_FIRST_HALF_POINTS, MAX_WEEK_PROFILE_PADDING, MAX_WEEK_PROFILE_POINTS_PER_DAY,
    MAX_WEEK_PROFILE_SECOND_HALF_POINTS, MAX_WEEK_PROFILE_TEMP_MASK, MAX_WEEK_PROFILE_TIME_MASK,
};
use crate::error::MaxError;
use crate::message::MessageType;
use crate::payload::temperature::clamp_set_point;
use crate::util::bits::{five_minute_units_to_time, time_to_five_minute_units};

/// Payload length of a first-half frame
const FIRST_HALF_LEN: usize = 1 + 2 * MAX_WEEK_PROFILE_FIRST_HALF_POINTS;

/// Payload length of a second-half frame
const SECOND_HALF_LEN: usize = 1 + 2 * MAX_WEEK_PROFILE_SECOND_HALF_POINTS;

/// Schedule every thermostat starts with until it is programmed.
pub static DEFAULT_WEEK_PROFILE: Lazy<WeekProfile> = Lazy::new(default_week_profile);

/// One step of a daily schedule: the temperature held until `hour:minute`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlPoint {
    pub hour: u8,
    pub minute: u8,
    /// Temperature in °C
    pub temperature: f64,
}

impl ControlPoint {
    /// Creates a control point. The time must be a multiple of five minutes
    /// after 00:00 and no later than 24:00; the temperature is clamped to the
    /// set-point range and rounded to half degrees. A point that would
    /// collide with the slot padding (17.0 °C until 24:00) is rejected.
    pub fn new(hour: u8, minute: u8, temperature: f64) -> Result<Self, MaxError> {
        let point = ControlPoint {
            hour,
            minute,
            temperature: (clamp_set_point(temperature) * 2.0).round() / 2.0,
        };
        point.validate()?;
        Ok(point)
    }

    /// Checks that the point survives a trip through a week-profile frame.
    pub fn validate(&self) -> Result<(), MaxError> {
        let (hour, minute) = (self.hour, self.minute);
        if hour > 24 || minute >= 60 || minute % 5 != 0 || (hour == 24 && minute != 0) {
            return Err(MaxError::InvalidWeekProfile(format!(
                "invalid control point time {:02}:{:02}",
                hour, minute
            )));
        }
        if hour == 0 && minute == 0 {
            return Err(MaxError::InvalidWeekProfile(
                "a control point at 00:00 ends the schedule on the wire".to_string(),
            ));
        }
        if self.to_slot() == MAX_WEEK_PROFILE_PADDING {
            return Err(MaxError::InvalidWeekProfile(format!(
                "{:.1} °C until 24:00 is indistinguishable from padding",
                self.temperature
            )));
        }
        Ok(())
    }

    /// Minutes since midnight.
    pub fn minutes_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    fn from_slot(slot: u16) -> Self {
        let (hour, minute) = five_minute_units_to_time(slot & MAX_WEEK_PROFILE_TIME_MASK);
        ControlPoint {
            hour,
            minute,
            temperature: ((slot >> 9) & MAX_WEEK_PROFILE_TEMP_MASK) as f64 / 2.0,
        }
    }

    fn to_slot(self) -> u16 {
        let temperature = ((self.temperature * 2.0).round().max(0.0) as u16) & MAX_WEEK_PROFILE_TEMP_MASK;
        let time = time_to_five_minute_units(self.hour, self.minute) & MAX_WEEK_PROFILE_TIME_MASK;
        (temperature << 9) | time
    }
}

fn check_points(points: &[ControlPoint]) -> Result<(), MaxError> {
    for point in points {
        point.validate()?;
    }
    if points
        .windows(2)
        .any(|pair| pair[0].minutes_of_day() > pair[1].minutes_of_day())
    {
        return Err(MaxError::InvalidWeekProfile(
            "control points are not in time order".to_string(),
        ));
    }
    Ok(())
}

/// The control points of one week-profile frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekProfilePart {
    day: Weekday,
    second_half: bool,
    control_points: Vec<ControlPoint>,
}

impl WeekProfilePart {
    /// Creates a part, checking the point count for the half, every point
    /// and the time order.
    pub fn new(
        day: Weekday,
        second_half: bool,
        control_points: Vec<ControlPoint>,
    ) -> Result<Self, MaxError> {
        let capacity = Self::capacity(second_half);
        if control_points.len() > capacity {
            return Err(MaxError::InvalidWeekProfile(format!(
                "{} control points do not fit into a frame of {}",
                control_points.len(),
                capacity
            )));
        }
        check_points(&control_points)?;
        Ok(WeekProfilePart {
            day,
            second_half,
            control_points,
        })
    }

    /// Control points a frame of the given half can carry.
    pub fn capacity(second_half: bool) -> usize {
        if second_half {
            MAX_WEEK_PROFILE_SECOND_HALF_POINTS
        } else {
            MAX_WEEK_PROFILE_FIRST_HALF_POINTS
        }
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn is_second_half(&self) -> bool {
        self.second_half
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }
}

impl PayloadCodec for WeekProfilePart {
    const MESSAGE_TYPE: MessageType = MessageType::ConfigureWeekProfile;
    const LENGTHS: &'static [usize] = &[SECOND_HALF_LEN, FIRST_HALF_LEN];

    fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        match payload.len() {
            FIRST_HALF_LEN => decode_week_profile(payload, false),
            SECOND_HALF_LEN => decode_week_profile(payload, true),
            length => Err(super::unsupported_length::<Self>(length)),
        }
    }

    fn encode(&self) -> Vec<u8> {
        encode_week_profile(self)
    }
}

/// Decodes one week-profile frame. `second_half` states which frame the
/// caller expects; the payload's own indicator must agree.
pub fn decode_week_profile(payload: &[u8], second_half: bool) -> Result<WeekProfilePart, MaxError> {
    let expected_len = if second_half { SECOND_HALF_LEN } else { FIRST_HALF_LEN };
    if payload.len() != expected_len {
        return Err(super::unsupported_length::<WeekProfilePart>(payload.len()));
    }

    let half = (payload[0] >> 4) & 0x03;
    if half > 1 {
        return Err(MaxError::ValueOutOfRange {
            field: "week_profile_half",
            value: half,
        });
    }
    if (half == 1) != second_half {
        warn!(
            "Week profile half indicator {} does not match the expected {} half",
            half,
            if second_half { "second" } else { "first" }
        );
        return Err(MaxError::WeekProfileHalfMismatch {
            expected_second_half: second_half,
        });
    }

    let day_index = payload[0] & 0x0F;
    let day = weekday_from_index(day_index).ok_or(MaxError::ValueOutOfRange {
        field: "week_profile_day",
        value: day_index,
    })?;

    let parsed: IResult<&[u8], Vec<u16>> =
        count(be_u16, WeekProfilePart::capacity(second_half))(&payload[1..]);
    let (_, slots) = parsed?;

    let mut control_points = Vec::with_capacity(slots.len());
    for slot in slots {
        if slot == MAX_WEEK_PROFILE_PADDING {
            continue;
        }
        let point = ControlPoint::from_slot(slot);
        if point.hour == 0 && point.minute == 0 {
            debug!("Week profile scan for {:?} stopped at 00:00", day);
            break;
        }
        control_points.push(point);
    }

    Ok(WeekProfilePart {
        day,
        second_half,
        control_points,
    })
}

/// Encodes one week-profile frame, padding unused slots with `0x4520`.
pub fn encode_week_profile(part: &WeekProfilePart) -> Vec<u8> {
    let capacity = WeekProfilePart::capacity(part.second_half);
    let mut payload = Vec::with_capacity(1 + 2 * capacity);
    payload.push(weekday_index(part.day) | if part.second_half { 0x10 } else { 0x00 });

    let slots = part
        .control_points
        .iter()
        .map(|point| point.to_slot())
        .chain(std::iter::repeat(MAX_WEEK_PROFILE_PADDING))
        .take(capacity);
    for slot in slots {
        payload.extend_from_slice(&slot.to_be_bytes());
    }

    payload
}

/// The full schedule of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule {
    day: Weekday,
    control_points: Vec<ControlPoint>,
}

impl DaySchedule {
    /// Creates a day schedule of at most 13 valid, time-ordered control points.
    pub fn new(day: Weekday, control_points: Vec<ControlPoint>) -> Result<Self, MaxError> {
        if control_points.len() > MAX_WEEK_PROFILE_POINTS_PER_DAY {
            return Err(MaxError::InvalidWeekProfile(format!(
                "{} control points exceed the limit of {} per day",
                control_points.len(),
                MAX_WEEK_PROFILE_POINTS_PER_DAY
            )));
        }
        check_points(&control_points)?;
        Ok(DaySchedule {
            day,
            control_points,
        })
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    /// Splits the day into the frames needed to program it.
    pub fn split(&self) -> Vec<WeekProfilePart> {
        let (first, rest) = self
            .control_points
            .split_at(self.control_points.len().min(MAX_WEEK_PROFILE_FIRST_HALF_POINTS));

        let mut parts = vec![WeekProfilePart {
            day: self.day,
            second_half: false,
            control_points: first.to_vec(),
        }];
        if !rest.is_empty() {
            parts.push(WeekProfilePart {
                day: self.day,
                second_half: true,
                control_points: rest.to_vec(),
            });
        }
        parts
    }

    /// Reassembles a day from its first frame and optional second frame.
    pub fn merge(parts: &[WeekProfilePart]) -> Result<Self, MaxError> {
        let (first, second) = match parts {
            [first] => (first, None),
            [first, second] => (first, Some(second)),
            _ => {
                return Err(MaxError::InvalidWeekProfile(format!(
                    "a day is made of one or two parts, got {}",
                    parts.len()
                )))
            }
        };

        if first.second_half {
            return Err(MaxError::WeekProfileHalfMismatch {
                expected_second_half: false,
            });
        }

        let mut control_points = first.control_points.clone();
        if let Some(second) = second {
            if !second.second_half {
                return Err(MaxError::WeekProfileHalfMismatch {
                    expected_second_half: true,
                });
            }
            if second.day != first.day {
                return Err(MaxError::InvalidWeekProfile(format!(
                    "parts for {:?} and {:?} cannot be merged",
                    first.day, second.day
                )));
            }
            control_points.extend_from_slice(&second.control_points);
        }

        DaySchedule::new(first.day, control_points)
    }
}

/// Schedules for all seven days, Saturday first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekProfile {
    days: Vec<DaySchedule>,
}

impl WeekProfile {
    /// Creates a week profile from exactly one schedule per weekday.
    pub fn new(mut days: Vec<DaySchedule>) -> Result<Self, MaxError> {
        days.sort_by_key(|schedule| weekday_index(schedule.day));
        let complete = days.len() == 7
            && days
                .iter()
                .enumerate()
                .all(|(i, schedule)| weekday_index(schedule.day) as usize == i);
        if !complete {
            return Err(MaxError::InvalidWeekProfile(
                "a week profile needs exactly one schedule per weekday".to_string(),
            ));
        }
        Ok(WeekProfile { days })
    }

    pub fn day(&self, day: Weekday) -> &DaySchedule {
        &self.days[weekday_index(day) as usize]
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    /// All frames needed to program the week, Saturday first.
    pub fn parts(&self) -> Vec<WeekProfilePart> {
        self.days.iter().flat_map(DaySchedule::split).collect()
    }
}

fn preset_day(day: Weekday, points: &[(u8, u8, f64)]) -> DaySchedule {
    DaySchedule {
        day,
        control_points: points
            .iter()
            .map(|&(hour, minute, temperature)| ControlPoint {
                hour,
                minute,
                temperature,
            })
            .collect(),
    }
}

/// Builds the factory schedule: two steps on weekends, four on weekdays.
pub fn default_week_profile() -> WeekProfile {
    const WEEKEND: &[(u8, u8, f64)] = &[(7, 0, 17.0), (23, 0, 21.0)];
    const WEEKDAY: &[(u8, u8, f64)] = &[(6, 0, 17.0), (9, 0, 21.0), (17, 0, 17.0), (23, 0, 21.0)];

    let days = [
        Weekday::Sat,
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
    .into_iter()
    .map(|day| match day {
        Weekday::Sat | Weekday::Sun => preset_day(day, WEEKEND),
        _ => preset_day(day, WEEKDAY),
    })
    .collect();

    WeekProfile { days }
}
