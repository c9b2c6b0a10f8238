use chrono::Weekday;
use maxcul_rs::payload::week_profile::{decode_week_profile, encode_week_profile};
use maxcul_rs::{
    decode_message, encode_message, Address, ControlPoint, DaySchedule, MaxError, Message,
    MessageHeader, MessagePayload, WeekProfile, WeekProfilePart, DEFAULT_WEEK_PROFILE,
};

fn point(hour: u8, minute: u8, temperature: f64) -> ControlPoint {
    ControlPoint::new(hour, minute, temperature).unwrap()
}

fn header() -> MessageHeader {
    MessageHeader::new(
        0x01,
        Address::from_bytes([0x12, 0x34, 0x56]),
        Address::from_bytes([0x0A, 0xBC, 0xDE]),
    )
}

fn slots(payload: &[u8]) -> Vec<u16> {
    payload[1..]
        .chunks(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect()
}

/// Tests that unused slots of both halves hold exactly 0x4520.
#[test]
fn test_padding_value() {
    let first = WeekProfilePart::new(Weekday::Tue, false, vec![point(8, 0, 20.0)]).unwrap();
    let first_slots = slots(&encode_week_profile(&first));
    assert_eq!(first_slots.len(), 7);
    assert!(first_slots[1..].iter().all(|&slot| slot == 0x4520));

    let second = WeekProfilePart::new(Weekday::Tue, true, Vec::new()).unwrap();
    let second_slots = slots(&encode_week_profile(&second));
    assert_eq!(second_slots, vec![0x4520; 6]);
}

/// Tests that points the frame cannot carry are refused at construction
/// instead of disappearing on the wire.
#[test]
fn test_unencodable_points_rejected() {
    assert!(matches!(
        ControlPoint::new(0, 0, 18.0),
        Err(MaxError::InvalidWeekProfile(_))
    ));
    assert!(matches!(
        ControlPoint::new(24, 0, 17.0),
        Err(MaxError::InvalidWeekProfile(_))
    ));

    let starts_at_midnight = vec![
        ControlPoint {
            hour: 0,
            minute: 0,
            temperature: 18.0,
        },
        point(6, 0, 21.0),
        point(22, 0, 17.0),
    ];
    assert!(WeekProfilePart::new(Weekday::Mon, false, starts_at_midnight).is_err());

    let ends_on_padding = vec![
        point(6, 0, 21.0),
        ControlPoint {
            hour: 24,
            minute: 0,
            temperature: 17.0,
        },
    ];
    assert!(DaySchedule::new(Weekday::Mon, ends_on_padding).is_err());

    // the nearest representable neighbours survive a full message round trip
    let part = WeekProfilePart::new(
        Weekday::Mon,
        false,
        vec![point(0, 5, 18.0), point(6, 0, 21.0), point(24, 0, 17.5)],
    )
    .unwrap();
    let message = Message::new(header(), MessagePayload::ConfigureWeekProfile(part));
    assert_eq!(decode_message(&encode_message(&message)).unwrap(), message);
}

/// Tests a hand-packed first-half payload.
#[test]
fn test_decode_hand_packed_payload() {
    // Monday: 17.0 until 06:00, 21.0 until 09:00, then padding
    let mut payload = vec![0x02, 0x44, 0x48, 0x54, 0x6C];
    for _ in 0..5 {
        payload.extend_from_slice(&[0x45, 0x20]);
    }
    let part = decode_week_profile(&payload, false).unwrap();
    assert_eq!(part.day(), Weekday::Mon);
    assert!(!part.is_second_half());
    assert_eq!(part.control_points(), &[point(6, 0, 17.0), point(9, 0, 21.0)]);
    assert_eq!(encode_week_profile(&part), payload);
}

/// Tests that the half indicator must agree with the caller.
#[test]
fn test_half_indicator_must_match() {
    let second = WeekProfilePart::new(Weekday::Fri, true, vec![point(21, 0, 18.0)]).unwrap();
    let payload = encode_week_profile(&second);
    assert_eq!(
        decode_week_profile(&payload, true).unwrap().control_points().len(),
        1
    );

    // a second-half indicator on a first-half sized payload
    let mut forged = encode_week_profile(&WeekProfilePart::new(Weekday::Fri, false, Vec::new()).unwrap());
    forged[0] |= 0x10;
    assert_eq!(
        decode_week_profile(&forged, false),
        Err(MaxError::WeekProfileHalfMismatch {
            expected_second_half: false
        })
    );
}

/// Tests that an invalid weekday index is rejected.
#[test]
fn test_invalid_weekday() {
    let mut payload = encode_week_profile(&WeekProfilePart::new(Weekday::Sat, false, Vec::new()).unwrap());
    payload[0] = 0x07;
    assert!(matches!(
        decode_week_profile(&payload, false),
        Err(MaxError::ValueOutOfRange {
            field: "week_profile_day",
            value: 7
        })
    ));
}

/// Tests that a 00:00 slot ends the scan, dropping a genuine midnight point
/// and anything after it.
#[test]
fn test_midnight_terminates_scan() {
    let mut payload = vec![0x03];
    payload.extend_from_slice(&((40u16 << 9) | 96).to_be_bytes()); // 20.0 until 08:00
    payload.extend_from_slice(&(36u16 << 9).to_be_bytes()); // 18.0 until 00:00
    payload.extend_from_slice(&((42u16 << 9) | 264).to_be_bytes()); // 21.0 until 22:00
    for _ in 0..4 {
        payload.extend_from_slice(&0x4520u16.to_be_bytes());
    }

    let part = decode_week_profile(&payload, false).unwrap();
    assert_eq!(part.day(), Weekday::Tue);
    assert_eq!(part.control_points(), &[point(8, 0, 20.0)]);
}

/// Tests that a thirteen-point day splits 7 + 6 and merges back.
#[test]
fn test_full_day_through_frames() {
    let points: Vec<_> = (0..13).map(|i| point(8 + i, 15, 16.0 + i as f64)).collect();
    let schedule = DaySchedule::new(Weekday::Sat, points).unwrap();

    let decoded: Vec<WeekProfilePart> = schedule
        .split()
        .into_iter()
        .map(|part| {
            let hex = encode_message(&Message::new(header(), MessagePayload::ConfigureWeekProfile(part)));
            match decode_message(&hex).unwrap().payload {
                MessagePayload::ConfigureWeekProfile(part) => part,
                other => panic!("expected a week profile, got {:?}", other),
            }
        })
        .collect();

    assert_eq!(decoded.len(), 2);
    assert_eq!(DaySchedule::merge(&decoded).unwrap(), schedule);
}

/// Tests the point limits of days and parts.
#[test]
fn test_point_limits() {
    let fourteen: Vec<_> = (0..14).map(|i| point(5 + i, 0, 20.0)).collect();
    assert!(matches!(
        DaySchedule::new(Weekday::Mon, fourteen),
        Err(MaxError::InvalidWeekProfile(_))
    ));

    let seven: Vec<_> = (0..7).map(|i| point(5 + i, 0, 20.0)).collect();
    assert!(WeekProfilePart::new(Weekday::Mon, true, seven).is_err());
}

/// Tests that merging refuses parts of different days or a second half first.
#[test]
fn test_merge_rejects_mismatched_parts() {
    let monday = WeekProfilePart::new(Weekday::Mon, false, vec![point(6, 0, 17.0)]).unwrap();
    let tuesday = WeekProfilePart::new(Weekday::Tue, true, vec![point(22, 0, 17.0)]).unwrap();
    assert!(DaySchedule::merge(&[monday.clone(), tuesday.clone()]).is_err());
    assert!(DaySchedule::merge(&[tuesday]).is_err());
    assert!(DaySchedule::merge(&[]).is_err());
    assert!(DaySchedule::merge(&[monday]).is_ok());
}

/// Tests the shape of the default week profile.
#[test]
fn test_default_profile_shape() {
    let profile: &WeekProfile = &DEFAULT_WEEK_PROFILE;
    for schedule in profile.days() {
        let expected = match schedule.day() {
            Weekday::Sat | Weekday::Sun => 2,
            _ => 4,
        };
        assert_eq!(schedule.control_points().len(), expected, "{:?}", schedule.day());
    }

    // every day fits into one frame
    let parts = profile.parts();
    assert_eq!(parts.len(), 7);
    assert!(parts.iter().all(|part| !part.is_second_half()));
    assert_eq!(parts[0].day(), Weekday::Sat);
}

/// Tests that a week profile needs every weekday exactly once.
#[test]
fn test_week_profile_needs_seven_days() {
    let days: Vec<_> = DEFAULT_WEEK_PROFILE.days()[..6].to_vec();
    assert!(WeekProfile::new(days).is_err());

    let mut shuffled: Vec<_> = DEFAULT_WEEK_PROFILE.days().to_vec();
    shuffled.reverse();
    let profile = WeekProfile::new(shuffled).unwrap();
    assert_eq!(&profile, &*DEFAULT_WEEK_PROFILE);
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use maxcul_rs::payload::datetime::weekday_from_index;
    use proptest::prelude::*;

    /// Valid control points at distinct times, in time order.
    fn control_points(max: usize) -> impl Strategy<Value = Vec<ControlPoint>> {
        (
            proptest::collection::btree_set(1u16..=288, 0..=max),
            proptest::collection::vec(9u8..=61, max),
        )
            .prop_map(|(times, temperatures)| {
                times
                    .into_iter()
                    .zip(temperatures)
                    .filter_map(|(units, half_degrees)| {
                        ControlPoint::new(
                            (units / 12) as u8,
                            (units % 12 * 5) as u8,
                            half_degrees as f64 / 2.0,
                        )
                        .ok()
                    })
                    .collect()
            })
    }

    fn part() -> impl Strategy<Value = WeekProfilePart> {
        (0u8..7, any::<bool>()).prop_flat_map(|(day, second_half)| {
            control_points(WeekProfilePart::capacity(second_half)).prop_map(move |points| {
                let day = weekday_from_index(day).unwrap();
                WeekProfilePart::new(day, second_half, points).unwrap()
            })
        })
    }

    proptest! {
        #[test]
        fn prop_week_profile_part_roundtrip(part in part()) {
            let payload = encode_week_profile(&part);
            prop_assert_eq!(&decode_week_profile(&payload, part.is_second_half()).unwrap(), &part);

            let message = Message::new(header(), MessagePayload::ConfigureWeekProfile(part));
            prop_assert_eq!(decode_message(&encode_message(&message)).unwrap(), message);
        }

        #[test]
        fn prop_day_schedule_split_merge(day in 0u8..7, points in control_points(13)) {
            let schedule = DaySchedule::new(weekday_from_index(day).unwrap(), points).unwrap();
            let decoded: Vec<WeekProfilePart> = schedule
                .split()
                .iter()
                .map(|part| decode_week_profile(&encode_week_profile(part), part.is_second_half()).unwrap())
                .collect();
            prop_assert_eq!(DaySchedule::merge(&decoded).unwrap(), schedule);
        }
    }
}
