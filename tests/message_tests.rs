//! Message-level tests: every variant through the registry and back.

use chrono::{NaiveDate, Weekday};
use maxcul_rs::payload::AckThermostatState;
use maxcul_rs::{
    decode_message, encode_message, Acknowledgement, AddLinkPartner, Address, BoostDuration,
    ButtonMode, ConfigureTemperatures, ControlMode, ControlPoint, DeviceFlags, DeviceType,
    MaxError, Message, MessageHeader, MessagePayload, MessageType, PairPing, PairPong,
    PushButtonNotification, RemoveGroupId, RemoveLinkPartner, ReportExtension, Reset,
    SetComfortTemperature, SetDstAdjust, SetEcoTemperature, SetGroupId, SetTemperature,
    ShutterContactStateReport, ThermostatStateReport, TimeInformation, UntilDateTime,
    ValveConfiguration, Wakeup, WeekProfilePart,
};

fn header() -> MessageHeader {
    MessageHeader::new(
        0x2C,
        Address::from_bytes([0x12, 0x34, 0x56]),
        Address::from_bytes([0x0A, 0xBC, 0xDE]),
    )
}

fn until() -> UntilDateTime {
    UntilDateTime {
        day: 24,
        month: 12,
        year: 2024,
        hour: 18,
        minute: 30,
    }
}

fn point(hour: u8, minute: u8, temperature: f64) -> ControlPoint {
    ControlPoint::new(hour, minute, temperature).unwrap()
}

/// One representative payload per message kind and payload length.
fn representative_payloads() -> Vec<(MessagePayload, usize)> {
    let ack_state = AckThermostatState {
        valve_position: 0x40,
        desired_temperature: 21.0,
        display_measured: true,
        until: None,
    };

    vec![
        (
            MessagePayload::Acknowledgement(Acknowledgement::ok(
                ControlMode::Auto,
                DeviceFlags::DST_ACTIVE | DeviceFlags::LAN_GATEWAY,
            )),
            2,
        ),
        (
            MessagePayload::Acknowledgement(Acknowledgement {
                nack: false,
                mode: ControlMode::Manual,
                flags: DeviceFlags::DST_ACTIVE,
                thermostat: Some(ack_state.clone()),
            }),
            4,
        ),
        (
            MessagePayload::Acknowledgement(Acknowledgement {
                nack: true,
                mode: ControlMode::Temporary,
                flags: DeviceFlags::BATTERY_LOW,
                thermostat: Some(AckThermostatState {
                    until: Some(until()),
                    ..ack_state
                }),
            }),
            7,
        ),
        (
            MessagePayload::ThermostatStateReport(ThermostatStateReport {
                mode: ControlMode::Auto,
                flags: DeviceFlags::LOCKED,
                valve_position: 0,
                desired_temperature: 17.0,
                extension: ReportExtension::Basic,
            }),
            3,
        ),
        (
            MessagePayload::ThermostatStateReport(ThermostatStateReport {
                mode: ControlMode::Manual,
                flags: DeviceFlags::DST_ACTIVE,
                valve_position: 0xFF,
                desired_temperature: 30.5,
                extension: ReportExtension::MeasuredTemperature(Some(20.7)),
            }),
            5,
        ),
        (
            MessagePayload::ThermostatStateReport(ThermostatStateReport {
                mode: ControlMode::Temporary,
                flags: DeviceFlags::empty(),
                valve_position: 12,
                desired_temperature: 4.5,
                extension: ReportExtension::Until(until()),
            }),
            6,
        ),
        (
            MessagePayload::SetTemperature(SetTemperature::new(ControlMode::Boost, 25.5)),
            1,
        ),
        (
            MessagePayload::SetTemperature(SetTemperature::temporary(19.0, until())),
            4,
        ),
        (
            MessagePayload::ConfigureValve(ValveConfiguration {
                boost_duration: BoostDuration::Minutes60,
                boost_valve_position: 95,
                decalcification_day: Weekday::Wed,
                decalcification_hour: 23,
                max_valve_setting: 100,
                valve_offset: 0,
            }),
            4,
        ),
        (
            MessagePayload::ConfigureTemperatures(ConfigureTemperatures {
                measurement_offset: 2.5,
                ..ConfigureTemperatures::default()
            }),
            7,
        ),
        (
            MessagePayload::ConfigureWeekProfile(
                WeekProfilePart::new(
                    Weekday::Mon,
                    false,
                    vec![point(6, 0, 17.0), point(9, 0, 21.0), point(17, 30, 17.0)],
                )
                .unwrap(),
            ),
            15,
        ),
        (
            MessagePayload::ConfigureWeekProfile(
                WeekProfilePart::new(Weekday::Sun, true, vec![point(22, 0, 18.5)]).unwrap(),
            ),
            13,
        ),
        (
            MessagePayload::ShutterContactStateReport(ShutterContactStateReport {
                open: true,
                flags: DeviceFlags::BATTERY_LOW,
            }),
            1,
        ),
        (
            MessagePayload::PushButtonNotification(PushButtonNotification::new(
                ButtonMode::Auto,
                DeviceFlags::RF_ERROR,
            )),
            2,
        ),
        (
            MessagePayload::PairPing(PairPing {
                firmware_version: 0x18,
                device_type: DeviceType::HeatingThermostat,
                test_result: 0xFF,
                serial_number: "KEQ0523864".to_string(),
            }),
            13,
        ),
        (MessagePayload::PairPong(PairPong), 1),
        (MessagePayload::Wakeup(Wakeup), 1),
        (MessagePayload::Reset(Reset), 0),
        (MessagePayload::SetGroupId(SetGroupId { group_id: 5 }), 1),
        (MessagePayload::RemoveGroupId(RemoveGroupId), 1),
        (
            MessagePayload::AddLinkPartner(AddLinkPartner {
                partner: Address::from_bytes([0x0F, 0xDA, 0xED]),
                device_type: DeviceType::ShutterContact,
            }),
            4,
        ),
        (
            MessagePayload::RemoveLinkPartner(RemoveLinkPartner {
                partner: Address::from_bytes([0x0F, 0xDA, 0xED]),
                device_type: DeviceType::WallThermostat,
            }),
            4,
        ),
        (MessagePayload::SetDstAdjust(SetDstAdjust { enabled: true }), 1),
        (MessagePayload::SetComfortTemperature(SetComfortTemperature), 0),
        (MessagePayload::SetEcoTemperature(SetEcoTemperature), 0),
        (MessagePayload::TimeInformation(TimeInformation::request()), 0),
        (
            MessagePayload::TimeInformation(TimeInformation::new(
                NaiveDate::from_ymd_opt(2024, 11, 9)
                    .unwrap()
                    .and_hms_opt(14, 25, 37)
                    .unwrap(),
            )),
            5,
        ),
    ]
}

/// Tests that every message kind and payload length survives encode then decode.
#[test]
fn test_roundtrip_every_variant() {
    for (payload, expected_len) in representative_payloads() {
        let message = Message::new(header(), payload);
        let hex = encode_message(&message);
        assert_eq!(
            hex.len(),
            2 * (11 + expected_len),
            "unexpected length for {:?}",
            message.message_type()
        );
        let decoded = decode_message(&hex).unwrap();
        assert_eq!(decoded, message);
    }
}

/// Tests that every registered type code appears among the round-trip cases.
#[test]
fn test_every_type_is_covered() {
    let covered: Vec<MessageType> = representative_payloads()
        .iter()
        .map(|(payload, _)| payload.message_type())
        .collect();
    for message_type in MessageType::ALL {
        assert!(covered.contains(&message_type), "{:?} not covered", message_type);
    }
}

/// Tests the short acknowledgement scenario.
#[test]
fn test_ack_scenario() {
    let message = decode_message("0C0100021234560ABCDE000100").unwrap();
    match message.payload {
        MessagePayload::Acknowledgement(ack) => {
            assert!(!ack.nack);
            assert_eq!(ack.mode, ControlMode::Manual);
            assert!(!ack.flags.dst_active());
            assert!(!ack.flags.lan_gateway());
            assert!(!ack.flags.locked());
            assert!(!ack.flags.rf_error());
            assert!(!ack.flags.battery_low());
            assert_eq!(ack.thermostat, None);
        }
        other => panic!("expected an acknowledgement, got {:?}", other),
    }
}

/// Tests the negative acknowledgement scenario.
#[test]
fn test_nack_scenario() {
    let message = decode_message("0C0100021234560ABCDE008100").unwrap();
    match message.payload {
        MessagePayload::Acknowledgement(ack) => {
            assert!(ack.nack);
            assert_eq!(ack.mode, ControlMode::Manual);
        }
        other => panic!("expected an acknowledgement, got {:?}", other),
    }
}

/// Tests that 21.0 °C in manual mode encodes as 0x6A (42 | 1 << 6).
#[test]
fn test_set_temperature_scenario() {
    let message = Message::new(
        header(),
        MessagePayload::SetTemperature(SetTemperature::new(ControlMode::Manual, 21.0)),
    );
    let hex = encode_message(&message);
    assert!(hex.ends_with("6A"));
}

/// Tests that set-points outside [4.5, 30.5] encode like the nearest bound.
#[test]
fn test_clamp_law() {
    let encode = |temperature: f64| {
        encode_message(&Message::new(
            header(),
            MessagePayload::SetTemperature(SetTemperature::new(ControlMode::Auto, temperature)),
        ))
    };
    assert_eq!(encode(40.0), encode(30.5));
    assert_eq!(encode(-5.0), encode(4.5));
}

/// Tests the ConfigureValve scenario.
#[test]
fn test_configure_valve_scenario() {
    let message = decode_message("0E0100121234560ABCDE002005FF00").unwrap();
    match message.payload {
        MessagePayload::ConfigureValve(config) => {
            assert_eq!(config.max_valve_setting, 100);
            assert_eq!(config.valve_offset, 0);
            assert_eq!(config.boost_duration.minutes(), 5);
        }
        other => panic!("expected a valve configuration, got {:?}", other),
    }
}

/// Tests that unknown type codes are reported as such.
#[test]
fn test_unsupported_message_type() {
    assert_eq!(
        decode_message("0B0100771234560ABCDE0000"),
        Err(MaxError::UnsupportedMessageType(0x77))
    );
}

/// Tests that unknown payload lengths fail instead of defaulting fields.
#[test]
fn test_unsupported_payload_length() {
    // thermostat state with 4 payload bytes
    assert_eq!(
        decode_message("0E0100601234560ABCDE00190021D5"),
        Err(MaxError::UnsupportedPayloadLength {
            message_type: MessageType::ThermostatStateReport,
            length: 4
        })
    );
}

/// Tests the capability accessors on decoded messages.
#[test]
fn test_capability_accessors() {
    let message = decode_message("100100601234560ABCDE001A042A18D825").unwrap();
    assert_eq!(message.message_type(), MessageType::ThermostatStateReport);
    assert_eq!(message.until(), Some(until()));
    assert!(!message.battery_low());

    let button = decode_message("0C0100501234560ABCDE008001").unwrap();
    assert!(button.battery_low());
    assert!(!button.rf_error());
    assert_eq!(button.until(), None);
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use maxcul_rs::payload::datetime::weekday_from_index;
    use maxcul_rs::payload::{decode_until_date, encode_until_date};
    use proptest::prelude::*;

    fn mode() -> impl Strategy<Value = ControlMode> {
        (0u8..4).prop_map(ControlMode::from_bits)
    }

    /// Until-dates whose month bit 1 agrees with bit 5 of the year offset,
    /// the one bit both fields share on the wire.
    fn until_date() -> impl Strategy<Value = UntilDateTime> {
        (1u8..=31, 1u8..=12, 0u16..32, 0u8..=23, any::<bool>()).prop_map(
            |(day, month, year_offset, hour, half)| {
                let year_offset = if month & 0x02 != 0 {
                    year_offset | 0x20
                } else {
                    year_offset
                };
                UntilDateTime {
                    day,
                    month,
                    year: 2000 + year_offset,
                    hour,
                    minute: if half { 30 } else { 0 },
                }
            },
        )
    }

    fn valve_configuration() -> impl Strategy<Value = ValveConfiguration> {
        (0u8..8, 0u8..=20, 0u8..7, 0u8..=23, 0u8..=100, 0u8..=100).prop_map(
            |(boost, boost_steps, day, hour, max_valve, offset)| ValveConfiguration {
                boost_duration: BoostDuration::from_index(boost),
                boost_valve_position: boost_steps * 5,
                decalcification_day: weekday_from_index(day).unwrap(),
                decalcification_hour: hour,
                max_valve_setting: max_valve,
                valve_offset: offset,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_set_temperature_roundtrip(mode in mode(), half_degrees in 9u8..=61) {
            let temperature = half_degrees as f64 / 2.0;
            let message = Message::new(
                header(),
                MessagePayload::SetTemperature(SetTemperature::new(mode, temperature)),
            );
            prop_assert_eq!(decode_message(&encode_message(&message)).unwrap(), message);
        }

        #[test]
        fn prop_clamp_law(excess in 0.01f64..1000.0) {
            let encode = |temperature: f64| {
                encode_message(&Message::new(
                    header(),
                    MessagePayload::SetTemperature(SetTemperature::new(ControlMode::Manual, temperature)),
                ))
            };
            prop_assert_eq!(encode(30.5 + excess), encode(30.5));
            prop_assert_eq!(encode(4.5 - excess), encode(4.5));
        }

        #[test]
        fn prop_thermostat_state_roundtrip(
            mode in mode(),
            flags in any::<u8>(),
            valve_position in any::<u8>(),
            desired in 0u8..=0x7F,
            measured in 45u16..=511,
        ) {
            let report = ThermostatStateReport {
                mode,
                flags: DeviceFlags::from_status(flags),
                valve_position,
                desired_temperature: desired as f64 / 2.0,
                extension: ReportExtension::MeasuredTemperature(if mode == ControlMode::Temporary {
                    None
                } else {
                    Some(measured as f64 / 10.0)
                }),
            };
            let message = Message::new(header(), MessagePayload::ThermostatStateReport(report));
            prop_assert_eq!(decode_message(&encode_message(&message)).unwrap(), message);
        }

        #[test]
        fn prop_until_date_roundtrip(until in until_date()) {
            let [byte1, byte2, byte3] = encode_until_date(&until);
            prop_assert_eq!(decode_until_date(byte1, byte2, byte3), until);

            let message = Message::new(
                header(),
                MessagePayload::SetTemperature(SetTemperature::temporary(20.0, until)),
            );
            prop_assert_eq!(decode_message(&encode_message(&message)).unwrap(), message);
        }

        #[test]
        fn prop_valve_configuration_roundtrip(config in valve_configuration()) {
            let message = Message::new(header(), MessagePayload::ConfigureValve(config));
            prop_assert_eq!(decode_message(&encode_message(&message)).unwrap(), message);
        }

        #[test]
        fn prop_decode_never_panics(type_code in any::<u8>(), payload in proptest::collection::vec(any::<u8>(), 0..=16)) {
            let hex = maxcul_rs::build_frame(&header(), type_code, &payload);
            let _ = decode_message(&hex);
        }
    }
}
