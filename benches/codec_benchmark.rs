use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maxcul_rs::maxcul::frame::parse_frame;
use maxcul_rs::{decode_message, encode_message, DEFAULT_WEEK_PROFILE};

const THERMOSTAT_STATE_HEX: &str = "0F0A04601234560ABCDE0019202A00D5";

fn benchmark_parse_frame(c: &mut Criterion) {
    c.bench_function("parse_frame", |b| {
        b.iter(|| {
            let _ = black_box(parse_frame(black_box(THERMOSTAT_STATE_HEX)));
        })
    });
}

fn benchmark_decode_message(c: &mut Criterion) {
    c.bench_function("decode_message", |b| {
        b.iter(|| {
            let _ = black_box(decode_message(black_box(THERMOSTAT_STATE_HEX)));
        })
    });
}

fn benchmark_encode_message(c: &mut Criterion) {
    let message = match decode_message(THERMOSTAT_STATE_HEX) {
        Ok(message) => message,
        Err(e) => panic!("benchmark frame does not decode: {e}"),
    };

    c.bench_function("encode_message", |b| {
        b.iter(|| black_box(encode_message(black_box(&message))))
    });
}

fn benchmark_week_profile_parts(c: &mut Criterion) {
    c.bench_function("week_profile_parts", |b| {
        b.iter(|| black_box(DEFAULT_WEEK_PROFILE.parts()))
    });
}

criterion_group!(
    benches,
    benchmark_parse_frame,
    benchmark_decode_message,
    benchmark_encode_message,
    benchmark_week_profile_parts
);
criterion_main!(benches);
