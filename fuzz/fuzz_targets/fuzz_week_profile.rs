#![no_main]

use libfuzzer_sys::fuzz_target;
use maxcul_rs::payload::week_profile::{decode_week_profile, encode_week_profile};

fuzz_target!(|data: &[u8]| {
    for second_half in [false, true] {
        if let Ok(part) = decode_week_profile(data, second_half) {
            let encoded = encode_week_profile(&part);
            assert_eq!(encoded.len(), data.len());
        }
    }
});
