#![no_main]

use libfuzzer_sys::fuzz_target;
use maxcul_rs::maxcul::frame::parse_frame_bytes;
use maxcul_rs::{encode_message, Codec, CodecConfig, LengthPolicy};

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = parse_frame_bytes(data) else {
        return;
    };

    // The envelope must survive a rebuild byte for byte
    assert_eq!(frame.to_bytes(), data);

    let strict = Codec::default();
    let lenient = Codec::new(CodecConfig {
        length_policy: LengthPolicy::Lenient,
        ..CodecConfig::default()
    });

    if let Ok(message) = strict.decode_frame(&frame) {
        let _ = encode_message(&message);
    }
    let _ = lenient.decode_frame(&frame);
});
