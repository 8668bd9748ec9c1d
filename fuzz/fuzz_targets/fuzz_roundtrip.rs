#![no_main]

use ecmajson::{decode, DecodeOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    // Non-strict decode accepts a strict superset of strict JSON, so this
    // should never panic regardless of what the fuzzer throws at it.
    if let Ok(value) = decode(text, &DecodeOptions::non_strict()) {
        // A value that decoded successfully must always be re-encodable
        // in non-strict mode, and the re-encoded text must decode again.
        let encoded =
            ecmajson::encode(&value, &ecmajson::EncodeOptions::non_strict().compactly(true))
                .expect("decoded value must re-encode");
        let _ = decode(&encoded, &DecodeOptions::non_strict())
            .expect("re-encoded text must decode");
    }
});
