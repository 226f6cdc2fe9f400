#![no_main]

use std::collections::BTreeMap;

use libfuzzer_sys::fuzz_target;

use fieldwire::{decode_with_limits, DecodeLimits, Options};

fn fuzz_limits(input_len: usize) -> DecodeLimits {
    DecodeLimits {
        max_depth: 64,
        ..DecodeLimits::for_bytes(input_len.min(1 << 20))
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&opts, body)) = data.split_first() else {
        return;
    };
    let Some(opts) = Options::from_bits(opts & 0x1f) else {
        return;
    };
    let limits = fuzz_limits(body.len());
    let _ = decode_with_limits::<Vec<(u64, String)>>(body, opts, limits);
    let _ = decode_with_limits::<BTreeMap<i32, Option<Box<Vec<f64>>>>>(body, opts, limits);
    let _ = decode_with_limits::<Vec<()>>(body, opts, limits);
});
