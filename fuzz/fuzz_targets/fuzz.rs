#![no_main]

use libfuzzer_sys::fuzz_target;
use lzmin::{Config, compress_with, decompress_with};

/// Keeps the quadratic window scan cheap enough for the fuzzer to make progress.
const FUZZ_CONFIG: Config = Config::new().with_window_size(4096);

/// Verifies that the decompressor safely handles arbitrary, potentially malformed input.
///
/// # Invariant
/// The decompressor must return either `Ok(_)` or `Err(_)`. It must **never** panic,
/// and on `Err(_)` it must leave the output exactly as it found it.
fn verify_decompression_robustness(data: &[u8]) {
    let mut output = vec![0xAA];
    if decompress_with(data, &mut output, &FUZZ_CONFIG).is_err() {
        assert_eq!(output, [0xAA], "Failed decode left partial output behind");
    }
}

/// Verifies the lossless "Round-Trip" property.
///
/// # Invariant
/// `decompress(compress(data)) == data`
///
/// # Panics
/// Panics if the decompressed output does not bit-match the input, if the
/// offset table is not strictly increasing, or if either direction fails.
fn verify_round_trip(data: &[u8]) {
    let mut compressed = Vec::new();
    if let Err(e) = compress_with(data, &mut compressed, &FUZZ_CONFIG) {
        panic!("Compression failed: {e:?}\nInput len: {}", data.len());
    }

    let mut decompressed = Vec::new();
    match decompress_with(&compressed, &mut decompressed, &FUZZ_CONFIG) {
        Ok(()) => {
            if decompressed != data {
                panic!(
                    "Round-trip mismatch!\nInput len: {}\nCompressed len: {}\nDecompressed len: {}",
                    data.len(),
                    compressed.len(),
                    decompressed.len()
                );
            }
        }
        Err(e) => {
            panic!(
                "Round-trip failed! Decompressor rejected valid compressed data.\nError: {:?}\nInput len: {}",
                e,
                data.len()
            );
        }
    }
}

fuzz_target!(|data: &[u8]| {
    verify_decompression_robustness(data);
    verify_round_trip(data);
});
