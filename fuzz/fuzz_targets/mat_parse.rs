//! Fuzz target for MAT-file parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the Level 5 MAT reader,
//! checking for panics, crashes, or hangs.

#![no_main]

use hand2voc::mat::from_mat_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_mat_slice(data);
});
