//! Fuzz target for record extraction and bounding-box reduction.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = hand2voc::record::fuzz_record_boxes(data);
});
