//! Fuzz target for `--values` list parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use outlier_core::ingest::parse_value_list;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(values) = parse_value_list(text) {
            assert!(!values.is_empty());
            assert!(values.iter().all(|v| v.is_finite()));
        }
    }
});
