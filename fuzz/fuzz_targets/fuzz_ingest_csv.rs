//! Fuzz target for CSV value ingestion.
//!
//! Tests header lookup, short rows, quoting, and invalid UTF-8 without
//! panicking. Every value that comes back must be finite.

#![no_main]

use libfuzzer_sys::fuzz_target;
use outlier_core::ingest::{ingest, SourceFormat};

fuzz_target!(|data: &[u8]| {
    if let Ok(values) = ingest(data, SourceFormat::Csv) {
        assert!(values.iter().all(|v| v.is_finite()));
    }
});
