//! Fuzz target for JSON value ingestion.
//!
//! Arbitrary bytes must decode to a number array or fail with an error,
//! never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use outlier_core::ingest::{ingest, SourceFormat};

fuzz_target!(|data: &[u8]| {
    let _ = ingest(data, SourceFormat::Json);
});
