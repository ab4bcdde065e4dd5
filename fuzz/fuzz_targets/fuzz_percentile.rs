//! Fuzz target for the percentile engine.
//!
//! Structured input via `arbitrary`: any finite observations and any
//! percentile. Successful results must be finite and lie within
//! [min, max], even when the spread exceeds `f64::MAX`.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use outlier_math::percentile;

#[derive(Debug, Arbitrary)]
struct Input {
    observations: Vec<f64>,
    percentile: f64,
}

fuzz_target!(|input: Input| {
    let observations: Vec<f64> = input
        .observations
        .into_iter()
        .filter(|v| v.is_finite())
        .collect();

    if let Ok(result) = percentile(&observations, input.percentile) {
        let min = observations.iter().copied().fold(f64::INFINITY, f64::min);
        let max = observations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(
            result >= min && result <= max,
            "{result} outside [{min}, {max}]"
        );
    }
});
