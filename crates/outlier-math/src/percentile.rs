//! Percentile by linear interpolation between order statistics.
//!
//! The rank of percentile `p` over `n` sorted observations is
//! `idx = (p / 100) * (n - 1)`. When `idx` lands on an integer position the
//! order statistic at that position is returned as-is; otherwise the result
//! interpolates between the two neighbouring order statistics. This is the
//! "R-7" definition used by most spreadsheet and numpy defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest accepted percentile.
pub const MIN_PERCENTILE: f64 = 0.0;

/// Highest accepted percentile.
pub const MAX_PERCENTILE: f64 = 100.0;

/// Errors raised by the percentile engine.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PercentileError {
    #[error("cannot calculate percentile of empty dataset")]
    EmptyInput,

    #[error("percentile must be between 0 and 100, got {percentile:.2}")]
    OutOfRange { percentile: f64 },
}

/// A computed percentile together with the inputs that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileSummary {
    /// Number of observations the percentile was computed over.
    pub count: usize,
    /// Percentile actually used (after any caller-side defaulting).
    pub percentile: f64,
    /// Interpolated percentile value.
    pub result: f64,
}

/// Compute the `percentile`-th percentile of `observations`.
///
/// `percentile` must lie in the closed interval `[0, 100]`; 0 yields the
/// minimum and 100 the maximum. The input slice is left untouched.
pub fn percentile(observations: &[f64], percentile: f64) -> Result<f64, PercentileError> {
    if observations.is_empty() {
        return Err(PercentileError::EmptyInput);
    }
    // NaN fails the containment check as well.
    if !(MIN_PERCENTILE..=MAX_PERCENTILE).contains(&percentile) {
        return Err(PercentileError::OutOfRange { percentile });
    }

    // Rank is always 0 for a single observation.
    if observations.len() == 1 {
        return Ok(observations[0]);
    }

    let mut sorted = observations.to_vec();
    sorted.sort_by(f64::total_cmp);

    let idx = (percentile / 100.0) * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    if idx == lo as f64 {
        return Ok(sorted[lo]);
    }

    // idx < n - 1 here, so hi is in bounds.
    let hi = lo + 1;
    let frac = idx - lo as f64;
    Ok(interpolate(sorted[lo], sorted[hi], frac))
}

/// Point `frac` of the way from `lo` to `hi`, kept inside `[lo, hi]`.
fn interpolate(lo: f64, hi: f64, frac: f64) -> f64 {
    let span = hi - lo;
    let value = if span.is_finite() {
        lo + span * frac
    } else {
        // The span overflows only for opposite signs, where the weighted
        // sum cannot.
        lo * (1.0 - frac) + hi * frac
    };
    value.max(lo).min(hi)
}

/// Compute a percentile and package it with the observation count.
pub fn summarize(
    observations: &[f64],
    percentile_value: f64,
) -> Result<PercentileSummary, PercentileError> {
    let result = percentile(observations, percentile_value)?;
    Ok(PercentileSummary {
        count: observations.len(),
        percentile: percentile_value,
        result,
    })
}
