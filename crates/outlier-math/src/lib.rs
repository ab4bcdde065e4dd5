//! Outlier math utilities.
//!
//! The percentile engine is a pure function over a borrowed slice of
//! observations. It never retains or mutates its input and carries no state
//! between calls, so it can be invoked concurrently from any number of
//! request handlers.

pub mod percentile;

pub use percentile::{percentile, summarize, PercentileError, PercentileSummary};
