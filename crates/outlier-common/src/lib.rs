//! Outlier common types and errors.
//!
//! This crate provides the pieces shared by the CLI and the HTTP API:
//! - The closed error taxonomy reported to callers
//! - Request/response bodies of the HTTP API
//! - Output format selection for CLI commands

pub mod api;
pub mod error;
pub mod output;

pub use api::{CalculateRequest, ErrorResponse, HealthResponse};
pub use error::{Error, ErrorKind, Result};
pub use outlier_math::PercentileSummary;
pub use output::OutputFormat;
