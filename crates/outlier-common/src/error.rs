//! Error types for Outlier.
//!
//! Every failure the core can produce belongs to a small closed set of kinds.
//! None of them is fatal to the hosting process: the CLI reports the message
//! and exits non-zero, the HTTP API answers 400 with the message in the body.
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Missing Value Column
//!   Reason: CSV file must have a 'value' column
//!   Fix: Add a header row containing a column named 'value'.
//! ```
//!
//! # Machine-Facing Output
//!
//! ```json
//! { "error": "CSV file must have a 'value' column", "kind": "missing_column" }
//! ```

use outlier_math::PercentileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Outlier operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Zero observations passed to the engine.
    EmptyInput,
    /// Percentile outside [0, 100].
    OutOfRange,
    /// Source extension is neither `.json` nor `.csv`.
    UnsupportedFormat,
    /// Body failed to parse, or a cell is not a number.
    MalformedInput,
    /// CSV header lacks a `value` column.
    MissingColumn,
    /// Input file could not be read (CLI only).
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::EmptyInput => write!(f, "empty_input"),
            ErrorKind::OutOfRange => write!(f, "out_of_range"),
            ErrorKind::UnsupportedFormat => write!(f, "unsupported_format"),
            ErrorKind::MalformedInput => write!(f, "malformed_input"),
            ErrorKind::MissingColumn => write!(f, "missing_column"),
            ErrorKind::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for Outlier.
#[derive(Error, Debug)]
pub enum Error {
    // Engine errors (10-19)
    #[error("cannot calculate percentile of empty dataset")]
    EmptyInput,

    #[error("percentile must be between 0 and 100, got {percentile:.2}")]
    OutOfRange { percentile: f64 },

    // Ingestion errors (20-29)
    #[error("unsupported file format: {} (supported: .json, .csv)", display_extension(.extension))]
    UnsupportedFormat { extension: String },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("CSV file must have a 'value' column")]
    MissingColumn,

    // I/O errors (60-69)
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_extension(extension: &str) -> &str {
    if extension.is_empty() {
        "(none)"
    } else {
        extension
    }
}

impl From<PercentileError> for Error {
    fn from(err: PercentileError) -> Self {
        match err {
            PercentileError::EmptyInput => Error::EmptyInput,
            PercentileError::OutOfRange { percentile } => Error::OutOfRange { percentile },
        }
    }
}

impl Error {
    /// Create a malformed-input error from any displayable cause.
    pub fn malformed(cause: impl std::fmt::Display) -> Self {
        Error::MalformedInput(cause.to_string())
    }

    /// Returns the caller-visible kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput => ErrorKind::EmptyInput,
            Error::OutOfRange { .. } => ErrorKind::OutOfRange,
            Error::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Error::MalformedInput(_) => ErrorKind::MalformedInput,
            Error::MissingColumn => ErrorKind::MissingColumn,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Engine errors
    /// - 20-29: Ingestion errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::EmptyInput => 10,
            Error::OutOfRange { .. } => 11,
            Error::UnsupportedFormat { .. } => 20,
            Error::MalformedInput(_) => 21,
            Error::MissingColumn => 22,
            Error::Io { .. } => 60,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::EmptyInput => "No Values",
            Error::OutOfRange { .. } => "Percentile Out of Range",
            Error::UnsupportedFormat { .. } => "Unsupported File Format",
            Error::MalformedInput(_) => "Malformed Input",
            Error::MissingColumn => "Missing Value Column",
            Error::Io { .. } => "I/O Error",
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::EmptyInput => "Provide at least one numeric value.",
            Error::OutOfRange { .. } => "Pass a percentile between 0 and 100, e.g. '--percentile 95'.",
            Error::UnsupportedFormat { .. } => "Use a file ending in .json or .csv.",
            Error::MalformedInput(_) => {
                "JSON input must be an array of numbers; CSV cells in the 'value' column must be numeric."
            }
            Error::MissingColumn => "Add a header row containing a column named 'value'.",
            Error::Io { .. } => "Check that the file exists and is readable.",
        }
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(Error::EmptyInput.code(), 10);
        assert_eq!(Error::MissingColumn.code(), 22);
        assert_eq!(Error::malformed("x").code(), 21);
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::OutOfRange { percentile: 101.0 }.kind(), ErrorKind::OutOfRange);
        assert_eq!(
            Error::UnsupportedFormat {
                extension: ".xml".into()
            }
            .kind(),
            ErrorKind::UnsupportedFormat
        );
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::MissingColumn).unwrap(),
            "\"missing_column\""
        );
        assert_eq!(ErrorKind::EmptyInput.to_string(), "empty_input");
    }

    #[test]
    fn test_from_percentile_error() {
        let err: Error = PercentileError::EmptyInput.into();
        assert!(matches!(err, Error::EmptyInput));

        let err: Error = PercentileError::OutOfRange { percentile: -1.0 }.into();
        assert_eq!(err.to_string(), "percentile must be between 0 and 100, got -1.00");
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = Error::UnsupportedFormat {
            extension: ".xml".into(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported file format: .xml (supported: .json, .csv)"
        );

        let err = Error::UnsupportedFormat {
            extension: String::new(),
        };
        assert!(err.to_string().contains("(none)"));
    }

    #[test]
    fn test_format_error_human_plain() {
        let out = format_error_human(&Error::MissingColumn, false);
        assert!(out.starts_with("✗ Missing Value Column"));
        assert!(out.contains("Reason: CSV file must have a 'value' column"));
        assert!(out.contains("Fix: Add a header row"));
        assert!(!out.contains("\x1b["));
    }

    #[test]
    fn test_format_error_human_color() {
        let out = format_error_human(&Error::EmptyInput, true);
        assert!(out.contains("\x1b[31m"));
    }
}
