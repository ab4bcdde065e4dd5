//! Value ingestion: raw bytes to a sequence of observations.
//!
//! The source format is resolved once, at the boundary, from a filename
//! extension into a [`SourceFormat`]. Everything past that point is a pure
//! mapping from bytes to `Vec<f64>` with no string-based branching.
//!
//! Ingestion is all-or-nothing: a single bad cell fails the whole source and
//! no partial result is returned. Emptiness is not checked here; that is the
//! percentile engine's job.

mod csv_values;
mod json_values;

use outlier_common::{Error, Result};
use std::path::Path;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// A top-level JSON array of numbers.
    Json,
    /// CSV with a header row containing a `value` column.
    Csv,
}

impl SourceFormat {
    /// Resolve the format from a filename's extension (case-insensitive).
    ///
    /// Anything other than `.json` or `.csv`, including a missing extension,
    /// fails with [`Error::UnsupportedFormat`].
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = extension_of(filename);
        match extension.as_str() {
            ".json" => Ok(SourceFormat::Json),
            ".csv" => Ok(SourceFormat::Csv),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    /// Resolve the format from a filesystem path.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_filename(&path.to_string_lossy())
    }

    /// Canonical extension, including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Json => ".json",
            SourceFormat::Csv => ".csv",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Json => write!(f, "json"),
            SourceFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Lower-cased extension of the last path component, with its dot.
/// Empty when the name has no dot.
fn extension_of(filename: &str) -> String {
    let name = Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(idx) => name[idx..].to_lowercase(),
        None => String::new(),
    }
}

/// Convert a byte buffer in the given format into observations.
pub fn ingest(data: &[u8], format: SourceFormat) -> Result<Vec<f64>> {
    let values = match format {
        SourceFormat::Json => json_values::parse(data)?,
        SourceFormat::Csv => csv_values::parse(data)?,
    };
    tracing::debug!(format = %format, bytes = data.len(), count = values.len(), "ingested values");
    Ok(values)
}

/// Resolve the format from `filename`, then ingest `data`.
pub fn ingest_named(data: &[u8], filename: &str) -> Result<Vec<f64>> {
    let format = SourceFormat::from_filename(filename)?;
    ingest(data, format)
}

/// Read a JSON or CSV file from disk and ingest it.
///
/// The format is resolved before the file is opened, so an unsupported
/// extension is reported even when the file does not exist.
pub fn read_values_from_file(path: &Path) -> Result<Vec<f64>> {
    let format = SourceFormat::from_path(path)?;
    let data = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ingest(&data, format)
}

/// Parse a comma-separated list such as `"1, 2.5,3"`.
///
/// Blank items are skipped. A list with no numbers at all fails with
/// [`Error::EmptyInput`].
pub fn parse_value_list(text: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for part in text.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        values.push(parse_finite(part, "invalid number")?);
    }

    if values.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(values)
}

/// Parse one textual number, rejecting NaN and infinities.
pub(crate) fn parse_finite(text: &str, context: &str) -> Result<f64> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(Error::malformed(format!("{context}: {text} is not finite"))),
        Err(_) => Err(Error::malformed(format!("{context}: {text}"))),
    }
}
