//! CSV source: header row plus a `value` column.
//!
//! Rows too short to reach the value column, and rows whose value cell is
//! blank, are skipped rather than rejected. The skip count is logged at
//! debug level so sparse inputs stay visible.

use outlier_common::{Error, Result};

use super::parse_finite;

/// Header name of the column holding observations.
pub const VALUE_COLUMN: &str = "value";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub(crate) fn parse(data: &[u8]) -> Result<Vec<f64>> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut header = csv::StringRecord::new();
    match reader.read_record(&mut header) {
        Ok(true) => {}
        Ok(false) => return Err(Error::malformed("failed to read CSV header: input is empty")),
        Err(e) => return Err(Error::malformed(format!("failed to read CSV header: {e}"))),
    }

    let column = value_column(&header).ok_or(Error::MissingColumn)?;

    let mut values = Vec::new();
    let mut skipped = 0usize;
    let mut record = csv::StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(Error::malformed(format!("failed to read CSV record: {e}"))),
        }

        let cell = match record.get(column) {
            Some(cell) => cell.trim(),
            None => {
                skipped += 1;
                continue;
            }
        };
        if cell.is_empty() {
            skipped += 1;
            continue;
        }

        values.push(parse_finite(cell, "invalid number in CSV")?);
    }

    if skipped > 0 {
        tracing::debug!(
            skipped_rows = skipped,
            column,
            "skipped CSV rows with no value"
        );
    }
    Ok(values)
}

/// Position of the first header whose trimmed, lower-cased text is `value`.
fn value_column(header: &csv::StringRecord) -> Option<usize> {
    header
        .iter()
        .position(|field| field.trim().to_lowercase() == VALUE_COLUMN)
}
