//! CLI result rendering.

use outlier_common::{OutputFormat, PercentileSummary};

/// Render a summary for stdout.
///
/// Text output:
/// ```text
/// Number of values: 10
/// Percentile (P95): 9.55
/// ```
pub fn render_summary(summary: &PercentileSummary, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "Number of values: {}\nPercentile (P{}): {:.2}",
            summary.count,
            percentile_label(summary.percentile),
            summary.result
        )),
        OutputFormat::Json => serde_json::to_string_pretty(summary),
    }
}

/// `95` for whole percentiles, `99.9` otherwise.
fn percentile_label(p: f64) -> String {
    if p.fract() == 0.0 {
        format!("{p:.0}")
    } else {
        p.to_string()
    }
}
