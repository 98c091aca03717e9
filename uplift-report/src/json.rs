//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
///
/// Serializes metadata and per-metric results into machine-readable JSON.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
