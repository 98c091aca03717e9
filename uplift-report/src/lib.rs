#![warn(missing_docs)]
//! Uplift Report - Reporting and Visualization
//!
//! Generates the artifacts of a rollout analysis:
//! - PNG bar chart (self-contained canvas, bitmap font and PNG encoder)
//! - CSV (dataset and summary)
//! - JSON (machine-readable report)
//! - Human-readable summary table

mod canvas;
mod chart;
mod csv;
pub mod font;
mod format;
mod json;
mod png;
mod report;
mod text;

pub use canvas::{Canvas, Rgb};
pub use chart::{ChartOptions, bar_height, pair_x, render_uplift_chart};
pub use csv::{RECORDS_HEADER, SUMMARY_HEADER, generate_records_csv, generate_summary_csv};
pub use format::format_general;
pub use json::generate_json_report;
pub use png::{
    ChunkType, ChunkWriter, MAX_CHUNK_SIZE, PNG_SIGNATURE, PngEncoder, PngError, chunk_crc,
    encode_png, ihdr_data, scanlines, write_png,
};
pub use report::{Metric, MetricSummary, Report, ReportMeta, UserRecord};
pub use text::format_summary_table;

/// Output format selection for the terminal summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Fixed-width text table
    #[default]
    Human,
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
