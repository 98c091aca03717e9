#![warn(missing_docs)]
//! # Uplift
//!
//! Feature rollout impact analysis with a small, self-contained toolchain:
//! - **Welch's t-test**: unequal-variance two-sample test with Satterthwaite degrees of freedom
//! - **Student-t engine**: Lanczos log-gamma and Simpson-integrated CDF, with a bounded coefficient cache
//! - **Synthetic data**: seeded pre/post launch engagement and conversion rates
//! - **Charts**: built-in 3x5 bitmap font, RGB canvas and a minimal PNG encoder
//! - **Reports**: CSV, JSON and fixed-width text summaries
//!
//! ## Quick Start
//!
//! ```
//! use uplift::welch_t_test;
//!
//! let result = welch_t_test(&[1.0, 2.0, 3.0, 4.0, 5.0], &[6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
//! assert!((result.statistic + 5.0).abs() < 1e-12);
//! assert!(result.p_value < 0.01);
//! ```
//!
//! ## Charts
//!
//! ```
//! use uplift::{Canvas, Rgb, encode_png};
//!
//! let mut canvas = Canvas::new(64, 16, Rgb::WHITE);
//! canvas.draw_text("P=0.05", 2, 2, Rgb::BLACK);
//! let png = encode_png(&canvas).unwrap();
//! assert_eq!(&png[..8], &uplift::PNG_SIGNATURE);
//! ```

// Re-export statistics
pub use uplift_stats::{
    DEFAULT_ALPHA, GammaCoefficientCache, SampleSide, StudentT, TTestError, TTestResult,
    WelchTTest, ln_gamma, mean, sample_variance, student_t_coefficient, student_t_pdf,
    welch_t_test,
};

// Re-export reporting
pub use uplift_report::{
    Canvas, ChartOptions, Metric, MetricSummary, OutputFormat, PNG_SIGNATURE, PngEncoder,
    PngError, Report, ReportMeta, Rgb, UserRecord, encode_png, format_general,
    format_summary_table, generate_json_report, generate_records_csv, generate_summary_csv,
    render_uplift_chart, write_png,
};

// Re-export pipeline
pub use uplift_cli::{
    RunArtifacts, RunOptions, SimulationConfig, UpliftConfig, run_analysis, run_pipeline,
    simulate_user_metrics,
};

/// Bitmap font used by [`Canvas::draw_text`]
pub mod font {
    pub use uplift_report::font::*;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Canvas, MetricSummary, Rgb, TTestResult, UserRecord, WelchTTest, encode_png,
        render_uplift_chart, welch_t_test,
    };
}

/// Run the Uplift CLI.
///
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     uplift::run()
/// }
/// ```
pub use uplift_cli::run;
