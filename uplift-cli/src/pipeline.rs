//! Rollout Pipeline
//!
//! Simulate, analyse, render and persist. Every artifact goes through
//! [`write_artifact`] so failures carry the offending path.

use crate::analysis::run_analysis;
use crate::config::SimulationConfig;
use crate::simulate::simulate_user_metrics;
use anyhow::Context;
use std::path::{Path, PathBuf};
use uplift_report::{
    ChartOptions, Report, ReportMeta, encode_png, generate_json_report, generate_records_csv,
    generate_summary_csv, render_uplift_chart,
};
use uplift_stats::{StudentT, WelchTTest};

/// Dataset file written to the data directory
pub const METRICS_FILE: &str = "feature_rollout_metrics.csv";
/// Summary table written to the reports directory
pub const SUMMARY_CSV_FILE: &str = "summary_statistics.csv";
/// JSON report written to the reports directory
pub const SUMMARY_JSON_FILE: &str = "summary_statistics.json";

/// Smallest population that yields two users on each side
pub const MIN_USERS: usize = 4;

/// Resolved settings for one pipeline run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Dataset size, seed and distributions
    pub simulation: SimulationConfig,
    /// Student-t coefficient cache bound
    pub gamma_cache_capacity: usize,
    /// Directory for [`METRICS_FILE`]
    pub data_dir: PathBuf,
    /// Directory for summaries and the chart
    pub reports_dir: PathBuf,
    /// Chart file name inside `reports_dir`
    pub chart_file: String,
    /// Chart appearance
    pub chart: ChartOptions,
    /// Skip rendering the PNG chart
    pub skip_chart: bool,
}

/// Paths written by a run, plus the report they were built from
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    /// Per-user dataset
    pub metrics_csv: PathBuf,
    /// Summary as CSV
    pub summary_csv: PathBuf,
    /// Summary as JSON, with run metadata
    pub summary_json: PathBuf,
    /// Rendered chart, unless skipped
    pub chart: Option<PathBuf>,
    /// The analysed report
    pub report: Report,
}

impl RunArtifacts {
    /// All written paths, in write order
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths = vec![
            self.metrics_csv.as_path(),
            self.summary_csv.as_path(),
            self.summary_json.as_path(),
        ];
        if let Some(chart) = &self.chart {
            paths.push(chart.as_path());
        }
        paths
    }
}

/// Run the full pipeline
pub fn run_pipeline(options: &RunOptions) -> anyhow::Result<RunArtifacts> {
    let users = options.simulation.users;
    if users < MIN_USERS {
        anyhow::bail!(
            "at least {} users are required for a two-sample comparison, got {}",
            MIN_USERS,
            users
        );
    }

    let records = simulate_user_metrics(&options.simulation)?;
    tracing::info!(
        users = records.len(),
        seed = options.simulation.seed,
        "Generated synthetic dataset"
    );

    let runner = WelchTTest::with_model(StudentT::with_cache_capacity(
        options.gamma_cache_capacity,
    ));
    let summary = run_analysis(&records, &runner).context("Welch t-test failed")?;
    tracing::debug!(
        cached_coefficients = runner.model().cache().len(),
        "Analysis complete"
    );

    let report = Report {
        meta: ReportMeta::now(users, options.simulation.seed),
        summary,
    };

    let metrics_csv = options.data_dir.join(METRICS_FILE);
    write_artifact(&metrics_csv, generate_records_csv(&records).as_bytes())?;

    let summary_csv = options.reports_dir.join(SUMMARY_CSV_FILE);
    write_artifact(&summary_csv, generate_summary_csv(&report.summary).as_bytes())?;

    let summary_json = options.reports_dir.join(SUMMARY_JSON_FILE);
    let json = generate_json_report(&report).context("Failed to serialize report")?;
    write_artifact(&summary_json, json.as_bytes())?;

    let chart = if options.skip_chart {
        None
    } else {
        let path = options.reports_dir.join(&options.chart_file);
        let canvas = render_uplift_chart(&report.summary, &options.chart);
        let bytes = encode_png(&canvas).context("Failed to encode chart")?;
        write_artifact(&path, &bytes)?;
        Some(path)
    };

    Ok(RunArtifacts {
        metrics_csv,
        summary_csv,
        summary_json,
        chart,
        report,
    })
}

/// Write `bytes` to `path`, creating parent directories
pub fn write_artifact(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote artifact");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uplift_report::{RECORDS_HEADER, SUMMARY_HEADER};

    fn options(root: &Path, users: usize) -> RunOptions {
        RunOptions {
            simulation: SimulationConfig {
                users,
                seed: 42,
                ..SimulationConfig::default()
            },
            gamma_cache_capacity: 16,
            data_dir: root.join("data"),
            reports_dir: root.join("reports"),
            chart_file: "chart.png".to_string(),
            chart: ChartOptions::default(),
            skip_chart: false,
        }
    }

    #[test]
    fn test_pipeline_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = run_pipeline(&options(dir.path(), 200)).unwrap();

        assert_eq!(artifacts.paths().len(), 4);
        for path in artifacts.paths() {
            assert!(path.exists(), "{} missing", path.display());
        }

        let metrics = std::fs::read_to_string(&artifacts.metrics_csv).unwrap();
        let mut lines = metrics.lines();
        assert_eq!(lines.next(), Some(RECORDS_HEADER));
        assert_eq!(lines.count(), 200);

        let summary = std::fs::read_to_string(&artifacts.summary_csv).unwrap();
        assert!(summary.starts_with(SUMMARY_HEADER));
        assert_eq!(summary.lines().count(), 3);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&artifacts.summary_json).unwrap())
                .unwrap();
        assert_eq!(json["meta"]["users"], 200);
        assert_eq!(json["summary"].as_array().unwrap().len(), 2);

        let png = std::fs::read(artifacts.chart.as_ref().unwrap()).unwrap();
        assert_eq!(&png[..8], &uplift_report::PNG_SIGNATURE);
    }

    #[test]
    fn test_skip_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path(), 50);
        opts.skip_chart = true;
        let artifacts = run_pipeline(&opts).unwrap();
        assert!(artifacts.chart.is_none());
        assert!(!dir.path().join("reports/chart.png").exists());
    }

    #[test]
    fn test_too_few_users() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_pipeline(&options(dir.path(), 3)).unwrap_err();
        assert!(err.to_string().contains("at least 4 users"));
        assert!(!dir.path().join("data").exists());
    }

    #[test]
    fn test_summary_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let a = run_pipeline(&options(dir.path(), 400)).unwrap();
        let b = run_pipeline(&options(dir.path(), 400)).unwrap();
        assert_eq!(a.report.summary, b.report.summary);
    }

    #[test]
    fn test_write_artifact_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.txt");
        write_artifact(&path, b"hello").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }
}
