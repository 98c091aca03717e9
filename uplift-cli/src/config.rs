//! Configuration loading from uplift.toml
//!
//! Uplift configuration can be specified in an `uplift.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use serde::{Deserialize, Serialize};
use std::path::Path;
use uplift_report::ChartOptions;
use uplift_stats::DEFAULT_CACHE_CAPACITY;

/// Name of the configuration file looked up by [`UpliftConfig::discover`]
pub const CONFIG_FILE: &str = "uplift.toml";

/// Uplift configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpliftConfig {
    /// Synthetic dataset configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Statistics configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Chart appearance
    #[serde(default)]
    pub chart: ChartOptions,
}

/// Synthetic dataset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Total users; the first half is pre-launch
    #[serde(default = "default_users")]
    pub users: usize,
    /// RNG seed
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Beta(alpha, beta) for baseline engagement
    #[serde(default = "default_engagement_beta")]
    pub engagement_beta: [f64; 2],
    /// Beta(alpha, beta) for baseline conversion
    #[serde(default = "default_conversion_beta")]
    pub conversion_beta: [f64; 2],
    /// Normal(mean, std_dev) engagement lift after launch
    #[serde(default = "default_engagement_lift")]
    pub engagement_lift: [f64; 2],
    /// Normal(mean, std_dev) conversion lift after launch
    #[serde(default = "default_conversion_lift")]
    pub conversion_lift: [f64; 2],
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            seed: default_seed(),
            engagement_beta: default_engagement_beta(),
            conversion_beta: default_conversion_beta(),
            engagement_lift: default_engagement_lift(),
            conversion_lift: default_conversion_lift(),
        }
    }
}

fn default_users() -> usize {
    2000
}
fn default_seed() -> u64 {
    42
}
fn default_engagement_beta() -> [f64; 2] {
    [2.5, 5.0]
}
fn default_conversion_beta() -> [f64; 2] {
    [1.5, 10.0]
}
fn default_engagement_lift() -> [f64; 2] {
    [0.08, 0.05]
}
fn default_conversion_lift() -> [f64; 2] {
    [0.03, 0.03]
}

/// Statistics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Maximum cached Student-t coefficients (0 disables the cache)
    #[serde(default = "default_cache_capacity")]
    pub gamma_cache_capacity: usize,
    /// Significance level used when flagging results
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            gamma_cache_capacity: default_cache_capacity(),
            alpha: default_alpha(),
        }
    }
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}
fn default_alpha() -> f64 {
    uplift_stats::DEFAULT_ALPHA
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for the generated dataset
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Directory for summaries and the chart
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,
    /// Chart file name inside `reports_dir`
    #[serde(default = "default_chart_file")]
    pub chart_file: String,
    /// Terminal summary format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            reports_dir: default_reports_dir(),
            chart_file: default_chart_file(),
            format: default_format(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}
fn default_reports_dir() -> String {
    "reports".to_string()
}
fn default_chart_file() -> String {
    "feature_rollout_uplift.png".to_string()
}
fn default_format() -> String {
    "human".to_string()
}

impl UpliftConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!("ignoring {}: {}", config_path.display(), e);
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Uplift Configuration

[simulation]
# Total simulated users (first half pre-launch, second half post-launch)
users = 2000
# RNG seed for reproducible datasets
seed = 42
# Baseline rate distributions: Beta(alpha, beta)
engagement_beta = [2.5, 5.0]
conversion_beta = [1.5, 10.0]
# Post-launch lift: Normal(mean, std_dev), added to the matching baseline user
engagement_lift = [0.08, 0.05]
conversion_lift = [0.03, 0.03]

[analysis]
# Cached Student-t normalizing constants (0 disables caching)
gamma_cache_capacity = 256
# Significance level
alpha = 0.05

[output]
# Dataset directory
data_dir = "data"
# Summary and chart directory
reports_dir = "reports"
# Chart file name
chart_file = "feature_rollout_uplift.png"
# Terminal summary format: human, json, csv
format = "human"

[chart]
width = 700
height = 420
title = "Feature Rollout Impact"
subtitle = "Pre vs post launch means with Welch t-test"
"#
        .to_string()
    }
}
