//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uplift_stats::TTestResult;

/// Complete rollout analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// One row per metric, in [`Metric::ALL`] order
    pub summary: Vec<MetricSummary>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Crate version that produced the report
    pub version: String,
    /// Generation time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Number of simulated users
    pub users: usize,
    /// RNG seed used for the simulation
    pub seed: u64,
}

impl ReportMeta {
    /// Metadata stamped with the current time
    pub fn now(users: usize, seed: u64) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            users,
            seed,
        }
    }
}

/// One simulated user observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// 1-based user id
    pub user_id: u32,
    /// Engagement rate in `[0, 1]`
    pub engagement_rate: f64,
    /// Conversion rate in `[0, 1]`
    pub conversion_rate: f64,
    /// Observed after the feature launched
    pub is_post_launch: bool,
}

/// Metrics compared before and after launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Share of sessions with meaningful engagement
    EngagementRate,
    /// Share of users converting
    ConversionRate,
}

impl Metric {
    /// All metrics, in report order
    pub const ALL: [Metric; 2] = [Metric::EngagementRate, Metric::ConversionRate];

    /// Column name
    pub fn name(self) -> &'static str {
        match self {
            Metric::EngagementRate => "engagement_rate",
            Metric::ConversionRate => "conversion_rate",
        }
    }

    /// This metric's value for one record
    pub fn value(self, record: &UserRecord) -> f64 {
        match self {
            Metric::EngagementRate => record.engagement_rate,
            Metric::ConversionRate => record.conversion_rate,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pre/post comparison for a single metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Metric column name
    pub metric: String,
    /// Mean before launch
    pub pre_mean: f64,
    /// Mean after launch
    pub post_mean: f64,
    /// `post_mean - pre_mean`
    pub mean_change: f64,
    /// Welch t statistic
    pub statistic: f64,
    /// Welch-Satterthwaite degrees of freedom
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value
    pub p_value: f64,
}

impl MetricSummary {
    /// Combine means with a t-test result (post is sample A, pre is sample B)
    pub fn new(metric: impl Into<String>, pre_mean: f64, post_mean: f64, test: &TTestResult) -> Self {
        Self {
            metric: metric.into(),
            pre_mean,
            post_mean,
            mean_change: post_mean - pre_mean,
            statistic: test.statistic,
            degrees_of_freedom: test.degrees_of_freedom,
            p_value: test.p_value,
        }
    }

    /// Chart label: underscores become spaces, upper-cased
    pub fn label(&self) -> String {
        self.metric.replace('_', " ").to_uppercase()
    }
}
