//! Rollout Analysis
//!
//! Parallel per-metric Welch t-tests of post-launch against pre-launch users.
//! Each metric is independent, so the tests run on the Rayon pool; results come
//! back in [`Metric::ALL`] order.

use rayon::prelude::*;
use uplift_report::{Metric, MetricSummary, UserRecord};
use uplift_stats::{TTestError, WelchTTest, mean};

/// Split records into (pre-launch, post-launch) values of `metric`
pub fn metric_values(records: &[UserRecord], metric: Metric) -> (Vec<f64>, Vec<f64>) {
    let mut pre = Vec::new();
    let mut post = Vec::new();
    for record in records {
        let value = metric.value(record);
        if record.is_post_launch {
            post.push(value);
        } else {
            pre.push(value);
        }
    }
    (pre, post)
}

/// Summarize every metric in `records`
///
/// Post-launch values are sample A and pre-launch values sample B, so a
/// positive statistic means the metric went up.
pub fn run_analysis(
    records: &[UserRecord],
    runner: &WelchTTest,
) -> Result<Vec<MetricSummary>, TTestError> {
    Metric::ALL
        .par_iter()
        .map(|&metric| {
            let (pre, post) = metric_values(records, metric);
            let test = runner.test(&post, &pre)?;
            tracing::debug!(
                metric = metric.name(),
                statistic = test.statistic,
                p_value = test.p_value,
                "metric analysed"
            );
            Ok(MetricSummary::new(metric.name(), mean(&pre), mean(&post), &test))
        })
        .collect()
}
