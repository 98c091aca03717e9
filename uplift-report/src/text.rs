//! Human-readable Output
//!
//! Fixed-width summary table for terminal display.

use crate::format::format_general;
use crate::report::MetricSummary;

/// Format the metric summary as an aligned text table
pub fn format_summary_table(rows: &[MetricSummary]) -> String {
    let header = format!(
        "{:<18}{:>12}{:>12}{:>14}{:>12}",
        "metric", "pre_mean", "post_mean", "mean_change", "p_value"
    );

    let mut lines = vec![header.clone(), "-".repeat(header.len())];
    for row in rows {
        lines.push(format!(
            "{:<18}{:>12.4}{:>12.4}{:>14.4}{:>12}",
            row.metric,
            row.pre_mean,
            row.post_mean,
            row.mean_change,
            format_general(row.p_value, 4)
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_layout() {
        let rows = [MetricSummary {
            metric: "conversion_rate".to_string(),
            pre_mean: 0.1234,
            post_mean: 0.15,
            mean_change: 0.0266,
            statistic: 9.1,
            degrees_of_freedom: 1980.2,
            p_value: 1.234_56e-7,
        }];

        let table = format_summary_table(&rows);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 68);
        assert_eq!(lines[1], "-".repeat(68));
        assert!(lines[2].starts_with("conversion_rate   "));
        assert!(lines[2].contains("0.1234"));
        assert!(lines[2].ends_with("1.235e-07"));
    }
}
