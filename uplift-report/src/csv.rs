//! CSV Output

use crate::report::{MetricSummary, UserRecord};
use std::fmt::Write;

/// Header for the per-user dataset
pub const RECORDS_HEADER: &str = "user_id,engagement_rate,conversion_rate,is_post_launch";

/// Header for the summary table
pub const SUMMARY_HEADER: &str = "metric,pre_mean,post_mean,mean_change,p_value";

/// Generate the per-user dataset as CSV
pub fn generate_records_csv(records: &[UserRecord]) -> String {
    let mut output = String::with_capacity(64 * (records.len() + 1));
    output.push_str(RECORDS_HEADER);
    output.push('\n');

    for r in records {
        let _ = writeln!(
            output,
            "{},{},{},{}",
            r.user_id, r.engagement_rate, r.conversion_rate, r.is_post_launch
        );
    }

    output
}

/// Generate the metric summary as CSV
pub fn generate_summary_csv(rows: &[MetricSummary]) -> String {
    let mut output = String::new();
    output.push_str(SUMMARY_HEADER);
    output.push('\n');

    for row in rows {
        let _ = writeln!(
            output,
            "{},{},{},{},{}",
            escape_csv(&row.metric),
            row.pre_mean,
            row.post_mean,
            row.mean_change,
            row.p_value
        );
    }

    output
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_csv() {
        let records = [
            UserRecord {
                user_id: 1,
                engagement_rate: 0.25,
                conversion_rate: 0.5,
                is_post_launch: false,
            },
            UserRecord {
                user_id: 2,
                engagement_rate: 0.75,
                conversion_rate: 1.0,
                is_post_launch: true,
            },
        ];
        let csv = generate_records_csv(&records);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], RECORDS_HEADER);
        assert_eq!(lines[1], "1,0.25,0.5,false");
        assert_eq!(lines[2], "2,0.75,1,true");
    }

    #[test]
    fn test_summary_csv() {
        let rows = [MetricSummary {
            metric: "odd,name".to_string(),
            pre_mean: 0.5,
            post_mean: 0.75,
            mean_change: 0.25,
            statistic: 3.0,
            degrees_of_freedom: 4.0,
            p_value: 0.04,
        }];
        let csv = generate_summary_csv(&rows);
        assert_eq!(csv, format!("{SUMMARY_HEADER}\n\"odd,name\",0.5,0.75,0.25,0.04\n"));
    }
}
