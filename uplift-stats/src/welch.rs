//! Welch's t-test
//!
//! Two-sample, two-tailed test for a difference in means that does not assume
//! equal variances. Degrees of freedom use the Welch-Satterthwaite
//! approximation and are generally fractional.

use crate::descriptive::{mean, sample_variance};
use crate::student_t::StudentT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum observations per sample
pub const MIN_SAMPLES: usize = 2;

/// Which input sample an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSide {
    /// First sample (`a`)
    A,
    /// Second sample (`b`)
    B,
}

impl std::fmt::Display for SampleSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleSide::A => write!(f, "a"),
            SampleSide::B => write!(f, "b"),
        }
    }
}

/// Errors from the t-test
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TTestError {
    /// A sample had fewer than [`MIN_SAMPLES`] observations
    #[error("sample {which} has {len} observation(s); at least 2 are required")]
    InsufficientSamples {
        /// The offending sample
        which: SampleSide,
        /// Its length
        len: usize,
    },
}

/// Result of a Welch's t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    /// t statistic, `(mean_a - mean_b) / se`
    pub statistic: f64,
    /// Welch-Satterthwaite degrees of freedom (0.0 when the standard error is zero)
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value in `[0, 1]`
    pub p_value: f64,
}

impl TTestResult {
    /// Result used when the standard error is zero
    pub const NO_DIFFERENCE: TTestResult = TTestResult {
        statistic: 0.0,
        degrees_of_freedom: 0.0,
        p_value: 1.0,
    };

    /// Whether the p-value falls below `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Welch's t-test runner
///
/// Holds a [`StudentT`] model so batches of tests share one coefficient cache.
#[derive(Debug, Default)]
pub struct WelchTTest {
    model: StudentT,
}

impl WelchTTest {
    /// Create a runner with the default cache capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner using an existing model
    pub fn with_model(model: StudentT) -> Self {
        Self { model }
    }

    /// The underlying distribution model
    pub fn model(&self) -> &StudentT {
        &self.model
    }

    /// Test whether the means of `a` and `b` differ
    pub fn test(&self, a: &[f64], b: &[f64]) -> Result<TTestResult, TTestError> {
        if a.len() < MIN_SAMPLES {
            return Err(TTestError::InsufficientSamples {
                which: SampleSide::A,
                len: a.len(),
            });
        }
        if b.len() < MIN_SAMPLES {
            return Err(TTestError::InsufficientSamples {
                which: SampleSide::B,
                len: b.len(),
            });
        }

        let n_a = a.len() as f64;
        let n_b = b.len() as f64;
        let mean_a = mean(a);
        let mean_b = mean(b);

        let se_a = sample_variance(a) / n_a;
        let se_b = sample_variance(b) / n_b;
        let se = (se_a + se_b).sqrt();

        if se == 0.0 {
            tracing::debug!(n_a = a.len(), n_b = b.len(), "zero standard error");
            return Ok(TTestResult::NO_DIFFERENCE);
        }

        let statistic = (mean_a - mean_b) / se;
        let degrees_of_freedom =
            (se_a + se_b).powi(2) / (se_a.powi(2) / (n_a - 1.0) + se_b.powi(2) / (n_b - 1.0));
        let p_value = self.model.two_tailed_p_value(statistic, degrees_of_freedom);

        tracing::debug!(statistic, degrees_of_freedom, p_value, "welch t-test");

        Ok(TTestResult {
            statistic,
            degrees_of_freedom,
            p_value,
        })
    }
}

/// Run a single Welch's t-test with a fresh model
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<TTestResult, TTestError> {
    WelchTTest::new().test(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_case() {
        let a = [10.0, 12.0, 9.0, 11.0, 13.0];
        let b = [20.0, 22.0, 19.0, 21.0, 18.0];
        let result = welch_t_test(&a, &b).unwrap();

        assert!((result.statistic - -9.0).abs() < 1e-12);
        assert!((result.degrees_of_freedom - 8.0).abs() < 1e-12);
        // Reference: 1.85312e-5, checked relative to its magnitude
        let relative = (result.p_value - 1.853_12e-5).abs() / 1.853_12e-5;
        assert!(relative < 1e-4, "p = {}", result.p_value);
        assert!(result.is_significant(0.05));
    }

    #[test]
    fn test_unequal_variances() {
        let a = [1.2, 2.4, 3.1, 4.8, 5.0, 6.3];
        let b = [2.0, 2.1, 2.3, 2.2];
        let result = welch_t_test(&a, &b).unwrap();

        assert!((result.statistic - 2.128_663).abs() < 1e-3);
        assert!((result.degrees_of_freedom - 5.069_664).abs() < 1e-3);
        assert!((result.p_value - 0.085_791).abs() < 1e-5);
    }

    #[test]
    fn test_identical_samples() {
        let a = [3.0, 7.5, 1.25, 9.0];
        let result = welch_t_test(&a, &a).unwrap();
        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_zero_variance_fallback() {
        let a = [5.0, 5.0, 5.0, 5.0];
        let result = welch_t_test(&a, &a).unwrap();
        assert_eq!(result, TTestResult::NO_DIFFERENCE);
    }

    #[test]
    fn test_insufficient_samples() {
        let err = welch_t_test(&[1.0], &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            TTestError::InsufficientSamples {
                which: SampleSide::A,
                len: 1
            }
        );

        let err = welch_t_test(&[1.0, 2.0], &[]).unwrap_err();
        assert!(matches!(
            err,
            TTestError::InsufficientSamples {
                which: SampleSide::B,
                len: 0
            }
        ));
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_p_value_in_unit_interval() {
        let runner = WelchTTest::new();
        let cases: [(&[f64], &[f64]); 4] = [
            (&[0.0, 1.0], &[1000.0, 1001.0]),
            (&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.1]),
            (&[-5.0, 5.0], &[0.0, 0.0]),
            (&[1e-9, 2e-9, 3e-9], &[1e9, 2e9]),
        ];
        for (a, b) in cases {
            let p = runner.test(a, b).unwrap().p_value;
            assert!((0.0..=1.0).contains(&p), "p = {p}");
        }
    }

    #[test]
    fn test_runner_reuses_cache() {
        let runner = WelchTTest::with_model(StudentT::with_cache_capacity(8));
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 3.0, 4.0, 5.0];
        runner.test(&a, &b).unwrap();
        runner.test(&b, &a).unwrap();
        assert_eq!(runner.model().cache().len(), 1);
    }

    #[test]
    fn test_result_serializes() {
        let json = serde_json::to_string(&TTestResult::NO_DIFFERENCE).unwrap();
        assert!(json.contains("\"degrees_of_freedom\":0.0"));
    }

    #[test]
    fn test_underflowing_variance_terms() {
        // Squared standard-error terms underflow to zero, so df overflows to inf
        let a: Vec<f64> = (0..20_001)
            .map(|i| if i % 2 == 0 { 1e-78 } else { -1e-78 })
            .collect();
        let b: Vec<f64> = (0..20_001)
            .map(|i| if i % 2 == 0 { 3e-78 } else { 1e-78 })
            .collect();
        let result = welch_t_test(&a, &b).unwrap();

        assert!(result.degrees_of_freedom.is_infinite());
        assert!((result.statistic + 200.0).abs() < 1e-3);
        assert!(result.p_value.is_finite());
        assert!((0.0..1e-8).contains(&result.p_value), "p = {}", result.p_value);
    }
}
