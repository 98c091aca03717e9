#![warn(missing_docs)]
//! Uplift Statistical Engine
//!
//! Self-contained statistics for two-sample experiment analysis:
//! - Welch's t-test with Welch-Satterthwaite degrees of freedom
//! - Student-t PDF/CDF with the CDF evaluated by Simpson integration
//! - Real-argument log-gamma and a bounded cache of t normalizing constants
//! - Descriptive helpers (mean, Bessel-corrected variance)

mod descriptive;
mod gamma;
mod student_t;
mod welch;

pub use descriptive::{mean, sample_variance};
pub use gamma::{DEFAULT_CACHE_CAPACITY, GammaCoefficientCache, ln_gamma, student_t_coefficient};
pub use student_t::{
    MAX_DEGREES_OF_FREEDOM, NARROW_INTERVALS, StudentT, WIDE_INTERVALS, WIDE_RANGE_THRESHOLD,
    integrate_pdf, interval_count, simpson, student_t_pdf,
};
pub use welch::{MIN_SAMPLES, SampleSide, TTestError, TTestResult, WelchTTest, welch_t_test};

/// Default significance level (5%)
pub const DEFAULT_ALPHA: f64 = 0.05;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(MIN_SAMPLES, 2);
        assert_eq!(DEFAULT_CACHE_CAPACITY, 256);
        assert!((DEFAULT_ALPHA - 0.05).abs() < f64::EPSILON);
    }
}
