//! Student's t Distribution
//!
//! PDF and CDF for the Student-t distribution with real-valued degrees of
//! freedom. The CDF is evaluated by composite Simpson integration of the PDF
//! from 0 to |x|, which is deterministic for identical inputs.

use crate::gamma::{GammaCoefficientCache, student_t_coefficient};

/// Subintervals used when |x| < [`WIDE_RANGE_THRESHOLD`]
pub const NARROW_INTERVALS: usize = 1000;

/// Subintervals used when |x| >= [`WIDE_RANGE_THRESHOLD`]
pub const WIDE_INTERVALS: usize = 2000;

/// Boundary between narrow and wide integration ranges
pub const WIDE_RANGE_THRESHOLD: f64 = 10.0;

/// Degrees of freedom beyond which the distribution is treated as this one
///
/// `ln Γ` of an infinite argument is not finite, so Welch results whose df
/// overflowed are evaluated here, where the t distribution is already normal
/// to well below integration error.
pub const MAX_DEGREES_OF_FREEDOM: f64 = 1e6;

/// Composite Simpson's rule for `f` over `[0, upper]`
///
/// `intervals` is rounded up to the next even number (minimum 2).
pub fn simpson<F>(f: F, upper: f64, intervals: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let n = even_intervals(intervals);
    let h = upper / n as f64;

    let mut total = f(0.0) + f(upper);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        total += weight * f(i as f64 * h);
    }

    (h / 3.0) * total
}

/// Student-t PDF without memoization
pub fn student_t_pdf(x: f64, df: f64) -> f64 {
    student_t_coefficient(df) * kernel(x, df)
}

/// Integral of the Student-t PDF from 0 to `x` with `intervals` subintervals
pub fn integrate_pdf(x: f64, df: f64, intervals: usize) -> f64 {
    let coeff = student_t_coefficient(df);
    coeff * simpson(|t| kernel(t, df), x, intervals)
}

/// Interval count for integrating up to `|x|`
pub fn interval_count(x: f64) -> usize {
    let n = if x.abs() < WIDE_RANGE_THRESHOLD {
        NARROW_INTERVALS
    } else {
        WIDE_INTERVALS
    };
    even_intervals(n)
}

fn even_intervals(n: usize) -> usize {
    let n = n.max(2);
    if n % 2 == 1 { n + 1 } else { n }
}

/// Unnormalized density `(1 + x²/df)^(-(df+1)/2)`
fn kernel(x: f64, df: f64) -> f64 {
    (1.0 + (x * x) / df).powf(-(df + 1.0) / 2.0)
}

/// Student-t probability model backed by a coefficient cache
///
/// The cache is owned by the model, so its lifetime and size bound are
/// explicit. `StudentT` is `Sync` and can be shared across threads.
#[derive(Debug, Default)]
pub struct StudentT {
    cache: GammaCoefficientCache,
}

impl StudentT {
    /// Create a model with the default cache capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model whose cache holds at most `capacity` coefficients
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            cache: GammaCoefficientCache::new(capacity),
        }
    }

    /// The coefficient cache used by this model
    pub fn cache(&self) -> &GammaCoefficientCache {
        &self.cache
    }

    /// Probability density at `x`
    pub fn pdf(&self, x: f64, df: f64) -> f64 {
        let df = df.min(MAX_DEGREES_OF_FREEDOM);
        self.cache.coefficient(df) * kernel(x, df)
    }

    /// Cumulative probability `P(T <= x)`, clamped to `[0, 1]`
    ///
    /// A NaN `x` carries no information and maps to `0.5`.
    pub fn cdf(&self, x: f64, df: f64) -> f64 {
        if x == 0.0 || x.is_nan() {
            return 0.5;
        }
        if x.is_infinite() {
            return if x > 0.0 { 1.0 } else { 0.0 };
        }
        let df = df.min(MAX_DEGREES_OF_FREEDOM);

        let sign = if x > 0.0 { 1.0 } else { -1.0 };
        let upper = x.abs();
        let coeff = self.cache.coefficient(df);
        let integral = coeff * simpson(|t| kernel(t, df), upper, interval_count(upper));

        let c = 0.5 + sign * integral;
        if c.is_nan() {
            return 0.5;
        }
        c.clamp(0.0, 1.0)
    }

    /// Two-tailed p-value for a t statistic
    ///
    /// Non-positive (or NaN) degrees of freedom yield `1.0`; infinite degrees
    /// of freedom are capped at [`MAX_DEGREES_OF_FREEDOM`].
    pub fn two_tailed_p_value(&self, t_stat: f64, df: f64) -> f64 {
        if df.is_nan() || df <= 0.0 {
            return 1.0;
        }
        let c = self.cdf(t_stat, df);
        (2.0 * c.min(1.0 - c)).clamp(0.0, 1.0)
    }
}
