//! Gamma Function Support
//!
//! Provides the real-argument log-gamma function and a bounded, thread-safe
//! cache of Student-t normalizing constants keyed by degrees of freedom.
//!
//! Welch's degrees of freedom are almost never integers, so the normalizing
//! constant has to go through `ln Γ` rather than a factorial table.

use std::collections::{HashMap, VecDeque};
use std::f64::consts::PI;
use std::sync::Mutex;

/// Default number of cached coefficients
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Lanczos coefficients (g = 7, n = 9)
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural logarithm of the gamma function for real `x > 0`
///
/// Uses the Lanczos approximation, with the reflection formula for `x < 0.5`.
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection: Γ(x)Γ(1-x) = π / sin(πx)
        let s = PI / (PI * x).sin();
        return s.abs().ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut a = LANCZOS[0];
    for (i, &c) in LANCZOS[1..].iter().enumerate() {
        a += c / (x + 1.0 + i as f64);
    }

    let t = x + 7.5; // x + g + 0.5
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + a.ln()
}

/// Student-t PDF normalizing constant for `df` degrees of freedom
///
/// `Γ((df+1)/2) / (Γ(df/2) · √(df·π))`, evaluated in log space.
pub fn student_t_coefficient(df: f64) -> f64 {
    let log_coeff = ln_gamma((df + 1.0) / 2.0) - ln_gamma(df / 2.0) - 0.5 * (df.ln() + PI.ln());
    log_coeff.exp()
}

#[derive(Debug, Default)]
struct CacheState {
    values: HashMap<u64, f64>,
    // Insertion order, oldest first
    order: VecDeque<u64>,
}

/// Bounded memo of Student-t normalizing constants
///
/// Entries are keyed by the exact bit pattern of `df`. When the cache is full
/// the oldest entry is evicted. All access goes through a mutex, so a single
/// cache can be shared by rayon workers evaluating many p-values at once.
#[derive(Debug)]
pub struct GammaCoefficientCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl Default for GammaCoefficientCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl GammaCoefficientCache {
    /// Create a cache holding at most `capacity` coefficients
    ///
    /// A capacity of zero disables memoization entirely.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Maximum number of cached entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently cached
    pub fn len(&self) -> usize {
        self.lock().values.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached coefficient
    pub fn clear(&self) {
        let mut state = self.lock();
        state.values.clear();
        state.order.clear();
    }

    /// Normalizing constant for `df`, computed on first use
    pub fn coefficient(&self, df: f64) -> f64 {
        if self.capacity == 0 {
            return student_t_coefficient(df);
        }

        let key = df.to_bits();
        if let Some(&value) = self.lock().values.get(&key) {
            return value;
        }

        // Computed outside the lock; a racing thread may compute the same
        // value, which is harmless since the function is pure.
        let value = student_t_coefficient(df);

        let mut state = self.lock();
        if state.values.contains_key(&key) {
            return value;
        }
        while state.values.len() >= self.capacity {
            match state.order.pop_front() {
                Some(oldest) => {
                    state.values.remove(&oldest);
                    tracing::trace!(df = f64::from_bits(oldest), "evicted gamma coefficient");
                }
                None => break,
            }
        }
        state.values.insert(key, value);
        state.order.push_back(key);
        value
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        // A poisoned cache still holds valid pure-function results.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
