//! Synthetic Dataset
//!
//! Generates seeded pre/post launch engagement and conversion rates. The
//! post-launch half mirrors the pre-launch half user for user, shifted by a
//! normally distributed lift and clamped to `[0, 1]`.

use crate::config::SimulationConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Beta, Distribution, Normal};
use thiserror::Error;
use uplift_report::UserRecord;

/// Errors from dataset generation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A distribution rejected its parameters
    #[error("invalid {name} parameters {params:?}: {reason}")]
    InvalidParameter {
        /// Configuration key of the distribution
        name: &'static str,
        /// The rejected parameters
        params: [f64; 2],
        /// Why they were rejected
        reason: String,
    },
}

fn beta(name: &'static str, params: [f64; 2]) -> Result<Beta<f64>, SimulationError> {
    Beta::new(params[0], params[1]).map_err(|e| SimulationError::InvalidParameter {
        name,
        params,
        reason: e.to_string(),
    })
}

fn normal(name: &'static str, params: [f64; 2]) -> Result<Normal<f64>, SimulationError> {
    // Normal::new only rejects a non-finite standard deviation
    if params[1].is_nan() || params[1] < 0.0 {
        return Err(SimulationError::InvalidParameter {
            name,
            params,
            reason: "standard deviation must be non-negative".to_string(),
        });
    }
    Normal::new(params[0], params[1]).map_err(|e| SimulationError::InvalidParameter {
        name,
        params,
        reason: e.to_string(),
    })
}

/// Generate `config.users` records
///
/// User ids are 1-based. With an odd user count the post-launch side gets the
/// extra user, whose baseline is the first post-launch record.
pub fn simulate_user_metrics(config: &SimulationConfig) -> Result<Vec<UserRecord>, SimulationError> {
    let engagement = beta("engagement_beta", config.engagement_beta)?;
    let conversion = beta("conversion_beta", config.conversion_beta)?;
    let engagement_lift = normal("engagement_lift", config.engagement_lift)?;
    let conversion_lift = normal("conversion_lift", config.conversion_lift)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let users = config.users;
    let half = users / 2;
    let mut records = Vec::with_capacity(users);

    for idx in 0..half {
        records.push(UserRecord {
            user_id: idx as u32 + 1,
            engagement_rate: engagement.sample(&mut rng),
            conversion_rate: conversion.sample(&mut rng),
            is_post_launch: false,
        });
    }

    if half == 0 {
        return Ok(records);
    }

    for idx in half..users {
        let base = records[idx - half];
        let engagement_rate =
            (base.engagement_rate + engagement_lift.sample(&mut rng)).clamp(0.0, 1.0);
        let conversion_rate =
            (base.conversion_rate + conversion_lift.sample(&mut rng)).clamp(0.0, 1.0);
        records.push(UserRecord {
            user_id: idx as u32 + 1,
            engagement_rate,
            conversion_rate,
            is_post_launch: true,
        });
    }

    tracing::debug!(users, seed = config.seed, "simulated dataset");
    Ok(records)
}
