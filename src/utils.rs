//! Utility functions for the selection policy
//!
//! This module contains the arithmetic of the smoothed best-arm rule and the sampling
//! helper shared by all policies.

use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::{Rng, RngCore};

use crate::{DiceError, Result};

/// Safely calculates the win rate from wins and visits
///
/// Returns 0.0 if no visits have occurred.
pub fn win_rate(wins: u64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    wins as f64 / visits as f64
}

/// Probability mass given to the incumbent best action
///
/// Laplace-style additive smoothing scaled by the total observation count:
///
/// ```text
/// P(d*) = (total * w_d* + M) / (total * w_d* + n * M)
/// ```
///
/// Returns `None` when the denominator is zero, which only happens with `M = 0` and a best
/// win rate of zero.
pub fn incumbent_probability(
    total: u64,
    best_rate: f64,
    num_actions: u32,
    exploration_param: f64,
) -> Option<f64> {
    let evidence = total as f64 * best_rate;
    let denominator = evidence + num_actions as f64 * exploration_param;
    if denominator <= 0.0 {
        return None;
    }
    Some((evidence + exploration_param) / denominator)
}

/// Probability mass given to a non-incumbent action
///
/// `remaining` is `1 - P(d*)` and `other_rates` the sum of the win rates of all
/// non-incumbent actions. A zero denominator yields zero.
pub fn challenger_probability(
    remaining: f64,
    rate: f64,
    other_rates: f64,
    total: u64,
    num_actions: u32,
    exploration_param: f64,
) -> f64 {
    let denominator =
        other_rates * total as f64 + (num_actions - 1) as f64 * exploration_param;
    if denominator <= 0.0 {
        return 0.0;
    }
    remaining * (rate + exploration_param) / denominator
}

/// Equal weights over `num_actions` actions
pub fn uniform_weights(num_actions: u32) -> Vec<f64> {
    vec![1.0 / num_actions as f64; num_actions as usize]
}

/// Samples an index from unnormalized weights
///
/// All-zero weights fall back to a uniform draw. Negative or non-finite weights are an
/// error.
pub fn sample_index(weights: &[f64], rng: &mut dyn RngCore) -> Result<usize> {
    if weights.is_empty() {
        return Err(DiceError::NoViableDistribution(
            "empty action set".to_string(),
        ));
    }

    match WeightedIndex::new(weights) {
        Ok(distribution) => Ok(distribution.sample(rng)),
        Err(WeightedError::AllWeightsZero) => {
            log::warn!("all action weights are zero, sampling uniformly");
            Ok(rng.gen_range(0..weights.len()))
        }
        Err(e) => Err(DiceError::NoViableDistribution(format!(
            "{} (weights: {:?})",
            e, weights
        ))),
    }
}
