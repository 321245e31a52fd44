//! Selection policies for the dice learner
//!
//! Selection policies turn the statistics recorded for a score pair into a distribution
//! over the dice counts `1..=max_dice` and sample the number of dice to roll.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::{
    game_state::ScorePair,
    stats::StatisticsTable,
    utils::{
        challenger_probability, incumbent_probability, sample_index, uniform_weights, win_rate,
    },
    DiceError, Result,
};

/// Trait for policies that choose how many dice to roll
pub trait SelectionPolicy: Send + Sync {
    /// Returns one non-negative weight per action, index `i` standing for `i + 1` dice
    ///
    /// The weights need not sum to one.
    fn action_weights(
        &self,
        state: ScorePair,
        table: &StatisticsTable,
        max_dice: u32,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<f64>>;

    /// Samples a number of dice in `1..=max_dice`
    fn choose_action(
        &self,
        state: ScorePair,
        table: &StatisticsTable,
        max_dice: u32,
        rng: &mut dyn RngCore,
    ) -> Result<u32> {
        let weights = self.action_weights(state, table, max_dice, rng)?;
        let action = sample_index(&weights, rng)? as u32 + 1;
        if action > max_dice {
            return Err(DiceError::ActionOutOfRange { action, max_dice });
        }
        Ok(action)
    }

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy>;
}

/// Smoothed best-arm selection policy
///
/// For every dice count `d` the empirical win rate `w_d = wins / (wins + losses)` is
/// computed (0 without observations). If the score pair has never been seen, all actions
/// are equally likely. Otherwise the best action `d*` gets
///
/// ```text
/// P(d*) = (total * w_d* + M) / (total * w_d* + max_dice * M)
/// ```
///
/// and every other action
///
/// ```text
/// P(d) = (1 - P(d*)) * (w_d + M) / (sum_{d != d*} w_d * total + (max_dice - 1) * M)
/// ```
///
/// where `total` is the number of observations over all actions of the score pair. This is
/// Laplace-style additive smoothing scaled by total observation count: `M = 0` always
/// plays the best action, larger `M` approaches the uniform distribution.
///
/// Ties for the best action are broken uniformly at random, so small dice counts are not
/// favored. With `M = 0` and every win rate at 0 the rule is undefined and the policy
/// samples uniformly instead.
#[derive(Debug, Clone)]
pub struct SmoothedBestPolicy {
    /// Exploration parameter `M`
    pub exploration_param: f64,
}

impl SmoothedBestPolicy {
    /// Creates a new policy with the given exploration parameter
    pub fn new(exploration_param: f64) -> Self {
        SmoothedBestPolicy { exploration_param }
    }

    /// Computes the win rate of every action and the total observation count
    pub fn win_rates(
        &self,
        state: ScorePair,
        table: &StatisticsTable,
        max_dice: u32,
    ) -> (Vec<f64>, u64) {
        let mut rates = Vec::with_capacity(max_dice as usize);
        let mut total = 0;

        for dice in 1..=max_dice {
            let key = state.with_dice(dice);
            let wins = table.win_count(&key);
            let losses = table.loss_count(&key);
            log::debug!("Wins{} = {}, Losses{} = {}", key, wins, key, losses);
            rates.push(win_rate(wins, wins + losses));
            total += wins + losses;
        }

        (rates, total)
    }
}

impl Default for SmoothedBestPolicy {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SelectionPolicy for SmoothedBestPolicy {
    fn action_weights(
        &self,
        state: ScorePair,
        table: &StatisticsTable,
        max_dice: u32,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<f64>> {
        log::debug!("State = {}", state);
        let (rates, total) = self.win_rates(state, table, max_dice);

        if total == 0 {
            let weights = uniform_weights(max_dice);
            log::debug!("Unvisited state, weighted probabilities = {:?}", weights);
            return Ok(weights);
        }

        let best_rate = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let leaders: Vec<usize> = rates
            .iter()
            .enumerate()
            .filter(|(_, rate)| **rate == best_rate)
            .map(|(i, _)| i)
            .collect();
        let best = *leaders.choose(rng).ok_or_else(|| {
            DiceError::NoViableDistribution(format!("no best action among rates {:?}", rates))
        })?;

        let incumbent =
            match incumbent_probability(total, best_rate, max_dice, self.exploration_param) {
                Some(p) => p,
                None => {
                    log::warn!(
                        "state {} has no winning action and no exploration, sampling uniformly",
                        state
                    );
                    return Ok(uniform_weights(max_dice));
                }
            };

        let other_rates: f64 = rates.iter().sum::<f64>() - best_rate;
        let weights: Vec<f64> = rates
            .iter()
            .enumerate()
            .map(|(i, &rate)| {
                if i == best {
                    incumbent
                } else {
                    challenger_probability(
                        1.0 - incumbent,
                        rate,
                        other_rates,
                        total,
                        max_dice,
                        self.exploration_param,
                    )
                }
            })
            .collect();

        log::debug!("Win rates = {:?}", rates);
        log::debug!("Weighted probabilities = {:?}", weights);

        Ok(weights)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        Box::new(self.clone())
    }
}

/// Uniform selection policy
///
/// Ignores the statistics and rolls any number of dice with equal probability. Useful as
/// a baseline opponent and for generating unbiased statistics.
#[derive(Debug, Clone)]
pub struct UniformPolicy;

impl UniformPolicy {
    /// Creates a new uniform policy
    pub fn new() -> Self {
        UniformPolicy
    }
}

impl Default for UniformPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionPolicy for UniformPolicy {
    fn action_weights(
        &self,
        _state: ScorePair,
        _table: &StatisticsTable,
        max_dice: u32,
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<f64>> {
        Ok(uniform_weights(max_dice))
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        Box::new(self.clone())
    }
}

// Implement SelectionPolicy for Box<dyn SelectionPolicy>
impl SelectionPolicy for Box<dyn SelectionPolicy> {
    fn action_weights(
        &self,
        state: ScorePair,
        table: &StatisticsTable,
        max_dice: u32,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<f64>> {
        (**self).action_weights(state, table, max_dice, rng)
    }

    fn choose_action(
        &self,
        state: ScorePair,
        table: &StatisticsTable,
        max_dice: u32,
        rng: &mut dyn RngCore,
    ) -> Result<u32> {
        (**self).choose_action(state, table, max_dice, rng)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        (**self).clone_box()
    }
}
