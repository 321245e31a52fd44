//! The learner: a selection policy paired with the statistics it learns from
//!
//! A [`DiceLearner`] is created once per training run and threaded by `&mut` through every
//! game. It owns the [`StatisticsTable`]; nothing about the learned state is global.

use rand::RngCore;

use crate::{
    game_state::{ScorePair, StateKey},
    policy::selection::{SelectionPolicy, SmoothedBestPolicy},
    stats::StatisticsTable,
    utils::win_rate,
    Result,
};

/// Selection policy plus win/loss statistics for one training run
pub struct DiceLearner {
    /// Largest number of dice that may be chosen
    max_dice: u32,

    /// Learned win/loss counters
    table: StatisticsTable,

    /// Policy used to choose actions
    selection_policy: Box<dyn SelectionPolicy>,
}

impl DiceLearner {
    /// Creates a learner with an empty table and a [`SmoothedBestPolicy`] using
    /// `exploration_param` as `M`
    pub fn new(max_dice: u32, exploration_param: f64) -> Self {
        DiceLearner {
            max_dice,
            table: StatisticsTable::new(),
            selection_policy: Box::new(SmoothedBestPolicy::new(exploration_param)),
        }
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Starts from previously gathered statistics
    pub fn with_table(mut self, table: StatisticsTable) -> Self {
        self.table = table;
        self
    }

    /// Largest number of dice that may be chosen
    pub fn max_dice(&self) -> u32 {
        self.max_dice
    }

    /// Returns the learned statistics
    pub fn table(&self) -> &StatisticsTable {
        &self.table
    }

    /// Returns the policy's weights for a score pair
    pub fn action_weights(&self, state: ScorePair, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        self.selection_policy
            .action_weights(state, &self.table, self.max_dice, rng)
    }

    /// Samples the number of dice to roll in `state`
    pub fn choose_action(&self, state: ScorePair, rng: &mut dyn RngCore) -> Result<u32> {
        self.selection_policy
            .choose_action(state, &self.table, self.max_dice, rng)
    }

    /// Folds the histories of a finished game into the statistics
    pub fn record_outcome(&mut self, winner_history: &[StateKey], loser_history: &[StateKey]) {
        self.table.record_outcome(winner_history, loser_history);
    }

    /// Returns the action with the highest observed win rate, without exploration
    ///
    /// Ties go to the fewest dice. Returns `None` for a score pair that was never visited.
    pub fn best_action(&self, state: ScorePair) -> Option<u32> {
        let mut best: Option<(u32, f64)> = None;
        let mut seen = false;

        for dice in 1..=self.max_dice {
            let key = state.with_dice(dice);
            let visits = self.table.observations(&key);
            seen |= visits > 0;

            let rate = win_rate(self.table.win_count(&key), visits);
            if best.map_or(true, |(_, best_rate)| rate > best_rate) {
                best = Some((dice, rate));
            }
        }

        if !seen {
            return None;
        }
        best.map(|(dice, _)| dice)
    }
}

impl std::fmt::Debug for DiceLearner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceLearner")
            .field("max_dice", &self.max_dice)
            .field("states", &self.table.len())
            .finish()
    }
}
