//! Training loop over many games
//!
//! The [`Trainer`] owns the game, the learner and a seedable random number generator and
//! plays games one after another, each finishing before the next begins.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    config::GameConfig,
    game::{DiceGame, GameSummary},
    learner::DiceLearner,
    policy::selection::SelectionPolicy,
    stats::TrainingStatistics,
    DiceError, Result,
};

/// Runs a sequence of games against a shared learner
///
/// # Example
///
/// ```
/// use dice_bandit::{GameConfig, Trainer};
///
/// let mut trainer = Trainer::with_seed(GameConfig::default(), 42).unwrap();
/// let stats = trainer.train(50).unwrap();
/// assert_eq!(stats.games, 50);
/// ```
#[derive(Debug)]
pub struct Trainer {
    game: DiceGame,
    learner: DiceLearner,
    rng: StdRng,
    statistics: TrainingStatistics,
}

impl Trainer {
    /// Creates a trainer seeded from the operating system
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a trainer with a fixed seed for reproducible runs
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let learner = DiceLearner::new(config.max_dice, config.exploration_param);
        Ok(Trainer {
            game: DiceGame::new(config),
            learner,
            rng,
            statistics: TrainingStatistics::new(),
        })
    }

    /// Sets the selection policy the learner uses
    pub fn with_selection_policy<P: SelectionPolicy + 'static>(mut self, policy: P) -> Self {
        self.learner = self.learner.with_selection_policy(policy);
        self
    }

    /// Returns the game configuration
    pub fn config(&self) -> &GameConfig {
        self.game.config()
    }

    /// Returns the learner
    pub fn learner(&self) -> &DiceLearner {
        &self.learner
    }

    /// Returns the statistics accumulated so far
    pub fn statistics(&self) -> &TrainingStatistics {
        &self.statistics
    }

    /// Plays a single game and updates the statistics
    pub fn play_game(&mut self) -> Result<GameSummary> {
        let summary = self.game.play_game(&mut self.learner, &mut self.rng)?;
        self.statistics.record_game(&summary.outcome, summary.turns);
        Ok(summary)
    }

    /// Plays `num_games` games
    pub fn train(&mut self, num_games: usize) -> Result<&TrainingStatistics> {
        self.train_with(num_games, |_, _, _| {})
    }

    /// Plays `num_games` games, calling `on_game` after each one with the 1-based game
    /// number, the summary and the learner as updated by that game
    pub fn train_with<F>(
        &mut self,
        num_games: usize,
        mut on_game: F,
    ) -> Result<&TrainingStatistics>
    where
        F: FnMut(usize, &GameSummary, &DiceLearner),
    {
        if num_games < 1 {
            return Err(DiceError::InvalidConfiguration(
                "number of games must be at least 1".to_string(),
            ));
        }

        let start_time = Instant::now();
        let report_every = (num_games / 10).max(1);

        for i in 1..=num_games {
            let summary = self.play_game()?;
            on_game(i, &summary, &self.learner);

            if i % report_every == 0 {
                log::info!(
                    "played {}/{} games, {} states learned",
                    i,
                    num_games,
                    self.learner.table().len()
                );
            }
        }

        self.statistics.total_time += start_time.elapsed();
        Ok(&self.statistics)
    }
}
