//! # dice-bandit
//!
//! A simulator for a two-player dice race together with an online policy that learns how
//! many dice to roll from the current score state.
//!
//! Two players take turns rolling between 1 and `max_dice` dice with `num_sides` faces each
//! and adding the total to their score. Landing inside `[low_score, high_score]` wins the
//! game, going above `high_score` (a *bust*) loses it.
//!
//! Every turn is recorded as a [`StateKey`] `(own score, opponent score, dice)`. When a game
//! ends the winner's turns are credited as wins and the loser's as losses in a
//! [`StatisticsTable`], which the selection policy reads on every later decision.
//!
//! ## Features
//!
//! - Smoothed best-arm selection ([`SmoothedBestPolicy`]) with a single exploration
//!   parameter `M`
//! - Injectable, seedable random number generators for reproducible runs
//! - A [`Trainer`] that runs many games and collects [`TrainingStatistics`]
//! - A `dice-trainer` binary (default `cli` feature)
//!
//! ## Basic Usage
//!
//! ```
//! use dice_bandit::{DiceGame, DiceLearner, GameConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! fn main() -> Result<(), dice_bandit::DiceError> {
//!     let config = GameConfig::default()
//!         .with_num_sides(6)
//!         .with_max_dice(2)
//!         .with_score_range(20, 25)
//!         .with_exploration_param(1.0);
//!     config.validate()?;
//!
//!     let game = DiceGame::new(config.clone());
//!     let mut learner = DiceLearner::new(config.max_dice, config.exploration_param);
//!     let mut rng = StdRng::seed_from_u64(7);
//!
//!     for _ in 0..100 {
//!         let outcome = game.play_one_game(&mut learner, &mut rng)?;
//!         println!("{}", outcome);
//!     }
//!
//!     println!("{}", learner.table().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! For a score pair the policy computes the empirical win rate `w_d` of every dice count
//! `d`. With no observations at all it samples uniformly. Otherwise the best action `d*`
//! (random among ties) receives
//!
//! ```text
//! P(d*) = (total * w_d* + M) / (total * w_d* + max_dice * M)
//! ```
//!
//! and the remaining mass is shared among the other actions in proportion to `w_d + M`.
//! `M = 0` always exploits; larger `M` flattens the distribution towards uniform.

pub mod config;
pub mod game;
pub mod game_state;
pub mod learner;
pub mod policy;
pub mod stats;
pub mod trainer;
pub mod utils;

pub use config::{GameConfig, TurnResult};
pub use game::{DiceGame, GameSummary, Roll, TurnRecord};
pub use game_state::{GameResult, Outcome, Player, Score, ScorePair, StateKey, TurnHistory};
pub use learner::DiceLearner;
pub use policy::{SelectionPolicy, SmoothedBestPolicy, UniformPolicy};
pub use stats::{StatisticsTable, TrainingStatistics};
pub use trainer::Trainer;

/// Error types for the dice learner
#[derive(thiserror::Error, Debug)]
pub enum DiceError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A policy chose a dice count outside `[1, max_dice]`
    #[error("Action {action} is outside the legal range 1..={max_dice}")]
    ActionOutOfRange { action: u32, max_dice: u32 },

    /// Sampling weights could not be turned into a distribution
    #[error("No viable action distribution: {0}")]
    NoViableDistribution(String),
}

/// Result type for dice learner operations
pub type Result<T> = std::result::Result<T, DiceError>;
