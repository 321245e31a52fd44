//! Configuration options for the dice game and the learner
//!
//! This module defines the parameters of a game (dice, sides, winning range) and the
//! exploration parameter used by the selection policy.

use crate::{game_state::Score, DiceError, Result};

/// What a freshly updated score means for the player who just rolled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResult {
    /// The score went above `high_score`; the mover loses
    Bust,

    /// The score landed inside `[low_score, high_score]`; the mover wins
    Win,

    /// The score is still below `low_score`; play passes to the opponent
    Continue,
}

/// Configuration for a dice game
///
/// Use the builder methods to create a customized configuration, then call
/// [`GameConfig::validate`] before running any games. The game and the learner assume the
/// parameters have already been validated.
///
/// # Example
///
/// ```
/// use dice_bandit::GameConfig;
///
/// let config = GameConfig::default()
///     .with_num_sides(6)
///     .with_max_dice(3)
///     .with_score_range(30, 34)
///     .with_exploration_param(2.0);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Number of faces on each die
    pub num_sides: u32,

    /// Largest number of dice a player may roll in one turn
    ///
    /// The action set is `1..=max_dice`.
    pub max_dice: u32,

    /// Lowest winning score (inclusive)
    pub low_score: Score,

    /// Highest winning score (inclusive)
    ///
    /// Any score above this is a bust.
    pub high_score: Score,

    /// Exploration parameter `M`
    ///
    /// Additive smoothing applied to the win rates before sampling. `0.0` is pure
    /// exploitation, larger values move the action distribution towards uniform.
    pub exploration_param: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            num_sides: 6,
            max_dice: 2,
            low_score: 20,
            high_score: 25,
            exploration_param: 1.0,
        }
    }
}

impl GameConfig {
    /// Sets the number of faces on each die
    pub fn with_num_sides(mut self, num_sides: u32) -> Self {
        self.num_sides = num_sides;
        self
    }

    /// Sets the largest number of dice per turn
    pub fn with_max_dice(mut self, max_dice: u32) -> Self {
        self.max_dice = max_dice;
        self
    }

    /// Sets the inclusive winning range
    pub fn with_score_range(mut self, low_score: Score, high_score: Score) -> Self {
        self.low_score = low_score;
        self.high_score = high_score;
        self
    }

    /// Sets the exploration parameter
    pub fn with_exploration_param(mut self, exploration_param: f64) -> Self {
        self.exploration_param = exploration_param;
        self
    }

    /// Checks every parameter and reports the first invalid one
    pub fn validate(&self) -> Result<()> {
        if self.num_sides <= 1 {
            return Err(DiceError::InvalidConfiguration(format!(
                "number of sides must be greater than 1, got {}",
                self.num_sides
            )));
        }
        if self.max_dice <= 1 {
            return Err(DiceError::InvalidConfiguration(format!(
                "maximum number of dice must be greater than 1, got {}",
                self.max_dice
            )));
        }
        if self.high_score < self.low_score {
            return Err(DiceError::InvalidConfiguration(format!(
                "high score {} must be greater than or equal to low score {}",
                self.high_score, self.low_score
            )));
        }
        // Scores below low_score plus one maximal roll must stay representable
        if self
            .max_dice
            .checked_mul(self.num_sides)
            .and_then(|max_roll| max_roll.checked_add(self.high_score))
            .is_none()
        {
            return Err(DiceError::InvalidConfiguration(format!(
                "high score {} plus a roll of {} dice with {} sides overflows the score range",
                self.high_score, self.max_dice, self.num_sides
            )));
        }
        if !self.exploration_param.is_finite() || self.exploration_param < 0.0 {
            return Err(DiceError::InvalidConfiguration(format!(
                "exploration parameter must be a non-negative number, got {}",
                self.exploration_param
            )));
        }
        Ok(())
    }

    /// Classifies a score reached after a roll
    ///
    /// The bust check comes first, so a score above `high_score` is always a loss.
    pub fn classify(&self, score: Score) -> TurnResult {
        if score > self.high_score {
            TurnResult::Bust
        } else if score >= self.low_score {
            TurnResult::Win
        } else {
            TurnResult::Continue
        }
    }
}
