//! Simulation of a single dice game
//!
//! [`DiceGame`] plays two symmetric players against each other, both choosing their
//! actions through the same [`DiceLearner`]. When the game ends the learner's statistics
//! are updated once with the winner's and the loser's turn histories.

use rand::{Rng, RngCore};

use crate::{
    config::{GameConfig, TurnResult},
    game_state::{GameResult, Outcome, Player, Score, ScorePair, TurnHistory},
    learner::DiceLearner,
    DiceError, Result,
};

/// The result of rolling a number of dice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roll {
    /// The individual faces
    pub dice: Vec<u32>,
    /// Their sum
    pub total: u32,
}

/// One turn of a game: who rolled what, and the scores afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    /// The player who rolled
    pub player: Player,
    /// The dice rolled
    pub roll: Roll,
    /// Player A's score after the roll
    pub score_a: Score,
    /// Player B's score after the roll
    pub score_b: Score,
}

/// Detailed result of one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    /// How the game ended
    pub outcome: Outcome,
    /// Number of turns played by both players together
    pub turns: usize,
    /// Player A's final score
    pub score_a: Score,
    /// Player B's final score
    pub score_b: Score,
    /// Every turn in order
    pub rolls: Vec<TurnRecord>,
}

impl GameSummary {
    /// Final score of the given player
    pub fn score(&self, player: Player) -> Score {
        match player {
            Player::A => self.score_a,
            Player::B => self.score_b,
        }
    }
}

/// Per-seat scores and histories of a game in progress
#[derive(Debug, Default)]
struct Seats {
    scores: [Score; 2],
    histories: [TurnHistory; 2],
}

impl Seats {
    fn index(player: Player) -> usize {
        match player {
            Player::A => 0,
            Player::B => 1,
        }
    }

    fn score(&self, player: Player) -> Score {
        self.scores[Self::index(player)]
    }

    fn state_for(&self, player: Player) -> ScorePair {
        ScorePair::new(self.score(player), self.score(player.opponent()))
    }

    fn take_history(&mut self, player: Player) -> TurnHistory {
        std::mem::take(&mut self.histories[Self::index(player)])
    }
}

/// Simulator for the two-player dice race
#[derive(Debug, Clone)]
pub struct DiceGame {
    config: GameConfig,
}

impl DiceGame {
    /// Creates a game with an already validated configuration
    pub fn new(config: GameConfig) -> Self {
        DiceGame { config }
    }

    /// Returns the configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Rolls `num_dice` dice with `num_sides` faces each
    pub fn roll_dice<R: Rng + ?Sized>(&self, num_dice: u32, rng: &mut R) -> Roll {
        let dice: Vec<u32> = (0..num_dice)
            .map(|_| rng.gen_range(1..=self.config.num_sides))
            .collect();
        let total = dice.iter().sum();
        Roll { dice, total }
    }

    /// Plays one game and returns its outcome
    pub fn play_one_game<R: RngCore>(
        &self,
        learner: &mut DiceLearner,
        rng: &mut R,
    ) -> Result<Outcome> {
        self.play_game(learner, rng).map(|summary| summary.outcome)
    }

    /// Plays one game and returns its outcome together with turn count and final scores
    ///
    /// Player A moves first. After each roll the mover's new score is classified with the
    /// bust check first, so going above `high_score` always loses.
    pub fn play_game<R: RngCore>(
        &self,
        learner: &mut DiceLearner,
        rng: &mut R,
    ) -> Result<GameSummary> {
        let mut seats = Seats::default();
        let mut mover = Player::A;
        let mut rolls = Vec::new();

        loop {
            let state = seats.state_for(mover);
            let num_dice = learner.choose_action(state, rng)?;
            if num_dice == 0 || num_dice > self.config.max_dice {
                return Err(DiceError::ActionOutOfRange {
                    action: num_dice,
                    max_dice: self.config.max_dice,
                });
            }

            let roll = self.roll_dice(num_dice, rng);
            let seat = Seats::index(mover);
            seats.histories[seat].push(state.with_dice(num_dice));
            seats.scores[seat] += roll.total;

            log::debug!(
                "{} rolls {} dice {:?} for a score of {}; scores: A = {}, B = {}",
                mover,
                num_dice,
                roll.dice,
                roll.total,
                seats.scores[0],
                seats.scores[1]
            );
            rolls.push(TurnRecord {
                player: mover,
                roll,
                score_a: seats.scores[0],
                score_b: seats.scores[1],
            });

            let result = match self.config.classify(seats.score(mover)) {
                TurnResult::Bust => GameResult::Loses,
                TurnResult::Win => GameResult::Wins,
                TurnResult::Continue => {
                    mover = mover.opponent();
                    continue;
                }
            };

            let outcome = Outcome::new(mover, result);
            let winner_history = seats.take_history(outcome.winner());
            let loser_history = seats.take_history(outcome.loser());
            learner.record_outcome(&winner_history, &loser_history);

            log::debug!("{} after {} turns", outcome, rolls.len());

            return Ok(GameSummary {
                outcome,
                turns: rolls.len(),
                score_a: seats.scores[0],
                score_b: seats.scores[1],
                rolls,
            });
        }
    }
}
