//! Types describing players, states and outcomes of the dice game.
//!
//! A [`StateKey`] is the unit of credit assignment: the mover's score before rolling, the
//! opponent's score at that moment and the number of dice chosen. It does not depend on
//! whose turn it is, so both players share one statistics table.

use std::fmt;

/// A player's running score
pub type Score = u32;

/// The ordered states a single player visited during one game
pub type TurnHistory = Vec<StateKey>;

/// The two seats of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Moves first
    A,
    /// Moves second
    B,
}

impl Player {
    /// Returns the other player
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

/// A score situation from the point of view of the player about to roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScorePair {
    /// Score of the player choosing an action
    pub own: Score,
    /// Score of the other player
    pub opponent: Score,
}

impl ScorePair {
    /// Creates a new score pair
    pub fn new(own: Score, opponent: Score) -> Self {
        ScorePair { own, opponent }
    }

    /// Attaches an action, producing the key used by the statistics table
    pub fn with_dice(self, dice: u32) -> StateKey {
        StateKey::new(self.own, self.opponent, dice)
    }
}

impl fmt::Display for ScorePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.own, self.opponent)
    }
}

/// Lookup key of the statistics table: `(score, opponent_score, dice)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey {
    /// Mover's score before the roll
    pub score: Score,
    /// Opponent's score when the action was chosen
    pub opponent_score: Score,
    /// Number of dice rolled
    pub dice: u32,
}

impl StateKey {
    /// Creates a new state key
    pub fn new(score: Score, opponent_score: Score, dice: u32) -> Self {
        StateKey {
            score,
            opponent_score,
            dice,
        }
    }

    /// Returns the state without the action
    pub fn score_pair(&self) -> ScorePair {
        ScorePair::new(self.score, self.opponent_score)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.score, self.opponent_score, self.dice)
    }
}

/// Whether the player named in an [`Outcome`] won or lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// Landed inside the winning range
    Wins,
    /// Went above the high score
    Loses,
}

/// The terminal state of a game, named after the player who made the last roll
///
/// Displays as one of "Player A wins", "Player A loses", "Player B wins" or
/// "Player B loses".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Outcome {
    /// The player whose roll ended the game
    pub player: Player,
    /// What that roll meant for them
    pub result: GameResult,
}

impl Outcome {
    /// Creates a new outcome
    pub fn new(player: Player, result: GameResult) -> Self {
        Outcome { player, result }
    }

    /// Returns the player credited with the win
    pub fn winner(&self) -> Player {
        match self.result {
            GameResult::Wins => self.player,
            GameResult::Loses => self.player.opponent(),
        }
    }

    /// Returns the player charged with the loss
    pub fn loser(&self) -> Player {
        self.winner().opponent()
    }

    /// Returns the canonical label of this outcome
    pub fn label(&self) -> &'static str {
        match (self.player, self.result) {
            (Player::A, GameResult::Wins) => "Player A wins",
            (Player::A, GameResult::Loses) => "Player A loses",
            (Player::B, GameResult::Wins) => "Player B wins",
            (Player::B, GameResult::Loses) => "Player B loses",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
