//! Win/loss statistics and training statistics
//!
//! [`StatisticsTable`] is the learned state: how often each `(score, opponent, dice)`
//! triple ended up on the winning and on the losing side. [`TrainingStatistics`] collects
//! run-level numbers for reporting.

use std::collections::HashMap;
use std::time::Duration;

use crate::game_state::{GameResult, Outcome, Player, StateKey};

/// Win and loss counters keyed by [`StateKey`]
///
/// Counts only ever grow. A key that was never recorded reads as zero.
#[derive(Debug, Clone, Default)]
pub struct StatisticsTable {
    wins: HashMap<StateKey, u64>,
    losses: HashMap<StateKey, u64>,
}

impl StatisticsTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how often `state` was part of a winning history
    pub fn win_count(&self, state: &StateKey) -> u64 {
        self.wins.get(state).copied().unwrap_or(0)
    }

    /// Returns how often `state` was part of a losing history
    pub fn loss_count(&self, state: &StateKey) -> u64 {
        self.losses.get(state).copied().unwrap_or(0)
    }

    /// Returns the number of games in which `state` was visited
    pub fn observations(&self, state: &StateKey) -> u64 {
        self.win_count(state) + self.loss_count(state)
    }

    /// Credits every state of the winner with a win and every state of the loser with a loss
    pub fn record_outcome(&mut self, winner_history: &[StateKey], loser_history: &[StateKey]) {
        for state in winner_history {
            *self.wins.entry(*state).or_insert(0) += 1;
        }
        for state in loser_history {
            *self.losses.entry(*state).or_insert(0) += 1;
        }
    }

    /// Sum of all win counters
    pub fn total_wins(&self) -> u64 {
        self.wins.values().sum()
    }

    /// Sum of all loss counters
    pub fn total_losses(&self) -> u64 {
        self.losses.values().sum()
    }

    /// Number of distinct states with at least one recorded result
    pub fn len(&self) -> usize {
        self.wins.len()
            + self
                .losses
                .keys()
                .filter(|key| !self.wins.contains_key(key))
                .count()
    }

    /// Returns true if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.wins.is_empty() && self.losses.is_empty()
    }

    /// Win counters in key order
    pub fn wins(&self) -> Vec<(StateKey, u64)> {
        sorted(&self.wins)
    }

    /// Loss counters in key order
    pub fn losses(&self) -> Vec<(StateKey, u64)> {
        sorted(&self.losses)
    }

    /// Returns both tables as text, one `Wins[s, o, d] = n` entry per counter
    pub fn summary(&self) -> String {
        let format_entries = |label: &str, entries: Vec<(StateKey, u64)>| {
            entries
                .into_iter()
                .map(|(key, count)| {
                    format!(
                        "{}[{}, {}, {}] = {}",
                        label, key.score, key.opponent_score, key.dice, count
                    )
                })
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!(
            "Wins table:\n{}\nLosses table:\n{}",
            format_entries("Wins", self.wins()),
            format_entries("Losses", self.losses())
        )
    }
}

fn sorted(map: &HashMap<StateKey, u64>) -> Vec<(StateKey, u64)> {
    let mut entries: Vec<_> = map.iter().map(|(key, count)| (*key, *count)).collect();
    entries.sort_unstable_by_key(|(key, _)| *key);
    entries
}

/// Statistics collected while training
#[derive(Debug, Clone)]
pub struct TrainingStatistics {
    /// Number of games played
    pub games: usize,

    /// Number of turns over all games
    pub turns: usize,

    /// Games won by player A (by landing in range or by B busting)
    pub a_wins: usize,

    /// Games won by player B
    pub b_wins: usize,

    /// Games that ended with a bust
    pub busts: usize,

    /// Total time spent training
    pub total_time: Duration,
}

impl TrainingStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        TrainingStatistics {
            games: 0,
            turns: 0,
            a_wins: 0,
            b_wins: 0,
            busts: 0,
            total_time: Duration::from_secs(0),
        }
    }

    /// Adds one finished game
    pub fn record_game(&mut self, outcome: &Outcome, turns: usize) {
        self.games += 1;
        self.turns += turns;
        match outcome.winner() {
            Player::A => self.a_wins += 1,
            Player::B => self.b_wins += 1,
        }
        if outcome.result == GameResult::Loses {
            self.busts += 1;
        }
    }

    /// Returns the average number of turns per game
    pub fn avg_turns_per_game(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.turns as f64 / self.games as f64
    }

    /// Returns the fraction of games won by player A
    pub fn a_win_rate(&self) -> f64 {
        crate::utils::win_rate(self.a_wins as u64, self.games as u64)
    }

    /// Returns the number of games per second
    pub fn games_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.games as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "Training Statistics:\n\
             - Games: {}\n\
             - Turns: {}\n\
             - Avg turns per game: {:.2}\n\
             - Player A wins: {} ({:.1}%)\n\
             - Player B wins: {}\n\
             - Busts: {}\n\
             - Total time: {:.3} seconds\n\
             - Games per second: {:.1}",
            self.games,
            self.turns,
            self.avg_turns_per_game(),
            self.a_wins,
            self.a_win_rate() * 100.0,
            self.b_wins,
            self.busts,
            self.total_time.as_secs_f64(),
            self.games_per_second()
        )
    }
}

impl Default for TrainingStatistics {
    fn default() -> Self {
        Self::new()
    }
}
