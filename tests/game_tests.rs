use dice_bandit::{DiceGame, DiceLearner, GameConfig, GameResult, Player};
use rand::{rngs::StdRng, SeedableRng};

const LABELS: [&str; 4] = [
    "Player A wins",
    "Player A loses",
    "Player B wins",
    "Player B loses",
];

fn setup(config: GameConfig) -> (DiceGame, DiceLearner) {
    config.validate().unwrap();
    let learner = DiceLearner::new(config.max_dice, config.exploration_param);
    (DiceGame::new(config), learner)
}

#[test]
fn test_roll_dice_stays_in_range() {
    let game = DiceGame::new(GameConfig::default().with_num_sides(6));
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..2_000 {
        let roll = game.roll_dice(3, &mut rng);
        assert_eq!(roll.dice.len(), 3);
        assert!(roll.dice.iter().all(|&d| (1..=6).contains(&d)));
        assert_eq!(roll.total, roll.dice.iter().sum::<u32>());
    }
}

#[test]
fn test_single_game_scenario() {
    let config = GameConfig::default()
        .with_num_sides(6)
        .with_max_dice(2)
        .with_score_range(20, 25)
        .with_exploration_param(1.0);
    let (game, mut learner) = setup(config);
    let mut rng = StdRng::seed_from_u64(2024);

    let summary = game.play_game(&mut learner, &mut rng).unwrap();
    assert!(LABELS.contains(&summary.outcome.to_string().as_str()));

    // A moves first, so A took the extra turn whenever the count is odd
    let a_turns = (summary.turns as u64 + 1) / 2;
    let b_turns = summary.turns as u64 / 2;
    let (winner_turns, loser_turns) = match summary.outcome.winner() {
        Player::A => (a_turns, b_turns),
        Player::B => (b_turns, a_turns),
    };

    let table = learner.table();
    assert_eq!(table.total_wins() + table.total_losses(), summary.turns as u64);
    assert_eq!(table.total_wins(), winner_turns);
    assert_eq!(table.total_losses(), loser_turns);

    // The first state of the game always belongs to A
    let first_a = table
        .wins()
        .into_iter()
        .chain(table.losses())
        .filter(|(key, _)| key.score == 0 && key.opponent_score == 0)
        .count();
    assert_eq!(first_a, 1);
}

#[test]
fn test_final_scores_respect_terminal_rule() {
    let config = GameConfig::default()
        .with_num_sides(6)
        .with_max_dice(3)
        .with_score_range(20, 25)
        .with_exploration_param(1.0);
    let (game, mut learner) = setup(config);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..300 {
        let summary = game.play_game(&mut learner, &mut rng).unwrap();
        let mover = summary.outcome.player;
        let last = summary.score(mover);
        let other = summary.score(mover.opponent());

        match summary.outcome.result {
            GameResult::Wins => assert!((20..=25).contains(&last)),
            GameResult::Loses => assert!(last > 25),
        }
        assert!(other < 20, "the waiting player never reached the range");
    }
}

#[test]
fn test_single_winning_score() {
    let config = GameConfig::default()
        .with_num_sides(2)
        .with_max_dice(2)
        .with_score_range(5, 5)
        .with_exploration_param(1.0);
    let (game, mut learner) = setup(config);
    let mut rng = StdRng::seed_from_u64(31);

    let mut results = (0, 0);
    for _ in 0..500 {
        let summary = game.play_game(&mut learner, &mut rng).unwrap();
        let last = summary.score(summary.outcome.player);
        match summary.outcome.result {
            GameResult::Wins => {
                assert_eq!(last, 5);
                results.0 += 1;
            }
            GameResult::Loses => {
                assert!(last > 5);
                results.1 += 1;
            }
        }
    }
    assert!(results.0 > 0 && results.1 > 0);
}

#[test]
fn test_counters_match_turns_over_many_games() {
    let (game, mut learner) = setup(GameConfig::default());
    let mut rng = StdRng::seed_from_u64(12);

    let mut turns = 0u64;
    for _ in 0..250 {
        turns += game.play_game(&mut learner, &mut rng).unwrap().turns as u64;
    }

    let table = learner.table();
    assert_eq!(table.total_wins() + table.total_losses(), turns);
}

#[test]
fn test_same_seed_same_games() {
    let play = |seed| {
        let (game, mut learner) = setup(GameConfig::default());
        let mut rng = StdRng::seed_from_u64(seed);
        (0..50)
            .map(|_| game.play_game(&mut learner, &mut rng).unwrap())
            .collect::<Vec<_>>()
    };

    assert_eq!(play(123), play(123));
}

#[test]
fn test_play_one_game_returns_label() {
    let (game, mut learner) = setup(GameConfig::default());
    let mut rng = StdRng::seed_from_u64(0);

    let outcome = game.play_one_game(&mut learner, &mut rng).unwrap();
    assert!(LABELS.contains(&outcome.label()));
    assert!(!learner.table().is_empty());
}
