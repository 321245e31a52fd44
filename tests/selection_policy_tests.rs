use dice_bandit::{
    DiceLearner, ScorePair, SelectionPolicy, SmoothedBestPolicy, StatisticsTable, UniformPolicy,
};
use rand::{rngs::StdRng, SeedableRng};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

// Records `wins` winning and `losses` losing games for one action of a state
fn record(table: &mut StatisticsTable, state: ScorePair, dice: u32, wins: usize, losses: usize) {
    let key = state.with_dice(dice);
    for _ in 0..wins {
        table.record_outcome(&[key], &[]);
    }
    for _ in 0..losses {
        table.record_outcome(&[], &[key]);
    }
}

#[test]
fn test_unvisited_state_samples_uniformly() {
    let policy = SmoothedBestPolicy::new(2.0);
    let table = StatisticsTable::new();
    let state = ScorePair::new(3, 8);
    let mut rng = StdRng::seed_from_u64(17);

    let weights = policy.action_weights(state, &table, 4, &mut rng).unwrap();
    for w in &weights {
        assert_close(*w, 0.25);
    }

    let trials = 40_000;
    let mut counts = [0usize; 4];
    for _ in 0..trials {
        let action = policy.choose_action(state, &table, 4, &mut rng).unwrap();
        counts[(action - 1) as usize] += 1;
    }

    // Chi-square with 3 degrees of freedom, critical value at p = 0.001
    let expected = trials as f64 / 4.0;
    let chi_square: f64 = counts
        .iter()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum();
    assert!(
        chi_square < 16.27,
        "counts {:?} are not uniform (chi-square {})",
        counts,
        chi_square
    );
}

#[test]
fn test_smoothed_weights_match_formula() {
    let policy = SmoothedBestPolicy::new(1.0);
    let mut table = StatisticsTable::new();
    let state = ScorePair::new(10, 12);
    record(&mut table, state, 1, 3, 1); // w = 0.75
    record(&mut table, state, 2, 1, 3); // w = 0.25

    let mut rng = StdRng::seed_from_u64(3);
    let weights = policy.action_weights(state, &table, 2, &mut rng).unwrap();

    // total = 8: P(1) = (8 * 0.75 + 1) / (8 * 0.75 + 2) = 7 / 8
    assert_close(weights[0], 0.875);
    // P(2) = (1 - 7/8) * (0.25 + 1) / (0.25 * 8 + 1)
    assert_close(weights[1], 0.125 * 1.25 / 3.0);
}

#[test]
fn test_zero_exploration_always_exploits() {
    let policy = SmoothedBestPolicy::new(0.0);
    let mut table = StatisticsTable::new();
    let state = ScorePair::new(5, 3);
    record(&mut table, state, 1, 0, 1);
    record(&mut table, state, 2, 1, 0);
    record(&mut table, state, 3, 0, 1);

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..1_000 {
        assert_eq!(policy.choose_action(state, &table, 3, &mut rng).unwrap(), 2);
    }
}

#[test]
fn test_ties_are_broken_at_random() {
    let policy = SmoothedBestPolicy::new(0.0);
    let mut table = StatisticsTable::new();
    let state = ScorePair::new(0, 0);
    record(&mut table, state, 1, 1, 0);
    record(&mut table, state, 2, 0, 1);
    record(&mut table, state, 3, 1, 0);

    let mut rng = StdRng::seed_from_u64(5);
    let mut counts = [0usize; 3];
    for _ in 0..1_000 {
        let action = policy.choose_action(state, &table, 3, &mut rng).unwrap();
        counts[(action - 1) as usize] += 1;
    }

    assert_eq!(counts[1], 0, "the losing action must never be chosen");
    assert!(counts[0] > 300, "tied action 1 chosen only {} times", counts[0]);
    assert!(counts[2] > 300, "tied action 3 chosen only {} times", counts[2]);
}

#[test]
fn test_all_losses_with_exploration_is_uniform() {
    let policy = SmoothedBestPolicy::new(1.0);
    let mut table = StatisticsTable::new();
    let state = ScorePair::new(18, 20);
    for dice in 1..=3 {
        record(&mut table, state, dice, 0, 1);
    }

    let mut rng = StdRng::seed_from_u64(8);
    let weights = policy.action_weights(state, &table, 3, &mut rng).unwrap();
    for w in &weights {
        assert_close(*w, 1.0 / 3.0);
    }
}

#[test]
fn test_all_losses_without_exploration_falls_back_to_uniform() {
    let policy = SmoothedBestPolicy::new(0.0);
    let mut table = StatisticsTable::new();
    let state = ScorePair::new(18, 20);
    record(&mut table, state, 1, 0, 2);
    record(&mut table, state, 2, 0, 1);

    let mut rng = StdRng::seed_from_u64(21);
    let weights = policy.action_weights(state, &table, 2, &mut rng).unwrap();
    assert_close(weights[0], 0.5);
    assert_close(weights[1], 0.5);

    let mut seen = [false; 2];
    for _ in 0..200 {
        let action = policy.choose_action(state, &table, 2, &mut rng).unwrap();
        seen[(action - 1) as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_weights_are_finite_and_non_negative() {
    let policy = SmoothedBestPolicy::new(0.5);
    let mut table = StatisticsTable::new();
    let state = ScorePair::new(2, 9);
    record(&mut table, state, 1, 4, 0);
    record(&mut table, state, 3, 2, 5);

    let mut rng = StdRng::seed_from_u64(4);
    let weights = policy.action_weights(state, &table, 4, &mut rng).unwrap();
    assert_eq!(weights.len(), 4);
    assert!(weights.iter().all(|w| w.is_finite() && *w >= 0.0));
    // Unobserved actions share the exploration mass equally
    assert_close(weights[1], weights[3]);
}

#[test]
fn test_uniform_policy_ignores_statistics() {
    let policy = UniformPolicy::new();
    let mut table = StatisticsTable::new();
    let state = ScorePair::new(1, 1);
    record(&mut table, state, 1, 50, 0);

    let mut rng = StdRng::seed_from_u64(9);
    let weights = policy.action_weights(state, &table, 5, &mut rng).unwrap();
    assert_eq!(weights.len(), 5);
    for w in &weights {
        assert_close(*w, 0.2);
    }
}

#[test]
fn test_boxed_policy_delegates() {
    let policy: Box<dyn SelectionPolicy> = Box::new(SmoothedBestPolicy::new(0.0));
    let cloned = policy.clone_box();
    let mut table = StatisticsTable::new();
    let state = ScorePair::new(4, 4);
    record(&mut table, state, 2, 3, 0);
    record(&mut table, state, 1, 0, 3);

    let mut rng = StdRng::seed_from_u64(13);
    assert_eq!(cloned.choose_action(state, &table, 2, &mut rng).unwrap(), 2);
}

#[test]
fn test_learner_uses_its_own_table() {
    let mut learner = DiceLearner::new(2, 0.0);
    let state = ScorePair::new(6, 2);
    learner.record_outcome(&[state.with_dice(1)], &[state.with_dice(2)]);

    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
        assert_eq!(learner.choose_action(state, &mut rng).unwrap(), 1);
    }
}
