//! Value learning: reward propagation and epsilon-greedy selection

use std::collections::HashMap;

use minichess::{
    game::{Board, Side, legal_moves},
    ports::{Learner, Policy},
    types::StateKey,
    value_learning::{LearningAgent, LearningConfig},
};

fn key(s: &str) -> StateKey {
    StateKey::parse(s).unwrap()
}

#[test]
fn test_backpropagation_matches_iterative_rule() {
    let config = LearningConfig::default();
    let mut agent = LearningAgent::new("agent", config);
    let trace = [
        key("R...PK.....p..kr"),
        key("R...PK....p...kr"),
        key("R...P.K...p...kr"),
    ];
    for state in &trace {
        agent.record_state(state.clone());
    }
    agent.backpropagate(1.0);

    let mut expected = HashMap::new();
    let mut target = 1.0;
    for state in trace.iter().rev() {
        let current: f64 = *expected.get(state).unwrap_or(&0.0);
        let updated = current + config.learning_rate * (target - current);
        expected.insert(state.clone(), updated);
        target = updated * config.discount;
    }

    for state in &trace {
        assert_eq!(agent.value_of(state), expected[state]);
    }
    assert!((agent.value_of(&trace[2]) - 0.2).abs() < 1e-12);
    assert!((agent.value_of(&trace[1]) - 0.036).abs() < 1e-12);
    assert!((agent.value_of(&trace[0]) - 0.00648).abs() < 1e-12);
}

#[test]
fn test_full_exploration_is_uniform() {
    let board = Board::initial();
    let legal = legal_moves(&board, Side::White);
    let mut agent =
        LearningAgent::new("explorer", LearningConfig::default().with_exploration_rate(1.0))
            .with_seed(2024);

    // Skew the table so a greedy pick would always be the same move
    agent.record_state(board.with_move(legal[0]).state_key());
    agent.backpropagate(1.0);
    agent.reset();

    let samples = 8000;
    let mut counts = vec![0usize; legal.len()];
    for _ in 0..samples {
        let chosen = agent.decide(&legal, &board, Side::White).unwrap();
        let idx = legal.iter().position(|m| *m == chosen).unwrap();
        counts[idx] += 1;
    }

    let expected = samples / legal.len();
    for count in counts {
        assert!(
            count.abs_diff(expected) < 200,
            "count {count} too far from {expected}"
        );
    }
}

#[test]
fn test_greedy_only_picks_maximal_successors() {
    let board = Board::initial();
    let legal = legal_moves(&board, Side::White);
    let mut agent =
        LearningAgent::new("greedy", LearningConfig::default().with_exploration_rate(0.0))
            .with_seed(5);

    // Two moves share the highest value, one is lower, one is unseen
    for (idx, reward) in [(0, 1.0), (3, 1.0), (1, 0.5)] {
        agent.record_state(board.with_move(legal[idx]).state_key());
        agent.backpropagate(reward);
        agent.reset();
    }

    let maximal = agent.best_moves(&legal, &board);
    assert_eq!(maximal, vec![legal[0], legal[3]]);

    let mut seen = [false; 4];
    for _ in 0..200 {
        let chosen = agent.decide(&legal, &board, Side::White).unwrap();
        assert!(maximal.contains(&chosen));
        seen[legal.iter().position(|m| *m == chosen).unwrap()] = true;
    }
    assert!(seen[0] && seen[3], "ties are broken randomly");
}

#[test]
fn test_unseen_states_default_to_zero() {
    let agent = LearningAgent::new("fresh", LearningConfig::default());
    assert_eq!(agent.value_of(&Board::initial().state_key()), 0.0);
    assert!(agent.values().is_empty());
}

#[test]
fn test_deciding_never_mutates_the_board() {
    let board = Board::initial();
    let legal = legal_moves(&board, Side::White);
    let mut agent = LearningAgent::new("agent", LearningConfig::default()).with_seed(1);
    for _ in 0..50 {
        agent.decide(&legal, &board, Side::White).unwrap();
    }
    assert_eq!(board, Board::initial());
    assert!(agent.trace().is_empty());
}
