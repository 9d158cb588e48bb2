//! End-to-end tests for the training pipeline

use minichess::{
    game::{GameOutcome, Move, NO_CAPTURE_DRAW_LIMIT, Side},
    pipeline::{MetricsObserver, TrainingConfig, TrainingPipeline},
    players::RandomPlayer,
    ports::{Learner, Observer},
    types::StateKey,
    value_learning::{LearningAgent, LearningConfig},
};

/// Records every event so the sequence can be checked
#[derive(Default)]
struct EventLog {
    events: Vec<String>,
    moves: Vec<(Side, StateKey)>,
}

impl Observer for EventLog {
    fn on_training_start(&mut self, total_episodes: usize) -> minichess::Result<()> {
        self.events.push(format!("start {total_episodes}"));
        Ok(())
    }

    fn on_episode_start(&mut self, episode: usize) -> minichess::Result<()> {
        self.events.push(format!("episode {episode}"));
        Ok(())
    }

    fn on_move(
        &mut self,
        _episode: usize,
        _ply: u32,
        side: Side,
        _mv: Move,
        state: &StateKey,
    ) -> minichess::Result<()> {
        self.moves.push((side, state.clone()));
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        _outcome: GameOutcome,
        _plies: u32,
    ) -> minichess::Result<()> {
        self.events.push(format!("end {episode}"));
        Ok(())
    }

    fn on_training_end(&mut self) -> minichess::Result<()> {
        self.events.push("finish".to_string());
        Ok(())
    }
}

#[test]
fn test_single_episode_with_two_learners() {
    let mut white = LearningAgent::new("white", LearningConfig::default()).with_seed(10);
    let mut black = LearningAgent::new("black", LearningConfig::default()).with_seed(11);
    let mut pipeline = TrainingPipeline::new(TrainingConfig::default());

    let report = pipeline.play_episode(0, &mut white, &mut black).unwrap();

    assert!(report.plies >= 1);
    assert!(report.plies <= 200, "episode did not terminate promptly");
    assert!(white.trace().is_empty());
    assert!(black.trace().is_empty());
}

#[test]
fn test_learners_record_only_their_own_states() {
    let mut log = EventLog::default();
    let mut white = LearningAgent::new("white", LearningConfig::default());
    let mut black = LearningAgent::new("black", LearningConfig::default());

    let report = TrainingPipeline::new(TrainingConfig::default().with_episodes(1).with_seed(8))
        .with_observer(Box::new(&mut log))
        .run(&mut white, &mut black)
        .unwrap();

    assert_eq!(log.events, vec!["start 1", "episode 0", "end 0", "finish"]);
    assert_eq!(log.moves.len() as f64, report.mean_plies);

    // Every state the pipeline reported for a side got a value in that
    // side's table and nowhere else, unless the other side reached it too
    for (side, state) in &log.moves {
        let (own, other) = match side {
            Side::White => (&white, &black),
            Side::Black => (&black, &white),
        };
        assert!(own.values().contains(state));
        let reached_by_other = log.moves.iter().any(|(s, k)| s != side && k == state);
        if !reached_by_other {
            assert!(!other.values().contains(state));
        }
    }
}

#[test]
fn test_winner_values_rise_and_loser_values_stay_at_zero() {
    let mut white = LearningAgent::new("white", LearningConfig::default()).with_seed(3);
    let mut black = LearningAgent::new("black", LearningConfig::default()).with_seed(4);
    let mut pipeline = TrainingPipeline::new(TrainingConfig::default());

    for episode in 0..50 {
        let report = pipeline.play_episode(episode, &mut white, &mut black).unwrap();
        let last_mover = if report.plies % 2 == 1 {
            Side::White
        } else {
            Side::Black
        };
        match report.outcome {
            GameOutcome::Win(winner) if winner == last_mover => {
                let agent = match winner {
                    Side::White => &white,
                    Side::Black => &black,
                };
                assert!(agent.value_of(&report.final_state) > 0.0);
            }
            GameOutcome::Draw => {
                assert!(report.plies >= NO_CAPTURE_DRAW_LIMIT);
            }
            _ => {}
        }
    }
}

#[test]
fn test_self_play_run_with_metrics() {
    let mut metrics = MetricsObserver::new();
    let mut white = LearningAgent::new("white", LearningConfig::default());
    let mut black = LearningAgent::new("black", LearningConfig::default());
    let config = TrainingConfig::default().with_episodes(100).with_seed(42);

    let result = TrainingPipeline::new(config)
        .with_observer(Box::new(&mut metrics))
        .run(&mut white, &mut black)
        .unwrap();

    let summary = metrics.summary();
    assert_eq!(result.total_episodes, 100);
    assert_eq!(summary.total_episodes, 100);
    assert_eq!(summary.wins, result.wins);
    assert_eq!(summary.draws, result.draws);
    assert_eq!(summary.losses, result.losses);
    assert!((summary.avg_episode_length - result.mean_plies).abs() < 1e-9);
    assert!(white.values().len() + black.values().len() >= summary.distinct_states);
}

#[test]
fn test_agent_against_random_baseline() {
    let mut agent = LearningAgent::new("agent", LearningConfig::default());
    let mut random = RandomPlayer::new("random");
    let config = TrainingConfig::default().with_episodes(60).with_seed(7);

    let result = TrainingPipeline::new(config)
        .run(&mut agent, &mut random)
        .unwrap();

    assert_eq!(result.wins + result.draws + result.losses, 60);
    assert!(!agent.values().is_empty());
}
