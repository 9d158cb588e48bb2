//! Observer implementations for training pipelines
//!
//! Observers collect data during training without coupling the training
//! loop to specific output formats.

use std::collections::HashSet;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::{GameOutcome, Move, Side},
    ports::Observer,
    types::StateKey,
};

/// Progress bar observer - shows training progress with White's record
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("W:{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome, _plies: u32) -> Result<()> {
        match outcome {
            GameOutcome::Win(Side::White) => self.wins += 1,
            GameOutcome::Win(Side::Black) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - tracks outcomes, episode lengths and state coverage.
///
/// Pass it by mutable reference to keep reading it after the run:
///
/// ```
/// use minichess::{
///     pipeline::{MetricsObserver, TrainingConfig, TrainingPipeline},
///     players::RandomPlayer,
/// };
///
/// let mut metrics = MetricsObserver::new();
/// let config = TrainingConfig::default().with_episodes(10).with_seed(5);
/// TrainingPipeline::new(config)
///     .with_observer(Box::new(&mut metrics))
///     .run(&mut RandomPlayer::new("w"), &mut RandomPlayer::new("b"))?;
///
/// assert_eq!(metrics.summary().total_episodes, 10);
/// # Ok::<(), minichess::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct MetricsObserver {
    wins: usize,
    draws: usize,
    losses: usize,
    episode_lengths: Vec<u32>,
    states_seen: HashSet<StateKey>,
    moves_by_side: [usize; 2],
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn total(&self) -> usize {
        self.episode_lengths.len()
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            count as f64 / self.total() as f64
        }
    }

    /// White's win rate so far
    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Black's win rate so far
    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    /// Mean plies per episode
    pub fn avg_episode_length(&self) -> f64 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.episode_lengths.iter().map(|&p| f64::from(p)).sum::<f64>()
                / self.episode_lengths.len() as f64
        }
    }

    /// Number of distinct post-move positions reached
    pub fn distinct_states(&self) -> usize {
        self.states_seen.len()
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total(),
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            win_rate: self.win_rate(),
            draw_rate: self.draw_rate(),
            loss_rate: self.loss_rate(),
            avg_episode_length: self.avg_episode_length(),
            shortest_episode: self.episode_lengths.iter().copied().min(),
            longest_episode: self.episode_lengths.iter().copied().max(),
            distinct_states: self.distinct_states(),
            white_moves: self.moves_by_side[0],
            black_moves: self.moves_by_side[1],
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_episode_length: f64,
    pub shortest_episode: Option<u32>,
    pub longest_episode: Option<u32>,
    pub distinct_states: usize,
    pub white_moves: usize,
    pub black_moves: usize,
}

impl Observer for MetricsObserver {
    fn on_move(
        &mut self,
        _episode: usize,
        _ply: u32,
        side: Side,
        _mv: Move,
        state: &StateKey,
    ) -> Result<()> {
        let idx = match side {
            Side::White => 0,
            Side::Black => 1,
        };
        self.moves_by_side[idx] += 1;
        if !self.states_seen.contains(state) {
            self.states_seen.insert(state.clone());
        }
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, outcome: GameOutcome, plies: u32) -> Result<()> {
        match outcome {
            GameOutcome::Win(Side::White) => self.wins += 1,
            GameOutcome::Win(Side::Black) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.episode_lengths.push(plies);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, legal_moves};

    #[test]
    fn test_metrics_observer() {
        let mut observer = MetricsObserver::new();
        let board = Board::initial();
        let mv = legal_moves(&board, Side::White)[0];
        let state = board.with_move(mv).state_key();

        observer.on_move(0, 1, Side::White, mv, &state).unwrap();
        observer.on_move(0, 2, Side::Black, mv, &state).unwrap();
        observer
            .on_episode_end(0, GameOutcome::Win(Side::White), 12)
            .unwrap();
        observer.on_episode_end(1, GameOutcome::Draw, 50).unwrap();

        let summary = observer.summary();
        assert_eq!(summary.total_episodes, 2);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.win_rate, 0.5);
        assert_eq!(summary.avg_episode_length, 31.0);
        assert_eq!(summary.shortest_episode, Some(12));
        assert_eq!(summary.longest_episode, Some(50));
        assert_eq!(summary.distinct_states, 1);
        assert_eq!(summary.white_moves, 1);
        assert_eq!(summary.black_moves, 1);
    }

    #[test]
    fn test_empty_metrics() {
        let summary = MetricsObserver::new().summary();
        assert_eq!(summary.total_episodes, 0);
        assert_eq!(summary.win_rate, 0.0);
        assert_eq!(summary.shortest_episode, None);
    }

    #[test]
    fn test_progress_observer_counts() {
        let mut observer = ProgressObserver::new();
        observer
            .on_episode_end(0, GameOutcome::Win(Side::Black), 7)
            .unwrap();
        observer.on_episode_end(1, GameOutcome::Draw, 50).unwrap();
        assert_eq!(observer.message(), "W:0 D:1 L:1");
    }
}
