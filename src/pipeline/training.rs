//! Training driver: plays episodes between two policies and delivers rewards

use std::{fs::File, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    Error, Result,
    game::{GameOutcome, GameSession, Side},
    ports::{Observer, Policy},
    types::StateKey,
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of episodes to play
    pub episodes: usize,

    /// Random seed; White is seeded with `seed`, Black with `seed + 1`
    pub seed: Option<u64>,

    /// Log progress every this many episodes (0 disables)
    pub log_interval: usize,
}

impl TrainingConfig {
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            seed: None,
            log_interval: 100,
        }
    }
}

/// Summary of one finished episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeReport {
    /// 0-based episode index
    pub episode: usize,
    pub outcome: GameOutcome,
    /// Plies played before the game ended
    pub plies: u32,
    /// Serialized final position
    pub final_state: StateKey,
}

/// Result of a training run, counted from White's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    /// Episodes won by White
    pub wins: usize,

    /// Drawn episodes
    pub draws: usize,

    /// Episodes won by Black
    pub losses: usize,

    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,

    /// Mean number of plies per episode
    pub mean_plies: f64,
}

impl TrainingResult {
    /// Create a result, deriving rates from the counts
    pub fn new(
        total_episodes: usize,
        wins: usize,
        draws: usize,
        losses: usize,
        total_plies: u64,
    ) -> Self {
        let rate = |count: usize| {
            if total_episodes > 0 {
                count as f64 / total_episodes as f64
            } else {
                0.0
            }
        };
        let mean_plies = if total_episodes > 0 {
            total_plies as f64 / total_episodes as f64
        } else {
            0.0
        };

        Self {
            total_episodes,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
            mean_plies,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        Ok(serde_json::from_reader(file)?)
    }
}

#[derive(Debug, Default)]
struct Tally {
    wins: usize,
    draws: usize,
    losses: usize,
    plies: u64,
    episodes: usize,
}

impl Tally {
    fn record(&mut self, report: &EpisodeReport) {
        match report.outcome {
            GameOutcome::Win(Side::White) => self.wins += 1,
            GameOutcome::Win(Side::Black) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.plies += u64::from(report.plies);
        self.episodes += 1;
    }

    fn result(&self) -> TrainingResult {
        TrainingResult::new(
            self.episodes,
            self.wins,
            self.draws,
            self.losses,
            self.plies,
        )
    }
}

/// Runs episodes between a White and a Black policy.
///
/// Participants that expose a [`crate::ports::Learner`] record their
/// post-move states and receive the terminal reward after each episode.
/// With learning disabled ([`TrainingPipeline::frozen`]) no state is
/// recorded and no reward is delivered, which is how saved policies are
/// evaluated.
///
/// # Examples
///
/// ```
/// use minichess::{
///     pipeline::{TrainingConfig, TrainingPipeline},
///     value_learning::{LearningAgent, LearningConfig},
/// };
///
/// let config = TrainingConfig::default().with_episodes(20).with_seed(3);
/// let mut white = LearningAgent::new("white", LearningConfig::default());
/// let mut black = LearningAgent::new("black", LearningConfig::default());
///
/// let result = TrainingPipeline::new(config).run(&mut white, &mut black)?;
/// assert_eq!(result.total_episodes, 20);
/// assert!(!white.values().is_empty());
/// # Ok::<(), minichess::Error>(())
/// ```
pub struct TrainingPipeline<'o> {
    config: TrainingConfig,
    session: GameSession,
    observers: Vec<Box<dyn Observer + 'o>>,
    learn: bool,
}

impl<'o> TrainingPipeline<'o> {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            session: GameSession::new(),
            observers: Vec::new(),
            learn: true,
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer + 'o>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Disable state recording and reward delivery
    pub fn frozen(mut self) -> Self {
        self.learn = false;
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Play `config.episodes` episodes, White moving first in each.
    pub fn run(
        &mut self,
        white: &mut dyn Policy,
        black: &mut dyn Policy,
    ) -> Result<TrainingResult> {
        self.seed_pair(white, black)?;

        let total = self.config.episodes;
        for observer in &mut self.observers {
            observer.on_training_start(total)?;
        }

        let mut tally = Tally::default();
        for episode in 0..total {
            if self.config.log_interval > 0 && episode % self.config.log_interval == 0 {
                info!(
                    episode,
                    total,
                    white_wins = tally.wins,
                    draws = tally.draws,
                    black_wins = tally.losses,
                    "training progress"
                );
            }

            let report = self.play_episode(episode, white, black)?;
            debug!(
                episode,
                outcome = ?report.outcome,
                plies = report.plies,
                "episode finished"
            );
            tally.record(&report);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = tally.result();
        info!(
            episodes = result.total_episodes,
            white_win_rate = result.win_rate,
            draw_rate = result.draw_rate,
            black_win_rate = result.loss_rate,
            "training finished"
        );
        Ok(result)
    }

    /// Play one episode from the initial layout.
    ///
    /// Turns alternate starting with White. The position is checked for a
    /// terminal condition before every turn and after every applied move, and
    /// the mover's learner records each state it produces. When the loop ends the rewards are delivered,
    /// both learners' traces are cleared and the session is reset.
    pub fn play_episode(
        &mut self,
        episode: usize,
        white: &mut dyn Policy,
        black: &mut dyn Policy,
    ) -> Result<EpisodeReport> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        // A previous episode may have been aborted by an error
        reset_learners(white, black);
        self.session.reset();
        loop {
            if self.session.evaluate().is_some() {
                break;
            }

            let side = self.session.to_move();
            let legal = self.session.legal_moves();
            if legal.is_empty() {
                break;
            }

            let player: &mut dyn Policy = match side {
                Side::White => &mut *white,
                Side::Black => &mut *black,
            };
            let mv = player.decide(&legal, self.session.board(), side)?;
            self.session.apply(mv)?;

            let state = self.session.state_key().clone();
            if self.learn
                && let Some(learner) = player.as_learner_mut()
            {
                learner.record_state(state.clone());
            }

            let ply = self.session.plies();
            for observer in &mut self.observers {
                observer.on_move(episode, ply, side, mv, &state)?;
            }

            if self.session.evaluate().is_some() {
                break;
            }
        }

        let outcome = match self.session.evaluate() {
            Some(outcome) => outcome,
            None => {
                warn!(
                    episode,
                    state = %self.session.state_key(),
                    "episode ended without a terminal position, scoring as a draw"
                );
                GameOutcome::Draw
            }
        };

        if self.learn {
            let rewards = outcome.rewards();
            if let Some(learner) = white.as_learner_mut() {
                learner.backpropagate(rewards.white);
            }
            if let Some(learner) = black.as_learner_mut() {
                learner.backpropagate(rewards.black);
            }
        }

        let plies = self.session.plies();
        for observer in &mut self.observers {
            observer.on_episode_end(episode, outcome, plies)?;
        }

        let report = EpisodeReport {
            episode,
            outcome,
            plies,
            final_state: self.session.state_key().clone(),
        };

        reset_learners(white, black);
        self.session.reset();

        Ok(report)
    }

    fn seed_pair(&self, white: &mut dyn Policy, black: &mut dyn Policy) -> Result<()> {
        if let Some(seed) = self.config.seed {
            white.set_rng_seed(seed)?;
            black.set_rng_seed(seed.wrapping_add(1))?;
        }
        Ok(())
    }
}

fn reset_learners(white: &mut dyn Policy, black: &mut dyn Policy) {
    if let Some(learner) = white.as_learner_mut() {
        learner.reset();
    }
    if let Some(learner) = black.as_learner_mut() {
        learner.reset();
    }
}
