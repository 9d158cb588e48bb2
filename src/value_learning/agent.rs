//! Epsilon-greedy value-learning agent
//!
//! The agent scores each legal move by the learned value of the board it
//! would produce, and after every episode walks its trace backwards to pull
//! those values toward the terminal reward.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{
    serialization::{SavedPolicy, TrainingMetadata},
    value_table::ValueTable,
};
use crate::{
    Error, Result,
    game::{Board, Move, Side},
    ports::{Learner, Policy},
    types::StateKey,
};

/// Hyperparameters of a [`LearningAgent`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Probability ε of playing a uniformly random move
    pub exploration_rate: f64,
    /// Step size α of each value update
    pub learning_rate: f64,
    /// Factor γ applied to the updated value before it becomes the target
    /// for the previous state
    pub discount: f64,
}

impl LearningConfig {
    pub fn with_exploration_rate(mut self, exploration_rate: f64) -> Self {
        self.exploration_rate = exploration_rate;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Check that every rate lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("exploration_rate", self.exploration_rate),
            ("learning_rate", self.learning_rate),
            ("discount", self.discount),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be in [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            exploration_rate: 0.3,
            learning_rate: 0.2,
            discount: 0.9,
        }
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular learner over post-move board states.
///
/// The value table lives as long as the agent and persists across episodes;
/// the episode trace is cleared by [`Learner::reset`].
///
/// # Examples
///
/// ```
/// use minichess::{
///     game::{Board, Side, legal_moves},
///     ports::{Learner, Policy},
///     value_learning::{LearningAgent, LearningConfig},
/// };
///
/// let mut agent = LearningAgent::new("white", LearningConfig::default()).with_seed(7);
/// let board = Board::initial();
/// let legal = legal_moves(&board, Side::White);
/// let chosen = agent.decide(&legal, &board, Side::White)?;
/// assert!(legal.contains(&chosen));
///
/// agent.record_state(board.with_move(chosen).state_key());
/// agent.backpropagate(1.0);
/// assert!(agent.value_of(&board.with_move(chosen).state_key()) > 0.0);
/// # Ok::<(), minichess::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LearningAgent {
    name: String,
    config: LearningConfig,
    values: ValueTable,
    trace: Vec<StateKey>,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl LearningAgent {
    /// Create an agent with an empty value table
    pub fn new(name: impl Into<String>, config: LearningConfig) -> Self {
        Self {
            name: name.into(),
            config,
            values: ValueTable::new(),
            trace: Vec::new(),
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Restore an agent from a saved policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPolicyVersion`] for unknown save formats.
    pub fn from_saved(name: impl Into<String>, saved: SavedPolicy) -> Result<Self> {
        saved.check_version()?;
        let mut agent = Self::new(name, saved.config);
        agent.values = saved.values;
        Ok(agent)
    }

    /// Snapshot the learned values for persistence
    pub fn to_saved(&self, metadata: TrainingMetadata) -> SavedPolicy {
        SavedPolicy::new(self.config, metadata, self.values.clone())
    }

    /// Replace the value table with a saved one, keeping this agent's
    /// hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPolicyVersion`] for unknown save formats.
    pub fn load_values(&mut self, saved: SavedPolicy) -> Result<()> {
        saved.check_version()?;
        self.values = saved.values;
        Ok(())
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Change ε, e.g. to play greedily after training
    pub fn set_exploration_rate(&mut self, exploration_rate: f64) {
        self.config.exploration_rate = exploration_rate;
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    /// Learned value of a state (0 if unseen)
    pub fn value_of(&self, state: &StateKey) -> f64 {
        self.values.get(state)
    }

    /// Legal moves whose resulting board has the highest value.
    ///
    /// Each move is simulated on a copy of `board`; the caller's board is
    /// never modified.
    pub fn best_moves(&self, legal_moves: &[Move], board: &Board) -> Vec<Move> {
        let mut best_value = f64::NEG_INFINITY;
        let mut best = Vec::new();
        for &mv in legal_moves {
            let value = self.values.get(&board.with_move(mv).state_key());
            if value > best_value {
                best_value = value;
                best.clear();
                best.push(mv);
            } else if value == best_value {
                best.push(mv);
            }
        }
        best
    }
}

impl Policy for LearningAgent {
    fn decide(&mut self, legal_moves: &[Move], board: &Board, _side: Side) -> Result<Move> {
        if legal_moves.is_empty() {
            return Err(Error::NoLegalMoves);
        }

        if self.rng.random::<f64>() < self.config.exploration_rate {
            // Explore: random action
            return legal_moves
                .choose(&mut self.rng)
                .copied()
                .ok_or(Error::NoLegalMoves);
        }

        // Exploit: uniform among the maximizers
        let best = self.best_moves(legal_moves, board);
        best.choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoLegalMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        Ok(())
    }

    fn as_learner_mut(&mut self) -> Option<&mut dyn Learner> {
        Some(self)
    }

    fn as_learner(&self) -> Option<&dyn Learner> {
        Some(self)
    }
}

impl Learner for LearningAgent {
    fn record_state(&mut self, state: StateKey) {
        self.trace.push(state);
    }

    /// Walk the trace from the most recent state back to the first.
    ///
    /// Each state moves toward the running target, and the target for the
    /// previous state becomes the *updated* value times γ. Credit therefore
    /// decays by a factor of α·γ per step rather than γ alone; this is not
    /// textbook TD(0) and is kept as is.
    fn backpropagate(&mut self, final_reward: f64) {
        let mut target = final_reward;
        for state in self.trace.iter().rev() {
            let updated = self
                .values
                .update_toward(state, target, self.config.learning_rate);
            target = updated * self.config.discount;
        }
        trace!(
            agent = %self.name,
            states = self.trace.len(),
            final_reward,
            table_size = self.values.len(),
            "reward propagated"
        );
    }

    fn reset(&mut self) {
        self.trace.clear();
    }

    fn trace(&self) -> &[StateKey] {
        &self.trace
    }
}
