//! Tabular value learning over post-move board states
//!
//! ## Action selection
//!
//! With probability ε the agent plays a uniformly random legal move.
//! Otherwise it simulates every legal move on a copy of the board, looks up
//! the value of each resulting state (0 if unseen) and picks uniformly among
//! the moves that reach the highest value.
//!
//! ## Learning
//!
//! The agent records the state after each of its own moves. When the episode
//! ends the terminal reward is propagated backwards through that trace:
//!
//! | Step | Update |
//! |------|--------|
//! | value | V(s) ← V(s) + α (target − V(s)) |
//! | next target | target ← V(s) · γ |
//!
//! Values persist across episodes; the trace does not.
//!
//! ## Usage Example
//!
//! ```
//! use minichess::value_learning::{LearningAgent, LearningConfig};
//!
//! let agent = LearningAgent::new(
//!     "white",
//!     LearningConfig::default()
//!         .with_exploration_rate(0.3) // ε
//!         .with_learning_rate(0.2) // α
//!         .with_discount(0.9), // γ
//! );
//! assert!(agent.values().is_empty());
//! ```

pub mod agent;
pub mod serialization;
pub mod value_table;

pub use agent::{LearningAgent, LearningConfig};
pub use serialization::{SavedPolicy, TrainingMetadata};
pub use value_table::{DEFAULT_VALUE, ValueTable};
