//! MiniChess: a 4x4 chess variant with a self-play value-learning agent
//!
//! This crate provides:
//! - The rules engine: board, move generation and a game session with
//!   terminal detection (king capture, no legal move, 50-ply no-capture draw)
//! - A tabular epsilon-greedy learning agent with backward reward propagation
//! - A training pipeline driving two policies through repeated episodes
//! - Policy persistence in MessagePack or JSON
//! - Human and random players, and the `minichess` command-line interface
//!
//! # Examples
//!
//! ```
//! use minichess::{
//!     pipeline::{TrainingConfig, TrainingPipeline},
//!     value_learning::{LearningAgent, LearningConfig},
//! };
//!
//! let mut white = LearningAgent::new("white", LearningConfig::default());
//! let mut black = LearningAgent::new("black", LearningConfig::default());
//! let config = TrainingConfig::default().with_episodes(50).with_seed(1);
//!
//! let result = TrainingPipeline::new(config).run(&mut white, &mut black)?;
//! assert_eq!(result.wins + result.draws + result.losses, 50);
//! # Ok::<(), minichess::Error>(())
//! ```

pub mod adapters;
pub mod cli;
pub mod error;
pub mod game;
pub mod pipeline;
pub mod players;
pub mod ports;
pub mod types;
pub mod value_learning;

pub use error::{Error, Result};
pub use game::{Board, GameOutcome, GameSession, Move, Side};
pub use types::StateKey;
