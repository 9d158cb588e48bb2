//! Non-learning players
//!
//! These implement [`crate::ports::Policy`] only, so the training pipeline
//! never records states for them or sends them rewards.

pub mod human;
pub mod random;

pub use human::HumanPlayer;
pub use random::RandomPlayer;
