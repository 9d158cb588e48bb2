//! Ports (trait boundaries) for players, observers and persistence.
//!
//! The game engine and training pipeline depend only on these traits.
//! Concrete players live in [`crate::value_learning`] and [`crate::players`],
//! storage backends in [`crate::adapters`].

pub mod observer;
pub mod policy;
pub mod repository;

pub use observer::Observer;
pub use policy::{Learner, Policy};
pub use repository::PolicyRepository;
