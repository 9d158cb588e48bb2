//! Training and evaluation pipeline
//!
//! This module provides:
//! - The episode loop driving two policies through a game session
//! - Reward delivery to learning participants
//! - Observers recording progress and metrics during training

pub mod observers;
pub mod training;

pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver};
pub use training::{EpisodeReport, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Learner, Observer, Policy};
