//! Serializable snapshot of a learned policy.

use serde::{Deserialize, Serialize};

use super::{agent::LearningConfig, value_table::ValueTable};
use crate::{Error, Result, game::Side};

/// Training metadata stored alongside the values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Episodes the values were trained on, cumulative across resumed runs
    pub episodes_trained: u64,
    /// Side the agent played while training
    pub side: Option<Side>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
}

/// Learned values plus the settings needed to resume training.
///
/// `values` is a flat mapping from serialized state to value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPolicy {
    pub version: u32,
    pub config: LearningConfig,
    pub metadata: TrainingMetadata,
    pub values: ValueTable,
}

impl SavedPolicy {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn new(config: LearningConfig, metadata: TrainingMetadata, values: ValueTable) -> Self {
        Self {
            version: Self::VERSION,
            config,
            metadata,
            values,
        }
    }

    /// Reject snapshots written by an incompatible format version.
    pub fn check_version(&self) -> Result<()> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedPolicyVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ports::{Learner, Policy},
        types::StateKey,
        value_learning::LearningAgent,
    };

    fn trained_agent() -> LearningAgent {
        let mut agent = LearningAgent::new("white", LearningConfig::default()).with_seed(3);
        agent.record_state(StateKey::parse("R...PK.....p..kr").unwrap());
        agent.record_state(StateKey::parse("R...PK.....pk..r").unwrap());
        agent.backpropagate(1.0);
        agent
    }

    #[test]
    fn test_msgpack_roundtrip_preserves_values() {
        let agent = trained_agent();
        let saved = agent.to_saved(TrainingMetadata {
            episodes_trained: 1,
            side: Some(Side::White),
            seed: Some(3),
        });

        let bytes = rmp_serde::to_vec(&saved).unwrap();
        let loaded: SavedPolicy = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(loaded, saved);

        let restored = LearningAgent::from_saved("restored", loaded).unwrap();
        assert_eq!(restored.values(), agent.values());
        assert_eq!(restored.name(), "restored");
    }

    #[test]
    fn test_json_values_are_a_flat_map() {
        let saved = trained_agent().to_saved(TrainingMetadata::default());
        let json = serde_json::to_value(&saved).unwrap();
        let values = json["values"].as_object().unwrap();
        assert_eq!(values.len(), 2);
        assert!((values["R...PK.....pk..r"].as_f64().unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let mut saved = trained_agent().to_saved(TrainingMetadata::default());
        saved.version = 99;
        let err = LearningAgent::from_saved("x", saved).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedPolicyVersion {
                found: 99,
                expected: 1
            }
        ));
    }

    #[test]
    fn test_load_values_keeps_local_config() {
        let saved = trained_agent().to_saved(TrainingMetadata::default());
        let config = LearningConfig::default().with_exploration_rate(0.0);
        let mut agent = LearningAgent::new("greedy", config);
        agent.load_values(saved.clone()).unwrap();
        assert_eq!(agent.values(), &saved.values);
        assert_eq!(agent.config().exploration_rate, 0.0);
    }
}
