//! Configuration file for CLI commands
//!
//! A TOML file with an `[agent]` and a `[training]` table. Every field is
//! optional and falls back to its default; command-line flags override
//! whatever the file sets.
//!
//! ```toml
//! [agent]
//! exploration_rate = 0.3
//! learning_rate = 0.2
//! discount = 0.9
//!
//! [training]
//! episodes = 5000
//! seed = 42
//! log_interval = 500
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, pipeline::TrainingConfig, value_learning::LearningConfig};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub agent: LearningConfig,
    pub training: TrainingConfig,
}

impl AppConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config file {path:?}"),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text without validating it.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidConfiguration {
            message: e.to_string(),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        self.agent.validate()?;
        if self.training.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "training.episodes must be > 0".into(),
            });
        }
        Ok(())
    }
}
