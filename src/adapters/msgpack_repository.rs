//! MessagePack implementation of the policy repository.
//!
//! This adapter implements the PolicyRepository port using rmp_serde for
//! compact binary serialization.

use std::{fs::File, io::BufWriter, path::Path};

use crate::{Result, error::Error, ports::PolicyRepository, value_learning::SavedPolicy};

/// MessagePack-based policy repository.
///
/// The default on-disk format. Keys are stored as strings and values as
/// 64-bit floats, so a round-trip is exact.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use minichess::{
///     adapters::MsgPackRepository,
///     ports::PolicyRepository,
///     value_learning::{LearningAgent, LearningConfig, TrainingMetadata},
/// };
///
/// let repo = MsgPackRepository;
/// let agent = LearningAgent::new("white", LearningConfig::default());
///
/// repo.save(&agent.to_saved(TrainingMetadata::default()), Path::new("white.msgpack"))?;
/// let loaded = repo.load(Path::new("white.msgpack"))?;
/// # Ok::<(), minichess::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl PolicyRepository for MsgPackRepository {
    fn save(&self, policy: &SavedPolicy, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write_named(&mut writer, policy).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize policy to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.into_inner().map_err(|e| Error::Io {
            operation: format!("flush file {path:?}"),
            source: e.into_error(),
        })?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedPolicy> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let policy: SavedPolicy =
            rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
                operation: "deserialize policy from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        policy.check_version()?;
        Ok(policy)
    }
}
