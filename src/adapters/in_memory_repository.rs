//! In-memory policy repository for testing.
//!
//! This adapter provides a pure in-memory implementation of PolicyRepository,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, error::Error, ports::PolicyRepository, value_learning::SavedPolicy};

/// In-memory repository for testing.
///
/// Stores encoded policies in a shared HashMap keyed by path. Policies are
/// encoded with MessagePack on save so a load goes through the same
/// serialization as the file-backed adapter.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use minichess::{
///     adapters::InMemoryRepository,
///     ports::PolicyRepository,
///     value_learning::{LearningAgent, LearningConfig, TrainingMetadata},
/// };
///
/// let repo = InMemoryRepository::new();
/// let agent = LearningAgent::new("white", LearningConfig::default());
///
/// repo.save(&agent.to_saved(TrainingMetadata::default()), Path::new("white"))?;
/// let loaded = repo.load(Path::new("white"))?;
/// assert!(loaded.values.is_empty());
/// # Ok::<(), minichess::Error>(())
/// ```
///
/// # Thread Safety
///
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of policies currently stored
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Remove all stored policies
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Check if a policy exists at the given path
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(path.to_string_lossy().as_ref())
    }
}

impl PolicyRepository for InMemoryRepository {
    fn save(&self, policy: &SavedPolicy, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();

        let bytes = rmp_serde::to_vec_named(policy).map_err(|e| Error::SerializationContext {
            operation: "serialize policy for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedPolicy> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage();

        let bytes = storage.get(&key).ok_or_else(|| Error::Io {
            operation: format!("load policy from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        let policy: SavedPolicy =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize policy from in-memory storage".to_string(),
                message: e.to_string(),
            })?;

        policy.check_version()?;
        Ok(policy)
    }
}
