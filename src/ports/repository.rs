//! Repository port for policy persistence.

use std::path::Path;

use crate::{Result, value_learning::SavedPolicy};

/// Port for persisting and loading learned value tables.
///
/// Implementations must round-trip keys exactly and values without loss of
/// precision. Failures are reported to the caller; no implementation falls
/// back to an empty table.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use minichess::{adapters::MsgPackRepository, ports::PolicyRepository};
///
/// let repo = MsgPackRepository::new();
/// let saved = repo.load(Path::new("white.msgpack"))?;
/// println!("{} states learned", saved.values.len());
/// # Ok::<(), minichess::Error>(())
/// ```
pub trait PolicyRepository {
    /// Save a policy to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization fails.
    fn save(&self, policy: &SavedPolicy, path: &Path) -> Result<()>;

    /// Load a policy from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist, cannot be read, or
    /// holds malformed or unsupported data.
    fn load(&self, path: &Path) -> Result<SavedPolicy>;
}
