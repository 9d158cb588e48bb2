//! JSON implementation of the policy repository.
//!
//! Human-readable alternative to MessagePack; the value table appears as a
//! flat object from state key to value.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::PolicyRepository, value_learning::SavedPolicy};

/// JSON-based policy repository.
///
/// `serde_json` prints floats with the shortest representation that parses
/// back to the same `f64`, so values round-trip exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl JsonRepository {
    pub fn new() -> Self {
        Self
    }
}

impl PolicyRepository for JsonRepository {
    fn save(&self, policy: &SavedPolicy, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, policy).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize policy to JSON".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })
    }

    fn load(&self, path: &Path) -> Result<SavedPolicy> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let policy: SavedPolicy = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize policy from JSON".to_string(),
                message: e.to_string(),
            }
        })?;

        policy.check_version()?;
        Ok(policy)
    }
}
