//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

use std::path::Path;

use crate::ports::PolicyRepository;

pub mod in_memory_repository;
pub mod json_repository;
pub mod msgpack_repository;

pub use in_memory_repository::InMemoryRepository;
pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;

/// Pick a file repository from the path's extension: `.json` selects JSON,
/// anything else MessagePack.
pub fn repository_for(path: &Path) -> Box<dyn PolicyRepository> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Box::new(JsonRepository)
    } else {
        Box::new(MsgPackRepository)
    }
}
