//! Subcommands of the `minichess` binary

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::{adapters::repository_for, game::Side, value_learning::SavedPolicy};

pub mod evaluate;
pub mod inspect;
pub mod play;
pub mod train;

/// Side selector for command-line flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    White,
    Black,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::White => Side::White,
            SideArg::Black => Side::Black,
        }
    }
}

/// Load a saved policy, picking the format from the file extension
pub(crate) fn load_policy(path: &Path) -> Result<SavedPolicy> {
    repository_for(path)
        .load(path)
        .with_context(|| format!("failed to load policy from {}", path.display()))
}

/// Save a policy, picking the format from the file extension
pub(crate) fn save_policy(policy: &SavedPolicy, path: &Path) -> Result<()> {
    repository_for(path)
        .save(policy, path)
        .with_context(|| format!("failed to save policy to {}", path.display()))
}
