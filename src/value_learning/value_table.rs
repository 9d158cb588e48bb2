//! Value table mapping serialized board states to learned values

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::StateKey;

/// Value assumed for states the table has never stored
pub const DEFAULT_VALUE: f64 = 0.0;

/// State values keyed by [`StateKey`].
///
/// A value estimates the terminal reward obtainable after reaching the
/// state. Entries are created lazily; lookups of unseen states return
/// [`DEFAULT_VALUE`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueTable {
    values: HashMap<String, f64>,
}

impl ValueTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of a state, or [`DEFAULT_VALUE`] if unseen
    pub fn get(&self, state: &StateKey) -> f64 {
        self.values
            .get(state.as_str())
            .copied()
            .unwrap_or(DEFAULT_VALUE)
    }

    /// Whether the table holds an explicit entry for `state`
    pub fn contains(&self, state: &StateKey) -> bool {
        self.values.contains_key(state.as_str())
    }

    /// Set the value of a state
    pub fn set(&mut self, state: &StateKey, value: f64) {
        self.values.insert(state.as_str().to_string(), value);
    }

    /// Move the stored value a fraction `learning_rate` of the way toward `target`.
    ///
    /// V(s) ← V(s) + α (target − V(s))
    ///
    /// Returns the updated value.
    pub fn update_toward(&mut self, state: &StateKey, target: f64, learning_rate: f64) -> f64 {
        let current = self.get(state);
        let updated = current + learning_rate * (target - current);
        self.set(state, updated);
        updated
    }

    /// Number of stored states
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over stored (state, value) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(state, &value)| (state.as_str(), value))
    }

    /// The `n` highest-valued states, best first; ties ordered by key.
    pub fn top(&self, n: usize) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|(ka, va), (kb, vb)| vb.total_cmp(va).then_with(|| ka.cmp(kb)));
        entries.truncate(n);
        entries
    }
}
