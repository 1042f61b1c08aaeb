//! Batch-scoped uniqueness tracking for generators that must not repeat.

use std::collections::{HashMap, HashSet};

/// Values already issued, grouped by generator tag.
///
/// Owned by whoever drives a batch; dropping it (or calling [`UniqueValues::clear`])
/// releases every claimed value.
#[derive(Debug, Default)]
pub struct UniqueValues {
    issued: HashMap<String, HashSet<String>>,
}

impl UniqueValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` under `scope`. Returns false if it was already issued.
    pub fn claim(&mut self, scope: &str, value: &str) -> bool {
        let values = self.issued.entry(scope.to_string()).or_default();
        if values.contains(value) {
            return false;
        }
        values.insert(value.to_string());
        true
    }

    pub fn contains(&self, scope: &str, value: &str) -> bool {
        self.issued
            .get(scope)
            .map(|values| values.contains(value))
            .unwrap_or(false)
    }

    /// Total number of issued values across scopes.
    pub fn len(&self) -> usize {
        self.issued.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.issued.clear();
    }
}
