//! Multi-select set over record ids

use std::collections::BTreeSet;

/// Set of selected record ids, scoped to the currently active list
///
/// The session owning this set is responsible for keeping it consistent
/// with the active list (see `BrowserSession::reconcile_selection`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<u64>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership of `id`; returns whether it is selected afterwards
    pub fn toggle(&mut self, id: u64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Select-all semantics against the full id set of the active list
    ///
    /// If the selection already equals `all`, clear it; otherwise replace
    /// it with `all`. Calling this twice restores the pre-call value only
    /// when starting from empty or from the full set, which is exactly the
    /// toggle behavior of a header checkbox.
    pub fn toggle_all(&mut self, all: &[u64]) {
        let full: BTreeSet<u64> = all.iter().copied().collect();
        if self.ids == full {
            self.ids.clear();
        } else {
            self.ids = full;
        }
    }

    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.ids.iter().copied().collect()
    }

    /// Drain the selection, returning what was selected
    pub fn take(&mut self) -> Vec<u64> {
        let taken = self.ids();
        self.ids.clear();
        taken
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop every id not accepted by the predicate
    pub fn retain(&mut self, keep: impl Fn(u64) -> bool) {
        self.ids.retain(|&id| keep(id));
    }
}
