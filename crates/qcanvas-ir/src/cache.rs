//! Memo table of computed states, keyed by column.

use rustc_hash::FxHashMap;

use crate::statevector::Statevector;

/// Cached states. An entry for column `c` is only valid while no wire is dirty
/// and no gate at a column `< c` has changed; the circuit enforces this by
/// calling [`StateCache::clear`] and [`StateCache::clear_from`].
#[derive(Debug, Clone, Default)]
pub struct StateCache {
    states: FxHashMap<usize, Statevector>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: usize) -> Option<&Statevector> {
        self.states.get(&column)
    }

    pub fn insert(&mut self, column: usize, state: Statevector) {
        self.states.insert(column, state);
    }

    /// Highest cached column not above `column`.
    pub fn nearest_at_or_below(&self, column: usize) -> Option<usize> {
        self.states.keys().copied().filter(|&c| c <= column).max()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Drop the entries for `column` and everything after it.
    pub fn clear_from(&mut self, column: usize) {
        self.states.retain(|&c, _| c < column);
    }

    pub fn contains(&self, column: usize) -> bool {
        self.states.contains_key(&column)
    }
}
