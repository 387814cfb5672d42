//! Colour locks.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, btree_set};
use std::iter::Copied;

/// Roster positions whose player has explicitly chosen a colour.
///
/// Indices are positional, so the set has to follow the roster whenever a
/// player is removed: see [`ColorLocks::remove_and_shift`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorLocks {
    indices: BTreeSet<usize>,
}

impl ColorLocks {
    /// Create an empty lock set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the colour of the player at `index`. Locking twice is a no-op.
    pub fn lock(&mut self, index: usize) {
        self.indices.insert(index);
    }

    /// Check whether the player at `index` has locked a colour.
    #[must_use]
    pub fn is_locked(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Forget `index` and shift every higher index down by one.
    ///
    /// Must be called whenever the player at `index` leaves the roster.
    pub fn remove_and_shift(&mut self, index: usize) {
        self.indices = self
            .indices
            .iter()
            .filter(|&&i| i != index)
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();
    }

    /// Locked indices in ascending order.
    pub fn iter(&self) -> Copied<btree_set::Iter<'_, usize>> {
        self.indices.iter().copied()
    }

    /// Number of locked players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no player has locked a colour.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<'a> IntoIterator for &'a ColorLocks {
    type Item = usize;
    type IntoIter = Copied<btree_set::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<usize> for ColorLocks {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_is_idempotent() {
        let mut locks = ColorLocks::new();
        locks.lock(1);
        locks.lock(1);
        assert_eq!(locks.len(), 1);
        assert!(locks.is_locked(1));
        assert!(!locks.is_locked(0));
    }

    #[test]
    fn test_remove_shifts_higher_indices() {
        let mut locks: ColorLocks = [1, 2].into_iter().collect();
        locks.remove_and_shift(0);
        assert_eq!(locks.iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_remove_drops_own_entry() {
        let mut locks: ColorLocks = [0, 1, 3].into_iter().collect();
        locks.remove_and_shift(1);
        assert_eq!(locks.iter().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_remove_keeps_lower_indices() {
        let mut locks: ColorLocks = [0].into_iter().collect();
        locks.remove_and_shift(2);
        assert_eq!(locks.iter().collect::<Vec<_>>(), vec![0]);
    }
}
