//! Row selection state.

use std::collections::HashSet;
use std::hash::Hash;

/// How many rows may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Selection is switched off.
    #[default]
    None,
    /// At most one row.
    Single,
    /// Any number of rows.
    Multi,
}

impl SelectionMode {
    /// Mode for the grid's `enableRowSelection` / `enableMultiRowSelection` pair.
    pub fn from_flags(enabled: bool, multi: bool) -> Self {
        match (enabled, multi) {
            (false, _) => Self::None,
            (true, false) => Self::Single,
            (true, true) => Self::Multi,
        }
    }
}

/// Selected row keys.
///
/// Order is not tracked; callers that need row order filter their own
/// ordered key list through [`Selection::is_selected`].
#[derive(Debug, Clone)]
pub struct Selection<K: Clone + Eq + Hash> {
    mode: SelectionMode,
    selected: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self::new(SelectionMode::None)
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    pub fn single() -> Self {
        Self::new(SelectionMode::Single)
    }

    pub fn multi() -> Self {
        Self::new(SelectionMode::Multi)
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Flip `key`. Returns `true` if the selection changed.
    pub fn toggle(&mut self, key: K) -> bool {
        let selected = !self.selected.contains(&key);
        self.set(key, selected)
    }

    /// Select or deselect `key`. Returns `true` if the selection changed.
    ///
    /// In single mode selecting a key replaces the previous one.
    pub fn set(&mut self, key: K, selected: bool) -> bool {
        match (self.mode, selected) {
            (SelectionMode::None, _) => false,
            (_, false) => self.selected.remove(&key),
            (SelectionMode::Single, true) => {
                if self.selected.len() == 1 && self.selected.contains(&key) {
                    return false;
                }
                self.selected.clear();
                self.selected.insert(key)
            }
            (SelectionMode::Multi, true) => self.selected.insert(key),
        }
    }

    /// Select every key (multi mode only). Returns `true` if anything changed.
    pub fn select_all(&mut self, keys: impl IntoIterator<Item = K>) -> bool {
        if self.mode != SelectionMode::Multi {
            return false;
        }
        let before = self.selected.len();
        self.selected.extend(keys);
        self.selected.len() != before
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop keys for which `keep` returns `false`.
    pub fn retain(&mut self, keep: impl FnMut(&K) -> bool) {
        self.selected.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selected(&self) -> impl Iterator<Item = &K> {
        self.selected.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_mode_ignores_everything() {
        let mut selection = Selection::<u32>::default();
        assert!(!selection.toggle(1));
        assert!(!selection.select_all([1, 2]));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_single_mode_replaces() {
        let mut selection = Selection::single();
        assert!(selection.toggle(1));
        assert!(selection.toggle(2));
        assert!(!selection.is_selected(&1));
        assert!(selection.is_selected(&2));
        assert!(!selection.set(2, true));
        assert!(selection.toggle(2));
        assert!(selection.is_empty());
        assert!(!selection.select_all([1, 2]));
    }

    #[test]
    fn test_multi_mode() {
        let mut selection = Selection::multi();
        selection.toggle("a");
        selection.toggle("b");
        assert_eq!(selection.len(), 2);
        assert!(selection.toggle("a"));
        assert!(!selection.is_selected(&"a"));
        assert!(selection.select_all(["a", "b", "c"]));
        assert!(!selection.select_all(["a"]));
        selection.retain(|k| *k != "c");
        assert_eq!(selection.len(), 2);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_mode_from_flags() {
        assert_eq!(SelectionMode::from_flags(false, true), SelectionMode::None);
        assert_eq!(SelectionMode::from_flags(true, false), SelectionMode::Single);
        assert_eq!(SelectionMode::from_flags(true, true), SelectionMode::Multi);
    }
}
