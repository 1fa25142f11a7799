//! Row selection.
//!
//! The manager stores identities only. The table tells it which rows exist
//! and which are disabled; a disabled row never enters the set.

use std::collections::BTreeSet;

/// Select-all state over the enabled rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllSelected {
    /// No enabled row is selected.
    None,
    /// Some but not all enabled rows are selected.
    Some,
    /// Every enabled row is selected.
    All,
}

/// Single or multiple selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// At most one row; radio buttons.
    Single {
        /// Selecting the selected row clears the selection.
        deselect: bool,
    },
    /// Any number of rows; checkboxes and select-all.
    Multi,
}

/// Selected row identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionManager {
    mode: SelectionMode,
    selected: BTreeSet<String>,
}

impl SelectionManager {
    /// An empty selection.
    pub const fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
        }
    }

    /// Selection mode.
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle one row. Returns whether the selection changed.
    pub fn toggle(&mut self, id: &str, disabled: bool) -> bool {
        if disabled {
            return false;
        }
        match self.mode {
            SelectionMode::Single { deselect } => {
                if self.selected.contains(id) {
                    if deselect {
                        self.selected.clear();
                        return true;
                    }
                    return false;
                }
                self.selected.clear();
                self.selected.insert(id.to_string());
                true
            }
            SelectionMode::Multi => {
                if !self.selected.remove(id) {
                    self.selected.insert(id.to_string());
                }
                true
            }
        }
    }

    /// Select-all state over `enabled`.
    pub fn all_state<'a>(&self, enabled: impl IntoIterator<Item = &'a str>) -> AllSelected {
        let mut total = 0usize;
        let mut selected = 0usize;
        for id in enabled {
            total += 1;
            if self.selected.contains(id) {
                selected += 1;
            }
        }
        if selected == 0 {
            AllSelected::None
        } else if selected == total {
            AllSelected::All
        } else {
            AllSelected::Some
        }
    }

    /// Select every enabled row, or clear them all when all were selected.
    /// Only available in multi mode. Returns whether the selection changed.
    pub fn toggle_all(&mut self, enabled: &[&str]) -> bool {
        if self.mode != SelectionMode::Multi || enabled.is_empty() {
            return false;
        }
        if self.all_state(enabled.iter().copied()) == AllSelected::All {
            for id in enabled {
                self.selected.remove(*id);
            }
        } else {
            self.selected.extend(enabled.iter().map(|s| (*s).to_string()));
        }
        true
    }

    /// Replace the selection. `disabled` filters out ids of disabled rows;
    /// single mode keeps the first remaining id.
    pub fn set<I, F>(&mut self, ids: I, disabled: F)
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> bool,
    {
        let mut ids = ids.into_iter().filter(|id| !disabled(id.as_str()));
        self.selected = match self.mode {
            SelectionMode::Single { .. } => ids.next().into_iter().collect(),
            SelectionMode::Multi => ids.collect(),
        };
    }

    /// Drop ids for which `disabled` holds.
    pub fn drop_disabled<F: Fn(&str) -> bool>(&mut self, disabled: F) {
        self.selected.retain(|id| !disabled(id.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode_policy() {
        let mut s = SelectionManager::new(SelectionMode::Single { deselect: false });
        assert!(!s.toggle("a", true));
        assert!(s.is_empty());
        assert!(s.toggle("b", false));
        assert!(!s.toggle("b", false));
        assert_eq!(s.ids().collect::<Vec<_>>(), ["b"]);
        assert!(s.toggle("c", false));
        assert_eq!(s.ids().collect::<Vec<_>>(), ["c"]);
    }

    #[test]
    fn test_single_mode_deselect_flag() {
        let mut s = SelectionManager::new(SelectionMode::Single { deselect: true });
        s.toggle("b", false);
        assert!(s.toggle("b", false));
        assert!(s.is_empty());
    }

    #[test]
    fn test_single_mode_has_no_toggle_all() {
        let mut s = SelectionManager::new(SelectionMode::Single { deselect: false });
        assert!(!s.toggle_all(&["a", "b"]));
        assert!(s.is_empty());
    }

    #[test]
    fn test_tri_state() {
        let mut s = SelectionManager::new(SelectionMode::Multi);
        let enabled = ["a", "b"];
        assert_eq!(s.all_state(enabled), AllSelected::None);
        s.toggle("a", false);
        assert_eq!(s.all_state(enabled), AllSelected::Some);
        s.toggle("b", false);
        assert_eq!(s.all_state(enabled), AllSelected::All);
        s.toggle("a", false);
        assert_eq!(s.all_state(enabled), AllSelected::Some);
    }

    #[test]
    fn test_toggle_all_round_trip() {
        let mut s = SelectionManager::new(SelectionMode::Multi);
        s.toggle("a", false);
        assert!(s.toggle_all(&["a", "b", "c"]));
        assert_eq!(s.len(), 3);
        assert!(s.toggle_all(&["a", "b", "c"]));
        assert!(s.is_empty());
    }

    #[test]
    fn test_set_filters_disabled() {
        let mut s = SelectionManager::new(SelectionMode::Multi);
        s.set(vec!["a".into(), "x".into()], |id| id == "x");
        assert_eq!(s.ids().collect::<Vec<_>>(), ["a"]);

        let mut s = SelectionManager::new(SelectionMode::Single { deselect: false });
        s.set(vec!["x".into(), "b".into(), "c".into()], |id| id == "x");
        assert_eq!(s.ids().collect::<Vec<_>>(), ["b"]);
    }
}
