//! Expanded rows and collapsed groups.

use std::collections::BTreeSet;

/// Which rows show their children and which groups hide their members.
///
/// Rows start collapsed; groups start expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionController {
    rows: BTreeSet<String>,
    collapsed_groups: BTreeSet<String>,
}

impl ExpansionController {
    /// Nothing expanded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether row `id` is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.rows.contains(id)
    }

    /// Flip row `id`.
    pub fn toggle(&mut self, id: &str) {
        if !self.rows.remove(id) {
            self.rows.insert(id.to_string());
        }
    }

    /// Whether every row in `expandable` is expanded (false when empty).
    pub fn all_expanded(&self, expandable: &[&str]) -> bool {
        !expandable.is_empty() && expandable.iter().all(|id| self.rows.contains(*id))
    }

    /// Expand every row in `expandable`, or collapse them all when all are
    /// expanded. Returns whether anything changed.
    pub fn toggle_all(&mut self, expandable: &[&str]) -> bool {
        if expandable.is_empty() {
            return false;
        }
        if self.all_expanded(expandable) {
            for id in expandable {
                self.rows.remove(*id);
            }
        } else {
            self.rows.extend(expandable.iter().map(|id| (*id).to_string()));
        }
        true
    }

    /// Whether group `key` shows its members.
    pub fn is_group_expanded(&self, key: &str) -> bool {
        !self.collapsed_groups.contains(key)
    }

    /// Flip group `key`.
    pub fn toggle_group(&mut self, key: &str) {
        if !self.collapsed_groups.remove(key) {
            self.collapsed_groups.insert(key.to_string());
        }
    }

    /// Forget group state, for when grouping changes.
    pub fn reset_groups(&mut self) {
        self.collapsed_groups.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_row() {
        let mut e = ExpansionController::new();
        e.toggle("1");
        assert!(e.is_expanded("1"));
        e.toggle("1");
        assert!(!e.is_expanded("1"));
    }

    #[test]
    fn test_toggle_all_expands_unless_all_expanded() {
        let mut e = ExpansionController::new();
        e.toggle("1");
        assert!(e.toggle_all(&["1", "2"]));
        assert!(e.all_expanded(&["1", "2"]));
        assert!(e.toggle_all(&["1", "2"]));
        assert!(!e.is_expanded("1"));
        assert!(!e.is_expanded("2"));
        assert!(!e.toggle_all(&[]));
    }

    #[test]
    fn test_groups_start_expanded() {
        let mut e = ExpansionController::new();
        assert!(e.is_group_expanded("name=Item0"));
        e.toggle_group("name=Item0");
        assert!(!e.is_group_expanded("name=Item0"));
        e.reset_groups();
        assert!(e.is_group_expanded("name=Item0"));
    }
}
