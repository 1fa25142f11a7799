//! Global and per-column text filters.
//!
//! Both are case-insensitive substring tests on a column's display string.
//! In remote mode the global filter is debounced: every keystroke bumps a
//! tag and schedules a [`FilterDebounceMsg`] carrying it; only the tick
//! whose tag is still current, arriving once the window since the last edit
//! has passed, commits the text.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Debounce tick for the global filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDebounceMsg {
    /// Id of the table that scheduled the tick.
    pub table_id: u64,
    /// Generation of the filter text when the tick was scheduled.
    pub tag: u64,
}

/// Case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Filter texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterController {
    pending: String,
    committed: String,
    columns: BTreeMap<String, String>,
    tag: u64,
    due: Option<Instant>,
}

impl FilterController {
    /// A controller with empty filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Global text as typed.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Global text in effect.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Current debounce generation.
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Set the global text. Without a debounce window the text takes effect
    /// at once and `None` is returned; with one the new tag to schedule a
    /// tick for is returned.
    pub fn set_global(&mut self, text: &str, window: Option<Duration>) -> Option<u64> {
        self.pending = text.to_string();
        if let Some(window) = window {
            self.tag += 1;
            self.due = Some(Instant::now() + window);
            Some(self.tag)
        } else {
            self.committed = self.pending.clone();
            None
        }
    }

    /// How long the tick for `tag` must still wait at `now`. `None` when it
    /// may commit, or when the tag is outdated anyway.
    pub fn remaining(&self, tag: u64, now: Instant) -> Option<Duration> {
        if tag != self.tag {
            return None;
        }
        let left = self.due?.saturating_duration_since(now);
        (!left.is_zero()).then_some(left)
    }

    /// Commit the pending text if `tag` is current. Returns whether the
    /// committed text changed.
    pub fn commit(&mut self, tag: u64) -> bool {
        if tag != self.tag {
            tracing::trace!(tag, current = self.tag, "outdated filter tick ignored");
            return false;
        }
        if self.committed == self.pending {
            return false;
        }
        self.committed = self.pending.clone();
        true
    }

    /// Text of a column filter; empty when unset.
    pub fn column(&self, column_id: &str) -> &str {
        self.columns.get(column_id).map_or("", String::as_str)
    }

    /// Set a column filter; empty text removes it. Returns whether anything
    /// changed.
    pub fn set_column(&mut self, column_id: &str, text: &str) -> bool {
        if self.column(column_id) == text {
            return false;
        }
        if text.is_empty() {
            self.columns.remove(column_id);
        } else {
            self.columns.insert(column_id.to_string(), text.to_string());
        }
        true
    }

    /// Active column filters.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether any filter is active.
    pub fn is_active(&self) -> bool {
        !self.committed.is_empty() || !self.columns.is_empty()
    }

    /// Whether a row passes. `cells` holds `(column id, display string)` for
    /// every filterable column.
    pub fn matches(&self, cells: &[(&str, String)]) -> bool {
        let global_ok = self.committed.is_empty()
            || cells.iter().any(|(_, text)| contains_ci(text, &self.committed));
        global_ok
            && self.columns.iter().all(|(col, needle)| {
                cells
                    .iter()
                    .find(|(id, _)| *id == col.as_str())
                    .is_some_and(|(_, text)| contains_ci(text, needle))
            })
    }
}
