//! Sort state and the stable multi-key sort.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::column::CellValue;

/// One entry of the sort sequence. Serializes as `{"id": .., "desc": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortRule {
    /// Column id.
    #[serde(rename = "id")]
    pub column_id: String,
    /// Descending order.
    #[serde(rename = "desc", default)]
    pub descending: bool,
}

impl SortRule {
    /// Ascending by a column.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: false,
        }
    }

    /// Descending by a column.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: true,
        }
    }
}

/// Direction a column is currently sorted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// The sort sequence, applied left to right as a tie-break chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortController {
    rules: Vec<SortRule>,
    multi: bool,
}

impl SortController {
    /// A controller seeded with `rules`.
    pub const fn new(rules: Vec<SortRule>, multi: bool) -> Self {
        Self { rules, multi }
    }

    /// Current sort sequence.
    pub fn rules(&self) -> &[SortRule] {
        &self.rules
    }

    /// Direction of `column_id` and its position in the sequence.
    pub fn direction(&self, column_id: &str) -> Option<(SortDirection, usize)> {
        self.rules
            .iter()
            .position(|r| r.column_id == column_id)
            .map(|i| {
                let dir = if self.rules[i].descending {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                (dir, i)
            })
    }

    /// Cycle `column_id` through ascending, descending and unsorted,
    /// replacing every other rule.
    pub fn toggle(&mut self, column_id: &str) {
        let next = match self.direction(column_id) {
            None => Some(SortRule::asc(column_id)),
            Some((SortDirection::Ascending, _)) => Some(SortRule::desc(column_id)),
            Some((SortDirection::Descending, _)) => None,
        };
        self.rules = next.into_iter().collect();
    }

    /// Cycle `column_id` within the sequence, leaving other rules in place:
    /// appended ascending, flipped to descending, then removed. Falls back to
    /// [`toggle`](Self::toggle) when multi-sort is off.
    pub fn toggle_multi(&mut self, column_id: &str) {
        if !self.multi {
            self.toggle(column_id);
            return;
        }
        match self.direction(column_id) {
            None => self.rules.push(SortRule::asc(column_id)),
            Some((SortDirection::Ascending, i)) => self.rules[i].descending = true,
            Some((SortDirection::Descending, i)) => {
                self.rules.remove(i);
            }
        }
    }

    /// Replace the sequence.
    pub fn set_rules(&mut self, rules: Vec<SortRule>) {
        self.rules = rules;
    }
}

/// Compare two key tuples under `rules`; `a[i]` and `b[i]` belong to
/// `rules[i]`.
pub fn compare_keys(a: &[CellValue], b: &[CellValue], rules: &[SortRule]) -> Ordering {
    for ((x, y), rule) in a.iter().zip(b).zip(rules) {
        let ord = x.compare(y);
        let ord = if rule.descending { ord.reverse() } else { ord };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Stable sort of `items` under `rules`. `value(item, column_id)` reads the
/// sort key; keys are read once per item.
pub fn sort_by_rules<T, F>(items: &mut Vec<T>, rules: &[SortRule], value: F)
where
    F: Fn(&T, &str) -> CellValue,
{
    if rules.is_empty() || items.len() < 2 {
        return;
    }
    let mut keyed: Vec<(Vec<CellValue>, T)> = items
        .drain(..)
        .map(|item| {
            let keys = rules.iter().map(|r| value(&item, &r.column_id)).collect();
            (keys, item)
        })
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, rules));
    items.extend(keyed.into_iter().map(|(_, item)| item));
}
