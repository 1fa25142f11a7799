//! Grouping.
//!
//! Rows are partitioned by the display string of each grouping column in
//! turn. Groups appear in the order their first row appears, and rows keep
//! their relative order inside a group.

use super::column::CellValue;
use super::row_model::Node;

/// Ordered grouping columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupController {
    columns: Vec<String>,
}

impl GroupController {
    /// A controller seeded with `columns`.
    pub const fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Grouping columns, outermost first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Add `column_id` as the innermost level, or remove it if present.
    pub fn toggle(&mut self, column_id: &str) {
        if let Some(i) = self.columns.iter().position(|c| c == column_id) {
            self.columns.remove(i);
        } else {
            self.columns.push(column_id.to_string());
        }
    }

    /// Replace the grouping columns.
    pub fn set(&mut self, columns: Vec<String>) {
        self.columns = columns;
    }
}

/// A group of rows sharing a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Unique key: the path of `column=value` pairs from the outermost level.
    pub key: String,
    /// Grouping column.
    pub column_id: String,
    /// Shared display value.
    pub value: String,
    /// Rows in the group, at any nested level.
    pub count: usize,
    /// Sub-groups or rows.
    pub children: Vec<Unit>,
}

/// A top-level row or a group; the unit pages are made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    /// A row and its surviving descendants.
    Row(Node),
    /// A group.
    Group(Group),
}

/// Partition `nodes` by `levels`. `value(entry, column_id)` reads a row's
/// value.
pub fn partition<F>(nodes: Vec<Node>, levels: &[String], value: &F) -> Vec<Unit>
where
    F: Fn(usize, &str) -> CellValue,
{
    partition_under(nodes, levels, value, "")
}

fn partition_under<F>(nodes: Vec<Node>, levels: &[String], value: &F, parent: &str) -> Vec<Unit>
where
    F: Fn(usize, &str) -> CellValue,
{
    let Some((column_id, rest)) = levels.split_first() else {
        return nodes.into_iter().map(Unit::Row).collect();
    };

    let mut buckets: Vec<(String, Vec<Node>)> = Vec::new();
    for node in nodes {
        let v = value(node.entry, column_id).display();
        match buckets.iter_mut().find(|(k, _)| *k == v) {
            Some((_, members)) => members.push(node),
            None => buckets.push((v, vec![node])),
        }
    }

    buckets
        .into_iter()
        .map(|(v, members)| {
            let key = if parent.is_empty() {
                format!("{column_id}={v}")
            } else {
                format!("{parent}/{column_id}={v}")
            };
            let count = members.len();
            Unit::Group(Group {
                children: partition_under(members, rest, value, &key),
                key,
                column_id: column_id.clone(),
                value: v,
                count,
            })
        })
        .collect()
}
