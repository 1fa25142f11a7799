//! The row pipeline: flatten records into an arena, then filter, sort,
//! group, page and finally lay out the display rows.

use super::column::{CellValue, Record};
use super::expand::ExpansionController;
use super::group::Unit;
use super::sort::{SortRule, sort_by_rules};

/// A record with its identity and place in the hierarchy.
#[derive(Debug, Clone)]
pub struct Entry<R> {
    pub id: String,
    pub depth: usize,
    pub record: R,
    pub children: Vec<usize>,
    pub disabled: bool,
}

/// Every record, parents before children.
#[derive(Debug, Clone)]
pub struct Arena<R> {
    pub entries: Vec<Entry<R>>,
    pub roots: Vec<usize>,
}

impl<R> Default for Arena<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            roots: Vec::new(),
        }
    }
}

impl<R: Record> Arena<R> {
    /// Build from `items`. Ids default to the index path (`"1"`, `"1.0"`).
    pub fn build<I, D>(items: &[R], row_id: Option<&I>, disabled: Option<&D>) -> Self
    where
        I: Fn(&R) -> String + ?Sized,
        D: Fn(&R) -> bool + ?Sized,
    {
        let mut arena = Self::default();
        for (i, item) in items.iter().enumerate() {
            let idx = arena.push(item, i.to_string(), 0, row_id, disabled);
            arena.roots.push(idx);
        }
        arena
    }

    fn push<I, D>(
        &mut self,
        record: &R,
        path: String,
        depth: usize,
        row_id: Option<&I>,
        disabled: Option<&D>,
    ) -> usize
    where
        I: Fn(&R) -> String + ?Sized,
        D: Fn(&R) -> bool + ?Sized,
    {
        let idx = self.entries.len();
        self.entries.push(Entry {
            id: row_id.map_or_else(|| path.clone(), |f| f(record)),
            depth,
            record: record.clone(),
            children: Vec::new(),
            disabled: disabled.is_some_and(|f| f(record)),
        });
        let children: Vec<usize> = record
            .sub_rows()
            .iter()
            .enumerate()
            .map(|(j, child)| self.push(child, format!("{path}.{j}"), depth + 1, row_id, disabled))
            .collect();
        self.entries[idx].children = children;
        idx
    }

    /// Ids of rows that have sub-rows.
    pub fn expandable_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| !e.children.is_empty())
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Index of the entry with `id`.
    pub fn find(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

/// A row that survived filtering, with its surviving children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Arena index.
    pub entry: usize,
    /// Children that survived filtering.
    pub children: Vec<Self>,
}

/// Keep rows passing `keep`, at every depth. A failing row takes its
/// descendants with it.
pub fn filter_nodes<R, F>(arena: &Arena<R>, ids: &[usize], keep: &F) -> Vec<Node>
where
    F: Fn(usize) -> bool,
{
    ids.iter()
        .copied()
        .filter(|&i| keep(i))
        .map(|i| Node {
            entry: i,
            children: filter_nodes(arena, &arena.entries[i].children, keep),
        })
        .collect()
}

/// Sort siblings at every depth.
pub fn sort_nodes<F>(nodes: &mut Vec<Node>, rules: &[SortRule], value: &F)
where
    F: Fn(usize, &str) -> CellValue,
{
    sort_by_rules(nodes, rules, |n, col| value(n.entry, col));
    for node in nodes.iter_mut() {
        sort_nodes(&mut node.children, rules, value);
    }
}

/// Header line of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHeader {
    /// Group key.
    pub key: String,
    /// Grouping column.
    pub column_id: String,
    /// Shared value.
    pub value: String,
    /// Rows in the group.
    pub count: usize,
    /// Nesting level, 0 for the outermost groups.
    pub depth: usize,
    /// Whether members are shown.
    pub expanded: bool,
}

/// A record line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLine {
    /// Row identity.
    pub id: String,
    /// Indentation level: group depth plus hierarchy depth.
    pub depth: usize,
    /// Has children (after filtering).
    pub expandable: bool,
    /// Children are shown.
    pub expanded: bool,
    /// Cannot be selected.
    pub disabled: bool,
}

/// One line of the table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    /// A group header.
    Group(GroupHeader),
    /// A record.
    Row(RowLine),
}

impl DisplayRow {
    /// Row id, for record lines.
    pub fn row_id(&self) -> Option<&str> {
        match self {
            Self::Row(r) => Some(&r.id),
            Self::Group(_) => None,
        }
    }
}

/// Lay out `units` as display rows. Children of a row appear only when it is
/// expanded and `expand` is enabled; group members appear while the group
/// is expanded.
pub fn flatten<R>(
    arena: &Arena<R>,
    units: &[Unit],
    expansion: &ExpansionController,
    expand: bool,
) -> Vec<DisplayRow> {
    let mut out = Vec::new();
    for unit in units {
        flatten_unit(arena, unit, expansion, expand, 0, &mut out);
    }
    out
}

fn flatten_unit<R>(
    arena: &Arena<R>,
    unit: &Unit,
    expansion: &ExpansionController,
    expand: bool,
    depth: usize,
    out: &mut Vec<DisplayRow>,
) {
    match unit {
        Unit::Row(node) => flatten_node(arena, node, expansion, expand, depth, out),
        Unit::Group(group) => {
            let expanded = expansion.is_group_expanded(&group.key);
            out.push(DisplayRow::Group(GroupHeader {
                key: group.key.clone(),
                column_id: group.column_id.clone(),
                value: group.value.clone(),
                count: group.count,
                depth,
                expanded,
            }));
            if expanded {
                for child in &group.children {
                    flatten_unit(arena, child, expansion, expand, depth + 1, out);
                }
            }
        }
    }
}

fn flatten_node<R>(
    arena: &Arena<R>,
    node: &Node,
    expansion: &ExpansionController,
    expand: bool,
    depth: usize,
    out: &mut Vec<DisplayRow>,
) {
    let entry = &arena.entries[node.entry];
    let expandable = expand && !node.children.is_empty();
    let expanded = expandable && expansion.is_expanded(&entry.id);
    out.push(DisplayRow::Row(RowLine {
        id: entry.id.clone(),
        depth,
        expandable,
        expanded,
        disabled: entry.disabled,
    }));
    if expanded {
        for child in &node.children {
            flatten_node(arena, child, expansion, expand, depth + 1, out);
        }
    }
}
