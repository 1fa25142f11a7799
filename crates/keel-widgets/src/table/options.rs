//! Table options.
//!
//! Everything here is plain data with serde defaults, so options can come
//! from a configuration file. Behavior that needs code (row ids, disabled
//! rows, the action group, styles, key bindings) is set on the
//! [`Table`](super::Table) itself.

use serde::{Deserialize, Serialize};

use super::sort::SortRule;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default debounce window for remote filtering, in milliseconds.
pub const DEFAULT_FILTER_DEBOUNCE_MS: u64 = 250;

/// Feature switches and seeds for a [`Table`](super::Table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Title above the table.
    pub title: String,
    /// Remote mode: the owner supplies pages in answer to
    /// [`FetchDataMsg`](super::FetchDataMsg)s.
    pub remote: bool,
    /// Total rows on the server, for page math in remote mode. The number of
    /// supplied items is used when absent.
    pub row_count: Option<usize>,
    /// Show the loading footer.
    pub loading: bool,
    /// Show this error in place of the rows.
    pub error_text: Option<String>,

    /// No selection column.
    pub disable_row_select: bool,
    /// Checkboxes when true, radio buttons when false.
    pub multi_select: bool,
    /// In single mode, selecting the selected row clears the selection.
    pub single_select_deselect: bool,
    /// Include the row objects in selection messages.
    pub emit_selected_rows: bool,

    /// No sorting.
    pub disable_sort_by: bool,
    /// Initial sort.
    pub sort_by: Vec<SortRule>,
    /// Allow sorting by several columns.
    pub multi_sort: bool,

    /// No global filter.
    pub disable_filters: bool,
    /// No per-column filters.
    pub disable_column_filters: bool,
    /// Remote filter debounce window in milliseconds.
    pub filter_debounce_ms: u64,

    /// No grouping.
    pub disable_group_by: bool,
    /// Initial grouping columns.
    pub default_groups: Vec<String>,

    /// Show every row on one page.
    pub disable_pagination: bool,
    /// Initial page size.
    pub default_page_size: usize,
    /// Page sizes cycled through by the page-size keys.
    pub page_size_options: Vec<usize>,

    /// No hierarchical expansion.
    pub disable_expand: bool,
    /// No column visibility settings.
    pub disable_settings: bool,
    /// Columns shown initially; every column when empty.
    pub show_columns: Vec<String>,

    /// Initial selection.
    pub selected_row_ids: Vec<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            remote: false,
            row_count: None,
            loading: false,
            error_text: None,
            disable_row_select: false,
            multi_select: true,
            single_select_deselect: false,
            emit_selected_rows: false,
            disable_sort_by: false,
            sort_by: Vec::new(),
            multi_sort: false,
            disable_filters: false,
            disable_column_filters: true,
            filter_debounce_ms: DEFAULT_FILTER_DEBOUNCE_MS,
            disable_group_by: true,
            default_groups: Vec::new(),
            disable_pagination: false,
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 25, 50, 100],
            disable_expand: true,
            disable_settings: false,
            show_columns: Vec::new(),
            selected_row_ids: Vec::new(),
        }
    }
}

impl TableOptions {
    /// Default options with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let o = TableOptions::default();
        assert!(o.multi_select);
        assert!(o.disable_column_filters);
        assert!(o.disable_group_by);
        assert!(o.disable_expand);
        assert_eq!(o.default_page_size, 10);
        assert_eq!(o.page_size_options, [10, 25, 50, 100]);
        assert_eq!(o.filter_debounce_ms, 250);
    }

    #[test]
    fn test_partial_toml() {
        let o: TableOptions = toml::from_str(
            r#"
            title = "Orders"
            remote = true
            row_count = 56
            default_groups = ["status"]
            disable_group_by = false

            [[sort_by]]
            id = "created"
            desc = true
            "#,
        )
        .unwrap();
        assert_eq!(o.title, "Orders");
        assert_eq!(o.row_count, Some(56));
        assert_eq!(o.sort_by, [SortRule::desc("created")]);
        assert!(o.multi_select);
    }

    #[test]
    fn test_json_round_trip_keeps_fields() {
        let o = TableOptions {
            selected_row_ids: vec!["1".into()],
            ..TableOptions::titled("x")
        };
        let back: TableOptions = serde_json::from_str(&serde_json::to_string(&o).unwrap()).unwrap();
        assert_eq!(back, o);
    }
}
