//! Data table.
//!
//! A [`Table`] takes column definitions, items and [`TableOptions`] and
//! derives everything it shows from them. Rows move through a fixed
//! pipeline on every change:
//!
//! 1. flatten items and their sub-rows into an arena, assigning ids
//! 2. drop rows failing the filters, at every depth
//! 3. sort siblings at every depth
//! 4. group top-level rows
//! 5. slice the current page out of the top-level units
//! 6. lay out display rows, honoring expansion
//!
//! In remote mode steps 2 to 5 belong to the owner. The table emits a
//! [`FetchDataMsg`] whenever the wanted window changes and shows exactly the
//! items it is given.
//!
//! # Example
//!
//! ```rust
//! use keel_widgets::table::{CellValue, ColumnDefinition, Record, Table, TableOptions};
//!
//! #[derive(Clone)]
//! struct Fruit {
//!     name: &'static str,
//!     qty: i64,
//! }
//!
//! impl Record for Fruit {
//!     fn field(&self, key: &str) -> CellValue {
//!         match key {
//!             "name" => self.name.into(),
//!             "qty" => self.qty.into(),
//!             _ => CellValue::Null,
//!         }
//!     }
//! }
//!
//! let columns = vec![
//!     ColumnDefinition::new("name", "Name"),
//!     ColumnDefinition::new("qty", "Qty"),
//! ];
//! let mut table = Table::new(columns, TableOptions::titled("Fruit"))?.with_items(vec![
//!     Fruit { name: "pear", qty: 3 },
//!     Fruit { name: "apple", qty: 7 },
//! ]);
//! table.toggle_sort("name");
//! assert_eq!(table.row_ids(), ["1", "0"]);
//! assert!(table.view().contains("1-2 of 2"));
//! # Ok::<(), keel_widgets::Error>(())
//! ```

pub mod column;
pub mod expand;
pub mod fetch;
pub mod filter;
mod group;
pub mod options;
pub mod pagination;
mod render;
mod row_model;
pub mod selection;
pub mod sort;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use keel_core::{BlurMsg, Cmd, FocusMsg, KeyMsg, Message, Model, batch, tick};

use crate::error::Error;
use crate::key::{Binding, matches};
use crate::next_id;
use crate::textinput::TextInput;

use group::{GroupController, Unit, partition};
use row_model::{Arena, filter_nodes, flatten, sort_nodes};

pub use column::{Accessor, CellValue, ColumnDefinition, DeriveFn, Record};
pub use expand::ExpansionController;
pub use fetch::{FetchCoordinator, FetchDataMsg, FetchPhase, FetchRequest, Received, RequestToken};
pub use filter::{FilterController, FilterDebounceMsg};
pub use options::{DEFAULT_FILTER_DEBOUNCE_MS, DEFAULT_PAGE_SIZE, TableOptions};
pub use pagination::Paginator;
pub use render::Styles;
pub use row_model::{DisplayRow, GroupHeader, RowLine};
pub use selection::{AllSelected, SelectionManager, SelectionMode};
pub use sort::{SortController, SortDirection, SortRule};

/// Extracts a row id from a record.
pub type RowIdFn<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Decides whether a record can be selected.
pub type ItemDisabledFn<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// The selection changed through user interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChangedMsg<R> {
    /// Id of the table.
    pub table_id: u64,
    /// Selected row ids, ascending.
    pub ids: Vec<String>,
    /// The selected records, when `emit_selected_rows` is on.
    pub rows: Vec<R>,
}

/// The user asked to retry after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryRequestedMsg {
    /// Id of the table.
    pub table_id: u64,
}

/// Key bindings for the table.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Row cursor up.
    pub up: Binding,
    /// Row cursor down.
    pub down: Binding,
    /// Column cursor left.
    pub left: Binding,
    /// Column cursor right.
    pub right: Binding,
    /// Select the row under the cursor.
    pub select: Binding,
    /// Select or clear every row.
    pub select_all: Binding,
    /// Expand the row or group under the cursor.
    pub expand: Binding,
    /// Expand or collapse every row.
    pub expand_all: Binding,
    /// Sort by the focused column.
    pub sort: Binding,
    /// Add the focused column to the sort.
    pub sort_multi: Binding,
    /// Group by the focused column.
    pub group: Binding,
    /// Edit the global filter.
    pub filter: Binding,
    /// Edit the focused column's filter.
    pub column_filter: Binding,
    /// Leave a filter input.
    pub stop_editing: Binding,
    /// Next page.
    pub next_page: Binding,
    /// Previous page.
    pub previous_page: Binding,
    /// First page.
    pub first_page: Binding,
    /// Last page.
    pub last_page: Binding,
    /// Larger page size.
    pub page_size_up: Binding,
    /// Smaller page size.
    pub page_size_down: Binding,
    /// Show or hide the focused column.
    pub toggle_column: Binding,
    /// Retry after an error.
    pub retry: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            up: Binding::new().keys(&["up", "k"]).help("↑/k", "up"),
            down: Binding::new().keys(&["down", "j"]).help("↓/j", "down"),
            left: Binding::new().keys(&["left", "h"]).help("←/h", "column left"),
            right: Binding::new().keys(&["right", "l"]).help("→/l", "column right"),
            select: Binding::new().keys(&[" "]).help("space", "select"),
            select_all: Binding::new().keys(&["a"]).help("a", "select all"),
            expand: Binding::new().keys(&["enter"]).help("enter", "expand"),
            expand_all: Binding::new().keys(&["e"]).help("e", "expand all"),
            sort: Binding::new().keys(&["s"]).help("s", "sort"),
            sort_multi: Binding::new().keys(&["S"]).help("S", "add to sort"),
            group: Binding::new().keys(&["g"]).help("g", "group by"),
            filter: Binding::new().keys(&["/"]).help("/", "search"),
            column_filter: Binding::new().keys(&["f"]).help("f", "filter column"),
            stop_editing: Binding::new().keys(&["enter", "esc"]).help("enter", "done"),
            next_page: Binding::new().keys(&["n", "pgdown"]).help("n", "next page"),
            previous_page: Binding::new().keys(&["p", "pgup"]).help("p", "previous page"),
            first_page: Binding::new().keys(&["home"]).help("home", "first page"),
            last_page: Binding::new().keys(&["end"]).help("end", "last page"),
            page_size_up: Binding::new().keys(&["+"]).help("+", "more rows"),
            page_size_down: Binding::new().keys(&["-"]).help("-", "fewer rows"),
            toggle_column: Binding::new().keys(&["v"]).help("v", "show/hide column"),
            retry: Binding::new().keys(&["r"]).help("r", "retry"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Editing {
    Global,
    Column(String),
}

/// Interactive data table over records of type `R`.
#[derive(Clone)]
pub struct Table<R: Record> {
    id: u64,
    columns: Vec<ColumnDefinition<R>>,
    options: TableOptions,
    row_id: Option<RowIdFn<R>>,
    item_disabled: Option<ItemDisabledFn<R>>,
    arena: Arena<R>,

    selection: SelectionManager,
    sort: SortController,
    filter: FilterController,
    groups: GroupController,
    paginator: Paginator,
    expansion: ExpansionController,
    fetch: FetchCoordinator,
    visible: Vec<String>,

    rows: Vec<DisplayRow>,
    page_len: usize,
    cursor_row: usize,
    cursor_col: usize,
    focus: bool,
    editing: Option<Editing>,
    global_input: TextInput,
    column_input: TextInput,
    action_group: String,

    /// Key bindings.
    pub key_map: KeyMap,
    /// Styles.
    pub styles: Styles,
}

impl<R: Record> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("columns", &self.columns)
            .field("options", &self.options)
            .field("rows", &self.rows)
            .field("selected", &self.selection)
            .field("sort", &self.sort)
            .field("page", &self.paginator.page())
            .finish_non_exhaustive()
    }
}

fn known<'a>(
    seen: &BTreeSet<&str>,
    setting: &'static str,
    mut ids: impl Iterator<Item = &'a String>,
) -> Result<(), Error> {
    match ids.find(|id| !seen.contains(id.as_str())) {
        Some(id) => Err(Error::UnknownColumn {
            column: id.clone(),
            setting,
        }),
        None => Ok(()),
    }
}

fn validate<R: Record>(columns: &[ColumnDefinition<R>], options: &TableOptions) -> Result<(), Error> {
    if columns.is_empty() {
        return Err(Error::EmptyColumns);
    }
    let mut seen = BTreeSet::new();
    for column in columns {
        if !seen.insert(column.id.as_str()) {
            return Err(Error::DuplicateColumn(column.id.clone()));
        }
        if matches!(&column.accessor, Accessor::Key(key) if key.is_empty()) {
            return Err(Error::MissingAccessor(column.id.clone()));
        }
    }
    known(&seen, "sort_by", options.sort_by.iter().map(|r| &r.column_id))?;
    known(&seen, "default_groups", options.default_groups.iter())?;
    known(&seen, "show_columns", options.show_columns.iter())?;

    if options.default_page_size == 0 {
        return Err(Error::InvalidPageSize(0));
    }
    if options.page_size_options.contains(&0) {
        return Err(Error::InvalidPageSize(0));
    }
    Ok(())
}

impl<R: Record> Table<R> {
    /// A table with no items.
    ///
    /// # Errors
    ///
    /// Rejects an empty or duplicated column set, empty accessor keys,
    /// unknown columns in `sort_by`, `default_groups` or `show_columns`,
    /// and zero page sizes.
    pub fn new(columns: Vec<ColumnDefinition<R>>, options: TableOptions) -> Result<Self, Error> {
        validate(&columns, &options)?;

        let mode = if options.multi_select {
            SelectionMode::Multi
        } else {
            SelectionMode::Single {
                deselect: options.single_select_deselect,
            }
        };
        let visible = columns
            .iter()
            .filter(|c| options.show_columns.is_empty() || options.show_columns.contains(&c.id))
            .map(|c| c.id.clone())
            .collect();
        let mut selection = SelectionManager::new(mode);
        selection.set(options.selected_row_ids.clone(), |_| false);

        let mut table = Self {
            id: next_id(),
            sort: SortController::new(options.sort_by.clone(), options.multi_sort),
            groups: GroupController::new(options.default_groups.clone()),
            paginator: Paginator::new(options.default_page_size, options.page_size_options.clone()),
            columns,
            row_id: None,
            item_disabled: None,
            arena: Arena::default(),
            selection,
            filter: FilterController::new(),
            expansion: ExpansionController::new(),
            fetch: FetchCoordinator::new(),
            visible,
            rows: Vec::new(),
            page_len: 0,
            cursor_row: 0,
            cursor_col: 0,
            focus: false,
            editing: None,
            global_input: TextInput::new().prompt("/ ").placeholder("Search"),
            column_input: TextInput::new(),
            action_group: String::new(),
            key_map: KeyMap::default(),
            styles: Styles::default(),
            options,
        };
        table.rebuild();
        if table.options.remote {
            let request = table.fetch_request();
            table.fetch.issue(&request, true);
        }
        tracing::debug!(table = table.id, remote = table.options.remote, "table created");
        Ok(table)
    }

    /// Set the items.
    pub fn with_items(mut self, items: Vec<R>) -> Self {
        self.set_items(items);
        self
    }

    /// Derive row ids from records instead of their positions.
    pub fn with_row_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.row_id = Some(Arc::new(f));
        self.reindex();
        self
    }

    /// Mark records that cannot be selected.
    pub fn with_item_disabled<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.item_disabled = Some(Arc::new(f));
        self.reindex();
        self
    }

    /// Rendered content for the right end of the title line.
    pub fn with_action_group(mut self, view: impl Into<String>) -> Self {
        self.action_group = view.into();
        self
    }

    /// Replace the styles.
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Replace the key bindings.
    pub fn with_key_map(mut self, key_map: KeyMap) -> Self {
        self.key_map = key_map;
        self
    }

    // ----- queries -----

    /// Unique id, carried by every message the table emits.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Options in effect.
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Column definitions.
    pub fn columns(&self) -> &[ColumnDefinition<R>] {
        &self.columns
    }

    /// Column by id.
    pub fn column(&self, column_id: &str) -> Option<&ColumnDefinition<R>> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Visible column ids, in column order.
    pub fn visible_columns(&self) -> &[String] {
        &self.visible
    }

    /// Lines of the current page.
    pub fn display_rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    /// Ids of the record lines on the current page, top to bottom.
    pub fn row_ids(&self) -> Vec<&str> {
        self.rows.iter().filter_map(DisplayRow::row_id).collect()
    }

    /// The record with row id `id`.
    pub fn record(&self, id: &str) -> Option<&R> {
        self.arena.find(id).map(|i| &self.arena.entries[i].record)
    }

    /// Whether row `id` is disabled.
    pub fn is_row_disabled(&self, id: &str) -> bool {
        self.arena.find(id).is_some_and(|i| self.arena.entries[i].disabled)
    }

    /// Selected ids, ascending.
    pub fn selected_row_ids(&self) -> Vec<String> {
        self.selection.ids().map(str::to_string).collect()
    }

    /// Selected records that are currently loaded.
    pub fn selected_rows(&self) -> Vec<R> {
        self.selection
            .ids()
            .filter_map(|id| self.record(id))
            .cloned()
            .collect()
    }

    /// Whether row `id` is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Select-all state over every enabled row.
    pub fn all_selected_state(&self) -> AllSelected {
        self.selection.all_state(self.enabled_ids())
    }

    /// Whether the select-all control is offered: multi mode with no
    /// disabled rows.
    pub fn show_select_all(&self) -> bool {
        !self.options.disable_row_select
            && self.selection.mode() == SelectionMode::Multi
            && !self.arena.entries.iter().any(|e| e.disabled)
    }

    /// Sort sequence.
    pub fn sort_by(&self) -> &[SortRule] {
        self.sort.rules()
    }

    /// Sort state of one column: direction and position in the sequence.
    pub fn sort_direction(&self, column_id: &str) -> Option<(SortDirection, usize)> {
        self.sort.direction(column_id)
    }

    /// Grouping columns; empty when grouping is disabled.
    pub fn group_by(&self) -> &[String] {
        if self.options.disable_group_by {
            &[]
        } else {
            self.groups.columns()
        }
    }

    /// Global filter text in effect.
    pub fn global_filter(&self) -> &str {
        self.filter.committed()
    }

    /// Global filter text as typed, possibly not yet committed.
    pub fn pending_global_filter(&self) -> &str {
        self.filter.pending()
    }

    /// Filter text of one column.
    pub fn column_filter(&self, column_id: &str) -> &str {
        self.filter.column(column_id)
    }

    /// Zero-based page.
    pub const fn page_index(&self) -> usize {
        self.paginator.page()
    }

    /// Rows per page.
    pub const fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    /// Number of pages.
    pub const fn page_count(&self) -> usize {
        self.paginator.page_count()
    }

    /// Total rows paged over: top-level units locally, the owner's row
    /// count remotely.
    pub const fn row_count(&self) -> usize {
        self.paginator.row_count()
    }

    /// `start-end of total` for the current page.
    pub fn range_label(&self) -> String {
        self.paginator.range_label(self.page_len)
    }

    /// Whether row `id` is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion.is_expanded(id)
    }

    /// Whether every expandable row is expanded.
    pub fn all_rows_expanded(&self) -> bool {
        self.expansion.all_expanded(&self.arena.expandable_ids())
    }

    /// Remote fetch phase.
    pub const fn fetch_phase(&self) -> FetchPhase {
        self.fetch.phase()
    }

    /// Token of the latest fetch request.
    pub const fn latest_token(&self) -> Option<RequestToken> {
        self.fetch.latest()
    }

    /// The window the table currently wants.
    pub fn fetch_request(&self) -> FetchRequest {
        FetchRequest {
            page_index: self.paginator.page(),
            page_size: self.paginator.page_size(),
            sort_by: self.sort.rules().to_vec(),
            filter_text: self.filter.committed().to_string(),
            group_by: self.group_by().to_vec(),
            show_columns: self.visible.clone(),
        }
    }

    /// Line under the row cursor.
    pub fn cursor(&self) -> Option<&DisplayRow> {
        self.rows.get(self.cursor_row)
    }

    /// Column under the column cursor.
    pub fn focused_column(&self) -> Option<&ColumnDefinition<R>> {
        self.columns.get(self.cursor_col)
    }

    /// Whether the table takes keys.
    pub const fn focused(&self) -> bool {
        self.focus
    }

    /// Whether a filter input has the keyboard.
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    // ----- focus -----

    /// Take keys.
    pub const fn focus(&mut self) {
        self.focus = true;
    }

    /// Stop taking keys and leave any filter input.
    pub fn blur(&mut self) {
        self.focus = false;
        self.stop_editing();
    }

    // ----- selection -----

    /// Toggle the selection of row `id`. Disabled rows are ignored.
    pub fn toggle_row_selected(&mut self, id: &str) -> Option<Cmd> {
        if self.options.disable_row_select {
            return None;
        }
        let Some(i) = self.arena.find(id) else {
            tracing::trace!(table = self.id, id, "selection of unknown row ignored");
            return None;
        };
        if !self.selection.toggle(id, self.arena.entries[i].disabled) {
            return None;
        }
        Some(self.selection_changed())
    }

    /// Select every enabled row, or clear them when all are selected.
    /// Multi mode only.
    pub fn toggle_all_rows_selected(&mut self) -> Option<Cmd> {
        if self.options.disable_row_select {
            return None;
        }
        let enabled: Vec<&str> = self
            .arena
            .entries
            .iter()
            .filter(|e| !e.disabled)
            .map(|e| e.id.as_str())
            .collect();
        if !self.selection.toggle_all(&enabled) {
            return None;
        }
        Some(self.selection_changed())
    }

    /// Replace the selection without emitting. Ids of disabled rows are
    /// dropped.
    pub fn set_selected_row_ids(&mut self, ids: Vec<String>) {
        let arena = &self.arena;
        self.selection
            .set(ids, |id| arena.find(id).is_some_and(|i| arena.entries[i].disabled));
    }

    fn selection_changed(&self) -> Cmd {
        let ids = self.selected_row_ids();
        let rows = if self.options.emit_selected_rows {
            self.selected_rows()
        } else {
            Vec::new()
        };
        tracing::debug!(table = self.id, selected = ids.len(), "selection changed");
        Cmd::message(SelectionChangedMsg {
            table_id: self.id,
            ids,
            rows,
        })
    }

    // ----- sorting -----

    /// Cycle the sort of `column_id`: ascending, descending, unsorted. The
    /// column becomes the only sort key.
    pub fn toggle_sort(&mut self, column_id: &str) -> Option<Cmd> {
        self.change_sort(column_id, false)
    }

    /// Like [`toggle_sort`](Self::toggle_sort) but keeps the other sort
    /// keys when `multi_sort` is on.
    pub fn toggle_sort_multi(&mut self, column_id: &str) -> Option<Cmd> {
        self.change_sort(column_id, true)
    }

    fn change_sort(&mut self, column_id: &str, multi: bool) -> Option<Cmd> {
        if self.options.disable_sort_by || !self.column(column_id).is_some_and(|c| c.sortable) {
            tracing::trace!(table = self.id, column_id, "sort ignored");
            return None;
        }
        if multi {
            self.sort.toggle_multi(column_id);
        } else {
            self.sort.toggle(column_id);
        }
        tracing::debug!(table = self.id, rules = ?self.sort.rules(), "sort changed");
        self.paginator.reset();
        self.rebuild();
        self.refresh(false)
    }

    // ----- filtering -----

    /// Set the global filter. Locally it applies at once; remotely it
    /// commits after the debounce window, through the returned tick.
    pub fn set_global_filter(&mut self, text: &str) -> Option<Cmd> {
        if self.options.disable_filters {
            return None;
        }
        if self.global_input.value() != text {
            self.global_input.set_value(text);
        }
        if self.options.remote {
            let window = Duration::from_millis(self.options.filter_debounce_ms);
            let tag = self.filter.set_global(text, Some(window))?;
            return Some(self.debounce_tick(tag, window));
        }
        let before = self.filter.committed().to_string();
        self.filter.set_global(text, None);
        if before != self.filter.committed() {
            tracing::debug!(table = self.id, filter = text, "global filter changed");
            self.paginator.reset();
            self.rebuild();
        }
        None
    }

    fn debounce_tick(&self, tag: u64, wait: Duration) -> Cmd {
        let table_id = self.id;
        tick(wait, move |_| Message::new(FilterDebounceMsg { table_id, tag }))
    }

    fn commit_filter(&mut self, tag: u64) -> Option<Cmd> {
        if let Some(wait) = self.filter.remaining(tag, Instant::now()) {
            tracing::trace!(table = self.id, tag, ?wait, "early filter tick rescheduled");
            return Some(self.debounce_tick(tag, wait));
        }
        if !self.filter.commit(tag) {
            return None;
        }
        tracing::debug!(table = self.id, filter = self.filter.committed(), "global filter committed");
        self.paginator.reset();
        self.rebuild();
        self.refresh(false)
    }

    /// Set the filter of one column. Only local tables with column filters
    /// enabled filter by column. Returns whether anything changed.
    pub fn set_column_filter(&mut self, column_id: &str, text: &str) -> bool {
        if !self.column_filters_enabled() || !self.column(column_id).is_some_and(|c| c.filterable) {
            return false;
        }
        if !self.filter.set_column(column_id, text) {
            return false;
        }
        tracing::debug!(table = self.id, column_id, filter = text, "column filter changed");
        self.paginator.reset();
        self.rebuild();
        true
    }

    const fn column_filters_enabled(&self) -> bool {
        !self.options.disable_column_filters && !self.options.remote
    }

    // ----- grouping -----

    /// Add `column_id` as the innermost grouping level, or remove it.
    pub fn toggle_group_by(&mut self, column_id: &str) -> Option<Cmd> {
        if self.options.disable_group_by || !self.column(column_id).is_some_and(|c| c.groupable) {
            tracing::trace!(table = self.id, column_id, "group by ignored");
            return None;
        }
        self.groups.toggle(column_id);
        self.grouping_changed()
    }

    /// Replace the grouping columns.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownColumn`] when a column does not exist.
    pub fn set_group_by(&mut self, columns: Vec<String>) -> Result<Option<Cmd>, Error> {
        if let Some(unknown) = columns.iter().find(|c| self.column(c).is_none()) {
            return Err(Error::UnknownColumn {
                column: unknown.clone(),
                setting: "group_by",
            });
        }
        if self.options.disable_group_by {
            return Ok(None);
        }
        self.groups.set(columns);
        Ok(self.grouping_changed())
    }

    fn grouping_changed(&mut self) -> Option<Cmd> {
        tracing::debug!(table = self.id, groups = ?self.groups.columns(), "grouping changed");
        self.expansion.reset_groups();
        self.paginator.reset();
        self.rebuild();
        self.refresh(false)
    }

    // ----- pagination -----

    /// Go to page `n`, clamped to the last page.
    pub fn goto_page(&mut self, n: usize) -> Option<Cmd> {
        self.change_page(|p| p.goto_page(n))
    }

    /// Next page.
    pub fn next_page(&mut self) -> Option<Cmd> {
        self.change_page(Paginator::next_page)
    }

    /// Previous page.
    pub fn previous_page(&mut self) -> Option<Cmd> {
        self.change_page(Paginator::previous_page)
    }

    /// First page.
    pub fn first_page(&mut self) -> Option<Cmd> {
        self.change_page(Paginator::first_page)
    }

    /// Last page.
    pub fn last_page(&mut self) -> Option<Cmd> {
        self.change_page(Paginator::last_page)
    }

    /// Rows per page (at least one); back to the first page.
    pub fn set_page_size(&mut self, n: usize) -> Option<Cmd> {
        self.change_page(|p| p.set_page_size(n))
    }

    fn change_page(&mut self, f: impl FnOnce(&mut Paginator) -> bool) -> Option<Cmd> {
        if self.options.disable_pagination || !f(&mut self.paginator) {
            return None;
        }
        tracing::debug!(
            table = self.id,
            page = self.paginator.page(),
            page_size = self.paginator.page_size(),
            "page changed"
        );
        self.rebuild();
        self.refresh(false)
    }

    // ----- expansion -----

    /// Show or hide the children of row `id`. Returns whether anything
    /// changed.
    pub fn toggle_row_expanded(&mut self, id: &str) -> bool {
        if self.options.disable_expand {
            return false;
        }
        let Some(i) = self.arena.find(id) else {
            return false;
        };
        if self.arena.entries[i].children.is_empty() {
            return false;
        }
        self.expansion.toggle(id);
        self.rebuild();
        true
    }

    /// Expand every row with children, or collapse them all when all are
    /// expanded.
    pub fn toggle_all_rows_expanded(&mut self) -> bool {
        if self.options.disable_expand {
            return false;
        }
        let ids = self.arena.expandable_ids();
        if !self.expansion.toggle_all(&ids) {
            return false;
        }
        self.rebuild();
        true
    }

    /// Show or hide the members of the group with key `key`.
    pub fn toggle_group_expanded(&mut self, key: &str) -> bool {
        let present = self
            .rows
            .iter()
            .any(|r| matches!(r, DisplayRow::Group(g) if g.key == key));
        if !present {
            return false;
        }
        self.expansion.toggle_group(key);
        self.rebuild();
        true
    }

    // ----- columns -----

    /// Show or hide a column. The last visible column stays.
    pub fn toggle_column_visibility(&mut self, column_id: &str) -> Option<Cmd> {
        if self.options.disable_settings || self.column(column_id).is_none() {
            return None;
        }
        if let Some(pos) = self.visible.iter().position(|c| c == column_id) {
            if self.visible.len() == 1 {
                tracing::trace!(table = self.id, column_id, "last visible column kept");
                return None;
            }
            self.visible.remove(pos);
        } else {
            let visible = &self.visible;
            self.visible = self
                .columns
                .iter()
                .filter(|c| c.id == column_id || visible.contains(&c.id))
                .map(|c| c.id.clone())
                .collect();
        }
        tracing::debug!(table = self.id, visible = ?self.visible, "column visibility changed");
        self.refresh(false)
    }

    // ----- data -----

    /// Replace the items. In remote mode these are the current page.
    pub fn set_items(&mut self, items: Vec<R>) {
        self.arena = Arena::build(&items, self.row_id.as_deref(), self.item_disabled.as_deref());
        let arena = &self.arena;
        self.selection
            .drop_disabled(|id| arena.find(id).is_some_and(|i| arena.entries[i].disabled));
        self.fetch.settle();
        tracing::debug!(table = self.id, items = items.len(), "items replaced");
        self.rebuild();
    }

    /// Apply the answer to a fetch request. Answers to anything but the
    /// latest request are dropped. When `row_count` no longer reaches the
    /// requested page, the page index is pulled back and that page is
    /// requested instead.
    pub fn receive_page(&mut self, token: RequestToken, items: Vec<R>, row_count: usize) -> Received {
        if !self.fetch.accept(token) {
            return Received::Stale;
        }
        self.options.row_count = Some(row_count);
        let page = self.paginator.page();
        self.paginator.set_row_count(row_count);
        if self.paginator.page() != page {
            tracing::debug!(
                table = self.id,
                from = page,
                to = self.paginator.page(),
                row_count,
                "row count moved the page"
            );
            self.set_items(Vec::new());
            return self.refresh(false).map_or(Received::Applied, Received::Refetch);
        }
        self.set_items(items);
        Received::Applied
    }

    /// Total rows on the server, for remote page math. Returns the request
    /// for the page in view when the new count moves the page index.
    pub fn set_row_count(&mut self, row_count: Option<usize>) -> Option<Cmd> {
        self.options.row_count = row_count;
        let page = self.paginator.page();
        self.rebuild();
        if self.paginator.page() == page {
            return None;
        }
        tracing::debug!(table = self.id, page = self.paginator.page(), "row count moved the page");
        self.refresh(false)
    }

    /// Show or hide the loading footer.
    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    /// Show an error in place of the rows, or clear it.
    pub fn set_error_text(&mut self, error_text: Option<String>) {
        self.options.error_text = error_text;
    }

    /// Ask the owner to retry, and refetch in remote mode.
    pub fn retry(&mut self) -> Option<Cmd> {
        tracing::debug!(table = self.id, "retry requested");
        let table_id = self.id;
        batch(vec![
            Some(Cmd::message(RetryRequestedMsg { table_id })),
            self.refresh(true),
        ])
    }

    /// Request the current window again, even if unchanged.
    pub fn refetch(&mut self) -> Option<Cmd> {
        self.refresh(true)
    }

    fn refresh(&mut self, force: bool) -> Option<Cmd> {
        if !self.options.remote {
            return None;
        }
        let request = self.fetch_request();
        let token = self.fetch.issue(&request, force)?;
        Some(Cmd::message(FetchDataMsg {
            table_id: self.id,
            token,
            request,
        }))
    }

    // ----- pipeline -----

    fn reindex(&mut self) {
        let items: Vec<R> = self
            .arena
            .roots
            .iter()
            .map(|&i| self.arena.entries[i].record.clone())
            .collect();
        self.set_items(items);
    }

    fn enabled_ids(&self) -> impl Iterator<Item = &str> {
        self.arena
            .entries
            .iter()
            .filter(|e| !e.disabled)
            .map(|e| e.id.as_str())
    }

    fn cell(&self, entry: usize, column_id: &str) -> CellValue {
        self.column(column_id)
            .map_or(CellValue::Null, |c| c.value(&self.arena.entries[entry].record))
    }

    fn local_units(&self) -> Vec<Unit> {
        let value = |entry: usize, column_id: &str| self.cell(entry, column_id);
        let active = self.filter.is_active();
        let keep = |entry: usize| {
            if !active {
                return true;
            }
            let record = &self.arena.entries[entry].record;
            let cells: Vec<(&str, String)> = self
                .columns
                .iter()
                .filter(|c| c.filterable)
                .map(|c| (c.id.as_str(), c.value(record).display()))
                .collect();
            self.filter.matches(&cells)
        };

        let mut nodes = filter_nodes(&self.arena, &self.arena.roots, &keep);
        if !self.options.disable_sort_by {
            sort_nodes(&mut nodes, self.sort.rules(), &value);
        }
        partition(nodes, self.group_by(), &value)
    }

    fn rebuild(&mut self) {
        let units = if self.options.remote {
            filter_nodes(&self.arena, &self.arena.roots, &|_: usize| true)
                .into_iter()
                .map(Unit::Row)
                .collect()
        } else {
            self.local_units()
        };
        let total = if self.options.remote {
            self.options.row_count.unwrap_or(self.arena.roots.len())
        } else {
            units.len()
        };
        self.paginator.set_row_count(total);

        let page = if self.options.remote || self.options.disable_pagination {
            &units[..]
        } else {
            let (start, end) = self.paginator.slice_bounds(units.len());
            &units[start..end]
        };
        self.page_len = page.len();
        self.rows = flatten(&self.arena, page, &self.expansion, !self.options.disable_expand);
        self.cursor_row = self.cursor_row.min(self.rows.len().saturating_sub(1));
    }

    // ----- keys -----

    fn stop_editing(&mut self) {
        self.editing = None;
        self.global_input.blur();
        self.column_input.blur();
    }

    fn focused_column_id(&self) -> Option<String> {
        self.focused_column().map(|c| c.id.clone())
    }

    fn handle_editing_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if matches(key, &[&self.key_map.stop_editing]) {
            self.stop_editing();
            return None;
        }
        match self.editing.clone()? {
            Editing::Global => {
                if self.global_input.handle_key(key) {
                    let value = self.global_input.value();
                    return self.set_global_filter(&value);
                }
            }
            Editing::Column(column_id) => {
                if self.column_input.handle_key(key) {
                    let value = self.column_input.value();
                    self.set_column_filter(&column_id, &value);
                }
            }
        }
        None
    }

    fn handle_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        let km = &self.key_map;
        if matches(key, &[&km.up]) {
            self.cursor_row = self.cursor_row.saturating_sub(1);
        } else if matches(key, &[&km.down]) {
            self.cursor_row = (self.cursor_row + 1).min(self.rows.len().saturating_sub(1));
        } else if matches(key, &[&km.left]) {
            self.cursor_col = self.cursor_col.saturating_sub(1);
        } else if matches(key, &[&km.right]) {
            self.cursor_col = (self.cursor_col + 1).min(self.columns.len() - 1);
        } else if matches(key, &[&km.select]) {
            match self.cursor()?.clone() {
                DisplayRow::Row(row) => return self.toggle_row_selected(&row.id),
                DisplayRow::Group(group) => {
                    self.toggle_group_expanded(&group.key);
                }
            }
        } else if matches(key, &[&km.select_all]) {
            if self.show_select_all() {
                return self.toggle_all_rows_selected();
            }
        } else if matches(key, &[&km.expand]) {
            match self.cursor()?.clone() {
                DisplayRow::Row(row) => self.toggle_row_expanded(&row.id),
                DisplayRow::Group(group) => self.toggle_group_expanded(&group.key),
            };
        } else if matches(key, &[&km.expand_all]) {
            self.toggle_all_rows_expanded();
        } else if matches(key, &[&km.sort]) {
            let column_id = self.focused_column_id()?;
            return self.toggle_sort(&column_id);
        } else if matches(key, &[&km.sort_multi]) {
            let column_id = self.focused_column_id()?;
            return self.toggle_sort_multi(&column_id);
        } else if matches(key, &[&km.group]) {
            let column_id = self.focused_column_id()?;
            return self.toggle_group_by(&column_id);
        } else if matches(key, &[&km.filter]) {
            if !self.options.disable_filters {
                self.editing = Some(Editing::Global);
                self.global_input.focus();
            }
        } else if matches(key, &[&km.column_filter]) {
            let column = self.focused_column()?;
            if self.column_filters_enabled() && column.filterable {
                let column_id = column.id.clone();
                let current = self.filter.column(&column_id).to_string();
                self.column_input.set_value(&current);
                self.column_input.focus();
                self.editing = Some(Editing::Column(column_id));
            }
        } else if matches(key, &[&km.next_page]) {
            return self.next_page();
        } else if matches(key, &[&km.previous_page]) {
            return self.previous_page();
        } else if matches(key, &[&km.first_page]) {
            return self.first_page();
        } else if matches(key, &[&km.last_page]) {
            return self.last_page();
        } else if matches(key, &[&km.page_size_up]) {
            return self.change_page(|p| p.cycle_page_size(true));
        } else if matches(key, &[&km.page_size_down]) {
            return self.change_page(|p| p.cycle_page_size(false));
        } else if matches(key, &[&km.toggle_column]) {
            let column_id = self.focused_column_id()?;
            return self.toggle_column_visibility(&column_id);
        } else if matches(key, &[&km.retry]) {
            return self.retry();
        } else {
            tracing::trace!(table = self.id, key = %key, "key ignored");
        }
        None
    }
}

impl<R: Record> Model for Table<R> {
    /// In remote mode, the request for the first page.
    fn init(&self) -> Option<Cmd> {
        if !self.options.remote {
            return None;
        }
        let token = self.fetch.latest()?;
        let request = self.fetch.last_request()?.clone();
        Some(Cmd::message(FetchDataMsg {
            table_id: self.id,
            token,
            request,
        }))
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if let Some(debounce) = msg.downcast_ref::<FilterDebounceMsg>() {
            if debounce.table_id != self.id {
                return None;
            }
            return self.commit_filter(debounce.tag);
        }
        if msg.is::<FocusMsg>() {
            self.focus();
            return None;
        }
        if msg.is::<BlurMsg>() {
            self.blur();
            return None;
        }
        if !self.focus {
            tracing::trace!(table = self.id, "message ignored while blurred");
            return None;
        }
        let key = msg.downcast_ref::<KeyMsg>()?;
        if self.editing.is_some() {
            self.handle_editing_key(key)
        } else {
            self.handle_key(key)
        }
    }

    fn view(&self) -> String {
        Self::view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_core::{KeyType, drain};
    use keel_style::strip_ansi;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        name: String,
        kids: Vec<Item>,
    }

    impl Record for Item {
        fn field(&self, key: &str) -> CellValue {
            match key {
                "id" => self.id.into(),
                "name" => self.name.as_str().into(),
                _ => CellValue::Null,
            }
        }

        fn sub_rows(&self) -> &[Self] {
            &self.kids
        }
    }

    fn item(id: i64, name: &str) -> Item {
        Item {
            id,
            name: name.to_string(),
            kids: Vec::new(),
        }
    }

    fn columns() -> Vec<ColumnDefinition<Item>> {
        vec![
            ColumnDefinition::new("id", "Id"),
            ColumnDefinition::new("name", "Name"),
        ]
    }

    fn items(n: i64) -> Vec<Item> {
        (0..n).map(|i| item(i, &format!("Item{i}"))).collect()
    }

    fn table(options: TableOptions, n: i64) -> Table<Item> {
        Table::new(columns(), options).unwrap().with_items(items(n))
    }

    fn key(s: &str) -> Message {
        Message::new(KeyMsg::parse(s))
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert_eq!(
            Table::<Item>::new(Vec::new(), TableOptions::default()).unwrap_err(),
            Error::EmptyColumns
        );
        let dup = vec![ColumnDefinition::new("id", "Id"), ColumnDefinition::new("id", "Other")];
        assert_eq!(
            Table::<Item>::new(dup, TableOptions::default()).unwrap_err(),
            Error::DuplicateColumn("id".into())
        );
        let options = TableOptions {
            sort_by: vec![SortRule::asc("age")],
            ..TableOptions::default()
        };
        assert_eq!(
            Table::new(columns(), options).unwrap_err(),
            Error::UnknownColumn {
                column: "age".into(),
                setting: "sort_by"
            }
        );
        let options = TableOptions {
            default_page_size: 0,
            ..TableOptions::default()
        };
        assert_eq!(Table::new(columns(), options).unwrap_err(), Error::InvalidPageSize(0));
        let blank = vec![ColumnDefinition::<Item>::new("id", "Id").accessor("")];
        assert_eq!(
            Table::new(blank, TableOptions::default()).unwrap_err(),
            Error::MissingAccessor("id".into())
        );
    }

    #[test]
    fn test_local_paging() {
        let mut t = table(TableOptions::default(), 25);
        assert_eq!(t.page_count(), 3);
        assert_eq!(t.row_ids().len(), 10);
        assert!(t.next_page().is_none());
        assert_eq!(t.range_label(), "11-20 of 25");
        t.last_page();
        assert_eq!(t.row_ids(), ["20", "21", "22", "23", "24"]);
        t.goto_page(99);
        assert_eq!(t.page_index(), 2);
        t.set_page_size(25);
        assert_eq!(t.page_index(), 0);
        assert_eq!(t.page_count(), 1);
    }

    #[test]
    fn test_sort_resets_page_and_reorders() {
        let mut t = table(TableOptions::default(), 12);
        t.next_page();
        t.toggle_sort("id");
        t.toggle_sort("id");
        assert_eq!(t.page_index(), 0);
        assert_eq!(t.row_ids()[0], "11");
        t.toggle_sort("id");
        assert!(t.sort_by().is_empty());
        assert_eq!(t.row_ids()[0], "0");
    }

    #[test]
    fn test_global_filter_is_immediate_locally() {
        let mut t = table(TableOptions::default(), 12);
        assert!(t.set_global_filter("item1").is_none());
        assert_eq!(t.row_ids(), ["1", "10", "11"]);
        assert_eq!(t.range_label(), "1-3 of 3");
    }

    #[test]
    fn test_column_filter_needs_option() {
        let mut t = table(TableOptions::default(), 12);
        assert!(!t.set_column_filter("name", "Item2"));
        let mut t = table(
            TableOptions {
                disable_column_filters: false,
                ..TableOptions::default()
            },
            12,
        );
        assert!(t.set_column_filter("name", "item2"));
        assert_eq!(t.row_ids(), ["2"]);
        assert!(t.set_column_filter("name", ""));
        assert_eq!(t.row_ids().len(), 10);
    }

    #[test]
    fn test_multi_select_and_select_all() {
        let mut t = table(TableOptions::default(), 3);
        let events = drain(t.toggle_row_selected("1"));
        let msg = events[0].downcast_ref::<SelectionChangedMsg<Item>>().unwrap();
        assert_eq!(msg.ids, ["1"]);
        assert!(msg.rows.is_empty());
        assert_eq!(t.all_selected_state(), AllSelected::Some);
        t.toggle_all_rows_selected();
        assert_eq!(t.all_selected_state(), AllSelected::All);
        t.toggle_all_rows_selected();
        assert!(t.selected_row_ids().is_empty());
    }

    #[test]
    fn test_emit_selected_rows() {
        let mut t = table(
            TableOptions {
                emit_selected_rows: true,
                ..TableOptions::default()
            },
            3,
        );
        let events = drain(t.toggle_row_selected("2"));
        let msg = events[0].downcast_ref::<SelectionChangedMsg<Item>>().unwrap();
        assert_eq!(msg.rows, vec![item(2, "Item2")]);
    }

    #[test]
    fn test_disabled_rows_hide_select_all() {
        let t = table(TableOptions::default(), 3).with_item_disabled(|i: &Item| i.id == 0);
        assert!(!t.show_select_all());
        assert!(t.is_row_disabled("0"));
    }

    #[test]
    fn test_controlled_selection_drops_disabled() {
        let mut t = table(TableOptions::default(), 3).with_item_disabled(|i: &Item| i.id == 0);
        t.set_selected_row_ids(vec!["0".into(), "2".into()]);
        assert_eq!(t.selected_row_ids(), ["2"]);
    }

    #[test]
    fn test_custom_row_ids() {
        let t = table(TableOptions::default(), 2).with_row_id(|i: &Item| format!("item-{}", i.id));
        assert_eq!(t.row_ids(), ["item-0", "item-1"]);
        assert_eq!(t.record("item-1").map(|i| i.id), Some(1));
    }

    #[test]
    fn test_expansion_shows_children() {
        let mut parent = item(0, "parent");
        parent.kids = vec![item(10, "child a"), item(11, "child b")];
        let mut t = Table::new(
            columns(),
            TableOptions {
                disable_expand: false,
                ..TableOptions::default()
            },
        )
        .unwrap()
        .with_items(vec![parent, item(1, "single")]);
        assert_eq!(t.row_ids(), ["0", "1"]);
        assert!(!t.toggle_row_expanded("1"));
        assert!(t.toggle_row_expanded("0"));
        assert_eq!(t.row_ids(), ["0", "0.0", "0.1", "1"]);
        assert_eq!(t.range_label(), "1-2 of 2");
        assert!(t.all_rows_expanded());
        t.toggle_all_rows_expanded();
        assert_eq!(t.row_ids(), ["0", "1"]);
    }

    #[test]
    fn test_grouping_and_collapse() {
        let data: Vec<Item> = (0..4).map(|i| item(i, if i % 2 == 0 { "even" } else { "odd" })).collect();
        let mut t = Table::new(
            columns(),
            TableOptions {
                disable_group_by: false,
                ..TableOptions::default()
            },
        )
        .unwrap()
        .with_items(data);
        t.toggle_group_by("name");
        assert_eq!(t.display_rows().len(), 6);
        assert_eq!(t.range_label(), "1-2 of 2");
        assert!(t.toggle_group_expanded("name=even"));
        assert_eq!(t.row_ids(), ["1", "3"]);
        assert!(!t.toggle_group_expanded("name=missing"));
    }

    #[test]
    fn test_remote_emits_requests_and_drops_stale_pages() {
        let mut t = Table::new(
            columns(),
            TableOptions {
                remote: true,
                row_count: Some(30),
                ..TableOptions::default()
            },
        )
        .unwrap();
        let first = t.latest_token().unwrap();
        let events = drain(t.next_page());
        let msg = events[0].downcast_ref::<FetchDataMsg>().unwrap();
        assert_eq!(msg.request.page_index, 1);
        assert_ne!(msg.token, first);
        assert_eq!(t.fetch_phase(), FetchPhase::Fetching);

        assert!(!t.receive_page(first, items(10), 30).is_accepted());
        assert!(t.row_ids().is_empty());
        assert!(matches!(t.receive_page(msg.token, items(10), 30), Received::Applied));
        assert_eq!(t.fetch_phase(), FetchPhase::Idle);
        assert_eq!(t.range_label(), "11-20 of 30");
    }

    #[test]
    fn test_early_filter_tick_waits_out_the_window() {
        let mut t = Table::new(
            columns(),
            TableOptions {
                remote: true,
                filter_debounce_ms: 20,
                ..TableOptions::default()
            },
        )
        .unwrap();
        let tick = t.set_global_filter("item").unwrap();
        assert!(tick.due().is_some());

        let early = tick.execute().unwrap();
        let rescheduled = t.update(early).expect("an early tick is scheduled again");
        assert!(rescheduled.due().is_some());
        assert_eq!(t.global_filter(), "");

        let msgs = drain(Some(rescheduled));
        let commit = t.update(msgs.into_iter().next().unwrap());
        let fetch = drain(commit);
        let fetch = fetch[0].downcast_ref::<FetchDataMsg>().unwrap();
        assert_eq!(fetch.request.filter_text, "item");
        assert_eq!(t.global_filter(), "item");
    }

    #[test]
    fn test_row_count_clamp_in_remote_mode_refetches() {
        let mut t = Table::new(
            columns(),
            TableOptions {
                remote: true,
                row_count: Some(30),
                ..TableOptions::default()
            },
        )
        .unwrap();
        let events = drain(t.last_page());
        let token = events[0].downcast_ref::<FetchDataMsg>().unwrap().token;

        let received = t.receive_page(token, items(10), 12);
        assert!(received.is_accepted());
        let events = drain(received.into_cmd());
        let msg = events[0].downcast_ref::<FetchDataMsg>().unwrap();
        assert_eq!(msg.request.page_index, 1);
        assert_eq!(t.page_index(), 1);
    }

    #[test]
    fn test_remote_does_not_reorder() {
        let mut t = Table::new(
            columns(),
            TableOptions {
                remote: true,
                ..TableOptions::default()
            },
        )
        .unwrap()
        .with_items(items(3));
        let events = drain(t.toggle_sort("id"));
        assert_eq!(events.len(), 1);
        t.toggle_sort("id");
        assert_eq!(t.row_ids(), ["0", "1", "2"]);
    }

    #[test]
    fn test_unchanged_request_not_reemitted_but_retry_forces() {
        let mut t = Table::new(
            columns(),
            TableOptions {
                remote: true,
                row_count: Some(5),
                ..TableOptions::default()
            },
        )
        .unwrap();
        assert!(t.next_page().is_none());
        let events = drain(t.retry());
        assert!(events[0].is::<RetryRequestedMsg>());
        assert!(events[1].is::<FetchDataMsg>());
    }

    #[test]
    fn test_hidden_column_leaves_request() {
        let mut t = Table::new(
            columns(),
            TableOptions {
                remote: true,
                ..TableOptions::default()
            },
        )
        .unwrap();
        let events = drain(t.toggle_column_visibility("id"));
        let msg = events[0].downcast_ref::<FetchDataMsg>().unwrap();
        assert_eq!(msg.request.show_columns, ["name"]);
        assert!(t.toggle_column_visibility("name").is_none());
        drain(t.toggle_column_visibility("id"));
        assert_eq!(t.visible_columns(), ["id", "name"]);
    }

    #[test]
    fn test_keys_drive_cursor_selection_and_sort() {
        let mut t = table(TableOptions::default(), 3);
        t.update(Message::new(FocusMsg));
        t.update(key("down"));
        let events = drain(t.update(Message::new(KeyMsg::from_type(KeyType::Space))));
        assert!(events[0].is::<SelectionChangedMsg<Item>>());
        assert!(t.is_selected("1"));
        t.update(key("s"));
        t.update(key("s"));
        assert_eq!(t.row_ids(), ["2", "1", "0"]);
    }

    #[test]
    fn test_blurred_table_ignores_keys() {
        let mut t = table(TableOptions::default(), 3);
        assert!(t.update(key(" ")).is_none());
        assert!(t.selected_row_ids().is_empty());
    }

    #[test]
    fn test_filter_editing_with_keys() {
        let mut t = table(TableOptions::default(), 12);
        t.focus();
        t.update(key("/"));
        assert!(t.is_editing());
        for c in ['1', '1'] {
            t.update(Message::new(KeyMsg::from_char(c)));
        }
        assert_eq!(t.row_ids(), ["11"]);
        t.update(key("esc"));
        assert!(!t.is_editing());
        t.update(key("n"));
        assert_eq!(t.page_index(), 0);
    }

    #[test]
    fn test_view_shows_title_headers_and_cells() {
        let t = table(TableOptions::titled("My Table"), 1);
        let view = strip_ansi(&t.view());
        assert!(view.contains("My Table"));
        assert!(view.contains("Id"));
        assert!(view.contains("Name"));
        assert!(view.contains("Item0"));
        assert!(view.contains("1-1 of 1"));
    }
}
