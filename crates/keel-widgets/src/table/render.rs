//! Text rendering of a [`Table`].
//!
//! ```text
//! ╭──────────────────────────────────────────╮
//! │ Orders                          [ Add ]  │
//! │                                          │
//! │ / Search                                 │
//! │ Columns: [x] Id  [x] Name                │
//! │                                          │
//! │ [ ] Id ↕  Name ↕                         │
//! │ [x] 1     Widget                         │
//! │ ──────────────────────────────────────── │
//! │ Rows per page: 10  1-1 of 1  « ‹ › »     │
//! ╰──────────────────────────────────────────╯
//! ```

use keel_style::{Style, Theme, fit, strip_ansi, visible_width};

use super::column::{ColumnDefinition, Record};
use super::row_model::{DisplayRow, GroupHeader, RowLine};
use super::selection::{AllSelected, SelectionMode};
use super::sort::SortDirection;
use super::{Editing, Table};
use crate::layout::Container;

const COLUMN_GAP: &str = "  ";

/// Table styles.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    /// Column headers.
    pub header: Style,
    /// Header of the column under the column cursor.
    pub focused_header: Style,
    /// Body cells.
    pub cell: Style,
    /// The line under the row cursor.
    pub cursor: Style,
    /// Disabled rows.
    pub disabled: Style,
    /// Group header lines.
    pub group: Style,
    /// Placeholders, inactive controls and labels.
    pub muted: Style,
    /// Error text.
    pub error: Style,
    /// Frame palette.
    pub theme: Theme,
}

impl Styles {
    /// Styles derived from a theme.
    pub const fn from_theme(theme: &Theme) -> Self {
        Self {
            header: Style::new().bold(),
            focused_header: Style::new().bold().underline().foreground(theme.primary),
            cell: Style::new(),
            cursor: Style::new().reverse().foreground(theme.highlight),
            disabled: Style::new().foreground(theme.muted).faint(),
            group: Style::new().bold().foreground(theme.secondary),
            muted: Style::new().foreground(theme.muted),
            error: Style::new().foreground(theme.error),
            theme: *theme,
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

impl<R: Record> Table<R> {
    /// Render the table.
    pub fn view(&self) -> String {
        let widths = self.column_widths();
        let mut lines = Vec::new();

        if !self.options.disable_filters {
            lines.push(self.global_input.view());
        }
        if !self.options.disable_settings {
            lines.push(self.settings_view());
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }

        lines.push(self.header_view(&widths));
        if self.column_filters_enabled() {
            lines.push(self.column_filter_view(&widths));
        }

        if let Some(error) = &self.options.error_text {
            lines.push(format!(
                "{}  {}",
                self.styles.error.render(error),
                self.styles.muted.render("Retry (r)")
            ));
        } else {
            lines.extend(
                self.rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| self.line_view(i, row, &widths)),
            );
            if self.options.loading {
                lines.push(self.styles.muted.render("Loading..."));
            } else if self.rows.is_empty() {
                lines.push("No records found".to_string());
            }
        }

        let footer = if self.options.disable_pagination {
            String::new()
        } else {
            self.pagination_view()
        };
        let mut container = Container::new()
            .title(self.options.title.as_str())
            .action_group(self.action_group.as_str())
            .body(lines.join("\n"))
            .footer(footer);
        container.theme = self.styles.theme;
        container.view()
    }

    fn visible_defs(&self) -> impl Iterator<Item = &ColumnDefinition<R>> {
        self.visible.iter().filter_map(|id| self.column(id))
    }

    fn prefix_width(&self) -> usize {
        let select = if self.options.disable_row_select { 0 } else { 4 };
        let expand = if self.options.disable_expand { 0 } else { 2 };
        select + expand
    }

    fn column_filter_placeholder(&self) -> String {
        format!("Search {} records...", self.arena.roots.len())
    }

    fn header_label(&self, column: &ColumnDefinition<R>) -> String {
        if self.options.disable_sort_by || !column.sortable {
            return column.header.clone();
        }
        let glyph = match self.sort.direction(&column.id) {
            None => "↕".to_string(),
            Some((direction, position)) => {
                let arrow = match direction {
                    SortDirection::Ascending => "↑",
                    SortDirection::Descending => "↓",
                };
                if self.sort.rules().len() > 1 {
                    format!("{arrow}{}", position + 1)
                } else {
                    arrow.to_string()
                }
            }
        };
        format!("{} {glyph}", column.header)
    }

    fn column_widths(&self) -> Vec<usize> {
        let placeholder = visible_width(&self.column_filter_placeholder());
        self.visible_defs()
            .enumerate()
            .map(|(n, column)| {
                if let Some(width) = column.width {
                    return width;
                }
                let mut width = visible_width(&self.header_label(column));
                if self.column_filters_enabled() && column.filterable {
                    width = width
                        .max(placeholder)
                        .max(visible_width(self.filter.column(&column.id)));
                }
                for row in &self.rows {
                    let DisplayRow::Row(line) = row else { continue };
                    let Some(record) = self.record(&line.id) else { continue };
                    let indent = if n == 0 { line.depth * 2 } else { 0 };
                    width = width.max(indent + visible_width(&column.value(record).display()));
                }
                width
            })
            .collect()
    }

    fn select_all_glyph(&self) -> String {
        if self.options.disable_row_select {
            return String::new();
        }
        let glyph = if self.show_select_all() {
            match self.all_selected_state() {
                AllSelected::None => "[ ]",
                AllSelected::Some => "[-]",
                AllSelected::All => "[x]",
            }
        } else {
            "   "
        };
        format!("{glyph} ")
    }

    fn expand_all_glyph(&self) -> String {
        if self.options.disable_expand {
            return String::new();
        }
        let glyph = if self.arena.expandable_ids().is_empty() {
            " "
        } else if self.all_rows_expanded() {
            "▾"
        } else {
            "▸"
        };
        format!("{glyph} ")
    }

    fn is_focused_column(&self, column: &ColumnDefinition<R>) -> bool {
        self.focus && self.focused_column().is_some_and(|c| c.id == column.id)
    }

    fn header_view(&self, widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .visible_defs()
            .zip(widths)
            .map(|(column, &width)| {
                let text = fit(&self.header_label(column), width);
                if self.is_focused_column(column) {
                    self.styles.focused_header.render(&text)
                } else {
                    self.styles.header.render(&text)
                }
            })
            .collect();
        format!(
            "{}{}{}",
            self.select_all_glyph(),
            self.expand_all_glyph(),
            cells.join(COLUMN_GAP)
        )
    }

    fn column_filter_view(&self, widths: &[usize]) -> String {
        let placeholder = self.column_filter_placeholder();
        let cells: Vec<String> = self
            .visible_defs()
            .zip(widths)
            .map(|(column, &width)| {
                if !column.filterable {
                    return " ".repeat(width);
                }
                if matches!(&self.editing, Some(Editing::Column(id)) if *id == column.id) {
                    let mut input = self.column_input.clone();
                    input.placeholder.clone_from(&placeholder);
                    input.width = width;
                    return input.view();
                }
                let text = self.filter.column(&column.id);
                if text.is_empty() {
                    self.styles.muted.render(&fit(&placeholder, width))
                } else {
                    fit(text, width)
                }
            })
            .collect();
        format!("{}{}", " ".repeat(self.prefix_width()), cells.join(COLUMN_GAP))
    }

    fn settings_view(&self) -> String {
        let toggles: Vec<String> = self
            .columns
            .iter()
            .map(|column| {
                let mark = if self.visible.contains(&column.id) { "[x]" } else { "[ ]" };
                let text = format!("{mark} {}", column.header);
                if self.is_focused_column(column) {
                    self.styles.focused_header.render(&text)
                } else {
                    text
                }
            })
            .collect();
        format!("{} {}", self.styles.muted.render("Columns:"), toggles.join(COLUMN_GAP))
    }

    fn line_view(&self, index: usize, row: &DisplayRow, widths: &[usize]) -> String {
        let line = match row {
            DisplayRow::Group(group) => self.group_view(group),
            DisplayRow::Row(line) => self.record_view(line, widths),
        };
        if self.focus && index == self.cursor_row {
            self.styles.cursor.render(&strip_ansi(&line))
        } else {
            line
        }
    }

    fn group_view(&self, group: &GroupHeader) -> String {
        let glyph = if group.expanded { "▾" } else { "▸" };
        let header = self
            .column(&group.column_id)
            .map_or(group.column_id.as_str(), |c| c.header.as_str());
        let text = format!(
            "{}{}{glyph} {header}: {} ({})",
            " ".repeat(self.prefix_width()),
            "  ".repeat(group.depth),
            group.value,
            group.count
        );
        self.styles.group.render(&text)
    }

    fn record_view(&self, line: &RowLine, widths: &[usize]) -> String {
        let Some(record) = self.record(&line.id) else {
            return String::new();
        };

        let select = if self.options.disable_row_select {
            String::new()
        } else {
            let selected = self.selection.is_selected(&line.id);
            let glyph = match (self.selection.mode(), selected) {
                (SelectionMode::Multi, true) => "[x]",
                (SelectionMode::Multi, false) => "[ ]",
                (SelectionMode::Single { .. }, true) => "(•)",
                (SelectionMode::Single { .. }, false) => "( )",
            };
            if line.disabled {
                format!("{} ", self.styles.disabled.render(glyph))
            } else {
                format!("{glyph} ")
            }
        };

        let expander = if self.options.disable_expand {
            String::new()
        } else if !line.expandable {
            "  ".to_string()
        } else if line.expanded {
            "▾ ".to_string()
        } else {
            "▸ ".to_string()
        };

        let style = if line.disabled { self.styles.disabled } else { self.styles.cell };
        let cells: Vec<String> = self
            .visible_defs()
            .zip(widths)
            .enumerate()
            .map(|(n, (column, &width))| {
                let indent = if n == 0 { "  ".repeat(line.depth) } else { String::new() };
                let text = format!("{indent}{}", column.value(record).display());
                style.render(&fit(&text, width))
            })
            .collect();
        format!("{select}{expander}{}", cells.join(COLUMN_GAP))
    }

    fn pagination_view(&self) -> String {
        let back = !self.paginator.on_first_page();
        let forward = !self.paginator.on_last_page();
        let control = |glyph: &str, active: bool| {
            if active {
                glyph.to_string()
            } else {
                self.styles.muted.render(glyph)
            }
        };
        format!(
            "Rows per page: {}  {}  {} {} {} {}",
            self.paginator.page_size(),
            self.range_label(),
            control("«", back),
            control("‹", back),
            control("›", forward),
            control("»", forward)
        )
    }
}

#[cfg(test)]
mod tests {
    use keel_core::{FocusMsg, Message, Model};
    use keel_style::strip_ansi;

    use super::super::{CellValue, ColumnDefinition, Record, SortRule, Table, TableOptions};

    #[derive(Debug, Clone)]
    struct Row {
        id: i64,
        name: String,
        kids: Vec<Row>,
    }

    impl Record for Row {
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

    fn row(id: i64) -> Row {
        Row {
            id,
            name: format!("Item{id}"),
            kids: Vec::new(),
        }
    }

    fn columns() -> Vec<ColumnDefinition<Row>> {
        vec![
            ColumnDefinition::new("id", "Id"),
            ColumnDefinition::new("name", "Name"),
        ]
    }

    fn render(options: TableOptions, rows: Vec<Row>) -> String {
        let table = Table::new(columns(), options).unwrap().with_items(rows);
        strip_ansi(&table.view())
    }

    #[test]
    fn test_checkboxes_and_select_all() {
        let view = render(TableOptions::default(), vec![row(1)]);
        assert!(view.contains("[ ] Id ↕"));
        assert!(view.contains("[ ] 1"));
    }

    #[test]
    fn test_radio_buttons_without_select_all() {
        let options = TableOptions {
            multi_select: false,
            ..TableOptions::default()
        };
        let view = render(options, vec![row(1)]);
        assert!(view.contains("( ) 1"));
        assert!(!view.contains("[ ]"));
    }

    #[test]
    fn test_disabled_row_suppresses_select_all() {
        let table = Table::new(columns(), TableOptions::default())
            .unwrap()
            .with_items(vec![row(1)])
            .with_item_disabled(|r: &Row| r.id == 1);
        let view = strip_ansi(&table.view());
        assert!(view.contains("    Id ↕"));
    }

    #[test]
    fn test_sort_glyphs() {
        let options = TableOptions {
            sort_by: vec![SortRule::desc("name"), SortRule::asc("id")],
            multi_sort: true,
            ..TableOptions::default()
        };
        let view = render(options, vec![row(1), row(2)]);
        assert!(view.contains("Name ↓1"));
        assert!(view.contains("Id ↑2"));

        let cols = vec![
            ColumnDefinition::<Row>::new("id", "Id").sortable(false),
            ColumnDefinition::new("name", "Name"),
        ];
        let table = Table::new(cols, TableOptions::default()).unwrap();
        let view = strip_ansi(&table.view());
        assert!(view.contains("Id  "));
        assert!(!view.contains("Id ↕"));
    }

    #[test]
    fn test_column_filter_placeholders() {
        let options = TableOptions {
            disable_column_filters: false,
            ..TableOptions::default()
        };
        let view = render(options, (0..10).map(row).collect());
        assert_eq!(view.matches("Search 10 records...").count(), 2);
    }

    #[test]
    fn test_global_search_and_settings() {
        let view = render(TableOptions::default(), vec![row(1)]);
        assert!(view.contains("/ Search"));
        assert!(view.contains("Columns: [x] Id  [x] Name"));

        let options = TableOptions {
            disable_filters: true,
            disable_settings: true,
            ..TableOptions::default()
        };
        let view = render(options, vec![row(1)]);
        assert!(!view.contains("Search"));
        assert!(!view.contains("Columns:"));
    }

    #[test]
    fn test_footers() {
        assert!(render(TableOptions::default(), Vec::new()).contains("No records found"));
        let loading = TableOptions {
            loading: true,
            ..TableOptions::default()
        };
        let view = render(loading, Vec::new());
        assert!(view.contains("Loading..."));
        assert!(!view.contains("No records found"));

        let failed = TableOptions {
            error_text: Some("Backend unavailable".into()),
            ..TableOptions::default()
        };
        let view = render(failed, vec![row(7)]);
        assert!(view.contains("Backend unavailable  Retry (r)"));
        assert!(!view.contains("Item7"));
    }

    #[test]
    fn test_pagination_footer() {
        let view = render(TableOptions::default(), vec![row(1)]);
        assert!(view.contains("Rows per page: 10  1-1 of 1  « ‹ › »"));
        let options = TableOptions {
            disable_pagination: true,
            ..TableOptions::default()
        };
        assert!(!render(options, vec![row(1)]).contains("Rows per page"));
    }

    #[test]
    fn test_expander_glyphs() {
        let mut parent = row(1);
        parent.kids = vec![row(10)];
        let options = TableOptions {
            disable_expand: false,
            ..TableOptions::default()
        };
        let mut table = Table::new(columns(), options)
            .unwrap()
            .with_items(vec![parent, row(2)]);
        let view = strip_ansi(&table.view());
        assert!(view.contains("[ ] ▸ Id"));
        assert!(view.contains("[ ] ▸ 1"));
        assert!(view.contains("[ ]   2"));

        table.toggle_row_expanded("0");
        let view = strip_ansi(&table.view());
        assert!(view.contains("[ ] ▾ Id"));
        assert!(view.contains("[ ]     10"));
    }

    #[test]
    fn test_group_headers() {
        let options = TableOptions {
            disable_group_by: false,
            default_groups: vec!["name".into()],
            ..TableOptions::default()
        };
        let rows = vec![row(1), row(1), row(2)];
        let view = render(options, rows);
        assert!(view.contains("▾ Name: Item1 (2)"));
        assert!(view.contains("▾ Name: Item2 (1)"));
    }

    #[test]
    fn test_title_and_action_group() {
        let table = Table::new(columns(), TableOptions::titled("Orders"))
            .unwrap()
            .with_action_group("[ Add ]");
        let view = strip_ansi(&table.view());
        let first = view.lines().nth(1).unwrap();
        assert!(first.contains("Orders"));
        assert!(first.contains("[ Add ]"));
    }

    #[test]
    fn test_focused_column_header_is_styled() {
        let mut table = Table::new(columns(), TableOptions::default())
            .unwrap()
            .with_items(vec![row(1)]);
        let before = table.view();
        table.update(Message::new(FocusMsg));
        assert_ne!(before, table.view());
        assert_eq!(strip_ansi(&before).lines().count(), strip_ansi(&table.view()).lines().count());
    }
}
