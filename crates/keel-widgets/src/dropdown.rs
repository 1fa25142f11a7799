//! Button with a popup menu.
//!
//! Items nest one level: an item with children is a heading that cannot be
//! clicked, and its children are disabled whenever it is. Clicking an item
//! emits a [`DropdownItemClickedMsg`] with the item's index path and closes
//! the menu unless the item asks to keep it open.

use keel_core::{BlurMsg, Cmd, FocusMsg, KeyMsg, Message, Model};
use keel_style::{Border, Style, Theme};

use crate::button::{Button, ButtonVariant};
use crate::error::Error;
use crate::key::{Binding, matches};
use crate::next_id;

/// Arrow appended to the button content.
pub const ARROW_GLYPH: &str = "▾";

/// A menu item was clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownItemClickedMsg {
    /// Id of the dropdown.
    pub dropdown_id: u64,
    /// Index path of the item: `[i]` for top-level items, `[i, j]` for the
    /// `j`th child of heading `i`.
    pub path: Vec<usize>,
}

/// One menu entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownItem {
    /// Label.
    pub text: String,
    /// Not clickable.
    pub disabled: bool,
    /// Children; a non-empty list turns this item into a heading.
    pub items: Vec<DropdownItem>,
    /// Leave the menu open after a click.
    pub keep_open: bool,
}

impl DropdownItem {
    /// A clickable item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A heading with children.
    pub fn heading(text: impl Into<String>, items: Vec<Self>) -> Self {
        Self {
            text: text.into(),
            items,
            ..Self::default()
        }
    }

    /// Set the disabled flag.
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Keep the menu open after this item is clicked.
    pub const fn keep_open(mut self, keep_open: bool) -> Self {
        self.keep_open = keep_open;
        self
    }

    fn is_heading(&self) -> bool {
        !self.items.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Entry {
    path: Vec<usize>,
    text: String,
    heading: bool,
    disabled: bool,
    keep_open: bool,
}

impl Entry {
    const fn clickable(&self) -> bool {
        !self.heading && !self.disabled
    }
}

fn flatten(items: &[DropdownItem]) -> Result<Vec<Entry>, Error> {
    let mut out = Vec::new();
    for (i, item) in items.iter().enumerate() {
        out.push(Entry {
            path: vec![i],
            text: item.text.clone(),
            heading: item.is_heading(),
            disabled: item.disabled,
            keep_open: item.keep_open,
        });
        for (j, child) in item.items.iter().enumerate() {
            if child.is_heading() {
                return Err(Error::NestedTooDeep(child.text.clone()));
            }
            out.push(Entry {
                path: vec![i, j],
                text: child.text.clone(),
                heading: false,
                disabled: item.disabled || child.disabled,
                keep_open: child.keep_open,
            });
        }
    }
    Ok(out)
}

/// Key bindings for the dropdown.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Press the button, or click the highlighted item.
    pub activate: Binding,
    /// Highlight the previous item.
    pub up: Binding,
    /// Highlight the next item.
    pub down: Binding,
    /// Close the menu.
    pub close: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            activate: Binding::new().keys(&["enter", " "]).help("enter", "select"),
            up: Binding::new().keys(&["up", "k"]).help("↑/k", "up"),
            down: Binding::new().keys(&["down", "j"]).help("↓/j", "down"),
            close: Binding::new().keys(&["esc"]).help("esc", "close"),
        }
    }
}

/// Menu styles.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    /// Clickable items.
    pub item: Style,
    /// The highlighted item.
    pub highlighted: Style,
    /// Headings.
    pub heading: Style,
    /// Disabled items and headings.
    pub disabled: Style,
    /// Menu box.
    pub menu: Style,
}

impl Styles {
    /// Styles derived from a theme.
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            item: Style::new(),
            highlighted: Style::new().reverse().foreground(theme.highlight),
            heading: Style::new().bold().foreground(theme.secondary),
            disabled: Style::new().foreground(theme.muted).faint(),
            menu: Style::new().border(Border::from(theme.border)),
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// A button that opens a menu of actions.
#[derive(Debug, Clone)]
pub struct ButtonDropdown {
    id: u64,
    button: Button,
    items: Vec<DropdownItem>,
    entries: Vec<Entry>,
    open: bool,
    highlight: Option<usize>,
    /// Hide the arrow after the content.
    pub disable_arrow: bool,
    /// Render the button without brackets, for dark header bars.
    pub dark_theme: bool,
    /// Key bindings.
    pub key_map: KeyMap,
    /// Styles.
    pub styles: Styles,
}

impl ButtonDropdown {
    /// A dropdown with the given button content and items.
    ///
    /// # Errors
    ///
    /// [`Error::NestedTooDeep`] when a child item has children of its own.
    pub fn new(content: impl Into<String>, items: Vec<DropdownItem>) -> Result<Self, Error> {
        let entries = flatten(&items)?;
        Ok(Self {
            id: next_id(),
            button: Button::new(content),
            items,
            entries,
            open: false,
            highlight: None,
            disable_arrow: false,
            dark_theme: false,
            key_map: KeyMap::default(),
            styles: Styles::default(),
        })
    }

    /// Primary or normal button; other variants fall back to normal.
    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.button.variant = match variant {
            ButtonVariant::Primary => ButtonVariant::Primary,
            _ => ButtonVariant::Normal,
        };
        self
    }

    /// Set the disabled flag.
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.button.disabled = disabled;
        self
    }

    /// Set the loading flag.
    pub const fn loading(mut self, loading: bool) -> Self {
        self.button.loading = loading;
        self
    }

    /// Hide the arrow.
    pub const fn disable_arrow(mut self, disable: bool) -> Self {
        self.disable_arrow = disable;
        self
    }

    /// Dark header-bar rendering.
    pub const fn dark_theme(mut self, dark: bool) -> Self {
        self.dark_theme = dark;
        self
    }

    /// Unique id, carried by [`DropdownItemClickedMsg`].
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Id of the inner button, carried by its `ButtonClickedMsg`.
    pub const fn button_id(&self) -> u64 {
        self.button.id()
    }

    /// Whether the menu is open.
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Items as configured.
    pub fn items(&self) -> &[DropdownItem] {
        &self.items
    }

    /// Path of the highlighted item.
    pub fn highlighted(&self) -> Option<&[usize]> {
        self.highlight.map(|i| self.entries[i].path.as_slice())
    }

    /// Set the loading flag in place.
    pub const fn set_loading(&mut self, loading: bool) {
        self.button.loading = loading;
    }

    /// Set the disabled flag in place.
    pub const fn set_disabled(&mut self, disabled: bool) {
        self.button.disabled = disabled;
    }

    /// Replace the items. An empty list closes an open menu.
    ///
    /// # Errors
    ///
    /// [`Error::NestedTooDeep`]; the previous items are kept.
    pub fn set_items(&mut self, items: Vec<DropdownItem>) -> Result<(), Error> {
        self.entries = flatten(&items)?;
        self.items = items;
        if self.items.is_empty() && self.open {
            self.close();
        } else if self.open {
            self.highlight = self.first_clickable();
        }
        Ok(())
    }

    /// Press the button: notify the owner and open the menu when there is
    /// something to show.
    pub fn activate(&mut self) -> Option<Cmd> {
        let cmd = self.button.click()?;
        if !self.items.is_empty() {
            self.open = true;
            self.highlight = self.first_clickable();
            tracing::debug!(dropdown = self.id, "dropdown opened");
        }
        Some(cmd)
    }

    /// Close the menu.
    pub fn close(&mut self) {
        if self.open {
            tracing::debug!(dropdown = self.id, "dropdown closed");
        }
        self.open = false;
        self.highlight = None;
    }

    /// Click the item at `path`. Headings, disabled items and unknown paths
    /// are ignored.
    pub fn click_item(&mut self, path: &[usize]) -> Option<Cmd> {
        if !self.open {
            return None;
        }
        let entry = self.entries.iter().find(|e| e.path == path)?;
        if !entry.clickable() {
            tracing::trace!(dropdown = self.id, ?path, "ignored click on inactive item");
            return None;
        }
        let msg = DropdownItemClickedMsg {
            dropdown_id: self.id,
            path: entry.path.clone(),
        };
        if !entry.keep_open {
            self.close();
        }
        Some(Cmd::message(msg))
    }

    fn first_clickable(&self) -> Option<usize> {
        self.entries.iter().position(Entry::clickable)
    }

    fn move_highlight(&mut self, forward: bool) {
        let clickable: Vec<usize> = (0..self.entries.len())
            .filter(|&i| self.entries[i].clickable())
            .collect();
        if clickable.is_empty() {
            self.highlight = None;
            return;
        }
        let pos = self
            .highlight
            .and_then(|h| clickable.iter().position(|&i| i == h));
        let next = match (pos, forward) {
            (None, _) => 0,
            (Some(p), true) => (p + 1).min(clickable.len() - 1),
            (Some(p), false) => p.saturating_sub(1),
        };
        self.highlight = Some(clickable[next]);
    }

    fn button_view(&self) -> String {
        let mut button = self.button.clone();
        if !self.disable_arrow {
            button.content = format!("{} {ARROW_GLYPH}", button.content);
        }
        if self.dark_theme {
            button.variant = ButtonVariant::Link;
            button.styles.link = Style::new();
        }
        button.view()
    }

    fn menu_view(&self) -> String {
        let lines: Vec<String> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let indent = if e.path.len() > 1 { "  " } else { "" };
                let text = format!("{indent}{}", e.text);
                let style = if e.heading {
                    if e.disabled { self.styles.disabled } else { self.styles.heading }
                } else if e.disabled {
                    self.styles.disabled
                } else if Some(i) == self.highlight {
                    self.styles.highlighted
                } else {
                    self.styles.item
                };
                let marker = if Some(i) == self.highlight { "› " } else { "  " };
                format!("{marker}{}", style.render(&text))
            })
            .collect();
        let width = lines.iter().map(|l| keel_style::visible_width(l)).max().unwrap_or(0);
        let padded: Vec<String> = lines.iter().map(|l| keel_style::pad_right(l, width)).collect();
        self.styles.menu.render(&padded.join("\n"))
    }

    /// Render the button, and the menu below it when open.
    pub fn view(&self) -> String {
        if self.open {
            format!("{}\n{}", self.button_view(), self.menu_view())
        } else {
            self.button_view()
        }
    }
}

impl Model for ButtonDropdown {
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if msg.is::<FocusMsg>() {
            self.button.focus();
            return None;
        }
        if msg.is::<BlurMsg>() {
            self.button.blur();
            self.close();
            return None;
        }
        let Some(key) = msg.downcast_ref::<KeyMsg>() else {
            return None;
        };
        if !self.open {
            if self.button.focused() && matches(key, &[&self.key_map.activate]) {
                return self.activate();
            }
            return None;
        }
        if matches(key, &[&self.key_map.close]) {
            self.close();
        } else if matches(key, &[&self.key_map.up]) {
            self.move_highlight(false);
        } else if matches(key, &[&self.key_map.down]) {
            self.move_highlight(true);
        } else if matches(key, &[&self.key_map.activate])
            && let Some(i) = self.highlight
        {
            let path = self.entries[i].path.clone();
            return self.click_item(&path);
        }
        None
    }

    fn view(&self) -> String {
        Self::view(self)
    }
}
