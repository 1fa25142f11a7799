//! Single-line text input.
//!
//! Used on its own and inside the autosuggest and table filters. The input
//! never emits events; owners call [`TextInput::handle_key`] and look at the
//! returned flag to learn whether the value changed.

use keel_core::{BlurMsg, Cmd, FocusMsg, KeyMsg, Message, Model};
use keel_style::{Style, Theme};
use unicode_width::UnicodeWidthChar;

use crate::key::{Binding, matches};

/// Key bindings for editing.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Move one character left.
    pub character_backward: Binding,
    /// Move one character right.
    pub character_forward: Binding,
    /// Jump to the start.
    pub line_start: Binding,
    /// Jump to the end.
    pub line_end: Binding,
    /// Delete the character before the cursor.
    pub delete_character_backward: Binding,
    /// Delete the character under the cursor.
    pub delete_character_forward: Binding,
    /// Clear the whole value.
    pub clear: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            character_backward: Binding::new().keys(&["left"]),
            character_forward: Binding::new().keys(&["right"]),
            line_start: Binding::new().keys(&["home", "ctrl+a"]),
            line_end: Binding::new().keys(&["end"]),
            delete_character_backward: Binding::new().keys(&["backspace"]),
            delete_character_forward: Binding::new().keys(&["delete"]),
            clear: Binding::new().keys(&["ctrl+u"]),
        }
    }
}

/// Styles for the input.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    /// Prompt before the value.
    pub prompt: Style,
    /// The value.
    pub text: Style,
    /// Placeholder shown while empty.
    pub placeholder: Style,
    /// Cell under the cursor.
    pub cursor: Style,
    /// Everything, when disabled.
    pub disabled: Style,
}

impl Styles {
    /// Styles derived from a theme.
    pub const fn from_theme(theme: &Theme) -> Self {
        Self {
            prompt: Style::new().foreground(theme.primary),
            text: Style::new(),
            placeholder: Style::new().foreground(theme.muted),
            cursor: Style::new().reverse(),
            disabled: Style::new().foreground(theme.muted).faint(),
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// Single-line text input model.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: Vec<char>,
    pos: usize,
    focus: bool,
    disabled: bool,
    /// Text shown before the value.
    pub prompt: String,
    /// Shown while the value is empty.
    pub placeholder: String,
    /// Maximum number of characters; 0 means unlimited.
    pub char_limit: usize,
    /// Minimum rendered width of the value area, in cells; 0 means as wide as
    /// the value.
    pub width: usize,
    /// Key bindings.
    pub key_map: KeyMap,
    /// Styles.
    pub styles: Styles,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    /// An empty, unfocused input.
    pub fn new() -> Self {
        Self {
            value: Vec::new(),
            pos: 0,
            focus: false,
            disabled: false,
            prompt: String::new(),
            placeholder: String::new(),
            char_limit: 0,
            width: 0,
            key_map: KeyMap::default(),
            styles: Styles::default(),
        }
    }

    /// Set the prompt.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the placeholder.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the character limit.
    pub const fn char_limit(mut self, n: usize) -> Self {
        self.char_limit = n;
        self
    }

    /// Set the width.
    pub const fn width(mut self, w: usize) -> Self {
        self.width = w;
        self
    }

    /// Current value.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Whether the value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the value and move the cursor to its end. The character limit
    /// applies.
    pub fn set_value(&mut self, s: &str) {
        let mut chars: Vec<char> = s.chars().filter(|c| !c.is_control()).collect();
        if self.char_limit > 0 {
            chars.truncate(self.char_limit);
        }
        self.value = chars;
        self.pos = self.value.len();
    }

    /// Cursor position in characters.
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor, clamped to the value.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    /// Whether the input has focus.
    pub const fn focused(&self) -> bool {
        self.focus
    }

    /// Give the input focus. Disabled inputs stay unfocused.
    pub const fn focus(&mut self) {
        self.focus = !self.disabled;
    }

    /// Remove focus.
    pub const fn blur(&mut self) {
        self.focus = false;
    }

    /// Whether the input ignores keys.
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Disable or enable the input. Disabling also blurs it.
    pub const fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.focus = false;
        }
    }

    /// Clear the value.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    fn insert(&mut self, runes: &[char]) {
        for &c in runes.iter().filter(|c| !c.is_control()) {
            if self.char_limit > 0 && self.value.len() >= self.char_limit {
                break;
            }
            self.value.insert(self.pos, c);
            self.pos += 1;
        }
    }

    /// Apply one key press. Returns whether the value changed.
    pub fn handle_key(&mut self, key: &KeyMsg) -> bool {
        if !self.focus || self.disabled {
            return false;
        }
        let snapshot = self.value.clone();
        let k = key.to_string();

        if matches(&k, &[&self.key_map.character_backward]) {
            self.pos = self.pos.saturating_sub(1);
        } else if matches(&k, &[&self.key_map.character_forward]) {
            self.set_cursor(self.pos + 1);
        } else if matches(&k, &[&self.key_map.line_start]) {
            self.pos = 0;
        } else if matches(&k, &[&self.key_map.line_end]) {
            self.pos = self.value.len();
        } else if matches(&k, &[&self.key_map.delete_character_backward]) {
            if self.pos > 0 {
                self.value.remove(self.pos - 1);
                self.pos -= 1;
            }
        } else if matches(&k, &[&self.key_map.delete_character_forward]) {
            if self.pos < self.value.len() {
                self.value.remove(self.pos);
            }
        } else if matches(&k, &[&self.key_map.clear]) {
            self.reset();
        } else if let Some(runes) = key.typed()
            && !key.alt
        {
            self.insert(runes);
        }

        snapshot != self.value
    }

    /// Render the input.
    pub fn view(&self) -> String {
        let prompt = if self.prompt.is_empty() {
            String::new()
        } else {
            self.styles.prompt.render(&self.prompt)
        };

        if self.disabled {
            let shown = if self.value.is_empty() {
                self.placeholder.clone()
            } else {
                self.value()
            };
            return format!("{prompt}{}", self.styles.disabled.render(&self.padded(&shown)));
        }

        if self.value.is_empty() {
            let body = if self.focus {
                let mut chars = self.placeholder.chars();
                let first = chars.next().map_or_else(|| " ".to_string(), String::from);
                let rest: String = chars.collect();
                format!(
                    "{}{}",
                    self.styles.cursor.render(&first),
                    self.styles.placeholder.render(&rest)
                )
            } else {
                self.styles.placeholder.render(&self.placeholder)
            };
            let used = self.placeholder.chars().count().max(usize::from(self.focus));
            let pad = self.width.saturating_sub(used);
            return format!("{prompt}{body}{}", " ".repeat(pad));
        }

        let before: String = self.value[..self.pos].iter().collect();
        let mut out = self.styles.text.render(&before);
        if self.focus {
            if self.pos < self.value.len() {
                out.push_str(&self.styles.cursor.render(&self.value[self.pos].to_string()));
                let after: String = self.value[self.pos + 1..].iter().collect();
                out.push_str(&self.styles.text.render(&after));
            } else {
                out.push_str(&self.styles.cursor.render(" "));
            }
        } else {
            let after: String = self.value[self.pos..].iter().collect();
            out.push_str(&self.styles.text.render(&after));
        }

        let mut used: usize = self.value.iter().map(|c| c.width().unwrap_or(0)).sum();
        if self.focus && self.pos == self.value.len() {
            used += 1;
        }
        format!("{prompt}{out}{}", " ".repeat(self.width.saturating_sub(used)))
    }

    fn padded(&self, s: &str) -> String {
        keel_style::pad_right(s, self.width)
    }
}

impl Model for TextInput {
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if msg.is::<FocusMsg>() {
            self.focus();
        } else if msg.is::<BlurMsg>() {
            self.blur();
        } else if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(key);
        }
        None
    }

    fn view(&self) -> String {
        Self::view(self)
    }
}
