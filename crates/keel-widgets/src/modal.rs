//! Modal dialog.
//!
//! The owner controls visibility with [`Modal::set_visible`]; the modal keeps
//! its own flag so the user can dismiss it. Dismissal emits a
//! [`ModalClosedMsg`].
//!
//! `set_visible` follows the owner's flag like a prop: a call with the same
//! value as the previous call does nothing, so a modal the user closed stays
//! closed until the owner passes `false` and then `true` again.

use keel_core::{Cmd, KeyMsg, Message, Model};
use keel_style::{Theme, pad_right};

use crate::button::{ButtonClickedMsg, IconButton};
use crate::key::{Binding, matches};
use crate::layout::Container;
use crate::next_id;

/// Default modal width in cells.
pub const DEFAULT_WIDTH: usize = 60;

/// The user dismissed a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalClosedMsg {
    /// Id of the modal.
    pub modal_id: u64,
}

/// Key bindings for the modal.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Dismiss.
    pub close: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            close: Binding::new().keys(&["esc", "enter", " "]).help("esc", "close"),
        }
    }
}

/// A dismissible dialog.
#[derive(Debug, Clone)]
pub struct Modal {
    id: u64,
    visible: bool,
    last_external: bool,
    close_button: IconButton,
    /// Heading.
    pub title: String,
    /// Line under the heading.
    pub subtitle: String,
    /// Rendered content.
    pub body: String,
    /// Rendered footer.
    pub footer: String,
    /// Width in cells.
    pub width: usize,
    /// Key bindings.
    pub key_map: KeyMap,
    /// Palette.
    pub theme: Theme,
}

impl Modal {
    /// A hidden modal.
    pub fn new(title: impl Into<String>) -> Self {
        let mut close_button = IconButton::new("✕", "close");
        close_button.button_mut().focus();
        Self {
            id: next_id(),
            visible: false,
            last_external: false,
            close_button,
            title: title.into(),
            subtitle: String::new(),
            body: String::new(),
            footer: String::new(),
            width: DEFAULT_WIDTH,
            key_map: KeyMap::default(),
            theme: Theme::default(),
        }
    }

    /// Set the subtitle.
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the footer.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Set the width.
    pub const fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Start visible, as if the owner passed `visible = true` first.
    pub const fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self.last_external = visible;
        self
    }

    /// Unique id, carried by [`ModalClosedMsg`].
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Whether the modal is shown.
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Follow the owner's visibility flag. Only changes of the flag are
    /// applied.
    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.last_external {
            return;
        }
        self.last_external = visible;
        if self.visible != visible {
            tracing::debug!(modal = self.id, visible, "modal visibility synced");
        }
        self.visible = visible;
    }

    /// Dismiss the modal and notify the owner.
    pub fn close(&mut self) -> Option<Cmd> {
        if !self.visible {
            return None;
        }
        self.visible = false;
        tracing::debug!(modal = self.id, "modal closed");
        Some(Cmd::message(ModalClosedMsg { modal_id: self.id }))
    }

    /// Render the modal; empty when hidden.
    pub fn view(&self) -> String {
        if !self.visible {
            return String::new();
        }
        let inner = self.width.saturating_sub(4);
        let body = self
            .body
            .lines()
            .map(|l| pad_right(l, inner))
            .collect::<Vec<_>>()
            .join("\n");
        Container {
            theme: self.theme,
            ..Container::new()
        }
        .title(self.title.clone())
        .subtitle(self.subtitle.clone())
        .action_group(self.close_button.view())
        .body(body)
        .footer(self.footer.clone())
        .width(inner)
        .view()
    }
}

impl Model for Modal {
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if !self.visible {
            tracing::trace!(modal = self.id, "hidden modal ignored message");
            return None;
        }
        if let Some(key) = msg.downcast_ref::<KeyMsg>()
            && matches(key, &[&self.key_map.close])
        {
            return self.close();
        }
        if let Some(click) = msg.downcast_ref::<ButtonClickedMsg>()
            && click.id == self.close_button.id()
        {
            return self.close();
        }
        None
    }

    fn view(&self) -> String {
        Self::view(self)
    }
}
