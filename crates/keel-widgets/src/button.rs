//! Buttons.
//!
//! A [`Button`] reports activation with a [`ButtonClickedMsg`] carrying its
//! id. Disabled and loading buttons swallow activation.

use keel_core::{BlurMsg, Cmd, FocusMsg, KeyMsg, Message, Model};
use keel_style::{Style, Theme};

use crate::key::{Binding, matches};
use crate::next_id;

/// Glyph shown in front of a loading button's content.
pub const LOADING_GLYPH: &str = "⟳";

/// A button was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonClickedMsg {
    /// Id of the button.
    pub id: u64,
}

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Bracketed, plain.
    #[default]
    Normal,
    /// Bracketed, accent colored.
    Primary,
    /// Underlined text without brackets.
    Link,
    /// Icon only.
    Icon,
}

/// Key bindings for buttons.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Activate the focused button.
    pub activate: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            activate: Binding::new().keys(&["enter", " "]).help("enter", "press"),
        }
    }
}

/// Button styles.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    /// Normal variant.
    pub normal: Style,
    /// Primary variant.
    pub primary: Style,
    /// Link variant.
    pub link: Style,
    /// Disabled or loading buttons.
    pub disabled: Style,
    /// Applied on top when focused.
    pub focused: Style,
}

impl Styles {
    /// Styles derived from a theme.
    pub const fn from_theme(theme: &Theme) -> Self {
        Self {
            normal: Style::new(),
            primary: Style::new().bold().foreground(theme.primary),
            link: Style::new().underline().foreground(theme.highlight),
            disabled: Style::new().foreground(theme.muted),
            focused: Style::new().reverse(),
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// A pressable button.
#[derive(Debug, Clone)]
pub struct Button {
    id: u64,
    focus: bool,
    /// Label.
    pub content: String,
    /// Visual weight.
    pub variant: ButtonVariant,
    /// Ignore activation and render muted.
    pub disabled: bool,
    /// Ignore activation and show the loading glyph.
    pub loading: bool,
    /// Optional icon shown before the content.
    pub icon: Option<String>,
    /// Key bindings.
    pub key_map: KeyMap,
    /// Styles.
    pub styles: Styles,
}

impl Button {
    /// A normal button with the given label.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: next_id(),
            focus: false,
            content: content.into(),
            variant: ButtonVariant::Normal,
            disabled: false,
            loading: false,
            icon: None,
            key_map: KeyMap::default(),
            styles: Styles::default(),
        }
    }

    /// Set the variant.
    pub const fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the disabled flag.
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the loading flag.
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Set an icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Unique id, carried by [`ButtonClickedMsg`].
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Whether activation is currently possible.
    pub const fn is_active(&self) -> bool {
        !self.disabled && !self.loading
    }

    /// Focus the button.
    pub const fn focus(&mut self) {
        self.focus = true;
    }

    /// Blur the button.
    pub const fn blur(&mut self) {
        self.focus = false;
    }

    /// Whether the button has focus.
    pub const fn focused(&self) -> bool {
        self.focus
    }

    /// Activate the button as if pressed.
    pub fn click(&self) -> Option<Cmd> {
        if !self.is_active() {
            tracing::trace!(id = self.id, "inactive button ignored click");
            return None;
        }
        Some(Cmd::message(ButtonClickedMsg { id: self.id }))
    }

    /// Render the button.
    pub fn view(&self) -> String {
        let mut label = String::new();
        if self.loading {
            label.push_str(LOADING_GLYPH);
            label.push(' ');
        }
        if let Some(icon) = &self.icon {
            label.push_str(icon);
            if self.variant != ButtonVariant::Icon && !self.content.is_empty() {
                label.push(' ');
            }
        }
        if self.variant != ButtonVariant::Icon || self.icon.is_none() {
            label.push_str(&self.content);
        }

        let text = match self.variant {
            ButtonVariant::Normal | ButtonVariant::Primary => format!("[ {label} ]"),
            ButtonVariant::Icon => format!("[{label}]"),
            ButtonVariant::Link => label,
        };

        let style = if self.is_active() {
            match self.variant {
                ButtonVariant::Primary => self.styles.primary,
                ButtonVariant::Link => self.styles.link,
                ButtonVariant::Normal | ButtonVariant::Icon => self.styles.normal,
            }
        } else {
            self.styles.disabled
        };
        let rendered = style.render(&text);
        if self.focus {
            self.styles.focused.render(&rendered)
        } else {
            rendered
        }
    }
}

impl Model for Button {
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if msg.is::<FocusMsg>() {
            self.focus();
            return None;
        }
        if msg.is::<BlurMsg>() {
            self.blur();
            return None;
        }
        if let Some(key) = msg.downcast_ref::<KeyMsg>()
            && self.focus
            && matches(key, &[&self.key_map.activate])
        {
            return self.click();
        }
        None
    }

    fn view(&self) -> String {
        Self::view(self)
    }
}

/// An icon with an accessible label, rendered as `[icon]`.
#[derive(Debug, Clone)]
pub struct IconButton {
    button: Button,
    /// Text naming what the icon does, for help lines and screen readers.
    pub label: String,
}

impl IconButton {
    /// An icon button.
    pub fn new(icon: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            button: Button::new("").variant(ButtonVariant::Icon).icon(icon),
            label: label.into(),
        }
    }

    /// Id carried by the [`ButtonClickedMsg`] this button emits.
    pub const fn id(&self) -> u64 {
        self.button.id()
    }

    /// The underlying button.
    pub const fn button(&self) -> &Button {
        &self.button
    }

    /// Mutable access to the underlying button.
    pub const fn button_mut(&mut self) -> &mut Button {
        &mut self.button
    }
}

impl Model for IconButton {
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        self.button.update(msg)
    }

    fn view(&self) -> String {
        self.button.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_core::{KeyType, drain};
    use keel_style::strip_ansi;

    fn press(button: &mut Button) -> Vec<Message> {
        drain(button.update(Message::new(KeyMsg::from_type(KeyType::Enter))))
    }

    #[test]
    fn test_enter_emits_click_with_id() {
        let mut b = Button::new("Save");
        b.focus();
        let events = press(&mut b);
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].downcast_ref::<ButtonClickedMsg>(),
            Some(&ButtonClickedMsg { id: b.id() })
        );
    }

    #[test]
    fn test_space_activates() {
        let mut b = Button::new("Save");
        b.focus();
        let events = drain(b.update(Message::new(KeyMsg::from_char(' '))));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut b = Button::new("Save");
        assert!(press(&mut b).is_empty());
    }

    #[test]
    fn test_disabled_and_loading_swallow_clicks() {
        let mut b = Button::new("Save").disabled(true);
        b.focus();
        assert!(press(&mut b).is_empty());
        let mut b = Button::new("Save").loading(true);
        b.focus();
        assert!(press(&mut b).is_empty());
    }

    #[test]
    fn test_views_per_variant() {
        assert_eq!(strip_ansi(&Button::new("Go").view()), "[ Go ]");
        assert_eq!(
            strip_ansi(&Button::new("Docs").variant(ButtonVariant::Link).view()),
            "Docs"
        );
        assert_eq!(
            strip_ansi(&Button::new("Go").loading(true).view()),
            "[ ⟳ Go ]"
        );
        assert_eq!(strip_ansi(&IconButton::new("⚙", "Settings").view()), "[⚙]");
    }

    #[test]
    fn test_unique_ids() {
        assert_ne!(Button::new("a").id(), Button::new("b").id());
    }
}
