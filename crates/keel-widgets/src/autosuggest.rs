//! Text input with a filtered list of suggestions.
//!
//! Options are flat or grouped. With [`FilteringType::Auto`] the list is
//! filtered locally on every keystroke; with [`FilteringType::Manual`] the
//! owner filters: every change of the input emits an [`InputChangedMsg`]
//! and the owner answers with [`Autosuggest::set_options`]. Auto filtering
//! never emits `InputChangedMsg`.
//!
//! # Example
//!
//! ```rust
//! use keel_core::{KeyMsg, KeyType, Message, Model, drain};
//! use keel_widgets::autosuggest::{Autosuggest, SuggestOption, SuggestionSelectedMsg};
//!
//! let mut input = Autosuggest::new(vec![
//!     SuggestOption::new("ec2").label("Amazon EC2"),
//!     SuggestOption::new("s3").label("Amazon S3"),
//! ]);
//! input.focus();
//! for c in "s3".chars() {
//!     input.update(Message::new(KeyMsg::from_char(c)));
//! }
//! assert_eq!(input.visible_options().len(), 1);
//!
//! let events = drain(input.update(Message::new(KeyMsg::from_type(KeyType::Enter))));
//! let selected = events[0].downcast_ref::<SuggestionSelectedMsg>().unwrap();
//! assert_eq!(selected.option.value, "s3");
//! ```

use std::fmt;
use std::sync::Arc;

use keel_core::{BlurMsg, Cmd, FocusMsg, KeyMsg, Message, Model};
use keel_style::{Style, Theme};

use crate::key::{Binding, matches};
use crate::next_id;
use crate::textinput::TextInput;

/// Default search glyph in front of the input.
pub const DEFAULT_ICON: &str = "⌕";

/// One suggestion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestOption {
    /// Value reported on selection.
    pub value: String,
    /// Text shown in the list and put in the input on selection; the value is
    /// used when absent.
    pub label: Option<String>,
    /// Secondary line.
    pub description: Option<String>,
    /// Short tags shown after the description.
    pub tags: Vec<String>,
    /// Shown but not selectable.
    pub disabled: bool,
}

impl SuggestOption {
    /// An option with only a value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the tags.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the disabled flag.
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Label, falling back to the value.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

/// Options under a shared heading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionGroup {
    /// Heading.
    pub label: String,
    /// Members.
    pub options: Vec<SuggestOption>,
}

impl OptionGroup {
    /// A group.
    pub fn new(label: impl Into<String>, options: Vec<SuggestOption>) -> Self {
        Self {
            label: label.into(),
            options,
        }
    }
}

/// Flat or grouped options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Options {
    /// A single list.
    Flat(Vec<SuggestOption>),
    /// Lists under headings.
    Grouped(Vec<OptionGroup>),
}

impl Default for Options {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

impl From<Vec<SuggestOption>> for Options {
    fn from(options: Vec<SuggestOption>) -> Self {
        Self::Flat(options)
    }
}

impl From<Vec<OptionGroup>> for Options {
    fn from(groups: Vec<OptionGroup>) -> Self {
        Self::Grouped(groups)
    }
}

/// Who filters the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilteringType {
    /// The component, on every keystroke.
    #[default]
    Auto,
    /// The owner, after each [`InputChangedMsg`].
    Manual,
}

/// State of the option source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Options are complete.
    #[default]
    Finished,
    /// Options are being fetched.
    Loading,
    /// Fetching options failed.
    Error,
}

/// Icon in front of the input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Icon {
    /// [`DEFAULT_ICON`].
    #[default]
    Default,
    /// A caller-supplied glyph.
    Custom(String),
    /// No icon.
    None,
}

/// What a custom filter gets besides the options.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    /// Current input text.
    pub input_value: &'a str,
}

impl FilterContext<'_> {
    /// Label used for display and matching.
    pub fn option_label<'o>(&self, option: &'o SuggestOption) -> &'o str {
        option.display_label()
    }
}

/// Replacement for the built-in filter.
pub type FilterFn =
    Arc<dyn Fn(&[SuggestOption], &FilterContext<'_>) -> Vec<SuggestOption> + Send + Sync>;

/// Renders one option, possibly over several lines.
pub type RenderOptionFn = Arc<dyn Fn(&SuggestOption) -> String + Send + Sync>;

/// Input text changed (manual filtering only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputChangedMsg {
    /// Id of the autosuggest.
    pub autosuggest_id: u64,
    /// New input text.
    pub value: String,
}

/// An option was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionSelectedMsg {
    /// Id of the autosuggest.
    pub autosuggest_id: u64,
    /// The selected option; a free-text option has only a value.
    pub option: SuggestOption,
}

/// The retry affordance of the error status was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryClickedMsg {
    /// Id of the autosuggest.
    pub autosuggest_id: u64,
}

/// The autosuggest gained focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosuggestFocusedMsg {
    /// Id of the autosuggest.
    pub autosuggest_id: u64,
}

/// The autosuggest lost focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosuggestBlurredMsg {
    /// Id of the autosuggest.
    pub autosuggest_id: u64,
}

/// Key bindings for the list.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Highlight the previous option.
    pub up: Binding,
    /// Highlight the next option, opening the list.
    pub down: Binding,
    /// Select the highlighted option.
    pub select: Binding,
    /// Close the list.
    pub close: Binding,
    /// Use the retry affordance.
    pub recover: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            up: Binding::new().keys(&["up"]).help("↑", "previous"),
            down: Binding::new().keys(&["down"]).help("↓", "next"),
            select: Binding::new().keys(&["enter"]).help("enter", "select"),
            close: Binding::new().keys(&["esc"]).help("esc", "close"),
            recover: Binding::new().keys(&["ctrl+r"]).help("ctrl+r", "retry"),
        }
    }
}

/// Autosuggest styles.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    /// Icon.
    pub icon: Style,
    /// Required marker.
    pub required: Style,
    /// Group headings.
    pub group: Style,
    /// Options.
    pub option: Style,
    /// The highlighted option.
    pub highlighted: Style,
    /// Descriptions and tags.
    pub description: Style,
    /// Disabled options.
    pub disabled: Style,
    /// Loading and empty text.
    pub status: Style,
    /// Error text.
    pub error: Style,
    /// Retry affordance.
    pub recovery: Style,
}

impl Styles {
    /// Styles derived from a theme.
    pub const fn from_theme(theme: &Theme) -> Self {
        Self {
            icon: Style::new().foreground(theme.secondary),
            required: Style::new().foreground(theme.error),
            group: Style::new().bold().foreground(theme.secondary),
            option: Style::new(),
            highlighted: Style::new().reverse().foreground(theme.highlight),
            description: Style::new().foreground(theme.secondary),
            disabled: Style::new().foreground(theme.muted).faint(),
            status: Style::new().foreground(theme.secondary).italic(),
            error: Style::new().foreground(theme.error),
            recovery: Style::new().underline().foreground(theme.highlight),
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// A visible section of the list: an optional heading and its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Group heading, `None` for flat options.
    pub label: Option<String>,
    /// Options passing the filter.
    pub options: Vec<SuggestOption>,
}

/// Autosuggest model.
#[derive(Clone)]
pub struct Autosuggest {
    id: u64,
    input: TextInput,
    options: Options,
    open: bool,
    highlight: Option<usize>,
    selected: Option<SuggestOption>,
    filter_options: Option<FilterFn>,
    render_option: Option<RenderOptionFn>,
    /// Who filters.
    pub filtering: FilteringType,
    /// Option source state.
    pub status: Status,
    /// Shown while loading.
    pub loading_text: String,
    /// Shown on error, followed by a period.
    pub error_text: String,
    /// Retry affordance shown on error.
    pub recovery_text: String,
    /// Shown when nothing matches.
    pub empty_text: String,
    /// Enter on unmatched text selects the text itself.
    pub free_solo: bool,
    /// Marks the input as required.
    pub required: bool,
    /// Icon in front of the input.
    pub icon: Icon,
    /// Maximum options listed.
    pub max_visible: usize,
    /// Key bindings.
    pub key_map: KeyMap,
    /// Styles.
    pub styles: Styles,
}

impl fmt::Debug for Autosuggest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autosuggest")
            .field("id", &self.id)
            .field("value", &self.input.value())
            .field("open", &self.open)
            .field("highlight", &self.highlight)
            .field("selected", &self.selected)
            .field("filtering", &self.filtering)
            .field("status", &self.status)
            .field("custom_filter", &self.filter_options.is_some())
            .field("custom_render", &self.render_option.is_some())
            .finish_non_exhaustive()
    }
}

impl Autosuggest {
    /// An autosuggest over flat or grouped options.
    pub fn new(options: impl Into<Options>) -> Self {
        Self {
            id: next_id(),
            input: TextInput::new(),
            options: options.into(),
            open: false,
            highlight: None,
            selected: None,
            filter_options: None,
            render_option: None,
            filtering: FilteringType::Auto,
            status: Status::Finished,
            loading_text: "Loading...".to_string(),
            error_text: String::new(),
            recovery_text: String::new(),
            empty_text: "No matches".to_string(),
            free_solo: false,
            required: false,
            icon: Icon::Default,
            max_visible: 10,
            key_map: KeyMap::default(),
            styles: Styles::default(),
        }
    }

    /// Set the placeholder.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.input.placeholder = placeholder.into();
        self
    }

    /// Set the filtering type.
    pub const fn filtering(mut self, filtering: FilteringType) -> Self {
        self.filtering = filtering;
        self
    }

    /// Replace the built-in filter.
    pub fn filter_options<F>(mut self, f: F) -> Self
    where
        F: Fn(&[SuggestOption], &FilterContext<'_>) -> Vec<SuggestOption> + Send + Sync + 'static,
    {
        self.filter_options = Some(Arc::new(f));
        self
    }

    /// Render options with a custom function.
    pub fn render_option<F>(mut self, f: F) -> Self
    where
        F: Fn(&SuggestOption) -> String + Send + Sync + 'static,
    {
        self.render_option = Some(Arc::new(f));
        self
    }

    /// Set the status.
    pub const fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Set the loading text.
    pub fn loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = text.into();
        self
    }

    /// Set the error text.
    pub fn error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = text.into();
        self
    }

    /// Set the recovery text.
    pub fn recovery_text(mut self, text: impl Into<String>) -> Self {
        self.recovery_text = text.into();
        self
    }

    /// Set the text shown when nothing matches.
    pub fn empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Allow selecting free text.
    pub const fn free_solo(mut self, free_solo: bool) -> Self {
        self.free_solo = free_solo;
        self
    }

    /// Mark as required.
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the icon.
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    /// Disable input.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.input.set_disabled(disabled);
        self
    }

    /// Preselect a value; the input shows its label.
    pub fn value(mut self, option: SuggestOption) -> Self {
        self.set_value(Some(option));
        self
    }

    /// Unique id, carried by every message this autosuggest emits.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Current input text.
    pub fn input_value(&self) -> String {
        self.input.value()
    }

    /// The selected option.
    pub const fn selected(&self) -> Option<&SuggestOption> {
        self.selected.as_ref()
    }

    /// Whether the list is open.
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Whether input is ignored.
    pub const fn is_disabled(&self) -> bool {
        self.input.is_disabled()
    }

    /// Whether the input has focus.
    pub const fn focused(&self) -> bool {
        self.input.focused()
    }

    /// Replace the selection and the input text, without emitting.
    pub fn set_value(&mut self, option: Option<SuggestOption>) {
        match &option {
            Some(o) => self.input.set_value(o.display_label()),
            None => self.input.reset(),
        }
        self.selected = option;
    }

    /// Replace the options, keeping the list state.
    pub fn set_options(&mut self, options: impl Into<Options>) {
        self.options = options.into();
        self.clamp_highlight();
    }

    /// Set the status in place.
    pub const fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Focus the input. Returns the focus event, or nothing when disabled or
    /// already focused.
    pub fn focus(&mut self) -> Option<Cmd> {
        if self.input.focused() || self.input.is_disabled() {
            return None;
        }
        self.input.focus();
        Some(Cmd::message(AutosuggestFocusedMsg {
            autosuggest_id: self.id,
        }))
    }

    /// Blur the input and close the list.
    pub fn blur(&mut self) -> Option<Cmd> {
        if !self.input.focused() {
            return None;
        }
        self.input.blur();
        self.open = false;
        Some(Cmd::message(AutosuggestBlurredMsg {
            autosuggest_id: self.id,
        }))
    }

    /// Use the retry affordance. Only available in the error status.
    pub fn recover(&self) -> Option<Cmd> {
        if self.status != Status::Error {
            return None;
        }
        tracing::debug!(autosuggest = self.id, "recovery requested");
        Some(Cmd::message(RecoveryClickedMsg {
            autosuggest_id: self.id,
        }))
    }

    fn matches_input(option: &SuggestOption, needle: &str) -> bool {
        option.display_label().to_lowercase().contains(needle)
            || option
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }

    fn filter(&self, options: &[SuggestOption], value: &str) -> Vec<SuggestOption> {
        if self.filtering == FilteringType::Manual {
            return options.to_vec();
        }
        if let Some(f) = &self.filter_options {
            return f(options, &FilterContext { input_value: value });
        }
        let needle = value.to_lowercase();
        if needle.is_empty() {
            return options.to_vec();
        }
        options
            .iter()
            .filter(|o| Self::matches_input(o, &needle))
            .cloned()
            .collect()
    }

    /// Sections of the list as currently filtered. Groups without matches
    /// are left out.
    pub fn sections(&self) -> Vec<Section> {
        let value = self.input.value();
        match &self.options {
            Options::Flat(options) => vec![Section {
                label: None,
                options: self.filter(options, &value),
            }],
            Options::Grouped(groups) => groups
                .iter()
                .map(|g| Section {
                    label: Some(g.label.clone()),
                    options: self.filter(&g.options, &value),
                })
                .filter(|s| !s.options.is_empty())
                .collect(),
        }
    }

    /// Options passing the filter, in list order.
    pub fn visible_options(&self) -> Vec<SuggestOption> {
        self.sections().into_iter().flat_map(|s| s.options).collect()
    }

    fn selectable(&self) -> Vec<usize> {
        self.visible_options()
            .iter()
            .enumerate()
            .filter(|(_, o)| !o.disabled)
            .map(|(i, _)| i)
            .collect()
    }

    fn clamp_highlight(&mut self) {
        let selectable = self.selectable();
        self.highlight = match self.highlight {
            Some(h) if selectable.contains(&h) => Some(h),
            _ => selectable.first().copied(),
        };
    }

    fn move_highlight(&mut self, forward: bool) {
        self.open = true;
        let selectable = self.selectable();
        if selectable.is_empty() {
            self.highlight = None;
            return;
        }
        let pos = self.highlight.and_then(|h| selectable.iter().position(|&i| i == h));
        let next = match (pos, forward) {
            (None, _) => 0,
            (Some(p), true) => (p + 1).min(selectable.len() - 1),
            (Some(p), false) => p.saturating_sub(1),
        };
        self.highlight = Some(selectable[next]);
    }

    /// Select the highlighted option, the first selectable one, or free
    /// text when allowed.
    pub fn select(&mut self) -> Option<Cmd> {
        let visible = self.visible_options();
        let chosen = self
            .highlight
            .and_then(|h| visible.get(h))
            .filter(|o| !o.disabled)
            .or_else(|| visible.iter().find(|o| !o.disabled))
            .cloned();
        let option = match chosen {
            Some(o) => o,
            None if self.free_solo && !self.input.is_empty() => SuggestOption::new(self.input.value()),
            None => return None,
        };
        tracing::debug!(autosuggest = self.id, value = %option.value, "suggestion selected");
        self.set_value(Some(option.clone()));
        self.open = false;
        self.highlight = None;
        Some(Cmd::message(SuggestionSelectedMsg {
            autosuggest_id: self.id,
            option,
        }))
    }

    fn on_input_changed(&mut self) -> Option<Cmd> {
        self.open = true;
        self.highlight = None;
        self.clamp_highlight();
        if self.filtering == FilteringType::Manual {
            return Some(Cmd::message(InputChangedMsg {
                autosuggest_id: self.id,
                value: self.input.value(),
            }));
        }
        None
    }

    fn handle_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if matches(key, &[&self.key_map.recover]) {
            return self.recover();
        }
        if matches(key, &[&self.key_map.up]) {
            self.move_highlight(false);
            return None;
        }
        if matches(key, &[&self.key_map.down]) {
            self.move_highlight(true);
            return None;
        }
        if matches(key, &[&self.key_map.select]) {
            return self.select();
        }
        if matches(key, &[&self.key_map.close]) {
            self.open = false;
            return None;
        }
        if self.input.handle_key(key) {
            return self.on_input_changed();
        }
        None
    }

    fn option_view(&self, option: &SuggestOption, highlighted: bool) -> Vec<String> {
        if let Some(render) = &self.render_option {
            let body = render(option);
            return body
                .lines()
                .map(|l| {
                    let marker = if highlighted { "› " } else { "  " };
                    format!("{marker}{l}")
                })
                .collect();
        }
        let style = if option.disabled {
            self.styles.disabled
        } else if highlighted {
            self.styles.highlighted
        } else {
            self.styles.option
        };
        let marker = if highlighted { "› " } else { "  " };
        let mut lines = vec![format!("{marker}{}", style.render(option.display_label()))];
        let mut secondary = option.description.clone().unwrap_or_default();
        if !option.tags.is_empty() {
            if !secondary.is_empty() {
                secondary.push_str("  ");
            }
            secondary.push_str(&option.tags.join(" · "));
        }
        if !secondary.is_empty() {
            lines.push(format!("    {}", self.styles.description.render(&secondary)));
        }
        lines
    }

    fn status_view(&self) -> Option<String> {
        match self.status {
            Status::Finished => None,
            Status::Loading => Some(self.styles.status.render(&self.loading_text)),
            Status::Error => {
                let mut parts = Vec::new();
                if !self.error_text.is_empty() {
                    parts.push(self.styles.error.render(&format!("{}.", self.error_text)));
                }
                if !self.recovery_text.is_empty() {
                    parts.push(self.styles.recovery.render(&self.recovery_text));
                }
                Some(parts.join(" "))
            }
        }
    }

    /// Render the input, the list when open, and the status line.
    pub fn view(&self) -> String {
        let mut line = String::new();
        match &self.icon {
            Icon::Default => {
                line.push_str(&self.styles.icon.render(DEFAULT_ICON));
                line.push(' ');
            }
            Icon::Custom(glyph) => {
                line.push_str(&self.styles.icon.render(glyph));
                line.push(' ');
            }
            Icon::None => {}
        }
        line.push_str(&self.input.view());
        if self.required {
            line.push(' ');
            line.push_str(&self.styles.required.render("*"));
        }

        let mut lines = vec![line];
        if self.open && self.status == Status::Finished {
            let mut index = 0;
            let mut listed = 0;
            for section in self.sections() {
                if let Some(label) = &section.label {
                    lines.push(format!("  {}", self.styles.group.render(label)));
                }
                for option in &section.options {
                    if listed < self.max_visible {
                        lines.extend(self.option_view(option, self.highlight == Some(index)));
                        listed += 1;
                    }
                    index += 1;
                }
            }
            if index == 0 {
                lines.push(format!("  {}", self.styles.status.render(&self.empty_text)));
            }
        }
        if let Some(status) = self.status_view() {
            lines.push(format!("  {status}"));
        }
        lines.join("\n")
    }
}

impl Model for Autosuggest {
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if msg.is::<FocusMsg>() {
            return self.focus();
        }
        if msg.is::<BlurMsg>() {
            return self.blur();
        }
        let Some(key) = msg.downcast_ref::<KeyMsg>() else {
            return None;
        };
        if !self.input.focused() {
            tracing::trace!(autosuggest = self.id, "unfocused autosuggest ignored key");
            return None;
        }
        self.handle_key(key)
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

    fn services() -> Vec<SuggestOption> {
        vec![
            SuggestOption::new("ds").label("AWS Directory Service"),
            SuggestOption::new("dc").label("AWS Direct Connect"),
            SuggestOption::new("pay").label("Amazon Pay"),
            SuggestOption::new("lambda").label("Lambda - Amazon Lambda"),
        ]
    }

    fn typed(input: &mut Autosuggest, s: &str) -> Vec<Message> {
        let mut out = Vec::new();
        for c in s.chars() {
            out.extend(drain(input.update(Message::new(KeyMsg::from_char(c)))));
        }
        out
    }

    fn focused(input: Autosuggest) -> Autosuggest {
        let mut input = input;
        let _ = input.focus();
        input
    }

    #[test]
    fn test_auto_filter_matches_substring() {
        let mut a = focused(Autosuggest::new(services()));
        typed(&mut a, "direct");
        assert_eq!(a.visible_options().len(), 2);
        assert!(a.is_open());
    }

    #[test]
    fn test_description_matches() {
        let mut a = focused(Autosuggest::new(vec![
            SuggestOption::new("a").description("object storage"),
            SuggestOption::new("b"),
        ]));
        typed(&mut a, "STORAGE");
        assert_eq!(a.visible_options().len(), 1);
    }

    #[test]
    fn test_grouped_filter_hides_empty_groups() {
        let mut a = focused(Autosuggest::new(vec![
            OptionGroup::new("Compute", vec![SuggestOption::new("EC2")]),
            OptionGroup::new("Mobile", vec![SuggestOption::new("AWS Mobile Hub")]),
        ]));
        typed(&mut a, "AWS Mobile");
        let sections = a.sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label.as_deref(), Some("Mobile"));
        assert_eq!(a.visible_options().len(), 1);
    }

    #[test]
    fn test_auto_never_emits_input_changed() {
        let mut a = focused(Autosuggest::new(services()));
        let events = typed(&mut a, "Amazon Pay");
        assert!(events.iter().all(|m| !m.is::<InputChangedMsg>()));
    }

    #[test]
    fn test_manual_emits_each_change_and_keeps_options() {
        let mut a = focused(Autosuggest::new(services()).filtering(FilteringType::Manual));
        let events = typed(&mut a, "zz");
        let values: Vec<&str> = events
            .iter()
            .filter_map(|m| m.downcast_ref::<InputChangedMsg>())
            .map(|m| m.value.as_str())
            .collect();
        assert_eq!(values, ["z", "zz"]);
        assert_eq!(a.visible_options().len(), 4);
    }

    #[test]
    fn test_enter_selects_once() {
        let mut a = focused(Autosuggest::new(services()));
        typed(&mut a, "Amazon Pay");
        let events = drain(a.update(Message::new(KeyMsg::from_type(KeyType::Enter))));
        let selected: Vec<_> = events
            .iter()
            .filter_map(|m| m.downcast_ref::<SuggestionSelectedMsg>())
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].option.value, "pay");
        assert_eq!(a.input_value(), "Amazon Pay");
        assert!(!a.is_open());
    }

    #[test]
    fn test_enter_without_match_selects_nothing_unless_free_solo() {
        let mut a = focused(Autosuggest::new(services()));
        typed(&mut a, "nothing");
        assert!(a.select().is_none());

        let mut a = focused(Autosuggest::new(services()).free_solo(true));
        typed(&mut a, "nothing");
        let events = drain(a.select());
        let msg = events[0].downcast_ref::<SuggestionSelectedMsg>().unwrap();
        assert_eq!(msg.option, SuggestOption::new("nothing"));
    }

    #[test]
    fn test_navigation_skips_disabled() {
        let mut a = focused(Autosuggest::new(vec![
            SuggestOption::new("a"),
            SuggestOption::new("b").disabled(true),
            SuggestOption::new("c"),
        ]));
        a.update(Message::new(KeyMsg::from_type(KeyType::Down)));
        a.update(Message::new(KeyMsg::from_type(KeyType::Down)));
        let events = drain(a.select());
        let msg = events[0].downcast_ref::<SuggestionSelectedMsg>().unwrap();
        assert_eq!(msg.option.value, "c");
    }

    #[test]
    fn test_custom_filter_gets_options_and_input() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let mut a = focused(
            Autosuggest::new(services())
                .filter_options(move |options, ctx| {
                    log.lock().unwrap().push((options.len(), ctx.input_value.to_string()));
                    options.iter().filter(|o| o.value == "lambda").cloned().collect()
                })
                .render_option(|o| format!("<{}>\n{}", o.value, o.display_label())),
        );
        typed(&mut a, "N");
        assert!(seen.lock().unwrap().contains(&(4, "N".to_string())));
        let view = strip_ansi(&a.view());
        assert!(view.contains("<lambda>"));
        assert!(!view.contains("<pay>"));
    }

    #[test]
    fn test_status_lines() {
        let a = Autosuggest::new(services()).status(Status::Loading).loading_text("Loading");
        assert!(strip_ansi(&a.view()).contains("Loading"));

        let a = Autosuggest::new(services())
            .status(Status::Error)
            .error_text("Error")
            .recovery_text("Retry");
        let view = strip_ansi(&a.view());
        assert!(view.contains("Error."));
        assert!(view.contains("Retry"));
    }

    #[test]
    fn test_recovery_only_in_error_status() {
        let mut a = focused(Autosuggest::new(services()).status(Status::Error));
        let events = drain(a.update(Message::new(KeyMsg::from_type(KeyType::CtrlR))));
        assert_eq!(
            events[0].downcast_ref::<RecoveryClickedMsg>(),
            Some(&RecoveryClickedMsg { autosuggest_id: a.id() })
        );
        a.set_status(Status::Finished);
        assert!(a.recover().is_none());
    }

    #[test]
    fn test_focus_and_blur_emit_once() {
        let mut a = Autosuggest::new(services());
        let events = drain(a.update(Message::new(FocusMsg)));
        assert!(events[0].is::<AutosuggestFocusedMsg>());
        assert!(drain(a.update(Message::new(FocusMsg))).is_empty());
        typed(&mut a, "Amazon");
        let events = drain(a.update(Message::new(BlurMsg)));
        assert_eq!(events.len(), 1);
        assert!(events[0].is::<AutosuggestBlurredMsg>());
        assert!(!a.is_open());
    }

    #[test]
    fn test_disabled_refuses_focus_and_input() {
        let mut a = Autosuggest::new(services()).disabled(true);
        assert!(a.focus().is_none());
        assert!(typed(&mut a, "x").is_empty());
        assert_eq!(a.input_value(), "");
    }

    #[test]
    fn test_preselected_value_shows_label() {
        let a = Autosuggest::new(services()).value(
            SuggestOption::new("Lambda").label("Lambda - Amazon Lambda"),
        );
        assert_eq!(a.input_value(), "Lambda - Amazon Lambda");
        assert_eq!(a.selected().map(|o| o.value.as_str()), Some("Lambda"));
    }

    #[test]
    fn test_icon_and_required_marker() {
        let a = Autosuggest::new(services()).placeholder("input-1").required(true);
        assert_eq!(strip_ansi(&a.view()), "⌕ input-1 *");
        let a = Autosuggest::new(services()).placeholder("x").icon(Icon::Custom("◆".into()));
        assert_eq!(strip_ansi(&a.view()), "◆ x");
        let a = Autosuggest::new(services()).placeholder("x").icon(Icon::None);
        assert_eq!(strip_ansi(&a.view()), "x");
    }

    #[test]
    fn test_empty_text_when_nothing_matches() {
        let mut a = focused(Autosuggest::new(services()).empty_text("No matching service found"));
        typed(&mut a, "qqq");
        assert!(strip_ansi(&a.view()).contains("No matching service found"));
    }
}
