//! Key bindings.
//!
//! Components expose a `KeyMap` of [`Binding`]s so owners can rebind or
//! disable individual actions.
//!
//! # Example
//!
//! ```rust
//! use keel_core::{KeyMsg, KeyType};
//! use keel_widgets::key::{Binding, matches};
//!
//! let select = Binding::new().keys(&[" ", "x"]).help("space", "select");
//! let expand = Binding::new().keys(&["enter"]).help("enter", "expand");
//!
//! assert!(matches(&KeyMsg::from_char('x'), &[&select, &expand]));
//! assert!(matches(&KeyMsg::from_type(KeyType::Enter), &[&expand]));
//! ```

use std::fmt;

/// Help text for a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Keys as shown to the user, e.g. `"↑/k"`.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A set of keys that trigger one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<String>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// An empty binding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys in their canonical string form (`"enter"`, `"ctrl+r"`, `"a"`).
    #[must_use]
    pub fn keys(mut self, keys: &[&str]) -> Self {
        self.keys = keys.iter().map(|&s| s.to_string()).collect();
        self
    }

    /// Help text.
    #[must_use]
    pub fn help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// A binding that never matches.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Keys of this binding.
    pub fn get_keys(&self) -> &[String] {
        &self.keys
    }

    /// Help text of this binding.
    pub fn get_help(&self) -> &Help {
        &self.help
    }

    /// Enabled and bound to at least one key.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enable or disable in place.
    pub fn enable(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Remove every key and the help text.
    pub fn unbind(&mut self) {
        self.keys.clear();
        self.help = Help::default();
    }
}

/// Whether `key` triggers any of the enabled `bindings`.
pub fn matches<K: fmt::Display>(key: K, bindings: &[&Binding]) -> bool {
    let key = key.to_string();
    bindings
        .iter()
        .filter(|b| b.enabled())
        .any(|b| b.keys.iter().any(|k| *k == key))
}

/// Whether `key` triggers `binding`.
pub fn matches_one<K: fmt::Display>(key: K, binding: &Binding) -> bool {
    matches(key, &[binding])
}
