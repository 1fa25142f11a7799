//! Keyboard input.
//!
//! Key events are delivered to components as [`KeyMsg`] messages. A key has a
//! canonical string form (`"enter"`, `"ctrl+a"`, `"x"`) which keymaps match
//! against, and which scripted drivers parse back with [`KeyMsg::parse`].

use std::fmt;
use std::str::FromStr;

/// Keyboard key event message.
///
/// # Example
///
/// ```rust
/// use keel_core::{KeyMsg, KeyType};
///
/// let key = KeyMsg::from_char('n');
/// assert_eq!(key.to_string(), "n");
/// assert_eq!(KeyMsg::from_type(KeyType::Enter).to_string(), "enter");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMsg {
    /// The type of key pressed.
    pub key_type: KeyType,
    /// For [`KeyType::Runes`], the characters typed.
    pub runes: Vec<char>,
    /// Whether Alt was held.
    pub alt: bool,
}

impl KeyMsg {
    /// Create a key message from a key type.
    pub fn from_type(key_type: KeyType) -> Self {
        Self {
            key_type,
            runes: Vec::new(),
            alt: false,
        }
    }

    /// Create a key message from a single character.
    ///
    /// A space is reported as [`KeyType::Space`].
    pub fn from_char(c: char) -> Self {
        if c == ' ' {
            return Self::from_type(KeyType::Space);
        }
        Self {
            key_type: KeyType::Runes,
            runes: vec![c],
            alt: false,
        }
    }

    /// Create a key message carrying several characters (paste, IME).
    pub fn from_runes(runes: Vec<char>) -> Self {
        Self {
            key_type: KeyType::Runes,
            runes,
            alt: false,
        }
    }

    /// Set the alt modifier.
    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Characters to insert into a text field, if this key types any.
    pub fn typed(&self) -> Option<&[char]> {
        match self.key_type {
            KeyType::Runes if !self.alt => Some(self.runes.as_slice()),
            KeyType::Space => Some(&[' '][..]),
            _ => None,
        }
    }

    /// Parse the canonical string form back into a key.
    ///
    /// Named keys (`"enter"`, `"ctrl+r"`, `"pgdown"`) map to their type, a
    /// leading `alt+` sets the modifier, and anything else is typed text.
    pub fn parse(s: &str) -> Self {
        if let Some(rest) = s.strip_prefix("alt+")
            && !rest.is_empty()
        {
            return Self::parse(rest).with_alt();
        }
        match KeyType::from_str(s) {
            Ok(key_type) => Self::from_type(key_type),
            Err(()) => Self::from_runes(s.chars().collect()),
        }
    }
}

impl fmt::Display for KeyMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.key_type == KeyType::Runes {
            for c in &self.runes {
                write!(f, "{c}")?;
            }
            Ok(())
        } else {
            write!(f, "{}", self.key_type)
        }
    }
}

/// Key type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Ctrl+A.
    CtrlA,
    /// Break/Interrupt (Ctrl+C).
    CtrlC,
    /// Ctrl+R.
    CtrlR,
    /// Ctrl+U.
    CtrlU,
    /// Tab.
    Tab,
    /// Enter.
    Enter,
    /// Escape.
    Esc,
    /// Backspace.
    Backspace,
    /// Regular character input.
    Runes,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Right arrow.
    Right,
    /// Left arrow.
    Left,
    /// Shift+Tab.
    ShiftTab,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PgUp,
    /// Page Down.
    PgDown,
    /// Delete.
    Delete,
    /// Space bar.
    Space,
}

impl KeyType {
    const NAMED: [(Self, &'static str); 19] = [
        (Self::CtrlA, "ctrl+a"),
        (Self::CtrlC, "ctrl+c"),
        (Self::CtrlR, "ctrl+r"),
        (Self::CtrlU, "ctrl+u"),
        (Self::Tab, "tab"),
        (Self::Enter, "enter"),
        (Self::Esc, "esc"),
        (Self::Backspace, "backspace"),
        (Self::Up, "up"),
        (Self::Down, "down"),
        (Self::Right, "right"),
        (Self::Left, "left"),
        (Self::ShiftTab, "shift+tab"),
        (Self::Home, "home"),
        (Self::End, "end"),
        (Self::PgUp, "pgup"),
        (Self::PgDown, "pgdown"),
        (Self::Delete, "delete"),
        (Self::Space, " "),
    ];

    fn name(self) -> &'static str {
        Self::NAMED
            .iter()
            .find(|(k, _)| *k == self)
            .map_or("runes", |(_, n)| *n)
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "space" {
            return Ok(Self::Space);
        }
        Self::NAMED
            .iter()
            .find(|(_, n)| *n == s)
            .map(|(k, _)| *k)
            .ok_or(())
    }
}
