//! Colors and color profiles.
//!
//! A [`Color`] is either an ANSI 256 palette index (`"212"`) or a 24-bit
//! hex value (`"#ff5f87"`). How much of it reaches the terminal depends on the
//! active [`ColorProfile`].

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    /// The string was empty.
    #[error("empty color string")]
    Empty,
    /// A `#` color that is not six hex digits.
    #[error("invalid hex color {0:?}: expected #rrggbb")]
    InvalidHex(String),
    /// A palette index outside 0-255 or not a number.
    #[error("invalid ANSI color {0:?}: expected 0-255")]
    InvalidAnsi(String),
}

/// Terminal color capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorProfile {
    /// No escape sequences at all.
    Ascii,
    /// 256-color palette.
    Ansi256,
    /// 24-bit color.
    #[default]
    TrueColor,
}

impl ColorProfile {
    fn to_u8(self) -> u8 {
        match self {
            Self::Ascii => 0,
            Self::Ansi256 => 1,
            Self::TrueColor => 2,
        }
    }

    fn from_u8(n: u8) -> Self {
        match n {
            0 => Self::Ascii,
            1 => Self::Ansi256,
            _ => Self::TrueColor,
        }
    }
}

static DEFAULT_PROFILE: AtomicU8 = AtomicU8::new(2);

/// Set the profile used by styles that do not carry their own.
pub fn set_default_profile(profile: ColorProfile) {
    tracing::debug!(?profile, "default color profile changed");
    DEFAULT_PROFILE.store(profile.to_u8(), Ordering::Relaxed);
}

/// The profile used by styles that do not carry their own.
pub fn default_profile() -> ColorProfile {
    ColorProfile::from_u8(DEFAULT_PROFILE.load(Ordering::Relaxed))
}

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// ANSI 256 palette index.
    Ansi(u8),
    /// 24-bit color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// SGR parameters selecting this color, for foreground or background.
    pub(crate) fn sgr(self, profile: ColorProfile, background: bool) -> Option<String> {
        let base = if background { 48 } else { 38 };
        match (profile, self) {
            (ColorProfile::Ascii, _) => None,
            (_, Self::Ansi(n)) => Some(format!("{base};5;{n}")),
            (ColorProfile::Ansi256, Self::Rgb(r, g, b)) => {
                Some(format!("{base};5;{}", rgb_to_ansi256(r, g, b)))
            }
            (ColorProfile::TrueColor, Self::Rgb(r, g, b)) => {
                Some(format!("{base};2;{r};{g};{b}"))
            }
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ColorParseError::InvalidHex(s.to_string()));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16)
                    .map_err(|_| ColorParseError::InvalidHex(s.to_string()))
            };
            return Ok(Self::Rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        s.parse::<u8>()
            .map(Self::Ansi)
            .map_err(|_| ColorParseError::InvalidAnsi(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ansi(n) => write!(f, "{n}"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

/// Map a 24-bit color to the nearest entry of the 6x6x6 ANSI cube or
/// grayscale ramp.
pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((u16::from(r) - 8) * 24 / 247) as u8;
    }
    let level = |c: u8| -> u8 {
        if c < 48 {
            0
        } else if c < 115 {
            1
        } else {
            (c - 35) / 40
        }
    };
    16 + 36 * level(r) + 6 * level(g) + level(b)
}
