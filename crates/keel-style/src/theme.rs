//! Color themes.
//!
//! A [`Theme`] names the handful of colors components draw with. Themes are
//! plain data and can be loaded from TOML or JSON.

use serde::{Deserialize, Serialize};

use crate::border::BorderKind;
use crate::color::Color;

/// Palette shared by all components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Primary accent: primary buttons, focused rows, active controls.
    pub primary: Color,
    /// Secondary text: subtitles, descriptions, counts.
    pub secondary: Color,
    /// Errors and error status text.
    pub error: Color,
    /// Disabled controls and placeholder text.
    pub muted: Color,
    /// Highlighted option or menu item.
    pub highlight: Color,
    /// Border preset for boxed components.
    pub border: BorderKind,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Ansi(212),
            secondary: Color::Ansi(245),
            error: Color::Ansi(196),
            muted: Color::Ansi(240),
            highlight: Color::Ansi(39),
            border: BorderKind::Rounded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_partial_toml_uses_defaults() {
        let theme: Theme = toml::from_str("primary = \"#00ff00\"\nborder = \"ascii\"").unwrap();
        assert_eq!(theme.primary, Color::Rgb(0, 255, 0));
        assert_eq!(theme.border, BorderKind::Ascii);
        assert_eq!(theme.error, Theme::default().error);
    }

    #[test]
    fn test_theme_rejects_bad_color() {
        let err = serde_json::from_str::<Theme>(r##"{"primary": "#zz0000"}"##);
        assert!(err.is_err());
    }
}
