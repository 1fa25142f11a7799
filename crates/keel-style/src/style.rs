//! Style definition and builder.
//!
//! A [`Style`] is a small value describing how a piece of text should look:
//! text attributes, colors, horizontal padding, a fixed width and an optional
//! border. Components keep their styles in a `Styles` struct and render
//! strings through them.
//!
//! # Example
//!
//! ```rust
//! use keel_style::{Color, ColorProfile, Style};
//!
//! let style = Style::new()
//!     .bold()
//!     .foreground(Color::Ansi(212))
//!     .padding_left(1)
//!     .profile(ColorProfile::Ascii);
//!
//! assert_eq!(style.render("Hello"), " Hello");
//! ```

use bitflags::bitflags;

use crate::border::Border;
use crate::color::{Color, ColorProfile, default_profile};
use crate::text::{fit, visible_width};

bitflags! {
    /// Boolean text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attrs: u8 {
        const BOLD = 1 << 0;
        const FAINT = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const REVERSE = 1 << 4;
        const STRIKETHROUGH = 1 << 5;
    }
}

/// A text style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    attrs: Attrs,
    fg: Option<Color>,
    bg: Option<Color>,
    padding_left: u16,
    padding_right: u16,
    width: Option<u16>,
    border: Option<Border>,
    profile: Option<ColorProfile>,
}

impl Style {
    /// An empty style; renders text unchanged.
    pub const fn new() -> Self {
        Self {
            attrs: Attrs::empty(),
            fg: None,
            bg: None,
            padding_left: 0,
            padding_right: 0,
            width: None,
            border: None,
            profile: None,
        }
    }

    /// Bold text.
    pub const fn bold(mut self) -> Self {
        self.attrs = self.attrs.union(Attrs::BOLD);
        self
    }

    /// Dim text.
    pub const fn faint(mut self) -> Self {
        self.attrs = self.attrs.union(Attrs::FAINT);
        self
    }

    /// Italic text.
    pub const fn italic(mut self) -> Self {
        self.attrs = self.attrs.union(Attrs::ITALIC);
        self
    }

    /// Underlined text.
    pub const fn underline(mut self) -> Self {
        self.attrs = self.attrs.union(Attrs::UNDERLINE);
        self
    }

    /// Swapped foreground and background.
    pub const fn reverse(mut self) -> Self {
        self.attrs = self.attrs.union(Attrs::REVERSE);
        self
    }

    /// Struck-through text.
    pub const fn strikethrough(mut self) -> Self {
        self.attrs = self.attrs.union(Attrs::STRIKETHROUGH);
        self
    }

    /// Foreground color.
    pub const fn foreground(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Background color.
    pub const fn background(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Blank cells before the text.
    pub const fn padding_left(mut self, n: u16) -> Self {
        self.padding_left = n;
        self
    }

    /// Blank cells after the text.
    pub const fn padding_right(mut self, n: u16) -> Self {
        self.padding_right = n;
        self
    }

    /// Same padding on both sides.
    pub const fn padding_x(self, n: u16) -> Self {
        self.padding_left(n).padding_right(n)
    }

    /// Fixed width for every line, padding included; longer lines are cut.
    pub const fn width(mut self, w: u16) -> Self {
        self.width = Some(w);
        self
    }

    /// Surround the text with a border.
    pub const fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    /// Color profile for this style, overriding the process default.
    pub const fn profile(mut self, profile: ColorProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Text attributes in effect.
    pub const fn attrs(&self) -> Attrs {
        self.attrs
    }

    /// Whether the style changes anything about the text.
    pub fn is_plain(&self) -> bool {
        self.attrs.is_empty()
            && self.fg.is_none()
            && self.bg.is_none()
            && self.padding_left == 0
            && self.padding_right == 0
            && self.width.is_none()
            && self.border.is_none()
    }

    fn sgr_start(&self, profile: ColorProfile) -> Option<String> {
        if profile == ColorProfile::Ascii {
            return None;
        }
        let mut params: Vec<String> = Vec::new();
        for (flag, code) in [
            (Attrs::BOLD, "1"),
            (Attrs::FAINT, "2"),
            (Attrs::ITALIC, "3"),
            (Attrs::UNDERLINE, "4"),
            (Attrs::REVERSE, "7"),
            (Attrs::STRIKETHROUGH, "9"),
        ] {
            if self.attrs.contains(flag) {
                params.push(code.to_string());
            }
        }
        params.extend(self.fg.and_then(|c| c.sgr(profile, false)));
        params.extend(self.bg.and_then(|c| c.sgr(profile, true)));
        if params.is_empty() {
            None
        } else {
            Some(format!("\x1b[{}m", params.join(";")))
        }
    }

    /// Render text with this style applied. Multi-line text is styled line
    /// by line so borders and padding line up.
    pub fn render(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        let profile = self.profile.unwrap_or_else(default_profile);
        let start = self.sgr_start(profile);
        let left = " ".repeat(usize::from(self.padding_left));
        let right = " ".repeat(usize::from(self.padding_right));

        let mut lines: Vec<String> = text
            .split('\n')
            .map(|line| {
                let mut line = format!("{left}{line}{right}");
                if let Some(w) = self.width {
                    line = fit(&line, usize::from(w));
                }
                match &start {
                    Some(sgr) => format!("{sgr}{line}\x1b[0m"),
                    None => line,
                }
            })
            .collect();

        if let Some(border) = self.border {
            let inner = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
            let mut boxed = Vec::with_capacity(lines.len() + 2);
            boxed.push(format!(
                "{}{}{}",
                border.top_left,
                border.top.repeat(inner),
                border.top_right
            ));
            for line in lines.drain(..) {
                let pad = inner - visible_width(&line);
                boxed.push(format!(
                    "{}{line}{}{}",
                    border.left,
                    " ".repeat(pad),
                    border.right
                ));
            }
            boxed.push(format!(
                "{}{}{}",
                border.bottom_left,
                border.bottom.repeat(inner),
                border.bottom_right
            ));
            lines = boxed;
        }

        lines.join("\n")
    }
}
