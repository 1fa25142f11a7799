//! Styled text runs.

use keel_style::{Style, Theme};

/// How the text is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextVariant {
    /// Block of text followed by a blank line.
    #[default]
    Paragraph,
    /// Inline run.
    Span,
    /// Inline, dimmed.
    Small,
}

/// Text color role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextColor {
    /// Terminal default.
    #[default]
    Default,
    /// Secondary (muted) text.
    Secondary,
    /// Error text.
    Error,
}

/// A run of text.
#[derive(Debug, Clone)]
pub struct Text {
    /// Content.
    pub content: String,
    /// Layout variant.
    pub variant: TextVariant,
    /// Color role.
    pub color: TextColor,
    /// Palette.
    pub theme: Theme,
}

impl Text {
    /// A default paragraph.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            variant: TextVariant::Paragraph,
            color: TextColor::Default,
            theme: Theme::default(),
        }
    }

    /// Set the variant.
    pub const fn variant(mut self, variant: TextVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the color role.
    pub const fn color(mut self, color: TextColor) -> Self {
        self.color = color;
        self
    }

    fn style(&self) -> Style {
        let style = match self.color {
            TextColor::Default => Style::new(),
            TextColor::Secondary => Style::new().foreground(self.theme.secondary),
            TextColor::Error => Style::new().foreground(self.theme.error),
        };
        if self.variant == TextVariant::Small {
            style.faint()
        } else {
            style
        }
    }

    /// Render the text.
    pub fn view(&self) -> String {
        let body = self.style().render(&self.content);
        match self.variant {
            TextVariant::Paragraph => format!("{body}\n"),
            TextVariant::Span | TextVariant::Small => body,
        }
    }
}
