//! Border presets for boxed components.

use serde::{Deserialize, Serialize};

/// Border characters for edges and corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    /// Top edge.
    pub top: &'static str,
    /// Bottom edge.
    pub bottom: &'static str,
    /// Left edge.
    pub left: &'static str,
    /// Right edge.
    pub right: &'static str,
    /// Top-left corner.
    pub top_left: &'static str,
    /// Top-right corner.
    pub top_right: &'static str,
    /// Bottom-left corner.
    pub bottom_left: &'static str,
    /// Bottom-right corner.
    pub bottom_right: &'static str,
    /// Left connector for a horizontal divider.
    pub middle_left: &'static str,
    /// Right connector for a horizontal divider.
    pub middle_right: &'static str,
}

impl Border {
    /// Square corners: `┌─┐`.
    pub const fn normal() -> Self {
        Self {
            top: "─",
            bottom: "─",
            left: "│",
            right: "│",
            top_left: "┌",
            top_right: "┐",
            bottom_left: "└",
            bottom_right: "┘",
            middle_left: "├",
            middle_right: "┤",
        }
    }

    /// Rounded corners: `╭─╮`.
    pub const fn rounded() -> Self {
        Self {
            top_left: "╭",
            top_right: "╮",
            bottom_left: "╰",
            bottom_right: "╯",
            ..Self::normal()
        }
    }

    /// Plain ASCII: `+-+`.
    pub const fn ascii() -> Self {
        Self {
            top: "-",
            bottom: "-",
            left: "|",
            right: "|",
            top_left: "+",
            top_right: "+",
            bottom_left: "+",
            bottom_right: "+",
            middle_left: "+",
            middle_right: "+",
        }
    }
}

/// Named border preset, for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderKind {
    /// [`Border::normal`].
    Normal,
    /// [`Border::rounded`].
    #[default]
    Rounded,
    /// [`Border::ascii`].
    Ascii,
}

impl From<BorderKind> for Border {
    fn from(kind: BorderKind) -> Self {
        match kind {
            BorderKind::Normal => Self::normal(),
            BorderKind::Rounded => Self::rounded(),
            BorderKind::Ascii => Self::ascii(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_shares_edges_with_normal() {
        let r = Border::rounded();
        assert_eq!(r.top, Border::normal().top);
        assert_eq!(r.top_left, "╭");
    }

    #[test]
    fn test_kind_conversion() {
        assert_eq!(Border::from(BorderKind::Ascii), Border::ascii());
    }
}
