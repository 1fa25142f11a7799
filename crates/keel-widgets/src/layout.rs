//! Layout helpers: a bordered [`Container`] and a [`Stack`] of views.

use keel_style::{Border, Style, Theme, pad_right, visible_width};

/// A titled, bordered box.
///
/// ```text
/// ╭──────────────────────────╮
/// │ Orders          [ Add ]  │
/// │ Last 30 days             │
/// │                          │
/// │ ...body...               │
/// │ ────────────────────     │
/// │ footer                   │
/// ╰──────────────────────────╯
/// ```
#[derive(Debug, Clone, Default)]
pub struct Container {
    /// Heading.
    pub title: String,
    /// Line under the heading.
    pub subtitle: String,
    /// Rendered content placed at the right end of the heading line.
    pub action_group: String,
    /// Rendered body.
    pub body: String,
    /// Rendered footer, separated by a rule.
    pub footer: String,
    /// Minimum inner width in cells.
    pub width: usize,
    /// Blank cell between border and content.
    pub gutters: bool,
    /// Palette.
    pub theme: Theme,
}

impl Container {
    /// An empty container with gutters.
    pub fn new() -> Self {
        Self {
            gutters: true,
            ..Self::default()
        }
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the subtitle.
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the action group.
    pub fn action_group(mut self, view: impl Into<String>) -> Self {
        self.action_group = view.into();
        self
    }

    /// Set the body.
    pub fn body(mut self, view: impl Into<String>) -> Self {
        self.body = view.into();
        self
    }

    /// Set the footer.
    pub fn footer(mut self, view: impl Into<String>) -> Self {
        self.footer = view.into();
        self
    }

    /// Set the minimum inner width.
    pub const fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Turn gutters on or off.
    pub const fn gutters(mut self, gutters: bool) -> Self {
        self.gutters = gutters;
        self
    }

    /// Render the container.
    pub fn view(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        let title_style = Style::new().bold();
        let sub_style = Style::new().foreground(self.theme.secondary);

        let has_header = !self.title.is_empty() || !self.action_group.is_empty();
        let body_width = [self.body.as_str(), self.footer.as_str(), self.subtitle.as_str()]
            .iter()
            .map(|s| visible_width(s))
            .max()
            .unwrap_or(0);
        let header_width = visible_width(&self.title) + visible_width(&self.action_group) + 2;
        let inner = self.width.max(body_width).max(if has_header { header_width } else { 0 });

        if has_header {
            let title = title_style.render(&self.title);
            let gap = inner.saturating_sub(visible_width(&self.title) + visible_width(&self.action_group));
            lines.push(format!("{title}{}{}", " ".repeat(gap), self.action_group));
        }
        if !self.subtitle.is_empty() {
            lines.push(sub_style.render(&self.subtitle));
        }
        if has_header || !self.subtitle.is_empty() {
            lines.push(String::new());
        }
        if !self.body.is_empty() {
            lines.extend(self.body.lines().map(str::to_string));
        }
        if !self.footer.is_empty() {
            lines.push("─".repeat(inner));
            lines.extend(self.footer.lines().map(str::to_string));
        }

        let padded: Vec<String> = lines.iter().map(|l| pad_right(l, inner)).collect();
        let border: Border = self.theme.border.into();
        let mut style = Style::new().border(border);
        if self.gutters {
            style = style.padding_x(1);
        }
        style.render(&padded.join("\n"))
    }
}

/// Direction of a [`Stack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Children one below another.
    #[default]
    Vertical,
    /// Children side by side, top-aligned.
    Horizontal,
}

/// Joins child views with spacing.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    /// Rendered children.
    pub children: Vec<String>,
    /// Layout direction.
    pub direction: Direction,
    /// Blank lines (vertical) or cells (horizontal) between children.
    pub spacing: usize,
}

impl Stack {
    /// A vertical stack.
    pub fn vertical(spacing: usize) -> Self {
        Self {
            direction: Direction::Vertical,
            spacing,
            ..Self::default()
        }
    }

    /// A horizontal stack.
    pub fn horizontal(spacing: usize) -> Self {
        Self {
            direction: Direction::Horizontal,
            spacing,
            ..Self::default()
        }
    }

    /// Append a child view. Empty views are skipped.
    pub fn push(mut self, view: impl Into<String>) -> Self {
        let view = view.into();
        if !view.is_empty() {
            self.children.push(view);
        }
        self
    }

    /// Render the stack.
    pub fn view(&self) -> String {
        match self.direction {
            Direction::Vertical => {
                let sep = format!("\n{}", "\n".repeat(self.spacing));
                self.children.join(&sep)
            }
            Direction::Horizontal => self.join_horizontal(),
        }
    }

    fn join_horizontal(&self) -> String {
        let blocks: Vec<Vec<&str>> = self.children.iter().map(|c| c.lines().collect()).collect();
        let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = self.children.iter().map(|c| visible_width(c)).collect();
        let gap = " ".repeat(self.spacing);

        (0..height)
            .map(|row| {
                let cells: Vec<String> = blocks
                    .iter()
                    .zip(&widths)
                    .map(|(block, &w)| pad_right(block.get(row).copied().unwrap_or(""), w))
                    .collect();
                cells.join(&gap).trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_style::{BorderKind, strip_ansi};

    #[test]
    fn test_container_layout() {
        let c = Container {
            theme: Theme {
                border: BorderKind::Ascii,
                ..Theme::default()
            },
            ..Container::new()
        }
        .title("Orders")
        .action_group("[ Add ]")
        .body("row 1\nrow 2");
        let out = strip_ansi(&c.view());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "+-----------------+");
        assert_eq!(lines[1], "| Orders  [ Add ] |");
        assert_eq!(lines[2], "|                 |");
        assert_eq!(lines[3], "| row 1           |");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_container_footer_rule() {
        let out = strip_ansi(&Container::new().gutters(false).body("abc").footer("end").view());
        assert!(out.contains("───"));
        assert!(out.contains("end"));
    }

    #[test]
    fn test_vertical_stack_spacing() {
        let s = Stack::vertical(1).push("a").push("").push("b");
        assert_eq!(s.view(), "a\n\nb");
    }

    #[test]
    fn test_horizontal_stack_aligns_rows() {
        let s = Stack::horizontal(2).push("ab\nc").push("x");
        assert_eq!(s.view(), "ab  x\nc");
    }
}
