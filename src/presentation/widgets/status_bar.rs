//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::presentation::ui::ProductListState;

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational.
    Info,
    /// Success.
    Success,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }
}

/// One-line bar with left, center and right sections.
#[derive(Debug, Clone)]
pub struct StatusBar {
    left: String,
    center: String,
    right: String,
    level: StatusLevel,
}

impl StatusBar {
    /// Creates empty status bar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: String::new(),
            center: String::new(),
            right: String::new(),
            level: StatusLevel::Info,
        }
    }

    /// Builds the bar summarizing a product list.
    #[must_use]
    pub fn for_list(state: &ProductListState) -> Self {
        let bar = Self::new().right("r refresh  i recheck image  q quit");
        match state {
            ProductListState::Loading => bar.left("Loading...").level(StatusLevel::Info),
            ProductListState::Error(_) => bar.left("Load failed").level(StatusLevel::Error),
            ProductListState::Ready(products) => {
                let noun = if products.len() == 1 { "product" } else { "products" };
                bar.left(format!("{} {noun}", products.len()))
                    .level(StatusLevel::Success)
            }
        }
    }

    /// Sets left content.
    #[must_use]
    pub fn left(mut self, content: impl Into<String>) -> Self {
        self.left = content.into();
        self
    }

    /// Sets center content.
    #[must_use]
    pub fn center(mut self, content: impl Into<String>) -> Self {
        self.center = content.into();
        self
    }

    /// Sets right content.
    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    /// Sets status level.
    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }

    /// Returns the left content.
    #[must_use]
    pub fn left_text(&self) -> &str {
        &self.left
    }

    /// Returns the status level.
    #[must_use]
    pub const fn current_level(&self) -> StatusLevel {
        self.level
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);
        let hint_style = Style::default().fg(Color::DarkGray);

        let width = area.width as usize;

        let left_len = self.left.width();
        let center_len = self.center.width();
        let right_len = self.right.width();

        let center_start = width.saturating_sub(center_len) / 2;
        let right_start = width.saturating_sub(right_len);

        let mut spans = vec![Span::styled(&self.left, style)];

        let left_padding = center_start.saturating_sub(left_len);
        if left_padding > 0 {
            spans.push(Span::raw(" ".repeat(left_padding)));
        }

        if !self.center.is_empty() {
            spans.push(Span::styled(&self.center, style));
        }

        let current_len = left_len + left_padding + center_len;
        let right_padding = right_start.saturating_sub(current_len);
        if right_padding > 0 {
            spans.push(Span::raw(" ".repeat(right_padding)));
        }

        if !self.right.is_empty() {
            spans.push(Span::styled(&self.right, hint_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Product;

    #[test]
    fn test_for_list_levels() {
        assert_eq!(
            StatusBar::for_list(&ProductListState::Loading).current_level(),
            StatusLevel::Info
        );
        assert_eq!(
            StatusBar::for_list(&ProductListState::Error("x".to_string())).current_level(),
            StatusLevel::Error
        );
    }

    #[test]
    fn test_for_list_counts_products() {
        let one = ProductListState::Ready(vec![Product::new(1, "a", 1.0)]);
        let none = ProductListState::Ready(Vec::new());

        assert_eq!(StatusBar::for_list(&one).left_text(), "1 product");
        assert_eq!(StatusBar::for_list(&none).left_text(), "0 products");
    }

    #[test]
    fn test_render_places_sections() {
        let bar = StatusBar::new().left("L").center("C").right("R");
        let area = Rect::new(0, 0, 11, 1);
        let mut buf = Buffer::empty(area);

        (&bar).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "L");
        assert_eq!(buf[(5, 0)].symbol(), "C");
        assert_eq!(buf[(10, 0)].symbol(), "R");
    }
}
