//! Shared chrome for modal overlays (suggestions, model picker, settings).

use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding};

use crate::tui::palette::Palette;

/// A `width` x `height` rect centred in `outer`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(outer.height))])
        .flex(Flex::Center)
        .areas(outer);
    let [center] = Layout::horizontal([Constraint::Length(width.min(outer.width))])
        .flex(Flex::Center)
        .areas(row);
    center
}

/// Bordered panel with a title on top and key help along the bottom.
pub fn overlay_block<'a>(title: &'a str, help: &'a str, palette: Palette) -> Block<'a> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(palette.base().fg(palette.accent))
        .title(format!(" {title} "))
        .title_alignment(Alignment::Left)
        .title_bottom(Line::styled(help, palette.muted()).centered())
        .padding(Padding::horizontal(1))
        .style(palette.panel())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_centred() {
        let outer = Rect::new(0, 0, 100, 40);
        let r = centered_rect(40, 10, outer);
        assert_eq!(r, Rect::new(30, 15, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_outer() {
        let outer = Rect::new(5, 5, 20, 8);
        let r = centered_rect(60, 30, outer);
        assert_eq!(r, outer);
    }
}
