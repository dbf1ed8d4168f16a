//! # Welcome Screen Component
//!
//! Shown while the conversation is empty: heading, tagline, the input box
//! embedded in the page, and a grid of suggestion cards. Clicking a card
//! submits its description just like the suggestion panel does.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::catalog::SUGGESTIONS;
use crate::tui::component::Component;
use crate::tui::components::ClickTarget;
use crate::tui::components::input_box::InputBox;
use crate::tui::palette::Palette;

pub const HEADING: &str = "Welcome to AI Chatbot";
pub const TAGLINE: &str = "Your minimalist, high-performance companion for intelligent \
exploration and creative production.";

const MAX_CONTENT_WIDTH: u16 = 80;
const CARD_HEIGHT: u16 = 3;
/// Narrowest content width that still fits four cards side by side
const FOUR_COLUMN_MIN_WIDTH: u16 = 72;

pub struct WelcomeScreen<'a> {
    pub input: &'a mut InputBox,
    pub palette: Palette,
    /// Filled during render
    pub hits: Vec<(Rect, ClickTarget)>,
}

impl<'a> WelcomeScreen<'a> {
    pub fn new(input: &'a mut InputBox, palette: Palette) -> Self {
        Self {
            input,
            palette,
            hits: Vec::new(),
        }
    }

    fn header(&self, width: u16) -> (Paragraph<'static>, u16) {
        let p = self.palette;
        let tagline_lines = textwrap::wrap(TAGLINE, width.max(1) as usize).len() as u16;
        let paragraph = Paragraph::new(vec![
            Line::styled("✦", p.base().fg(p.accent).add_modifier(Modifier::BOLD)),
            Line::default(),
            Line::styled(HEADING, p.base().add_modifier(Modifier::BOLD)),
            Line::styled(TAGLINE, p.muted()),
        ])
        .centered()
        .wrap(Wrap { trim: true });
        (paragraph, 3 + tagline_lines)
    }

    fn render_cards(&mut self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let columns = card_columns(area.width);
        let rows = SUGGESTIONS.chunks(columns);
        let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); rows.len()])
            .split(area);

        for (row_index, (row, row_area)) in rows.zip(row_areas.iter()).enumerate() {
            let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
                .spacing(1)
                .split(*row_area);
            for (col_index, (suggestion, cell)) in row.iter().zip(cells.iter()).enumerate() {
                let card = Paragraph::new(Line::from(vec![
                    Span::styled(format!("{} ", suggestion.icon), p.muted()),
                    Span::styled(suggestion.title, p.panel().add_modifier(Modifier::BOLD)),
                ]))
                .centered()
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .border_style(p.border())
                        .style(p.panel()),
                );
                frame.render_widget(card, *cell);
                self.hits.push((
                    *cell,
                    ClickTarget::Suggestion(row_index * columns + col_index),
                ));
            }
        }
    }
}

fn card_columns(width: u16) -> usize {
    if width >= FOUR_COLUMN_MIN_WIDTH { 4 } else { 2 }
}

impl Component for WelcomeScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.hits.clear();
        frame.render_widget(Block::new().style(self.palette.base()), area);

        let width = area.width.saturating_sub(4).min(MAX_CONTENT_WIDTH);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);

        let (header, header_height) = self.header(width);
        let input_height = self.input.calculate_height(width);
        let card_rows = SUGGESTIONS.len().div_ceil(card_columns(width)) as u16;

        let [header_area, _, input_area, _, cards_area] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Length(1),
            Constraint::Length(input_height),
            Constraint::Length(1),
            Constraint::Length(card_rows * CARD_HEIGHT),
        ])
        .flex(Flex::Center)
        .areas(column);

        frame.render_widget(header, header_area);
        self.input.render(frame, input_area);
        self.render_cards(frame, cards_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(width: u16, height: u16) -> (String, Vec<(Rect, ClickTarget)>) {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let palette = Palette::for_theme(Theme::Light);
        let mut input = InputBox::new(palette);
        let mut hits = Vec::new();
        terminal
            .draw(|f| {
                let area = f.area();
                let mut screen = WelcomeScreen::new(&mut input, palette);
                screen.render(f, area);
                hits = screen.hits;
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        (text, hits)
    }

    #[test]
    fn test_renders_heading_placeholder_and_cards() {
        let (text, hits) = render(100, 30);
        assert!(text.contains(HEADING));
        assert!(text.contains("How can I help you today?"));
        for s in SUGGESTIONS {
            assert!(text.contains(s.title), "missing card {}", s.title);
        }
        assert_eq!(hits.len(), SUGGESTIONS.len());
    }

    #[test]
    fn test_card_grid_adapts_to_width() {
        assert_eq!(card_columns(80), 4);
        assert_eq!(card_columns(60), 2);

        let (_, hits) = render(50, 30);
        // Two rows of two: first and third cards stack vertically
        let first = hits[0].0;
        let third = hits[2].0;
        assert_eq!(first.x, third.x);
        assert!(third.y > first.y);
    }

    #[test]
    fn test_hits_map_to_suggestion_indices() {
        let (_, hits) = render(100, 30);
        let indices: Vec<ClickTarget> = hits.iter().map(|(_, t)| *t).collect();
        assert_eq!(
            indices,
            (0..SUGGESTIONS.len())
                .map(ClickTarget::Suggestion)
                .collect::<Vec<_>>()
        );
    }
}
