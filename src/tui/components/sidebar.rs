//! # Sidebar Component
//!
//! Left navigation rail. Expanded it shows the brand, a "New chat" button,
//! the "Recent History" list and a "Settings" footer; collapsed it shrinks
//! to a rail of glyphs. Ctrl+B toggles between the two.
//!
//! Rendering records clickable regions in `hits` so the event loop can
//! route mouse clicks without recomputing the layout.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::catalog::{HistoryEntry, RECENT_HISTORY};
use crate::tui::component::Component;
use crate::tui::components::ClickTarget;
use crate::tui::components::title_bar::APP_NAME;
use crate::tui::palette::Palette;

pub const EXPANDED_WIDTH: u16 = 28;
pub const COLLAPSED_WIDTH: u16 = 6;

pub struct Sidebar {
    pub expanded: bool,
    pub palette: Palette,
    /// Filled during render
    pub hits: Vec<(Rect, ClickTarget)>,
}

impl Sidebar {
    pub fn new(expanded: bool, palette: Palette) -> Self {
        Self {
            expanded,
            palette,
            hits: Vec::new(),
        }
    }

    pub fn width(expanded: bool) -> u16 {
        if expanded {
            EXPANDED_WIDTH
        } else {
            COLLAPSED_WIDTH
        }
    }

    fn render_expanded(&mut self, frame: &mut Frame, inner: Rect) {
        let p = self.palette;
        let [brand, _, new_chat, _, history, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        let [brand_text, toggle] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(2)]).areas(brand);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("✦ ", p.panel().fg(p.accent)),
                Span::styled(APP_NAME, p.panel().add_modifier(Modifier::BOLD)),
            ])),
            brand_text,
        );
        frame.render_widget(Paragraph::new(Span::styled("«", p.muted())), toggle);
        self.hits.push((toggle, ClickTarget::ToggleSidebar));

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" + ", p.highlight()),
                Span::styled(" New chat", p.panel().add_modifier(Modifier::BOLD)),
            ])),
            new_chat,
        );
        self.hits.push((new_chat, ClickTarget::NewChat));

        let mut lines = vec![Line::styled("Recent History", p.muted())];
        lines.extend(
            RECENT_HISTORY
                .iter()
                .map(|entry| history_line(entry, history.width, p)),
        );
        frame.render_widget(Paragraph::new(lines), history);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("⚙ ", p.muted()),
                Span::styled("Settings", p.panel()),
            ])),
            footer,
        );
        self.hits.push((footer, ClickTarget::Settings));
    }

    fn render_collapsed(&mut self, frame: &mut Frame, inner: Rect) {
        let p = self.palette;
        let [toggle, _, new_chat, _, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        let centered = |glyph: &'static str, style| Paragraph::new(Span::styled(glyph, style)).centered();
        frame.render_widget(centered("»", p.muted()), toggle);
        frame.render_widget(centered("+", p.highlight()), new_chat);
        frame.render_widget(centered("⚙", p.muted()), footer);

        self.hits.push((toggle, ClickTarget::ToggleSidebar));
        self.hits.push((new_chat, ClickTarget::NewChat));
        self.hits.push((footer, ClickTarget::Settings));
    }
}

/// `"  Title…         2h ago"` clipped to `width`.
fn history_line(entry: &HistoryEntry, width: u16, p: Palette) -> Line<'static> {
    let width = width as usize;
    let age = entry.age;
    let room = width.saturating_sub(age.width() + 3);
    let title = truncate(entry.title, room);
    let gap = width.saturating_sub(title.width() + age.width() + 2);
    Line::from(vec![
        Span::raw("  "),
        Span::styled(title, p.panel()),
        Span::raw(" ".repeat(gap)),
        Span::styled(age, p.muted()),
    ])
}

fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + 2 > max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

impl Component for Sidebar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.hits.clear();
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(self.palette.border())
            .style(self.palette.panel());
        let inner = block.inner(area).inner(ratatui::layout::Margin::new(1, 0));
        frame.render_widget(block, area);

        if self.expanded {
            self.render_expanded(frame, inner);
        } else {
            self.render_collapsed(frame, inner);
        }
    }
}
