//! # TitleBar Component
//!
//! Top status bar: app name, selected model, transient status, and the
//! "↓ New" indicator when the stream has unseen content below the fold.
//!
//! Purely presentational. All fields are props and the text collapses in
//! priority order so narrow terminals keep the most important part:
//!
//! 1. `"Parley · GPT-5-Nano · Thinking... · ↓ New"`
//! 2. `"Parley · GPT-5-Nano · Thinking..."`
//! 3. `"Parley · GPT-5-Nano"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub const APP_NAME: &str = "Parley";

pub struct TitleBar<'a> {
    pub model_name: &'a str,
    pub status_message: &'a str,
    pub has_unseen_content: bool,
    pub palette: Palette,
}

impl<'a> TitleBar<'a> {
    pub fn new(
        model_name: &'a str,
        status_message: &'a str,
        has_unseen_content: bool,
        palette: Palette,
    ) -> Self {
        Self {
            model_name,
            status_message,
            has_unseen_content,
            palette,
        }
    }

    fn spans(&self) -> Vec<Span<'a>> {
        let p = self.palette;
        let mut spans = vec![
            Span::styled(
                APP_NAME,
                p.base().fg(p.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" · ", p.muted()),
            Span::styled(self.model_name, p.base()),
        ];
        if !self.status_message.is_empty() {
            let style = if self.status_message.starts_with("Reply failed") {
                p.base().fg(p.error)
            } else {
                p.muted()
            };
            spans.push(Span::styled(" · ", p.muted()));
            spans.push(Span::styled(self.status_message, style));
        }
        if self.has_unseen_content {
            spans.push(Span::styled(" · ", p.muted()));
            spans.push(Span::styled("↓ New", p.base().fg(p.accent)));
        }
        spans
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(self.spans());
        frame.render_widget(Paragraph::new(line).style(self.palette.base()), area);
    }
}
