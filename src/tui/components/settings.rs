//! # Settings Modal
//!
//! Appearance choice (Light / Dark). Opened with Ctrl+S or by clicking
//! "Settings" in the sidebar footer. Enter applies the highlighted theme as
//! an explicit choice.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, List, ListItem, ListState};

use crate::core::theme::Theme;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::overlay::{centered_rect, overlay_block};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

const CHOICES: [Theme; 2] = [Theme::Light, Theme::Dark];

pub struct SettingsState {
    pub selected: usize,
}

#[derive(Debug, PartialEq)]
pub enum SettingsEvent {
    Apply(Theme),
    Dismiss,
}

impl SettingsState {
    pub fn new(current: Theme) -> Self {
        let selected = CHOICES.iter().position(|t| *t == current).unwrap_or(0);
        Self { selected }
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(CHOICES.len() - 1);
    }
}

impl EventHandler for SettingsState {
    type Event = SettingsEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SettingsEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::OpenSettings => Some(SettingsEvent::Dismiss),
            TuiEvent::CursorUp | TuiEvent::CursorLeft => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown | TuiEvent::CursorRight => {
                self.select(self.selected + 1);
                None
            }
            TuiEvent::InputChar('l') => Some(SettingsEvent::Apply(Theme::Light)),
            TuiEvent::InputChar('d') => Some(SettingsEvent::Apply(Theme::Dark)),
            TuiEvent::Submit => Some(SettingsEvent::Apply(CHOICES[self.selected])),
            _ => None,
        }
    }
}

pub struct Settings<'a> {
    state: &'a mut SettingsState,
    current: Theme,
    palette: Palette,
}

impl<'a> Settings<'a> {
    pub fn new(state: &'a mut SettingsState, current: Theme, palette: Palette) -> Self {
        Self {
            state,
            current,
            palette,
        }
    }
}

impl Component for Settings<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let overlay = centered_rect(40, CHOICES.len() as u16 + 4, area);
        frame.render_widget(Clear, overlay);

        let mut items = vec![ListItem::new(Line::styled("Appearance", p.muted()))];
        items.extend(CHOICES.iter().map(|theme| {
            let marker = if *theme == self.current { "● " } else { "○ " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, p.base().fg(p.accent)),
                Span::raw(theme.label()),
            ]))
        }));

        // Row 0 is the section heading
        let mut list_state = ListState::default().with_selected(Some(self.state.selected + 1));

        let list = List::new(items)
            .block(overlay_block("Settings", " Enter Apply  Esc Close ", p))
            .highlight_style(p.highlight());
        frame.render_stateful_widget(list, overlay, &mut list_state);
    }
}
