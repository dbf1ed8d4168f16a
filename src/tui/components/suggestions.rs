//! # Suggestion Panel
//!
//! Overlay listing the starter prompts. Opened with Ctrl+P.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SuggestionPanelState` lives in `TuiState`
//! - `SuggestionPanel` is created each frame with borrowed state
//!
//! Picking an entry hands its description back to the event loop, which
//! submits it exactly like typed text.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, List, ListItem, ListState};

use crate::core::catalog::{SUGGESTIONS, Suggestion};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::overlay::{centered_rect, overlay_block};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

pub enum SuggestionEvent {
    Pick(&'static Suggestion),
    Dismiss,
}

pub struct SuggestionPanelState {
    pub selected: usize,
    pub list_state: ListState,
}

impl Default for SuggestionPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionPanelState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(SUGGESTIONS.len().saturating_sub(1));
        self.list_state.select(Some(self.selected));
    }
}

impl EventHandler for SuggestionPanelState {
    type Event = SuggestionEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SuggestionEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::ToggleSuggestions => Some(SuggestionEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.select(self.selected + 1);
                None
            }
            TuiEvent::Submit => SUGGESTIONS.get(self.selected).map(SuggestionEvent::Pick),
            TuiEvent::InputChar(c) => {
                let index = c.to_digit(10)?.checked_sub(1)? as usize;
                SUGGESTIONS.get(index).map(SuggestionEvent::Pick)
            }
            _ => None,
        }
    }
}

pub struct SuggestionPanel<'a> {
    state: &'a mut SuggestionPanelState,
    palette: Palette,
}

impl<'a> SuggestionPanel<'a> {
    pub fn new(state: &'a mut SuggestionPanelState, palette: Palette) -> Self {
        Self { state, palette }
    }
}

impl Component for SuggestionPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        // Two lines per entry plus borders
        let height = SUGGESTIONS.len() as u16 * 2 + 2;
        let overlay = centered_rect(72, height, area);
        frame.render_widget(Clear, overlay);

        let items: Vec<ListItem> = SUGGESTIONS
            .iter()
            .enumerate()
            .map(|(i, s)| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("{} ", i + 1), p.muted()),
                        Span::raw(format!("{} ", s.icon)),
                        Span::styled(s.title, Style::default().add_modifier(Modifier::BOLD)),
                    ]),
                    Line::styled(format!("    {}", s.description), p.muted()),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(overlay_block(
                "Suggestions",
                " ↑↓ Move  Enter/1-4 Send  Esc Close ",
                p,
            ))
            .highlight_style(p.highlight());

        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn picked(event: Option<SuggestionEvent>) -> &'static str {
        match event {
            Some(SuggestionEvent::Pick(s)) => s.title,
            _ => panic!("expected a pick"),
        }
    }

    #[test]
    fn test_number_keys_pick_directly() {
        let mut state = SuggestionPanelState::new();
        assert_eq!(
            picked(state.handle_event(&TuiEvent::InputChar('3'))),
            SUGGESTIONS[2].title
        );
        assert!(state.handle_event(&TuiEvent::InputChar('0')).is_none());
        assert!(state.handle_event(&TuiEvent::InputChar('9')).is_none());
        assert!(state.handle_event(&TuiEvent::InputChar('x')).is_none());
    }

    #[test]
    fn test_arrow_navigation_clamps() {
        let mut state = SuggestionPanelState::new();
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
        for _ in 0..10 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, SUGGESTIONS.len() - 1);
        assert_eq!(
            picked(state.handle_event(&TuiEvent::Submit)),
            SUGGESTIONS[SUGGESTIONS.len() - 1].title
        );
    }

    #[test]
    fn test_escape_dismisses() {
        let mut state = SuggestionPanelState::new();
        assert!(matches!(
            state.handle_event(&TuiEvent::Escape),
            Some(SuggestionEvent::Dismiss)
        ));
    }

    #[test]
    fn test_render_lists_all_suggestions() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = SuggestionPanelState::new();
        terminal
            .draw(|f| {
                let area = f.area();
                SuggestionPanel::new(&mut state, Palette::for_theme(Theme::Dark)).render(f, area);
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Suggestions"));
        for s in SUGGESTIONS {
            assert!(text.contains(s.title), "missing {}", s.title);
        }
    }
}
