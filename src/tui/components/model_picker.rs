//! # Model Picker Component
//!
//! Small overlay for switching the displayed model. Opened with Ctrl+L.
//! The choice is cosmetic: replies come from the same backend either way.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ModelPickerState` lives in `TuiState`
//! - `ModelPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, List, ListItem, ListState};

use crate::core::catalog::MODELS;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::overlay::{centered_rect, overlay_block};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Persistent state for the model picker overlay.
pub struct ModelPickerState {
    pub selected: usize,
    pub list_state: ListState,
}

impl ModelPickerState {
    /// Opens with the current model highlighted.
    pub fn new(current_model: &str) -> Self {
        let selected = MODELS
            .iter()
            .position(|m| *m == current_model)
            .unwrap_or(0);
        Self {
            selected,
            list_state: ListState::default().with_selected(Some(selected)),
        }
    }
}

impl EventHandler for ModelPickerState {
    type Event = ModelPickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ModelPickerEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::OpenModelPicker => Some(ModelPickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(MODELS.len() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => MODELS
                .get(self.selected)
                .map(|model| ModelPickerEvent::Select(model.to_string())),
            _ => None,
        }
    }
}

/// Events emitted by the model picker.
#[derive(Debug, PartialEq)]
pub enum ModelPickerEvent {
    Select(String),
    Dismiss,
}

/// Transient render wrapper for the model picker overlay.
pub struct ModelPicker<'a> {
    state: &'a mut ModelPickerState,
    current_model: &'a str,
    palette: Palette,
}

impl<'a> ModelPicker<'a> {
    pub fn new(state: &'a mut ModelPickerState, current_model: &'a str, palette: Palette) -> Self {
        Self {
            state,
            current_model,
            palette,
        }
    }
}

impl Component for ModelPicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let overlay = centered_rect(36, MODELS.len() as u16 + 2, area);
        frame.render_widget(Clear, overlay);

        let items: Vec<ListItem> = MODELS
            .iter()
            .map(|model| {
                let marker = if *model == self.current_model { "● " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, p.base().fg(p.accent)),
                    Span::raw(*model),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(overlay_block("Model", " Enter Select  Esc Back ", p))
            .highlight_style(p.highlight());

        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opens_on_current_model() {
        let state = ModelPickerState::new("GPT-5-Mini");
        assert_eq!(state.selected, 1);
        let state = ModelPickerState::new("unknown");
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_navigate_and_select() {
        let mut state = ModelPickerState::new("GPT-5-Nano");
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, MODELS.len() - 1);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(ModelPickerEvent::Select("GPT-5-Mini".into()))
        );
    }

    #[test]
    fn test_escape_dismisses() {
        let mut state = ModelPickerState::new("GPT-5-Nano");
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(ModelPickerEvent::Dismiss)
        );
    }
}
