//! # InputBox Component
//!
//! The composer: a bordered, auto-expanding draft editor.
//!
//! ## Responsibilities
//!
//! - Capture text input and editing (backspace, delete, cursor movement, paste)
//! - Handle submission (Enter), refusing blank drafts and drafts sent while
//!   a reply is pending
//! - Display the placeholder, the selected model and the send marker
//!
//! ## State Management
//!
//! The buffer is internal state. `is_loading`, `placeholder`, `model_name`
//! and `palette` are props synced from the application state each frame.
//! Cursor position and scroll state are encapsulated in `CursorState`.

mod cursor;
mod layout;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::catalog::DEFAULT_MODEL;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

use cursor::CursorState;
use layout::{CHROME_HEIGHT, MAX_ROWS, row_count, step_back, step_forward, text_width, wrap};

pub const WELCOME_PLACEHOLDER: &str = "How can I help you today?";
pub const REPLY_PLACEHOLDER: &str = "Reply...";
const SEND_MARKER: &str = "➤";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Trimmed, non-blank draft; the buffer has been cleared
    Submit(String),
    ContentChanged,
}

/// Text input component.
///
/// # Props
///
/// - `is_loading`: a reply is pending, Enter is inert
/// - `placeholder`: shown while the buffer is empty
/// - `model_name`: shown in the bottom border
/// - `palette`: colours for the current theme
///
/// # State
///
/// - `buffer`: Current text being typed
/// - `cursor`: Cursor position, scroll offset, and cached width (see `CursorState`)
pub struct InputBox {
    pub buffer: String,
    pub is_loading: bool,
    pub placeholder: &'static str,
    pub model_name: String,
    pub palette: Palette,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new(Palette::for_theme(Default::default()))
    }
}

impl InputBox {
    pub fn new(palette: Palette) -> Self {
        Self {
            buffer: String::new(),
            is_loading: false,
            placeholder: WELCOME_PLACEHOLDER,
            model_name: DEFAULT_MODEL.to_string(),
            palette,
            cursor: CursorState::new(),
        }
    }

    /// Whether Enter would currently emit a submission.
    pub fn can_submit(&self) -> bool {
        !self.is_loading && !self.buffer.trim().is_empty()
    }

    /// Box height for the current draft: one text row when empty, growing
    /// with the draft up to `MAX_ROWS`, plus the borders.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let rows = row_count(&self.buffer, text_width(content_width));
        rows.min(MAX_ROWS) + CHROME_HEIGHT
    }

    /// Get the visible text based on current scroll offset.
    fn get_visible_text(&self, content_width: u16) -> String {
        if self.cursor.scroll_offset == 0 {
            return self.buffer.clone();
        }

        let width = text_width(content_width);
        if width == 0 {
            return String::new();
        }

        let lines = wrap(&self.buffer, width);

        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + MAX_ROWS as usize).min(lines.len());

        lines[start..end].join("\n")
    }

    /// Render scrollbar when content exceeds visible area
    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

        let total_lines = row_count(&self.buffer, text_width(area.width));
        if total_lines <= MAX_ROWS {
            return;
        }

        // ScrollbarState content_length is max scrollable position, not total items
        let max_scroll = total_lines - MAX_ROWS;

        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.cursor.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight).style(self.palette.muted()),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }

    fn footer(&self) -> Line<'_> {
        let p = self.palette;
        let send_style = if self.can_submit() {
            p.base().fg(p.accent).add_modifier(Modifier::BOLD)
        } else {
            p.muted().add_modifier(Modifier::DIM)
        };
        Line::from(vec![
            Span::styled(format!(" {} ▾ ", self.model_name), p.muted()),
            Span::styled(SEND_MARKER, send_style),
            Span::raw(" "),
        ])
        .alignment(Alignment::Right)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_content_width = area.width;
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let p = self.palette;
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(p.border())
            .title_bottom(Line::styled(" Ctrl+P ideas · Ctrl+J newline ", p.muted()))
            .title_bottom(self.footer())
            .style(p.base());

        let input = if self.buffer.is_empty() {
            Paragraph::new(Span::styled(self.placeholder, p.muted()))
        } else {
            Paragraph::new(self.get_visible_text(area.width)).style(p.base())
        };

        frame.render_widget(input.block(block), area);
        self.render_scrollbar(frame, area);

        let (cursor_x, cursor_y) = self.cursor.screen_pos(&self.buffer, area);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor.pos, text);
                self.cursor.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = step_back(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = step_forward(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = step_back(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = step_forward(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor.pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor.pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                if !self.can_submit() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer).trim().to_string();
                self.cursor.reset();
                Some(InputEvent::Submit(text))
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1, self.cursor.last_content_width)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1, self.cursor.last_content_width)
                .then_some(InputEvent::ContentChanged),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn input() -> InputBox {
        InputBox::new(Palette::for_theme(Theme::Light))
    }

    fn type_str(input: &mut InputBox, s: &str) {
        for c in s.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn render_text(input: &mut InputBox, width: u16) -> String {
        let height = input.calculate_height(width);
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                input.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_handle_input() {
        let mut input = input();

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");

        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_submit_trims_and_clears() {
        let mut input = input();
        type_str(&mut input, "  hello  ");

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("hello".into())));
        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn test_blank_submit_is_inert() {
        let mut input = input();
        type_str(&mut input, "   ");
        assert!(!input.can_submit());
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "   ");
    }

    #[test]
    fn test_submit_while_loading_keeps_draft() {
        let mut input = input();
        input.is_loading = true;
        type_str(&mut input, "next question");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "next question");

        input.is_loading = false;
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("next question".into()))
        );
    }

    #[test]
    fn test_newline_then_submit_keeps_inner_newline() {
        let mut input = input();
        type_str(&mut input, "line one");
        input.handle_event(&TuiEvent::InputChar('\n'));
        type_str(&mut input, "line two");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("line one\nline two".into()))
        );
    }

    #[test]
    fn test_cursor_editing() {
        let mut input = input();
        type_str(&mut input, "helo");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('l'));
        assert_eq!(input.buffer, "hello");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "ello");

        input.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(input.handle_event(&TuiEvent::CursorRight), None);
    }

    #[test]
    fn test_height_grows_then_caps() {
        let mut input = input();
        assert_eq!(input.calculate_height(40), 1 + CHROME_HEIGHT);

        for _ in 0..3 {
            input.handle_event(&TuiEvent::InputChar('\n'));
        }
        assert_eq!(input.calculate_height(40), 4 + CHROME_HEIGHT);

        for _ in 0..10 {
            input.handle_event(&TuiEvent::InputChar('\n'));
        }
        assert_eq!(input.calculate_height(40), MAX_ROWS + CHROME_HEIGHT);
    }

    #[test]
    fn test_vertical_move_then_typing_on_multibyte_line() {
        let mut input = input();
        type_str(&mut input, "abc\néé");
        input.handle_event(&TuiEvent::CursorUp);
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);

        assert_eq!(
            input.handle_event(&TuiEvent::CursorDown),
            Some(InputEvent::ContentChanged)
        );
        input.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(input.buffer, "abc\néxé");

        // Still renders with the cursor inside the box
        let text = render_text(&mut input, 40);
        assert!(text.contains("éxé"));
    }

    #[test]
    fn test_backspace_and_delete_remove_whole_characters() {
        let mut input = input();
        type_str(&mut input, "a🔥é");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "a🔥");

        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_render_shows_placeholder_and_model() {
        let mut input = input();
        input.placeholder = REPLY_PLACEHOLDER;
        input.model_name = "GPT-5-Mini".into();
        let text = render_text(&mut input, 60);
        assert!(text.contains("Reply..."));
        assert!(text.contains("GPT-5-Mini"));
        assert!(text.contains(SEND_MARKER));
    }

    #[test]
    fn test_render_hides_placeholder_when_typing() {
        let mut input = input();
        type_str(&mut input, "draft");
        let text = render_text(&mut input, 60);
        assert!(text.contains("draft"));
        assert!(!text.contains(WELCOME_PLACEHOLDER));
    }

    #[test]
    fn test_send_marker_dims_when_inert() {
        let mut input = input();
        let inert = input.footer().spans[1].style;
        assert!(inert.add_modifier.contains(Modifier::DIM));

        type_str(&mut input, "hi");
        let live = input.footer().spans[1].style;
        assert_eq!(live.fg, Some(input.palette.accent));

        input.is_loading = true;
        let loading = input.footer().spans[1].style;
        assert!(loading.add_modifier.contains(Modifier::DIM));
    }
}
