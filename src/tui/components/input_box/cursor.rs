//! Cursor and internal-scroll bookkeeping for the InputBox.
//!
//! The buffer is owned by `InputBox`; every method here takes it as an
//! explicit `&str` so the dependency stays visible at the call site.

use super::layout::{
    INSET, MAX_ROWS, column_of, offset_of, opens_trailing_row, row_count, row_starts, text_width,
    wrap,
};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Byte offset into the buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible wrapped line (0 when content fits)
    pub scroll_offset: u16,
    /// Width of the last render, used for Up/Down between frames
    pub last_content_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Back to the origin after the buffer is emptied by a submit.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Move one wrapped line up (`direction < 0`) or down, keeping the
    /// character column where possible. Returns `false` at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, content_width: u16) -> bool {
        let width = text_width(content_width);
        if width == 0 || buffer.is_empty() {
            return false;
        }

        let lines = wrap(buffer, width);
        let starts = row_starts(buffer, &lines);
        let Some(current) = starts.iter().rposition(|&start| start <= self.pos) else {
            return false;
        };
        let column = column_of(&lines[current], self.pos - starts[current]);

        let target = if direction < 0 {
            match current.checked_sub(1) {
                Some(t) => t,
                None => return false,
            }
        } else if current + 1 < lines.len() {
            current + 1
        } else {
            return false;
        };

        self.pos = starts[target] + offset_of(&lines[target], column);
        true
    }

    /// Which wrapped line (0-based) the cursor sits on.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = text_width(content_width);
        if width == 0 {
            return 0;
        }

        let before = &buffer[..self.pos];
        let lines = wrap(before, width);
        let line = lines.len().saturating_sub(1) as u16;
        line + u16::from(opens_trailing_row(before, &lines))
    }

    /// Keep the cursor line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let total_lines = row_count(buffer, text_width(content_width));
        if total_lines <= MAX_ROWS {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(buffer, content_width);
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_ROWS {
            self.scroll_offset = cursor_line + 1 - MAX_ROWS;
        }
    }

    /// Terminal (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = text_width(area.width);
        let origin = (area.x + INSET, area.y + INSET);
        if width == 0 {
            return origin;
        }

        let before = &buffer[..self.pos];
        let row = wrap(before, width).len().saturating_sub(1) as u16;

        // Count chars from the last hard newline: textwrap trims trailing
        // spaces, so wrapped segment lengths under-count typed whitespace.
        let logical = &before[before.rfind('\n').map_or(0, |i| i + 1)..];
        let segments = wrap(logical, width);
        let col = match segments.split_last() {
            Some((_, earlier)) => {
                let consumed: usize = earlier.iter().map(|s| s.chars().count()).sum();
                (logical.chars().count() - consumed) as u16
            }
            None => 0,
        };

        (
            origin.0 + col,
            origin.1 + row.saturating_sub(self.scroll_offset),
        )
    }
}
