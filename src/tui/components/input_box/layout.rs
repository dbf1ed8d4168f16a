//! Input box geometry.
//!
//! How the draft wraps inside the bordered box, and how byte offsets in the
//! draft map to character columns on a wrapped row. Rows borrow from the
//! draft, so a row's byte length is its span in the buffer.

use std::borrow::Cow;

/// Two borders plus a one-column gutter on each side
pub(super) const CHROME_WIDTH: u16 = 4;
/// Top and bottom borders
pub(super) const CHROME_HEIGHT: u16 = 2;
/// The box stops growing here and scrolls internally instead
pub(super) const MAX_ROWS: u16 = 5;
/// Distance from the box edge to the first text cell
pub(super) const INSET: u16 = 1;

/// Columns available to text in a box `box_width` wide. 0 when too narrow.
pub(super) fn text_width(box_width: u16) -> u16 {
    box_width.saturating_sub(CHROME_WIDTH)
}

/// Soft-wrap the draft at `width`. Long words are split; only ASCII spaces
/// separate words so pasted text wraps predictably.
pub(super) fn wrap(text: &str, width: u16) -> Vec<Cow<'_, str>> {
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(text, options)
}

/// Whether `text` ends in a newline that opens a row `rows` does not hold.
pub(super) fn opens_trailing_row(text: &str, rows: &[Cow<'_, str>]) -> bool {
    text.ends_with('\n') && !rows.last().is_some_and(|row| row.is_empty())
}

/// Rows the draft occupies at `width`, never fewer than one.
pub(super) fn row_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }
    let rows = wrap(text, width);
    let count = (rows.len() as u16).max(1);
    count + u16::from(opens_trailing_row(text, &rows))
}

/// Byte offset in `text` where each row of `rows` begins.
pub(super) fn row_starts(text: &str, rows: &[Cow<'_, str>]) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut starts = Vec::with_capacity(rows.len());
    let mut offset = 0;
    for row in rows {
        starts.push(offset);
        offset += row.len();
        // Spaces eaten at a soft break or before a hard newline
        while bytes.get(offset) == Some(&b' ') {
            offset += 1;
        }
        if bytes.get(offset) == Some(&b'\n') {
            offset += 1;
        }
    }
    starts
}

/// Character column of byte `offset` on `row`, clamped to the row's end.
pub(super) fn column_of(row: &str, offset: usize) -> usize {
    row.char_indices().take_while(|&(i, _)| i < offset).count()
}

/// Byte offset of character `column` on `row`, clamped to the row's end.
pub(super) fn offset_of(row: &str, column: usize) -> usize {
    row.char_indices().nth(column).map_or(row.len(), |(i, _)| i)
}

/// Start of the character before `pos`.
pub(super) fn step_back(text: &str, pos: usize) -> usize {
    text[..pos].chars().next_back().map_or(0, |c| pos - c.len_utf8())
}

/// End of the character at `pos`.
pub(super) fn step_forward(text: &str, pos: usize) -> usize {
    text[pos..].chars().next().map_or(pos, |c| pos + c.len_utf8())
}
