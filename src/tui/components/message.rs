use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message as ChatMessage, MessageStatus, Role};
use crate::tui::palette::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

pub const FAILED_LABEL: &str = " failed · Ctrl+R to retry ";

/// A stateless component that renders a single chat message.
///
/// # Design
///
/// `Message` is a **transient component**: it's created fresh each frame with
/// the data it needs to render. User messages carry their label on the right,
/// assistant messages on the left. A message whose delivery failed gets an
/// error-coloured border and a retry hint along the bottom edge.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// using `textwrap` with options that match Ratatui's `Paragraph` wrapping,
/// so the parent `MessageList` can lay out the scroll canvas without
/// rendering first.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
    pub palette: Palette,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage, palette: Palette) -> Self {
        Self { message, palette }
    }

    /// Calculate the height required for this message given a width.
    ///
    /// The wrapping options must match the Ratatui default for `Paragraph`
    /// so calculated and actual heights agree.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding
            return 1;
        }

        let content = message.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn role_color(&self) -> ratatui::style::Color {
        match self.message.role {
            Role::User => self.palette.user,
            Role::Assistant => self.palette.assistant,
        }
    }
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let p = self.palette;
        let role_style = p.base().fg(self.role_color());
        let failed = self.message.is_failed();

        let border_style = if failed {
            p.base().fg(p.error)
        } else {
            role_style.add_modifier(Modifier::DIM)
        };

        let label = format!(" {} ", self.message.role.label());
        let title = match self.message.role {
            Role::User => Line::from(label).alignment(Alignment::Right),
            Role::Assistant => Line::from(label).alignment(Alignment::Left),
        };

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title)
            .title_style(role_style.add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        if failed {
            block = block.title_bottom(
                Line::styled(FAILED_LABEL, p.base().fg(p.error)).alignment(Alignment::Right),
            );
        } else if self.message.status == Some(MessageStatus::Sending) {
            block = block.title_bottom(
                Line::styled(" sending ", p.muted()).alignment(Alignment::Right),
            );
        }

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.content.trim())
            .style(p.base())
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}
