//! Terminal colours for each [`Theme`].
//!
//! The palette is derived from `app.theme.theme()` every frame and handed
//! to components as a prop, so a theme change repaints on the next draw.

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub user: Color,
    pub assistant: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::Rgb(255, 255, 255),
                surface: Color::Rgb(243, 244, 246),
                foreground: Color::Rgb(17, 24, 39),
                muted: Color::Rgb(107, 114, 128),
                border: Color::Rgb(209, 213, 219),
                accent: Color::Rgb(37, 99, 235),
                user: Color::Rgb(29, 78, 216),
                assistant: Color::Rgb(21, 128, 61),
                error: Color::Rgb(220, 38, 38),
            },
            Theme::Dark => Self {
                background: Color::Rgb(17, 24, 39),
                surface: Color::Rgb(31, 41, 55),
                foreground: Color::Rgb(243, 244, 246),
                muted: Color::Rgb(156, 163, 175),
                border: Color::Rgb(75, 85, 99),
                accent: Color::Rgb(96, 165, 250),
                user: Color::Rgb(147, 197, 253),
                assistant: Color::Rgb(134, 239, 172),
                error: Color::Rgb(248, 113, 113),
            },
        }
    }

    /// Foreground on background; the base for every pane.
    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn panel(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.surface)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}
