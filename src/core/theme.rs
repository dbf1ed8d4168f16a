//! # Theme Controller
//!
//! Decides between light and dark and remembers an explicit user choice.
//!
//! Resolution at startup: stored preference → system appearance → light.
//! Once the user toggles, the `theme-explicit` flag is persisted and system
//! appearance changes are ignored from then on (until the store is cleared
//! externally).
//!
//! There is no global: the controller lives in `App` and the TUI turns
//! [`ThemeController::theme`] into a palette it passes down as a prop.

use std::fmt;
use std::str::FromStr;

use log::{info, warn};

use super::appearance::SystemAppearance;
use super::preferences::{PreferenceStore, THEME_EXPLICIT_KEY, THEME_KEY};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// The durable two-field preference record.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreference {
    pub theme: Option<Theme>,
    pub explicit: bool,
}

impl ThemePreference {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let theme = store.get(THEME_KEY).and_then(|raw| match raw.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                warn!("Ignoring stored theme: {}", e);
                None
            }
        });
        let explicit = store.get(THEME_EXPLICIT_KEY).as_deref() == Some("true");
        Self { theme, explicit }
    }
}

pub struct ThemeController {
    theme: Theme,
    store: Box<dyn PreferenceStore>,
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl ThemeController {
    pub fn new(store: Box<dyn PreferenceStore>, system: &dyn SystemAppearance) -> Self {
        let stored = ThemePreference::load(store.as_ref());
        let theme = stored
            .theme
            .or_else(|| system.prefers_dark().map(Theme::from_dark))
            .unwrap_or_default();
        info!(
            "Initial theme: {} (stored={:?}, explicit={})",
            theme, stored.theme, stored.explicit
        );
        Self { theme, store }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether the user has made an explicit choice. Read from the store so
    /// external changes to it are honored.
    pub fn is_explicit(&self) -> bool {
        ThemePreference::load(self.store.as_ref()).explicit
    }

    /// Flip the theme and record it as an explicit choice.
    pub fn toggle(&mut self) -> Theme {
        self.commit(self.theme.toggled());
        self.theme
    }

    /// Choose a specific theme. Returns `false` if it was already active.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if theme == self.theme {
            return false;
        }
        self.commit(theme);
        true
    }

    /// Follow the system appearance unless the user has chosen explicitly.
    /// Returns `true` if the active theme changed.
    pub fn on_system_change(&mut self, prefers_dark: bool) -> bool {
        if self.is_explicit() {
            info!("Ignoring system appearance change: explicit theme set");
            return false;
        }
        let next = Theme::from_dark(prefers_dark);
        if next == self.theme {
            return false;
        }
        info!("Following system appearance: {}", next);
        self.theme = next;
        true
    }

    fn commit(&mut self, theme: Theme) {
        self.theme = theme;
        info!("Theme set to {} (explicit)", theme);
        if let Err(e) = self
            .store
            .set_all(&[(THEME_KEY, theme.as_str()), (THEME_EXPLICIT_KEY, "true")])
        {
            warn!("Failed to persist theme preference: {}", e);
        }
    }
}
