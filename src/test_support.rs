//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::appearance::SystemAppearance;
use crate::core::preferences::MemoryPreferenceStore;
use crate::core::state::App;
use crate::core::theme::ThemeController;

/// An appearance source that always answers the same thing.
pub struct FixedAppearance(pub Option<bool>);

impl SystemAppearance for FixedAppearance {
    fn prefers_dark(&self) -> Option<bool> {
        self.0
    }
}

/// A light-themed controller backed by a throwaway in-memory store.
pub fn test_theme() -> ThemeController {
    ThemeController::new(
        Box::new(MemoryPreferenceStore::new()),
        &FixedAppearance(None),
    )
}

/// Creates a test App with in-memory preferences and the default model.
pub fn test_app() -> App {
    App::with_default_model(test_theme())
}
