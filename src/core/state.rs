//! # Application State
//!
//! Core business state for Parley. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── conversation: Conversation    // message log + loading flag + ticket
//! ├── theme: ThemeController        // light/dark + explicit-choice record
//! ├── model_name: String            // selected model (cosmetic)
//! └── status_message: String        // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::catalog::DEFAULT_MODEL;
use crate::core::config::ResolvedConfig;
use crate::core::conversation::Conversation;
use crate::core::theme::ThemeController;

#[derive(Debug)]
pub struct App {
    pub conversation: Conversation,
    pub theme: ThemeController,
    pub model_name: String,
    pub status_message: String,
}

impl App {
    pub fn new(theme: ThemeController, model_name: String) -> Self {
        Self {
            conversation: Conversation::new(),
            theme,
            model_name,
            status_message: String::new(),
        }
    }

    pub fn from_config(theme: ThemeController, config: &ResolvedConfig) -> Self {
        Self::new(theme, config.model_name.clone())
    }

    pub fn with_default_model(theme: ThemeController) -> Self {
        Self::new(theme, DEFAULT_MODEL.to_string())
    }

    pub fn is_loading(&self) -> bool {
        self.conversation.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.status_message.is_empty());
        assert!(!app.is_loading());
        assert!(app.conversation.is_empty());
        assert_eq!(app.model_name, "GPT-5-Nano");
    }
}
