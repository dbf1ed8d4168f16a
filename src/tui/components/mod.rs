//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: app name, model, status and the "↓ New" indicator
//! - `Message`: a single chat bubble
//! - `Sidebar`: brand, "New chat", "Recent History", "Settings"
//! - `WelcomeScreen`: heading, tagline, embedded input, suggestion cards
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that own state and emit events:
//! - `InputBox`: auto-expanding draft editor
//! - `MessageList`: scrollable conversation view with layout caching
//! - `SuggestionPanel`, `ModelPicker`, `Settings`: modal overlays
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data, the theme palette included, as props
//! rather than reading global state:
//!
//! ```rust,ignore
//! TitleBar::new(&app.model_name, &app.status_message, unseen, palette)
//!     .render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (top status bar)
//! ├── sidebar.rs       (navigation rail)
//! ├── welcome.rs       (empty-conversation landing)
//! ├── message.rs       (single message renderer)
//! ├── message_list.rs  (scrollable message container)
//! ├── input_box/       (draft editor)
//! ├── overlay.rs       (shared modal chrome)
//! ├── suggestions.rs   (Ctrl+P)
//! ├── model_picker.rs  (Ctrl+L)
//! └── settings.rs      (Ctrl+S)
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod model_picker;
pub mod overlay;
pub mod settings;
pub mod sidebar;
pub mod suggestions;
pub mod title_bar;
pub mod welcome;

pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use model_picker::{ModelPicker, ModelPickerEvent, ModelPickerState};
pub use settings::{Settings, SettingsEvent, SettingsState};
pub use sidebar::Sidebar;
pub use suggestions::{SuggestionEvent, SuggestionPanel, SuggestionPanelState};
pub use title_bar::TitleBar;
pub use welcome::WelcomeScreen;

/// Something a mouse click can land on, recorded by components during render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    NewChat,
    Settings,
    ToggleSidebar,
    /// Index into the suggestion catalog
    Suggestion(usize),
}
