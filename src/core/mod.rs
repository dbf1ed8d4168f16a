//! # Core Application Logic
//!
//! This module contains Parley's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Conversation         │
//!                    │  • ThemeController      │
//!                    │  • Action + update()    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Reply    │      │ Preference │
//!     │  Adapter   │      │  Backend   │      │   Store    │
//!     │ (ratatui)  │      │  (async)   │      │ (toml file)│
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`conversation`]: Message log state machine
//! - [`theme`]: Light/dark resolution and the explicit-choice record
//! - [`reply`]: The `ReplyBackend` seam and its mock implementation
//! - [`preferences`], [`appearance`], [`viewport`]: environment capabilities

pub mod action;
pub mod appearance;
pub mod catalog;
pub mod config;
pub mod conversation;
pub mod message;
pub mod preferences;
pub mod reply;
pub mod state;
pub mod theme;
pub mod viewport;
