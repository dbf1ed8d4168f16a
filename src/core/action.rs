//! # Actions
//!
//! Everything that can happen in Parley becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Reply lands? That's `Action::ReplyReady { ticket, content }`.
//!
//! The `update()` function applies an action to the state and returns an
//! [`Effect`] describing the I/O the caller must perform. No task spawning
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::catalog::find_model;
use crate::core::conversation::ReplyTicket;
use crate::core::reply::ReplyError;
use crate::core::state::App;
use crate::core::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Text typed in the input box or a suggestion's description.
    Submit(String),
    ReplyReady {
        ticket: ReplyTicket,
        content: String,
    },
    ReplyFailed {
        ticket: ReplyTicket,
        error: ReplyError,
    },
    /// Re-send the last message if its delivery failed.
    Retry,
    NewChat,
    ToggleTheme,
    SetTheme(Theme),
    SystemAppearanceChanged(bool),
    SelectModel(String),
    Quit,
}

/// Side effects requested by `update()`, performed by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start exactly one reply request for this ticket.
    SpawnReply(ReplyTicket),
    /// Abort the in-flight reply task, if any.
    CancelReply,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Submit(text) => match app.conversation.submit(&text) {
            Some(ticket) => {
                app.status_message = String::from("Thinking...");
                Effect::SpawnReply(ticket)
            }
            None => Effect::None,
        },
        Action::ReplyReady { ticket, content } => {
            if app.conversation.on_reply_ready(ticket, content) {
                app.status_message.clear();
            }
            Effect::None
        }
        Action::ReplyFailed { ticket, error } => {
            if app.conversation.on_reply_failed(ticket) {
                info!("Reply {} failed: {}", ticket.id(), error);
                app.status_message = format!("Reply failed: {error} · Ctrl+R to retry");
            }
            Effect::None
        }
        Action::Retry => match app.conversation.retry() {
            Some(ticket) => {
                app.status_message = String::from("Thinking...");
                Effect::SpawnReply(ticket)
            }
            None => Effect::None,
        },
        Action::NewChat => {
            let was_loading = app.conversation.is_loading();
            app.conversation.reset();
            app.status_message.clear();
            info!("New chat (cancelled pending reply: {})", was_loading);
            if was_loading {
                Effect::CancelReply
            } else {
                Effect::None
            }
        }
        Action::ToggleTheme => {
            let theme = app.theme.toggle();
            app.status_message = format!("Theme: {}", theme.label());
            Effect::None
        }
        Action::SetTheme(theme) => {
            if app.theme.set_theme(theme) {
                app.status_message = format!("Theme: {}", theme.label());
            }
            Effect::None
        }
        Action::SystemAppearanceChanged(dark) => {
            app.theme.on_system_change(dark);
            Effect::None
        }
        Action::SelectModel(name) => {
            if let Some(model) = find_model(&name) {
                app.model_name = model.to_string();
                app.status_message = format!("Model: {model}");
            } else {
                debug!("Ignoring unknown model '{}'", name);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
