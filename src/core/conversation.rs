//! # Conversation State Machine
//!
//! Owns the message log and the single "assistant is responding" flag.
//!
//! ```text
//!            submit()                 on_reply_ready() / on_reply_failed()
//!   Idle ───────────────▶ ActiveLoading ──────────────────────▶ ActiveIdle
//!    ▲                        │    ▲                               │  │
//!    │         reset()        │    └────────── submit()/retry() ───┘  │
//!    └────────────────────────┴───────────────────────────────────────┘
//! ```
//!
//! Every accepted submission issues a [`ReplyTicket`]. Completions carry the
//! ticket back; anything but the pending ticket is discarded, so a reply
//! scheduled before `reset()` can never land in the fresh conversation.

use log::debug;

use super::message::{Message, MessageId, MessageStatus, Role};

/// Placeholder text the mock backend answers with.
pub const MOCK_REPLY: &str = "This is a mock response from AI Chat. \
    In a production environment, this would be connected to a real LLM response.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No messages.
    Idle,
    /// Messages exist, nothing in flight.
    ActiveIdle,
    /// Messages exist, awaiting a reply.
    ActiveLoading,
}

/// Generation token pairing a reply with the submission that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyTicket(u64);

impl ReplyTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The in-flight reply and the user message it answers.
#[derive(Debug)]
struct Pending {
    ticket: ReplyTicket,
    message: MessageId,
}

#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    pending: Option<Pending>,
    /// Monotonic across resets so old tickets never match again.
    next_ticket: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_ticket(&self) -> Option<ReplyTicket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    /// The user message the pending reply answers.
    pub fn pending_message(&self) -> Option<&Message> {
        let pending = self.pending.as_ref()?;
        self.messages.iter().find(|m| m.id == pending.message)
    }

    pub fn phase(&self) -> Phase {
        match (self.messages.is_empty(), self.pending.is_some()) {
            (true, _) => Phase::Idle,
            (false, false) => Phase::ActiveIdle,
            (false, true) => Phase::ActiveLoading,
        }
    }

    /// Accept a user submission.
    ///
    /// Blank text and submissions while a reply is pending are ignored and
    /// return `None`. On success the caller must schedule exactly one reply
    /// for the returned ticket.
    pub fn submit(&mut self, content: &str) -> Option<ReplyTicket> {
        let content = content.trim();
        if content.is_empty() {
            debug!("Ignoring blank submission");
            return None;
        }
        if self.is_loading() {
            debug!("Ignoring submission while a reply is pending");
            return None;
        }

        let message = Message::user(content.to_string());
        let id = message.id.clone();
        self.messages.push(message);
        Some(self.issue_ticket(id))
    }

    /// Append the assistant reply for `ticket`.
    ///
    /// Returns `false` (and changes nothing) if `ticket` is not the pending one.
    pub fn on_reply_ready(&mut self, ticket: ReplyTicket, content: String) -> bool {
        let Some(pending) = self.take_pending(ticket) else {
            debug!("Discarding stale reply for ticket {}", ticket.id());
            return false;
        };
        self.set_status(&pending.message, MessageStatus::Sent);
        self.messages.push(Message::assistant(content));
        true
    }

    /// Mark the pending exchange as failed. The log is otherwise left intact.
    pub fn on_reply_failed(&mut self, ticket: ReplyTicket) -> bool {
        let Some(pending) = self.take_pending(ticket) else {
            debug!("Discarding stale failure for ticket {}", ticket.id());
            return false;
        };
        self.set_status(&pending.message, MessageStatus::Error);
        true
    }

    /// Re-send the last user message if its delivery failed.
    pub fn retry(&mut self) -> Option<ReplyTicket> {
        if self.is_loading() {
            return None;
        }
        let last = self.messages.last_mut()?;
        if last.role != Role::User || !last.is_failed() {
            return None;
        }
        last.status = Some(MessageStatus::Sending);
        let id = last.id.clone();
        Some(self.issue_ticket(id))
    }

    /// Content of the user message the pending reply answers.
    pub fn pending_prompt(&self) -> Option<&str> {
        self.pending_message().map(|m| m.content.as_str())
    }

    /// Drop all messages and invalidate any pending reply.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.pending = None;
    }

    fn issue_ticket(&mut self, message: MessageId) -> ReplyTicket {
        self.next_ticket += 1;
        let ticket = ReplyTicket(self.next_ticket);
        self.pending = Some(Pending { ticket, message });
        ticket
    }

    /// Clear and return the pending reply, but only if `ticket` is it.
    fn take_pending(&mut self, ticket: ReplyTicket) -> Option<Pending> {
        if self.pending.as_ref()?.ticket != ticket {
            return None;
        }
        self.pending.take()
    }

    fn set_status(&mut self, id: &MessageId, status: MessageStatus) {
        if let Some(msg) = self.messages.iter_mut().find(|m| &m.id == id) {
            msg.status = Some(status);
        }
    }
}
