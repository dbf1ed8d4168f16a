//! # Reply Backend
//!
//! The seam between the conversation and whatever produces assistant replies.
//! Today that is [`MockReplyBackend`], which waits a fixed delay and answers
//! with [`MOCK_REPLY`]. A real backend implements the same trait; the
//! conversation state machine does not change.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use super::conversation::MOCK_REPLY;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Errors a backend can report. Every variant ends the exchange with an
/// `Error` status on the user's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    /// No reply within the configured timeout.
    Timeout(Duration),
    /// The backend could not be reached or refused the request.
    Unavailable(String),
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyError::Timeout(d) => write!(f, "no reply after {}s", d.as_secs()),
            ReplyError::Unavailable(msg) => write!(f, "backend unavailable: {msg}"),
        }
    }
}

impl std::error::Error for ReplyError {}

/// Everything a backend needs to answer one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    pub prompt: String,
    pub model: String,
}

#[async_trait]
pub trait ReplyBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn reply(&self, request: ReplyRequest) -> Result<String, ReplyError>;
}

/// Answers every prompt with a fixed placeholder after `delay`.
#[derive(Debug, Clone)]
pub struct MockReplyBackend {
    delay: Duration,
}

impl MockReplyBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockReplyBackend {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

#[async_trait]
impl ReplyBackend for MockReplyBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn reply(&self, request: ReplyRequest) -> Result<String, ReplyError> {
        debug!(
            "Mock reply in {:?} (model={}, prompt_len={})",
            self.delay,
            request.model,
            request.prompt.len()
        );
        tokio::time::sleep(self.delay).await;
        Ok(MOCK_REPLY.to_string())
    }
}

/// Run `backend` with an upper bound on how long the reply may take.
pub async fn reply_with_timeout(
    backend: &dyn ReplyBackend,
    request: ReplyRequest,
    timeout: Duration,
) -> Result<String, ReplyError> {
    match tokio::time::timeout(timeout, backend.reply(request)).await {
        Ok(result) => result,
        Err(_) => Err(ReplyError::Timeout(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn request() -> ReplyRequest {
        ReplyRequest {
            prompt: "Hello".into(),
            model: "GPT-5-Nano".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_waits_full_delay() {
        let backend = MockReplyBackend::new(Duration::from_millis(1000));
        let start = tokio::time::Instant::now();
        let reply = assert_ok!(backend.reply(request()).await);
        assert_eq!(reply, MOCK_REPLY);
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_maps_to_reply_error() {
        let backend = MockReplyBackend::new(Duration::from_secs(60));
        let err = assert_err!(
            reply_with_timeout(&backend, request(), Duration::from_secs(5)).await
        );
        assert_eq!(err, ReplyError::Timeout(Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_within_timeout_passes_through() {
        let backend = MockReplyBackend::default();
        let reply = assert_ok!(
            reply_with_timeout(&backend, request(), Duration::from_secs(30)).await
        );
        assert_eq!(reply, MOCK_REPLY);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ReplyError::Timeout(Duration::from_secs(30)).to_string(),
            "no reply after 30s"
        );
        assert_eq!(
            ReplyError::Unavailable("down".into()).to_string(),
            "backend unavailable: down"
        );
    }
}
