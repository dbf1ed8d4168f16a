use std::sync::{Arc, mpsc};
use std::time::Duration;

use parley::core::action::{Action, Effect, update};
use parley::core::appearance::SystemAppearance;
use parley::core::catalog::SUGGESTIONS;
use parley::core::conversation::{MOCK_REPLY, Phase};
use parley::core::message::{MessageStatus, Role};
use parley::core::preferences::MemoryPreferenceStore;
use parley::core::reply::MockReplyBackend;
use parley::core::state::App;
use parley::core::theme::ThemeController;
use parley::tui::ReplyRunner;

// ============================================================================
// Helper Functions
// ============================================================================

struct NoAppearance;

impl SystemAppearance for NoAppearance {
    fn prefers_dark(&self) -> Option<bool> {
        None
    }
}

fn new_app() -> App {
    let theme = ThemeController::new(Box::new(MemoryPreferenceStore::new()), &NoAppearance);
    App::with_default_model(theme)
}

/// Event-loop stand-in: applies actions coming back from background tasks.
struct Harness {
    app: App,
    runner: ReplyRunner,
    rx: mpsc::Receiver<Action>,
}

impl Harness {
    fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let backend = Arc::new(MockReplyBackend::new(delay));
        Self {
            app: new_app(),
            runner: ReplyRunner::new(backend, Duration::from_secs(30), tx),
            rx,
        }
    }

    fn dispatch(&mut self, action: Action) -> Effect {
        let effect = update(&mut self.app, action);
        self.runner.perform(&self.app, effect);
        effect
    }

    fn drain(&mut self) {
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
        }
    }
}

// ============================================================================
// Submission and reply
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_hello_scenario() {
    let mut h = Harness::new(Duration::from_millis(1000));

    h.dispatch(Action::Submit("Hello".into()));
    assert_eq!(h.app.conversation.phase(), Phase::ActiveLoading);
    let messages = h.app.conversation.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "Hello");

    tokio::time::sleep(Duration::from_millis(1001)).await;
    h.drain();

    assert_eq!(h.app.conversation.phase(), Phase::ActiveIdle);
    let messages = h.app.conversation.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].status, Some(MessageStatus::Sent));
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].content, MOCK_REPLY);
}

#[tokio::test(start_paused = true)]
async fn test_blank_submit_changes_nothing() {
    let mut h = Harness::new(Duration::from_millis(1000));
    assert_eq!(h.dispatch(Action::Submit("   \n\t".into())), Effect::None);
    assert!(h.app.conversation.is_empty());
    assert!(!h.app.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_submits_while_loading_are_ignored() {
    let mut h = Harness::new(Duration::from_millis(1000));
    h.dispatch(Action::Submit("First".into()));
    for _ in 0..5 {
        assert_eq!(h.dispatch(Action::Submit("Again".into())), Effect::None);
    }
    assert_eq!(h.app.conversation.messages().len(), 1);

    tokio::time::sleep(Duration::from_secs(2)).await;
    h.drain();
    assert_eq!(h.app.conversation.messages().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_suggestion_is_equivalent_to_typing() {
    let mut typed = Harness::new(Duration::from_millis(10));
    typed.dispatch(Action::Submit(
        "Can you help me analyze this dataset for trends?".into(),
    ));

    let mut picked = Harness::new(Duration::from_millis(10));
    let analyze = SUGGESTIONS
        .iter()
        .find(|s| s.title == "Analyze Data")
        .expect("catalog has Analyze Data");
    picked.dispatch(Action::Submit(analyze.description.to_string()));

    assert_eq!(
        typed.app.conversation.messages()[0].content,
        picked.app.conversation.messages()[0].content
    );
}

// ============================================================================
// Reset
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_new_chat_while_loading_discards_late_reply() {
    let mut h = Harness::new(Duration::from_millis(1000));
    h.dispatch(Action::Submit("Hello".into()));
    assert_eq!(h.dispatch(Action::NewChat), Effect::CancelReply);
    assert_eq!(h.app.conversation.phase(), Phase::Idle);

    tokio::time::sleep(Duration::from_secs(2)).await;
    h.drain();
    assert!(h.app.conversation.is_empty());
    assert!(!h.app.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_conversation_continues_after_reset() {
    let mut h = Harness::new(Duration::from_millis(100));
    h.dispatch(Action::Submit("One".into()));
    tokio::time::sleep(Duration::from_millis(200)).await;
    h.drain();
    h.dispatch(Action::NewChat);

    h.dispatch(Action::Submit("Two".into()));
    tokio::time::sleep(Duration::from_millis(200)).await;
    h.drain();

    let messages = h.app.conversation.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "Two");
}

// ============================================================================
// Failure and retry
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_timeout_marks_failed_then_retry_recovers() {
    let (tx, rx) = mpsc::channel();
    let slow = Arc::new(MockReplyBackend::new(Duration::from_secs(60)));
    let mut h = Harness {
        app: new_app(),
        runner: ReplyRunner::new(slow, Duration::from_secs(5), tx.clone()),
        rx,
    };

    h.dispatch(Action::Submit("Hello".into()));
    tokio::time::sleep(Duration::from_secs(6)).await;
    h.drain();

    let messages = h.app.conversation.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].status, Some(MessageStatus::Error));
    assert!(!h.app.is_loading());

    // Swap in a fast backend and retry
    let fast = Arc::new(MockReplyBackend::new(Duration::from_millis(10)));
    h.runner = ReplyRunner::new(fast, Duration::from_secs(5), tx);
    assert!(matches!(h.dispatch(Action::Retry), Effect::SpawnReply(_)));
    assert!(h.app.is_loading());

    tokio::time::sleep(Duration::from_millis(20)).await;
    h.drain();
    let messages = h.app.conversation.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].status, Some(MessageStatus::Sent));
}
