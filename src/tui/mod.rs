//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (reply pending, motion allowed): draws every ~80ms so the
//!   thinking dots move.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background
//!   actions or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
pub mod components;
pub mod event;
pub mod palette;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::appearance::{TerminalAppearance, WATCH_INTERVAL, spawn_watcher};
use crate::core::catalog::{SUGGESTIONS, Suggestion};
use crate::core::config::ResolvedConfig;
use crate::core::conversation::ReplyTicket;
use crate::core::reply::{MockReplyBackend, ReplyBackend, ReplyRequest, reply_with_timeout};
use crate::core::state::App;
use crate::core::theme::ThemeController;
use crate::core::viewport::Viewport;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ClickTarget, InputBox, InputEvent, MessageListState, ModelPickerEvent, ModelPickerState,
    SettingsEvent, SettingsState, SuggestionEvent, SuggestionPanelState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// Modal surface drawn over the shell. At most one is open.
pub enum Overlay {
    Suggestions(SuggestionPanelState),
    ModelPicker(ModelPickerState),
    Settings(SettingsState),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub sidebar_open: bool,
    pub overlay: Option<Overlay>,
    /// Clickable regions recorded by the last draw
    pub hits: Vec<(Rect, ClickTarget)>,
    pub reduced_motion: bool,
    /// Sidebar state chosen while the viewport had room for it
    sidebar_preference: bool,
    compact: Option<bool>,
}

impl TuiState {
    pub fn new(sidebar_open: bool, reduced_motion: bool) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::default(),
            sidebar_open,
            overlay: None,
            hits: Vec::new(),
            reduced_motion,
            sidebar_preference: sidebar_open,
            compact: None,
        }
    }

    /// Collapse the sidebar when the viewport turns compact and restore the
    /// preferred state when it widens again.
    pub fn sync_viewport(&mut self, viewport: &Viewport) {
        let compact = viewport.is_compact();
        if self.compact == Some(compact) {
            return;
        }
        debug!("Viewport {}x{} compact={}", viewport.width, viewport.height, compact);
        self.compact = Some(compact);
        self.sidebar_open = !compact && self.sidebar_preference;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        if self.compact != Some(true) {
            self.sidebar_preference = self.sidebar_open;
        }
    }

    /// Picking a suggestion submits its description as if typed.
    fn submit_suggestion(&mut self, suggestion: &Suggestion) -> Action {
        self.overlay = None;
        self.message_list.stick_to_bottom = true;
        Action::Submit(suggestion.description.to_string())
    }

    fn route_overlay(&mut self, event: &TuiEvent) -> Option<Action> {
        let overlay = self.overlay.as_mut()?;
        match overlay {
            Overlay::Suggestions(state) => match state.handle_event(event)? {
                SuggestionEvent::Pick(suggestion) => Some(self.submit_suggestion(suggestion)),
                SuggestionEvent::Dismiss => {
                    self.overlay = None;
                    None
                }
            },
            Overlay::ModelPicker(state) => {
                let picked = state.handle_event(event)?;
                self.overlay = None;
                match picked {
                    ModelPickerEvent::Select(model) => Some(Action::SelectModel(model)),
                    ModelPickerEvent::Dismiss => None,
                }
            }
            Overlay::Settings(state) => {
                let picked = state.handle_event(event)?;
                self.overlay = None;
                match picked {
                    SettingsEvent::Apply(theme) => Some(Action::SetTheme(theme)),
                    SettingsEvent::Dismiss => None,
                }
            }
        }
    }

    fn route_click(&mut self, app: &App, target: ClickTarget) -> Option<Action> {
        match target {
            ClickTarget::NewChat => self.route(app, TuiEvent::NewChat),
            ClickTarget::Settings => self.route(app, TuiEvent::OpenSettings),
            ClickTarget::ToggleSidebar => self.route(app, TuiEvent::ToggleSidebar),
            ClickTarget::Suggestion(index) => SUGGESTIONS
                .get(index)
                .map(|suggestion| self.submit_suggestion(suggestion)),
        }
    }

    /// Apply `event` to presentation state and return the action, if any,
    /// the reducer must see.
    ///
    /// Order: an open overlay takes every event, then shell shortcuts, then
    /// scrolling and clicks, and whatever is left goes to the input box.
    pub fn route(&mut self, app: &App, event: TuiEvent) -> Option<Action> {
        if matches!(event, TuiEvent::ForceQuit) {
            return Some(Action::Quit);
        }
        if self.overlay.is_some() {
            // Clicks dismiss the modal
            if matches!(event, TuiEvent::MouseClick(..)) {
                self.overlay = None;
                return None;
            }
            return self.route_overlay(&event);
        }

        match event {
            TuiEvent::NewChat => {
                self.message_list = MessageListState::new();
                Some(Action::NewChat)
            }
            TuiEvent::Retry => Some(Action::Retry),
            TuiEvent::ToggleTheme => Some(Action::ToggleTheme),
            TuiEvent::ToggleSidebar => {
                self.toggle_sidebar();
                None
            }
            TuiEvent::OpenSettings => {
                self.overlay = Some(Overlay::Settings(SettingsState::new(app.theme.theme())));
                None
            }
            TuiEvent::ToggleSuggestions => {
                self.overlay = Some(Overlay::Suggestions(SuggestionPanelState::new()));
                None
            }
            TuiEvent::OpenModelPicker => {
                self.overlay = Some(Overlay::ModelPicker(ModelPickerState::new(
                    &app.model_name,
                )));
                None
            }
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown
            | TuiEvent::ScrollToBottom => {
                self.message_list.handle_event(&event);
                None
            }
            TuiEvent::MouseClick(column, row) => {
                let target = ui::hit_test(&self.hits, column, row)?;
                debug!("Click at ({}, {}) hit {:?}", column, row, target);
                self.route_click(app, target)
            }
            TuiEvent::Resize | TuiEvent::Escape => None,
            _ => {
                // A batch of events can hold an Enter already applied
                // before the next draw syncs props
                self.input_box.is_loading = app.is_loading();
                self.route_input(&event)
            }
        }
    }

    fn route_input(&mut self, event: &TuiEvent) -> Option<Action> {
        match self.input_box.handle_event(event)? {
            InputEvent::Submit(text) => {
                self.message_list.stick_to_bottom = true;
                Some(Action::Submit(text))
            }
            InputEvent::ContentChanged => None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter through; terminals without
        // it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Owns the in-flight reply task and performs the effects `update()` asks for.
pub struct ReplyRunner {
    backend: Arc<dyn ReplyBackend>,
    timeout: Duration,
    tx: mpsc::Sender<Action>,
    active: Option<AbortHandle>,
}

impl ReplyRunner {
    pub fn new(backend: Arc<dyn ReplyBackend>, timeout: Duration, tx: mpsc::Sender<Action>) -> Self {
        Self {
            backend,
            timeout,
            tx,
            active: None,
        }
    }

    /// Perform `effect`. Returns `true` when the app should quit.
    ///
    /// Must be called from within a tokio runtime.
    pub fn perform(&mut self, app: &App, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::SpawnReply(ticket) => {
                self.cancel();
                let request = ReplyRequest {
                    prompt: app.conversation.pending_prompt().unwrap_or_default().to_string(),
                    model: app.model_name.clone(),
                };
                self.active = Some(spawn_reply(
                    self.backend.clone(),
                    ticket,
                    request,
                    self.timeout,
                    self.tx.clone(),
                ));
                false
            }
            Effect::CancelReply => {
                self.cancel();
                false
            }
            Effect::Quit => {
                self.cancel();
                true
            }
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.active.take() {
            debug!("Aborting in-flight reply task");
            handle.abort();
        }
    }
}

fn spawn_reply(
    backend: Arc<dyn ReplyBackend>,
    ticket: ReplyTicket,
    request: ReplyRequest,
    timeout: Duration,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning reply {} via {} backend (model={})",
        ticket.id(),
        backend.name(),
        request.model
    );
    let handle = tokio::spawn(async move {
        let action = match reply_with_timeout(backend.as_ref(), request, timeout).await {
            Ok(content) => Action::ReplyReady { ticket, content },
            Err(error) => {
                warn!("Reply {} failed: {}", ticket.id(), error);
                Action::ReplyFailed { ticket, error }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver reply {}: receiver dropped", ticket.id());
        }
    });
    handle.abort_handle()
}

pub fn run(config: ResolvedConfig, theme: ThemeController) -> std::io::Result<()> {
    let mut app = App::from_config(theme, &config);
    let mut tui = TuiState::new(config.sidebar_open, config.reduced_motion);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e));

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let backend: Arc<dyn ReplyBackend> = Arc::new(MockReplyBackend::new(config.reply_delay));
    let mut replies = ReplyRunner::new(backend, config.reply_timeout, tx.clone());

    let appearance_tx = tx.clone();
    let watcher = spawn_watcher(Arc::new(TerminalAppearance), WATCH_INTERVAL, move |dark| {
        appearance_tx
            .send(Action::SystemAppearanceChanged(dark))
            .is_ok()
    });

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.is_loading() && !tui.reduced_motion;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_millis() / 300) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = tui.route(&app, event) {
                let effect = update(&mut app, action);
                if replies.perform(&app, effect) {
                    break 'main;
                }
            }
        }

        // Handle background task actions (replies, appearance changes)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            let effect = update(&mut app, action);
            if replies.perform(&app, effect) {
                break 'main;
            }
        }
    }

    watcher.abort();
    info!("Parley shutting down");
    ratatui::restore();
    Ok(())
}
