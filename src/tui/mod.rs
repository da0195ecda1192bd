//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values. Effects returned by
//! the reducer are handed to the [`Runtime`](crate::runtime::Runtime), whose
//! background tasks report back over an action channel drained every loop.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (request pending or cards still being revealed): polls every
//!   ~50ms so ticks and reveals show up promptly.
//! - **Idle**: sleeps up to 250ms and only redraws on events.
//!
//! ## Keys
//!
//! | key               | action                                   |
//! |-------------------|------------------------------------------|
//! | Enter             | send the message                         |
//! | Shift+Enter, ^J   | newline                                  |
//! | Esc               | cancel a pending request                 |
//! | Tab               | switch focus between input and results   |
//! | PgUp / PgDn       | scroll the focused pane                  |
//! | Ctrl+C            | quit                                     |

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info};
use tokio::sync::mpsc::unbounded_channel;

use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::results::ResultsArea;
use crate::core::state::{App, Focus};
use crate::runtime::Runtime;
use crate::service::RecommendationService;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState, ResultsPanelState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const BUSY_POLL: Duration = Duration::from_millis(50);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub results_panel: ResultsPanelState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            results_panel: ResultsPanelState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets us tell Shift+Enter from Enter; terminals
        // without it ignore the request
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
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
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

/// True while background work can still change what is on screen.
fn is_busy(app: &App) -> bool {
    let revealing = match &app.results {
        ResultsArea::Cards { slots, .. } => slots.iter().any(|s| !s.visible),
        _ => false,
    };
    app.is_pending() || revealing
}

/// Route one terminal event. Returns true when the app should quit.
fn handle_event(app: &mut App, tui: &mut TuiState, runtime: &mut Runtime, event: TuiEvent) -> bool {
    match event {
        TuiEvent::Resize => false,
        TuiEvent::ForceQuit => runtime.dispatch(app, Action::Quit),
        TuiEvent::Escape if app.is_pending() => runtime.dispatch(app, Action::CancelRequest),
        TuiEvent::Escape if app.focus == Focus::Results => {
            runtime.dispatch(app, Action::ToggleFocus)
        }
        TuiEvent::ToggleFocus => runtime.dispatch(app, Action::ToggleFocus),
        // Mouse wheel always scrolls the transcript
        TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
            tui.message_list.handle_event(&event);
            false
        }
        _ if app.focus == Focus::Results => {
            tui.results_panel.handle_event(&event);
            false
        }
        TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            false
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(text)) => runtime.dispatch(app, Action::Submit(text)),
            Some(InputEvent::ContentChanged) | None => false,
        },
    }
}

pub fn run(service: Arc<dyn RecommendationService>, config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(service, &config);
    let mut tui = TuiState::new();

    let (tx, mut rx) = unbounded_channel();
    let mut runtime = Runtime::new(tx);
    runtime.check_health(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true;

    'main: loop {
        tui.input_box.disabled = !app.input_enabled();

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if is_busy(&app) { BUSY_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if handle_event(&mut app, &mut tui, &mut runtime, event) {
                break 'main;
            }
            // Input may have just been locked by a submit
            tui.input_box.disabled = !app.input_enabled();
        }

        // Actions from background tasks (responses, ticks, reveals)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if runtime.dispatch(&mut app, action) {
                break 'main;
            }
        }
    }

    info!("SmartShop shutting down");
    drop(runtime);
    ratatui::restore();
    Ok(())
}
