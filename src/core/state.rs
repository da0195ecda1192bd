//! # Application State
//!
//! Core business state for SmartShop. This module contains domain logic only,
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── service: Arc<dyn RecommendationService>  // remote collaborator
//! ├── transcript: Transcript         // chat history + typing indicator
//! ├── results: ResultsArea           // placeholder or product cards
//! ├── request_state: RequestState    // Idle | Pending { turn, indicator }
//! ├── focus: Focus                   // which pane receives keys
//! ├── status_message: String         // title bar text
//! ├── timing: Timing                 // animation + reveal pacing
//! └── probe_images: bool             // check card images after reveal
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;
use std::time::Duration;

use crate::core::config::{DEFAULT_REVEAL_STAGGER_MS, DEFAULT_TYPING_INTERVAL_MS, ResolvedConfig};
use crate::core::results::ResultsArea;
use crate::core::transcript::{Sender, Transcript};
use crate::core::typing::IndicatorId;
use crate::service::RecommendationService;

pub const WELCOME_MESSAGE: &str = "👋 Hi! I'm your SmartShop AI assistant. Ask me to find products like \"I need running shoes\" or \"Show me electronics\"!";

/// Governs whether the input box accepts interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    /// One request in flight. `turn` tags everything it produces; the
    /// indicator is the typing entry it owns.
    Pending { turn: u64, indicator: IndicatorId },
}

/// Which pane keyboard input goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub typing_interval: Duration,
    pub reveal_stagger: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            typing_interval: Duration::from_millis(DEFAULT_TYPING_INTERVAL_MS),
            reveal_stagger: Duration::from_millis(DEFAULT_REVEAL_STAGGER_MS),
        }
    }
}

pub struct App {
    pub service: Arc<dyn RecommendationService>,
    pub transcript: Transcript,
    pub results: ResultsArea,
    pub request_state: RequestState,
    pub focus: Focus,
    pub status_message: String,
    pub timing: Timing,
    pub probe_images: bool,
    /// Last turn number handed out; turns start at 1.
    last_turn: u64,
}

impl App {
    pub fn new(service: Arc<dyn RecommendationService>) -> Self {
        Self {
            service,
            transcript: Transcript::new(),
            results: ResultsArea::default(),
            request_state: RequestState::Idle,
            focus: Focus::Input,
            status_message: String::from("Ready"),
            timing: Timing::default(),
            probe_images: false,
            last_turn: 0,
        }
    }

    pub fn from_config(service: Arc<dyn RecommendationService>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(service);
        app.timing = Timing {
            typing_interval: config.typing_interval,
            reveal_stagger: config.reveal_stagger,
        };
        app.probe_images = config.probe_images;
        if config.show_welcome {
            app.transcript.append(Sender::Assistant, WELCOME_MESSAGE);
        }
        app
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.request_state, RequestState::Pending { .. })
    }

    /// Input controls accept interaction only while idle.
    pub fn input_enabled(&self) -> bool {
        !self.is_pending()
    }

    /// The turn whose response is currently awaited, if any.
    pub fn pending_turn(&self) -> Option<u64> {
        match self.request_state {
            RequestState::Pending { turn, .. } => Some(turn),
            RequestState::Idle => None,
        }
    }

    pub(crate) fn next_turn(&mut self) -> u64 {
        self.last_turn += 1;
        self.last_turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{SmartShopConfig, resolve};
    use crate::test_support::{StubService, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.request_state, RequestState::Idle);
        assert!(app.input_enabled());
        assert_eq!(app.focus, Focus::Input);
        assert!(app.transcript.is_empty());
        assert_eq!(app.results, ResultsArea::Empty);
    }

    #[test]
    fn test_from_config_shows_welcome() {
        let config = resolve(&SmartShopConfig::default(), Some("http://stub"));
        let app = App::from_config(Arc::new(StubService::default()), &config);
        let welcome = app.transcript.last_message().unwrap();
        assert_eq!(welcome.sender, Sender::Assistant);
        assert_eq!(welcome.text, WELCOME_MESSAGE);
        assert!(app.probe_images);
    }

    #[test]
    fn test_turns_are_monotonic() {
        let mut app = test_app();
        assert_eq!(app.next_turn(), 1);
        assert_eq!(app.next_turn(), 2);
    }
}
