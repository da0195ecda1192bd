//! # Actions
//!
//! Everything that can happen in SmartShop becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Service responds? That's `Action::ResponseReceived { turn, result }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the side effects to run. No I/O happens here:
//! spawning requests and timers is the runtime's job.
//!
//! ```text
//! State + Action  →  update()  →  New State + Vec<Effect>
//! ```
//!
//! ## Request lifecycle
//!
//! ```text
//!            Submit(text), text.trim() != ""
//!   Idle ─────────────────────────────────────▶ Pending { turn, indicator }
//!    ▲                                                  │
//!    │   ResponseReceived(Ok)  ─ reply + cards ─────────┤
//!    │   ResponseReceived(Err) ─ generic error ─────────┤
//!    │   CancelRequest         ─ cancelled ─────────────┤
//!    └──────────────────────────────────────────────────┘
//!        every exit: stop indicator, unlock input, focus input
//! ```

use std::time::Duration;

use log::{debug, info, warn};

use crate::core::product::{self, CardView};
use crate::core::results::ResultsArea;
use crate::core::state::{App, Focus, RequestState};
use crate::core::transcript::Sender;
use crate::core::typing::IndicatorId;
use crate::service::{ChatReply, HealthStatus, ServiceError};

pub const ERROR_REPLY: &str = "❌ Sorry, I encountered an error. Please try again!";
pub const CANCELLED_REPLY: &str = "Request cancelled.";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Raw input box contents. Trimmed here; blank input is ignored.
    Submit(String),
    ResponseReceived {
        turn: u64,
        result: Result<ChatReply, ServiceError>,
    },
    TypingTick(IndicatorId),
    RevealCard { turn: u64, index: usize },
    ImageProbeFailed { turn: u64, index: usize },
    HealthChecked(Result<HealthStatus, ServiceError>),
    CancelRequest,
    ToggleFocus,
    Quit,
}

/// Side effects requested by `update()`, executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SendRequest { turn: u64, message: String },
    AbortRequest { turn: u64 },
    StartTyping(IndicatorId),
    StopTyping(IndicatorId),
    ScheduleReveal { turn: u64, index: usize, delay: Duration },
    ProbeImage { turn: u64, index: usize, url: String },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    match action {
        Action::Submit(text) => submit(app, &text),
        Action::ResponseReceived { turn, result } => {
            if app.pending_turn() != Some(turn) {
                debug!("Ignoring response for stale turn {}", turn);
                return Vec::new();
            }
            let mut effects = finish_request(app);
            match result {
                Ok(reply) => effects.extend(show_reply(app, turn, reply)),
                Err(e) => show_failure(app, &e),
            }
            effects
        }
        Action::TypingTick(id) => {
            if !app.transcript.tick_indicator(id) {
                debug!("Typing tick for inactive indicator {:?}", id);
            }
            Vec::new()
        }
        Action::RevealCard { turn, index } => reveal_card(app, turn, index),
        Action::ImageProbeFailed { turn, index } => {
            if let Some(slot) = app.results.slot_mut(turn, index) {
                info!("Image for card {} unavailable, using fallback", index);
                slot.card.image.mark_failed();
            }
            Vec::new()
        }
        Action::HealthChecked(result) => {
            app.status_message = match result {
                Ok(health) if health.is_healthy() => {
                    format!("connected: {} products", health.products_loaded)
                }
                Ok(health) => format!("service status: {}", health.status),
                Err(e) => {
                    warn!("Health check failed: {}", e);
                    "service unreachable".to_string()
                }
            };
            Vec::new()
        }
        Action::CancelRequest => {
            let Some(turn) = app.pending_turn() else {
                return Vec::new();
            };
            info!("Cancelling turn {}", turn);
            let mut effects = vec![Effect::AbortRequest { turn }];
            effects.extend(finish_request(app));
            app.transcript.append(Sender::Assistant, CANCELLED_REPLY);
            app.results = ResultsArea::Cancelled;
            app.status_message = "Cancelled".to_string();
            effects
        }
        Action::ToggleFocus => {
            app.focus = match app.focus {
                Focus::Input => Focus::Results,
                Focus::Results => Focus::Input,
            };
            Vec::new()
        }
        Action::Quit => vec![Effect::Quit],
    }
}

/// `Idle → Pending`: lock input, echo the message, start the indicator,
/// send the request.
fn submit(app: &mut App, text: &str) -> Vec<Effect> {
    let message = text.trim();
    if message.is_empty() {
        debug!("Ignoring blank submission");
        return Vec::new();
    }
    if app.is_pending() {
        warn!("Submission while a request is pending; ignoring");
        return Vec::new();
    }

    let turn = app.next_turn();
    let indicator = IndicatorId::new();
    app.request_state = RequestState::Pending { turn, indicator };
    app.transcript.append(Sender::User, message);
    app.results = ResultsArea::Searching;
    app.transcript.show_indicator(indicator);
    app.status_message = "Searching...".to_string();

    info!("Turn {} submitted (len={})", turn, message.len());
    vec![
        Effect::StartTyping(indicator),
        Effect::SendRequest {
            turn,
            message: message.to_string(),
        },
    ]
}

/// Shared teardown for every way out of `Pending`: stop the indicator,
/// unlock input, put focus back on the input box.
fn finish_request(app: &mut App) -> Vec<Effect> {
    let RequestState::Pending { turn, indicator } = app.request_state else {
        return Vec::new();
    };
    app.transcript.remove_indicator(indicator);
    app.request_state = RequestState::Idle;
    app.focus = Focus::Input;
    info!("Turn {} finished, input unlocked", turn);
    vec![Effect::StopTyping(indicator)]
}

fn show_reply(app: &mut App, turn: u64, reply: ChatReply) -> Vec<Effect> {
    app.transcript.append(Sender::Assistant, reply.reply);

    if reply.recommendations.is_empty() {
        app.results = ResultsArea::NoResults;
        app.status_message = "No matches".to_string();
        return Vec::new();
    }

    let cards: Vec<CardView> = reply.recommendations.iter().map(product::render).collect();
    let count = cards.len();
    app.results = ResultsArea::cleared_with(turn, cards);
    app.status_message = format!("{count} products found");

    (0..count)
        .map(|index| Effect::ScheduleReveal {
            turn,
            index,
            delay: app.timing.reveal_stagger * index as u32,
        })
        .collect()
}

fn show_failure(app: &mut App, error: &ServiceError) {
    warn!("Recommendation request failed: {}", error);
    app.transcript.append(Sender::Assistant, ERROR_REPLY);
    app.results = ResultsArea::Error;
    app.status_message = "Request failed".to_string();
}

fn reveal_card(app: &mut App, turn: u64, index: usize) -> Vec<Effect> {
    let probe_images = app.probe_images;
    let Some(card) = app.results.reveal(turn, index) else {
        debug!("Reveal for turn {} card {} ignored", turn, index);
        return Vec::new();
    };
    if probe_images && card.image.needs_probe() {
        vec![Effect::ProbeImage {
            turn,
            index,
            url: card.image.url.clone(),
        }]
    } else {
        Vec::new()
    }
}
