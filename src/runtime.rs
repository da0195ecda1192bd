//! # Effect Runtime
//!
//! Executes the [`Effect`]s returned by `update()`. Every background task
//! (the request, the typing ticker, reveal timers, image probes) only ever
//! sends an [`Action`] back over the channel; state is mutated solely by the
//! event loop calling `update()`.
//!
//! ```text
//!   update() ──▶ Vec<Effect> ──▶ Runtime::execute ──▶ tokio::spawn(...)
//!      ▲                                                    │
//!      └──────────────── Action (mpsc channel) ◀────────────┘
//! ```
//!
//! All spawned work is tracked by `AbortHandle` so cancellation and shutdown
//! can stop it.

use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;
use tokio::time::{Instant, interval_at, sleep};

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::core::typing::IndicatorId;

pub type ActionSender = UnboundedSender<Action>;

/// Periodic driver for one typing indicator.
///
/// The first tick fires one interval after start; the label starts at the
/// bare base text.
pub struct TypingTicker {
    id: IndicatorId,
    handle: AbortHandle,
}

impl TypingTicker {
    pub fn start(id: IndicatorId, interval: Duration, tx: ActionSender) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + interval, interval);
            loop {
                ticks.tick().await;
                if tx.send(Action::TypingTick(id)).is_err() {
                    debug!("Typing ticker stopping: receiver dropped");
                    return;
                }
            }
        })
        .abort_handle();
        Self { id, handle }
    }

    pub fn id(&self) -> IndicatorId {
        self.id
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

pub struct Runtime {
    tx: ActionSender,
    ticker: Option<TypingTicker>,
    /// In-flight request and the turn it belongs to.
    request: Option<(u64, AbortHandle)>,
    /// Reveal timers and image probes.
    timers: Vec<AbortHandle>,
}

impl Runtime {
    pub fn new(tx: ActionSender) -> Self {
        Self {
            tx,
            ticker: None,
            request: None,
            timers: Vec::new(),
        }
    }

    /// Run `action` through the reducer and execute what it asks for.
    /// Returns true when the app should quit.
    pub fn dispatch(&mut self, app: &mut App, action: Action) -> bool {
        let mut quit = false;
        for effect in update(app, action) {
            quit |= self.execute(app, effect);
        }
        quit
    }

    /// Execute a single effect. Returns true for `Effect::Quit`.
    pub fn execute(&mut self, app: &App, effect: Effect) -> bool {
        self.timers.retain(|handle| !handle.is_finished());

        match effect {
            Effect::SendRequest { turn, message } => {
                let service = app.service.clone();
                let tx = self.tx.clone();
                info!("Spawning request for turn {}", turn);
                let handle = tokio::spawn(async move {
                    let result = service.recommend(&message).await;
                    if tx.send(Action::ResponseReceived { turn, result }).is_err() {
                        warn!("Failed to deliver response for turn {}: receiver dropped", turn);
                    }
                })
                .abort_handle();
                if let Some((_, previous)) = self.request.replace((turn, handle)) {
                    previous.abort();
                }
            }
            Effect::AbortRequest { turn } => {
                if let Some((current, handle)) = self.request.take() {
                    if current == turn {
                        info!("Aborting request for turn {}", turn);
                        handle.abort();
                    } else {
                        self.request = Some((current, handle));
                    }
                }
            }
            Effect::StartTyping(id) => {
                if let Some(previous) = self.ticker.take() {
                    previous.stop();
                }
                self.ticker = Some(TypingTicker::start(
                    id,
                    app.timing.typing_interval,
                    self.tx.clone(),
                ));
            }
            Effect::StopTyping(id) => match self.ticker.take() {
                Some(ticker) if ticker.id() == id => ticker.stop(),
                other => self.ticker = other,
            },
            Effect::ScheduleReveal { turn, index, delay } => {
                let tx = self.tx.clone();
                let handle = tokio::spawn(async move {
                    sleep(delay).await;
                    let _ = tx.send(Action::RevealCard { turn, index });
                })
                .abort_handle();
                self.timers.push(handle);
            }
            Effect::ProbeImage { turn, index, url } => {
                let service = app.service.clone();
                let tx = self.tx.clone();
                let handle = tokio::spawn(async move {
                    if let Err(e) = service.probe_image(&url).await {
                        debug!("Image probe for card {} failed: {}", index, e);
                        let _ = tx.send(Action::ImageProbeFailed { turn, index });
                    }
                })
                .abort_handle();
                self.timers.push(handle);
            }
            Effect::Quit => {
                self.shutdown();
                return true;
            }
        }
        false
    }

    /// Ask the service for its health; the answer arrives as
    /// `Action::HealthChecked`.
    pub fn check_health(&mut self, app: &App) {
        let service = app.service.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let result = service.health().await;
            let _ = tx.send(Action::HealthChecked(result));
        })
        .abort_handle();
        self.timers.push(handle);
    }

    pub fn is_typing(&self) -> bool {
        self.ticker.is_some()
    }

    fn shutdown(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        if let Some((_, handle)) = self.request.take() {
            handle.abort();
        }
        for handle in self.timers.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.shutdown();
    }
}
