//! # Typing Indicator
//!
//! The transient "SmartShop: Thinking..." entry shown while a request is
//! pending. This module holds the indicator's *state* only: its identity and
//! how many ticks it has seen. The periodic timer that drives it lives in
//! [`crate::runtime::TypingTicker`], which sends `Action::TypingTick(id)`
//! back into the reducer.
//!
//! ```text
//! tick:   0           1            2             3              4
//! label:  "Thinking"  "Thinking."  "Thinking.."  "Thinking..."  "Thinking."
//! ```

use uuid::Uuid;

/// Label shown before any dots are added.
pub const TYPING_BASE_LABEL: &str = "Thinking";

/// Number of ticks in one full ellipsis cycle.
const DOT_CYCLE: u64 = 3;

/// Distinguished identity of one indicator entry.
///
/// Ticks, stops and removals are all keyed by this id, so a stale tick from a
/// previous request can never animate a newer indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndicatorId(Uuid);

impl IndicatorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for IndicatorId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypingIndicator {
    id: IndicatorId,
    ticks: u64,
}

impl TypingIndicator {
    pub fn new(id: IndicatorId) -> Self {
        Self { id, ticks: 0 }
    }

    pub fn id(&self) -> IndicatorId {
        self.id
    }

    /// Advance the animation by one timer tick.
    pub fn tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    /// Current visible label: `"Thinking"` until the first tick, then an
    /// escalating ellipsis with period 3.
    pub fn label(&self) -> String {
        if self.ticks == 0 {
            return TYPING_BASE_LABEL.to_string();
        }
        let dots = ((self.ticks - 1) % DOT_CYCLE) + 1;
        format!("{TYPING_BASE_LABEL}{}", ".".repeat(dots as usize))
    }
}
