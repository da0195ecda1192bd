//! # Results Area
//!
//! The right-hand pane: either a single placeholder line or the cards of the
//! most recent successful turn.
//!
//! Cards arrive hidden and are revealed one by one by the staggered reveal
//! timers. Each card is tagged with the turn that produced it so a timer
//! that fires after a newer turn started cannot reveal into the wrong set.

use crate::core::product::CardView;

pub const SEARCHING_TEXT: &str = "Finding the perfect products for you";
pub const NO_RESULTS_TEXT: &str = "No products found. Try a different search!";
pub const ERROR_TEXT: &str = "Error fetching recommendations. Please try again.";
pub const CANCELLED_TEXT: &str = "Search cancelled.";
pub const EMPTY_TEXT: &str = "Recommendations will appear here.";

#[derive(Debug, Clone, PartialEq)]
pub struct CardSlot {
    pub card: CardView,
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultsArea {
    /// Nothing asked yet.
    #[default]
    Empty,
    Searching,
    NoResults,
    Error,
    Cancelled,
    /// Cards for `turn`. An all-hidden list renders as a cleared pane.
    Cards { turn: u64, slots: Vec<CardSlot> },
}

impl ResultsArea {
    /// Replace the pane with `cards`, all hidden.
    pub fn cleared_with(turn: u64, cards: Vec<CardView>) -> Self {
        Self::Cards {
            turn,
            slots: cards
                .into_iter()
                .map(|card| CardSlot { card, visible: false })
                .collect(),
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ResultsArea::Empty => Some(EMPTY_TEXT),
            ResultsArea::Searching => Some(SEARCHING_TEXT),
            ResultsArea::NoResults => Some(NO_RESULTS_TEXT),
            ResultsArea::Error => Some(ERROR_TEXT),
            ResultsArea::Cancelled => Some(CANCELLED_TEXT),
            ResultsArea::Cards { .. } => None,
        }
    }

    /// Mutable access to a card slot, only if it belongs to `turn`.
    pub fn slot_mut(&mut self, turn: u64, index: usize) -> Option<&mut CardSlot> {
        match self {
            ResultsArea::Cards { turn: current, slots } if *current == turn => slots.get_mut(index),
            _ => None,
        }
    }

    /// Make card `index` of `turn` visible. Returns the card if it was
    /// revealed by this call.
    pub fn reveal(&mut self, turn: u64, index: usize) -> Option<&CardView> {
        let slot = self.slot_mut(turn, index)?;
        if slot.visible {
            return None;
        }
        slot.visible = true;
        Some(&slot.card)
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = &CardView> {
        let slots: &[CardSlot] = match self {
            ResultsArea::Cards { slots, .. } => slots,
            _ => &[],
        };
        slots.iter().filter(|s| s.visible).map(|s| &s.card)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_cards().count()
    }
}
