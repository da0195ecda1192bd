//! # Transcript
//!
//! The ordered, append-only list of chat messages shown on the left pane.
//!
//! ```text
//! Transcript
//! ├── messages: Vec<ChatMessage>        // only ever grows
//! ├── indicator: Option<TypingIndicator> // transient, always rendered last
//! └── revision: u64                      // bumped on every visible change
//! ```
//!
//! Messages are never edited or removed. The typing indicator is the only
//! entry that can disappear, and it is kept outside `messages` so that the
//! append-only invariant holds for real chat entries.
//!
//! The view compares `revision` against the last value it rendered; any
//! change re-pins the view to the bottom so the newest entry is visible.

use crate::core::typing::{IndicatorId, TypingIndicator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// Label rendered in front of every entry from this sender.
    pub fn display_name(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "SmartShop",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// A borrowed view of one renderable transcript row.
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    Message(&'a ChatMessage),
    Typing(&'a TypingIndicator),
}

impl Entry<'_> {
    pub fn sender(&self) -> Sender {
        match self {
            Entry::Message(msg) => msg.sender,
            Entry::Typing(_) => Sender::Assistant,
        }
    }

    pub fn text(&self) -> String {
        match self {
            Entry::Message(msg) => msg.text.clone(),
            Entry::Typing(indicator) => indicator.label(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    indicator: Option<TypingIndicator>,
    revision: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chat entry as the last message. Accepts any text, including
    /// empty strings.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            sender,
            text: text.into(),
        });
        self.revision += 1;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of renderable rows (messages plus the indicator, if shown).
    pub fn len(&self) -> usize {
        self.messages.len() + usize::from(self.indicator.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> {
        self.messages
            .iter()
            .map(Entry::Message)
            .chain(self.indicator.iter().map(Entry::Typing))
    }

    pub fn indicator(&self) -> Option<&TypingIndicator> {
        self.indicator.as_ref()
    }

    /// Show a fresh indicator entry. Replaces any existing one; callers
    /// only ever run one at a time.
    pub fn show_indicator(&mut self, id: IndicatorId) {
        self.indicator = Some(TypingIndicator::new(id));
        self.revision += 1;
    }

    /// Advance the indicator with this id. Returns false (and does nothing)
    /// if that indicator is no longer shown.
    pub fn tick_indicator(&mut self, id: IndicatorId) -> bool {
        match self.indicator.as_mut() {
            Some(indicator) if indicator.id() == id => {
                indicator.tick();
                true
            }
            _ => false,
        }
    }

    /// Remove the indicator with this id. Missing or mismatched ids are a
    /// no-op, so removal is safe to repeat.
    pub fn remove_indicator(&mut self, id: IndicatorId) -> bool {
        if self.indicator.as_ref().is_some_and(|i| i.id() == id) {
            self.indicator = None;
            self.revision += 1;
            true
        } else {
            false
        }
    }
}

/// Strip control characters (other than newline and tab) so that
/// service-supplied text cannot drive the terminal. Everything else is shown
/// verbatim; nothing is interpreted as markup.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
