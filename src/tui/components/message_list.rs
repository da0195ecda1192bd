//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the `Transcript` (props).
//! Heights of real messages are cached: the transcript only ever grows, so
//! the cache is extended, never rewritten, unless the width changes. The
//! typing indicator's height is measured fresh every frame.
//!
//! Any change of the transcript's revision re-pins the view to the bottom so
//! the newest entry is always visible after it is added, even when the user
//! had scrolled away. Heights saturate at `u16::MAX`.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::{Entry, Transcript};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// Heights of rendered entries, messages first, indicator last
    pub heights: Vec<u16>,
    /// When true, auto-scroll to bottom on every frame
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Transcript revision seen by the last render
    seen_revision: u64,
    cached_width: u16,
    cached_messages: usize,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            heights: Vec::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            seen_revision: 0,
            cached_width: 0,
            cached_messages: 0,
        }
    }

    fn total_height(&self) -> u16 {
        self.heights.iter().copied().fold(0u16, u16::saturating_add)
    }

    fn max_offset(&self) -> u16 {
        self.total_height().saturating_sub(self.viewport_height)
    }

    /// True when content exists below the visible part of the view.
    pub fn has_unseen_content(&self) -> bool {
        self.scroll_state.offset().y < self.max_offset()
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        if self.scroll_state.offset().y >= self.max_offset() {
            self.stick_to_bottom = true;
            self.clamp_scroll();
        }
    }

    /// Bring the cached heights in line with `transcript` at `width`.
    fn measure(&mut self, transcript: &Transcript, width: u16) {
        let messages = transcript.messages();
        if width != self.cached_width || messages.len() < self.cached_messages {
            self.cached_messages = 0;
        }
        self.heights.truncate(self.cached_messages);

        for msg in &messages[self.cached_messages..] {
            self.heights
                .push(Message::calculate_height(Entry::Message(msg), width));
        }
        self.cached_messages = messages.len();
        self.cached_width = width;

        if let Some(indicator) = transcript.indicator() {
            self.heights
                .push(Message::calculate_height(Entry::Typing(indicator), width));
        }
    }
}

/// Scrollable transcript component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, transcript: &'a Transcript) -> Self {
        Self { state, transcript }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        self.state.measure(self.transcript, content_width);
        self.state.viewport_height = area.height;

        if self.transcript.revision() != self.state.seen_revision {
            self.state.seen_revision = self.transcript.revision();
            self.state.stick_to_bottom = true;
        }

        let total_height = self.state.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (entry, &height) in self.transcript.entries().zip(&self.state.heights) {
            if y_offset == u16::MAX {
                break;
            }
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Message::new(entry), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        } else {
            self.state.clamp_scroll();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Sender;
    use crate::core::typing::IndicatorId;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut MessageListState, transcript: &Transcript, height: u16) -> String {
        let backend = TestBackend::new(40, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                MessageList::new(state, transcript).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn heights_extend_as_messages_are_appended() {
        let mut state = MessageListState::new();
        let mut transcript = Transcript::new();
        transcript.append(Sender::User, "one");
        state.measure(&transcript, 40);
        assert_eq!(state.heights, vec![3]);

        transcript.append(Sender::Assistant, "two");
        state.measure(&transcript, 40);
        assert_eq!(state.heights, vec![3, 3]);
    }

    #[test]
    fn indicator_height_is_not_cached() {
        let mut state = MessageListState::new();
        let mut transcript = Transcript::new();
        let id = IndicatorId::new();
        transcript.append(Sender::User, "hi");
        transcript.show_indicator(id);
        state.measure(&transcript, 40);
        assert_eq!(state.heights.len(), 2);

        transcript.remove_indicator(id);
        state.measure(&transcript, 40);
        assert_eq!(state.heights.len(), 1);
    }

    #[test]
    fn width_change_remeasures_everything() {
        let mut state = MessageListState::new();
        let mut transcript = Transcript::new();
        transcript.append(Sender::User, "Hello world");
        state.measure(&transcript, 40);
        assert_eq!(state.heights, vec![3]);
        state.measure(&transcript, 9);
        assert_eq!(state.heights, vec![4]);
    }

    #[test]
    fn new_entry_repins_to_bottom() {
        let mut state = MessageListState::new();
        let mut transcript = Transcript::new();
        for i in 0..10 {
            transcript.append(Sender::User, format!("message {i}"));
        }
        draw(&mut state, &transcript, 6);

        state.handle_event(&TuiEvent::ScrollPageUp);
        assert!(!state.stick_to_bottom);

        transcript.append(Sender::Assistant, "latest reply");
        let text = draw(&mut state, &transcript, 6);
        assert!(state.stick_to_bottom);
        assert!(text.contains("latest reply"));
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn oversized_replies_saturate_total_height() {
        let mut state = MessageListState::new();
        let mut transcript = Transcript::new();
        let huge = "line\n".repeat(40_000);
        transcript.append(Sender::Assistant, huge.clone());
        transcript.append(Sender::Assistant, huge);
        state.measure(&transcript, 40);
        assert_eq!(state.heights[0], 40_002);
        assert_eq!(state.total_height(), u16::MAX);
    }

    #[test]
    fn height_of_a_huge_message_is_clamped() {
        let mut transcript = Transcript::new();
        transcript.append(Sender::Assistant, "x\n".repeat(70_000));
        let entry = transcript.entries().next().unwrap();
        assert_eq!(Message::calculate_height(entry, 40), u16::MAX);
    }
}
