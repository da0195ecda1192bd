//! # ResultsPanel Component
//!
//! Right-hand pane. Shows either one placeholder line (searching, no
//! results, error, cancelled, empty) or the revealed product cards of the
//! latest turn, stacked in a `ScrollView`.
//!
//! Hidden cards take no space, so each reveal appends one card at the end.
//! Scrolling is only possible while the pane has focus (Tab).

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::results::ResultsArea;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::product_card::ProductCard;
use crate::tui::event::TuiEvent;

#[derive(Default)]
pub struct ResultsPanelState {
    pub scroll_state: ScrollViewState,
    /// Turn whose cards were last rendered; a new turn resets the scroll.
    shown_turn: Option<u64>,
}

impl ResultsPanelState {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct ResultsPanel<'a> {
    pub state: &'a mut ResultsPanelState,
    pub results: &'a ResultsArea,
    pub focused: bool,
}

impl<'a> ResultsPanel<'a> {
    pub fn new(state: &'a mut ResultsPanelState, results: &'a ResultsArea, focused: bool) -> Self {
        Self {
            state,
            results,
            focused,
        }
    }

    fn block(&self) -> Block<'static> {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::bordered()
            .title(format!("Recommendations ({})", self.results.visible_count()))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
    }
}

impl<'a> Component for ResultsPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(text) = self.results.placeholder() {
            self.state.shown_turn = None;
            let style = match self.results {
                ResultsArea::Error => Style::default().fg(Color::Red),
                ResultsArea::Searching => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
                _ => Style::default().fg(Color::DarkGray),
            };
            let placeholder = Paragraph::new(text)
                .style(style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(placeholder, inner);
            return;
        }

        if let ResultsArea::Cards { turn, .. } = self.results
            && self.state.shown_turn != Some(*turn)
        {
            self.state.shown_turn = Some(*turn);
            self.state.scroll_state.scroll_to_top();
        }

        let content_width = inner.width.saturating_sub(1); // -1 for scrollbar
        let cards: Vec<_> = self
            .results
            .visible_cards()
            .map(|card| (card, ProductCard::calculate_height(card, content_width)))
            .collect();
        let total_height = cards.iter().map(|(_, h)| *h).fold(0u16, u16::saturating_add);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset = 0u16;
        for (card, height) in cards {
            if y_offset == u16::MAX {
                break;
            }
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(ProductCard::new(card), rect);
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

impl EventHandler for ResultsPanelState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown | TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::CursorHome => self.scroll_state.scroll_to_top(),
            TuiEvent::CursorEnd => self.scroll_state.scroll_to_bottom(),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::product::{CardView, ProductRecord, render};
    use crate::core::results::{CANCELLED_TEXT, NO_RESULTS_TEXT, SEARCHING_TEXT};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    fn draw(results: &ResultsArea) -> String {
        let mut state = ResultsPanelState::new();
        let backend = TestBackend::new(50, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                ResultsPanel::new(&mut state, results, false).render(f, f.area());
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

    fn named(name: &str) -> CardView {
        render(&ProductRecord::from_value(&json!({ "name": name })))
    }

    #[test]
    fn placeholders_render_their_text() {
        assert!(draw(&ResultsArea::Searching).contains(SEARCHING_TEXT));
        assert!(draw(&ResultsArea::NoResults).contains("No products found."));
        assert!(draw(&ResultsArea::Cancelled).contains(CANCELLED_TEXT));
        assert!(NO_RESULTS_TEXT.starts_with("No products found."));
    }

    #[test]
    fn only_revealed_cards_render() {
        let mut results = ResultsArea::cleared_with(1, vec![named("Alpha"), named("Beta")]);
        let text = draw(&results);
        assert!(!text.contains("Alpha"));
        assert!(!text.contains("Beta"));

        results.reveal(1, 0);
        let text = draw(&results);
        assert!(text.contains("Alpha"));
        assert!(!text.contains("Beta"));
        assert!(text.contains("Recommendations (1)"));
    }

    #[test]
    fn very_tall_cards_still_render() {
        let tall = || {
            render(&ProductRecord::from_value(&json!({
                "name": "Tall",
                "description": "x\n".repeat(30_000),
            })))
        };
        let mut results = ResultsArea::cleared_with(1, vec![tall(), tall(), tall()]);
        for index in 0..3 {
            results.reveal(1, index);
        }
        let text = draw(&results);
        assert!(text.contains("Recommendations (3)"));
        assert!(text.contains("Tall"));
    }
}
