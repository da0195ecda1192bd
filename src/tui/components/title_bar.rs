//! # TitleBar Component
//!
//! Single-line status bar at the top of the screen.
//!
//! ```text
//! SmartShop (http://localhost:5001) | connected: 20 products
//! SmartShop (http://localhost:5001) | Searching... | ↓ New
//! ```
//!
//! Stateless: the endpoint and status come from `App`, the unseen-content
//! flag from the transcript's scroll state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct TitleBar {
    /// Base URL of the recommendation service
    pub endpoint: String,
    /// Status text (e.g., "Searching...", "3 products found")
    pub status_message: String,
    /// Whether there's transcript content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(endpoint: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            endpoint,
            status_message,
            has_unseen_content,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("SmartShop ({})", self.endpoint);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.has_unseen_content {
            text.push_str(" | ↓ New");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().fg(Color::Magenta);
        frame.render_widget(Span::styled(self.text(), style), area);
    }
}
