//! # InputBox Component
//!
//! Multi-line text entry at the bottom of the screen.
//!
//! - Enter submits (blank input never leaves the box)
//! - Shift+Enter / Ctrl+J insert a newline
//! - Arrow keys, Home/End, Backspace/Delete edit the buffer
//!
//! `disabled` is a prop from `App`: while a request is pending the box
//! renders dimmed, hides the cursor, and ignores every event. The buffer
//! itself is internal state.

mod editing;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use editing::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, cursor_cell, inner_width, line_bounds, next_boundary,
    prev_boundary, vertical_move, wrapped_lines,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User pressed Enter on non-blank text; the buffer has been cleared
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Locked while a request is pending (Prop)
    pub disabled: bool,
    /// Cursor position as a byte offset into `buffer`
    cursor: usize,
    /// First wrapped row shown when content exceeds `MAX_VISIBLE_LINES`
    scroll_offset: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            cursor: 0,
            scroll_offset: 0,
        }
    }

    /// Height for the current buffer, between one and `MAX_VISIBLE_LINES`
    /// content rows plus borders.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let rows = wrapped_lines(&self.buffer, inner_width(area_width)).len() as u16;
        rows.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (pos != self.cursor).then(|| {
            self.cursor = pos;
            InputEvent::ContentChanged
        })
    }

    fn title(&self) -> &'static str {
        if self.disabled {
            "Waiting for SmartShop..."
        } else {
            "Ask SmartShop (Enter to send, Shift+Enter for newline)"
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let rows = wrapped_lines(&self.buffer, width);
        let (col, row) = cursor_cell(&self.buffer, self.cursor, width);

        // Keep the cursor row inside the visible window
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
        if rows.len() as u16 <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
        }

        let visible = rows
            .iter()
            .skip(self.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        let style = if self.disabled {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Green)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title(self.title())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);

        frame.render_widget(Paragraph::new(visible).style(style).block(block), area);

        if !self.disabled {
            let x = (inner.x + col).min(inner.right().saturating_sub(1).max(inner.x));
            let y = inner.y + row.saturating_sub(self.scroll_offset);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }

        match event {
            TuiEvent::InputChar(c) => {
                self.insert(c.encode_utf8(&mut [0; 4]));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Terminals send CR for newlines inside pastes
                self.insert(&text.replace("\r\n", "\n").replace('\r', "\n"));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => self.move_to(prev_boundary(&self.buffer, self.cursor)),
            TuiEvent::CursorRight => self.move_to(next_boundary(&self.buffer, self.cursor)),
            TuiEvent::CursorHome => self.move_to(line_bounds(&self.buffer, self.cursor).0),
            TuiEvent::CursorEnd => self.move_to(line_bounds(&self.buffer, self.cursor).1),
            TuiEvent::CursorUp => {
                vertical_move(&self.buffer, self.cursor, false).and_then(|p| self.move_to(p))
            }
            TuiEvent::CursorDown => {
                vertical_move(&self.buffer, self.cursor, true).and_then(|p| self.move_to(p))
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll_offset = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
