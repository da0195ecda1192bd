use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::{Entry, Sender, sanitize};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one transcript entry.
///
/// The block title is the sender's display name; the body is the entry
/// text, shown as plain text with control characters stripped. The typing
/// indicator renders like an assistant message, dimmed and italic.
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered
/// height with `textwrap` options that match `Paragraph` wrapping, so the
/// parent `MessageList` can lay out the scroll canvas without rendering.
#[derive(Clone)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub is_typing: bool,
}

impl Message {
    pub fn new(entry: Entry<'_>) -> Self {
        Self {
            sender: entry.sender(),
            text: sanitize(&entry.text()),
            is_typing: matches!(entry, Entry::Typing(_)),
        }
    }

    /// Height required for `entry` at `width`, including borders.
    pub fn calculate_height(entry: Entry<'_>, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let text = sanitize(&entry.text());
        let content = text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn style(&self) -> Style {
        if self.is_typing {
            return Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC);
        }
        sender_style(self.sender)
    }
}

fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Green),
        Sender::Assistant => Style::default().fg(Color::Blue),
    }
}

impl Widget for Message {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.style();
        let border_style = sender_style(self.sender).add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.sender.display_name())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl Component for Message {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.clone(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::ChatMessage;
    use crate::core::typing::{IndicatorId, TypingIndicator};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn msg(sender: Sender, text: &str) -> ChatMessage {
        ChatMessage {
            sender,
            text: text.to_string(),
        }
    }

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        let m = msg(Sender::User, "   \n\t ");
        assert_eq!(Message::calculate_height(Entry::Message(&m), 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let m = msg(Sender::User, "Hello world");
        assert_eq!(Message::calculate_height(Entry::Message(&m), 0), 1);
        assert_eq!(
            Message::calculate_height(Entry::Message(&m), HORIZONTAL_OVERHEAD),
            1
        );
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        let m = msg(Sender::Assistant, "Hello world");
        // content_width = 9 - 4 = 5 → "Hello" | "world"
        assert_eq!(
            Message::calculate_height(Entry::Message(&m), 9),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_ignores_control_characters() {
        let m = msg(Sender::Assistant, "ab\u{1b}[2Jcd");
        // Escape byte stripped, "ab[2Jcd" is 7 chars, fits in 76
        assert_eq!(
            Message::calculate_height(Entry::Message(&m), 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn typing_entry_is_italic_and_attributed_to_assistant() {
        let indicator = TypingIndicator::new(IndicatorId::new());
        let message = Message::new(Entry::Typing(&indicator));
        assert_eq!(message.sender, Sender::Assistant);
        assert_eq!(message.text, "Thinking");
        assert!(message.style().add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn markup_is_rendered_literally() {
        let m = msg(Sender::Assistant, "<b>bold</b>");
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(Message::new(Entry::Message(&m)), f.area());
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("SmartShop"));
        assert!(text.contains("<b>bold</b>"));
    }
}
