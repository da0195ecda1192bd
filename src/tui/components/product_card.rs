//! # ProductCard Component
//!
//! One recommendation in the results pane.
//!
//! ```text
//! ╭ Trail Runner 3000 ───────────────╮
//! │ Footwear                         │
//! │ 🖼 Trail Runner 3000             │
//! │   https://img.example/trail.png  │
//! │ Lightweight shoe for rough       │
//! │ terrain.                         │
//! │ $89.99 · Match: 87%              │
//! ╰──────────────────────────────────╯
//! ```
//!
//! The body is pre-wrapped with `textwrap` and rendered without further
//! wrapping, so [`ProductCard::calculate_height`] is exact by construction.
//! Each field keeps at most a few wrapped lines and ends in "…" when cut.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::product::CardView;
use crate::core::transcript::sanitize;

const CONTENT_PAD_H: u16 = 1;
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
const VERTICAL_OVERHEAD: u16 = 2;
const MAX_FIELD_LINES: usize = 3;
const MAX_DESCRIPTION_LINES: usize = 12;

pub struct ProductCard<'a> {
    pub card: &'a CardView,
}

impl<'a> ProductCard<'a> {
    pub fn new(card: &'a CardView) -> Self {
        Self { card }
    }

    pub fn calculate_height(card: &CardView, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        u16::try_from(body_lines(card, content_width).len())
            .unwrap_or(u16::MAX)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

fn wrap(text: &str, width: u16, max_lines: usize) -> Vec<String> {
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let wrapped = textwrap::wrap(text.trim(), options);
    let truncated = wrapped.len() > max_lines;
    let mut lines: Vec<String> = wrapped
        .into_iter()
        .take(max_lines)
        .map(|l| l.into_owned())
        .collect();
    if truncated && let Some(last) = lines.last_mut() {
        last.push('…');
    }
    if lines.is_empty() { vec![String::new()] } else { lines }
}

fn body_lines(card: &CardView, width: u16) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    for l in wrap(&sanitize(&card.category), width, MAX_FIELD_LINES) {
        lines.push(Line::styled(l, Style::default().fg(Color::Yellow)));
    }

    let image_style = if card.image.failed {
        dim.add_modifier(Modifier::CROSSED_OUT)
    } else {
        dim
    };
    for l in wrap(&format!("🖼 {}", sanitize(&card.image.alt)), width, MAX_FIELD_LINES) {
        lines.push(Line::styled(l, dim));
    }
    let url = sanitize(card.image.current());
    for l in wrap(&url, width.saturating_sub(2).max(1), MAX_FIELD_LINES) {
        lines.push(Line::styled(format!("  {l}"), image_style));
    }

    for l in wrap(&sanitize(&card.description), width, MAX_DESCRIPTION_LINES) {
        lines.push(Line::raw(l));
    }

    let mut price = vec![Span::styled(
        card.price.clone(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(match_line) = &card.match_line {
        price.push(Span::styled(" · ", dim));
        price.push(Span::styled(match_line.clone(), Style::default().fg(Color::Cyan)));
    }
    lines.push(Line::from(price));

    lines
}

impl Widget for ProductCard<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let block = Block::bordered()
            .title(sanitize(&self.card.name))
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Blue))
            .title_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(body_lines(self.card, inner.width)).render(inner, buf);
    }
}
