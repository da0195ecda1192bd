//! Wrapping and cursor geometry for the InputBox.
//!
//! Stateless helpers over `(buffer, cursor byte offset, width)`; the buffer
//! itself is owned by `InputBox`.

use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Visible content lines before the box scrolls internally
pub(super) const MAX_VISIBLE_LINES: u16 = 5;

pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrap `text` into display lines, one or more per logical line. An empty
/// logical line (including a trailing newline) is kept as an empty row.
pub(super) fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);

    text.split('\n')
        .flat_map(|logical| {
            let rows = textwrap::wrap(logical, &options);
            if rows.is_empty() {
                vec![String::new()]
            } else {
                rows.into_iter().map(|r| r.into_owned()).collect()
            }
        })
        .collect()
}

/// (column, row) of the cursor within the wrapped text.
///
/// Wrapping drops the spaces at a break, so the column is measured on the
/// last wrapped row of the cursor's logical line, plus any trailing spaces
/// typed before the cursor, clamped to the width.
pub(super) fn cursor_cell(text: &str, pos: usize, width: u16) -> (u16, u16) {
    let before = &text[..pos];
    let rows_before = wrapped_lines(before, width);
    let row = rows_before.len().saturating_sub(1) as u16;

    let logical_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let logical = &before[logical_start..];
    let trailing_spaces = logical.len() - logical.trim_end_matches(' ').len();
    let last_row = rows_before.last().map(|r| r.width()).unwrap_or(0);
    let col = (last_row + trailing_spaces).min(width as usize) as u16;

    (col, row)
}

/// Byte offset of the character boundary before `pos`.
pub(super) fn prev_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub(super) fn next_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

/// Start and end byte offsets of the logical line containing `pos`.
pub(super) fn line_bounds(text: &str, pos: usize) -> (usize, usize) {
    let start = text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len());
    (start, end)
}

/// Move `pos` one logical line up or down, keeping the character column
/// where possible. Returns None at the first/last line.
pub(super) fn vertical_move(text: &str, pos: usize, down: bool) -> Option<usize> {
    let (start, end) = line_bounds(text, pos);
    let column = text[start..pos].chars().count();

    let (target_start, target_end) = if down {
        if end == text.len() {
            return None;
        }
        line_bounds(text, end + 1)
    } else {
        if start == 0 {
            return None;
        }
        line_bounds(text, start - 1)
    };

    let target = &text[target_start..target_end];
    let offset = target
        .char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(target.len());
    Some(target_start + offset)
}
