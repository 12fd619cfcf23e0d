//! Line layout for the input box.
//!
//! Wrapping is by display width, one character at a time, so CJK text (two
//! cells per character) and ASCII line up the same way in the rendered box
//! and in the cursor math. Both use the ranges produced here.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 4;
/// Offset from area edge to content (border + padding)
pub(super) const CONTENT_OFFSET: u16 = 2;

/// Calculate the inner content width after subtracting border/padding overhead.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Splits `text` into byte ranges, one per visual line.
///
/// Breaks on `\n` (the newline itself belongs to no line) and wherever the
/// next character would overflow `width`. Always returns at least one range.
pub(super) fn layout_lines(text: &str, width: u16) -> Vec<Range<usize>> {
    if width == 0 {
        return vec![0..text.len()];
    }

    let mut lines = Vec::new();
    let mut start = 0;
    let mut col: u16 = 0;

    for (i, c) in text.char_indices() {
        if c == '\n' {
            lines.push(start..i);
            start = i + 1;
            col = 0;
            continue;
        }
        let w = c.width().unwrap_or(0) as u16;
        if col > 0 && col + w > width {
            lines.push(start..i);
            start = i;
            col = 0;
        }
        col += w;
    }
    lines.push(start..text.len());
    lines
}

/// Index of the visual line the cursor at byte `pos` sits on.
pub(super) fn line_of(lines: &[Range<usize>], pos: usize) -> usize {
    lines
        .iter()
        .rposition(|line| line.start <= pos)
        .unwrap_or(0)
}

/// Display width of `text`.
pub(super) fn display_width(text: &str) -> u16 {
    text.chars().map(|c| c.width().unwrap_or(0) as u16).sum()
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_empty_is_one_line() {
        assert_eq!(layout_lines("", 10), vec![0..0]);
    }

    #[test]
    fn layout_wraps_ascii_at_width() {
        assert_eq!(layout_lines("abcdefg", 3), vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn layout_wraps_wide_chars_by_cells() {
        // Each CJK char is 2 cells wide and 3 bytes long; width 5 fits two
        let text = "论文问答";
        assert_eq!(layout_lines(text, 5), vec![0..6, 6..12]);
    }

    #[test]
    fn layout_breaks_on_newline() {
        assert_eq!(layout_lines("ab\ncd", 10), vec![0..2, 3..5]);
        assert_eq!(layout_lines("ab\n", 10), vec![0..2, 3..3]);
    }

    #[test]
    fn layout_zero_width_is_single_line() {
        assert_eq!(layout_lines("hello", 0), vec![0..5]);
    }

    #[test]
    fn line_of_prefers_next_line_at_soft_wrap() {
        let lines = layout_lines("abcdef", 3);
        assert_eq!(line_of(&lines, 2), 0);
        assert_eq!(line_of(&lines, 3), 1);
        assert_eq!(line_of(&lines, 6), 1);
    }

    #[test]
    fn line_of_before_newline_stays_on_line() {
        let lines = layout_lines("ab\ncd", 10);
        assert_eq!(line_of(&lines, 2), 0);
        assert_eq!(line_of(&lines, 3), 1);
    }

    #[test]
    fn display_width_counts_cells() {
        assert_eq!(display_width("ab"), 2);
        assert_eq!(display_width("论文"), 4);
    }

    #[test]
    fn char_boundaries_multibyte() {
        let text = "a论b";
        assert_eq!(next_char_boundary(text, 1), 4);
        assert_eq!(prev_char_boundary(text, 4), 1);
        assert_eq!(next_char_boundary(text, 5), 5);
        assert_eq!(prev_char_boundary(text, 0), 0);
    }
}
