//! # InputBox Component
//!
//! The chat input. Enter sends the question.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Handle submission (Enter): a blank buffer is left alone, anything else
//!   is taken out of the box, so the field is empty the moment the
//!   question goes out
//! - Display the buffer with a cursor, scrolling internally past a few lines

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{
    CONTENT_OFFSET, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, display_width, inner_width,
    layout_lines, line_of, next_char_boundary, prev_char_boundary,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text content or cursor changed
    ContentChanged,
}

/// Text input component.
///
/// # State
///
/// - `buffer`: Current text being typed
/// - `cursor`: Byte offset into `buffer`
/// - `scroll_offset`: First visible line when content exceeds the viewport
pub struct InputBox {
    pub buffer: String,
    /// Dimmed while an overlay owns the keyboard (Prop)
    pub dimmed: bool,
    cursor: usize,
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
            dimmed: false,
            cursor: 0,
            scroll_offset: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Calculate required height for current buffer content, clamped to viewport limits.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let lines = layout_lines(&self.buffer, inner_width(content_width)).len() as u16;
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Keeps the cursor line inside the visible window.
    fn update_scroll_offset(&mut self, cursor_line: u16) {
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line + 1 - MAX_VISIBLE_LINES;
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let lines = layout_lines(&self.buffer, width);
        let cursor_line = line_of(&lines, self.cursor);
        if lines.len() as u16 <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
        }
        self.update_scroll_offset(cursor_line as u16);

        let visible: Vec<Line> = lines
            .iter()
            .skip(self.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .map(|range| Line::raw(&self.buffer[range.clone()]))
            .collect();

        let mut style = Style::default().fg(Color::Green);
        let mut border_style = Style::default();
        if self.dimmed {
            style = style.add_modifier(Modifier::DIM);
            border_style = border_style.add_modifier(Modifier::DIM);
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" Ask a question (Enter to send) ")
            .padding(Padding::horizontal(1));

        frame.render_widget(Paragraph::new(visible).block(block).style(style), area);

        if !self.dimmed {
            let line_start = lines[cursor_line].start;
            let col = display_width(&self.buffer[line_start..self.cursor]);
            let row = cursor_line as u16 - self.scroll_offset;
            frame.set_cursor_position((area.x + CONTENT_OFFSET + col, area.y + 1 + row));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let text = text.replace("\r\n", "\n");
                self.insert_str(&text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
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
