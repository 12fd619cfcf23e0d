use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::{Message as ChatMessage, Role};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one transcript entry as
/// `{sender}：{content}` inside a rounded block titled with its time.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// using `textwrap` with options that match Ratatui's `Paragraph` wrapping,
/// so the parent `MessageList` can lay out the scroll canvas before drawing.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    /// Calculate the height required for this message given a width.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row
            return 1;
        }

        let text = message.display_text();
        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines: usize = text
            .trim()
            .split('\n')
            .map(|line| textwrap::wrap(line, &options).len().max(1))
            .sum();
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Green),
        Role::Assistant => Style::default().fg(Color::Blue),
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = role_style(self.message.role);
        let border_style = style.add_modifier(Modifier::DIM);
        let timestamp = self.message.created_at.format(" %H:%M:%S ").to_string();

        let block = Block::bordered()
            .title(timestamp)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let text = self.message.display_text();
        Paragraph::new(text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::{SYSTEM_SENDER, USER_SENDER};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn user(content: &str) -> ChatMessage {
        ChatMessage::new(USER_SENDER, content, Role::User)
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        assert_eq!(Message::calculate_height(&user("Hello"), 0), 1);
        assert_eq!(Message::calculate_height(&user("Hello"), HORIZONTAL_OVERHEAD), 1);
    }

    #[test]
    fn calculate_height_single_line_fits() {
        // "您：Hello" is 9 cells wide, fits in 76
        assert_eq!(Message::calculate_height(&user("Hello"), 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_counts_explicit_newlines() {
        let msg = user("one\ntwo\nthree");
        assert_eq!(Message::calculate_height(&msg, 80), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_wraps_long_text() {
        let msg = user(&"word ".repeat(40));
        assert!(Message::calculate_height(&msg, 24) > 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_saturates_on_huge_answers() {
        let content = "x\n".repeat(65533) + "x";
        let msg = ChatMessage::new(SYSTEM_SENDER, &content, Role::Assistant);
        assert_eq!(Message::calculate_height(&msg, 80), u16::MAX);

        let content = "x\n".repeat(100_000);
        let msg = ChatMessage::new(SYSTEM_SENDER, &content, Role::Assistant);
        assert_eq!(Message::calculate_height(&msg, 80), u16::MAX);
    }

    #[test]
    fn style_by_role() {
        assert_eq!(role_style(Role::User).fg, Some(Color::Green));
        assert_eq!(role_style(Role::Assistant).fg, Some(Color::Blue));
    }

    #[test]
    fn renders_content_as_plain_text() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let msg = ChatMessage::new(SYSTEM_SENDER, "<b>X is Y</b>", Role::Assistant);

        terminal
            .draw(|f| {
                f.render_widget(Message::new(&msg), f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("<b>X is Y</b>"));
    }
}
