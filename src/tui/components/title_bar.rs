//! # TitleBar Component
//!
//! Top status bar showing backend state and activity.
//!
//! ## Responsibilities
//!
//! - Display the backend base URL and its health
//! - Display a spinner while an upload or questions are in flight
//! - Show "↓ New" indicator when there's unseen content below scroll
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar {
//!     base_url: app.base_url(),
//!     health: app.health.label(),
//!     pending_queries: app.pending_queries,
//!     uploading: app.uploading,
//!     spinner_frame,
//!     has_unseen_content: tui.message_list.has_unseen_content(),
//! };
//! title_bar.render(frame, area);
//! ```
//!
//! ### State Ownership
//!
//! The props come from different places:
//! - `base_url`, `health`, `pending_queries`, `uploading`: core App state
//! - `spinner_frame`: the event loop's animation clock
//! - `has_unseen_content`: TUI state (scroll position indicator)
//!
//! ## Conditional Formatting
//!
//! `"paperqa | http://localhost:8000 (online) | ⠋ uploading... | ↓ New"`
//!
//! Sections after the URL only appear when they apply. The line is cut to
//! the terminal width, so the URL and health stay visible on narrow screens.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;

use crate::tui::component::Component;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Top status bar component.
pub struct TitleBar<'a> {
    pub base_url: &'a str,
    /// Health label, e.g. "online" or "offline: connection refused"
    pub health: String,
    pub pending_queries: usize,
    pub uploading: bool,
    pub spinner_frame: usize,
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn title_text(&self) -> String {
        let mut text = format!("paperqa | {} ({})", self.base_url, self.health);

        let activity = match (self.uploading, self.pending_queries) {
            (true, 0) => Some("uploading...".to_string()),
            (true, n) => Some(format!("uploading, {n} waiting...")),
            (false, 0) => None,
            (false, n) => Some(format!("{n} waiting...")),
        };
        if let Some(activity) = activity {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            text.push_str(&format!(" | {spinner} {activity}"));
        }

        if self.has_unseen_content {
            text.push_str(" | ↓ New");
        }
        text
    }
}

/// Cuts `text` to at most `width` terminal cells.
fn truncate_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (i, c) in text.char_indices() {
        used += c.width().unwrap_or(0);
        if used > width {
            return &text[..i];
        }
    }
    text
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = self.title_text();
        let visible = truncate_to_width(&text, area.width as usize);
        let style = if self.health.starts_with("offline") {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        frame.render_widget(Span::styled(visible.to_string(), style), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn title_bar() -> TitleBar<'static> {
        TitleBar {
            base_url: "http://localhost:8000",
            health: "online".to_string(),
            pending_queries: 0,
            uploading: false,
            spinner_frame: 0,
            has_unseen_content: false,
        }
    }

    fn rendered(title_bar: &mut TitleBar, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                title_bar.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_idle_title() {
        let bar = title_bar();
        assert_eq!(bar.title_text(), "paperqa | http://localhost:8000 (online)");
    }

    #[test]
    fn test_activity_sections() {
        let mut bar = title_bar();
        bar.uploading = true;
        assert!(bar.title_text().ends_with("⠋ uploading..."));

        bar.pending_queries = 2;
        assert!(bar.title_text().ends_with("uploading, 2 waiting..."));

        bar.uploading = false;
        bar.spinner_frame = 1;
        assert!(bar.title_text().ends_with("⠙ 2 waiting..."));
    }

    #[test]
    fn test_unseen_content_indicator() {
        let mut bar = title_bar();
        bar.has_unseen_content = true;
        let text = rendered(&mut bar, 80);
        assert!(text.contains("paperqa"));
        assert!(text.contains("New"));
    }

    #[test]
    fn test_truncates_to_width() {
        assert_eq!(truncate_to_width("paperqa | x", 7), "paperqa");
        assert_eq!(truncate_to_width("论文", 3), "论");
        assert_eq!(truncate_to_width("short", 80), "short");

        let mut bar = title_bar();
        let text = rendered(&mut bar, 12);
        assert_eq!(text, "paperqa | ht");
    }

    #[test]
    fn test_offline_is_red() {
        let mut bar = title_bar();
        bar.health = "offline: connection refused".to_string();
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area);
            })
            .unwrap();
        assert_eq!(terminal.backend().buffer()[(0, 0)].fg, Color::Red);
    }
}
