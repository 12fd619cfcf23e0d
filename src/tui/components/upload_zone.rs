//! # UploadZone Component
//!
//! The drop target. Shows how to get a PDF in and the current status notice.
//!
//! Stateless: the hover flag and the notice are props from `App`. The border
//! lights up while the mouse is over the zone and goes back to normal on
//! drop or leave.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::core::status::{Severity, StatusNotice};
use crate::tui::component::Component;

/// Fixed height: border + hint line + status line + border.
pub const UPLOAD_ZONE_HEIGHT: u16 = 4;

const HINT: &str = "Drop a PDF onto this window, or press Ctrl+O to browse";

pub struct UploadZone<'a> {
    pub status: Option<&'a StatusNotice>,
    pub active: bool,
}

impl<'a> UploadZone<'a> {
    pub fn new(status: Option<&'a StatusNotice>, active: bool) -> Self {
        Self { status, active }
    }
}

pub fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Info => Style::default().fg(Color::Yellow),
        Severity::Success => Style::default().fg(Color::Green),
        Severity::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

impl<'a> Component for UploadZone<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (border_type, border_style) = if self.active {
            (
                BorderType::Thick,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else {
            (BorderType::Rounded, Style::default().fg(Color::DarkGray))
        };

        let block = Block::bordered()
            .border_type(border_type)
            .border_style(border_style)
            .title(" Upload PDF ")
            .padding(Padding::horizontal(1));

        let status_line = match self.status {
            Some(notice) => Line::from(Span::styled(
                notice.message.as_str(),
                severity_style(notice.severity),
            )),
            None => Line::default(),
        };

        let lines = vec![
            Line::from(Span::styled(HINT, Style::default().fg(Color::Gray))),
            status_line,
        ];

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}
