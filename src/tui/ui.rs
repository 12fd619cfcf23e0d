use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::upload_zone::UPLOAD_ZONE_HEIGHT;
use crate::tui::components::{
    FilePicker, LandingPage, MessageList, TitleBar, UploadZone,
};

/// Screen regions, top to bottom.
pub struct Areas {
    pub title: Rect,
    pub upload_zone: Rect,
    pub transcript: Rect,
    pub input: Rect,
}

pub fn layout_areas(frame_area: Rect, input_height: u16) -> Areas {
    use Constraint::{Length, Min};
    let [title, upload_zone, transcript, input] = Layout::vertical([
        Length(1),
        Length(UPLOAD_ZONE_HEIGHT),
        Min(0),
        Length(input_height),
    ])
    .areas(frame_area);
    Areas {
        title,
        upload_zone,
        transcript,
        input,
    }
}

/// Whether the terminal cell `(column, row)` lies inside the upload zone.
pub fn over_upload_zone(frame_area: Rect, input_height: u16, column: u16, row: u16) -> bool {
    layout_areas(frame_area, input_height)
        .upload_zone
        .contains(Position { x: column, y: row })
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    tui.input_box.dimmed = tui.file_picker.is_some();
    let input_height = tui.input_box.calculate_height(frame.area().width);
    let areas = layout_areas(frame.area(), input_height);

    UploadZone::new(app.status.as_ref(), app.drop_zone_active).render(frame, areas.upload_zone);

    if app.transcript.is_empty() {
        LandingPage.render(frame, areas.transcript);
    } else {
        MessageList::new(&mut tui.message_list, app.transcript.messages())
            .render(frame, areas.transcript);
    }

    // Title bar reads scroll state, so it goes after the list has been laid out
    TitleBar {
        base_url: app.base_url(),
        health: app.health.label(),
        pending_queries: app.pending_queries,
        uploading: app.uploading,
        spinner_frame,
        has_unseen_content: tui.message_list.has_unseen_content(),
    }
    .render(frame, areas.title);

    tui.input_box.render(frame, areas.input);

    if let Some(picker) = tui.file_picker.as_mut() {
        let area = frame.area();
        FilePicker::new(picker).render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::transcript::Role;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_layout_stacks_regions() {
        let areas = layout_areas(Rect::new(0, 0, 80, 24), 3);
        assert_eq!(areas.title, Rect::new(0, 0, 80, 1));
        assert_eq!(areas.upload_zone, Rect::new(0, 1, 80, UPLOAD_ZONE_HEIGHT));
        assert_eq!(areas.transcript.y, 1 + UPLOAD_ZONE_HEIGHT);
        assert_eq!(areas.input, Rect::new(0, 21, 80, 3));
    }

    #[test]
    fn test_hit_test_upload_zone() {
        let frame = Rect::new(0, 0, 80, 24);
        assert!(!over_upload_zone(frame, 3, 10, 0));
        assert!(over_upload_zone(frame, 3, 10, 1));
        assert!(over_upload_zone(frame, 3, 79, UPLOAD_ZONE_HEIGHT));
        assert!(!over_upload_zone(frame, 3, 10, UPLOAD_ZONE_HEIGHT + 1));
    }

    #[test]
    fn test_empty_app_shows_landing() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("paperqa | http://fake.test"));
        assert!(text.contains("Upload PDF"));
        assert!(text.contains("Upload a PDF above"));
        assert!(text.contains("Ask a question"));
    }

    #[test]
    fn test_transcript_replaces_landing() {
        let mut app = test_app();
        app.add_message("tester", "What is X?", Role::User);
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("What is X?"));
        assert!(!text.contains("Upload a PDF above"));
    }

    #[test]
    fn test_pending_question_shows_spinner() {
        let mut app = test_app();
        update(&mut app, Action::SubmitQuestion("What is X?".into()));
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("1 waiting..."));
    }

    #[test]
    fn test_picker_overlay_dims_input() {
        let app = test_app();
        let mut tui = TuiState::new();
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("paper.pdf"), b"%PDF").unwrap();
        tui.file_picker = Some(crate::tui::components::FilePickerState::open(dir.path()));

        let text = draw(&app, &mut tui);
        assert!(tui.input_box.dimmed);
        assert!(text.contains("paper.pdf"));
    }
}
