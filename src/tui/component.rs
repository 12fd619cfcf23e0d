use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that can draw itself into a region of the screen.
///
/// Props arrive as struct fields. `render` takes `&mut self` because some
/// components update caches while drawing: the message list measures new
/// entries and the input box adjusts its scroll window.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events.
pub trait EventHandler {
    /// What the component reports back to the event loop.
    type Event;

    /// Returns `Some` only when the event loop has something to act on.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
