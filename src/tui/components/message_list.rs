//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Display the list of messages
//! - Keep the view pinned to the latest entry unless the user scrolled up
//! - Cache message heights
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the transcript (props).
//!
//! The transcript only ever grows and messages never change, so cached
//! heights stay valid until the width changes. Each frame measures only the
//! messages appended since the last one.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::Message as ChatMessage;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::default(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back down to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Whether content exists below the visible window.
    pub fn has_unseen_content(&self) -> bool {
        self.scroll_state.offset().y < self.max_offset()
    }
}

/// Scrollable transcript view.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [ChatMessage],
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, messages: &'a [ChatMessage]) -> Self {
        Self { state, messages }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Measure new messages
        self.state.layout.measure(self.messages, content_width);
        let total_height = self.state.layout.total_height();

        // 2. Pin to the newest entry, or clamp to prevent overscrolling
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            let bottom = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: bottom });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset = self.state.layout.top_of(visible_range.start);
        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Message::new(&self.messages[i]), rect);
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements, keyed on content width.
#[derive(Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// `prefix_heights[i]` = bottom edge of message `i`
    pub prefix_heights: Vec<u16>,
    content_width: u16,
}

impl LayoutCache {
    /// Measures any messages not yet cached. A width change drops the cache.
    pub fn measure(&mut self, messages: &[ChatMessage], content_width: u16) {
        if content_width != self.content_width {
            self.heights.clear();
            self.prefix_heights.clear();
            self.content_width = content_width;
        }
        for message in messages.iter().skip(self.heights.len()) {
            let height = Message::calculate_height(message, content_width);
            let bottom = self.total_height().saturating_add(height);
            self.heights.push(height);
            self.prefix_heights.push(bottom);
        }
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Top edge of message `index`.
    pub fn top_of(&self, index: usize) -> u16 {
        if index == 0 {
            0
        } else {
            self.prefix_heights.get(index - 1).copied().unwrap_or(0)
        }
    }

    /// Indices of messages intersecting the viewport `[offset, offset + height)`.
    pub fn visible_range(&self, offset: u16, height: u16) -> std::ops::Range<usize> {
        let end_y = offset.saturating_add(height);
        let start = self.prefix_heights.partition_point(|&bottom| bottom <= offset);
        let end = self.prefix_heights.partition_point(|&bottom| bottom < end_y);
        start..(end + 1).min(self.heights.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::{Role, SYSTEM_SENDER, USER_SENDER};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn messages(n: usize) -> Vec<ChatMessage> {
        (0..n)
            .map(|i| ChatMessage::new(USER_SENDER, &format!("message {i}"), Role::User))
            .collect()
    }

    #[test]
    fn test_layout_cache_saturates_total_height() {
        let mut cache = LayoutCache::default();
        let huge = "x\n".repeat(70_000);
        let msgs = vec![
            ChatMessage::new(SYSTEM_SENDER, &huge, Role::Assistant),
            ChatMessage::new(USER_SENDER, "after", Role::User),
        ];

        cache.measure(&msgs, 40);
        assert_eq!(cache.heights, vec![u16::MAX, 3]);
        assert_eq!(cache.total_height(), u16::MAX);
        assert_eq!(cache.visible_range(u16::MAX - 10, 10), 0..1);
    }

    #[test]
    fn test_layout_cache_measures_only_new_messages() {
        let mut cache = LayoutCache::default();
        let msgs = messages(3);

        cache.measure(&msgs[..2], 40);
        assert_eq!(cache.heights, vec![3, 3]);
        assert_eq!(cache.prefix_heights, vec![3, 6]);

        cache.measure(&msgs, 40);
        assert_eq!(cache.heights.len(), 3);
        assert_eq!(cache.total_height(), 9);
    }

    #[test]
    fn test_layout_cache_width_change_remeasures() {
        let mut cache = LayoutCache::default();
        let long = vec![ChatMessage::new(SYSTEM_SENDER, &"word ".repeat(30), Role::Assistant)];

        cache.measure(&long, 200);
        let wide = cache.total_height();
        cache.measure(&long, 20);
        assert!(cache.total_height() > wide);
    }

    #[test]
    fn test_visible_range() {
        let mut cache = LayoutCache::default();
        cache.measure(&messages(5), 40); // each 3 rows: bottoms 3,6,9,12,15

        assert_eq!(cache.visible_range(0, 3), 0..1);
        assert_eq!(cache.visible_range(0, 7), 0..3);
        assert_eq!(cache.visible_range(4, 3), 1..3);
        assert_eq!(cache.visible_range(12, 10), 4..5);
        assert_eq!(cache.top_of(2), 6);
    }

    #[test]
    fn test_visible_range_empty() {
        let cache = LayoutCache::default();
        assert_eq!(cache.visible_range(0, 10), 0..0);
    }

    #[test]
    fn test_scroll_up_unpins_and_bottom_repins() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_render_sticks_to_latest_message() {
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = MessageListState::new();
        let msgs = messages(10);

        terminal
            .draw(|f| {
                let area = f.area();
                MessageList::new(&mut state, &msgs).render(f, area);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("message 9"));
        assert!(!text.contains("message 0"));
        assert!(!state.has_unseen_content());
    }
}
