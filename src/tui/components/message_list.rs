//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Display transcript entries as bubbles
//! - Keep the view pinned to the newest entry whenever the transcript changes
//! - Hit testing for suggestion chips
//! - Cache entry heights between frames
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the `Transcript` (props).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::{EntryId, Transcript};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Transcript revision seen on the previous frame
    seen_revision: u64,
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
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            seen_revision: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout
            .total_height()
            .saturating_sub(self.viewport_height)
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

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
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

    /// Offset the content is drawn at. While pinned, the scroll state may
    /// still hold a sentinel from `scroll_to_bottom`, so derive it instead.
    pub fn effective_offset(&self) -> u16 {
        if self.stick_to_bottom {
            self.max_offset()
        } else {
            self.scroll_state.offset().y.min(self.max_offset())
        }
    }

    /// Content exists below the viewport (drives the "↓ New" marker).
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.effective_offset() < self.max_offset()
    }

    /// Leave auto-scroll, anchoring the offset at the current bottom first.
    fn unpin(&mut self) {
        if self.stick_to_bottom {
            let y = self.max_offset();
            self.scroll_state.set_offset(Position { x: 0, y });
            self.stick_to_bottom = false;
        }
    }

    /// Any transcript mutation brings the newest entry into view.
    fn follow_revision(&mut self, revision: u64) {
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.stick_to_bottom = true;
        }
    }
}

/// Scrollable transcript view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    /// Keyboard-highlighted chip: (suggestion entry, chip index)
    pub highlighted_chip: Option<(EntryId, usize)>,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        highlighted_chip: Option<(EntryId, usize)>,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            highlighted_chip,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let entries = self.transcript.entries();

        self.state.follow_revision(self.transcript.revision());
        self.state
            .layout
            .refresh(self.transcript, content_width);

        let total_height = self.state.layout.total_height();
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.effective_offset();
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset = self.state.layout.top_of(visible_range.start);
        for i in visible_range {
            let entry = &entries[i];
            let height = self.state.layout.heights[i];
            let highlighted = self
                .highlighted_chip
                .filter(|(id, _)| *id == entry.id)
                .map(|(_, chip)| chip);
            let message = Message::new(entry, highlighted, self.spinner_frame);
            scroll_view.render_widget(message, Rect::new(0, y_offset, content_width, height));
            y_offset += height;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `MessageListState` because scrolling mutates
/// persistent state while `MessageList` is rebuilt every frame.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.unpin();
                self.scroll_state.scroll_up();
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.unpin();
                self.scroll_state.scroll_page_up();
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    revision: Option<u64>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            revision: None,
            content_width: 0,
        }
    }

    /// Whether the cached heights still describe `revision` at `content_width`.
    pub fn is_current(&self, revision: u64, content_width: u16) -> bool {
        self.revision == Some(revision) && self.content_width == content_width
    }

    /// Re-measure every entry when the transcript or width changed.
    ///
    /// Notes are edited in place and placeholders are removed from the
    /// middle, so a partial reuse of old heights is not safe.
    pub fn refresh(&mut self, transcript: &Transcript, content_width: u16) {
        if self.is_current(transcript.revision(), content_width) {
            return;
        }
        self.heights = transcript
            .entries()
            .iter()
            .map(|entry| Message::calculate_height(entry, content_width))
            .collect();
        self.rebuild_prefix_heights();
        self.revision = Some(transcript.revision());
        self.content_width = content_width;
    }

    pub fn content_width(&self) -> u16 {
        self.content_width
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Content-space y coordinate where entry `index` starts.
    pub fn top_of(&self, index: usize) -> u16 {
        if index == 0 {
            0
        } else {
            self.prefix_heights
                .get(index - 1)
                .copied()
                .unwrap_or_else(|| self.total_height())
        }
    }

    /// Index of the entry covering content-space row `content_y`.
    pub fn entry_at(&self, content_y: u16) -> Option<usize> {
        let index = self.prefix_heights.partition_point(|&end| end <= content_y);
        (index < self.prefix_heights.len()).then_some(index)
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
