use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something drawable into a region of the frame.
///
/// Components are short-lived: `ui::draw_ui` builds them each frame from
/// `App` and `TuiState` borrows, so props are plain fields and anything that
/// must survive a frame lives in the borrowed state (`MessageListState`,
/// `InputCursor`, `FilePickerState`).
///
/// `render` takes `&mut self` because some components refresh caches while
/// drawing. `MessageList` recomputes bubble heights there, and `InputBox`
/// moves its scroll row to keep the cursor visible.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns low-level terminal input into its own events.
///
/// Returning `None` means the event was consumed or ignored without
/// producing anything the caller needs to act on.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
