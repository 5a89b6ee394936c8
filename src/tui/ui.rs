use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};

use crate::core::state::App;
use crate::core::transcript::{CustomContent, EntryBody};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::file_panel::PANEL_WIDTH;
use crate::tui::components::message::Message;
use crate::tui::components::{
    AlertDialog, ConfirmDialog, FilePanel, FilePicker, InputBox, MessageList, TitleBar,
};

/// Screen regions of the main layout.
///
/// ```text
/// ┌ title ─────────────────────────────────┐
/// ├ files ──────┬ transcript ──────────────┤
/// │             │                          │
/// │             ├ input ───────────────────┤
/// └─────────────┴──────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub title: Rect,
    pub files: Rect,
    pub transcript: Rect,
    pub input: Rect,
}

/// Split the frame. Shared by drawing and mouse hit testing so both agree.
pub fn areas(frame_area: Rect, app: &App, tui: &TuiState) -> Areas {
    use Constraint::{Length, Min};
    let [title, body] = Layout::vertical([Length(1), Min(0)]).areas(frame_area);
    let panel_width = PANEL_WIDTH.min(body.width / 3);
    let [files, right] = Layout::horizontal([Length(panel_width), Min(0)]).areas(body);
    let input_height = InputBox::calculate_height(&app.input, tui.input_cursor.pos, right.width);
    let [transcript, input] = Layout::vertical([Min(0), Length(input_height)]).areas(right);
    Areas {
        title,
        files,
        transcript,
        input,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &mut App, tui: &mut TuiState, spinner_frame: usize) {
    // The reducer may have replaced the question text since the last frame
    tui.input_cursor.sync(&app.input);
    let areas = areas(frame.area(), app, tui);

    let mut message_list = MessageList::new(
        &mut tui.message_list,
        &app.transcript,
        tui.highlighted_chip,
        spinner_frame,
    );
    message_list.render(frame, areas.transcript);

    TitleBar::new(
        &app.backend_url,
        &app.status_message,
        tui.message_list.has_unseen_content(),
    )
    .render(frame, areas.title);

    FilePanel::new(&app.files).render(frame, areas.files);

    let enabled = app.controls_enabled();
    let focused = tui.file_picker.is_none() && !app.has_modal();
    InputBox::new(&mut app.input, &mut tui.input_cursor, enabled, focused)
        .render(frame, areas.input);

    // Overlays, bottom to top
    if let Some(picker) = tui.file_picker.as_mut() {
        FilePicker::new(picker).render(frame, frame.area());
    }
    if let Some(confirmation) = app.pending_confirmation {
        ConfirmDialog::new(confirmation.prompt()).render(frame, frame.area());
    }
    if let Some(alert) = app.alert.as_deref() {
        AlertDialog::new(alert).render(frame, frame.area());
    }
}

/// The chip label under screen cell (`col`, `row`), if any.
pub fn hit_test_chip(app: &App, tui: &TuiState, frame_area: Rect, col: u16, row: u16) -> Option<String> {
    let transcript_area = areas(frame_area, app, tui).transcript;
    if !transcript_area.contains(Position { x: col, y: row }) {
        return None;
    }

    let layout = &tui.message_list.layout;
    let content_y = (row - transcript_area.y).saturating_add(tui.message_list.effective_offset());
    let index = layout.entry_at(content_y)?;
    let entry = app.transcript.entries().get(index)?;
    let EntryBody::Custom(CustomContent::Suggestions(labels)) = &entry.body else {
        return None;
    };
    let chip = Message::chip_at(entry, layout.content_width(), content_y - layout.top_of(index))?;
    labels.get(chip).cloned()
}
