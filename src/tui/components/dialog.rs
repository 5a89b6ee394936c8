//! # Dialog Overlays
//!
//! Centered modal boxes drawn over the main layout:
//!
//! - `ConfirmDialog`: yes/no question (`y`/Enter confirms, `n`/Esc declines)
//! - `AlertDialog`: a message that any key dismisses
//! - `FilePicker`: one-line path prompt for choosing a document to upload
//!
//! The picker follows the persistent state + transient wrapper pattern:
//! `FilePickerState` lives in `TuiState`, `FilePicker` is created each frame.

use std::path::PathBuf;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::input_box::{InputBox, InputCursor};
use crate::tui::event::TuiEvent;

const DIALOG_WIDTH: u16 = 56;
const PICKER_TITLE: &str = " Upload a document (path) ";

/// Compute a centered rect of at most `width` x `height` inside `outer`.
fn centered_box(width: u16, height: u16, outer: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(outer.height))])
        .flex(Flex::Center)
        .areas(outer);
    let [center] = Layout::horizontal([Constraint::Length(width.min(outer.width))])
        .flex(Flex::Center)
        .areas(row);
    center
}

/// Rows a wrapped message needs inside a dialog of `DIALOG_WIDTH`.
fn message_rows(message: &str) -> u16 {
    let inner = DIALOG_WIDTH.saturating_sub(4).max(1) as usize;
    textwrap::wrap(message, inner).len().max(1) as u16
}

fn render_message_box(frame: &mut Frame, area: Rect, title: &str, message: &str, help: &str, color: Color) {
    // 2 borders + blank line above the message + message + blank line
    let height = message_rows(message) + 4;
    let overlay = centered_box(DIALOG_WIDTH, height, area);
    frame.render_widget(Clear, overlay);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(title.to_string())
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .title_bottom(Line::from(help.to_string()).centered())
        .padding(Padding::new(1, 1, 1, 1));
    let body = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(body, overlay);
}

/// Result of a keystroke while a confirmation is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmEvent {
    Accept,
    Decline,
}

pub struct ConfirmDialog<'a> {
    pub prompt: &'a str,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self { prompt }
    }
}

impl<'a> Component for ConfirmDialog<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        render_message_box(frame, area, " Confirm ", self.prompt, " y Yes  n No ", Color::Yellow);
    }
}

impl<'a> EventHandler for ConfirmDialog<'a> {
    type Event = ConfirmEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar('y' | 'Y') | TuiEvent::Submit => Some(ConfirmEvent::Accept),
            TuiEvent::InputChar('n' | 'N') | TuiEvent::Escape => Some(ConfirmEvent::Decline),
            _ => None,
        }
    }
}

pub struct AlertDialog<'a> {
    pub message: &'a str,
}

impl<'a> AlertDialog<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl<'a> Component for AlertDialog<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        render_message_box(frame, area, " Alert ", self.message, " any key to close ", Color::Red);
    }
}

impl<'a> EventHandler for AlertDialog<'a> {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Resize | TuiEvent::ScrollUp | TuiEvent::ScrollDown => None,
            _ => Some(()),
        }
    }
}

/// Turn what the user typed or pasted into a path.
///
/// Surrounding quotes (as added by drag-and-drop in many terminals) are
/// stripped and a leading `~/` expands to the home directory.
pub fn parse_path(raw: &str) -> Option<PathBuf> {
    let cleaned = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    if cleaned.is_empty() {
        return None;
    }
    if let Some(rest) = cleaned.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return Some(home.join(rest));
    }
    Some(PathBuf::from(cleaned))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// Picker closed; `None` when cancelled or nothing usable was entered.
    Closed(Option<PathBuf>),
}

/// Persistent state of the open path prompt.
#[derive(Debug, Default)]
pub struct FilePickerState {
    pub buffer: String,
    cursor: InputCursor,
}

impl FilePickerState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for FilePickerState {
    type Event = PickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Closed(None)),
            TuiEvent::Submit => Some(PickerEvent::Closed(parse_path(&self.buffer))),
            other => {
                InputBox::new(&mut self.buffer, &mut self.cursor, true, true).handle_event(other);
                None
            }
        }
    }
}

/// Transient render wrapper for the path prompt.
pub struct FilePicker<'a> {
    state: &'a mut FilePickerState,
}

impl<'a> FilePicker<'a> {
    pub fn new(state: &'a mut FilePickerState) -> Self {
        Self { state }
    }
}

impl<'a> Component for FilePicker<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = (area.width * 4 / 5).max(DIALOG_WIDTH.min(area.width));
        let height = InputBox::calculate_height(&self.state.buffer, self.state.cursor.pos, width);
        // Leave a row under the field for the key hints
        let overlay = centered_box(width, height + 1, area);
        frame.render_widget(Clear, overlay);

        let [field, hints] =
            Layout::vertical([Constraint::Length(height), Constraint::Length(1)]).areas(overlay);
        InputBox::new(&mut self.state.buffer, &mut self.state.cursor, true, true)
            .titled(PICKER_TITLE)
            .render(frame, field);
        frame.render_widget(
            Paragraph::new(" Enter upload  Esc cancel ")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            hints,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(render: impl FnOnce(&mut Frame)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(render).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_confirm_keys() {
        let mut dialog = ConfirmDialog::new("Delete?");
        assert_eq!(dialog.handle_event(&TuiEvent::InputChar('y')), Some(ConfirmEvent::Accept));
        assert_eq!(dialog.handle_event(&TuiEvent::Submit), Some(ConfirmEvent::Accept));
        assert_eq!(dialog.handle_event(&TuiEvent::InputChar('N')), Some(ConfirmEvent::Decline));
        assert_eq!(dialog.handle_event(&TuiEvent::Escape), Some(ConfirmEvent::Decline));
        assert_eq!(dialog.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_confirm_renders_prompt() {
        let text = screen(|f| {
            ConfirmDialog::new("Are you sure you want to delete all files?").render(f, f.area())
        });
        assert!(text.contains("Are you sure you want to delete all files?"));
    }

    #[test]
    fn test_alert_dismissed_by_any_key() {
        let mut alert = AlertDialog::new("Failed to reset system.");
        assert_eq!(alert.handle_event(&TuiEvent::InputChar('q')), Some(()));
        assert_eq!(alert.handle_event(&TuiEvent::Escape), Some(()));
        assert_eq!(alert.handle_event(&TuiEvent::Resize), None);
        let text = screen(|f| AlertDialog::new("Failed to reset system.").render(f, f.area()));
        assert!(text.contains("Failed to reset system."));
    }

    #[test]
    fn test_parse_path_strips_quotes() {
        assert_eq!(parse_path("  '/tmp/a b.pdf'  "), Some(PathBuf::from("/tmp/a b.pdf")));
        assert_eq!(parse_path("\"/tmp/c.pdf\""), Some(PathBuf::from("/tmp/c.pdf")));
        assert_eq!(parse_path("   "), None);
        assert_eq!(parse_path("''"), None);
    }

    #[test]
    fn test_parse_path_expands_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(parse_path("~/docs/x.pdf"), Some(home.join("docs/x.pdf")));
        }
    }

    #[test]
    fn test_picker_edits_and_submits() {
        let mut picker = FilePickerState::new();
        for c in "/tmp/report.pdf".chars() {
            assert_eq!(picker.handle_event(&TuiEvent::InputChar(c)), None);
        }
        assert_eq!(
            picker.handle_event(&TuiEvent::Submit),
            Some(PickerEvent::Closed(Some(PathBuf::from("/tmp/report.pdf"))))
        );
    }

    #[test]
    fn test_picker_cancel_and_empty_submit() {
        let mut picker = FilePickerState::new();
        assert_eq!(picker.handle_event(&TuiEvent::Escape), Some(PickerEvent::Closed(None)));
        assert_eq!(picker.handle_event(&TuiEvent::Submit), Some(PickerEvent::Closed(None)));
    }

    #[test]
    fn test_picker_renders_title() {
        let mut state = FilePickerState::new();
        let text = screen(|f| FilePicker::new(&mut state).render(f, f.area()));
        assert!(text.contains("Upload a document"));
    }
}
