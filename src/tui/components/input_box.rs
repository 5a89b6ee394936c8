//! # InputBox Component
//!
//! The question field and its send control.
//!
//! ## State Management
//!
//! The text lives in `App::input` so the reducer can read and clear it.
//! Only the cursor (a byte offset into that text) and the internal scroll
//! row are presentation state, kept in [`InputCursor`].
//!
//! While a question is in flight the box is disabled: it still accepts
//! typing but Enter does not emit [`InputEvent::Submit`].

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders (2) + padding (2)
const HORIZONTAL_OVERHEAD: u16 = 4;
const VERTICAL_OVERHEAD: u16 = 2;
/// Rows shown before the field scrolls internally
const MAX_VISIBLE_ROWS: u16 = 3;

pub const READY_TITLE: &str = " Ask a question (Enter to send) ";
pub const SENDING_TITLE: &str = " Waiting for answer... ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Submit,
    ContentChanged,
}

/// Persistent cursor state for the question field.
#[derive(Debug, Default)]
pub struct InputCursor {
    /// Byte offset into the buffer (0..=len), always on a char boundary
    pub pos: usize,
    scroll_row: u16,
}

impl InputCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the cursor after the last character, e.g. when the text was
    /// replaced wholesale.
    pub fn move_to_end(&mut self, buffer: &str) {
        self.pos = buffer.len();
    }

    /// Keep the cursor inside a buffer that may have changed underneath it.
    pub fn sync(&mut self, buffer: &str) {
        if self.pos > buffer.len() || !buffer.is_char_boundary(self.pos) {
            self.pos = buffer.len();
        }
        if buffer.is_empty() {
            self.scroll_row = 0;
        }
    }
}

/// Split `text` into rows at most `width` columns wide (character wrap).
fn rows(text: &str, width: usize) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width && used > 0 {
            rows.push(start..i);
            start = i;
            used = 0;
        }
        used += w;
    }
    rows.push(start..text.len());
    rows
}

/// Row and column of the cursor, where a cursor after a full last row
/// moves onto a fresh row.
fn cursor_cell(text: &str, pos: usize, width: usize) -> (usize, usize) {
    let rows = rows(text, width);
    let last = rows.len() - 1;
    for (r, range) in rows.iter().enumerate() {
        if pos < range.end || r == last {
            let col = text[range.start..pos].width();
            return if col >= width { (r + 1, 0) } else { (r, col) };
        }
    }
    (last, 0)
}

fn row_count(text: &str, pos: usize, width: usize) -> usize {
    rows(text, width).len().max(cursor_cell(text, pos, width).0 + 1)
}

/// Largest char boundary at or before `pos`, clamped to the text.
fn floor_char_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

/// Transient question field over `App::input`.
pub struct InputBox<'a> {
    pub buffer: &'a mut String,
    pub cursor: &'a mut InputCursor,
    /// Whether Enter sends (false while a question is in flight)
    pub enabled: bool,
    /// Whether keystrokes go to this box
    pub focused: bool,
    /// Overrides the ready/sending title
    pub title: Option<&'static str>,
}

impl<'a> InputBox<'a> {
    pub fn new(buffer: &'a mut String, cursor: &'a mut InputCursor, enabled: bool, focused: bool) -> Self {
        cursor.sync(buffer);
        Self {
            buffer,
            cursor,
            enabled,
            focused,
            title: None,
        }
    }

    pub fn titled(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    /// Height for the current content, in `[1, MAX_VISIBLE_ROWS]` rows plus borders.
    pub fn calculate_height(buffer: &str, pos: usize, area_width: u16) -> u16 {
        let width = area_width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        if width == 0 {
            return 1 + VERTICAL_OVERHEAD;
        }
        // `pos` may be stale if the text was replaced since the last sync
        let pos = floor_char_boundary(buffer, pos);
        (row_count(buffer, pos, width) as u16).min(MAX_VISIBLE_ROWS) + VERTICAL_OVERHEAD
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }
}

impl<'a> Component for InputBox<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        let visible = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);

        let (title, title_style) = if self.enabled {
            (READY_TITLE, Style::default().fg(Color::Green))
        } else {
            (
                SENDING_TITLE,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        };
        let title = self.title.unwrap_or(title);
        let border_style = if self.focused {
            title_style
        } else {
            title_style.add_modifier(Modifier::DIM)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title)
            .title_style(title_style)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);

        if width == 0 {
            frame.render_widget(block, area);
            return;
        }

        let (cursor_row, cursor_col) = cursor_cell(self.buffer.as_str(), self.cursor.pos, width);
        let cursor_row = cursor_row as u16;
        if cursor_row < self.cursor.scroll_row {
            self.cursor.scroll_row = cursor_row;
        } else if cursor_row >= self.cursor.scroll_row + visible {
            self.cursor.scroll_row = cursor_row + 1 - visible;
        }

        let lines: Vec<Line> = rows(self.buffer.as_str(), width)
            .into_iter()
            .skip(self.cursor.scroll_row as usize)
            .take(visible as usize)
            .map(|range| Line::raw(&self.buffer[range]))
            .collect();
        let text_style = if self.enabled {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(Paragraph::new(lines).style(text_style).block(block), area);

        if self.focused {
            frame.set_cursor_position((
                inner.x + cursor_col as u16,
                inner.y + cursor_row - self.cursor.scroll_row,
            ));
        }
    }
}

impl<'a> EventHandler for InputBox<'a> {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert(c.encode_utf8(&mut encoded));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Questions are single-line
                let flattened: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert(&flattened);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_char_boundary(self.buffer.as_str(), self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(self.buffer.as_str(), self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(self.buffer.as_str(), self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(self.buffer.as_str(), self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit if self.enabled && !self.buffer.trim().is_empty() => {
                Some(InputEvent::Submit)
            }
            _ => None,
        }
    }
}
