use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::transcript::{
    CITATIONS_HEADER, CustomContent, Entry, EntryBody, Role, SUGGESTIONS_HEADER,
};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

const CHIP_MARKER: &str = "› ";
const SPINNER_FRAMES: [&str; 4] = ["Thinking", "Thinking.", "Thinking..", "Thinking..."];

/// What a logical line is, which decides its style and whether it is clickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Body,
    Header,
    Citation,
    Chip(usize),
}

/// A stateless component that renders one transcript entry as a bordered bubble.
///
/// # Styling
///
/// - **User** (green): questions typed or picked from a chip
/// - **AI** (blue): answers, with citations in dark gray under a yellow header
/// - **Notes** (dark gray, italic): upload progress and system messages
/// - **Suggestions** (cyan): one chip per line; the highlighted chip is reversed
///
/// # Height Calculation
///
/// Lines are wrapped here with `textwrap` and handed to `Paragraph` already
/// split, so [`calculate_height`](Self::calculate_height) and the rendered
/// output always agree. Chip hit testing relies on the same wrapping.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub entry: &'a Entry,
    /// Index of the keyboard-highlighted chip (suggestion blocks only)
    pub highlighted_chip: Option<usize>,
    pub spinner_frame: usize,
}

impl<'a> Message<'a> {
    pub fn new(entry: &'a Entry, highlighted_chip: Option<usize>, spinner_frame: usize) -> Self {
        Self {
            entry,
            highlighted_chip,
            spinner_frame,
        }
    }

    /// Calculate the height required for this entry given a width.
    pub fn calculate_height(entry: &Entry, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }
        let rows: usize = logical_lines(entry, 0)
            .iter()
            .map(|(text, _)| wrap(text, content_width).len())
            .sum();
        (rows as u16).max(1) + VERTICAL_OVERHEAD
    }

    /// Which chip sits at `row`, counted from the top edge of the bubble.
    pub fn chip_at(entry: &Entry, width: u16, row: u16) -> Option<usize> {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 || row == 0 {
            return None;
        }
        let target = (row - 1) as usize;
        let mut top = 0usize;
        for (text, kind) in logical_lines(entry, 0) {
            let height = wrap(&text, content_width).len();
            if target < top + height {
                return match kind {
                    LineKind::Chip(index) => Some(index),
                    _ => None,
                };
            }
            top += height;
        }
        None
    }

    fn role_title(&self) -> &'static str {
        match (&self.entry.body, self.entry.role) {
            (EntryBody::Note(_) | EntryBody::Custom(_), _) => "docchat",
            (_, Role::User) => "you",
            (_, Role::Ai) => "assistant",
        }
    }

    fn base_style(&self) -> Style {
        match (&self.entry.body, self.entry.role) {
            (EntryBody::Note(_) | EntryBody::Loading, _) => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            (EntryBody::Custom(_), _) => Style::default().fg(Color::Cyan),
            (_, Role::User) => Style::default().fg(Color::Green),
            (_, Role::Ai) => Style::default().fg(Color::Blue),
        }
    }

    fn line_style(&self, kind: LineKind) -> Style {
        match kind {
            LineKind::Body => self.base_style(),
            LineKind::Header => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            LineKind::Citation => Style::default().fg(Color::DarkGray),
            LineKind::Chip(index) if self.highlighted_chip == Some(index) => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::REVERSED),
            LineKind::Chip(_) => Style::default().fg(Color::Cyan),
        }
    }
}

/// Flatten an entry into styled logical lines (before wrapping).
fn logical_lines(entry: &Entry, spinner_frame: usize) -> Vec<(String, LineKind)> {
    let mut lines = Vec::new();
    match &entry.body {
        EntryBody::Message { text, citations } => {
            push_text(&mut lines, text);
            if !citations.is_empty() {
                lines.push((CITATIONS_HEADER.to_string(), LineKind::Header));
                lines.extend(citations.iter().map(|c| (c.clone(), LineKind::Citation)));
            }
        }
        EntryBody::Note(text) => push_text(&mut lines, text),
        EntryBody::Custom(CustomContent::Suggestions(labels)) => {
            lines.push((SUGGESTIONS_HEADER.to_string(), LineKind::Header));
            lines.extend(
                labels
                    .iter()
                    .enumerate()
                    .map(|(i, label)| (format!("{CHIP_MARKER}{label}"), LineKind::Chip(i))),
            );
        }
        EntryBody::Loading => {
            let frame = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
            lines.push((frame.to_string(), LineKind::Body));
        }
    }
    lines
}

fn push_text(lines: &mut Vec<(String, LineKind)>, text: &str) {
    let text = text.trim_end();
    if text.is_empty() {
        lines.push((String::new(), LineKind::Body));
        return;
    }
    lines.extend(text.lines().map(|l| (l.to_string(), LineKind::Body)));
}

fn wrap(text: &str, width: u16) -> Vec<String> {
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let rows: Vec<String> = textwrap::wrap(text, options)
        .into_iter()
        .map(|row| row.into_owned())
        .collect();
    if rows.is_empty() {
        vec![String::new()]
    } else {
        rows
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = self.base_style().add_modifier(Modifier::DIM);
        let block = Block::bordered()
            .title(self.role_title())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let content_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD).max(1);
        let rendered: Vec<Line> = logical_lines(self.entry, self.spinner_frame)
            .into_iter()
            .flat_map(|(text, kind)| {
                let style = self.line_style(kind);
                wrap(&text, content_width)
                    .into_iter()
                    .map(move |row| Line::styled(row, style))
            })
            .collect();

        Paragraph::new(rendered).render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
