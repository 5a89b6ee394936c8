//! # FilePanel Component
//!
//! Left-hand document list. Each uploaded file shows as
//!
//! ```text
//! 📄 report.pdf   1.2 KB ↗
//!    http://host/raw_files/report.pdf
//! ```
//!
//! Placeholders ("No files uploaded.", "Deleting...") show as one dim line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, Padding};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::file_list::{FileListView, FileRow};
use crate::gateway::FileEntry;
use crate::tui::component::Component;

/// Preferred panel width in columns, borders included.
pub const PANEL_WIDTH: u16 = 32;

const FILE_ICON: &str = "📄 ";
const LINK_MARKER: &str = " ↗";
const URL_INDENT: &str = "   ";
const ELLIPSIS: char = '…';

/// Truncate `text` to at most `max` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let budget = max - 1; // room for the ellipsis
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

pub struct FilePanel<'a> {
    pub files: &'a FileListView,
}

impl<'a> FilePanel<'a> {
    pub fn new(files: &'a FileListView) -> Self {
        Self { files }
    }

    fn file_item(entry: &FileEntry, inner_width: usize) -> ListItem<'static> {
        let badge = entry
            .size
            .as_deref()
            .map(|size| format!(" {size}"))
            .unwrap_or_default();
        let link = if entry.url.is_some() { LINK_MARKER } else { "" };
        let reserved = FILE_ICON.width() + badge.width() + link.width();
        let name = truncate_to_width(&entry.name, inner_width.saturating_sub(reserved));

        let mut lines = vec![Line::from(vec![
            Span::raw(FILE_ICON),
            Span::styled(name, Style::default().fg(Color::White)),
            Span::styled(badge, Style::default().fg(Color::DarkGray)),
            Span::styled(link, Style::default().fg(Color::Cyan)),
        ])];
        if let Some(url) = entry.url.as_deref() {
            let url = truncate_to_width(url, inner_width.saturating_sub(URL_INDENT.width()));
            lines.push(Line::from(vec![
                Span::raw(URL_INDENT),
                Span::styled(
                    url,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
        ListItem::new(lines)
    }
}

impl<'a> Component for FilePanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Documents ({}) ", self.files.file_count()))
            .title_bottom(Line::from(" ^U upload · ^D reset ").centered())
            .padding(Padding::horizontal(1));
        let inner_width = block.inner(area).width as usize;

        let items: Vec<ListItem> = self
            .files
            .rows()
            .iter()
            .map(|row| match row {
                FileRow::File(entry) => Self::file_item(entry, inner_width),
                FileRow::Placeholder(text) => ListItem::new(Line::styled(
                    *text,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )),
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
