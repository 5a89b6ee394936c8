//! # TitleBar Component
//!
//! Top status line: backend address, the current status message, and a
//! "↓ New" marker when the transcript has content below the viewport.
//!
//! The text changes based on state:
//!
//! 1. **Unseen content**: `"docchat @ http://127.0.0.1:8000 | Waiting for answer... | ↓ New"`
//! 2. **Status message**: `"docchat @ http://127.0.0.1:8000 | Waiting for answer..."`
//! 3. **Default**: `"docchat @ http://127.0.0.1:8000"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Top status bar. All fields are props supplied by the parent each frame.
pub struct TitleBar<'a> {
    pub backend_url: &'a str,
    pub status_message: &'a str,
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(backend_url: &'a str, status_message: &'a str, has_unseen_content: bool) -> Self {
        Self {
            backend_url,
            status_message,
            has_unseen_content,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("docchat @ {}", self.backend_url);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(self.status_message);
        }
        if self.has_unseen_content {
            text.push_str(" | ↓ New");
        }
        text
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(self.text(), Style::default().fg(Color::Gray)));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(title_bar: &mut TitleBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_with_unseen_content() {
        let text = draw(&mut TitleBar::new("http://h:8000", "Waiting for answer...", true));
        assert!(text.contains("docchat @ http://h:8000"));
        assert!(text.contains("Waiting for answer..."));
        assert!(text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let text = draw(&mut TitleBar::new("http://h:8000", "", false));
        assert!(text.contains("http://h:8000"));
        assert!(!text.contains('|'));
        assert!(!text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_shows_load_failure() {
        let text = draw(&mut TitleBar::new(
            "http://h:8000",
            "Could not load files: connection refused",
            false,
        ));
        assert!(text.contains("Could not load files: connection refused"));
    }
}
