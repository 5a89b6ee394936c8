//! # Application State
//!
//! Core business state for docchat. No terminal types live here;
//! presentation state (scroll offsets, cursor, overlays' widget state) is in `tui`.
//!
//! ```text
//! App
//! ├── transcript: Transcript            // conversation view model
//! ├── files: FileListView               // document panel view model
//! ├── input: String                     // question field contents
//! ├── ask: AskState                     // Idle | Sending { placeholder }
//! ├── pending_confirmation: Option<..>  // open yes/no dialog
//! ├── alert: Option<String>             // open modal alert
//! ├── status_message: String            // status bar text
//! └── backend_url: String               // shown in the title bar
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::file_list::FileListView;
use crate::core::transcript::{EntryId, Transcript};

/// The question round-trip gate. Only one question may be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskState {
    Idle,
    Sending { placeholder: EntryId },
}

/// Actions that require an explicit yes/no before anything happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    ResetAll,
}

impl Confirmation {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::ResetAll => "Are you sure you want to delete all files?",
        }
    }
}

pub struct App {
    pub transcript: Transcript,
    pub files: FileListView,
    pub input: String,
    pub ask: AskState,
    pub pending_confirmation: Option<Confirmation>,
    pub alert: Option<String>,
    pub status_message: String,
    pub backend_url: String,
}

impl App {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            transcript: Transcript::new(),
            files: FileListView::new(),
            input: String::new(),
            ask: AskState::Idle,
            pending_confirmation: None,
            alert: None,
            status_message: String::from("Welcome to docchat!"),
            backend_url: backend_url.into(),
        }
    }

    /// Whether the send control accepts a question right now.
    pub fn controls_enabled(&self) -> bool {
        self.ask == AskState::Idle
    }

    /// True while a modal (confirmation or alert) is capturing input.
    pub fn has_modal(&self) -> bool {
        self.pending_confirmation.is_some() || self.alert.is_some()
    }
}
