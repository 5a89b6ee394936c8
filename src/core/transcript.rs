//! # Transcript
//!
//! View model of the conversation. Entries are append-only; the loading
//! placeholder is the only entry that is ever removed.
//!
//! Every mutation bumps `revision`, which the TUI watches to re-pin the view
//! to the end of the transcript.
//!
//! Text is stored and later drawn verbatim. Nothing here interprets markup.

use crate::gateway::Citation;

/// Number of citation content characters shown before the ellipsis.
pub const CITATION_PREVIEW_CHARS: usize = 50;

pub const CITATIONS_HEADER: &str = "Reference Sources:";
pub const SUGGESTIONS_HEADER: &str = "💡 Suggested Questions:";

/// Handle to a transcript entry, used for later in-place mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Ai,
}

/// Pre-built content blocks wrapped in a standard AI bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomContent {
    /// Clickable follow-up questions, already stripped of enumeration markers.
    Suggestions(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryBody {
    Message {
        text: String,
        /// Rendered citation lines, empty when the answer had none.
        citations: Vec<String>,
    },
    /// Informational note with its own styling; text may be replaced later.
    Note(String),
    Custom(CustomContent),
    /// Animated waiting indicator.
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub role: Role,
    pub body: EntryBody,
}

#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    next_id: u64,
    revision: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Incremented on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn push(&mut self, role: Role, body: EntryBody) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, role, body });
        self.revision += 1;
        id
    }

    pub fn append_message(&mut self, role: Role, text: impl Into<String>) -> EntryId {
        self.push(
            role,
            EntryBody::Message {
                text: text.into(),
                citations: Vec::new(),
            },
        )
    }

    pub fn append_system_note(&mut self, text: impl Into<String>) -> EntryId {
        self.push(Role::Ai, EntryBody::Note(text.into()))
    }

    /// Replaces a note's text. Returns false if `id` is not a live note.
    pub fn update_note(&mut self, id: EntryId, text: impl Into<String>) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        let EntryBody::Note(current) = &mut entry.body else {
            return false;
        };
        *current = text.into();
        self.revision += 1;
        true
    }

    pub fn append_custom_content(&mut self, content: CustomContent) -> EntryId {
        self.push(Role::Ai, EntryBody::Custom(content))
    }

    pub fn append_loading_placeholder(&mut self) -> EntryId {
        self.push(Role::Ai, EntryBody::Loading)
    }

    /// Removes a loading placeholder. Any other entry kind is left alone, and a
    /// second call with the same handle is a no-op returning false.
    pub fn remove_placeholder(&mut self, id: EntryId) -> bool {
        let Some(idx) = self
            .entries
            .iter()
            .position(|e| e.id == id && e.body == EntryBody::Loading)
        else {
            return false;
        };
        self.entries.remove(idx);
        self.revision += 1;
        true
    }

    /// Attaches a citation block under an existing message.
    pub fn append_citations(&mut self, id: EntryId, citations: &[Citation]) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        let EntryBody::Message { citations: lines, .. } = &mut entry.body else {
            return false;
        };
        lines.extend(citations.iter().map(citation_line));
        self.revision += 1;
        true
    }

    pub fn placeholder_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.body == EntryBody::Loading)
            .count()
    }

    /// The newest suggestion block, if any.
    pub fn latest_suggestions(&self) -> Option<(EntryId, &[String])> {
        self.entries.iter().rev().find_map(|e| match &e.body {
            EntryBody::Custom(CustomContent::Suggestions(labels)) => Some((e.id, labels.as_slice())),
            _ => None,
        })
    }
}

/// `- [source p.page] <first 50 chars>...`
pub fn citation_line(citation: &Citation) -> String {
    let preview: String = citation
        .content
        .chars()
        .take(CITATION_PREVIEW_CHARS)
        .collect();
    match citation.page {
        Some(page) => format!("- [{} p.{}] {}...", citation.source, page, preview),
        None => format!("- [{}] {}...", citation.source, preview),
    }
}
