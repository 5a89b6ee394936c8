//! # File List
//!
//! View model of the document panel. The view is always rebuilt wholesale
//! from a snapshot, so it can never drift from the last one received.

use crate::gateway::FileEntry;

pub const EMPTY_PLACEHOLDER: &str = "No files uploaded.";
pub const DELETING_PLACEHOLDER: &str = "Deleting...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRow {
    File(FileEntry),
    /// Italic informational row standing in for the list.
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListView {
    rows: Vec<FileRow>,
    /// Rows hidden by `show_deleting`, until a snapshot or a restore settles them.
    before_delete: Option<Vec<FileRow>>,
}

impl Default for FileListView {
    fn default() -> Self {
        Self::new()
    }
}

impl FileListView {
    /// Starts out as the empty list.
    pub fn new() -> Self {
        let mut view = Self {
            rows: Vec::new(),
            before_delete: None,
        };
        view.render(&[]);
        view
    }

    /// Clears the view and rebuilds it from `snapshot`, in server order.
    pub fn render(&mut self, snapshot: &[FileEntry]) {
        self.before_delete = None;
        self.rows.clear();
        if snapshot.is_empty() {
            self.rows.push(FileRow::Placeholder(EMPTY_PLACEHOLDER));
            return;
        }
        self.rows
            .extend(snapshot.iter().cloned().map(FileRow::File));
    }

    /// Optimistic "Deleting..." row shown while a reset is in flight.
    pub fn show_deleting(&mut self) {
        let previous = std::mem::replace(
            &mut self.rows,
            vec![FileRow::Placeholder(DELETING_PLACEHOLDER)],
        );
        // A second reset keeps the rows from before the first one
        self.before_delete.get_or_insert(previous);
    }

    /// Undo `show_deleting`. Returns false if nothing was pending.
    pub fn restore_before_delete(&mut self) -> bool {
        match self.before_delete.take() {
            Some(rows) => {
                self.rows = rows;
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> &[FileRow] {
        &self.rows
    }

    /// Number of real documents currently shown.
    pub fn file_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, FileRow::File(_)))
            .count()
    }
}
