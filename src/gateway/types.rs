use serde::{Deserialize, Serialize};

/// One uploaded document as known to the UI.
///
/// Identity is `name`. Entries are never patched in place: the file list is
/// always replaced wholesale from a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub size: Option<String>,
    /// Absolute link to the stored document, when the backend exposes one.
    pub url: Option<String>,
}

impl FileEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            url: None,
        }
    }
}

/// A source passage backing an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    #[serde(default)]
    pub page: Option<u32>,
    pub content: String,
}

/// Successful `/ask` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Answer {
    pub answer: String,
    #[serde(default)]
    pub citations: Option<Vec<Citation>>,
}

/// Successful `/ingest` payload. The backend also reports the stored name and
/// chunk count; the UI only consumes the suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}

/// A document read from local storage, ready to be sent as multipart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn mime_type(&self) -> &'static str {
        if self.name.to_ascii_lowercase().ends_with(".pdf") {
            "application/pdf"
        } else {
            "application/octet-stream"
        }
    }
}

// ============================================================================
// Wire Shapes
// ============================================================================

/// `/files` entries arrive either as a bare name (legacy) or as an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireFileEntry {
    Name(String),
    Entry {
        name: String,
        #[serde(default)]
        size: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl From<WireFileEntry> for FileEntry {
    fn from(wire: WireFileEntry) -> Self {
        match wire {
            WireFileEntry::Name(name) => FileEntry::named(name),
            WireFileEntry::Entry { name, size, url } => FileEntry { name, size, url },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileListResponse {
    #[serde(default)]
    pub files: Vec<WireFileEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AskRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_and_object_normalize_to_same_shape() {
        let json = r#"{"files": ["a.pdf", {"name": "b.pdf", "size": "1.2 MB", "url": "/raw_files/b.pdf"}, {"name": "c.pdf"}]}"#;
        let parsed: FileListResponse = serde_json::from_str(json).unwrap();
        let entries: Vec<FileEntry> = parsed.files.into_iter().map(FileEntry::from).collect();

        assert_eq!(entries[0], FileEntry::named("a.pdf"));
        assert_eq!(entries[1].name, "b.pdf");
        assert_eq!(entries[1].size.as_deref(), Some("1.2 MB"));
        assert_eq!(entries[1].url.as_deref(), Some("/raw_files/b.pdf"));
        assert_eq!(entries[2], FileEntry::named("c.pdf"));
    }

    #[test]
    fn missing_files_key_is_empty_list() {
        let parsed: FileListResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.files.is_empty());
    }

    #[test]
    fn answer_tolerates_null_page_and_missing_citations() {
        let with_null: Answer = serde_json::from_str(
            r#"{"answer": "yes", "citations": [{"source": "a.pdf", "page": null, "content": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(with_null.citations.unwrap()[0].page, None);

        let bare: Answer = serde_json::from_str(r#"{"answer": "no"}"#).unwrap();
        assert!(bare.citations.is_none());
    }

    #[test]
    fn upload_receipt_ignores_extra_fields() {
        let receipt: UploadReceipt = serde_json::from_str(
            r#"{"filename": "a.pdf", "status": "indexed", "chunks_count": 4, "suggestions": ["1. Why?"]}"#,
        )
        .unwrap();
        assert_eq!(receipt.suggestions, Some(vec!["1. Why?".to_string()]));
    }

    #[test]
    fn mime_type_follows_extension() {
        let pdf = UploadFile { name: "Notes.PDF".into(), bytes: vec![] };
        let txt = UploadFile { name: "notes.txt".into(), bytes: vec![] };
        assert_eq!(pdf.mime_type(), "application/pdf");
        assert_eq!(txt.mime_type(), "application/octet-stream");
    }
}
