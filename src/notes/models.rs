//! Notes API models and data structures.
//!
//! Contains the client-side note and folder types plus the response
//! envelopes of the notes-and-quotes REST API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::notes::error::SourceError;

/// A single note as displayed by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Note text
    pub content: String,
    /// Name of the folder the note belongs to
    pub folder: String,
    /// Last modification time, when the source supplies one
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Create a new Note instance.
    ///
    /// # Arguments
    /// * `content` - Note text
    /// * `folder` - Folder name
    /// * `updated_at` - Optional last modification time
    pub fn new(content: String, folder: String, updated_at: Option<DateTime<Utc>>) -> Self {
        Self {
            content,
            folder,
            updated_at,
        }
    }

    /// First line of the note content with control characters replaced.
    ///
    /// # Returns
    /// * `String` - Single displayable line, safe for terminal output
    ///
    /// # Details
    /// Upstream data is never trusted as pre-sanitized: tabs, escape
    /// sequences and other control characters are replaced by spaces so a
    /// note cannot disturb the terminal.
    pub fn headline(&self) -> String {
        self.content
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect()
    }

    /// Format the modification date as a readable string.
    ///
    /// # Returns
    /// * `Option<String>` - Formatted date (e.g., "Mo. 15.01.2024"), if known
    pub fn format_updated(&self) -> Option<String> {
        self.updated_at
            .map(|date| date.format("%a. %d.%m.%Y").to_string())
    }
}

/// A named grouping of notes. The API's folder id equals its name.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Folder {
    /// Folder name
    pub name: String,
}

/// One page of a cursor-paginated note listing.
#[derive(Debug, Clone, Default)]
pub struct NotesPage {
    /// Notes on this page
    pub items: Vec<Note>,
    /// Total number of notes across all pages
    pub total_count: u64,
    /// Opaque cursor locating the next page, if any
    pub next: Option<String>,
    /// Opaque cursor locating the previous page, if any
    pub prev: Option<String>,
}

/// Generic `{ "data": ... }` response wrapper.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    /// Wrapped payload
    pub data: T,
}

/// Paged response of `GET /notes/`.
#[derive(Debug, Deserialize)]
pub struct PagedEnvelope {
    /// Notes on this page
    pub results: Vec<ApiNote>,
    /// Total note count
    pub count: u64,
    /// Absolute URL of the next page, if any
    pub next: Option<String>,
    /// Absolute URL of the previous page, if any
    pub previous: Option<String>,
}

/// Payload of `GET /folders/{name}`.
#[derive(Debug, Deserialize)]
pub struct FolderDetail {
    /// Name of the folder
    pub folder_name: String,
    /// Notes contained in the folder
    #[serde(default)]
    pub notes: Vec<ApiNote>,
}

/// A note as the API serializes it.
///
/// Deployments disagree on which field carries the note text (`title`,
/// `content` or `body`) and on the folder field name (`folder` or
/// `notebook_name`); every variant is accepted here and resolved into the
/// canonical [`Note`] by [`ApiNote::into_note`].
#[derive(Debug, Deserialize)]
pub struct ApiNote {
    /// Primary text carrier
    pub title: Option<String>,
    /// First fallback text carrier
    pub content: Option<String>,
    /// Second fallback text carrier
    pub body: Option<String>,
    /// Folder name
    pub folder: Option<String>,
    /// Legacy folder field name
    pub notebook_name: Option<String>,
    /// Last modification time, RFC 3339
    pub updated_at: Option<String>,
}

impl ApiNote {
    /// Resolve the API note into the canonical client-side [`Note`].
    ///
    /// # Arguments
    /// * `fallback_folder` - Folder name to use when the note itself names
    ///   none (folder-detail responses name the folder once at the top level)
    ///
    /// # Returns
    /// * `Result<Note, SourceError>` - Canonical note, or a shape error when
    ///   no field carries any text
    ///
    /// # Details
    /// Text resolution order is `title`, then `content`, then `body`; the
    /// first non-blank field wins. Folder resolution order is `folder`, then
    /// `notebook_name`, then the supplied fallback.
    pub fn into_note(self, fallback_folder: Option<&str>) -> Result<Note, SourceError> {
        let content = [self.title, self.content, self.body]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
            .ok_or_else(|| SourceError::Shape("note carries no text field".to_string()))?;

        let folder = self
            .folder
            .or(self.notebook_name)
            .filter(|name| !name.is_empty())
            .or_else(|| fallback_folder.map(str::to_string))
            .unwrap_or_default();

        let updated_at = self
            .updated_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|date| date.with_timezone(&Utc));

        Ok(Note::new(content, folder, updated_at))
    }
}

/// Reduce an absolute pagination URL to its path + query form.
///
/// # Arguments
/// * `url` - Absolute or already-relative URL from a paged response
///
/// # Returns
/// * `Option<String>` - Cursor usable against the configured base URL
pub fn cursor_from_url(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }
    let Some((_, rest)) = url.split_once("://") else {
        // Already relative
        return Some(url.to_string());
    };
    match rest.find('/') {
        Some(idx) => Some(rest[idx..].to_string()),
        None => Some("/".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_note_prefers_title() {
        let api_note: ApiNote = serde_json::from_str(
            r#"{"title": "a quote", "content": "ignored", "notebook_name": "quotes"}"#,
        )
        .unwrap();
        let note = api_note.into_note(None).unwrap();
        assert_eq!(note.content, "a quote");
        assert_eq!(note.folder, "quotes");
    }

    #[test]
    fn test_into_note_falls_back_to_body() {
        let api_note: ApiNote =
            serde_json::from_str(r#"{"title": "  ", "body": "fallback text", "folder": "misc"}"#)
                .unwrap();
        let note = api_note.into_note(None).unwrap();
        assert_eq!(note.content, "fallback text");
        assert_eq!(note.folder, "misc");
    }

    #[test]
    fn test_into_note_without_text_is_shape_error() {
        let api_note: ApiNote = serde_json::from_str(r#"{"folder": "empty"}"#).unwrap();
        assert!(api_note.into_note(None).is_err());
    }

    #[test]
    fn test_into_note_uses_fallback_folder() {
        let api_note: ApiNote = serde_json::from_str(r#"{"title": "text"}"#).unwrap();
        let note = api_note.into_note(Some("inbox")).unwrap();
        assert_eq!(note.folder, "inbox");
    }

    #[test]
    fn test_into_note_parses_updated_at() {
        let api_note: ApiNote = serde_json::from_str(
            r#"{"title": "text", "folder": "f", "updated_at": "2024-01-15T12:00:00Z"}"#,
        )
        .unwrap();
        let note = api_note.into_note(None).unwrap();
        assert_eq!(note.format_updated().unwrap(), "Mon. 15.01.2024");
    }

    #[test]
    fn test_paged_envelope_parses() {
        let envelope: PagedEnvelope = serde_json::from_str(
            r#"{
                "results": [{"title": "n1", "notebook_name": "a"}],
                "count": 120,
                "next": "https://host.example/notes/?limit=50&offset=50",
                "previous": null
            }"#,
        )
        .unwrap();
        assert_eq!(envelope.count, 120);
        assert_eq!(envelope.results.len(), 1);
        assert!(envelope.previous.is_none());
    }

    #[test]
    fn test_cursor_from_url() {
        assert_eq!(
            cursor_from_url("https://host.example/notes/?limit=50&offset=50").unwrap(),
            "/notes/?limit=50&offset=50"
        );
        assert_eq!(cursor_from_url("/notes/?offset=50").unwrap(), "/notes/?offset=50");
        assert_eq!(cursor_from_url(""), None);
        assert_eq!(cursor_from_url("https://host.example").unwrap(), "/");
    }

    #[test]
    fn test_headline_strips_control_characters() {
        let note = Note::new("first\tline\nsecond line".to_string(), "f".to_string(), None);
        assert_eq!(note.headline(), "first line");
    }
}
