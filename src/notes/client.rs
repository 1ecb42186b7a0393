//! Remote notes API client.
//!
//! Implements the REST contract of the notes-and-quotes server: folder
//! listing and search, paged note browsing, free-text note search and
//! random-note selection.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::notes::error::SourceError;
use crate::notes::models::{
    ApiNote, DataEnvelope, Folder, FolderDetail, Note, NotesPage, PagedEnvelope, cursor_from_url,
};

/// HTTP client for the remote notes API.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the notes API, without trailing slash
    base_url: String,
}

impl RemoteClient {
    /// Create a new client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `Result<RemoteClient>` - New client or error
    pub fn new(config: &Config) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "Notes API base URL is required. Please set it in config.jsonc"
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// List folders, optionally narrowed by a name filter.
    ///
    /// # Arguments
    /// * `filter` - Case-insensitive substring; empty lists all folders
    ///
    /// # Details
    /// An empty filter hits `GET /folders/`, a non-empty one
    /// `GET /folders/search/?q=`.
    pub async fn folders(&self, filter: &str) -> Result<Vec<Folder>, SourceError> {
        let filter = filter.trim();
        let envelope: DataEnvelope<Vec<Folder>> = if filter.is_empty() {
            self.get_json("/folders/", &[]).await?
        } else {
            self.get_json("/folders/search/", &[("q", filter)]).await?
        };
        Ok(envelope.data)
    }

    /// Fetch one page of the full note listing.
    ///
    /// # Arguments
    /// * `limit` - Page size requested from the server
    /// * `cursor` - Path + query cursor from a previous page, or None for
    ///   the first page
    ///
    /// # Details
    /// The server reports neighboring pages as absolute URLs; they are
    /// reduced to path + query cursors so they can be replayed against the
    /// configured base URL.
    pub async fn notes_page(
        &self,
        limit: u64,
        cursor: Option<&str>,
    ) -> Result<NotesPage, SourceError> {
        let limit = limit.to_string();
        let envelope: PagedEnvelope = match cursor {
            Some(cursor) => self.get_json(cursor, &[]).await?,
            None => self.get_json("/notes/", &[("limit", limit.as_str())]).await?,
        };

        Ok(NotesPage {
            items: collect_notes(envelope.results, None),
            total_count: envelope.count,
            next: envelope.next.as_deref().and_then(cursor_from_url),
            prev: envelope.previous.as_deref().and_then(cursor_from_url),
        })
    }

    /// Free-text search over note content.
    ///
    /// # Arguments
    /// * `query` - Substring to match, matched case-insensitively server-side
    /// * `folder` - Restrict matches to this folder when set
    pub async fn search_notes(
        &self,
        query: &str,
        folder: Option<&str>,
    ) -> Result<Vec<Note>, SourceError> {
        let envelope: DataEnvelope<Vec<ApiNote>> = match folder {
            Some(folder) => {
                self.get_json("/notes/search/", &[("q", query), ("folder", folder)])
                    .await?
            }
            None => self.get_json("/notes/search/", &[("q", query)]).await?,
        };
        Ok(collect_notes(envelope.data, None))
    }

    /// All notes of one folder.
    ///
    /// # Arguments
    /// * `folder` - Folder name
    ///
    /// # Details
    /// Uses the dedicated `GET /folders/{name}` endpoint; the response names
    /// the folder once at the top level, so that name is applied to every
    /// note of the detail payload.
    pub async fn notes_in_folder(&self, folder: &str) -> Result<Vec<Note>, SourceError> {
        let path = format!("/folders/{}", encode_path_segment(folder));
        let envelope: DataEnvelope<FolderDetail> = self.get_json(&path, &[]).await?;
        let folder_name = envelope.data.folder_name;
        Ok(collect_notes(envelope.data.notes, Some(&folder_name)))
    }

    /// Fetch one uniformly random note.
    ///
    /// # Returns
    /// * `Result<Option<Note>, SourceError>` - None when the collection is
    ///   empty
    pub async fn random_note(&self) -> Result<Option<Note>, SourceError> {
        let envelope: DataEnvelope<Option<ApiNote>> = self.get_json("/notes/random/", &[]).await?;
        match envelope.data {
            Some(api_note) => Ok(Some(api_note.into_note(None)?)),
            None => Ok(None),
        }
    }

    /// Issue a GET request and decode the JSON response.
    ///
    /// # Arguments
    /// * `path` - Path (and optionally query) below the base URL
    /// * `params` - Extra query parameters
    ///
    /// # Details
    /// Non-2xx responses become [`SourceError::Status`]; a 2xx body that
    /// fails to decode becomes [`SourceError::Shape`].
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status { status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::Shape(e.to_string()))
    }
}

/// Convert API notes, skipping malformed entries.
fn collect_notes(api_notes: Vec<ApiNote>, fallback_folder: Option<&str>) -> Vec<Note> {
    let mut notes = Vec::new();
    for api_note in api_notes {
        match api_note.into_note(fallback_folder) {
            Ok(note) => notes.push(note),
            Err(e) => {
                eprintln!("Skipping malformed note: {}", e);
                // Continue with other notes
            }
        }
    }
    notes
}

/// Percent-encode one path segment.
///
/// Folder names may carry spaces and URL-delimiting characters; everything
/// outside the unreserved set is encoded.
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_client_new_requires_base_url() {
        let config = Config {
            base_url: String::new(),
            ..Config::default()
        };
        assert!(RemoteClient::new(&config).is_err());
    }

    #[test]
    fn test_client_new_strips_trailing_slash() {
        let config = Config {
            base_url: "https://notes.example/".to_string(),
            ..Config::default()
        };
        let client = RemoteClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://notes.example");
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("quotes"), "quotes");
        assert_eq!(encode_path_segment("Work Notes"), "Work%20Notes");
        assert_eq!(encode_path_segment("a/b?c"), "a%2Fb%3Fc");
    }

    #[test]
    fn test_collect_notes_skips_malformed_entries() {
        let api_notes: Vec<ApiNote> = serde_json::from_str(
            r#"[
                {"title": "keep me", "folder": "f"},
                {"folder": "no text at all"},
                {"body": "keep me too"}
            ]"#,
        )
        .unwrap();
        let notes = collect_notes(api_notes, Some("fallback"));
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].content, "keep me");
        assert_eq!(notes[1].folder, "fallback");
    }
}
