//! Local note source backed by a static JSON export.
//!
//! The export maps folder names to arrays of note strings, the file format
//! used by static deployments of the notes page. All operations answer from
//! memory; pagination cursors encode plain offsets.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rand::Rng;

use crate::notes::error::SourceError;
use crate::notes::models::{Folder, Note, NotesPage};

/// In-memory note source.
///
/// Folders are kept in name order so pagination is stable across requests.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    /// All notes, grouped by folder in folder-name order
    notes: Vec<Note>,
    /// All folder names, sorted
    folders: Vec<Folder>,
}

impl LocalStore {
    /// Load a store from a JSON export file.
    ///
    /// # Arguments
    /// * `path` - Path to a file containing `{ "folder": ["note", ...] }`
    ///
    /// # Returns
    /// * `Result<LocalStore, SourceError>` - Loaded store or error
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path)?;
        let map: BTreeMap<String, Vec<String>> = serde_json::from_str(&content)
            .map_err(|e| SourceError::Shape(format!("invalid notes file: {}", e)))?;
        Ok(Self::from_map(map))
    }

    /// Build a store from an in-memory folder map.
    ///
    /// # Arguments
    /// * `map` - Folder name to note texts, iterated in name order
    pub fn from_map(map: BTreeMap<String, Vec<String>>) -> Self {
        let mut notes = Vec::new();
        let mut folders = Vec::new();
        for (folder, texts) in map {
            for text in texts {
                notes.push(Note::new(text, folder.clone(), None));
            }
            folders.push(Folder { name: folder });
        }
        Self { notes, folders }
    }

    /// Total number of notes in the store.
    #[allow(dead_code)] // Useful for displaying collection statistics
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// True when the store holds no notes.
    #[allow(dead_code)] // Companion to len()
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// List folders whose name contains `filter`.
    ///
    /// # Arguments
    /// * `filter` - Case-insensitive substring; empty matches all folders
    pub fn folders(&self, filter: &str) -> Vec<Folder> {
        let needle = filter.trim().to_lowercase();
        self.folders
            .iter()
            .filter(|folder| needle.is_empty() || folder.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Fetch one page of the full note listing.
    ///
    /// # Arguments
    /// * `limit` - Notes per page (values below 1 are clamped to 1)
    /// * `cursor` - Opaque cursor from a previous page, or None for page one
    ///
    /// # Returns
    /// * `Result<NotesPage, SourceError>` - Page with next/prev cursors set
    ///   only where a neighboring page exists
    pub fn page(&self, limit: u64, cursor: Option<&str>) -> Result<NotesPage, SourceError> {
        let offset = parse_cursor(cursor)?;
        let limit = limit.max(1) as usize;
        let total = self.notes.len();
        let end = offset.saturating_add(limit).min(total);

        let items = if offset < total {
            self.notes[offset..end].to_vec()
        } else {
            Vec::new()
        };

        let next = (end < total).then(|| format!("offset={}", end));
        let prev = (offset > 0).then(|| format!("offset={}", offset.saturating_sub(limit)));

        Ok(NotesPage {
            items,
            total_count: total as u64,
            next,
            prev,
        })
    }

    /// Free-text search over note content.
    ///
    /// # Arguments
    /// * `query` - Case-insensitive substring to match
    /// * `folder` - Restrict matches to this folder when set
    pub fn search(&self, query: &str, folder: Option<&str>) -> Vec<Note> {
        let needle = query.to_lowercase();
        self.notes
            .iter()
            .filter(|note| folder.is_none_or(|name| note.folder == name))
            .filter(|note| note.content.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// All notes of one folder, in stored order.
    pub fn notes_in_folder(&self, folder: &str) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|note| note.folder == folder)
            .cloned()
            .collect()
    }

    /// Pick one uniformly random note.
    ///
    /// # Arguments
    /// * `rng` - Random source; tests pass a seeded `StdRng` for
    ///   deterministic selection
    ///
    /// # Returns
    /// * `Option<Note>` - None when the store is empty
    pub fn pick_random<R: Rng>(&self, rng: &mut R) -> Option<Note> {
        if self.notes.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.notes.len());
        self.notes.get(index).cloned()
    }
}

/// Decode an offset cursor.
fn parse_cursor(cursor: Option<&str>) -> Result<usize, SourceError> {
    match cursor {
        None => Ok(0),
        Some(raw) => raw
            .strip_prefix("offset=")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| SourceError::Shape(format!("bad page cursor: {}", raw))),
    }
}
