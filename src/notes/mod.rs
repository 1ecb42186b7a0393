//! Note data providers.
//!
//! One browsing surface over two interchangeable sources: the remote
//! notes-and-quotes REST API or a local JSON export.

pub mod client;
pub mod error;
pub mod local;
pub mod models;

pub use client::RemoteClient;
pub use error::SourceError;
pub use local::LocalStore;
pub use models::{Folder, Note, NotesPage};

/// A note data provider, selected by configuration.
#[derive(Debug, Clone)]
pub enum NoteSource {
    /// Remote REST API
    Remote(RemoteClient),
    /// Local JSON export
    Local(LocalStore),
}

impl NoteSource {
    /// List folders whose name contains `filter` (empty filter lists all).
    pub async fn folders(&self, filter: &str) -> Result<Vec<Folder>, SourceError> {
        match self {
            NoteSource::Remote(client) => client.folders(filter).await,
            NoteSource::Local(store) => Ok(store.folders(filter)),
        }
    }

    /// Fetch one page of the full note listing.
    pub async fn notes_page(
        &self,
        limit: u64,
        cursor: Option<&str>,
    ) -> Result<NotesPage, SourceError> {
        match self {
            NoteSource::Remote(client) => client.notes_page(limit, cursor).await,
            NoteSource::Local(store) => store.page(limit, cursor),
        }
    }

    /// Free-text search over note content, optionally folder-scoped.
    pub async fn search_notes(
        &self,
        query: &str,
        folder: Option<&str>,
    ) -> Result<Vec<Note>, SourceError> {
        match self {
            NoteSource::Remote(client) => client.search_notes(query, folder).await,
            NoteSource::Local(store) => Ok(store.search(query, folder)),
        }
    }

    /// All notes of one folder.
    pub async fn notes_in_folder(&self, folder: &str) -> Result<Vec<Note>, SourceError> {
        match self {
            NoteSource::Remote(client) => client.notes_in_folder(folder).await,
            NoteSource::Local(store) => Ok(store.notes_in_folder(folder)),
        }
    }

    /// Fetch one uniformly random note, or None from an empty collection.
    pub async fn random_note(&self) -> Result<Option<Note>, SourceError> {
        match self {
            NoteSource::Remote(client) => client.random_note().await,
            NoteSource::Local(store) => Ok(store.pick_random(&mut rand::thread_rng())),
        }
    }
}
