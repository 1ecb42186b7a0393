//! Application state management.
//!
//! Owns the view state (search query, folder scope, pagination cursors),
//! the last fetched result set, debounced input markers, and the plumbing
//! for in-flight requests.

use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use crate::notes::{Folder, Note, NoteSource, NotesPage, SourceError};

/// Input focus of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal browsing of the notes list
    Browse,
    /// Typing into the search bar
    Search,
    /// Filtering and picking a folder
    Folders,
}

/// Direction for a page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    /// Move to the next page
    Next,
    /// Move to the previous page
    Prev,
}

/// The currently displayed notes, in exactly one of two shapes.
///
/// Browse mode carries pagination cursors and a total; search mode (free
/// text, folder view, random pick) is a flat list with neither.
#[derive(Debug, Clone)]
pub enum ResultSet {
    /// Cursor-paginated browse over the whole collection
    Paged {
        /// Notes on the current page
        items: Vec<Note>,
        /// Total notes across all pages
        total_count: u64,
        /// Cursor of the next page, if any
        next: Option<String>,
        /// Cursor of the previous page, if any
        prev: Option<String>,
    },
    /// Flat, unpaginated result
    Flat {
        /// Matching notes
        items: Vec<Note>,
    },
}

impl ResultSet {
    /// Notes of the active shape.
    pub fn items(&self) -> &[Note] {
        match self {
            ResultSet::Paged { items, .. } => items,
            ResultSet::Flat { items } => items,
        }
    }

    /// True when the flat search shape is active.
    pub fn is_search(&self) -> bool {
        matches!(self, ResultSet::Flat { .. })
    }
}

/// Outcome of a completed notes fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A paged browse fetch, tagged with the page it belongs to
    Page {
        /// 1-based page number of the fetched page
        page: u64,
        /// Fetched page payload
        result: NotesPage,
    },
    /// A flat search, folder view, or random pick
    Search {
        /// Matching notes
        items: Vec<Note>,
    },
}

/// The request a spawned notes fetch performs.
#[derive(Debug, Clone)]
enum NotesRequest {
    /// One page of the full listing
    Page { cursor: Option<String>, page: u64 },
    /// Free-text search, optionally folder-scoped
    Search { query: String, folder: Option<String> },
    /// All notes of one folder
    Folder { name: String },
    /// One random note
    Random,
}

/// An in-flight notes fetch tagged with its generation.
#[derive(Debug)]
struct PendingNotes {
    seq: u64,
    handle: JoinHandle<Result<FetchOutcome, SourceError>>,
}

/// An in-flight folder-list fetch tagged with its generation.
#[derive(Debug)]
struct PendingFolders {
    seq: u64,
    handle: JoinHandle<Result<Vec<Folder>, SourceError>>,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Currently displayed notes
    pub results: ResultSet,
    /// Selected note index (into `results.items()`)
    pub selected_index: usize,
    /// Current UI mode
    pub mode: UiMode,
    /// Search query string
    pub search_query: String,
    /// Folder panel filter string
    pub folder_filter: String,
    /// Folder the view is scoped to, if any
    pub current_folder: Option<String>,
    /// 1-based page number in browse mode
    pub current_page: u64,
    /// Notes requested per page
    pub notes_per_page: u64,
    /// Folders shown in the folder panel
    pub folders: Vec<Folder>,
    /// Cursor in the folder panel (0 = "(all)")
    pub folder_cursor: usize,
    /// True while a notes fetch is outstanding
    pub loading: bool,
    /// True while a folder-list fetch is outstanding
    pub folders_loading: bool,
    /// Failure reason of the last fetch, if it failed
    pub error: Option<String>,
    /// Status message to display
    pub status_message: Option<String>,
    /// Quiescence window for text input
    debounce: Duration,
    /// When the search query last changed
    search_dirty_since: Option<Instant>,
    /// When the folder filter last changed
    folder_dirty_since: Option<Instant>,
    /// Generation of the newest notes fetch
    notes_seq: u64,
    /// Generation of the newest folder-list fetch
    folders_seq: u64,
    /// Outstanding notes fetch, if any
    pending_notes: Option<PendingNotes>,
    /// Outstanding folder-list fetch, if any
    pending_folders: Option<PendingFolders>,
}

impl App {
    /// Create a new application state.
    ///
    /// # Arguments
    /// * `notes_per_page` - Page size for browse mode
    /// * `debounce` - Quiescence window for search and folder-filter input
    pub fn new(notes_per_page: u64, debounce: Duration) -> Self {
        Self {
            results: ResultSet::Paged {
                items: Vec::new(),
                total_count: 0,
                next: None,
                prev: None,
            },
            selected_index: 0,
            mode: UiMode::Browse,
            search_query: String::new(),
            folder_filter: String::new(),
            current_folder: None,
            current_page: 1,
            notes_per_page,
            folders: Vec::new(),
            folder_cursor: 0,
            loading: false,
            folders_loading: false,
            error: None,
            status_message: None,
            debounce,
            search_dirty_since: None,
            folder_dirty_since: None,
            notes_seq: 0,
            folders_seq: 0,
            pending_notes: None,
            pending_folders: None,
        }
    }

    /// Reset view state and kick off the initial fetches.
    ///
    /// # Details
    /// Clears query and folder scope, then requests the folder list and the
    /// first page of notes. Failures surface through the error panel; this
    /// never retries.
    pub fn initialize(&mut self, source: &NoteSource) {
        self.search_query.clear();
        self.folder_filter.clear();
        self.current_folder = None;
        self.folder_cursor = 0;
        self.refresh_folders(source);
        self.start_notes(
            source,
            NotesRequest::Page {
                cursor: None,
                page: 1,
            },
        );
    }

    /// Run the search decision tree for the current query and folder scope.
    ///
    /// # Details
    /// - query and folder both empty: paged browse of everything
    /// - folder set, query empty: direct folder view
    /// - query set: flat search, folder-scoped when a folder is set
    pub fn submit_search(&mut self, source: &NoteSource) {
        self.search_dirty_since = None;
        let query = self.search_query.trim().to_string();

        if query.is_empty() {
            match self.current_folder.clone() {
                None => self.start_notes(
                    source,
                    NotesRequest::Page {
                        cursor: None,
                        page: 1,
                    },
                ),
                Some(folder) => self.start_notes(source, NotesRequest::Folder { name: folder }),
            }
        } else {
            self.start_notes(
                source,
                NotesRequest::Search {
                    query,
                    folder: self.current_folder.clone(),
                },
            );
        }
    }

    /// Follow a pagination cursor.
    ///
    /// # Details
    /// No-op in search mode and at the ends of the listing (the cursor for
    /// the requested direction is absent on page one and on the last page).
    /// The page counter travels with the fetch and only advances when the
    /// fetch succeeds.
    pub fn change_page(&mut self, direction: PageDirection, source: &NoteSource) {
        let ResultSet::Paged { next, prev, .. } = &self.results else {
            return; // pagination is disabled in search mode
        };

        let cursor = match direction {
            PageDirection::Next => next.clone(),
            PageDirection::Prev => prev.clone(),
        };
        let Some(cursor) = cursor else {
            return;
        };

        let page = match direction {
            PageDirection::Next => self.current_page + 1,
            PageDirection::Prev => self.current_page.saturating_sub(1).max(1),
        };
        self.start_notes(
            source,
            NotesRequest::Page {
                cursor: Some(cursor),
                page,
            },
        );
    }

    /// Fetch one random note and display it as a single-item result.
    pub fn random_note(&mut self, source: &NoteSource) {
        self.start_notes(source, NotesRequest::Random);
    }

    /// Drop query and folder scope and return to paged browsing.
    pub fn clear_filters(&mut self, source: &NoteSource) {
        self.search_query.clear();
        self.current_folder = None;
        self.folder_cursor = 0;
        self.submit_search(source);
    }

    /// Re-fetch the folder list for the current folder filter.
    pub fn refresh_folders(&mut self, source: &NoteSource) {
        self.folder_dirty_since = None;
        if let Some(pending) = self.pending_folders.take() {
            pending.handle.abort();
        }
        self.folders_seq += 1;
        let seq = self.folders_seq;
        let source = source.clone();
        let filter = self.folder_filter.trim().to_string();
        let handle = tokio::spawn(async move { source.folders(&filter).await });
        self.pending_folders = Some(PendingFolders { seq, handle });
        self.folders_loading = true;
    }

    /// Spawn a notes fetch, superseding any outstanding one.
    ///
    /// # Details
    /// The previous task is aborted and the generation counter advances, so
    /// a completion from a superseded request can never be rendered.
    fn start_notes(&mut self, source: &NoteSource, request: NotesRequest) {
        if let Some(pending) = self.pending_notes.take() {
            pending.handle.abort();
        }
        self.notes_seq += 1;
        let seq = self.notes_seq;
        let source = source.clone();
        let per_page = self.notes_per_page;
        let handle = tokio::spawn(async move { run_notes_request(source, request, per_page).await });
        self.pending_notes = Some(PendingNotes { seq, handle });
        self.loading = true;
    }

    /// Harvest completed fetch tasks, discarding stale generations.
    ///
    /// # Details
    /// Called on every event-loop tick. Only finished tasks are awaited, so
    /// this never blocks the UI.
    pub async fn poll_fetches(&mut self) {
        if self
            .pending_notes
            .as_ref()
            .is_some_and(|p| p.handle.is_finished())
            && let Some(pending) = self.pending_notes.take()
        {
            match pending.handle.await {
                Ok(outcome) => self.apply_notes(pending.seq, outcome),
                Err(e) if !e.is_cancelled() => {
                    self.loading = false;
                    self.error = Some(format!("fetch task failed: {}", e));
                }
                Err(_) => {}
            }
        }

        if self
            .pending_folders
            .as_ref()
            .is_some_and(|p| p.handle.is_finished())
            && let Some(pending) = self.pending_folders.take()
        {
            match pending.handle.await {
                Ok(outcome) => self.apply_folders(pending.seq, outcome),
                Err(e) if !e.is_cancelled() => {
                    self.folders_loading = false;
                    self.error = Some(format!("fetch task failed: {}", e));
                }
                Err(_) => {}
            }
        }
    }

    /// Install a completed notes fetch, unless a newer request superseded it.
    ///
    /// # Details
    /// On failure the previous result set stays on screen; only the error
    /// line changes.
    fn apply_notes(&mut self, seq: u64, outcome: Result<FetchOutcome, SourceError>) {
        if seq != self.notes_seq {
            return; // stale response from a superseded request
        }
        self.loading = false;
        match outcome {
            Ok(FetchOutcome::Page { page, result }) => {
                self.error = None;
                self.status_message = None;
                self.current_page = page;
                self.selected_index = 0;
                self.results = ResultSet::Paged {
                    items: result.items,
                    total_count: result.total_count,
                    next: result.next,
                    prev: result.prev,
                };
            }
            Ok(FetchOutcome::Search { items }) => {
                self.error = None;
                self.status_message = None;
                self.selected_index = 0;
                self.results = ResultSet::Flat { items };
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    /// Install a completed folder-list fetch, unless superseded.
    fn apply_folders(&mut self, seq: u64, outcome: Result<Vec<Folder>, SourceError>) {
        if seq != self.folders_seq {
            return;
        }
        self.folders_loading = false;
        match outcome {
            Ok(folders) => {
                self.folders = folders;
                self.folder_cursor = self.folder_cursor.min(self.folder_entry_count() - 1);
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    /// Add a character to the search query.
    ///
    /// # Details
    /// Only works in Search mode. Restarts the debounce window.
    pub fn add_search_char(&mut self, ch: char) {
        if self.mode == UiMode::Search {
            self.search_query.push(ch);
            self.search_dirty_since = Some(Instant::now());
        }
    }

    /// Remove last character from search query.
    ///
    /// # Details
    /// Only works in Search mode. Restarts the debounce window.
    pub fn remove_search_char(&mut self) {
        if self.mode == UiMode::Search && self.search_query.pop().is_some() {
            self.search_dirty_since = Some(Instant::now());
        }
    }

    /// Add a character to the folder filter.
    pub fn add_folder_char(&mut self, ch: char) {
        if self.mode == UiMode::Folders {
            self.folder_filter.push(ch);
            self.folder_dirty_since = Some(Instant::now());
        }
    }

    /// Remove last character from the folder filter.
    pub fn remove_folder_char(&mut self) {
        if self.mode == UiMode::Folders && self.folder_filter.pop().is_some() {
            self.folder_dirty_since = Some(Instant::now());
        }
    }

    /// Check (and consume) an expired search debounce window.
    ///
    /// # Returns
    /// * `bool` - True once per burst of keystrokes, after the quiescence
    ///   window elapsed
    pub fn search_debounce_expired(&mut self) -> bool {
        if self
            .search_dirty_since
            .is_some_and(|since| since.elapsed() >= self.debounce)
        {
            self.search_dirty_since = None;
            true
        } else {
            false
        }
    }

    /// Check (and consume) an expired folder-filter debounce window.
    pub fn folder_debounce_expired(&mut self) -> bool {
        if self
            .folder_dirty_since
            .is_some_and(|since| since.elapsed() >= self.debounce)
        {
            self.folder_dirty_since = None;
            true
        } else {
            false
        }
    }

    /// Move note selection up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        let len = self.results.items().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move note selection down, wrapping to the top.
    pub fn move_down(&mut self) {
        let len = self.results.items().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Get the currently selected note.
    pub fn selected_note(&self) -> Option<&Note> {
        self.results.items().get(self.selected_index)
    }

    /// Number of entries in the folder panel ("(all)" plus fetched folders).
    pub fn folder_entry_count(&self) -> usize {
        self.folders.len() + 1
    }

    /// Move folder-panel cursor up, wrapping.
    pub fn folder_cursor_up(&mut self) {
        let len = self.folder_entry_count();
        if self.folder_cursor == 0 {
            self.folder_cursor = len - 1;
        } else {
            self.folder_cursor -= 1;
        }
    }

    /// Move folder-panel cursor down, wrapping.
    pub fn folder_cursor_down(&mut self) {
        let len = self.folder_entry_count();
        self.folder_cursor = (self.folder_cursor + 1) % len;
    }

    /// Apply the folder under the panel cursor as the view scope.
    ///
    /// # Details
    /// Cursor position 0 selects "(all)" and clears the scope. The view is
    /// refreshed through the regular search decision tree.
    pub fn apply_folder_selection(&mut self, source: &NoteSource) {
        self.current_folder = if self.folder_cursor == 0 {
            None
        } else {
            self.folders
                .get(self.folder_cursor - 1)
                .map(|folder| folder.name.clone())
        };
        self.current_page = 1;
        self.submit_search(source);
    }

    /// Human-readable count line for the current result set.
    ///
    /// # Returns
    /// * `String` - e.g. "Showing 1 - 50 of 1423 notes" or "3 search results"
    pub fn count_line(&self) -> String {
        match &self.results {
            ResultSet::Paged { total_count, .. } => {
                if *total_count == 0 {
                    "No notes".to_string()
                } else {
                    let first = (self.current_page - 1) * self.notes_per_page + 1;
                    let last = (self.current_page * self.notes_per_page).min(*total_count);
                    format!("Showing {} - {} of {} notes", first, last, total_count)
                }
            }
            ResultSet::Flat { items } => {
                if items.len() == 1 {
                    "1 search result".to_string()
                } else {
                    format!("{} search results", items.len())
                }
            }
        }
    }

    /// Total page count in browse mode.
    pub fn total_pages(&self) -> u64 {
        match &self.results {
            ResultSet::Paged { total_count, .. } => {
                total_count.div_ceil(self.notes_per_page.max(1)).max(1)
            }
            ResultSet::Flat { .. } => 1,
        }
    }

    /// Pagination summary for the status line.
    pub fn page_info(&self) -> String {
        match &self.results {
            ResultSet::Paged { .. } => {
                format!("Page {} of {}", self.current_page, self.total_pages())
            }
            ResultSet::Flat { .. } => "Search results".to_string(),
        }
    }

    /// Set status message.
    ///
    /// # Arguments
    /// * `message` - Status message to display
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}

/// Execute one notes request against a source.
async fn run_notes_request(
    source: NoteSource,
    request: NotesRequest,
    per_page: u64,
) -> Result<FetchOutcome, SourceError> {
    match request {
        NotesRequest::Page { cursor, page } => {
            let result = source.notes_page(per_page, cursor.as_deref()).await?;
            Ok(FetchOutcome::Page { page, result })
        }
        NotesRequest::Search { query, folder } => {
            let items = source.search_notes(&query, folder.as_deref()).await?;
            Ok(FetchOutcome::Search { items })
        }
        NotesRequest::Folder { name } => {
            let items = source.notes_in_folder(&name).await?;
            Ok(FetchOutcome::Search { items })
        }
        NotesRequest::Random => {
            let items = source.random_note().await?.into_iter().collect();
            Ok(FetchOutcome::Search { items })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::LocalStore;
    use std::collections::BTreeMap;

    fn sample_source() -> NoteSource {
        let mut map = BTreeMap::new();
        map.insert(
            "A".to_string(),
            vec![
                "a quote here".to_string(),
                "nothing".to_string(),
                "another Quote".to_string(),
            ],
        );
        map.insert(
            "B".to_string(),
            vec!["b one".to_string(), "b two".to_string()],
        );
        NoteSource::Local(LocalStore::from_map(map))
    }

    fn test_app() -> App {
        // Zero debounce so dirty input expires immediately in tests
        App::new(2, Duration::ZERO)
    }

    /// Drive the event-loop side of App until all fetches settled.
    async fn settle(app: &mut App) {
        for _ in 0..1000 {
            app.poll_fetches().await;
            if !app.loading && !app.folders_loading {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("fetches did not settle");
    }

    #[tokio::test]
    async fn test_initialize_loads_folders_and_first_page() {
        let source = sample_source();
        let mut app = test_app();
        app.initialize(&source);
        settle(&mut app).await;

        assert_eq!(app.folders.len(), 2);
        match &app.results {
            ResultSet::Paged {
                items,
                total_count,
                next,
                prev,
            } => {
                assert_eq!(items.len(), 2);
                assert_eq!(*total_count, 5);
                assert!(next.is_some());
                assert!(prev.is_none());
            }
            ResultSet::Flat { .. } => panic!("initialize must land in browse mode"),
        }
        assert_eq!(app.page_info(), "Page 1 of 3");
    }

    #[tokio::test]
    async fn test_search_query_enters_flat_mode() {
        let source = sample_source();
        let mut app = test_app();
        app.initialize(&source);
        settle(&mut app).await;

        app.search_query = "quote".to_string();
        app.submit_search(&source);
        settle(&mut app).await;

        assert!(app.results.is_search());
        let items = app.results.items();
        assert_eq!(items.len(), 2);
        assert!(
            items
                .iter()
                .all(|note| note.content.to_lowercase().contains("quote"))
        );
        assert_eq!(app.page_info(), "Search results");
    }

    #[tokio::test]
    async fn test_folder_only_scope_uses_direct_folder_view() {
        let source = sample_source();
        let mut app = test_app();
        app.current_folder = Some("A".to_string());
        app.submit_search(&source);
        settle(&mut app).await;

        assert!(app.results.is_search());
        let items = app.results.items();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|note| note.folder == "A"));
    }

    #[tokio::test]
    async fn test_change_page_is_noop_in_search_mode() {
        let source = sample_source();
        let mut app = test_app();
        app.search_query = "quote".to_string();
        app.submit_search(&source);
        settle(&mut app).await;

        app.change_page(PageDirection::Next, &source);
        assert!(!app.loading);
    }

    #[tokio::test]
    async fn test_paging_concatenation_and_boundary_noops() {
        let source = sample_source();
        let mut app = test_app();
        app.initialize(&source);
        settle(&mut app).await;

        // Prev on page one is a no-op
        app.change_page(PageDirection::Prev, &source);
        assert!(!app.loading);
        assert_eq!(app.current_page, 1);

        let mut seen: Vec<String> = Vec::new();
        loop {
            seen.extend(app.results.items().iter().map(|n| n.content.clone()));
            let ResultSet::Paged { next, .. } = &app.results else {
                panic!("left browse mode while paging");
            };
            if next.is_none() {
                break;
            }
            app.change_page(PageDirection::Next, &source);
            settle(&mut app).await;
        }

        assert_eq!(seen.len(), 5);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 5);
        assert_eq!(app.current_page, 3);

        // Next on the last page is a no-op
        app.change_page(PageDirection::Next, &source);
        assert!(!app.loading);
        assert_eq!(app.current_page, 3);
    }

    #[tokio::test]
    async fn test_random_note_shows_single_flat_item() {
        let source = sample_source();
        let mut app = test_app();
        app.random_note(&source);
        settle(&mut app).await;

        assert!(app.results.is_search());
        assert_eq!(app.results.items().len(), 1);
        assert_eq!(app.count_line(), "1 search result");
    }

    #[tokio::test]
    async fn test_stale_outcome_is_discarded() {
        let source = sample_source();
        let mut app = test_app();
        app.initialize(&source);
        settle(&mut app).await;

        let stale_seq = app.notes_seq;
        app.search_query = "quote".to_string();
        app.submit_search(&source); // advances notes_seq

        app.apply_notes(stale_seq, Ok(FetchOutcome::Search { items: Vec::new() }));
        // The stale empty result must not replace anything, and the newer
        // fetch must still be considered outstanding.
        assert!(app.loading);
        settle(&mut app).await;
        assert_eq!(app.results.items().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_error_keeps_previous_results() {
        let source = sample_source();
        let mut app = test_app();
        app.initialize(&source);
        settle(&mut app).await;
        let before: Vec<Note> = app.results.items().to_vec();

        app.apply_notes(
            app.notes_seq,
            Err(SourceError::Shape("bad payload".to_string())),
        );
        assert_eq!(app.results.items(), before.as_slice());
        assert!(app.error.as_deref().unwrap().contains("bad payload"));
    }

    #[tokio::test]
    async fn test_folder_filter_narrows_panel() {
        let source = sample_source();
        let mut app = test_app();
        app.folder_filter = "b".to_string();
        app.refresh_folders(&source);
        settle(&mut app).await;

        assert_eq!(app.folders.len(), 1);
        assert_eq!(app.folders[0].name, "B");
        assert_eq!(app.folder_entry_count(), 2);
    }

    #[tokio::test]
    async fn test_apply_folder_selection() {
        let source = sample_source();
        let mut app = test_app();
        app.refresh_folders(&source);
        settle(&mut app).await;

        app.folder_cursor = 1; // first real folder, "A"
        app.apply_folder_selection(&source);
        settle(&mut app).await;

        assert_eq!(app.current_folder.as_deref(), Some("A"));
        assert_eq!(app.results.items().len(), 3);

        app.folder_cursor = 0; // "(all)"
        app.apply_folder_selection(&source);
        settle(&mut app).await;
        assert!(app.current_folder.is_none());
        assert!(!app.results.is_search());
    }

    #[tokio::test]
    async fn test_empty_dataset_is_graceful() {
        let source = NoteSource::Local(LocalStore::default());
        let mut app = test_app();
        app.initialize(&source);
        settle(&mut app).await;

        assert!(app.results.items().is_empty());
        assert!(app.error.is_none());
        assert_eq!(app.count_line(), "No notes");

        app.search_query = "anything".to_string();
        app.submit_search(&source);
        settle(&mut app).await;
        assert!(app.results.items().is_empty());
        assert!(app.error.is_none());
    }

    #[test]
    fn test_debounce_fires_once_per_burst() {
        let mut app = test_app();
        app.mode = UiMode::Search;
        assert!(!app.search_debounce_expired());

        app.add_search_char('q');
        app.add_search_char('u');
        assert!(app.search_debounce_expired());
        // Consumed: no second firing without new input
        assert!(!app.search_debounce_expired());
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = test_app();
        app.results = ResultSet::Flat {
            items: vec![
                Note::new("one".to_string(), "f".to_string(), None),
                Note::new("two".to_string(), "f".to_string(), None),
                Note::new("three".to_string(), "f".to_string(), None),
            ],
        };

        assert_eq!(app.selected_index, 0);
        app.move_up();
        assert_eq!(app.selected_index, 2);
        app.move_down();
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_note().unwrap().content, "one");
    }

    #[test]
    fn test_count_line_browse_window() {
        let mut app = test_app();
        app.results = ResultSet::Paged {
            items: Vec::new(),
            total_count: 5,
            next: None,
            prev: Some("offset=0".to_string()),
        };
        app.current_page = 3;
        assert_eq!(app.count_line(), "Showing 5 - 5 of 5 notes");
    }
}
