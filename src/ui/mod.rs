//! UI components module.
//!
//! Contains ratatui widgets for displaying the application interface.

pub mod folders;
pub mod list;
pub mod search;

pub use folders::render_folders;
pub use list::render_list;
pub use search::render_search;
