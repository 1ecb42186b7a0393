//! notes-tui - Terminal client for browsing a notes/quotes collection.
//!
//! Main entry point and event loop for the application.

mod app;
mod config;
mod notes;
mod ui;

use anyhow::Context;
use app::{App, PageDirection, UiMode};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEvent, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use notes::{LocalStore, NoteSource, RemoteClient};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
};
use std::io;
use std::time::Duration;
use ui::list::{ERROR_STRIP_HEIGHT, LINES_PER_NOTE};

/// Main application entry point.
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Loads configuration, builds the configured note source, kicks off the
/// initial fetches, and runs the event loop.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load(None)?;

    // Build the configured data source: a local JSON export when one is
    // configured, the remote API otherwise
    let source = match config.local_file_path()? {
        Some(path) => {
            let store = LocalStore::load(&path)
                .with_context(|| format!("Failed to load notes file: {}", path.display()))?;
            NoteSource::Local(store)
        }
        None => NoteSource::Remote(RemoteClient::new(&config)?),
    };

    // Create application state and start the initial fetches; the UI shows
    // a loading placeholder until they complete
    let mut app = App::new(
        config.notes_per_page,
        Duration::from_millis(config.search_debounce_ms),
    );
    app.set_status("Loading notes...".to_string());
    app.initialize(&source);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let result = run_app(&mut terminal, &mut app, &source).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Render the complete UI.
///
/// # Arguments
/// * `f` - Frame to render to
/// * `app` - Application state
///
/// # Details
/// Lays out and renders the search bar, folder panel, notes list, and
/// status line.
fn render_ui(f: &mut ratatui::Frame, app: &App) {
    let chunks = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            ratatui::layout::Constraint::Length(3), // Search bar
            ratatui::layout::Constraint::Length(8), // Folder panel
            ratatui::layout::Constraint::Min(0),    // Notes list
            ratatui::layout::Constraint::Length(1), // Status line
        ])
        .split(f.area());

    // Render search bar
    ui::render_search(app, chunks[0], f.buffer_mut());

    // Render folder panel
    ui::render_folders(app, chunks[1], f.buffer_mut());

    // Render notes list
    ui::render_list(app, chunks[2], f.buffer_mut());

    // Render status line
    let status_text = app.status_message.clone().unwrap_or_else(|| {
        "'q' quit, '/' search, 'f' folders, 'n'/'p' page, 'r' random, 'c' clear".to_string()
    });
    let status = ratatui::widgets::Paragraph::new(ratatui::text::Line::from(format!(
        "{}  |  {}",
        app.page_info(),
        status_text
    )));
    f.render_widget(status, chunks[3]);
}

/// Main event loop.
///
/// # Arguments
/// * `terminal` - Terminal instance
/// * `app` - Application state
/// * `source` - Note data source
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Handles keyboard and mouse events, fires debounced search and folder
/// filter refreshes, harvests completed fetches, and renders the UI.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    source: &NoteSource,
) -> anyhow::Result<()> {
    // Notes list area boundaries (updated on each render, used for mouse
    // click detection)
    let mut list_area = ratatui::layout::Rect::default();

    loop {
        terminal.draw(|f| {
            let chunks = ratatui::layout::Layout::default()
                .direction(ratatui::layout::Direction::Vertical)
                .constraints([
                    ratatui::layout::Constraint::Length(3), // Search bar
                    ratatui::layout::Constraint::Length(8), // Folder panel
                    ratatui::layout::Constraint::Min(0),    // Notes list
                    ratatui::layout::Constraint::Length(1), // Status line
                ])
                .split(f.area());
            list_area = chunks[2]; // Store list area for mouse click detection
            render_ui(f, app);
        })?;

        // Use non-blocking event polling with timeout to keep UI responsive
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    match app.mode {
                        UiMode::Browse => match key.code {
                            KeyCode::Char('q') => break,
                            KeyCode::Char('Q') => break,
                            KeyCode::Esc => break,
                            KeyCode::Up | KeyCode::Char('k') => app.move_up(),
                            KeyCode::Down | KeyCode::Char('j') => app.move_down(),
                            KeyCode::Enter => {
                                if let Some(note) = app.selected_note() {
                                    let line = note.headline();
                                    app.set_status(line);
                                }
                            }
                            KeyCode::Char('/') => {
                                app.mode = UiMode::Search;
                            }
                            KeyCode::Char('f') => {
                                app.mode = UiMode::Folders;
                            }
                            KeyCode::Char('n') | KeyCode::Right => {
                                app.change_page(PageDirection::Next, source);
                            }
                            KeyCode::Char('p') | KeyCode::Left => {
                                app.change_page(PageDirection::Prev, source);
                            }
                            KeyCode::Char('r') => {
                                app.random_note(source);
                            }
                            KeyCode::Char('c')
                                if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                            {
                                break;
                            }
                            KeyCode::Char('c') => {
                                app.clear_filters(source);
                            }
                            _ => {}
                        },
                        UiMode::Search => match key.code {
                            KeyCode::Enter => {
                                app.submit_search(source);
                                app.mode = UiMode::Browse;
                            }
                            KeyCode::Esc => {
                                app.mode = UiMode::Browse;
                            }
                            KeyCode::Backspace => {
                                app.remove_search_char();
                            }
                            KeyCode::Char(c) => {
                                app.add_search_char(c);
                            }
                            _ => {}
                        },
                        UiMode::Folders => match key.code {
                            KeyCode::Enter => {
                                app.apply_folder_selection(source);
                                app.mode = UiMode::Browse;
                            }
                            KeyCode::Esc => {
                                app.mode = UiMode::Browse;
                            }
                            KeyCode::Up => app.folder_cursor_up(),
                            KeyCode::Down => app.folder_cursor_down(),
                            KeyCode::Backspace => {
                                app.remove_folder_char();
                            }
                            KeyCode::Char(c) => {
                                app.add_folder_char(c);
                            }
                            _ => {}
                        },
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(mouse, app, list_area);
                }
                _ => {}
            }
        }

        // Fire debounced input: at most one operation per burst of
        // keystrokes, after the quiescence window elapsed
        if app.search_debounce_expired() {
            app.submit_search(source);
        }
        if app.folder_debounce_expired() {
            app.refresh_folders(source);
        }

        // Harvest completed fetches; stale generations are discarded
        app.poll_fetches().await;
    }

    Ok(())
}

/// Handle mouse events (scroll and click).
///
/// # Arguments
/// * `mouse` - Mouse event
/// * `app` - Application state
/// * `list_area` - Area of the notes list widget
///
/// # Details
/// Mouse scroll moves the note selection; a left click selects the clicked
/// note.
fn handle_mouse_event(mouse: MouseEvent, app: &mut App, list_area: ratatui::layout::Rect) {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            if app.mode == UiMode::Browse {
                app.move_up();
            }
        }
        MouseEventKind::ScrollDown => {
            if app.mode == UiMode::Browse {
                app.move_down();
            }
        }
        MouseEventKind::Down(crossterm::event::MouseButton::Left) => {
            // The error strip shifts the list down when present
            let error_strip = if app.error.is_some() {
                ERROR_STRIP_HEIGHT
            } else {
                0
            };
            let list_top = list_area.y + error_strip;

            if app.mode == UiMode::Browse
                && mouse.column >= list_area.x
                && mouse.column < list_area.x + list_area.width
                && mouse.row > list_top // Skip top border
                && mouse.row < list_area.y + list_area.height
            {
                let notes_len = app.results.items().len();
                let viewport_rows = list_area.height.saturating_sub(2 + error_strip);
                let offset =
                    ui::list::scroll_offset(app.selected_index, notes_len, viewport_rows);

                let click_y = mouse.row - list_top - 1; // Subtract border
                let clicked = offset + (click_y / LINES_PER_NOTE) as usize;
                if clicked < notes_len {
                    app.selected_index = clicked;
                }
            }
        }
        _ => {}
    }
}
