//! Folder panel rendering.
//!
//! Displays the folder filter input and the selectable folder list.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the folder panel.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// The first line is the filter input; below it the matching folders are
/// listed with a "(all)" entry on top. The entry under the cursor is
/// highlighted while the panel is active, and the folder the view is
/// currently scoped to carries a marker.
pub fn render_folders(app: &App, area: Rect, buf: &mut Buffer) {
    let is_active = app.mode == crate::app::UiMode::Folders;

    let mut lines = vec![Line::from(vec![
        Span::styled("Filter: ", Style::default().fg(Color::Cyan)),
        Span::styled(
            &app.folder_filter,
            Style::default().fg(if is_active { Color::White } else { Color::Gray }),
        ),
        Span::styled(
            if is_active { "_" } else { "" },
            Style::default().fg(Color::Yellow),
        ),
    ])];

    if app.folders_loading {
        lines.push(Line::from(Span::styled(
            "Loading folders...",
            Style::default().fg(Color::Gray),
        )));
    } else {
        // Window the entries around the cursor so long folder lists stay
        // navigable in the fixed panel height
        let visible = area.height.saturating_sub(3).max(1) as usize;
        let total = app.folder_entry_count();
        let skip = app
            .folder_cursor
            .saturating_sub(visible - 1)
            .min(total.saturating_sub(visible));

        for (idx, name) in folder_entries(app).enumerate().skip(skip).take(visible) {
            let is_cursor = is_active && idx == app.folder_cursor;
            let is_current = match (idx, &app.current_folder) {
                (0, None) => true,
                (0, Some(_)) => false,
                (_, Some(current)) => name == current.as_str(),
                (_, None) => false,
            };

            let marker = if is_current { "* " } else { "  " };
            let style = if is_cursor {
                Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                format!("{}{}", marker, name),
                style,
            )));
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(if is_active {
                "Folders (Enter selects, Esc closes)"
            } else {
                "Folders (press 'f')"
            })
            .borders(Borders::ALL)
            .style(if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }),
    );

    Widget::render(paragraph, area, buf);
}

/// Panel entries in display order: "(all)" plus the fetched folder names.
fn folder_entries(app: &App) -> impl Iterator<Item = &str> {
    std::iter::once("(all)").chain(app.folders.iter().map(|folder| folder.name.as_str()))
}
