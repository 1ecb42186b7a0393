//! Notes list widget rendering.
//!
//! Displays the count line, a scrollable list of notes with selection
//! highlighting, and the loading / empty / error states.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

/// Rendered height of one note entry (headline + meta + separator).
pub const LINES_PER_NOTE: u16 = 3;

/// Height of the inline error strip above the list.
pub const ERROR_STRIP_HEIGHT: u16 = 3;

/// Scroll offset that keeps the selection centered in the viewport.
///
/// # Arguments
/// * `selected` - Selected note index
/// * `len` - Total number of notes in the list
/// * `viewport_rows` - Rows available for note entries (without borders)
pub fn scroll_offset(selected: usize, len: usize, viewport_rows: u16) -> usize {
    let visible = (viewport_rows / LINES_PER_NOTE).max(1) as usize;
    let center = visible / 2;
    let offset = selected.saturating_sub(center);
    offset.min(len.saturating_sub(visible))
}

/// Render the notes list widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// When the last fetch failed, an error strip is shown above the list and
/// the previously fetched notes stay visible below it. An empty result is
/// rendered as a plain placeholder, styled differently from an error.
pub fn render_list(app: &App, area: Rect, buf: &mut Buffer) {
    let list_area = if let Some(reason) = &app.error {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(ERROR_STRIP_HEIGHT), Constraint::Min(0)])
            .split(area);
        render_error_strip(reason, chunks[0], buf);
        chunks[1]
    } else {
        area
    };

    let title = app.count_line();
    let notes = app.results.items();

    if app.loading {
        let placeholder = if app.results.is_search() {
            "Searching..."
        } else {
            "Loading notes..."
        };
        let list = List::new(vec![ListItem::new(placeholder)])
            .block(Block::default().title(title).borders(Borders::ALL));
        Widget::render(list, list_area, buf);
        return;
    }

    if notes.is_empty() {
        let list = List::new(vec![ListItem::new(
            "No notes found. Try adjusting your search criteria.",
        )])
        .block(Block::default().title(title).borders(Borders::ALL));
        Widget::render(list, list_area, buf);
        return;
    }

    let selected_index = app.selected_index.min(notes.len().saturating_sub(1));

    // Separator width accounts for the borders
    let separator_width = list_area.width.saturating_sub(2).max(10) as usize;
    let separator_line = "─".repeat(separator_width);

    let available_height = list_area.height.saturating_sub(2);
    let offset = scroll_offset(selected_index, notes.len(), available_height);
    let visible = (available_height / LINES_PER_NOTE).max(1) as usize;
    let end = (offset + visible).min(notes.len());

    let items: Vec<ListItem> = notes
        .iter()
        .enumerate()
        .skip(offset)
        .take(end - offset)
        .map(|(idx, note)| {
            let is_selected = idx == selected_index;

            let base_style = if is_selected {
                Style::default()
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let headline_style = Style::default()
                .fg(if is_selected {
                    Color::Yellow
                } else {
                    Color::White
                })
                .add_modifier(Modifier::BOLD);

            // Line 1: note text (first line, sanitized)
            let line1 = Line::from(vec![Span::styled(note.headline(), headline_style)]);

            // Line 2: folder and modification date
            let mut line2_spans = vec![Span::styled(
                format!("Folder: {}", note.folder),
                Style::default().fg(Color::Cyan),
            )];
            if let Some(date) = note.format_updated() {
                line2_spans.push(Span::styled(
                    format!("  Updated: {}", date),
                    Style::default().fg(Color::Yellow),
                ));
            }
            let line2 = Line::from(line2_spans);

            // Line 3: separator
            let separator_style = if is_selected {
                Style::default().fg(Color::Blue)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let separator = Line::from(vec![Span::styled(separator_line.clone(), separator_style)]);

            ListItem::new(vec![line1, line2, separator]).style(base_style)
        })
        .collect();

    let relative_selected = if selected_index >= offset && selected_index < offset + items.len() {
        Some(selected_index - offset)
    } else {
        None
    };

    let mut list_state = ListState::default();
    list_state.select(relative_selected);

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );

    StatefulWidget::render(list, list_area, buf, &mut list_state);
}

/// Render the failure reason of the last fetch.
fn render_error_strip(reason: &str, area: Rect, buf: &mut Buffer) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        reason,
        Style::default().fg(Color::Red),
    )]))
    .block(
        Block::default()
            .title("Error")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Red)),
    );
    Widget::render(paragraph, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_starts_at_zero() {
        assert_eq!(scroll_offset(0, 100, 30), 0);
        assert_eq!(scroll_offset(3, 100, 30), 0);
    }

    #[test]
    fn test_scroll_offset_centers_selection() {
        // 30 rows / 3 lines per note = 10 visible, center 5
        assert_eq!(scroll_offset(50, 100, 30), 45);
    }

    #[test]
    fn test_scroll_offset_clamps_at_end() {
        assert_eq!(scroll_offset(99, 100, 30), 90);
        // Fewer notes than fit: never scroll
        assert_eq!(scroll_offset(4, 5, 30), 0);
    }
}
