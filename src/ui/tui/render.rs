//! Browser screen layout: render-mode classification and row building.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::drive::types::DriveFile;
use crate::util::middle_ellipsis;

use super::styles::{error_style, muted_style, selection_style, status_style, ACCENT};

const FALLBACK_ERROR_TEXT: &str = "Something went wrong";

/// What the current screen should show, derived from session flags.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum BrowseView {
    Loading,
    Error(String),
    Empty,
    List,
}

/// Screen policy: a full loading view only before the first data arrives
/// (or while recovering from a failure); the error view while failed; the
/// empty view for a loaded list with nothing in it; the list otherwise.
/// A pagination fetch on a healthy list never blanks the screen — it shows
/// as a trailing row instead.
pub(super) fn classify_view(
    has_loaded_once: bool,
    has_failed: bool,
    in_flight: bool,
    error_message: Option<&str>,
    entry_count: usize,
) -> BrowseView {
    if in_flight && (!has_loaded_once || has_failed) {
        return BrowseView::Loading;
    }
    if has_failed {
        return BrowseView::Error(error_message.unwrap_or(FALLBACK_ERROR_TEXT).to_string());
    }
    if !has_loaded_once {
        return BrowseView::Loading;
    }
    if entry_count == 0 {
        return BrowseView::Empty;
    }
    BrowseView::List
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct FileRow {
    pub glyph: &'static str,
    pub name: String,
    pub size_text: Option<String>,
}

pub(super) fn glyph_for(file: &DriveFile) -> &'static str {
    if file.is_shortcut() {
        "↪"
    } else if file.is_folder() {
        "▸"
    } else if file.is_video_file() {
        "▶"
    } else {
        "·"
    }
}

pub(super) fn build_file_rows(files: &[DriveFile], show_sizes: bool) -> Vec<FileRow> {
    files
        .iter()
        .map(|file| FileRow {
            glyph: glyph_for(file),
            name: file.name.clone(),
            size_text: if show_sizes { file.human_size() } else { None },
        })
        .collect()
}

/// Lays a row out as `glyph name ...padding... size` within `width` cells.
pub(super) fn row_line(row: &FileRow, width: u16) -> Line<'static> {
    const GLYPH_COLS: usize = 2;

    let size = row.size_text.clone().unwrap_or_default();
    let reserved = if size.is_empty() {
        0
    } else {
        size.chars().count() + 1
    };
    let avail = (width as usize).saturating_sub(GLYPH_COLS + reserved);
    let name = middle_ellipsis(&row.name, avail);

    let mut spans = vec![
        Span::raw(format!("{} ", row.glyph)),
        Span::raw(name.clone()),
    ];
    if !size.is_empty() {
        let pad = avail.saturating_sub(name.chars().count()) + 1;
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(size, muted_style()));
    }
    Line::from(spans)
}

pub(super) fn render_browser(
    frame: &mut Frame,
    title: &str,
    view: &BrowseView,
    rows: &[FileRow],
    in_flight: bool,
    list_state: &mut ListState,
    status: Option<&str>,
) {
    let (content_area, status_area) = split_for_status(frame.area(), status.is_some());

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(ACCENT),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(content_area);
    frame.render_widget(block, content_area);

    match view {
        BrowseView::Loading => render_message(frame, inner, "Loading..."),
        BrowseView::Empty => render_message(frame, inner, "No files found"),
        BrowseView::Error(message) => render_error(frame, inner, message),
        BrowseView::List => render_list(frame, inner, rows, in_flight, list_state),
    }

    if let (Some(message), Some(status_area)) = (status, status_area) {
        render_status(frame, status_area, message);
    }
}

fn split_for_status(area: Rect, has_status: bool) -> (Rect, Option<Rect>) {
    if !has_status {
        return (area, None);
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    (chunks[0], Some(chunks[1]))
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    rows: &[FileRow],
    in_flight: bool,
    list_state: &mut ListState,
) {
    let mut items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(row_line(row, area.width)))
        .collect();
    if in_flight {
        items.push(ListItem::new(Line::from(Span::styled(
            "Loading more...",
            muted_style(),
        ))));
    }

    let list = List::new(items).highlight_style(selection_style());
    frame.render_stateful_widget(list, area, list_state);
}

fn render_message(frame: &mut Frame, area: Rect, text: &str) {
    let centered = center_line(area);
    let widget = Paragraph::new(text)
        .style(muted_style())
        .alignment(Alignment::Center);
    frame.render_widget(widget, centered);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let msg = Paragraph::new(message.to_string())
        .style(error_style())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(msg, chunks[0]);

    let hint = Paragraph::new("press r to retry")
        .style(muted_style())
        .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[1]);
}

fn render_status(frame: &mut Frame, area: Rect, message: &str) {
    let widget = Paragraph::new(message.to_string())
        .style(status_style())
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

// Vertically centers a single text line inside `area`.
fn center_line(area: Rect) -> Rect {
    if area.height == 0 {
        return area;
    }
    Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1,
    }
}
