//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the cursor position, the item under the cursor, view mode and sort
//! order, the selection size, a drag indicator, and an optional message.

use medialib_core::{FileSystemItem, SortDirection, SortField, ViewMode};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::{ACCENT, SELECTED_FG};

const BAR_BG: Color = Color::Black;
const BAR_FG: Color = Color::Gray;

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub item_count: usize,
    pub cursor: usize,
    pub cursor_item: Option<&'a FileSystemItem>,
    pub selected_count: usize,
    pub view_mode: ViewMode,
    pub sort: (SortField, SortDirection),
    /// Name of the item being moved, if a move is in progress.
    pub moving: Option<&'a str>,
    /// Where the moved item would land right now.
    pub drop_hint: Option<String>,
    pub status_message: Option<&'a str>,
}

/// Renders the bottom status bar.
pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>) {
    let base = Style::default().fg(BAR_FG).bg(BAR_BG);

    let position = if props.item_count > 0 {
        format!(" {}/{}", props.cursor + 1, props.item_count)
    } else {
        " 0/0".to_owned()
    };

    let item_info = props.cursor_item.map(item_summary).unwrap_or_default();

    let selected = if props.selected_count > 0 {
        format!("  [{} selected]", props.selected_count)
    } else {
        String::new()
    };

    let moving = props
        .moving
        .map(|name| {
            Span::styled(
                moving_label(name, props.drop_hint.as_deref()),
                Style::default()
                    .fg(SELECTED_FG)
                    .bg(BAR_BG)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .unwrap_or_default();

    let status_span = props
        .status_message
        .map(|msg| {
            Span::styled(
                format!("  {msg}"),
                base.add_modifier(Modifier::ITALIC),
            )
        })
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(position, base.add_modifier(Modifier::BOLD)),
        Span::styled(item_info, base),
        Span::styled(
            format!("  [{}]", view_label(props.view_mode, props.sort)),
            base.fg(ACCENT),
        ),
        Span::styled(selected, base.fg(SELECTED_FG)),
        moving,
        status_span,
    ]);

    f.render_widget(Paragraph::new(line).style(base), area);
}

/// Replaces the status bar while typing a search query.
pub fn render_search_line(f: &mut Frame, area: Rect, query: &str, matches: usize) {
    let line = Line::from(vec![
        Span::styled(format!(" /{query}_"), Style::default().fg(ACCENT).bg(BAR_BG)),
        Span::styled(
            format!("  {matches} matches  (Enter keep, Esc clear)"),
            Style::default().fg(BAR_FG).bg(BAR_BG),
        ),
    ]);
    f.render_widget(Paragraph::new(line).style(Style::default().bg(BAR_BG)), area);
}

fn moving_label(name: &str, hint: Option<&str>) -> String {
    match hint {
        Some(hint) => format!("  Moving {name}: {hint}"),
        None => format!("  Moving {name}"),
    }
}

fn item_summary(item: &FileSystemItem) -> String {
    if item.is_folder() {
        return format!("  [DIR] {}", item.name());
    }
    match item.size() {
        Some(size) => format!("  {} ({})", item.name(), format_size(size)),
        None => format!("  {}", item.name()),
    }
}

/// `"grid | Name asc"` style summary of how the folder is shown.
fn view_label(mode: ViewMode, (field, direction): (SortField, SortDirection)) -> String {
    let arrow = match direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    };
    format!("{} | {} {arrow}", mode.label(), field.label())
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
