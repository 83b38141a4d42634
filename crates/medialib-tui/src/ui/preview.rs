//! Details pane for the selection anchor.

use medialib_core::{FileSystemItem, ItemKind, ViewState};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::icons::icon_for_item;
use crate::ui::statusbar::format_size;
use crate::ui::{item_style, ACCENT, MUTED_FG, SELECTED_FG};

/// Most children listed in a folder preview.
const MAX_CHILDREN: usize = 30;

/// Renders the details pane for the selection anchor.
pub fn render_preview(f: &mut Frame, area: Rect, state: &ViewState, show_icons: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Preview")
        .border_style(Style::default().fg(MUTED_FG));
    let lines = preview_lines(state, show_icons);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn preview_lines(state: &ViewState, show_icons: bool) -> Vec<Line<'static>> {
    let Some(item) = state.preview_item() else {
        let mut lines = vec![Line::from(Span::styled(
            "Nothing selected",
            Style::default().fg(MUTED_FG),
        ))];
        lines.extend(favorite_lines(state, show_icons));
        return lines;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}{}", icon_for_item(item, show_icons), item.name()),
            item_style(item).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let selected = state.selected_items();
    if selected.len() > 1 {
        let total: u64 = selected.iter().filter_map(|i| i.size()).sum();
        lines.push(Line::from(Span::styled(
            format!("  {} items selected, {}", selected.len(), format_size(total)),
            Style::default().fg(SELECTED_FG),
        )));
        lines.push(Line::from(""));
    }

    lines.push(field("Kind", item.kind().label().to_owned()));
    if let Some(size) = item.size() {
        lines.push(field("Size", format_size(size)));
    }
    if let Some(modified) = item.modified() {
        lines.push(field("Modified", modified.to_owned()));
    }
    lines.push(field("Location", location(state, item)));
    if let Some(url) = item.url() {
        lines.push(field("URL", url.to_owned()));
    }
    if state.is_favorite(item.id()) {
        lines.push(field("Favorite", "yes".to_owned()));
    }

    if item.kind() == ItemKind::Folder {
        let direct = state.store().children(Some(item.id())).len();
        let nested = state.store().descendants(item.id()).len();
        lines.push(field("Contains", format!("{direct} items, {nested} in total")));
        lines.push(Line::from(""));
        lines.extend(folder_lines(state, item, show_icons));
    }
    lines
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<9} "), Style::default().fg(ACCENT)),
        Span::raw(value),
    ])
}

/// `/ Brand Assets / Logos` for the folders above `item`.
fn location(state: &ViewState, item: &FileSystemItem) -> String {
    let max_depth = state.settings().max_depth;
    let names: Vec<&str> = state
        .store()
        .ancestors(item.id(), max_depth)
        .into_iter()
        .rev()
        .map(FileSystemItem::name)
        .collect();
    if names.is_empty() {
        "/".to_owned()
    } else {
        format!("/ {}", names.join(" / "))
    }
}

/// Favorites list shown while nothing is selected.
fn favorite_lines(state: &ViewState, show_icons: bool) -> Vec<Line<'static>> {
    let favorites = state.favorite_items();
    if favorites.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Favorites (' to jump)",
            Style::default().fg(ACCENT),
        )),
    ];
    lines.extend(favorites.iter().map(|fav| {
        Line::from(Span::styled(
            format!("  {}{}", icon_for_item(fav, show_icons), fav.name()),
            item_style(fav),
        ))
    }));
    lines
}

fn folder_lines(state: &ViewState, folder: &FileSystemItem, show_icons: bool) -> Vec<Line<'static>> {
    let children = state.store().children(Some(folder.id()));
    if children.is_empty() {
        return vec![Line::from(Span::styled(
            "  (empty folder)",
            Style::default().fg(MUTED_FG),
        ))];
    }
    let mut lines: Vec<Line<'static>> = children
        .iter()
        .take(MAX_CHILDREN)
        .map(|child| {
            Line::from(Span::styled(
                format!("  {}{}", icon_for_item(child, show_icons), child.name()),
                item_style(child),
            ))
        })
        .collect();
    if children.len() > MAX_CHILDREN {
        lines.push(Line::from(Span::styled(
            format!("  ... {} more", children.len() - MAX_CHILDREN),
            Style::default().fg(MUTED_FG),
        )));
    }
    lines
}
