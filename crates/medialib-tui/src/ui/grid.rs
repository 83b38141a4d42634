//! Grid view: items as tiles, `columns` per row.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::HitRegion;
use crate::icons::icon_for_item;
use crate::ui::list::truncate;
use crate::ui::statusbar::format_size;
use crate::ui::{visible_window, ItemViewProps, ACCENT, MUTED_FG, SELECTED_FG};

/// Height of one tile including its border.
const TILE_HEIGHT: u16 = 4;

/// Tiles per row: the requested count, narrowed so every tile gets a cell.
pub fn tiles_per_row(requested: u16, width: u16) -> u16 {
    requested.clamp(1, width.max(1))
}

/// Renders `props.items` as a grid of tiles and records a hit region per tile.
///
/// Returns the number of tiles drawn per row.
pub fn render_grid(
    f: &mut Frame,
    area: Rect,
    props: &ItemViewProps<'_>,
    columns: u16,
    hits: &mut Vec<HitRegion>,
) -> u16 {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(props.title.clone())
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = tiles_per_row(columns, inner.width);
    if props.items.is_empty() {
        let empty = Paragraph::new(Span::styled(" (empty)", Style::default().fg(MUTED_FG)));
        f.render_widget(empty, inner);
        return columns;
    }

    let tile_width = inner.width / columns;
    let per_row = usize::from(columns);
    let total_rows = props.items.len().div_ceil(per_row);
    let cursor_row = props.cursor.unwrap_or(0) / per_row;
    let fit_rows = usize::from((inner.height / TILE_HEIGHT).max(1));
    let (first_row, last_row) = visible_window(cursor_row, total_rows, fit_rows);

    for (index, item) in props
        .items
        .iter()
        .enumerate()
        .skip(first_row * per_row)
        .take((last_row - first_row) * per_row)
    {
        let (row, col) = (index / per_row - first_row, index % per_row);
        let tile = Rect::new(
            inner.x + col as u16 * tile_width,
            inner.y + row as u16 * TILE_HEIGHT,
            tile_width,
            TILE_HEIGHT.min(inner.bottom().saturating_sub(inner.y + row as u16 * TILE_HEIGHT)),
        );
        hits.push(HitRegion::item(tile, item.id().clone(), None));
        render_tile(f, tile, props, index, item);
    }
    columns
}

fn render_tile(
    f: &mut Frame,
    tile: Rect,
    props: &ItemViewProps<'_>,
    index: usize,
    item: &medialib_core::FileSystemItem,
) {
    let selected = props.selection.contains(item.id());
    let border = if selected {
        Style::default().fg(SELECTED_FG).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED_FG)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(props.marker(item))
        .border_style(border);
    let inner = block.inner(tile);
    f.render_widget(block, tile);

    let width = usize::from(inner.width);
    let name = truncate(
        &format!("{}{}", icon_for_item(item, props.show_icons), item.name()),
        width,
    );
    let detail = match item.size() {
        Some(size) => format!("{} {}", item.kind().label(), format_size(size)),
        None => item.kind().label().to_owned(),
    };
    let lines = vec![
        Line::from(Span::styled(name, props.style_for(index, item))),
        Line::from(Span::styled(truncate(&detail, width), Style::default().fg(MUTED_FG))),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}
