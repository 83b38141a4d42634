//! Columns view: the root and every opened folder side by side.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use medialib_core::{Column, ItemId, ViewState};

use crate::app::HitRegion;
use crate::ui::list::render_list;
use crate::ui::ItemViewProps;

/// Narrowest a column is drawn; older columns scroll off to the left.
const MIN_COLUMN_WIDTH: u16 = 24;

/// Renders one list per column, keeping the focused one on screen.
#[allow(clippy::too_many_arguments)]
pub fn render_columns(
    f: &mut Frame,
    area: Rect,
    state: &ViewState,
    focus: usize,
    cursor: usize,
    moving: Option<&ItemId>,
    show_icons: bool,
    hits: &mut Vec<HitRegion>,
) {
    let columns = state.columns();
    let (start, end) = column_window(columns.len(), focus, area.width);
    let shown = &columns[start..end];

    let constraints = vec![Constraint::Ratio(1, shown.len().max(1) as u32); shown.len()];
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (column, rect) in shown.iter().zip(areas.iter()) {
        let is_active = column.level == focus;
        let props = ItemViewProps {
            items: &column.items,
            cursor: is_active.then_some(cursor),
            selection: state.selection(),
            favorites: state.favorites(),
            opened: state.path().ids().get(column.level),
            moving,
            column: Some(column.level),
            title: column_title(state, column),
            show_icons,
        };
        render_list(f, *rect, &props, is_active, hits);
    }
}

fn column_title(state: &ViewState, column: &Column<'_>) -> String {
    column
        .folder_id
        .as_ref()
        .and_then(|id| state.store().get(id))
        .map(|folder| folder.name().to_owned())
        .unwrap_or_else(|| "Library".to_owned())
}

/// Which columns fit in `width`, as `(start, end)`, always including `focus`.
fn column_window(total: usize, focus: usize, width: u16) -> (usize, usize) {
    let fit = usize::from((width / MIN_COLUMN_WIDTH).max(1));
    if total <= fit {
        return (0, total);
    }
    let end = (focus + 1).max(fit).min(total);
    (end - fit, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_columns_fit() {
        assert_eq!(column_window(3, 2, 120), (0, 3));
    }

    #[test]
    fn deep_focus_scrolls_left_columns_off() {
        // 80 / 24 = 3 columns fit.
        assert_eq!(column_window(6, 5, 80), (3, 6));
    }

    #[test]
    fn shallow_focus_shows_leading_columns() {
        assert_eq!(column_window(6, 0, 80), (0, 3));
    }

    #[test]
    fn narrow_terminal_still_shows_focus() {
        assert_eq!(column_window(4, 2, 10), (2, 3));
    }
}
