//! UI widget modules for the TUI frontend.
//!
//! Each sub-module renders a single UI component using ratatui. Widgets that
//! draw items also record where they drew them so the mouse can be hit-tested.

use std::collections::BTreeSet;

use medialib_core::{FileSystemItem, ItemId, ItemKind, Selection};
use ratatui::style::{Color, Modifier, Style};

pub mod breadcrumb;
pub mod columns;
pub mod grid;
pub mod list;
pub mod popup;
pub mod preview;
pub mod statusbar;

pub(crate) const ACCENT: Color = Color::Cyan;
pub(crate) const FOLDER_FG: Color = Color::Blue;
pub(crate) const IMAGE_FG: Color = Color::Magenta;
pub(crate) const SELECTED_FG: Color = Color::Yellow;
pub(crate) const MUTED_FG: Color = Color::DarkGray;

/// What an item widget needs to draw one folder's contents.
pub struct ItemViewProps<'a> {
    pub items: &'a [&'a FileSystemItem],
    /// Cursor row, when this widget has focus.
    pub cursor: Option<usize>,
    pub selection: &'a Selection,
    pub favorites: &'a BTreeSet<ItemId>,
    /// Folder opened from this column (columns view only).
    pub opened: Option<&'a ItemId>,
    /// Item being moved, by mouse drag or keyboard mark.
    pub moving: Option<&'a ItemId>,
    /// Column level for hit regions (columns view only).
    pub column: Option<usize>,
    pub title: String,
    pub show_icons: bool,
}

impl ItemViewProps<'_> {
    /// Marker column: `+` selected, `>` being moved, `*` favorite.
    pub(crate) fn marker(&self, item: &FileSystemItem) -> &'static str {
        if self.moving == Some(item.id()) {
            ">"
        } else if self.selection.contains(item.id()) {
            "+"
        } else if self.favorites.contains(item.id()) {
            "*"
        } else {
            " "
        }
    }

    pub(crate) fn style_for(&self, index: usize, item: &FileSystemItem) -> Style {
        let mut style = item_style(item);
        if self.selection.contains(item.id()) || self.opened == Some(item.id()) {
            style = style.fg(SELECTED_FG).add_modifier(Modifier::BOLD);
        }
        if self.cursor == Some(index) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if self.moving == Some(item.id()) {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }
}

/// Base colour by kind: folders blue+bold, images magenta.
pub(crate) fn item_style(item: &FileSystemItem) -> Style {
    match item.kind() {
        ItemKind::Folder => {
            Style::default().fg(FOLDER_FG).add_modifier(Modifier::BOLD)
        }
        ItemKind::Image => Style::default().fg(IMAGE_FG),
        ItemKind::File => Style::default(),
    }
}

/// Computes the visible window `(start, end)` for a list of `total` items
/// so that `selected` is always in view within `max_visible` lines.
pub(crate) fn visible_window(selected: usize, total: usize, max_visible: usize) -> (usize, usize) {
    if total <= max_visible {
        return (0, total);
    }
    let half = max_visible / 2;
    let start = if selected <= half {
        0
    } else if selected + half >= total {
        total.saturating_sub(max_visible)
    } else {
        selected - half
    };
    let end = (start + max_visible).min(total);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_fits_everything() {
        assert_eq!(visible_window(3, 5, 10), (0, 5));
    }

    #[test]
    fn window_keeps_top_while_cursor_is_near_start() {
        assert_eq!(visible_window(2, 100, 10), (0, 10));
    }

    #[test]
    fn window_centres_cursor() {
        assert_eq!(visible_window(50, 100, 10), (45, 55));
    }

    #[test]
    fn window_clamps_at_end() {
        assert_eq!(visible_window(98, 100, 10), (90, 100));
    }

    #[test]
    fn marker_prefers_moving_over_selected() {
        let item = FileSystemItem::file("a", "a.txt");
        let selection = Selection::exclusive(item.id());
        let favorites = BTreeSet::from([item.id().clone()]);
        let items = [&item];
        let props = ItemViewProps {
            items: &items,
            cursor: None,
            selection: &selection,
            favorites: &favorites,
            opened: None,
            moving: Some(item.id()),
            column: None,
            title: String::new(),
            show_icons: false,
        };
        assert_eq!(props.marker(&item), ">");
        let props = ItemViewProps {
            moving: None,
            ..props
        };
        assert_eq!(props.marker(&item), "+");
    }
}
