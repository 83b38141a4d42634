use medialib_core::{ItemId, ViewMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::{App, AppMode, FrameLayout};
use crate::ui::breadcrumb::render_breadcrumb;
use crate::ui::columns::render_columns;
use crate::ui::grid::render_grid;
use crate::ui::list::render_list;
use crate::ui::popup::render_popup;
use crate::ui::preview::render_preview;
use crate::ui::statusbar::{render_search_line, render_statusbar, StatusBarProps};
use crate::ui::ItemViewProps;

/// Main render function: composes the full UI layout each frame and returns
/// the clickable regions it drew.
pub fn render(f: &mut Frame, app: &App) -> FrameLayout {
    let mut hits = Vec::new();
    let mut grid_columns = None;
    let state = app.state();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    let crumbs = state.breadcrumbs();
    let names: Vec<&str> = crumbs.iter().map(|c| c.name()).collect();
    let history = (state.history().can_go_back(), state.history().can_go_forward());
    render_breadcrumb(f, vertical[0], &names, history, &mut hits);

    let (main_area, preview_area) = split_preview(vertical[1], state.preview_visible());
    let moving = moving_id(app);

    match state.mode() {
        ViewMode::Columns => render_columns(
            f,
            main_area,
            state,
            app.focus_column(),
            app.cursor(),
            moving.as_ref(),
            app.show_icons(),
            &mut hits,
        ),
        mode => {
            let items = state.visible_items();
            let props = ItemViewProps {
                items: &items,
                cursor: Some(app.cursor()),
                selection: state.selection(),
                favorites: state.favorites(),
                opened: None,
                moving: moving.as_ref(),
                column: None,
                title: folder_title(app),
                show_icons: app.show_icons(),
            };
            if mode == ViewMode::Grid {
                grid_columns = Some(render_grid(f, main_area, &props, app.grid_columns(), &mut hits));
            } else {
                render_list(f, main_area, &props, true, &mut hits);
            }
        }
    }

    if let Some(area) = preview_area {
        render_preview(f, area, state, app.show_icons());
    }

    match app.mode() {
        AppMode::Search(query) => {
            render_search_line(f, vertical[2], query, state.visible_items().len());
        }
        _ => {
            let moving_name = moving
                .as_ref()
                .and_then(|id| state.store().get(id))
                .map(|item| item.name());
            let status_props = StatusBarProps {
                item_count: app.focused_ids().len(),
                cursor: app.cursor(),
                cursor_item: app.cursor_item(),
                selected_count: state.selection().len(),
                view_mode: state.mode(),
                sort: state.sort(),
                moving: moving_name,
                drop_hint: app.drop_hint(),
                status_message: app.status_message(),
            };
            render_statusbar(f, vertical[2], &status_props);
        }
    }

    if *app.mode() == AppMode::Help {
        render_help_popup(f);
    }

    FrameLayout { hits, grid_columns }
}

/// Main view | preview (30%) when the preview pane is shown.
fn split_preview(area: Rect, show_preview: bool) -> (Rect, Option<Rect>) {
    if !show_preview {
        return (area, None);
    }
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);
    (horizontal[0], Some(horizontal[1]))
}

/// The item being moved: an active mouse drag wins over a keyboard mark.
fn moving_id(app: &App) -> Option<ItemId> {
    app.sensor()
        .active_id()
        .or(app.marked())
        .cloned()
}

fn folder_title(app: &App) -> String {
    let state = app.state();
    let name = state
        .current_folder_id()
        .and_then(|id| state.store().get(id))
        .map_or("Library", |folder| folder.name());
    if state.search().is_empty() {
        name.to_owned()
    } else {
        format!("{name} (filter: {})", state.search())
    }
}

fn render_help_popup(f: &mut Frame) {
    let lines = vec![
        "j/k      - Move down/up".to_owned(),
        "h/l      - Move left/right (column in columns view)".to_owned(),
        "gg/G     - Jump to top/bottom".to_owned(),
        "J/K      - Extend selection down/up".to_owned(),
        "Space    - Select item".to_owned(),
        "t        - Toggle item in selection".to_owned(),
        "v        - Select range from last selected".to_owned(),
        "a        - Select all".to_owned(),
        "Esc      - Clear selection".to_owned(),
        "x        - Forget selected items that are gone".to_owned(),
        "Enter    - Open folder / preview file".to_owned(),
        "Bksp/u   - Up one folder".to_owned(),
        "~        - Library root".to_owned(),
        "0-9      - Jump to breadcrumb".to_owned(),
        "[/]      - Back/forward".to_owned(),
        "Tab      - Cycle grid/list/columns".to_owned(),
        "p        - Toggle preview".to_owned(),
        "f        - Toggle favorite".to_owned(),
        "'        - Jump to next favorite".to_owned(),
        "/        - Filter by name".to_owned(),
        "s/S      - Sort field/direction".to_owned(),
        "F        - Toggle folders first".to_owned(),
        "m/M      - Mark item / move it into folder".to_owned(),
        "R/W      - Reload / save the library file".to_owned(),
        "mouse    - Click, Ctrl/Shift-click, hold to drag".to_owned(),
        "q        - Quit".to_owned(),
        "?        - This help".to_owned(),
        "".to_owned(),
        "Press Esc or ? to close".to_owned(),
    ];
    render_popup(f, "Help", &lines);
}
