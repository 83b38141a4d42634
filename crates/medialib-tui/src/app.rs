use std::time::{Duration, Instant};

use medialib_core::{
    DragSensor, FileSystemItem, ItemId, Modifiers, MoveOutcome, Notice, Point, PointerRelease,
    ViewEvent, ViewMode, ViewState,
};
use ratatui::layout::Rect;

/// Two clicks on the same item within this window count as a double click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Application mode: decides how input is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// Typing a search query; the string is the query so far.
    Search(String),
    Help,
}

/// What a rendered screen region stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// An item tile or row. `column` is set in columns view.
    Item { id: ItemId, column: Option<usize> },
    /// Breadcrumb segment; clicking keeps the first `n` path entries.
    Crumb(usize),
}

/// A clickable area recorded during the last render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub area: Rect,
    pub target: HitTarget,
}

impl HitRegion {
    pub fn item(area: Rect, id: ItemId, column: Option<usize>) -> Self {
        Self {
            area,
            target: HitTarget::Item { id, column },
        }
    }

    pub fn crumb(area: Rect, len: usize) -> Self {
        Self {
            area,
            target: HitTarget::Crumb(len),
        }
    }

    fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.area.x && x < self.area.right() && y >= self.area.y && y < self.area.bottom()
    }
}

/// What the last frame drew: clickable regions and the grid's tiles per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameLayout {
    pub hits: Vec<HitRegion>,
    /// Set when the grid was drawn.
    pub grid_columns: Option<u16>,
}

/// Top-level application state: the core [`ViewState`] plus what only the
/// terminal needs (cursor, focused column, pointer gesture, hit map).
///
/// Immutable: every transition consumes `self` and returns a new `App`.
#[derive(Debug, Clone)]
pub struct App {
    state: ViewState,
    cursor: usize,
    focus_column: usize,
    mode: AppMode,
    status_message: Option<String>,
    should_quit: bool,
    marked: Option<ItemId>,
    sensor: DragSensor,
    press: Option<(Option<usize>, Modifiers)>,
    last_click: Option<(ItemId, Instant)>,
    /// Item under the pointer while dragging.
    hover: Option<ItemId>,
    last_favorite: Option<ItemId>,
    hits: Vec<HitRegion>,
    grid_columns: u16,
    rendered_columns: Option<u16>,
    show_icons: bool,
}

impl App {
    pub fn new(state: ViewState, sensor: DragSensor, grid_columns: u16) -> Self {
        let focus_column = state.path().len();
        Self {
            state,
            cursor: 0,
            focus_column,
            mode: AppMode::Normal,
            status_message: None,
            should_quit: false,
            marked: None,
            sensor,
            press: None,
            last_click: None,
            hover: None,
            last_favorite: None,
            hits: Vec::new(),
            grid_columns: grid_columns.max(1),
            rendered_columns: None,
            show_icons: true,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focus_column(&self) -> usize {
        self.focus_column
    }

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn marked(&self) -> Option<&ItemId> {
        self.marked.as_ref()
    }

    pub fn sensor(&self) -> &DragSensor {
        &self.sensor
    }

    pub fn grid_columns(&self) -> u16 {
        self.grid_columns
    }

    /// Row length for vertical moves: what the grid last drew, else the
    /// configured column count.
    pub fn grid_step(&self) -> u16 {
        self.rendered_columns.unwrap_or(self.grid_columns)
    }

    pub fn show_icons(&self) -> bool {
        self.show_icons
    }

    #[must_use]
    pub fn with_show_icons(self, show_icons: bool) -> Self {
        Self { show_icons, ..self }
    }

    #[must_use]
    pub fn with_mode(self, mode: AppMode) -> Self {
        Self { mode, ..self }
    }

    #[must_use]
    pub fn with_status(self, message: String) -> Self {
        Self {
            status_message: Some(message),
            ..self
        }
    }

    #[must_use]
    pub fn with_clear_status(self) -> Self {
        Self {
            status_message: None,
            ..self
        }
    }

    #[must_use]
    pub fn with_quit(self) -> Self {
        Self {
            should_quit: true,
            ..self
        }
    }

    #[must_use]
    pub fn with_hits(self, hits: Vec<HitRegion>) -> Self {
        Self { hits, ..self }
    }

    #[must_use]
    pub fn with_layout(self, layout: FrameLayout) -> Self {
        let rendered_columns = layout.grid_columns.or(self.rendered_columns);
        Self {
            rendered_columns,
            ..self
        }
        .with_hits(layout.hits)
    }

    /// The column the selection engine should resolve clicks against.
    pub fn focused_column(&self) -> Option<usize> {
        (self.state.mode() == ViewMode::Columns).then_some(self.focus_column)
    }

    /// Ids of the list the cursor moves over.
    pub fn focused_ids(&self) -> Vec<ItemId> {
        self.state.visible_ids(self.focused_column())
    }

    pub fn cursor_id(&self) -> Option<ItemId> {
        self.focused_ids().into_iter().nth(self.cursor)
    }

    pub fn cursor_item(&self) -> Option<&FileSystemItem> {
        self.cursor_id().and_then(|id| self.state.store().get(&id))
    }

    pub fn hit_at(&self, x: u16, y: u16) -> Option<&HitTarget> {
        self.hits.iter().find(|h| h.contains(x, y)).map(|h| &h.target)
    }

    /// Runs `event` through the core and refreshes cursor and status.
    #[must_use]
    pub fn dispatch(self, event: ViewEvent) -> Self {
        let left_folder = self.state.current_folder_id().cloned();
        let (state, notice) = self.state.dispatch(event);
        let status = describe(&state, &notice).or(self.status_message);
        let path_changed = state.path() != self.state.path();

        let app = Self {
            state,
            status_message: status,
            ..self
        };
        if !path_changed || app.state.mode() == ViewMode::Columns {
            return app.settle();
        }
        // Land on the folder we just left when going up, else on the first item.
        let cursor = left_folder
            .and_then(|left| app.focused_ids().iter().position(|id| *id == left))
            .unwrap_or(0);
        Self { cursor, ..app }.settle()
    }

    /// Clamps the focused column and the cursor to what is on screen.
    fn settle(self) -> Self {
        let focus_column = self.focus_column.min(self.state.path().len());
        let app = Self {
            focus_column,
            ..self
        };
        let len = app.focused_ids().len();
        let cursor = app.cursor.min(len.saturating_sub(1));
        Self { cursor, ..app }
    }

    #[must_use]
    pub fn with_cursor(self, cursor: usize) -> Self {
        Self { cursor, ..self }.settle()
    }

    /// Moves the cursor by `delta` entries, stopping at either end.
    #[must_use]
    pub fn with_cursor_delta(self, delta: isize) -> Self {
        let cursor = self.cursor.saturating_add_signed(delta);
        self.with_cursor(cursor)
    }

    /// One row in the grid, one entry elsewhere.
    #[must_use]
    pub fn with_cursor_vertical(self, down: bool) -> Self {
        let step = if self.state.mode() == ViewMode::Grid {
            isize::from(i16::try_from(self.grid_step()).unwrap_or(i16::MAX))
        } else {
            1
        };
        self.with_cursor_delta(if down { step } else { -step })
    }

    /// Left/right: previous/next tile in the grid, previous/next column in
    /// columns view.
    #[must_use]
    pub fn with_cursor_horizontal(self, right: bool) -> Self {
        match self.state.mode() {
            ViewMode::Grid => self.with_cursor_delta(if right { 1 } else { -1 }),
            ViewMode::List => self,
            ViewMode::Columns if right => self.focus_right(),
            ViewMode::Columns => self.focus_left(),
        }
    }

    fn focus_right(self) -> Self {
        if self.focus_column < self.state.path().len() {
            let focus_column = self.focus_column + 1;
            return Self {
                focus_column,
                cursor: 0,
                ..self
            };
        }
        let on_folder = self.cursor_item().is_some_and(FileSystemItem::is_folder);
        if !on_folder {
            return self;
        }
        let app = self.click_cursor(Modifiers::NONE);
        let focus_column = app.focus_column + 1;
        Self {
            focus_column,
            cursor: 0,
            ..app
        }
        .settle()
    }

    fn focus_left(self) -> Self {
        if self.focus_column == 0 {
            return self;
        }
        let focus_column = self.focus_column - 1;
        let app = Self {
            focus_column,
            ..self
        };
        let opened = app.state.path().ids().get(focus_column).cloned();
        let cursor = opened
            .and_then(|open| app.focused_ids().iter().position(|id| *id == open))
            .unwrap_or(0);
        app.with_cursor(cursor)
    }

    /// Click on the item under the cursor with the given modifiers.
    #[must_use]
    pub fn click_cursor(self, modifiers: Modifiers) -> Self {
        match self.cursor_id() {
            Some(id) => {
                let column = self.focused_column();
                self.dispatch(ViewEvent::Click {
                    id,
                    modifiers,
                    column,
                })
            }
            None => self,
        }
    }

    /// Moves the cursor and extends the selection to the new position.
    #[must_use]
    pub fn with_range_step(self, down: bool) -> Self {
        let app = if self.state.selection().is_empty() {
            self.click_cursor(Modifiers::NONE)
        } else {
            self
        };
        app.with_cursor_vertical(down).click_cursor(Modifiers::SHIFT)
    }

    /// Enter on the cursor item: open folders, preview files.
    #[must_use]
    pub fn open_cursor(self) -> Self {
        match self.cursor_id() {
            Some(id) => {
                let column = self.focused_column();
                self.open_item(id, column)
            }
            None => self,
        }
    }

    fn open_item(self, id: ItemId, column: Option<usize>) -> Self {
        let is_folder = self.state.store().get(&id).is_some_and(FileSystemItem::is_folder);
        if !is_folder {
            let app = self.dispatch(ViewEvent::Click {
                id,
                modifiers: Modifiers::NONE,
                column,
            });
            return if app.state.preview_visible() {
                app
            } else {
                app.dispatch(ViewEvent::TogglePreview)
            };
        }
        match column {
            Some(level) => {
                let app = self.dispatch(ViewEvent::Click {
                    id,
                    modifiers: Modifiers::NONE,
                    column: Some(level),
                });
                Self {
                    focus_column: level + 1,
                    cursor: 0,
                    ..app
                }
                .settle()
            }
            None => self.dispatch(ViewEvent::Open(id)),
        }
    }

    #[must_use]
    pub fn select_all(self) -> Self {
        let column = self.focused_column();
        self.dispatch(ViewEvent::SelectAll { column })
    }

    #[must_use]
    pub fn toggle_favorite(self) -> Self {
        match self.cursor_id() {
            Some(id) => self.dispatch(ViewEvent::ToggleFavorite(id)),
            None => self,
        }
    }

    /// Jumps to the next favorite after the last one visited, wrapping around.
    #[must_use]
    pub fn next_favorite(self) -> Self {
        let favorites: Vec<ItemId> = self
            .state
            .favorite_items()
            .into_iter()
            .map(|item| item.id().clone())
            .collect();
        let next = self
            .last_favorite
            .as_ref()
            .and_then(|last| favorites.iter().position(|id| id == last))
            .and_then(|pos| favorites.get(pos + 1))
            .or_else(|| favorites.first())
            .cloned();
        match next {
            Some(id) => Self {
                last_favorite: Some(id.clone()),
                ..self
            }
            .reveal(id),
            None => self.with_status("No favorites yet (press f on an item)".to_string()),
        }
    }

    /// Opens the folder chain down to `id` and puts the cursor on it.
    #[must_use]
    pub fn reveal(self, id: ItemId) -> Self {
        let name = self.state.store().get(&id).map(|i| i.name().to_owned());
        let app = self.dispatch(ViewEvent::Reveal(id.clone()));
        let focus_column = app.state.path().len();
        let app = Self {
            focus_column,
            ..app
        };
        let cursor = app.focused_ids().iter().position(|x| *x == id).unwrap_or(0);
        let app = app.with_cursor(cursor);
        match name {
            Some(name) => app.with_status(format!("Revealed {name}")),
            None => app,
        }
    }

    /// Where the item being moved would land: the hovered item while
    /// dragging, the cursor item for a keyboard mark.
    pub fn drop_hint(&self) -> Option<String> {
        let (active, target) = if self.sensor.is_dragging() {
            (self.sensor.active_id()?, self.hover.clone())
        } else {
            (self.marked.as_ref()?, self.cursor_id())
        };
        let hint = match self.state.preview_drop(active, target.as_ref()) {
            Ok(MoveOutcome::Moved { target, .. }) => {
                let name = self.state.store().get(&target).map_or("folder", |t| t.name());
                format!("drop into {name}")
            }
            Ok(MoveOutcome::Ignored) => "not a drop target".to_string(),
            Err(e) => e.to_string(),
        };
        Some(hint)
    }

    #[must_use]
    pub fn cycle_sort(self) -> Self {
        let (field, direction) = self.state.sort();
        let app = self.dispatch(ViewEvent::SetSort(field.next(), direction));
        let label = app.state.sort().0.label();
        app.with_status(format!("Sort by {label}"))
    }

    #[must_use]
    pub fn flip_sort(self) -> Self {
        let (field, direction) = self.state.sort();
        self.dispatch(ViewEvent::SetSort(field, direction.flip()))
    }

    /// Keyboard drag: remember the cursor item as the thing to move.
    #[must_use]
    pub fn mark_cursor(self) -> Self {
        match self.cursor_item() {
            Some(item) => {
                let message = format!("Marked {}: move the cursor to a folder and press M", item.name());
                let marked = Some(item.id().clone());
                Self { marked, ..self }.with_status(message)
            }
            None => self,
        }
    }

    /// Keyboard drop: move the marked item onto the cursor item.
    #[must_use]
    pub fn drop_marked(self) -> Self {
        let Some(active) = self.marked.clone() else {
            return self.with_status("Nothing marked (press m first)".to_string());
        };
        let target = self.cursor_id();
        let app = Self {
            marked: None,
            ..self
        };
        app.dispatch(ViewEvent::Drop { active, target })
    }

    #[must_use]
    pub fn enter_search(self) -> Self {
        let query = self.state.search().to_owned();
        self.with_mode(AppMode::Search(query))
    }

    #[must_use]
    pub fn search_input(self, query: String) -> Self {
        self.with_mode(AppMode::Search(query.clone()))
            .with_cursor(0)
            .dispatch(ViewEvent::SetSearch(query))
    }

    #[must_use]
    pub fn search_cancel(self) -> Self {
        self.with_mode(AppMode::Normal)
            .dispatch(ViewEvent::SetSearch(String::new()))
    }

    /// Pointer pressed at `(x, y)`.
    #[must_use]
    pub fn pointer_down(self, x: u16, y: u16, modifiers: Modifiers, now: Instant) -> Self {
        match self.hit_at(x, y).cloned() {
            Some(HitTarget::Item { id, column }) => {
                let sensor = self.sensor.clone().pointer_down(id, point(x, y), now);
                Self {
                    sensor,
                    press: Some((column, modifiers)),
                    ..self
                }
            }
            Some(HitTarget::Crumb(len)) => self.dispatch(ViewEvent::NavigateTo(len)),
            None => self,
        }
    }

    /// Pointer moved with the button held.
    #[must_use]
    pub fn pointer_drag(self, x: u16, y: u16, now: Instant) -> Self {
        let sensor = self.sensor.clone().pointer_move(point(x, y), now);
        let hover = match self.hit_at(x, y) {
            Some(HitTarget::Item { id, .. }) => Some(id.clone()),
            _ => None,
        };
        Self {
            sensor,
            hover,
            ..self
        }
    }

    /// Pointer released at `(x, y)`: a click, a double click, or a drop.
    #[must_use]
    pub fn pointer_up(self, x: u16, y: u16, now: Instant) -> Self {
        let (sensor, release) = self.sensor.clone().pointer_up(now);
        let (column, modifiers) = self.press.unwrap_or((None, Modifiers::NONE));
        let app = Self {
            sensor,
            press: None,
            hover: None,
            ..self
        };
        match release {
            PointerRelease::Click(id) => app.pointer_click(id, column, modifiers, now),
            PointerRelease::Drop { active } => {
                let target = match app.hit_at(x, y) {
                    Some(HitTarget::Item { id, .. }) => Some(id.clone()),
                    _ => None,
                };
                app.dispatch(ViewEvent::Drop { active, target })
            }
            PointerRelease::None => app,
        }
    }

    fn pointer_click(self, id: ItemId, column: Option<usize>, modifiers: Modifiers, now: Instant) -> Self {
        let is_double = self.last_click.as_ref().is_some_and(|(last, at)| {
            *last == id && now.saturating_duration_since(*at) <= DOUBLE_CLICK_WINDOW
        });
        let focus_column = column.unwrap_or(self.focus_column);
        let app = Self {
            focus_column,
            ..self
        };
        let cursor = app.focused_ids().iter().position(|x| *x == id);
        let app = match cursor {
            Some(cursor) => app.with_cursor(cursor),
            None => app,
        };

        if is_double && modifiers == Modifiers::NONE {
            let app = Self {
                last_click: None,
                ..app
            };
            return app.open_item(id, column);
        }
        let app = app.dispatch(ViewEvent::Click {
            id: id.clone(),
            modifiers,
            column,
        });
        Self {
            last_click: Some((id, now)),
            ..app
        }
    }

    /// Advances time-based state (drag activation while the pointer is held still).
    #[must_use]
    pub fn tick(self, now: Instant) -> Self {
        if !self.sensor.is_pressed() {
            return self;
        }
        let sensor = self.sensor.clone().tick(now);
        Self { sensor, ..self }
    }
}

fn point(x: u16, y: u16) -> Point {
    Point::new(i32::from(x), i32::from(y))
}

/// Turns a core notice into a status line, when it is worth one.
fn describe(state: &ViewState, notice: &Notice) -> Option<String> {
    let name = |id: &ItemId| {
        state
            .store()
            .get(id)
            .map(|i| i.name().to_owned())
            .unwrap_or_else(|| id.to_string())
    };
    match notice {
        Notice::Moved { item, target } => Some(format!("Moved {} into {}", name(item), name(target))),
        Notice::MoveIgnored => Some("Drop ignored: not onto another folder".to_string()),
        Notice::Failed(message) => Some(message.clone()),
        Notice::SelectionChanged { count } if *count > 1 => Some(format!("{count} selected")),
        Notice::ItemsReplaced { count } => Some(format!("{count} items loaded")),
        _ => None,
    }
}
