//! View state: the whole browser as a reducer over [`ViewEvent`]s.
//!
//! [`ViewState`] bundles the item store, navigation path, selection and
//! presentation preferences. [`ViewState::apply`] is a pure function from
//! `(state, event)` to the next state, so every interaction can be tested
//! without a frontend.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::settings::Config;
use crate::error::{CoreError, CoreResult};
use crate::event::{Notice, ViewEvent};
use crate::fs::item::{FileSystemItem, ItemId};
use crate::fs::ops::{move_item, CycleGuard, MoveOutcome};
use crate::fs::store::{ItemStore, DEFAULT_MAX_DEPTH};
use crate::nav::filter::{fuzzy_filter, sort_items, SortDirection, SortField};
use crate::nav::history::History;
use crate::nav::path::NavPath;
use crate::nav::selection::{ClickIntent, Selection};

/// How the open folder is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    /// Finder-style: one column per path level plus the root.
    Columns,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [Self::Grid, Self::List, Self::Columns];

    /// Grid → List → Columns → Grid.
    pub fn next(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Columns,
            Self::Columns => Self::Grid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
            Self::Columns => "columns",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::ConfigParse(format!("unknown view mode: {s}")))
    }
}

/// One column of the columns view.
#[derive(Debug, Clone)]
pub struct Column<'a> {
    /// `0` is the root column; column `k` lists the children of path entry `k - 1`.
    pub level: usize,
    pub folder_id: Option<ItemId>,
    pub items: Vec<&'a FileSystemItem>,
}

/// Behaviour switches that come from configuration rather than interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub clear_on_navigate: bool,
    pub cycle_guard: CycleGuard,
    pub max_depth: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            clear_on_navigate: false,
            cycle_guard: CycleGuard::Reject,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Everything a renderer needs to draw the media library.
///
/// Immutable: [`ViewState::apply`] returns a new state and leaves `self`
/// untouched, so a rejected event costs nothing to roll back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    store: ItemStore,
    path: NavPath,
    selection: Selection,
    mode: ViewMode,
    preview_visible: bool,
    favorites: BTreeSet<ItemId>,
    history: History,
    search: String,
    sort_field: SortField,
    sort_direction: SortDirection,
    folders_first: bool,
    settings: ViewSettings,
}

impl ViewState {
    /// Creates a state at the root with default preferences.
    pub fn new(store: ItemStore) -> Self {
        Self {
            store,
            path: NavPath::new(),
            selection: Selection::new(),
            mode: ViewMode::default(),
            preview_visible: true,
            favorites: BTreeSet::new(),
            history: History::new(),
            search: String::new(),
            sort_field: SortField::Name,
            sort_direction: SortDirection::Ascending,
            folders_first: true,
            settings: ViewSettings::default(),
        }
    }

    /// Creates a state at the root using the preferences in `config`.
    pub fn from_config(store: ItemStore, config: &Config) -> Self {
        Self {
            mode: config.view.default_mode,
            preview_visible: config.view.show_preview,
            folders_first: config.view.folders_first,
            sort_field: SortField::parse(&config.view.default_sort).unwrap_or_default(),
            settings: ViewSettings {
                clear_on_navigate: config.selection.clear_on_navigate,
                cycle_guard: config.drag.cycle_guard(),
                max_depth: config.navigation.max_breadcrumb_depth,
            },
            ..Self::new(store)
        }
    }

    #[must_use]
    pub fn with_settings(self, settings: ViewSettings) -> Self {
        Self { settings, ..self }
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn path(&self) -> &NavPath {
        &self.path
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn preview_visible(&self) -> bool {
        self.preview_visible
    }

    pub fn favorites(&self) -> &BTreeSet<ItemId> {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &ItemId) -> bool {
        self.favorites.contains(id)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> (SortField, SortDirection) {
        (self.sort_field, self.sort_direction)
    }

    pub fn folders_first(&self) -> bool {
        self.folders_first
    }

    pub fn settings(&self) -> ViewSettings {
        self.settings
    }

    pub fn current_folder_id(&self) -> Option<&ItemId> {
        self.path.current_folder_id()
    }

    /// Children of the open folder in store order.
    pub fn current_items(&self) -> Vec<&FileSystemItem> {
        self.path.current_items(&self.store)
    }

    /// The open folder's contents as grid and list views show them:
    /// sorted, then narrowed by the search query (best match first).
    pub fn visible_items(&self) -> Vec<&FileSystemItem> {
        let sorted = self.arrange(&self.current_items());
        if self.search.is_empty() {
            return sorted;
        }
        fuzzy_filter(&sorted, &self.search)
            .into_iter()
            .map(|m| m.item())
            .collect()
    }

    /// Root column plus one column per path entry.
    pub fn columns(&self) -> Vec<Column<'_>> {
        let root = std::iter::once(None);
        let levels = self.path.ids().iter().map(Some);
        root.chain(levels)
            .enumerate()
            .map(|(level, folder_id)| Column {
                level,
                folder_id: folder_id.cloned(),
                items: self.arrange(&self.store.children(folder_id)),
            })
            .collect()
    }

    /// The ordered ids a click is resolved against.
    ///
    /// Grid and list use the visible folder contents. Columns view uses the
    /// column at `column`, or the deepest column when `None`.
    pub fn visible_ids(&self, column: Option<usize>) -> Vec<ItemId> {
        let items = match self.mode {
            ViewMode::Grid | ViewMode::List => self.visible_items(),
            ViewMode::Columns => {
                let level = column.unwrap_or(self.path.len());
                self.columns()
                    .into_iter()
                    .nth(level)
                    .map(|c| c.items)
                    .unwrap_or_default()
            }
        };
        items.into_iter().map(|i| i.id().clone()).collect()
    }

    /// Selected items that still exist, in selection order.
    pub fn selected_items(&self) -> Vec<&FileSystemItem> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.store.get(id))
            .collect()
    }

    /// Items named by the path, root first.
    pub fn breadcrumbs(&self) -> Vec<&FileSystemItem> {
        self.path.segments(&self.store)
    }

    /// The item shown in the preview pane: the selection anchor.
    pub fn preview_item(&self) -> Option<&FileSystemItem> {
        self.selection.anchor().and_then(|id| self.store.get(id))
    }

    /// Favorite items in id order, skipping ones that no longer exist.
    pub fn favorite_items(&self) -> Vec<&FileSystemItem> {
        self.favorites.iter().filter_map(|id| self.store.get(id)).collect()
    }

    /// Reduces `event` into the next state.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotAFolder`] / [`CoreError::UnknownItem`] when opening
    ///   or revealing something that is not a folder in the store.
    /// - [`CoreError::UnknownItem`] when favoriting a missing item.
    /// - [`CoreError::WouldCycle`] when a drop would make a folder its own
    ///   ancestor and cycles are guarded against.
    /// - [`CoreError::DuplicateId`] when replacement items share an id.
    pub fn apply(&self, event: ViewEvent) -> CoreResult<Self> {
        let state = self.clone();
        match event {
            ViewEvent::Click {
                id,
                modifiers,
                column,
            } => Ok(state.click(&id, ClickIntent::from_modifiers(modifiers), column)),
            ViewEvent::Open(id) => {
                let path = state.path.clone().navigate_into(&state.store, &id)?;
                Ok(state.navigate(path))
            }
            ViewEvent::Reveal(id) => {
                let max_depth = state.settings.max_depth;
                match state.store.get(&id).map(FileSystemItem::is_folder) {
                    None => Err(CoreError::UnknownItem(id)),
                    Some(true) => {
                        let path = NavPath::open_folder(&state.store, &id, max_depth)?;
                        Ok(state.navigate(path))
                    }
                    Some(false) => {
                        let path = NavPath::from_ids(state.store.breadcrumb_for(&id, max_depth));
                        let revealed = state.navigate(path);
                        Ok(Self {
                            selection: Selection::exclusive(&id),
                            ..revealed
                        })
                    }
                }
            }
            ViewEvent::NavigateTo(len) => {
                let path = state.path.clone().navigate_to(len);
                Ok(state.navigate(path))
            }
            ViewEvent::NavigateUp => {
                let path = state.path.clone().navigate_up();
                Ok(state.navigate(path))
            }
            ViewEvent::Home => Ok(state.navigate(NavPath::new())),
            ViewEvent::Back => Ok(state.go_back()),
            ViewEvent::Forward => Ok(state.go_forward()),
            ViewEvent::SetViewMode(mode) => Ok(Self { mode, ..state }),
            ViewEvent::CycleViewMode => Ok(Self {
                mode: state.mode.next(),
                ..state
            }),
            ViewEvent::TogglePreview => Ok(Self {
                preview_visible: !state.preview_visible,
                ..state
            }),
            ViewEvent::ToggleFavorite(id) => {
                if !state.store.contains(&id) {
                    return Err(CoreError::UnknownItem(id));
                }
                let mut favorites = state.favorites.clone();
                if !favorites.remove(&id) {
                    favorites.insert(id);
                }
                Ok(Self { favorites, ..state })
            }
            ViewEvent::Drop { active, target } => {
                state.drop_onto(&active, target.as_ref()).map(|(next, _)| next)
            }
            ViewEvent::SelectAll { column } => {
                let visible = state.visible_ids(column);
                Ok(Self {
                    selection: Selection::select_all(&visible),
                    ..state
                })
            }
            ViewEvent::ClearSelection => Ok(Self {
                selection: Selection::new(),
                ..state
            }),
            ViewEvent::PruneSelection => {
                let selection = state.selection.clone().retain_existing(&state.store);
                Ok(Self { selection, ..state })
            }
            ViewEvent::SetSearch(search) => Ok(Self { search, ..state }),
            ViewEvent::SetSort(sort_field, sort_direction) => Ok(Self {
                sort_field,
                sort_direction,
                ..state
            }),
            ViewEvent::ToggleFoldersFirst => Ok(Self {
                folders_first: !state.folders_first,
                ..state
            }),
            ViewEvent::ReplaceItems(items) => {
                let store = state.store.clone().replace(items)?;
                let path = state.path.clone().prune(&store);
                Ok(Self {
                    store,
                    path,
                    ..state
                })
            }
        }
    }

    /// Like [`ViewState::apply`], but never fails: a rejected event leaves
    /// the state unchanged and is reported as [`Notice::Failed`].
    pub fn dispatch(&self, event: ViewEvent) -> (Self, Notice) {
        if let ViewEvent::Drop { active, target } = &event {
            return match self.clone().drop_onto(active, target.as_ref()) {
                Ok((next, MoveOutcome::Moved { item, target })) => {
                    (next, Notice::Moved { item, target })
                }
                Ok((next, MoveOutcome::Ignored)) => (next, Notice::MoveIgnored),
                Err(e) => self.reject(e),
            };
        }
        let replaced = matches!(event, ViewEvent::ReplaceItems(_));

        match self.apply(event) {
            Err(e) => self.reject(e),
            Ok(next) => {
                let notice = if replaced {
                    Notice::ItemsReplaced {
                        count: next.store.len(),
                    }
                } else if next.path != self.path {
                    Notice::Navigated {
                        depth: next.path.len(),
                    }
                } else if next.selection != self.selection {
                    Notice::SelectionChanged {
                        count: next.selection.len(),
                    }
                } else if next != *self {
                    Notice::ViewChanged
                } else {
                    Notice::Unchanged
                };
                (next, notice)
            }
        }
    }

    fn reject(&self, e: CoreError) -> (Self, Notice) {
        tracing::warn!("event rejected: {e}");
        (self.clone(), Notice::Failed(e.to_string()))
    }

    /// Reports how a drop would be handled, without applying it.
    pub fn preview_drop(&self, active: &ItemId, target: Option<&ItemId>) -> CoreResult<MoveOutcome> {
        let (_, outcome) = move_item(self.store.clone(), active, target, self.settings.cycle_guard)?;
        Ok(outcome)
    }

    /// Moves `active` under `target`, reporting what the move engine decided.
    fn drop_onto(
        self,
        active: &ItemId,
        target: Option<&ItemId>,
    ) -> CoreResult<(Self, MoveOutcome)> {
        let guard = self.settings.cycle_guard;
        let (store, outcome) = move_item(self.store.clone(), active, target, guard)?;
        Ok((Self { store, ..self }, outcome))
    }

    fn arrange<'a>(&self, items: &[&'a FileSystemItem]) -> Vec<&'a FileSystemItem> {
        sort_items(items, self.sort_field, self.sort_direction, self.folders_first)
    }

    fn click(self, id: &ItemId, intent: ClickIntent, column: Option<usize>) -> Self {
        let visible = self.visible_ids(column);
        let selection = self.selection.clone().apply(intent, id, &visible);
        if self.mode != ViewMode::Columns {
            return Self { selection, ..self };
        }

        // Columns view couples selection with navigation.
        let level = column.unwrap_or(self.path.len());
        let mut path = self.path.clone().navigate_to(level);
        let opens_folder = intent == ClickIntent::Exclusive
            && self.store.get(id).is_some_and(FileSystemItem::is_folder);
        if opens_folder {
            if let Ok(deeper) = path.clone().navigate_into(&self.store, id) {
                path = deeper;
            }
        }
        let history = self.record(&path);
        Self {
            selection,
            path,
            history,
            ..self
        }
    }

    fn navigate(self, path: NavPath) -> Self {
        if path == self.path {
            return self;
        }
        tracing::debug!("navigate: depth {} -> {}", self.path.len(), path.len());
        let history = self.record(&path);
        let selection = if self.settings.clear_on_navigate {
            Selection::new()
        } else {
            self.selection.clone()
        };
        Self {
            path,
            history,
            selection,
            ..self
        }
    }

    fn record(&self, next: &NavPath) -> History {
        if *next == self.path {
            self.history.clone()
        } else {
            self.history.push(self.path.clone())
        }
    }

    fn go_back(self) -> Self {
        match self.history.go_back(self.path.clone()) {
            Some((history, path)) => self.jump(history, path),
            None => self,
        }
    }

    fn go_forward(self) -> Self {
        match self.history.go_forward(self.path.clone()) {
            Some((history, path)) => self.jump(history, path),
            None => self,
        }
    }

    fn jump(self, history: History, path: NavPath) -> Self {
        let path = path.prune(&self.store);
        let selection = if self.settings.clear_on_navigate {
            Selection::new()
        } else {
            self.selection.clone()
        };
        Self {
            history,
            path,
            selection,
            ..self
        }
    }
}
