//! Event system for communication between a frontend and the view state.
//!
//! The frontend translates user input into [`ViewEvent`]s, which
//! [`crate::view::ViewState`] reduces into a new state and reports on with
//! a [`Notice`]. Any frontend can drive the same core logic this way.

use crate::fs::item::{FileSystemItem, ItemId};
use crate::nav::filter::{SortDirection, SortField};
use crate::nav::selection::Modifiers;
use crate::view::ViewMode;

/// An interaction the frontend asks the view state to perform.
///
/// Events flow **UI → Core**. The core never creates them itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Single click on an item. `column` is the columns-view level the
    /// click happened in; grid and list views pass `None`.
    Click {
        id: ItemId,
        modifiers: Modifiers,
        column: Option<usize>,
    },
    /// Enter a folder (double click). Appends it to the path.
    Open(ItemId),
    /// Jump to any item: the path becomes the folder chain above it.
    Reveal(ItemId),
    /// Breadcrumb click: keep the first `n` path entries.
    NavigateTo(usize),
    /// Leave the open folder.
    NavigateUp,
    /// Return to the root.
    Home,
    /// Previous path in history.
    Back,
    /// Next path in history.
    Forward,
    SetViewMode(ViewMode),
    CycleViewMode,
    TogglePreview,
    ToggleFavorite(ItemId),
    /// End of a drag: drop `active` on `target` (`None` = empty space).
    Drop {
        active: ItemId,
        target: Option<ItemId>,
    },
    /// Select everything visible in `column` (or the folder view).
    SelectAll { column: Option<usize> },
    ClearSelection,
    /// Forget selected ids that no longer exist in the store.
    PruneSelection,
    /// Filter the folder view by a fuzzy query; empty clears it.
    SetSearch(String),
    SetSort(SortField, SortDirection),
    ToggleFoldersFirst,
    /// Whole-list replacement from the item provider.
    ReplaceItems(Vec<FileSystemItem>),
}

/// What an event did, for status lines and logs.
///
/// Notices flow **Core → UI**.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The open folder changed; `depth` is the new path length.
    Navigated { depth: usize },
    /// The selection changed; `count` ids are now selected.
    SelectionChanged { count: usize },
    /// `item` was reparented under `target`.
    Moved { item: ItemId, target: ItemId },
    /// A drop that had no effect.
    MoveIgnored,
    /// The view mode, preview, sort, search or favorites changed.
    ViewChanged,
    /// The item list was replaced.
    ItemsReplaced { count: usize },
    /// The event was valid but changed nothing.
    Unchanged,
    /// The event was rejected; the state is unchanged.
    Failed(String),
}
