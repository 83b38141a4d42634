//! Media library core: UI-agnostic virtual file tree logic.
//!
//! `medialib-core` models the media library as a flat list of items linked
//! by parent pointers, and exposes the navigation, selection and
//! drag-and-drop rules that every view (grid, list, columns) shares. It is
//! decoupled from any UI framework: a frontend feeds [`ViewEvent`]s into
//! [`ViewState::apply`] and redraws from the returned state.
//!
//! # Modules
//!
//! - [`fs`]: Item model: [`FileSystemItem`], the flat [`ItemStore`], and reparenting.
//! - [`nav`]: Navigation path, history, the selection engine, sorting and fuzzy search.
//! - [`drag`]: Drag activation (telling a click from a drag).
//! - [`view`]: View modes and the [`ViewState`] reducer.
//! - [`config`]: User-facing configuration (TOML-based settings).
//! - [`event`]: Event and notice types for UI ↔ Core communication.
//! - [`error`]: Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod fs;
pub mod nav;
pub mod view;

pub use config::settings::Config;
pub use drag::{DragConstraint, DragSensor, Point, PointerRelease};
pub use error::{CoreError, CoreResult};
pub use event::{Notice, ViewEvent};
pub use fs::{move_item, CycleGuard, FileSystemItem, ItemId, ItemKind, ItemStore, MoveOutcome};
pub use nav::filter::{fuzzy_filter, sort_items, FuzzyMatch, SortDirection, SortField};
pub use nav::history::History;
pub use nav::path::NavPath;
pub use nav::selection::{ClickIntent, Modifiers, Selection};
pub use view::{Column, ViewMode, ViewSettings, ViewState};
