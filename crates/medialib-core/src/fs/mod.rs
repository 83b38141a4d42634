//! Virtual file tree: item model, flat store, and reparenting.
//!
//! Items ([`item::FileSystemItem`]) are kept in a flat [`store::ItemStore`]
//! keyed by id; the tree is implied by `parent_id`. [`ops::move_item`] is
//! the only structural mutation.

pub mod item;
pub mod ops;
pub mod store;

pub use item::{FileSystemItem, ItemId, ItemKind};
pub use ops::{move_item, CycleGuard, MoveOutcome};
pub use store::{ItemStore, DEFAULT_MAX_DEPTH};
