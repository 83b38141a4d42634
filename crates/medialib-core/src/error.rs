//! Error types for `medialib-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::path::PathBuf;

use crate::fs::item::ItemId;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Failed to parse a JSON item list.
    #[error("items parse error: {0}")]
    ItemsParse(String),

    /// Failed to write the item list back out as JSON.
    #[error("items serialize error: {0}")]
    ItemsSerialize(String),

    /// Two items in the store share the same id.
    #[error("duplicate item id: {0}")]
    DuplicateId(ItemId),

    /// No item with this id exists in the store.
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    /// A folder was expected but the item is a file or image.
    #[error("not a folder: {0}")]
    NotAFolder(ItemId),

    /// Reparenting `item` under `target` would make a folder its own ancestor.
    #[error("moving {item} into {target} would create a cycle")]
    WouldCycle {
        /// The item being dragged.
        item: ItemId,
        /// The folder it was dropped on.
        target: ItemId,
    },

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Maps an I/O error on `path` to the most specific variant.
    pub(crate) fn from_io(e: std::io::Error, path: &std::path::Path) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        }
    }
}

/// Convenience alias used throughout `medialib-core`.
pub type CoreResult<T> = Result<T, CoreError>;
