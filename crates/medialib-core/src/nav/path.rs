//! Breadcrumb navigation path.

use crate::error::CoreResult;
use crate::fs::item::{FileSystemItem, ItemId};
use crate::fs::store::ItemStore;

/// Ordered chain of folder ids from the root to the open folder.
///
/// An empty path means the root is open. Immutable: every transition
/// returns a new `NavPath`.
///
/// `navigate_into` does not check that the folder is a child of the
/// current tail, so callers can build a path that skips levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NavPath {
    ids: Vec<ItemId>,
}

impl NavPath {
    /// Creates a path at the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an explicit chain of folder ids.
    pub fn from_ids(ids: Vec<ItemId>) -> Self {
        Self { ids }
    }

    /// Replaces the whole path with the breadcrumb of folder `id`.
    ///
    /// # Errors
    ///
    /// - [`crate::CoreError::UnknownItem`] / [`crate::CoreError::NotAFolder`]
    ///   if `id` is not a folder in `store`.
    pub fn open_folder(store: &ItemStore, id: &ItemId, max_depth: usize) -> CoreResult<Self> {
        store.folder(id)?;
        Ok(Self::from_ids(store.breadcrumb_for(id, max_depth)))
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns `true` when the root is open.
    pub fn is_root(&self) -> bool {
        self.ids.is_empty()
    }

    /// Id of the open folder, or `None` at the root.
    pub fn current_folder_id(&self) -> Option<&ItemId> {
        self.ids.last()
    }

    /// Appends `id` to the path.
    ///
    /// # Errors
    ///
    /// - [`crate::CoreError::NotAFolder`] if `id` is a file or image.
    /// - [`crate::CoreError::UnknownItem`] if `id` is not in `store`.
    pub fn navigate_into(self, store: &ItemStore, id: &ItemId) -> CoreResult<Self> {
        store.folder(id)?;
        let mut ids = self.ids;
        ids.push(id.clone());
        Ok(Self { ids })
    }

    /// Truncates the path to its first `len` entries (breadcrumb click).
    ///
    /// `0` is the Home crumb. Lengths at or beyond the current length leave
    /// the path unchanged.
    pub fn navigate_to(self, len: usize) -> Self {
        let mut ids = self.ids;
        ids.truncate(len);
        Self { ids }
    }

    /// Drops the last entry. No-op at the root.
    pub fn navigate_up(self) -> Self {
        let mut ids = self.ids;
        ids.pop();
        Self { ids }
    }

    /// Children of the open folder, in store order.
    pub fn current_items<'a>(&self, store: &'a ItemStore) -> Vec<&'a FileSystemItem> {
        store.children(self.current_folder_id())
    }

    /// Resolves each path entry to its item, skipping ids the store no longer has.
    pub fn segments<'a>(&self, store: &'a ItemStore) -> Vec<&'a FileSystemItem> {
        self.ids.iter().filter_map(|id| store.get(id)).collect()
    }

    /// Cuts the path at the first entry that is no longer a folder in `store`.
    pub fn prune(self, store: &ItemStore) -> Self {
        let valid = self
            .ids
            .iter()
            .take_while(|id| store.get(id).is_some_and(FileSystemItem::is_folder))
            .count();
        self.navigate_to(valid)
    }
}
