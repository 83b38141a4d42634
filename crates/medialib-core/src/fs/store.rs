//! Flat item store with parent-pointer relationships.
//!
//! Items live in a single ordered list indexed by id. The tree is never
//! materialised: children, ancestors and descendants are derived on demand
//! from `parent_id`, so there is exactly one source of truth.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::fs::item::{FileSystemItem, ItemId};

/// Hop limit for upward walks when the caller has no better bound.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// The flat collection of every item, independent of the current view.
///
/// Immutable: structural edits return a new `ItemStore`. Construction
/// rejects duplicate ids because every lookup, selection and drag
/// identifier depends on them being unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<FileSystemItem>,
    index: HashMap<ItemId, usize>,
}

impl ItemStore {
    /// Builds a store from `items`, preserving their order.
    ///
    /// # Errors
    ///
    /// - [`CoreError::DuplicateId`] if two items share an id.
    pub fn new(items: Vec<FileSystemItem>) -> CoreResult<Self> {
        let items: Vec<FileSystemItem> = items.into_iter().map(FileSystemItem::normalized).collect();
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if index.insert(item.id().clone(), pos).is_some() {
                return Err(CoreError::DuplicateId(item.id().clone()));
            }
        }
        Ok(Self { items, index })
    }

    /// Parses a JSON array of items (the provider format).
    ///
    /// # Errors
    ///
    /// - [`CoreError::ItemsParse`] if the JSON is malformed.
    /// - [`CoreError::DuplicateId`] if two items share an id.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let items: Vec<FileSystemItem> =
            serde_json::from_str(json).map_err(|e| CoreError::ItemsParse(e.to_string()))?;
        Self::new(items)
    }

    /// Reads a JSON item list from `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] / [`CoreError::PermissionDenied`] for unreadable files.
    /// - Any error from [`ItemStore::from_json`].
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        let store = Self::from_json(&content)?;
        tracing::debug!("loaded {} items from {}", store.len(), path.display());
        Ok(store)
    }

    /// Serialises the store back to the provider's JSON format.
    ///
    /// # Errors
    ///
    /// - [`CoreError::ItemsSerialize`] if an item cannot be encoded.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(&self.items)
            .map_err(|e| CoreError::ItemsSerialize(e.to_string()))
    }

    /// Writes the item list to `path` in the format [`ItemStore::load`] reads.
    ///
    /// # Errors
    ///
    /// - [`CoreError::ItemsSerialize`] if an item cannot be encoded.
    /// - [`CoreError::NotFound`] / [`CoreError::PermissionDenied`] for unwritable paths.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| CoreError::from_io(e, path))?;
        tracing::debug!("saved {} items to {}", self.len(), path.display());
        Ok(())
    }

    /// Whole-list replacement, as performed by the provider after a move.
    pub fn replace(self, items: Vec<FileSystemItem>) -> CoreResult<Self> {
        Self::new(items)
    }

    pub fn items(&self) -> &[FileSystemItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileSystemItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&FileSystemItem> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id)
    }

    /// Looks up `id` and checks that it is a folder.
    pub fn folder(&self, id: &ItemId) -> CoreResult<&FileSystemItem> {
        let item = self
            .get(id)
            .ok_or_else(|| CoreError::UnknownItem(id.clone()))?;
        if !item.is_folder() {
            return Err(CoreError::NotAFolder(id.clone()));
        }
        Ok(item)
    }

    /// Direct children of `parent` (`None` = root), in store order.
    pub fn children(&self, parent: Option<&ItemId>) -> Vec<&FileSystemItem> {
        self.items
            .iter()
            .filter(|item| item.is_child_of(parent))
            .collect()
    }

    /// Ancestors of `id`, nearest first, following at most `max_depth` hops.
    ///
    /// The hop limit keeps the walk finite if the parent graph contains a
    /// cycle. A dangling `parent_id` ends the walk silently.
    pub fn ancestors(&self, id: &ItemId, max_depth: usize) -> Vec<&FileSystemItem> {
        let mut chain = Vec::new();
        let mut cursor = self.get(id).and_then(FileSystemItem::parent_id);
        while let Some(parent_id) = cursor {
            if chain.len() >= max_depth {
                tracing::warn!("ancestor walk from {id} stopped at depth {max_depth}");
                break;
            }
            let Some(parent) = self.get(parent_id) else {
                break;
            };
            chain.push(parent);
            cursor = parent.parent_id();
        }
        chain
    }

    /// Folder chain from the root down to `id` (inclusive), for breadcrumbs.
    ///
    /// Non-folder entries are skipped so the result is always a valid
    /// navigation path. Unknown ids yield an empty chain.
    pub fn breadcrumb_for(&self, id: &ItemId, max_depth: usize) -> Vec<ItemId> {
        let Some(item) = self.get(id) else {
            return Vec::new();
        };
        let mut chain: Vec<ItemId> = self
            .ancestors(id, max_depth)
            .into_iter()
            .filter(|a| a.is_folder())
            .map(|a| a.id().clone())
            .collect();
        chain.reverse();
        if item.is_folder() {
            chain.push(item.id().clone());
        }
        chain
    }

    /// All items below `id`, breadth-first. Terminates on cyclic graphs.
    pub fn descendants(&self, id: &ItemId) -> Vec<&FileSystemItem> {
        let mut seen: HashSet<&ItemId> = HashSet::new();
        seen.insert(id);
        let mut queue: VecDeque<&ItemId> = VecDeque::from([id]);
        let mut found = Vec::new();
        while let Some(current) = queue.pop_front() {
            for child in self.children(Some(current)) {
                if seen.insert(child.id()) {
                    found.push(child);
                    queue.push_back(child.id());
                }
            }
        }
        found
    }

    /// Returns `true` if `ancestor` appears anywhere above `id`.
    pub fn is_ancestor_of(&self, ancestor: &ItemId, id: &ItemId) -> bool {
        let mut seen: HashSet<&ItemId> = HashSet::new();
        let mut cursor = self.get(id).and_then(FileSystemItem::parent_id);
        while let Some(parent_id) = cursor {
            if parent_id == ancestor {
                return true;
            }
            if !seen.insert(parent_id) {
                return false;
            }
            cursor = self.get(parent_id).and_then(FileSystemItem::parent_id);
        }
        false
    }

    /// Returns a new store where only `id` has its parent replaced.
    ///
    /// # Errors
    ///
    /// - [`CoreError::UnknownItem`] if `id` is not in the store.
    pub fn with_parent(self, id: &ItemId, parent: Option<ItemId>) -> CoreResult<Self> {
        let pos = *self
            .index
            .get(id)
            .ok_or_else(|| CoreError::UnknownItem(id.clone()))?;
        let mut items = self.items;
        let item = items[pos].clone().with_parent_id(parent);
        items[pos] = item;
        Ok(Self {
            items,
            index: self.index,
        })
    }
}
