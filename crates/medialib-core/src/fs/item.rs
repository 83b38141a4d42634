//! Item representation for the virtual media tree.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Stable identifier of an item for the lifetime of a session.
///
/// Ids must be unique across the whole store, root and nested alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// What an item is. Only folders carry structural meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Folder,
    File,
    Image,
}

impl ItemKind {
    /// Short label used in listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
            Self::Image => "image",
        }
    }
}

/// A single entry of the virtual file tree.
///
/// The tree is implicit: `parent_id` is the only structural link and
/// children are derived by filtering the store. `None` means the item
/// lives at the root.
///
/// # Examples
///
/// ```
/// use medialib_core::{FileSystemItem, ItemId};
///
/// let docs = FileSystemItem::folder("1", "Docs");
/// let note = FileSystemItem::file("2", "a.txt").with_parent("1");
/// assert!(docs.is_folder());
/// assert_eq!(note.parent_id(), Some(&ItemId::from("1")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemItem {
    id: ItemId,
    name: String,
    #[serde(rename = "type")]
    kind: ItemKind,
    #[serde(default)]
    parent_id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
}

impl FileSystemItem {
    /// Creates a root-level item. The name is normalised to NFC.
    pub fn new(id: impl Into<ItemId>, name: &str, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.nfc().collect(),
            kind,
            parent_id: None,
            url: None,
            size: None,
            modified: None,
        }
    }

    pub fn folder(id: impl Into<ItemId>, name: &str) -> Self {
        Self::new(id, name, ItemKind::Folder)
    }

    pub fn file(id: impl Into<ItemId>, name: &str) -> Self {
        Self::new(id, name, ItemKind::File)
    }

    pub fn image(id: impl Into<ItemId>, name: &str) -> Self {
        Self::new(id, name, ItemKind::Image)
    }

    /// Returns a copy placed under `parent`.
    #[must_use]
    pub fn with_parent(self, parent: impl Into<ItemId>) -> Self {
        Self {
            parent_id: Some(parent.into()),
            ..self
        }
    }

    /// Returns a copy with `parent_id` replaced (`None` moves it to the root).
    #[must_use]
    pub fn with_parent_id(self, parent_id: Option<ItemId>) -> Self {
        Self { parent_id, ..self }
    }

    #[must_use]
    pub fn with_url(self, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_size(self, size: u64) -> Self {
        Self {
            size: Some(size),
            ..self
        }
    }

    #[must_use]
    pub fn with_modified(self, modified: impl Into<String>) -> Self {
        Self {
            modified: Some(modified.into()),
            ..self
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn parent_id(&self) -> Option<&ItemId> {
        self.parent_id.as_ref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Size in bytes, if the provider supplied one.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Last-modified timestamp as supplied by the provider (ISO-8601 date).
    pub fn modified(&self) -> Option<&str> {
        self.modified.as_deref()
    }

    /// Re-composes the name to NFC; used for items that arrive via serde.
    pub(crate) fn normalized(self) -> Self {
        let name = self.name.nfc().collect();
        Self { name, ..self }
    }

    /// Returns `true` for folders, the only valid drop targets and path members.
    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    /// Returns `true` if the item sits directly under `folder` (`None` = root).
    pub fn is_child_of(&self, folder: Option<&ItemId>) -> bool {
        self.parent_id.as_ref() == folder
    }

    /// Lower-cased extension of the name, empty for folders and bare names.
    pub fn extension(&self) -> String {
        if self.is_folder() {
            return String::new();
        }
        self.name
            .rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default()
    }
}
