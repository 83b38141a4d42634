//! Sorting and filtering for the visible item list.

use std::cmp::Ordering;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::fs::item::{FileSystemItem, ItemKind};

/// The field by which items are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Alphabetical by name (case-insensitive).
    #[default]
    Name,
    /// By size in bytes; items without a size sort first.
    Size,
    /// By modification timestamp; items without one sort first.
    Modified,
    /// By kind, then by extension.
    Kind,
}

impl SortField {
    pub const ALL: [SortField; 4] = [Self::Name, Self::Size, Self::Modified, Self::Kind];

    /// Parses the config spelling (`"name"`, `"size"`, `"modified"`, `"kind"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Some(Self::Name),
            "size" => Some(Self::Size),
            "modified" | "date" => Some(Self::Modified),
            "kind" | "type" => Some(Self::Kind),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Size => "Size",
            Self::Modified => "Modified",
            Self::Kind => "Kind",
        }
    }

    /// The next field in [`SortField::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }
}

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest / earliest / A–Z first.
    #[default]
    Ascending,
    /// Largest / latest / Z–A first.
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Sorts items by `field` and `direction`.
///
/// When `folders_first` is `true`, folders always precede files and images
/// regardless of direction. The sort is stable, so ties keep store order.
pub fn sort_items<'a>(
    items: &[&'a FileSystemItem],
    field: SortField,
    direction: SortDirection,
    folders_first: bool,
) -> Vec<&'a FileSystemItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        if folders_first {
            let folder_cmp = b.is_folder().cmp(&a.is_folder());
            if folder_cmp != Ordering::Equal {
                return folder_cmp;
            }
        }
        let ord = compare_by_field(a, b, field);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

fn compare_by_field(a: &FileSystemItem, b: &FileSystemItem, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        SortField::Size => a.size().cmp(&b.size()),
        SortField::Modified => a.modified().cmp(&b.modified()),
        SortField::Kind => kind_rank(a.kind())
            .cmp(&kind_rank(b.kind()))
            .then_with(|| a.extension().cmp(&b.extension())),
    }
}

fn kind_rank(kind: ItemKind) -> u8 {
    match kind {
        ItemKind::Folder => 0,
        ItemKind::Image => 1,
        ItemKind::File => 2,
    }
}

/// An item paired with its fuzzy match score and the byte indices in its
/// name that matched the query.
#[derive(Debug, Clone)]
pub struct FuzzyMatch<'a> {
    item: &'a FileSystemItem,
    score: i64,
    matched_indices: Vec<usize>,
}

impl<'a> FuzzyMatch<'a> {
    #[must_use]
    pub fn item(&self) -> &'a FileSystemItem {
        self.item
    }

    /// Match score: higher values indicate a better match.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn matched_indices(&self) -> &[usize] {
        &self.matched_indices
    }
}

/// Fuzzy-matches `query` against each item's name, best match first.
///
/// An empty query returns every item, in input order, with a score of `0`.
pub fn fuzzy_filter<'a>(items: &[&'a FileSystemItem], query: &str) -> Vec<FuzzyMatch<'a>> {
    if query.is_empty() {
        return items
            .iter()
            .copied()
            .map(|item| FuzzyMatch {
                item,
                score: 0,
                matched_indices: Vec::new(),
            })
            .collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut matches: Vec<FuzzyMatch<'a>> = items
        .iter()
        .copied()
        .filter_map(|item| {
            matcher
                .fuzzy_indices(item.name(), query)
                .map(|(score, indices)| FuzzyMatch {
                    item,
                    score,
                    matched_indices: indices,
                })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}
