//! Click-driven selection over the visible item list.
//!
//! A click is classified once into a [`ClickIntent`] from its modifier
//! keys and then resolved by a pure function of the previous selection,
//! the clicked id and the list the user is looking at.

use std::collections::HashSet;

use crate::fs::item::ItemId;
use crate::fs::store::ItemStore;

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        shift: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        meta: false,
        shift: false,
    };

    pub const SHIFT: Self = Self {
        ctrl: false,
        meta: false,
        shift: true,
    };
}

/// What a click means for the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickIntent {
    /// Select only the clicked item.
    Exclusive,
    /// Add or remove the clicked item, keeping the rest.
    Toggle,
    /// Extend from the anchor to the clicked item.
    Range,
}

impl ClickIntent {
    /// Classifies a click. Ctrl/Cmd wins over Shift.
    pub fn from_modifiers(modifiers: Modifiers) -> Self {
        if modifiers.ctrl || modifiers.meta {
            Self::Toggle
        } else if modifiers.shift {
            Self::Range
        } else {
            Self::Exclusive
        }
    }
}

/// Ordered, duplicate-free set of selected ids.
///
/// Insertion order is significant: the last id is the anchor for range
/// clicks. Ids are not validated against the store, so a selection can
/// outlive the items it names until [`Selection::retain_existing`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ItemId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from `ids`, dropping repeats after the first.
    pub fn from_ids(ids: impl IntoIterator<Item = ItemId>) -> Self {
        let mut seen = HashSet::new();
        let ids = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
        Self { ids }
    }

    /// The singleton selection `{id}`.
    pub fn exclusive(id: &ItemId) -> Self {
        Self {
            ids: vec![id.clone()],
        }
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

    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// The most recently added id, used as the range anchor.
    pub fn anchor(&self) -> Option<&ItemId> {
        self.ids.last()
    }

    /// Resolves a click into the next selection.
    ///
    /// `visible` is the ordered list the click happened in: folder contents
    /// in grid and list views, a single column in columns view.
    #[must_use]
    pub fn apply(self, intent: ClickIntent, clicked: &ItemId, visible: &[ItemId]) -> Self {
        let next = match intent {
            ClickIntent::Exclusive => Self::exclusive(clicked),
            ClickIntent::Toggle => self.toggle(clicked),
            ClickIntent::Range => self.range(clicked, visible),
        };
        tracing::debug!("{intent:?} click on {clicked}: {} selected", next.len());
        next
    }

    /// Removes `id` if present, otherwise appends it.
    #[must_use]
    pub fn toggle(self, id: &ItemId) -> Self {
        let mut ids = self.ids;
        match ids.iter().position(|x| x == id) {
            Some(pos) => {
                ids.remove(pos);
            }
            None => ids.push(id.clone()),
        }
        Self { ids }
    }

    /// Unions the selection with the inclusive range between the anchor and
    /// `clicked`, as positioned in `visible`.
    ///
    /// Falls back to an exclusive selection of `clicked` when the selection
    /// is empty or either end is missing from `visible`.
    #[must_use]
    pub fn range(self, clicked: &ItemId, visible: &[ItemId]) -> Self {
        let Some(anchor) = self.anchor() else {
            return Self::exclusive(clicked);
        };
        let anchor_pos = visible.iter().position(|id| id == anchor);
        let clicked_pos = visible.iter().position(|id| id == clicked);
        let (Some(a), Some(c)) = (anchor_pos, clicked_pos) else {
            return Self::exclusive(clicked);
        };

        let (start, end) = (a.min(c), a.max(c));
        let mut ids = self.ids;
        for id in &visible[start..=end] {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        Self { ids }
    }

    /// Selects every visible id, in visible order.
    #[must_use]
    pub fn select_all(visible: &[ItemId]) -> Self {
        Self::from_ids(visible.iter().cloned())
    }

    #[must_use]
    pub fn clear(self) -> Self {
        Self::new()
    }

    /// Drops ids that no longer exist in `store`.
    #[must_use]
    pub fn retain_existing(self, store: &ItemStore) -> Self {
        let ids = self.ids.into_iter().filter(|id| store.contains(id)).collect();
        Self { ids }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::item::FileSystemItem;

    fn id(s: &str) -> ItemId {
        ItemId::from(s)
    }

    fn list(names: &[&str]) -> Vec<ItemId> {
        names.iter().map(|s| id(s)).collect()
    }

    fn sel(names: &[&str]) -> Selection {
        Selection::from_ids(list(names))
    }

    #[test]
    fn intent_plain_click_is_exclusive() {
        assert_eq!(ClickIntent::from_modifiers(Modifiers::NONE), ClickIntent::Exclusive);
    }

    #[test]
    fn intent_ctrl_or_meta_is_toggle() {
        assert_eq!(ClickIntent::from_modifiers(Modifiers::CTRL), ClickIntent::Toggle);
        let meta = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(ClickIntent::from_modifiers(meta), ClickIntent::Toggle);
    }

    #[test]
    fn intent_shift_is_range() {
        assert_eq!(ClickIntent::from_modifiers(Modifiers::SHIFT), ClickIntent::Range);
    }

    #[test]
    fn intent_ctrl_beats_shift() {
        let both = Modifiers {
            ctrl: true,
            shift: true,
            meta: false,
        };
        assert_eq!(ClickIntent::from_modifiers(both), ClickIntent::Toggle);
    }

    #[test]
    fn from_ids_drops_duplicates() {
        assert_eq!(sel(&["a", "b", "a"]).ids(), list(&["a", "b"]).as_slice());
    }

    #[test]
    fn exclusive_discards_multi_selection() {
        let visible = list(&["a", "b", "c"]);
        let next = sel(&["a", "b"]).apply(ClickIntent::Exclusive, &id("c"), &visible);
        assert_eq!(next.ids(), &[id("c")]);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let s = sel(&["a"]).toggle(&id("b"));
        assert_eq!(s.ids(), list(&["a", "b"]).as_slice());
        let s = s.toggle(&id("a"));
        assert_eq!(s.ids(), &[id("b")]);
    }

    #[test]
    fn toggle_twice_restores_original() {
        let before = sel(&["x", "y"]);
        let after = before.clone().toggle(&id("z")).toggle(&id("z"));
        assert_eq!(after, before);
    }

    #[test]
    fn toggle_preserves_order_of_others() {
        let s = sel(&["a", "b", "c"]).toggle(&id("b"));
        assert_eq!(s.ids(), list(&["a", "c"]).as_slice());
    }

    #[test]
    fn range_forward_from_anchor() {
        let visible = list(&["a", "b", "c", "d", "e"]);
        let s = sel(&["c"]).range(&id("e"), &visible);
        assert_eq!(s.ids(), list(&["c", "d", "e"]).as_slice());
    }

    #[test]
    fn range_is_additive() {
        let visible = list(&["a", "b", "c", "d", "e"]);
        let s = sel(&["c"]).range(&id("e"), &visible).range(&id("a"), &visible);
        assert_eq!(s.ids(), list(&["c", "d", "e", "a", "b"]).as_slice());
    }

    #[test]
    fn range_uses_last_id_as_anchor() {
        let visible = list(&["a", "b", "c", "d", "e"]);
        let s = sel(&["a", "d"]).range(&id("e"), &visible);
        assert_eq!(s.ids(), list(&["a", "d", "e"]).as_slice());
    }

    #[test]
    fn range_follows_visible_order_not_store_order() {
        // Store order is z, y, x but the view shows x, y, z.
        let visible = list(&["x", "y", "z"]);
        let s = sel(&["x"]).range(&id("z"), &visible);
        assert_eq!(s.ids(), list(&["x", "y", "z"]).as_slice());
    }

    #[test]
    fn range_with_anchor_outside_visible_is_exclusive() {
        let visible = list(&["p", "q", "r"]);
        let s = sel(&["a"]).range(&id("q"), &visible);
        assert_eq!(s.ids(), &[id("q")]);
    }

    #[test]
    fn range_with_clicked_outside_visible_is_exclusive() {
        let visible = list(&["p", "q", "r"]);
        let s = sel(&["p"]).range(&id("zz"), &visible);
        assert_eq!(s.ids(), &[id("zz")]);
    }

    #[test]
    fn range_on_empty_selection_is_exclusive() {
        let visible = list(&["a", "b"]);
        let s = Selection::new().apply(ClickIntent::Range, &id("b"), &visible);
        assert_eq!(s.ids(), &[id("b")]);
    }

    #[test]
    fn toggle_out_of_range_keeps_rest() {
        let visible = list(&["a", "b", "c", "d"]);
        let s = sel(&["a"]).range(&id("d"), &visible).toggle(&id("b"));
        assert_eq!(s.ids(), list(&["a", "c", "d"]).as_slice());
    }

    #[test]
    fn select_all_and_clear() {
        let visible = list(&["a", "b"]);
        let s = Selection::select_all(&visible);
        assert_eq!(s.len(), 2);
        assert!(s.clear().is_empty());
    }

    #[test]
    fn retain_existing_drops_stale_ids() {
        let store = ItemStore::new(vec![FileSystemItem::file("a", "a.txt")]).unwrap();
        let s = sel(&["a", "gone"]).retain_existing(&store);
        assert_eq!(s.ids(), &[id("a")]);
    }
}
