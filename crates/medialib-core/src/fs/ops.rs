//! Structural operations on the item store.
//!
//! Reparenting is the only tree mutation: a drop rewrites the dragged
//! item's `parent_id` and leaves every other item untouched.

use crate::error::{CoreError, CoreResult};
use crate::fs::item::ItemId;
use crate::fs::store::ItemStore;

/// Whether a move may make a folder its own ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleGuard {
    /// Walk the target's ancestor chain and refuse cyclic moves.
    #[default]
    Reject,
    /// Commit any folder drop, even into the dragged item's own subtree.
    Allow,
}

impl CycleGuard {
    pub fn from_prevent(prevent: bool) -> Self {
        if prevent {
            Self::Reject
        } else {
            Self::Allow
        }
    }
}

/// Result of a drop that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// `item` now lives under `target`.
    Moved { item: ItemId, target: ItemId },
    /// The drop had no effect (no target, dropped on itself, or on a non-folder).
    Ignored,
}

/// Drops `active` onto `target`.
///
/// The store is returned unchanged with [`MoveOutcome::Ignored`] when there
/// is no target, the target is the dragged item, the target is unknown or
/// it is not a folder. An unknown `active` id is also ignored.
///
/// # Errors
///
/// - [`CoreError::WouldCycle`] when `guard` is [`CycleGuard::Reject`] and
///   `target` lies inside the subtree of `active`.
pub fn move_item(
    store: ItemStore,
    active: &ItemId,
    target: Option<&ItemId>,
    guard: CycleGuard,
) -> CoreResult<(ItemStore, MoveOutcome)> {
    let Some(target) = target else {
        return Ok((store, MoveOutcome::Ignored));
    };
    if target == active {
        return Ok((store, MoveOutcome::Ignored));
    }
    let target_is_folder = store.get(target).is_some_and(|t| t.is_folder());
    if !target_is_folder || !store.contains(active) {
        return Ok((store, MoveOutcome::Ignored));
    }
    if guard == CycleGuard::Reject && store.is_ancestor_of(active, target) {
        tracing::warn!("rejected move of {active} into its descendant {target}");
        return Err(CoreError::WouldCycle {
            item: active.clone(),
            target: target.clone(),
        });
    }

    let store = store.with_parent(active, Some(target.clone()))?;
    tracing::debug!("moved {active} into {target}");
    Ok((
        store,
        MoveOutcome::Moved {
            item: active.clone(),
            target: target.clone(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::item::FileSystemItem;

    fn id(s: &str) -> ItemId {
        ItemId::from(s)
    }

    fn sample() -> ItemStore {
        ItemStore::new(vec![
            FileSystemItem::folder("a", "A"),
            FileSystemItem::folder("b", "B").with_parent("a"),
            FileSystemItem::folder("c", "C").with_parent("b"),
            FileSystemItem::file("f", "f.txt"),
            FileSystemItem::image("g", "g.png").with_parent("a"),
        ])
        .unwrap()
    }

    #[test]
    fn drop_file_on_folder_moves_it() {
        let (store, outcome) = move_item(sample(), &id("f"), Some(&id("c")), CycleGuard::Reject).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                item: id("f"),
                target: id("c")
            }
        );
        assert_eq!(store.get(&id("f")).unwrap().parent_id(), Some(&id("c")));
    }

    #[test]
    fn drop_leaves_other_parents_alone() {
        let before = sample();
        let (after, _) = move_item(before.clone(), &id("f"), Some(&id("a")), CycleGuard::Reject).unwrap();
        for item in before.iter().filter(|i| i.id() != &id("f")) {
            assert_eq!(after.get(item.id()).unwrap().parent_id(), item.parent_id());
        }
    }

    #[test]
    fn drop_on_nothing_is_ignored() {
        let before = sample();
        let (after, outcome) = move_item(before.clone(), &id("f"), None, CycleGuard::Reject).unwrap();
        assert_eq!(outcome, MoveOutcome::Ignored);
        assert_eq!(after, before);
    }

    #[test]
    fn drop_on_itself_is_ignored() {
        let before = sample();
        let (after, outcome) = move_item(before.clone(), &id("b"), Some(&id("b")), CycleGuard::Allow).unwrap();
        assert_eq!(outcome, MoveOutcome::Ignored);
        assert_eq!(after, before);
    }

    #[test]
    fn drop_on_non_folder_is_ignored() {
        let before = sample();
        let (after, outcome) = move_item(before.clone(), &id("f"), Some(&id("g")), CycleGuard::Reject).unwrap();
        assert_eq!(outcome, MoveOutcome::Ignored);
        assert_eq!(after, before);
    }

    #[test]
    fn drop_on_unknown_target_is_ignored() {
        let (_, outcome) = move_item(sample(), &id("f"), Some(&id("zz")), CycleGuard::Reject).unwrap();
        assert_eq!(outcome, MoveOutcome::Ignored);
    }

    #[test]
    fn drop_into_descendant_is_rejected() {
        let result = move_item(sample(), &id("a"), Some(&id("c")), CycleGuard::Reject);
        assert!(matches!(result, Err(CoreError::WouldCycle { .. })));
    }

    #[test]
    fn drop_into_descendant_allowed_without_guard() {
        let (store, outcome) = move_item(sample(), &id("a"), Some(&id("c")), CycleGuard::Allow).unwrap();
        assert!(matches!(outcome, MoveOutcome::Moved { .. }));
        assert!(store.is_ancestor_of(&id("a"), &id("a")));
    }

    #[test]
    fn folder_can_move_to_sibling_branch() {
        let store = ItemStore::new(vec![
            FileSystemItem::folder("x", "X"),
            FileSystemItem::folder("y", "Y"),
            FileSystemItem::folder("z", "Z").with_parent("x"),
        ])
        .unwrap();
        let (store, _) = move_item(store, &id("z"), Some(&id("y")), CycleGuard::Reject).unwrap();
        assert_eq!(store.get(&id("z")).unwrap().parent_id(), Some(&id("y")));
    }

    #[test]
    fn guard_from_prevent_flag() {
        assert_eq!(CycleGuard::from_prevent(true), CycleGuard::Reject);
        assert_eq!(CycleGuard::from_prevent(false), CycleGuard::Allow);
    }
}
