//! Navigation history with back/forward support.

use crate::nav::path::NavPath;

/// Most paths kept on the back stack; older ones are dropped first.
pub const HISTORY_LIMIT: usize = 100;

/// Immutable navigation history with back/forward stacks.
///
/// Every mutation returns a **new** `History` instance. Navigating forward
/// after going back is supported; pushing a new path clears the forward
/// stack (same semantics as a web browser).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    back_stack: Vec<NavPath>,
    forward_stack: Vec<NavPath>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `path` as the place being left and clears the forward stack.
    ///
    /// The back stack holds at most [`HISTORY_LIMIT`] paths.
    pub fn push(&self, path: NavPath) -> Self {
        let keep = self.back_stack.len().min(HISTORY_LIMIT - 1);
        let mut back_stack = Vec::with_capacity(keep + 1);
        back_stack.extend_from_slice(&self.back_stack[self.back_stack.len() - keep..]);
        back_stack.push(path);
        Self {
            back_stack,
            forward_stack: Vec::new(),
        }
    }

    /// Go back one step from `current`.
    ///
    /// Returns the new history and the path to show, or `None` if the back
    /// stack is empty. `current` is pushed onto the forward stack.
    pub fn go_back(&self, current: NavPath) -> Option<(Self, NavPath)> {
        let mut back_stack = self.back_stack.clone();
        let path = back_stack.pop()?;
        let mut forward_stack = self.forward_stack.clone();
        forward_stack.push(current);
        Some((
            Self {
                back_stack,
                forward_stack,
            },
            path,
        ))
    }

    /// Go forward one step from `current`, or `None` if there is nothing ahead.
    pub fn go_forward(&self, current: NavPath) -> Option<(Self, NavPath)> {
        let mut forward_stack = self.forward_stack.clone();
        let path = forward_stack.pop()?;
        let mut back_stack = self.back_stack.clone();
        back_stack.push(current);
        Some((
            Self {
                back_stack,
                forward_stack,
            },
            path,
        ))
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }

    /// Number of paths [`History::go_back`] can step through.
    pub fn back_len(&self) -> usize {
        self.back_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::item::ItemId;

    fn path(ids: &[&str]) -> NavPath {
        NavPath::from_ids(ids.iter().map(|s| ItemId::from(*s)).collect())
    }

    #[test]
    fn new_history_is_empty() {
        let history = History::new();
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn push_does_not_mutate_original() {
        let history = History::new();
        let _pushed = history.push(path(&["a"]));
        assert!(!history.can_go_back());
    }

    #[test]
    fn go_back_returns_pushed_path() {
        let history = History::new().push(NavPath::new());

        let (history, back) = history.go_back(path(&["a"])).unwrap();
        assert!(back.is_root());
        assert!(!history.can_go_back());
        assert!(history.can_go_forward());
    }

    #[test]
    fn go_back_on_empty_returns_none() {
        assert!(History::new().go_back(NavPath::new()).is_none());
    }

    #[test]
    fn go_forward_returns_to_where_we_were() {
        let history = History::new().push(NavPath::new());
        let (history, _) = history.go_back(path(&["a"])).unwrap();
        let (history, fwd) = history.go_forward(NavPath::new()).unwrap();

        assert_eq!(fwd, path(&["a"]));
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn push_clears_forward_stack() {
        let history = History::new().push(NavPath::new()).push(path(&["a"]));
        let (history, _) = history.go_back(path(&["a", "b"])).unwrap();
        assert!(history.can_go_forward());

        let history = history.push(path(&["a"]));
        assert!(!history.can_go_forward());
        assert!(history.can_go_back());
    }

    #[test]
    fn push_drops_oldest_beyond_limit() {
        let history = (0..HISTORY_LIMIT + 5).fold(History::new(), |h, i| {
            h.push(path(&[i.to_string().as_str()]))
        });
        assert_eq!(history.back_len(), HISTORY_LIMIT);

        let (_, newest) = history.go_back(NavPath::new()).unwrap();
        assert_eq!(newest, path(&[(HISTORY_LIMIT + 4).to_string().as_str()]));

        let mut h = history;
        let mut current = NavPath::new();
        let mut oldest = None;
        while let Some((next, p)) = h.go_back(current) {
            h = next;
            current = p.clone();
            oldest = Some(p);
        }
        assert_eq!(oldest, Some(path(&["5"])));
    }

    #[test]
    fn multiple_back_steps_unwind_in_order() {
        let history = History::new().push(NavPath::new()).push(path(&["a"]));

        let (history, p) = history.go_back(path(&["a", "b"])).unwrap();
        assert_eq!(p, path(&["a"]));
        let (history, p) = history.go_back(p).unwrap();
        assert!(p.is_root());
        assert!(history.go_back(p).is_none());
    }
}
