//! Drag activation: telling a click from the start of a drag.
//!
//! A pointer press only becomes a drag after it has been held for the
//! activation delay without moving further than the tolerance. A quick
//! press-release is reported as a click; moving too far too early
//! abandons the gesture.

use std::time::{Duration, Instant};

use crate::fs::item::ItemId;

/// Pointer position in whatever unit the frontend uses (cells, pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn exceeds(self, other: Point, tolerance: u32) -> bool {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        let tol = i64::from(tolerance);
        dx * dx + dy * dy > tol * tol
    }
}

/// Activation constraint for the drag sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragConstraint {
    pub delay: Duration,
    pub tolerance: u32,
}

impl Default for DragConstraint {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(150),
            tolerance: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Pending {
        id: ItemId,
        origin: Point,
        started: Instant,
    },
    Active {
        id: ItemId,
    },
    Abandoned,
}

/// What releasing the pointer amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerRelease {
    /// A press-release on `id` that never became a drag.
    Click(ItemId),
    /// The drag of `active` ended; the caller resolves the drop target.
    Drop { active: ItemId },
    /// Nothing to report (no press, or the gesture was abandoned).
    None,
}

/// Pointer state machine: `Idle → Pending → Active`, or `Pending → Abandoned`.
///
/// Immutable: every input returns a new sensor. Time is passed in so the
/// machine stays deterministic under test.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragSensor {
    constraint: DragConstraint,
    phase: Phase,
}

impl DragSensor {
    pub fn new(constraint: DragConstraint) -> Self {
        Self {
            constraint,
            phase: Phase::Idle,
        }
    }

    pub fn constraint(&self) -> DragConstraint {
        self.constraint
    }

    /// Pointer pressed on item `id`.
    #[must_use]
    pub fn pointer_down(self, id: ItemId, at: Point, now: Instant) -> Self {
        Self {
            phase: Phase::Pending {
                id,
                origin: at,
                started: now,
            },
            ..self
        }
    }

    /// Pointer moved while pressed.
    #[must_use]
    pub fn pointer_move(self, at: Point, now: Instant) -> Self {
        let pending = match &self.phase {
            Phase::Pending { origin, started, .. } => Some((*origin, *started)),
            _ => None,
        };
        match pending {
            Some((origin, started)) if !self.held_long_enough(started, now) => {
                if at.exceeds(origin, self.constraint.tolerance) {
                    tracing::debug!("drag abandoned: moved before activation delay");
                    Self {
                        constraint: self.constraint,
                        phase: Phase::Abandoned,
                    }
                } else {
                    self
                }
            }
            _ => self.tick(now),
        }
    }

    /// Promotes a pending press once the delay has elapsed.
    #[must_use]
    pub fn tick(self, now: Instant) -> Self {
        let constraint = self.constraint;
        let phase = match self.phase {
            Phase::Pending { id, started, .. }
                if now.saturating_duration_since(started) >= constraint.delay =>
            {
                tracing::debug!("drag started on {id}");
                Phase::Active { id }
            }
            phase => phase,
        };
        Self { constraint, phase }
    }

    /// Pointer released. The sensor returns to idle.
    pub fn pointer_up(self, now: Instant) -> (Self, PointerRelease) {
        let sensor = self.tick(now);
        let release = match sensor.phase {
            Phase::Pending { id, .. } => PointerRelease::Click(id),
            Phase::Active { id } => PointerRelease::Drop { active: id },
            Phase::Idle | Phase::Abandoned => PointerRelease::None,
        };
        (Self::new(sensor.constraint), release)
    }

    /// Drops any gesture in progress.
    #[must_use]
    pub fn cancel(self) -> Self {
        Self::new(self.constraint)
    }

    /// Id of the item being dragged, once the drag is active.
    pub fn active_id(&self) -> Option<&ItemId> {
        match &self.phase {
            Phase::Active { id } => Some(id),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. } | Phase::Active { .. })
    }

    fn held_long_enough(&self, started: Instant, now: Instant) -> bool {
        now.saturating_duration_since(started) >= self.constraint.delay
    }
}
