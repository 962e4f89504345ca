//! Drag-and-drop coordination between the requirement bank and semesters.
//!
//! Every rendered course card registers a [`Draggable`] and gets back a
//! fresh [`DragId`]. The id only lives as long as that rendering: the same
//! catalog course can be dragged out of the bank any number of times, and
//! each drag produces a new placement instead of moving a shared one.
//!
//! Drop zones register a [`DropTarget`]. When a gesture ends the coordinator
//! turns `(draggable, target)` into a [`MoveDelta`] and asks the
//! [`Planner`] to commit it. The coordinator never touches the tree itself.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::{
    domain::{CatalogCode, Course, CourseId, SemesterId},
    planner::{Change, Planner, Rejection},
};

/// Ephemeral identifier of one rendered draggable.
///
/// Distinct from any persistent course identity and never reused within a
/// coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DragId(u64);

/// Identifier of a registered drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DropZoneId(u64);

/// What a draggable card represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draggable {
    /// A catalog course offered by the requirement bank.
    BankItem {
        /// The offered course.
        code: CatalogCode,
    },
    /// A placement shown inside a semester.
    Placement {
        /// The placement.
        course: CourseId,
        /// The semester currently holding it.
        semester: SemesterId,
    },
}

impl Draggable {
    /// Where the drag starts.
    #[must_use]
    pub const fn source(&self) -> DropTarget {
        match self {
            Self::BankItem { .. } => DropTarget::Bank,
            Self::Placement { semester, .. } => DropTarget::Semester(*semester),
        }
    }
}

/// The payload attached to a drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// The requirement bank.
    Bank,
    /// A semester tile.
    Semester(SemesterId),
}

/// The state change implied by a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveDelta {
    /// A bank item dropped on a semester: place a new instance.
    Insert {
        /// The freshly created placement.
        course: Course,
        /// The receiving semester.
        to: SemesterId,
    },
    /// A placement dropped on a semester: remove it from the source and
    /// insert it into the target.
    Transfer {
        /// The placement being moved.
        course: CourseId,
        /// The semester it leaves.
        from: SemesterId,
        /// The semester it enters.
        to: SemesterId,
    },
    /// A placement dropped back on the bank: remove it from its semester.
    Remove {
        /// The placement being removed.
        course: CourseId,
        /// The semester it leaves.
        from: SemesterId,
    },
}

impl MoveDelta {
    /// Computes the delta for dropping `draggable` on `target`.
    ///
    /// Returns `None` when the drop has no effect, i.e. a bank item dropped
    /// back on the bank.
    #[must_use]
    pub fn between(draggable: &Draggable, target: DropTarget) -> Option<Self> {
        match (draggable, target) {
            (Draggable::BankItem { .. }, DropTarget::Bank) => None,
            (Draggable::BankItem { code }, DropTarget::Semester(to)) => Some(Self::Insert {
                course: Course::new(code.clone()),
                to,
            }),
            (Draggable::Placement { course, semester }, DropTarget::Semester(to)) => {
                Some(Self::Transfer {
                    course: *course,
                    from: *semester,
                    to,
                })
            }
            (Draggable::Placement { course, semester }, DropTarget::Bank) => Some(Self::Remove {
                course: *course,
                from: *semester,
            }),
        }
    }

    /// The semester receiving a course, if any.
    #[must_use]
    pub const fn insert_target(&self) -> Option<SemesterId> {
        match self {
            Self::Insert { to, .. } | Self::Transfer { to, .. } => Some(*to),
            Self::Remove { .. } => None,
        }
    }

    /// The semester losing a course, if any.
    #[must_use]
    pub const fn remove_source(&self) -> Option<SemesterId> {
        match self {
            Self::Transfer { from, .. } | Self::Remove { from, .. } => Some(*from),
            Self::Insert { .. } => None,
        }
    }
}

/// The result of ending a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No recognised draggable or drop zone; the card returns to its origin.
    Cancelled,
    /// The drop was recognised but changes nothing.
    NoOp,
    /// The delta was committed.
    Committed(MoveDelta),
    /// The planner refused the delta; nothing was committed.
    Rejected(Rejection),
}

/// Tracks registered draggables and drop zones.
#[derive(Debug, Default)]
pub struct DragCoordinator {
    next_id: u64,
    draggables: HashMap<DragId, Draggable>,
    drop_zones: HashMap<DropZoneId, DropTarget>,
}

impl DragCoordinator {
    /// Creates an empty coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rendered card and returns its fresh drag id.
    pub fn register_draggable(&mut self, draggable: Draggable) -> DragId {
        let id = DragId(self.allocate());
        self.draggables.insert(id, draggable);
        id
    }

    /// Discards a card's drag id when the card goes away.
    pub fn unregister_draggable(&mut self, id: DragId) -> Option<Draggable> {
        self.draggables.remove(&id)
    }

    /// Looks up what a drag id refers to.
    #[must_use]
    pub fn draggable(&self, id: DragId) -> Option<&Draggable> {
        self.draggables.get(&id)
    }

    /// Registers a drop zone with its target payload.
    pub fn register_drop_zone(&mut self, target: DropTarget) -> DropZoneId {
        let id = DropZoneId(self.allocate());
        self.drop_zones.insert(id, target);
        id
    }

    /// Removes a drop zone.
    pub fn unregister_drop_zone(&mut self, id: DropZoneId) -> Option<DropTarget> {
        self.drop_zones.remove(&id)
    }

    /// The number of live draggables.
    #[must_use]
    pub fn draggable_count(&self) -> usize {
        self.draggables.len()
    }

    /// Ends a drag gesture.
    ///
    /// `zone` is `None` when the card was released outside every drop zone.
    /// Unknown drag ids and unknown zones cancel the gesture. A committed
    /// move of a semester card retires that card's drag id, since the card
    /// it belonged to is no longer rendered where it was.
    #[instrument(level = "debug", skip(self, planner))]
    pub fn finish_drag(
        &mut self,
        planner: &mut Planner,
        drag: DragId,
        zone: Option<DropZoneId>,
    ) -> DropOutcome {
        let Some(draggable) = self.draggables.get(&drag) else {
            debug!("unknown drag id; cancelling");
            return DropOutcome::Cancelled;
        };
        let Some(target) = zone.and_then(|zone| self.drop_zones.get(&zone)) else {
            debug!("no drop zone; cancelling");
            return DropOutcome::Cancelled;
        };

        let Some(delta) = MoveDelta::between(draggable, *target) else {
            return DropOutcome::NoOp;
        };

        match planner.apply_move(&delta) {
            Change::Applied => {
                if matches!(draggable, Draggable::Placement { .. }) {
                    self.draggables.remove(&drag);
                }
                DropOutcome::Committed(delta)
            }
            Change::Unchanged => DropOutcome::NoOp,
            Change::Rejected(rejection) => DropOutcome::Rejected(rejection),
        }
    }

    const fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}
