//! Semester scheduling for degree plans
//!
//! A plan is a list of semesters holding course placements. The [`Planner`]
//! owns that tree for an editing session and exposes every mutation the user
//! can make: placing courses, moving them between semesters by drag and
//! drop, bulk actions over a selection, locks and colour tags. Credit totals
//! and load warnings are derived on demand by the [`validator`].

pub mod domain;
pub use domain::{
    Catalog, CatalogCode, Color, Config, Course, CourseId, Lock, PlanSnapshot, Requirement,
    Season, Semester, SemesterCode, SemesterId,
};

pub mod validator;
pub use validator::{CreditLoad, CreditPolicy, SemesterSummary};

pub mod planner;
pub use planner::{Change, Planner, Rejection};

pub mod drag;
pub use drag::{DragCoordinator, DropOutcome, DropTarget, MoveDelta};

pub mod bank;
pub use bank::RequirementBank;

/// File-backed plan snapshots and degree catalogs.
pub mod storage;
pub use storage::{PlanFile, PlanSink};
