//! Domain models for degree planning.
//!
//! This module contains the value types the planner operates on: term and
//! catalog codes, course placements, semesters, requirements, plan
//! snapshots and configuration.

/// Catalog codes and course placements.
pub mod course;
pub use course::{CatalogCode, Course, CourseId, EmptyCatalogCode};

/// Semester containers.
pub mod semester;
pub use semester::{Semester, SemesterId};

/// Structured term codes.
pub mod term;
pub use term::{Error as TermError, Season, SemesterCode};

mod color;
pub use color::{Color, UnknownColor};

mod lock;
pub use lock::Lock;

mod requirement;
pub use requirement::{Catalog, Requirement};

mod plan;
pub use plan::PlanSnapshot;

mod config;
pub use config::Config;
