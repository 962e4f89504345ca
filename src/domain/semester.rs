use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CatalogCode, Color, Course, CourseId, Lock, SemesterCode};

/// Unique identifier of a semester within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SemesterId(Uuid);

impl SemesterId {
    /// Generates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn uuid(self) -> Uuid {
        self.0
    }
}

impl Default for SemesterId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SemesterId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for SemesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A semester container holding course placements.
///
/// Course order is display order only. A semester never holds two
/// placements with the same [`CourseId`]; the planner enforces this on
/// insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    /// Semester identifier.
    pub id: SemesterId,
    /// When the semester takes place.
    pub code: SemesterCode,
    /// Placed courses, in display order.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Semester lock.
    #[serde(default)]
    pub locked: Lock,
    /// Colour tag.
    #[serde(default)]
    pub color: Color,
}

impl Semester {
    /// Creates an empty, unlocked semester.
    #[must_use]
    pub fn new(code: SemesterCode) -> Self {
        Self {
            id: SemesterId::new(),
            code,
            courses: Vec::new(),
            locked: Lock::Unlocked,
            color: Color::default(),
        }
    }

    /// Whether the semester is locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked.is_locked()
    }

    /// Whether the semester holds the given placement.
    #[must_use]
    pub fn contains(&self, course: CourseId) -> bool {
        self.courses.iter().any(|c| c.id == course)
    }

    /// Looks up a placement by identifier.
    #[must_use]
    pub fn course(&self, course: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course)
    }

    /// Iterates over the placements of a catalog course in this semester.
    pub fn courses_with_code<'a>(
        &'a self,
        code: &'a CatalogCode,
    ) -> impl Iterator<Item = &'a Course> + 'a {
        self.courses.iter().filter(move |c| &c.code == code)
    }

    pub(crate) fn courses_with_code_mut<'a>(
        &'a mut self,
        code: &'a CatalogCode,
    ) -> impl Iterator<Item = &'a mut Course> + 'a {
        self.courses.iter_mut().filter(move |c| &c.code == code)
    }
}
