//! Derived facts about a plan.
//!
//! Everything here is a pure function of its inputs. Warnings are computed
//! on demand and never stored on the semester, so they cannot go stale.
//!
//! Credit hours come from [`CatalogCode::credit_hours`]. The two aggregation
//! layers treat an unparsable code differently: a semester total assumes a
//! default number of hours so the planner stays usable, while a requirement
//! total reports the code as an error.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{CatalogCode, Config, Requirement, Semester, SemesterCode, SemesterId};

/// How heavy a semester's course load is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditLoad {
    /// No credits at all. Not a warning.
    Empty,
    /// Within the configured bounds.
    Normal,
    /// Some credits, but fewer than the minimum.
    Underload,
    /// More credits than allowed for the term.
    Overload,
}

impl CreditLoad {
    /// Whether the load should be flagged to the student.
    #[must_use]
    pub const fn is_warning(self) -> bool {
        matches!(self, Self::Underload | Self::Overload)
    }
}

/// Thresholds used to total and classify semesters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditPolicy {
    min_credits: u32,
    max_credits: u32,
    max_summer_credits: u32,
    default_credit_hours: u32,
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for CreditPolicy {
    fn from(config: &Config) -> Self {
        Self {
            min_credits: config.min_credits(),
            max_credits: config.max_credits(),
            max_summer_credits: config.max_summer_credits(),
            default_credit_hours: config.default_credit_hours(),
        }
    }
}

impl CreditPolicy {
    /// Credit hours of one course, falling back to the default.
    #[must_use]
    pub fn credit_hours(&self, code: &CatalogCode) -> u32 {
        code.credit_hours().unwrap_or(self.default_credit_hours)
    }

    /// Total credit hours placed in a semester, saturating at `u32::MAX`.
    #[must_use]
    pub fn credits_taken(&self, semester: &Semester) -> u32 {
        semester
            .courses
            .iter()
            .map(|course| self.credit_hours(&course.code))
            .fold(0, u32::saturating_add)
    }

    /// Classify a credit total for the given term.
    #[must_use]
    pub const fn classify_credits(&self, credits: u32, code: SemesterCode) -> CreditLoad {
        if credits > self.max_credits || (code.is_summer() && credits > self.max_summer_credits) {
            CreditLoad::Overload
        } else if credits == 0 {
            CreditLoad::Empty
        } else if credits < self.min_credits {
            CreditLoad::Underload
        } else {
            CreditLoad::Normal
        }
    }

    /// Classify a semester's load.
    #[must_use]
    pub fn classify(&self, semester: &Semester) -> CreditLoad {
        self.classify_credits(self.credits_taken(semester), semester.code)
    }

    /// Summarise a semester for display.
    #[must_use]
    pub fn summarise(&self, semester: &Semester) -> SemesterSummary {
        let credits = self.credits_taken(semester);
        SemesterSummary {
            id: semester.id,
            code: semester.code,
            courses: semester.courses.len(),
            credits,
            load: self.classify_credits(credits, semester.code),
            locked: semester.is_locked(),
            prereq_overrides: semester
                .courses
                .iter()
                .filter(|course| course.prereq_override)
                .count(),
        }
    }
}

/// Derived facts about one semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemesterSummary {
    /// The semester summarised.
    pub id: SemesterId,
    /// Its term code.
    pub code: SemesterCode,
    /// Number of placements.
    pub courses: usize,
    /// Total credit hours.
    pub credits: u32,
    /// Load classification.
    pub load: CreditLoad,
    /// Whether the semester is locked.
    pub locked: bool,
    /// Number of placements with a prerequisite override.
    pub prereq_overrides: usize,
}

impl SemesterSummary {
    /// Whether the semester should be flagged.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        self.load.is_warning()
    }
}

/// Total credit hours placed in a semester, assuming 3 hours for any course
/// whose code cannot be parsed.
#[must_use]
pub fn credits_taken(semester: &Semester) -> u32 {
    CreditPolicy::default().credits_taken(semester)
}

/// Classify a semester using the default thresholds.
#[must_use]
pub fn credit_load(semester: &Semester) -> CreditLoad {
    CreditPolicy::default().classify(semester)
}

/// Whether a semester's load is flagged under the default thresholds.
///
/// True when the semester has more than 19 credits, a summer term has more
/// than 15, or the semester has some credits but fewer than 12.
#[must_use]
pub fn is_warning(semester: &Semester) -> bool {
    credit_load(semester).is_warning()
}

/// A satisfied course whose credit hours cannot be determined.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("cannot determine credit hours of '{code}' in requirement '{requirement}'")]
pub struct CreditHoursError {
    /// The requirement being totalled.
    pub requirement: String,
    /// The offending catalog code.
    pub code: CatalogCode,
}

/// Total credit hours of the courses already satisfying a requirement.
///
/// # Errors
///
/// Returns [`CreditHoursError`] for the first valid course whose code cannot
/// be parsed. No default is assumed at this layer.
pub fn requirement_credit_total(requirement: &Requirement) -> Result<u32, CreditHoursError> {
    requirement
        .valid_courses
        .iter()
        .map(|code| {
            code.credit_hours().ok_or_else(|| CreditHoursError {
                requirement: requirement.name.clone(),
                code: code.clone(),
            })
        })
        .sum()
}

/// Recompute which planned courses satisfy each requirement.
///
/// Every planned catalog code that a requirement lists as eligible fulfils
/// that requirement. The returned requirements keep their names and
/// eligible courses; `valid_courses` is replaced by the fulfilling codes in
/// plan order, without duplicates.
#[must_use]
pub fn fulfil_requirements<'a>(
    planned: impl IntoIterator<Item = &'a CatalogCode>,
    requirements: &[Requirement],
) -> Vec<Requirement> {
    let planned: Vec<&CatalogCode> = planned.into_iter().collect();

    requirements
        .iter()
        .map(|requirement| {
            let mut seen = HashSet::new();
            let valid_courses = planned
                .iter()
                .filter(|code| requirement.accepts(code) && seen.insert(**code))
                .map(|code| (*code).clone())
                .collect();

            Requirement {
                name: requirement.name.clone(),
                courses: requirement.courses.clone(),
                valid_courses,
            }
        })
        .collect()
}
