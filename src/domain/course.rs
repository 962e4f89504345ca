use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
    str::FromStr,
};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Color, Lock};

/// A catalog course code, such as `CS 1336`.
///
/// The code is a department prefix followed by a course number, separated by
/// whitespace. Only non-emptiness is enforced; the code is otherwise opaque.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CatalogCode(NonEmptyString);

impl CatalogCode {
    /// Creates a new catalog code, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCatalogCode`] if the string is empty or only whitespace.
    pub fn new(code: impl Into<String>) -> Result<Self, EmptyCatalogCode> {
        let code = code.into();
        NonEmptyString::new(code.trim().to_string())
            .map(Self)
            .map_err(|_| EmptyCatalogCode)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The department prefix (e.g. `CS`).
    #[must_use]
    pub fn department(&self) -> &str {
        self.as_str().split_whitespace().next().unwrap_or_default()
    }

    /// The course number (e.g. `1336`), if present.
    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.as_str().split_whitespace().nth(1)
    }

    /// The credit hours encoded in the code.
    ///
    /// Credit hours are the second character of the course number: `CS 1336`
    /// is worth 3 hours, `MATH 2417` is worth 4. This relies on the catalog's
    /// numbering scheme and returns `None` for any code that does not follow
    /// it. Callers decide whether to default or to surface the failure.
    #[must_use]
    pub fn credit_hours(&self) -> Option<u32> {
        self.number()?.chars().nth(1)?.to_digit(10)
    }

    /// Case-insensitive substring match against the code.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.as_str()
            .to_lowercase()
            .contains(&query.to_lowercase())
    }
}

impl TryFrom<String> for CatalogCode {
    type Error = EmptyCatalogCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CatalogCode {
    type Error = EmptyCatalogCode;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for CatalogCode {
    type Err = EmptyCatalogCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<CatalogCode> for String {
    fn from(code: CatalogCode) -> Self {
        code.as_str().to_owned()
    }
}

impl Hash for CatalogCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Deref for CatalogCode {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for CatalogCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CatalogCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a catalog code is empty.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("catalog code must not be empty")]
pub struct EmptyCatalogCode;

/// Unique identifier of one course placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(Uuid);

impl CourseId {
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

impl Default for CourseId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CourseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One occurrence of a catalog course placed in a semester.
///
/// The same catalog course may be placed several times (for example a
/// retake), each with its own [`CourseId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Placement identifier.
    pub id: CourseId,
    /// Catalog code of the placed course.
    pub code: CatalogCode,
    /// Per-course lock, independent of the semester lock.
    #[serde(default)]
    pub locked: Lock,
    /// Whether prerequisite checking has been waived for this placement.
    #[serde(default)]
    pub prereq_override: bool,
    /// Colour tag.
    #[serde(default)]
    pub color: Color,
}

impl Course {
    /// Creates a fresh, unlocked placement of the given catalog course.
    #[must_use]
    pub fn new(code: CatalogCode) -> Self {
        Self::with_id(CourseId::new(), code)
    }

    /// Creates an unlocked placement with a known identifier.
    #[must_use]
    pub fn with_id(id: CourseId, code: CatalogCode) -> Self {
        Self {
            id,
            code,
            locked: Lock::Unlocked,
            prereq_override: false,
            color: Color::default(),
        }
    }

    /// Whether the placement is locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked.is_locked()
    }
}
