use serde::{Deserialize, Serialize};

use crate::domain::CatalogCode;

/// A named degree-requirement bucket.
///
/// `courses` lists every catalog course eligible for the requirement, and
/// `valid_courses` the subset already satisfied according to the degree
/// validator. Requirements are read-only to the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Display name of the requirement.
    pub name: String,
    /// Eligible catalog courses.
    #[serde(default)]
    pub courses: Vec<CatalogCode>,
    /// Eligible courses that already satisfy the requirement.
    #[serde(default)]
    pub valid_courses: Vec<CatalogCode>,
}

impl Requirement {
    /// Creates a requirement with no satisfied courses.
    #[must_use]
    pub fn new(name: impl Into<String>, courses: Vec<CatalogCode>) -> Self {
        Self {
            name: name.into(),
            courses,
            valid_courses: Vec::new(),
        }
    }

    /// Whether the catalog course is eligible for this requirement.
    #[must_use]
    pub fn accepts(&self, code: &CatalogCode) -> bool {
        self.courses.contains(code)
    }

    /// Whether any course satisfies this requirement yet.
    #[must_use]
    pub fn is_started(&self) -> bool {
        !self.valid_courses.is_empty()
    }
}

/// The degree catalog: requirements addressed by index.
///
/// Mirrors the degree validator's response, `{"requirements": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Requirements in catalog order.
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

impl Catalog {
    /// Creates a catalog from a list of requirements.
    #[must_use]
    pub const fn new(requirements: Vec<Requirement>) -> Self {
        Self { requirements }
    }

    /// Looks up a requirement by index.
    #[must_use]
    pub fn requirement(&self, index: usize) -> Option<&Requirement> {
        self.requirements.get(index)
    }

    /// The number of requirements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether the catalog has no requirements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_validator_response() {
        let json = r#"{
            "requirements": [
                {
                    "name": "Core CS",
                    "courses": ["CS 1336", "CS 1337"],
                    "validCourses": ["CS 1336"]
                },
                { "name": "Free electives" }
            ]
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 2);

        let core = catalog.requirement(0).unwrap();
        assert!(core.accepts(&CatalogCode::new("CS 1337").unwrap()));
        assert!(core.is_started());

        let electives = catalog.requirement(1).unwrap();
        assert!(electives.courses.is_empty());
        assert!(!electives.is_started());
        assert!(catalog.requirement(2).is_none());
    }
}
