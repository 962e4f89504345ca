//! The requirement search bank.
//!
//! The bank shows the eligible courses of one requirement at a time,
//! filtered by a free-text query. Filtering is synchronous and recomputed
//! on every read. Only a bounded window of matches is shown; the full match
//! set stays available for "see more" style expansion.

use std::ops::Range;

use tracing::debug;

use crate::{
    domain::{Catalog, CatalogCode, Config, Requirement},
    drag::Draggable,
    validator::{CreditHoursError, requirement_credit_total},
};

/// Searchable view over a catalog's requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementBank {
    catalog: Catalog,
    active: usize,
    query: String,
    window: Range<usize>,
}

impl RequirementBank {
    /// Creates a bank showing the first requirement with an empty query.
    #[must_use]
    pub fn new(catalog: Catalog, window: Range<usize>) -> Self {
        Self {
            catalog,
            active: 0,
            query: String::new(),
            window,
        }
    }

    /// Creates a bank using the configured result window.
    #[must_use]
    pub fn with_config(catalog: Catalog, config: &Config) -> Self {
        Self::new(catalog, config.bank_window())
    }

    /// The catalog being searched.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Index of the active requirement.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// The active requirement, if the catalog has any.
    #[must_use]
    pub fn active_requirement(&self) -> Option<&Requirement> {
        self.catalog.requirement(self.active)
    }

    /// Switches to another requirement.
    ///
    /// Switching to a different index clears the query. Out-of-range indices
    /// are ignored. Returns whether the active requirement changed.
    pub fn set_requirement(&mut self, index: usize) -> bool {
        if index >= self.catalog.len() || index == self.active {
            return false;
        }
        debug!(from = self.active, to = index, "switching requirement");
        self.active = index;
        self.query.clear();
        true
    }

    /// Moves to the next requirement, wrapping around.
    pub fn next_requirement(&mut self) -> bool {
        match self.catalog.len() {
            0 => false,
            len => self.set_requirement((self.active + 1) % len),
        }
    }

    /// Moves to the previous requirement, wrapping around.
    pub fn previous_requirement(&mut self) -> bool {
        match self.catalog.len() {
            0 => false,
            len => self.set_requirement((self.active + len - 1) % len),
        }
    }

    /// The current query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the query.
    pub fn update_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Every eligible course of the active requirement.
    #[must_use]
    pub fn courses(&self) -> &[CatalogCode] {
        self.active_requirement()
            .map(|requirement| requirement.courses.as_slice())
            .unwrap_or_default()
    }

    /// All courses matching the query, unbounded.
    pub fn matches(&self) -> impl Iterator<Item = &CatalogCode> {
        self.courses()
            .iter()
            .filter(move |code| code.matches(&self.query))
    }

    /// The visible window of matches.
    #[must_use]
    pub fn results(&self) -> Vec<&CatalogCode> {
        self.matches()
            .skip(self.window.start)
            .take(self.window.len())
            .collect()
    }

    /// Whether more matches exist than the window shows.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.matches().count() > self.window.end
    }

    /// Drag payloads for the visible results.
    ///
    /// Dropping one of these on a semester places a new course instance.
    pub fn drag_items(&self) -> impl Iterator<Item = Draggable> {
        self.results()
            .into_iter()
            .map(|code| Draggable::BankItem { code: code.clone() })
    }

    /// Credit hours already satisfied for the active requirement.
    ///
    /// # Errors
    ///
    /// Returns [`CreditHoursError`] if a satisfied course's credit hours
    /// cannot be determined.
    pub fn credit_total(&self) -> Result<u32, CreditHoursError> {
        self.active_requirement()
            .map_or(Ok(0), requirement_credit_total)
    }
}
