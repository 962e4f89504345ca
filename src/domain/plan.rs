use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Semester;

/// A snapshot of a student's degree plan as held by the upstream source.
///
/// The planner consumes a snapshot once at session start and is rebuilt
/// wholesale whenever a new snapshot arrives; snapshots are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSnapshot {
    /// The majors the plan is built for.
    #[serde(default)]
    pub majors: Vec<String>,
    /// Semesters, in plan order.
    #[serde(default)]
    pub semesters: Vec<Semester>,
    /// Catalog codes (or free text) of credits transferred in.
    #[serde(default)]
    pub transfer_credits: Vec<String>,
    /// When the snapshot was last written by a persistence sink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}
