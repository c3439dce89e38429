//! Activity types: the volunteer audit log.
//!
//! Each entry is an immutable record of one volunteer action against a case.
//! The referenced case may no longer exist; consumers skip such entries.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Location;

/// One volunteer action, recorded as it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerActivity {
    pub id: Uuid,

    /// Which volunteer acted (free-form identity, e.g. "sam").
    pub volunteer_id: String,

    pub case_id: Uuid,

    pub action: ActivityAction,

    pub timestamp: Timestamp,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Time spent helping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,

    /// What was handed over: food, blankets, medical, etc.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources_provided: Vec<String>,
}

impl VolunteerActivity {
    /// A bare activity with no location, notes, or resources.
    pub fn new(
        volunteer_id: impl Into<String>,
        case_id: Uuid,
        action: ActivityAction,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            volunteer_id: volunteer_id.into(),
            case_id,
            action,
            timestamp,
            location: None,
            notes: None,
            duration_minutes: None,
            resources_provided: Vec::new(),
        }
    }
}

/// What the volunteer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityAction {
    Helped,
    StartedHelping,
    Reported,
    Updated,
}

impl ActivityAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Helped => "helped",
            Self::StartedHelping => "started-helping",
            Self::Reported => "reported",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
