//! Case types: a reported need for assistance and its lifecycle.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Location;

/// Longest description a report may carry, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// A single reported need for assistance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseReport {
    pub id: Uuid,

    /// Who needs help.
    #[serde(rename = "type")]
    pub kind: CaseKind,

    /// Where the case was reported. Required at creation.
    pub location: Location,

    /// Optional human-readable address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    pub description: String,

    /// Severity set at report time. Never changes afterwards.
    pub urgency: Urgency,

    pub status: CaseStatus,

    pub reported_at: Timestamp,

    /// Set exactly once, when the case becomes `Helped`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helped_at: Option<Timestamp>,

    /// Free-text attribution, set alongside `helped_at`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helped_by: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl CaseReport {
    /// Creates an open case reported at `reported_at`.
    pub fn open(
        kind: CaseKind,
        location: Location,
        description: impl Into<String>,
        urgency: Urgency,
        reported_at: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            location,
            address: None,
            description: description.into(),
            urgency,
            status: CaseStatus::Open,
            reported_at,
            helped_at: None,
            helped_by: None,
            tags: Vec::new(),
        }
    }

    /// Moves the case to `next`, stamping `helped_at`/`helped_by` when it becomes helped.
    pub fn advance(
        &mut self,
        next: CaseStatus,
        at: Timestamp,
        helped_by: Option<&str>,
    ) -> Result<(), TransitionError> {
        if !self.status.can_advance_to(next) {
            return Err(TransitionError {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        if next == CaseStatus::Helped {
            self.helped_at = Some(at.max(self.reported_at));
            self.helped_by = helped_by.map(String::from);
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, CaseStatus::Open | CaseStatus::InProgress)
    }

    pub fn is_helped(&self) -> bool {
        self.status == CaseStatus::Helped
    }
}

/// Who a case is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseKind {
    Homeless,
    Animal,
}

impl CaseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Homeless => "homeless",
            Self::Animal => "animal",
        }
    }
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Severity tier, ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Where a case stands in its lifecycle.
///
/// Forward-moving: `Open → InProgress → Helped`, with `Closed` as a terminal
/// alternate. `Helped` and `Closed` accept no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStatus {
    Open,
    InProgress,
    Helped,
    Closed,
}

impl CaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Helped => "helped",
            Self::Closed => "closed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Helped | Self::Closed)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::InProgress | Self::Helped | Self::Closed)
                | (Self::InProgress, Self::Helped | Self::Closed)
        )
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A status change the lifecycle does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("case cannot move from {from} to {to}")]
pub struct TransitionError {
    pub from: CaseStatus,
    pub to: CaseStatus,
}
