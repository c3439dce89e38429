//! Case browsing: filter by kind and status, most pressing first.

use crate::model::{CaseKind, CaseReport, CaseStatus};

/// Which cases to show. `None` matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseFilter {
    pub kind: Option<CaseKind>,
    pub status: Option<CaseStatus>,
}

impl CaseFilter {
    pub fn matches(&self, case: &CaseReport) -> bool {
        self.kind.is_none_or(|k| k == case.kind) && self.status.is_none_or(|s| s == case.status)
    }
}

/// Matching cases, highest urgency first, then most recently reported.
pub fn browse<'a>(cases: &'a [CaseReport], filter: &CaseFilter) -> Vec<&'a CaseReport> {
    let mut shown: Vec<&CaseReport> = cases.iter().filter(|c| filter.matches(c)).collect();
    shown.sort_by(|a, b| {
        b.urgency
            .cmp(&a.urgency)
            .then_with(|| b.reported_at.cmp(&a.reported_at))
    });
    shown
}
