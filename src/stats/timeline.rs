//! Activity timeline: the activity log joined to the cases it refers to.

use std::collections::HashMap;

use jiff::{Timestamp, Zoned};
use serde::Serialize;
use uuid::Uuid;

use crate::clock::{self, WEEK};
use crate::model::{ActivityAction, CaseKind, CaseReport, VolunteerActivity};

/// One activity with the case it touched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub activity_id: Uuid,
    pub case_id: Uuid,
    pub action: ActivityAction,
    pub kind: CaseKind,
    pub description: String,
    pub timestamp: Timestamp,
}

/// Joins activities to their cases, most recent first.
///
/// Activities whose case is missing are dropped.
pub fn build_timeline(
    activities: &[VolunteerActivity],
    cases: &[CaseReport],
) -> Vec<TimelineEntry> {
    let by_id: HashMap<Uuid, &CaseReport> = cases.iter().map(|c| (c.id, c)).collect();

    let mut entries: Vec<TimelineEntry> = activities
        .iter()
        .filter_map(|a| {
            let case = by_id.get(&a.case_id)?;
            Some(TimelineEntry {
                activity_id: a.id,
                case_id: case.id,
                action: a.action,
                kind: case.kind,
                description: format!("{} {} case", lead_in(a.action), case.kind),
                timestamp: a.timestamp,
            })
        })
        .collect();

    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries
}

fn lead_in(action: ActivityAction) -> &'static str {
    match action {
        ActivityAction::Helped => "Completed assistance for",
        ActivityAction::StartedHelping => "Started helping with",
        ActivityAction::Reported => "Reported new",
        ActivityAction::Updated => "Updated information for",
    }
}

/// Counts over a timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSummary {
    pub helped: usize,
    pub started: usize,
    pub reported: usize,
    pub updated: usize,
    pub homeless: usize,
    pub animals: usize,

    /// Entries on `now`'s local calendar day.
    pub today: usize,
    pub this_week: usize,
}

impl TimelineSummary {
    pub fn new(entries: &[TimelineEntry], now: &Zoned) -> Self {
        let week_start = clock::window_start(now, WEEK);
        let mut summary = Self::default();
        for entry in entries {
            match entry.action {
                ActivityAction::Helped => summary.helped += 1,
                ActivityAction::StartedHelping => summary.started += 1,
                ActivityAction::Reported => summary.reported += 1,
                ActivityAction::Updated => summary.updated += 1,
            }
            match entry.kind {
                CaseKind::Homeless => summary.homeless += 1,
                CaseKind::Animal => summary.animals += 1,
            }
            if clock::same_local_day(entry.timestamp, now) {
                summary.today += 1;
            }
            if entry.timestamp >= week_start {
                summary.this_week += 1;
            }
        }
        summary
    }
}
