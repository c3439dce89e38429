//! Personal impact: what the volunteer has contributed.

use jiff::Zoned;
use serde::Serialize;

use crate::clock::{self, WEEK};
use crate::model::{ActivityAction, CaseKind, CaseReport, VolunteerActivity};

/// Average response time reported until real measurements exist.
pub const PLACEHOLDER_RESPONSE_MINUTES: u32 = 45;

/// A snapshot of one volunteer's impact.
///
/// Case counts cover the whole case log. Cases carry no reporter, so there is
/// nothing to attribute them by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactStats {
    pub total_cases_helped: usize,
    pub total_reports: usize,
    pub people_helped: usize,
    pub animals_helped: usize,

    /// `helped` activities in the trailing seven days.
    pub weekly_progress: usize,

    /// 1 when there was any activity today, else 0. Does not look back further.
    pub active_streak: u32,

    /// Minutes. Currently a fixed placeholder.
    pub average_response_time: u32,

    pub most_active_category: Option<CaseKind>,
}

/// Derive impact stats from the case and activity logs.
pub fn calculate_impact_stats(
    cases: &[CaseReport],
    activities: &[VolunteerActivity],
    now: &Zoned,
) -> ImpactStats {
    let helped: Vec<&CaseReport> = cases.iter().filter(|c| c.is_helped()).collect();
    let people_helped = helped.iter().filter(|c| c.kind == CaseKind::Homeless).count();
    let animals_helped = helped.iter().filter(|c| c.kind == CaseKind::Animal).count();

    let week_start = clock::window_start(now, WEEK);
    let weekly_progress = activities
        .iter()
        .filter(|a| a.action == ActivityAction::Helped)
        .filter(|a| a.timestamp >= week_start && a.timestamp <= now.timestamp())
        .count();

    let active_today = activities
        .iter()
        .any(|a| clock::same_local_day(a.timestamp, now));

    let most_active_category = match people_helped.cmp(&animals_helped) {
        std::cmp::Ordering::Greater => Some(CaseKind::Homeless),
        std::cmp::Ordering::Less => Some(CaseKind::Animal),
        std::cmp::Ordering::Equal => None,
    };

    ImpactStats {
        total_cases_helped: helped.len(),
        total_reports: cases.len(),
        people_helped,
        animals_helped,
        weekly_progress,
        active_streak: u32::from(active_today),
        average_response_time: PLACEHOLDER_RESPONSE_MINUTES,
        most_active_category,
    }
}

/// Weekly progress measured against a caller-chosen goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal: u32,
    pub progress: usize,
}

impl GoalProgress {
    pub fn new(goal: u32, stats: &ImpactStats) -> Self {
        Self {
            goal,
            progress: stats.weekly_progress,
        }
    }

    /// Completion percentage, capped at 100. A zero goal counts as met.
    pub fn percent(&self) -> u32 {
        if self.goal == 0 {
            return 100;
        }
        let pct = self.progress.saturating_mul(100) / self.goal as usize;
        u32::try_from(pct.min(100)).unwrap_or(100)
    }

    pub fn is_met(&self) -> bool {
        self.progress >= self.goal as usize
    }
}
