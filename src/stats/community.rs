//! Community-wide metrics derived from the case log.

use jiff::Zoned;
use serde::Serialize;

use crate::clock::{self, MONTH, WEEK};
use crate::model::CaseReport;

/// Community-wide metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityStats {
    pub total_volunteers: u32,
    pub active_cases: usize,
    pub cases_resolved_today: usize,
    pub cases_resolved_this_week: usize,
    pub cases_resolved_this_month: usize,

    /// Minutes.
    pub average_resolution_time: u32,

    pub top_volunteers: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub cases_helped: usize,
}

/// Stand-in values for metrics that need data nobody collects yet.
///
/// There is no volunteer registry and no per-volunteer attribution, so the
/// volunteer count, the resolution time and the peer rows of the leaderboard
/// come from here instead of being derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityBaseline {
    pub total_volunteers: u32,
    pub average_resolution_minutes: u32,

    /// Leaderboard rows listed after the local volunteer.
    pub peers: Vec<LeaderboardEntry>,
}

impl Default for CommunityBaseline {
    fn default() -> Self {
        Self {
            total_volunteers: 127,
            average_resolution_minutes: 180,
            peers: vec![
                LeaderboardEntry {
                    id: "2".into(),
                    name: "Sarah M.".into(),
                    cases_helped: 23,
                },
                LeaderboardEntry {
                    id: "3".into(),
                    name: "Mike R.".into(),
                    cases_helped: 19,
                },
            ],
        }
    }
}

/// Derive community stats from the case log.
///
/// "This week" and "this month" are rolling 7- and 30-day windows ending at
/// `now`, not calendar periods.
pub fn calculate_community_stats(
    cases: &[CaseReport],
    baseline: &CommunityBaseline,
    now: &Zoned,
) -> CommunityStats {
    let week_start = clock::window_start(now, WEEK);
    let month_start = clock::window_start(now, MONTH);

    let active_cases = cases.iter().filter(|c| c.is_active()).count();

    let resolved: Vec<_> = cases
        .iter()
        .filter(|c| c.is_helped())
        .filter_map(|c| c.helped_at)
        .collect();

    let cases_resolved_today = resolved
        .iter()
        .filter(|&&at| clock::same_local_day(at, now))
        .count();
    let cases_resolved_this_week = resolved.iter().filter(|&&at| at >= week_start).count();
    let cases_resolved_this_month = resolved.iter().filter(|&&at| at >= month_start).count();

    let mut top_volunteers = Vec::with_capacity(baseline.peers.len() + 1);
    top_volunteers.push(LeaderboardEntry {
        id: "1".into(),
        name: "You".into(),
        cases_helped: cases.iter().filter(|c| c.is_helped()).count(),
    });
    top_volunteers.extend(baseline.peers.iter().cloned());

    CommunityStats {
        total_volunteers: baseline.total_volunteers,
        active_cases,
        cases_resolved_today,
        cases_resolved_this_week,
        cases_resolved_this_month,
        average_resolution_time: baseline.average_resolution_minutes,
        top_volunteers,
    }
}
