//! Per-volunteer stats, derived from what the volunteer logged.

use std::collections::{BTreeSet, HashMap, HashSet};

use jiff::{ToSpan, Zoned};
use serde::Serialize;
use uuid::Uuid;

use crate::model::{ActivityAction, CaseKind, CaseReport, VolunteerActivity, VolunteerReview};

/// What one volunteer has done, as shown on their profile and in the directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerStats {
    /// Distinct known cases the volunteer logged as helped.
    pub total_cases_helped: usize,
    pub total_reports: usize,
    pub total_hours_volunteered: f64,
    pub people_helped: usize,
    pub animals_helped: usize,

    /// Consecutive local days with activity, ending today or yesterday.
    pub active_streak_days: u32,

    /// Mean minutes from report to help over the volunteer's helped cases.
    pub average_response_time: u32,

    pub most_active_category: Option<CaseKind>,

    /// Mean review rating, 0 with no reviews.
    pub rating: f64,
    pub review_count: usize,
}

/// Derive stats for `volunteer_id` from the case and activity logs and reviews.
///
/// Activities that reference unknown cases still count toward reports, hours
/// and streak, but not toward helped counts or response time.
pub fn calculate_volunteer_stats(
    volunteer_id: &str,
    cases: &[CaseReport],
    activities: &[VolunteerActivity],
    reviews: &[VolunteerReview],
    now: &Zoned,
) -> VolunteerStats {
    let by_id: HashMap<Uuid, &CaseReport> = cases.iter().map(|c| (c.id, c)).collect();
    let own: Vec<&VolunteerActivity> = activities
        .iter()
        .filter(|a| a.volunteer_id == volunteer_id)
        .collect();

    let mut seen = HashSet::new();
    let mut people_helped = 0;
    let mut animals_helped = 0;
    let mut response_minutes = Vec::new();
    for a in own.iter().filter(|a| a.action == ActivityAction::Helped) {
        let Some(case) = by_id.get(&a.case_id) else {
            continue;
        };
        if !seen.insert(case.id) {
            continue;
        }
        match case.kind {
            CaseKind::Homeless => people_helped += 1,
            CaseKind::Animal => animals_helped += 1,
        }
        let waited = a.timestamp.duration_since(case.reported_at);
        response_minutes.push(waited.as_mins().max(0));
    }

    let total_minutes: u64 = own
        .iter()
        .filter_map(|a| a.duration_minutes)
        .map(u64::from)
        .sum();

    let most_active_category = match people_helped.cmp(&animals_helped) {
        std::cmp::Ordering::Greater => Some(CaseKind::Homeless),
        std::cmp::Ordering::Less => Some(CaseKind::Animal),
        std::cmp::Ordering::Equal => None,
    };

    let ratings: Vec<u8> = reviews
        .iter()
        .filter(|r| r.volunteer_id == volunteer_id)
        .map(|r| r.rating)
        .collect();

    VolunteerStats {
        total_cases_helped: seen.len(),
        total_reports: own
            .iter()
            .filter(|a| a.action == ActivityAction::Reported)
            .count(),
        total_hours_volunteered: total_minutes as f64 / 60.0,
        people_helped,
        animals_helped,
        active_streak_days: streak_days(&own, now),
        average_response_time: mean(&response_minutes),
        most_active_category,
        rating: if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64
        },
        review_count: ratings.len(),
    }
}

/// Counts back from today (or yesterday, if today is still quiet) while every
/// day has at least one activity.
fn streak_days(activities: &[&VolunteerActivity], now: &Zoned) -> u32 {
    let tz = now.time_zone();
    let days: BTreeSet<_> = activities
        .iter()
        .map(|a| a.timestamp.to_zoned(tz.clone()).date())
        .collect();

    let today = now.date();
    let mut day = if days.contains(&today) {
        today
    } else {
        today.saturating_sub(1.day())
    };
    let mut streak = 0;
    while days.contains(&day) {
        streak += 1;
        day = day.saturating_sub(1.day());
    }
    streak
}

fn mean(minutes: &[i64]) -> u32 {
    if minutes.is_empty() {
        return 0;
    }
    let avg = minutes.iter().sum::<i64>() / minutes.len() as i64;
    u32::try_from(avg).unwrap_or(u32::MAX)
}
