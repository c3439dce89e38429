//! Output formatting for CLI display.

use jiff::Zoned;

use crate::clock::format_time_ago;
use crate::geo;
use crate::model::{CaseKind, CaseReport, Location};
use crate::directory::DirectoryEntry;
use crate::stats::{CommunityStats, DayBucket, GoalProgress, ImpactStats, TimelineEntry};

use super::case::short_id;

/// Width of the weekly goal progress bar.
const BAR_WIDTH: usize = 20;

/// One line per case: id, urgency, status, kind, age, distance, description.
pub(super) fn format_case_line(case: &CaseReport, now: &Zoned, home: Option<Location>) -> String {
    let distance = home
        .map(|h| geo::format_distance(geo::distance_km(h, case.location)))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}  [{}] [{}] {:<8}  {:>9}  {:>7}  {}",
        short_id(case.id),
        case.urgency,
        case.status,
        case.kind,
        format_time_ago(case.reported_at, now),
        distance,
        case.description
    )
}

pub(super) fn format_category(category: Option<CaseKind>) -> &'static str {
    match category {
        Some(CaseKind::Homeless) => "people",
        Some(CaseKind::Animal) => "animals",
        None => "balanced",
    }
}

pub(super) fn format_impact(stats: &ImpactStats, progress: &GoalProgress) -> String {
    let filled = BAR_WIDTH * progress.percent() as usize / 100;
    let bar = format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled));

    [
        format!("Cases helped:      {}", stats.total_cases_helped),
        format!("  people:          {}", stats.people_helped),
        format!("  animals:         {}", stats.animals_helped),
        format!("Reports:           {}", stats.total_reports),
        format!("Active streak:     {} day(s)", stats.active_streak),
        format!("Avg response:      {} min", stats.average_response_time),
        format!(
            "Most active:       {}",
            format_category(stats.most_active_category)
        ),
        format!(
            "Weekly goal:       [{bar}] {}/{} ({}%)",
            progress.progress,
            progress.goal,
            progress.percent()
        ),
    ]
    .join("\n")
}

pub(super) fn format_community(stats: &CommunityStats) -> String {
    let mut lines = vec![
        format!("Volunteers:        {}", stats.total_volunteers),
        format!("Active cases:      {}", stats.active_cases),
        format!("Resolved today:    {}", stats.cases_resolved_today),
        format!("Resolved (7 days): {}", stats.cases_resolved_this_week),
        format!("Resolved (30 days): {}", stats.cases_resolved_this_month),
        format!("Avg resolution:    {} min", stats.average_resolution_time),
        "Top volunteers:".to_string(),
    ];
    lines.extend(
        stats
            .top_volunteers
            .iter()
            .enumerate()
            .map(|(rank, v)| format!("  {}. {:<12} {}", rank + 1, v.name, v.cases_helped)),
    );
    lines.join("\n")
}

pub(super) fn format_weekly(week: &[DayBucket]) -> String {
    week.iter()
        .map(|day| {
            format!(
                "{} {}  {:<10} {} ({} people, {} animals)",
                day.day,
                day.date,
                "#".repeat(day.total.min(10)),
                day.total,
                day.homeless,
                day.animals
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn format_timeline_entry(entry: &TimelineEntry, now: &Zoned) -> String {
    format!(
        "{:>9}  {}  {}",
        format_time_ago(entry.timestamp, now),
        entry.description,
        short_id(entry.case_id)
    )
}

/// Volunteered hours: "<1h", whole hours from 100, else one decimal.
pub(super) fn format_hours(hours: f64) -> String {
    if hours < 1.0 {
        "<1h".to_string()
    } else if hours >= 100.0 {
        format!("{}h", hours.floor())
    } else {
        format!("{hours:.1}h")
    }
}

/// One line per volunteer: id, name, rating, cases, hours, verification, latest badge.
pub(super) fn format_directory_line(entry: &DirectoryEntry) -> String {
    let profile = &entry.profile;
    let stats = &entry.stats;
    let mut line = format!(
        "{:<12} {:<20} {:.1} ({})  {:>3} cases  {:>6}",
        profile.id,
        profile.name,
        stats.rating,
        stats.review_count,
        stats.total_cases_helped,
        format_hours(stats.total_hours_volunteered),
    );
    if profile.is_verified() {
        line.push_str("  verified");
    }
    if let Some(badge) = profile.latest_badge() {
        line.push_str(&format!("  [{}]", badge.name));
    }
    line
}

pub(super) fn format_profile(entry: &DirectoryEntry) -> String {
    let profile = &entry.profile;
    let stats = &entry.stats;
    let hours = &profile.available_hours;

    let verified = match &profile.verification {
        Some(v) => format!("yes ({}, {})", v.method, v.verified_at.strftime("%Y-%m-%d")),
        None => "no".to_string(),
    };
    let days = if hours.days.is_empty() {
        "-".to_string()
    } else {
        hours.days.join(", ")
    };
    let categories: Vec<&str> = profile
        .preferred_categories
        .iter()
        .map(|k| k.as_str())
        .collect();

    let mut lines = vec![
        format!("{} ({})", profile.name, profile.id),
        format!("Joined:            {}", profile.joined_at.strftime("%Y-%m-%d")),
        format!("Verified:          {verified}"),
    ];
    if let Some(bio) = &profile.bio {
        lines.push(format!("Bio:               {bio}"));
    }
    lines.extend([
        format!("Skills:            {}", profile.skills.join(", ")),
        format!("Available:         {days} {}-{}", hours.start_time, hours.end_time),
        format!(
            "Prefers:           {} within {}km",
            categories.join(", "),
            profile.max_distance_km
        ),
        format!("Cases helped:      {}", stats.total_cases_helped),
        format!("  people:          {}", stats.people_helped),
        format!("  animals:         {}", stats.animals_helped),
        format!("Reports:           {}", stats.total_reports),
        format!("Hours:             {}", format_hours(stats.total_hours_volunteered)),
        format!("Active streak:     {} day(s)", stats.active_streak_days),
        format!("Avg response:      {} min", stats.average_response_time),
        format!(
            "Most active:       {}",
            format_category(stats.most_active_category)
        ),
        format!("Rating:            {:.1} ({} reviews)", stats.rating, stats.review_count),
    ]);
    lines.extend(
        profile
            .badges
            .iter()
            .map(|b| format!("Badge:             {} [{}] {}", b.name, b.category, b.description)),
    );
    lines.join("\n")
}
