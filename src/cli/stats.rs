//! Dashboard commands: impact, community, weekly, and the activity timeline.

use serde::Serialize;
use tracing::debug;

use crate::model::{CaseReport, VolunteerActivity};
use crate::stats::{
    self, CommunityBaseline, GoalProgress, ImpactStats, TimelineEntry, TimelineSummary,
};

use super::format::{format_community, format_impact, format_timeline_entry, format_weekly};
use super::{Context, StatsCommand, print_json};

pub(super) fn run<C>(ctx: &Context<'_, C>, command: StatsCommand) -> Result<(), String> {
    match command {
        StatsCommand::Impact { goal } => cmd_impact(ctx, goal.unwrap_or(ctx.config.weekly_goal)),
        StatsCommand::Community => cmd_community(ctx),
        StatsCommand::Weekly => cmd_weekly(ctx),
    }
}

fn load_cases<C>(ctx: &Context<'_, C>) -> Result<Vec<CaseReport>, String> {
    ctx.storage
        .list_cases()
        .map_err(|e| format!("failed to list cases: {e}"))
}

fn load_activities<C>(ctx: &Context<'_, C>) -> Result<Vec<VolunteerActivity>, String> {
    ctx.storage
        .list_activities()
        .map_err(|e| format!("failed to load activity log: {e}"))
}

/// Impact stats with the caller's weekly goal merged in.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImpactReport {
    #[serde(flatten)]
    stats: ImpactStats,
    weekly_goal: u32,
}

fn cmd_impact<C>(ctx: &Context<'_, C>, goal: u32) -> Result<(), String> {
    let cases = load_cases(ctx)?;
    let activities = load_activities(ctx)?;

    let impact = stats::calculate_impact_stats(&cases, &activities, &ctx.now);
    let progress = GoalProgress::new(goal, &impact);
    debug!(cases = cases.len(), activities = activities.len(), "impact computed");

    if ctx.json {
        return print_json(&ImpactReport {
            stats: impact,
            weekly_goal: goal,
        });
    }
    println!("{}", format_impact(&impact, &progress));
    Ok(())
}

fn cmd_community<C>(ctx: &Context<'_, C>) -> Result<(), String> {
    let cases = load_cases(ctx)?;
    let community = stats::calculate_community_stats(&cases, &CommunityBaseline::default(), &ctx.now);

    if ctx.json {
        return print_json(&community);
    }
    println!("{}", format_community(&community));
    Ok(())
}

fn cmd_weekly<C>(ctx: &Context<'_, C>) -> Result<(), String> {
    let cases = load_cases(ctx)?;
    let week = stats::generate_weekly_data(&cases, &ctx.now);

    if ctx.json {
        return print_json(&week);
    }
    println!("{}", format_weekly(&week));
    Ok(())
}

#[derive(Serialize)]
struct TimelineReport<'a> {
    entries: &'a [TimelineEntry],
    summary: TimelineSummary,
}

pub(super) fn cmd_timeline<C>(ctx: &Context<'_, C>) -> Result<(), String> {
    let cases = load_cases(ctx)?;
    let activities = load_activities(ctx)?;

    let entries = stats::build_timeline(&activities, &cases);
    let summary = TimelineSummary::new(&entries, &ctx.now);
    debug!(
        shown = entries.len(),
        skipped = activities.len() - entries.len(),
        "timeline built"
    );

    if ctx.json {
        return print_json(&TimelineReport {
            entries: &entries,
            summary,
        });
    }
    if entries.is_empty() {
        println!("No activity yet");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", format_timeline_entry(entry, &ctx.now));
    }
    println!();
    println!(
        "{} helped, {} started, {} reported, {} today, {} this week",
        summary.helped, summary.started, summary.reported, summary.today, summary.this_week
    );
    Ok(())
}
