//! Case workflow commands: report, list, start, help, close.

use tracing::info;
use uuid::Uuid;

use crate::browse::{self, CaseFilter};
use crate::identity;
use crate::model::{
    ActivityAction, CaseKind, CaseReport, CaseStatus, Location, MAX_DESCRIPTION_CHARS, Urgency,
    VolunteerActivity,
};
use crate::notify::Channel;

use super::format::format_case_line;
use super::{CaseCommand, Context, print_json};

pub(super) fn run<C: Channel>(ctx: &mut Context<'_, C>, command: CaseCommand) -> Result<(), String> {
    match command {
        CaseCommand::Report {
            kind,
            urgency,
            lat,
            lng,
            address,
            tags,
            description,
        } => {
            let location = lat.zip(lng).map(|(lat, lng)| Location::new(lat, lng));
            let mut case = new_case(
                ctx,
                kind.to_domain(),
                urgency.to_domain(),
                location,
                &description,
            )?;
            case.address = address;
            case.tags = tags;
            cmd_report(ctx, &case)
        }
        CaseCommand::List { kind, status } => {
            let filter = CaseFilter {
                kind: kind.map(super::KindArg::to_domain),
                status: status.map(super::StatusArg::to_domain),
            };
            cmd_list(ctx, &filter)
        }
        CaseCommand::Start { case } => cmd_start(ctx, &case),
        CaseCommand::Help {
            case,
            by,
            notes,
            duration,
            provided,
        } => {
            let details = HelpDetails {
                by,
                notes,
                duration_minutes: duration,
                provided,
            };
            cmd_help(ctx, &case, details)
        }
        CaseCommand::Close { case } => cmd_close(ctx, &case),
    }
}

fn require_volunteer<C>(ctx: &Context<'_, C>) -> Result<String, String> {
    identity::resolve_volunteer(ctx.volunteer, ctx.config)
}

/// Build an open case reported now, validating the description and location.
///
/// Falls back to the configured home when no location is given.
fn new_case<C>(
    ctx: &Context<'_, C>,
    kind: CaseKind,
    urgency: Urgency,
    location: Option<Location>,
    description: &str,
) -> Result<CaseReport, String> {
    let description = description.trim();
    if description.is_empty() {
        return Err("describe the situation".to_string());
    }
    let chars = description.chars().count();
    if chars > MAX_DESCRIPTION_CHARS {
        return Err(format!(
            "description is {chars} characters; keep it under {MAX_DESCRIPTION_CHARS}"
        ));
    }
    let location = location.or(ctx.config.home).ok_or(
        "a location is required: pass --lat and --lng, or set `home` in the config",
    )?;

    Ok(CaseReport::open(
        kind,
        location,
        description,
        urgency,
        ctx.now.timestamp(),
    ))
}

fn cmd_report<C: Channel>(ctx: &mut Context<'_, C>, case: &CaseReport) -> Result<(), String> {
    let volunteer = require_volunteer(ctx)?;
    let activity = VolunteerActivity::new(
        volunteer,
        case.id,
        ActivityAction::Reported,
        case.reported_at,
    );
    ctx.storage
        .record_report(case, &activity)
        .map_err(|e| format!("failed to save case: {e}"))?;
    info!(case = %case.id, kind = %case.kind, urgency = %case.urgency, "case reported");

    if let Some(n) = ctx
        .notifier
        .alert(case, &ctx.config.notifications, ctx.config.home, &ctx.now)
    {
        info!(tag = %n.tag, "nearby case notification sent");
    }

    if ctx.json {
        print_json(case)
    } else {
        println!("{}", case.id);
        Ok(())
    }
}

fn cmd_list<C>(ctx: &Context<'_, C>, filter: &CaseFilter) -> Result<(), String> {
    let cases = ctx
        .storage
        .list_cases()
        .map_err(|e| format!("failed to list cases: {e}"))?;
    let shown = browse::browse(&cases, filter);

    if ctx.json {
        return print_json(&shown);
    }
    if shown.is_empty() {
        println!("No cases");
        return Ok(());
    }
    for case in &shown {
        println!("{}", format_case_line(case, &ctx.now, ctx.config.home));
    }
    Ok(())
}

fn cmd_start<C>(ctx: &Context<'_, C>, reference: &str) -> Result<(), String> {
    let case = resolve_case(ctx, reference)?;
    let volunteer = require_volunteer(ctx)?;
    let activity = VolunteerActivity::new(
        volunteer,
        case.id,
        ActivityAction::StartedHelping,
        ctx.now.timestamp(),
    );
    cmd_advance(ctx, case, CaseStatus::InProgress, None, activity)
}

/// What the volunteer records alongside `case help`.
#[derive(Debug, Default)]
struct HelpDetails {
    by: Option<String>,
    notes: Option<String>,
    duration_minutes: Option<u32>,
    provided: Vec<String>,
}

fn cmd_help<C>(ctx: &Context<'_, C>, reference: &str, details: HelpDetails) -> Result<(), String> {
    let case = resolve_case(ctx, reference)?;
    let volunteer = require_volunteer(ctx)?;
    let helped_by = details.by.unwrap_or_else(|| volunteer.clone());
    let mut activity = VolunteerActivity::new(
        volunteer,
        case.id,
        ActivityAction::Helped,
        ctx.now.timestamp(),
    );
    activity.location = Some(case.location);
    activity.notes = details.notes;
    activity.duration_minutes = details.duration_minutes;
    activity.resources_provided = details.provided;
    cmd_advance(ctx, case, CaseStatus::Helped, Some(&helped_by), activity)
}

fn cmd_close<C>(ctx: &Context<'_, C>, reference: &str) -> Result<(), String> {
    let case = resolve_case(ctx, reference)?;
    let volunteer = require_volunteer(ctx)?;
    let mut activity = VolunteerActivity::new(
        volunteer,
        case.id,
        ActivityAction::Updated,
        ctx.now.timestamp(),
    );
    activity.notes = Some("closed".to_string());
    cmd_advance(ctx, case, CaseStatus::Closed, None, activity)
}

fn cmd_advance<C>(
    ctx: &Context<'_, C>,
    mut case: CaseReport,
    next: CaseStatus,
    helped_by: Option<&str>,
    activity: VolunteerActivity,
) -> Result<(), String> {
    case.advance(next, ctx.now.timestamp(), helped_by)
        .map_err(|e| format!("{}: {e}", short_id(case.id)))?;
    ctx.storage
        .advance_case(&case, &activity)
        .map_err(|e| format!("failed to update case: {e}"))?;
    info!(case = %case.id, status = %case.status, volunteer = %activity.volunteer_id, "case advanced");

    if ctx.json {
        print_json(&case)
    } else {
        eprintln!("Case {} is now {}", short_id(case.id), case.status);
        Ok(())
    }
}

pub(super) fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Resolve a case reference (full UUID or unambiguous prefix) to a case.
///
/// Prefixes are matched case-insensitively.
pub(super) fn resolve_case<C>(ctx: &Context<'_, C>, reference: &str) -> Result<CaseReport, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return ctx
            .storage
            .load_case(id)
            .map_err(|e| format!("case not found: {e}"));
    }

    // Try as a prefix match against all cases.
    let cases = ctx
        .storage
        .list_cases()
        .map_err(|e| format!("failed to list cases: {e}"))?;

    let prefix = reference.to_ascii_lowercase();
    let matches: Vec<&CaseReport> = cases
        .iter()
        .filter(|c| c.id.to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [] => Err(format!("no case matching '{reference}'")),
        [case] => Ok((*case).clone()),
        many => {
            let ids: Vec<String> = many.iter().map(|c| short_id(c.id)).collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {} cases: {}",
                many.len(),
                ids.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cli::test_support::{Recorder, context, now, test_storage};
    use crate::config::Config;
    use crate::notify::Notifier;
    use crate::storage::Storage;

    fn stored_case(storage: &Storage, id: &str) -> CaseReport {
        let mut case = CaseReport::open(
            CaseKind::Animal,
            Location::new(40.7589, -73.9851),
            "Injured dog near the park.",
            Urgency::High,
            now().timestamp() - jiff::SignedDuration::from_hours(2),
        );
        case.id = id.parse().unwrap();
        storage.insert_case(&case).unwrap();
        case
    }

    #[test]
    fn resolve_by_full_id() {
        let (_dir, storage) = test_storage();
        let config = Config::default();
        let mut notifier = Notifier::new(Recorder::default());
        let ctx = context(&config, &storage, &mut notifier);
        let case = stored_case(&storage, "5f2c9a01-0000-4000-8000-000000000001");

        let found = resolve_case(&ctx, &case.id.to_string()).unwrap();
        assert_eq!(found.id, case.id);
    }

    #[test]
    fn resolve_by_unique_prefix_ignores_case() {
        let (_dir, storage) = test_storage();
        let config = Config::default();
        let mut notifier = Notifier::new(Recorder::default());
        let ctx = context(&config, &storage, &mut notifier);
        let case = stored_case(&storage, "5f2c9a01-0000-4000-8000-000000000001");
        stored_case(&storage, "abcdef01-0000-4000-8000-000000000002");

        assert_eq!(resolve_case(&ctx, "5f2").unwrap().id, case.id);
        assert_eq!(resolve_case(&ctx, "5F2C").unwrap().id, case.id);
    }

    #[test]
    fn resolve_ambiguous_prefix_fails() {
        let (_dir, storage) = test_storage();
        let config = Config::default();
        let mut notifier = Notifier::new(Recorder::default());
        let ctx = context(&config, &storage, &mut notifier);
        stored_case(&storage, "5f2c9a01-0000-4000-8000-000000000001");
        stored_case(&storage, "5f2d0000-0000-4000-8000-000000000002");

        let err = resolve_case(&ctx, "5f2").unwrap_err();
        assert!(err.contains("ambiguous"));
        assert!(err.contains("5f2c9a01"));
        assert!(err.contains("5f2d0000"));
    }

    #[test]
    fn resolve_unknown_prefix_fails() {
        let (_dir, storage) = test_storage();
        let config = Config::default();
        let mut notifier = Notifier::new(Recorder::default());
        let ctx = context(&config, &storage, &mut notifier);
        stored_case(&storage, "5f2c9a01-0000-4000-8000-000000000001");

        let err = resolve_case(&ctx, "999").unwrap_err();
        assert_eq!(err, "no case matching '999'");
    }

    #[test]
    fn help_stamps_case_and_logs_one_activity() {
        let (_dir, storage) = test_storage();
        let config = Config::default();
        let mut notifier = Notifier::new(Recorder::default());
        let ctx = context(&config, &storage, &mut notifier);
        let case = stored_case(&storage, "5f2c9a01-0000-4000-8000-000000000001");

        let details = HelpDetails {
            notes: Some("Taken to the vet".into()),
            duration_minutes: Some(40),
            ..HelpDetails::default()
        };
        cmd_help(&ctx, "5f2", details).unwrap();

        let helped = storage.load_case(case.id).unwrap();
        assert_eq!(helped.status, CaseStatus::Helped);
        assert_eq!(helped.helped_at, Some(now().timestamp()));
        assert_eq!(helped.helped_by.as_deref(), Some("sam"));

        let log = storage.list_activities().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, ActivityAction::Helped);
        assert_eq!(log[0].case_id, case.id);
        assert_eq!(log[0].duration_minutes, Some(40));
    }

    #[test]
    fn start_on_closed_case_fails_without_logging() {
        let (_dir, storage) = test_storage();
        let config = Config::default();
        let mut notifier = Notifier::new(Recorder::default());
        let ctx = context(&config, &storage, &mut notifier);
        let case = stored_case(&storage, "5f2c9a01-0000-4000-8000-000000000001");
        cmd_close(&ctx, "5f2").unwrap();

        let err = cmd_start(&ctx, "5f2").unwrap_err();

        assert!(err.contains("cannot move from closed to in-progress"));
        assert_eq!(storage.load_case(case.id).unwrap().status, CaseStatus::Closed);
        let log = storage.list_activities().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, ActivityAction::Updated);
    }

    #[test]
    fn report_without_location_or_home_is_rejected() {
        let (_dir, storage) = test_storage();
        let config = Config::default();
        let mut notifier = Notifier::new(Recorder::default());
        let ctx = context(&config, &storage, &mut notifier);

        let err = new_case(&ctx, CaseKind::Homeless, Urgency::Low, None, "Needs food").unwrap_err();

        assert!(err.starts_with("a location is required"));
    }

    #[test]
    fn report_falls_back_to_home() {
        let (_dir, storage) = test_storage();
        let home = Location::new(40.7128, -74.0060);
        let config = Config {
            home: Some(home),
            ..Config::default()
        };
        let mut notifier = Notifier::new(Recorder::default());
        let ctx = context(&config, &storage, &mut notifier);

        let case = new_case(&ctx, CaseKind::Homeless, Urgency::Low, None, "  Needs food ").unwrap();

        assert_eq!(case.location, home);
        assert_eq!(case.description, "Needs food");
        assert_eq!(case.reported_at, now().timestamp());
    }

    #[test]
    fn overlong_description_is_rejected() {
        let (_dir, storage) = test_storage();
        let config = Config::default();
        let mut notifier = Notifier::new(Recorder::default());
        let ctx = context(&config, &storage, &mut notifier);
        let here = Some(Location::new(40.7128, -74.0060));

        let at_limit = "x".repeat(MAX_DESCRIPTION_CHARS);
        assert!(new_case(&ctx, CaseKind::Animal, Urgency::Low, here, &at_limit).is_ok());

        let too_long = "x".repeat(5000);
        let err = new_case(&ctx, CaseKind::Animal, Urgency::Low, here, &too_long).unwrap_err();
        assert!(err.contains("5000 characters"));
    }

    #[test]
    fn report_stores_case_logs_activity_and_alerts() {
        let (_dir, storage) = test_storage();
        let config = Config::default();
        let mut notifier = Notifier::new(Recorder::default());
        notifier.request_permission();
        let mut ctx = context(&config, &storage, &mut notifier);
        let here = Some(Location::new(40.7128, -74.0060));
        let case = new_case(&ctx, CaseKind::Animal, Urgency::High, here, "Injured dog").unwrap();

        cmd_report(&mut ctx, &case).unwrap();

        assert_eq!(storage.load_case(case.id).unwrap(), case);
        let log = storage.list_activities().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, ActivityAction::Reported);
        assert_eq!(log[0].volunteer_id, "sam");
        assert_eq!(notifier.channel().delivered.len(), 1);
    }
}
