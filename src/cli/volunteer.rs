//! Volunteer commands: profiles, badges, reviews, and the directory.

use tracing::info;

use crate::clock;
use crate::directory::{self, DirectoryEntry, DirectoryFilter, DirectorySort};
use crate::identity;
use crate::model::{Badge, VolunteerProfile, VolunteerReview, WEEKDAYS};
use crate::stats;

use super::case::resolve_case;
use super::format::{format_directory_line, format_profile};
use super::{Context, ProfileArgs, VolunteerCommand, print_json};

pub(super) fn run<C>(ctx: &Context<'_, C>, command: VolunteerCommand) -> Result<(), String> {
    match command {
        VolunteerCommand::Join { name, details } => cmd_join(ctx, &name, details),
        VolunteerCommand::Show { volunteer } => cmd_show(ctx, volunteer.as_deref()),
        VolunteerCommand::Edit {
            name,
            details,
            remove_skills,
        } => cmd_edit(ctx, name.as_deref(), details, &remove_skills),
        VolunteerCommand::Verify { volunteer, method } => {
            let mut profile = load_profile(ctx, &volunteer)?;
            profile.verify(method.to_domain(), ctx.now.timestamp());
            save(ctx, &profile)?;
            info!(volunteer = %profile.id, method = %method.to_domain(), "volunteer verified");
            eprintln!("{} is verified", profile.name);
            Ok(())
        }
        VolunteerCommand::Award {
            volunteer,
            name,
            description,
            category,
        } => {
            let mut profile = load_profile(ctx, &volunteer)?;
            let badge = Badge::new(
                name.trim(),
                description.trim(),
                category.to_domain(),
                ctx.now.timestamp(),
            );
            profile.badges.push(badge);
            save(ctx, &profile)?;
            eprintln!("Awarded '{}' to {}", name.trim(), profile.name);
            Ok(())
        }
        VolunteerCommand::Review {
            volunteer,
            case,
            rating,
            comment,
            anonymous,
        } => cmd_review(ctx, &volunteer, &case, rating, comment, anonymous),
    }
}

fn load_profile<C>(ctx: &Context<'_, C>, id: &str) -> Result<VolunteerProfile, String> {
    ctx.storage.load_profile(id).map_err(|e| e.to_string())
}

fn save<C>(ctx: &Context<'_, C>, profile: &VolunteerProfile) -> Result<(), String> {
    ctx.storage
        .save_profile(profile)
        .map_err(|e| format!("failed to save profile: {e}"))
}

/// Apply `details` on top of `profile`, validating days, times, and distance.
fn apply_details(profile: &mut VolunteerProfile, details: ProfileArgs) -> Result<(), String> {
    if let Some(email) = details.email {
        profile.email = Some(email.trim().to_string()).filter(|e| !e.is_empty());
    }
    if let Some(bio) = details.bio {
        profile.bio = Some(bio.trim().to_string()).filter(|b| !b.is_empty());
    }
    for skill in &details.skills {
        profile.add_skill(skill);
    }
    if !details.categories.is_empty() {
        let mut categories = Vec::new();
        for kind in details.categories.iter().map(|k| k.to_domain()) {
            if !categories.contains(&kind) {
                categories.push(kind);
            }
        }
        profile.preferred_categories = categories;
    }
    if !details.days.is_empty() {
        let mut days = Vec::new();
        for day in &details.days {
            let day = day.trim().to_lowercase();
            if !WEEKDAYS.contains(&day.as_str()) {
                return Err(format!("unknown day '{day}': use monday to sunday"));
            }
            if !days.contains(&day) {
                days.push(day);
            }
        }
        profile.available_hours.days = days;
    }
    for (flag, value, slot) in [
        ("--from", details.from, &mut profile.available_hours.start_time),
        ("--to", details.to, &mut profile.available_hours.end_time),
    ] {
        if let Some(value) = value {
            if clock::minute_of_day(&value).is_none() {
                return Err(format!("{flag} must be HH:MM, got '{value}'"));
            }
            *slot = value.trim().to_string();
        }
    }
    if let Some(km) = details.max_distance {
        if !(km > 0.0 && km.is_finite()) {
            return Err(format!("--max-distance must be a positive number of km, got {km}"));
        }
        profile.max_distance_km = km;
    }
    Ok(())
}

fn cmd_join<C>(ctx: &Context<'_, C>, name: &str, details: ProfileArgs) -> Result<(), String> {
    let volunteer = identity::resolve_volunteer(ctx.volunteer, ctx.config)?;
    let name = name.trim();
    if name.is_empty() {
        return Err("a name is required".to_string());
    }

    let mut profile = VolunteerProfile::new(volunteer, name, ctx.now.timestamp());
    apply_details(&mut profile, details)?;
    ctx.storage
        .insert_profile(&profile)
        .map_err(|e| format!("failed to create profile: {e}"))?;
    info!(volunteer = %profile.id, "volunteer joined");

    if ctx.json {
        print_json(&profile)
    } else {
        println!("{}", profile.id);
        Ok(())
    }
}

fn cmd_edit<C>(
    ctx: &Context<'_, C>,
    name: Option<&str>,
    details: ProfileArgs,
    remove_skills: &[String],
) -> Result<(), String> {
    let volunteer = identity::resolve_volunteer(ctx.volunteer, ctx.config)?;
    let mut profile = load_profile(ctx, &volunteer)?;

    if let Some(name) = name {
        let name = name.trim();
        if name.is_empty() {
            return Err("a name is required".to_string());
        }
        profile.name = name.to_string();
    }
    for skill in remove_skills {
        profile.remove_skill(skill);
    }
    apply_details(&mut profile, details)?;
    save(ctx, &profile)?;

    if ctx.json {
        print_json(&profile)
    } else {
        eprintln!("Updated profile for {}", profile.name);
        Ok(())
    }
}

fn cmd_review<C>(
    ctx: &Context<'_, C>,
    volunteer: &str,
    reference: &str,
    rating: u8,
    comment: Option<String>,
    anonymous: bool,
) -> Result<(), String> {
    let reviewer = identity::resolve_volunteer(ctx.volunteer, ctx.config)?;
    let profile = load_profile(ctx, volunteer)?;
    let case = resolve_case(ctx, reference)?;

    let mut review = VolunteerReview::new(
        reviewer,
        profile.id,
        case.id,
        rating,
        ctx.now.timestamp(),
    )
    .map_err(|e| e.to_string())?;
    review.comment = comment.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
    review.anonymous = anonymous;

    ctx.storage
        .add_review(&review)
        .map_err(|e| format!("failed to save review: {e}"))?;
    info!(volunteer = %review.volunteer_id, rating = review.rating, "review added");
    eprintln!("Thanks for the review");
    Ok(())
}

/// Every profile with stats derived from the logs.
fn directory_entries<C>(ctx: &Context<'_, C>) -> Result<Vec<DirectoryEntry>, String> {
    let storage_err = |e: crate::storage::StorageError| format!("failed to load volunteers: {e}");
    let profiles = ctx.storage.list_profiles().map_err(storage_err)?;
    let cases = ctx.storage.list_cases().map_err(storage_err)?;
    let activities = ctx.storage.list_activities().map_err(storage_err)?;
    let reviews = ctx.storage.list_reviews().map_err(storage_err)?;

    Ok(profiles
        .into_iter()
        .map(|profile| {
            let stats = stats::calculate_volunteer_stats(
                &profile.id,
                &cases,
                &activities,
                &reviews,
                &ctx.now,
            );
            DirectoryEntry { profile, stats }
        })
        .collect())
}

fn cmd_show<C>(ctx: &Context<'_, C>, volunteer: Option<&str>) -> Result<(), String> {
    let id = match volunteer {
        Some(id) => id.to_string(),
        None => identity::resolve_volunteer(ctx.volunteer, ctx.config)?,
    };
    let entry = directory_entries(ctx)?
        .into_iter()
        .find(|e| e.profile.id == id)
        .ok_or_else(|| format!("volunteer not found: {id}"))?;

    if ctx.json {
        return print_json(&entry);
    }
    println!("{}", format_profile(&entry));
    Ok(())
}

pub(super) fn cmd_directory<C>(
    ctx: &Context<'_, C>,
    filter: &DirectoryFilter,
    sort: DirectorySort,
) -> Result<(), String> {
    let entries = directory_entries(ctx)?;
    let shown = directory::search(&entries, filter, sort);

    if ctx.json {
        return print_json(&shown);
    }
    if shown.is_empty() {
        println!("No volunteers");
        return Ok(());
    }
    for entry in &shown {
        println!("{}", format_directory_line(entry));
    }
    Ok(())
}
