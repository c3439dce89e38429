//! CLI interface for Solidarity.
//!
//! Each subcommand is non-interactive: arguments in, text (or `--json`) out.
//!
//! - `solidarity case report|list|start|help|close`: the case workflow.
//! - `solidarity activity list`: the volunteer activity timeline.
//! - `solidarity stats impact|community|weekly`: dashboard numbers.
//! - `solidarity volunteer join|show|edit|verify|award|review`: profiles.
//! - `solidarity directory`: search volunteers.
//!
//! Case references take a full UUID or an unambiguous prefix.

mod case;
mod format;
mod stats;
mod volunteer;

use clap::{Args, Parser, Subcommand, ValueEnum};
use jiff::Zoned;
use serde::Serialize;

use crate::config::Config;
use crate::directory::{DirectoryFilter, DirectorySort};
use crate::model::{BadgeCategory, CaseKind, CaseStatus, Urgency, VerificationMethod};
use crate::notify::{Channel, Notifier};
use crate::storage::Storage;

/// Solidarity: report and track help for people and animals in need.
#[derive(Debug, Parser)]
#[command(name = "solidarity", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Volunteer identity for logged activities.
    /// Falls back to `SOLIDARITY_VOLUNTEER`, then `volunteer` in the config.
    #[arg(long = "as", global = true)]
    volunteer: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: helping with a case
  1. solidarity case report --kind animal --urgency high --lat 40.7589 --lng=-73.9851 "Injured dog"
     → prints a case ID (e.g. 5f2c9a01)
  2. solidarity case list --status open
  3. solidarity --as sam case start 5f2
  4. solidarity --as sam case help 5f2 --notes "Taken to the vet"

Dashboards:
  solidarity stats impact --goal 5
  solidarity stats community
  solidarity stats weekly --json

Volunteers:
  solidarity --as sam volunteer join --name "Sam Rivera" --skill "First Aid" --day saturday
  solidarity directory aid --verified --sort cases"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report, browse, and update cases.
    Case {
        #[command(subcommand)]
        command: CaseCommand,
    },

    /// Inspect the volunteer activity log.
    Activity {
        #[command(subcommand)]
        command: ActivityCommand,
    },

    /// Show impact and community statistics.
    Stats {
        #[command(subcommand)]
        command: StatsCommand,
    },

    /// Manage volunteer profiles, badges, and reviews.
    Volunteer {
        #[command(subcommand)]
        command: VolunteerCommand,
    },

    /// Search the volunteer directory.
    Directory {
        /// Case-insensitive match against names, bios, and skills.
        query: Option<String>,

        /// Only volunteers who prefer this kind of case.
        #[arg(long, value_enum)]
        category: Option<KindArg>,

        /// Only verified volunteers.
        #[arg(long)]
        verified: bool,

        #[arg(long, value_enum, default_value_t = SortArg::Rating)]
        sort: SortArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum CaseCommand {
    /// Report a new case. Prints the case ID.
    ///
    /// Uses the configured home location when `--lat`/`--lng` are omitted.
    Report {
        /// Who needs help.
        #[arg(long, value_enum)]
        kind: KindArg,

        /// How pressing it is.
        #[arg(long, value_enum, default_value_t = UrgencyArg::Medium)]
        urgency: UrgencyArg,

        /// Latitude in decimal degrees.
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,

        /// Longitude in decimal degrees.
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,

        /// Street address or landmark.
        #[arg(long)]
        address: Option<String>,

        /// Free-text label. Can be specified multiple times.
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// What the situation is.
        description: String,
    },

    /// List cases, most urgent first.
    List {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Start helping with an open case.
    Start {
        /// Case ID or unambiguous prefix.
        case: String,
    },

    /// Mark a case as helped.
    Help {
        /// Case ID or unambiguous prefix.
        case: String,

        /// Attribution shown on the case. Defaults to the volunteer identity.
        #[arg(long)]
        by: Option<String>,

        /// Notes for the activity log.
        #[arg(long)]
        notes: Option<String>,

        /// Minutes spent helping.
        #[arg(long)]
        duration: Option<u32>,

        /// Resource handed over (food, blankets, ...). Can be specified multiple times.
        #[arg(long = "provided")]
        provided: Vec<String>,
    },

    /// Close a case without helping (duplicate, gone, resolved elsewhere).
    Close {
        /// Case ID or unambiguous prefix.
        case: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ActivityCommand {
    /// Show the activity timeline, most recent first.
    List,
}

#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// Personal impact and weekly goal progress.
    Impact {
        /// Weekly goal. Defaults to `weekly-goal` from the config.
        #[arg(long)]
        goal: Option<u32>,
    },

    /// Community-wide numbers.
    Community,

    /// Helped cases per day over the last seven days.
    Weekly,
}

#[derive(Debug, Subcommand)]
pub enum VolunteerCommand {
    /// Create a profile for the acting volunteer.
    Join {
        /// Display name.
        #[arg(long)]
        name: String,

        #[command(flatten)]
        details: ProfileArgs,
    },

    /// Show a profile with stats. Defaults to the acting volunteer.
    Show {
        /// Volunteer identity.
        volunteer: Option<String>,
    },

    /// Update the acting volunteer's profile.
    Edit {
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        details: ProfileArgs,

        /// Skill to drop. Can be specified multiple times.
        #[arg(long = "remove-skill")]
        remove_skills: Vec<String>,
    },

    /// Mark a volunteer as verified.
    Verify {
        volunteer: String,

        #[arg(long, value_enum)]
        method: MethodArg,
    },

    /// Award a badge to a volunteer.
    Award {
        volunteer: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long, value_enum)]
        category: BadgeArg,
    },

    /// Rate a volunteer's help with a case (1 to 5).
    Review {
        volunteer: String,

        /// Case ID or unambiguous prefix.
        #[arg(long)]
        case: String,

        #[arg(long)]
        rating: u8,

        #[arg(long)]
        comment: Option<String>,

        /// Hide who left the review.
        #[arg(long)]
        anonymous: bool,
    },
}

/// Profile fields shared by `join` and `edit`.
#[derive(Debug, Default, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    bio: Option<String>,

    /// Skill to add. Can be specified multiple times.
    #[arg(long = "skill")]
    skills: Vec<String>,

    /// Preferred kind of case. Replaces the current list.
    #[arg(long = "category", value_enum)]
    categories: Vec<KindArg>,

    /// Available weekday, e.g. "saturday". Replaces the current list.
    #[arg(long = "day")]
    days: Vec<String>,

    /// Available from, `HH:MM`.
    #[arg(long)]
    from: Option<String>,

    /// Available until, `HH:MM`.
    #[arg(long)]
    to: Option<String>,

    /// Furthest distance willing to travel, in km.
    #[arg(long)]
    max_distance: Option<f64>,
}

/// CLI-facing case kind, mapped to the domain `CaseKind`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// A person experiencing homelessness.
    Homeless,
    /// A stray or injured animal.
    Animal,
}

impl KindArg {
    fn to_domain(self) -> CaseKind {
        match self {
            Self::Homeless => CaseKind::Homeless,
            Self::Animal => CaseKind::Animal,
        }
    }
}

/// CLI-facing urgency, mapped to the domain `Urgency`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UrgencyArg {
    Low,
    Medium,
    High,
}

impl UrgencyArg {
    fn to_domain(self) -> Urgency {
        match self {
            Self::Low => Urgency::Low,
            Self::Medium => Urgency::Medium,
            Self::High => Urgency::High,
        }
    }
}

/// CLI-facing case status, mapped to the domain `CaseStatus`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Open,
    InProgress,
    Helped,
    Closed,
}

impl StatusArg {
    fn to_domain(self) -> CaseStatus {
        match self {
            Self::Open => CaseStatus::Open,
            Self::InProgress => CaseStatus::InProgress,
            Self::Helped => CaseStatus::Helped,
            Self::Closed => CaseStatus::Closed,
        }
    }
}

/// CLI-facing directory order, mapped to `DirectorySort`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Rating,
    Cases,
    Hours,
    Recent,
}

impl SortArg {
    fn to_domain(self) -> DirectorySort {
        match self {
            Self::Rating => DirectorySort::Rating,
            Self::Cases => DirectorySort::Cases,
            Self::Hours => DirectorySort::Hours,
            Self::Recent => DirectorySort::Recent,
        }
    }
}

/// CLI-facing verification method, mapped to `VerificationMethod`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Phone,
    Email,
    GovernmentId,
}

impl MethodArg {
    fn to_domain(self) -> VerificationMethod {
        match self {
            Self::Phone => VerificationMethod::Phone,
            Self::Email => VerificationMethod::Email,
            Self::GovernmentId => VerificationMethod::GovernmentId,
        }
    }
}

/// CLI-facing badge category, mapped to `BadgeCategory`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BadgeArg {
    Milestone,
    Skill,
    Dedication,
    Impact,
}

impl BadgeArg {
    fn to_domain(self) -> BadgeCategory {
        match self {
            Self::Milestone => BadgeCategory::Milestone,
            Self::Skill => BadgeCategory::Skill,
            Self::Dedication => BadgeCategory::Dedication,
            Self::Impact => BadgeCategory::Impact,
        }
    }
}

/// Everything a command handler needs.
pub(crate) struct Context<'a, C> {
    pub config: &'a Config,
    pub storage: &'a Storage,
    pub notifier: &'a mut Notifier<C>,
    pub volunteer: Option<&'a str>,
    pub json: bool,
    pub now: Zoned,
}

/// Run the CLI, returning an error message on failure.
pub fn run<C: Channel>(
    config: &Config,
    storage: &Storage,
    notifier: &mut Notifier<C>,
) -> Result<(), String> {
    let cli = Cli::parse();

    let mut ctx = Context {
        config,
        storage,
        notifier,
        volunteer: cli.volunteer.as_deref(),
        json: cli.json,
        now: Zoned::now(),
    };

    match cli.command {
        Command::Case { command } => case::run(&mut ctx, command),
        Command::Activity {
            command: ActivityCommand::List,
        } => stats::cmd_timeline(&ctx),
        Command::Stats { command } => stats::run(&ctx, command),
        Command::Volunteer { command } => volunteer::run(&ctx, command),
        Command::Directory {
            query,
            category,
            verified,
            sort,
        } => {
            let filter = DirectoryFilter {
                query,
                category: category.map(KindArg::to_domain),
                verified_only: verified,
            };
            volunteer::cmd_directory(&ctx, &filter, sort.to_domain())
        }
    }
}

/// Print `value` as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}
