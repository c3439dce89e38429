//! Statistics and impact engine.
//!
//! Pure transforms from case and activity snapshots to the numbers shown on
//! dashboards. Inputs are borrowed and never modified; `now` is always passed
//! in so results are deterministic.

mod community;
mod impact;
mod timeline;
mod volunteer;
mod weekly;

pub use community::{CommunityBaseline, CommunityStats, LeaderboardEntry, calculate_community_stats};
pub use impact::{GoalProgress, ImpactStats, calculate_impact_stats};
pub use timeline::{TimelineEntry, TimelineSummary, build_timeline};
pub use volunteer::{VolunteerStats, calculate_volunteer_stats};
pub use weekly::{DayBucket, generate_weekly_data};
