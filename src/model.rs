//! Core data model for Solidarity.
//!
//! Cases are reported needs for assistance; activities are the append-only
//! log of what volunteers did about them. Both are plain snapshots from the
//! point of view of the statistics engine. Volunteer profiles and reviews
//! describe the people behind the activity log.

mod activity;
mod case;
mod location;
mod preferences;
mod profile;

pub use activity::{ActivityAction, VolunteerActivity};
pub use case::{CaseKind, CaseReport, CaseStatus, MAX_DESCRIPTION_CHARS, TransitionError, Urgency};
pub use location::Location;
pub use preferences::{NotificationPreferences, QuietHours};
pub use profile::{
    AvailableHours, Badge, BadgeCategory, RATING_RANGE, RatingError, Verification,
    VerificationMethod, VolunteerProfile, VolunteerReview, WEEKDAYS,
};
