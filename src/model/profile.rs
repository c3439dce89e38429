//! Volunteer profiles: who a volunteer is, when they can help, and what
//! the community thinks of them.
//!
//! Profiles are keyed by the same free-form identity used in the activity
//! log, so a volunteer's stats are derived from what they logged rather than
//! stored on the profile.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CaseKind;

/// Day names accepted in `AvailableHours::days`.
pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Lowest and highest review rating.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A volunteer's public profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerProfile {
    /// Same identity as `VolunteerActivity::volunteer_id`.
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub joined_at: Timestamp,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// Medical training, translation, and the like. No duplicates.
    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub available_hours: AvailableHours,

    /// Kinds of case the volunteer prefers to take on.
    #[serde(default)]
    pub preferred_categories: Vec<CaseKind>,

    /// How far the volunteer is willing to travel.
    pub max_distance_km: f64,

    /// `None` until verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,

    #[serde(default)]
    pub badges: Vec<Badge>,
}

impl VolunteerProfile {
    /// A fresh, unverified profile preferring both kinds of case.
    pub fn new(id: impl Into<String>, name: impl Into<String>, joined_at: Timestamp) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            joined_at,
            bio: None,
            skills: Vec::new(),
            available_hours: AvailableHours::default(),
            preferred_categories: vec![CaseKind::Homeless, CaseKind::Animal],
            max_distance_km: 5.0,
            verification: None,
            badges: Vec::new(),
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verification.is_some()
    }

    /// Adds a trimmed skill. Blank or already-listed skills are ignored.
    ///
    /// Returns whether the skill was added.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// Returns whether the skill was listed.
    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill.trim());
        self.skills.len() != before
    }

    /// Marks the profile verified. Re-verifying replaces the earlier record.
    pub fn verify(&mut self, method: VerificationMethod, at: Timestamp) {
        self.verification = Some(Verification {
            method,
            verified_at: at,
        });
    }

    /// The most recently earned badge.
    pub fn latest_badge(&self) -> Option<&Badge> {
        self.badges.iter().max_by_key(|b| b.earned_at)
    }
}

/// When a volunteer is usually available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableHours {
    /// Lowercase weekday names, e.g. "monday".
    #[serde(default)]
    pub days: Vec<String>,

    /// `HH:MM`.
    pub start_time: String,

    /// `HH:MM`.
    pub end_time: String,
}

impl Default for AvailableHours {
    fn default() -> Self {
        Self {
            days: Vec::new(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
        }
    }
}

/// How and when a volunteer's identity was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub method: VerificationMethod,
    pub verified_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationMethod {
    Phone,
    Email,
    GovernmentId,
}

impl VerificationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
            Self::GovernmentId => "government-id",
        }
    }
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A recognition awarded to a volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: BadgeCategory,
    pub earned_at: Timestamp,
}

impl Badge {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: BadgeCategory,
        earned_at: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            category,
            earned_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeCategory {
    Milestone,
    Skill,
    Dedication,
    Impact,
}

impl BadgeCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Milestone => "milestone",
            Self::Skill => "skill",
            Self::Dedication => "dedication",
            Self::Impact => "impact",
        }
    }
}

impl fmt::Display for BadgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Community feedback on a volunteer's help with one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerReview {
    pub id: Uuid,
    pub reviewer_id: String,
    pub volunteer_id: String,
    pub case_id: Uuid,

    /// 1 to 5 stars.
    pub rating: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub timestamp: Timestamp,

    /// Hide the reviewer when shown.
    #[serde(default)]
    pub anonymous: bool,
}

impl VolunteerReview {
    /// A review with no comment. Fails when `rating` is outside 1 to 5.
    pub fn new(
        reviewer_id: impl Into<String>,
        volunteer_id: impl Into<String>,
        case_id: Uuid,
        rating: u8,
        timestamp: Timestamp,
    ) -> Result<Self, RatingError> {
        if !RATING_RANGE.contains(&rating) {
            return Err(RatingError(rating));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            reviewer_id: reviewer_id.into(),
            volunteer_id: volunteer_id.into(),
            case_id,
            rating,
            comment: None,
            timestamp,
            anonymous: false,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingError(pub u8);

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> Timestamp {
        Timestamp::new(secs, 0).unwrap()
    }

    #[test]
    fn new_profile_is_unverified_and_open_to_both_kinds() {
        let profile = VolunteerProfile::new("sam", "Sam Rivera", at(1_700_000_000));

        assert!(!profile.is_verified());
        assert_eq!(
            profile.preferred_categories,
            [CaseKind::Homeless, CaseKind::Animal]
        );
        assert!(profile.latest_badge().is_none());
    }

    #[test]
    fn skills_are_trimmed_and_unique() {
        let mut profile = VolunteerProfile::new("sam", "Sam", at(0));

        assert!(profile.add_skill("  First Aid "));
        assert!(!profile.add_skill("First Aid"));
        assert!(!profile.add_skill("   "));
        assert!(profile.add_skill("Spanish"));
        assert_eq!(profile.skills, ["First Aid", "Spanish"]);

        assert!(profile.remove_skill("First Aid"));
        assert!(!profile.remove_skill("First Aid"));
        assert_eq!(profile.skills, ["Spanish"]);
    }

    #[test]
    fn verify_records_method_and_time() {
        let mut profile = VolunteerProfile::new("sam", "Sam", at(0));
        profile.verify(VerificationMethod::GovernmentId, at(100));

        assert!(profile.is_verified());
        assert_eq!(
            profile.verification,
            Some(Verification {
                method: VerificationMethod::GovernmentId,
                verified_at: at(100),
            })
        );
    }

    #[test]
    fn latest_badge_is_most_recent() {
        let mut profile = VolunteerProfile::new("sam", "Sam", at(0));
        profile.badges = vec![
            Badge::new("First Help", "Helped a first case", BadgeCategory::Milestone, at(10)),
            Badge::new("Night Owl", "Helped after midnight", BadgeCategory::Dedication, at(30)),
            Badge::new("Medic", "First aid certified", BadgeCategory::Skill, at(20)),
        ];

        assert_eq!(profile.latest_badge().unwrap().name, "Night Owl");
    }

    #[test]
    fn review_rating_must_be_one_to_five() {
        let case = Uuid::new_v4();

        assert!(VolunteerReview::new("ana", "sam", case, 5, at(0)).is_ok());
        assert_eq!(
            VolunteerReview::new("ana", "sam", case, 0, at(0)).unwrap_err(),
            RatingError(0)
        );
        assert_eq!(
            VolunteerReview::new("ana", "sam", case, 6, at(0)).unwrap_err(),
            RatingError(6)
        );
    }

    #[test]
    fn profile_serializes_camel_case() {
        let mut profile = VolunteerProfile::new("sam", "Sam", at(0));
        profile.verify(VerificationMethod::Phone, at(5));

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["maxDistanceKm"], 5.0);
        assert_eq!(json["verification"]["method"], "phone");
        assert_eq!(json["availableHours"]["startTime"], "09:00");
        assert_eq!(json["preferredCategories"][1], "animal");
    }
}
