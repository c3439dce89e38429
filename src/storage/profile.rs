//! Volunteer storage: profiles and the reviews left on them.
//!
//! A profile is stored whole as JSON next to its id; reviews get a column each.

use rusqlite::{OptionalExtension, Row};
use tracing::warn;

use crate::model::{VolunteerProfile, VolunteerReview};

use super::{Result, Storage, StorageError, parse_timestamp, parse_uuid};

/// Raw column values of one `reviews` row.
type ReviewRow = (
    String,
    String,
    String,
    String,
    u8,
    Option<String>,
    String,
    bool,
);

impl Storage {
    /// Inserts a new profile.
    pub fn insert_profile(&self, profile: &VolunteerProfile) -> Result<()> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO volunteers (id, profile) VALUES (?1, ?2)",
            rusqlite::params![profile.id, serde_json::to_string(profile)?],
        )?;
        if inserted == 0 {
            return Err(StorageError::VolunteerAlreadyExists(profile.id.clone()));
        }
        Ok(())
    }

    /// Replaces an existing profile.
    pub fn save_profile(&self, profile: &VolunteerProfile) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE volunteers SET profile = ?1 WHERE id = ?2",
            rusqlite::params![serde_json::to_string(profile)?, profile.id],
        )?;
        if rows == 0 {
            return Err(StorageError::VolunteerNotFound(profile.id.clone()));
        }
        Ok(())
    }

    pub fn load_profile(&self, id: &str) -> Result<VolunteerProfile> {
        let json: String = self
            .conn
            .query_row("SELECT profile FROM volunteers WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?
            .ok_or_else(|| StorageError::VolunteerNotFound(id.to_string()))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Lists all profiles, earliest joined first.
    ///
    /// Profiles that fail to parse are skipped with a warning.
    pub fn list_profiles(&self) -> Result<Vec<VolunteerProfile>> {
        let mut stmt = self.conn.prepare("SELECT id, profile FROM volunteers")?;
        let mut profiles = Vec::new();
        for row in stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))? {
            let (id, json) = row?;
            match serde_json::from_str::<VolunteerProfile>(&json) {
                Ok(profile) => profiles.push(profile),
                Err(e) => warn!(volunteer = %id, error = %e, "skipping unreadable profile"),
            }
        }
        profiles.sort_by(|a, b| a.joined_at.cmp(&b.joined_at));
        Ok(profiles)
    }

    /// Appends a review. The volunteer and case are not checked.
    pub fn add_review(&self, review: &VolunteerReview) -> Result<()> {
        self.conn.execute(
            "INSERT INTO reviews (id, reviewer_id, volunteer_id, case_id, rating,
                                  comment, timestamp, anonymous)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                review.id.to_string(),
                review.reviewer_id,
                review.volunteer_id,
                review.case_id.to_string(),
                review.rating,
                review.comment,
                review.timestamp.to_string(),
                review.anonymous,
            ],
        )?;
        Ok(())
    }

    /// Loads every review, oldest first.
    ///
    /// Rows that fail to parse are skipped with a warning.
    pub fn list_reviews(&self) -> Result<Vec<VolunteerReview>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, reviewer_id, volunteer_id, case_id, rating, comment, timestamp, anonymous
             FROM reviews",
        )?;
        let mut reviews = Vec::new();
        for row in stmt.query_map([], read_review_row)? {
            match review_from_row(row?) {
                Ok(review) => reviews.push(review),
                Err(e) => warn!(error = %e, "skipping unreadable review"),
            }
        }
        reviews.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(reviews)
    }
}

fn read_review_row(row: &Row<'_>) -> rusqlite::Result<ReviewRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn review_from_row(row: ReviewRow) -> Result<VolunteerReview> {
    let (id, reviewer_id, volunteer_id, case_id, rating, comment, timestamp, anonymous) = row;
    Ok(VolunteerReview {
        id: parse_uuid("review id", &id)?,
        reviewer_id,
        volunteer_id,
        case_id: parse_uuid("case id", &case_id)?,
        rating,
        comment,
        timestamp: parse_timestamp("timestamp", &timestamp)?,
        anonymous,
    })
}
