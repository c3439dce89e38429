//! Activity storage: append to and load the volunteer activity log.

use rusqlite::{Connection, Row};
use tracing::warn;

use crate::model::{ActivityAction, Location, VolunteerActivity};

use super::{Result, Storage, StorageError, parse_timestamp, parse_uuid};

/// Raw column values of one `activities` row.
type ActivityRow = (
    String,
    String,
    String,
    String,
    String,
    Option<f64>,
    Option<f64>,
    Option<String>,
    Option<u32>,
    String,
);

impl Storage {
    /// Appends an activity to the log. The referenced case is not checked.
    pub fn append_activity(&self, activity: &VolunteerActivity) -> Result<()> {
        append_activity_on(&self.conn, activity)
    }

    /// Loads the whole activity log in the order it happened.
    ///
    /// Rows that fail to parse are skipped with a warning.
    pub fn list_activities(&self) -> Result<Vec<VolunteerActivity>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, volunteer_id, case_id, action, timestamp,
                    lat, lng, notes, duration_minutes, resources
             FROM activities",
        )?;
        let mut activities = Vec::new();
        for row in stmt.query_map([], read_row)? {
            match activity_from_row(row?) {
                Ok(activity) => activities.push(activity),
                Err(e) => warn!(error = %e, "skipping unreadable activity"),
            }
        }
        activities.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(activities)
    }
}

pub(super) fn append_activity_on(conn: &Connection, activity: &VolunteerActivity) -> Result<()> {
    let resources = serde_json::to_string(&activity.resources_provided)?;
    conn.execute(
        "INSERT INTO activities (id, volunteer_id, case_id, action, timestamp,
                                 lat, lng, notes, duration_minutes, resources)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        rusqlite::params![
            activity.id.to_string(),
            activity.volunteer_id,
            activity.case_id.to_string(),
            activity.action.as_str(),
            activity.timestamp.to_string(),
            activity.location.map(|l| l.lat),
            activity.location.map(|l| l.lng),
            activity.notes,
            activity.duration_minutes,
            resources,
        ],
    )?;
    Ok(())
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<ActivityRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
    ))
}

fn activity_from_row(row: ActivityRow) -> Result<VolunteerActivity> {
    let (id, volunteer_id, case_id, action, timestamp, lat, lng, notes, duration, resources) = row;

    Ok(VolunteerActivity {
        id: parse_uuid("activity id", &id)?,
        volunteer_id,
        case_id: parse_uuid("case id", &case_id)?,
        action: parse_action(&action)?,
        timestamp: parse_timestamp("timestamp", &timestamp)?,
        location: lat.zip(lng).map(|(lat, lng)| Location::new(lat, lng)),
        notes,
        duration_minutes: duration,
        resources_provided: serde_json::from_str(&resources)?,
    })
}

fn parse_action(value: &str) -> Result<ActivityAction> {
    match value {
        "helped" => Ok(ActivityAction::Helped),
        "started-helping" => Ok(ActivityAction::StartedHelping),
        "reported" => Ok(ActivityAction::Reported),
        "updated" => Ok(ActivityAction::Updated),
        other => Err(StorageError::Corrupt(format!("unknown activity action: {other}"))),
    }
}
