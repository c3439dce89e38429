//! Case storage: insert, update, load, and list case reports.

use rusqlite::{Connection, OptionalExtension, Row};
use tracing::warn;
use uuid::Uuid;

use crate::model::{CaseKind, CaseReport, CaseStatus, Location, Urgency};

use super::{Result, Storage, StorageError, parse_timestamp, parse_uuid};

const COLUMNS: &str = "id, kind, lat, lng, address, description, urgency, status, \
                       reported_at, helped_at, helped_by, tags";

/// Raw column values of one `cases` row.
type CaseRow = (
    String,
    String,
    f64,
    f64,
    Option<String>,
    String,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
);

impl Storage {
    /// Inserts a new case.
    pub fn insert_case(&self, case: &CaseReport) -> Result<()> {
        insert_case_on(&self.conn, case)
    }

    /// Writes the mutable parts of a case: status and helped attribution.
    pub fn update_case(&self, case: &CaseReport) -> Result<()> {
        update_case_on(&self.conn, case)
    }

    /// Loads a single case.
    pub fn load_case(&self, id: Uuid) -> Result<CaseReport> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM cases WHERE id = ?1"),
                [id.to_string()],
                read_row,
            )
            .optional()?
            .ok_or(StorageError::CaseNotFound(id))?;
        case_from_row(row)
    }

    /// Lists all cases, oldest report first.
    ///
    /// Rows that fail to parse are skipped with a warning.
    pub fn list_cases(&self) -> Result<Vec<CaseReport>> {
        let mut stmt = self.conn.prepare(&format!("SELECT {COLUMNS} FROM cases"))?;
        let mut cases = Vec::new();
        for row in stmt.query_map([], read_row)? {
            match case_from_row(row?) {
                Ok(case) => cases.push(case),
                Err(e) => warn!(error = %e, "skipping unreadable case"),
            }
        }
        cases.sort_by(|a, b| a.reported_at.cmp(&b.reported_at));
        Ok(cases)
    }
}

pub(super) fn insert_case_on(conn: &Connection, case: &CaseReport) -> Result<()> {
    let tags = serde_json::to_string(&case.tags)?;
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO cases (id, kind, lat, lng, address, description, urgency,
                                      status, reported_at, helped_at, helped_by, tags)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        rusqlite::params![
            case.id.to_string(),
            case.kind.as_str(),
            case.location.lat,
            case.location.lng,
            case.address,
            case.description,
            case.urgency.as_str(),
            case.status.as_str(),
            case.reported_at.to_string(),
            case.helped_at.map(|t| t.to_string()),
            case.helped_by,
            tags,
        ],
    )?;
    if inserted == 0 {
        return Err(StorageError::CaseAlreadyExists(case.id));
    }
    Ok(())
}

pub(super) fn update_case_on(conn: &Connection, case: &CaseReport) -> Result<()> {
    let rows = conn.execute(
        "UPDATE cases SET status = ?1, helped_at = ?2, helped_by = ?3 WHERE id = ?4",
        rusqlite::params![
            case.status.as_str(),
            case.helped_at.map(|t| t.to_string()),
            case.helped_by,
            case.id.to_string(),
        ],
    )?;
    if rows == 0 {
        return Err(StorageError::CaseNotFound(case.id));
    }
    Ok(())
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<CaseRow> {
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
        row.get(10)?,
        row.get(11)?,
    ))
}

fn case_from_row(row: CaseRow) -> Result<CaseReport> {
    let (
        id,
        kind,
        lat,
        lng,
        address,
        description,
        urgency,
        status,
        reported_at,
        helped_at,
        helped_by,
        tags,
    ) = row;

    Ok(CaseReport {
        id: parse_uuid("case id", &id)?,
        kind: parse_kind(&kind)?,
        location: Location::new(lat, lng),
        address,
        description,
        urgency: parse_urgency(&urgency)?,
        status: parse_status(&status)?,
        reported_at: parse_timestamp("reported_at", &reported_at)?,
        helped_at: helped_at
            .as_deref()
            .map(|t| parse_timestamp("helped_at", t))
            .transpose()?,
        helped_by,
        tags: serde_json::from_str(&tags)?,
    })
}

fn parse_kind(value: &str) -> Result<CaseKind> {
    match value {
        "homeless" => Ok(CaseKind::Homeless),
        "animal" => Ok(CaseKind::Animal),
        other => Err(StorageError::Corrupt(format!("unknown case kind: {other}"))),
    }
}

fn parse_urgency(value: &str) -> Result<Urgency> {
    match value {
        "low" => Ok(Urgency::Low),
        "medium" => Ok(Urgency::Medium),
        "high" => Ok(Urgency::High),
        other => Err(StorageError::Corrupt(format!("unknown urgency: {other}"))),
    }
}

fn parse_status(value: &str) -> Result<CaseStatus> {
    match value {
        "open" => Ok(CaseStatus::Open),
        "in-progress" => Ok(CaseStatus::InProgress),
        "helped" => Ok(CaseStatus::Helped),
        "closed" => Ok(CaseStatus::Closed),
        other => Err(StorageError::Corrupt(format!("unknown case status: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path().join("solidarity.sqlite")).unwrap();
        (dir, storage)
    }

    fn sample_case() -> CaseReport {
        let mut case = CaseReport::open(
            CaseKind::Homeless,
            Location::new(40.7128, -74.0060),
            "Person needs warm blanket and food.",
            Urgency::High,
            Timestamp::now(),
        );
        case.address = Some("Subway entrance".into());
        case.tags = vec!["food".into(), "blanket".into()];
        case
    }

    #[test]
    fn insert_and_load_case() {
        let (_dir, storage) = test_storage();
        let case = sample_case();

        storage.insert_case(&case).unwrap();
        let loaded = storage.load_case(case.id).unwrap();

        assert_eq!(loaded, case);
    }

    #[test]
    fn insert_duplicate_case_fails() {
        let (_dir, storage) = test_storage();
        let case = sample_case();

        storage.insert_case(&case).unwrap();
        let err = storage.insert_case(&case).unwrap_err();

        assert!(matches!(err, StorageError::CaseAlreadyExists(_)));
    }

    #[test]
    fn load_nonexistent_case_fails() {
        let (_dir, storage) = test_storage();
        let err = storage.load_case(Uuid::new_v4()).unwrap_err();

        assert!(matches!(err, StorageError::CaseNotFound(_)));
    }

    #[test]
    fn update_case_status() {
        let (_dir, storage) = test_storage();
        let mut case = sample_case();
        storage.insert_case(&case).unwrap();

        case.advance(CaseStatus::Helped, Timestamp::now(), Some("Local Volunteer"))
            .unwrap();
        storage.update_case(&case).unwrap();

        let loaded = storage.load_case(case.id).unwrap();
        assert_eq!(loaded.status, CaseStatus::Helped);
        assert_eq!(loaded.helped_at, case.helped_at);
        assert_eq!(loaded.helped_by.as_deref(), Some("Local Volunteer"));
    }

    #[test]
    fn update_nonexistent_case_fails() {
        let (_dir, storage) = test_storage();
        let err = storage.update_case(&sample_case()).unwrap_err();

        assert!(matches!(err, StorageError::CaseNotFound(_)));
    }

    #[test]
    fn list_cases_sorted_by_reported_at() {
        let (_dir, storage) = test_storage();

        let mut first = sample_case();
        first.description = "First".into();
        first.reported_at = Timestamp::new(1_000_000_000, 0).unwrap();

        let mut second = sample_case();
        second.description = "Second".into();
        second.reported_at = Timestamp::new(2_000_000_000, 0).unwrap();

        // Insert in reverse order to verify sorting.
        storage.insert_case(&second).unwrap();
        storage.insert_case(&first).unwrap();

        let cases = storage.list_cases().unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].description, "First");
        assert_eq!(cases[1].description, "Second");
    }

    #[test]
    fn list_cases_skips_corrupt_rows() {
        let (_dir, storage) = test_storage();
        storage.insert_case(&sample_case()).unwrap();
        storage
            .conn
            .execute(
                "INSERT INTO cases (id, kind, lat, lng, description, urgency, status, reported_at)
                 VALUES ('x', 'alien', 0, 0, 'bad', 'low', 'open', 'yesterday')",
                [],
            )
            .unwrap();

        let cases = storage.list_cases().unwrap();
        assert_eq!(cases.len(), 1);
    }
}
