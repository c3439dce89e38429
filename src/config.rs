//! Solidarity configuration.
//!
//! Loaded from `~/.solidarity/config.toml`. Every key is optional; a missing
//! file means defaults. A minimal file looks like:
//!
//! ```toml
//! volunteer = "sam"
//! weekly-goal = 5
//! home = { lat = 40.7128, lng = -74.0060 }
//!
//! [notifications]
//! radius-km = 5.0
//! categories = ["homeless", "animal"]
//! quiet-hours = { enabled = true, start = "22:00", end = "07:00" }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::{Location, NotificationPreferences};

/// Weekly goal used when the config doesn't set one.
pub const DEFAULT_WEEKLY_GOAL: u32 = 5;

/// Solidarity configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Default volunteer identity for logged activities.
    pub volunteer: Option<String>,

    /// Helped cases to aim for per rolling week.
    pub weekly_goal: u32,

    /// Where the volunteer usually is. Used for distances and notification radius.
    pub home: Option<Location>,

    pub notifications: NotificationPreferences,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            volunteer: None,
            weekly_goal: DEFAULT_WEEKLY_GOAL,
            home: None,
            notifications: NotificationPreferences::default(),
        }
    }
}

impl Config {
    /// Load config from `~/.solidarity/config.toml`, or defaults if there is none.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`, or defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.solidarity/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".solidarity").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::model::{CaseKind, Urgency};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.weekly_goal, 5);
        assert!(config.notifications.enabled);
    }

    #[test]
    fn parses_full_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
volunteer = "sam"
weekly-goal = 8
home = { lat = 40.7128, lng = -74.006 }

[notifications]
radius-km = 2.5
categories = ["animal"]
urgency-levels = ["high"]
quiet-hours = { enabled = true, start = "23:00", end = "06:30" }
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.volunteer.as_deref(), Some("sam"));
        assert_eq!(config.weekly_goal, 8);
        assert_eq!(config.home, Some(Location::new(40.7128, -74.006)));
        assert!((config.notifications.radius_km - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.notifications.categories, [CaseKind::Animal]);
        assert_eq!(config.notifications.urgency_levels, [Urgency::High]);
        assert!(config.notifications.quiet_hours.enabled);
        assert_eq!(config.notifications.quiet_hours.end, "06:30");
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[notifications]\nenabled = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.notifications.enabled);
        assert_eq!(config.notifications.categories.len(), 2);
        assert_eq!(config.weekly_goal, DEFAULT_WEEKLY_GOAL);
    }

    #[test]
    fn invalid_config_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "weekly-goal = \"lots\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.starts_with("invalid config at"));
    }
}
