//! Notification preferences, as stored in the `[notifications]` config table.

use serde::{Deserialize, Serialize};

use super::{CaseKind, Urgency};

/// Which new cases a volunteer wants to hear about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NotificationPreferences {
    pub enabled: bool,

    /// Maximum distance from the volunteer, in kilometers.
    pub radius_km: f64,

    pub categories: Vec<CaseKind>,

    pub urgency_levels: Vec<Urgency>,

    pub quiet_hours: QuietHours,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            radius_km: 5.0,
            categories: vec![CaseKind::Homeless, CaseKind::Animal],
            urgency_levels: vec![Urgency::Low, Urgency::Medium, Urgency::High],
            quiet_hours: QuietHours::default(),
        }
    }
}

/// A daily window during which non-urgent notifications are suppressed.
///
/// `start` and `end` are local wall-clock times in `HH:MM` form. A window whose
/// start is after its end wraps past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct QuietHours {
    pub enabled: bool,
    pub start: String,
    pub end: String,
}

impl Default for QuietHours {
    fn default() -> Self {
        Self {
            enabled: false,
            start: "22:00".to_string(),
            end: "07:00".to_string(),
        }
    }
}
