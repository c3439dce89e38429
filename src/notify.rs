//! Nearby-case notifications.
//!
//! A [`Notifier`] is built once at startup and handed to whatever needs to
//! alert the volunteer. It owns the permission state and decides, per case,
//! whether the volunteer's preferences allow an alert. Delivery goes through a
//! [`Channel`], so the terminal and tests can plug in their own sink.

use std::io::{self, IsTerminal};

use jiff::{SignedDuration, Zoned};
use tracing::debug;

use crate::clock;
use crate::geo;
use crate::model::{CaseKind, CaseReport, Location, NotificationPreferences, Urgency};

/// How long non-urgent notifications stay up.
const DISMISS_AFTER: SignedDuration = SignedDuration::from_secs(10);

/// Characters of the description shown in the preview.
const PREVIEW_CHARS: usize = 80;

/// Whether the channel may show notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Not asked yet.
    Default,
    Granted,
    Denied,
}

/// Where notifications end up.
pub trait Channel {
    /// Ask for permission to show notifications.
    fn request_permission(&mut self) -> Permission;

    /// Show a notification. Only called once permission is granted.
    fn deliver(&mut self, notification: &Notification);
}

/// A rendered alert about one case.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,

    /// First part of the case description.
    pub preview: String,

    /// Collapses repeat alerts for the same case.
    pub tag: String,

    /// `None` keeps the notification until dismissed.
    pub expires_after: Option<SignedDuration>,
}

impl Notification {
    fn for_case(case: &CaseReport, distance_km: Option<f64>) -> Self {
        let who = match case.kind {
            CaseKind::Homeless => "Person",
            CaseKind::Animal => "Animal",
        };
        let body = match distance_km {
            Some(km) => format!("{who} needs assistance ({km:.1}km away)"),
            None => format!("{who} needs assistance"),
        };

        let mut preview: String = case.description.chars().take(PREVIEW_CHARS).collect();
        if case.description.chars().count() > PREVIEW_CHARS {
            preview.push_str("...");
        }

        Self {
            title: "Someone needs help nearby".to_string(),
            body,
            preview,
            tag: format!("case-{}", case.id),
            expires_after: (case.urgency != Urgency::High).then_some(DISMISS_AFTER),
        }
    }
}

/// Decides on and delivers case notifications.
pub struct Notifier<C> {
    channel: C,
    permission: Permission,
}

impl<C: Channel> Notifier<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            permission: Permission::Default,
        }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Ask the channel for permission and remember the answer.
    pub fn request_permission(&mut self) -> Permission {
        self.permission = self.channel.request_permission();
        debug!(permission = ?self.permission, "notification permission");
        self.permission
    }

    /// Whether `case` passes the volunteer's preferences.
    ///
    /// High-urgency cases ignore quiet hours. Distance is only checked when the
    /// volunteer's location is known.
    pub fn should_notify(
        &self,
        case: &CaseReport,
        preferences: &NotificationPreferences,
        user_location: Option<Location>,
        now: &Zoned,
    ) -> bool {
        if !preferences.enabled {
            return false;
        }
        if !preferences.categories.contains(&case.kind) {
            return false;
        }
        if !preferences.urgency_levels.contains(&case.urgency) {
            return false;
        }
        if case.urgency != Urgency::High && clock::is_quiet_hour(&preferences.quiet_hours, now) {
            return false;
        }
        if let Some(here) = user_location
            && geo::distance_km(here, case.location) > preferences.radius_km
        {
            return false;
        }
        true
    }

    /// Build the notification for `case` and deliver it if permitted.
    pub fn notify(&mut self, case: &CaseReport, distance_km: Option<f64>) -> Notification {
        let notification = Notification::for_case(case, distance_km);
        if self.permission == Permission::Granted {
            self.channel.deliver(&notification);
        } else {
            debug!(case = %case.id, "notification not delivered without permission");
        }
        notification
    }

    /// Notify about a freshly reported case when preferences allow it.
    pub fn alert(
        &mut self,
        case: &CaseReport,
        preferences: &NotificationPreferences,
        user_location: Option<Location>,
        now: &Zoned,
    ) -> Option<Notification> {
        if !self.should_notify(case, preferences, user_location, now) {
            return None;
        }
        let distance = user_location.map(|here| geo::distance_km(here, case.location));
        Some(self.notify(case, distance))
    }
}

/// Writes notifications to stderr. Permission is granted only on a terminal.
pub struct TerminalChannel;

impl Channel for TerminalChannel {
    fn request_permission(&mut self) -> Permission {
        if io::stderr().is_terminal() {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn deliver(&mut self, notification: &Notification) {
        eprintln!("{}: {}", notification.title, notification.body);
        eprintln!("  {}", notification.preview);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    use crate::model::QuietHours;

    /// Records deliveries instead of showing them.
    #[derive(Default)]
    struct Recorder {
        grant: bool,
        delivered: Vec<Notification>,
    }

    impl Channel for Recorder {
        fn request_permission(&mut self) -> Permission {
            if self.grant {
                Permission::Granted
            } else {
                Permission::Denied
            }
        }

        fn deliver(&mut self, notification: &Notification) {
            self.delivered.push(notification.clone());
        }
    }

    fn granted() -> Notifier<Recorder> {
        let mut notifier = Notifier::new(Recorder {
            grant: true,
            ..Recorder::default()
        });
        notifier.request_permission();
        notifier
    }

    fn at(hour: i8) -> Zoned {
        date(2026, 10, 19)
            .at(hour, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    fn case(kind: CaseKind, urgency: Urgency) -> CaseReport {
        CaseReport::open(
            kind,
            Location::new(40.7589, -73.9851),
            "Injured dog with a limp.",
            urgency,
            Timestamp::new(1_700_000_000, 0).unwrap(),
        )
    }

    fn night_owl() -> NotificationPreferences {
        NotificationPreferences {
            quiet_hours: QuietHours {
                enabled: true,
                start: "22:00".into(),
                end: "07:00".into(),
            },
            ..NotificationPreferences::default()
        }
    }

    #[test]
    fn starts_without_permission() {
        let notifier = Notifier::new(Recorder::default());
        assert_eq!(notifier.permission(), Permission::Default);
    }

    #[test]
    fn respects_enabled_categories_and_urgency() {
        let notifier = granted();
        let dog = case(CaseKind::Animal, Urgency::Low);

        let prefs = NotificationPreferences::default();
        assert!(notifier.should_notify(&dog, &prefs, None, &at(12)));

        let off = NotificationPreferences {
            enabled: false,
            ..prefs.clone()
        };
        assert!(!notifier.should_notify(&dog, &off, None, &at(12)));

        let people_only = NotificationPreferences {
            categories: vec![CaseKind::Homeless],
            ..prefs.clone()
        };
        assert!(!notifier.should_notify(&dog, &people_only, None, &at(12)));

        let urgent_only = NotificationPreferences {
            urgency_levels: vec![Urgency::High],
            ..prefs
        };
        assert!(!notifier.should_notify(&dog, &urgent_only, None, &at(12)));
    }

    #[test]
    fn quiet_hours_hold_back_all_but_high_urgency() {
        let notifier = granted();
        let prefs = night_owl();

        assert!(!notifier.should_notify(&case(CaseKind::Animal, Urgency::Medium), &prefs, None, &at(23)));
        assert!(notifier.should_notify(&case(CaseKind::Animal, Urgency::High), &prefs, None, &at(23)));
        assert!(notifier.should_notify(&case(CaseKind::Animal, Urgency::Medium), &prefs, None, &at(12)));
    }

    #[test]
    fn distance_is_checked_only_with_a_location() {
        let notifier = granted();
        let dog = case(CaseKind::Animal, Urgency::Medium);
        let prefs = NotificationPreferences {
            radius_km: 2.0,
            ..NotificationPreferences::default()
        };

        let next_door = Location::new(40.7590, -73.9850);
        let brooklyn = Location::new(40.6782, -73.9442);

        assert!(notifier.should_notify(&dog, &prefs, Some(next_door), &at(12)));
        assert!(!notifier.should_notify(&dog, &prefs, Some(brooklyn), &at(12)));
        assert!(notifier.should_notify(&dog, &prefs, None, &at(12)));
    }

    #[test]
    fn notification_content() {
        let mut notifier = granted();
        let mut person = case(CaseKind::Homeless, Urgency::High);
        person.description = "x".repeat(100);

        let n = notifier.notify(&person, Some(1.26));
        assert_eq!(n.title, "Someone needs help nearby");
        assert_eq!(n.body, "Person needs assistance (1.3km away)");
        assert_eq!(n.preview.len(), 83);
        assert!(n.preview.ends_with("..."));
        assert_eq!(n.tag, format!("case-{}", person.id));
        assert_eq!(n.expires_after, None);

        let dog = case(CaseKind::Animal, Urgency::Low);
        let n = notifier.notify(&dog, None);
        assert_eq!(n.body, "Animal needs assistance");
        assert_eq!(n.preview, dog.description);
        assert_eq!(n.expires_after, Some(SignedDuration::from_secs(10)));
    }

    #[test]
    fn delivery_requires_permission() {
        let mut denied = Notifier::new(Recorder::default());
        denied.request_permission();
        denied.notify(&case(CaseKind::Animal, Urgency::High), None);
        assert_eq!(denied.permission(), Permission::Denied);
        assert!(denied.channel.delivered.is_empty());

        let mut notifier = granted();
        notifier.notify(&case(CaseKind::Animal, Urgency::High), None);
        assert_eq!(notifier.channel.delivered.len(), 1);
    }

    #[test]
    fn alert_filters_then_delivers_with_distance() {
        let mut notifier = granted();
        let prefs = night_owl();
        let here = Location::new(40.7580, -73.9855);

        let quiet = notifier.alert(&case(CaseKind::Animal, Urgency::Low), &prefs, Some(here), &at(2));
        assert!(quiet.is_none());

        let sent = notifier
            .alert(&case(CaseKind::Animal, Urgency::High), &prefs, Some(here), &at(2))
            .unwrap();
        assert!(sent.body.contains("km away"));
        assert_eq!(notifier.channel.delivered.len(), 1);
    }
}
