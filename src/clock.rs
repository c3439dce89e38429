//! Time-window utilities shared by the statistics engine and the CLI.
//!
//! Nothing here reads the system clock. Every function takes `now` as a
//! [`Zoned`], and calendar-day questions are answered in `now`'s time zone.

use jiff::{SignedDuration, Timestamp, Zoned};

use crate::model::QuietHours;

/// Seven rolling days.
pub const WEEK: SignedDuration = SignedDuration::from_hours(7 * 24);

/// Thirty rolling days.
pub const MONTH: SignedDuration = SignedDuration::from_hours(30 * 24);

/// The instant `span` before `now`, clamped to the earliest representable timestamp.
pub fn window_start(now: &Zoned, span: SignedDuration) -> Timestamp {
    now.timestamp()
        .checked_sub(span)
        .unwrap_or(Timestamp::MIN)
}

/// Whether `ts` falls on the same local calendar day as `now`.
pub fn same_local_day(ts: Timestamp, now: &Zoned) -> bool {
    ts.to_zoned(now.time_zone().clone()).date() == now.date()
}

/// Human bucket for how long ago `ts` was.
///
/// Less than a minute reads "just now", then minutes, hours and days up to a
/// week. Anything older is shown as the local date (`M/D/YYYY`).
pub fn format_time_ago(ts: Timestamp, now: &Zoned) -> String {
    let minutes = now.timestamp().duration_since(ts).as_secs().div_euclid(60);

    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }

    let days = hours / 24;
    if days < 7 {
        return format!("{days}d ago");
    }

    ts.to_zoned(now.time_zone().clone())
        .strftime("%-m/%-d/%Y")
        .to_string()
}

/// Whether `now` falls inside the configured quiet window.
///
/// Bounds are inclusive at minute resolution. A window with `start > end`
/// wraps past midnight. Disabled or unparseable windows are never quiet.
pub fn is_quiet_hour(quiet_hours: &QuietHours, now: &Zoned) -> bool {
    if !quiet_hours.enabled {
        return false;
    }

    let (Some(start), Some(end)) = (
        minute_of_day(&quiet_hours.start),
        minute_of_day(&quiet_hours.end),
    ) else {
        return false;
    };

    let current = i32::from(now.hour()) * 60 + i32::from(now.minute());

    if start <= end {
        current >= start && current <= end
    } else {
        current >= start || current <= end
    }
}

/// Parses `HH:MM` into minutes since midnight.
pub fn minute_of_day(clock: &str) -> Option<i32> {
    let (hour, minute) = clock.trim().split_once(':')?;
    let hour: i32 = hour.parse().ok()?;
    let minute: i32 = minute.parse().ok()?;
    if !(0..24).contains(&hour) || !(0..60).contains(&minute) {
        return None;
    }
    Some(hour * 60 + minute)
}
