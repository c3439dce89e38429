//! Per-day helped counts for the trailing week.

use jiff::civil::Date;
use jiff::{ToSpan, Zoned};
use serde::Serialize;

use crate::model::{CaseKind, CaseReport};

/// Helped cases on one local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    /// Short weekday label, e.g. "Mon".
    pub day: String,
    pub date: Date,
    pub homeless: usize,
    pub animals: usize,
    pub total: usize,
}

/// Buckets helped cases into today and the six days before it, oldest first.
///
/// Always returns seven buckets. A case lands in the bucket whose date matches
/// its `helped_at` in `now`'s time zone.
pub fn generate_weekly_data(cases: &[CaseReport], now: &Zoned) -> Vec<DayBucket> {
    let today = now.date();
    let tz = now.time_zone();

    let helped: Vec<(Date, CaseKind)> = cases
        .iter()
        .filter(|c| c.is_helped())
        .filter_map(|c| Some((c.helped_at?.to_zoned(tz.clone()).date(), c.kind)))
        .collect();

    (0..7i64)
        .map(|i| {
            let date = today.saturating_sub((6 - i).days());
            let on_day = || helped.iter().filter(move |(d, _)| *d == date);
            let homeless = on_day().filter(|(_, k)| *k == CaseKind::Homeless).count();
            let animals = on_day().filter(|(_, k)| *k == CaseKind::Animal).count();

            DayBucket {
                day: date.strftime("%a").to_string(),
                date,
                homeless,
                animals,
                total: on_day().count(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;
    use jiff::tz::TimeZone;
    use jiff::{SignedDuration, Timestamp};

    use crate::model::{CaseStatus, Location, Urgency};

    fn now() -> Zoned {
        // A Monday.
        date(2026, 10, 19)
            .at(15, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    fn helped(kind: CaseKind, at: Timestamp) -> CaseReport {
        let mut case = CaseReport::open(
            kind,
            Location::new(40.6782, -73.9442),
            "Needs a meal.",
            Urgency::Low,
            at - SignedDuration::from_hours(1),
        );
        case.status = CaseStatus::Helped;
        case.helped_at = Some(at);
        case
    }

    #[test]
    fn empty_input_yields_seven_zero_buckets() {
        let week = generate_weekly_data(&[], &now());

        assert_eq!(week.len(), 7);
        assert!(week.iter().all(|b| b.total == 0 && b.homeless == 0 && b.animals == 0));
    }

    #[test]
    fn buckets_run_oldest_to_today() {
        let week = generate_weekly_data(&[], &now());

        assert_eq!(week[0].date, date(2026, 10, 13));
        assert_eq!(week[0].day, "Tue");
        assert_eq!(week[6].date, date(2026, 10, 19));
        assert_eq!(week[6].day, "Mon");
    }

    #[test]
    fn case_helped_today_lands_in_last_bucket() {
        let cases = [helped(CaseKind::Homeless, now().timestamp())];
        let week = generate_weekly_data(&cases, &now());

        assert_eq!(week[6].total, 1);
        assert_eq!(week[6].homeless, 1);
        assert_eq!(week.iter().map(|b| b.total).sum::<usize>(), 1);
    }

    #[test]
    fn splits_by_kind_and_ignores_older_or_unhelped_cases() {
        let two_days_ago = now().timestamp() - SignedDuration::from_hours(48);
        let mut open = helped(CaseKind::Animal, two_days_ago);
        open.status = CaseStatus::Open;

        let cases = [
            helped(CaseKind::Animal, two_days_ago),
            helped(CaseKind::Homeless, two_days_ago),
            helped(CaseKind::Animal, now().timestamp() - SignedDuration::from_hours(24 * 9)),
            open,
        ];
        let week = generate_weekly_data(&cases, &now());

        assert_eq!(week[4].animals, 1);
        assert_eq!(week[4].homeless, 1);
        assert_eq!(week[4].total, 2);
        assert_eq!(week.iter().map(|b| b.total).sum::<usize>(), 2);
    }
}
