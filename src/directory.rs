//! Volunteer directory: search profiles, narrow by category and verification,
//! and rank by rating, cases, hours or recency.

use serde::Serialize;

use crate::model::{CaseKind, VolunteerProfile};
use crate::stats::VolunteerStats;

/// A profile with its derived stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryEntry {
    pub profile: VolunteerProfile,
    pub stats: VolunteerStats,
}

/// Which volunteers to show. The default shows everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryFilter {
    /// Case-insensitive substring of the name, bio, or any skill.
    pub query: Option<String>,

    /// Only volunteers who prefer this kind of case.
    pub category: Option<CaseKind>,

    pub verified_only: bool,
}

impl DirectoryFilter {
    pub fn matches(&self, profile: &VolunteerProfile) -> bool {
        self.matches_query(profile)
            && self
                .category
                .is_none_or(|k| profile.preferred_categories.contains(&k))
            && (!self.verified_only || profile.is_verified())
    }

    fn matches_query(&self, profile: &VolunteerProfile) -> bool {
        let Some(query) = &self.query else {
            return true;
        };
        let query = query.to_lowercase();
        profile.name.to_lowercase().contains(&query)
            || profile
                .bio
                .as_ref()
                .is_some_and(|b| b.to_lowercase().contains(&query))
            || profile
                .skills
                .iter()
                .any(|s| s.to_lowercase().contains(&query))
    }
}

/// Directory ordering. Every order is highest or newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectorySort {
    #[default]
    Rating,
    Cases,
    Hours,
    Recent,
}

/// Matching entries in `sort` order. Ties keep their input order.
pub fn search<'a>(
    entries: &'a [DirectoryEntry],
    filter: &DirectoryFilter,
    sort: DirectorySort,
) -> Vec<&'a DirectoryEntry> {
    let mut shown: Vec<&DirectoryEntry> = entries
        .iter()
        .filter(|e| filter.matches(&e.profile))
        .collect();
    shown.sort_by(|a, b| match sort {
        DirectorySort::Rating => b.stats.rating.total_cmp(&a.stats.rating),
        DirectorySort::Cases => b.stats.total_cases_helped.cmp(&a.stats.total_cases_helped),
        DirectorySort::Hours => b
            .stats
            .total_hours_volunteered
            .total_cmp(&a.stats.total_hours_volunteered),
        DirectorySort::Recent => b.profile.joined_at.cmp(&a.profile.joined_at),
    });
    shown
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;

    use crate::model::VerificationMethod;

    fn entry(name: &str, joined: i64, rating: f64, cases: usize, hours: f64) -> DirectoryEntry {
        let profile = VolunteerProfile::new(
            name.to_lowercase(),
            name,
            Timestamp::new(joined, 0).unwrap(),
        );
        DirectoryEntry {
            profile,
            stats: VolunteerStats {
                rating,
                total_cases_helped: cases,
                total_hours_volunteered: hours,
                ..VolunteerStats::default()
            },
        }
    }

    fn names(shown: &[&DirectoryEntry]) -> Vec<String> {
        shown.iter().map(|e| e.profile.name.clone()).collect()
    }

    fn sample() -> Vec<DirectoryEntry> {
        let mut ana = entry("Ana", 3_000, 4.9, 12, 40.0);
        ana.profile.bio = Some("Vet nurse, weekends".into());
        ana.profile.preferred_categories = vec![CaseKind::Animal];
        ana.profile.verify(VerificationMethod::Email, Timestamp::new(3_500, 0).unwrap());

        let mut sam = entry("Sam", 1_000, 4.2, 30, 12.5);
        sam.profile.skills = vec!["First Aid".into(), "Spanish".into()];
        sam.profile.preferred_categories = vec![CaseKind::Homeless];

        let lee = entry("Lee", 2_000, 4.5, 7, 120.0);

        vec![ana, sam, lee]
    }

    #[test]
    fn default_shows_everyone_by_rating() {
        let entries = sample();
        let shown = search(&entries, &DirectoryFilter::default(), DirectorySort::default());
        assert_eq!(names(&shown), ["Ana", "Lee", "Sam"]);
    }

    #[test]
    fn sorts_by_cases_hours_and_recency() {
        let entries = sample();
        let all = DirectoryFilter::default();

        assert_eq!(names(&search(&entries, &all, DirectorySort::Cases)), ["Sam", "Ana", "Lee"]);
        assert_eq!(names(&search(&entries, &all, DirectorySort::Hours)), ["Lee", "Ana", "Sam"]);
        assert_eq!(names(&search(&entries, &all, DirectorySort::Recent)), ["Ana", "Lee", "Sam"]);
    }

    #[test]
    fn query_searches_name_bio_and_skills_ignoring_case() {
        let entries = sample();
        let find = |q: &str| {
            let filter = DirectoryFilter {
                query: Some(q.into()),
                ..DirectoryFilter::default()
            };
            names(&search(&entries, &filter, DirectorySort::Rating))
        };

        assert_eq!(find("LEE"), ["Lee"]);
        assert_eq!(find("nurse"), ["Ana"]);
        assert_eq!(find("spanish"), ["Sam"]);
        assert_eq!(find(""), ["Ana", "Lee", "Sam"]);
        assert!(find("plumber").is_empty());
    }

    #[test]
    fn filters_by_category_and_verification() {
        let entries = sample();

        let animals = DirectoryFilter {
            category: Some(CaseKind::Animal),
            ..DirectoryFilter::default()
        };
        // Lee keeps the default preference for both kinds.
        assert_eq!(names(&search(&entries, &animals, DirectorySort::Rating)), ["Ana", "Lee"]);

        let verified = DirectoryFilter {
            verified_only: true,
            ..DirectoryFilter::default()
        };
        assert_eq!(names(&search(&entries, &verified, DirectorySort::Rating)), ["Ana"]);
    }
}
