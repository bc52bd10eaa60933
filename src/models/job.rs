use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scraper::dates::parse_relative_date;

/// Placeholder for fields the provider did not send.
pub const NOT_AVAILABLE: &str = "N/A";

/// Keys of postings already shown on earlier polls.
pub type SeenSet = BTreeSet<DedupKey>;

/// A normalized job listing.
///
/// `posted_at` is `None` exactly when `posted_raw` is absent or could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    title: String,
    company: String,
    portal: String,
    location: String,
    posted_raw: Option<String>,
    posted_at: Option<DateTime<Utc>>,
}

/// Identity of a posting across polls: exact, case-sensitive `(title, company, location)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DedupKey {
    pub title: String,
    pub company: String,
    pub location: String,
}

impl JobPosting {
    pub fn new(
        title: Option<&str>,
        company: Option<&str>,
        portal: Option<&str>,
        location: Option<&str>,
        posted_raw: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        let posted_raw = present(posted_raw).map(str::to_string);
        let posted_at = posted_raw
            .as_deref()
            .and_then(|raw| parse_relative_date(raw, now));

        Self {
            title: or_sentinel(title),
            company: or_sentinel(company),
            portal: or_sentinel(portal),
            location: or_sentinel(location),
            posted_raw,
            posted_at,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn portal(&self) -> &str {
        &self.portal
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn posted_raw(&self) -> Option<&str> {
        self.posted_raw.as_deref()
    }

    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.posted_at
    }

    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            title: self.title.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn or_sentinel(value: Option<&str>) -> String {
    present(value).unwrap_or(NOT_AVAILABLE).to_string()
}

/// Orders postings newest first, undated last; ties keep their input order.
pub fn rank(postings: &mut [JobPosting]) {
    // `None` sorts below every `Some`, so reversing puts it last. The sort is stable.
    postings.sort_by_key(|p| std::cmp::Reverse(p.posted_at));
}

/// Postings from `current` whose dedup key is not in `previous`, in `current` order.
pub fn diff_new(current: &[JobPosting], previous: &SeenSet) -> Vec<JobPosting> {
    current
        .iter()
        .filter(|p| !previous.contains(&p.dedup_key()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()
    }

    fn posting(title: &str, posted: Option<&str>) -> JobPosting {
        JobPosting::new(
            Some(title),
            Some("Acme"),
            Some("LinkedIn"),
            Some("Berlin"),
            posted,
            now(),
        )
    }

    #[test]
    fn missing_fields_become_sentinel() {
        let job = JobPosting::new(None, None, None, None, None, now());
        assert_eq!(job.title(), NOT_AVAILABLE);
        assert_eq!(job.company(), NOT_AVAILABLE);
        assert_eq!(job.portal(), NOT_AVAILABLE);
        assert_eq!(job.location(), NOT_AVAILABLE);
        assert_eq!(job.posted_raw(), None);
        assert_eq!(job.posted_at(), None);
    }

    #[test]
    fn blank_fields_become_sentinel() {
        let job = JobPosting::new(Some(""), Some("   "), None, Some("\t"), Some(" "), now());
        assert_eq!(job.title(), NOT_AVAILABLE);
        assert_eq!(job.company(), NOT_AVAILABLE);
        assert_eq!(job.location(), NOT_AVAILABLE);
        assert_eq!(job.posted_raw(), None);
    }

    #[test]
    fn unparsable_date_keeps_raw_text() {
        let job = posting("Engineer", Some("just posted"));
        assert_eq!(job.posted_raw(), Some("just posted"));
        assert_eq!(job.posted_at(), None);
    }

    #[test]
    fn parsed_date_is_relative_to_now() {
        let job = posting("Engineer", Some("2 days ago"));
        assert_eq!(job.posted_at(), Some(now() - TimeDelta::days(2)));
    }

    #[test]
    fn rank_orders_newest_first_and_undated_last() {
        // now is 2024-01-05: "4 days ago" is 01-01 and "2 days ago" is 01-03
        let mut jobs = vec![
            posting("first", Some("4 days ago")),
            posting("undated", None),
            posting("third", Some("2 days ago")),
        ];
        rank(&mut jobs);

        let titles: Vec<_> = jobs.iter().map(JobPosting::title).collect();
        assert_eq!(titles, ["third", "first", "undated"]);
        assert_eq!(
            jobs[0].posted_at(),
            Some(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn rank_is_stable_on_ties() {
        let mut jobs = vec![
            posting("a", Some("1 day ago")),
            posting("b", None),
            posting("c", Some("1 day ago")),
            posting("d", Some("garbage")),
        ];
        rank(&mut jobs);

        let titles: Vec<_> = jobs.iter().map(JobPosting::title).collect();
        assert_eq!(titles, ["a", "c", "b", "d"]);
    }

    #[test]
    fn diff_new_returns_unseen_in_order() {
        let a = posting("A", None);
        let b = posting("B", None);
        let previous: SeenSet = [a.dedup_key()].into_iter().collect();

        assert_eq!(diff_new(&[a.clone(), b.clone()], &previous), vec![b]);
        assert!(diff_new(&[a], &previous).is_empty());
    }

    #[test]
    fn dedup_ignores_portal_and_date() {
        let a = posting("A", Some("1 day ago"));
        let same = JobPosting::new(
            Some("A"),
            Some("Acme"),
            Some("Indeed"),
            Some("Berlin"),
            Some("3 weeks ago"),
            now(),
        );
        let previous: SeenSet = [a.dedup_key()].into_iter().collect();
        assert!(diff_new(&[same], &previous).is_empty());
    }

    #[test]
    fn dedup_is_case_sensitive() {
        let a = posting("Engineer", None);
        let lower = posting("engineer", None);
        let previous: SeenSet = [a.dedup_key()].into_iter().collect();
        assert_eq!(diff_new(&[lower.clone()], &previous), vec![lower]);
    }
}
