use chrono::{DateTime, TimeDelta, Utc};

// Longer units first so "years" is never read as something shorter.
const UNITS: [(&str, i64); 4] = [("year", 365), ("month", 30), ("week", 7), ("day", 1)];

/// Converts relative-time text such as "2 days ago" into an absolute timestamp.
///
/// The unit is the first of `year`, `month`, `week`, `day` found anywhere in the
/// text (case-insensitive) and the count is the first whitespace-delimited token.
/// Months and years are fixed 30 and 365 day spans, not calendar arithmetic.
///
/// Returns `None` when the text has no known unit or does not start with a
/// non-negative integer. Callers must not substitute `now` for `None`.
pub fn parse_relative_date(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let lower = text.to_lowercase();

    let days_per_unit = UNITS
        .iter()
        .find(|(unit, _)| lower.contains(unit))
        .map(|(_, days)| *days)?;

    let count = lower.split_whitespace().next()?.parse::<i64>().ok()?;
    if count < 0 {
        return None;
    }

    let delta = TimeDelta::try_days(count.checked_mul(days_per_unit)?)?;
    now.checked_sub_signed(delta)
}
