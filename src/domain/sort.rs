//! Canonical ordering of gallery entries.
//!
//! Entries are ordered newest first by their parsed `date`, with the `id` as a
//! tie-break so the order is total and repeatable. Dates are free-form
//! strings; anything that does not parse is treated as the Unix epoch, which
//! puts undated entries after every entry dated after 1970.

use super::entry::Entry;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Date-time layouts accepted without an offset. Interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts. Interpreted as UTC midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Parses an entry date into milliseconds since the Unix epoch.
///
/// Returns `0` for empty or unparsable input.
///
/// ```
/// use gallery_admin::domain::sort::date_key;
///
/// assert_eq!(date_key("1970-01-02"), 86_400_000);
/// assert_eq!(date_key("not a date"), 0);
/// assert_eq!(date_key(""), 0);
/// ```
#[must_use]
pub fn date_key(date: &str) -> i64 {
    let date = date.trim();
    if date.is_empty() {
        return 0;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return parsed.timestamp_millis();
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(date, format) {
            return parsed.and_utc().timestamp_millis();
        }
    }

    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(date, format) {
            return parsed
                .and_hms_opt(0, 0, 0)
                .map_or(0, |midnight| midnight.and_utc().timestamp_millis());
        }
    }

    DateTime::parse_from_rfc2822(date).map_or(0, |parsed| parsed.timestamp_millis())
}

/// Compares two entries in canonical order: date descending, then id ascending.
#[must_use]
pub fn canonical_cmp(a: &Entry, b: &Entry) -> Ordering {
    date_key(&b.date)
        .cmp(&date_key(&a.date))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sorts entries in place into canonical order.
///
/// The sort is stable, so entries with equal date and id keep their relative
/// input order.
///
/// ```
/// use gallery_admin::domain::{sort::sort_entries, Entry};
///
/// let mut entries = vec![
///     Entry::new("b").with_date("2024-01-01"),
///     Entry::new("a").with_date("2024-01-01"),
///     Entry::new("c").with_date("2024-06-01"),
/// ];
/// sort_entries(&mut entries);
///
/// let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
/// assert_eq!(ids, ["c", "a", "b"]);
/// ```
pub fn sort_entries(entries: &mut [Entry]) {
    let _span = tracing::trace_span!("sort_entries", count = entries.len()).entered();
    entries.sort_by(canonical_cmp);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn newer_dates_come_first_and_ids_break_ties() {
        let mut entries = vec![
            Entry::new("b").with_date("2024-01-01"),
            Entry::new("a").with_date("2024-01-01"),
            Entry::new("c").with_date("2024-06-01"),
        ];

        sort_entries(&mut entries);

        assert_eq!(ids(&entries), ["c", "a", "b"]);
    }

    #[test]
    fn undated_entries_sort_last_by_id() {
        let mut entries = vec![
            Entry::new("z"),
            Entry::new("dated").with_date("2020-03-04"),
            Entry::new("m").with_date("garbage"),
            Entry::new("a"),
        ];

        sort_entries(&mut entries);

        assert_eq!(ids(&entries), ["dated", "a", "m", "z"]);
    }

    #[test]
    fn id_tiebreak_is_case_sensitive() {
        let mut entries = vec![Entry::new("b"), Entry::new("B"), Entry::new("a")];

        sort_entries(&mut entries);

        assert_eq!(ids(&entries), ["B", "a", "b"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let mut entries = vec![
            Entry::new("x").with_date("2023-01-01T12:00:00Z"),
            Entry::new("y").with_date("2023-01-01"),
            Entry::new("w").with_date("2023-01-01T12:00:00+09:00"),
            Entry::new("v"),
        ];

        sort_entries(&mut entries);
        let once = entries.clone();
        sort_entries(&mut entries);

        assert_eq!(entries, once);
        assert_eq!(ids(&entries), ["x", "w", "y", "v"]);
    }

    #[test]
    fn canonical_cmp_matches_sort() {
        let newer = Entry::new("b").with_date("2024-06-01");
        let older = Entry::new("a").with_date("2024-01-01");

        assert_eq!(canonical_cmp(&newer, &older), Ordering::Less);
        assert_eq!(canonical_cmp(&older, &newer), Ordering::Greater);
        assert_eq!(canonical_cmp(&older, &older), Ordering::Equal);

        let mut entries = vec![
            older.clone(),
            Entry::new("c").with_date("not a date"),
            newer.clone(),
            Entry::new("a").with_date("2024-06-01"),
        ];
        sort_entries(&mut entries);
        assert!(entries
            .windows(2)
            .all(|pair| canonical_cmp(&pair[0], &pair[1]) != Ordering::Greater));
        assert_eq!(ids(&entries), ["a", "b", "a", "c"]);
    }

    #[test]
    fn date_key_accepts_common_layouts() {
        let midnight = date_key("2024-03-05");
        assert!(midnight > 0);
        assert_eq!(date_key("2024/03/05"), midnight);
        assert_eq!(date_key("2024.03.05"), midnight);
        assert_eq!(date_key(" 2024-03-05 "), midnight);
        assert_eq!(date_key("2024-03-05T00:00:00Z"), midnight);
        assert_eq!(date_key("2024-03-05T00:00"), midnight);
        assert_eq!(date_key("2024-03-05 01:00:00"), midnight + 3_600_000);
        assert_eq!(date_key("Tue, 05 Mar 2024 00:00:00 +0000"), midnight);
    }
}
