//! Week bucket generation for the burn plan.
//!
//! # Responsibility
//! - Turn a project date range into ordered week buckets.
//!
//! # Invariants
//! - Buckets are gapless, non-overlapping, each 1..=7 days, and their union
//!   is exactly `[start, end]`.
//! - Unparseable or inverted input yields an empty sequence, never an error.
//! - Output never carries allocations; carry-over is the reconciler's job.

use crate::model::burn_plan::{WeekRange, DAYS_PER_WEEK};
use chrono::{Duration, NaiveDate};

/// Input/output date format for plan bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Formats a date the way plan bounds are stored.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Generates week buckets for textual plan bounds.
///
/// Returns an empty sequence when either bound fails to parse.
pub fn generate_weeks(start: &str, end: &str) -> Vec<WeekRange> {
    match (parse_date(start), parse_date(end)) {
        (Some(start), Some(end)) => generate_weeks_between(start, end),
        _ => Vec::new(),
    }
}

/// Generates week buckets covering `[start, end]`.
///
/// Returns an empty sequence when `end < start`.
pub fn generate_weeks_between(start: NaiveDate, end: NaiveDate) -> Vec<WeekRange> {
    let mut weeks = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        let week_end = cursor
            .checked_add_signed(Duration::days(DAYS_PER_WEEK - 1))
            .map_or(end, |candidate| candidate.min(end));
        weeks.push(WeekRange::new(cursor, week_end));
        match week_end.succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::{generate_weeks, generate_weeks_between, parse_date};
    use chrono::NaiveDate;

    fn date(value: &str) -> NaiveDate {
        parse_date(value).expect("test date should parse")
    }

    #[test]
    fn ten_day_range_yields_full_and_truncated_week() {
        let weeks = generate_weeks("2024-01-01", "2024-01-10");

        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].start_date, date("2024-01-01"));
        assert_eq!(weeks[0].end_date, date("2024-01-07"));
        assert_eq!(weeks[1].start_date, date("2024-01-08"));
        assert_eq!(weeks[1].end_date, date("2024-01-10"));
    }

    #[test]
    fn single_day_range_yields_one_week() {
        let weeks = generate_weeks("2024-03-05", "2024-03-05");
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].day_count(), 1);
    }

    #[test]
    fn inverted_or_malformed_ranges_are_empty() {
        assert!(generate_weeks("2024-01-10", "2024-01-01").is_empty());
        assert!(generate_weeks("2024-01-0", "2024-01-10").is_empty());
        assert!(generate_weeks("", "").is_empty());
        assert!(generate_weeks("2024-02-30", "2024-03-10").is_empty());
    }

    #[test]
    fn weeks_are_contiguous_and_cover_range_exactly() {
        let start = date("2023-12-20");
        for span in 0..60 {
            let end = start + chrono::Duration::days(span);
            let weeks = generate_weeks_between(start, end);

            assert_eq!(weeks.first().unwrap().start_date, start);
            assert_eq!(weeks.last().unwrap().end_date, end);
            for week in &weeks {
                assert!((1..=7).contains(&week.day_count()));
                assert!(week.allocations.is_empty());
            }
            for pair in weeks.windows(2) {
                assert_eq!(pair[0].end_date.succ_opt(), Some(pair[1].start_date));
            }
            let covered: i64 = weeks.iter().map(|week| week.day_count()).sum();
            assert_eq!(covered, span + 1);
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(generate_weeks(" 2024-01-01 ", "2024-01-07\n").len(), 1);
    }
}
