//! Shared parsing utilities.
//!
//! Pure functions used by the parsers in [`crate::parsers`]:
//! - [`normalize_line`] cleans PDF-extraction artifacts from a single line
//! - [`parse_timestamp`] tries the known report formats, then a generic parse
//! - [`report`] segments a message report and extracts fields from a block
//! - [`instant`] detects and parses instant-messaging line markers

pub mod instant;
pub mod report;

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;

/// Formats observed in message report `Sent:` and `First Viewed:` values.
const REPORT_DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y at %I:%M %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y at %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%y %I:%M %p",
];

/// A four-digit year or a `d/m/yy`-style date. Values without one would be
/// completed from the wall clock by the generic parser.
static HAS_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}|\b\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2}\b").unwrap());

/// Normalizes a raw line of extracted text.
///
/// - non-breaking and narrow spaces become ASCII spaces
/// - directional marks, bidi controls and the BOM are removed
/// - the full-width colon becomes `:`
/// - the result is trimmed
///
/// # Example
///
/// ```
/// use commpack::parsing::normalize_line;
///
/// assert_eq!(normalize_line("\u{200E}Sent\u{FF1A}\u{00A0}01/15/2024 "), "Sent: 01/15/2024");
/// ```
pub fn normalize_line(line: &str) -> String {
    line.chars()
        .filter(|c| !is_invisible_mark(*c))
        .map(|c| match c {
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => ' ',
            '\u{FF1A}' => ':',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_invisible_mark(c: char) -> bool {
    matches!(
        c,
        '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' | '\u{FEFF}'
    )
}

/// Parses a timestamp from a report field value.
///
/// Naive values are taken as UTC. Known report formats are tried first;
/// anything else goes through `dateparser`, with a missing time of day read
/// as midnight. Values without an explicit year (`9:30 AM`, `May 27`) and
/// values neither path understands return `None`, so the result never
/// depends on when the parse runs.
///
/// # Example
///
/// ```
/// use commpack::parsing::parse_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let ts = parse_timestamp("01/15/2024 at 09:30 AM").unwrap();
/// assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap());
/// assert_eq!(
///     parse_timestamp("01/15/2024"),
///     Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
/// );
/// assert!(parse_timestamp("9:30 AM").is_none());
/// assert!(parse_timestamp("sometime next week").is_none());
/// ```
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let cleaned = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return None;
    }

    for format in REPORT_DATE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&cleaned, format) {
            return Some(naive.and_utc());
        }
    }

    if !HAS_YEAR.is_match(&cleaned) {
        log::warn!("timestamp `{}` has no date", cleaned);
        return None;
    }

    match dateparser::parse_with(&cleaned, &Utc, NaiveTime::MIN) {
        Ok(ts) => Some(ts),
        Err(e) => {
            log::warn!("unparsable timestamp `{}`: {}", cleaned, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normalize_line_strips_marks() {
        assert_eq!(normalize_line("\u{200F}From:\u{202F}Alice\u{200E}"), "From: Alice");
        assert_eq!(normalize_line("\u{FEFF}  Subject\u{FF1A} Pickup  "), "Subject: Pickup");
        assert_eq!(normalize_line("\u{2066}To:\u{2069}"), "To:");
        assert_eq!(normalize_line("   "), "");
    }

    #[test]
    fn test_parse_report_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 21, 5, 0).unwrap();
        assert_eq!(parse_timestamp("01/15/2024 at 09:05 PM"), Some(expected));
        assert_eq!(parse_timestamp("01/15/2024 09:05 PM"), Some(expected));
        assert_eq!(parse_timestamp("1/15/2024  at  9:05 pm"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15 21:05:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T21:05:00"), Some(expected));
    }

    #[test]
    fn test_parse_generic_fallback() {
        let ts = parse_timestamp("2024-01-15T21:05:00Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 15, 21, 5, 0).unwrap());
    }

    #[test]
    fn test_date_only_is_midnight_every_time() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let first = parse_timestamp("01/15/2024");
        let second = parse_timestamp("01/15/2024");
        assert_eq!(first, Some(midnight));
        assert_eq!(second, first);
        assert_eq!(parse_timestamp("2024-01-15"), Some(midnight));
    }

    #[test]
    fn test_values_without_year_are_none() {
        assert!(parse_timestamp("9:30 AM").is_none());
        assert!(parse_timestamp("21:05").is_none());
        assert!(parse_timestamp("May 27").is_none());
    }

    #[test]
    fn test_parse_failure_is_none() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date").is_none());
    }
}
