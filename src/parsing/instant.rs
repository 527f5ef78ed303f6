//! Instant-messaging export utilities.
//!
//! Plain-text chat exports have no field labels: every message starts on a
//! line carrying a timestamp marker and the sender, and any line without a
//! marker continues the previous message. The marker layout varies by locale
//! and app, so it is auto-detected from a sample of lines.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

/// Timestamp marker layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `[2024-01-15 10:30:45] Sender: Message`
    Iso,
    /// US format: M/D/YY or M/D/YYYY with optional AM/PM
    /// Example: `[1/15/24, 10:30:45 AM] Sender: Message`
    Us,
    /// EU format with dots in brackets
    /// Example: `[15.01.24, 10:30:45] Sender: Message`
    EuDotBracketed,
    /// EU format with dots, no brackets
    /// Example: `26.10.2025, 20:40 - Sender: Message`
    EuDotNoBracket,
    /// EU format with slashes, no brackets
    /// Example: `15/01/2024, 10:30 - Sender: Message`
    EuSlash,
    /// Bracketed EU with slashes
    /// Example: `[15/01/2024, 10:30:45] Sender: Message`
    EuSlashBracketed,
}

impl DateFormat {
    /// Returns the line regex for this layout.
    ///
    /// Captures: date, time, sender, first line of text.
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::Iso => {
                r"^\[(\d{4}-\d{2}-\d{2})[ T](\d{2}:\d{2}(?::\d{2})?)\]\s([^:]+):\s?(.*)"
            }
            DateFormat::Us => {
                r"^\[(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\]\s([^:]+):\s?(.*)"
            }
            DateFormat::EuDotBracketed => {
                r"^\[(\d{2}\.\d{2}\.\d{2,4}),\s(\d{2}:\d{2}(?::\d{2})?)\]\s([^:]+):\s?(.*)"
            }
            DateFormat::EuDotNoBracket => {
                r"^(\d{2}\.\d{2}\.\d{2,4}),\s(\d{2}:\d{2}(?::\d{2})?)\s-\s([^:]+):\s?(.*)"
            }
            DateFormat::EuSlash => {
                r"^(\d{2}/\d{2}/\d{2,4}),\s(\d{2}:\d{2}(?::\d{2})?)\s-\s([^:]+):\s?(.*)"
            }
            DateFormat::EuSlashBracketed => {
                r"^\[(\d{2}/\d{2}/\d{2,4}),\s(\d{2}:\d{2}(?::\d{2})?)\]\s([^:]+):\s?(.*)"
            }
        }
    }

    /// Returns chrono formats for `"{date}, {time}"`.
    pub fn date_parse_formats(self) -> &'static [&'static str] {
        match self {
            DateFormat::Iso => &["%Y-%m-%d, %H:%M:%S", "%Y-%m-%d, %H:%M"],
            DateFormat::Us => &[
                "%m/%d/%y, %I:%M:%S %p",
                "%m/%d/%y, %I:%M %p",
                "%m/%d/%Y, %I:%M:%S %p",
                "%m/%d/%Y, %I:%M %p",
                "%m/%d/%y, %H:%M:%S",
                "%m/%d/%y, %H:%M",
                "%m/%d/%Y, %H:%M:%S",
                "%m/%d/%Y, %H:%M",
            ],
            DateFormat::EuDotBracketed | DateFormat::EuDotNoBracket => &[
                "%d.%m.%y, %H:%M:%S",
                "%d.%m.%y, %H:%M",
                "%d.%m.%Y, %H:%M:%S",
                "%d.%m.%Y, %H:%M",
            ],
            DateFormat::EuSlash | DateFormat::EuSlashBracketed => &[
                "%d/%m/%y, %H:%M:%S",
                "%d/%m/%y, %H:%M",
                "%d/%m/%Y, %H:%M:%S",
                "%d/%m/%Y, %H:%M",
            ],
        }
    }

    /// Returns all layouts, in detection priority order.
    pub fn all() -> &'static [DateFormat] {
        &[
            DateFormat::Iso,
            DateFormat::Us,
            DateFormat::EuDotBracketed,
            DateFormat::EuDotNoBracket,
            DateFormat::EuSlash,
            DateFormat::EuSlashBracketed,
        ]
    }

    /// Returns the compiled line regex.
    pub fn regex(self) -> &'static Regex {
        static COMPILED: LazyLock<Vec<(DateFormat, Regex)>> = LazyLock::new(|| {
            DateFormat::all()
                .iter()
                .map(|&f| (f, Regex::new(f.pattern()).unwrap()))
                .collect()
        });
        COMPILED
            .iter()
            .find(|(f, _)| *f == self)
            .map(|(_, re)| re)
            .unwrap()
    }
}

/// Parses a marker timestamp. Naive values are taken as UTC.
pub fn parse_instant_timestamp(
    date_str: &str,
    time_str: &str,
    format: DateFormat,
) -> Option<DateTime<Utc>> {
    let datetime_str = format!("{date_str}, {time_str}");

    format
        .date_parse_formats()
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(&datetime_str, f).ok())
        .map(|naive| naive.and_utc())
}

/// Notices that messaging apps write into plain-text exports of a
/// one-to-one chat, attributed to one of the two people.
const APP_NOTICES: &[&str] = &[
    "messages and calls are end-to-end encrypted",
    "changed their phone number",
    "security code changed",
    "turned on disappearing messages",
    "turned off disappearing messages",
];

/// Returns `true` for app-generated lines that have no human author.
pub fn is_system_message(sender: &str, content: &str) -> bool {
    let content_lower = content.to_lowercase();
    let sender_lower = sender.to_lowercase();

    APP_NOTICES
        .iter()
        .any(|indicator| content_lower.contains(indicator))
        || sender.trim().is_empty()
        || sender_lower == "system"
}

/// Picks the layout matching the most sample lines.
///
/// Returns `None` if no layout matches any line. Ties go to the earlier
/// entry of [`DateFormat::all`].
pub fn detect_format(lines: &[&str]) -> Option<DateFormat> {
    let mut best: Option<(DateFormat, usize)> = None;

    for &format in DateFormat::all() {
        let regex = format.regex();
        let score = lines.iter().filter(|line| regex.is_match(line)).count();
        if score > 0 && best.is_none_or(|(_, top)| score > top) {
            best = Some((format, score));
        }
    }

    best.map(|(format, _)| format)
}
