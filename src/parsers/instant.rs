//! Instant-messaging TXT export parser.
//!
//! Exports vary by locale and app. The marker layout is auto-detected from
//! the first 20 non-empty lines.
//!
//! Supported layouts:
//! - ISO: `[2024-01-15 10:30:45] Sender: Message`
//! - US: `[1/15/24, 10:30:45 AM] Sender: Message`
//! - EU: `[15.01.24, 10:30:45] Sender: Message`
//! - EU2: `15/01/2024, 10:30 - Sender: Message`
//! - EU3: `15.01.2024, 10:30 - Sender: Message`

use std::collections::BTreeSet;

use crate::Message;
use crate::error::CommpackError;
use crate::message::ReadTime;
use crate::parser::{Parser, Platform};
use crate::parsing::instant::{detect_format, is_system_message, parse_instant_timestamp};

/// Number of non-empty lines inspected for layout detection.
const SAMPLE_LINES: usize = 20;

/// Parser for plain-text instant-messaging exports.
///
/// These exports carry no subjects and no read receipts, so every message
/// gets [`NO_SUBJECT`](crate::message::NO_SUBJECT) and lists every other
/// participant of the export as a recipient with [`ReadTime::Never`].
///
/// # Example
///
/// ```rust
/// use commpack::parser::Parser;
/// use commpack::parsers::InstantParser;
///
/// let text = "[2024-01-15 10:30] Alice: Are you picking them up?\n\
///             [2024-01-15 10:32] Bob: Yes, at four.";
/// let messages = InstantParser::new().parse_str(text)?;
///
/// assert_eq!(messages.len(), 2);
/// assert!(messages[0].recipient_read_times.contains_key("Bob"));
/// # Ok::<(), commpack::CommpackError>(())
/// ```
pub struct InstantParser {
    skip_system_messages: bool,
}

impl InstantParser {
    /// Creates a new parser that drops app-generated system lines.
    pub fn new() -> Self {
        Self {
            skip_system_messages: true,
        }
    }

    /// Sets whether app-generated system lines are dropped.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }
}

impl Default for InstantParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for InstantParser {
    fn name(&self) -> &'static str {
        "Instant messages"
    }

    fn platform(&self) -> Platform {
        Platform::InstantMessage
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Message>, CommpackError> {
        let lines: Vec<&str> = content.lines().collect();
        let sample: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| !line.trim().is_empty())
            .take(SAMPLE_LINES)
            .collect();

        if sample.is_empty() {
            return Ok(vec![]);
        }

        let format = detect_format(&sample).ok_or_else(|| {
            CommpackError::invalid_format(
                "Instant message",
                "no line matches a known timestamp marker. \
                 Make sure the file is a plain-text chat export.",
            )
        })?;
        let regex = format.regex();

        let mut messages: Vec<Message> = Vec::new();
        let mut orphans = 0usize;

        for line in &lines {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(caps) = regex.captures(line) {
                let date_str = caps.get(1).map_or("", |m| m.as_str());
                let time_str = caps.get(2).map_or("", |m| m.as_str());
                let sender = caps.get(3).map_or("", |m| m.as_str().trim());
                let text = caps.get(4).map_or("", |m| m.as_str());

                if self.skip_system_messages && is_system_message(sender, text) {
                    continue;
                }

                let mut msg = Message::new(sender, text);
                match parse_instant_timestamp(date_str, time_str, format) {
                    Some(ts) => msg = msg.with_sent_date(ts),
                    None => log::warn!("unparsable timestamp `{}, {}`", date_str, time_str),
                }
                messages.push(msg);
            } else if let Some(last) = messages.last_mut() {
                last.body.push('\n');
                last.body.push_str(line);
            } else {
                orphans += 1;
            }
        }

        let senders: BTreeSet<String> = messages.iter().map(|m| m.sender.clone()).collect();
        let messages: Vec<Message> = messages
            .into_iter()
            .map(|msg| {
                let others: Vec<String> = senders
                    .iter()
                    .filter(|name| **name != msg.sender)
                    .cloned()
                    .collect();
                others
                    .into_iter()
                    .fold(msg, |msg, name| msg.with_recipient(name, ReadTime::Never))
            })
            .collect();

        log::info!(
            "parsed {} instant messages from {} participants ({:?} markers, {} orphan lines)",
            messages.len(),
            senders.len(),
            format,
            orphans
        );

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::NO_SUBJECT;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_us_format() {
        let text = "[1/15/24, 10:30:45 AM] Alice: Hello\n[1/15/24, 10:31:00 AM] Bob: Hi there";
        let messages = InstantParser::new().parse_str(text).unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "Alice");
        assert_eq!(messages[0].body, "Hello");
        assert_eq!(messages[0].subject, NO_SUBJECT);
        assert_eq!(
            messages[0].sent_date,
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap())
        );
        assert_eq!(
            messages[0].recipient_read_times.get("Bob"),
            Some(&ReadTime::Never)
        );
        assert!(!messages[1].recipient_read_times.contains_key("Bob"));
    }

    #[test]
    fn test_multiline_continuation() {
        let text = "15/01/2024, 10:30 - Alice: First line\nsecond line\n\nthird line\n\
                    15/01/2024, 10:31 - Bob: ok";
        let messages = InstantParser::new().parse_str(text).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].body, "First line\nsecond line\nthird line");
    }

    #[test]
    fn test_system_messages_skipped() {
        let text = "[2024-01-15 10:00] System: Messages and calls are end-to-end encrypted\n\
                    [2024-01-15 10:30] Alice: Hello";
        let messages = InstantParser::new().parse_str(text).unwrap();
        assert_eq!(messages.len(), 1);

        let messages = InstantParser::new()
            .with_skip_system_messages(false)
            .parse_str(text)
            .unwrap();
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_group_recipients() {
        let text = "[2024-01-15 10:00] Alice: a\n[2024-01-15 10:01] Bob: b\n[2024-01-15 10:02] Carol: c";
        let messages = InstantParser::new().parse_str(text).unwrap();
        let names: Vec<&String> = messages[1].recipient_read_times.keys().collect();
        assert_eq!(names, vec!["Alice", "Carol"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(InstantParser::new().parse_str("").unwrap().is_empty());
        assert!(InstantParser::new().parse_str("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_unrecognized_input_is_invalid_format() {
        let err = InstantParser::new()
            .parse_str("Message 1 of 1\nFrom: Alice")
            .unwrap_err();
        assert!(err.is_invalid_format());
    }
}
