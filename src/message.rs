//! Reconstructed message records.
//!
//! [`Message`] is what both parsers produce. Every real message carries a
//! non-empty sender and subject: when the source text has nothing usable the
//! sentinels [`UNKNOWN_SENDER`] and [`NO_SUBJECT`] are substituted, never an
//! empty string.
//!
//! # Examples
//!
//! ```
//! use commpack::{Message, ReadTime};
//! use chrono::{TimeZone, Utc};
//!
//! let sent = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
//! let viewed = Utc.with_ymd_and_hms(2024, 1, 15, 10, 2, 0).unwrap();
//!
//! let msg = Message::new("Alice", "Pickup moved to 5pm.")
//!     .with_sent_date(sent)
//!     .with_subject("Pickup")
//!     .with_recipient("Bob", ReadTime::Viewed(viewed));
//!
//! assert_eq!(msg.participants(), vec!["Alice", "Bob"]);
//! assert_eq!(msg.read_latency_minutes("Bob"), Some(32.0));
//! ```
//!
//! # Serialization
//!
//! Keys are camelCase. Timestamps are RFC 3339 strings and an unread
//! recipient is the literal string `"Never"`:
//!
//! ```
//! use commpack::{Message, ReadTime};
//!
//! let msg = Message::new("Alice", "Hi").with_recipient("Bob", ReadTime::Never);
//! let json = serde_json::to_string(&msg)?;
//! assert!(json.contains(r#""recipientReadTimes":{"Bob":"Never"}"#));
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::metrics::{MessageMetrics, Scorer};

/// Sender used when no sender could be recovered.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Subject used when no subject could be recovered.
pub const NO_SUBJECT: &str = "No subject";

/// Literal marker for a recipient who has not opened the message.
pub const NEVER: &str = "Never";

/// When a recipient first viewed a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadTime {
    /// First-viewed timestamp.
    Viewed(DateTime<Utc>),
    /// Not yet read.
    Never,
}

impl ReadTime {
    /// Returns the viewed timestamp, if any.
    pub fn viewed(&self) -> Option<DateTime<Utc>> {
        match self {
            ReadTime::Viewed(ts) => Some(*ts),
            ReadTime::Never => None,
        }
    }

    /// Returns `true` for [`ReadTime::Never`].
    pub fn is_never(&self) -> bool {
        matches!(self, ReadTime::Never)
    }
}

impl fmt::Display for ReadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadTime::Viewed(ts) => write!(f, "{}", ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ReadTime::Never => write!(f, "{NEVER}"),
        }
    }
}

impl Serialize for ReadTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReadTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ReadTimeVisitor;

        impl Visitor<'_> for ReadTimeVisitor {
            type Value = ReadTime;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an RFC 3339 timestamp or \"Never\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ReadTime, E> {
                if value.trim().eq_ignore_ascii_case(NEVER) {
                    return Ok(ReadTime::Never);
                }
                DateTime::parse_from_rfc3339(value.trim())
                    .map(|ts| ReadTime::Viewed(ts.with_timezone(&Utc)))
                    .map_err(E::custom)
            }
        }

        deserializer.deserialize_str(ReadTimeVisitor)
    }
}

/// One reconstructed message.
///
/// Metric fields are flattened into the same JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// When the message was sent. Messages without one are listed but not
    /// aggregated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_date: Option<DateTime<Utc>>,

    /// Display name of the author.
    pub sender: String,

    /// Recipient display name to first-viewed time.
    #[serde(default)]
    pub recipient_read_times: BTreeMap<String, ReadTime>,

    /// Literal subject line.
    pub subject: String,

    /// Message text with headers, footers and pagination stripped.
    pub body: String,

    /// Word count, sentiment and tone.
    #[serde(flatten, default)]
    pub metrics: MessageMetrics,

    /// Set on a block that matched a boundary but had no field labels.
    #[serde(default, skip_serializing_if = "is_false")]
    pub non_message: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Message {
    /// Creates a message with a sender and body and no metadata.
    ///
    /// An empty sender is replaced by [`UNKNOWN_SENDER`]; the subject starts
    /// as [`NO_SUBJECT`].
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sent_date: None,
            sender: or_sentinel(sender.into(), UNKNOWN_SENDER),
            recipient_read_times: BTreeMap::new(),
            subject: NO_SUBJECT.to_string(),
            body: body.into(),
            metrics: MessageMetrics::default(),
            non_message: false,
        }
    }

    /// Creates a non-message placeholder for a block with no field labels.
    pub fn placeholder(body: impl Into<String>) -> Self {
        Self {
            non_message: true,
            ..Self::new(UNKNOWN_SENDER, body)
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Sets the send time.
    #[must_use]
    pub fn with_sent_date(mut self, ts: DateTime<Utc>) -> Self {
        self.sent_date = Some(ts);
        self
    }

    /// Sets the subject. An empty subject becomes [`NO_SUBJECT`].
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = or_sentinel(subject.into(), NO_SUBJECT);
        self
    }

    /// Adds or replaces a recipient.
    #[must_use]
    pub fn with_recipient(mut self, name: impl Into<String>, read: ReadTime) -> Self {
        self.recipient_read_times.insert(name.into(), read);
        self
    }

    /// Returns a copy with metrics computed from the body.
    #[must_use]
    pub fn scored(self, scorer: &Scorer) -> Self {
        let metrics = scorer.score(&self.body);
        Self { metrics, ..self }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the subject line.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the send time, if known.
    pub fn sent_date(&self) -> Option<DateTime<Utc>> {
        self.sent_date
    }

    /// Returns `true` unless this is a non-message placeholder.
    pub fn is_message(&self) -> bool {
        !self.non_message
    }

    /// Sender plus every recipient, deduplicated and sorted.
    pub fn participants(&self) -> Vec<&str> {
        let mut people: Vec<&str> = std::iter::once(self.sender.as_str())
            .chain(self.recipient_read_times.keys().map(String::as_str))
            .collect();
        people.sort_unstable();
        people.dedup();
        people
    }

    /// Minutes between sending and the recipient's first view.
    ///
    /// `None` when the message has no send time, the recipient never read
    /// it, or the difference is negative or non-finite.
    pub fn read_latency_minutes(&self, recipient: &str) -> Option<f64> {
        let sent = self.sent_date?;
        let viewed = self.recipient_read_times.get(recipient)?.viewed()?;
        let minutes = (viewed - sent).num_seconds() as f64 / 60.0;
        (minutes.is_finite() && minutes >= 0.0).then_some(minutes)
    }
}

fn or_sentinel(value: String, sentinel: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        sentinel.to_string()
    } else if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}
