//! Subject-based thread assignment.
//!
//! Report exports carry no reply headers, so conversations are rebuilt from
//! the subject line and the set of people involved:
//!
//! 1. every real message gets a *thread key*: the normalized subject plus the
//!    sorted participants (subjectless messages are also bucketed by day)
//! 2. messages sharing a key are ordered by send time and split wherever the
//!    gap exceeds [`ThreadConfig::inactivity_threshold`]
//! 3. segments are numbered by `(first send time, key)`
//!
//! The result depends only on the set of messages, not on their order.
//!
//! # Example
//!
//! ```
//! use commpack::config::ThreadConfig;
//! use commpack::threading::assign_threads;
//! use commpack::{Message, ReadTime};
//! use chrono::{TimeZone, Utc};
//!
//! let day = |d| Utc.with_ymd_and_hms(2024, 1, d, 9, 0, 0).unwrap();
//! let messages = vec![
//!     Message::new("Alice", "Pickup at 5?").with_subject("Pickup")
//!         .with_recipient("Bob", ReadTime::Never).with_sent_date(day(2)),
//!     Message::new("Bob", "Works.").with_subject("RE: Pickup")
//!         .with_recipient("Alice", ReadTime::Never).with_sent_date(day(3)),
//! ];
//!
//! let threaded = assign_threads(messages, &ThreadConfig::default());
//! assert_eq!(threaded[0].thread_id(), threaded[1].thread_id());
//! assert_eq!(threaded[1].thread.as_ref().unwrap().thread_index, 1);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Message;
use crate::config::ThreadConfig;

/// Normalized form of a missing subject.
pub const NORMALIZED_NO_SUBJECT: &str = "no subject";

/// Maximum number of prefix-stripping passes.
const MAX_PREFIX_PASSES: usize = 10;

const REPLY_PREFIXES: &[&str] = &["re:", "fwd:", "fw:"];

/// Normalizes a subject line for thread matching.
///
/// Lowercases, strips reply and forward prefixes and leading `[tags]`,
/// replaces punctuation with spaces and collapses whitespace. An empty
/// result becomes `"no subject"`. The function is idempotent.
///
/// ```
/// use commpack::threading::normalize_subject;
///
/// assert_eq!(normalize_subject("Re: Re: Update!!!"), normalize_subject("update"));
/// assert_eq!(normalize_subject("FW: [Urgent] School-pickup"), "school pickup");
/// assert_eq!(normalize_subject("Re:"), "no subject");
/// ```
pub fn normalize_subject(subject: &str) -> String {
    let mut normalized = subject.trim().to_lowercase();

    for _ in 0..MAX_PREFIX_PASSES {
        let before = normalized.len();

        for prefix in REPLY_PREFIXES {
            if let Some(rest) = normalized.strip_prefix(prefix) {
                normalized = rest.trim_start().to_string();
            }
        }

        if normalized.starts_with('[') {
            if let Some(end) = normalized.find(']') {
                normalized = normalized[end + 1..].trim_start().to_string();
            }
        }

        if normalized.len() == before {
            break;
        }
    }

    let words: String = normalized
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();
    let collapsed = words.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        NORMALIZED_NO_SUBJECT.to_string()
    } else {
        collapsed
    }
}

/// Computes the thread key of a message.
///
/// `<normalized subject>|<participants>` for messages with a subject.
/// Subjectless messages use `no subject|<YYYY-MM-DD>|<participants>`, with
/// `undated` in place of the day when there is no send time, so unrelated
/// one-off notes on different days never merge.
pub fn thread_key(message: &Message) -> String {
    let subject = normalize_subject(&message.subject);
    let participants = message.participants().join(",");

    if subject == NORMALIZED_NO_SUBJECT {
        let day = message
            .sent_date
            .map_or_else(|| "undated".to_string(), |ts| ts.format("%Y-%m-%d").to_string());
        format!("{NORMALIZED_NO_SUBJECT}|{day}|{participants}")
    } else {
        format!("{subject}|{participants}")
    }
}

/// Thread membership of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRef {
    /// Thread number, in chronological discovery order.
    pub thread_id: u32,
    /// Key shared by all messages of the thread.
    pub thread_key: String,
    /// Position inside the thread, from 0.
    pub thread_index: usize,
}

/// A message annotated with its thread.
///
/// Placeholders have no thread. Serializes as one flat object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadedMessage {
    #[serde(flatten)]
    pub message: Message,
    #[serde(flatten)]
    pub thread: Option<ThreadRef>,
}

impl ThreadedMessage {
    /// Returns the thread id, if the message belongs to a thread.
    pub fn thread_id(&self) -> Option<u32> {
        self.thread.as_ref().map(|t| t.thread_id)
    }
}

/// Consecutive same-key messages that belong to one thread.
struct Segment<'a> {
    key: &'a str,
    ordinal: usize,
    first_sent: Option<DateTime<Utc>>,
    members: Vec<usize>,
}

/// Assigns every real message to a thread.
///
/// Output order matches input order. A gap strictly larger than
/// `config.inactivity_threshold` between consecutive dated messages with
/// the same key starts a new thread; an undated message never causes a
/// split.
pub fn assign_threads(messages: Vec<Message>, config: &ThreadConfig) -> Vec<ThreadedMessage> {
    let keys: Vec<Option<String>> = messages
        .iter()
        .map(|m| m.is_message().then(|| thread_key(m)))
        .collect();

    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, key) in keys.iter().enumerate() {
        if let Some(key) = key {
            groups.entry(key.as_str()).or_default().push(idx);
        }
    }

    let mut segments: Vec<Segment<'_>> = Vec::new();
    for (key, mut members) in groups {
        members.sort_by(|&a, &b| {
            let (a, b) = (&messages[a], &messages[b]);
            a.sent_date
                .cmp(&b.sent_date)
                .then_with(|| a.body.cmp(&b.body))
                .then_with(|| a.sender.cmp(&b.sender))
                .then_with(|| a.subject.cmp(&b.subject))
        });

        let mut ordinal = 0;
        let mut prev: Option<DateTime<Utc>> = None;
        for idx in members {
            let sent = messages[idx].sent_date;
            let gap_exceeded = matches!(
                (prev, sent),
                (Some(p), Some(s)) if s - p > config.inactivity_threshold
            );

            let same_key = segments.last().is_some_and(|seg| seg.key == key);
            if let Some(seg) = segments.last_mut().filter(|_| same_key && !gap_exceeded) {
                seg.members.push(idx);
            } else {
                if same_key {
                    ordinal += 1;
                }
                segments.push(Segment {
                    key,
                    ordinal,
                    first_sent: sent,
                    members: vec![idx],
                });
            }
            prev = sent.or(prev);
        }
    }

    segments.sort_by(|a, b| {
        a.first_sent
            .cmp(&b.first_sent)
            .then_with(|| a.key.cmp(b.key))
            .then_with(|| a.ordinal.cmp(&b.ordinal))
    });

    let mut refs: Vec<Option<ThreadRef>> = vec![None; messages.len()];
    for (thread_id, segment) in (0u32..).zip(&segments) {
        for (thread_index, &idx) in segment.members.iter().enumerate() {
            refs[idx] = Some(ThreadRef {
                thread_id,
                thread_key: segment.key.to_string(),
                thread_index,
            });
        }
    }

    log::info!(
        "assigned {} messages to {} threads",
        refs.iter().filter(|r| r.is_some()).count(),
        segments.len()
    );

    messages
        .into_iter()
        .zip(refs)
        .map(|(message, thread)| ThreadedMessage { message, thread })
        .collect()
}
