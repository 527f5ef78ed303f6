//! Per-person and per-week communication statistics.
//!
//! [`aggregate`] folds every dated real message into two views:
//!
//! - a global [`PersonStats`] per person
//! - the same numbers bucketed by week (Sunday to Saturday, UTC)
//!
//! Senders accumulate sends, words and sentiment. Recipients accumulate
//! reads and read latency. After the fold, [`PersonStats::finalize`] turns
//! the sums into averages.
//!
//! # Example
//!
//! ```
//! use commpack::core::stats::aggregate;
//! use commpack::{Message, ReadTime};
//! use chrono::{TimeZone, Utc};
//!
//! let sent = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
//! let read = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
//! let messages = vec![
//!     Message::new("Alice", "See you Friday")
//!         .with_sent_date(sent)
//!         .with_recipient("Bob", ReadTime::Viewed(read)),
//! ];
//!
//! let stats = aggregate(&messages);
//! assert_eq!(stats.people["Alice"].messages_sent, 1);
//! assert_eq!(stats.people["Bob"].average_read_time, 30.0);
//! assert!(stats.weekly.contains_key("2024-01-14 to 2024-01-20"));
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::metrics::{clamp_unit, finite_or_zero};

/// Communication statistics for one person.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonStats {
    pub messages_sent: usize,
    /// Messages read with a usable latency sample.
    pub messages_read: usize,
    /// Sum of read latencies, in minutes.
    pub total_read_time: f64,
    pub total_words: usize,
    pub sentiment_sum: f64,
    pub sentiment_natural_sum: f64,
    pub tone_sum: f64,

    /// `total_read_time / messages_read`, in minutes.
    pub average_read_time: f64,
    pub avg_sentiment: f64,
    pub avg_sentiment_natural: f64,
    /// Mean per-message tone, clamped to `[-1, 1]`.
    pub tone: f64,
}

impl PersonStats {
    fn record_send(&mut self, msg: &Message) {
        self.messages_sent += 1;
        self.total_words += msg.metrics.word_count;
        self.sentiment_sum += msg.metrics.sentiment;
        self.sentiment_natural_sum += msg.metrics.sentiment_natural;
        self.tone_sum += msg.metrics.tone;
    }

    fn record_read(&mut self, latency_minutes: f64) {
        self.messages_read += 1;
        self.total_read_time += latency_minutes;
    }

    /// Computes the averages from the accumulated sums.
    ///
    /// A zero denominator or a non-finite result gives 0.
    pub fn finalize(&mut self) {
        self.average_read_time = ratio(self.total_read_time, self.messages_read);
        self.avg_sentiment = ratio(self.sentiment_sum, self.messages_sent);
        self.avg_sentiment_natural = ratio(self.sentiment_natural_sum, self.messages_sent);
        self.tone = clamp_unit(ratio(self.tone_sum, self.messages_sent));
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    finite_or_zero(sum / count as f64)
}

/// Global and weekly statistics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// Person to global totals.
    pub people: BTreeMap<String, PersonStats>,
    /// Week label to person to totals for that week.
    pub weekly: BTreeMap<String, BTreeMap<String, PersonStats>>,
}

/// Returns the `YYYY-MM-DD to YYYY-MM-DD` label of the Sunday-to-Saturday
/// week containing `ts` (UTC).
///
/// ```
/// use commpack::core::stats::week_label;
/// use chrono::{TimeZone, Utc};
///
/// // A Wednesday
/// let ts = Utc.with_ymd_and_hms(2024, 1, 17, 12, 0, 0).unwrap();
/// assert_eq!(week_label(ts), "2024-01-14 to 2024-01-20");
/// ```
pub fn week_label(ts: DateTime<Utc>) -> String {
    let day = ts.date_naive();
    let start = day - Duration::days(i64::from(day.weekday().num_days_from_sunday()));
    let end = start + Duration::days(6);
    format!("{} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
}

/// Folds messages into global and weekly statistics.
///
/// Placeholders and messages without a send date are skipped. Every
/// recipient gets an entry even without a usable read.
pub fn aggregate<'a, I>(messages: I) -> Statistics
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut stats = Statistics::default();

    for msg in messages {
        let Some(sent) = msg.sent_date.filter(|_| msg.is_message()) else {
            continue;
        };
        let week = stats.weekly.entry(week_label(sent)).or_default();

        stats.people.entry(msg.sender.clone()).or_default().record_send(msg);
        week.entry(msg.sender.clone()).or_default().record_send(msg);

        for recipient in msg.recipient_read_times.keys() {
            let global = stats.people.entry(recipient.clone()).or_default();
            let weekly = week.entry(recipient.clone()).or_default();
            if let Some(latency) = msg.read_latency_minutes(recipient) {
                global.record_read(latency);
                weekly.record_read(latency);
            }
        }
    }

    for person in stats.people.values_mut() {
        person.finalize();
    }
    for person in stats.weekly.values_mut().flat_map(BTreeMap::values_mut) {
        person.finalize();
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ReadTime;
    use crate::metrics::MessageMetrics;
    use chrono::TimeZone;

    fn at(month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, hour, min, 0).unwrap()
    }

    fn with_metrics(msg: Message, words: usize, sentiment: f64, tone: f64) -> Message {
        Message {
            metrics: MessageMetrics {
                word_count: words,
                sentiment,
                sentiment_natural: sentiment / 2.0,
                tone,
                ..MessageMetrics::default()
            },
            ..msg
        }
    }

    #[test]
    fn test_week_label_boundaries() {
        // Sunday starts a week, Saturday ends it
        assert_eq!(week_label(at(1, 14, 0, 0)), "2024-01-14 to 2024-01-20");
        assert_eq!(week_label(at(1, 20, 23, 59)), "2024-01-14 to 2024-01-20");
        assert_eq!(week_label(at(1, 21, 0, 0)), "2024-01-21 to 2024-01-27");
        // Year crossing
        assert_eq!(week_label(at(1, 1, 8, 0)), "2023-12-31 to 2024-01-06");
    }

    #[test]
    fn test_sender_totals_and_averages() {
        let messages = vec![
            with_metrics(Message::new("Alice", "a").with_sent_date(at(1, 15, 9, 0)), 10, 4.0, 0.5),
            with_metrics(Message::new("Alice", "b").with_sent_date(at(1, 16, 9, 0)), 20, -2.0, -0.1),
        ];
        let stats = aggregate(&messages);
        let alice = &stats.people["Alice"];

        assert_eq!(alice.messages_sent, 2);
        assert_eq!(alice.total_words, 30);
        assert!((alice.avg_sentiment - 1.0).abs() < 1e-9);
        assert!((alice.avg_sentiment_natural - 0.5).abs() < 1e-9);
        assert!((alice.tone - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_read_latency_accumulates_for_recipient() {
        let messages = vec![
            Message::new("Alice", "a")
                .with_sent_date(at(1, 15, 9, 0))
                .with_recipient("Bob", ReadTime::Viewed(at(1, 15, 9, 10)))
                .with_recipient("Carol", ReadTime::Never),
            Message::new("Alice", "b")
                .with_sent_date(at(1, 15, 10, 0))
                .with_recipient("Bob", ReadTime::Viewed(at(1, 15, 10, 30))),
        ];
        let stats = aggregate(&messages);

        let bob = &stats.people["Bob"];
        assert_eq!(bob.messages_read, 2);
        assert!((bob.total_read_time - 40.0).abs() < 1e-9);
        assert!((bob.average_read_time - 20.0).abs() < 1e-9);

        let carol = &stats.people["Carol"];
        assert_eq!(carol.messages_read, 0);
        assert_eq!(carol.average_read_time, 0.0);
    }

    #[test]
    fn test_negative_latency_dropped() {
        let messages = vec![
            Message::new("Alice", "a")
                .with_sent_date(at(1, 15, 9, 0))
                .with_recipient("Bob", ReadTime::Viewed(at(1, 15, 8, 0))),
        ];
        let stats = aggregate(&messages);
        assert_eq!(stats.people["Bob"].messages_read, 0);
        assert_eq!(stats.people["Bob"].total_read_time, 0.0);
    }

    #[test]
    fn test_undated_and_placeholders_skipped() {
        let messages = vec![
            Message::new("Alice", "no date").with_recipient("Bob", ReadTime::Never),
            Message::placeholder("banner"),
        ];
        let stats = aggregate(&messages);
        assert!(stats.people.is_empty());
        assert!(stats.weekly.is_empty());
    }

    #[test]
    fn test_weekly_buckets_sum_to_global() {
        let messages: Vec<Message> = [(1, 8), (1, 9), (1, 15), (1, 29), (2, 2)]
            .iter()
            .map(|&(m, d)| Message::new("Alice", "x").with_sent_date(at(m, d, 12, 0)))
            .collect();
        let stats = aggregate(&messages);

        let weekly_total: usize = stats
            .weekly
            .values()
            .filter_map(|week| week.get("Alice"))
            .map(|p| p.messages_sent)
            .sum();
        assert_eq!(weekly_total, stats.people["Alice"].messages_sent);
        assert_eq!(stats.weekly.len(), 3);
    }

    #[test]
    fn test_finalize_guards_non_finite() {
        let mut person = PersonStats {
            messages_sent: 1,
            sentiment_sum: f64::NAN,
            tone_sum: 7.0,
            ..PersonStats::default()
        };
        person.finalize();
        assert_eq!(person.avg_sentiment, 0.0);
        assert_eq!(person.tone, 1.0);
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let json = serde_json::to_value(PersonStats::default()).unwrap();
        for key in ["messagesSent", "messagesRead", "totalReadTime", "averageReadTime", "avgSentimentNatural"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
