//! Per-thread rollups.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::finite_or_zero;
use crate::threading::ThreadedMessage;

/// Summary of one thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary {
    pub thread_id: u32,
    pub thread_key: String,
    /// Most frequent literal subject, ties broken by first appearance.
    pub subject: String,
    pub message_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_sent: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sent: Option<DateTime<Utc>>,
    /// `last_sent - first_sent` in fractional days (0 with fewer than two
    /// dated messages).
    pub span_days: f64,
    /// Union of all senders and recipients, sorted.
    pub participants: Vec<String>,
    pub total_words: usize,
    pub avg_sentiment: f64,
    pub avg_sentiment_natural: f64,
    pub avg_tone: f64,
}

#[derive(Default)]
struct Accumulator<'a> {
    thread_key: &'a str,
    /// Literal subject and count, in first-seen order.
    subjects: Vec<(&'a str, usize)>,
    members: Vec<&'a ThreadedMessage>,
    participants: BTreeSet<&'a str>,
}

/// Builds one summary per thread, sorted by thread id.
///
/// Members are visited in thread order, so the subject tie-break follows the
/// conversation rather than the input order.
pub fn summarize_threads(messages: &[ThreadedMessage]) -> Vec<ThreadSummary> {
    let mut threads: BTreeMap<u32, Accumulator<'_>> = BTreeMap::new();

    for tm in messages {
        if let Some(thread) = &tm.thread {
            let acc = threads.entry(thread.thread_id).or_default();
            acc.thread_key = &thread.thread_key;
            acc.members.push(tm);
        }
    }

    threads
        .into_iter()
        .map(|(thread_id, mut acc)| {
            acc.members
                .sort_by_key(|tm| tm.thread.as_ref().map_or(0, |t| t.thread_index));

            for &tm in &acc.members {
                let msg = &tm.message;
                match acc.subjects.iter_mut().find(|(s, _)| *s == msg.subject) {
                    Some((_, count)) => *count += 1,
                    None => acc.subjects.push((&msg.subject, 1)),
                }
                acc.participants.extend(msg.participants());
            }

            summarize(thread_id, &acc)
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn summarize(thread_id: u32, acc: &Accumulator<'_>) -> ThreadSummary {
    let count = acc.members.len();
    let dates = acc.members.iter().filter_map(|tm| tm.message.sent_date);
    let first_sent = dates.clone().min();
    let last_sent = dates.max();

    let span_days = match (first_sent, last_sent) {
        (Some(first), Some(last)) => finite_or_zero((last - first).num_seconds() as f64 / 86_400.0),
        _ => 0.0,
    };

    // Highest count wins; `max_by_key` keeps the last maximum, so iterate
    // in reverse to keep the first-seen one.
    let subject = acc
        .subjects
        .iter()
        .rev()
        .max_by_key(|(_, n)| *n)
        .map_or_else(String::new, |(s, _)| (*s).to_string());

    let mean = |f: fn(&ThreadedMessage) -> f64| {
        if count == 0 {
            0.0
        } else {
            finite_or_zero(acc.members.iter().map(|tm| f(tm)).sum::<f64>() / count as f64)
        }
    };

    ThreadSummary {
        thread_id,
        thread_key: acc.thread_key.to_string(),
        subject,
        message_count: count,
        first_sent,
        last_sent,
        span_days,
        participants: acc.participants.iter().map(|p| (*p).to_string()).collect(),
        total_words: acc.members.iter().map(|tm| tm.message.metrics.word_count).sum(),
        avg_sentiment: mean(|tm| tm.message.metrics.sentiment),
        avg_sentiment_natural: mean(|tm| tm.message.metrics.sentiment_natural),
        avg_tone: mean(|tm| tm.message.metrics.tone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThreadConfig;
    use crate::message::ReadTime;
    use crate::metrics::Scorer;
    use crate::threading::assign_threads;
    use crate::Message;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn conversation() -> Vec<ThreadedMessage> {
        let scorer = Scorer::new();
        let messages = vec![
            Message::new("Bob", "Sure, thanks")
                .with_subject("RE: Summer camp")
                .with_recipient("Alice", ReadTime::Never)
                .with_sent_date(at(2, 12)),
            Message::new("Alice", "Can you sign the camp form")
                .with_subject("Summer camp")
                .with_recipient("Bob", ReadTime::Never)
                .with_sent_date(at(1, 9)),
            Message::new("Alice", "Signed it")
                .with_subject("RE: Summer camp")
                .with_recipient("Bob", ReadTime::Never)
                .with_sent_date(at(3, 9)),
            Message::placeholder("banner"),
        ];
        let messages = messages.into_iter().map(|m| m.scored(&scorer)).collect();
        assign_threads(messages, &ThreadConfig::default())
    }

    #[test]
    fn test_summary_counts_and_span() {
        let summaries = summarize_threads(&conversation());
        assert_eq!(summaries.len(), 1);

        let s = &summaries[0];
        assert_eq!(s.thread_id, 0);
        assert_eq!(s.message_count, 3);
        assert_eq!(s.first_sent, Some(at(1, 9)));
        assert_eq!(s.last_sent, Some(at(3, 9)));
        assert!((s.span_days - 2.0).abs() < 1e-9);
        assert_eq!(s.participants, vec!["Alice", "Bob"]);
        assert_eq!(s.total_words, 6 + 2 + 2);
        assert_eq!(s.thread_key, "summer camp|Alice,Bob");
    }

    #[test]
    fn test_subject_is_mode_of_literal_subjects() {
        let summaries = summarize_threads(&conversation());
        assert_eq!(summaries[0].subject, "RE: Summer camp");
    }

    #[test]
    fn test_subject_tie_goes_to_first_in_thread() {
        let messages = vec![
            Message::new("Alice", "b")
                .with_subject("Re: Dentist")
                .with_sent_date(at(2, 9)),
            Message::new("Alice", "a")
                .with_subject("Dentist")
                .with_sent_date(at(1, 9)),
        ];
        let threaded = assign_threads(messages, &ThreadConfig::default());
        let summaries = summarize_threads(&threaded);
        assert_eq!(summaries[0].subject, "Dentist");
    }

    #[test]
    fn test_single_message_thread() {
        let threaded = assign_threads(
            vec![Message::new("Alice", "hello").with_subject("Note")],
            &ThreadConfig::default(),
        );
        let summaries = summarize_threads(&threaded);
        assert_eq!(summaries[0].span_days, 0.0);
        assert!(summaries[0].first_sent.is_none());
    }

    #[test]
    fn test_no_threads() {
        assert!(summarize_threads(&[]).is_empty());
    }
}
