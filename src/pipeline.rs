//! End-to-end analysis: parse, score, thread, aggregate.
//!
//! Each stage builds new records instead of annotating old ones:
//! [`Message`] → [`Message::scored`] → [`ThreadedMessage`] → [`Analysis`].
//!
//! # Example
//!
//! ```
//! use commpack::config::{ParserConfig, ThreadConfig};
//! use commpack::metrics::Scorer;
//! use commpack::pipeline::{analyze, process_messages};
//!
//! let text = "Message 1 of 1\n\
//!             Sent: 01/15/2024 at 09:30 AM\n\
//!             From: Alice\n\
//!             To: Bob (First Viewed: 01/15/2024 at 09:45 AM)\n\
//!             Subject: Pickup\n\
//!             Thanks for the update.";
//!
//! let scorer = Scorer::new();
//! let messages = process_messages(text, &scorer, &ParserConfig::default());
//! let analysis = analyze(messages, &ThreadConfig::default());
//!
//! assert_eq!(analysis.threads.len(), 1);
//! assert_eq!(analysis.people["Bob"].average_read_time, 15.0);
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::Message;
use crate::config::{ParserConfig, ThreadConfig};
use crate::core::stats::{PersonStats, Statistics, aggregate};
use crate::core::threads::{ThreadSummary, summarize_threads};
use crate::error::Result;
use crate::metrics::Scorer;
use crate::parser::Parser;
use crate::parsers::ReportParser;
use crate::threading::{ThreadedMessage, assign_threads};

/// Everything computed for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// All messages in source order, with thread membership.
    pub messages: Vec<ThreadedMessage>,
    /// Person to global statistics.
    pub people: BTreeMap<String, PersonStats>,
    /// Week label to person to statistics.
    pub weekly: BTreeMap<String, BTreeMap<String, PersonStats>>,
    /// One summary per thread, by thread id.
    pub threads: Vec<ThreadSummary>,
    /// Blocks that matched a boundary but carried no field labels.
    pub non_message_count: usize,
}

impl Analysis {
    /// Number of real messages (placeholders excluded).
    pub fn message_count(&self) -> usize {
        self.messages.len() - self.non_message_count
    }

    /// Number of real messages without a send date.
    pub fn undated_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|tm| tm.message.is_message() && tm.message.sent_date.is_none())
            .count()
    }
}

/// Parses a message report and scores every message.
///
/// Never fails: damaged blocks become placeholders or carry sentinels.
pub fn process_messages(text: &str, scorer: &Scorer, config: &ParserConfig) -> Vec<Message> {
    ReportParser::with_config(config.clone())
        .parse_blocks(text)
        .into_iter()
        .map(|m| m.scored(scorer))
        .collect()
}

/// Parses export text with any parser and scores every message.
///
/// # Errors
///
/// Returns whatever the parser returns.
pub fn parse_and_score(parser: &dyn Parser, text: &str, scorer: &Scorer) -> Result<Vec<Message>> {
    Ok(parser
        .parse_str(text)?
        .into_iter()
        .map(|m| m.scored(scorer))
        .collect())
}

/// Threads and aggregates scored messages.
pub fn analyze(messages: Vec<Message>, config: &ThreadConfig) -> Analysis {
    let non_message_count = messages.iter().filter(|m| !m.is_message()).count();
    let messages = assign_threads(messages, config);
    let Statistics { people, weekly } = aggregate(messages.iter().map(|tm| &tm.message));
    let threads = summarize_threads(&messages);

    log::info!(
        "analyzed {} messages: {} people, {} weeks, {} threads, {} placeholders",
        messages.len() - non_message_count,
        people.len(),
        weekly.len(),
        threads.len(),
        non_message_count
    );

    Analysis {
        messages,
        people,
        weekly,
        threads,
        non_message_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::InstantParser;

    const REPORT: &str = "\
Message 1 of 3
Sent: 03/04/2024 at 08:00 AM
From: Alice
To: Bob (First Viewed: 03/04/2024 at 08:20 AM)
Subject: Soccer
Practice moved to Thursday. Thanks!
Message 2 of 3
Message Report
Page 2 of 3
Message 3 of 3
Sent: 03/04/2024 at 09:00 AM
From: Bob
To: Alice (First Viewed: Never)
Subject: RE: Soccer
Great, I will drive.
";

    #[test]
    fn test_analyze_report() {
        let scorer = Scorer::new();
        let messages = process_messages(REPORT, &scorer, &ParserConfig::default());
        assert_eq!(messages.len(), 3);

        let analysis = analyze(messages, &ThreadConfig::default());
        assert_eq!(analysis.non_message_count, 1);
        assert_eq!(analysis.message_count(), 2);
        assert_eq!(analysis.undated_count(), 0);
        assert_eq!(analysis.threads.len(), 1);
        assert_eq!(analysis.threads[0].message_count, 2);
        assert_eq!(analysis.people["Alice"].messages_sent, 1);
        assert_eq!(analysis.people["Bob"].messages_read, 1);
        assert!((analysis.people["Bob"].average_read_time - 20.0).abs() < 1e-9);
        assert!(analysis.messages[2].message.metrics.sentiment > 0.0);
    }

    #[test]
    fn test_parse_and_score_instant() {
        let scorer = Scorer::new();
        let text = "[2024-03-04 08:00] Alice: thanks so much\n[2024-03-04 08:05] Bob: no problem";
        let messages = parse_and_score(&InstantParser::new(), text, &scorer).unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].metrics.sentiment > 0.0);

        let analysis = analyze(messages, &ThreadConfig::default());
        // Subjectless messages on the same day between the same people share a thread
        assert_eq!(analysis.threads.len(), 1);
    }

    #[test]
    fn test_analysis_json_shape() {
        let scorer = Scorer::new();
        let analysis = analyze(
            process_messages(REPORT, &scorer, &ParserConfig::default()),
            &ThreadConfig::default(),
        );
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["nonMessageCount"], 1);
        assert!(json["weekly"]["2024-03-03 to 2024-03-09"]["Alice"].is_object());
        assert_eq!(json["messages"][1]["nonMessage"], true);
        assert_eq!(json["messages"][2]["recipientReadTimes"]["Alice"], "Never");
    }

    #[test]
    fn test_empty_input() {
        let analysis = analyze(
            process_messages("", &Scorer::new(), &ParserConfig::default()),
            &ThreadConfig::default(),
        );
        assert!(analysis.messages.is_empty());
        assert!(analysis.people.is_empty());
        assert_eq!(analysis.message_count(), 0);
    }
}
