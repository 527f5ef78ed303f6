//! JSON output writer.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;

use serde::Serialize;

use crate::config::RenderConfig;
use crate::core::stats::PersonStats;
use crate::core::threads::ThreadSummary;
use crate::error::CommpackError;
use crate::pipeline::Analysis;
use crate::threading::ThreadedMessage;

/// Borrowed view of an [`Analysis`] with excluded people removed from the
/// person maps.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonAnalysis<'a> {
    messages: &'a [ThreadedMessage],
    people: BTreeMap<&'a str, &'a PersonStats>,
    weekly: BTreeMap<&'a str, BTreeMap<&'a str, &'a PersonStats>>,
    threads: &'a [ThreadSummary],
    non_message_count: usize,
}

impl<'a> JsonAnalysis<'a> {
    fn new(analysis: &'a Analysis, config: &RenderConfig) -> Self {
        let keep = |people: &'a BTreeMap<String, PersonStats>| {
            people
                .iter()
                .filter(|(name, _)| !config.is_excluded(name))
                .map(|(name, stats)| (name.as_str(), stats))
                .collect::<BTreeMap<_, _>>()
        };

        Self {
            messages: &analysis.messages,
            people: keep(&analysis.people),
            weekly: analysis
                .weekly
                .iter()
                .map(|(week, people)| (week.as_str(), keep(people)))
                .collect(),
            threads: &analysis.threads,
            non_message_count: analysis.non_message_count,
        }
    }
}

/// Writes the analysis as pretty-printed JSON.
///
/// # Format
/// ```json
/// {
///   "messages": [{"sentDate": "2024-01-15T09:00:00Z", "sender": "Alice", ...}],
///   "people": {"Alice": {"messagesSent": 1, ...}},
///   "weekly": {"2024-01-14 to 2024-01-20": {"Alice": {...}}},
///   "threads": [{"threadId": 0, ...}],
///   "nonMessageCount": 0
/// }
/// ```
pub fn write_json(
    analysis: &Analysis,
    output_path: &str,
    config: &RenderConfig,
) -> Result<(), CommpackError> {
    let json = to_json(analysis, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Same as [`write_json`], returned as a string.
pub fn to_json(analysis: &Analysis, config: &RenderConfig) -> Result<String, CommpackError> {
    Ok(serde_json::to_string_pretty(&JsonAnalysis::new(analysis, config))?)
}
