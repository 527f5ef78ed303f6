//! CSV output writers.
//!
//! Both tables use the `;` delimiter. Timestamps are RFC 3339; averages are
//! rounded for readability.

use std::fs::File;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::RenderConfig;
use crate::error::CommpackError;
use crate::pipeline::Analysis;

const WEEKLY_HEADER: [&str; 9] = [
    "Week",
    "Person",
    "MessagesSent",
    "MessagesRead",
    "AverageReadTimeMinutes",
    "TotalWords",
    "AvgSentiment",
    "AvgSentimentNatural",
    "Tone",
];

const THREADS_HEADER: [&str; 10] = [
    "ThreadId",
    "Subject",
    "Messages",
    "FirstSent",
    "LastSent",
    "SpanDays",
    "Participants",
    "TotalWords",
    "AvgSentiment",
    "AvgTone",
];

/// Writes one row per week and person.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Week`, `Person`, `MessagesSent`, `MessagesRead`,
///   `AverageReadTimeMinutes`, `TotalWords`, `AvgSentiment`,
///   `AvgSentimentNatural`, `Tone`
/// - Weeks in chronological order, people alphabetical within a week
/// - People matching [`RenderConfig::exclude_names`] are omitted
pub fn write_weekly_csv(
    analysis: &Analysis,
    output_path: &str,
    config: &RenderConfig,
) -> Result<(), CommpackError> {
    let file = File::create(output_path)?;
    fill_weekly(csv_writer(file), analysis, config)
}

/// Same as [`write_weekly_csv`], returned as a string.
pub fn to_weekly_csv(analysis: &Analysis, config: &RenderConfig) -> Result<String, CommpackError> {
    let mut buf = Vec::new();
    fill_weekly(csv_writer(&mut buf), analysis, config)?;
    Ok(String::from_utf8(buf)?)
}

/// Writes one row per thread.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `ThreadId`, `Subject`, `Messages`, `FirstSent`, `LastSent`,
///   `SpanDays`, `Participants`, `TotalWords`, `AvgSentiment`, `AvgTone`
/// - Participants are joined with `, `
pub fn write_threads_csv(analysis: &Analysis, output_path: &str) -> Result<(), CommpackError> {
    let file = File::create(output_path)?;
    fill_threads(csv_writer(file), analysis)
}

/// Same as [`write_threads_csv`], returned as a string.
pub fn to_threads_csv(analysis: &Analysis) -> Result<String, CommpackError> {
    let mut buf = Vec::new();
    fill_threads(csv_writer(&mut buf), analysis)?;
    Ok(String::from_utf8(buf)?)
}

fn csv_writer<W: std::io::Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().delimiter(b';').from_writer(inner)
}

fn fill_weekly<W: std::io::Write>(
    mut writer: csv::Writer<W>,
    analysis: &Analysis,
    config: &RenderConfig,
) -> Result<(), CommpackError> {
    writer.write_record(WEEKLY_HEADER)?;

    for (week, people) in &analysis.weekly {
        for (person, stats) in people.iter().filter(|(p, _)| !config.is_excluded(p)) {
            writer.write_record([
                week.clone(),
                person.clone(),
                stats.messages_sent.to_string(),
                stats.messages_read.to_string(),
                format!("{:.2}", stats.average_read_time),
                stats.total_words.to_string(),
                format!("{:.3}", stats.avg_sentiment),
                format!("{:.3}", stats.avg_sentiment_natural),
                format!("{:.3}", stats.tone),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn fill_threads<W: std::io::Write>(
    mut writer: csv::Writer<W>,
    analysis: &Analysis,
) -> Result<(), CommpackError> {
    writer.write_record(THREADS_HEADER)?;

    for thread in &analysis.threads {
        writer.write_record([
            thread.thread_id.to_string(),
            thread.subject.clone(),
            thread.message_count.to_string(),
            timestamp(thread.first_sent),
            timestamp(thread.last_sent),
            format!("{:.2}", thread.span_days),
            thread.participants.join(", "),
            thread.total_words.to_string(),
            format!("{:.3}", thread.avg_sentiment),
            format!("{:.3}", thread.avg_tone),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}
