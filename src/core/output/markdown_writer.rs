//! Markdown report writer.
//!
//! Layout:
//!
//! 1. `## People`: one summary table
//! 2. `## Weekly Activity`: one table per week
//! 3. `## Threads`: one tree per thread
//! 4. `## Messages`: one section per real message

use std::fmt::Write as _;
use std::fs;

use chrono::{DateTime, Utc};

use crate::config::RenderConfig;
use crate::core::stats::PersonStats;
use crate::error::CommpackError;
use crate::pipeline::Analysis;

const PREVIEW_CHARS: usize = 60;

/// Writes the analysis as a Markdown report.
pub fn write_markdown(
    analysis: &Analysis,
    output_path: &str,
    config: &RenderConfig,
) -> Result<(), CommpackError> {
    fs::write(output_path, to_markdown(analysis, config))?;
    Ok(())
}

/// Renders the analysis as Markdown.
///
/// People matching [`RenderConfig::exclude_names`] are left out of the
/// tables; threads and messages are rendered in full.
pub fn to_markdown(analysis: &Analysis, config: &RenderConfig) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Communication Report\n");
    let _ = writeln!(
        out,
        "{} messages, {} threads, {} people",
        analysis.message_count(),
        analysis.threads.len(),
        analysis.people.len()
    );
    if analysis.non_message_count > 0 {
        let _ = writeln!(out, "\n_{} report blocks had no message fields._", analysis.non_message_count);
    }

    let _ = writeln!(out, "\n## People\n");
    person_table(&mut out, analysis.people.iter(), config);

    let _ = writeln!(out, "\n## Weekly Activity");
    for (week, people) in &analysis.weekly {
        let _ = writeln!(out, "\n### {week}\n");
        person_table(&mut out, people.iter(), config);
    }

    let _ = writeln!(out, "\n## Threads");
    render_threads(&mut out, analysis);

    let _ = writeln!(out, "\n## Messages");
    render_messages(&mut out, analysis);

    out
}

fn person_table<'a>(
    out: &mut String,
    people: impl Iterator<Item = (&'a String, &'a PersonStats)>,
    config: &RenderConfig,
) {
    let _ = writeln!(
        out,
        "| Person | Sent | Read | Avg read (min) | Words | Avg sentiment | Avg sentiment (stemmed) | Tone |"
    );
    let _ = writeln!(out, "|---|---:|---:|---:|---:|---:|---:|---:|");
    for (name, stats) in people.filter(|(name, _)| !config.is_excluded(name)) {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {:.1} | {} | {:.2} | {:.2} | {:.2} |",
            cell(name),
            stats.messages_sent,
            stats.messages_read,
            stats.average_read_time,
            stats.total_words,
            stats.avg_sentiment,
            stats.avg_sentiment_natural,
            stats.tone
        );
    }
}

fn render_threads(out: &mut String, analysis: &Analysis) {
    for thread in &analysis.threads {
        let _ = writeln!(
            out,
            "\n### Thread {}: {}\n\n{} messages over {:.1} days, tone {:.2}\n",
            thread.thread_id,
            thread.subject,
            thread.message_count,
            thread.span_days,
            thread.avg_tone
        );

        let mut members: Vec<_> = analysis
            .messages
            .iter()
            .filter_map(|tm| {
                let t = tm.thread.as_ref()?;
                (t.thread_id == thread.thread_id).then_some((t.thread_index, &tm.message))
            })
            .collect();
        members.sort_by_key(|(index, _)| *index);

        let _ = writeln!(out, "```text");
        let _ = writeln!(out, "{}", thread.subject);
        let last = members.len().saturating_sub(1);
        for (pos, (_, msg)) in members.iter().enumerate() {
            let branch = if pos == last { "└──" } else { "├──" };
            let _ = writeln!(
                out,
                "{} {} {}: {}",
                branch,
                short_time(msg.sent_date),
                msg.sender,
                preview(&msg.body)
            );
        }
        let _ = writeln!(out, "```");
    }
}

fn render_messages(out: &mut String, analysis: &Analysis) {
    for (number, tm) in analysis
        .messages
        .iter()
        .filter(|tm| tm.message.is_message())
        .enumerate()
    {
        let msg = &tm.message;
        let _ = writeln!(out, "\n### {}. {}\n", number + 1, msg.subject);
        let _ = writeln!(out, "- **From:** {}", msg.sender);
        let _ = writeln!(out, "- **Sent:** {}", short_time(msg.sent_date));
        if !msg.recipient_read_times.is_empty() {
            let to: Vec<String> = msg
                .recipient_read_times
                .iter()
                .map(|(name, read)| format!("{name} (first viewed: {read})"))
                .collect();
            let _ = writeln!(out, "- **To:** {}", to.join(", "));
        }
        if let Some(thread) = &tm.thread {
            let _ = writeln!(out, "- **Thread:** {} (#{})", thread.thread_id, thread.thread_index + 1);
        }
        let _ = writeln!(
            out,
            "- **Words:** {} · **Sentiment:** {:.1} / {:.1} · **Tone:** {:.2}",
            msg.metrics.word_count, msg.metrics.sentiment, msg.metrics.sentiment_natural, msg.metrics.tone
        );
        let _ = writeln!(out);
        for line in msg.body.lines() {
            let _ = writeln!(out, "> {line}");
        }
    }
}

fn short_time(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(|| "undated".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

fn preview(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}…")
    } else {
        flat
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}
