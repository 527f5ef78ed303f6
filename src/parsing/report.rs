//! Message report segmentation and field extraction.
//!
//! A message report is a long text dump where each message starts with a
//! standalone `Message <n> of <m>` line. Inside a block the four labels
//! `Sent`, `From`, `To` and `Subject` appear either above the body
//! ([`Layout::Head`]) or below it ([`Layout::Tail`]), interleaved with page
//! footers and report banners.
//!
//! Extraction works in three steps:
//!
//! 1. classify every line ([`LineKind`])
//! 2. group label lines into metadata clusters and pick the cluster with the
//!    most distinct labels, preferring the later one on ties
//! 3. classify the layout from the content on either side of that cluster
//!    and take the body from the complementary region
//!
//! # Example
//!
//! ```
//! use commpack::parsing::report::{Layout, extract_fields, split_blocks};
//!
//! let text = "Message 1 of 1\n\
//!             Sent: 01/15/2024 at 09:30 AM\n\
//!             From: Alice\n\
//!             To: Bob (First Viewed: Never)\n\
//!             Subject: Pickup\n\
//!             See you at five.";
//!
//! let blocks = split_blocks(text);
//! assert_eq!(blocks.len(), 1);
//!
//! let fields = extract_fields(&blocks[0].lines, &[]).unwrap();
//! assert_eq!(fields.layout, Layout::Head);
//! assert_eq!(fields.from.as_deref(), Some("Alice"));
//! assert_eq!(fields.body, "See you at five.");
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::normalize_line;

static BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Message\s+(\d+)\s+of\s+(\d+)$").unwrap());

static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(sent|from|to|subject)\s*:\s*(.*)$").unwrap());

static RECIPIENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s*\(\s*first\s+viewed\s*:\s*(.*?)\s*\)$").unwrap()
});

static PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^page\s+\d+\s+of\s+\d+$").unwrap());

/// One segment of a message report, between two boundary lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// `n` from the boundary line.
    pub index: usize,
    /// `m` from the boundary line.
    pub total: usize,
    /// Normalized lines following the boundary.
    pub lines: Vec<String>,
}

/// Metadata position relative to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Labels first, body after.
    Head,
    /// Body first, labels after.
    Tail,
}

/// Field label recognized inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Sent,
    From,
    To,
    Subject,
}

impl Label {
    fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sent" => Some(Label::Sent),
            "from" => Some(Label::From),
            "to" => Some(Label::To),
            "subject" => Some(Label::Subject),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            Label::Sent => 0,
            Label::From => 1,
            Label::To => 2,
            Label::Subject => 3,
        }
    }
}

/// Classification of a normalized line inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// Page footer or report banner.
    Noise,
    /// `Label: inline value` (value may be empty).
    Label(Label, String),
    /// `Name (First Viewed: value)`.
    Recipient(String, String),
    Content,
}

/// Raw recipient entry: display name and the unparsed first-viewed value.
///
/// A recipient listed without a first-viewed marker has `viewed == None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecipient {
    pub name: String,
    pub viewed: Option<String>,
}

/// Fields recovered from one block, values still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFields {
    pub layout: Layout,
    pub sent: Option<String>,
    pub from: Option<String>,
    pub to: Vec<RawRecipient>,
    pub subject: Option<String>,
    pub body: String,
}

/// Returns `true` for a line that is exactly `Message <n> of <m>`.
///
/// Surrounding whitespace is tolerated, anything else on the line is not.
pub fn is_boundary(line: &str) -> bool {
    BOUNDARY.is_match(&normalize_line(line))
}

/// Splits report text into blocks on standalone boundary lines.
///
/// Text before the first boundary is discarded. Block order follows the
/// source.
pub fn split_blocks(text: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();

    for raw in text.lines() {
        let line = normalize_line(raw);
        if let Some(caps) = BOUNDARY.captures(&line) {
            blocks.push(Block {
                index: caps[1].parse().unwrap_or(0),
                total: caps[2].parse().unwrap_or(0),
                lines: Vec::new(),
            });
        } else if let Some(current) = blocks.last_mut() {
            current.lines.push(line);
        }
    }

    blocks
}

/// Classifies one normalized line.
pub fn classify_line(line: &str, banner_fragments: &[String]) -> LineKind {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if is_noise(line, banner_fragments) {
        return LineKind::Noise;
    }
    if let Some(caps) = LABEL.captures(line) {
        if let Some(label) = Label::parse(&caps[1]) {
            return LineKind::Label(label, caps[2].trim().to_string());
        }
    }
    if let Some(caps) = RECIPIENT.captures(line) {
        return LineKind::Recipient(caps[1].trim().to_string(), caps[2].trim().to_string());
    }
    LineKind::Content
}

/// Returns `true` for page footers and lines containing a banner fragment.
pub fn is_noise(line: &str, banner_fragments: &[String]) -> bool {
    if PAGE.is_match(line) {
        return true;
    }
    let lower = line.to_lowercase();
    banner_fragments
        .iter()
        .filter(|fragment| !fragment.is_empty())
        .any(|fragment| lower.contains(&fragment.to_lowercase()))
}

/// A label occurrence and the lines its value spans.
#[derive(Debug, Clone)]
struct Occurrence {
    label: Label,
    line: usize,
    end: usize,
    value: Option<String>,
    recipients: Vec<RawRecipient>,
}

/// Extracts labelled fields and the body from a block.
///
/// Returns `None` when the block contains no label at all, which marks it as
/// a non-message placeholder.
pub fn extract_fields(lines: &[String], banner_fragments: &[String]) -> Option<BlockFields> {
    let kinds: Vec<LineKind> = lines
        .iter()
        .map(|line| classify_line(line, banner_fragments))
        .collect();

    let occurrences: Vec<Occurrence> = kinds
        .iter()
        .enumerate()
        .filter_map(|(idx, kind)| match kind {
            LineKind::Label(label, inline) => Some(read_occurrence(&kinds, lines, idx, *label, inline)),
            _ => None,
        })
        .collect();

    if occurrences.is_empty() {
        return None;
    }

    let cluster = pick_cluster(&kinds, &occurrences);
    let start = cluster.first().map_or(0, |occ| occ.line);
    let end = cluster.iter().map(|occ| occ.end).max().unwrap_or(start);

    // Last occurrence of each label inside the chosen cluster wins.
    let mut latest: [Option<&Occurrence>; 4] = [None; 4];
    for occ in cluster.iter().rev() {
        latest[occ.label.slot()].get_or_insert(occ);
    }

    let before = count_content(&kinds[..start]);
    let after = count_content(&kinds[end + 1..]);
    let layout = if before == 0 {
        Layout::Head
    } else if after == 0 || before > after {
        Layout::Tail
    } else {
        Layout::Head
    };

    let body_range = match layout {
        Layout::Head => end + 1..lines.len(),
        Layout::Tail => 0..start,
    };
    let body = join_body(&lines[body_range.clone()], &kinds[body_range]);

    log::debug!(
        "block layout {:?}: {} labels, {} content lines before, {} after",
        layout,
        cluster.len(),
        before,
        after
    );
    let dropped = match layout {
        Layout::Head => before,
        Layout::Tail => after,
    };
    if dropped > 0 {
        log::debug!(
            "{:?} layout left {} content lines outside the body: {:?}",
            layout,
            dropped,
            match layout {
                Layout::Head => &lines[..start],
                Layout::Tail => &lines[end + 1..],
            }
        );
    }

    let value_of = |label: Label| latest[label.slot()].and_then(|occ| occ.value.clone());

    Some(BlockFields {
        layout,
        sent: value_of(Label::Sent),
        from: value_of(Label::From),
        to: latest[Label::To.slot()]
            .map(|occ| occ.recipients.clone())
            .unwrap_or_default(),
        subject: value_of(Label::Subject),
        body,
    })
}

/// Reads the value of the label at `idx` and how far it extends.
fn read_occurrence(
    kinds: &[LineKind],
    lines: &[String],
    idx: usize,
    label: Label,
    inline: &str,
) -> Occurrence {
    let mut end = idx;
    let mut value = (!inline.is_empty()).then(|| inline.to_string());
    let mut recipients = Vec::new();

    if label == Label::To {
        if let Some(v) = &value {
            recipients.push(raw_recipient(v));
        }
    }

    if value.is_none() {
        if let Some(next) = next_significant(kinds, idx + 1) {
            match &kinds[next] {
                LineKind::Content => {
                    value = Some(lines[next].clone());
                    end = next;
                    if label == Label::To {
                        recipients.push(raw_recipient(&lines[next]));
                    }
                }
                LineKind::Recipient(name, viewed) => {
                    value = Some(lines[next].clone());
                    if label == Label::To {
                        recipients.push(RawRecipient {
                            name: name.clone(),
                            viewed: Some(viewed.clone()),
                        });
                    }
                    end = next;
                }
                _ => {}
            }
        }
    }

    if label == Label::To {
        while let Some(next) = next_significant(kinds, end + 1) {
            let LineKind::Recipient(name, viewed) = &kinds[next] else {
                break;
            };
            recipients.push(RawRecipient {
                name: name.clone(),
                viewed: Some(viewed.clone()),
            });
            end = next;
        }
    }

    Occurrence {
        label,
        line: idx,
        end,
        value,
        recipients,
    }
}

fn raw_recipient(value: &str) -> RawRecipient {
    match RECIPIENT.captures(value) {
        Some(caps) => RawRecipient {
            name: caps[1].trim().to_string(),
            viewed: Some(caps[2].trim().to_string()),
        },
        None => RawRecipient {
            name: value.trim().to_string(),
            viewed: None,
        },
    }
}

/// Index of the next line at or after `from` that is neither blank nor noise.
fn next_significant(kinds: &[LineKind], from: usize) -> Option<usize> {
    (from..kinds.len()).find(|&i| !matches!(kinds[i], LineKind::Blank | LineKind::Noise))
}

/// Groups occurrences into clusters separated only by blank or noise lines
/// and returns the cluster with the most distinct labels, later on ties.
fn pick_cluster<'a>(kinds: &[LineKind], occurrences: &'a [Occurrence]) -> &'a [Occurrence] {
    let mut clusters: Vec<&[Occurrence]> = Vec::new();
    let mut start = 0;

    for i in 1..occurrences.len() {
        let prev_end = occurrences[..i].iter().map(|o| o.end).max().unwrap_or(0);
        let next = occurrences[i].line;
        let adjacent = next <= prev_end + 1
            || kinds[prev_end + 1..next]
                .iter()
                .all(|k| matches!(k, LineKind::Blank | LineKind::Noise));
        if !adjacent {
            clusters.push(&occurrences[start..i]);
            start = i;
        }
    }
    clusters.push(&occurrences[start..]);

    let mut best = clusters[0];
    let mut best_distinct = 0;
    for cluster in clusters {
        let distinct = distinct_labels(cluster);
        if distinct >= best_distinct {
            best = cluster;
            best_distinct = distinct;
        }
    }
    best
}

fn distinct_labels(cluster: &[Occurrence]) -> usize {
    let mut seen = [false; 4];
    for occ in cluster {
        seen[occ.label.slot()] = true;
    }
    seen.iter().filter(|s| **s).count()
}

fn count_content(kinds: &[LineKind]) -> usize {
    kinds
        .iter()
        .filter(|k| matches!(k, LineKind::Content | LineKind::Recipient(..)))
        .count()
}

/// Joins body lines, dropping labels and noise and trimming blank edges.
fn join_body(lines: &[String], kinds: &[LineKind]) -> String {
    let kept: Vec<&str> = lines
        .iter()
        .zip(kinds)
        .filter(|(_, kind)| !matches!(kind, LineKind::Noise | LineKind::Label(..)))
        .map(|(line, _)| line.as_str())
        .collect();

    let first = kept.iter().position(|l| !l.is_empty());
    let last = kept.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => kept[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// Body text of a block with no labels: content lines only.
pub fn placeholder_body(lines: &[String], banner_fragments: &[String]) -> String {
    let kinds: Vec<LineKind> = lines
        .iter()
        .map(|line| classify_line(line, banner_fragments))
        .collect();
    join_body(lines, &kinds)
}
