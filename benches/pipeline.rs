//! Benchmarks for commpack parsing, threading and aggregation.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench pipeline -- threading`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use commpack::config::{ParserConfig, RenderConfig, ThreadConfig};
use commpack::core::output::{to_json, to_weekly_csv};
use commpack::core::{FilterConfig, aggregate, apply_filters};
use commpack::metrics::Scorer;
use commpack::parser::Parser;
use commpack::parsers::{InstantParser, ReportParser};
use commpack::pipeline::{analyze, process_messages};
use commpack::threading::assign_threads;
use commpack::{Message, ReadTime};

use chrono::{Duration, TimeZone, Utc};

// =============================================================================
// Test Data Generators
// =============================================================================

const SUBJECTS: [&str; 4] = ["Pickup", "Re: Pickup", "Dentist", "RE: Summer plans"];

fn generate_report(count: usize) -> String {
    let mut out = String::with_capacity(count * 200);
    for i in 0..count {
        let (sender, recipient) = if i % 2 == 0 { ("Alice", "Bob") } else { ("Bob", "Alice") };
        let day = 1 + (i / 20) % 28;
        let hour = 1 + i % 12;
        let header = format!(
            "Sent: 01/{day:02}/2024 at {hour:02}:15 PM\nFrom: {sender}\n\
             To: {recipient} (First Viewed: 01/{day:02}/2024 at {hour:02}:45 PM)\n\
             Subject: {}",
            SUBJECTS[i % SUBJECTS.len()]
        );
        let body = format!("Thanks, message number {i} works great for me.");

        out.push_str(&format!("Message {} of {}\n", i + 1, count));
        if i % 3 == 0 {
            out.push_str(&format!("{body}\n{header}\n"));
        } else {
            out.push_str(&format!("{header}\n{body}\n"));
        }
        if i % 10 == 9 {
            out.push_str("Page 1 of 1\nOurFamilyWizard Message Report\n");
        }
    }
    out
}

fn generate_instant(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        lines.push(format!(
            "[2024-01-{:02} {:02}:{:02}] {}: Message number {}",
            1 + (i / 100) % 28,
            i % 24,
            i % 60,
            sender,
            i
        ));
    }
    lines.join("\n")
}

fn generate_messages(count: usize) -> Vec<Message> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let scorer = Scorer::new();
    (0..count)
        .map(|i| {
            let (sender, recipient) = if i % 2 == 0 { ("Alice", "Bob") } else { ("Bob", "Alice") };
            let sent = base + Duration::hours(i as i64 * 3);
            Message::new(sender, format!("Message {i}, thank you"))
                .with_subject(SUBJECTS[i % SUBJECTS.len()])
                .with_sent_date(sent)
                .with_recipient(recipient, ReadTime::Viewed(sent + Duration::minutes(20)))
                .scored(&scorer)
        })
        .collect()
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_report_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_parsing");
    let parser = ReportParser::new();

    for size in [100_usize, 1_000, 10_000] {
        let text = generate_report(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(parser.parse_blocks(black_box(text))));
        });
    }
    group.finish();
}

fn bench_instant_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("instant_parsing");
    let parser = InstantParser::new();

    for size in [100_usize, 1_000, 10_000] {
        let text = generate_instant(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let messages = parser.parse_str(black_box(text)).unwrap();
                black_box(messages)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Scoring and Processing Benchmarks
// =============================================================================

fn bench_scoring(c: &mut Criterion) {
    let scorer = Scorer::new();
    let body = "Thanks for picking them up, but I'm disappointed you were late again. \
                Please let me know next time.";
    c.bench_function("score_message", |b| b.iter(|| black_box(scorer.score(black_box(body)))));
}

fn bench_threading(c: &mut Criterion) {
    let mut group = c.benchmark_group("threading");
    let config = ThreadConfig::default();

    for size in [100_usize, 1_000, 10_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, messages| {
            b.iter(|| black_box(assign_threads(black_box(messages.clone()), &config)));
        });
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [100_usize, 1_000, 10_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, messages| {
            b.iter(|| black_box(aggregate(black_box(messages))));
        });
    }
    group.finish();
}

fn bench_filter_by_date(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_date");

    for size in [1_000_usize, 10_000] {
        let messages = generate_messages(size);
        let config = FilterConfig::new().with_date_from("2024-02-01").unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, messages| {
            b.iter(|| black_box(apply_filters(black_box(messages.clone()), &config)));
        });
    }
    group.finish();
}

// =============================================================================
// End-to-End Pipeline Benchmark
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let scorer = Scorer::new();
    let parser_config = ParserConfig::default();
    let thread_config = ThreadConfig::default();
    let render_config = RenderConfig::new();

    for size in [1_000_usize, 10_000] {
        let text = generate_report(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                // parse -> score -> thread -> aggregate -> render
                let messages = process_messages(black_box(text), &scorer, &parser_config);
                let analysis = analyze(messages, &thread_config);
                let csv = to_weekly_csv(&analysis, &render_config).unwrap();
                let json = to_json(&analysis, &render_config).unwrap();
                black_box((csv, json))
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_report_parsing,
    bench_instant_parsing,
    bench_scoring,
    bench_threading,
    bench_aggregate,
    bench_filter_by_date,
    bench_full_pipeline,
);

criterion_main!(benches);
