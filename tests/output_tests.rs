//! Tests for output writers (weekly CSV, thread CSV, JSON, Markdown)

use commpack::config::{ParserConfig, RenderConfig, ThreadConfig};
use commpack::core::output::{
    to_markdown, write_json, write_markdown, write_threads_csv, write_weekly_csv,
};
use commpack::format::{OutputFormat, to_format_string, write_to_format};
use commpack::metrics::Scorer;
use commpack::pipeline::{Analysis, analyze, process_messages};
use std::fs;
use tempfile::tempdir;

const REPORT: &str = "\
Message 1 of 4
Sent: 01/15/2024 at 09:00 AM
From: Alice
To: Bob (First Viewed: 01/15/2024 at 09:30 AM)
Dana Mediator (First Viewed: Never)
Subject: Weekend
Can you take them Saturday? Thanks!
Message 2 of 4
Sent: 01/15/2024 at 10:00 AM
From: Bob
To: Alice (First Viewed: 01/15/2024 at 12:00 PM)
Dana Mediator (First Viewed: Never)
Subject: Re: Weekend
Yes, happy to.
Message 3 of 4
Page 2 of 2
Message 4 of 4
Bills attached for the dentist.
Sent: 01/22/2024 at 08:00 PM
From: Alice
To: Bob (First Viewed: Never)
Subject: Dentist
";

fn sample_analysis() -> Analysis {
    let messages = process_messages(REPORT, &Scorer::new(), &ParserConfig::default());
    analyze(messages, &ThreadConfig::default())
}

// ============================================================================
// Weekly CSV Writer Tests
// ============================================================================

mod weekly_csv_tests {
    use super::*;

    #[test]
    fn test_write_weekly_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weekly.csv");

        write_weekly_csv(&sample_analysis(), path.to_str().unwrap(), &RenderConfig::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "Week;Person;MessagesSent;MessagesRead;AverageReadTimeMinutes;TotalWords;AvgSentiment;AvgSentimentNatural;Tone"
        );
        // Week 1: Alice, Bob, Dana; week 2: Alice, Bob
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("2024-01-14 to 2024-01-20;Alice;1;1;120.00;"));
        assert!(lines[2].starts_with("2024-01-14 to 2024-01-20;Bob;1;1;30.00;"));
        assert!(lines[3].starts_with("2024-01-14 to 2024-01-20;Dana Mediator;0;0;0.00;0;"));
        assert!(lines[4].starts_with("2024-01-21 to 2024-01-27;Alice;1;0;"));
    }

    #[test]
    fn test_weekly_csv_parses_back() {
        let csv = to_format_string(&sample_analysis(), OutputFormat::Csv, &RenderConfig::new()).unwrap();
        let mut reader = csv::ReaderBuilder::new().delimiter(b';').from_reader(csv.as_bytes());

        let mut sent_total = 0;
        for record in reader.records() {
            let record = record.unwrap();
            assert_eq!(record.len(), 9);
            let tone: f64 = record[8].parse().unwrap();
            assert!((-1.0..=1.0).contains(&tone));
            sent_total += record[2].parse::<usize>().unwrap();
        }
        assert_eq!(sent_total, 3);
    }

    #[test]
    fn test_weekly_csv_exclusion_is_case_insensitive_substring() {
        let config = RenderConfig::new().with_excluded_name("MEDIATOR");
        let csv = to_format_string(&sample_analysis(), OutputFormat::Csv, &config).unwrap();
        assert!(!csv.contains("Dana Mediator"));
        assert_eq!(csv.lines().count(), 5);
    }
}

// ============================================================================
// Thread CSV Writer Tests
// ============================================================================

mod threads_csv_tests {
    use super::*;

    #[test]
    fn test_write_threads_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("threads.csv");

        write_threads_csv(&sample_analysis(), path.to_str().unwrap()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0;Weekend;2;2024-01-15T09:00:00Z;2024-01-15T10:00:00Z;0.04;Alice, Bob, Dana Mediator;"));
        assert!(lines[2].starts_with("1;Dentist;1;2024-01-22T20:00:00Z;2024-01-22T20:00:00Z;0.00;Alice, Bob;"));
    }

    #[test]
    fn test_threads_csv_ignores_exclusions() {
        let config = RenderConfig::new().with_excluded_name("Dana");
        let csv = to_format_string(&sample_analysis(), OutputFormat::ThreadsCsv, &config).unwrap();
        assert!(csv.contains("Dana Mediator"));
    }
}

// ============================================================================
// JSON Writer Tests
// ============================================================================

mod json_writer_tests {
    use super::*;

    #[test]
    fn test_write_json_structure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analysis.json");

        write_json(&sample_analysis(), path.to_str().unwrap(), &RenderConfig::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(json["messages"].as_array().unwrap().len(), 4);
        assert_eq!(json["nonMessageCount"], 1);
        assert_eq!(json["messages"][2]["nonMessage"], true);
        assert!(json["messages"][2].get("threadId").is_none());
        assert_eq!(json["messages"][3]["threadId"], 1);
        assert_eq!(json["messages"][3]["threadIndex"], 0);
        assert_eq!(json["people"]["Bob"]["averageReadTime"], 30.0);
        assert_eq!(json["threads"][0]["subject"], "Weekend");
        assert!(json["weekly"]["2024-01-21 to 2024-01-27"]["Alice"].is_object());
    }

    #[test]
    fn test_json_exclusion_keeps_messages() {
        let config = RenderConfig::new().with_excluded_name("dana");
        let json = to_format_string(&sample_analysis(), OutputFormat::Json, &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["people"].get("Dana Mediator").is_none());
        assert_eq!(value["messages"][0]["recipientReadTimes"]["Dana Mediator"], "Never");
    }
}

// ============================================================================
// Markdown Writer Tests
// ============================================================================

mod markdown_writer_tests {
    use super::*;

    #[test]
    fn test_write_markdown() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.md");

        write_markdown(&sample_analysis(), path.to_str().unwrap(), &RenderConfig::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Communication Report"));
        assert!(content.contains("### 2024-01-14 to 2024-01-20"));
        assert!(content.contains("### 2024-01-21 to 2024-01-27"));
        assert!(content.contains("### Thread 1: Dentist"));
        assert!(content.contains("### 3. Dentist"));
    }

    #[test]
    fn test_markdown_matches_format_dispatch() {
        let analysis = sample_analysis();
        let config = RenderConfig::new().with_excluded_name("Dana");
        assert_eq!(
            to_markdown(&analysis, &config),
            to_format_string(&analysis, OutputFormat::Markdown, &config).unwrap()
        );
    }
}

// ============================================================================
// Format Dispatch Tests
// ============================================================================

mod format_dispatch_tests {
    use super::*;

    #[test]
    fn test_write_to_format_detected_from_path() {
        let dir = tempdir().unwrap();
        let analysis = sample_analysis();

        for name in ["weekly.csv", "case_threads.csv", "analysis.json", "report.md"] {
            let path = dir.path().join(name);
            let path_str = path.to_str().unwrap();
            let format = OutputFormat::from_path(path_str).unwrap();
            write_to_format(&analysis, path_str, format, &RenderConfig::new()).unwrap();
            assert!(path.exists(), "{name} not written");
        }

        let threads = fs::read_to_string(dir.path().join("case_threads.csv")).unwrap();
        assert!(threads.starts_with("ThreadId;"));
    }

    #[test]
    fn test_write_to_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_to_format(
            &sample_analysis(),
            path.to_str().unwrap(),
            OutputFormat::Csv,
            &RenderConfig::new(),
        )
        .unwrap_err();
        assert!(err.is_io());
    }
}
