//! # commpack CLI
//!
//! Command-line interface for the commpack library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use commpack::cli::{Args, DEFAULT_OUTPUT};
use commpack::config::{ParserConfig, RenderConfig, ThreadConfig};
use commpack::core::{FilterConfig, apply_filters};
use commpack::format::{OutputFormat, write_to_format};
use commpack::metrics::Scorer;
use commpack::parser::{Platform, create_parser};
use commpack::pipeline::analyze;
use commpack::CommpackError;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` wins over `--verbose` when set.
fn init_logging(args: &Args) {
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<(), CommpackError> {
    let total_start = Instant::now();

    let format: OutputFormat = args.format.into();
    let output_path = adjust_output_extension(&args.output, format);

    // Print header
    println!("📦 commpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📖 Source:  {}", args.source);
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", format);
    println!("🧵 Threads: split after {} days of silence", args.inactivity_days);

    let mut filter_config = FilterConfig::new();
    if let Some(ref after) = args.after {
        filter_config = filter_config.with_date_from(after)?;
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        filter_config = filter_config.with_date_to(before)?;
        println!("📅 Before:  {}", before);
    }

    let thread_config = ThreadConfig::new().with_inactivity_days(args.inactivity_days)?;

    let mut render_config = RenderConfig::new();
    for name in &args.exclude {
        render_config = render_config.with_excluded_name(name.clone());
    }
    if !render_config.exclude_names.is_empty() {
        println!("🙈 Exclude: {}", render_config.exclude_names.join(", "));
    }

    println!();

    // Step 1: Parse
    let platform: Platform = args.source.into();
    let parser = create_parser(platform, &ParserConfig::default());
    println!("⏳ Parsing {}...", parser.name());
    let parse_start = Instant::now();
    let messages = parser.parse(Path::new(&args.input))?;
    let original_count = messages.len();
    println!(
        "   Found {} blocks ({:.2}s)",
        original_count,
        parse_start.elapsed().as_secs_f64()
    );

    // Step 2: Score
    println!("🧮 Scoring messages...");
    let scorer = Scorer::new();
    let messages: Vec<_> = messages.into_iter().map(|m| m.scored(&scorer)).collect();

    // Step 3: Filter (BEFORE threading)
    let messages = if filter_config.is_active() {
        println!("🔍 Filtering messages...");
        let filter_start = Instant::now();
        let filtered = apply_filters(messages, &filter_config);
        println!(
            "   {} blocks after filtering ({:.2}s)",
            filtered.len(),
            filter_start.elapsed().as_secs_f64()
        );
        filtered
    } else {
        messages
    };

    // Step 4: Thread and aggregate
    println!("🧵 Threading and aggregating...");
    let analyze_start = Instant::now();
    let analysis = analyze(messages, &thread_config);
    println!(
        "   {} threads across {} weeks ({:.2}s)",
        analysis.threads.len(),
        analysis.weekly.len(),
        analyze_start.elapsed().as_secs_f64()
    );

    // Step 5: Write output in selected format
    println!("💾 Writing {}...", format);
    let write_start = Instant::now();
    write_to_format(&analysis, &output_path, format, &render_config)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Messages:  {}", analysis.message_count());
    if analysis.non_message_count > 0 {
        println!("   Skipped:   {} blocks without message fields", analysis.non_message_count);
    }
    let undated = analysis.undated_count();
    if undated > 0 {
        println!("   Undated:   {} messages", undated);
    }
    println!("   People:    {}", analysis.people.len());
    println!("   Weeks:     {}", analysis.weekly.len());
    println!("   Threads:   {}", analysis.threads.len());

    // Performance stats
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = original_count as f64 / total_time.as_secs_f64();
    println!("   Throughput:  {:.0} blocks/sec", msgs_per_sec);

    Ok(())
}

/// Adjusts output file extension based on format if using default output.
fn adjust_output_extension(output: &str, format: OutputFormat) -> String {
    if output != DEFAULT_OUTPUT {
        return output.to_string();
    }

    match format {
        OutputFormat::ThreadsCsv => "commpack_threads.csv".to_string(),
        _ => format!("commpack_report.{}", format.extension()),
    }
}
