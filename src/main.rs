/*!
 * Command-line interface for llmcontext
 */

use std::io;
use std::sync::Arc;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;

use llmcontext::config::{Args, Config};
use llmcontext::diagnostics::ConsoleSink;
use llmcontext::error::Result;
use llmcontext::patterns::PatternResolver;
use llmcontext::report::{Reporter, ScanReport};
use llmcontext::scanner::{ScanStatistics, Scanner};
use llmcontext::utils::count_files;
use llmcontext::writer::ContextWriter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Shell completion generation short-circuits the scan
    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    // Create and validate configuration before any output is produced
    let mut config = Config::from_args(args);
    config.validate()?;

    // Configure thread pool
    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        eprintln!("Warning: Failed to set thread pool size: {}", e);
    }

    let sink = ConsoleSink::new(config.verbose);

    // Create progress bar
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) ⏱️  Elapsed: {elapsed_precise}")
            .unwrap(),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("📊 Resolving");

    // One discovery pass and one compiled spec per root
    let mut specs = Vec::with_capacity(config.scan_roots.len());
    for root in &config.scan_roots {
        progress.set_message(format!("🔍 Reading ignore files under {}", root.display()));
        let resolver = PatternResolver::new(root.clone(), &sink);
        specs.push(resolver.resolve()?);
    }

    // Count files for progress tracking
    let total_files: u64 = config
        .scan_roots
        .iter()
        .zip(&specs)
        .map(|(root, spec)| count_files(root, spec, Some(&config.output_file)))
        .sum();
    progress.set_length(total_files);
    progress.set_prefix("📊 Processing");
    progress.set_message("Starting scan...");

    // Start timing both scan and write operations
    let start_time = Instant::now();

    // Walk each root sequentially with its own spec
    let mut statistics = ScanStatistics::default();
    let mut scans = Vec::with_capacity(config.scan_roots.len());
    for (root, spec) in config.scan_roots.iter().zip(specs) {
        let scanner = Scanner::new(root.clone(), spec, &sink, Arc::new(progress.clone()))
            .exclude_output(config.output_file.clone());
        scans.push(scanner.scan()?);
        statistics.merge(scanner.get_statistics());
    }

    // Write the aggregated document
    let writer = ContextWriter::new(config.output_file.clone());
    writer.write(&scans)?;

    let total_duration = start_time.elapsed();
    progress.finish_and_clear();

    // Prepare and print the scan report
    let scan_report = ScanReport {
        output_file: config.output_file.display().to_string(),
        duration: total_duration,
        files_processed: statistics.files_processed,
        total_lines: statistics.total_lines,
        total_chars: statistics.total_chars,
        file_details: statistics.file_details,
    };

    let reporter = Reporter::new(config.report_format);
    reporter.print_report(&scan_report)?;

    Ok(())
}
