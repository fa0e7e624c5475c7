//! Batch command - synthesize and score filenames for many receipts.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::{style, Term};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use rcpt_core::error::ScoreError;
use rcpt_core::receipt::format_total;
use rcpt_core::{
    AggregateSummary, ComparisonResult, DocumentTextExtractor, ReceiptProcessor, TextExtractor,
};

use super::load_config;
use super::process::{format_flags, ReceiptReport};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory or glob pattern
    #[arg(required = true)]
    input: String,

    /// File extension to process (default: from config, "pdf")
    #[arg(short, long)]
    extension: Option<String>,

    /// Write a per-file summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Rename files on disk to their synthesized names
    #[arg(long)]
    apply: bool,

    /// Skip the rename confirmation prompt
    #[arg(short, long, requires = "apply")]
    yes: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    report: Option<ReceiptReport>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let extension = args
        .extension
        .clone()
        .unwrap_or_else(|| config.input.extension.clone());
    let extension = extension.trim_start_matches('.').to_lowercase();

    let files = collect_files(&args.input, &extension)?;

    if files.is_empty() {
        warn!("No .{} files found for {}", extension, args.input);
    } else {
        println!(
            "{} Found {} files to process",
            style("ℹ").blue(),
            files.len()
        );
    }

    let extractor = DocumentTextExtractor::from_config(&config.ocr)?;
    let processor = ReceiptProcessor::from_config(&config.extraction);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match extractor.extract(&path) {
            Ok(receipt) => {
                let record = processor.process(&receipt);
                let report = ReceiptReport::new(&path, record);

                pb.suspend(|| print_report(&report));

                results.push(ProcessResult {
                    path,
                    report: Some(report),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        report: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let comparisons: Vec<ComparisonResult> = results
        .iter()
        .filter_map(|r| r.report.as_ref())
        .filter_map(|r| r.comparison.clone())
        .collect();

    println!();
    match AggregateSummary::from_results(&comparisons) {
        Ok(summary) => println!("{}", summary),
        Err(ScoreError::EmptyBatch) => println!("{}", style(ScoreError::EmptyBatch).yellow()),
        Err(e) => return Err(e.into()),
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if args.apply {
        apply_renames(&results, args.yes)?;
    }

    debug!("Batch finished in {:?}", start.elapsed());

    Ok(())
}

fn print_report(report: &ReceiptReport) {
    println!("{}", report.source);
    println!("  -> {}", report.filename);
    match &report.comparison {
        Some(comparison) => println!("  {}", format_flags(comparison)),
        None => println!(
            "  {}",
            style("not scored: name does not follow the date-name-price convention").yellow()
        ),
    }
}

/// Files in a directory, or matching a glob, with the given extension. Sorted by path.
fn collect_files(input: &str, extension: &str) -> anyhow::Result<Vec<PathBuf>> {
    let input_path = Path::new(input);

    let candidates: Vec<PathBuf> = if input_path.is_dir() {
        fs::read_dir(input_path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect()
    } else {
        glob(input)?.filter_map(|r| r.ok()).collect()
    };

    let mut files: Vec<PathBuf> = candidates
        .into_iter()
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension))
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Rename each processed file to its synthesized name after confirmation.
fn apply_renames(results: &[ProcessResult], assume_yes: bool) -> anyhow::Result<()> {
    let plan: Vec<(&Path, PathBuf)> = results
        .iter()
        .filter_map(|r| {
            let report = r.report.as_ref()?;
            if report.source == report.filename {
                return None;
            }
            Some((r.path.as_path(), r.path.with_file_name(&report.filename)))
        })
        .collect();

    if plan.is_empty() {
        println!("{} Nothing to rename", style("ℹ").blue());
        return Ok(());
    }

    if !assume_yes && !confirm(&format!("Rename {} files? [y/N] ", plan.len()))? {
        println!("{} Rename cancelled", style("ℹ").blue());
        return Ok(());
    }

    let mut renamed = 0;
    let mut skipped = 0;
    for (from, to) in plan {
        if to.parent() != from.parent() {
            warn!("Not renaming {}: {} is not a plain file name", from.display(), to.display());
            skipped += 1;
            continue;
        }
        if to.exists() {
            warn!("Not renaming {}: {} already exists", from.display(), to.display());
            skipped += 1;
            continue;
        }
        match fs::rename(from, &to) {
            Ok(()) => {
                info!("Renamed {} -> {}", from.display(), to.display());
                renamed += 1;
            }
            Err(e) => {
                warn!("Failed to rename {}: {}", from.display(), e);
                skipped += 1;
            }
        }
    }

    println!("{} Renamed {} files", style("✓").green(), renamed);
    if skipped > 0 {
        println!("{} Skipped {} files", style("⚠").yellow(), skipped);
    }
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let term = Term::stdout();
    term.write_str(prompt)?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "source",
        "status",
        "filename",
        "business_name",
        "transaction_date",
        "total",
        "date_equal",
        "name_equal",
        "price_equal",
        "error",
    ])?;

    for result in results {
        let source = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(report) = &result.report {
            let (date_equal, name_equal, price_equal) = match &report.comparison {
                Some(c) => (
                    c.date_equal.to_string(),
                    c.name_equal.to_string(),
                    c.price_equal.to_string(),
                ),
                None => Default::default(),
            };

            wtr.write_record([
                source,
                "success",
                &report.filename,
                &report.record.business_name,
                &report.record.transaction_date.to_string(),
                &format_total(report.record.total),
                &date_equal,
                &name_equal,
                &price_equal,
                "",
            ])?;
        } else {
            wtr.write_record([
                source,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
