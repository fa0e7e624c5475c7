//! Process command - synthesize a filename for a single receipt.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use rcpt_core::receipt::format_total;
use rcpt_core::{
    compare_filenames, ComparisonResult, DocumentTextExtractor, ExtractedRecord, ReceiptProcessor,
    TextExtractor,
};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (txt, PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Everything known about one processed receipt.
#[derive(Debug, Serialize)]
pub struct ReceiptReport {
    /// Current filename of the receipt.
    pub source: String,
    /// Synthesized filename, extension included.
    pub filename: String,
    pub record: ExtractedRecord,
    /// Comparison with the current filename, when it follows the naming convention.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonResult>,
}

impl ReceiptReport {
    pub fn new(path: &Path, record: ExtractedRecord) -> Self {
        let source = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let filename = record.file_name(extension);
        let comparison = compare_filenames(&source, &filename).ok();

        Self {
            source,
            filename,
            record,
            comparison,
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let extractor = DocumentTextExtractor::from_config(&config.ocr)?;
    let receipt = extractor.extract(&args.input)?;
    let record = ReceiptProcessor::from_config(&config.extraction).process(&receipt);
    let report = ReceiptReport::new(&args.input, record);

    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_report(report: &ReceiptReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &ReceiptReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "source",
        "filename",
        "business_name",
        "transaction_date",
        "total",
    ])?;

    wtr.write_record([
        &report.source,
        &report.filename,
        &report.record.business_name,
        &report.record.transaction_date.to_string(),
        &format_total(report.record.total),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &ReceiptReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Source:   {}\n", report.source));
    output.push_str(&format!("Filename: {}\n", report.filename));
    output.push('\n');
    output.push_str(&format!("  Business: {}\n", report.record.business_name));
    output.push_str(&format!("  Date:     {}\n", report.record.transaction_date));
    output.push_str(&format!("  Total:    {}\n", format_total(report.record.total)));

    if let Some(comparison) = &report.comparison {
        output.push('\n');
        output.push_str(&format_flags(comparison));
        output.push('\n');
    }

    output
}

/// One-line rendering of comparison flags.
pub fn format_flags(comparison: &ComparisonResult) -> String {
    let flag = |equal: bool| {
        if equal {
            style("match").green().to_string()
        } else {
            style("differ").red().to_string()
        }
    };

    let mut line = format!(
        "date: {}  name: {}  price: {}",
        flag(comparison.date_equal),
        flag(comparison.name_equal),
        flag(comparison.price_equal)
    );
    if !comparison.aligned {
        line.push_str(&format!("  {}", style("(segments misaligned)").yellow()));
    }
    line
}
