//! Batch processing command for multiple tender documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use licita_core::document::is_supported;
use licita_core::models::tender::{Category, NewTender, TenderId};
use licita_core::pipeline::process_batch_with;
use licita_core::store::{JsonStore, TenderSink};
use licita_core::{BatchOutcome, DocumentScanner, ProcessOutcome};

use super::process::{file_name, format_items, parse_category, registry_for, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern (e.g. "editais/*.pdf")
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Save every processed document as a tender
    #[arg(long)]
    save: bool,

    /// Owner of saved tenders (default: catalog.owner_id from config)
    #[arg(long)]
    owner: Option<u64>,

    /// Only extract these categories (comma-separated)
    #[arg(long, value_delimiter = ',', value_parser = parse_category)]
    only: Vec<Category>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let scanner = DocumentScanner::new(registry_for(&args.only), &config.scanner);
    let outcomes = process_batch_with(&files, &scanner, |_, _| overall_pb.inc(1));

    overall_pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        for outcome in &outcomes {
            if let BatchOutcome::Processed { path, outcome } = outcome {
                write_output(output_dir, path, outcome, args.format)?;
            }
        }
    }

    let mut saved: Vec<(PathBuf, TenderId)> = Vec::new();
    let mut save_failures: Vec<(PathBuf, String)> = Vec::new();

    if args.save {
        let owner_id = args.owner.unwrap_or(config.catalog.owner_id);
        let mut store = JsonStore::new(&config.store.dir);

        for outcome in &outcomes {
            let BatchOutcome::Processed { path, outcome } = outcome else {
                continue;
            };
            let tender = NewTender::new(file_name(path), owner_id, outcome.clone().into_items());
            match store.save(tender) {
                Ok(id) => saved.push((path.clone(), id)),
                Err(e) => {
                    warn!("Failed to save {}: {}", path.display(), e);
                    save_failures.push((path.clone(), e.to_string()));
                }
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes, &saved)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&BatchOutcome> = outcomes.iter().filter(|o| o.is_failed()).collect();
    let empty = outcomes
        .iter()
        .filter(|o| matches!(o, BatchOutcome::Processed { outcome: ProcessOutcome::Empty, .. }))
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} with items, {} empty, {} failed",
        style(outcomes.len() - failed.len() - empty).green(),
        style(empty).yellow(),
        style(failed.len()).red()
    );

    if args.save {
        println!(
            "   {} tenders saved in {}",
            style(saved.len()).green(),
            config.store.dir.display()
        );
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            if let BatchOutcome::Failed { path, error } = outcome {
                println!("  - {}: {}", path.display(), error);
            }
        }
    }

    if !save_failures.is_empty() {
        println!();
        println!("{}", style("Not saved:").red());
        for (path, error) in &save_failures {
            println!("  - {}: {}", path.display(), error);
        }
    }

    Ok(())
}

fn write_output(
    output_dir: &Path,
    path: &Path,
    outcome: &ProcessOutcome,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let output_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("tender");
    let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

    let content = format_items(&outcome.clone().into_items(), format)?;
    fs::write(&output_path, content)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

/// One line of the batch summary CSV.
#[derive(Serialize)]
struct SummaryRow {
    filename: String,
    status: &'static str,
    items: Option<usize>,
    categories: String,
    gov_estimate: Option<Decimal>,
    tender_id: Option<TenderId>,
    error: String,
}

impl SummaryRow {
    fn new(outcome: &BatchOutcome, tender_id: Option<TenderId>) -> Self {
        let mut row = SummaryRow {
            filename: file_name(outcome.path()),
            status: "error",
            items: None,
            categories: String::new(),
            gov_estimate: None,
            tender_id,
            error: String::new(),
        };

        match outcome {
            BatchOutcome::Processed { outcome: ProcessOutcome::Extracted(items), .. } => {
                row.status = "processed";
                row.items = Some(items.total_items());
                row.categories = items
                    .categories()
                    .map(|(category, _)| category.as_str())
                    .collect::<Vec<_>>()
                    .join(";");
                row.gov_estimate = Some(items.total_estimate());
            }
            BatchOutcome::Processed { outcome: ProcessOutcome::Empty, .. } => {
                row.status = "empty";
                row.items = Some(0);
                row.gov_estimate = Some(Decimal::ZERO);
            }
            BatchOutcome::Failed { error, .. } => {
                row.error = error.to_string();
            }
        }

        row
    }
}

fn write_summary(
    path: &Path,
    outcomes: &[BatchOutcome],
    saved: &[(PathBuf, TenderId)],
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for outcome in outcomes {
        let tender_id = saved
            .iter()
            .find(|(p, _)| p.as_path() == outcome.path())
            .map(|(_, id)| *id);
        wtr.serialize(SummaryRow::new(outcome, tender_id))?;
    }

    wtr.flush()?;
    Ok(())
}
