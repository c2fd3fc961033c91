//! Process command - extract items from a single tender document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use licita_core::extraction::rules::{format_brl_amount, CategoryRegistry};
use licita_core::models::tender::{CategorizedItems, Category, NewTender};
use licita_core::store::{JsonStore, TenderSink};
use licita_core::{process_document, reader_for_path, DocumentScanner, UnknownCategory};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Save the result as a tender in the store
    #[arg(long)]
    save: bool,

    /// Owner of the saved tender (default: catalog.owner_id from config)
    #[arg(long)]
    owner: Option<u64>,

    /// Only extract these categories (comma-separated)
    #[arg(long, value_delimiter = ',', value_parser = parse_category)]
    only: Vec<Category>,
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

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let reader = reader_for_path(&args.input)?;
    let scanner = DocumentScanner::new(registry_for(&args.only), &config.scanner);

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Scanning {}...", file_name(&args.input)));

    let outcome = process_document(&args.input, reader.as_ref(), &scanner)?;
    pb.finish_and_clear();

    if outcome.is_empty() {
        eprintln!(
            "{} No items found in {}",
            style("!").yellow(),
            args.input.display()
        );
    }
    let items = outcome.into_items();

    let output = format_items(&items, args.format)?;

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

    if args.save {
        let owner_id = args.owner.unwrap_or(config.catalog.owner_id);
        let mut store = JsonStore::new(&config.store.dir);
        let id = store.save(NewTender::new(file_name(&args.input), owner_id, items))?;
        eprintln!(
            "{} Saved tender #{} in {}",
            style("✓").green(),
            id,
            config.store.dir.display()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Parse a category name given on the command line.
pub fn parse_category(s: &str) -> Result<Category, String> {
    s.parse().map_err(|e: UnknownCategory| {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!("{} (expected one of: {})", e, names.join(", "))
    })
}

/// Standard registry, narrowed when categories were requested.
pub fn registry_for(only: &[Category]) -> CategoryRegistry {
    if only.is_empty() {
        CategoryRegistry::standard()
    } else {
        CategoryRegistry::only(only)
    }
}

/// Final path component, used as the tender filename.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Render items in the requested format.
pub fn format_items(items: &CategorizedItems, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Csv => format_csv(items),
        OutputFormat::Text => Ok(format_text(items)),
    }
}

fn format_csv(items: &CategorizedItems) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "category",
        "description",
        "quantity",
        "unit_price",
        "line_estimate",
        "page",
    ])?;

    for item in items.iter_items() {
        wtr.write_record([
            item.category.as_str(),
            &item.description,
            &item.quantity.to_string(),
            &item.unit_price.to_string(),
            &item.line_estimate().to_string(),
            &item.page_number.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(items: &CategorizedItems) -> String {
    let mut output = String::new();

    output.push_str(&format!("Items: {}\n", items.total_items()));

    for (category, list) in items.categories() {
        output.push('\n');
        output.push_str(&format!("{} ({})\n", category.as_str().to_uppercase(), list.len()));
        for item in list {
            output.push_str(&format!(
                "  {:<32} x{:<5} R$ {:>12}  (p. {})\n",
                item.description,
                item.quantity,
                format_brl_amount(item.unit_price),
                item.page_number
            ));
        }
    }

    let total = items.total_estimate();
    output.push_str(&format!("\nGovernment estimate: R$ {}\n", format_brl_amount(total)));

    output
}
