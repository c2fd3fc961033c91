//! Profit command - project profit for a stored tender.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use licita_core::catalog::{CatalogSource, JsonCatalog};
use licita_core::extraction::rules::format_brl_amount;
use licita_core::models::tender::{Tender, TenderId};
use licita_core::profit::ProfitReport;
use licita_core::store::{JsonStore, TenderSource};
use licita_core::match_and_aggregate;

use super::process::OutputFormat;

/// Arguments for the profit command.
#[derive(Args)]
pub struct ProfitArgs {
    /// Stored tender id
    #[arg(required = true)]
    tender_id: TenderId,

    /// Catalog file (default: catalog.path from config)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Catalog owner (default: the tender's owner)
    #[arg(long)]
    owner: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run(args: ProfitArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let store = JsonStore::new(&config.store.dir);
    let tender = store.load(args.tender_id)?;

    let catalog_path = args.catalog.unwrap_or(config.catalog.path);
    let owner_id = args.owner.unwrap_or(tender.owner_id);
    let products = JsonCatalog::new(&catalog_path).products_for(owner_id)?;

    if products.is_empty() {
        eprintln!(
            "{} No catalog products for owner {} in {}",
            style("!").yellow(),
            owner_id,
            catalog_path.display()
        );
    }

    info!(
        "Matching tender {} ({} items) against {} products",
        tender.id,
        tender.items.total_items(),
        products.len()
    );

    let report = match_and_aggregate(&tender.items, &products);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Csv => format_csv(&report)?,
        OutputFormat::Text => format_text(&tender, &report),
    };
    println!("{}", output);

    Ok(())
}

fn format_csv(report: &ProfitReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "category",
        "description",
        "quantity",
        "gov_unit_price",
        "matched_product",
        "sale_price",
        "unit_margin",
        "line_gov_estimate",
        "line_projected_profit",
    ])?;

    for record in &report.records {
        wtr.write_record([
            record.category.as_str(),
            &record.description,
            &record.quantity.to_string(),
            &record.gov_unit_price.to_string(),
            record.matched_product.as_deref().unwrap_or(""),
            &record
                .matched_sale_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            &record.unit_margin.to_string(),
            &record.line_gov_estimate.to_string(),
            &record.line_projected_profit.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(tender: &Tender, report: &ProfitReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tender #{}: {}\n", tender.id, tender.filename));
    output.push_str(&format!(
        "Processed: {}\n\n",
        tender.processed_at.format("%Y-%m-%d %H:%M")
    ));

    for record in &report.records {
        let product = record.matched_product.as_deref().unwrap_or("-");
        output.push_str(&format!(
            "  {:<12} {:<28} x{:<5} {:<24} profit R$ {}\n",
            record.category.as_str(),
            record.description,
            record.quantity,
            product,
            format_brl_amount(record.line_projected_profit)
        ));
    }

    let totals = &report.totals;
    output.push('\n');
    output.push_str(&format!(
        "Matched: {}/{}\n",
        totals.matched_count, totals.item_count
    ));
    output.push_str(&format!(
        "Government estimate: R$ {}\n",
        format_brl_amount(totals.total_gov_estimate)
    ));
    output.push_str(&format!(
        "Projected profit:    R$ {}\n",
        format_brl_amount(totals.total_projected_profit)
    ));

    output
}
