//! sales-gen: writes the synthetic retail sales dataset.
//!
//! Usage:
//!   sales-gen --records 10000 --seed 42 --out amazon_sales_data.csv
//!   sales-gen --config data/generator.json --quiet

mod cli;

use anyhow::Result;
use sales_core::{
    config::GeneratorConfig,
    dataset::DEFAULT_DATASET_PATH,
    generator::{GenerationSummary, SalesGenerator},
    record::{SalesRecord, CSV_COLUMNS},
};
use std::env;
use std::path::Path;

const HEAD_ROWS: usize = 5;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let base = match cli::flag_value(&args, "--config") {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    let seed = cli::parse_arg(&args, "--seed", base.seed);
    let records = cli::parse_arg(&args, "--records", base.record_count);
    let out = cli::flag_value(&args, "--out").unwrap_or(DEFAULT_DATASET_PATH);
    let quiet = cli::has_flag(&args, "--quiet");

    let config = base.with_seed(seed).with_record_count(records);

    println!("Generating retail sales data...");
    println!("  seed:      {seed}");
    println!("  records:   {records}");
    println!("  out:       {out}");
    println!();

    let generator = SalesGenerator::new(config)?;
    let rows = generator.generate_to_path(Path::new(out))?;
    let summary = GenerationSummary::new(generator.config(), &rows);

    print_summary(out, &summary);
    if !quiet {
        print_head(&rows);
    }
    Ok(())
}

fn print_summary(out: &str, summary: &GenerationSummary) {
    println!("Data saved to {out}");
    println!("Shape of data: ({}, {})", summary.rows, summary.columns);
    match (summary.first_order_date, summary.last_order_date) {
        (Some(first), Some(last)) => println!("Order dates:   {first} .. {last}"),
        _ => println!("Order dates:   (no rows)"),
    }
    println!();
    println!("=== ROWS PER CATEGORY ===");
    for (category, count) in &summary.category_counts {
        println!("  {category:<20} {count:>7}");
    }
}

fn print_head(rows: &[SalesRecord]) {
    println!();
    println!("=== FIRST {HEAD_ROWS} ROWS ===");
    println!("  {}", CSV_COLUMNS[..10].join(" | "));
    for r in rows.iter().take(HEAD_ROWS) {
        println!(
            "  {} | {} | {} | {} | {} | {:.2} | {} | {} | {:.2} | {:.2}",
            r.order_id,
            r.order_date,
            r.delivery_date(),
            r.category,
            r.subcategory,
            r.product_price,
            r.quantity,
            r.discount_percent,
            r.discount_amount,
            r.final_price
        );
    }
}
