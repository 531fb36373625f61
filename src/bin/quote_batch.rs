//! Price a batch of quote requests from CSV
//!
//! Usage: cargo run --bin quote_batch -- --input data/quotes/sample_requests.csv
//!
//! Writes one output row per request; rows that fail validation are kept with
//! their error message so the batch still lines up with the input.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use quote_engine::request::load_requests;
use quote_engine::{Adjustment, QuoteRunner};
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "quote_batch", about = "Estimate every request in a CSV file")]
struct Args {
    /// Request file (QuoteID,ServiceType,Tier,Frames,...)
    #[arg(long, default_value = "data/quotes/sample_requests.csv")]
    input: PathBuf,

    #[arg(long, default_value = "quote_batch_output.csv")]
    output: PathBuf,

    /// Directory holding rate_table.csv (falls back to QUOTE_RATES_DIR, then the built-in card)
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Issue date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    issue_date: Option<NaiveDate>,
}

/// One line of batch output
#[derive(Debug, Serialize)]
struct OutputRow {
    #[serde(rename = "QuoteID")]
    quote_id: String,
    #[serde(rename = "ServiceType")]
    service: String,
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "Subtotal")]
    subtotal: Option<f64>,
    #[serde(rename = "Multiplier")]
    multiplier: Option<f64>,
    #[serde(rename = "VolumeDiscount")]
    volume_discount: Option<f64>,
    #[serde(rename = "TotalPrice")]
    total_price: Option<f64>,
    #[serde(rename = "DeliveryDays")]
    delivery_days: Option<u64>,
    #[serde(rename = "DeliveryDate")]
    delivery_date: Option<NaiveDate>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let rates_dir = args
        .rates
        .clone()
        .or_else(|| env::var("QUOTE_RATES_DIR").ok().map(PathBuf::from));
    let runner = match &rates_dir {
        Some(path) => QuoteRunner::from_csv_path(path)
            .with_context(|| format!("loading rate table from {}", path.display()))?,
        None => QuoteRunner::new(),
    };

    println!("Loading requests from {}...", args.input.display());
    let requests = load_requests(&args.input)
        .with_context(|| format!("loading requests from {}", args.input.display()))?;
    println!("Loaded {} requests in {:?}", requests.len(), start.elapsed());

    let issue_date = args.issue_date.unwrap_or_else(|| Local::now().date_naive());

    let run_start = Instant::now();
    let quotes = runner.run_batch(&requests, issue_date);
    println!("Estimates complete in {:?}", run_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut total_value = 0.0;
    let mut failed = 0;

    for quote in &quotes {
        let row = match &quote.result {
            Ok(result) => {
                let summary = result.summary();
                total_value += summary.total_price;
                OutputRow {
                    quote_id: quote.quote_id.clone(),
                    service: quote.service.to_string(),
                    tier: quote.tier.to_string(),
                    subtotal: Some(summary.subtotal),
                    multiplier: Some(summary.combined_multiplier),
                    volume_discount: result.factor(Adjustment::VolumeDiscount).map(|f| 1.0 - f),
                    total_price: Some(summary.total_price),
                    delivery_days: Some(summary.delivery_days),
                    delivery_date: Some(summary.estimated_delivery_date),
                    error: None,
                }
            }
            Err(err) => {
                failed += 1;
                OutputRow {
                    quote_id: quote.quote_id.clone(),
                    service: quote.service.to_string(),
                    tier: quote.tier.to_string(),
                    subtotal: None,
                    multiplier: None,
                    volume_discount: None,
                    total_price: None,
                    delivery_days: None,
                    delivery_date: None,
                    error: Some(err.to_string()),
                }
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    println!("\nBatch Summary:");
    println!("  Quotes: {}", quotes.len());
    println!("  Failed: {}", failed);
    println!("  Total quoted value: ${:.0}", total_value);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
