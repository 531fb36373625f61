//! Quote Engine CLI
//!
//! Estimates cost and delivery for a single project and prints the breakdown

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use quote_engine::currency::BASE_CURRENCY;
use quote_engine::{
    ComplexityClass, CurrencyConverter, DeliverySpeed, EstimateRequest, EstimateResult,
    FeatureFlags, FixedRateConverter, QuoteRunner, QuoteSummary, ResolutionClass, ServiceType, Tier,
};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "quote_engine", version, about = "Estimate cost and delivery for a VFX project")]
struct Args {
    /// vfx, creative, digitalIntermediate, techInnovation, fullProduction
    #[arg(long, default_value = "vfx")]
    service: ServiceType,

    /// standard, premium, outsourced
    #[arg(long, default_value = "standard")]
    tier: Tier,

    /// Frame count
    #[arg(long, default_value_t = 1000)]
    frames: u32,

    /// Frame rate
    #[arg(long, default_value_t = 24.0)]
    fps: f64,

    #[arg(long, default_value_t = 1)]
    shots: u32,

    /// low/hd, standard/2k, high/4k, ultra/8k
    #[arg(long, default_value = "standard")]
    resolution: ResolutionClass,

    /// standard, expedited, rush
    #[arg(long, default_value = "standard")]
    delivery: DeliverySpeed,

    /// low, medium, high, veryHigh
    #[arg(long, default_value = "medium")]
    complexity: ComplexityClass,

    #[arg(long, default_value_t = 2)]
    revisions: u32,

    /// Number of deliverable formats
    #[arg(long, default_value_t = 1)]
    formats: u32,

    #[arg(long)]
    three_d: bool,

    #[arg(long)]
    matte_painting: bool,

    #[arg(long)]
    character_animation: bool,

    #[arg(long)]
    ai_assist: bool,

    /// Directory holding rate_table.csv (falls back to QUOTE_RATES_DIR, then the built-in card)
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Also show the total in this currency
    #[arg(long)]
    currency: Option<String>,

    /// Issue date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    issue_date: Option<NaiveDate>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    service: ServiceType,
    tier: Tier,
    request: EstimateRequest,
    result: EstimateResult,
    summary: QuoteSummary,
    converted: Option<ConvertedTotal>,
}

#[derive(Serialize)]
struct ConvertedTotal {
    currency: String,
    amount: f64,
}

fn rates_dir(args: &Args) -> Option<PathBuf> {
    args.rates
        .clone()
        .or_else(|| env::var("QUOTE_RATES_DIR").ok().map(PathBuf::from))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let dir = rates_dir(&args);

    let runner = match &dir {
        Some(path) => QuoteRunner::from_csv_path(path)
            .with_context(|| format!("loading rate table from {}", path.display()))?,
        None => QuoteRunner::new(),
    };

    let request = EstimateRequest {
        unit_count: args.frames,
        units_per_second: args.fps,
        shot_count: args.shots,
        resolution: args.resolution,
        delivery_speed: args.delivery,
        complexity: args.complexity,
        revision_rounds: args.revisions,
        features: FeatureFlags {
            three_d: args.three_d,
            matte_painting: args.matte_painting,
            character_animation: args.character_animation,
            ai_assist: args.ai_assist,
        },
        output_format_count: args.formats,
    };

    let issue_date = args.issue_date.unwrap_or_else(|| Local::now().date_naive());
    let result = runner.quote(args.service, args.tier, &request, issue_date)?;

    let converted = match &args.currency {
        Some(code) => {
            let fx = match &dir {
                Some(path) => FixedRateConverter::from_dir(path)
                    .with_context(|| format!("loading currency rates from {}", path.display()))?,
                None => FixedRateConverter::default_rates(),
            };
            let Some(amount) = fx.convert(result.total_price, BASE_CURRENCY, code) else {
                bail!("unknown currency code '{}'", code);
            };
            Some(ConvertedTotal {
                currency: code.to_ascii_uppercase(),
                amount,
            })
        }
        None => None,
    };

    let summary = result.summary();

    if args.json {
        let response = QuoteResponse {
            service: args.service,
            tier: args.tier,
            request,
            result,
            summary,
            converted,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Quote Engine v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    println!("Plan: {} / {}", args.service, args.tier);
    println!(
        "  Frames: {} @ {} fps ({:.1}s)",
        request.unit_count, request.units_per_second, summary.footage_seconds
    );
    println!("  Shots: {}", request.shot_count);
    println!("  Resolution: {}", request.resolution.display_name());
    println!();

    println!("{:<20} {:>14} {:>16}", "Factor", "Value", "Running Total");
    println!("{}", "-".repeat(52));
    println!("{:<20} {:>14} {:>16.2}", "base", "", result.base_price);
    for (factor, total) in result.running_totals() {
        if factor.adjustment.is_addend() {
            println!("{:<20} {:>14.2} {:>16.2}", factor.adjustment, factor.value, total);
        } else {
            let label = format!("x {}", factor.adjustment);
            println!("{:<20} {:>14.4} {:>16.2}", label, factor.value, total);
        }
    }
    println!();

    println!("Summary:");
    println!("  Subtotal: {} {:.2}", BASE_CURRENCY, summary.subtotal);
    println!("  Combined multiplier: {:.4}", summary.combined_multiplier);
    println!("  Volume discount: {} {:.2}", BASE_CURRENCY, summary.discount_amount);
    println!("  Total: {} {:.0}", BASE_CURRENCY, summary.total_price);
    if let Some(converted) = &converted {
        println!("  Total ({}): {:.2}", converted.currency, converted.amount);
    }
    println!(
        "  Delivery: {} days (by {})",
        summary.delivery_days, summary.estimated_delivery_date
    );

    Ok(())
}
