use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::PathBuf;

use malimax_core::fixtures::{sample_history, sample_ledger_data, SeasonalHistoryBuilder};
use malimax_core::ledger::{Ledger, LedgerData};

use crate::input;

/// Arguments for the ledger summary
#[derive(Args)]
pub struct LedgerSummaryArgs {
    /// Path to JSON ledger data (records, opening balance, expense categories)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Use the built-in sample ledger
    #[arg(long)]
    pub sample: bool,
}

/// Arguments for sample history generation
#[derive(Args)]
pub struct SampleDataArgs {
    /// Generate a seeded seasonal series instead of the fixed sample year
    #[arg(long)]
    pub seasonal: bool,

    /// RNG seed for --seasonal
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of months for --seasonal
    #[arg(long, default_value = "12")]
    pub months: u32,

    /// First month (YYYY-MM) for --seasonal
    #[arg(long, default_value = "2025-01")]
    pub start: String,

    /// Average monthly revenue for --seasonal
    #[arg(long, default_value = "55000")]
    pub base_revenue: Decimal,
}

pub fn run_ledger_summary(args: LedgerSummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data: LedgerData = if args.sample {
        sample_ledger_data()
    } else if let Some(data) = input::load(args.input.as_deref())? {
        data
    } else {
        return Err("--input <ledger.json>, stdin or --sample required for ledger-summary".into());
    };
    let ledger = Ledger::new(data)?;
    Ok(serde_json::to_value(ledger.summary()?)?)
}

pub fn run_sample_data(args: SampleDataArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let history = if args.seasonal {
        SeasonalHistoryBuilder::new()
            .start(args.start)
            .months(args.months)
            .base_revenue(args.base_revenue)
            .seed(args.seed)
            .build()?
    } else {
        sample_history()
    };
    Ok(serde_json::to_value(history)?)
}
