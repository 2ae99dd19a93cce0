mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::ledger::{LedgerSummaryArgs, SampleDataArgs};
use commands::simulator::{BaselineArgs, LoanPaymentArgs, SimulateArgs};

/// Cashflow scenario projections for small businesses
#[derive(Parser)]
#[command(
    name = "malimax",
    version,
    about = "Cashflow scenario projections for small businesses",
    long_about = "Project a business's cash balance under what-if scenarios: revenue and \
                  expense shocks, one-time events and loans. Works on a monthly revenue/expense \
                  history supplied as JSON or the built-in sample year."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log engine decisions to stderr (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Trailing 3-month revenue/expense/profit averages
    Baseline(BaselineArgs),
    /// Monthly payment for an amortized loan
    LoanPayment(LoanPaymentArgs),
    /// Project the balance under a what-if scenario
    Simulate(SimulateArgs),
    /// List the named scenario presets and their parameters
    Presets,
    /// Running balances, KPIs and expense breakdown for a ledger
    LedgerSummary(LedgerSummaryArgs),
    /// Print a sample monthly history
    SampleData(SampleDataArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Baseline(args) => commands::simulator::run_baseline(args),
        Commands::LoanPayment(args) => commands::simulator::run_loan_payment(args),
        Commands::Simulate(args) => commands::simulator::run_simulate(args),
        Commands::Presets => commands::simulator::run_presets(),
        Commands::LedgerSummary(args) => commands::ledger::run_ledger_summary(args),
        Commands::SampleData(args) => commands::ledger::run_sample_data(args),
        Commands::Version => {
            println!("malimax {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
