use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::PathBuf;

use malimax_core::fixtures::sample_history;
use malimax_core::ledger::MonthlyRecord;
use malimax_core::simulator::{
    compute_trend_baseline, monthly_loan_payment, run_simulation, scenario_presets,
    ScenarioPreset, SimulationInput,
};

use crate::input;

/// Arguments for the trend baseline
#[derive(Args)]
pub struct BaselineArgs {
    /// Path to a JSON array of monthly records
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Use the built-in sample year instead of --input
    #[arg(long)]
    pub sample: bool,
}

/// Arguments for the amortized loan payment
#[derive(Args)]
pub struct LoanPaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Term in months
    #[arg(long, default_value = "12")]
    pub term: u32,

    /// Annual interest rate in percent (5 for 5%)
    #[arg(long, default_value = "0")]
    pub rate: Decimal,
}

/// Named what-if scenarios
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PresetArg {
    /// Revenue down 20%
    RevenueDrop,
    /// Expenses up 15%
    ExpenseIncrease,
    /// 50,000 loan over 12 months at 5%
    NewLoan,
}

impl From<PresetArg> for ScenarioPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::RevenueDrop => ScenarioPreset::RevenueDrop,
            PresetArg::ExpenseIncrease => ScenarioPreset::ExpenseIncrease,
            PresetArg::NewLoan => ScenarioPreset::NewLoan,
        }
    }
}

/// Arguments for a scenario simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON simulation input (history, balances, parameters)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Use the built-in sample year as history
    #[arg(long)]
    pub sample: bool,

    /// Start from a named scenario; the flags below override its values
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Balance before the first month of history
    #[arg(long, allow_negative_numbers = true)]
    pub opening_balance: Option<Decimal>,

    /// Use this balance instead of the one derived from history
    #[arg(long, allow_negative_numbers = true)]
    pub current_balance: Option<Decimal>,

    /// Monthly revenue change in percent (-50..50)
    #[arg(long, allow_negative_numbers = true)]
    pub revenue_change: Option<Decimal>,

    /// Monthly expense change in percent (-30..30)
    #[arg(long, allow_negative_numbers = true)]
    pub expense_change: Option<Decimal>,

    /// One-time income received now
    #[arg(long)]
    pub one_time_income: Option<Decimal>,

    /// One-time expense paid now
    #[arg(long)]
    pub one_time_expense: Option<Decimal>,

    /// Loan principal received now
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub loan_term: Option<u32>,

    /// Annual loan interest rate in percent
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Emit whole-unit display figures instead of full precision
    #[arg(long)]
    pub summary: bool,

    /// Emit only the 12-month projection series
    #[arg(long, conflicts_with = "summary")]
    pub series: bool,
}

pub fn run_baseline(args: BaselineArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let history: Vec<MonthlyRecord> = if args.sample {
        sample_history()
    } else if let Some(history) = input::load(args.input.as_deref())? {
        history
    } else {
        return Err("--input <history.json>, stdin or --sample required for baseline".into());
    };
    let baseline = compute_trend_baseline(&history)?;
    Ok(serde_json::to_value(baseline)?)
}

pub fn run_loan_payment(args: LoanPaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment = monthly_loan_payment(args.principal, args.term, args.rate)?;
    let total_repaid = payment
        .checked_mul(Decimal::from(args.term))
        .ok_or("total repaid exceeds the decimal range")?;
    let total_interest = if payment.is_zero() {
        Decimal::ZERO
    } else {
        total_repaid
            .checked_sub(args.principal)
            .ok_or("total interest exceeds the decimal range")?
    };
    Ok(serde_json::json!({
        "monthly_payment": payment,
        "term_months": args.term,
        "total_repaid": total_repaid,
        "total_interest": total_interest,
    }))
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut sim_input: SimulationInput = if args.sample {
        SimulationInput {
            history: sample_history(),
            opening_balance: Decimal::ZERO,
            current_balance: None,
            parameters: Default::default(),
        }
    } else if let Some(data) = input::load(args.input.as_deref())? {
        data
    } else {
        return Err("--input <simulation.json>, stdin or --sample required for simulate".into());
    };

    if let Some(v) = args.opening_balance {
        sim_input.opening_balance = v;
    }
    if args.current_balance.is_some() {
        sim_input.current_balance = args.current_balance;
    }

    if let Some(preset) = args.preset {
        sim_input.parameters = ScenarioPreset::from(preset).parameters();
    }

    let params = &mut sim_input.parameters;
    if let Some(v) = args.revenue_change {
        params.revenue_change_pct = v;
    }
    if let Some(v) = args.expense_change {
        params.expense_change_pct = v;
    }
    if let Some(v) = args.one_time_income {
        params.one_time_income = v;
    }
    if let Some(v) = args.one_time_expense {
        params.one_time_expense = v;
    }
    if let Some(v) = args.loan_amount {
        params.loan_amount = v;
    }
    if let Some(v) = args.loan_term {
        params.loan_term_months = v;
    }
    if let Some(v) = args.interest_rate {
        params.annual_interest_rate_pct = v;
    }

    let output = run_simulation(&sim_input)?;

    if args.series {
        return Ok(serde_json::to_value(&output.result.projections)?);
    }

    let mut value = serde_json::to_value(&output)?;
    if args.summary {
        value["result"] = serde_json::to_value(output.result.summary())?;
    }
    Ok(value)
}

pub fn run_presets() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(scenario_presets())?)
}
