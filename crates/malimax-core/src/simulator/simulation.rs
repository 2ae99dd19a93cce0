use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use super::baseline::TRAILING_WINDOW_MONTHS;
use super::projection::{project_scenario, ScenarioParameters, ScenarioResult};
use crate::ledger::{Ledger, LedgerData, MonthlyRecord};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MalimaxResult;

/// Input for an end-to-end scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Chronologically ordered monthly history (at least one month)
    pub history: Vec<MonthlyRecord>,
    /// Balance before the first month of `history`
    #[serde(default)]
    pub opening_balance: Money,
    /// Overrides the balance derived from `history`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<Money>,
    #[serde(default)]
    pub parameters: ScenarioParameters,
}

/// Validate the history, derive the trend baseline and current balance, and
/// project the scenario.
pub fn run_simulation(input: &SimulationInput) -> MalimaxResult<ComputationOutput<ScenarioResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let ledger = Ledger::new(LedgerData {
        records: input.history.clone(),
        opening_balance: input.opening_balance,
        ..LedgerData::default()
    })?;
    let baseline = ledger.trend_baseline()?;
    let current_balance = match input.current_balance {
        Some(balance) => balance,
        None => ledger.current_balance()?,
    };

    if baseline.window_months < TRAILING_WINDOW_MONTHS {
        warn!(
            window = baseline.window_months,
            "history shorter than the trailing window"
        );
        warnings.push(format!(
            "Only {} month(s) of history; baseline averages what is available",
            baseline.window_months
        ));
    }

    let result = project_scenario(&baseline, current_balance, &input.parameters)?;

    if result.already_critical {
        warnings.push(format!(
            "Balance is already negative after one-time events ({})",
            result.adjusted_opening_balance
        ));
    } else if let Some(months) = result.months_until_critical {
        warnings.push(format!(
            "Balance turns negative after {months} month(s) under this scenario"
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Trailing 3-Month Baseline Cashflow Scenario Projection",
        &serde_json::json!({
            "history_months": input.history.len(),
            "baseline_window_months": baseline.window_months,
            "current_balance_source": if input.current_balance.is_some() { "override" } else { "history" },
            "projection_horizon_months": result.projections.len(),
            "parameters": input.parameters,
        }),
        warnings,
        elapsed,
        result,
    ))
}
