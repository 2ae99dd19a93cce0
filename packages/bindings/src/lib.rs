use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use malimax_core::ledger::{Ledger, LedgerData, MonthlyRecord};
use malimax_core::simulator::{self, SimulationInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Scenario engine
// ---------------------------------------------------------------------------

#[napi]
pub fn trend_baseline(history_json: String) -> NapiResult<String> {
    let history: Vec<MonthlyRecord> =
        serde_json::from_str(&history_json).map_err(to_napi_error)?;
    let baseline = simulator::compute_trend_baseline(&history).map_err(to_napi_error)?;
    serde_json::to_string(&baseline).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct LoanPaymentInput {
    principal: Decimal,
    term_months: u32,
    #[serde(default)]
    annual_interest_rate_pct: Decimal,
}

#[napi]
pub fn loan_payment(input_json: String) -> NapiResult<String> {
    let input: LoanPaymentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = simulator::monthly_loan_payment(
        input.principal,
        input.term_months,
        input.annual_interest_rate_pct,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&payment).map_err(to_napi_error)
}

#[napi]
pub fn simulate(input_json: String) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = simulator::run_simulation(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn simulate_summary(input_json: String) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = simulator::run_simulation(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output.result.summary()).map_err(to_napi_error)
}

/// Named scenarios with their parameters, ready to pass back to `simulate`.
#[napi]
pub fn scenario_presets() -> NapiResult<String> {
    serde_json::to_string(&simulator::scenario_presets()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

#[napi]
pub fn ledger_summary(input_json: String) -> NapiResult<String> {
    let data: LedgerData = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let ledger = Ledger::new(data).map_err(to_napi_error)?;
    let summary = ledger.summary().map_err(to_napi_error)?;
    serde_json::to_string(&summary).map_err(to_napi_error)
}
