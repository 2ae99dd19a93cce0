use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MalimaxError, OrOverflow};
use crate::ledger::{Ledger, MonthlyRecord};
use crate::types::Money;
use crate::MalimaxResult;

/// Number of most recent months averaged into the baseline.
pub const TRAILING_WINDOW_MONTHS: usize = 3;

/// Trailing-average revenue, expense and profit: the no-shock trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendBaseline {
    pub avg_revenue: Money,
    pub avg_expense: Money,
    /// avg_revenue - avg_expense
    pub avg_profit: Money,
    /// Months actually averaged; fewer than 3 for a short history
    pub window_months: usize,
}

impl TrendBaseline {
    /// Build a baseline directly from averages, e.g. when the caller
    /// already holds them.
    pub fn from_averages(avg_revenue: Money, avg_expense: Money) -> MalimaxResult<Self> {
        Ok(TrendBaseline {
            avg_revenue,
            avg_expense,
            avg_profit: avg_revenue
                .checked_sub(avg_expense)
                .or_overflow("average profit")?,
            window_months: TRAILING_WINDOW_MONTHS,
        })
    }
}

/// Average the last `min(3, len)` months of `history`.
///
/// `history` must be non-empty and chronologically ordered. Records are not
/// re-validated here beyond the sign of their amounts.
pub fn compute_trend_baseline(history: &[MonthlyRecord]) -> MalimaxResult<TrendBaseline> {
    if history.is_empty() {
        return Err(MalimaxError::InsufficientData(
            "At least one month of history is required for a trend baseline".into(),
        ));
    }

    let window = &history[history.len().saturating_sub(TRAILING_WINDOW_MONTHS)..];
    for record in window {
        if record.revenue < Decimal::ZERO || record.expense < Decimal::ZERO {
            return Err(MalimaxError::invalid(
                format!("history:{}", record.date),
                "Revenue and expense must be non-negative",
            ));
        }
    }

    let n = Decimal::from(window.len() as u64);
    let avg_revenue = checked_sum(window.iter().map(|r| r.revenue), "trailing revenue total")? / n;
    let avg_expense = checked_sum(window.iter().map(|r| r.expense), "trailing expense total")? / n;

    debug!(
        %avg_revenue,
        %avg_expense,
        window = window.len(),
        "computed trend baseline"
    );

    Ok(TrendBaseline {
        avg_revenue,
        avg_expense,
        avg_profit: avg_revenue
            .checked_sub(avg_expense)
            .or_overflow("average profit")?,
        window_months: window.len(),
    })
}

fn checked_sum(mut values: impl Iterator<Item = Money>, context: &str) -> MalimaxResult<Money> {
    values.try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v).or_overflow(context))
}

impl Ledger {
    /// Trend baseline over the ledger's trailing months.
    pub fn trend_baseline(&self) -> MalimaxResult<TrendBaseline> {
        compute_trend_baseline(self.records())
    }
}
