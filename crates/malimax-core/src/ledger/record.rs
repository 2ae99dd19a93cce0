use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MalimaxError, OrOverflow};
use crate::types::Money;
use crate::MalimaxResult;

// ---------------------------------------------------------------------------
// Types: Monthly history
// ---------------------------------------------------------------------------

/// One month of actual or sample revenue and expense figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Display label, e.g. "Jan"
    pub month: String,
    /// Calendar year, when the provider supplies it separately
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Calendar month in `YYYY-MM` form
    pub date: String,
    /// Inflow for the month (>= 0)
    pub revenue: Money,
    /// Outflow for the month (>= 0)
    pub expense: Money,
}

impl MonthlyRecord {
    pub fn new(
        month: impl Into<String>,
        date: impl Into<String>,
        revenue: Money,
        expense: Money,
    ) -> Self {
        MonthlyRecord {
            month: month.into(),
            year: None,
            date: date.into(),
            revenue,
            expense,
        }
    }

    /// revenue - expense
    pub fn profit(&self) -> MalimaxResult<Money> {
        self.revenue
            .checked_sub(self.expense)
            .or_overflow("monthly profit")
    }

    /// First day of the record's calendar month.
    pub fn period(&self) -> MalimaxResult<NaiveDate> {
        parse_period(&self.date)
    }

    /// Check amounts, the date format, and that `year` agrees with `date`.
    pub fn validate(&self) -> MalimaxResult<()> {
        if self.revenue < Decimal::ZERO {
            return Err(MalimaxError::invalid(
                format!("{}.revenue", self.date),
                "Revenue cannot be negative",
            ));
        }
        if self.expense < Decimal::ZERO {
            return Err(MalimaxError::invalid(
                format!("{}.expense", self.date),
                "Expense cannot be negative",
            ));
        }
        let period = self.period()?;
        if let Some(year) = self.year {
            if year != period.year() {
                return Err(MalimaxError::invalid(
                    format!("{}.year", self.date),
                    format!("Year {year} does not match date {}", self.date),
                ));
            }
        }
        Ok(())
    }
}

/// A record together with its derived profit and running balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancedMonth {
    #[serde(flatten)]
    pub record: MonthlyRecord,
    pub profit: Money,
    pub balance: Money,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a `YYYY-MM` month into the first day of that month.
pub fn parse_period(date: &str) -> MalimaxResult<NaiveDate> {
    if date.len() != 7 {
        return Err(MalimaxError::DateError(format!(
            "'{date}' is not a YYYY-MM month"
        )));
    }
    NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d")
        .map_err(|e| MalimaxError::DateError(format!("'{date}' is not a YYYY-MM month: {e}")))
}

/// Validate every record and require strictly increasing months.
///
/// An empty slice is valid here; operations that need data reject it
/// themselves.
pub fn validate_history(records: &[MonthlyRecord]) -> MalimaxResult<()> {
    let mut previous: Option<NaiveDate> = None;
    for record in records {
        record.validate()?;
        let period = record.period()?;
        if let Some(prev) = previous {
            if period <= prev {
                return Err(MalimaxError::invalid(
                    "history",
                    format!(
                        "Months must be in chronological order; {} does not follow {}",
                        record.date,
                        prev.format("%Y-%m")
                    ),
                ));
            }
        }
        previous = Some(period);
    }
    Ok(())
}

/// Attach profit and cumulative balance to each record.
///
/// `balance[0] = opening_balance + profit[0]`,
/// `balance[i] = balance[i-1] + profit[i]`.
pub fn running_balances(
    records: &[MonthlyRecord],
    opening_balance: Money,
) -> MalimaxResult<Vec<BalancedMonth>> {
    let mut balance = opening_balance;
    records
        .iter()
        .map(|record| {
            let profit = record.profit()?;
            balance = balance
                .checked_add(profit)
                .or_overflow("running balance")?;
            Ok(BalancedMonth {
                record: record.clone(),
                profit,
                balance,
            })
        })
        .collect()
}
