use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::payment::{payment_schedule, total_due, validate_payments, UpcomingPayment};
use super::record::{running_balances, validate_history, BalancedMonth, MonthlyRecord};
use crate::error::{MalimaxError, OrOverflow};
use crate::types::{round_currency, Money, Percent};
use crate::MalimaxResult;

// ---------------------------------------------------------------------------
// Types: Ledger
// ---------------------------------------------------------------------------

/// A named share of monthly expenses, e.g. payroll at 38.5%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub name: String,
    /// Share of the month's total expense (0..=100)
    pub percentage: Percent,
}

/// Partial update for a single month. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthPatch {
    pub month: Option<String>,
    pub revenue: Option<Money>,
    pub expense: Option<Money>,
}

/// Everything a ledger is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerData {
    /// Chronologically ordered months
    pub records: Vec<MonthlyRecord>,
    /// Balance carried in before the first record
    #[serde(default)]
    pub opening_balance: Money,
    #[serde(default)]
    pub expense_categories: Vec<ExpenseCategory>,
    /// Known outflows due after the latest recorded month
    #[serde(default)]
    pub upcoming_payments: Vec<UpcomingPayment>,
}

/// Headline dashboard figures for the latest month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    /// Profit of the latest month
    pub monthly_profit: Money,
    /// Running balance after the latest month
    pub cashflow: Money,
    /// Expense of the latest month
    pub total_expenses: Money,
    /// Month-over-month revenue growth in percent; null when undefined
    pub growth_rate_pct: Option<Percent>,
}

/// One category's slice of the latest month's expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub name: String,
    pub percentage: Percent,
    /// Whole currency units
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub months: Vec<BalancedMonth>,
    pub kpi: Kpi,
    pub expense_breakdown: Vec<ExpenseShare>,
    /// Ordered by due date
    pub upcoming_payments: Vec<UpcomingPayment>,
    pub upcoming_total: Money,
}

/// The caller-owned financial history shared across screens.
///
/// Every mutation validates before it applies, so a ledger is always
/// chronologically ordered with non-negative amounts.
#[derive(Debug, Clone)]
pub struct Ledger {
    current: LedgerData,
    initial: LedgerData,
}

impl Ledger {
    pub fn new(data: LedgerData) -> MalimaxResult<Self> {
        validate_history(&data.records)?;
        validate_categories(&data.expense_categories)?;
        validate_payments(&data.upcoming_payments)?;
        running_balances(&data.records, data.opening_balance)?;
        Ok(Ledger {
            current: data.clone(),
            initial: data,
        })
    }

    pub fn from_records(records: Vec<MonthlyRecord>) -> MalimaxResult<Self> {
        Self::new(LedgerData {
            records,
            ..LedgerData::default()
        })
    }

    pub fn records(&self) -> &[MonthlyRecord] {
        &self.current.records
    }

    pub fn opening_balance(&self) -> Money {
        self.current.opening_balance
    }

    pub fn expense_categories(&self) -> &[ExpenseCategory] {
        &self.current.expense_categories
    }

    pub fn upcoming_payments(&self) -> &[UpcomingPayment] {
        &self.current.upcoming_payments
    }

    pub fn data(&self) -> &LedgerData {
        &self.current
    }

    /// Replace the whole history.
    pub fn set_months(&mut self, records: Vec<MonthlyRecord>) -> MalimaxResult<()> {
        validate_history(&records)?;
        debug!(months = records.len(), "replaced ledger history");
        self.current.records = records;
        Ok(())
    }

    /// Append a month; it must come after the latest recorded month.
    pub fn add_month(&mut self, record: MonthlyRecord) -> MalimaxResult<()> {
        record.validate()?;
        if let Some(last) = self.current.records.last() {
            if record.period()? <= last.period()? {
                return Err(MalimaxError::invalid(
                    "date",
                    format!("{} must be later than {}", record.date, last.date),
                ));
            }
        }
        debug!(date = %record.date, "added month");
        self.current.records.push(record);
        Ok(())
    }

    /// Apply a partial update to the month with the given `YYYY-MM` date.
    pub fn update_month(&mut self, date: &str, patch: MonthPatch) -> MalimaxResult<()> {
        let slot = self
            .current
            .records
            .iter_mut()
            .find(|r| r.date == date)
            .ok_or_else(|| MalimaxError::invalid("date", format!("No month recorded for {date}")))?;

        let mut updated = slot.clone();
        if let Some(month) = patch.month {
            updated.month = month;
        }
        if let Some(revenue) = patch.revenue {
            updated.revenue = revenue;
        }
        if let Some(expense) = patch.expense {
            updated.expense = expense;
        }
        updated.validate()?;

        debug!(date, "updated month");
        *slot = updated;
        Ok(())
    }

    pub fn set_expense_categories(&mut self, categories: Vec<ExpenseCategory>) -> MalimaxResult<()> {
        validate_categories(&categories)?;
        self.current.expense_categories = categories;
        Ok(())
    }

    pub fn set_upcoming_payments(&mut self, payments: Vec<UpcomingPayment>) -> MalimaxResult<()> {
        validate_payments(&payments)?;
        self.current.upcoming_payments = payments;
        Ok(())
    }

    pub fn add_upcoming_payment(&mut self, payment: UpcomingPayment) -> MalimaxResult<()> {
        payment.validate()?;
        debug!(title = %payment.title, date = %payment.date, "scheduled payment");
        self.current.upcoming_payments.push(payment);
        Ok(())
    }

    /// Restore the data the ledger was constructed with.
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
    }

    pub fn with_balances(&self) -> MalimaxResult<Vec<BalancedMonth>> {
        running_balances(&self.current.records, self.current.opening_balance)
    }

    /// Running balance after the latest month, or the opening balance when
    /// no months are recorded.
    pub fn current_balance(&self) -> MalimaxResult<Money> {
        self.current
            .records
            .iter()
            .try_fold(self.current.opening_balance, |balance, r| {
                balance.checked_add(r.profit()?).or_overflow("current balance")
            })
    }

    pub fn summary(&self) -> MalimaxResult<LedgerSummary> {
        let months = self.with_balances()?;
        let latest = months.last();
        let previous = months.len().checked_sub(2).and_then(|i| months.get(i));

        let monthly_profit = latest.map(|m| m.profit).unwrap_or(Decimal::ZERO);
        let cashflow = latest
            .map(|m| m.balance)
            .unwrap_or(self.current.opening_balance);
        let total_expenses = latest.map(|m| m.record.expense).unwrap_or(Decimal::ZERO);

        let growth_rate_pct = match (previous, latest) {
            (Some(prev), Some(cur)) if !prev.record.revenue.is_zero() => Some(
                (cur.record.revenue - prev.record.revenue)
                    .checked_div(prev.record.revenue)
                    .and_then(|ratio| ratio.checked_mul(dec!(100)))
                    .or_overflow("revenue growth rate")?,
            ),
            _ => None,
        };

        let expense_breakdown = self
            .current
            .expense_categories
            .iter()
            .map(|c| {
                let value = total_expenses
                    .checked_mul(c.percentage)
                    .map(|v| v / dec!(100))
                    .or_overflow("expense breakdown")?;
                Ok(ExpenseShare {
                    name: c.name.clone(),
                    percentage: c.percentage,
                    value: round_currency(value),
                })
            })
            .collect::<MalimaxResult<Vec<_>>>()?;

        let upcoming_total = total_due(&self.current.upcoming_payments)?;

        Ok(LedgerSummary {
            months,
            kpi: Kpi {
                monthly_profit,
                cashflow,
                total_expenses,
                growth_rate_pct,
            },
            expense_breakdown,
            upcoming_payments: payment_schedule(&self.current.upcoming_payments),
            upcoming_total,
        })
    }
}

fn validate_categories(categories: &[ExpenseCategory]) -> MalimaxResult<()> {
    for c in categories {
        if c.percentage < Decimal::ZERO || c.percentage > dec!(100) {
            return Err(MalimaxError::invalid(
                format!("expense_categories:{}", c.name),
                "Percentage must be between 0 and 100",
            ));
        }
    }
    let total: Percent = categories.iter().map(|c| c.percentage).sum();
    if !categories.is_empty() && total != dec!(100) {
        warn!(%total, "expense category percentages do not sum to 100");
    }
    Ok(())
}
