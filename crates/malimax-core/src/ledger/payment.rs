use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MalimaxError, OrOverflow};
use crate::types::Money;
use crate::MalimaxResult;

// ---------------------------------------------------------------------------
// Types: Scheduled outflows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Operating outflow such as payroll or rent
    Expense,
    Tax,
}

/// A known outflow due on a specific day, e.g. payroll on the 1st.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingPayment {
    pub title: String,
    /// Amount due (>= 0)
    pub amount: Money,
    /// Due date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: PaymentKind,
}

impl UpcomingPayment {
    pub fn new(title: impl Into<String>, amount: Money, date: NaiveDate, kind: PaymentKind) -> Self {
        UpcomingPayment {
            title: title.into(),
            amount,
            date,
            kind,
        }
    }

    pub fn validate(&self) -> MalimaxResult<()> {
        if self.amount < Decimal::ZERO {
            return Err(MalimaxError::invalid(
                format!("upcoming_payments:{}", self.title),
                "Amount cannot be negative",
            ));
        }
        Ok(())
    }
}

pub fn validate_payments(payments: &[UpcomingPayment]) -> MalimaxResult<()> {
    payments.iter().try_for_each(UpcomingPayment::validate)
}

/// Payments ordered by due date. Payments due the same day keep their
/// insertion order.
pub fn payment_schedule(payments: &[UpcomingPayment]) -> Vec<UpcomingPayment> {
    let mut schedule = payments.to_vec();
    schedule.sort_by_key(|p| p.date);
    schedule
}

/// Sum of all scheduled amounts.
pub fn total_due(payments: &[UpcomingPayment]) -> MalimaxResult<Money> {
    payments.iter().try_fold(Decimal::ZERO, |acc, p| {
        acc.checked_add(p.amount).or_overflow("upcoming payments total")
    })
}
