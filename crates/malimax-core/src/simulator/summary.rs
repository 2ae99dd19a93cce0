use serde::{Deserialize, Serialize};

use super::projection::ScenarioResult;
use crate::types::{round_currency, Money};

/// Whole-currency-unit view of a [`ScenarioResult`] for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub current_balance: Money,
    pub projected_balance_6m: Money,
    pub revised_monthly_revenue: Money,
    pub revised_monthly_expense: Money,
    pub revised_monthly_profit: Money,
    pub monthly_loan_payment: Money,
    pub months_until_critical: Option<u64>,
    pub already_critical: bool,
    pub revenue_impact: Money,
    pub expense_impact: Money,
    pub profit_impact: Money,
}

impl ScenarioResult {
    /// Rounded copy of the headline figures. The projection series stays in
    /// full precision on the result itself.
    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            current_balance: round_currency(self.current_balance),
            projected_balance_6m: round_currency(self.projected_balance_6m),
            revised_monthly_revenue: round_currency(self.revised_monthly_revenue),
            revised_monthly_expense: round_currency(self.revised_monthly_expense),
            revised_monthly_profit: round_currency(self.revised_monthly_profit),
            monthly_loan_payment: round_currency(self.monthly_loan_payment),
            months_until_critical: self.months_until_critical,
            already_critical: self.already_critical,
            revenue_impact: round_currency(self.impact.revenue_impact),
            expense_impact: round_currency(self.impact.expense_impact),
            profit_impact: round_currency(self.impact.profit_impact),
        }
    }
}
