use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::projection::ScenarioParameters;

/// Ready-made shocks offered next to the free-form simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioPreset {
    /// Losing customers: revenue down 20%
    RevenueDrop,
    /// Inflation or payroll growth: expenses up 15%
    ExpenseIncrease,
    /// 50,000 expansion loan over 12 months at 5% a year
    NewLoan,
}

impl ScenarioPreset {
    pub const ALL: [ScenarioPreset; 3] = [
        ScenarioPreset::RevenueDrop,
        ScenarioPreset::ExpenseIncrease,
        ScenarioPreset::NewLoan,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ScenarioPreset::RevenueDrop => "Revenue drop",
            ScenarioPreset::ExpenseIncrease => "Expense increase",
            ScenarioPreset::NewLoan => "New loan",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScenarioPreset::RevenueDrop => "Revenue falls 20% after losing customers",
            ScenarioPreset::ExpenseIncrease => "Expenses rise 15% from inflation and payroll growth",
            ScenarioPreset::NewLoan => "A 50,000 loan taken to fund expansion",
        }
    }

    /// Parameters for this preset; every other shock is left at its default.
    pub fn parameters(&self) -> ScenarioParameters {
        let defaults = ScenarioParameters::default();
        match self {
            ScenarioPreset::RevenueDrop => ScenarioParameters {
                revenue_change_pct: dec!(-20),
                ..defaults
            },
            ScenarioPreset::ExpenseIncrease => ScenarioParameters {
                expense_change_pct: dec!(15),
                ..defaults
            },
            ScenarioPreset::NewLoan => ScenarioParameters {
                loan_amount: dec!(50000),
                loan_term_months: 12,
                annual_interest_rate_pct: dec!(5),
                ..defaults
            },
        }
    }
}

/// A preset with its display text and parameters, for listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetInfo {
    pub preset: ScenarioPreset,
    pub title: String,
    pub description: String,
    pub parameters: ScenarioParameters,
}

pub fn scenario_presets() -> Vec<PresetInfo> {
    ScenarioPreset::ALL
        .iter()
        .map(|p| PresetInfo {
            preset: *p,
            title: p.title().to_string(),
            description: p.description().to_string(),
            parameters: p.parameters(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_every_preset_is_valid() {
        for preset in ScenarioPreset::ALL {
            assert!(preset.parameters().validate().is_ok(), "{preset:?}");
        }
    }

    #[test]
    fn test_presets_change_one_shock_each() {
        let drop = ScenarioPreset::RevenueDrop.parameters();
        assert_eq!(drop.revenue_change_pct, dec!(-20));
        assert_eq!(drop.expense_change_pct, Decimal::ZERO);
        assert_eq!(drop.loan_amount, Decimal::ZERO);

        let loan = ScenarioPreset::NewLoan.parameters();
        assert_eq!(loan.loan_amount, dec!(50000));
        assert_eq!(loan.revenue_change_pct, Decimal::ZERO);
    }

    #[test]
    fn test_preset_names_on_the_wire() {
        let json = serde_json::to_string(&ScenarioPreset::ExpenseIncrease).unwrap();
        assert_eq!(json, r#""expense_increase""#);
        let back: ScenarioPreset = serde_json::from_str(r#""new_loan""#).unwrap();
        assert_eq!(back, ScenarioPreset::NewLoan);
        assert_eq!(scenario_presets().len(), 3);
    }
}
