use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::baseline::TrendBaseline;
use super::loan::monthly_loan_payment;
use crate::error::{MalimaxError, OrOverflow};
use crate::types::{Money, Percent};
use crate::MalimaxResult;

/// Months covered by the projection series.
pub const PROJECTION_HORIZON_MONTHS: u32 = 12;

/// Horizon of the headline projected balance.
pub const BALANCE_HORIZON_MONTHS: u32 = 6;

const REVENUE_CHANGE_LIMIT_PCT: Decimal = dec!(50);
const EXPENSE_CHANGE_LIMIT_PCT: Decimal = dec!(30);
const DEFAULT_LOAN_TERM_MONTHS: u32 = 12;

// ---------------------------------------------------------------------------
// Types: Scenario inputs
// ---------------------------------------------------------------------------

/// User-adjustable shocks applied on top of the trend baseline.
///
/// Every field is optional on input; omitted fields default to zero and the
/// loan term to 12 months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParameters {
    /// Change in monthly revenue, -50..=50 percent
    pub revenue_change_pct: Percent,
    /// Change in monthly expense, -30..=30 percent
    pub expense_change_pct: Percent,
    /// Cash received once, at month 0
    pub one_time_income: Money,
    /// Cash paid once, at month 0
    pub one_time_expense: Money,
    /// Loan principal, credited at month 0
    pub loan_amount: Money,
    pub loan_term_months: u32,
    pub annual_interest_rate_pct: Percent,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        ScenarioParameters {
            revenue_change_pct: Decimal::ZERO,
            expense_change_pct: Decimal::ZERO,
            one_time_income: Decimal::ZERO,
            one_time_expense: Decimal::ZERO,
            loan_amount: Decimal::ZERO,
            loan_term_months: DEFAULT_LOAN_TERM_MONTHS,
            annual_interest_rate_pct: Decimal::ZERO,
        }
    }
}

impl ScenarioParameters {
    pub fn validate(&self) -> MalimaxResult<()> {
        if self.revenue_change_pct.abs() > REVENUE_CHANGE_LIMIT_PCT {
            return Err(MalimaxError::invalid(
                "revenue_change_pct",
                format!(
                    "Must be between -{REVENUE_CHANGE_LIMIT_PCT} and {REVENUE_CHANGE_LIMIT_PCT} (got {})",
                    self.revenue_change_pct
                ),
            ));
        }
        if self.expense_change_pct.abs() > EXPENSE_CHANGE_LIMIT_PCT {
            return Err(MalimaxError::invalid(
                "expense_change_pct",
                format!(
                    "Must be between -{EXPENSE_CHANGE_LIMIT_PCT} and {EXPENSE_CHANGE_LIMIT_PCT} (got {})",
                    self.expense_change_pct
                ),
            ));
        }

        let non_negative = [
            ("one_time_income", self.one_time_income),
            ("one_time_expense", self.one_time_expense),
            ("loan_amount", self.loan_amount),
            ("annual_interest_rate_pct", self.annual_interest_rate_pct),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(MalimaxError::invalid(field, "Cannot be negative"));
            }
        }

        if self.loan_amount > Decimal::ZERO && self.loan_term_months == 0 {
            return Err(MalimaxError::invalid(
                "loan_term_months",
                "A loan needs a term of at least one month",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Types: Scenario outputs
// ---------------------------------------------------------------------------

/// Balance after `month_index` months under both trajectories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// 1-based month offset from today
    pub month_index: u32,
    pub label: String,
    /// current_balance + avg_profit * month_index, no shocks applied
    pub baseline_projection: Money,
    /// Running balance under the scenario
    pub scenario_projection: Money,
    /// Scenario profit added in this month
    pub monthly_profit: Money,
}

/// Annualized (x12) change versus the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactDeltas {
    pub revenue_impact: Money,
    pub expense_impact: Money,
    pub profit_impact: Money,
}

/// Full-precision outcome of a scenario. Round only for display via
/// [`ScenarioResult::summary`](super::summary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub baseline: TrendBaseline,
    pub current_balance: Money,
    /// Current balance after one-time events and loan principal
    pub adjusted_opening_balance: Money,
    pub projected_balance_6m: Money,
    pub revised_monthly_revenue: Money,
    pub revised_monthly_expense: Money,
    pub monthly_loan_payment: Money,
    pub revised_monthly_profit: Money,
    /// Whole months before the balance turns negative; null when monthly
    /// profit is not negative. Zero when already critical.
    pub months_until_critical: Option<u64>,
    /// The adjusted opening balance is already below zero
    pub already_critical: bool,
    pub projections: Vec<ProjectionPoint>,
    pub impact: ImpactDeltas,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Apply `params` to `baseline` and project the balance forward.
///
/// One-time events and the loan principal land at month 0; each following
/// month adds the revised profit (net of the loan payment). Values are
/// accumulated unrounded.
pub fn project_scenario(
    baseline: &TrendBaseline,
    current_balance: Money,
    params: &ScenarioParameters,
) -> MalimaxResult<ScenarioResult> {
    params.validate()?;

    let revised_monthly_revenue = apply_change(baseline.avg_revenue, params.revenue_change_pct)
        .or_overflow("revised monthly revenue")?;
    let revised_monthly_expense = apply_change(baseline.avg_expense, params.expense_change_pct)
        .or_overflow("revised monthly expense")?;
    let loan_payment = monthly_loan_payment(
        params.loan_amount,
        params.loan_term_months,
        params.annual_interest_rate_pct,
    )?;
    let revised_monthly_profit = revised_monthly_revenue
        .checked_sub(revised_monthly_expense)
        .and_then(|p| p.checked_sub(loan_payment))
        .or_overflow("revised monthly profit")?;

    let adjusted_opening_balance = current_balance
        .checked_add(params.one_time_income)
        .and_then(|b| b.checked_sub(params.one_time_expense))
        .and_then(|b| b.checked_add(params.loan_amount))
        .or_overflow("adjusted opening balance")?;
    let projected_balance_6m = revised_monthly_profit
        .checked_mul(Decimal::from(BALANCE_HORIZON_MONTHS))
        .and_then(|p| adjusted_opening_balance.checked_add(p))
        .or_overflow("projected balance at month 6")?;

    let already_critical = adjusted_opening_balance < Decimal::ZERO;
    let months_until_critical = if revised_monthly_profit < Decimal::ZERO {
        Some(if already_critical {
            0
        } else {
            months_of_runway(adjusted_opening_balance, revised_monthly_profit.abs())
        })
    } else {
        None
    };

    let mut projections = Vec::with_capacity(PROJECTION_HORIZON_MONTHS as usize);
    let mut running_balance = adjusted_opening_balance;
    for i in 1..=PROJECTION_HORIZON_MONTHS {
        running_balance = running_balance
            .checked_add(revised_monthly_profit)
            .or_overflow("scenario projection")?;
        let baseline_projection = baseline
            .avg_profit
            .checked_mul(Decimal::from(i))
            .and_then(|p| current_balance.checked_add(p))
            .or_overflow("baseline projection")?;
        projections.push(ProjectionPoint {
            month_index: i,
            label: format!("Month {i}"),
            baseline_projection,
            scenario_projection: running_balance,
            monthly_profit: revised_monthly_profit,
        });
    }

    let impact = ImpactDeltas {
        revenue_impact: annualized_delta(revised_monthly_revenue, baseline.avg_revenue)
            .or_overflow("revenue impact")?,
        expense_impact: annualized_delta(revised_monthly_expense, baseline.avg_expense)
            .or_overflow("expense impact")?,
        profit_impact: annualized_delta(revised_monthly_profit, baseline.avg_profit)
            .or_overflow("profit impact")?,
    };

    if already_critical {
        warn!(%adjusted_opening_balance, "balance is already negative at month 0");
    }
    debug!(
        %revised_monthly_profit,
        %projected_balance_6m,
        ?months_until_critical,
        "projected scenario"
    );

    Ok(ScenarioResult {
        baseline: baseline.clone(),
        current_balance,
        adjusted_opening_balance,
        projected_balance_6m,
        revised_monthly_revenue,
        revised_monthly_expense,
        monthly_loan_payment: loan_payment,
        revised_monthly_profit,
        months_until_critical,
        already_critical,
        projections,
        impact,
    })
}

/// value * (1 + pct / 100)
fn apply_change(value: Money, pct: Percent) -> Option<Money> {
    value.checked_mul(Decimal::ONE + pct / dec!(100))
}

/// (revised - base) * 12
fn annualized_delta(revised: Money, base: Money) -> Option<Money> {
    revised
        .checked_sub(base)?
        .checked_mul(Decimal::from(PROJECTION_HORIZON_MONTHS))
}

/// floor(balance / burn), saturating when the quotient exceeds u64.
fn months_of_runway(balance: Money, burn: Money) -> u64 {
    balance
        .checked_div(burn)
        .and_then(|months| months.floor().to_u64())
        .unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn baseline() -> TrendBaseline {
        TrendBaseline::from_averages(dec!(58000), dec!(42000)).unwrap()
    }

    #[test]
    fn test_revenue_drop_stays_profitable() {
        let params = ScenarioParameters {
            revenue_change_pct: dec!(-20),
            annual_interest_rate_pct: dec!(5),
            ..ScenarioParameters::default()
        };
        let r = project_scenario(&baseline(), dec!(87000), &params).unwrap();
        assert_eq!(r.revised_monthly_revenue, dec!(46400));
        assert_eq!(r.revised_monthly_profit, dec!(4400));
        assert_eq!(r.projected_balance_6m, dec!(113400));
        assert_eq!(r.months_until_critical, None);
        assert!(!r.already_critical);
    }

    #[test]
    fn test_negative_profit_runway() {
        let params = ScenarioParameters {
            revenue_change_pct: dec!(-40),
            expense_change_pct: dec!(15),
            ..ScenarioParameters::default()
        };
        let r = project_scenario(&baseline(), dec!(87000), &params).unwrap();
        assert_eq!(r.revised_monthly_revenue, dec!(34800));
        assert_eq!(r.revised_monthly_expense, dec!(48300));
        assert_eq!(r.revised_monthly_profit, dec!(-13500));
        // floor(87000 / 13500) = 6
        assert_eq!(r.months_until_critical, Some(6));
    }

    #[test]
    fn test_one_time_events_and_loan_land_at_month_zero() {
        let params = ScenarioParameters {
            one_time_income: dec!(5000),
            one_time_expense: dec!(2000),
            loan_amount: dec!(12000),
            loan_term_months: 12,
            ..ScenarioParameters::default()
        };
        let r = project_scenario(&baseline(), dec!(1000), &params).unwrap();
        assert_eq!(r.adjusted_opening_balance, dec!(16000));
        assert_eq!(r.monthly_loan_payment, dec!(1000));
        assert_eq!(r.revised_monthly_profit, dec!(15000));
        assert_eq!(r.projections[0].scenario_projection, dec!(31000));
        assert_eq!(r.projections[0].baseline_projection, dec!(17000));
    }

    #[test]
    fn test_already_critical_clamps_to_zero() {
        let params = ScenarioParameters {
            revenue_change_pct: dec!(-50),
            one_time_expense: dec!(50000),
            ..ScenarioParameters::default()
        };
        let r = project_scenario(&baseline(), dec!(10000), &params).unwrap();
        assert!(r.adjusted_opening_balance < Decimal::ZERO);
        assert!(r.revised_monthly_profit < Decimal::ZERO);
        assert_eq!(r.months_until_critical, Some(0));
        assert!(r.already_critical);
    }

    #[test]
    fn test_negative_balance_with_positive_profit_has_no_runway() {
        let params = ScenarioParameters {
            one_time_expense: dec!(100000),
            ..ScenarioParameters::default()
        };
        let r = project_scenario(&baseline(), dec!(0), &params).unwrap();
        assert!(r.already_critical);
        assert_eq!(r.months_until_critical, None);
    }

    #[test]
    fn test_zero_opening_balance_with_losses_is_zero_months() {
        let params = ScenarioParameters {
            revenue_change_pct: dec!(-50),
            ..ScenarioParameters::default()
        };
        let r = project_scenario(&baseline(), dec!(0), &params).unwrap();
        assert_eq!(r.months_until_critical, Some(0));
        assert!(!r.already_critical);
    }

    #[test]
    fn test_impact_deltas_are_annualized() {
        let params = ScenarioParameters {
            revenue_change_pct: dec!(10),
            expense_change_pct: dec!(-10),
            ..ScenarioParameters::default()
        };
        let r = project_scenario(&baseline(), dec!(0), &params).unwrap();
        assert_eq!(r.impact.revenue_impact, dec!(69600));
        assert_eq!(r.impact.expense_impact, dec!(-50400));
        assert_eq!(r.impact.profit_impact, dec!(120000));
    }

    #[test]
    fn test_series_has_twelve_points() {
        let r = project_scenario(&baseline(), dec!(0), &ScenarioParameters::default()).unwrap();
        assert_eq!(r.projections.len(), 12);
        assert_eq!(r.projections[11].month_index, 12);
        assert_eq!(r.projections[11].label, "Month 12");
    }

    #[test]
    fn test_out_of_range_percentages_rejected() {
        let too_high = ScenarioParameters {
            revenue_change_pct: dec!(50.1),
            ..ScenarioParameters::default()
        };
        assert!(project_scenario(&baseline(), dec!(0), &too_high).is_err());

        let too_low = ScenarioParameters {
            expense_change_pct: dec!(-31),
            ..ScenarioParameters::default()
        };
        assert!(project_scenario(&baseline(), dec!(0), &too_low).is_err());

        let edge = ScenarioParameters {
            revenue_change_pct: dec!(-50),
            expense_change_pct: dec!(30),
            ..ScenarioParameters::default()
        };
        assert!(project_scenario(&baseline(), dec!(0), &edge).is_ok());
    }

    #[test]
    fn test_loan_without_term_rejected() {
        let params = ScenarioParameters {
            loan_amount: dec!(10000),
            loan_term_months: 0,
            ..ScenarioParameters::default()
        };
        assert!(matches!(
            project_scenario(&baseline(), dec!(0), &params),
            Err(MalimaxError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_zero_term_without_loan_is_fine() {
        let params = ScenarioParameters {
            loan_term_months: 0,
            ..ScenarioParameters::default()
        };
        let r = project_scenario(&baseline(), dec!(0), &params).unwrap();
        assert_eq!(r.monthly_loan_payment, Decimal::ZERO);
    }

    #[test]
    fn test_negative_amounts_rejected() {
        for params in [
            ScenarioParameters {
                one_time_income: dec!(-1),
                ..ScenarioParameters::default()
            },
            ScenarioParameters {
                loan_amount: dec!(-1),
                ..ScenarioParameters::default()
            },
            ScenarioParameters {
                annual_interest_rate_pct: dec!(-0.5),
                ..ScenarioParameters::default()
            },
        ] {
            assert!(project_scenario(&baseline(), dec!(0), &params).is_err());
        }
    }

    #[test]
    fn test_parameters_deserialize_with_defaults() {
        let params: ScenarioParameters =
            serde_json::from_str(r#"{"revenue_change_pct": "-20"}"#).unwrap();
        assert_eq!(params.revenue_change_pct, dec!(-20));
        assert_eq!(params.loan_term_months, 12);
        assert_eq!(params.loan_amount, Decimal::ZERO);
    }

    #[test]
    fn test_balance_beyond_decimal_range_is_overflow() {
        let params = ScenarioParameters {
            one_time_income: dec!(1),
            ..ScenarioParameters::default()
        };
        assert!(matches!(
            project_scenario(&baseline(), Decimal::MAX, &params),
            Err(MalimaxError::Overflow { .. })
        ));
    }

    #[test]
    fn test_accumulated_projection_beyond_decimal_range_is_overflow() {
        let huge = TrendBaseline::from_averages(Decimal::MAX / dec!(4), Decimal::ZERO).unwrap();
        assert!(matches!(
            project_scenario(&huge, Decimal::ZERO, &ScenarioParameters::default()),
            Err(MalimaxError::Overflow { .. })
        ));
    }

    #[test]
    fn test_revised_revenue_beyond_decimal_range_is_overflow() {
        let huge = TrendBaseline::from_averages(Decimal::MAX, Decimal::ZERO).unwrap();
        let params = ScenarioParameters {
            revenue_change_pct: dec!(10),
            ..ScenarioParameters::default()
        };
        assert!(matches!(
            project_scenario(&huge, Decimal::ZERO, &params),
            Err(MalimaxError::Overflow { .. })
        ));
    }

    #[test]
    fn test_runway_saturates() {
        assert_eq!(months_of_runway(dec!(100), dec!(30)), 3);
        assert_eq!(
            months_of_runway(Decimal::MAX, dec!(0.0000000001)),
            u64::MAX
        );
    }
}
