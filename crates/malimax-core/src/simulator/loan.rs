use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::MalimaxError;
use crate::types::{Money, Percent};
use crate::MalimaxResult;

/// Fixed monthly payment that repays `principal` plus interest over
/// `term_months`.
///
/// Returns zero when there is no loan (`principal <= 0` or `term_months == 0`)
/// and the straight-line `principal / term_months` when the rate is zero.
/// Otherwise the standard annuity formula with monthly rate
/// `r = annual_rate_pct / 100 / 12`:
///
/// `payment = P * r * (1 + r)^n / ((1 + r)^n - 1)`
///
/// evaluated as `P * r / (1 - (1 + r)^-n)`. When `(1 + r)^n` is too large to
/// represent, the discount term is zero and the payment is the interest-only
/// `P * r` it converges to.
pub fn monthly_loan_payment(
    principal: Money,
    term_months: u32,
    annual_rate_pct: Percent,
) -> MalimaxResult<Money> {
    if annual_rate_pct < Decimal::ZERO {
        return Err(MalimaxError::invalid(
            "annual_interest_rate_pct",
            "Interest rate cannot be negative",
        ));
    }

    if principal <= Decimal::ZERO || term_months == 0 {
        return Ok(Decimal::ZERO);
    }

    let nper = Decimal::from(term_months);
    let rate = annual_rate_pct / dec!(100) / dec!(12);

    if rate.is_zero() {
        return Ok(principal / nper);
    }

    let discount = (Decimal::ONE + rate)
        .checked_powi(i64::from(term_months))
        .map(|factor| Decimal::ONE / factor)
        .unwrap_or(Decimal::ZERO);
    let annuity_factor = Decimal::ONE - discount;

    // Rates below decimal resolution leave (1 + r)^n at exactly one.
    if annuity_factor.is_zero() {
        return Ok(principal / nper);
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_div(annuity_factor))
        .ok_or_else(|| MalimaxError::Overflow {
            context: "loan payment".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_loan_pays_nothing() {
        assert_eq!(monthly_loan_payment(dec!(0), 12, dec!(5)).unwrap(), Decimal::ZERO);
        assert_eq!(monthly_loan_payment(dec!(-10), 12, dec!(5)).unwrap(), Decimal::ZERO);
        assert_eq!(
            monthly_loan_payment(dec!(100000), 0, dec!(5)).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let p = monthly_loan_payment(dec!(120000), 12, dec!(0)).unwrap();
        assert_eq!(p, dec!(10000));
        let p = monthly_loan_payment(dec!(100000), 7, dec!(0)).unwrap();
        assert_eq!(p, dec!(100000) / dec!(7));
    }

    #[test]
    fn test_amortized_payment_reference() {
        // r = 0.05 / 12, n = 12 -> 8560.75
        let p = monthly_loan_payment(dec!(100000), 12, dec!(5)).unwrap();
        assert!(
            (p - dec!(8560.75)).abs() < dec!(0.5),
            "Expected ~8560.75, got {p}"
        );
    }

    #[test]
    fn test_interest_makes_payment_exceed_straight_line() {
        let with_interest = monthly_loan_payment(dec!(50000), 24, dec!(12)).unwrap();
        assert!(with_interest > dec!(50000) / dec!(24));
        // 12% over 24 months on 50k is ~2353.67
        assert!((with_interest - dec!(2353.67)).abs() < dec!(0.5));
    }

    #[test]
    fn test_negative_rate_rejected() {
        assert!(matches!(
            monthly_loan_payment(dec!(1000), 12, dec!(-1)),
            Err(MalimaxError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_total_repaid_covers_principal() {
        let p = monthly_loan_payment(dec!(250000), 60, dec!(7.5)).unwrap();
        assert!(p * dec!(60) > dec!(250000));
    }

    #[test]
    fn test_very_long_term_converges_to_interest_only() {
        // (1 + r)^100000 is far outside decimal range; payment is P * r
        let p = monthly_loan_payment(dec!(100000), 100_000, dec!(5)).unwrap();
        let interest_only = dec!(100000) * dec!(0.05) / dec!(12);
        assert!(
            (p - interest_only).abs() < dec!(0.01),
            "Expected ~416.67, got {p}"
        );
    }

    #[test]
    fn test_long_term_payment_stays_above_interest_only() {
        let p = monthly_loan_payment(dec!(100000), 600, dec!(5)).unwrap();
        let interest_only = dec!(100000) * dec!(0.05) / dec!(12);
        assert!(p > interest_only);
        assert!(p - interest_only < dec!(50));
    }
}
