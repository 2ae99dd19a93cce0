//! Sample datasets for demos and tests.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::ledger::{ExpenseCategory, LedgerData, MonthlyRecord, PaymentKind, UpcomingPayment};

/// Twelve months of sample figures for 2025.
pub fn sample_history() -> Vec<MonthlyRecord> {
    let rows = [
        ("Jan", dec!(43400), dec!(32000)),
        ("Feb", dec!(52000), dec!(35000)),
        ("Mar", dec!(48000), dec!(31000)),
        ("Apr", dec!(58000), dec!(38000)),
        ("May", dec!(62000), dec!(42000)),
        ("Jun", dec!(55000), dec!(39000)),
        ("Jul", dec!(60000), dec!(40000)),
        ("Aug", dec!(61000), dec!(45000)),
        ("Sep", dec!(56000), dec!(48000)),
        ("Oct", dec!(62000), dec!(50000)),
        ("Nov", dec!(70000), dec!(52000)),
        ("Dec", dec!(59000), dec!(51000)),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (label, revenue, expense))| MonthlyRecord {
            month: (*label).to_string(),
            year: Some(2025),
            date: format!("2025-{:02}", i + 1),
            revenue: *revenue,
            expense: *expense,
        })
        .collect()
}

/// Default expense split used by the dashboard.
pub fn sample_expense_categories() -> Vec<ExpenseCategory> {
    [
        ("Payroll", dec!(38.5)),
        ("Rent", dec!(20.5)),
        ("Utilities", dec!(7.7)),
        ("Marketing", dec!(17.9)),
        ("Other", dec!(15.4)),
    ]
    .into_iter()
    .map(|(name, percentage)| ExpenseCategory {
        name: name.to_string(),
        percentage,
    })
    .collect()
}

/// Payments due in October 2025.
pub fn sample_upcoming_payments() -> Vec<UpcomingPayment> {
    [
        ("Payroll", dec!(15000), 1, PaymentKind::Expense),
        ("Tax payment", dec!(5500), 15, PaymentKind::Tax),
        ("Rent", dec!(8000), 1, PaymentKind::Expense),
    ]
    .into_iter()
    .filter_map(|(title, amount, day, kind)| {
        NaiveDate::from_ymd_opt(2025, 10, day)
            .map(|date| UpcomingPayment::new(title, amount, date, kind))
    })
    .collect()
}

pub fn sample_ledger_data() -> LedgerData {
    LedgerData {
        records: sample_history(),
        opening_balance: rust_decimal::Decimal::ZERO,
        expense_categories: sample_expense_categories(),
        upcoming_payments: sample_upcoming_payments(),
    }
}

#[cfg(feature = "fixtures")]
pub use seasonal::SeasonalHistoryBuilder;

#[cfg(feature = "fixtures")]
mod seasonal {
    use chrono::{Datelike, Months, NaiveDate};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::error::{MalimaxError, OrOverflow};
    use crate::ledger::{parse_period, MonthlyRecord};
    use crate::types::Money;
    use crate::MalimaxResult;

    const MONTH_LABELS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    /// Seasonal revenue multipliers, January first. Peaks in late spring and
    /// November, dips in January and September.
    const SEASONALITY: [Decimal; 12] = [
        dec!(0.85),
        dec!(0.95),
        dec!(0.90),
        dec!(1.05),
        dec!(1.10),
        dec!(1.00),
        dec!(1.05),
        dec!(1.05),
        dec!(0.95),
        dec!(1.05),
        dec!(1.20),
        dec!(0.85),
    ];

    /// Deterministic pseudo-random monthly history with seasonality.
    ///
    /// The same seed always yields the same series.
    #[derive(Debug, Clone)]
    pub struct SeasonalHistoryBuilder {
        start: String,
        months: u32,
        base_revenue: Money,
        expense_ratio: Decimal,
        noise_pct: u32,
        seed: u64,
    }

    impl Default for SeasonalHistoryBuilder {
        fn default() -> Self {
            SeasonalHistoryBuilder {
                start: "2025-01".into(),
                months: 12,
                base_revenue: dec!(55000),
                expense_ratio: dec!(0.75),
                noise_pct: 8,
                seed: 42,
            }
        }
    }

    impl SeasonalHistoryBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        /// First month, `YYYY-MM`
        pub fn start(mut self, start: impl Into<String>) -> Self {
            self.start = start.into();
            self
        }

        pub fn months(mut self, months: u32) -> Self {
            self.months = months;
            self
        }

        pub fn base_revenue(mut self, base_revenue: Money) -> Self {
            self.base_revenue = base_revenue;
            self
        }

        /// Expense as a fraction of revenue before noise
        pub fn expense_ratio(mut self, ratio: Decimal) -> Self {
            self.expense_ratio = ratio;
            self
        }

        /// Maximum +/- percentage of uniform noise on each amount
        pub fn noise_pct(mut self, noise_pct: u32) -> Self {
            self.noise_pct = noise_pct;
            self
        }

        pub fn seed(mut self, seed: u64) -> Self {
            self.seed = seed;
            self
        }

        pub fn build(&self) -> MalimaxResult<Vec<MonthlyRecord>> {
            if self.base_revenue < Decimal::ZERO {
                return Err(MalimaxError::invalid("base_revenue", "Cannot be negative"));
            }
            if self.expense_ratio < Decimal::ZERO {
                return Err(MalimaxError::invalid("expense_ratio", "Cannot be negative"));
            }
            if self.noise_pct >= 100 {
                return Err(MalimaxError::invalid("noise_pct", "Must be below 100"));
            }

            let first = parse_period(&self.start)?;
            let mut rng = StdRng::seed_from_u64(self.seed);
            let noise = i64::from(self.noise_pct);

            (0..self.months)
                .map(|offset| {
                    let date = first
                        .checked_add_months(Months::new(offset))
                        .ok_or_else(|| MalimaxError::DateError("Month out of range".into()))?;
                    let season = SEASONALITY[date.month0() as usize];
                    let revenue_noise = jitter(&mut rng, noise);
                    let expense_noise = jitter(&mut rng, noise);

                    let revenue = self
                        .base_revenue
                        .checked_mul(season * revenue_noise)
                        .or_overflow("seasonal revenue")?
                        .round();
                    let expense = self
                        .base_revenue
                        .checked_mul(self.expense_ratio)
                        .and_then(|v| v.checked_mul(expense_noise))
                        .or_overflow("seasonal expense")?
                        .round();
                    Ok(MonthlyRecord {
                        month: MONTH_LABELS[date.month0() as usize].to_string(),
                        year: Some(date.year()),
                        date: format_period(date),
                        revenue,
                        expense,
                    })
                })
                .collect()
        }
    }

    /// Multiplier in `[1 - noise%, 1 + noise%]`.
    fn jitter(rng: &mut StdRng, noise_pct: i64) -> Decimal {
        if noise_pct == 0 {
            return Decimal::ONE;
        }
        let pct = rng.gen_range(-noise_pct..=noise_pct);
        Decimal::ONE + Decimal::from(pct) / dec!(100)
    }

    fn format_period(date: NaiveDate) -> String {
        date.format("%Y-%m").to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::ledger::validate_history;

        #[test]
        fn test_same_seed_same_series() {
            let a = SeasonalHistoryBuilder::new().seed(7).build().unwrap();
            let b = SeasonalHistoryBuilder::new().seed(7).build().unwrap();
            assert_eq!(a, b);
        }

        #[test]
        fn test_series_is_valid_history() {
            let h = SeasonalHistoryBuilder::new()
                .start("2024-11")
                .months(18)
                .build()
                .unwrap();
            assert_eq!(h.len(), 18);
            assert_eq!(h[0].date, "2024-11");
            assert_eq!(h[2].date, "2025-01");
            assert_eq!(h[2].month, "Jan");
            assert!(validate_history(&h).is_ok());
        }

        #[test]
        fn test_zero_noise_follows_seasonality() {
            let h = SeasonalHistoryBuilder::new()
                .base_revenue(dec!(10000))
                .noise_pct(0)
                .build()
                .unwrap();
            assert_eq!(h[0].revenue, dec!(8500));
            assert_eq!(h[10].revenue, dec!(12000));
            assert_eq!(h[0].expense, dec!(7500));
        }

        #[test]
        fn test_oversized_base_revenue_is_overflow() {
            let result = SeasonalHistoryBuilder::new()
                .base_revenue(Decimal::MAX)
                .noise_pct(0)
                .months(11)
                .build();
            assert!(matches!(result, Err(MalimaxError::Overflow { .. })));
        }

        #[test]
        fn test_rejects_bad_start() {
            assert!(SeasonalHistoryBuilder::new().start("01/2025").build().is_err());
        }
    }
}
