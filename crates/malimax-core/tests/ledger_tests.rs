use malimax_core::fixtures::{sample_history, sample_ledger_data};
use malimax_core::ledger::{Ledger, LedgerData, MonthPatch, MonthlyRecord, PaymentKind};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_sample_ledger_summary() {
    let ledger = Ledger::new(sample_ledger_data()).unwrap();
    let s = ledger.summary().unwrap();

    assert_eq!(s.months.len(), 12);
    assert_eq!(s.months[0].balance, dec!(11400));
    assert_eq!(s.kpi.cashflow, dec!(183400));
    assert_eq!(s.kpi.monthly_profit, dec!(8000));
    assert_eq!(s.kpi.total_expenses, dec!(51000));

    // (59000 - 70000) / 70000 * 100 = -15.71%
    let growth = s.kpi.growth_rate_pct.unwrap();
    assert!((growth - dec!(-15.714)).abs() < dec!(0.001));

    let payroll = &s.expense_breakdown[0];
    assert_eq!(payroll.name, "Payroll");
    // 51000 * 38.5% = 19635
    assert_eq!(payroll.value, dec!(19635));

    // Payroll and rent on the 1st, tax on the 15th
    let titles: Vec<_> = s.upcoming_payments.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Payroll", "Rent", "Tax payment"]);
    assert_eq!(s.upcoming_payments[2].kind, PaymentKind::Tax);
    assert_eq!(s.upcoming_total, dec!(28500));
}

#[test]
fn test_ledger_trend_baseline_follows_mutations() {
    let mut ledger = Ledger::from_records(sample_history()).unwrap();
    let before = ledger.trend_baseline().unwrap();

    ledger
        .add_month(MonthlyRecord::new("Jan", "2026-01", dec!(80000), dec!(50000)))
        .unwrap();
    let after = ledger.trend_baseline().unwrap();
    // Window is now Nov, Dec, Jan
    assert_eq!(after.avg_revenue, dec!(209000) / dec!(3));
    assert_ne!(before, after);

    ledger.reset();
    assert_eq!(ledger.trend_baseline().unwrap(), before);
}

#[test]
fn test_update_month_changes_balances() {
    let mut ledger = Ledger::from_records(sample_history()).unwrap();
    ledger
        .update_month(
            "2025-06",
            MonthPatch {
                expense: Some(dec!(55000)),
                ..MonthPatch::default()
            },
        )
        .unwrap();
    // June profit falls from 16000 to 0
    assert_eq!(ledger.current_balance().unwrap(), dec!(167400));
}

#[test]
fn test_ledger_data_roundtrips_through_json() {
    let data = sample_ledger_data();
    let json = serde_json::to_string(&data).unwrap();
    let back: LedgerData = serde_json::from_str(&json).unwrap();
    assert_eq!(back, data);
}

#[test]
fn test_opening_balance_carries_into_every_month() {
    let ledger = Ledger::new(LedgerData {
        records: sample_history(),
        opening_balance: dec!(-10000),
        ..LedgerData::default()
    })
    .unwrap();
    let rows = ledger.with_balances().unwrap();
    assert_eq!(rows[0].balance, dec!(1400));
    assert_eq!(ledger.current_balance().unwrap(), dec!(173400));
    let s = ledger.summary().unwrap();
    assert!(s.expense_breakdown.is_empty());
    assert!(s.upcoming_payments.is_empty());
    assert_eq!(s.upcoming_total, Decimal::ZERO);
    assert_eq!(ledger.opening_balance(), Decimal::from(-10000));
}

#[test]
fn test_ledger_data_without_upcoming_payments_still_parses() {
    let json = r#"{"records":[{"month":"Jan","date":"2025-01","revenue":"100","expense":"40"}]}"#;
    let data: LedgerData = serde_json::from_str(json).unwrap();
    assert!(data.upcoming_payments.is_empty());
    assert_eq!(Ledger::new(data).unwrap().current_balance().unwrap(), dec!(60));
}
