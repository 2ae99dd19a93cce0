pub mod book;
pub mod payment;
pub mod record;

pub use book::{ExpenseCategory, ExpenseShare, Kpi, Ledger, LedgerData, LedgerSummary, MonthPatch};
pub use payment::{payment_schedule, total_due, PaymentKind, UpcomingPayment};
pub use record::{parse_period, running_balances, validate_history, BalancedMonth, MonthlyRecord};
