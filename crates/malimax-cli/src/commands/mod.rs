pub mod ledger;
pub mod simulator;
