pub mod error;
pub mod types;

#[cfg(feature = "ledger")]
pub mod ledger;

#[cfg(feature = "simulator")]
pub mod simulator;

#[cfg(feature = "ledger")]
pub mod fixtures;

pub use error::MalimaxError;
pub use types::*;

/// Standard result type for all malimax operations
pub type MalimaxResult<T> = Result<T, MalimaxError>;
