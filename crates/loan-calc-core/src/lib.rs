pub mod error;
pub mod types;

#[cfg(feature = "catalog")]
pub mod catalog;

#[cfg(feature = "calculator")]
pub mod calculator;

#[cfg(feature = "notify")]
pub mod notify;

#[cfg(feature = "telemetry")]
pub mod telemetry;

#[cfg(feature = "history")]
pub mod history;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
