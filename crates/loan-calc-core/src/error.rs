use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanCalcError {
    #[error("Unknown loan type: {loan_type}")]
    ConfigNotFound { loan_type: String },

    #[error("Out of bounds: {field} = {actual} (allowed {min} to {max})")]
    OutOfBounds {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Invalid term: {term_years} years")]
    InvalidTerm { term_years: u32 },

    #[error("Invalid loan config '{loan_type}': {reason}")]
    InvalidConfig { loan_type: String, reason: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Mail transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanCalcError {
    pub(crate) fn out_of_bounds(field: &str, min: f64, max: f64, actual: f64) -> Self {
        LoanCalcError::OutOfBounds {
            field: field.to_string(),
            min,
            max,
            actual,
        }
    }
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "history")]
impl From<csv::Error> for LoanCalcError {
    fn from(e: csv::Error) -> Self {
        LoanCalcError::SerializationError(e.to_string())
    }
}
