use thiserror::Error;

#[derive(Debug, Error)]
pub enum MalimaxError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MalimaxError {
    fn from(e: serde_json::Error) -> Self {
        MalimaxError::SerializationError(e.to_string())
    }
}

impl MalimaxError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MalimaxError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Turn a `checked_*` result into an `Overflow` error.
pub(crate) trait OrOverflow<T> {
    fn or_overflow(self, context: &str) -> Result<T, MalimaxError>;
}

impl<T> OrOverflow<T> for Option<T> {
    fn or_overflow(self, context: &str) -> Result<T, MalimaxError> {
        self.ok_or_else(|| MalimaxError::Overflow {
            context: context.to_string(),
        })
    }
}
