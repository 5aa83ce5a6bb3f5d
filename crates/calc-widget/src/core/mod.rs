//! Core calculator module
//!
//! The operand-entry engine, its arithmetic, display formatting and the
//! bounded history log. Nothing in here knows about the DOM.

pub mod engine;
pub mod format;
pub mod history;
mod operations;

pub use engine::{CalculatorEngine, ComputeOutcome, EngineMode, ErrorTimerPolicy};
pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,

    /// Entry token was neither a digit nor the decimal point
    #[error("Invalid entry token: {0:?}")]
    InvalidToken(String),

    /// Operator name not one of add/subtract/multiply/divide
    #[error("Unknown operator: {0:?}")]
    UnknownOperator(String),

    /// Configuration rejected by validation
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalcError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
