//! Error types for ffs-bigint

use thiserror::Error;

/// Result type for big-integer operations
pub type Result<T> = std::result::Result<T, BigIntError>;

/// Errors that can occur during big-integer operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BigIntError {
    /// Malformed decimal string
    #[error("Invalid number format: {0}")]
    InvalidFormat(String),

    /// Division or remainder by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Value does not fit in the requested machine integer
    #[error("Value out of machine integer range")]
    Overflow,

    /// Modulus is not greater than one
    #[error("Invalid modulus: {0}")]
    InvalidModulus(String),

    /// Invalid argument to a sampling or generation routine
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
