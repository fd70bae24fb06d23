//! Error types for the FFS driver.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use ffs_bigint::BigIntError;
use ffs_zkp::{Rejection, ZkpError};
use thiserror::Error;

/// Errors that can occur while configuring or running sessions.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A session ended without accepting the prover.
    #[error("Session {session} rejected: {reason}")]
    SessionRejected {
        /// Zero-based session index.
        session: usize,
        /// Why the verifier or channel rejected.
        reason: Rejection,
    },

    /// Big-integer failure.
    #[error(transparent)]
    Arithmetic(#[from] BigIntError),

    /// Session setup failure.
    #[error(transparent)]
    Protocol(#[from] ZkpError),
}

/// A specialized Result type for driver operations.
pub type Result<T> = std::result::Result<T, CoreError>;
