//! Error types for ffs-zkp

use ffs_bigint::BigIntError;
use thiserror::Error;

use crate::message::Status;

/// Result type for protocol setup operations
pub type Result<T> = std::result::Result<T, ZkpError>;

/// Errors raised while setting up a session
///
/// A running session never fails with an error; it ends in a
/// [`Rejection`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZkpError {
    /// Public-key announcement is malformed
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Session parameters are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Underlying big-integer failure
    #[error(transparent)]
    Arithmetic(#[from] BigIntError),
}

/// Why a session ended without accepting the prover
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The prover broke the round/status contract of the channel
    #[error("protocol violation: expected round {expected_round} with ProverTurn, got round {actual_round} with {status:?}")]
    ProtocolViolation {
        /// Round the channel required
        expected_round: u64,
        /// Round the prover sent
        actual_round: u64,
        /// Status the prover sent
        status: Status,
    },

    /// A prover message carried the wrong number of values
    #[error("malformed payload in round {round}: expected {expected} values, got {actual}")]
    MalformedPayload {
        /// Message round
        round: u64,
        /// Required payload length
        expected: usize,
        /// Received payload length
        actual: usize,
    },

    /// A commitment or response is zero or shares a factor with `N`
    #[error("degenerate value in round {round}: not a unit modulo N")]
    DegenerateValue {
        /// Message round
        round: u64,
    },

    /// The response failed `x = ±y²∏I_i (mod N)`
    #[error("algebraic check failed in round {round}")]
    AlgebraicMismatch {
        /// Logical (commit/challenge/response) round, starting at 1
        round: u64,
    },
}
