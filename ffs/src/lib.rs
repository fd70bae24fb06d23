#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! FFS - Zero-Knowledge Identification
//!
//! Facade over the workspace crates: the big-integer engine, the
//! Feige–Fiat–Shamir protocol and the session driver.
//!
//! ## Usage
//!
//! ```rust
//! use ffs::{DriverConfig, run_sessions};
//!
//! let config = DriverConfig::new().with_sessions(1).with_round_limit(16).build().expect("valid configuration");
//! let report = run_sessions(&config).expect("sessions should run");
//! assert_eq!(report.accepted(), 1);
//! ```
//!
//! Lower layers stay reachable as [`bigint`], [`zkp`] and [`core`].

/// Arbitrary-precision integers
pub use ffs_bigint as bigint;

/// Identification protocol
pub use ffs_zkp as zkp;

/// Configuration, logging and driver
pub use ffs_core as core;

// ============================================================================
// Core Types
// ============================================================================

pub use ffs_bigint::{BigIntError, BigInteger, ModInt, Modulus, PrimalityOracle};
pub use ffs_core::{
    CoreError, DriverConfig, DriverReport, ModulusSource, init_tracing, redact, run_sessions, run_sessions_with_rng,
};
pub use ffs_zkp::{
    Channel, HonestProver, Message, Party, Rejection, SessionContext, SessionOutcome, Status, Verifier, ZkpError,
    run_session,
};
