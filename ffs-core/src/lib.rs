#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # ffs-core
//!
//! Everything around the protocol that a runnable system needs:
//!
//! - **config**: [`DriverConfig`] builder with environment overlay and validation
//! - **logging**: `tracing` subscriber setup and size-only redaction of big integers
//! - **driver**: runs a batch of independent sessions and reports their outcomes
//!
//! ## Example
//!
//! ```rust
//! use ffs_core::{DriverConfig, ModulusSource, run_sessions};
//!
//! let config = DriverConfig::new()
//!     .with_sessions(2)
//!     .with_round_limit(8)
//!     .with_modulus(ModulusSource::Generated { prime_bits: 48 })
//!     .build()
//!     .expect("valid configuration");
//!
//! let report = run_sessions(&config).expect("sessions should run");
//! assert!(report.ensure_all_accepted().is_ok());
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod logging;

pub use config::{DriverConfig, ModulusSource, REFERENCE_MODULUS};
pub use driver::{DriverReport, run_sessions, run_sessions_with_rng};
pub use error::{CoreError, Result};
pub use logging::{init_tracing, redact};
