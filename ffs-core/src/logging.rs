//! # Logging
//!
//! Structured logging with `tracing`. Secret material (prover roots,
//! per-round commitments) is never logged; big integers that must appear in a
//! log line go through [`redact`], which shows only their size.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ffs_bigint::BigInteger;
//! use ffs_core::logging::{init_tracing, redact};
//!
//! init_tracing().expect("Failed to init tracing");
//!
//! let modulus = BigInteger::from(35);
//! tracing::info!("using modulus {}", redact(&modulus));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use std::fmt;

use ffs_bigint::BigInteger;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "ffs=info,ffs_core=info,ffs_zkp=warn,ffs_bigint=warn";

/// Initialize tracing.
///
/// Sets up a compact formatter filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .try_init()?;

    info!("FFS logging initialized");
    Ok(())
}

/// Size-only rendering of a big integer.
#[must_use]
pub fn redact(value: &BigInteger) -> Redacted {
    Redacted { digits: value.decimal_digits() }
}

/// Display wrapper produced by [`redact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redacted {
    digits: usize,
}

impl fmt::Display for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} digits]", self.digits)
    }
}
