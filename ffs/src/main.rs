#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! `ffs` driver binary
//!
//! Runs the configured batch of identification sessions (see
//! [`ffs::DriverConfig::from_env`] for the `FFS_*` variables) and exits
//! non-zero unless every session accepted its prover.

use std::process::ExitCode;

use tracing::{error, info};

fn main() -> ExitCode {
    if let Err(e) = ffs::init_tracing() {
        eprintln!("failed to initialize logging: {e}");
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ffs::CoreError> {
    let config = ffs::DriverConfig::from_env()?;
    let report = ffs::run_sessions(&config)?;
    report.ensure_all_accepted()?;
    info!(sessions = report.accepted(), "all sessions accepted");
    Ok(())
}
