//! Session driver.
//!
//! Runs the configured number of independent identification sessions. Each
//! session gets its own prover and verifier, each with its own generator, so
//! no randomness is shared between parties or between sessions.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use ffs_bigint::{Modulus, PrimalityOracle};
use ffs_zkp::{HonestProver, SessionContext, SessionOutcome, blum_modulus, run_session};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{info, info_span, warn};

use crate::config::{DriverConfig, ModulusSource, fixed_modulus};
use crate::error::{CoreError, Result};
use crate::logging::redact;

/// Outcomes of one driver run, in session order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverReport {
    /// Decimal digits of the modulus used.
    pub modulus_digits: usize,
    /// One outcome per session.
    pub outcomes: Vec<SessionOutcome>,
}

impl DriverReport {
    /// Number of accepted sessions.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_accepted()).count()
    }

    /// Number of rejected sessions.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.outcomes.len() - self.accepted()
    }

    /// Fail on the first rejected session.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SessionRejected`] naming the first rejected session.
    pub fn ensure_all_accepted(&self) -> Result<()> {
        for (session, outcome) in self.outcomes.iter().enumerate() {
            if let Some(reason) = outcome.rejection() {
                return Err(CoreError::SessionRejected { session, reason: reason.clone() });
            }
        }
        Ok(())
    }
}

/// Run every configured session with operating-system entropy.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a session cannot be
/// set up. Rejected sessions are reported, not raised.
pub fn run_sessions(config: &DriverConfig) -> Result<DriverReport> {
    run_sessions_with_rng(config, &mut StdRng::from_entropy())
}

/// Run every configured session, seeding each party from `rng`.
///
/// # Errors
///
/// See [`run_sessions`].
pub fn run_sessions_with_rng<R: RngCore>(config: &DriverConfig, rng: &mut R) -> Result<DriverReport> {
    config.validate()?;
    let modulus = resolve_modulus(config, rng)?;
    let context = SessionContext::new(modulus, config.secret_count, config.round_limit)?;
    info!(
        sessions = config.sessions,
        secrets = config.secret_count,
        rounds = config.round_limit,
        modulus = %redact(context.modulus().value()),
        "starting sessions"
    );

    let mut outcomes = Vec::with_capacity(config.sessions);
    for session in 0..config.sessions {
        let _span = info_span!("session", index = session).entered();
        let prover = HonestProver::new(context.clone(), StdRng::from_rng(&mut *rng).map_err(entropy_error)?);
        let verifier_rng = StdRng::from_rng(&mut *rng).map_err(entropy_error)?;
        let outcome = run_session(context.clone(), prover, verifier_rng)?;
        match &outcome {
            SessionOutcome::Accepted { rounds } => info!(rounds, "session accepted"),
            SessionOutcome::Rejected(reason) => warn!(%reason, "session rejected"),
        }
        outcomes.push(outcome);
    }

    let report = DriverReport { modulus_digits: context.modulus().value().decimal_digits(), outcomes };
    info!(accepted = report.accepted(), rejected = report.rejected(), "run finished");
    Ok(report)
}

fn resolve_modulus<R: RngCore>(config: &DriverConfig, rng: &mut R) -> Result<Modulus> {
    match &config.modulus {
        ModulusSource::Fixed(text) => fixed_modulus(text),
        ModulusSource::Generated { prime_bits } => {
            let oracle = PrimalityOracle::new(config.miller_rabin_rounds);
            Ok(blum_modulus(*prime_bits, &oracle, rng)?)
        }
    }
}

fn entropy_error(error: rand::Error) -> CoreError {
    CoreError::ConfigurationError(format!("random generator failed: {error}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use ffs_zkp::{Rejection, Status};

    #[test]
    fn test_small_fixed_run() {
        let config = DriverConfig::new()
            .with_sessions(3)
            .with_secret_count(2)
            .with_round_limit(5)
            .with_modulus(ModulusSource::Fixed("35".to_string()));
        let report = run_sessions_with_rng(&config, &mut StdRng::seed_from_u64(101)).unwrap();
        assert_eq!(report.modulus_digits, 2);
        assert_eq!(report.accepted(), 3);
        assert_eq!(report.rejected(), 0);
        assert!(report.ensure_all_accepted().is_ok());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = DriverConfig::new().with_sessions(0);
        assert!(matches!(
            run_sessions_with_rng(&config, &mut StdRng::seed_from_u64(102)),
            Err(CoreError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_ensure_all_accepted_names_first_rejection() {
        let reason = Rejection::ProtocolViolation { expected_round: 1, actual_round: 0, status: Status::ProverTurn };
        let report = DriverReport {
            modulus_digits: 2,
            outcomes: vec![
                SessionOutcome::Accepted { rounds: 4 },
                SessionOutcome::Rejected(reason.clone()),
                SessionOutcome::Rejected(Rejection::AlgebraicMismatch { round: 2 }),
            ],
        };
        assert_eq!(report.rejected(), 2);
        match report.ensure_all_accepted() {
            Err(CoreError::SessionRejected { session, reason: found }) => {
                assert_eq!(session, 1);
                assert_eq!(found, reason);
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
    }
}
