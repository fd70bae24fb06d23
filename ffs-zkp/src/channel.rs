//! Driving loop between a prover and the verifier
//!
//! The channel starts from [`Message::opening`] and alternates prover and
//! verifier until the verifier answers with a terminal status. Independently
//! of the algebra it enforces that every prover reply advances the round by
//! exactly one and carries `ProverTurn`; a reply that does not is rejected
//! before the verifier ever sees it.

use rand::RngCore;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::error::{Rejection, Result};
use crate::message::{Message, Status};
use crate::party::Party;
use crate::session::SessionContext;
use crate::verifier::Verifier;

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The verifier accepted after the given number of logical rounds
    Accepted {
        /// Logical rounds checked
        rounds: u64,
    },
    /// The session was rejected
    Rejected(Rejection),
}

impl SessionOutcome {
    /// Returns true if the prover was accepted
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Rejection reason, if any
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

/// One prover connected to one verifier
#[derive(Debug)]
pub struct Channel<P: Party, R: RngCore = StdRng> {
    prover: P,
    verifier: Verifier<R>,
    outcome: Option<SessionOutcome>,
}

impl<P: Party, R: RngCore> Channel<P, R> {
    /// Take the prover's announcement and set up a verifier for it.
    ///
    /// # Errors
    /// Returns [`ZkpError::InvalidPublicKey`](crate::ZkpError::InvalidPublicKey)
    /// if the announcement is rejected.
    pub fn connect(context: SessionContext, mut prover: P, verifier_rng: R) -> Result<Self> {
        let announcement = prover.initial_message();
        let verifier = Verifier::new(context, &announcement, verifier_rng)?;
        Ok(Self::new(prover, verifier))
    }

    /// Connect a prover to an already constructed verifier
    pub fn new(prover: P, verifier: Verifier<R>) -> Self {
        Self { prover, verifier, outcome: None }
    }

    /// Run the exchange to its end.
    ///
    /// A session runs once; later calls return the recorded outcome.
    pub fn run(&mut self) -> SessionOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        let outcome = self.exchange();
        self.outcome = Some(outcome.clone());
        outcome
    }

    fn exchange(&mut self) -> SessionOutcome {
        let mut current = self.verifier.initial_message();
        while current.status() == Status::Continue {
            let expected_round = current.round().saturating_add(1);
            let reply = self.prover.respond(&current);
            if reply.round() != expected_round || reply.status() != Status::ProverTurn {
                let reason = Rejection::ProtocolViolation {
                    expected_round,
                    actual_round: reply.round(),
                    status: reply.status(),
                };
                warn!(%reason, "prover broke the channel contract");
                return SessionOutcome::Rejected(reason);
            }
            current = self.verifier.respond(&reply);
            debug!(round = current.round(), status = ?current.status(), values = current.payload().len(), "exchange");
        }

        if current.status() == Status::Success {
            SessionOutcome::Accepted { rounds: self.verifier.passed_rounds() }
        } else {
            let reason = self
                .verifier
                .rejection()
                .cloned()
                .unwrap_or(Rejection::AlgebraicMismatch { round: current.round() / 2 });
            SessionOutcome::Rejected(reason)
        }
    }

    /// The prover side
    pub fn prover(&self) -> &P {
        &self.prover
    }

    /// The verifier side
    pub fn verifier(&self) -> &Verifier<R> {
        &self.verifier
    }
}

/// Run one session between `prover` and a fresh verifier
///
/// # Errors
/// Returns an error only if the announcement is rejected.
pub fn run_session<P: Party, R: RngCore>(context: SessionContext, prover: P, verifier_rng: R) -> Result<SessionOutcome> {
    Ok(Channel::connect(context, prover, verifier_rng)?.run())
}
