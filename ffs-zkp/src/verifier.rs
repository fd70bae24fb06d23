//! Verifier
//!
//! The verifier is built from the prover's public-key announcement and then
//! answers each prover message:
//!
//! - odd round (commitment `x`): store `x`, draw `k` fresh challenge bits, reply `Continue`;
//! - even round (response `y`): check `x = ±y²∏_{b_i = 1} I_i (mod N)`.
//!
//! The verifier keeps its own round counter: a prover message must carry the
//! next round number and `ProverTurn`, and every commitment and response must
//! be a unit modulo `N`.
//! A failed check ends the session with `Failed`. After `round_limit` passing
//! checks it ends with `Success`.

use ffs_bigint::{ModInt, RandomSource};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, warn};

use crate::error::{Rejection, Result, ZkpError};
use crate::message::{Message, Status, encode_bits};
use crate::party::Party;
use crate::session::SessionContext;

/// Returns true if `x = ±y²∏ I_i (mod N)` over the components whose bit is set.
#[must_use]
pub fn check_response(x: &ModInt, y: &ModInt, public_key: &[ModInt], bits: &[bool]) -> bool {
    let expected = public_key.iter().zip(bits).filter(|(_, bit)| **bit).fold(y.square(), |acc, (component, _)| {
        &acc * component
    });
    *x == expected || *x == -expected
}

/// Verifier holding a prover's public key
#[derive(Debug)]
pub struct Verifier<R: RngCore = StdRng> {
    context: SessionContext,
    public_key: Vec<ModInt>,
    challenge: Vec<bool>,
    commitment: Option<ModInt>,
    next_round: u64,
    passed_rounds: u64,
    exchanges: u64,
    rejection: Option<Rejection>,
    rng: R,
}

impl Verifier<StdRng> {
    /// Verifier seeded from operating-system entropy.
    ///
    /// # Errors
    /// See [`Verifier::new`].
    pub fn from_entropy(context: SessionContext, announcement: &Message) -> Result<Self> {
        Self::new(context, announcement, StdRng::from_entropy())
    }
}

impl<R: RngCore> Verifier<R> {
    /// Accept a public-key announcement.
    ///
    /// The announcement must be round 0 with status `ProverTurn` and carry
    /// exactly `k` non-zero components.
    ///
    /// # Errors
    /// Returns [`ZkpError::InvalidPublicKey`] otherwise.
    pub fn new(context: SessionContext, announcement: &Message, rng: R) -> Result<Self> {
        if announcement.round() != 0 || announcement.status() != Status::ProverTurn {
            return Err(ZkpError::InvalidPublicKey(format!(
                "announcement must be round 0 with ProverTurn, got round {} with {:?}",
                announcement.round(),
                announcement.status()
            )));
        }
        let payload = announcement.payload();
        if payload.len() != context.secret_count() {
            return Err(ZkpError::InvalidPublicKey(format!(
                "expected {} components, got {}",
                context.secret_count(),
                payload.len()
            )));
        }
        if let Some(index) = payload.iter().position(ModInt::is_zero) {
            return Err(ZkpError::InvalidPublicKey(format!("component {index} is zero")));
        }
        if payload.iter().any(|component| component.modulus() != context.modulus()) {
            return Err(ZkpError::InvalidPublicKey("components use a different modulus".to_string()));
        }

        Ok(Self {
            public_key: payload.to_vec(),
            context,
            challenge: Vec::new(),
            commitment: None,
            next_round: 1,
            passed_rounds: 0,
            exchanges: 0,
            rejection: None,
            rng,
        })
    }

    /// Logical rounds whose check has passed
    #[must_use]
    pub fn passed_rounds(&self) -> u64 {
        self.passed_rounds
    }

    /// Prover messages processed so far
    #[must_use]
    pub fn exchanges(&self) -> u64 {
        self.exchanges
    }

    /// Reason for a `Failed` reply, if one was sent
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }

    /// The public key under verification
    #[must_use]
    pub fn public_key(&self) -> &[ModInt] {
        &self.public_key
    }

    fn reject(&mut self, round: u64, reason: Rejection) -> Message {
        warn!(round, %reason, "verifier rejected prover");
        self.rejection = Some(reason);
        Message::new(round, Vec::new(), Status::Failed)
    }

    /// The one unit value a commitment or response must carry
    fn single_unit(&mut self, message: &Message) -> std::result::Result<ModInt, Message> {
        match message.payload() {
            [value] if value.is_invertible() => Ok(value.clone()),
            [_] => Err(self.reject(message.round(), Rejection::DegenerateValue { round: message.round() })),
            payload => {
                let reason =
                    Rejection::MalformedPayload { round: message.round(), expected: 1, actual: payload.len() };
                Err(self.reject(message.round(), reason))
            }
        }
    }

    fn challenge(&mut self, message: &Message) -> Message {
        let x = match self.single_unit(message) {
            Ok(x) => x,
            Err(failed) => return failed,
        };
        self.commitment = Some(x);
        let count = self.context.secret_count();
        self.challenge = (0..count).map(|_| self.rng.random_bit()).collect();
        Message::new(message.round(), encode_bits(&self.challenge, self.context.modulus()), Status::Continue)
    }

    fn verify(&mut self, message: &Message) -> Message {
        let y = match self.single_unit(message) {
            Ok(y) => y,
            Err(failed) => return failed,
        };
        let logical_round = self.passed_rounds + 1;
        let passed = self
            .commitment
            .take()
            .is_some_and(|x| check_response(&x, &y, &self.public_key, &self.challenge));
        if !passed {
            return self.reject(message.round(), Rejection::AlgebraicMismatch { round: logical_round });
        }

        self.passed_rounds += 1;
        debug!(round = logical_round, "response verified");
        let status =
            if self.passed_rounds >= self.context.round_limit() { Status::Success } else { Status::Continue };
        Message::new(message.round(), Vec::new(), status)
    }
}

impl<R: RngCore> Party for Verifier<R> {
    fn initial_message(&mut self) -> Message {
        Message::opening()
    }

    fn respond(&mut self, message: &Message) -> Message {
        self.exchanges += 1;
        if self.rejection.is_some() {
            return Message::new(message.round(), Vec::new(), Status::Failed);
        }
        if message.round() != self.next_round || message.status() != Status::ProverTurn {
            let reason = Rejection::ProtocolViolation {
                expected_round: self.next_round,
                actual_round: message.round(),
                status: message.status(),
            };
            return self.reject(message.round(), reason);
        }
        self.next_round += 1;
        if message.round() % 2 == 1 { self.challenge(message) } else { self.verify(message) }
    }
}
