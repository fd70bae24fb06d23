//! Honest prover
//!
//! The prover holds `k` secret roots `s_i` and publishes
//! `I_i = ±(s_i⁻¹)² (mod N)`. Each logical round it:
//!
//! 1. draws a fresh `r` and commits to `x = r²`,
//! 2. answers the challenge bits `b` with `y = r·∏_{b_i = 1} s_i`.
//!
//! Roots and the live commitment are wiped when the prover is dropped.

use ffs_bigint::{BigInteger, ModInt, Modulus, RandomSource};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;
use zeroize::Zeroize;

use crate::message::{Message, Status};
use crate::party::Party;
use crate::session::SessionContext;

/// Commitment `x = r²` for the random value `r`
#[must_use]
pub fn commitment(r: &ModInt) -> ModInt {
    r.square()
}

/// Response `y = r·∏ s_i` over the secrets whose challenge bit is set.
///
/// Bits beyond the number of secrets are ignored.
#[must_use]
pub fn response(r: &ModInt, secrets: &[ModInt], bits: &[bool]) -> ModInt {
    secrets.iter().zip(bits).filter(|(_, bit)| **bit).fold(r.clone(), |acc, (secret, _)| &acc * secret)
}

/// Public component `(s⁻¹)²`, negated when `negate` is set.
///
/// Returns zero if `s` has no inverse modulo `N`.
#[must_use]
pub fn public_component(secret: &ModInt, negate: bool) -> ModInt {
    let component = secret.inverse().square();
    if negate { -component } else { component }
}

/// Prover that knows the secret roots behind its public key
pub struct HonestProver<R: RngCore = StdRng> {
    context: SessionContext,
    secrets: Vec<ModInt>,
    public_key: Vec<ModInt>,
    commitment_root: Option<ModInt>,
    rng: R,
}

impl HonestProver<StdRng> {
    /// Prover seeded from operating-system entropy
    #[must_use]
    pub fn from_entropy(context: SessionContext) -> Self {
        Self::new(context, StdRng::from_entropy())
    }
}

impl<R: RngCore> HonestProver<R> {
    /// Draw `k` invertible secrets and derive the public key.
    #[must_use]
    pub fn new(context: SessionContext, mut rng: R) -> Self {
        let modulus = context.modulus().clone();
        let secrets: Vec<ModInt> =
            (0..context.secret_count()).map(|_| random_unit(&modulus, &mut rng)).collect();
        let public_key = secrets.iter().map(|secret| public_component(secret, rng.random_bit())).collect();
        debug!(secrets = secrets.len(), "prover keys generated");
        Self { context, secrets, public_key, commitment_root: None, rng }
    }

    /// The announced public key `I_1..I_k`
    #[must_use]
    pub fn public_key(&self) -> &[ModInt] {
        &self.public_key
    }

    /// The session context this prover was built for
    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    fn commit(&mut self, round: u64) -> Message {
        let r = random_unit(self.context.modulus(), &mut self.rng);
        let x = commitment(&r);
        if let Some(mut previous) = self.commitment_root.replace(r) {
            previous.zeroize();
        }
        Message::new(round, vec![x], Status::ProverTurn)
    }

    fn answer(&mut self, round: u64, bits: &[bool]) -> Message {
        // No open commitment: answer with an unrelated root, which fails verification
        let mut r = match self.commitment_root.take() {
            Some(root) => root,
            None => random_unit(self.context.modulus(), &mut self.rng),
        };
        let y = response(&r, &self.secrets, bits);
        r.zeroize();
        Message::new(round, vec![y], Status::ProverTurn)
    }
}

impl<R: RngCore> Party for HonestProver<R> {
    fn initial_message(&mut self) -> Message {
        Message::new(0, self.public_key.clone(), Status::ProverTurn)
    }

    fn respond(&mut self, message: &Message) -> Message {
        let round = message.round().saturating_add(1);
        if message.round() % 2 == 0 {
            self.commit(round)
        } else {
            self.answer(round, &message.challenge_bits())
        }
    }
}

impl<R: RngCore> Drop for HonestProver<R> {
    fn drop(&mut self) {
        self.secrets.zeroize();
        self.commitment_root.zeroize();
    }
}

impl<R: RngCore> std::fmt::Debug for HonestProver<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HonestProver")
            .field("context", &self.context)
            .field("secrets", &"[REDACTED]")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Uniform invertible residue in `[1, N - 1]`
fn random_unit<R: RngCore>(modulus: &Modulus, rng: &mut R) -> ModInt {
    let high = modulus.value() - &BigInteger::one();
    loop {
        // [1, N - 1] is never empty because N > 1
        let Ok(value) = rng.random_range(&BigInteger::one(), &high) else {
            return modulus.one();
        };
        let candidate = ModInt::new(value, modulus);
        if candidate.is_invertible() {
            return candidate;
        }
    }
}
