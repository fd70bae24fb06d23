//! Session context
//!
//! Both parties of a session are built from the same [`SessionContext`]: the
//! modulus `N`, the number of secrets `k` and the number of logical rounds the
//! verifier requires. Contexts are cheap to clone (the modulus is shared), and
//! sessions with different contexts are fully independent.

use ffs_bigint::{BigInteger, Modulus, PrimalityOracle};
use rand::RngCore;
use tracing::{debug, info};

use crate::error::{Result, ZkpError};

/// Default number of secret roots held by a prover
pub const DEFAULT_SECRET_COUNT: usize = 10;

/// Default number of logical rounds before acceptance
pub const DEFAULT_ROUND_LIMIT: u64 = 64;

/// Smallest prime size accepted by [`SessionContext::generate`]
pub const MIN_PRIME_BITS: usize = 8;

/// Parameters shared by the prover and the verifier of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    modulus: Modulus,
    secret_count: usize,
    round_limit: u64,
}

impl SessionContext {
    /// Create a context over an existing modulus.
    ///
    /// # Errors
    /// Returns [`ZkpError::InvalidConfiguration`] if `secret_count` or
    /// `round_limit` is zero.
    pub fn new(modulus: Modulus, secret_count: usize, round_limit: u64) -> Result<Self> {
        if secret_count == 0 {
            return Err(ZkpError::InvalidConfiguration("secret count must be at least 1".to_string()));
        }
        if round_limit == 0 {
            return Err(ZkpError::InvalidConfiguration("round limit must be at least 1".to_string()));
        }
        Ok(Self { modulus, secret_count, round_limit })
    }

    /// Create a context over a fresh Blum modulus `N = p·q`.
    ///
    /// # Errors
    /// Returns [`ZkpError::InvalidConfiguration`] for invalid counts or
    /// `prime_bits < MIN_PRIME_BITS`.
    pub fn generate<R: RngCore>(
        prime_bits: usize,
        secret_count: usize,
        round_limit: u64,
        oracle: &PrimalityOracle,
        rng: &mut R,
    ) -> Result<Self> {
        let modulus = blum_modulus(prime_bits, oracle, rng)?;
        Self::new(modulus, secret_count, round_limit)
    }

    /// The session modulus
    #[must_use]
    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    /// Number of secret roots `k`
    #[must_use]
    pub fn secret_count(&self) -> usize {
        self.secret_count
    }

    /// Logical rounds required for acceptance
    #[must_use]
    pub fn round_limit(&self) -> u64 {
        self.round_limit
    }
}

/// Product of two distinct random primes of `prime_bits` bits, each `≡ 3 (mod 4)`.
///
/// # Errors
/// Returns [`ZkpError::InvalidConfiguration`] if `prime_bits < MIN_PRIME_BITS`.
pub fn blum_modulus<R: RngCore>(prime_bits: usize, oracle: &PrimalityOracle, rng: &mut R) -> Result<Modulus> {
    if prime_bits < MIN_PRIME_BITS {
        return Err(ZkpError::InvalidConfiguration(format!(
            "prime size must be at least {MIN_PRIME_BITS} bits, got {prime_bits}"
        )));
    }
    let p = oracle.generate_prime(prime_bits, rng)?;
    let mut q = oracle.generate_prime(prime_bits, rng)?;
    while q == p {
        debug!("second Blum factor repeated the first, drawing again");
        q = oracle.generate_prime(prime_bits, rng)?;
    }
    let n: BigInteger = &p * &q;
    info!(prime_bits, digits = n.decimal_digits(), "generated Blum modulus");
    Ok(Modulus::new(n)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rejects_zero_counts() {
        let modulus = Modulus::new(BigInteger::from(35)).unwrap();
        assert!(matches!(SessionContext::new(modulus.clone(), 0, 4), Err(ZkpError::InvalidConfiguration(_))));
        assert!(matches!(SessionContext::new(modulus.clone(), 3, 0), Err(ZkpError::InvalidConfiguration(_))));
        let context = SessionContext::new(modulus, 3, 4).unwrap();
        assert_eq!(context.secret_count(), 3);
        assert_eq!(context.round_limit(), 4);
    }

    #[test]
    fn test_blum_modulus_shape() {
        let oracle = PrimalityOracle::default();
        let mut rng = StdRng::seed_from_u64(41);
        let modulus = blum_modulus(32, &oracle, &mut rng).unwrap();
        assert_eq!(modulus.value().rem_small(4).unwrap(), 1);
        assert!(!oracle.is_probable_prime(modulus.value(), &mut rng));
        let bits = modulus.value().bit_length();
        assert!((63..=64).contains(&bits));
    }

    #[test]
    fn test_small_primes_rejected() {
        let mut rng = StdRng::seed_from_u64(42);
        let result = SessionContext::generate(4, 10, 64, &PrimalityOracle::default(), &mut rng);
        assert!(matches!(result, Err(ZkpError::InvalidConfiguration(_))));
    }
}
