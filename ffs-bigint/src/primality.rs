#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
// JUSTIFICATION: Sieve indices are bounded by SIEVE_LIMIT and products p * i
// are checked against it before indexing.
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]

//! Probabilistic primality testing and prime generation
//!
//! Small inputs are answered from a sieve built once per process. Larger
//! inputs are first trial-divided by the smallest primes and then handed to
//! Miller–Rabin, whose false-positive rate for a composite is at most
//! `4^-rounds`.

use std::sync::OnceLock;

use rand::RngCore;
use tracing::debug;

use crate::bigint::BigInteger;
use crate::error::{BigIntError, Result};
use crate::modular::Modulus;
use crate::random::random_in_range;

/// Exclusive upper bound of the shared sieve
pub const SIEVE_LIMIT: usize = 1 << 17;

/// Number of small primes tried as divisors before Miller–Rabin
pub const TRIAL_PRIMES: usize = 64;

/// Default number of Miller–Rabin witnesses
pub const DEFAULT_ROUNDS: usize = 20;

/// Smallest prime factor of every integer below the limit, plus the primes.
struct Sieve {
    smallest_factor: Vec<u32>,
    primes: Vec<u32>,
}

static SIEVE: OnceLock<Sieve> = OnceLock::new();

impl Sieve {
    /// Linear sieve: each composite is crossed out once, by its smallest prime.
    #[allow(clippy::cast_possible_truncation)]
    fn build(limit: usize) -> Self {
        let mut smallest_factor = vec![0u32; limit];
        let mut primes = Vec::new();
        for i in 2..limit {
            if smallest_factor[i] == 0 {
                smallest_factor[i] = i as u32;
                primes.push(i as u32);
            }
            for &p in &primes {
                let multiple = p as usize * i;
                if p > smallest_factor[i] || multiple >= limit {
                    break;
                }
                smallest_factor[multiple] = p;
            }
        }
        Self { smallest_factor, primes }
    }

    fn shared() -> &'static Self {
        SIEVE.get_or_init(|| {
            debug!(limit = SIEVE_LIMIT, "building prime sieve");
            Self::build(SIEVE_LIMIT)
        })
    }

    fn contains(&self, n: usize) -> bool {
        n >= 2 && self.smallest_factor.get(n).is_some_and(|&factor| factor as usize == n)
    }
}

/// The primes below [`SIEVE_LIMIT`], ascending
#[must_use]
pub fn small_primes() -> &'static [u32] {
    &Sieve::shared().primes
}

/// Primality test and prime generator with a fixed witness count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimalityOracle {
    rounds: usize,
}

impl Default for PrimalityOracle {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

impl PrimalityOracle {
    /// Oracle running `rounds` Miller–Rabin witnesses per large input
    #[must_use]
    pub const fn new(rounds: usize) -> Self {
        Self { rounds }
    }

    /// Witnesses per Miller–Rabin test
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.rounds
    }

    /// Returns true if `n` is prime, or composite with probability at most `4^-rounds`.
    ///
    /// Values below 2, negatives included, are never prime.
    pub fn is_probable_prime<R: RngCore>(&self, n: &BigInteger, rng: &mut R) -> bool {
        if n < &BigInteger::from(2) {
            return false;
        }
        let sieve = Sieve::shared();
        if let Ok(small) = i64::try_from(n)
            && let Ok(index) = usize::try_from(small)
            && index < SIEVE_LIMIT
        {
            return sieve.contains(index);
        }
        for &p in sieve.primes.iter().take(TRIAL_PRIMES) {
            if matches!(n.rem_small(i64::from(p)), Ok(0)) {
                return false;
            }
        }
        miller_rabin(n, self.rounds, rng)
    }

    /// Random probable prime of exactly `bits` bits with `p ≡ 3 (mod 4)`.
    ///
    /// A uniform candidate in `[2^(bits-1), 2^bits)` is moved up into the
    /// class `4k + 3` and then stepped by 4 until it passes. A walk that
    /// leaves the range starts over from a fresh candidate.
    ///
    /// # Errors
    /// Returns [`BigIntError::InvalidInput`] if `bits < 2`.
    pub fn generate_prime<R: RngCore>(&self, bits: usize, rng: &mut R) -> Result<BigInteger> {
        if bits < 2 {
            return Err(BigIntError::InvalidInput(format!("prime bit length must be at least 2, got {bits}")));
        }
        let two = BigInteger::from(2);
        let low = BigInteger::pow(&two, bits - 1);
        let high = &BigInteger::pow(&two, bits) - &BigInteger::one();
        let step = BigInteger::from(4);

        let mut tested = 0usize;
        loop {
            let mut candidate = random_in_range(rng, &low, &high)?;
            candidate += BigInteger::from(3 - candidate.rem_small(4)?);
            while candidate <= high {
                tested += 1;
                if self.is_probable_prime(&candidate, rng) {
                    debug!(bits, tested, "generated prime");
                    return Ok(candidate);
                }
                candidate += &step;
            }
        }
    }
}

/// Miller–Rabin test with `rounds` random witnesses in `[2, n - 2]`.
///
/// Even inputs and inputs below 9 are decided directly. Never reports a
/// prime as composite.
pub fn miller_rabin<R: RngCore>(n: &BigInteger, rounds: usize, rng: &mut R) -> bool {
    let two = BigInteger::from(2);
    if n.is_even() {
        return n == &two;
    }
    if n < &BigInteger::from(9) {
        return n > &BigInteger::one();
    }

    let n_minus_one = n - &BigInteger::one();
    let mut d = n_minus_one.clone();
    let mut s = 0usize;
    while d.is_even() {
        d = match d.div_rem_small(2) {
            Ok((half, _)) => half,
            Err(_) => return false,
        };
        s += 1;
    }

    let Ok(modulus) = Modulus::new(n.clone()) else {
        return false;
    };
    let one = modulus.one();
    let minus_one = modulus.reduce(&n_minus_one);
    let witness_high = n - &two;

    'witness: for _ in 0..rounds {
        let Ok(a) = random_in_range(rng, &two, &witness_high) else {
            return false;
        };
        let mut x = modulus.reduce(&a).pow(&d);
        if x == one || x == minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.square();
            if x == minus_one {
                continue 'witness;
            }
            if x == one {
                return false;
            }
        }
        return false;
    }
    true
}
