#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Uniform sampling of big integers
//!
//! Any [`rand::RngCore`] is a [`RandomSource`]. Callers own their generator
//! and pass it by mutable reference, so two sessions never share state.

use rand::{Rng, RngCore};

use crate::bigint::{BASE, BigInteger};
use crate::error::{BigIntError, Result};

/// Source of uniform big integers and bits
pub trait RandomSource {
    /// Uniform integer in the inclusive range `[low, high]`.
    ///
    /// # Errors
    /// Returns [`BigIntError::InvalidInput`] if `high < low`.
    fn random_range(&mut self, low: &BigInteger, high: &BigInteger) -> Result<BigInteger>;

    /// Uniform bit
    fn random_bit(&mut self) -> bool;
}

impl<R: RngCore> RandomSource for R {
    fn random_range(&mut self, low: &BigInteger, high: &BigInteger) -> Result<BigInteger> {
        random_in_range(self, low, high)
    }

    fn random_bit(&mut self) -> bool {
        self.gen_bool(0.5)
    }
}

/// Uniform integer in `[low, high]` by rejection sampling.
///
/// Every digit group of the offset is drawn uniformly except the most
/// significant one, which is bounded by the span's top group. Draws above the
/// span are rejected and redrawn, which keeps the result unbiased; at least
/// half of all draws are accepted.
///
/// # Errors
/// Returns [`BigIntError::InvalidInput`] if `high < low`.
pub fn random_in_range<R: RngCore>(rng: &mut R, low: &BigInteger, high: &BigInteger) -> Result<BigInteger> {
    if high < low {
        return Err(BigIntError::InvalidInput(format!("empty range [{low}, {high}]")));
    }
    let span = high - low;
    let Some((&top, rest)) = span.groups().split_last() else {
        return Ok(low.clone());
    };
    loop {
        let mut groups: Vec<i64> = rest.iter().map(|_| rng.gen_range(0..BASE)).collect();
        groups.push(rng.gen_range(0..=top));
        let offset = BigInteger::from_groups(groups, true);
        if offset <= span {
            return Ok(low + &offset);
        }
    }
}
