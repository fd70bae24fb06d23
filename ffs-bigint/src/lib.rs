#![doc = "Arbitrary-precision integer engine"]
//!
//! # ffs-bigint
//!
//! Hand-written arbitrary-precision arithmetic for the FFS identification
//! protocol. Everything the protocol computes is a [`BigInteger`] or a
//! [`ModInt`], so the exact semantics here (sign handling, remainder ranges,
//! inverse existence) are what the protocol's correctness rests on.
//!
//! ## Components
//!
//! - **fft**: complex-FFT polynomial multiplication used by multiplication and binary conversion
//! - **bigint**: sign/magnitude integers in base `10^5`
//! - **modular**: residues for an explicit, shared [`Modulus`]
//! - **primality**: sieve, Miller–Rabin and generation of primes `≡ 3 (mod 4)`
//! - **random**: unbiased sampling of big integers from any `rand` generator
//!
//! ## Example
//!
//! ```
//! use ffs_bigint::{BigInteger, Modulus};
//!
//! let n = Modulus::new(BigInteger::from(35)).unwrap();
//! let s = n.reduce(&BigInteger::from(2));
//! let public = s.inverse().square();
//! assert_eq!(public.value(), &BigInteger::from(9));
//! ```

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

pub mod bigint;
pub mod error;
pub mod fft;
pub mod modular;
pub mod primality;
pub mod random;

pub use bigint::{BASE, BASE_DIGITS, BigInteger};
pub use error::{BigIntError, Result};
pub use modular::{ModInt, Modulus};
pub use primality::{DEFAULT_ROUNDS, PrimalityOracle, miller_rabin};
pub use random::{RandomSource, random_in_range};
