#![doc = "Feige-Fiat-Shamir Interactive Identification"]
//!
//! # ffs-zkp
//!
//! A prover convinces a verifier that it knows square roots `s_i` of the
//! public values `I_i⁻¹ (mod N)` without revealing them. Each logical round
//! is commit / challenge / response / check; a cheating prover survives a
//! round with probability `2^-k`, so after the round limit acceptance of an
//! impostor is negligible.
//!
//! ## Example
//!
//! ```
//! use ffs_bigint::{BigInteger, Modulus};
//! use ffs_zkp::{HonestProver, SessionContext, run_session};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let n = Modulus::new("27606985387162255149739023449107931668458716142620601169954803000803329".parse().unwrap()).unwrap();
//! let context = SessionContext::new(n, 10, 16).unwrap();
//!
//! let prover = HonestProver::new(context.clone(), StdRng::seed_from_u64(1));
//! let outcome = run_session(context, prover, StdRng::seed_from_u64(2)).unwrap();
//! assert!(outcome.is_accepted());
//! ```
//!
//! ## Roles
//!
//! - **prover**: [`HonestProver`] holding the secrets
//! - **verifier**: [`Verifier`] holding the public key
//! - **channel**: [`Channel`] enforcing round/status discipline on any [`Party`]

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

pub mod channel;
pub mod error;
pub mod message;
pub mod party;
pub mod prover;
pub mod session;
pub mod verifier;

pub use channel::{Channel, SessionOutcome, run_session};
pub use error::{Rejection, Result, ZkpError};
#[cfg(feature = "serde")]
pub use message::WireMessage;
pub use message::{Message, Status};
pub use party::Party;
pub use prover::HonestProver;
pub use session::{DEFAULT_ROUND_LIMIT, DEFAULT_SECRET_COUNT, SessionContext, blum_modulus};
pub use verifier::Verifier;
