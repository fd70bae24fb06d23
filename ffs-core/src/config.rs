//! Driver configuration.
//!
//! [`DriverConfig`] describes a batch of identification sessions: how many to
//! run, the protocol parameters of each, and where the modulus comes from.
//! Values start from defaults, can be overlaid from the environment, and are
//! validated before use.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use std::str::FromStr;

use ffs_bigint::{BigInteger, DEFAULT_ROUNDS, Modulus};
use ffs_zkp::session::MIN_PRIME_BITS;
use ffs_zkp::{DEFAULT_ROUND_LIMIT, DEFAULT_SECRET_COUNT};

use crate::error::{CoreError, Result};

/// The 71-digit modulus used when none is configured.
pub const REFERENCE_MODULUS: &str = "27606985387162255149739023449107931668458716142620601169954803000803329";

/// Default number of sessions per run.
pub const DEFAULT_SESSIONS: usize = 7;

/// Environment variable for [`DriverConfig::sessions`].
pub const ENV_SESSIONS: &str = "FFS_SESSIONS";
/// Environment variable for [`DriverConfig::secret_count`].
pub const ENV_SECRETS: &str = "FFS_SECRETS";
/// Environment variable for [`DriverConfig::round_limit`].
pub const ENV_ROUNDS: &str = "FFS_ROUNDS";
/// Environment variable selecting a generated modulus of the given prime size.
pub const ENV_PRIME_BITS: &str = "FFS_PRIME_BITS";

/// Where the session modulus comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModulusSource {
    /// A fixed decimal modulus.
    Fixed(String),
    /// A fresh Blum integer built from two primes of `prime_bits` bits.
    Generated {
        /// Size of each prime factor in bits.
        prime_bits: usize,
    },
}

impl Default for ModulusSource {
    fn default() -> Self {
        Self::Fixed(REFERENCE_MODULUS.to_string())
    }
}

/// Configuration for a batch of sessions.
///
/// # Examples
/// ```rust
/// use ffs_core::config::{DriverConfig, ModulusSource};
///
/// let config = DriverConfig::new()
///     .with_sessions(3)
///     .with_round_limit(32)
///     .with_modulus(ModulusSource::Generated { prime_bits: 64 })
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.sessions, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverConfig {
    /// Number of independent sessions.
    ///
    /// Default: 7
    pub sessions: usize,

    /// Secret roots per prover (`k`).
    ///
    /// Default: 10
    pub secret_count: usize,

    /// Logical rounds the verifier requires.
    ///
    /// Default: 64
    pub round_limit: u64,

    /// Miller–Rabin witnesses used when generating a modulus.
    ///
    /// Default: 20
    pub miller_rabin_rounds: usize,

    /// Modulus source.
    ///
    /// Default: the 71-digit reference modulus
    pub modulus: ModulusSource,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            sessions: DEFAULT_SESSIONS,
            secret_count: DEFAULT_SECRET_COUNT,
            round_limit: DEFAULT_ROUND_LIMIT,
            miller_rabin_rounds: DEFAULT_ROUNDS,
            modulus: ModulusSource::default(),
        }
    }
}

impl DriverConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with the `FFS_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but does not parse, or if the
    /// resulting configuration is invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`, keyed by variable name.
    ///
    /// # Errors
    ///
    /// See [`DriverConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(sessions) = parse_var(&lookup, ENV_SESSIONS)? {
            config.sessions = sessions;
        }
        if let Some(secret_count) = parse_var(&lookup, ENV_SECRETS)? {
            config.secret_count = secret_count;
        }
        if let Some(round_limit) = parse_var(&lookup, ENV_ROUNDS)? {
            config.round_limit = round_limit;
        }
        if let Some(prime_bits) = parse_var(&lookup, ENV_PRIME_BITS)? {
            config.modulus = ModulusSource::Generated { prime_bits };
        }
        config.build()
    }

    /// Set the number of sessions.
    #[must_use]
    pub fn with_sessions(mut self, sessions: usize) -> Self {
        self.sessions = sessions;
        self
    }

    /// Set the number of secret roots per prover.
    #[must_use]
    pub fn with_secret_count(mut self, secret_count: usize) -> Self {
        self.secret_count = secret_count;
        self
    }

    /// Set the number of logical rounds.
    #[must_use]
    pub fn with_round_limit(mut self, round_limit: u64) -> Self {
        self.round_limit = round_limit;
        self
    }

    /// Set the Miller–Rabin witness count.
    #[must_use]
    pub fn with_miller_rabin_rounds(mut self, rounds: usize) -> Self {
        self.miller_rabin_rounds = rounds;
        self
    }

    /// Set the modulus source.
    #[must_use]
    pub fn with_modulus(mut self, modulus: ModulusSource) -> Self {
        self.modulus = modulus;
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// See [`DriverConfig::validate`].
    pub fn build(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Validates the configuration settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - any count (sessions, secrets, rounds, witnesses) is zero
    /// - a generated modulus uses primes below the minimum size
    /// - a fixed modulus does not parse or is not greater than one
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("sessions", self.sessions),
            ("secret_count", self.secret_count),
            ("miller_rabin_rounds", self.miller_rabin_rounds),
        ] {
            if value == 0 {
                return Err(CoreError::ConfigurationError(format!("{name} must be at least 1")));
            }
        }
        if self.round_limit == 0 {
            return Err(CoreError::ConfigurationError("round_limit must be at least 1".to_string()));
        }
        match &self.modulus {
            ModulusSource::Generated { prime_bits } if *prime_bits < MIN_PRIME_BITS => {
                Err(CoreError::ConfigurationError(format!(
                    "prime_bits must be at least {MIN_PRIME_BITS}, got {prime_bits}"
                )))
            }
            ModulusSource::Generated { .. } => Ok(()),
            ModulusSource::Fixed(text) => fixed_modulus(text).map(|_| ()),
        }
    }
}

/// Parse and check a fixed decimal modulus.
pub(crate) fn fixed_modulus(text: &str) -> Result<Modulus> {
    let value = BigInteger::from_str(text)
        .map_err(|e| CoreError::ConfigurationError(format!("modulus {text:?} does not parse: {e}")))?;
    Modulus::new(value).map_err(|e| CoreError::ConfigurationError(e.to_string()))
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse().map_err(|e| CoreError::ConfigurationError(format!("{key}={raw:?} is invalid: {e}")))
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DriverConfig::new();
        assert_eq!(config.sessions, 7);
        assert_eq!(config.secret_count, 10);
        assert_eq!(config.round_limit, 64);
        assert_eq!(config.miller_rabin_rounds, 20);
        assert_eq!(config.modulus, ModulusSource::Fixed(REFERENCE_MODULUS.to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = DriverConfig::new()
            .with_sessions(2)
            .with_secret_count(4)
            .with_round_limit(9)
            .with_miller_rabin_rounds(8)
            .with_modulus(ModulusSource::Fixed("35".to_string()))
            .build()
            .expect("valid configuration");
        assert_eq!((config.sessions, config.secret_count, config.round_limit), (2, 4, 9));
        assert_eq!(config.miller_rabin_rounds, 8);
    }

    #[test]
    fn test_zero_counts_rejected() {
        assert!(DriverConfig::new().with_sessions(0).build().is_err());
        assert!(DriverConfig::new().with_secret_count(0).build().is_err());
        assert!(DriverConfig::new().with_round_limit(0).build().is_err());
        assert!(DriverConfig::new().with_miller_rabin_rounds(0).build().is_err());
    }

    #[test]
    fn test_modulus_validation() {
        let fixed = |text: &str| DriverConfig::new().with_modulus(ModulusSource::Fixed(text.to_string())).build();
        assert!(matches!(fixed("12ab"), Err(CoreError::ConfigurationError(_))));
        assert!(matches!(fixed("1"), Err(CoreError::ConfigurationError(_))));
        assert!(fixed("35").is_ok());

        let generated = |bits| DriverConfig::new().with_modulus(ModulusSource::Generated { prime_bits: bits }).build();
        assert!(generated(7).is_err());
        assert!(generated(8).is_ok());
    }

    #[test]
    fn test_lookup_overlay() {
        let config =
            DriverConfig::from_lookup(lookup(&[("FFS_SESSIONS", "3"), ("FFS_ROUNDS", " 16 "), ("FFS_PRIME_BITS", "48")]))
                .expect("valid overlay");
        assert_eq!(config.sessions, 3);
        assert_eq!(config.secret_count, 10);
        assert_eq!(config.round_limit, 16);
        assert_eq!(config.modulus, ModulusSource::Generated { prime_bits: 48 });
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let result = DriverConfig::from_lookup(lookup(&[("FFS_SECRETS", "ten")]));
        assert!(matches!(result, Err(CoreError::ConfigurationError(message)) if message.contains("FFS_SECRETS")));
        assert!(DriverConfig::from_lookup(lookup(&[("FFS_SESSIONS", "0")])).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let config = DriverConfig::new()
            .with_sessions(2)
            .with_round_limit(12)
            .with_modulus(ModulusSource::Generated { prime_bits: 40 });
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"prime_bits\":40"));
        let restored: DriverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);

        let fixed: ModulusSource = serde_json::from_str("{\"Fixed\":\"35\"}").unwrap();
        assert_eq!(fixed, ModulusSource::Fixed("35".to_string()));
    }
}
