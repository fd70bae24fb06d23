//! Comprehensive big-integer tests
//!
//! Property tests for parsing, division and agreement with native integers,
//! modular-layer invariants, and primality against trial division.

#![allow(clippy::expect_used)] // Tests use expect for clarity
#![allow(clippy::arithmetic_side_effects)]

use ffs_bigint::{BigIntError, BigInteger, ModInt, Modulus, PrimalityOracle, miller_rabin};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const REFERENCE_MODULUS: &str = "27606985387162255149739023449107931668458716142620601169954803000803329";

fn big(text: &str) -> BigInteger {
    text.parse().expect("literal should parse")
}

fn trial_division(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

// ============================================================================
// Parsing and formatting
// ============================================================================

mod string_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Canonical decimal strings survive a parse/format cycle unchanged
        #[test]
        fn canonical_strings_round_trip(text in "0|-?[1-9][0-9]{0,120}") {
            let value: BigInteger = text.parse().expect("canonical string should parse");
            prop_assert_eq!(value.to_string(), text);
        }

        /// Leading zeroes and a plus sign are dropped
        #[test]
        fn padded_strings_canonicalise(zeroes in 0usize..12, digits in "[1-9][0-9]{0,40}") {
            let padded = format!("+{}{}", "0".repeat(zeroes), digits);
            let value: BigInteger = padded.parse().expect("padded string should parse");
            prop_assert_eq!(value.to_string(), digits);
        }
    }

    #[test]
    fn test_invalid_strings() {
        for text in ["", "-", "1e5", "12 34", "٣"] {
            assert!(matches!(text.parse::<BigInteger>(), Err(BigIntError::InvalidFormat(_))), "{text:?}");
        }
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

mod arithmetic_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        /// Results agree with native i64 arithmetic wherever it does not overflow
        #[test]
        fn agrees_with_native(a in any::<i32>(), b in any::<i32>()) {
            let (a, b) = (i64::from(a), i64::from(b));
            let (x, y) = (BigInteger::from(a), BigInteger::from(b));
            prop_assert_eq!(&x + &y, BigInteger::from(a + b));
            prop_assert_eq!(&x - &y, BigInteger::from(a - b));
            prop_assert_eq!(&x * &y, BigInteger::from(a * b));
            prop_assert_eq!(x.cmp(&y), a.cmp(&b));
            if b != 0 {
                let (quotient, remainder) = x.divide(&y).expect("non-zero divisor");
                prop_assert_eq!(quotient, BigInteger::from(a / b));
                prop_assert_eq!(remainder, BigInteger::from(a % b));
            }
        }

        /// a == q * b + r with |r| < |b| and r carrying the sign of a
        #[test]
        fn division_identity(a in "-?[1-9][0-9]{0,200}", b in "-?[1-9][0-9]{0,90}") {
            let (a, b) = (big(&a), big(&b));
            let (quotient, remainder) = a.divide(&b).expect("non-zero divisor");
            prop_assert_eq!(&(&quotient * &b) + &remainder, a.clone());
            prop_assert!(remainder.abs() < b.abs());
            prop_assert!(remainder.is_zero() || remainder.is_negative() == a.is_negative());
        }

        /// Multiplication distributes over addition
        #[test]
        fn multiplication_distributes(a in "-?[1-9][0-9]{0,150}", b in "-?[1-9][0-9]{0,150}", c in "-?[1-9][0-9]{0,150}") {
            let (a, b, c) = (big(&a), big(&b), big(&c));
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }
    }

    #[test]
    fn test_long_operands_multiply_and_divide_back() {
        let a = big(&"31415926535897932384626433832795028841971".repeat(60));
        let b = big(&"27182818284590452353602874713526624977572".repeat(45));
        let product = &a * &b;
        let (quotient, remainder) = product.divide(&b).expect("non-zero divisor");
        assert_eq!(quotient, a);
        assert!(remainder.is_zero());
    }

    #[test]
    fn test_binary_matches_native() {
        for value in [1u64, 6, 255, 1 << 40, u64::MAX] {
            let bits = BigInteger::from(value).to_binary();
            let rebuilt = bits.iter().rev().fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit));
            assert_eq!(rebuilt, value);
        }
    }
}

// ============================================================================
// Modular integers
// ============================================================================

mod modular_tests {
    use super::*;

    fn reference() -> Modulus {
        Modulus::new(big(REFERENCE_MODULUS)).expect("reference modulus is valid")
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// Every constructed or computed residue lies in [0, N)
        #[test]
        fn residues_stay_reduced(a in "-?[1-9][0-9]{0,150}", b in "-?[1-9][0-9]{0,150}") {
            let n = reference();
            let (x, y) = (n.reduce(&big(&a)), n.reduce(&big(&b)));
            for value in [x.clone(), y.clone(), &x + &y, &x - &y, &x * &y, -&x, x.inverse()] {
                prop_assert!(!value.value().is_negative());
                prop_assert!(value.value() < n.value());
            }
        }

        /// a * a^-1 = 1 whenever the inverse exists, zero otherwise
        #[test]
        fn inverse_law(a in 1i64..100_000, m in 2i64..100_000) {
            let n = Modulus::new(BigInteger::from(m)).expect("modulus above one");
            let x = ModInt::new(BigInteger::from(a), &n);
            let inverse = x.inverse();
            if BigInteger::gcd(&BigInteger::from(a), &BigInteger::from(m)) == BigInteger::one() {
                prop_assert_eq!(&x * &inverse, n.one());
            } else {
                prop_assert!(inverse.is_zero());
            }
        }
    }

    #[test]
    fn test_inverse_law_reference_modulus() {
        let n = reference();
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..20 {
            let x = n.reduce(&ffs_bigint::random_in_range(&mut rng, &BigInteger::one(), n.value()).expect("range"));
            if x.is_invertible() {
                assert_eq!(&x * &x.inverse(), n.one());
            }
        }
    }
}

// ============================================================================
// Primality
// ============================================================================

mod primality_tests {
    use super::*;

    #[test]
    fn test_agrees_with_trial_division_up_to_1e5() {
        let oracle = PrimalityOracle::default();
        let mut rng = StdRng::seed_from_u64(31);
        for n in 0..=100_000u64 {
            let value = BigInteger::from(n);
            assert_eq!(oracle.is_probable_prime(&value, &mut rng), trial_division(n), "{n}");
        }
    }

    #[test]
    fn test_miller_rabin_agrees_with_trial_division() {
        let mut rng = StdRng::seed_from_u64(32);
        for n in 100_000..103_000u64 {
            assert_eq!(miller_rabin(&BigInteger::from(n), 20, &mut rng), trial_division(n), "{n}");
        }
    }

    #[test]
    fn test_oracle_past_the_sieve() {
        let oracle = PrimalityOracle::new(16);
        let mut rng = StdRng::seed_from_u64(33);
        for n in 1_000_000_000..1_000_000_200u64 {
            assert_eq!(oracle.is_probable_prime(&BigInteger::from(n), &mut rng), trial_division(n), "{n}");
        }
    }

    #[test]
    fn test_blum_factors() {
        let oracle = PrimalityOracle::default();
        let mut rng = StdRng::seed_from_u64(34);
        let p = oracle.generate_prime(64, &mut rng).expect("prime generation should succeed");
        let q = oracle.generate_prime(64, &mut rng).expect("prime generation should succeed");
        let n = &p * &q;
        assert_eq!(n.rem_small(4).expect("non-zero divisor"), 1);
        assert!(!oracle.is_probable_prime(&n, &mut rng));
    }
}

// ============================================================================
// Wire form
// ============================================================================

#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;

    #[test]
    fn test_serialises_as_decimal_string() {
        let value = big("-123456789012345678901234567890");
        let json = serde_json::to_string(&value).expect("serialisation should succeed");
        assert_eq!(json, "\"-123456789012345678901234567890\"");
        let back: BigInteger = serde_json::from_str(&json).expect("deserialisation should succeed");
        assert_eq!(back, value);
        assert!(serde_json::from_str::<BigInteger>("\"12x\"").is_err());
    }
}
