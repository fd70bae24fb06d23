#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
// JUSTIFICATION: Digit groups are bounded by BASE = 10^5 and machine-integer
// conversions only run on values whose group count is checked first.
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::indexing_slicing)]

//! Signed arbitrary-precision integers
//!
//! A [`BigInteger`] is a sign flag plus a little-endian sequence of digit
//! groups in base `10^5`. The representation is canonical:
//!
//! - the most significant group is never zero,
//! - zero is an empty group sequence with a positive sign.
//!
//! Every constructor and operator re-establishes this before returning, so
//! derived equality and hashing compare values.
//!
//! ## Layout
//!
//! - `arith`: addition, subtraction, FFT multiplication, increment/decrement, operators
//! - `division`: recursive block division, small-divisor helpers, gcd
//! - `binary`: conversion to a little-endian bit vector

mod arith;
mod binary;
mod division;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use zeroize::Zeroize;

use crate::error::{BigIntError, Result};

/// Radix of one digit group
pub const BASE: i64 = 100_000;

/// Decimal digits per digit group
pub const BASE_DIGITS: usize = 5;

/// Signed arbitrary-precision integer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInteger {
    /// Little-endian digit groups, each in `[0, BASE)`
    groups: Vec<i64>,
    /// Sign flag; always `true` for zero
    positive: bool,
}

impl Default for BigInteger {
    fn default() -> Self {
        Self::zero()
    }
}

impl BigInteger {
    /// The value zero
    #[must_use]
    pub const fn zero() -> Self {
        Self { groups: Vec::new(), positive: true }
    }

    /// The value one
    #[must_use]
    pub fn one() -> Self {
        Self { groups: vec![1], positive: true }
    }

    /// Build from raw groups and restore the canonical form.
    pub(crate) fn from_groups(groups: Vec<i64>, positive: bool) -> Self {
        let mut value = Self { groups, positive };
        value.normalize();
        value
    }

    /// Strip high zero groups and give zero a positive sign.
    pub(crate) fn normalize(&mut self) {
        while self.groups.last() == Some(&0) {
            self.groups.pop();
        }
        if self.groups.is_empty() {
            self.positive = true;
        }
    }

    pub(crate) fn groups(&self) -> &[i64] {
        &self.groups
    }

    /// Number of digit groups in the magnitude
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of decimal digits in the magnitude (1 for zero)
    #[must_use]
    pub fn decimal_digits(&self) -> usize {
        match self.groups.last() {
            None => 1,
            Some(top) => (self.groups.len() - 1) * BASE_DIGITS + top.to_string().len(),
        }
    }

    /// Returns true for zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns true for values below zero
    #[must_use]
    pub fn is_negative(&self) -> bool {
        !self.positive
    }

    /// Returns true for values above zero
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.positive && !self.is_zero()
    }

    /// Returns true if the value is divisible by two
    #[must_use]
    pub fn is_even(&self) -> bool {
        self.groups.first().is_none_or(|low| low % 2 == 0)
    }

    /// Absolute value
    #[must_use]
    pub fn abs(&self) -> Self {
        Self { groups: self.groups.clone(), positive: true }
    }

    /// Value of a magnitude with at most three groups, with sign applied.
    ///
    /// Three groups stay below `10^15`, so no overflow is possible.
    pub(crate) fn small_value(&self) -> i64 {
        debug_assert!(self.groups.len() <= 3);
        let magnitude = self.groups.iter().rev().fold(0i64, |acc, &group| acc * BASE + group);
        if self.positive { magnitude } else { -magnitude }
    }

    /// Three-way comparison of two magnitudes.
    pub(crate) fn compare_magnitude(left: &[i64], right: &[i64]) -> Ordering {
        left.len().cmp(&right.len()).then_with(|| left.iter().rev().cmp(right.iter().rev()))
    }
}

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.positive, other.positive) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => Self::compare_magnitude(&self.groups, &other.groups),
            (false, false) => Self::compare_magnitude(&other.groups, &self.groups),
        }
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for BigInteger {
    fn from(mut number: i64) -> Self {
        let positive = number >= 0;
        let mut groups = Vec::new();
        // Remainders of a negative number are non-positive; negate each group
        // instead of the whole number so i64::MIN converts exactly.
        while number != 0 {
            groups.push((number % BASE).abs());
            number /= BASE;
        }
        Self { groups, positive }
    }
}

impl From<u64> for BigInteger {
    fn from(mut number: u64) -> Self {
        let base = BASE.unsigned_abs();
        let mut groups = Vec::new();
        while number != 0 {
            groups.push((number % base) as i64);
            number /= base;
        }
        Self { groups, positive: true }
    }
}

impl From<i32> for BigInteger {
    fn from(number: i32) -> Self {
        Self::from(i64::from(number))
    }
}

impl From<u32> for BigInteger {
    fn from(number: u32) -> Self {
        Self::from(u64::from(number))
    }
}

impl TryFrom<&BigInteger> for i64 {
    type Error = BigIntError;

    fn try_from(value: &BigInteger) -> Result<Self> {
        // Seven groups (35 digits) always fit in i128; more never fit in i64
        if value.groups.len() > 7 {
            return Err(BigIntError::Overflow);
        }
        let magnitude =
            value.groups.iter().rev().fold(0i128, |acc, &group| acc * i128::from(BASE) + i128::from(group));
        let signed = if value.positive { magnitude } else { -magnitude };
        i64::try_from(signed).map_err(|_e| BigIntError::Overflow)
    }
}

impl TryFrom<BigInteger> for i64 {
    type Error = BigIntError;

    fn try_from(value: BigInteger) -> Result<Self> {
        i64::try_from(&value)
    }
}

impl FromStr for BigInteger {
    type Err = BigIntError;

    /// Parse an optionally signed decimal string.
    fn from_str(text: &str) -> Result<Self> {
        let (positive, digits) = match text.as_bytes().first() {
            None => return Err(BigIntError::InvalidFormat("empty string".to_string())),
            Some(b'-') => (false, &text[1..]),
            Some(b'+') => (true, &text[1..]),
            Some(_) => (true, text),
        };
        if digits.is_empty() {
            return Err(BigIntError::InvalidFormat(format!("no digits in {text:?}")));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(BigIntError::InvalidFormat(format!("unexpected character {bad:?} in {text:?}")));
        }

        let bytes = digits.as_bytes();
        let mut groups = Vec::with_capacity(bytes.len() / BASE_DIGITS + 1);
        let mut end = bytes.len();
        while end > 0 {
            let start = end.saturating_sub(BASE_DIGITS);
            let group =
                bytes[start..end].iter().fold(0i64, |acc, &digit| acc * 10 + i64::from(digit - b'0'));
            groups.push(group);
            end = start;
        }
        Ok(Self::from_groups(groups, positive))
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((top, rest)) = self.groups.split_last() else {
            return f.write_str("0");
        };
        if !self.positive {
            f.write_str("-")?;
        }
        write!(f, "{top}")?;
        for group in rest.iter().rev() {
            write!(f, "{group:0width$}", width = BASE_DIGITS)?;
        }
        Ok(())
    }
}

impl Zeroize for BigInteger {
    fn zeroize(&mut self) {
        self.groups.zeroize();
        self.positive = true;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BigInteger {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BigInteger {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn big(text: &str) -> BigInteger {
        text.parse().unwrap()
    }

    #[test]
    fn test_zero_is_canonical() {
        assert_eq!(big("0"), BigInteger::zero());
        assert_eq!(big("-0"), BigInteger::zero());
        assert_eq!(big("+00000000000"), BigInteger::zero());
        assert!(!big("-0").is_negative());
        assert_eq!(big("-0").to_string(), "0");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "-", "+", "12a3", "--1", " 1", "1 ", "0x10", "1.5"] {
            assert!(
                matches!(text.parse::<BigInteger>(), Err(BigIntError::InvalidFormat(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_canonical_display() {
        assert_eq!(big("000123").to_string(), "123");
        assert_eq!(big("+100000").to_string(), "100000");
        assert_eq!(big("-1000000000000000000000").to_string(), "-1000000000000000000000");
        assert_eq!(big("12345000001").to_string(), "12345000001");
    }

    #[test]
    fn test_machine_integer_round_trip() {
        for value in [0, 1, -1, 99_999, 100_000, -100_001, i64::MAX, i64::MIN] {
            let converted = BigInteger::from(value);
            assert_eq!(converted.to_string(), value.to_string());
            assert_eq!(i64::try_from(&converted).unwrap(), value);
        }
        assert_eq!(BigInteger::from(u64::MAX).to_string(), u64::MAX.to_string());
    }

    #[test]
    fn test_to_i64_overflow() {
        assert_eq!(i64::try_from(&big("9223372036854775808")), Err(BigIntError::Overflow));
        assert_eq!(i64::try_from(&big("-9223372036854775809")), Err(BigIntError::Overflow));
        assert_eq!(i64::try_from(&big(&"9".repeat(60))), Err(BigIntError::Overflow));
    }

    #[test]
    fn test_ordering() {
        let values = ["-1000000", "-99999", "-1", "0", "1", "99999", "100000", "123456789012"];
        for pair in values.windows(2) {
            assert!(big(pair[0]) < big(pair[1]), "{} < {}", pair[0], pair[1]);
        }
        assert_eq!(big("-5").cmp(&big("-5")), Ordering::Equal);
    }

    #[test]
    fn test_predicates() {
        assert!(big("0").is_even());
        assert!(big("-100000").is_even());
        assert!(!big("100001").is_even());
        assert!(big("7").is_positive());
        assert!(!big("0").is_positive());
        assert!(big("-7").is_negative());
        assert_eq!(big("-7").abs(), big("7"));
        assert_eq!(big("0").decimal_digits(), 1);
        assert_eq!(big("-1234567").decimal_digits(), 7);
    }

    #[test]
    fn test_zeroize_resets_to_zero() {
        let mut secret = big("-123456789123456789");
        secret.zeroize();
        assert!(secret.is_zero());
        assert!(!secret.is_negative());
    }
}
