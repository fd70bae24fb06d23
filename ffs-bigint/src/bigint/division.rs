// JUSTIFICATION: Block shifts and small-divisor loops index within the
// current group vector; machine-integer division only runs on operands of
// at most SMALL_DIVIDE_GROUPS groups.
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_possible_truncation)]

//! Recursive divide-and-conquer division
//!
//! Both operands are first scaled so the divisor's leading group is at least
//! `BASE / 2`, and the remainder is scaled back at the end. Magnitudes are
//! then divided block-wise: the dividend is split in halves of
//! `n / 2` groups, each half is divided by a recursive "wide" step that
//! estimates the quotient from truncated operands and then corrects the
//! estimate by adding the divisor back while the remainder is negative.
//! Operands of up to [`SMALL_DIVIDE_GROUPS`] groups fall through to native
//! `i64` division.

use std::cmp::Ordering;

use super::{BASE, BigInteger};
use crate::error::{BigIntError, Result};

/// Group count at which division switches to machine integers.
pub const SMALL_DIVIDE_GROUPS: usize = 3;

impl BigInteger {
    /// Quotient and remainder of `self / divisor`.
    ///
    /// The quotient truncates toward zero and the remainder takes the sign of
    /// the dividend, so `self == quotient * divisor + remainder` and
    /// `|remainder| < |divisor|`.
    ///
    /// # Errors
    /// Returns [`BigIntError::DivisionByZero`] if `divisor` is zero.
    pub fn divide(&self, divisor: &Self) -> Result<(Self, Self)> {
        if divisor.is_zero() {
            return Err(BigIntError::DivisionByZero);
        }
        if Self::compare_magnitude(&self.groups, &divisor.groups) == Ordering::Less {
            return Ok((Self::zero(), self.clone()));
        }

        // Scale so the divisor's top group is at least BASE / 2; quotient
        // estimates from truncated operands are then off by a few units only.
        let scale = BASE / (divisor.groups.last().copied().unwrap_or(0) + 1);
        let factor = BigInteger::from(scale);
        let dividend = &self.abs() * &factor;
        let scaled_divisor = &divisor.abs() * &factor;
        let size = dividend.groups.len().max(scaled_divisor.groups.len()).next_power_of_two();
        let (mut quotient, scaled_remainder) = divide_wide(&dividend, &scaled_divisor, size);
        let (mut remainder, _) = scaled_remainder.div_rem_small(scale)?;
        quotient.positive = self.positive == divisor.positive;
        remainder.positive = self.positive;
        quotient.normalize();
        remainder.normalize();
        Ok((quotient, remainder))
    }

    /// Quotient and remainder for a machine-integer divisor.
    ///
    /// Same sign conventions as [`BigInteger::divide`].
    ///
    /// # Errors
    /// Returns [`BigIntError::DivisionByZero`] if `divisor` is zero.
    pub fn div_rem_small(&self, divisor: i64) -> Result<(Self, i64)> {
        if divisor == 0 {
            return Err(BigIntError::DivisionByZero);
        }
        let magnitude = i128::from(divisor).abs();
        let mut groups = self.groups.clone();
        let mut carry: i128 = 0;
        for group in groups.iter_mut().rev() {
            let current = i128::from(*group) + carry * i128::from(BASE);
            // Quotient digit is below BASE because carry < |divisor|
            *group = (current / magnitude) as i64;
            carry = current % magnitude;
        }
        let quotient = Self::from_groups(groups, self.positive == (divisor > 0));
        let remainder = if self.positive { carry } else { -carry };
        Ok((quotient, remainder as i64))
    }

    /// Remainder for a machine-integer divisor, with the dividend's sign.
    ///
    /// # Errors
    /// Returns [`BigIntError::DivisionByZero`] if `divisor` is zero.
    pub fn rem_small(&self, divisor: i64) -> Result<i64> {
        if divisor == 0 {
            return Err(BigIntError::DivisionByZero);
        }
        let magnitude = i128::from(divisor).abs();
        let carry = self
            .groups
            .iter()
            .rev()
            .fold(0i128, |carry, &group| (i128::from(group) + carry * i128::from(BASE)) % magnitude);
        Ok((if self.positive { carry } else { -carry }) as i64)
    }

    /// Greatest common divisor of the magnitudes
    #[must_use]
    pub fn gcd(a: &Self, b: &Self) -> Self {
        let mut a = a.abs();
        let mut b = b.abs();
        while !b.is_zero() {
            let remainder = &a % &b;
            a = std::mem::replace(&mut b, remainder);
        }
        a
    }

    /// Drop the `count` least significant groups.
    fn shift_right(&self, count: usize) -> Self {
        if count >= self.groups.len() {
            return Self::zero();
        }
        Self::from_groups(self.groups[count..].to_vec(), self.positive)
    }

    /// Multiply by `BASE^count`.
    fn shift_left(&self, count: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut groups = vec![0; count];
        groups.extend_from_slice(&self.groups);
        Self::from_groups(groups, self.positive)
    }

    /// The `count` least significant groups as a non-negative value.
    fn low_groups(&self, count: usize) -> Self {
        let end = count.min(self.groups.len());
        Self::from_groups(self.groups[..end].to_vec(), true)
    }
}

fn divide_small(a: &BigInteger, b: &BigInteger) -> (BigInteger, BigInteger) {
    let (first, second) = (a.small_value(), b.small_value());
    (BigInteger::from(first / second), BigInteger::from(first % second))
}

/// Divide a dividend of about `2n` groups by a divisor of about `n` groups.
///
/// Operands are non-negative.
fn divide_halves(a: &BigInteger, b: &BigInteger, n: usize) -> (BigInteger, BigInteger) {
    if a < b {
        return (BigInteger::zero(), a.clone());
    }
    if a.groups.len() <= SMALL_DIVIDE_GROUPS {
        return divide_small(a, b);
    }
    let half = n / 2;
    let (high_quotient, high_remainder) = divide_wide(&a.shift_right(half), b, half);
    let lowered = high_remainder.shift_left(half) + a.low_groups(half);
    let (low_quotient, remainder) = divide_wide(&lowered, b, half);
    (high_quotient.shift_left(half) + low_quotient, remainder)
}

/// Divide when the divisor may be wider than `n` groups.
///
/// The quotient is estimated from both operands truncated to the divisor's
/// top `n` groups, then corrected against the full divisor. Operands are
/// non-negative.
fn divide_wide(a: &BigInteger, b: &BigInteger, n: usize) -> (BigInteger, BigInteger) {
    if a < b {
        return (BigInteger::zero(), a.clone());
    }
    if b.groups.len() <= n {
        return divide_halves(a, b, n);
    }
    if a.groups.len() <= SMALL_DIVIDE_GROUPS {
        return divide_small(a, b);
    }

    let dropped = b.groups.len() - n;
    let a_top = a.shift_right(dropped);
    let b_top = b.shift_right(dropped);

    let mut quotient = if b_top.shift_left(n) < a_top {
        BigInteger::one().shift_left(n)
    } else {
        divide_halves(&a_top, &b_top, n).0
    };

    let mut remainder = a - &(b * &quotient);
    while remainder.is_negative() {
        remainder += b;
        quotient.decrement();
    }
    while &remainder >= b {
        remainder -= b;
        quotient.increment();
    }
    (quotient, remainder)
}
