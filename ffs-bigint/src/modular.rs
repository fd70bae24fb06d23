#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Residues modulo an explicit modulus
//!
//! [`ModInt`] keeps a [`BigInteger`] in `[0, N)` for the [`Modulus`] it was
//! built with. The modulus is shared by reference count, so every value of a
//! session carries the same `N` and sessions with different moduli can run
//! side by side.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use zeroize::Zeroize;

use crate::bigint::BigInteger;
use crate::error::{BigIntError, Result};

/// Modulus `N > 1` shared by a family of residues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modulus(Arc<BigInteger>);

impl Modulus {
    /// Wrap `value` as a modulus.
    ///
    /// # Errors
    /// Returns [`BigIntError::InvalidModulus`] if `value <= 1`.
    pub fn new(value: BigInteger) -> Result<Self> {
        if value <= BigInteger::one() {
            return Err(BigIntError::InvalidModulus(format!("modulus must exceed 1, got {value}")));
        }
        Ok(Self(Arc::new(value)))
    }

    /// The modulus as a big integer
    #[must_use]
    pub fn value(&self) -> &BigInteger {
        &self.0
    }

    /// Reduce an arbitrary integer into `[0, N)`
    #[must_use]
    pub fn reduce(&self, raw: &BigInteger) -> ModInt {
        ModInt::new(raw.clone(), self)
    }

    /// The residue of zero
    #[must_use]
    pub fn zero(&self) -> ModInt {
        ModInt { value: BigInteger::zero(), modulus: self.clone() }
    }

    /// The residue of one
    #[must_use]
    pub fn one(&self) -> ModInt {
        ModInt::new(BigInteger::one(), self)
    }
}

impl fmt::Display for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Integer in `[0, N)` for a fixed modulus `N`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModInt {
    value: BigInteger,
    modulus: Modulus,
}

impl ModInt {
    /// Reduce `raw` into `[0, N)`.
    #[must_use]
    pub fn new(raw: BigInteger, modulus: &Modulus) -> Self {
        let n = modulus.value();
        let value = if !raw.is_negative() && raw < *n {
            raw
        } else {
            // ((raw % N) + N) % N, with the second reduction only when needed
            let mut reduced = &raw % n;
            if reduced.is_negative() {
                reduced += n;
            }
            reduced
        };
        Self { value, modulus: modulus.clone() }
    }

    /// The canonical representative in `[0, N)`
    #[must_use]
    pub fn value(&self) -> &BigInteger {
        &self.value
    }

    /// Consume the residue, returning its representative
    #[must_use]
    pub fn into_value(self) -> BigInteger {
        self.value
    }

    /// The modulus this residue belongs to
    #[must_use]
    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    /// Returns true for the residue of zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns true if `gcd(value, N) = 1`
    #[must_use]
    pub fn is_invertible(&self) -> bool {
        BigInteger::gcd(&self.value, self.modulus.value()) == BigInteger::one()
    }

    /// Multiplicative inverse modulo `N`.
    ///
    /// Returns the residue of zero when `gcd(value, N) != 1`. Zero is never
    /// a genuine inverse, so a zero result always means "no inverse".
    #[must_use]
    pub fn inverse(&self) -> Self {
        let (x, _, gcd) = gcd_extended(&self.value, self.modulus.value());
        if gcd == BigInteger::one() { Self::new(x, &self.modulus) } else { self.modulus.zero() }
    }

    /// Square of the residue
    #[must_use]
    pub fn square(&self) -> Self {
        self * self
    }

    /// `self^|exponent| mod N` by binary exponentiation.
    ///
    /// Bits of the exponent are consumed least significant first, squaring
    /// the running base after each one.
    #[must_use]
    pub fn pow(&self, exponent: &BigInteger) -> Self {
        let mut result = self.modulus.one();
        let mut base = self.clone();
        let bits = exponent.to_binary();
        for (index, &bit) in bits.iter().enumerate() {
            if bit {
                result *= &base;
            }
            if index + 1 < bits.len() {
                base = base.square();
            }
        }
        result
    }

    fn same_modulus(&self, other: &Self) {
        debug_assert!(self.modulus == other.modulus, "residues from different moduli");
    }
}

/// Coefficients `(x, y, g)` with `a*x + b*y = g = gcd(a, b)` for `a, b >= 0`.
fn gcd_extended(a: &BigInteger, b: &BigInteger) -> (BigInteger, BigInteger, BigInteger) {
    if b.is_zero() {
        return (BigInteger::one(), BigInteger::zero(), a.clone());
    }
    let (quotient, remainder) = match a.divide(b) {
        Ok(parts) => parts,
        Err(_) => return (BigInteger::zero(), BigInteger::zero(), BigInteger::zero()),
    };
    let (x1, y1, gcd) = gcd_extended(b, &remainder);
    let y = &x1 - &(&y1 * &quotient);
    (y1, y, gcd)
}

impl Add<&ModInt> for &ModInt {
    type Output = ModInt;

    fn add(self, rhs: &ModInt) -> ModInt {
        self.same_modulus(rhs);
        // Both operands are below N, so one subtraction restores the range
        let mut sum = &self.value + &rhs.value;
        if &sum >= self.modulus.value() {
            sum -= self.modulus.value();
        }
        ModInt { value: sum, modulus: self.modulus.clone() }
    }
}

impl Sub<&ModInt> for &ModInt {
    type Output = ModInt;

    fn sub(self, rhs: &ModInt) -> ModInt {
        self.same_modulus(rhs);
        let mut difference = &self.value - &rhs.value;
        if difference.is_negative() {
            difference += self.modulus.value();
        }
        ModInt { value: difference, modulus: self.modulus.clone() }
    }
}

impl Mul<&ModInt> for &ModInt {
    type Output = ModInt;

    fn mul(self, rhs: &ModInt) -> ModInt {
        self.same_modulus(rhs);
        let product = &self.value * &rhs.value;
        ModInt::new(product, &self.modulus)
    }
}

impl Neg for &ModInt {
    type Output = ModInt;

    fn neg(self) -> ModInt {
        if self.is_zero() {
            return self.clone();
        }
        ModInt { value: self.modulus.value() - &self.value, modulus: self.modulus.clone() }
    }
}

impl Neg for ModInt {
    type Output = ModInt;

    fn neg(self) -> ModInt {
        -&self
    }
}

macro_rules! forward_modint_binop {
    ($($imp:ident, $method:ident;)*) => {$(
        impl $imp<ModInt> for ModInt {
            type Output = ModInt;

            fn $method(self, rhs: ModInt) -> ModInt {
                $imp::$method(&self, &rhs)
            }
        }

        impl $imp<&ModInt> for ModInt {
            type Output = ModInt;

            fn $method(self, rhs: &ModInt) -> ModInt {
                $imp::$method(&self, rhs)
            }
        }

        impl $imp<ModInt> for &ModInt {
            type Output = ModInt;

            fn $method(self, rhs: ModInt) -> ModInt {
                $imp::$method(self, &rhs)
            }
        }
    )*};
}

forward_modint_binop! {
    Add, add;
    Sub, sub;
    Mul, mul;
}

impl std::ops::MulAssign<&ModInt> for ModInt {
    fn mul_assign(&mut self, rhs: &ModInt) {
        *self = &*self * rhs;
    }
}

impl fmt::Display for ModInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl Zeroize for ModInt {
    fn zeroize(&mut self) {
        self.value.zeroize();
    }
}
