// JUSTIFICATION: Group-wise arithmetic on values bounded by BASE; carries
// never exceed a few multiples of BASE and products are bounded by the
// FFT convolution length.
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]

//! Addition, subtraction, multiplication and the operator surface

use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use super::{BASE, BigInteger};
use crate::fft;

impl BigInteger {
    /// Signed-magnitude accumulation shared by addition and subtraction.
    ///
    /// `same_sign` tells whether the effective signs of `self` and the
    /// operand agree, i.e. whether magnitudes are added or subtracted.
    fn accumulate(&mut self, other: &[i64], same_sign: bool) {
        if self.groups.len() < other.len() {
            self.groups.resize(other.len(), 0);
        }
        if same_sign {
            for (group, &value) in self.groups.iter_mut().zip(other) {
                *group += value;
            }
        } else if Self::compare_magnitude(&self.groups, other).is_lt() {
            // Padding zeroes may make the lengths equal here; they are
            // stripped by normalize below.
            for (group, &value) in self.groups.iter_mut().zip(other) {
                *group = value - *group;
            }
            self.positive = !self.positive;
        } else {
            for (group, &value) in self.groups.iter_mut().zip(other) {
                *group -= value;
            }
        }

        let mut carry = 0;
        let mut i = 0;
        while i < self.groups.len() && (i < other.len() || carry != 0) {
            let value = self.groups[i] + carry;
            carry = value.div_euclid(BASE);
            self.groups[i] = value.rem_euclid(BASE);
            i += 1;
        }
        if carry > 0 {
            self.groups.push(carry);
        }
        self.normalize();
    }

    /// Move the magnitude one unit away from zero (`same_sign`) or toward it.
    fn step_one(&mut self, same_sign: bool) {
        if same_sign {
            let mut i = 0;
            loop {
                if i == self.groups.len() {
                    self.groups.push(1);
                    break;
                }
                self.groups[i] += 1;
                if self.groups[i] < BASE {
                    break;
                }
                self.groups[i] = 0;
                i += 1;
            }
        } else if self.groups.is_empty() {
            self.groups.push(1);
            self.positive = !self.positive;
        } else {
            let mut i = 0;
            while self.groups[i] == 0 {
                self.groups[i] = BASE - 1;
                i += 1;
            }
            self.groups[i] -= 1;
            self.normalize();
        }
    }

    /// Add one in place
    pub fn increment(&mut self) {
        self.step_one(self.positive);
    }

    /// Subtract one in place
    pub fn decrement(&mut self) {
        self.step_one(!self.positive);
    }

    fn multiply(&self, other: &Self) -> Self {
        let mut groups = fft::multiply(&self.groups, &other.groups);
        let mut i = 0;
        while i < groups.len() {
            if groups[i] >= BASE {
                if i + 1 == groups.len() {
                    groups.push(0);
                }
                groups[i + 1] += groups[i] / BASE;
                groups[i] %= BASE;
            }
            i += 1;
        }
        Self::from_groups(groups, self.positive == other.positive)
    }

    /// `base` raised to `exponent` by repeated squaring
    #[must_use]
    pub fn pow(base: &Self, mut exponent: usize) -> Self {
        let mut result = Self::one();
        let mut square = base.clone();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result *= &square;
            }
            exponent >>= 1;
            if exponent > 0 {
                square = &square * &square;
            }
        }
        result
    }
}

impl AddAssign<&BigInteger> for BigInteger {
    fn add_assign(&mut self, rhs: &BigInteger) {
        let same_sign = self.positive == rhs.positive;
        self.accumulate(&rhs.groups, same_sign);
    }
}

impl SubAssign<&BigInteger> for BigInteger {
    fn sub_assign(&mut self, rhs: &BigInteger) {
        let same_sign = self.positive != rhs.positive;
        self.accumulate(&rhs.groups, same_sign);
    }
}

impl Add<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    fn add(self, rhs: &BigInteger) -> BigInteger {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl Sub<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    fn sub(self, rhs: &BigInteger) -> BigInteger {
        let mut difference = self.clone();
        difference -= rhs;
        difference
    }
}

impl Mul<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    fn mul(self, rhs: &BigInteger) -> BigInteger {
        self.multiply(rhs)
    }
}

// JUSTIFICATION: `/` and `%` follow primitive integer semantics and panic on a
// zero divisor. `BigInteger::divide` is the fallible entry point.
impl Div<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    #[allow(clippy::panic)]
    fn div(self, rhs: &BigInteger) -> BigInteger {
        match self.divide(rhs) {
            Ok((quotient, _)) => quotient,
            Err(error) => panic!("{error}"),
        }
    }
}

impl Rem<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    #[allow(clippy::panic)]
    fn rem(self, rhs: &BigInteger) -> BigInteger {
        match self.divide(rhs) {
            Ok((_, remainder)) => remainder,
            Err(error) => panic!("{error}"),
        }
    }
}

/// Derive owned/borrowed operand combinations from the `&a op &b` impl.
macro_rules! forward_binop {
    ($($imp:ident, $method:ident;)*) => {$(
        impl $imp<BigInteger> for BigInteger {
            type Output = BigInteger;

            fn $method(self, rhs: BigInteger) -> BigInteger {
                $imp::$method(&self, &rhs)
            }
        }

        impl $imp<&BigInteger> for BigInteger {
            type Output = BigInteger;

            fn $method(self, rhs: &BigInteger) -> BigInteger {
                $imp::$method(&self, rhs)
            }
        }

        impl $imp<BigInteger> for &BigInteger {
            type Output = BigInteger;

            fn $method(self, rhs: BigInteger) -> BigInteger {
                $imp::$method(self, &rhs)
            }
        }
    )*};
}

forward_binop! {
    Add, add;
    Sub, sub;
    Mul, mul;
    Div, div;
    Rem, rem;
}

/// Compound assignment through the binary operator.
macro_rules! assign_via_binop {
    ($($imp:ident, $method:ident, $op:ident, $op_method:ident;)*) => {$(
        impl $imp<&BigInteger> for BigInteger {
            fn $method(&mut self, rhs: &BigInteger) {
                *self = $op::$op_method(&*self, rhs);
            }
        }
    )*};
}

assign_via_binop! {
    MulAssign, mul_assign, Mul, mul;
    DivAssign, div_assign, Div, div;
    RemAssign, rem_assign, Rem, rem;
}

/// Owned right-hand side for compound assignment.
macro_rules! assign_owned {
    ($($imp:ident, $method:ident;)*) => {$(
        impl $imp<BigInteger> for BigInteger {
            fn $method(&mut self, rhs: BigInteger) {
                $imp::$method(self, &rhs);
            }
        }
    )*};
}

assign_owned! {
    AddAssign, add_assign;
    SubAssign, sub_assign;
    MulAssign, mul_assign;
    DivAssign, div_assign;
    RemAssign, rem_assign;
}

impl Neg for BigInteger {
    type Output = BigInteger;

    fn neg(mut self) -> BigInteger {
        if !self.is_zero() {
            self.positive = !self.positive;
        }
        self
    }
}

impl Neg for &BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        -self.clone()
    }
}
