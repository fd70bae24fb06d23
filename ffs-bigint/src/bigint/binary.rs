// JUSTIFICATION: Bit vectors are indexed within their current length and
// convolution outputs of 0/1 coefficients are bounded by the operand length.
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]

//! Decimal-to-binary conversion
//!
//! Each digit group is expanded to bits on its own, then neighbouring
//! expansions are merged pairwise (`high * BASE^step + low`) in a balanced
//! tree. The multiplications by powers of `BASE` go through the FFT, so the
//! conversion costs a logarithmic number of polynomial products instead of
//! one long division per bit.

use super::{BASE, BigInteger};
use crate::fft;

impl BigInteger {
    /// Little-endian bits of the magnitude; empty for zero.
    #[must_use]
    pub fn to_binary(&self) -> Vec<bool> {
        if self.groups.is_empty() {
            return Vec::new();
        }
        let count = self.groups.len();
        let mut parts: Vec<Vec<bool>> = self.groups.iter().map(|&group| machine_bits(group)).collect();
        let mut base_power = machine_bits(BASE);
        let mut step = 1;
        while step < count {
            let mut low = 0;
            while low + step < count {
                let high = low + step;
                let mut merged = std::mem::take(&mut parts[high]);
                multiply_bits(&mut merged, &base_power);
                add_bits(&mut merged, &parts[low]);
                parts[low] = merged;
                low += 2 * step;
            }
            step *= 2;
            if step < count {
                let square = base_power.clone();
                multiply_bits(&mut base_power, &square);
            }
        }
        let mut bits = std::mem::take(&mut parts[0]);
        while bits.last() == Some(&false) {
            bits.pop();
        }
        bits
    }

    /// Number of significant bits of the magnitude
    #[must_use]
    pub fn bit_length(&self) -> usize {
        self.to_binary().len()
    }
}

fn machine_bits(mut value: i64) -> Vec<bool> {
    let mut bits = Vec::new();
    while value != 0 {
        bits.push(value & 1 == 1);
        value >>= 1;
    }
    bits
}

fn add_bits(target: &mut Vec<bool>, other: &[bool]) {
    if target.len() < other.len() {
        target.resize(other.len(), false);
    }
    let mut carry = 0u8;
    let mut i = 0;
    while i < target.len() && (i < other.len() || carry != 0) {
        let sum = carry + u8::from(target[i]) + u8::from(other.get(i).copied().unwrap_or(false));
        target[i] = sum & 1 == 1;
        carry = sum >> 1;
        i += 1;
    }
    if carry != 0 {
        target.push(true);
    }
}

fn multiply_bits(target: &mut Vec<bool>, other: &[bool]) {
    let left: Vec<i64> = target.iter().map(|&bit| i64::from(bit)).collect();
    let right: Vec<i64> = other.iter().map(|&bit| i64::from(bit)).collect();
    let mut product = fft::multiply(&left, &right);
    let mut i = 0;
    while i < product.len() {
        if product[i] > 1 {
            if i + 1 == product.len() {
                product.push(0);
            }
            product[i + 1] += product[i] >> 1;
            product[i] &= 1;
        }
        i += 1;
    }
    *target = product.into_iter().map(|bit| bit == 1).collect();
}
