#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
// JUSTIFICATION: Floating-point FFT convolution.
// - Array indexing is bounded by power-of-2 transform sizes fixed at construction
// - Coefficients move between i64 and f64; the precision bound is enforced by
//   MAX_TRANSFORM_LEN and checked on every rounding pass
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::indexing_slicing)]

//! Polynomial multiplication with a complex FFT
//!
//! Multiplies two integer coefficient sequences by convolution in the
//! frequency domain. Both operands are packed into the real and imaginary
//! parts of one complex sequence, so a product costs two forward transforms
//! (the second one at half size) instead of three full ones.
//!
//! # Precision
//!
//! The transform runs in `f64`. For coefficients below `10^5` the rounding
//! error stays well below one half for transforms up to [`MAX_TRANSFORM_LEN`]
//! points. Longer operands are split into blocks whose partial products are
//! accumulated exactly in `i64`, so no single transform exceeds the bound.

use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

use tracing::warn;

/// Shorter operands than this are multiplied by direct convolution.
pub const DIRECT_THRESHOLD: usize = 20;

/// Largest transform length used for a single convolution.
pub const MAX_TRANSFORM_LEN: usize = 1 << 14;

/// Worst tolerated distance between a raw output and its nearest integer.
const ROUNDING_TOLERANCE: f64 = 0.25;

/// Complex number over `f64`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    /// Real part
    pub re: f64,
    /// Imaginary part
    pub im: f64,
}

impl Complex {
    const I: Self = Self::new(0.0, 1.0);

    /// Create a complex number from its parts
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Point on the unit circle at angle `theta`
    #[must_use]
    pub fn from_angle(theta: f64) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    /// Complex conjugate
    #[must_use]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.re * rhs.re - self.im * rhs.im, self.re * rhs.im + self.im * rhs.re)
    }
}

/// Radix-2 transform with a precomputed root-of-unity table
///
/// The table built for size `n` also serves every smaller power-of-two size,
/// which the packed multiplication relies on for its half-size pass.
pub struct Transform {
    /// `roots[len + j] = e^(i*pi*j/len)` for every power of two `len < size`
    roots: Vec<Complex>,
    size: usize,
}

impl Transform {
    /// Build the root table for transforms of up to `size` points.
    ///
    /// `size` is rounded up to a power of two (minimum 2).
    #[must_use]
    pub fn new(size: usize) -> Self {
        let size = size.max(2).next_power_of_two();
        let mut roots = vec![Complex::default(); size];
        let mut len = 1;
        while len < size {
            for j in 0..len {
                roots[len + j] = Complex::from_angle(PI * j as f64 / len as f64);
            }
            len <<= 1;
        }
        Self { roots, size }
    }

    /// Maximum transform length supported by this table
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// In-place forward transform.
    ///
    /// `data.len()` must be a power of two not larger than [`Transform::size`].
    pub fn forward(&self, data: &mut [Complex]) {
        let n = data.len();
        if n <= 1 {
            return;
        }
        debug_assert!(n.is_power_of_two() && n <= self.size);

        // Bit-reversal permutation
        let mut j = 0;
        for i in 1..n {
            let mut bit = n >> 1;
            while j & bit != 0 {
                j ^= bit;
                bit >>= 1;
            }
            j ^= bit;
            if i < j {
                data.swap(i, j);
            }
        }

        let mut len = 1;
        while len < n {
            let mut start = 0;
            while start < n {
                let (left, right) = data.split_at_mut(start + len);
                let u_slice = &mut left[start..];
                let v_slice = &mut right[..len];
                for k in 0..len {
                    let v = v_slice[k] * self.roots[len + k];
                    let u = u_slice[k];
                    v_slice[k] = u - v;
                    u_slice[k] = u + v;
                }
                start += len << 1;
            }
            len <<= 1;
        }
    }
}

/// Convolution of two coefficient sequences.
///
/// Returns `len(a) + len(b) - 1` raw coefficients (or nothing when either
/// side is empty). No carry normalisation is applied; callers working in a
/// positional base propagate carries themselves.
#[must_use]
pub fn multiply(a: &[i64], b: &[i64]) -> Vec<i64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    if a.len().min(b.len()) <= DIRECT_THRESHOLD {
        return multiply_direct(a, b);
    }
    if a.len() + b.len() - 1 > MAX_TRANSFORM_LEN {
        return multiply_blockwise(a, b, MAX_TRANSFORM_LEN / 2);
    }
    multiply_packed(a, b)
}

fn multiply_direct(a: &[i64], b: &[i64]) -> Vec<i64> {
    let mut product = vec![0i64; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            product[i + j] += x * y;
        }
    }
    product
}

fn multiply_blockwise(a: &[i64], b: &[i64], block: usize) -> Vec<i64> {
    let mut product = vec![0i64; a.len() + b.len() - 1];
    for (i, a_block) in a.chunks(block).enumerate() {
        for (j, b_block) in b.chunks(block).enumerate() {
            let offset = (i + j) * block;
            for (k, value) in multiply(a_block, b_block).into_iter().enumerate() {
                product[offset + k] += value;
            }
        }
    }
    product
}

fn multiply_packed(a: &[i64], b: &[i64]) -> Vec<i64> {
    let result_len = a.len() + b.len() - 1;
    let size = result_len.max(2).next_power_of_two();
    let half = size >> 1;
    let transform = Transform::new(size);

    let mut data = vec![Complex::default(); size];
    for (slot, &x) in data.iter_mut().zip(a) {
        slot.re = x as f64;
    }
    for (slot, &y) in data.iter_mut().zip(b) {
        slot.im = y as f64;
    }
    transform.forward(&mut data);

    // Separate the packed spectra: A[k]B[k] = (R[k]^2 - conj(R[-k])^2) / 4i.
    // The product spectrum is stored index-reversed and pre-scaled by 1/size,
    // so a second forward transform acts as the inverse.
    let scale = Complex::new(0.0, -0.25 / size as f64);
    for i in 0..=half {
        let j = (size - i) & (size - 1);
        let ri = data[i] * data[i];
        let rj = data[j] * data[j];
        data[i] = (rj - ri.conj()) * scale;
        data[j] = (ri - rj.conj()) * scale;
    }

    // The product is real: fold even and odd coefficients into one
    // half-length complex sequence before transforming back.
    for i in 0..half {
        let even = data[i] + data[i + half];
        let odd = (data[i] - data[i + half]) * Complex::from_angle(PI * i as f64 / half as f64);
        data[i] = even + odd * Complex::I;
    }
    data.truncate(half);
    transform.forward(&mut data);

    let mut worst = 0.0f64;
    let product = (0..result_len)
        .map(|i| {
            let raw = if i & 1 == 1 { data[i >> 1].im } else { data[i >> 1].re };
            let rounded = (raw + 0.5).floor();
            worst = worst.max((raw - rounded).abs());
            rounded as i64
        })
        .collect();

    if worst > ROUNDING_TOLERANCE {
        warn!(
            transform_len = size,
            deviation = worst,
            "FFT rounding deviation above tolerance, product may be corrupted"
        );
    }
    product
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_operand() {
        assert!(multiply(&[], &[1, 2, 3]).is_empty());
        assert!(multiply(&[4], &[]).is_empty());
    }

    #[test]
    fn test_small_direct_product() {
        // (x + 1)^2 = x^2 + 2x + 1
        assert_eq!(multiply(&[1, 1], &[1, 1]), vec![1, 2, 1]);
    }

    #[test]
    fn test_packed_matches_direct() {
        let a: Vec<i64> = (0..150).map(|i| (i * 7919 + 13) % 100_000).collect();
        let b: Vec<i64> = (0..97).map(|i| (i * 104_729 + 5) % 100_000).collect();
        assert_eq!(multiply_packed(&a, &b), multiply_direct(&a, &b));
    }

    #[test]
    fn test_packed_odd_lengths() {
        let a: Vec<i64> = (0..21).map(|i| 99_999 - i).collect();
        let b: Vec<i64> = (0..33).map(|i| i * 3).collect();
        assert_eq!(multiply(&a, &b), multiply_direct(&a, &b));
    }

    #[test]
    fn test_blockwise_matches_direct() {
        let a: Vec<i64> = (0..300).map(|i| (i * 31) % 100_000).collect();
        let b: Vec<i64> = (0..260).map(|i| (i * 17 + 1) % 100_000).collect();
        assert_eq!(multiply_blockwise(&a, &b, 64), multiply_direct(&a, &b));
    }

    #[test]
    fn test_transform_of_impulse_is_flat() {
        let transform = Transform::new(8);
        let mut data = vec![Complex::default(); 8];
        data[0] = Complex::new(1.0, 0.0);
        transform.forward(&mut data);
        for value in data {
            assert!((value.re - 1.0).abs() < 1e-12);
            assert!(value.im.abs() < 1e-12);
        }
    }

    #[test]
    fn test_transform_size_rounds_up() {
        assert_eq!(Transform::new(0).size(), 2);
        assert_eq!(Transform::new(5).size(), 8);
    }
}
