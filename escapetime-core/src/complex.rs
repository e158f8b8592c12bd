use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::CoreError;

/// A complex number represented as two `f64` components.
///
/// This is a lightweight, `Copy` type optimized for the tight iteration loop.
/// We roll our own instead of using `num::Complex` to keep the dependency graph
/// minimal and retain full control over the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    #[inline]
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Returns `re² + im²` without taking the square root.
    #[inline]
    pub fn norm_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Returns `√(re² + im²)`.
    #[inline]
    pub fn norm(self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// The complex conjugate: negated imaginary part.
    #[inline]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// Divide by a real scalar.
    ///
    /// Fails with [`CoreError::DivideByZero`] when `rhs` is exactly zero.
    pub fn div_scalar(self, rhs: f64) -> crate::Result<Self> {
        if rhs == 0.0 {
            return Err(CoreError::DivideByZero);
        }
        Ok(Self {
            re: self.re / rhs,
            im: self.im / rhs,
        })
    }

    /// Complex division: `self * rhs.conj() / rhs.norm_sq()`.
    ///
    /// Fails with [`CoreError::DivideByZero`] when `rhs` is the zero
    /// complex number.
    pub fn div(self, rhs: Self) -> crate::Result<Self> {
        (self * rhs.conj()).div_scalar(rhs.norm_sq())
    }

    /// Order by modulus. For sorting in tests and diagnostics only;
    /// two distinct numbers can share a modulus, so this is not a
    /// `PartialOrd` impl.
    pub fn norm_cmp(self, other: Self) -> Ordering {
        self.norm_sq().total_cmp(&other.norm_sq())
    }
}

// -- Arithmetic operators --

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl AddAssign for Complex {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl SubAssign for Complex {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.re -= rhs.re;
        self.im -= rhs.im;
    }
}

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl MulAssign for Complex {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Neg for Complex {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

/// Scalar multiplication: `Complex * f64`.
impl Mul<f64> for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self {
            re: self.re * rhs,
            im: self.im * rhs,
        }
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im >= 0.0 {
            write!(f, "{} + {}i", self.re, self.im)
        } else {
            write!(f, "{} - {}i", self.re, -self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn approx_eq_c(a: Complex, b: Complex) -> bool {
        approx_eq(a.re, b.re) && approx_eq(a.im, b.im)
    }

    #[test]
    fn zero_constant() {
        let z = Complex::ZERO;
        assert_eq!(z.re, 0.0);
        assert_eq!(z.im, 0.0);
    }

    #[test]
    fn addition() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, 4.0);
        let c = a + b;
        assert!(approx_eq(c.re, 4.0));
        assert!(approx_eq(c.im, 6.0));
    }

    #[test]
    fn subtraction_undoes_addition() {
        let points = [
            (Complex::new(1.0, 2.0), Complex::new(3.0, 4.0)),
            (Complex::new(-0.5, 0.25), Complex::new(100.0, -7.0)),
            (Complex::new(0.0, -3.0), Complex::new(2.5, 2.5)),
        ];
        for (a, b) in points {
            assert!(approx_eq_c((a + b) - b, a));
        }
    }

    #[test]
    fn multiplication() {
        // (1 + 2i)(3 + 4i) = 3 + 4i + 6i + 8i² = 3 + 10i - 8 = -5 + 10i
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, 4.0);
        let c = a * b;
        assert!(approx_eq(c.re, -5.0));
        assert!(approx_eq(c.im, 10.0));
    }

    #[test]
    fn scalar_multiplication() {
        let a = Complex::new(2.0, 3.0);
        let c = a * 4.0;
        assert!(approx_eq(c.re, 8.0));
        assert!(approx_eq(c.im, 12.0));
    }

    #[test]
    fn negation() {
        let a = Complex::new(1.0, -2.0);
        let b = -a;
        assert!(approx_eq(b.re, -1.0));
        assert!(approx_eq(b.im, 2.0));
    }

    #[test]
    fn norm_sq() {
        let a = Complex::new(3.0, 4.0);
        assert!(approx_eq(a.norm_sq(), 25.0));
    }

    #[test]
    fn norm_is_sqrt_of_norm_sq() {
        let points = [
            Complex::new(3.0, 4.0),
            Complex::new(-1.5, 2.25),
            Complex::new(0.0, -7.0),
        ];
        for z in points {
            assert!(approx_eq(z.norm(), z.norm_sq().sqrt()));
            assert!(approx_eq(z.norm(), (z.re * z.re + z.im * z.im).sqrt()));
        }
    }

    #[test]
    fn conjugate_negates_imaginary() {
        let z = Complex::new(1.5, -2.5);
        assert_eq!(z.conj().re, z.re);
        assert_eq!(z.conj().im, -z.im);
    }

    #[test]
    fn conjugate_is_involution() {
        let z = Complex::new(-3.25, 0.125);
        assert_eq!(z.conj().conj(), z);
    }

    #[test]
    fn scalar_division() {
        let a = Complex::new(8.0, -12.0);
        let c = a.div_scalar(4.0).unwrap();
        assert!(approx_eq(c.re, 2.0));
        assert!(approx_eq(c.im, -3.0));
    }

    #[test]
    fn scalar_division_by_zero() {
        let a = Complex::new(1.0, 1.0);
        assert!(matches!(a.div_scalar(0.0), Err(CoreError::DivideByZero)));
    }

    #[test]
    fn division_undoes_multiplication() {
        let pairs = [
            (Complex::new(1.0, 2.0), Complex::new(3.0, -4.0)),
            (Complex::new(-0.5, 0.5), Complex::new(0.0, 2.0)),
            (Complex::new(7.0, 0.0), Complex::new(1.0, 1.0)),
        ];
        for (a, b) in pairs {
            let q = a.div(b).unwrap();
            assert!(approx_eq_c(q * b, a));
        }
    }

    #[test]
    fn division_by_zero_complex() {
        let a = Complex::new(1.0, 2.0);
        assert!(matches!(a.div(Complex::ZERO), Err(CoreError::DivideByZero)));
    }

    #[test]
    fn modulus_ordering() {
        let mut points = vec![
            Complex::new(3.0, 4.0),  // |z| = 5
            Complex::new(0.0, 1.0),  // |z| = 1
            Complex::new(-2.0, 0.0), // |z| = 2
        ];
        points.sort_by(|a, b| a.norm_cmp(*b));
        let norms: Vec<f64> = points.iter().map(|z| z.norm()).collect();
        assert!(approx_eq(norms[0], 1.0));
        assert!(approx_eq(norms[1], 2.0));
        assert!(approx_eq(norms[2], 5.0));
    }

    #[test]
    fn squaring() {
        // z² where z = 1 + i → (1+i)(1+i) = 1 + 2i - 1 = 0 + 2i
        let z = Complex::new(1.0, 1.0);
        let z2 = z * z;
        assert!(approx_eq(z2.re, 0.0));
        assert!(approx_eq(z2.im, 2.0));
    }

    #[test]
    fn serde_round_trip() {
        let z = Complex::new(-0.7, 0.27015);
        let json = serde_json::to_string(&z).unwrap();
        let back: Complex = serde_json::from_str(&json).unwrap();
        assert_eq!(z, back);
    }
}
