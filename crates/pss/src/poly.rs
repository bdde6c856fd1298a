//! Polynomials in coefficient form.

use pss_math::zq::Modulus;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A polynomial over a prime field, as a vector of coefficients in increasing
/// degree order without trailing zeros.
///
/// The coefficients of a sharing polynomial determine the secrets, so they
/// are wiped when the polynomial is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial {
    coefficients: Vec<u64>,
}

impl Polynomial {
    /// Creates a polynomial from its coefficients, in increasing degree order.
    pub fn new(coefficients: Vec<u64>) -> Self {
        let mut poly = Self { coefficients };
        poly.normalize();
        poly
    }

    /// Creates the zero polynomial.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns the coefficients, in increasing degree order.
    pub fn coefficients(&self) -> &[u64] {
        &self.coefficients
    }

    /// Returns the degree of the polynomial, or None for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    /// Returns the leading coefficient, or None for the zero polynomial.
    pub fn leading_coefficient(&self) -> Option<u64> {
        self.coefficients.last().copied()
    }

    /// Returns whether this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Evaluates the polynomial at x using Horner's rule.
    pub fn evaluate(&self, p: &Modulus, x: u64) -> u64 {
        let x = p.reduce(x);
        self.coefficients
            .iter()
            .rev()
            .fold(0, |acc, c| p.add(p.mul(acc, x), p.reduce(*c)))
    }

    /// Returns the monic polynomial whose roots are exactly `roots`.
    pub(crate) fn from_roots(p: &Modulus, roots: &[u64]) -> Self {
        let mut coefficients = Vec::with_capacity(roots.len() + 1);
        coefficients.push(1u64);
        for root in roots {
            // Multiply by (x - root).
            let neg_root = p.neg(p.reduce(*root));
            coefficients.push(0);
            for j in (0..coefficients.len()).rev() {
                let lower = if j > 0 { coefficients[j - 1] } else { 0 };
                coefficients[j] = p.add(lower, p.mul(coefficients[j], neg_root));
            }
        }
        Self::new(coefficients)
    }

    /// Subtracts `scale * x^shift * other` in place.
    ///
    /// Aborts if a coefficient of either polynomial is not reduced modulo p in
    /// debug mode.
    pub(crate) fn sub_scaled_shifted(
        &mut self,
        p: &Modulus,
        scale: u64,
        shift: usize,
        other: &Polynomial,
    ) {
        let len = other.coefficients.len() + shift;
        if self.coefficients.len() < len {
            self.coefficients.resize(len, 0);
        }
        for (c, o) in self.coefficients[shift..]
            .iter_mut()
            .zip(other.coefficients.iter())
        {
            *c = p.sub(*c, p.mul(scale, *o));
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        while self.coefficients.last() == Some(&0) {
            self.coefficients.pop();
        }
    }
}

impl Zeroize for Polynomial {
    fn zeroize(&mut self) {
        self.coefficients.zeroize();
    }
}

impl Drop for Polynomial {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Polynomial {}
