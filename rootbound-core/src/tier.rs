//! Numeric tier contract for adaptive-precision root refinement.
//!
//! Provides a trait abstraction over f64, FloatExp, and BigFloat complex
//! numbers, enabling a single generic Newton evaluation kernel across all
//! three precision tiers. The tiers share an operation set but deliberately
//! not a representation: the standard tier is a pair of machine floats, the
//! extended tier a pair of mantissa/exponent scalars, the arbitrary tier a
//! pair of explicit-precision significands.

use thiserror::Error;

/// Operands within one evaluation carried different working precisions.
///
/// This is a contract violation by the caller, detected at the kernel
/// boundary rather than silently coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("mismatched working precision within one evaluation: {left} vs {right} bits")]
pub struct PrecisionMismatch {
    pub left: usize,
    pub right: usize,
}

/// Real scalar half of a tier.
///
/// Carries the error accumulator through the evaluation recurrence and all
/// of the convergence analyzer's arithmetic. `zero`/`one` take `&self` so
/// that the arbitrary tier can mint constants at the receiver's precision.
pub trait RealScalar: Clone + PartialOrd {
    /// Additive identity at the same precision as `self`.
    fn zero(&self) -> Self;

    /// Multiplicative identity at the same precision as `self`.
    fn one(&self) -> Self;

    fn add(&self, other: &Self) -> Self;

    fn mul(&self, other: &Self) -> Self;

    fn div(&self, other: &Self) -> Self;

    /// Multiply by an exact f64 scalar (tier-independent constants).
    fn scale(&self, factor: f64) -> Self;

    /// Lossy conversion for reporting; may over/underflow outside f64 range.
    fn to_f64(&self) -> f64;

    /// Exact zero test. Tolerance handling belongs to the analyzer, never here.
    fn is_zero(&self) -> bool;

    /// False only for hardware-float overflow artifacts (inf/NaN).
    fn is_finite(&self) -> bool;
}

/// Complex value in one precision tier.
///
/// All operands of one evaluation pass must share a precision setting; for
/// the arbitrary tier that is checked by [`ComplexTier::validate`], for the
/// other tiers it holds by construction.
pub trait ComplexTier: Clone {
    /// Matching real-scalar representation (f64 / FloatExp / BigFloat).
    type Real: RealScalar;

    /// Additive identity at the same precision as `self`.
    fn zero(&self) -> Self;

    /// Multiplicative identity at the same precision as `self`.
    fn one(&self) -> Self;

    /// Construct a value in this tier, at the receiver's precision.
    fn from_f64_pair_like(&self, re: f64, im: f64) -> Self;

    /// Extract as f64 pair for output and comparisons.
    fn to_f64_pair(&self) -> (f64, f64);

    fn add(&self, other: &Self) -> Self;

    fn sub(&self, other: &Self) -> Self;

    fn mul(&self, other: &Self) -> Self;

    /// Complex square (optimized where the tier allows).
    fn square(&self) -> Self;

    /// Multiply by an exact f64 scalar.
    fn scale(&self, factor: f64) -> Self;

    fn div(&self, other: &Self) -> Self;

    /// Modulus |z| as the tier's real scalar.
    fn modulus(&self) -> Self::Real;

    /// Unit roundoff of this value's precision: 2^-52 for the hardware
    /// tiers, 2^-precision_bits for the arbitrary tier.
    fn epsilon(&self) -> Self::Real;

    /// Fail fast when the value violates the uniform-precision contract.
    fn validate(&self) -> Result<(), PrecisionMismatch> {
        Ok(())
    }
}

impl RealScalar for f64 {
    #[inline]
    fn zero(&self) -> Self {
        0.0
    }

    #[inline]
    fn one(&self) -> Self {
        1.0
    }

    #[inline]
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    #[inline]
    fn mul(&self, other: &Self) -> Self {
        self * other
    }

    #[inline]
    fn div(&self, other: &Self) -> Self {
        self / other
    }

    #[inline]
    fn scale(&self, factor: f64) -> Self {
        self * factor
    }

    #[inline]
    fn to_f64(&self) -> f64 {
        *self
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    #[inline]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}
