//! Extended-range floating point for overflow-free polynomial evaluation.
//!
//! FloatExp = f64 mantissa + i64 exponent, providing effectively unlimited
//! dynamic range with 53-bit precision. Intermediate powers of a high-degree
//! polynomial routinely leave the f64 exponent range long before the result
//! does; this tier evaluates them without over/underflow.

use serde::{Deserialize, Serialize};

use crate::tier::RealScalar;

/// Extended-range floating point: f64 mantissa + i64 exponent.
/// Value = mantissa × 2^exp (or 0 if mantissa == 0).
/// Mantissa normalized to [0.5, 1.0) for non-zero values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatExp {
    mantissa: f64,
    exp: i64,
}

/// Exponent gap beyond which the smaller addend is below one ulp of the
/// larger and alignment would only shift bits into the void.
const ALIGN_LIMIT: i64 = 120;

impl FloatExp {
    /// Zero constant.
    pub const ZERO: Self = Self {
        mantissa: 0.0,
        exp: 0,
    };

    /// Zero value.
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Create from f64 (normalizes automatically).
    pub fn from_f64(val: f64) -> Self {
        if val == 0.0 {
            return Self::ZERO;
        }
        // frexp returns (mantissa, exponent) where mantissa is in [0.5, 1.0)
        let (mantissa, exp) = libm::frexp(val);
        Self {
            mantissa,
            exp: exp as i64,
        }
    }

    /// Convert to f64 (may overflow/underflow for extreme exponents).
    pub fn to_f64(&self) -> f64 {
        if self.mantissa == 0.0 {
            return 0.0;
        }
        if self.exp > 1023 {
            return if self.mantissa > 0.0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }
        if self.exp < -1074 {
            return 0.0;
        }
        libm::ldexp(self.mantissa, self.exp as i32)
    }

    /// Check if zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    /// Check if strictly negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.mantissa < 0.0
    }

    /// Re-normalize an intermediate mantissa into [0.5, 1.0).
    #[inline]
    fn renorm(mantissa: f64, exp: i64) -> Self {
        if mantissa == 0.0 {
            return Self::ZERO;
        }
        let (m, e) = libm::frexp(mantissa);
        Self {
            mantissa: m,
            exp: exp + e as i64,
        }
    }

    /// Negation (exact).
    #[inline]
    pub fn neg(&self) -> Self {
        Self {
            mantissa: -self.mantissa,
            exp: self.exp,
        }
    }

    /// Absolute value (exact).
    #[inline]
    pub fn abs(&self) -> Self {
        Self {
            mantissa: self.mantissa.abs(),
            exp: self.exp,
        }
    }

    /// Addition with exponent alignment.
    pub fn add(&self, other: &Self) -> Self {
        if self.is_zero() {
            return *other;
        }
        if other.is_zero() {
            return *self;
        }
        let (hi, lo) = if self.exp >= other.exp {
            (self, other)
        } else {
            (other, self)
        };
        let shift = hi.exp - lo.exp;
        if shift > ALIGN_LIMIT {
            return *hi;
        }
        // The scale is an exact power of two within f64 range, so the sum
        // rounds exactly once, like a plain f64 addition.
        let m = hi.mantissa + libm::ldexp(lo.mantissa, -(shift as i32));
        Self::renorm(m, hi.exp)
    }

    /// Subtraction.
    #[inline]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplication; exponents add, never overflow f64 range.
    #[inline]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::ZERO;
        }
        Self::renorm(self.mantissa * other.mantissa, self.exp + other.exp)
    }

    /// Square (mantissa product stays in [0.25, 1.0), one renorm).
    #[inline]
    pub fn square(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        Self::renorm(self.mantissa * self.mantissa, 2 * self.exp)
    }

    /// Multiply by an f64 scalar; powers of two stay exact.
    pub fn mul_f64(&self, factor: f64) -> Self {
        if self.is_zero() || factor == 0.0 {
            return Self::ZERO;
        }
        let (fm, fe) = libm::frexp(factor);
        Self::renorm(self.mantissa * fm, self.exp + fe as i64)
    }

    /// Division; exponents subtract, never underflow f64 range.
    #[inline]
    pub fn div(&self, other: &Self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        Self::renorm(self.mantissa / other.mantissa, self.exp - other.exp)
    }

    /// Square root of a non-negative value.
    pub fn sqrt(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        // Make the exponent even so it halves exactly.
        let (m, e) = if self.exp & 1 == 0 {
            (self.mantissa, self.exp)
        } else {
            (self.mantissa * 0.5, self.exp + 1)
        };
        Self::renorm(m.sqrt(), 0).shift_exp(e / 2)
    }

    #[inline]
    fn shift_exp(mut self, delta: i64) -> Self {
        if !self.is_zero() {
            self.exp += delta;
        }
        self
    }

    /// Approximate log2 of the absolute value; -inf for zero.
    pub fn log2_approx(&self) -> f64 {
        if self.is_zero() {
            return f64::NEG_INFINITY;
        }
        self.exp as f64 + self.mantissa.abs().log2()
    }
}

impl PartialOrd for FloatExp {
    /// Ordering via the sign of the exactly-rounded difference; rounding a
    /// f64 subtraction never flips its sign.
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.sub(other).mantissa.partial_cmp(&0.0)
    }
}

impl RealScalar for FloatExp {
    #[inline]
    fn zero(&self) -> Self {
        Self::ZERO
    }

    #[inline]
    fn one(&self) -> Self {
        Self::from_f64(1.0)
    }

    #[inline]
    fn add(&self, other: &Self) -> Self {
        FloatExp::add(self, other)
    }

    #[inline]
    fn mul(&self, other: &Self) -> Self {
        FloatExp::mul(self, other)
    }

    #[inline]
    fn div(&self, other: &Self) -> Self {
        FloatExp::div(self, other)
    }

    #[inline]
    fn scale(&self, factor: f64) -> Self {
        self.mul_f64(factor)
    }

    #[inline]
    fn to_f64(&self) -> f64 {
        FloatExp::to_f64(self)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        FloatExp::is_zero(self)
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.mantissa.is_finite()
    }
}
