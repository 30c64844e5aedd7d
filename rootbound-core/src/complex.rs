//! Standard-tier complex number: two machine floats, fixed dynamic range.

use crate::tier::ComplexTier;

/// Simple f64 complex number, the fastest tier.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    /// Zero constant.
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// One constant.
    pub const ONE: Self = Self { re: 1.0, im: 0.0 };

    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Check if both components are finite (no overflow artifacts).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl ComplexTier for Complex {
    type Real = f64;

    #[inline]
    fn zero(&self) -> Self {
        Self::ZERO
    }

    #[inline]
    fn one(&self) -> Self {
        Self::ONE
    }

    #[inline]
    fn from_f64_pair_like(&self, re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[inline]
    fn to_f64_pair(&self) -> (f64, f64) {
        (self.re, self.im)
    }

    #[inline]
    fn add(&self, other: &Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }

    #[inline]
    fn sub(&self, other: &Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }

    #[inline]
    fn mul(&self, other: &Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    #[inline]
    fn square(&self) -> Self {
        Self {
            re: self.re * self.re - self.im * self.im,
            im: 2.0 * self.re * self.im,
        }
    }

    #[inline]
    fn scale(&self, factor: f64) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
    }

    #[inline]
    fn div(&self, other: &Self) -> Self {
        let denom = other.re * other.re + other.im * other.im;
        Self {
            re: (self.re * other.re + self.im * other.im) / denom,
            im: (self.im * other.re - self.re * other.im) / denom,
        }
    }

    #[inline]
    fn modulus(&self) -> f64 {
        self.re.hypot(self.im)
    }

    #[inline]
    fn epsilon(&self) -> f64 {
        f64::EPSILON
    }
}
