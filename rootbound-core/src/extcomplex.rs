//! Extended-tier complex number built from FloatExp components.

use crate::floatexp::FloatExp;
use crate::tier::ComplexTier;

/// Complex number with extended-exponent components.
///
/// Same 53-bit component precision as the standard tier, but exponents are
/// i64, so degree-n powers of a large |x| cannot overflow mid-evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExtComplex {
    pub re: FloatExp,
    pub im: FloatExp,
}

impl ExtComplex {
    /// Zero constant.
    pub const ZERO: Self = Self {
        re: FloatExp::ZERO,
        im: FloatExp::ZERO,
    };

    pub fn new(re: FloatExp, im: FloatExp) -> Self {
        Self { re, im }
    }

    pub fn from_f64_pair(re: f64, im: f64) -> Self {
        Self {
            re: FloatExp::from_f64(re),
            im: FloatExp::from_f64(im),
        }
    }

    /// Check if zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }
}

impl ComplexTier for ExtComplex {
    type Real = FloatExp;

    #[inline]
    fn zero(&self) -> Self {
        Self::ZERO
    }

    #[inline]
    fn one(&self) -> Self {
        Self::from_f64_pair(1.0, 0.0)
    }

    #[inline]
    fn from_f64_pair_like(&self, re: f64, im: f64) -> Self {
        Self::from_f64_pair(re, im)
    }

    #[inline]
    fn to_f64_pair(&self) -> (f64, f64) {
        (self.re.to_f64(), self.im.to_f64())
    }

    #[inline]
    fn add(&self, other: &Self) -> Self {
        Self {
            re: self.re.add(&other.re),
            im: self.im.add(&other.im),
        }
    }

    #[inline]
    fn sub(&self, other: &Self) -> Self {
        Self {
            re: self.re.sub(&other.re),
            im: self.im.sub(&other.im),
        }
    }

    #[inline]
    fn mul(&self, other: &Self) -> Self {
        Self {
            re: self.re.mul(&other.re).sub(&self.im.mul(&other.im)),
            im: self.re.mul(&other.im).add(&self.im.mul(&other.re)),
        }
    }

    #[inline]
    fn square(&self) -> Self {
        Self {
            re: self.re.square().sub(&self.im.square()),
            // Multiply by 2 is exact: the factor's mantissa is 0.5
            im: self.re.mul(&self.im).mul_f64(2.0),
        }
    }

    #[inline]
    fn scale(&self, factor: f64) -> Self {
        Self {
            re: self.re.mul_f64(factor),
            im: self.im.mul_f64(factor),
        }
    }

    #[inline]
    fn div(&self, other: &Self) -> Self {
        let denom = other.re.square().add(&other.im.square());
        Self {
            re: self
                .re
                .mul(&other.re)
                .add(&self.im.mul(&other.im))
                .div(&denom),
            im: self
                .im
                .mul(&other.re)
                .sub(&self.re.mul(&other.im))
                .div(&denom),
        }
    }

    #[inline]
    fn modulus(&self) -> FloatExp {
        self.re.square().add(&self.im.square()).sqrt()
    }

    #[inline]
    fn epsilon(&self) -> FloatExp {
        FloatExp::from_f64(f64::EPSILON)
    }
}
