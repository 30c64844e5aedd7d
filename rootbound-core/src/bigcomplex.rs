//! Arbitrary-tier complex number built from BigFloat components.

use crate::bigfloat::BigFloat;
use crate::tier::{ComplexTier, PrecisionMismatch, RealScalar};

/// Complex number with explicit-precision components.
///
/// Both components must carry the same working precision; the kernel checks
/// this through [`ComplexTier::validate`] before evaluating.
#[derive(Clone, Debug)]
pub struct BigComplex {
    pub re: BigFloat,
    pub im: BigFloat,
}

impl BigComplex {
    pub fn new(re: BigFloat, im: BigFloat) -> Self {
        Self { re, im }
    }

    /// Construct from f64 components at an explicit working precision.
    pub fn with_precision(re: f64, im: f64, precision_bits: usize) -> Self {
        Self {
            re: BigFloat::with_precision(re, precision_bits),
            im: BigFloat::with_precision(im, precision_bits),
        }
    }

    /// Construct from decimal strings, allowing components beyond f64 range.
    pub fn from_strings(re: &str, im: &str, precision_bits: usize) -> Result<Self, String> {
        Ok(Self {
            re: BigFloat::from_string(re, precision_bits)?,
            im: BigFloat::from_string(im, precision_bits)?,
        })
    }

    /// The working precision of the real component.
    pub fn precision_bits(&self) -> usize {
        self.re.precision_bits()
    }

    /// Re-round both components to a new working precision.
    pub fn to_precision(&self, precision_bits: usize) -> Self {
        Self {
            re: self.re.to_precision(precision_bits),
            im: self.im.to_precision(precision_bits),
        }
    }
}

impl ComplexTier for BigComplex {
    type Real = BigFloat;

    fn zero(&self) -> Self {
        let precision = self.precision_bits();
        Self {
            re: BigFloat::zero(precision),
            im: BigFloat::zero(precision),
        }
    }

    fn one(&self) -> Self {
        let precision = self.precision_bits();
        Self {
            re: BigFloat::one(precision),
            im: BigFloat::zero(precision),
        }
    }

    fn from_f64_pair_like(&self, re: f64, im: f64) -> Self {
        Self::with_precision(re, im, self.precision_bits())
    }

    fn to_f64_pair(&self) -> (f64, f64) {
        (self.re.to_f64(), self.im.to_f64())
    }

    fn add(&self, other: &Self) -> Self {
        Self {
            re: self.re.add(&other.re),
            im: self.im.add(&other.im),
        }
    }

    fn sub(&self, other: &Self) -> Self {
        Self {
            re: self.re.sub(&other.re),
            im: self.im.sub(&other.im),
        }
    }

    fn mul(&self, other: &Self) -> Self {
        Self {
            re: self.re.mul(&other.re).sub(&self.im.mul(&other.im)),
            im: self.re.mul(&other.im).add(&self.im.mul(&other.re)),
        }
    }

    fn square(&self) -> Self {
        Self {
            re: self.re.mul(&self.re).sub(&self.im.mul(&self.im)),
            im: self.re.mul(&self.im).scale(2.0),
        }
    }

    fn scale(&self, factor: f64) -> Self {
        Self {
            re: RealScalar::scale(&self.re, factor),
            im: RealScalar::scale(&self.im, factor),
        }
    }

    fn div(&self, other: &Self) -> Self {
        let denom = other.re.mul(&other.re).add(&other.im.mul(&other.im));
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

    fn modulus(&self) -> BigFloat {
        self.re
            .mul(&self.re)
            .add(&self.im.mul(&self.im))
            .sqrt()
    }

    fn epsilon(&self) -> BigFloat {
        BigFloat::unit_roundoff(self.precision_bits())
    }

    fn validate(&self) -> Result<(), PrecisionMismatch> {
        let (left, right) = (self.re.precision_bits(), self.im.precision_bits());
        if left != right {
            return Err(PrecisionMismatch { left, right });
        }
        Ok(())
    }
}
