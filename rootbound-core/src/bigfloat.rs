//! Arbitrary-precision real scalar with explicit working precision.
//!
//! Wraps `dashu_float::FBig` behind an f64 fast path: values at or below 64
//! bits of requested precision live in a plain f64, everything above in FBig.
//! The optimization is transparent to callers; precision always travels with
//! the value, never through ambient global state.

use dashu::integer::IBig;
use dashu_base::{Abs, Approximation, EstimatedLog2};
use dashu_float::ops::SquareRoot;
use dashu_float::{DBig, FBig};
use serde::{Deserialize, Serialize};

use crate::tier::RealScalar;

/// Arbitrary precision floating point with explicit precision enforcement.
#[derive(Clone, Debug)]
pub struct BigFloat {
    value: BigFloatValue,
    precision_bits: usize,
}

#[derive(Clone, Debug)]
enum BigFloatValue {
    F64(f64),
    Arbitrary(FBig),
}

impl BigFloat {
    /// Create from f64 with explicit precision. No default precision exists.
    pub fn with_precision(val: f64, precision_bits: usize) -> Self {
        let value = if precision_bits <= 64 {
            BigFloatValue::F64(val)
        } else {
            let fbig = if val == 0.0 {
                FBig::ZERO.with_precision(precision_bits).unwrap()
            } else {
                FBig::try_from(val)
                    .unwrap()
                    .with_precision(precision_bits)
                    .unwrap()
            };
            BigFloatValue::Arbitrary(fbig)
        };

        Self {
            value,
            precision_bits,
        }
    }

    /// Create zero with explicit precision.
    pub fn zero(precision_bits: usize) -> Self {
        Self::with_precision(0.0, precision_bits)
    }

    /// Create one with explicit precision.
    pub fn one(precision_bits: usize) -> Self {
        Self::with_precision(1.0, precision_bits)
    }

    /// The unit roundoff 2^-precision_bits at that same precision.
    pub fn unit_roundoff(precision_bits: usize) -> Self {
        if precision_bits <= 64 {
            Self {
                value: BigFloatValue::F64(2.0_f64.powi(-(precision_bits as i32))),
                precision_bits,
            }
        } else {
            let eps = FBig::from_parts(IBig::ONE, -(precision_bits as isize))
                .with_precision(precision_bits)
                .unwrap();
            Self {
                value: BigFloatValue::Arbitrary(eps),
                precision_bits,
            }
        }
    }

    /// Get precision in bits.
    pub fn precision_bits(&self) -> usize {
        self.precision_bits
    }

    /// Convert to f64; loses precision, may over/underflow the f64 range.
    pub fn to_f64(&self) -> f64 {
        match &self.value {
            BigFloatValue::F64(v) => *v,
            BigFloatValue::Arbitrary(v) => v.to_f64().value(),
        }
    }

    /// Re-round a value to a new working precision.
    ///
    /// Always produces a fresh value; no stale lower-precision state is
    /// carried into subsequent arithmetic at the higher precision.
    pub fn to_precision(&self, precision_bits: usize) -> Self {
        if precision_bits <= 64 {
            Self {
                value: BigFloatValue::F64(self.to_f64()),
                precision_bits,
            }
        } else {
            Self {
                value: BigFloatValue::Arbitrary(
                    self.to_fbig().with_precision(precision_bits).unwrap(),
                ),
                precision_bits,
            }
        }
    }

    /// Create from string with explicit precision.
    ///
    /// Allows values beyond f64 range (e.g. "1e1000"). Uses atomic base
    /// conversion with the target precision to avoid double rounding.
    pub fn from_string(val: &str, precision_bits: usize) -> Result<Self, String> {
        if precision_bits <= 64 {
            val.parse::<f64>()
                .map(|f| Self::with_precision(f, precision_bits))
                .map_err(|e| format!("Failed to parse f64: {}", e))
        } else {
            val.parse::<DBig>()
                .map_err(|e| format!("Failed to parse DBig: {}", e))
                .map(|dbig| {
                    let fbig_halfaway = match dbig.with_base_and_precision::<2>(precision_bits) {
                        Approximation::Exact(v) => v,
                        Approximation::Inexact(v, _) => v,
                    };
                    let fbig_with_prec =
                        fbig_halfaway.with_rounding::<dashu_float::round::mode::Zero>();
                    Self {
                        value: BigFloatValue::Arbitrary(fbig_with_prec),
                        precision_bits,
                    }
                })
        }
    }

    /// Add, preserving max precision of the operands.
    pub fn add(&self, other: &Self) -> Self {
        let result_precision = self.precision_bits.max(other.precision_bits);

        let result_value = match (&self.value, &other.value) {
            (BigFloatValue::F64(a), BigFloatValue::F64(b)) if result_precision <= 64 => {
                BigFloatValue::F64(a + b)
            }
            _ => BigFloatValue::Arbitrary(&self.to_fbig() + &other.to_fbig()),
        };

        Self {
            value: result_value,
            precision_bits: result_precision,
        }
    }

    /// Subtract, preserving max precision of the operands.
    pub fn sub(&self, other: &Self) -> Self {
        let result_precision = self.precision_bits.max(other.precision_bits);

        let result_value = match (&self.value, &other.value) {
            (BigFloatValue::F64(a), BigFloatValue::F64(b)) if result_precision <= 64 => {
                BigFloatValue::F64(a - b)
            }
            _ => BigFloatValue::Arbitrary(&self.to_fbig() - &other.to_fbig()),
        };

        Self {
            value: result_value,
            precision_bits: result_precision,
        }
    }

    /// Multiply, preserving max precision of the operands.
    pub fn mul(&self, other: &Self) -> Self {
        let result_precision = self.precision_bits.max(other.precision_bits);

        let result_value = match (&self.value, &other.value) {
            (BigFloatValue::F64(a), BigFloatValue::F64(b)) if result_precision <= 64 => {
                BigFloatValue::F64(a * b)
            }
            _ => BigFloatValue::Arbitrary(&self.to_fbig() * &other.to_fbig()),
        };

        Self {
            value: result_value,
            precision_bits: result_precision,
        }
    }

    /// Divide, preserving max precision of the operands.
    pub fn div(&self, other: &Self) -> Self {
        let result_precision = self.precision_bits.max(other.precision_bits);

        let result_value = match (&self.value, &other.value) {
            (BigFloatValue::F64(a), BigFloatValue::F64(b)) if result_precision <= 64 => {
                BigFloatValue::F64(a / b)
            }
            _ => BigFloatValue::Arbitrary(&self.to_fbig() / &other.to_fbig()),
        };

        Self {
            value: result_value,
            precision_bits: result_precision,
        }
    }

    /// Square root, preserving precision.
    pub fn sqrt(&self) -> Self {
        let result_value = match &self.value {
            BigFloatValue::F64(v) if self.precision_bits <= 64 => BigFloatValue::F64(v.sqrt()),
            _ => BigFloatValue::Arbitrary(self.to_fbig().sqrt()),
        };

        Self {
            value: result_value,
            precision_bits: self.precision_bits,
        }
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        match &self.value {
            BigFloatValue::F64(v) => BigFloat {
                value: BigFloatValue::F64(v.abs()),
                precision_bits: self.precision_bits,
            },
            BigFloatValue::Arbitrary(v) => BigFloat {
                value: BigFloatValue::Arbitrary(v.clone().abs()),
                precision_bits: self.precision_bits,
            },
        }
    }

    /// Strictly-greater comparison.
    pub fn gt(&self, other: &Self) -> bool {
        matches!(
            self.partial_cmp(other),
            Some(std::cmp::Ordering::Greater)
        )
    }

    /// Exact zero test.
    pub fn is_zero(&self) -> bool {
        match &self.value {
            BigFloatValue::F64(v) => *v == 0.0,
            BigFloatValue::Arbitrary(v) => v.repr().is_zero(),
        }
    }

    /// Approximate log2 of the absolute value; -inf for zero.
    ///
    /// Stays meaningful for magnitudes far outside f64 range, where
    /// `to_f64().log2()` would report ±inf or NaN.
    pub fn log2_approx(&self) -> f64 {
        if self.is_zero() {
            return f64::NEG_INFINITY;
        }
        match &self.value {
            BigFloatValue::F64(v) => v.abs().log2(),
            BigFloatValue::Arbitrary(v) => {
                let (lo, hi) = v.log2_bounds();
                (lo as f64 + hi as f64) / 2.0
            }
        }
    }

    /// Convert to FBig for arbitrary precision operations.
    fn to_fbig(&self) -> FBig {
        match &self.value {
            BigFloatValue::F64(v) => {
                if *v == 0.0 {
                    FBig::ZERO.with_precision(self.precision_bits).unwrap()
                } else {
                    FBig::try_from(*v)
                        .unwrap()
                        .with_precision(self.precision_bits)
                        .unwrap()
                }
            }
            BigFloatValue::Arbitrary(v) => v.clone(),
        }
    }
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (BigFloatValue::F64(a), BigFloatValue::F64(b)) => a == b,
            _ => self.to_fbig() == other.to_fbig(),
        }
    }
}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (&self.value, &other.value) {
            (BigFloatValue::F64(a), BigFloatValue::F64(b)) => a.partial_cmp(b),
            _ => self.to_fbig().partial_cmp(&other.to_fbig()),
        }
    }
}

impl std::fmt::Display for BigFloat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            BigFloatValue::F64(v) => write!(f, "{}", v),
            BigFloatValue::Arbitrary(v) => write!(f, "{}", v),
        }
    }
}

impl RealScalar for BigFloat {
    fn zero(&self) -> Self {
        BigFloat::zero(self.precision_bits)
    }

    fn one(&self) -> Self {
        BigFloat::one(self.precision_bits)
    }

    fn add(&self, other: &Self) -> Self {
        BigFloat::add(self, other)
    }

    fn mul(&self, other: &Self) -> Self {
        BigFloat::mul(self, other)
    }

    fn div(&self, other: &Self) -> Self {
        BigFloat::div(self, other)
    }

    fn scale(&self, factor: f64) -> Self {
        self.mul(&BigFloat::with_precision(factor, self.precision_bits))
    }

    fn to_f64(&self) -> f64 {
        BigFloat::to_f64(self)
    }

    fn is_zero(&self) -> bool {
        BigFloat::is_zero(self)
    }

    fn is_finite(&self) -> bool {
        match &self.value {
            BigFloatValue::F64(v) => v.is_finite(),
            // FBig arithmetic on finite operands stays finite
            BigFloatValue::Arbitrary(_) => true,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct BigFloatSerde {
    value: String,
    precision_bits: usize,
}

impl Serialize for BigFloat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let value_str = match &self.value {
            BigFloatValue::F64(v) => v.to_string(),
            BigFloatValue::Arbitrary(v) => v.to_string(),
        };

        let serde = BigFloatSerde {
            value: value_str,
            precision_bits: self.precision_bits,
        };

        serde.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BigFloat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let serde = BigFloatSerde::deserialize(deserializer)?;

        let value = if serde.precision_bits <= 64 {
            let f = serde
                .value
                .parse::<f64>()
                .map_err(|e| serde::de::Error::custom(format!("Failed to parse f64: {}", e)))?;
            BigFloatValue::F64(f)
        } else {
            let fbig = serde
                .value
                .parse::<FBig>()
                .map_err(|e| serde::de::Error::custom(format!("Failed to parse FBig: {}", e)))?;
            BigFloatValue::Arbitrary(fbig)
        };

        Ok(BigFloat {
            value,
            precision_bits: serde.precision_bits,
        })
    }
}
