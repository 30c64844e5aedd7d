//! Dense polynomial evaluation via Horner's scheme.
//!
//! Complementary strategy to the recurrence-defined Mandelbrot family:
//! coefficients given explicitly, value and derivative accumulated in a
//! single descending pass, with the running error bound ap = ap·|x| + |c_k|
//! from the standard Horner rounding analysis.

use rootbound_core::{ComplexTier, RealScalar};

use crate::error::EvalError;
use crate::newton::{Evaluation, NewtonPoly};

/// Polynomial with explicit complex coefficients, ascending powers
/// (`coeffs[k]` multiplies x^k). Coefficients are stored as f64 pairs and
/// lifted into the evaluation tier on each pass.
#[derive(Clone, Debug, PartialEq)]
pub struct DensePoly {
    coeffs: Vec<(f64, f64)>,
}

impl DensePoly {
    /// Requires at least degree 1 and a nonzero leading coefficient, so
    /// that `degree()` is honest and Newton has a derivative to work with.
    pub fn new(coeffs: Vec<(f64, f64)>) -> Result<Self, EvalError> {
        if coeffs.len() < 2 {
            return Err(EvalError::InvalidDegree {
                n: coeffs.len().saturating_sub(1) as u32,
            });
        }
        let (lead_re, lead_im) = coeffs[coeffs.len() - 1];
        if lead_re == 0.0 && lead_im == 0.0 {
            return Err(EvalError::InvalidDegree {
                n: (coeffs.len() - 1) as u32,
            });
        }
        Ok(Self { coeffs })
    }

    pub fn coeffs(&self) -> &[(f64, f64)] {
        &self.coeffs
    }
}

impl NewtonPoly for DensePoly {
    fn degree(&self) -> u32 {
        (self.coeffs.len() - 1) as u32
    }

    fn evaluate<T: ComplexTier>(&self, x: &T) -> Result<Evaluation<T>, EvalError> {
        x.validate()?;

        let ax = x.modulus();
        let (lead_re, lead_im) = self.coeffs[self.coeffs.len() - 1];

        let mut p = x.from_f64_pair_like(lead_re, lead_im);
        let mut dp = x.zero();
        let mut ap = coeff_modulus(&ax, lead_re, lead_im);

        for &(re, im) in self.coeffs.iter().rev().skip(1) {
            dp = dp.mul(x).add(&p);
            p = p.mul(x).add(&x.from_f64_pair_like(re, im));
            ap = ap.mul(&ax).add(&coeff_modulus(&ax, re, im));
        }

        Ok(Evaluation { p, dp, ap, ax })
    }
}

/// |c| lifted into the tier of `like`, so the accumulator stays uniform.
fn coeff_modulus<R: RealScalar>(like: &R, re: f64, im: f64) -> R {
    like.one().scale(f64::hypot(re, im))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rootbound_core::Complex;

    #[test]
    fn constant_and_empty_polynomials_are_rejected() {
        assert!(DensePoly::new(vec![]).is_err());
        assert!(DensePoly::new(vec![(5.0, 0.0)]).is_err());
    }

    #[test]
    fn zero_leading_coefficient_is_rejected() {
        let err = DensePoly::new(vec![(1.0, 0.0), (2.0, 0.0), (0.0, 0.0)]).unwrap_err();
        assert_eq!(err, EvalError::InvalidDegree { n: 2 });
    }

    #[test]
    fn degree_counts_from_leading_power() {
        let poly = DensePoly::new(vec![(1.0, 0.0), (0.0, 0.0), (1.0, 0.0)]).unwrap();
        assert_eq!(poly.degree(), 2);
    }

    #[test]
    fn evaluates_cubic_at_real_point() {
        // p(x) = x³ + 2x² + x + 1 at x = 2: 8 + 8 + 2 + 1 = 19
        // p'(x) = 3x² + 4x + 1 at x = 2: 12 + 8 + 1 = 21
        let poly = DensePoly::new(vec![
            (1.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (1.0, 0.0),
        ])
        .unwrap();
        let eval = poly.evaluate(&Complex::new(2.0, 0.0)).unwrap();
        assert_eq!(eval.p.to_f64_pair(), (19.0, 0.0));
        assert_eq!(eval.dp.to_f64_pair(), (21.0, 0.0));
        // ap = ((1·2 + 2)·2 + 1)·2 + 1 = 19 with all coefficients positive
        assert_eq!(eval.ap, 19.0);
    }

    #[test]
    fn evaluates_at_complex_point() {
        // p(x) = x² + 1 at x = i is exactly zero
        let poly = DensePoly::new(vec![(1.0, 0.0), (0.0, 0.0), (1.0, 0.0)]).unwrap();
        let eval = poly.evaluate(&Complex::new(0.0, 1.0)).unwrap();
        let (re, im) = eval.p.to_f64_pair();
        assert!(re.abs() < 1e-15 && im.abs() < 1e-15, "p(i) = {} + {}i", re, im);
        // p'(i) = 2i
        let (dre, dim) = eval.dp.to_f64_pair();
        assert!(dre.abs() < 1e-15);
        assert!((dim - 2.0).abs() < 1e-15);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let poly = DensePoly::new(vec![
            (0.5, -1.0),
            (2.0, 0.25),
            (-1.0, 3.0),
            (1.0, 1.0),
        ])
        .unwrap();
        let x = Complex::new(0.7, -0.3);
        let h = 1e-7;
        let eval = poly.evaluate(&x).unwrap();
        let plus = poly.evaluate(&Complex::new(x.re + h, x.im)).unwrap();
        let minus = poly.evaluate(&Complex::new(x.re - h, x.im)).unwrap();
        let fd_re = (plus.p.re - minus.p.re) / (2.0 * h);
        let fd_im = (plus.p.im - minus.p.im) / (2.0 * h);
        assert!((eval.dp.re - fd_re).abs() < 1e-5);
        assert!((eval.dp.im - fd_im).abs() < 1e-5);
    }

    #[test]
    fn error_accumulator_sums_coefficient_moduli_at_origin() {
        // At x = 0 every ap·|x| term vanishes: only the constant term's
        // modulus survives.
        let poly = DensePoly::new(vec![(3.0, 4.0), (7.0, 0.0), (1.0, 0.0)]).unwrap();
        let eval = poly.evaluate(&Complex::ZERO).unwrap();
        assert_eq!(eval.ap, 5.0);
        assert_eq!(eval.p.to_f64_pair(), (3.0, 4.0));
    }
}
