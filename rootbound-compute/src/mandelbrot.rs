//! Mandelbrot polynomial family, the built-in benchmark target.
//!
//! Defined by the relation p_{i+1}(x) = x·p_i(x)² + 1 with p_0 = 1, giving
//! degrees 1, 3, 7, 15, 31, ... (2^m − 1). The derivative follows
//! p'_{i+1}(x) = 2·x·p_i(x)·p'_i(x) + p_i(x)², and the error accumulator
//! follows ap_{i+1} = ap_i·|x| + |p_{i+1}| with a final scale by |x|,
//! obtained from a rounding error analysis of the relation.

use rootbound_core::{ComplexTier, RealScalar};

use crate::error::EvalError;
use crate::newton::{Evaluation, NewtonPoly};

/// The degree-n member of the Mandelbrot polynomial family (n = 2^m − 1 for
/// exact members; other n evaluate the smallest member covering them).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MandelbrotPoly {
    n: u32,
}

impl MandelbrotPoly {
    pub fn new(n: u32) -> Result<Self, EvalError> {
        if n == 0 {
            return Err(EvalError::InvalidDegree { n });
        }
        Ok(Self { n })
    }

    /// Number of recurrence steps m for nominal degree n: the smallest
    /// integer with 2^m − 1 ≥ n, identical across tiers.
    pub fn recurrence_depth(n: u32) -> Result<u32, EvalError> {
        if n == 0 {
            return Err(EvalError::InvalidDegree { n });
        }
        // Bit length of n: covers the case n + 1 an exact power of two.
        Ok(32 - n.leading_zeros())
    }
}

impl NewtonPoly for MandelbrotPoly {
    fn degree(&self) -> u32 {
        self.n
    }

    fn evaluate<T: ComplexTier>(&self, x: &T) -> Result<Evaluation<T>, EvalError> {
        x.validate()?;
        let m = Self::recurrence_depth(self.n)?;

        let one = x.one();
        let ax = x.modulus();

        let mut p = one.clone();
        let mut dp = x.zero();
        let mut ap = ax.one();

        for _ in 0..m {
            let tmp = p.square();
            let pt = x.mul(&tmp).add(&one);
            dp = x.mul(&p).mul(&dp).scale(2.0).add(&tmp);
            p = pt;
            ap = ap.mul(&ax).add(&p.modulus());
        }
        ap = ap.mul(&ax);

        Ok(Evaluation { p, dp, ap, ax })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rootbound_core::Complex;

    #[test]
    fn recurrence_depth_is_minimal_cover() {
        // 2^m − 1 ≥ n and 2^(m−1) − 1 < n for all positive n
        for n in 1..=1000u32 {
            let m = MandelbrotPoly::recurrence_depth(n).unwrap();
            assert!((1u64 << m) - 1 >= n as u64, "n={}, m={}", n, m);
            assert!((1u64 << (m - 1)) - 1 < n as u64, "n={}, m={}", n, m);
        }
    }

    #[test]
    fn recurrence_depth_exact_powers_of_two_minus_one() {
        assert_eq!(MandelbrotPoly::recurrence_depth(1).unwrap(), 1);
        assert_eq!(MandelbrotPoly::recurrence_depth(3).unwrap(), 2);
        assert_eq!(MandelbrotPoly::recurrence_depth(7).unwrap(), 3);
        assert_eq!(MandelbrotPoly::recurrence_depth(31).unwrap(), 5);
    }

    #[test]
    fn zero_degree_rejected_everywhere() {
        assert!(MandelbrotPoly::new(0).is_err());
        assert_eq!(
            MandelbrotPoly::recurrence_depth(0).unwrap_err(),
            EvalError::InvalidDegree { n: 0 }
        );
    }

    #[test]
    fn evaluate_at_origin_collapses_cleanly() {
        // At x = 0 every step gives p = 1 while ap·|x| vanishes; the
        // derivative recurrence leaves p'(0) = p_{m-1}(0)² = 1.
        let poly = MandelbrotPoly::new(3).unwrap();
        let eval = poly.evaluate(&Complex::ZERO).unwrap();
        assert_eq!(eval.p.to_f64_pair(), (1.0, 0.0));
        assert_eq!(eval.dp.to_f64_pair(), (1.0, 0.0));
        assert_eq!(eval.ap, 0.0);
        assert_eq!(eval.ax, 0.0);
    }

    #[test]
    fn evaluate_matches_hand_computation_at_real_point() {
        // x = 3, n = 7 (m = 3): p runs 1 → 4 → 49 → 7204.
        let poly = MandelbrotPoly::new(7).unwrap();
        let eval = poly.evaluate(&Complex::new(3.0, 0.0)).unwrap();
        assert_eq!(eval.p.to_f64_pair().0, 7204.0);
        // ap = ((1·3 + 4)·3 + 49)·3 + 7204)·3 = 22242
        assert_eq!(eval.ap, 22242.0);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let poly = MandelbrotPoly::new(7).unwrap();
        let x = Complex::new(-0.3, 0.4);
        let h = 1e-7;
        let eval = poly.evaluate(&x).unwrap();
        let plus = poly.evaluate(&Complex::new(x.re + h, x.im)).unwrap();
        let minus = poly.evaluate(&Complex::new(x.re - h, x.im)).unwrap();
        let fd_re = (plus.p.re - minus.p.re) / (2.0 * h);
        let fd_im = (plus.p.im - minus.p.im) / (2.0 * h);
        assert!(
            (eval.dp.re - fd_re).abs() < 1e-5,
            "dp.re = {}, fd = {}",
            eval.dp.re,
            fd_re
        );
        assert!((eval.dp.im - fd_im).abs() < 1e-5);
    }

    #[test]
    fn error_accumulator_is_monotone_in_depth() {
        // For |x| >= 1 the step ap·|x| + |p| never shrinks ap, so deeper
        // family members report ever-larger accumulated error.
        let x = Complex::new(1.5, 0.5);
        let mut prev = 0.0;
        for n in [1u32, 3, 7, 15, 31] {
            let eval = MandelbrotPoly::new(n).unwrap().evaluate(&x).unwrap();
            assert!(eval.ap >= prev, "ap regressed at n={}: {} < {}", n, eval.ap, prev);
            prev = eval.ap;
        }
    }

    #[test]
    fn error_accumulator_grows_with_modulus_of_x() {
        let poly = MandelbrotPoly::new(7).unwrap();
        let near = poly.evaluate(&Complex::new(1.0, 0.0)).unwrap();
        let far = poly.evaluate(&Complex::new(2.0, 0.0)).unwrap();
        assert!(near.ap >= 0.0);
        assert!(far.ap > near.ap);
    }

    #[test]
    fn evaluate_is_a_pure_function() {
        let poly = MandelbrotPoly::new(15).unwrap();
        let x = Complex::new(0.37, -0.22);
        let a = poly.evaluate(&x).unwrap();
        let b = poly.evaluate(&x).unwrap();
        assert_eq!(a.p.to_f64_pair(), b.p.to_f64_pair());
        assert_eq!(a.dp.to_f64_pair(), b.dp.to_f64_pair());
        assert_eq!(a.ap, b.ap);
        assert_eq!(a.ax, b.ax);
    }
}
