//! Newton evaluation contract and convergence analyzer.
//!
//! An evaluation produces the target function's value, derivative, and a
//! running worst-case rounding-error accumulator, all in one numeric tier.
//! The analyzer turns that triple into a Newton correction, a certified
//! inclusion radius, and the go/no-go verdict the escalation driver acts on.
//! Both halves are pure functions; all state lives in the driver.

use rootbound_core::{ComplexTier, RealScalar};

use crate::error::EvalError;

/// Output of one evaluation pass at a point x.
#[derive(Clone, Debug)]
pub struct Evaluation<T: ComplexTier> {
    /// Function value p(x).
    pub p: T,
    /// Derivative p'(x).
    pub dp: T,
    /// Worst-case propagated rounding error of the recurrence; grows
    /// monotonically across steps.
    pub ap: T::Real,
    /// |x|, retained for the analyzer's degenerate-radius fallback.
    pub ax: T::Real,
}

/// A target function admitting a Newton-type correction.
///
/// The evaluation recurrence is the injected strategy: each implementation
/// supplies value + derivative + error accumulation, generic over the tier,
/// so the analyzer and driver never care which function is being solved.
pub trait NewtonPoly {
    /// Nominal degree n of the target function.
    fn degree(&self) -> u32;

    /// Evaluate value, derivative, and error accumulator at x, entirely in
    /// x's tier. Mixing tiers mid-evaluation is impossible by construction;
    /// a non-uniform arbitrary-precision x fails fast.
    fn evaluate<T: ComplexTier>(&self, x: &T) -> Result<Evaluation<T>, EvalError>;
}

/// Analyzer verdict for one evaluation.
#[derive(Clone, Debug)]
pub struct Convergence<T: ComplexTier> {
    correction: Option<T>,
    /// Certified upper bound on the distance from x to the root being
    /// approximated, under the analyzer's rounding-error model.
    pub radius: T::Real,
    /// True while |p| exceeds its own propagated error bound: x is not yet
    /// close enough to a root for the correction to be trusted as final.
    pub needs_more_work: bool,
}

impl<T: ComplexTier> Convergence<T> {
    /// The Newton correction p/p', or `DegenerateDerivative` when the
    /// derivative modulus was exactly zero (the radius is still valid via
    /// its fallback, but the correction is unusable).
    pub fn correction(&self) -> Result<&T, EvalError> {
        self.correction
            .as_ref()
            .ok_or(EvalError::DegenerateDerivative)
    }
}

/// Turn an evaluation into a correction, radius, and verdict.
///
/// The error model: with u the tier's unit roundoff, the recurrence's
/// propagated error is bounded by `ap × (4·n·u) × 3`, linear in problem
/// size, with the factor 3 covering the three rounding sources of each
/// step (evaluation, multiplication, addition).
pub fn analyze<T: ComplexTier>(n: u32, eval: &Evaluation<T>) -> Result<Convergence<T>, EvalError> {
    if n == 0 {
        return Err(EvalError::InvalidDegree { n });
    }

    let eps_bound = eval.p.epsilon().scale(4.0 * n as f64);
    let ap_eps = eval.ap.mul(&eps_bound).scale(3.0);
    let mod_p = eval.p.modulus();
    let mod_dp = eval.dp.modulus();

    // Hardware-float overflow leaves nothing to certify at this tier; force
    // escalation instead of comparing infinities.
    if !mod_p.is_finite() || !mod_dp.is_finite() || !ap_eps.is_finite() {
        return Ok(Convergence {
            correction: None,
            radius: eval.ax.mul(&eps_bound),
            needs_more_work: true,
        });
    }

    let needs_more_work = mod_p > ap_eps;

    let (correction, radius) = if mod_dp.is_zero() {
        // Degenerate derivative: no usable correction; fall back to a
        // radius proportional to |x| rather than dividing by zero.
        (None, eval.ax.mul(&eps_bound))
    } else {
        let radius = mod_p.add(&ap_eps).scale(n as f64).div(&mod_dp);
        (Some(eval.p.div(&eval.dp)), radius)
    };

    Ok(Convergence {
        correction,
        radius,
        needs_more_work,
    })
}
