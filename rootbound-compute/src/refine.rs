//! Escalation driver: runs Newton refinement up the precision ladder.
//!
//! Standard (f64) first, extended (mantissa + wide exponent) when the
//! hardware range runs out, arbitrary precision last with the working
//! precision doubling until the analyzer certifies convergence or the
//! configured ceiling is hit. Each tier pass is the same generic step loop;
//! only the seed conversion between tiers is tier-specific.

use std::fmt;

use serde::{Deserialize, Serialize};

use rootbound_core::{working_precision_bits, BigComplex, Complex, ComplexTier, ExtComplex};

use crate::error::EvalError;
use crate::newton::{analyze, NewtonPoly};

/// Where a tier pass left the root candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootStatus {
    /// Step budget exhausted without a verdict.
    Active,
    /// Residual dropped below its certified error bound.
    Converged,
    /// The tier cannot continue (overflow or degenerate derivative).
    Escalating,
}

/// Driver limits.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RefineConfig {
    /// Newton steps allowed per tier pass before escalating.
    pub max_steps_per_tier: u32,
    /// Ceiling for the arbitrary tier's working precision.
    pub max_precision_bits: usize,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            max_steps_per_tier: 40,
            max_precision_bits: 8192,
        }
    }
}

/// Final root report, serializable for downstream consumers.
///
/// `re`/`im` are lossy f64 views; `re_str`/`im_str` carry the full
/// precision of the tier that produced the result.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RootEstimate {
    pub re: f64,
    pub im: f64,
    pub re_str: String,
    pub im_str: String,
    /// Certified inclusion radius (may underflow to 0.0 in f64).
    pub radius: f64,
    /// log2 of the radius, meaningful even when `radius` underflows.
    pub radius_log2: f64,
    pub converged: bool,
    /// Working precision of the arbitrary tier, if it was reached.
    pub precision_bits: Option<usize>,
    /// Newton steps spent across all tiers.
    pub steps: u32,
}

impl fmt::Display for RootEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.im_str.strip_prefix('-') {
            Some(magnitude) => write!(f, "{} - {}i", self.re_str, magnitude),
            None => write!(f, "{} + {}i", self.re_str, self.im_str),
        }
    }
}

/// Outcome of one tier pass, still in that tier's representation.
struct TierRun<T: ComplexTier> {
    x: T,
    radius: T::Real,
    status: RootStatus,
    steps: u32,
}

/// The generic Newton step loop: evaluate, analyze, apply the correction.
///
/// Returns `Escalating` the moment the analyzer withholds a correction,
/// whether from overflow or a degenerate derivative; retrying at the same
/// tier cannot help in either case.
fn refine_at<P: NewtonPoly, T: ComplexTier>(
    poly: &P,
    mut x: T,
    max_steps: u32,
) -> Result<TierRun<T>, EvalError> {
    let n = poly.degree();
    let mut radius = x.modulus();
    let mut steps = 0;

    while steps < max_steps {
        let eval = poly.evaluate(&x)?;
        let conv = analyze(n, &eval)?;
        steps += 1;
        radius = conv.radius.clone();

        if !conv.needs_more_work {
            return Ok(TierRun {
                x,
                radius,
                status: RootStatus::Converged,
                steps,
            });
        }
        match conv.correction() {
            Ok(correction) => x = x.sub(correction),
            Err(_) => {
                return Ok(TierRun {
                    x,
                    radius,
                    status: RootStatus::Escalating,
                    steps,
                })
            }
        }
    }

    Ok(TierRun {
        x,
        radius,
        status: RootStatus::Active,
        steps,
    })
}

/// Refine a root candidate through the full precision ladder.
///
/// Starts at the standard tier and hands the best-so-far estimate upward on
/// every escalation, so no tier repeats work a cheaper tier already did.
/// A non-converged result is still the best certified enclosure available
/// within the configured limits.
pub fn refine<P: NewtonPoly>(
    poly: &P,
    x0: (f64, f64),
    config: &RefineConfig,
) -> Result<RootEstimate, EvalError> {
    let n = poly.degree();
    let mut total_steps = 0;

    let run = refine_at(poly, Complex::new(x0.0, x0.1), config.max_steps_per_tier)?;
    total_steps += run.steps;
    if run.status == RootStatus::Converged {
        let (re, im) = run.x.to_f64_pair();
        return Ok(estimate(re, im, run.radius.log2(), true, None, total_steps));
    }

    log::debug!(
        "standard tier stopped ({:?}) after {} steps, escalating to extended",
        run.status,
        run.steps
    );
    let seed = ExtComplex::from_f64_pair(run.x.re, run.x.im);
    let run = refine_at(poly, seed, config.max_steps_per_tier)?;
    total_steps += run.steps;
    let extended_radius_log2 = run.radius.log2_approx();
    if run.status == RootStatus::Converged {
        let (re, im) = run.x.to_f64_pair();
        return Ok(estimate(
            re,
            im,
            extended_radius_log2,
            true,
            None,
            total_steps,
        ));
    }

    // Aim at least for double-precision accuracy, or hold the radius the
    // extended tier already reached when that is tighter.
    let target_radius_log2 = extended_radius_log2.min(-53.0);
    let mut bits = working_precision_bits(n, target_radius_log2).min(config.max_precision_bits);
    log::debug!(
        "extended tier stopped ({:?}) after {} steps, escalating to {} bits",
        run.status,
        run.steps,
        bits
    );

    let (seed_re, seed_im) = run.x.to_f64_pair();
    let mut x = BigComplex::with_precision(seed_re, seed_im, bits);
    loop {
        let run = refine_at(poly, x, config.max_steps_per_tier)?;
        total_steps += run.steps;

        if run.status == RootStatus::Converged || bits >= config.max_precision_bits {
            let (re, im) = run.x.to_f64_pair();
            let mut out = estimate(
                re,
                im,
                run.radius.log2_approx(),
                run.status == RootStatus::Converged,
                Some(bits),
                total_steps,
            );
            out.re_str = run.x.re.to_string();
            out.im_str = run.x.im.to_string();
            return Ok(out);
        }

        bits = (bits * 2).min(config.max_precision_bits);
        log::debug!(
            "arbitrary tier stopped ({:?}) after {} steps, raising precision to {} bits",
            run.status,
            run.steps,
            bits
        );
        x = run.x.to_precision(bits);
    }
}

fn estimate(
    re: f64,
    im: f64,
    radius_log2: f64,
    converged: bool,
    precision_bits: Option<usize>,
    steps: u32,
) -> RootEstimate {
    RootEstimate {
        re,
        im,
        re_str: format!("{re}"),
        im_str: format!("{im}"),
        radius: radius_log2.exp2(),
        radius_log2,
        converged,
        precision_bits,
        steps,
    }
}
