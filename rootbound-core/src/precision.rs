//! Working-precision selection for the arbitrary tier.
//!
//! Determines how many significand bits an arbitrary-precision refinement
//! pass needs to certify a root to a target inclusion radius.

/// Safety margin for rounding errors in arithmetic operations.
const SAFETY_BITS: usize = 64;

/// Cap on accuracy-driven bits. A degenerate (zero) radius reports
/// log2 = -inf; without the cap the cast and addition below overflow.
const MAX_ACCURACY_BITS: usize = 1 << 24;

/// Calculate the working precision for an arbitrary-tier refinement pass.
///
/// The bound must cover:
/// 1. The target accuracy: a radius of 2^t needs roughly -t significand bits.
/// 2. Error amplification across the degree-n evaluation recurrence.
/// 3. A fixed safety margin for the analyzer's own arithmetic.
///
/// # Arguments
/// * `degree` - nominal polynomial degree of the target function
/// * `target_radius_log2` - log2 of the inclusion radius to certify
///
/// # Returns
/// Required precision bits, rounded up to a power of 2, minimum 64.
pub fn working_precision_bits(degree: u32, target_radius_log2: f64) -> usize {
    let accuracy_bits = (-target_radius_log2)
        .ceil()
        .clamp(0.0, MAX_ACCURACY_BITS as f64) as usize;

    let degree_bits = if degree > 1 {
        (degree as f64).log2().ceil() as usize
    } else {
        0
    };

    (accuracy_bits + degree_bits + SAFETY_BITS)
        .next_power_of_two()
        .max(64)
}
