//! Kernel-boundary error types.

use rootbound_core::PrecisionMismatch;
use thiserror::Error;

/// Contract violations detected at the evaluate/analyze boundary.
///
/// None of these are retried here; escalating to another tier is the
/// driver's decision. The kernel either returns an exact result or one of
/// these tags, never a silently wrong number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("derivative modulus is zero at the evaluation point; Newton correction undefined")]
    DegenerateDerivative,

    #[error(transparent)]
    PrecisionMismatch(#[from] PrecisionMismatch),

    #[error("invalid degree {n}: must be positive")]
    InvalidDegree { n: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_mismatch_converts_from_core_type() {
        let core_err = PrecisionMismatch {
            left: 128,
            right: 192,
        };
        let err: EvalError = core_err.into();
        assert_eq!(err, EvalError::PrecisionMismatch(core_err));
    }

    #[test]
    fn invalid_degree_names_the_offender() {
        let msg = EvalError::InvalidDegree { n: 0 }.to_string();
        assert!(msg.contains('0'), "got: {}", msg);
    }
}
