//! Precision semantics of the arbitrary tier.
//!
//! These tests pin down the behaviors the refinement driver depends on:
//! precision travels with the value, re-rounding produces fresh state, and
//! resolution genuinely improves as the bit count grows.

use rootbound_core::{BigComplex, BigFloat, ComplexTier, RealScalar};

#[test]
fn one_third_sharpens_with_precision() {
    // 1/3 at 128 bits and at 512 bits differ by roughly 2^-128; at equal
    // precision the representations agree exactly.
    let third_128 = BigFloat::one(128).div(&BigFloat::with_precision(3.0, 128));
    let third_512 = BigFloat::one(512).div(&BigFloat::with_precision(3.0, 512));

    let diff = third_128.sub(&third_512).abs();
    assert!(!diff.is_zero(), "different precisions must differ");
    assert!(diff.log2_approx() < -120.0, "log2 diff = {}", diff.log2_approx());

    let again = BigFloat::one(512).div(&BigFloat::with_precision(3.0, 512));
    assert_eq!(third_512, again);
}

#[test]
fn raising_precision_leaves_no_stale_state() {
    // A value computed at 64 bits then raised to 256 must behave exactly as
    // a fresh 256-bit value with the same f64 content.
    let coarse = BigFloat::with_precision(1.5, 64);
    let raised = coarse.to_precision(256);
    let fresh = BigFloat::with_precision(1.5, 256);

    assert_eq!(raised, fresh);
    assert_eq!(raised.precision_bits(), 256);

    let product = raised.mul(&BigFloat::with_precision(3.0, 256));
    assert_eq!(product.precision_bits(), 256);
    assert_eq!(product.to_f64(), 4.5);
}

#[test]
fn sqrt_of_two_squares_back_within_unit_roundoff() {
    let two = BigFloat::with_precision(2.0, 256);
    let root = two.sqrt();
    let err = root.mul(&root).sub(&two).abs();
    assert!(err.log2_approx() < -250.0, "log2 err = {}", err.log2_approx());
}

#[test]
fn unit_roundoff_is_representable_at_its_own_precision() {
    for bits in [64usize, 128, 1024, 4096] {
        let eps = BigFloat::unit_roundoff(bits);
        assert_eq!(eps.precision_bits(), bits);
        assert!(!eps.is_zero());
        assert!((eps.log2_approx() + bits as f64).abs() < 1.0);
    }
}

#[test]
fn string_construction_reaches_beyond_f64() {
    let huge = BigFloat::from_string("1e1000", 4096).unwrap();
    assert_eq!(huge.to_f64(), f64::INFINITY);
    assert!((huge.log2_approx() - 1000.0 * 10.0_f64.log2()).abs() < 1.0);

    let garbage = BigFloat::from_string("not a number", 4096);
    assert!(garbage.is_err());
}

#[test]
fn complex_precision_propagates_through_arithmetic() {
    let a = BigComplex::with_precision(0.6, 0.8, 192);
    let b = a.square().mul(&a).add(&a.one());
    assert_eq!(b.precision_bits(), 192);
    assert!(b.validate().is_ok());
}

#[test]
fn complex_modulus_at_high_precision_is_tight() {
    // |3 + 4i| = 5 exactly; the computed modulus must sit within one unit
    // roundoff of 5 at 256 bits.
    let z = BigComplex::with_precision(3.0, 4.0, 256);
    let err = z.modulus().sub(&BigFloat::with_precision(5.0, 256)).abs();
    assert!(
        err.is_zero() || err.log2_approx() < -250.0,
        "log2 err = {}",
        err.log2_approx()
    );
}

#[test]
fn serde_preserves_value_and_precision_across_representations() {
    for (text, bits) in [("1.5", 64usize), ("-2.25", 128), ("1e-500", 2048)] {
        let v = BigFloat::from_string(text, bits).unwrap();
        let json = serde_json::to_string(&v).unwrap();
        let back: BigFloat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v, "round trip of {} at {} bits", text, bits);
        assert_eq!(back.precision_bits(), bits);
    }
}
