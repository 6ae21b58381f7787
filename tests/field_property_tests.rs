//! Property-based tests for GF(1024) arithmetic
//!
//! Checks the field axioms the syndrome decoder relies on, over random elements.

use bech32x::field::{poly_eval, poly_mul, Fe1024, GROUP_ORDER};
use proptest::prelude::*;

proptest! {
    /// Property: addition is XOR, so every element is its own negative
    #[test]
    fn prop_addition_self_inverse(a in 0u16..1024) {
        let ga = Fe1024::new(a);
        prop_assert_eq!(ga + ga, Fe1024::ZERO);
        prop_assert_eq!(ga - ga, Fe1024::ZERO);
    }

    /// Property: multiplication is commutative: a * b = b * a
    #[test]
    fn prop_multiplication_commutative(a in 0u16..1024, b in 0u16..1024) {
        let ga = Fe1024::new(a);
        let gb = Fe1024::new(b);
        prop_assert_eq!(ga * gb, gb * ga);
    }

    /// Property: multiplication is associative: (a * b) * c = a * (b * c)
    #[test]
    fn prop_multiplication_associative(
        a in 0u16..1024,
        b in 0u16..1024,
        c in 0u16..1024,
    ) {
        let ga = Fe1024::new(a);
        let gb = Fe1024::new(b);
        let gc = Fe1024::new(c);
        prop_assert_eq!((ga * gb) * gc, ga * (gb * gc));
    }

    /// Property: multiplication distributes over addition
    #[test]
    fn prop_distributive(
        a in 0u16..1024,
        b in 0u16..1024,
        c in 0u16..1024,
    ) {
        let ga = Fe1024::new(a);
        let gb = Fe1024::new(b);
        let gc = Fe1024::new(c);
        prop_assert_eq!(ga * (gb + gc), ga * gb + ga * gc);
    }

    /// Property: every non-zero element has an inverse
    #[test]
    fn prop_inverse(a in 1u16..1024) {
        let ga = Fe1024::new(a);
        let inv = ga.inverse().unwrap();
        prop_assert_eq!(ga * inv, Fe1024::ONE);
    }

    /// Property: exp and log are inverse on non-zero elements
    #[test]
    fn prop_exp_log_roundtrip(a in 1u16..1024) {
        let ga = Fe1024::new(a);
        let l = ga.log().unwrap();
        prop_assert!((l as usize) < GROUP_ORDER);
        prop_assert_eq!(Fe1024::exp(l as i64), ga);
    }

    /// Property: shifting by k is multiplying by 69^k, for any sign of k
    #[test]
    fn prop_shift_is_multiplication(a in 0u16..1024, k in -5000i64..5000) {
        let ga = Fe1024::new(a);
        prop_assert_eq!(ga.shift(k), ga * Fe1024::exp(k));
        prop_assert_eq!(ga.shift(k).shift(-k), ga);
    }

    /// Property: GF(32) symbols multiply inside the subfield
    #[test]
    fn prop_gf32_subfield_closed(a in 0u8..32, b in 0u8..32) {
        let product = Fe1024::from(a) * Fe1024::from(b);
        prop_assert!(product.to_gf32().is_some());
    }

    /// Property: evaluation is a ring homomorphism: (p * q)(x) = p(x) * q(x)
    #[test]
    fn prop_poly_mul_evaluates_pointwise(
        p in prop::collection::vec(0u16..1024, 1..8),
        q in prop::collection::vec(0u16..1024, 1..8),
        exponent in 0i64..1023,
    ) {
        let p: Vec<Fe1024> = p.into_iter().map(Fe1024::new).collect();
        let q: Vec<Fe1024> = q.into_iter().map(Fe1024::new).collect();
        let product = poly_mul(&p, &q);

        prop_assert_eq!(product.len(), p.len() + q.len() - 1);
        prop_assert_eq!(
            poly_eval(&product, exponent),
            poly_eval(&p, exponent) * poly_eval(&q, exponent)
        );
    }
}
