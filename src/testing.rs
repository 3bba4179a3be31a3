//! Testing utilities for zscore-svm.
//!
//! Assertion helpers shared by unit tests and integration tests.
//!
//! ```ignore
//! use zscore_svm::assert_approx_eq_f64;
//! use zscore_svm::testing::{assert_models_equivalent, FEATURE_TOLERANCE};
//! ```

use approx::relative_eq;

use crate::model::Model;

/// Default absolute tolerance for f64 comparisons.
pub const DEFAULT_TOLERANCE_F64: f64 = 1e-9;

/// Relative tolerance for feature values after a text round trip.
///
/// Features are written with 9 significant digits.
pub const FEATURE_TOLERANCE: f64 = 1e-8;

/// Assert that two f64 values are approximately equal.
///
/// Uses absolute difference comparison with the given tolerance.
///
/// ```
/// # use zscore_svm::assert_approx_eq_f64;
/// assert_approx_eq_f64!(1.0f64, 1.0001f64, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq_f64 {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, diff, tol
            );
        }
    }};
}

/// Assert that two f64 slices are equal element-wise within a relative tolerance.
///
/// # Panics
///
/// Panics if lengths differ or any element is out of tolerance.
pub fn assert_slices_relative_eq(
    actual: &[f64],
    expected: &[f64],
    max_relative: f64,
    context: &str,
) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            relative_eq!(*a, *e, max_relative = max_relative),
            "{context}[{i}]: {a} ≠ {e} (max_relative={max_relative})"
        );
    }
}

/// Assert that two models agree after a text round trip.
///
/// Everything is compared exactly except feature values, which only need to
/// match within `feature_tolerance` (relative).
///
/// # Panics
///
/// Panics with the first differing field.
pub fn assert_models_equivalent(actual: &Model, expected: &Model, feature_tolerance: f64) {
    assert_eq!(actual.svm_type(), expected.svm_type(), "svm_type");
    assert_eq!(actual.kernel(), expected.kernel(), "kernel");
    assert_eq!(actual.class_count(), expected.class_count(), "nr_class");
    assert_eq!(actual.rho(), expected.rho(), "rho");
    assert_eq!(actual.prob_a(), expected.prob_a(), "probA");
    assert_eq!(actual.prob_b(), expected.prob_b(), "probB");
    assert_eq!(actual.labels(), expected.labels(), "label");
    assert_eq!(actual.n_sv(), expected.n_sv(), "nr_sv");
    assert_eq!(actual.coefficients(), expected.coefficients(), "sv_coef");
    assert_eq!(
        actual.support_vector_count(),
        expected.support_vector_count(),
        "total_sv"
    );

    for (i, (a, e)) in actual
        .support_vectors()
        .iter()
        .zip(expected.support_vectors())
        .enumerate()
    {
        let a_idx: Vec<i32> = a.iter().map(|(idx, _)| idx).collect();
        let e_idx: Vec<i32> = e.iter().map(|(idx, _)| idx).collect();
        assert_eq!(a_idx, e_idx, "SV[{i}] indices");

        let a_val: Vec<f64> = a.iter().map(|(_, v)| v).collect();
        let e_val: Vec<f64> = e.iter().map(|(_, v)| v).collect();
        assert_slices_relative_eq(&a_val, &e_val, feature_tolerance, &format!("SV[{i}]"));
    }
}
