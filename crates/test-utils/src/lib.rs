//! Shared test utilities for the cf-datasets workspace.
//!
//! This crate provides assertion macros used across the test suites:
//! - Approximate floating-point comparisons
//! - Approximate coordinate-pair comparisons
//! - Dataset consistency assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, assert_consistent};
//! ```

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of coordinate pairs.
///
/// Both sides are `(x, y)` tuple expressions.
///
/// # Usage
///
/// ```
/// use test_utils::assert_coords_approx_eq;
///
/// let projected = (1.0001, 2.0001);
/// assert_coords_approx_eq!(projected, (1.0, 2.0), 0.001);
/// ```
#[macro_export]
macro_rules! assert_coords_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (x1, y1) = $left;
        let (x2, y2) = $right;
        $crate::assert_approx_eq!(x1, x2, $epsilon);
        $crate::assert_approx_eq!(y1, y2, $epsilon);
    }};
}

/// Assert that a dataset passes every consistency check.
///
/// Expands to a call of `cf_common::check_consistency`, so the calling crate
/// needs `cf-common` as a dependency.
///
/// ```ignore
/// use test_utils::assert_consistent;
///
/// assert_consistent!(cf_datasets::popds());
/// ```
#[macro_export]
macro_rules! assert_consistent {
    ($ds:expr) => {{
        let issues = ::cf_common::check_consistency($ds);
        if !issues.is_empty() {
            let lines: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
            panic!(
                "dataset `{}` has {} consistency issue(s):\n  {}",
                stringify!($ds),
                issues.len(),
                lines.join("\n  ")
            );
        }
    }};
}
