//! deepeq-compare: recursive reflective deep-equality with field-path
//! failure reporting.
//!
//! Compares two [`Reflect`] values of matching shape field by field,
//! reporting every divergence with the exact path from the root where it
//! occurred. Container types, reference cycles, and per-type custom matchers
//! are handled by policy; the traversal always runs to completion so
//! independent mismatches all surface in one run.
//!
//! ```
//! use deepeq_compare::{assert_reflective_eq, reflective_eq};
//!
//! assert_reflective_eq(&vec![1, 2, 3], &vec![1, 2, 3]);
//! assert!(!reflective_eq(&Some("bob".to_string()), &None::<String>));
//! ```

mod engine;

pub mod hooks;
pub mod matchers;
pub mod report;

pub use deepeq_reflect::{Classification, LeafValue, RefId, Reflect, ValueView};
pub use hooks::Hooks;
pub use matchers::{Matcher, MatcherRegistry, match_floats_within, matcher_for};
pub use report::{ComparisonReport, Mismatch, MismatchKind, NotEqual};

use engine::Traversal;

/// Full-control entry point: compare with an explicit matcher list and
/// explicit hooks. Builds the registry (last registration for a type wins),
/// fresh visited sets, and starts at depth 0 with empty paths.
pub fn compare_with_hooks(
    expected: &dyn Reflect,
    actual: &dyn Reflect,
    matchers: Vec<Matcher>,
    hooks: &mut Hooks<'_>,
) {
    let registry = MatcherRegistry::new(matchers);
    Traversal::new(&registry, hooks).run(expected, actual);
}

/// Compare and collect every mismatch into a [`ComparisonReport`].
pub fn compare_to_report(
    expected: &dyn Reflect,
    actual: &dyn Reflect,
    matchers: Vec<Matcher>,
) -> ComparisonReport {
    let mut report = ComparisonReport::new();
    {
        let mut hooks = Hooks::with_mismatch_sink(|mismatch| report.record(mismatch));
        compare_with_hooks(expected, actual, matchers, &mut hooks);
    }
    report
}

/// Compare, returning `Err(NotEqual)` carrying the mismatch list when the
/// values diverge anywhere.
pub fn check_reflective_eq(
    expected: &dyn Reflect,
    actual: &dyn Reflect,
    matchers: Vec<Matcher>,
) -> Result<(), NotEqual> {
    let report = compare_to_report(expected, actual, matchers);
    if report.passed() {
        Ok(())
    } else {
        Err(NotEqual {
            mismatches: report.mismatches,
        })
    }
}

/// True iff the two values are reflectively equal.
pub fn reflective_eq(expected: &dyn Reflect, actual: &dyn Reflect) -> bool {
    reflective_eq_with(expected, actual, Vec::new())
}

/// [`reflective_eq`] with custom matchers.
pub fn reflective_eq_with(
    expected: &dyn Reflect,
    actual: &dyn Reflect,
    matchers: Vec<Matcher>,
) -> bool {
    compare_to_report(expected, actual, matchers).passed()
}

/// Assert the two values are reflectively equal, panicking with the full
/// rendered report when they are not.
pub fn assert_reflective_eq(expected: &dyn Reflect, actual: &dyn Reflect) {
    assert_reflective_eq_with(expected, actual, Vec::new());
}

/// [`assert_reflective_eq`] with custom matchers.
pub fn assert_reflective_eq_with(
    expected: &dyn Reflect,
    actual: &dyn Reflect,
    matchers: Vec<Matcher>,
) {
    let report = compare_to_report(expected, actual, matchers);
    if !report.passed() {
        panic!("{}", report.render());
    }
}
