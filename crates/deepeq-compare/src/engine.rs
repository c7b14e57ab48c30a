//! The recursive comparison engine.
//!
//! Walks two `Reflect` values in lock-step, applying in order: path
//! extension, type-identity check, custom-matcher dispatch, identity
//! short-circuit, arity check, leaf resolution, structural descent with
//! cycle detection. Every mismatch is routed through the hooks; the
//! traversal never stops at the first divergence, so independent subtrees
//! all report in a single run.

use std::collections::HashSet;

use deepeq_reflect::{Classification, RefId, Reflect, ValueView};

use crate::hooks::Hooks;
use crate::matchers::MatcherRegistry;
use crate::report::{Mismatch, MismatchKind};

/// One top-level comparison. The visited sets are scoped to this value and
/// are maintained with strict push-before-recurse / pop-after-recurse
/// discipline, so entries never persist across sibling subtrees.
pub(crate) struct Traversal<'a, 'h> {
    matchers: &'a MatcherRegistry,
    hooks: &'a mut Hooks<'h>,
    visited_expected: HashSet<RefId>,
    visited_actual: HashSet<RefId>,
}

impl<'a, 'h> Traversal<'a, 'h> {
    pub(crate) fn new(matchers: &'a MatcherRegistry, hooks: &'a mut Hooks<'h>) -> Self {
        Self {
            matchers,
            hooks,
            visited_expected: HashSet::new(),
            visited_actual: HashSet::new(),
        }
    }

    /// Compare two root values, labelling each root with its own type name.
    pub(crate) fn run(&mut self, expected: &dyn Reflect, actual: &dyn Reflect) {
        let expected_name = expected.view().type_name;
        let actual_name = actual.view().type_name;
        self.compare(expected, actual, Some(expected_name), Some(actual_name), "", "", 0);
    }

    fn report(&mut self, kind: MismatchKind, message: String, path_expected: &str, path_actual: &str) {
        (self.hooks.on_mismatch)(Mismatch {
            kind,
            message,
            path_expected: path_expected.to_string(),
            path_actual: path_actual.to_string(),
        });
    }

    fn compare(
        &mut self,
        expected: &dyn Reflect,
        actual: &dyn Reflect,
        label_expected: Option<&str>,
        label_actual: Option<&str>,
        prev_path_expected: &str,
        prev_path_actual: &str,
        depth: usize,
    ) {
        let path_expected = append_item(label_expected, prev_path_expected, depth);
        let path_actual = append_item(label_actual, prev_path_actual, depth);

        let view_expected = expected.view();
        let view_actual = actual.view();

        // Runtime types must agree before anything else is worth comparing.
        if view_expected.type_id != view_actual.type_id {
            self.report(
                MismatchKind::Type,
                format!(
                    "types differ: expected{} is a {}\ngot:{} which is a {}",
                    path_expected, view_expected.type_name, path_actual, view_actual.type_name
                ),
                &path_expected,
                &path_actual,
            );
            return;
        }

        // A registered matcher replaces structural comparison entirely,
        // even for values with children.
        if let Some(matcher) = self.matchers.find(view_expected.type_id) {
            if !matcher.check(expected.as_any(), actual.as_any()) {
                self.report(
                    MismatchKind::CustomMatcher,
                    format!(
                        "{}: {:?} not equal to {:?} using custom matcher",
                        path_expected, expected, actual
                    ),
                    &path_expected,
                    &path_actual,
                );
            }
            return;
        }

        // The same object is equal to itself; this also settles single-node
        // self-referential structures. Zero-sized values all share one
        // address, so the raw-address check is meaningless for them.
        if std::mem::size_of_val(expected) != 0
            && std::ptr::addr_eq(expected as *const _, actual as *const _)
        {
            return;
        }
        if let (Some(expected_id), Some(actual_id)) =
            (expected.ref_identity(), actual.ref_identity())
        {
            if expected_id == actual_id {
                return;
            }
        }

        let expected_count = view_expected.child_count();
        let actual_count = view_actual.child_count();
        if expected_count != actual_count {
            self.report(
                MismatchKind::Arity,
                format!(
                    "{} has {} children but{} has {}",
                    path_expected, expected_count, path_actual, actual_count
                ),
                &path_expected,
                &path_actual,
            );
            return;
        }

        if expected_count == 0 {
            self.resolve_leaf(
                &view_expected,
                &view_actual,
                expected,
                actual,
                &path_expected,
                &path_actual,
            );
            return;
        }

        // Structural descent: children paired positionally, never by label.
        for index in 0..expected_count {
            let label_e = view_expected.labels[index].clone();
            let label_a = view_actual.labels[index].clone();
            expected.with_child(index, &mut |child_expected| {
                actual.with_child(index, &mut |child_actual| {
                    self.compare_pair(
                        child_expected,
                        child_actual,
                        label_e.as_deref(),
                        label_a.as_deref(),
                        &path_expected,
                        &path_actual,
                        depth,
                    );
                });
            });
        }
    }

    /// Terminal resolution for values with no structural children.
    fn resolve_leaf(
        &mut self,
        view_expected: &ValueView,
        view_actual: &ValueView,
        expected: &dyn Reflect,
        actual: &dyn Reflect,
        path_expected: &str,
        path_actual: &str,
    ) {
        match view_expected.classification {
            Classification::FunctionLike => {
                // Skipped, never a failure.
                println!("ignoring function-like value in{}: {:?}", path_expected, actual);
            }
            Classification::Record
            | Classification::Reference
            | Classification::Collection
            | Classification::Optional => {
                // Zero fields, empty collection, or both sides absent:
                // vacuously equal.
            }
            Classification::Enumerant => {
                let expected_tag = format!("{:?}", expected);
                let actual_tag = format!("{:?}", actual);
                if !(self.hooks.tag_equals)(&expected_tag, &actual_tag) {
                    self.report(
                        MismatchKind::Enum,
                        format!(
                            "{}: {} not equal to {}",
                            path_expected, expected_tag, actual_tag
                        ),
                        path_expected,
                        path_actual,
                    );
                }
            }
            Classification::Leaf => match (&view_expected.leaf, &view_actual.leaf) {
                (Some(expected_leaf), Some(actual_leaf)) => {
                    if !(self.hooks.opaque_equals)(expected_leaf, actual_leaf) {
                        self.report(
                            MismatchKind::Leaf,
                            format!(
                                "{}: {} not equal to {}",
                                path_expected, expected_leaf, actual_leaf
                            ),
                            path_expected,
                            path_actual,
                        );
                    }
                }
                _ => {
                    self.report(
                        MismatchKind::Uncomparable,
                        format!("cannot compare{}: {:?}", path_expected, actual),
                        path_expected,
                        path_actual,
                    );
                }
            },
        }
    }

    /// Compare one child pair, with cycle bookkeeping along reference edges.
    #[allow(clippy::too_many_arguments)]
    fn compare_pair(
        &mut self,
        child_expected: &dyn Reflect,
        child_actual: &dyn Reflect,
        label_expected: Option<&str>,
        label_actual: Option<&str>,
        path_expected: &str,
        path_actual: &str,
        depth: usize,
    ) {
        let id_expected = child_expected.ref_identity();
        let id_actual = child_actual.ref_identity();

        let fresh_expected = match id_expected {
            Some(id) => self.visited_expected.insert(id),
            None => false,
        };
        let fresh_actual = match id_actual {
            Some(id) => self.visited_actual.insert(id),
            None => false,
        };
        let seen_expected = id_expected.is_some() && !fresh_expected;
        let seen_actual = id_actual.is_some() && !fresh_actual;

        if seen_expected || seen_actual {
            if seen_expected == seen_actual {
                // Both sides closed a cycle back to an ancestor at the same
                // position: the pair is equal, carry on with the siblings.
                println!(
                    "{}\nand{}\nare matching looping references",
                    path_expected, path_actual
                );
            } else {
                self.report(
                    MismatchKind::Loop,
                    format!(
                        "failed to compare{} and{}: looping references",
                        path_expected, path_actual
                    ),
                    path_expected,
                    path_actual,
                );
            }
            self.unwind(fresh_expected, id_expected, fresh_actual, id_actual);
            return;
        }

        // Labels must agree, but a label difference does not stop descent
        // into the values.
        if label_expected != label_actual {
            self.report(
                MismatchKind::Label,
                format!(
                    "{}: field {:?} not equal to{}: field {:?}",
                    path_expected, label_expected, path_actual, label_actual
                ),
                path_expected,
                path_actual,
            );
        }

        self.compare(
            child_expected,
            child_actual,
            label_expected,
            label_actual,
            path_expected,
            path_actual,
            depth + 1,
        );

        self.unwind(fresh_expected, id_expected, fresh_actual, id_actual);
    }

    /// Restore the visited sets to their pre-pair state.
    fn unwind(
        &mut self,
        fresh_expected: bool,
        id_expected: Option<RefId>,
        fresh_actual: bool,
        id_actual: Option<RefId>,
    ) {
        if fresh_expected {
            if let Some(id) = id_expected {
                self.visited_expected.remove(&id);
            }
        }
        if fresh_actual {
            if let Some(id) = id_actual {
                self.visited_actual.remove(&id);
            }
        }
    }
}

/// Extend a path descriptor with the current field's label (or a synthetic
/// placeholder), indented to the recursion depth. Diagnostics only.
fn append_item(label: Option<&str>, previous: &str, depth: usize) -> String {
    let tabs = "\t".repeat(depth + 1);
    let name = label.map(str::trim).unwrap_or("[unnamed field]");
    format!("{}\n{} {}", previous, tabs, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::matcher_for;
    use crate::report::ComparisonReport;
    use deepeq_reflect::LeafValue;
    use std::any::{Any, TypeId};

    fn report_for(
        expected: &dyn Reflect,
        actual: &dyn Reflect,
        matchers: Vec<crate::matchers::Matcher>,
    ) -> ComparisonReport {
        let registry = MatcherRegistry::new(matchers);
        let mut report = ComparisonReport::new();
        {
            let mut hooks = Hooks::with_mismatch_sink(|m| report.record(m));
            Traversal::new(&registry, &mut hooks).run(expected, actual);
        }
        report
    }

    #[test]
    fn path_descriptor_appends_trimmed_labels() {
        let path = append_item(Some(" next "), "\n\t root", 1);
        assert_eq!(path, "\n\t root\n\t\t next");
        let path = append_item(None, "", 0);
        assert_eq!(path, "\n\t [unnamed field]");
    }

    #[test]
    fn arity_takes_precedence_over_leaf_policy() {
        let report = report_for(&vec![1i32, 2], &vec![1i32, 2, 3], Vec::new());
        assert_eq!(report.count_of(MismatchKind::Arity), 1);
        assert_eq!(report.count_of(MismatchKind::Leaf), 0);
        assert_eq!(report.mismatches.len(), 1);
    }

    #[test]
    fn traversal_reports_all_sibling_divergences() {
        let expected = (1i32, "a".to_string());
        let actual = (2i32, "b".to_string());
        let report = report_for(&expected, &actual, Vec::new());
        assert_eq!(report.count_of(MismatchKind::Leaf), 2);
    }

    #[test]
    fn matcher_overrides_structural_descent() {
        let shorter = vec![1i64];
        let longer = vec![1i64, 2, 3];
        let permissive = vec![matcher_for::<Vec<i64>>(|_, _| true)];
        assert!(report_for(&shorter, &longer, permissive).passed());

        let strict = vec![matcher_for::<Vec<i64>>(|_, _| false)];
        let report = report_for(&shorter, &longer, strict);
        assert_eq!(report.count_of(MismatchKind::CustomMatcher), 1);
        assert_eq!(report.count_of(MismatchKind::Arity), 0);
    }

    #[test]
    fn matcher_registration_is_last_wins() {
        let matchers = vec![matcher_for::<i32>(|_, _| false), matcher_for::<i32>(|_, _| true)];
        assert!(report_for(&1i32, &2i32, matchers).passed());
    }

    #[test]
    fn mismatch_paths_point_at_the_diverging_field() {
        let expected = vec![1i32, 2];
        let actual = vec![1i32, 3];
        let report = report_for(&expected, &actual, Vec::new());
        assert_eq!(report.mismatches.len(), 1);
        let mismatch = &report.mismatches[0];
        assert_eq!(mismatch.kind, MismatchKind::Leaf);
        assert!(mismatch.path_expected.ends_with("[1]"));
        assert!(mismatch.path_actual.ends_with("[1]"));
    }

    // A descriptor that claims to be a leaf but carries no payload: the
    // classification coverage gap surfaces as Uncomparable.
    #[derive(Debug)]
    struct Payloadless;

    impl Reflect for Payloadless {
        fn view(&self) -> ValueView {
            ValueView {
                type_id: TypeId::of::<Payloadless>(),
                type_name: "Payloadless",
                classification: Classification::Leaf,
                labels: Vec::new(),
                leaf: None,
            }
        }

        fn with_child(&self, _index: usize, _visit: &mut dyn FnMut(&dyn Reflect)) {}

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn payloadless_leaf_is_uncomparable() {
        let report = report_for(&Payloadless, &Payloadless, Vec::new());
        assert_eq!(report.count_of(MismatchKind::Uncomparable), 1);
    }

    // All references to a zero-sized value share one address, so ZST pairs
    // must reach leaf resolution instead of aliasing as "the same object".
    #[test]
    fn zero_sized_values_are_not_identical_by_address() {
        let distinct_a = Payloadless;
        let distinct_b = Payloadless;
        let report = report_for(&distinct_a, &distinct_b, Vec::new());
        assert_eq!(report.count_of(MismatchKind::Uncomparable), 1);

        // Zero-sized records still compare equal, through structure rather
        // than through the address check.
        assert!(report_for(&(), &(), Vec::new()).passed());
    }

    #[test]
    fn custom_opaque_equality_hook_is_honoured() {
        let registry = MatcherRegistry::empty();
        let mut saw_mismatch = false;
        {
            let mut hooks = Hooks::with_mismatch_sink(|_| saw_mismatch = true);
            hooks.opaque_equals = Box::new(|expected, actual| {
                // Case-insensitive string equality, exact otherwise.
                match (expected, actual) {
                    (LeafValue::Str(e), LeafValue::Str(a)) => e.eq_ignore_ascii_case(a),
                    _ => expected == actual,
                }
            });
            let expected = "Bob".to_string();
            let actual = "bob".to_string();
            Traversal::new(&registry, &mut hooks).run(&expected, &actual);
        }
        assert!(!saw_mismatch);
    }
}
