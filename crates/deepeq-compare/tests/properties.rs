//! Property-based coverage of the comparison's algebraic guarantees.

use std::collections::HashMap;

use deepeq_compare::{ComparisonReport, MismatchKind, compare_to_report, reflective_eq};
use proptest::collection::{hash_map, vec};
use proptest::prelude::*;

fn sorted_kinds(report: &ComparisonReport) -> Vec<MismatchKind> {
    let mut kinds: Vec<_> = report.mismatches.iter().map(|m| m.kind).collect();
    kinds.sort();
    kinds
}

proptest! {
    // Reflexivity is checked against a clone, not the same reference, so
    // the full structural walk runs instead of the identity short-circuit.
    #[test]
    fn reflexive_over_integer_vectors(values in vec(any::<i64>(), 0..32)) {
        prop_assert!(reflective_eq(&values, &values.clone()));
    }

    #[test]
    fn reflexive_over_string_maps(entries in hash_map("[a-z]{1,6}", any::<i32>(), 0..16)) {
        prop_assert!(reflective_eq(&entries, &entries.clone()));
    }

    #[test]
    fn reflexive_over_nested_optionals(value in proptest::option::of(proptest::option::of(any::<u16>()))) {
        prop_assert!(reflective_eq(&value, &value.clone()));
    }

    #[test]
    fn symmetric_over_integer_vectors(a in vec(any::<i64>(), 0..8), b in vec(any::<i64>(), 0..8)) {
        prop_assert_eq!(reflective_eq(&a, &b), reflective_eq(&b, &a));
    }

    #[test]
    fn symmetric_mismatch_kinds_agree(a in vec(any::<i8>(), 0..6), b in vec(any::<i8>(), 0..6)) {
        let forward = compare_to_report(&a, &b, Vec::new());
        let backward = compare_to_report(&b, &a, Vec::new());
        prop_assert_eq!(sorted_kinds(&forward), sorted_kinds(&backward));
    }

    #[test]
    fn mapping_comparison_ignores_insertion_order(entries in hash_map("[a-z]{1,6}", any::<i32>(), 0..16)) {
        let mut reversed = HashMap::new();
        for (key, value) in entries.iter().collect::<Vec<_>>().into_iter().rev() {
            reversed.insert(key.clone(), *value);
        }
        prop_assert!(reflective_eq(&entries, &reversed));
    }

    #[test]
    fn leaf_comparison_agrees_with_native_equality(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(reflective_eq(&a, &b), a == b);
    }

    #[test]
    fn string_comparison_agrees_with_native_equality(a in "[a-z]{0,8}", b in "[a-z]{0,8}") {
        prop_assert_eq!(reflective_eq(&a, &b), a == b);
    }

    #[test]
    fn every_element_divergence_is_reported(a in vec(any::<u8>(), 4..8)) {
        let mut b = a.clone();
        for item in &mut b {
            *item = item.wrapping_add(1);
        }
        let report = compare_to_report(&a, &b, Vec::new());
        prop_assert_eq!(report.count_of(MismatchKind::Leaf), a.len());
    }
}
