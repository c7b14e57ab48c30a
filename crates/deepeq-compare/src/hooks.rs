//! Caller-supplied reporting and equality collaborators.
//!
//! The engine never decides how a mismatch becomes a visible test failure;
//! it only calls `on_mismatch`. The surrounding harness chooses whether to
//! aggregate, fail fast, or merely record.

use deepeq_reflect::LeafValue;

use crate::report::Mismatch;

/// Configuration threaded explicitly through every recursive call; no
/// ambient or global defaults.
pub struct Hooks<'a> {
    /// Invoked once per detected mismatch.
    pub on_mismatch: Box<dyn FnMut(Mismatch) + 'a>,
    /// Equality for leaf primitives with an intrinsic equality notion.
    pub opaque_equals: Box<dyn Fn(&LeafValue, &LeafValue) -> bool + 'a>,
    /// Equality for enumerant tags (canonical textual renderings).
    pub tag_equals: Box<dyn Fn(&str, &str) -> bool + 'a>,
}

impl<'a> Hooks<'a> {
    /// Hooks with the given mismatch sink and default equality callbacks.
    pub fn with_mismatch_sink(on_mismatch: impl FnMut(Mismatch) + 'a) -> Self {
        Self {
            on_mismatch: Box::new(on_mismatch),
            opaque_equals: Box::new(default_opaque_equals),
            tag_equals: Box::new(default_tag_equals),
        }
    }
}

/// Default leaf equality: the platform's built-in `==`.
pub fn default_opaque_equals(expected: &LeafValue, actual: &LeafValue) -> bool {
    expected == actual
}

/// Default tag equality: exact string equality.
pub fn default_tag_equals(expected: &str, actual: &str) -> bool {
    expected == actual
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_leaf_equality_is_exact() {
        assert!(default_opaque_equals(
            &LeafValue::Int(1),
            &LeafValue::Int(1)
        ));
        assert!(!default_opaque_equals(
            &LeafValue::Int(1),
            &LeafValue::Int(2)
        ));
        assert!(!default_opaque_equals(
            &LeafValue::Int(1),
            &LeafValue::UInt(1)
        ));
    }

    #[test]
    fn default_tag_equality_is_exact() {
        assert!(default_tag_equals("Sweet", "Sweet"));
        assert!(!default_tag_equals("Sweet", "Sour"));
    }
}
