//! Per-type custom matchers.
//!
//! A matcher registered for a type fully replaces structural comparison for
//! every value of that type, at any depth, including the root. The registry
//! is built once per top-level invocation and is immutable during a
//! traversal.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

/// An opaque per-type equality override handle.
///
/// Register against the pointee type: shared pointers delegate their type
/// identity inward, so a matcher for `T` also fires for `Rc<T>` nodes.
pub struct Matcher {
    type_id: TypeId,
    type_name: &'static str,
    predicate: Box<dyn Fn(&dyn Any, &dyn Any) -> bool>,
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl Matcher {
    /// Type the matcher was registered for, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn check(&self, expected: &dyn Any, actual: &dyn Any) -> bool {
        (self.predicate)(expected, actual)
    }
}

/// Build a matcher for type `T` from a binary predicate. A downcast failure
/// on either side counts as unequal.
pub fn matcher_for<T: 'static>(predicate: impl Fn(&T, &T) -> bool + 'static) -> Matcher {
    Matcher {
        type_id: TypeId::of::<T>(),
        type_name: type_name::<T>(),
        predicate: Box::new(move |expected, actual| {
            match (expected.downcast_ref::<T>(), actual.downcast_ref::<T>()) {
                (Some(expected), Some(actual)) => predicate(expected, actual),
                _ => false,
            }
        }),
    }
}

/// Pre-built approximate matcher for `f64`: values within `accuracy` of each
/// other compare equal.
pub fn match_floats_within(accuracy: f64) -> Matcher {
    matcher_for::<f64>(move |expected, actual| (expected - actual).abs() < accuracy)
}

/// Mapping from type identity to predicate; at most one predicate per type,
/// later registrations for the same type win.
#[derive(Debug, Default)]
pub struct MatcherRegistry {
    by_type: HashMap<TypeId, Matcher>,
}

impl MatcherRegistry {
    pub fn new(matchers: Vec<Matcher>) -> Self {
        let mut by_type = HashMap::new();
        for matcher in matchers {
            by_type.insert(matcher.type_id, matcher);
        }
        Self { by_type }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn find(&self, type_id: TypeId) -> Option<&Matcher> {
        self.by_type.get(&type_id)
    }
}
