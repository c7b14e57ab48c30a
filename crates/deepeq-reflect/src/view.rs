//! The introspected description of a value: type identity, classification,
//! child labels and leaf payload.
//!
//! A `ValueView` is built fresh on every step of a traversal, never mutated,
//! and discarded after use. Child *values* are not part of the view; they are
//! reached through [`Reflect::with_child`](crate::Reflect::with_child) so
//! that guarded borrows (`RefCell` and friends) stay scoped.

use std::any::{TypeId, type_name};
use std::fmt;

/// How a value's structure should be interpreted by the comparison engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Primitive with intrinsic equality (numbers, strings, booleans).
    Leaf,
    /// Nullable wrapper; presence is visible as the child count.
    Optional,
    /// Fixed named fields embedded by value.
    Record,
    /// Data-less sum-type case, compared by its canonical tag.
    Enumerant,
    /// Sequence or mapping; children are `(index-or-key, element)` pairs.
    Collection,
    /// Record-like node reached through a shared reference (`Rc`/`Arc`).
    Reference,
    /// Non-inspectable callable; skipped rather than compared.
    FunctionLike,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::Leaf => "leaf",
            Classification::Optional => "optional",
            Classification::Record => "record",
            Classification::Enumerant => "enumerant",
            Classification::Collection => "collection",
            Classification::Reference => "reference",
            Classification::FunctionLike => "function-like",
        };
        write!(f, "{}", name)
    }
}

/// Typed snapshot of a leaf value, used by the engine's leaf-equality hook.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    Bool(bool),
    Int(i128),
    UInt(u128),
    Float(f64),
    Char(char),
    Str(String),
}

impl fmt::Display for LeafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafValue::Bool(v) => write!(f, "{}", v),
            LeafValue::Int(v) => write!(f, "{}", v),
            LeafValue::UInt(v) => write!(f, "{}", v),
            LeafValue::Float(v) => write!(f, "{}", v),
            LeafValue::Char(v) => write!(f, "{:?}", v),
            LeafValue::Str(v) => write!(f, "{:?}", v),
        }
    }
}

/// The language-neutral description of a value produced by introspection.
#[derive(Debug, Clone)]
pub struct ValueView {
    /// Opaque comparable token identifying the runtime type.
    pub type_id: TypeId,
    /// Human-readable type name, for diagnostics only.
    pub type_name: &'static str,
    pub classification: Classification,
    /// One entry per child, in declaration/index/key order. `None` marks an
    /// unnamed child.
    pub labels: Vec<Option<String>>,
    /// Present iff `classification` is [`Classification::Leaf`].
    pub leaf: Option<LeafValue>,
}

impl ValueView {
    fn base<T: 'static + ?Sized>(classification: Classification) -> Self {
        ValueView {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            classification,
            labels: Vec::new(),
            leaf: None,
        }
    }

    /// View of a leaf primitive of type `T` holding `value`.
    pub fn leaf<T: 'static>(value: LeafValue) -> Self {
        let mut view = Self::base::<T>(Classification::Leaf);
        view.leaf = Some(value);
        view
    }

    /// View of a record with the given field names in declaration order.
    pub fn record<T: 'static>(fields: &[&str]) -> Self {
        let mut view = Self::base::<T>(Classification::Record);
        view.labels = fields.iter().map(|f| Some((*f).to_string())).collect();
        view
    }

    /// View of a data-less enum case.
    pub fn enumerant<T: 'static>() -> Self {
        Self::base::<T>(Classification::Enumerant)
    }

    /// View of a function-like value.
    pub fn function_like<T: 'static>() -> Self {
        Self::base::<T>(Classification::FunctionLike)
    }

    /// View of an optional; one child labelled `some` when present.
    pub fn optional<T: 'static>(present: bool) -> Self {
        let mut view = Self::base::<T>(Classification::Optional);
        if present {
            view.labels = vec![Some("some".to_string())];
        }
        view
    }

    /// View of a sequence of `len` elements labelled by index.
    pub fn sequence<T: 'static>(len: usize) -> Self {
        let mut view = Self::base::<T>(Classification::Collection);
        view.labels = (0..len).map(|i| Some(format!("[{}]", i))).collect();
        view
    }

    /// View of a mapping; `keys` are the rendered keys in a stable order.
    pub fn mapping<T: 'static>(keys: Vec<String>) -> Self {
        let mut view = Self::base::<T>(Classification::Collection);
        view.labels = keys.into_iter().map(Some).collect();
        view
    }

    /// Number of structural children.
    pub fn child_count(&self) -> usize {
        self.labels.len()
    }

    /// Replace the classification, keeping everything else. Used by shared
    /// pointers to mark record pointees as reference-bearing.
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    /// Re-stamp the view with `T`'s type identity. Used by wrappers that
    /// delegate structure to their content but keep their own identity so
    /// that matcher downcasting stays consistent with `as_any`.
    pub fn retyped<T: 'static + ?Sized>(mut self) -> Self {
        self.type_id = TypeId::of::<T>();
        self.type_name = type_name::<T>();
        self
    }
}
