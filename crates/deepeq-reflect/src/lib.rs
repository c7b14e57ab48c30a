//! deepeq-reflect: structural introspection for reflective equality checking.
//!
//! Rust has no runtime reflection, so values describe their own shape through
//! the [`Reflect`] trait: a per-type descriptor that yields a [`ValueView`]
//! (type identity, classification, ordered child labels, leaf payload) and
//! scoped access to each child. The comparison engine in `deepeq-compare`
//! walks two such descriptors in lock-step.
//!
//! Implementations are provided for the common standard-library types:
//! scalars, `String`, `Option`, `Vec`, arrays, tuples, ordered and hashed
//! maps, function pointers, and the pointer/cell wrappers (`Box`, `Rc`,
//! `Arc`, `Weak`, `RefCell`, `Cell`). User record types implement the trait
//! by hand or with the [`reflect_record!`] / [`reflect_enumerant!`] macros.

pub mod reflect;
pub mod view;

mod impls;

pub use reflect::{RefId, Reflect};
pub use view::{Classification, LeafValue, ValueView};
