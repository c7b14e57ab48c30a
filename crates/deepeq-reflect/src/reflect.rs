//! The `Reflect` trait: a per-type structural descriptor.

use std::any::Any;
use std::fmt;

use crate::view::ValueView;

/// Stable pointer identity of a shared-reference value, used by the
/// comparison engine's cycle detection.
pub type RefId = usize;

/// Describes a value's structure to the comparison engine.
///
/// The `fmt::Debug` supertrait supplies the canonical textual rendering used
/// for enumerant tags and diagnostic messages.
pub trait Reflect: fmt::Debug {
    /// Introspect this value. Called fresh on every recursive step.
    fn view(&self) -> ValueView;

    /// Visit child `index` (in the order of [`ValueView::labels`]). Out of
    /// range indices must be ignored. Continuation style rather than a
    /// returned reference, so wrappers with guarded borrows (`RefCell`) can
    /// lend their content for the duration of the visit.
    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect));

    /// The value for custom-matcher downcasting. Transparent wrappers
    /// delegate this to their content; the returned type must agree with
    /// [`ValueView::type_id`].
    fn as_any(&self) -> &dyn Any;

    /// Allocation identity for shared references (`Rc`, `Arc`). Transparent
    /// wrappers (`Box`, `RefCell`, `Cell`) forward their content's identity;
    /// framing wrappers (`Option`, `Weak`) and plain values report `None`.
    fn ref_identity(&self) -> Option<RefId> {
        None
    }
}

/// Implements [`Reflect`] for a record (struct) type with named fields.
///
/// ```
/// use deepeq_reflect::reflect_record;
///
/// #[derive(Debug)]
/// struct Point { x: i32, y: i32 }
/// reflect_record!(Point { x, y });
/// ```
///
/// Generic types are not supported; implement the trait by hand for those.
#[macro_export]
macro_rules! reflect_record {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn view(&self) -> $crate::ValueView {
                $crate::ValueView::record::<$ty>(&[$(stringify!($field)),*])
            }

            #[allow(unused_variables)]
            fn with_child(
                &self,
                index: usize,
                visit: &mut dyn ::core::ops::FnMut(&dyn $crate::Reflect),
            ) {
                let mut current = 0usize;
                $(
                    if index == current {
                        visit(&self.$field);
                        return;
                    }
                    current += 1;
                )*
                let _ = current;
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }
    };
}

/// Implements [`Reflect`] for data-less enums, compared by their canonical
/// `Debug` tag.
#[macro_export]
macro_rules! reflect_enumerant {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::Reflect for $ty {
            fn view(&self) -> $crate::ValueView {
                $crate::ValueView::enumerant::<$ty>()
            }

            fn with_child(
                &self,
                _index: usize,
                _visit: &mut dyn ::core::ops::FnMut(&dyn $crate::Reflect),
            ) {
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }
    )+};
}
