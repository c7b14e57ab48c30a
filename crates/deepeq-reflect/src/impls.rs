//! `Reflect` implementations for standard-library types.
//!
//! Wrapper semantics:
//! - `Box`, `RefCell` and `Cell` are transparent: one traversal frame,
//!   structure and identity delegated to the content.
//! - `Rc` and `Arc` are transparent but mark record pointees as
//!   [`Classification::Reference`] and expose their allocation address.
//! - `Option` and `Weak` frame their content as a single child, so they do
//!   not forward the content's identity as their own.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

use crate::reflect::{RefId, Reflect};
use crate::view::{Classification, LeafValue, ValueView};

macro_rules! impl_leaf {
    ($($ty:ty => $variant:ident),+ $(,)?) => {$(
        impl Reflect for $ty {
            fn view(&self) -> ValueView {
                ValueView::leaf::<$ty>(LeafValue::$variant((*self).into()))
            }

            fn with_child(&self, _index: usize, _visit: &mut dyn FnMut(&dyn Reflect)) {}

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    )+};
}

impl_leaf! {
    bool => Bool,
    char => Char,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    i128 => Int,
    u8 => UInt,
    u16 => UInt,
    u32 => UInt,
    u64 => UInt,
    u128 => UInt,
    f32 => Float,
    f64 => Float,
}

impl Reflect for isize {
    fn view(&self) -> ValueView {
        ValueView::leaf::<isize>(LeafValue::Int(*self as i128))
    }

    fn with_child(&self, _index: usize, _visit: &mut dyn FnMut(&dyn Reflect)) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for usize {
    fn view(&self) -> ValueView {
        ValueView::leaf::<usize>(LeafValue::UInt(*self as u128))
    }

    fn with_child(&self, _index: usize, _visit: &mut dyn FnMut(&dyn Reflect)) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for String {
    fn view(&self) -> ValueView {
        ValueView::leaf::<String>(LeafValue::Str(self.clone()))
    }

    fn with_child(&self, _index: usize, _visit: &mut dyn FnMut(&dyn Reflect)) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for &'static str {
    fn view(&self) -> ValueView {
        ValueView::leaf::<&'static str>(LeafValue::Str((*self).to_string()))
    }

    fn with_child(&self, _index: usize, _visit: &mut dyn FnMut(&dyn Reflect)) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for () {
    fn view(&self) -> ValueView {
        ValueView::record::<()>(&[])
    }

    fn with_child(&self, _index: usize, _visit: &mut dyn FnMut(&dyn Reflect)) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect + 'static> Reflect for Option<T> {
    fn view(&self) -> ValueView {
        ValueView::optional::<Self>(self.is_some())
    }

    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
        if index == 0 {
            if let Some(value) = self {
                visit(value);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect + 'static> Reflect for Vec<T> {
    fn view(&self) -> ValueView {
        ValueView::sequence::<Self>(self.len())
    }

    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
        if let Some(value) = self.get(index) {
            visit(value);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect + 'static, const N: usize> Reflect for [T; N] {
    fn view(&self) -> ValueView {
        ValueView::sequence::<Self>(N)
    }

    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
        if let Some(value) = self.get(index) {
            visit(value);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn sorted_keys<K: Ord, V>(map: &HashMap<K, V>) -> Vec<&K> {
    let mut keys: Vec<&K> = map.keys().collect();
    keys.sort();
    keys
}

impl<K, V> Reflect for HashMap<K, V>
where
    K: fmt::Debug + Ord + Hash + Eq + 'static,
    V: Reflect + 'static,
{
    fn view(&self) -> ValueView {
        let keys = sorted_keys(self)
            .into_iter()
            .map(|k| format!("[{:?}]", k))
            .collect();
        ValueView::mapping::<Self>(keys)
    }

    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
        let keys = sorted_keys(self);
        if let Some(key) = keys.get(index) {
            if let Some(value) = self.get(*key) {
                visit(value);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: fmt::Debug + Ord + 'static,
    V: Reflect + 'static,
{
    fn view(&self) -> ValueView {
        let keys = self.keys().map(|k| format!("[{:?}]", k)).collect();
        ValueView::mapping::<Self>(keys)
    }

    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
        if let Some(value) = self.values().nth(index) {
            visit(value);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

macro_rules! impl_tuple {
    ($(($($idx:tt $name:ident),+))+) => {$(
        impl<$($name: Reflect + 'static),+> Reflect for ($($name,)+) {
            fn view(&self) -> ValueView {
                ValueView::record::<Self>(&[$(concat!(".", stringify!($idx))),+])
            }

            fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
                let mut current = 0usize;
                $(
                    if index == current {
                        visit(&self.$idx);
                        return;
                    }
                    current += 1;
                )+
                let _ = current;
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    )+};
}

impl_tuple! {
    (0 A)
    (0 A, 1 B)
    (0 A, 1 B, 2 C)
    (0 A, 1 B, 2 C, 3 D)
}

macro_rules! impl_fn_ptr {
    ($(($($arg:ident),*)),+ $(,)?) => {$(
        impl<Ret: 'static $(, $arg: 'static)*> Reflect for fn($($arg),*) -> Ret {
            fn view(&self) -> ValueView {
                ValueView::function_like::<Self>()
            }

            fn with_child(&self, _index: usize, _visit: &mut dyn FnMut(&dyn Reflect)) {}

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    )+};
}

impl_fn_ptr!((), (A1), (A1, A2), (A1, A2, A3));

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn view(&self) -> ValueView {
        (**self).view()
    }

    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
        (**self).with_child(index, visit);
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn ref_identity(&self) -> Option<RefId> {
        (**self).ref_identity()
    }
}

impl<T: Reflect + 'static> Reflect for RefCell<T> {
    fn view(&self) -> ValueView {
        self.borrow().view().retyped::<Self>()
    }

    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
        self.borrow().with_child(index, visit);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn ref_identity(&self) -> Option<RefId> {
        self.borrow().ref_identity()
    }
}

impl<T: Reflect + Copy + 'static> Reflect for Cell<T> {
    fn view(&self) -> ValueView {
        self.get().view().retyped::<Self>()
    }

    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
        self.get().with_child(index, visit);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn ref_identity(&self) -> Option<RefId> {
        self.get().ref_identity()
    }
}

fn reference_view(inner: ValueView) -> ValueView {
    match inner.classification {
        Classification::Record => inner.with_classification(Classification::Reference),
        _ => inner,
    }
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    fn view(&self) -> ValueView {
        reference_view((**self).view())
    }

    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
        (**self).with_child(index, visit);
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn ref_identity(&self) -> Option<RefId> {
        Some(Rc::as_ptr(self) as *const u8 as usize)
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    fn view(&self) -> ValueView {
        reference_view((**self).view())
    }

    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
        (**self).with_child(index, visit);
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn ref_identity(&self) -> Option<RefId> {
        Some(Arc::as_ptr(self) as *const u8 as usize)
    }
}

impl<T: Reflect + 'static> Reflect for std::rc::Weak<T> {
    fn view(&self) -> ValueView {
        ValueView::optional::<Self>(self.upgrade().is_some())
    }

    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
        if index == 0 {
            if let Some(strong) = self.upgrade() {
                visit(&strong);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect + 'static> Reflect for std::sync::Weak<T> {
    fn view(&self) -> ValueView {
        ValueView::optional::<Self>(self.upgrade().is_some())
    }

    fn with_child(&self, index: usize, visit: &mut dyn FnMut(&dyn Reflect)) {
        if index == 0 {
            if let Some(strong) = self.upgrade() {
                visit(&strong);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
