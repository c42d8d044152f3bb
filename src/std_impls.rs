//! Registrations for primitives, references, boxes and the standard
//! collections.
//!
//! Borrowed members use `'a` for the borrow of the container, so
//! `MemberOf<'a, Vec<T>, cap::ConstIterator>` is `slice::Iter<'a, T>`.

use core::cell::{Cell, RefCell};
use core::cmp::Ordering;
use core::iter::Rev;
use core::marker::PhantomData;
use core::time::Duration;

use alloc::borrow::{Cow, ToOwned};
use alloc::boxed::Box;
use alloc::collections::{btree_map, btree_set, linked_list, vec_deque};
use alloc::collections::{BTreeMap, BTreeSet, BinaryHeap, LinkedList, VecDeque};
use alloc::rc::Rc;
use alloc::string::String;
#[cfg(target_has_atomic = "ptr")]
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::detect::{
    cap, Capability, CapabilityName, CapabilitySet, Decay, InnerType, Introspect, Member,
    MemberValue,
};
use crate::rebind::{Rebind, RebindRule};

// =============================================================================
// Registration Macros
// =============================================================================

/// One `Member` impl. Generics arrive as a single `[..]` group with a
/// trailing comma so they can be forwarded from inside a repetition.
macro_rules! member {
    ([$($g:tt)*] $ty:ty, $lt:lifetime, $name:ident = $member:ty) => {
        ::paste::paste! {
            impl<$($g)*> Member<cap::[<$name:camel>]> for $ty {
                type Type<$lt> = $member where Self: $lt;
            }
        }
    };
}

/// Identity rebind.
macro_rules! rebind_identity {
    ([$($g:tt)*] $ty:ty) => {
        impl<$($g)* __To: ?Sized> Rebind<__To> for $ty {
            type Out = Self;
        }
    };
}

/// Identity rebind and decay.
macro_rules! identity {
    ([$($g:tt)*] $ty:ty) => {
        rebind_identity!([$($g)*] $ty);

        impl<$($g)*> Decay for $ty {
            type Decayed = Self;
        }
    };
}

/// `InnerType` impls, one per listed index.
macro_rules! inner {
    (@one [$($g:tt)*] $ty:ty, $index:literal => $param:ty) => {
        impl<$($g)*> InnerType<$index> for $ty {
            type Type = $param;
        }
    };
    ($g:tt $ty:ty { $($index:literal => $param:ty),* $(,)? }) => {
        $(inner!(@one $g $ty, $index => $param);)*
    };
}

/// Members, `Introspect` and identity rebind for one type.
macro_rules! describe {
    (@introspect [$($g:tt)*] $ty:ty { $($name:ident),* }) => {
        ::paste::paste! {
            impl<$($g)*> Introspect for $ty {
                const TYPES: CapabilitySet = CapabilitySet::of(&[$(CapabilityName::[<$name:camel>]),*]);
            }
        }
    };
    ($g:tt $ty:ty, $lt:lifetime { $($name:ident = $member:ty),* $(,)? }) => {
        $(member!($g $ty, $lt, $name = $member);)*

        describe!(@introspect $g $ty { $($name),* });
        identity!($g $ty);
    };
}

/// Plain value types: no members, identity rebind.
macro_rules! opaque {
    ([$($g:tt)*] $ty:ty) => {
        impl<$($g)*> Introspect for $ty {
            const TYPES: CapabilitySet = CapabilitySet::EMPTY;
        }
        identity!([$($g)*] $ty);
    };
    ($($ty:ty),* $(,)?) => {
        $(opaque!([] $ty);)*
    };
}

// =============================================================================
// Primitives
// =============================================================================

opaque!(
    bool, char, str, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    Duration, Ordering,
);

macros::impl_products!(12);

// =============================================================================
// Value Wrappers
// =============================================================================

opaque!([T,] Option<T>);
opaque!([T, E,] Result<T, E>);
opaque!([T: ?Sized,] PhantomData<T>);
opaque!([T: ?Sized,] Cell<T>);
opaque!([T: ?Sized,] RefCell<T>);
opaque!([T: ?Sized,] Rc<T>);
#[cfg(target_has_atomic = "ptr")]
opaque!([T: ?Sized,] Arc<T>);
opaque!(['c, B: ?Sized + ToOwned + 'c,] Cow<'c, B>);

inner!([T,] Option<T> { 0 => T });
inner!([T, E,] Result<T, E> { 0 => T, 1 => E });
inner!([T: ?Sized,] PhantomData<T> { 0 => T });
inner!([T: ?Sized,] Cell<T> { 0 => T });
inner!([T: ?Sized,] RefCell<T> { 0 => T });
inner!([T: ?Sized,] Rc<T> { 0 => T });
#[cfg(target_has_atomic = "ptr")]
inner!([T: ?Sized,] Arc<T> { 0 => T });
inner!(['c, B: ?Sized + ToOwned + 'c,] Cow<'c, B> { 0 => B });
inner!([T: ?Sized,] Box<T> { 0 => T });

// =============================================================================
// Contiguous Sequences
// =============================================================================

describe!([T,] Vec<T>, 'a {
    value_type = T,
    reference = &'a mut T,
    const_reference = &'a T,
    pointer = *mut T,
    const_pointer = *const T,
    iterator = core::slice::IterMut<'a, T>,
    const_iterator = core::slice::Iter<'a, T>,
    reverse_iterator = Rev<core::slice::IterMut<'a, T>>,
    const_reverse_iterator = Rev<core::slice::Iter<'a, T>>,
    size_type = usize,
    difference_type = isize,
});

describe!([T,] [T], 'a {
    value_type = T,
    reference = &'a mut T,
    const_reference = &'a T,
    pointer = *mut T,
    const_pointer = *const T,
    iterator = core::slice::IterMut<'a, T>,
    const_iterator = core::slice::Iter<'a, T>,
    reverse_iterator = Rev<core::slice::IterMut<'a, T>>,
    const_reverse_iterator = Rev<core::slice::Iter<'a, T>>,
    size_type = usize,
    difference_type = isize,
});

describe!([T, const N: usize,] [T; N], 'a {
    value_type = T,
    reference = &'a mut T,
    const_reference = &'a T,
    pointer = *mut T,
    const_pointer = *const T,
    iterator = core::slice::IterMut<'a, T>,
    const_iterator = core::slice::Iter<'a, T>,
    reverse_iterator = Rev<core::slice::IterMut<'a, T>>,
    const_reverse_iterator = Rev<core::slice::Iter<'a, T>>,
    size_type = usize,
    difference_type = isize,
});

// Byte view.
describe!([] String, 'a {
    value_type = u8,
    reference = &'a mut u8,
    const_reference = &'a u8,
    pointer = *mut u8,
    const_pointer = *const u8,
    iterator = core::str::Bytes<'a>,
    const_iterator = core::str::Bytes<'a>,
    reverse_iterator = Rev<core::str::Bytes<'a>>,
    const_reverse_iterator = Rev<core::str::Bytes<'a>>,
    size_type = usize,
    difference_type = isize,
});

describe!([T,] VecDeque<T>, 'a {
    value_type = T,
    reference = &'a mut T,
    const_reference = &'a T,
    pointer = *mut T,
    const_pointer = *const T,
    iterator = vec_deque::IterMut<'a, T>,
    const_iterator = vec_deque::Iter<'a, T>,
    reverse_iterator = Rev<vec_deque::IterMut<'a, T>>,
    const_reverse_iterator = Rev<vec_deque::Iter<'a, T>>,
    size_type = usize,
    difference_type = isize,
});

describe!([T,] LinkedList<T>, 'a {
    value_type = T,
    reference = &'a mut T,
    const_reference = &'a T,
    pointer = *mut T,
    const_pointer = *const T,
    iterator = linked_list::IterMut<'a, T>,
    const_iterator = linked_list::Iter<'a, T>,
    reverse_iterator = Rev<linked_list::IterMut<'a, T>>,
    const_reverse_iterator = Rev<linked_list::Iter<'a, T>>,
    size_type = usize,
    difference_type = isize,
});

// Adapter over a Vec: exposes the container, not the sequence members.
describe!([T,] BinaryHeap<T>, 'a {
    container_type = Vec<T>,
    value_type = T,
    const_reference = &'a T,
    size_type = usize,
});

inner!([T,] Vec<T> { 0 => T });
inner!([T,] [T] { 0 => T });
inner!([T, const N: usize,] [T; N] { 0 => T });
inner!([T,] VecDeque<T> { 0 => T });
inner!([T,] LinkedList<T> { 0 => T });
inner!([T,] BinaryHeap<T> { 0 => T });

// =============================================================================
// Ordered Collections
// =============================================================================

describe!([K, V,] BTreeMap<K, V>, 'a {
    key_type = K,
    mapped_type = V,
    value_type = (K, V),
    reference = (&'a K, &'a mut V),
    const_reference = (&'a K, &'a V),
    pointer = *mut (K, V),
    const_pointer = *const (K, V),
    iterator = btree_map::IterMut<'a, K, V>,
    const_iterator = btree_map::Iter<'a, K, V>,
    reverse_iterator = Rev<btree_map::IterMut<'a, K, V>>,
    const_reverse_iterator = Rev<btree_map::Iter<'a, K, V>>,
    size_type = usize,
    difference_type = isize,
});

// Keys are the values; no mapped_type, so not associative.
describe!([T,] BTreeSet<T>, 'a {
    key_type = T,
    value_type = T,
    reference = &'a T,
    const_reference = &'a T,
    pointer = *const T,
    const_pointer = *const T,
    iterator = btree_set::Iter<'a, T>,
    const_iterator = btree_set::Iter<'a, T>,
    reverse_iterator = Rev<btree_set::Iter<'a, T>>,
    const_reverse_iterator = Rev<btree_set::Iter<'a, T>>,
    size_type = usize,
    difference_type = isize,
});

inner!([K, V,] BTreeMap<K, V> { 0 => K, 1 => V });
inner!([T,] BTreeSet<T> { 0 => T });

// =============================================================================
// Hashed Collections (std)
// =============================================================================

#[cfg(feature = "std")]
mod hashed {
    use super::*;
    use std::collections::{hash_map, hash_set, HashMap, HashSet};

    // Iteration order is unspecified, so no reverse iterators.
    describe!([K, V, S,] HashMap<K, V, S>, 'a {
        key_type = K,
        mapped_type = V,
        value_type = (K, V),
        reference = (&'a K, &'a mut V),
        const_reference = (&'a K, &'a V),
        pointer = *mut (K, V),
        const_pointer = *const (K, V),
        iterator = hash_map::IterMut<'a, K, V>,
        const_iterator = hash_map::Iter<'a, K, V>,
        size_type = usize,
        difference_type = isize,
    });

    describe!([T, S,] HashSet<T, S>, 'a {
        key_type = T,
        value_type = T,
        reference = &'a T,
        const_reference = &'a T,
        pointer = *const T,
        const_pointer = *const T,
        iterator = hash_set::Iter<'a, T>,
        const_iterator = hash_set::Iter<'a, T>,
        size_type = usize,
        difference_type = isize,
    });

    inner!([K, V, S,] HashMap<K, V, S> { 0 => K, 1 => V, 2 => S });
    inner!([T, S,] HashSet<T, S> { 0 => T, 1 => S });
}

// =============================================================================
// References and Boxes: same members as the pointee
// =============================================================================

// `Box` keeps its own identity when decayed; references decay to the pointee.
macro_rules! delegate {
    ([$($g:tt)*] $ty:ty => $inner:ident) => {
        impl<$($g)* C: Capability> Member<C> for $ty
        where
            $inner: Member<C>,
        {
            type Type<'a> = <$inner as Member<C>>::Type<'a> where Self: 'a;
        }

        impl<$($g)* C: Capability> MemberValue<C> for $ty
        where
            $inner: MemberValue<C>,
        {
            const VALUE: usize = <$inner as MemberValue<C>>::VALUE;
        }

        impl<$($g)*> Introspect for $ty
        where
            $inner: Introspect,
        {
            const TYPES: CapabilitySet = <$inner as Introspect>::TYPES;
            const VALUES: CapabilitySet = <$inner as Introspect>::VALUES;
            const SLOTS: Option<usize> = <$inner as Introspect>::SLOTS;
            const CALL: crate::callable::CallShape = <$inner as Introspect>::CALL;
            const REBIND: RebindRule = RebindRule::Identity;
        }

        rebind_identity!([$($g)*] $ty);
    };
}

delegate!(['r, T: ?Sized,] &'r T => T);
delegate!(['r, T: ?Sized,] &'r mut T => T);
delegate!([T: ?Sized,] Box<T> => T);

impl<'r, T: ?Sized> Decay for &'r T {
    type Decayed = T;
}

impl<'r, T: ?Sized> Decay for &'r mut T {
    type Decayed = T;
}

impl<T: ?Sized> Decay for Box<T> {
    type Decayed = Self;
}
