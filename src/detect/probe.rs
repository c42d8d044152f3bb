//! Structural probes for concrete types.
//!
//! Every macro here is built on the "inherent const fallback" pattern:
//!
//! 1. a fallback trait supplies `const HOLDS: bool = false` for every type;
//! 2. an inherent impl, bounded on the probed trait, supplies `HOLDS = true`;
//! 3. `<__Probe<Concrete>>::HOLDS` picks the inherent const when the bound
//!    holds and the trait const otherwise.
//!
//! A missing capability therefore reads as `false` instead of a build
//! failure. Only concrete types are supported: inside `fn f<T>()` the bound
//! cannot be decided and the fallback always wins.

/// Core probe: does `$T` satisfy the bound?
#[doc(hidden)]
#[macro_export]
macro_rules! __probe {
    ($T:ty => $($bound:tt)+) => {{
        struct __Probe<T: ?Sized>(::core::marker::PhantomData<T>);

        trait __Fallback {
            const HOLDS: bool = false;
        }
        impl<T: ?Sized> __Fallback for __Probe<T> {}

        impl<T: ?Sized + $($bound)+> __Probe<T> {
            #[allow(dead_code)]
            const HOLDS: bool = true;
        }

        <__Probe<$T>>::HOLDS
    }};
}

/// Type equality with the same fallback. Both types stay in expression
/// position, so elided reference lifetimes are accepted.
#[doc(hidden)]
#[macro_export]
macro_rules! __same_type {
    ($A:ty, $B:ty) => {{
        struct __Probe<A: ?Sized, B: ?Sized>(
            ::core::marker::PhantomData<A>,
            ::core::marker::PhantomData<B>,
        );

        trait __Fallback {
            const HOLDS: bool = false;
        }
        impl<A: ?Sized, B: ?Sized> __Fallback for __Probe<A, B> {}

        impl<T: ?Sized> __Probe<T, T> {
            #[allow(dead_code)]
            const HOLDS: bool = true;
        }

        <__Probe<$A, $B>>::HOLDS
    }};
}

/// Typedef-style probe: does `$T` declare a nested alias `$name`?
///
/// ```
/// use tola_shape::{has_typedef, DefaultDelete};
///
/// assert!(has_typedef!(Vec<u8>, value_type));
/// assert!(!has_typedef!(Vec<u8>, key_type));
/// assert!(has_typedef!(fn(i32) -> i32, function_type));
/// assert!(!has_typedef!(DefaultDelete<u8>, rebind));
/// ```
///
/// A bare fn pointer always exposes its own `function_type`, including
/// higher-ranked ones such as `fn(&str) -> usize`:
///
/// ```
/// use tola_shape::has_typedef;
///
/// assert!(has_typedef!(fn(&str) -> usize, function_type));
/// assert!(has_typedef!(fn(&[u8]), function_type));
/// ```
///
/// Misspelled names do not exist and fail to build:
///
/// ```compile_fail
/// use tola_shape::has_typedef;
///
/// let _ = has_typedef!(Vec<u8>, valu_type);
/// ```
#[macro_export]
macro_rules! has_typedef {
    (fn $params:tt $(-> $ret:ty)?, function_type) => {
        $crate::__probe!((fn $params $(-> $ret)?) => Fn $params $(-> $ret)?)
    };
    ($T:ty, rebind) => {
        $crate::__probe!($T => $crate::Rebindable)
    };
    ($T:ty, $name:ident) => {
        $crate::paste::paste! {
            $crate::__probe!($T => $crate::Member<$crate::cap::[<$name:camel>]>)
        }
    };
}

/// Member-style probe: does `$T` declare a nested alias *or* a named value
/// called `$name`?
///
/// ```
/// use tola_shape::has_member;
///
/// assert!(has_member!(Vec<u8>, iterator));
/// assert!(has_member!(std::collections::BTreeMap<u8, u8>, mapped_type));
/// assert!(!has_member!(u8, value_type));
/// ```
///
/// ```compile_fail
/// use tola_shape::has_member;
///
/// let _ = has_member!(Vec<i32>, valu_type);
/// ```
#[macro_export]
macro_rules! has_member {
    (fn $params:tt $(-> $ret:ty)?, function_type) => {
        $crate::has_typedef!(fn $params $(-> $ret)?, function_type)
    };
    ($T:ty, rebind) => {
        $crate::has_typedef!($T, rebind)
    };
    ($T:ty, $name:ident) => {
        $crate::paste::paste! {
            $crate::__probe!($T => $crate::Member<$crate::cap::[<$name:camel>]>)
                || $crate::__probe!($T => $crate::MemberValue<$crate::cap::[<$name:camel>]>)
        }
    };
}

/// Can a value of `$T` be written to a formatter?
///
/// ```
/// use tola_shape::can_insert;
///
/// assert!(can_insert!(i32));
/// assert!(can_insert!(str));
/// assert!(!can_insert!(Vec<i32>));
/// ```
#[macro_export]
macro_rules! can_insert {
    ($T:ty) => {
        $crate::__probe!($T => ::core::fmt::Display)
    };
}

/// Can a value of `$T` be read back from text?
///
/// ```
/// use tola_shape::can_extract;
///
/// assert!(can_extract!(i32));
/// assert!(can_extract!(String));
/// assert!(!can_extract!(str));
/// ```
#[macro_export]
macro_rules! can_extract {
    ($T:ty) => {
        $crate::__probe!($T => ::core::str::FromStr)
    };
}

/// Is `$T` callable with exactly the signature `$sig`?
///
/// ```
/// use tola_shape::is_callable_as;
///
/// assert!(is_callable_as!(fn(i32) -> i32, fn(i32) -> i32));
/// assert!(!is_callable_as!(fn(i32) -> i32, fn(u8) -> i32));
/// assert!(!is_callable_as!(String, fn() -> ()));
/// ```
#[macro_export]
macro_rules! is_callable_as {
    ($T:ty, $sig:ty) => {
        $crate::__probe!($T => $crate::CallOperator<$sig>)
    };
}

/// Can `$F` be called with arguments of types `$A..`, whatever it returns?
///
/// Reference arguments need a named lifetime; `&'static str` also matches
/// callables taking `&str` for any lifetime.
///
/// ```
/// use tola_shape::is_callable_with;
///
/// assert!(is_callable_with!(fn(i32, i32) -> i64; i32, i32));
/// assert!(is_callable_with!(fn(&str) -> usize; &'static str));
/// assert!(is_callable_with!(Box<dyn Fn(u8)>; u8));
/// assert!(!is_callable_with!(fn(i32) -> i64; u8));
/// assert!(!is_callable_with!(fn(i32) -> i64;));
/// assert!(!is_callable_with!(String; u8));
/// ```
#[macro_export]
macro_rules! is_callable_with {
    ($F:ty; $($A:ty),* $(,)?) => {
        $crate::__probe!($F => $crate::CallableWith<($($A,)*)>)
    };
}

/// Is `$T` a boxed call operator (`Box<dyn Fn(..) -> R>`, optionally
/// `Send`/`Sync`)?
///
/// ```
/// use tola_shape::is_boxed_fn;
///
/// assert!(is_boxed_fn!(Box<dyn Fn(u8) -> bool>));
/// assert!(is_boxed_fn!(Box<dyn Fn() + Send + Sync>));
/// assert!(!is_boxed_fn!(fn(u8) -> bool));
/// assert!(!is_boxed_fn!(Box<u8>));
/// ```
#[macro_export]
macro_rules! is_boxed_fn {
    ($T:ty) => {
        $crate::__probe!($T => $crate::BoxedFn)
    };
}

/// Would constructing a `$T` from the arguments `$U..` be a copy?
///
/// True only for exactly one argument whose type equals `$T` once a level of
/// `&` / `&mut` is stripped from both. Every type involved must implement
/// [`Decay`](crate::Decay).
///
/// ```
/// use tola_shape::{is_copy_constructing, is_not_copy_constructing};
///
/// assert!(is_copy_constructing!(String; &String));
/// assert!(is_copy_constructing!(&mut Vec<u8>; Vec<u8>));
/// assert!(!is_copy_constructing!(String; &str));
/// assert!(!is_copy_constructing!(String; String, String));
/// assert!(!is_copy_constructing!(String;));
/// assert!(is_not_copy_constructing!(String; u8));
/// ```
#[macro_export]
macro_rules! is_copy_constructing {
    ($T:ty; $U:ty $(,)?) => {
        $crate::__same_type!($crate::Decayed<$T>, $crate::Decayed<$U>)
    };
    ($T:ty; $($U:ty),*) => {
        false
    };
}

#[macro_export]
macro_rules! is_not_copy_constructing {
    ($T:ty; $($U:ty),* $(,)?) => {
        !$crate::is_copy_constructing!($T; $($U),*)
    };
}

/// All nine sequence members, probed structurally.
///
/// ```
/// use tola_shape::is_sequence_like;
///
/// assert!(is_sequence_like!(Vec<u8>));
/// assert!(!is_sequence_like!(std::collections::BinaryHeap<u8>));
/// ```
#[macro_export]
macro_rules! is_sequence_like {
    ($T:ty) => {
        $crate::has_member!($T, value_type)
            && $crate::has_member!($T, reference)
            && $crate::has_member!($T, const_reference)
            && $crate::has_member!($T, iterator)
            && $crate::has_member!($T, const_iterator)
            && $crate::has_member!($T, pointer)
            && $crate::has_member!($T, const_pointer)
            && $crate::has_member!($T, size_type)
            && $crate::has_member!($T, difference_type)
    };
}

/// Sequence-like plus `key_type` and `mapped_type`.
#[macro_export]
macro_rules! is_associative_like {
    ($T:ty) => {
        $crate::is_sequence_like!($T)
            && $crate::has_member!($T, key_type)
            && $crate::has_member!($T, mapped_type)
    };
}
