//! # Predicate Algebra
//!
//! Boolean composition over type predicates. A predicate is any type
//! implementing [`Predicate<T>`]; the combinators below work on every
//! predicate, including ones defined outside this crate:
//!
//! ```
//! use tola_shape::predicate::{holds, Not, Predicate};
//!
//! struct IsWide;
//! impl<T> Predicate<T> for IsWide {
//!     const VALUE: bool = core::mem::size_of::<T>() > 4;
//! }
//!
//! assert!(holds::<IsWide, u64>());
//! assert!(holds::<Not<IsWide>, u8>());
//! assert!(holds::<Not<Not<IsWide>>, u64>());
//! ```

use core::marker::PhantomData;

use crate::detect::{has_member, has_typedef, Capability, Introspect};

/// A boolean question about `T`, answered at compile time.
pub trait Predicate<T: ?Sized> {
    const VALUE: bool;
}

/// Evaluate predicate `P` for `T`.
#[inline(always)]
pub const fn holds<P: Predicate<T>, T: ?Sized>() -> bool {
    <P as Predicate<T>>::VALUE
}

/// Negation of `P`.
pub struct Not<P>(PhantomData<P>);

impl<T: ?Sized, P: Predicate<T>> Predicate<T> for Not<P> {
    const VALUE: bool = !<P as Predicate<T>>::VALUE;
}

/// Conjunction of `P` and `Q`.
pub struct And<P, Q>(PhantomData<(P, Q)>);

impl<T: ?Sized, P: Predicate<T>, Q: Predicate<T>> Predicate<T> for And<P, Q> {
    const VALUE: bool = <P as Predicate<T>>::VALUE && <Q as Predicate<T>>::VALUE;
}

/// Disjunction of `P` and `Q`.
pub struct Or<P, Q>(PhantomData<(P, Q)>);

impl<T: ?Sized, P: Predicate<T>, Q: Predicate<T>> Predicate<T> for Or<P, Q> {
    const VALUE: bool = <P as Predicate<T>>::VALUE || <Q as Predicate<T>>::VALUE;
}

/// Member-style detection lifted to a predicate.
pub struct Has<C>(PhantomData<C>);

impl<T: Introspect + ?Sized, C: Capability> Predicate<T> for Has<C> {
    const VALUE: bool = has_member::<T>(C::NAME);
}

/// Typedef-style detection lifted to a predicate.
pub struct HasTypedef<C>(PhantomData<C>);

impl<T: Introspect + ?Sized, C: Capability> Predicate<T> for HasTypedef<C> {
    const VALUE: bool = has_typedef::<T>(C::NAME);
}
