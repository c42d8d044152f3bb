//! # Template Rebinder
//!
//! Derive the counterpart of a parametrized entity for a new inner type.
//! First matching rule wins:
//!
//! 1. [`DefaultDelete<T>`] (and `DefaultDelete<[T]>`) becomes `DefaultDelete<To>`;
//! 2. a type declaring `rebind` becomes its [`Rebindable::Other<To>`];
//! 3. anything else is unchanged.
//!
//! ```
//! use tola_shape::prelude::*;
//!
//! #[derive(Introspect)]
//! #[introspect(rebind)]
//! struct Arena<T>(Vec<T>);
//!
//! impl<T> Rebindable for Arena<T> {
//!     type Other<U> = Arena<U>;
//! }
//!
//! assert!(same_type::<Rebound<DefaultDelete<u8>, str>, DefaultDelete<str>>());
//! assert!(same_type::<Rebound<Arena<u8>, u64>, Arena<u64>>());
//! assert!(same_type::<Rebound<i32, u64>, i32>());
//! assert_eq!(rebind_rule::<Arena<u8>>(), RebindRule::Declared);
//! ```

use core::fmt;
use core::marker::PhantomData;

use alloc::boxed::Box;

use crate::detect::{CapabilitySet, Decay, InnerType, Introspect};

/// The canonical deleter: dropping a `Box<T>`.
pub struct DefaultDelete<T: ?Sized>(PhantomData<fn(Box<T>)>);

impl<T: ?Sized> DefaultDelete<T> {
    pub const fn new() -> Self {
        DefaultDelete(PhantomData)
    }

    /// Release `value`.
    pub fn delete(&self, value: Box<T>) {
        drop(value);
    }
}

impl<T: ?Sized> Default for DefaultDelete<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for DefaultDelete<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for DefaultDelete<T> {}

impl<T: ?Sized> fmt::Debug for DefaultDelete<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DefaultDelete<{}>", core::any::type_name::<T>())
    }
}

/// A type that names its own rebinding.
pub trait Rebindable {
    type Other<U>;
}

/// `Self` re-parametrized by `To`.
pub trait Rebind<To: ?Sized> {
    type Out: ?Sized;
}

/// `T` rebound to `To`.
pub type Rebound<T, To> = <T as Rebind<To>>::Out;

impl<T: ?Sized, To: ?Sized> Rebind<To> for DefaultDelete<T> {
    type Out = DefaultDelete<To>;
}

impl<T: ?Sized> Introspect for DefaultDelete<T> {
    const TYPES: CapabilitySet = CapabilitySet::EMPTY;
    const REBIND: RebindRule = RebindRule::DefaultDeleter;
}

impl<T: ?Sized> Decay for DefaultDelete<T> {
    type Decayed = Self;
}

impl<T: ?Sized> InnerType<0> for DefaultDelete<T> {
    type Type = T;
}

/// Which rebind rule applies to a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RebindRule {
    DefaultDeleter,
    Declared,
    Identity,
}

impl RebindRule {
    /// First matching rule, in priority order.
    pub const fn select(is_default_deleter: bool, has_rebind: bool) -> Self {
        if is_default_deleter {
            RebindRule::DefaultDeleter
        } else if has_rebind {
            RebindRule::Declared
        } else {
            RebindRule::Identity
        }
    }
}

pub const fn rebind_rule<T: Introspect + ?Sized>() -> RebindRule {
    T::REBIND
}
