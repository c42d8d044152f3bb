//! # Capability Detector
//!
//! The primitive every other component is built from: "does type `T` expose
//! feature `F`".
//!
//! A feature is either a nested type alias ([`Member`]) or a nested named
//! value ([`MemberValue`]). Types take part by registering through
//! [`Introspect`], usually with `#[derive(Introspect)]`:
//!
//! ```
//! use tola_shape::prelude::*;
//!
//! #[derive(Introspect)]
//! #[introspect(value_type = u8, size_type = usize)]
//! struct Buffer;
//!
//! assert!(has_member::<Buffer>(CapabilityName::ValueType));
//! assert!(!has_member::<Buffer>(CapabilityName::KeyType));
//! ```
//!
//! Two detector families exist:
//!
//! - **typedef-style** ([`has_typedef`]): only a nested alias counts;
//! - **member-style** ([`has_member`]): a nested alias or a named value.
//!
//! For concrete types the probe macros ([`has_member!`](crate::has_member),
//! [`has_typedef!`](crate::has_typedef)) test the `Member` impls directly,
//! with no `Introspect` registration needed.

mod markers;
mod probe;
mod set;

pub use markers::{cap, Capability, CapabilityName, Family};
pub use set::CapabilitySet;

use core::any::TypeId;

use crate::callable::CallShape;
use crate::rebind::RebindRule;

/// A nested type alias named by capability `C`.
///
/// The alias is lifetime-generic so borrowed members (`reference`,
/// `iterator`) can be expressed:
///
/// ```
/// use tola_shape::{cap, Member};
///
/// struct Bytes(Vec<u8>);
///
/// impl Member<cap::Reference> for Bytes {
///     type Type<'a> = &'a u8 where Self: 'a;
/// }
/// ```
pub trait Member<C: Capability> {
    type Type<'a>: ?Sized
    where
        Self: 'a;
}

/// A nested named value (`arity_value`).
pub trait MemberValue<C: Capability> {
    const VALUE: usize;
}

/// The alias a type declares for capability `C`.
pub type MemberOf<'a, T, C> = <T as Member<C>>::Type<'a>;

/// The `I`-th type parameter of a generic type, counting from zero.
///
/// ```
/// use std::collections::BTreeMap;
/// use tola_shape::{same_type, InnerTypeOf};
///
/// assert!(same_type::<InnerTypeOf<Vec<u8>, 0>, u8>());
/// assert!(same_type::<InnerTypeOf<BTreeMap<u8, String>, 1>, String>());
/// ```
///
/// ```compile_fail
/// use tola_shape::InnerTypeOf;
///
/// let _: Option<InnerTypeOf<Vec<u8>, 1>> = None;
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` has no type parameter at the requested index",
    note = "indices count type parameters from zero; lifetimes and const parameters are skipped"
)]
pub trait InnerType<const I: usize> {
    type Type: ?Sized;
}

pub type InnerTypeOf<T, const I: usize> = <T as InnerType<I>>::Type;

/// `Self` with one level of `&` / `&mut` removed.
///
/// Every registered type decays to itself; references decay to their
/// pointee.
pub trait Decay {
    type Decayed: ?Sized;
}

pub type Decayed<T> = <T as Decay>::Decayed;

/// Registration of a type with the introspection engine.
///
/// Every const has a default except `TYPES`, so a plain value type is just
/// `impl Introspect for X { const TYPES: CapabilitySet = CapabilitySet::EMPTY; }`.
pub trait Introspect {
    /// Capabilities declared as nested type aliases.
    const TYPES: CapabilitySet;

    /// Capabilities declared as nested named values.
    const VALUES: CapabilitySet = CapabilitySet::EMPTY;

    /// Slot count for product types (tuples). `None` for everything else.
    const SLOTS: Option<usize> = None;

    /// How a signature is resolved for this type, if it is callable.
    const CALL: CallShape = CallShape::NotCallable;

    /// Which rebind rule applies.
    const REBIND: RebindRule =
        RebindRule::select(false, Self::TYPES.contains(CapabilityName::Rebind));
}

/// Every capability `T` exposes, aliases and named values together.
pub const fn members<T: Introspect + ?Sized>() -> CapabilitySet {
    T::TYPES.union(T::VALUES)
}

/// Member-style probe: a nested alias or a named value.
pub const fn has_member<T: Introspect + ?Sized>(name: CapabilityName) -> bool {
    members::<T>().contains(name)
}

/// Typedef-style probe: a nested alias only.
pub const fn has_typedef<T: Introspect + ?Sized>(name: CapabilityName) -> bool {
    T::TYPES.contains(name)
}

/// Member-style probe by marker type.
pub const fn has<T: Introspect + ?Sized, C: Capability>() -> bool {
    has_member::<T>(C::NAME)
}

/// Structural identity of two type descriptors.
pub fn same_type<A: ?Sized + 'static, B: ?Sized + 'static>() -> bool {
    TypeId::of::<A>() == TypeId::of::<B>()
}

/// `A` and `B` are the same type once references are stripped.
pub fn same_decayed<A, B>() -> bool
where
    A: Decay + ?Sized,
    B: Decay + ?Sized,
    A::Decayed: 'static,
    B::Decayed: 'static,
{
    same_type::<A::Decayed, B::Decayed>()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Declared;

    impl Member<cap::ValueType> for Declared {
        type Type<'a> = u32 where Self: 'a;
    }

    impl MemberValue<cap::ArityValue> for Declared {
        const VALUE: usize = 3;
    }

    impl Introspect for Declared {
        const TYPES: CapabilitySet = CapabilitySet::of(&[CapabilityName::ValueType]);
        const VALUES: CapabilitySet = CapabilitySet::of(&[CapabilityName::ArityValue]);
    }

    #[test]
    fn test_member_vs_typedef_family() {
        assert!(has_member::<Declared>(CapabilityName::ArityValue));
        assert!(!has_typedef::<Declared>(CapabilityName::ArityValue));
        assert!(has_typedef::<Declared>(CapabilityName::ValueType));
        assert!(has::<Declared, cap::ValueType>());
        assert!(!has::<Declared, cap::KeyType>());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Declared::SLOTS, None);
        assert_eq!(Declared::CALL, CallShape::NotCallable);
        assert_eq!(Declared::REBIND, RebindRule::Identity);
        assert_eq!(<Declared as MemberValue<cap::ArityValue>>::VALUE, 3);
    }

    #[test]
    fn test_same_decayed() {
        assert!(same_decayed::<&'static u8, u8>());
        assert!(same_decayed::<&'static mut u8, &'static u8>());
        assert!(!same_decayed::<&'static &'static u8, u8>());
        assert!(!same_decayed::<u8, i8>());
    }

    #[test]
    fn test_member_alias() {
        assert!(same_type::<MemberOf<'static, Declared, cap::ValueType>, u32>());
        assert!(!same_type::<u32, i32>());
    }
}
