#![cfg_attr(not(feature = "std"), no_std)]

// Feature flags handled:
// - std: default, enables the registry and the hashed std collections

//! # tola-shape
//!
//! Static type-capability introspection: branch on the *structural shape*
//! of a type instead of a declared category.
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  Layer 0: Capability Detector (detect)                            |
//! |  - CapabilityName, cap markers, Member / MemberValue, Introspect  |
//! |  - probe macros: has_member!, has_typedef!, can_insert!, ...      |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 1: Predicate Algebra (predicate)                           |
//! |  - Predicate<T>, Not, And, Or, Has, HasTypedef                    |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 2: Shape / Callable / Rebind                               |
//! |  - IsSequenceLike, IsAssociativeLike, IsTupleLike, IsPairLike     |
//! |  - Callable, Signature, DropLeading, signature_of                 |
//! |  - Rebind, Rebindable, DefaultDelete                              |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 3: Registry (std)                                          |
//! |  - TypeInfo, Registry, global install                             |
//! +-------------------------------------------------------------------+
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tola_shape::prelude::*;
//!
//! #[derive(Introspect)]
//! #[introspect(key_type = K, mapped_type = V, value_type = (K, V))]
//! #[introspect(reference = &'a mut (K, V), const_reference = &'a (K, V))]
//! #[introspect(pointer = *mut (K, V), const_pointer = *const (K, V))]
//! #[introspect(iterator = std::slice::IterMut<'a, (K, V)>)]
//! #[introspect(const_iterator = std::slice::Iter<'a, (K, V)>)]
//! #[introspect(size_type = usize, difference_type = isize)]
//! struct FlatMap<K, V>(Vec<(K, V)>);
//!
//! assert!(holds::<IsAssociativeLike, FlatMap<u8, String>>());
//! assert_eq!(classify::<FlatMap<u8, u8>>().shape, ShapeClass::Associative);
//!
//! let sig = signature_of(&|name: String| name.len());
//! assert_eq!(sig.arity(), 1);
//! ```
//!
//! Declarations are checked when the derive expands; a misspelled key is a
//! build error:
//!
//! ```compile_fail
//! use tola_shape::Introspect;
//!
//! #[derive(Introspect)]
//! #[introspect(valu_type = u8)]
//! struct Typo;
//! ```

// Allow `::tola_shape` to work inside the crate itself
extern crate self as tola_shape;

extern crate alloc;

// Re-export paste for the probe macros
pub use paste;

// =============================================================================
// Layer 0: Capability Detector
// =============================================================================
pub mod detect;

pub mod error;

// =============================================================================
// Layer 1: Predicate Algebra
// =============================================================================
pub mod predicate;

// =============================================================================
// Layer 2: Shape Classifier, Callable Normalizer, Template Rebinder
// =============================================================================
pub mod callable;
pub mod rebind;
pub mod shape;

mod std_impls;

// =============================================================================
// Layer 3: Registry
// =============================================================================
#[cfg(feature = "std")]
pub mod registry;

// =============================================================================
// Re-exports at Crate Root
// =============================================================================

pub use callable::{
    arity, signature_of, BoxedFn, CallOperator, CallShape, Callable, CallableWith, DropLeading,
    FunctionType, ParamsOf, Partial, ReturnType, Signature, SignatureInfo, SignatureOf,
};
pub use detect::{
    cap, has, has_member, has_typedef, members, same_decayed, same_type, Capability,
    CapabilityName, CapabilitySet, Decay, Decayed, Family, InnerType, InnerTypeOf, Introspect,
    Member, MemberOf, MemberValue,
};
pub use error::IntrospectError;
pub use predicate::{holds, And, Has, HasTypedef, Not, Or, Predicate};
pub use rebind::{rebind_rule, DefaultDelete, Rebind, RebindRule, Rebindable, Rebound};
pub use shape::{
    classify, Classification, HasCallOperator, HasRebind, IsAssociativeLike, IsCallable,
    IsDefaultDeleter, IsPairLike, IsSequenceLike, IsTupleLike, ShapeClass, SEQUENCE_MEMBERS,
};

// Re-export the derive
pub use macros::Introspect;

#[doc(hidden)]
pub mod __private {
    pub use alloc::boxed::Box;
    pub use alloc::vec::Vec;
}

/// Common items for structural dispatch.
pub mod prelude {
    pub use crate::callable::{
        arity, signature_of, CallOperator, Callable, CallableWith, FunctionType, ParamsOf, Partial,
        ReturnType, Signature,
    };
    pub use crate::detect::{
        cap, has_member, has_typedef, members, same_decayed, same_type, CapabilityName, Decay,
        InnerType, InnerTypeOf, Introspect, Member, MemberValue,
    };
    pub use crate::predicate::{holds, And, Has, Not, Or, Predicate};
    pub use crate::rebind::{rebind_rule, DefaultDelete, Rebind, RebindRule, Rebindable, Rebound};
    pub use crate::shape::{
        classify, IsAssociativeLike, IsCallable, IsPairLike, IsSequenceLike, IsTupleLike,
        ShapeClass,
    };
    pub use macros::Introspect;
    // has_member!, can_insert!, ... are #[macro_export] so they're at crate root
}
