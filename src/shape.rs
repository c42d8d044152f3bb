//! # Shape Classifier
//!
//! Named structural categories built from the detector and the predicate
//! algebra. The categories are independent boolean questions; [`classify`]
//! folds them into one [`Classification`] for callers that want a single
//! answer.
//!
//! ```
//! use std::collections::BTreeMap;
//! use tola_shape::prelude::*;
//!
//! assert!(holds::<IsSequenceLike, Vec<u8>>());
//! assert!(holds::<IsAssociativeLike, BTreeMap<u8, u8>>());
//! assert!(holds::<IsPairLike, (u8, char)>());
//! assert_eq!(classify::<(u8, u8, u8)>().shape, ShapeClass::Tuple);
//! ```

use core::fmt;

use crate::callable::CallShape;
use crate::detect::{cap, members, CapabilityName, CapabilitySet, Introspect};
use crate::predicate::{And, Has, HasTypedef, Predicate};
use crate::rebind::RebindRule;

/// The nine members every sequence-like type exposes.
pub const SEQUENCE_MEMBERS: CapabilitySet = CapabilitySet::of(&[
    CapabilityName::ValueType,
    CapabilityName::Reference,
    CapabilityName::ConstReference,
    CapabilityName::Iterator,
    CapabilityName::ConstIterator,
    CapabilityName::Pointer,
    CapabilityName::ConstPointer,
    CapabilityName::SizeType,
    CapabilityName::DifferenceType,
]);

/// All of [`SEQUENCE_MEMBERS`]; any single absence disqualifies.
pub struct IsSequenceLike;

impl<T: Introspect + ?Sized> Predicate<T> for IsSequenceLike {
    const VALUE: bool = members::<T>().contains_all(SEQUENCE_MEMBERS);
}

/// Sequence-like plus `key_type` and `mapped_type`.
pub type IsAssociativeLike = And<IsSequenceLike, And<Has<cap::KeyType>, Has<cap::MappedType>>>;

/// A product type with any slot count other than two.
pub struct IsTupleLike;

impl<T: Introspect + ?Sized> Predicate<T> for IsTupleLike {
    const VALUE: bool = matches!(T::SLOTS, Some(n) if n != 2);
}

/// A product type with exactly two slots.
pub struct IsPairLike;

impl<T: Introspect + ?Sized> Predicate<T> for IsPairLike {
    const VALUE: bool = matches!(T::SLOTS, Some(2));
}

/// Callable in any shape, including ones whose signature is indeterminate.
pub struct IsCallable;

impl<T: Introspect + ?Sized> Predicate<T> for IsCallable {
    const VALUE: bool = !matches!(T::CALL, CallShape::NotCallable);
}

/// Exactly one resolvable call operator.
pub struct HasCallOperator;

impl<T: Introspect + ?Sized> Predicate<T> for HasCallOperator {
    const VALUE: bool = matches!(T::CALL, CallShape::Operator);
}

pub struct IsDefaultDeleter;

impl<T: Introspect + ?Sized> Predicate<T> for IsDefaultDeleter {
    const VALUE: bool = matches!(T::REBIND, RebindRule::DefaultDeleter);
}

pub type HasRebind = HasTypedef<cap::Rebind>;

/// Structural category of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeClass {
    None,
    Sequence,
    /// Refines `Sequence`.
    Associative,
    Tuple,
    Pair,
}

impl ShapeClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            ShapeClass::None => "none",
            ShapeClass::Sequence => "sequence",
            ShapeClass::Associative => "associative",
            ShapeClass::Tuple => "tuple",
            ShapeClass::Pair => "pair",
        }
    }
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape plus the independent callable dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub shape: ShapeClass,
    pub callable: bool,
}

impl Classification {
    /// True for associative types as well.
    pub const fn is_sequence_like(&self) -> bool {
        matches!(self.shape, ShapeClass::Sequence | ShapeClass::Associative)
    }

    pub const fn is_associative_like(&self) -> bool {
        matches!(self.shape, ShapeClass::Associative)
    }

    pub const fn is_tuple_like(&self) -> bool {
        matches!(self.shape, ShapeClass::Tuple)
    }

    pub const fn is_pair_like(&self) -> bool {
        matches!(self.shape, ShapeClass::Pair)
    }

    pub const fn is_callable(&self) -> bool {
        self.callable
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.callable {
            write!(f, "{}, callable", self.shape)
        } else {
            write!(f, "{}", self.shape)
        }
    }
}

/// Classify `T`. Associative is tested before sequence.
pub const fn classify<T: Introspect + ?Sized>() -> Classification {
    let shape = if <IsAssociativeLike as Predicate<T>>::VALUE {
        ShapeClass::Associative
    } else if <IsSequenceLike as Predicate<T>>::VALUE {
        ShapeClass::Sequence
    } else if <IsPairLike as Predicate<T>>::VALUE {
        ShapeClass::Pair
    } else if <IsTupleLike as Predicate<T>>::VALUE {
        ShapeClass::Tuple
    } else {
        ShapeClass::None
    };
    Classification {
        shape,
        callable: <IsCallable as Predicate<T>>::VALUE,
    }
}
