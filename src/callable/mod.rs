//! # Callable Normalizer
//!
//! Reduces every callable shape to one canonical [`Signature`]:
//!
//! | shape                              | how the signature is found          |
//! |------------------------------------|-------------------------------------|
//! | type declaring `function_type`     | the declared alias, as-is           |
//! | one call operator (`dyn Fn`, derive `call = ..`) | that operator's signature |
//! | fn pointer, `&F`, `Box<F>`          | its own signature                   |
//! | closure, fn item                    | inferred by [`signature_of`]        |
//!
//! A type with more than one call operator has no [`Callable`] impl, so
//! asking for its signature fails to build rather than picking an overload:
//!
//! ```compile_fail
//! use tola_shape::{arity, Introspect};
//!
//! #[derive(Introspect)]
//! #[introspect(call = fn(i32) -> i32, call = fn(&'static str) -> i32)]
//! struct Overloaded;
//!
//! let _ = arity::<Overloaded>();
//! ```
//!
//! ```compile_fail
//! use tola_shape::{signature_of, Introspect};
//!
//! #[derive(Introspect)]
//! #[introspect(call = fn(i32) -> i32, call = fn(u8) -> u8)]
//! struct Overloaded;
//!
//! let _ = signature_of(&Overloaded);
//! ```

mod signature;

pub use signature::{DropLeading, Partial, Signature, SignatureInfo, SignatureOf};

use alloc::boxed::Box;

/// How a type's signature is resolved. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallShape {
    NotCallable,
    /// The type declares `function_type`.
    Declared,
    /// Exactly one call operator.
    Operator,
    /// This many call operators; the signature is indeterminate.
    Overloaded(usize),
    /// A fn pointer.
    Function,
}

/// `Self` can be called with signature `S`.
///
/// Implemented for every `F: Fn(A0, ..) -> R`, so closures, fn items, fn
/// pointers and `dyn Fn` all qualify, and for types deriving `Introspect`
/// with a `call = fn(..) -> R` entry.
pub trait CallOperator<S: Signature> {}

/// `Self` accepts the argument tuple `Args`, whatever it returns.
///
/// Implemented for every `F: Fn(A0, ..) -> R` and for each distinct
/// parameter list a deriving type declares with `call = fn(..) -> R`.
pub trait CallableWith<Args> {}

/// A boxed call operator, `Box<dyn Fn(..) -> R>` with or without
/// `Send`/`Sync`.
pub trait BoxedFn: Callable {}

/// A nameable callable with exactly one signature.
#[diagnostic::on_unimplemented(
    message = "cannot normalize the signature of `{Self}`",
    label = "no single signature for this type",
    note = "declare `function_type`, or exactly one `call` operator; types with several call operators are indeterminate"
)]
pub trait Callable {
    type Signature: Signature;

    /// Parameter count, unless the type declares `arity_value`.
    const ARITY: usize = <Self::Signature as Signature>::ARITY;
}

/// The canonical signature of `F`.
pub type FunctionType<F> = <F as Callable>::Signature;

pub type ReturnType<F> = <<F as Callable>::Signature as Signature>::Return;

pub type ParamsOf<F> = <<F as Callable>::Signature as Signature>::Params;

/// Arity of `F`, with a declared `arity_value` taking precedence.
pub const fn arity<F: Callable + ?Sized>() -> usize {
    F::ARITY
}

/// Infer the single signature of a callable value.
///
/// ```
/// use tola_shape::signature_of;
///
/// let sig = signature_of(&|s: String| s.is_empty());
/// assert_eq!(sig.arity(), 1);
/// assert!(sig.returns::<bool>());
/// ```
pub const fn signature_of<F, S>(_: &F) -> SignatureOf<S>
where
    F: CallOperator<S> + ?Sized,
    S: Signature,
{
    SignatureOf::new()
}

impl<F: Callable + ?Sized> Callable for &F {
    type Signature = F::Signature;
    const ARITY: usize = F::ARITY;
}

impl<F: Callable + ?Sized> Callable for &mut F {
    type Signature = F::Signature;
    const ARITY: usize = F::ARITY;
}

impl<F: Callable + ?Sized> Callable for Box<F> {
    type Signature = F::Signature;
    const ARITY: usize = F::ARITY;
}

macros::impl_signatures!(12);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{same_type, Introspect};

    fn add(a: i32, b: i32) -> i32 {
        a + b
    }

    #[test]
    fn test_fn_pointer() {
        type F = fn(i32, i32) -> i32;
        assert_eq!(arity::<F>(), 2);
        assert!(same_type::<ReturnType<F>, i32>());
        assert!(same_type::<ParamsOf<F>, (i32, i32)>());
        assert_eq!(F::CALL, CallShape::Function);
    }

    #[test]
    fn test_fn_item_infers() {
        let sig = signature_of(&add);
        assert_eq!(sig.arity(), 2);
        assert!(sig.takes::<(i32, i32)>());
    }

    #[test]
    fn test_dyn_fn() {
        type D = dyn Fn(u8) -> u16;
        assert_eq!(arity::<D>(), 1);
        assert_eq!(<D as Introspect>::CALL, CallShape::Operator);
        assert_eq!(arity::<Box<dyn Fn(u8, u8) -> u16 + Send + Sync>>(), 2);
        assert_eq!(arity::<&fn()>(), 0);
    }

    fn accepts<Args, F: CallableWith<Args>>(_: &F) -> bool {
        true
    }

    #[test]
    fn test_callable_with_ignores_return() {
        assert!(accepts::<(i32, i32), _>(&add));
        assert!(accepts::<(&'static str,), _>(&|s: &str| s.len()));
        assert!(accepts::<(), _>(&|| ()));
    }

    #[test]
    fn test_boxed_fn() {
        fn boxed<F: BoxedFn + ?Sized>() -> usize {
            F::ARITY
        }
        assert_eq!(boxed::<Box<dyn Fn(u8) -> u8>>(), 1);
        assert_eq!(boxed::<Box<dyn Fn() + Send + Sync>>(), 0);
    }
}
