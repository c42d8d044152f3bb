//! Canonical signatures.
//!
//! A signature is a fn pointer type, `fn(A0, .., An) -> R`. Every callable
//! shape normalizes to one, so parameter lists and return types are
//! compared and manipulated in a single representation.

use core::any::type_name;
use core::fmt;
use core::marker::PhantomData;

use alloc::vec::Vec;

use crate::detect::same_type;
use crate::error::{IntrospectError, Result};

/// Ordered parameter types plus one return type.
///
/// Implemented for `fn(A0, .., An) -> R` up to twelve parameters.
pub trait Signature {
    type Return;
    /// The parameters as a tuple, `(A0, .., An)`.
    type Params;
    const ARITY: usize;

    /// Parameter type names, in order.
    fn param_names() -> Vec<&'static str>;

    fn return_name() -> &'static str {
        type_name::<Self::Return>()
    }
}

/// `Self` with its first `N` parameters removed.
///
/// Implemented for every `N` from zero up to the signature's arity. Asking
/// for more is a build failure at the call site:
///
/// ```compile_fail
/// use tola_shape::Partial;
///
/// let _: Option<Partial<fn(u8) -> u8, 2>> = None;
/// ```
#[diagnostic::on_unimplemented(
    message = "cannot drop that many leading parameters from `{Self}`",
    label = "the drop count exceeds the arity of this signature",
    note = "`DropLeading<N>` exists for every N from 0 up to the signature's arity"
)]
pub trait DropLeading<const N: usize>: Signature {
    type Out: Signature;
}

/// `S` with its first `N` parameters removed.
pub type Partial<S, const N: usize> = <S as DropLeading<N>>::Out;

/// A signature carried as a value, for callables whose type cannot be
/// named (closures, fn items).
pub struct SignatureOf<S>(PhantomData<fn() -> S>);

impl<S: Signature> SignatureOf<S> {
    pub const fn new() -> Self {
        SignatureOf(PhantomData)
    }

    pub const fn arity(self) -> usize {
        S::ARITY
    }

    pub fn return_type_name(self) -> &'static str {
        S::return_name()
    }

    /// Does the signature return exactly `T`?
    pub fn returns<T: ?Sized + 'static>(self) -> bool
    where
        S::Return: 'static,
    {
        same_type::<S::Return, T>()
    }

    /// Are the parameters exactly the tuple `P`?
    pub fn takes<P: 'static>(self) -> bool
    where
        S::Params: 'static,
    {
        same_type::<S::Params, P>()
    }

    pub fn info(self) -> SignatureInfo {
        SignatureInfo::of::<S>()
    }

    /// Drop the first `N` parameters.
    ///
    /// ```
    /// use tola_shape::signature_of;
    ///
    /// let sig = signature_of(&|a: u8, b: u16, c: u32| -> bool { (a as u32) + (b as u32) > c });
    /// assert_eq!(sig.drop_leading::<1>().arity(), 2);
    /// assert!(sig.drop_leading::<3>().takes::<()>());
    /// ```
    pub const fn drop_leading<const N: usize>(self) -> SignatureOf<Partial<S, N>>
    where
        S: DropLeading<N>,
    {
        SignatureOf(PhantomData)
    }
}

impl<S: Signature> Default for SignatureOf<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for SignatureOf<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SignatureOf<S> {}

impl<S> fmt::Debug for SignatureOf<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignatureOf<{}>", type_name::<S>())
    }
}

/// Run-time snapshot of a signature: parameter and return type names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureInfo {
    params: Vec<&'static str>,
    ret: &'static str,
}

impl SignatureInfo {
    pub fn of<S: Signature>() -> Self {
        SignatureInfo {
            params: S::param_names(),
            ret: S::return_name(),
        }
    }

    pub fn new(params: Vec<&'static str>, ret: &'static str) -> Self {
        SignatureInfo { params, ret }
    }

    pub fn params(&self) -> &[&'static str] {
        &self.params
    }

    pub fn return_type(&self) -> &'static str {
        self.ret
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Remove the first `n` parameters; `n == 0` is the identity.
    pub fn drop_leading(&self, n: usize) -> Result<Self> {
        if n > self.arity() {
            return Err(IntrospectError::OutOfDomainDrop {
                requested: n,
                arity: self.arity(),
            });
        }
        Ok(SignatureInfo {
            params: self.params[n..].to_vec(),
            ret: self.ret,
        })
    }
}

impl fmt::Display for SignatureInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(param)?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_info_of_fn_pointer() {
        let info = SignatureInfo::of::<fn(i32, i32) -> i32>();
        assert_eq!(info.arity(), 2);
        assert_eq!(info.params(), ["i32", "i32"]);
        assert_eq!(info.return_type(), "i32");
        assert_eq!(info.to_string(), "fn(i32, i32) -> i32");
    }

    #[test]
    fn test_drop_leading_info() {
        let info = SignatureInfo::new(vec!["a", "b", "c"], "r");
        assert_eq!(info.drop_leading(0).unwrap(), info);
        assert_eq!(info.drop_leading(1).unwrap().params(), ["b", "c"]);
        assert_eq!(info.drop_leading(3).unwrap().to_string(), "fn() -> r");
        assert_eq!(
            info.drop_leading(4),
            Err(IntrospectError::OutOfDomainDrop { requested: 4, arity: 3 })
        );
    }

    #[test]
    fn test_partial_types() {
        assert!(same_type::<Partial<fn(u8, u16, u32) -> bool, 0>, fn(u8, u16, u32) -> bool>());
        assert!(same_type::<Partial<fn(u8, u16, u32) -> bool, 1>, fn(u16, u32) -> bool>());
        assert!(same_type::<Partial<fn(u8, u16, u32) -> bool, 3>, fn() -> bool>());
    }
}
