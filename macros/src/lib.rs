//! Procedural macros for the tola-shape introspection engine
//!
//! | Macro | Target | Purpose |
//! |-------|--------|---------|
//! | `#[derive(Introspect)]` | struct/enum | Register a type's members |
//! | `impl_signatures!(n)` | - | Signature impls for fn pointers and `dyn Fn` (internal) |
//! | `impl_products!(n)` | - | Introspect impls for tuples (internal) |
//!
//! ## Example
//!
//! ```ignore
//! #[derive(Introspect)]
//! #[introspect(value_type = u8, reference = &'a u8, call = fn(usize) -> u8)]
//! struct Bytes(Vec<u8>);
//! ```

use proc_macro::TokenStream;
use syn::parse_macro_input;

// =============================================================================
// Module Declarations (Three-tier: inner / common / user)
// =============================================================================

mod common;
mod inner;
mod user;

// =============================================================================
// Internal Macros (inner/)
// =============================================================================

/// Generate `Signature`, `Callable`, `Introspect`, `DropLeading` and the
/// blanket `CallOperator` impls for fn pointers of arity `0..=n`, plus the
/// matching `dyn Fn` objects.
///
/// # Usage
/// ```ignore
/// impl_signatures!(12);
/// ```
#[proc_macro]
pub fn impl_signatures(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as common::MaxArity);
    inner::signature::expand_impl_signatures(input).into()
}

/// Generate `Introspect` and identity `Rebind` impls for tuples of arity
/// `0..=n`.
#[proc_macro]
pub fn impl_products(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as common::MaxArity);
    inner::product::expand_impl_products(input).into()
}

// =============================================================================
// User-facing Macros (user/)
// =============================================================================

/// Derive `Introspect` from `#[introspect(...)]` declarations.
///
/// # Keys
///
/// | Key | Value | Generates |
/// |-----|-------|-----------|
/// | `value_type`, `iterator`, ... | a type | `Member<cap::..>` impl |
/// | `function_type` | `fn(..) -> R` | `Member<cap::FunctionType>` and the declared signature |
/// | `arity_value` | a `usize` expression | `MemberValue<cap::ArityValue>`, overrides `Callable::ARITY` |
/// | `call` | `fn(..) -> R`, repeatable | one `CallOperator` impl per entry |
/// | `rebind` | flag | `Rebind` through the type's `Rebindable` impl |
///
/// Inside a declared type, `'a` names the borrow of `Self`; when the type
/// has a lifetime parameter `'a` of its own, `'a` refers to that parameter.
/// Signatures (`call`, `function_type`) must name every reference lifetime.
///
/// Every deriving type also gets `Decay` (to itself) and one `InnerType<I>`
/// per type parameter.
///
/// # Usage
/// ```ignore
/// #[derive(Introspect)]
/// #[introspect(key_type = K, mapped_type = V)]
/// #[introspect(call = fn(K) -> Option<V>)]
/// struct Table<K, V>(Vec<(K, V)>);
/// ```
#[proc_macro_derive(Introspect, attributes(introspect))]
pub fn derive_introspect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    user::expand_derive_introspect(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
