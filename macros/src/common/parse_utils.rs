//! Common parsing utilities
//!
//! Shared parsing helpers for the generator and derive macros.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    Ident, LitInt,
};

// =============================================================================
// Capability Table
// =============================================================================

/// Snake_case spellings accepted as capability keys, in the runtime crate's
/// declaration order.
pub const CAPABILITY_NAMES: &[&str] = &[
    "value_type",
    "key_type",
    "mapped_type",
    "container_type",
    "pointer",
    "const_pointer",
    "reference",
    "const_reference",
    "iterator",
    "const_iterator",
    "reverse_iterator",
    "const_reverse_iterator",
    "size_type",
    "difference_type",
    "function_type",
    "arity_value",
    "rebind",
];

/// `const_reverse_iterator` -> `ConstReverseIterator`
pub fn to_camel_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Marker ident for a capability, e.g. `ValueType`.
pub fn marker_ident(name: &str) -> Ident {
    Ident::new(&to_camel_case(name), Span::call_site())
}

// =============================================================================
// Generator Input: a single integer literal
// =============================================================================

/// `impl_signatures!(12)`: the largest arity to generate.
pub struct MaxArity {
    pub max: usize,
}

impl Parse for MaxArity {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let lit: LitInt = input.parse()?;
        let max = lit.base10_parse::<usize>()?;
        Ok(MaxArity { max })
    }
}

/// `A0, A1, .., A{n-1}` style idents.
pub fn numbered_idents(prefix: &str, n: usize) -> Vec<Ident> {
    (0..n)
        .map(|i| Ident::new(&format!("{}{}", prefix, i), Span::call_site()))
        .collect()
}
