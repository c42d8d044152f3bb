//! `#[derive(Introspect)]`
//!
//! Turns `#[introspect(...)]` declarations into `Member` / `MemberValue`
//! impls, the `Introspect` registration, call operators, the `Callable`
//! impl, the `Rebind` impl, plus `Decay` and one `InnerType` per type
//! parameter.

use proc_macro2::{Literal, Span, TokenStream};
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_quote,
    punctuated::Punctuated,
    visit::{self, Visit},
    DeriveInput, Expr, Generics, Ident, Lifetime, ReturnType, Token, Type, TypeBareFn,
    TypeReference,
};

use crate::common::{marker_ident, CAPABILITY_NAMES};

// =============================================================================
// Attribute Parsing
// =============================================================================

/// One `key`, `key = Type` or `arity_value = expr` entry.
enum Entry {
    Alias { key: Ident, ty: Type },
    Call { ty: Type },
    ArityValue { key: Ident, value: Expr },
    Rebind { key: Ident },
}

impl Parse for Entry {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: Ident = input.parse()?;
        let name = key.to_string();

        if name == "rebind" {
            if input.peek(Token![=]) {
                return Err(syn::Error::new(
                    key.span(),
                    "`rebind` is a flag; implement `Rebindable` to name the rebound type",
                ));
            }
            return Ok(Entry::Rebind { key });
        }

        if name != "call" && !CAPABILITY_NAMES.contains(&name.as_str()) {
            return Err(syn::Error::new(
                key.span(),
                format!(
                    "unknown introspect key `{}`; expected `call` or one of: {}",
                    name,
                    CAPABILITY_NAMES.join(", ")
                ),
            ));
        }

        input.parse::<Token![=]>()?;

        match name.as_str() {
            "arity_value" => Ok(Entry::ArityValue {
                key,
                value: input.parse()?,
            }),
            "call" => Ok(Entry::Call { ty: input.parse()? }),
            _ => Ok(Entry::Alias {
                key,
                ty: input.parse()?,
            }),
        }
    }
}

/// Every declaration gathered from the `#[introspect]` attributes.
#[derive(Default)]
struct Declarations {
    aliases: Vec<(Ident, Type)>,
    calls: Vec<Type>,
    arity_value: Option<Expr>,
    rebind: bool,
}

impl Declarations {
    fn collect(input: &DeriveInput) -> syn::Result<Self> {
        let mut decls = Declarations::default();

        for attr in input.attrs.iter().filter(|a| a.path().is_ident("introspect")) {
            let entries =
                attr.parse_args_with(Punctuated::<Entry, Token![,]>::parse_terminated)?;
            for entry in entries {
                decls.push(entry)?;
            }
        }

        Ok(decls)
    }

    fn push(&mut self, entry: Entry) -> syn::Result<()> {
        match entry {
            Entry::Alias { key, ty } => {
                if self.aliases.iter().any(|(k, _)| *k == key) {
                    return Err(duplicate(&key));
                }
                if key == "function_type" {
                    require_fn_pointer(&ty, "function_type")?;
                }
                self.aliases.push((key, ty));
            }
            Entry::Call { ty } => {
                require_fn_pointer(&ty, "call")?;
                self.calls.push(ty);
            }
            Entry::ArityValue { key, value } => {
                if self.arity_value.is_some() {
                    return Err(duplicate(&key));
                }
                self.arity_value = Some(value);
            }
            Entry::Rebind { key } => {
                if self.rebind {
                    return Err(duplicate(&key));
                }
                self.rebind = true;
            }
        }
        Ok(())
    }

    fn function_type(&self) -> Option<&Type> {
        self.aliases
            .iter()
            .find(|(k, _)| k == "function_type")
            .map(|(_, ty)| ty)
    }
}

fn duplicate(key: &Ident) -> syn::Error {
    syn::Error::new(key.span(), format!("`{}` declared more than once", key))
}

fn require_fn_pointer(ty: &Type, key: &str) -> syn::Result<()> {
    match ty {
        Type::BareFn(bare) if bare.lifetimes.is_some() => Err(syn::Error::new_spanned(
            bare,
            format!("`{}` does not support higher-ranked signatures", key),
        )),
        Type::BareFn(bare) => match elided_lifetime(bare) {
            Some(span) => Err(syn::Error::new(
                span,
                format!(
                    "`{}` does not support elided lifetimes: a fn pointer taking `&T` is \
                     higher-ranked; name the lifetime, e.g. `&'static str`",
                    key
                ),
            )),
            None => Ok(()),
        },
        other => Err(syn::Error::new_spanned(
            other,
            format!("`{}` expects a fn pointer type, e.g. `fn(i32) -> bool`", key),
        )),
    }
}

/// First `&T` without a lifetime, or `'_`, in the parameters or return type.
fn elided_lifetime(bare: &TypeBareFn) -> Option<Span> {
    let mut finder = ElidedLifetime::default();
    for arg in &bare.inputs {
        finder.visit_type(&arg.ty);
    }
    if let ReturnType::Type(_, ty) = &bare.output {
        finder.visit_type(ty);
    }
    finder.found
}

#[derive(Default)]
struct ElidedLifetime {
    found: Option<Span>,
}

impl<'ast> Visit<'ast> for ElidedLifetime {
    fn visit_type_reference(&mut self, node: &'ast TypeReference) {
        if node.lifetime.is_none() && self.found.is_none() {
            self.found = Some(node.and_token.spans[0]);
        }
        visit::visit_type_reference(self, node);
    }

    fn visit_lifetime(&mut self, node: &'ast Lifetime) {
        if node.ident == "_" && self.found.is_none() {
            self.found = Some(node.apostrophe);
        }
    }

    // Nested fn pointers and `Fn(..)` sugar bind their own lifetimes.
    fn visit_type_bare_fn(&mut self, _: &'ast TypeBareFn) {}

    fn visit_parenthesized_generic_arguments(
        &mut self,
        _: &'ast syn::ParenthesizedGenericArguments,
    ) {
    }
}

/// Name of the lifetime that borrows `Self` in declared member types: `'a`,
/// unless the type already has an `'a` of its own.
fn borrow_lifetime(generics: &Generics) -> Lifetime {
    if generics.lifetimes().any(|param| param.lifetime.ident == "a") {
        Lifetime::new("'__self", Span::call_site())
    } else {
        Lifetime::new("'a", Span::call_site())
    }
}

// =============================================================================
// Expansion
// =============================================================================

pub fn expand_derive_introspect(input: DeriveInput) -> syn::Result<TokenStream> {
    let decls = Declarations::collect(&input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let borrow = borrow_lifetime(&input.generics);

    let members = decls.aliases.iter().map(|(key, ty)| {
        let marker = marker_ident(&key.to_string());
        quote! {
            impl #impl_generics ::tola_shape::Member<::tola_shape::cap::#marker>
                for #name #ty_generics #where_clause
            {
                type Type<#borrow> = #ty where Self: #borrow;
            }
        }
    });

    let value = decls.arity_value.as_ref().map(|value| {
        quote! {
            impl #impl_generics ::tola_shape::MemberValue<::tola_shape::cap::ArityValue>
                for #name #ty_generics #where_clause
            {
                const VALUE: usize = #value;
            }
        }
    });

    let calls = decls.calls.iter().map(|sig| {
        quote! {
            impl #impl_generics ::tola_shape::CallOperator<#sig>
                for #name #ty_generics #where_clause {}
        }
    });

    // One `CallableWith` per distinct parameter list; overloads differing
    // only in the return type share it.
    let mut arg_lists: Vec<(String, TokenStream)> = Vec::new();
    for sig in &decls.calls {
        if let Type::BareFn(bare) = sig {
            let types = bare.inputs.iter().map(|arg| &arg.ty);
            let args = quote! { (#(#types,)*) };
            let key = args.to_string();
            if !arg_lists.iter().any(|(seen, _)| *seen == key) {
                arg_lists.push((key, args));
            }
        }
    }
    let callable_with = arg_lists.iter().map(|(_, args)| {
        quote! {
            impl #impl_generics ::tola_shape::CallableWith<#args>
                for #name #ty_generics #where_clause {}
        }
    });

    // Declared function_type, then a single call operator; several call
    // operators leave the signature indeterminate.
    let signature = decls.function_type().or(match decls.calls.as_slice() {
        [single] => Some(single),
        _ => None,
    });

    let call_shape = if decls.function_type().is_some() {
        quote! { ::tola_shape::CallShape::Declared }
    } else {
        match decls.calls.len() {
            0 => quote! { ::tola_shape::CallShape::NotCallable },
            1 => quote! { ::tola_shape::CallShape::Operator },
            n => quote! { ::tola_shape::CallShape::Overloaded(#n) },
        }
    };

    let callable = signature.map(|sig| {
        let arity = decls
            .arity_value
            .as_ref()
            .map(|value| quote! { const ARITY: usize = #value; });
        quote! {
            impl #impl_generics ::tola_shape::Callable for #name #ty_generics #where_clause {
                type Signature = #sig;
                #arity
            }
        }
    });

    let mut type_names: Vec<TokenStream> = decls
        .aliases
        .iter()
        .map(|(key, _)| capability_name(key))
        .collect();
    if decls.rebind {
        type_names.push(quote! { ::tola_shape::CapabilityName::Rebind });
    }
    let value_names = decls
        .arity_value
        .as_ref()
        .map(|_| quote! { ::tola_shape::CapabilityName::ArityValue });

    let introspect = quote! {
        impl #impl_generics ::tola_shape::Introspect for #name #ty_generics #where_clause {
            const TYPES: ::tola_shape::CapabilitySet =
                ::tola_shape::CapabilitySet::of(&[#(#type_names),*]);
            const VALUES: ::tola_shape::CapabilitySet =
                ::tola_shape::CapabilitySet::of(&[#value_names]);
            const CALL: ::tola_shape::CallShape = #call_shape;
        }
    };

    let rebind = expand_rebind(&input, decls.rebind);

    let inner = input.generics.type_params().enumerate().map(|(i, param)| {
        let index = Literal::usize_unsuffixed(i);
        let ident = &param.ident;
        quote! {
            impl #impl_generics ::tola_shape::InnerType<#index>
                for #name #ty_generics #where_clause
            {
                type Type = #ident;
            }
        }
    });

    Ok(quote! {
        #(#members)*
        #value
        #(#calls)*
        #(#callable_with)*
        #callable
        #introspect
        #rebind

        impl #impl_generics ::tola_shape::Decay for #name #ty_generics #where_clause {
            type Decayed = Self;
        }

        #(#inner)*
    })
}

fn capability_name(key: &Ident) -> TokenStream {
    let variant = marker_ident(&key.to_string());
    quote! { ::tola_shape::CapabilityName::#variant }
}

/// Declared rule when the type is `Rebindable`, identity otherwise.
fn expand_rebind(input: &DeriveInput, declared: bool) -> TokenStream {
    let name = &input.ident;
    let (_, ty_generics, _) = input.generics.split_for_impl();

    let mut generics = input.generics.clone();
    let (param, out): (syn::GenericParam, TokenStream) = if declared {
        (
            parse_quote!(__To),
            quote! { <Self as ::tola_shape::Rebindable>::Other<__To> },
        )
    } else {
        (parse_quote!(__To: ?Sized), quote! { Self })
    };
    generics.params.push(param);
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics ::tola_shape::Rebind<__To> for #name #ty_generics #where_clause {
            type Out = #out;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(src: &str) -> syn::Result<String> {
        let input: DeriveInput = syn::parse_str(src)?;
        expand_derive_introspect(input).map(|ts| ts.to_string())
    }

    #[test]
    fn test_unknown_key() {
        let err = expand("#[introspect(valu_type = u8)] struct S;").unwrap_err();
        assert!(err.to_string().contains("unknown introspect key `valu_type`"));
    }

    #[test]
    fn test_duplicate_key() {
        let err = expand("#[introspect(value_type = u8, value_type = u16)] struct S;").unwrap_err();
        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    fn test_call_requires_fn_pointer() {
        let err = expand("#[introspect(call = String)] struct S;").unwrap_err();
        assert!(err.to_string().contains("expects a fn pointer type"));
    }

    #[test]
    fn test_overloads_are_counted() {
        let out = expand("#[introspect(call = fn(u8) -> u8, call = fn(u16) -> u16)] struct S;")
            .unwrap();
        assert!(out.contains("Overloaded (2usize)"));
        assert!(!out.contains("Callable for"));
    }

    #[test]
    fn test_declared_signature_wins() {
        let out = expand(
            "#[introspect(function_type = fn(u8) -> u8, call = fn(u16) -> u16)] struct S;",
        )
        .unwrap();
        assert!(out.contains("CallShape :: Declared"));
        assert!(out.contains("type Signature = fn (u8) -> u8"));
    }

    #[test]
    fn test_elided_lifetime_rejected() {
        let err = expand("#[introspect(call = fn(&str) -> usize)] struct S;").unwrap_err();
        assert!(err.to_string().contains("does not support elided lifetimes"));
        let err = expand("#[introspect(function_type = fn(u8) -> &'_ str)] struct S;")
            .unwrap_err();
        assert!(err.to_string().contains("&'static str"));
    }

    #[test]
    fn test_named_and_nested_lifetimes_accepted() {
        assert!(expand("#[introspect(call = fn(&'static str) -> usize)] struct S;").is_ok());
        assert!(expand("#[introspect(call = fn(fn(&str) -> bool) -> u8)] struct S;").is_ok());
        assert!(expand("#[introspect(call = fn(Box<dyn Fn(&str)>))] struct S;").is_ok());
    }

    #[test]
    fn test_borrow_lifetime_avoids_own_a() {
        let out = expand("#[introspect(const_reference = &'a u8)] struct View<'a>(&'a [u8]);")
            .unwrap();
        assert!(out.contains("type Type < '__self > = & 'a u8 where Self : '__self"));

        let out = expand("#[introspect(const_reference = &'a u8)] struct Owned(Vec<u8>);")
            .unwrap();
        assert!(out.contains("type Type < 'a > = & 'a u8 where Self : 'a"));
    }

    #[test]
    fn test_inner_types_and_decay() {
        let out = expand("struct Pair<'x, K, const N: usize, V>(&'x K, [V; N]);").unwrap();
        assert!(out.contains("InnerType < 0 >"));
        assert!(out.contains("type Type = K"));
        assert!(out.contains("InnerType < 1 >"));
        assert!(out.contains("type Type = V"));
        assert!(!out.contains("InnerType < 2 >"));
        assert!(out.contains("Decay for Pair"));
    }

    #[test]
    fn test_callable_with_per_parameter_list() {
        let out = expand(
            "#[introspect(call = fn(u8) -> u8, call = fn(u8) -> u16, call = fn(&'static str))] struct S;",
        )
        .unwrap();
        assert_eq!(out.matches("CallableWith <").count(), 2);
    }
}
