//! Signature impls for fn pointers and `dyn Fn` objects, plus the blanket
//! `CallOperator` / `CallableWith` impls over `Fn`.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::common::{numbered_idents, MaxArity};

pub fn expand_impl_signatures(input: MaxArity) -> TokenStream {
    let impls = (0..=input.max).map(expand_arity);
    quote! { #(#impls)* }
}

fn expand_arity(k: usize) -> TokenStream {
    let params = numbered_idents("A", k);
    let arity = Literal::usize_unsuffixed(k);
    let fn_ty = quote! { fn(#(#params),*) -> R };

    let function = quote! {
        impl<R, #(#params),*> ::tola_shape::Signature for #fn_ty {
            type Return = R;
            type Params = (#(#params,)*);
            const ARITY: usize = #arity;

            fn param_names() -> ::tola_shape::__private::Vec<&'static str> {
                ::tola_shape::__private::Vec::from([
                    #(::core::any::type_name::<#params>()),*
                ])
            }
        }

        impl<R, #(#params),*> ::tola_shape::Callable for #fn_ty {
            type Signature = Self;
        }

        impl<R, #(#params),*> ::tola_shape::Member<::tola_shape::cap::FunctionType> for #fn_ty {
            type Type<'a> = Self where Self: 'a;
        }

        impl<R, #(#params),*> ::tola_shape::Introspect for #fn_ty {
            const TYPES: ::tola_shape::CapabilitySet =
                ::tola_shape::CapabilitySet::of(&[::tola_shape::CapabilityName::FunctionType]);
            const CALL: ::tola_shape::CallShape = ::tola_shape::CallShape::Function;
        }

        impl<R, #(#params,)* __To: ?Sized> ::tola_shape::Rebind<__To> for #fn_ty {
            type Out = Self;
        }

        impl<R, #(#params),*> ::tola_shape::Decay for #fn_ty {
            type Decayed = Self;
        }

        impl<__F, R, #(#params),*> ::tola_shape::CallOperator<#fn_ty> for __F
        where
            __F: ?Sized + Fn(#(#params),*) -> R,
        {
        }

        impl<__F, R, #(#params),*> ::tola_shape::CallableWith<(#(#params,)*)> for __F
        where
            __F: ?Sized + Fn(#(#params),*) -> R,
        {
        }
    };

    let objects = [quote! {}, quote! { + Send }, quote! { + Send + Sync }]
        .into_iter()
        .map(|extra| {
            let dyn_ty = quote! { dyn Fn(#(#params),*) -> R #extra + 'f };
            quote! {
                impl<'f, R, #(#params),*> ::tola_shape::Introspect for #dyn_ty {
                    const TYPES: ::tola_shape::CapabilitySet = ::tola_shape::CapabilitySet::EMPTY;
                    const CALL: ::tola_shape::CallShape = ::tola_shape::CallShape::Operator;
                }

                impl<'f, R, #(#params),*> ::tola_shape::Callable for #dyn_ty {
                    type Signature = #fn_ty;
                }

                impl<'f, R, #(#params,)* __To: ?Sized> ::tola_shape::Rebind<__To> for #dyn_ty {
                    type Out = Self;
                }

                impl<'f, R, #(#params),*> ::tola_shape::Decay for #dyn_ty {
                    type Decayed = Self;
                }

                impl<'f, R, #(#params),*> ::tola_shape::BoxedFn
                    for ::tola_shape::__private::Box<#dyn_ty>
                {
                }
            }
        });

    let drops = (0..=k).map(|n| {
        let count = Literal::usize_unsuffixed(n);
        let rest = &params[n..];
        quote! {
            impl<R, #(#params),*> ::tola_shape::DropLeading<#count> for #fn_ty {
                type Out = fn(#(#rest),*) -> R;
            }
        }
    });

    quote! {
        #function
        #(#objects)*
        #(#drops)*
    }
}
