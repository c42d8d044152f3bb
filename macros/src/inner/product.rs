//! Introspect, Rebind, Decay and InnerType impls for tuples.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::common::{numbered_idents, MaxArity};

pub fn expand_impl_products(input: MaxArity) -> TokenStream {
    let impls = (0..=input.max).map(|k| {
        let slots = numbered_idents("T", k);
        let count = Literal::usize_unsuffixed(k);
        let inner = slots.iter().enumerate().map(|(i, slot)| {
            let index = Literal::usize_unsuffixed(i);
            quote! {
                impl<#(#slots),*> ::tola_shape::InnerType<#index> for (#(#slots,)*) {
                    type Type = #slot;
                }
            }
        });
        quote! {
            impl<#(#slots),*> ::tola_shape::Introspect for (#(#slots,)*) {
                const TYPES: ::tola_shape::CapabilitySet = ::tola_shape::CapabilitySet::EMPTY;
                const SLOTS: ::core::option::Option<usize> = ::core::option::Option::Some(#count);
            }

            impl<#(#slots,)* __To: ?Sized> ::tola_shape::Rebind<__To> for (#(#slots,)*) {
                type Out = Self;
            }

            impl<#(#slots),*> ::tola_shape::Decay for (#(#slots,)*) {
                type Decayed = Self;
            }

            #(#inner)*
        }
    });
    quote! { #(#impls)* }
}
