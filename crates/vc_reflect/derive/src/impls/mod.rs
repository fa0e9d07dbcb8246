//! Code generation for `#[derive(Reflect)]`.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod enum_kind;
mod struct_kind;

// -----------------------------------------------------------------------------
// Entry

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::ReflectDerive;

pub(crate) fn match_reflect_impls(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let reflect_impls = match ReflectDerive::from_input(ast)? {
        ReflectDerive::Struct(data) => {
            let struct_impls = struct_kind::impl_struct(&data);
            let auto_register = auto_register::get_auto_register_impl(&data.meta);
            quote! {
                #struct_impls
                #auto_register
            }
        }
        ReflectDerive::Enum(data) => enum_kind::impl_enum(&data),
    };

    Ok(quote! {
        const _: () = {
            #reflect_impls
        };
    })
}
