//! Paths into `vc_reflect` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `vc_reflect` crate.
///
/// Resolved from the caller's `Cargo.toml`, see [`vc_macro_utils::Manifest`].
/// The lookup touches the file system, so it runs once per derive and the
/// path is passed around afterwards.
pub(crate) fn vc_reflect() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_reflect"))
}

#[inline(always)]
pub(crate) fn macro_exports_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_reflect_path::__macro_exports
    }
}

#[inline(always)]
pub(crate) fn info_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_reflect_path::info
    }
}

#[inline(always)]
pub(crate) fn value_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_reflect_path::value::Value
    }
}

#[inline(always)]
pub(crate) fn reflect_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_reflect_path::Reflect
    }
}

#[inline(always)]
pub(crate) fn non_generic_cell_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_reflect_path::impls::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn any_() -> TokenStream {
    quote! {
        ::core::any::Any
    }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! {
        ::core::result::Result
    }
}
