use proc_macro2::TokenStream;

use crate::derive_data::ReflectMeta;

/// Generate `auto_register` submission.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &ReflectMeta) -> TokenStream {
    use quote::quote_spanned;

    let Some(span) = meta.attrs().auto_register else {
        return TokenStream::new();
    };

    let vc_reflect_path = meta.vc_reflect_path();
    let macro_exports_ = crate::path::macro_exports_(vc_reflect_path);
    let ident = meta.ident();

    quote_spanned! { span =>
        #macro_exports_::inventory::submit! {
            #macro_exports_::__AutoRegisterType(
                #vc_reflect_path::members::MemberTable::build::<#ident>
            )
        }
    }
}

/// Generate `auto_register` submission.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ReflectMeta) -> TokenStream {
    TokenStream::new()
}
