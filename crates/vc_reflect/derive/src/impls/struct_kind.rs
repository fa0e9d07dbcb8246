use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{PropertyDecl, ReflectStruct, StructField};
use crate::path;

/// Implements `Typed` and `Struct` for a struct with named fields.
pub(crate) fn impl_struct(data: &ReflectStruct) -> TokenStream {
    let meta = &data.meta;
    let vc_reflect_path = meta.vc_reflect_path();
    let ident = meta.ident();

    let info_ = path::info_(vc_reflect_path);
    let cell_ = path::non_generic_cell_(vc_reflect_path);

    let fields = data
        .fields
        .iter()
        .map(|field| field_member(vc_reflect_path, field));
    let properties = meta
        .attrs()
        .properties
        .iter()
        .map(|property| property_member(vc_reflect_path, property));

    quote! {
        impl #info_::Typed for #ident {
            fn type_info() -> &'static #info_::TypeInfo {
                static CELL: #cell_ = #cell_::new();
                CELL.get_or_init(#info_::TypeInfo::structure::<Self>)
            }
        }

        impl #vc_reflect_path::Struct for #ident {
            fn declare_members() -> ::std::vec::Vec<#info_::MemberInfo> {
                ::std::vec![
                    #(#fields,)*
                    #(#properties,)*
                ]
            }
        }
    }
}

fn field_member(vc_reflect_path: &syn::Path, field: &StructField) -> TokenStream {
    let info_ = path::info_(vc_reflect_path);
    let exports_ = path::macro_exports_(vc_reflect_path);
    let reflect_ = path::reflect_(vc_reflect_path);
    let value_ = path::value_(vc_reflect_path);
    let any_ = path::any_();
    let result_ = path::result_();

    let StructField {
        ident,
        ty,
        name,
        readonly,
    } = field;

    let setter = if *readonly {
        quote! { ::core::option::Option::None }
    } else {
        quote! {{
            let setter: #info_::Setter = |target: &mut dyn #any_, value: #value_| {
                let target = #exports_::downcast_mut::<Self>(target)?;
                target.#ident = #exports_::from_value::<#ty>(value)?;
                #result_::Ok(())
            };
            ::core::option::Option::Some(setter)
        }}
    };

    quote! {{
        let getter: #info_::Getter = |target: &dyn #any_| {
            let target = #exports_::downcast_ref::<Self>(target)?;
            #result_::Ok(<#ty as #reflect_>::to_value(&target.#ident))
        };
        #info_::MemberInfo::field::<#ty>(#name, getter, #setter)
    }}
}

fn property_member(vc_reflect_path: &syn::Path, property: &PropertyDecl) -> TokenStream {
    let info_ = path::info_(vc_reflect_path);
    let exports_ = path::macro_exports_(vc_reflect_path);
    let reflect_ = path::reflect_(vc_reflect_path);
    let value_ = path::value_(vc_reflect_path);
    let any_ = path::any_();
    let result_ = path::result_();

    let PropertyDecl { name, ty, get, set } = property;

    let getter = match get {
        Some(get) => quote! {{
            let getter: #info_::Getter = |target: &dyn #any_| {
                let target = #exports_::downcast_ref::<Self>(target)?;
                let value: #ty = #get(target);
                #result_::Ok(<#ty as #reflect_>::to_value(&value))
            };
            ::core::option::Option::Some(getter)
        }},
        None => quote! { ::core::option::Option::None },
    };

    let setter = match set {
        Some(set) => quote! {{
            let setter: #info_::Setter = |target: &mut dyn #any_, value: #value_| {
                let target = #exports_::downcast_mut::<Self>(target)?;
                #set(target, #exports_::from_value::<#ty>(value)?);
                #result_::Ok(())
            };
            ::core::option::Option::Some(setter)
        }},
        None => quote! { ::core::option::Option::None },
    };

    quote! {
        #info_::MemberInfo::property::<#ty>(#name, #getter, #setter)
    }
}
