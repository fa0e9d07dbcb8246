use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectEnum;
use crate::path;

/// Implements `Typed` and `Reflect` for a unit-only enum.
///
/// Values are carried as `Value::Enum` holding the variant index, so the
/// discriminants only matter for decoding numeric text.
pub(crate) fn impl_enum(data: &ReflectEnum) -> TokenStream {
    let meta = &data.meta;
    let vc_reflect_path = meta.vc_reflect_path();
    let ident = meta.ident();

    let info_ = path::info_(vc_reflect_path);
    let cell_ = path::non_generic_cell_(vc_reflect_path);
    let reflect_ = path::reflect_(vc_reflect_path);
    let value_ = path::value_(vc_reflect_path);
    let result_ = path::result_();

    let variants = &data.variants;
    let names = variants.iter().map(|v| v.to_string());
    let indices = 0..variants.len();
    let from_indices = 0..variants.len();

    quote! {
        impl #info_::Typed for #ident {
            fn type_info() -> &'static #info_::TypeInfo {
                static CELL: #cell_ = #cell_::new();
                CELL.get_or_init(|| {
                    #info_::TypeInfo::enumeration::<Self>(#info_::EnumInfo::new(&[
                        #(#info_::VariantInfo::new(#names, Self::#variants as i64),)*
                    ]))
                })
            }
        }

        impl #reflect_ for #ident {
            fn to_value(&self) -> #value_ {
                let index: usize = match self {
                    #(Self::#variants => #indices,)*
                };
                #value_::Enum(#vc_reflect_path::value::EnumValue::new(
                    <Self as #info_::Typed>::type_info(),
                    index,
                ))
            }

            fn from_value(value: #value_) -> #result_<Self, #value_> {
                match value {
                    #value_::Enum(e) if e.is::<Self>() => match e.index() {
                        #(#from_indices => #result_::Ok(Self::#variants),)*
                        _ => #result_::Err(#value_::Enum(e)),
                    },
                    other => #result_::Err(other),
                }
            }
        }
    }
}
