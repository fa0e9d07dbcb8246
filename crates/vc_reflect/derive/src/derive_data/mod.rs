//! Parsed form of a `#[derive(Reflect)]` input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, PropertyDecl, TypeAttributes};

use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

// -----------------------------------------------------------------------------
// ReflectMeta

/// Data shared by every kind of derived type.
pub(crate) struct ReflectMeta<'a> {
    ident: &'a Ident,
    attrs: TypeAttributes,
    vc_reflect_path: syn::Path,
}

impl<'a> ReflectMeta<'a> {
    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn vc_reflect_path(&self) -> &syn::Path {
        &self.vc_reflect_path
    }
}

// -----------------------------------------------------------------------------
// ReflectStruct

/// A named field that becomes a member.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a syn::Type,
    /// The member name: the field name, or its `rename`.
    pub name: LitStr,
    pub readonly: bool,
}

pub(crate) struct ReflectStruct<'a> {
    pub meta: ReflectMeta<'a>,
    pub fields: Vec<StructField<'a>>,
}

// -----------------------------------------------------------------------------
// ReflectEnum

pub(crate) struct ReflectEnum<'a> {
    pub meta: ReflectMeta<'a>,
    pub variants: Vec<&'a Ident>,
}

// -----------------------------------------------------------------------------
// ReflectDerive

pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Enum(ReflectEnum<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "`Reflect` cannot be derived for generic types",
            ));
        }

        let meta = ReflectMeta {
            ident: &input.ident,
            attrs: TypeAttributes::parse_attrs(&input.attrs)?,
            vc_reflect_path: crate::path::vc_reflect(),
        };

        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    let mut fields = Vec::with_capacity(named.named.len());
                    for field in &named.named {
                        let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
                        if attrs.skip {
                            continue;
                        }
                        // Named fields always carry an ident.
                        let Some(ident) = field.ident.as_ref() else {
                            continue;
                        };
                        let name = attrs.rename.unwrap_or_else(|| {
                            LitStr::new(&ident.unraw().to_string(), ident.span())
                        });
                        fields.push(StructField {
                            ident,
                            ty: &field.ty,
                            name,
                            readonly: attrs.readonly,
                        });
                    }
                    Ok(Self::Struct(ReflectStruct { meta, fields }))
                }
                other => Err(syn::Error::new(
                    other.span(),
                    "`Reflect` can only be derived for structs with named fields",
                )),
            },
            Data::Enum(data) => {
                if let Some(span) = meta.attrs.auto_register {
                    return Err(syn::Error::new(
                        span,
                        "`auto_register` is only available for structs",
                    ));
                }
                if let Some(property) = meta.attrs.properties.first() {
                    return Err(syn::Error::new(
                        property.name.span(),
                        "properties are only available for structs",
                    ));
                }
                if data.variants.is_empty() {
                    return Err(syn::Error::new(
                        data.brace_token.span.join(),
                        "`Reflect` cannot be derived for enums without variants",
                    ));
                }
                let mut variants = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    attributes::reject_attrs(&variant.attrs)?;
                    if !matches!(variant.fields, Fields::Unit) {
                        return Err(syn::Error::new(
                            variant.span(),
                            "`Reflect` can only be derived for enums with unit variants",
                        ));
                    }
                    variants.push(&variant.ident);
                }
                Ok(Self::Enum(ReflectEnum { meta, variants }))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "`Reflect` cannot be derived for unions",
            )),
        }
    }
}
