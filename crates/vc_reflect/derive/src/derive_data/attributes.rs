use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Property

/// `#[reflect(property(name = "...", ty = T, get = path, set = path))]`
pub(crate) struct PropertyDecl {
    pub name: LitStr,
    pub ty: syn::Type,
    pub get: Option<syn::Path>,
    pub set: Option<syn::Path>,
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes placed on the type.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// Span of `auto_register`, if present.
    pub auto_register: Option<Span>,
    pub properties: Vec<PropertyDecl>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("auto_register") {
                    res.auto_register = Some(meta.path.span());
                    return Ok(());
                }
                if meta.path.is_ident("property") {
                    res.properties.push(parse_property(&meta)?);
                    return Ok(());
                }
                Err(meta.error("unknown type attribute, expected `auto_register` or `property(..)`"))
            })?;
        }

        Ok(res)
    }
}

fn parse_property(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<PropertyDecl> {
    let mut name: Option<LitStr> = None;
    let mut ty: Option<syn::Type> = None;
    let mut get: Option<syn::Path> = None;
    let mut set: Option<syn::Path> = None;

    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("name") {
            name = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("ty") {
            ty = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("get") {
            get = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("set") {
            set = Some(inner.value()?.parse()?);
        } else {
            return Err(inner.error("expected `name`, `ty`, `get` or `set`"));
        }
        Ok(())
    })?;

    let name = name.ok_or_else(|| meta.error("property requires `name = \"...\"`"))?;
    let ty = ty.ok_or_else(|| meta.error("property requires `ty = Type`"))?;
    if name.value().is_empty() {
        return Err(syn::Error::new(name.span(), "property name cannot be empty"));
    }

    Ok(PropertyDecl { name, ty, get, set })
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Attributes placed on a struct field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub readonly: bool,
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    res.skip = true;
                } else if meta.path.is_ident("readonly") {
                    res.readonly = true;
                } else if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    if name.value().is_empty() {
                        return Err(syn::Error::new(name.span(), "member name cannot be empty"));
                    }
                    res.rename = Some(name);
                } else {
                    return Err(meta.error(
                        "unknown field attribute, expected `skip`, `readonly` or `rename`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(res)
    }
}

/// Rejects `#[reflect(..)]` on enum variants, which carry no options.
pub(crate) fn reject_attrs(attrs: &[Attribute]) -> syn::Result<()> {
    match attrs
        .iter()
        .find(|attr| attr.path().is_ident(REFLECT_ATTRIBUTE_NAME))
    {
        Some(attr) => Err(syn::Error::new(
            attr.span(),
            "`#[reflect(..)]` is not supported here",
        )),
        None => Ok(()),
    }
}
