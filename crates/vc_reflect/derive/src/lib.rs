//! See [`Reflect`](derive_reflect).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements:
///
/// - `Typed` and `Struct` for structs with named fields. Every field becomes
///   a field member; the struct itself is not a member type.
/// - `Typed` and `Reflect` for enums whose variants are all units. Such
///   enums can then be used as member types.
///
/// Generic types, tuple structs and unit structs are not supported.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct User {
///     // Not a member at all.
///     #[reflect(skip)]
///     cache: Vec<u8>,
///     // Readable, but population and copying leave it alone.
///     #[reflect(readonly)]
///     id: i64,
///     // Matched by `EMail`, ignoring case, instead of `email`.
///     #[reflect(rename = "EMail")]
///     email: String,
/// }
/// ```
///
/// ## Properties
///
/// Accessor-backed members are declared at the type level. `get` takes
/// `&Self` and returns `ty`; `set` takes `&mut Self` and a `ty`. Either
/// may be omitted.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(property(name = "FullName", ty = String, get = Person::full_name))]
/// #[reflect(property(name = "Age", ty = i32, get = Person::age, set = Person::set_age))]
/// struct Person { /* ... */ }
/// ```
///
/// ## Auto Registration
///
/// `#[reflect(auto_register)]` submits the struct so that
/// `MappingRegistry::auto_register` builds its member table up front.
///
/// This attribute is a no-op when the `auto_register` feature is disabled.
/// It is rejected on enums.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match impls::match_reflect_impls(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
