//! Declared type information.
//!
//! ## Menu
//!
//! - [`Type`]: `TypeId` plus a readable type path.
//! - [`TypeInfo`]: the declared type of a member, see [`TypeKind`].
//! - [`ScalarKind`]: the closed set of scalar member types.
//! - [`EnumInfo`] / [`VariantInfo`]: declared variants of a unit enum.
//! - [`MemberInfo`]: one field or property of a [`Struct`](crate::Struct).
//! - [`Typed`]: static access to a type's [`TypeInfo`].

// -----------------------------------------------------------------------------
// Modules

mod enum_info;
mod member_info;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use enum_info::{EnumInfo, VariantInfo};
pub use member_info::{AccessError, Getter, MemberInfo, MemberKind, Setter};
pub use type_info::{ScalarKind, Type, TypeInfo, TypeKind};
pub use typed::Typed;
