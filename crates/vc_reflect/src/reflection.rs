use alloc::vec::Vec;
use core::any::Any;

use crate::info::{MemberInfo, Typed};
use crate::value::Value;

// -----------------------------------------------------------------------------
// Reflect

/// Conversion between a concrete member type and [`Value`].
///
/// Implemented for the scalar types, `Option<T>`, `Vec<u8>`, unit enums
/// with `#[derive(Reflect)]` and any type passed to
/// [`impl_reflect_opaque!`](crate::impl_reflect_opaque).
///
/// # Examples
///
/// ```
/// use vc_reflect::{Reflect, value::Value};
///
/// assert_eq!(7_i32.to_value(), Value::I32(7));
/// assert_eq!(i32::from_value(Value::I32(7)), Ok(7));
///
/// // No conversion happens here, only exact matches are accepted.
/// assert_eq!(i32::from_value(Value::I64(7)), Err(Value::I64(7)));
///
/// assert_eq!(<Option<i32>>::from_value(Value::Null), Ok(None));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a member type",
    note = "consider `#[derive(Reflect)]` for unit enums or `impl_reflect_opaque!` for other types"
)]
pub trait Reflect: Typed + Send + Sync + Sized {
    /// Converts to a boxed value.
    fn to_value(&self) -> Value;

    /// Converts from a boxed value, returning it back if the runtime type
    /// does not match.
    fn from_value(value: Value) -> Result<Self, Value>;
}

// -----------------------------------------------------------------------------
// Struct

/// A type whose members are described by a static declaration.
///
/// Normally implemented by [`#[derive(Reflect)]`](crate::derive::Reflect).
/// The declaration is turned into a case-insensitive lookup table by
/// [`MemberTable::build`](crate::members::MemberTable::build).
///
/// # Manually Impl
///
/// ```
/// use core::any::Any;
/// use vc_reflect::{Struct, Reflect, impls::NonGenericTypeInfoCell};
/// use vc_reflect::info::{AccessError, MemberInfo, TypeInfo, Typed};
///
/// #[derive(Default)]
/// struct Counter {
///     hits: i64,
/// }
///
/// impl Typed for Counter {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(TypeInfo::structure::<Self>)
///     }
/// }
///
/// impl Struct for Counter {
///     fn declare_members() -> Vec<MemberInfo> {
///         vec![MemberInfo::field::<i64>(
///             "Hits",
///             |target: &dyn Any| {
///                 let target = target
///                     .downcast_ref::<Counter>()
///                     .ok_or(AccessError::WrongTarget { expected: "Counter" })?;
///                 Ok(target.hits.to_value())
///             },
///             None,
///         )]
///     }
/// }
///
/// assert_eq!(Counter::declare_members()[0].key(), "hits");
/// ```
pub trait Struct: Typed + Any + Send + Sync {
    /// Returns the member declarations in declaration order.
    fn declare_members() -> Vec<MemberInfo>;
}
