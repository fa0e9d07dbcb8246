use crate::info::TypeInfo;

/// A static accessor to declared type information.
///
/// Implemented for every scalar member type, for `Option<T>`, and by
/// [`#[derive(Reflect)]`](crate::derive::Reflect).
///
/// # Manually Impl
///
/// Use [`NonGenericTypeInfoCell`](crate::impls::NonGenericTypeInfoCell) so the
/// information is built once:
///
/// ```
/// use vc_reflect::{impls::NonGenericTypeInfoCell, info::{Typed, TypeInfo}};
///
/// struct Marker;
///
/// impl Typed for Marker {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(TypeInfo::structure::<Self>)
///     }
/// }
///
/// assert!(Marker::type_info().ty().is::<Marker>());
/// ```
pub trait Typed: 'static {
    /// Returns the declared type information.
    fn type_info() -> &'static TypeInfo;
}
