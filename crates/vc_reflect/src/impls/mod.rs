//! Provide some utilities for implementing reflection traits.
//!
//! - [`NonGenericTypeInfoCell`]: Used to implement [`Typed`] for non-generic types.
//! - [`GenericTypeInfoCell`]: Used to implement [`Typed`] for generic types.
//! - [`impl_reflect_opaque!`](crate::impl_reflect_opaque): Used to make any
//!   `Clone + PartialEq + Debug + Default` type a member type.
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `u8`, `i16`, `i32`, `i64`, `f32`, `f64`, `String`
//! - [`Decimal`](rust_decimal::Decimal), [`NaiveDateTime`](chrono::NaiveDateTime),
//!   [`Uuid`](uuid::Uuid)
//! - `Option<T>` for any `T: Reflect`
//! - `Vec<u8>` as an opaque value
//!
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod opaque;
mod option;
mod scalar;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use opaque::opaque_from_value;
