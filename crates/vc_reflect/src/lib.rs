#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::vc_reflect` paths, this alias lets the crate
// derive on its own types and in its own tests.
extern crate self as vc_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod impls;
pub mod info;
pub mod members;
pub mod registry;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::{Reflect, Struct};
pub use vc_reflect_derive as derive;

pub use chrono;
pub use rust_decimal;
pub use uuid;
