#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod name;
mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use name::{NameSet, fold_name, names_match};
pub use typeid_map::TypeIdMap;
