//! Case-insensitive member lookup tables.
//!
//! A [`MemberTable`] is built once per target type from
//! [`Struct::declare_members`](crate::Struct::declare_members) and never
//! changes afterwards. Share it by reference, or through a
//! [`MappingRegistry`](crate::registry::MappingRegistry).

// -----------------------------------------------------------------------------
// Modules

mod member_table;

// -----------------------------------------------------------------------------
// Exports

pub use member_table::MemberTable;
