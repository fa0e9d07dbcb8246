//! A caller-owned store of member tables.
//!
//! See [`MappingRegistry`].

// -----------------------------------------------------------------------------
// Modules

mod mapping_registry;

// -----------------------------------------------------------------------------
// Exports

pub use mapping_registry::MappingRegistry;
