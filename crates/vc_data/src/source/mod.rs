//! Tabular record sources: forward-only cursors and in-memory tables.
//!
//! The population engine reads rows only through [`Row`] and
//! [`RecordSource`]. A database cursor adapter implements those two traits,
//! [`DataTable`] and [`TableReader`] are the in-memory implementations.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod reader;
mod row;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use error::SourceError;
pub use reader::TableReader;
pub use row::{RecordSource, Row};
pub use table::{Column, DataRow, DataTable};
