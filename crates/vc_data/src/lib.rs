#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod codec;
pub mod coerce;
pub mod copy;
pub mod populate;
pub mod source;

mod tables;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use codec::{Culture, DecodeError, EncodeError, EnumCase, StringCodec};
pub use coerce::{CoercionError, coerce};
pub use copy::{Copier, CopyError, CopyReport, MemberFailure, OnMemberError};
pub use populate::{PopulateError, PopulateIter, Populator};
pub use source::{DataRow, DataTable, RecordSource, Row, SourceError, TableReader};

pub use vc_reflect::members::MemberTable;
pub use vc_reflect::registry::MappingRegistry;
pub use vc_utils::NameSet;

/// A set of column names excluded from one population pass.
///
/// Lookups ignore case. A skip list never affects a [`MemberTable`].
pub type SkipList = NameSet;
