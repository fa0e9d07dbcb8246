use alloc::boxed::Box;

use thiserror::Error;

/// Failure to read from a [`Row`](crate::Row) or [`RecordSource`](crate::RecordSource).
///
/// `Closed` and `NotPositioned` are state errors: the source cannot serve
/// reads at all, independent of the requested column.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceError {
    #[error("the record source is closed")]
    Closed,

    #[error("the record source is not positioned on a row")]
    NotPositioned,

    #[error("column ordinal {ordinal} is out of range for {count} columns")]
    ColumnOutOfRange { ordinal: usize, count: usize },

    #[error("row has {found} values but the table has {expected} columns")]
    RowWidth { expected: usize, found: usize },

    #[error("no column is named `{name}`")]
    UnknownColumn { name: Box<str> },
}
