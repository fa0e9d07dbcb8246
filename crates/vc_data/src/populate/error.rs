use alloc::boxed::Box;

use thiserror::Error;
use vc_reflect::info::AccessError;

use crate::coerce::CoercionError;
use crate::source::SourceError;

/// Failure to populate a target from a record source.
///
/// Every variant aborts the whole call, a target may be left partially
/// populated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PopulateError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("the value of column `{column}` cannot be assigned to member `{member}`")]
    Coercion {
        column: Box<str>,
        member: &'static str,
        #[source]
        source: CoercionError,
    },

    #[error("column `{column}` matches no member")]
    UnmappedColumn { column: Box<str> },

    #[error("the member table was built for `{found}`, not `{expected}`")]
    MismatchedTable {
        expected: &'static str,
        found: &'static str,
    },

    #[error("member `{member}` rejected its value")]
    Assignment {
        member: &'static str,
        #[source]
        source: AccessError,
    },
}
