use thiserror::Error;
use vc_reflect::info::AccessError;

use crate::coerce::CoercionError;
use crate::source::SourceError;

/// Failure to copy one member.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CopyError {
    #[error("member `{member}` could not be read or written")]
    Access {
        member: &'static str,
        #[source]
        source: AccessError,
    },

    #[error("the value of member `{member}` cannot be converted")]
    Coercion {
        member: &'static str,
        #[source]
        source: CoercionError,
    },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// A member that was not copied under [`OnMemberError::SkipAndContinue`].
///
/// [`OnMemberError::SkipAndContinue`]: crate::OnMemberError::SkipAndContinue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFailure {
    pub member: &'static str,
    pub error: CopyError,
}
