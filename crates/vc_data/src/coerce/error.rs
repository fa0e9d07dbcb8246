use alloc::string::String;

use thiserror::Error;

/// No coercion rule applies to a (value, declared type) pair.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoercionError {
    #[error("a `{from}` value is not assignable to `{to}`")]
    NotAssignable {
        from: &'static str,
        to: &'static str,
    },

    #[error("{value} is out of range for `{to}`")]
    Overflow { value: String, to: &'static str },
}
