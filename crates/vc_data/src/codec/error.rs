use alloc::string::String;

use thiserror::Error;

use crate::codec::ConverterError;

/// Failure to decode text into a declared type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("`{text}` is not a valid `{ty}`")]
    Malformed { text: String, ty: &'static str },

    #[error("empty text cannot be decoded as `{ty}`")]
    Empty { ty: &'static str },

    #[error("`{text}` is not a variant of `{ty}`")]
    UnknownVariant { text: String, ty: &'static str },

    #[error("no string converter is registered for `{ty}`")]
    NoConverter { ty: &'static str },

    #[error("the converter of `{ty}` failed")]
    Converter {
        ty: &'static str,
        #[source]
        source: ConverterError,
    },
}

/// Failure to encode a value as text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    #[error("no string converter is registered for `{ty}`")]
    NoConverter { ty: &'static str },

    #[error("the converter of `{ty}` failed")]
    Converter {
        ty: &'static str,
        #[source]
        source: ConverterError,
    },
}
