//! The boxed dynamic value.
//!
//! [`Value`] is what record sources hand out, what coercion rules work on and
//! what member accessors accept. [`Value::Null`] is the source-side
//! null-sentinel: it means "no value" and is distinct from `Option::None`
//! of a member.

// -----------------------------------------------------------------------------
// Modules

mod enum_value;
mod opaque;
mod serde;

// -----------------------------------------------------------------------------
// Exports

pub use enum_value::EnumValue;
pub use opaque::{DynValue, OpaqueValue};

use alloc::string::String;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::info::ScalarKind;

// -----------------------------------------------------------------------------
// Value

/// A boxed dynamic value.
///
/// # Examples
///
/// ```
/// use vc_reflect::info::ScalarKind;
/// use vc_reflect::value::Value;
///
/// let value = Value::from(42_i64);
///
/// assert_eq!(value.scalar_kind(), Some(ScalarKind::I64));
/// assert_eq!(value.type_name(), "i64");
/// assert!(Value::Null.is_null());
/// assert_eq!(Value::from(None::<i32>), Value::Null);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    Bool(bool),
    U8(u8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    String(String),
    DateTime(NaiveDateTime),
    Guid(Uuid),
    Enum(EnumValue),
    Opaque(OpaqueValue),
}

impl Value {
    /// The date-time used as the zero value: `0001-01-01 00:00:00`.
    pub fn min_date_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1, 1, 1)
            .unwrap_or(NaiveDate::MIN)
            .and_time(NaiveTime::default())
    }

    /// Returns `true` for [`Value::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the scalar kind of the value, if it is a scalar.
    pub const fn scalar_kind(&self) -> Option<ScalarKind> {
        Some(match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::U8(_) => ScalarKind::U8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::I64(_) => ScalarKind::I64,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
            Self::Decimal(_) => ScalarKind::Decimal,
            Self::String(_) => ScalarKind::String,
            Self::DateTime(_) => ScalarKind::DateTime,
            Self::Guid(_) => ScalarKind::Guid,
            Self::Null | Self::Enum(_) | Self::Opaque(_) => return None,
        })
    }

    /// Returns a readable name of the runtime type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Enum(value) => value.type_path(),
            Self::Opaque(value) => value.value_type_name(),
            other => match other.scalar_kind() {
                Some(kind) => kind.name(),
                None => "unknown",
            },
        }
    }

    /// Returns the string slice of a [`Value::String`].
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from_scalar! {
    bool => Bool,
    u8 => U8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    String => String,
    NaiveDateTime => DateTime,
    Uuid => Guid,
    EnumValue => Enum,
    OpaqueValue => Opaque,
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
