//! Conversion of a raw source value to a member's declared type.
//!
//! [`coerce`] applies a fixed list of rules, in order, and stops at the
//! first one that matches:
//!
//! 1. [`Value::Null`] becomes the declared type's null value: zero for
//!    scalars, the default variant for enums, `None` for `Option<T>`.
//! 2. An `i64` or `i32` assigned to a `bool` is `true` iff it equals `1`.
//! 3. An `i64` or a decimal assigned to an `i32` is narrowed: integers
//!    wrap, decimals are truncated toward zero and fail if out of range.
//! 4. Anything else is assigned as-is if the declared type accepts it,
//!    otherwise it fails with [`CoercionError::NotAssignable`].
//!
//! Rules 2 and 3 also apply to `Option<bool>` and `Option<i32>`.

// -----------------------------------------------------------------------------
// Modules

mod error;

// -----------------------------------------------------------------------------
// Exports

pub use error::CoercionError;

use alloc::string::ToString;

use vc_reflect::info::{ScalarKind, TypeInfo};
use vc_reflect::rust_decimal::prelude::ToPrimitive;
use vc_reflect::value::Value;

// -----------------------------------------------------------------------------
// coerce

/// Converts `raw` so that it can be assigned to a member of type `dest`.
///
/// # Examples
///
/// ```
/// use vc_data::coerce;
/// use vc_reflect::{info::Typed, value::Value};
///
/// assert_eq!(coerce(Value::I64(1), bool::type_info()), Ok(Value::Bool(true)));
/// assert_eq!(coerce(Value::I64(2), bool::type_info()), Ok(Value::Bool(false)));
/// assert_eq!(coerce(Value::I64(7), i32::type_info()), Ok(Value::I32(7)));
/// assert_eq!(coerce(Value::Null, i32::type_info()), Ok(Value::I32(0)));
/// assert_eq!(coerce(Value::Null, <Option<i32>>::type_info()), Ok(Value::Null));
///
/// assert!(coerce(Value::from("7"), i32::type_info()).is_err());
/// ```
pub fn coerce(raw: Value, dest: &'static TypeInfo) -> Result<Value, CoercionError> {
    // Rule 1
    if raw.is_null() {
        return Ok(dest.null_value());
    }

    match (dest.underlying().as_scalar(), raw) {
        // Rule 2
        (Some(ScalarKind::Bool), Value::I64(v)) => Ok(Value::Bool(v == 1)),
        (Some(ScalarKind::Bool), Value::I32(v)) => Ok(Value::Bool(v == 1)),
        // Rule 3
        (Some(ScalarKind::I32), Value::I64(v)) => Ok(Value::I32(v as i32)), // wraps
        (Some(ScalarKind::I32), Value::Decimal(v)) => match v.trunc().to_i32() {
            Some(v) => Ok(Value::I32(v)),
            None => Err(CoercionError::Overflow {
                value: v.to_string(),
                to: dest.type_path(),
            }),
        },
        // Rule 4
        (_, raw) if dest.accepts(&raw) => Ok(raw),
        (_, raw) => Err(CoercionError::NotAssignable {
            from: raw.type_name(),
            to: dest.type_path(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use vc_reflect::derive::Reflect;
    use vc_reflect::info::Typed;
    use vc_reflect::rust_decimal::Decimal;
    use vc_reflect::value::Value;

    use super::{CoercionError, coerce};

    #[derive(Reflect, Debug, PartialEq)]
    enum Level {
        Low = 1,
        Off = 0,
        High = 2,
    }

    #[test]
    fn null_maps_to_zero_or_none() {
        assert_eq!(coerce(Value::Null, i64::type_info()), Ok(Value::I64(0)));
        assert_eq!(coerce(Value::Null, bool::type_info()), Ok(Value::Bool(false)));
        assert_eq!(
            coerce(Value::Null, String::type_info()),
            Ok(Value::String(String::new()))
        );
        assert_eq!(coerce(Value::Null, <Option<String>>::type_info()), Ok(Value::Null));
    }

    #[test]
    fn null_enum_is_zero_discriminant() {
        let value = coerce(Value::Null, Level::type_info()).unwrap();
        let Value::Enum(e) = value else {
            panic!("expected an enum value");
        };
        assert_eq!(e.name(), "Off");
    }

    #[test]
    fn integer_to_bool_only_one_is_true() {
        for (raw, expected) in [
            (Value::I64(1), true),
            (Value::I64(0), false),
            (Value::I64(-1), false),
            (Value::I64(2), false),
            (Value::I32(1), true),
            (Value::I32(5), false),
        ] {
            assert_eq!(coerce(raw, bool::type_info()), Ok(Value::Bool(expected)));
        }
        assert_eq!(
            coerce(Value::I64(1), <Option<bool>>::type_info()),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn bool_rule_ignores_other_integers() {
        assert!(matches!(
            coerce(Value::I16(1), bool::type_info()),
            Err(CoercionError::NotAssignable { .. })
        ));
    }

    #[test]
    fn narrowing_to_i32() {
        assert_eq!(coerce(Value::I64(42), i32::type_info()), Ok(Value::I32(42)));
        assert_eq!(
            coerce(Value::I64(i64::from(i32::MAX) + 1), i32::type_info()),
            Ok(Value::I32(i32::MIN))
        );
        assert_eq!(
            coerce(Value::Decimal(Decimal::new(-1999, 2)), i32::type_info()),
            Ok(Value::I32(-19))
        );
        assert!(matches!(
            coerce(Value::Decimal(Decimal::from(i64::MAX)), i32::type_info()),
            Err(CoercionError::Overflow { .. })
        ));
    }

    #[test]
    fn narrowing_does_not_apply_to_i64_members() {
        assert!(coerce(Value::Decimal(Decimal::ONE), i64::type_info()).is_err());
        assert_eq!(coerce(Value::I64(5), i64::type_info()), Ok(Value::I64(5)));
    }

    #[test]
    fn assignable_values_pass_through() {
        let price = Value::Decimal(Decimal::new(1999, 2));
        assert_eq!(coerce(price.clone(), Decimal::type_info()), Ok(price.clone()));
        assert_eq!(coerce(price.clone(), <Option<Decimal>>::type_info()), Ok(price));
    }

    #[test]
    fn unrelated_types_fail() {
        let err = coerce(Value::from("x"), i64::type_info()).unwrap_err();
        assert_eq!(
            err,
            CoercionError::NotAssignable {
                from: "String",
                to: "i64",
            }
        );
    }
}
