use alloc::string::ToString;

use serde_core::ser::{Error, Serialize, Serializer};

use crate::value::Value;

/// Scalars serialize natively, decimals, date-times (ISO-8601) and guids
/// (hyphenated) as strings, enums as their variant name.
///
/// Opaque values cannot be serialized.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::U8(v) => serializer.serialize_u8(*v),
            Self::I16(v) => serializer.serialize_i16(*v),
            Self::I32(v) => serializer.serialize_i32(*v),
            Self::I64(v) => serializer.serialize_i64(*v),
            Self::F32(v) => serializer.serialize_f32(*v),
            Self::F64(v) => serializer.serialize_f64(*v),
            Self::Decimal(v) => serializer.serialize_str(&v.to_string()),
            Self::String(v) => serializer.serialize_str(v),
            Self::DateTime(v) => {
                serializer.collect_str(&v.format("%Y-%m-%dT%H:%M:%S%.f"))
            }
            Self::Guid(v) => serializer.collect_str(&v.hyphenated()),
            Self::Enum(v) => serializer.serialize_str(v.name()),
            Self::Opaque(v) => Err(S::Error::custom(format_args!(
                "opaque value of type `{}` cannot be serialized",
                v.value_type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::value::{OpaqueValue, Value};

    #[test]
    fn serialize_scalars() {
        let json = |v: Value| serde_json::to_string(&v).unwrap();

        assert_eq!(json(Value::Null), "null");
        assert_eq!(json(Value::I64(-3)), "-3");
        assert_eq!(json(Value::from("a")), "\"a\"");
        assert_eq!(json(Value::Decimal("19.99".parse().unwrap())), "\"19.99\"");

        let date = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(json(Value::DateTime(date)), "\"2024-03-01T08:30:00\"");
    }

    #[test]
    fn serialize_opaque_fails() {
        let value = Value::Opaque(OpaqueValue::new(vec![1_u8]));
        assert!(serde_json::to_string(&value).is_err());
    }
}
