use alloc::string::String;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{ScalarKind, TypeInfo, Typed};
use crate::value::Value;

macro_rules! impl_reflect_scalar {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl Typed for $ty {
                fn type_info() -> &'static TypeInfo {
                    static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                    CELL.get_or_init(|| TypeInfo::scalar::<$ty>(ScalarKind::$variant))
                }
            }

            impl Reflect for $ty {
                #[inline]
                fn to_value(&self) -> Value {
                    Value::$variant(Clone::clone(self))
                }

                #[inline]
                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }
            }
        )+
    };
}

impl_reflect_scalar! {
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
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::Reflect;
    use crate::info::{ScalarKind, Typed};
    use crate::value::Value;

    #[test]
    fn scalar_round_trip() {
        assert_eq!(String::from_value(String::from("abc").to_value()), Ok(String::from("abc")));
        assert_eq!(Decimal::from_value(Value::Decimal(Decimal::ONE)), Ok(Decimal::ONE));
        assert_eq!(Uuid::nil().to_value(), Value::Guid(Uuid::nil()));
    }

    #[test]
    fn scalar_rejects_other_kind() {
        assert_eq!(u8::from_value(Value::I16(1)), Err(Value::I16(1)));
        assert_eq!(bool::from_value(Value::Null), Err(Value::Null));
    }

    #[test]
    fn scalar_type_info_is_cached() {
        assert!(core::ptr::eq(i16::type_info(), i16::type_info()));
        assert_eq!(f32::type_info().as_scalar(), Some(ScalarKind::F32));
        assert!(f32::type_info().ty().is::<f32>());
    }
}
