use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{TypeInfo, Typed};
use crate::value::Value;

impl<T: Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(TypeInfo::nullable::<T>)
    }
}

/// `None` is carried as [`Value::Null`].
impl<T: Reflect> Reflect for Option<T> {
    #[inline]
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ScalarKind, Typed};
    use crate::value::Value;

    #[test]
    fn option_type_info_per_instantiation() {
        let a = <Option<i32>>::type_info();
        let b = <Option<bool>>::type_info();

        assert!(a.ty().is::<Option<i32>>());
        assert!(b.ty().is::<Option<bool>>());
        assert_eq!(a.underlying().as_scalar(), Some(ScalarKind::I32));
        assert!(core::ptr::eq(a, <Option<i32>>::type_info()));
    }

    #[test]
    fn option_value_conversion() {
        assert_eq!(Some(3_i64).to_value(), Value::I64(3));
        assert_eq!(None::<i64>.to_value(), Value::Null);
        assert_eq!(<Option<i64>>::from_value(Value::I64(3)), Ok(Some(3)));
        assert_eq!(<Option<i64>>::from_value(Value::Null), Ok(None));
        assert_eq!(<Option<i64>>::from_value(Value::I32(3)), Err(Value::I32(3)));
    }
}
