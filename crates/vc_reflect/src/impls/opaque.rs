use alloc::vec::Vec;
use core::any::Any;

use crate::value::Value;

/// Takes a `T` out of a [`Value::Opaque`], returning the value back on a
/// type mismatch.
///
/// Used by [`impl_reflect_opaque!`](crate::impl_reflect_opaque).
pub fn opaque_from_value<T: Any + Clone>(value: Value) -> Result<T, Value> {
    match &value {
        Value::Opaque(opaque) => match opaque.downcast_ref::<T>() {
            Some(inner) => Ok(inner.clone()),
            None => Err(value),
        },
        _ => Err(value),
    }
}

/// Implements [`Typed`](crate::info::Typed) and [`Reflect`](crate::Reflect)
/// for a type carried as an [`OpaqueValue`](crate::value::OpaqueValue).
///
/// The type must be `Clone + PartialEq + Debug + Default + Send + Sync`,
/// its [`Default`] is the value a null source value maps to.
///
/// # Examples
///
/// ```
/// use vc_reflect::{impl_reflect_opaque, Reflect, info::Typed, value::Value};
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl_reflect_opaque!(Point);
///
/// let value = Point { x: 1, y: 2 }.to_value();
///
/// assert!(Point::type_info().accepts(&value));
/// assert_eq!(Point::from_value(value), Ok(Point { x: 1, y: 2 }));
/// assert_eq!(
///     Point::type_info().null_value(),
///     Point::default().to_value(),
/// );
/// ```
#[macro_export]
macro_rules! impl_reflect_opaque {
    ($ty:ty) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::NonGenericTypeInfoCell =
                    $crate::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init($crate::info::TypeInfo::opaque::<$ty>)
            }
        }

        impl $crate::Reflect for $ty {
            #[inline]
            fn to_value(&self) -> $crate::value::Value {
                $crate::value::Value::Opaque($crate::value::OpaqueValue::new(
                    ::core::clone::Clone::clone(self),
                ))
            }

            #[inline]
            fn from_value(
                value: $crate::value::Value,
            ) -> ::core::result::Result<Self, $crate::value::Value> {
                $crate::impls::opaque_from_value::<$ty>(value)
            }
        }
    };
}

impl_reflect_opaque!(Vec<u8>);

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::info::{TypeKind, Typed};
    use crate::value::Value;

    #[test]
    fn bytes_are_opaque() {
        let info = <Vec<u8>>::type_info();
        assert!(matches!(info.kind(), TypeKind::Opaque));
        assert_eq!(info.null_value(), Vec::<u8>::new().to_value());

        let value = vec![1_u8, 2].to_value();
        assert!(info.accepts(&value));
        assert_eq!(<Vec<u8>>::from_value(value), Ok(vec![1, 2]));
        assert_eq!(<Vec<u8>>::from_value(Value::U8(1)), Err(Value::U8(1)));
    }
}
