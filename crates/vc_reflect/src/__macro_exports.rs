//! Items used by the code generated from `#[derive(Reflect)]`.

use core::any::Any;

use crate::Reflect;
use crate::info::AccessError;
use crate::value::Value;

/// Downcasts an accessor target.
#[inline]
pub fn downcast_ref<T: Any>(target: &dyn Any) -> Result<&T, AccessError> {
    target.downcast_ref::<T>().ok_or(AccessError::WrongTarget {
        expected: core::any::type_name::<T>(),
    })
}

/// Downcasts an accessor target.
#[inline]
pub fn downcast_mut<T: Any>(target: &mut dyn Any) -> Result<&mut T, AccessError> {
    target.downcast_mut::<T>().ok_or(AccessError::WrongTarget {
        expected: core::any::type_name::<T>(),
    })
}

/// Unboxes a value passed to a setter.
#[inline]
pub fn from_value<T: Reflect>(value: Value) -> Result<T, AccessError> {
    T::from_value(value).map_err(|rejected| AccessError::Rejected {
        expected: core::any::type_name::<T>(),
        found: rejected.type_name(),
    })
}

#[cfg(feature = "auto_register")]
pub use auto_register::*;

#[cfg(feature = "auto_register")]
mod auto_register {
    pub use inventory;

    use crate::members::MemberTable;

    /// A type submitted with `#[reflect(auto_register)]`.
    pub struct __AutoRegisterType(pub fn() -> MemberTable);

    inventory::collect!(__AutoRegisterType);
}
