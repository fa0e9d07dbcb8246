use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// DynValue

/// Object-safe operations an opaque value needs.
///
/// Auto implemented for every `Clone + PartialEq + Debug + Send + Sync` type.
pub trait DynValue: Any + Send + Sync + fmt::Debug {
    /// Clones the value into a new box.
    fn clone_box(&self) -> Box<dyn DynValue>;

    /// Compares with another opaque value, `false` if the types differ.
    fn dyn_eq(&self, other: &dyn DynValue) -> bool;

    /// Upcasts to [`Any`].
    fn as_any(&self) -> &dyn Any;

    /// Returns the type path of the concrete type.
    fn value_type_name(&self) -> &'static str;
}

impl<T: Any + Clone + PartialEq + fmt::Debug + Send + Sync> DynValue for T {
    fn clone_box(&self) -> Box<dyn DynValue> {
        Box::new(self.clone())
    }

    fn dyn_eq(&self, other: &dyn DynValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn value_type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

// -----------------------------------------------------------------------------
// OpaqueValue

/// A value of a type without built-in scalar support.
///
/// Assignable only to a member whose declared type is exactly the
/// contained type.
///
/// # Examples
///
/// ```
/// use vc_reflect::value::OpaqueValue;
///
/// let value = OpaqueValue::new(vec![1_u8, 2, 3]);
///
/// assert!(value.is::<Vec<u8>>());
/// assert_eq!(value.downcast_ref::<Vec<u8>>(), Some(&vec![1, 2, 3]));
/// assert_eq!(value.clone(), value);
/// ```
pub struct OpaqueValue(Box<dyn DynValue>);

impl OpaqueValue {
    /// Boxes `value`.
    #[inline]
    pub fn new<T: DynValue>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Returns the `TypeId` of the contained value.
    #[inline]
    pub fn value_type_id(&self) -> TypeId {
        self.0.as_any().type_id()
    }

    /// Returns the type path of the contained value.
    #[inline]
    pub fn value_type_name(&self) -> &'static str {
        self.0.value_type_name()
    }

    /// Check if the contained value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.value_type_id() == TypeId::of::<T>()
    }

    /// Returns a reference to the contained value if it is a `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl Clone for OpaqueValue {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl PartialEq for OpaqueValue {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(&*other.0)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
