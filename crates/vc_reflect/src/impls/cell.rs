//! Containers for static storage of type information.
//!
//! This is usually used to implement [`Typed`](crate::info::Typed).
//!
//! - [`NonGenericTypeInfoCell`]: an [`OnceLock`], almost no additional expenses.
//! - [`GenericTypeInfoCell`]: the `static CELL` inside a generic function is
//!   shared by every instantiation, so the inner is a [`TypeIdMap`] wrapped
//!   in [`RwLock`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use vc_utils::TypeIdMap;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Container for static storage of non-generic type information.
///
/// # Examples
///
/// ```
/// use vc_reflect::impls::NonGenericTypeInfoCell;
/// use vc_reflect::info::{ScalarKind, TypeInfo, Typed};
///
/// struct Celsius(f64);
///
/// impl Typed for Celsius {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::scalar::<Self>(ScalarKind::F64))
///     }
/// }
///
/// assert!(core::ptr::eq(Celsius::type_info(), Celsius::type_info()));
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns a reference to the info stored in the cell.
    ///
    /// If the cell is empty, it is filled with the result of `f`.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericTypeInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Container for static storage of type information with generics.
///
/// # Examples
///
/// ```
/// use vc_reflect::impls::GenericTypeInfoCell;
/// use vc_reflect::info::{TypeInfo, Typed};
///
/// struct Wrapper<T>(T);
///
/// impl<T: Typed> Typed for Wrapper<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(TypeInfo::structure::<Self>)
///     }
/// }
///
/// assert!(<Wrapper<i32>>::type_info().ty().is::<Wrapper<i32>>());
/// assert!(<Wrapper<u8>>::type_info().ty().is::<Wrapper<u8>>());
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for `G`, generating it with `f` on first access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(
        &self,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeInfo) -> &'static TypeInfo {
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have won the race between the read and write lock.
        if let Some(&info) = map.get(&type_id) {
            return info;
        }
        let info: &'static TypeInfo = Box::leak(Box::new(value));
        map.insert(type_id, info);
        info
    }
}

impl Default for GenericTypeInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
