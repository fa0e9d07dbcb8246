use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{TypeInfo, VariantInfo};

/// A variant of a unit enum, carried as a [`Value`](crate::value::Value).
///
/// Holds the enum's [`TypeInfo`] and the variant index.
#[derive(Clone, Copy)]
pub struct EnumValue {
    info: &'static TypeInfo,
    index: usize,
}

impl EnumValue {
    /// Creates a new [`EnumValue`].
    ///
    /// `info` should describe an enum and `index` must be a valid variant index,
    /// otherwise accessors degrade to empty names and zero discriminants.
    #[inline]
    pub const fn new(info: &'static TypeInfo, index: usize) -> Self {
        Self { info, index }
    }

    /// Returns the enum's [`TypeInfo`].
    #[inline]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.info
    }

    /// Returns the `TypeId` of the enum.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.info.type_id()
    }

    /// Returns the full type path of the enum.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.info.type_path()
    }

    /// Check if the enum type is `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.info.ty().is::<T>()
    }

    /// Returns the variant index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the declared variant.
    pub fn variant(&self) -> Option<&'static VariantInfo> {
        self.info.as_enum()?.variant_at(self.index)
    }

    /// Returns the variant name.
    pub fn name(&self) -> &'static str {
        self.variant().map(VariantInfo::name).unwrap_or_default()
    }

    /// Returns the variant discriminant.
    pub fn discriminant(&self) -> i64 {
        self.variant()
            .map(VariantInfo::discriminant)
            .unwrap_or_default()
    }
}

impl PartialEq for EnumValue {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id() && self.index == other.index
    }
}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.info.ty().name(), self.name())
    }
}
