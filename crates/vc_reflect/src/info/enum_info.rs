use alloc::boxed::Box;

// -----------------------------------------------------------------------------
// VariantInfo

/// A declared variant of a unit enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantInfo {
    name: &'static str,
    discriminant: i64,
}

impl VariantInfo {
    /// Creates a new [`VariantInfo`].
    #[inline]
    pub const fn new(name: &'static str, discriminant: i64) -> Self {
        Self { name, discriminant }
    }

    /// Returns the variant name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the variant discriminant.
    #[inline]
    pub const fn discriminant(&self) -> i64 {
        self.discriminant
    }
}

// -----------------------------------------------------------------------------
// EnumInfo

/// Declared variants of a unit-only enum, in declaration order.
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// enum Status {
///     Pending = 1,
///     Active = 2,
/// }
///
/// let info = Status::type_info().as_enum().unwrap();
///
/// assert_eq!(info.index_of("Active"), Some(1));
/// assert_eq!(info.index_of("active"), None);
/// assert_eq!(info.index_of_ignore_case("active"), Some(1));
/// assert_eq!(info.index_of_discriminant(1), Some(0));
/// ```
#[derive(Clone, Debug)]
pub struct EnumInfo {
    variants: Box<[VariantInfo]>,
}

impl EnumInfo {
    /// Creates a new [`EnumInfo`].
    pub fn new(variants: &[VariantInfo]) -> Self {
        Self {
            variants: variants.into(),
        }
    }

    /// Returns the variant at `index`.
    #[inline]
    pub fn variant_at(&self, index: usize) -> Option<&VariantInfo> {
        self.variants.get(index)
    }

    /// Returns the variants in declaration order.
    #[inline]
    pub fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    /// Returns the index of the variant named `name`, case-sensitive.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name == name)
    }

    /// Returns the index of the variant named `name`, ignoring case.
    pub fn index_of_ignore_case(&self, name: &str) -> Option<usize> {
        self.variants
            .iter()
            .position(|v| vc_utils::names_match(v.name, name))
    }

    /// Returns the index of the first variant with the given discriminant.
    pub fn index_of_discriminant(&self, discriminant: i64) -> Option<usize> {
        self.variants
            .iter()
            .position(|v| v.discriminant == discriminant)
    }

    /// The variant used as the enum's zero value: discriminant `0` if
    /// declared, otherwise the first variant.
    pub fn default_index(&self) -> Option<usize> {
        match self.index_of_discriminant(0) {
            Some(index) => Some(index),
            None if self.variants.is_empty() => None,
            None => Some(0),
        }
    }
}
