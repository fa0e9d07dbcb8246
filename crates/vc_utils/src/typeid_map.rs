use core::any::TypeId;
use core::fmt;

use crate::hash::NoOpHashState;
use crate::hash::hashbrown::HashMap;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map container with [`TypeId`] as the fixed key type.
///
/// `TypeId` is already a hash, so the map uses [`NoOpHashState`].
///
/// # Examples
///
/// ```
/// use vc_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::new();
/// map.insert_type::<u32>("u32");
///
/// assert_eq!(map.get_type::<u32>(), Some(&"u32"));
/// assert!(!map.contains_type::<i32>());
/// ```
#[derive(Clone)]
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<V> TypeIdMap<V> {
    /// Creates an empty `TypeIdMap`.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Returns a reference to the value stored for `type_id`.
    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Returns a reference to the value stored for `T`.
    #[inline(always)]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    /// Inserts a value, returning the previous one.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, v: V) -> Option<V> {
        self.0.insert(type_id, v)
    }

    /// Inserts a value for `T`, returning the previous one.
    #[inline(always)]
    pub fn insert_type<T: ?Sized + 'static>(&mut self, v: V) -> Option<V> {
        self.insert(TypeId::of::<T>(), v)
    }

    /// Removes the value stored for `type_id`.
    #[inline]
    pub fn remove(&mut self, type_id: &TypeId) -> Option<V> {
        self.0.remove(type_id)
    }

    /// Removes the value stored for `T`.
    #[inline(always)]
    pub fn remove_type<T: ?Sized + 'static>(&mut self) -> Option<V> {
        self.remove(&TypeId::of::<T>())
    }

    /// Returns `true` if the map contains a value for `type_id`.
    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    /// Returns `true` if the map contains a value for `T`.
    #[inline(always)]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.contains(&TypeId::of::<T>())
    }

    /// Returns the number of elements in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// An iterator visiting all key-value pairs in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&TypeId, &V)> {
        self.0.iter()
    }
}
