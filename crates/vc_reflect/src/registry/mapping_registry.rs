use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use arc_swap::ArcSwap;
use vc_utils::TypeIdMap;

use crate::Struct;
use crate::members::MemberTable;

type Snapshot = TypeIdMap<Arc<MemberTable>>;

// -----------------------------------------------------------------------------
// MappingRegistry

/// A store of [`MemberTable`]s, one per target type.
///
/// The registry is an explicit value: create one, keep it where the
/// population code can reach it (a field, a `static`, a context
/// parameter) and share it by reference.
///
/// Reads load an immutable snapshot without locking. Publishing a table
/// swaps in a new snapshot, so a table is never patched in place. Two
/// threads building the same type at once both do the work and the last
/// one wins, which is harmless because tables are immutable.
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, registry::MappingRegistry};
///
/// #[derive(Reflect, Default)]
/// struct Product {
///     sku: String,
/// }
///
/// let registry = MappingRegistry::new();
/// assert!(!registry.contains::<Product>());
///
/// let a = registry.get_or_build::<Product>();
/// let b = registry.get_or_build::<Product>();
///
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// assert_eq!(registry.len(), 1);
/// ```
pub struct MappingRegistry {
    tables: ArcSwap<Snapshot>,
}

impl Default for MappingRegistry {
    /// See [`MappingRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MappingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tables: ArcSwap::from_pointee(TypeIdMap::new()),
        }
    }

    /// Returns the table of `T` if it was already built.
    #[inline]
    pub fn get<T: Struct>(&self) -> Option<Arc<MemberTable>> {
        self.get_by_type_id(TypeId::of::<T>())
    }

    /// Returns the table of the type with the given `TypeId`.
    pub fn get_by_type_id(&self, type_id: TypeId) -> Option<Arc<MemberTable>> {
        self.tables.load().get(&type_id).cloned()
    }

    /// Returns the table of `T`, building and publishing it on first use.
    pub fn get_or_build<T: Struct>(&self) -> Arc<MemberTable> {
        match self.get::<T>() {
            Some(table) => table,
            None => self.publish(Arc::new(MemberTable::build::<T>())),
        }
    }

    /// Builds the table of `T` again and replaces the published one.
    pub fn rebuild<T: Struct>(&self) -> Arc<MemberTable> {
        let table = Arc::new(MemberTable::build::<T>());
        let type_id = TypeId::of::<T>();
        self.tables.rcu(|current| {
            let mut next = Snapshot::clone(current);
            next.insert(type_id, Arc::clone(&table));
            next
        });
        table
    }

    /// Removes the table of `T`, returning it if there was one.
    pub fn remove<T: Struct>(&self) -> Option<Arc<MemberTable>> {
        let type_id = TypeId::of::<T>();
        let previous = self.tables.rcu(|current| {
            let mut next = Snapshot::clone(current);
            next.remove(&type_id);
            next
        });
        previous.get(&type_id).cloned()
    }

    /// Check if the table of `T` has been built.
    #[inline]
    pub fn contains<T: Struct>(&self) -> bool {
        self.tables.load().contains_type::<T>()
    }

    /// Returns the number of published tables.
    #[inline]
    pub fn len(&self) -> usize {
        self.tables.load().len()
    }

    /// Returns `true` if no table has been published.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tables.load().is_empty()
    }

    /// Builds the tables of every type marked `#[reflect(auto_register)]`.
    ///
    /// Types that already have a table are left alone. Returns the number
    /// of tables added; always `0` without the `auto_register` feature.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_reflect::{derive::Reflect, registry::MappingRegistry};
    ///
    /// #[derive(Reflect, Default)]
    /// #[reflect(auto_register)]
    /// struct Order {
    ///     number: i64,
    /// }
    ///
    /// let registry = MappingRegistry::new();
    /// let added = registry.auto_register();
    ///
    /// # if cfg!(feature = "auto_register") {
    /// assert!(added >= 1);
    /// assert!(registry.contains::<Order>());
    /// assert_eq!(registry.auto_register(), 0);
    /// # }
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&self) -> usize {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::__AutoRegisterType;

            let mut added = 0;
            for entry in inventory::iter::<__AutoRegisterType> {
                let table = (entry.0)();
                if self.get_by_type_id(table.ty().id()).is_none() {
                    self.publish(Arc::new(table));
                    added += 1;
                }
            }
            added
        }
        #[cfg(not(feature = "auto_register"))]
        {
            0
        }
    }

    // Inserts `table` unless another thread published one first,
    // returning whichever table ends up in the snapshot.
    fn publish(&self, table: Arc<MemberTable>) -> Arc<MemberTable> {
        let type_id = table.ty().id();
        let previous = self.tables.rcu(|current| {
            if current.contains(&type_id) {
                return Arc::clone(current);
            }
            let mut next = Snapshot::clone(current);
            next.insert(type_id, Arc::clone(&table));
            Arc::new(next)
        });
        match previous.get(&type_id) {
            Some(existing) => Arc::clone(existing),
            None => table,
        }
    }
}

impl fmt::Debug for MappingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.tables.load();
        f.debug_list()
            .entries(snapshot.iter().map(|(_, table)| table.ty()))
            .finish()
    }
}
