use alloc::sync::Arc;
use core::ops::Deref;

use vc_reflect::Struct;
use vc_reflect::members::MemberTable;
use vc_reflect::registry::MappingRegistry;

/// The member table used for one operation.
pub(crate) enum TableRef<'a> {
    Borrowed(&'a MemberTable),
    Shared(Arc<MemberTable>),
    Owned(MemberTable),
}

impl Deref for TableRef<'_> {
    type Target = MemberTable;

    #[inline]
    fn deref(&self) -> &MemberTable {
        match self {
            Self::Borrowed(table) => *table,
            Self::Shared(table) => &**table,
            Self::Owned(table) => table,
        }
    }
}

/// A caller supplied table was built for another type.
pub(crate) struct Mismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

/// Picks the table of `T`: the explicit one, then the registry, then a
/// fresh build that is dropped after use.
pub(crate) fn resolve<'a, T: Struct>(
    table: Option<&'a MemberTable>,
    registry: Option<&'a MappingRegistry>,
) -> Result<TableRef<'a>, Mismatch> {
    match table {
        Some(table) if table.is_for::<T>() => Ok(TableRef::Borrowed(table)),
        Some(table) => Err(Mismatch {
            expected: core::any::type_name::<T>(),
            found: table.ty().path(),
        }),
        None => Ok(lookup::<T>(registry)),
    }
}

/// Takes the table of `T` from the registry, or builds a private one.
pub(crate) fn lookup<T: Struct>(registry: Option<&MappingRegistry>) -> TableRef<'_> {
    match registry {
        Some(registry) => TableRef::Shared(registry.get_or_build::<T>()),
        None => TableRef::Owned(MemberTable::build::<T>()),
    }
}
