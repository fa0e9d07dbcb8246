//! Filling declared targets from record sources.
//!
//! For each column of the current row, [`Populator`] folds the column name,
//! drops it if the skip list names it, finds the member with that name and
//! assigns the [coerced](crate::coerce) column value through the member's
//! setter. Columns without a member are ignored unless the populator is
//! [strict](Populator::strict). Read-only members are never written.
//!
//! Three shapes are provided:
//!
//! - [`Populator::populate`]: one row into an existing target.
//! - [`Populator::populate_list`]: every remaining row into new targets.
//! - [`Populator::populate_lazy`]: the same, one target per iteration.
//!
//! The last two always close their source.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod iter;

// -----------------------------------------------------------------------------
// Exports

pub use error::PopulateError;
pub use iter::PopulateIter;

use alloc::vec::Vec;
use core::any::Any;

use vc_reflect::Struct;
use vc_reflect::members::MemberTable;
use vc_reflect::registry::MappingRegistry;
use vc_utils::NameSet;

use crate::coerce::coerce;
use crate::source::{RecordSource, Row};
use crate::tables::{self, TableRef};

// -----------------------------------------------------------------------------
// Populator

/// Options of one population pass.
///
/// The member table is taken from [`with_table`](Populator::with_table),
/// then from [`with_registry`](Populator::with_registry); without either it
/// is built for the call and dropped afterwards.
///
/// # Examples
///
/// ```
/// use vc_data::{DataTable, NameSet, Populator, RecordSource};
/// use vc_reflect::{derive::Reflect, rust_decimal::Decimal, value::Value};
///
/// #[derive(Reflect, Default, Debug)]
/// struct Product {
///     sku: String,
///     description: String,
///     price: Decimal,
/// }
///
/// let mut table = DataTable::new()
///     .with_column("Sku")
///     .with_column("Description")
///     .with_column("Price");
/// table
///     .push_row([
///         Value::from("ABC123"),
///         Value::from("Widget"),
///         Value::Decimal("19.99".parse().unwrap()),
///     ])
///     .unwrap();
///
/// let mut reader = table.reader();
/// let products: Vec<Product> = Populator::new().populate_list(&mut reader).unwrap();
///
/// assert_eq!(products[0].sku, "ABC123");
/// assert_eq!(products[0].price, Decimal::new(1999, 2));
/// assert!(reader.is_closed());
///
/// let skip: NameSet = ["description"].into_iter().collect();
/// let mut product = Product::default();
/// Populator::new()
///     .skip(&skip)
///     .populate(&table.row(0).unwrap(), &mut product)
///     .unwrap();
///
/// assert_eq!(product.description, "");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Populator<'a> {
    skip: Option<&'a NameSet>,
    table: Option<&'a MemberTable>,
    registry: Option<&'a MappingRegistry>,
    strict: bool,
}

impl<'a> Populator<'a> {
    /// Creates a lenient populator without skip list.
    #[inline]
    pub const fn new() -> Self {
        Self {
            skip: None,
            table: None,
            registry: None,
            strict: false,
        }
    }

    /// Excludes the named columns from population.
    #[inline]
    pub fn skip(mut self, skip: &'a NameSet) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Uses a prebuilt member table.
    ///
    /// The table must have been built for the populated type, otherwise the
    /// operation fails with [`PopulateError::MismatchedTable`].
    #[inline]
    pub fn with_table(mut self, table: &'a MemberTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Takes member tables from `registry`, building them on first use.
    #[inline]
    pub fn with_registry(mut self, registry: &'a MappingRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Makes columns without a matching member an error.
    ///
    /// Skipped columns are never reported.
    #[inline]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Populates `target` from the current row.
    pub fn populate<T: Struct>(
        &self,
        row: &(impl Row + ?Sized),
        target: &mut T,
    ) -> Result<(), PopulateError> {
        let table = self.resolve::<T>()?;
        self.fill(&table, row, target)
    }

    /// Populates a new `T` from each remaining row of `source`.
    ///
    /// The source is closed when this returns, on success and on failure.
    /// Pass `&mut source` to inspect it afterwards.
    pub fn populate_list<T, S>(&self, source: S) -> Result<Vec<T>, PopulateError>
    where
        T: Struct + Default,
        S: RecordSource,
    {
        let mut guard = CloseGuard(source);
        let table = self.resolve::<T>()?;
        let source = &mut guard.0;

        let mut items = Vec::new();
        while source.advance()? {
            let mut item = T::default();
            self.fill(&table, &*source, &mut item)?;
            items.push(item);
        }
        Ok(items)
    }

    /// Returns a lazy sequence populating a new `T` per row of `source`.
    ///
    /// If the member table cannot be resolved the source is closed at once.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_data::{DataTable, Populator, RecordSource};
    /// use vc_reflect::{derive::Reflect, value::Value};
    ///
    /// #[derive(Reflect, Default)]
    /// struct Line {
    ///     number: i32,
    /// }
    ///
    /// let mut table = DataTable::new().with_column("number");
    /// for n in 1..=3 {
    ///     table.push_row([Value::I32(n)]).unwrap();
    /// }
    ///
    /// let mut reader = table.reader();
    /// let first = Populator::new()
    ///     .populate_lazy::<Line, _>(&mut reader)
    ///     .unwrap()
    ///     .next()
    ///     .unwrap()
    ///     .unwrap();
    ///
    /// assert_eq!(first.number, 1);
    /// assert!(reader.is_closed());
    /// ```
    pub fn populate_lazy<T, S>(
        &self,
        mut source: S,
    ) -> Result<PopulateIter<'a, T, S>, PopulateError>
    where
        T: Struct + Default,
        S: RecordSource,
    {
        match self.resolve::<T>() {
            Ok(table) => Ok(PopulateIter::new(*self, table, source)),
            Err(err) => {
                source.close();
                Err(err)
            }
        }
    }

    fn resolve<T: Struct>(&self) -> Result<TableRef<'a>, PopulateError> {
        tables::resolve::<T>(self.table, self.registry).map_err(|m| {
            PopulateError::MismatchedTable {
                expected: m.expected,
                found: m.found,
            }
        })
    }

    fn fill<R: Row + ?Sized>(
        &self,
        table: &MemberTable,
        row: &R,
        target: &mut dyn Any,
    ) -> Result<(), PopulateError> {
        row.check_readable()?;
        for ordinal in 0..row.column_count() {
            let Some(column) = row.column_name(ordinal) else {
                continue;
            };
            let key = vc_utils::fold_name(column);

            if self.skip.is_some_and(|skip| skip.contains_folded(&key)) {
                log::trace!("column `{column}` is in the skip list");
                continue;
            }

            let Some(member) = table.get_folded(&key) else {
                if self.strict {
                    return Err(PopulateError::UnmappedColumn {
                        column: column.into(),
                    });
                }
                log::trace!("column `{column}` matches no member of `{}`", table.ty());
                continue;
            };

            if !member.is_writable() {
                log::trace!("member `{}` is read-only", member.name());
                continue;
            }

            let raw = row.value(ordinal)?;
            let value = coerce(raw, member.type_info()).map_err(|source| {
                PopulateError::Coercion {
                    column: column.into(),
                    member: member.name(),
                    source,
                }
            })?;
            member
                .set(target, value)
                .map_err(|source| PopulateError::Assignment {
                    member: member.name(),
                    source,
                })?;
        }
        Ok(())
    }
}

struct CloseGuard<S: RecordSource>(S);

impl<S: RecordSource> Drop for CloseGuard<S> {
    #[inline]
    fn drop(&mut self) {
        self.0.close();
    }
}

// -----------------------------------------------------------------------------
// Free functions

/// Populates `target` from the current row of `row`.
///
/// See [`Populator::populate`].
pub fn populate<T: Struct>(
    row: &(impl Row + ?Sized),
    target: &mut T,
    skip: Option<&NameSet>,
    table: Option<&MemberTable>,
) -> Result<(), PopulateError> {
    options(skip, table).populate(row, target)
}

/// Populates a new `T` from each remaining row, then closes the source.
///
/// See [`Populator::populate_list`].
pub fn populate_list<T, S>(
    source: S,
    skip: Option<&NameSet>,
    table: Option<&MemberTable>,
) -> Result<Vec<T>, PopulateError>
where
    T: Struct + Default,
    S: RecordSource,
{
    options(skip, table).populate_list(source)
}

/// Returns a lazy sequence of populated targets.
///
/// See [`Populator::populate_lazy`].
pub fn populate_lazy<'a, T, S>(
    source: S,
    skip: Option<&'a NameSet>,
    table: Option<&'a MemberTable>,
) -> Result<PopulateIter<'a, T, S>, PopulateError>
where
    T: Struct + Default,
    S: RecordSource,
{
    options(skip, table).populate_lazy(source)
}

fn options<'a>(skip: Option<&'a NameSet>, table: Option<&'a MemberTable>) -> Populator<'a> {
    Populator {
        skip,
        table,
        registry: None,
        strict: false,
    }
}

#[cfg(test)]
mod tests {
    use vc_reflect::derive::Reflect;
    use vc_reflect::members::MemberTable;
    use vc_reflect::registry::MappingRegistry;
    use vc_reflect::rust_decimal::Decimal;
    use vc_reflect::value::Value;
    use vc_utils::NameSet;

    use super::{PopulateError, Populator};
    use crate::coerce::CoercionError;
    use crate::source::{DataTable, RecordSource, Row, SourceError};

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Product {
        sku: String,
        description: String,
        price: Decimal,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Account {
        #[reflect(readonly)]
        id: i64,
        #[reflect(rename = "UserName")]
        user_name: String,
        password: String,
        #[reflect(rename = "IsActive")]
        is_active: bool,
        logins: i32,
        nickname: Option<String>,
    }

    fn products() -> DataTable {
        let mut table = DataTable::new()
            .with_column("Sku")
            .with_column("Description")
            .with_column("Price");
        table
            .push_row([
                Value::from("ABC123"),
                Value::from("Widget"),
                Value::Decimal(Decimal::new(1999, 2)),
            ])
            .unwrap()
            .push_row([Value::from("XYZ9"), Value::Null, Value::Null])
            .unwrap();
        table
    }

    fn accounts() -> DataTable {
        let mut table = DataTable::new()
            .with_column("ID")
            .with_column("UserName")
            .with_column("Password")
            .with_column("IsActive")
            .with_column("Logins")
            .with_column("MiddleName")
            .with_column("Nickname");
        table
            .push_row([
                Value::I64(7),
                Value::from("root"),
                Value::from("hunter2"),
                Value::I64(1),
                Value::I64(42),
                Value::from("Q"),
                Value::Null,
            ])
            .unwrap()
            .push_row([
                Value::I64(8),
                Value::from("guest"),
                Value::Null,
                Value::I64(0),
                Value::I32(3),
                Value::Null,
                Value::from("g"),
            ])
            .unwrap();
        table
    }

    #[test]
    fn populates_matching_columns() {
        let table = products();
        let mut product = Product::default();
        Populator::new()
            .populate(&table.row(0).unwrap(), &mut product)
            .unwrap();

        assert_eq!(
            product,
            Product {
                sku: "ABC123".into(),
                description: "Widget".into(),
                price: Decimal::new(1999, 2),
            }
        );
    }

    #[test]
    fn null_columns_reset_to_zero() {
        let table = products();
        let mut product = Product {
            description: "stale".into(),
            price: Decimal::ONE,
            ..Default::default()
        };
        Populator::new()
            .populate(&table.row(1).unwrap(), &mut product)
            .unwrap();

        assert_eq!(product.description, "");
        assert_eq!(product.price, Decimal::ZERO);
    }

    #[test]
    fn integer_columns_feed_bool_and_narrow_members() {
        let table = accounts();
        let mut account = Account::default();
        super::populate(&table.row(0).unwrap(), &mut account, None, None).unwrap();

        assert!(account.is_active);
        assert_eq!(account.logins, 42);
        assert_eq!(account.user_name, "root");
        assert_eq!(account.nickname, None);
        // read-only
        assert_eq!(account.id, 0);

        super::populate(&table.row(1).unwrap(), &mut account, None, None).unwrap();
        assert!(!account.is_active);
        assert_eq!(account.logins, 3);
        assert_eq!(account.nickname.as_deref(), Some("g"));
    }

    #[test]
    fn skip_list_wins() {
        let table = accounts();
        let skip: NameSet = ["password"].into_iter().collect();
        let mut account = Account {
            password: "unchanged".into(),
            ..Default::default()
        };
        super::populate(&table.row(0).unwrap(), &mut account, Some(&skip), None).unwrap();

        assert_eq!(account.password, "unchanged");
        assert_eq!(account.user_name, "root");
    }

    #[test]
    fn unmatched_columns_are_ignored_unless_strict() {
        let mut table = DataTable::new().with_column("sku").with_column("MiddleName");
        table
            .push_row([Value::from("A"), Value::from("Q")])
            .unwrap();
        let row = table.row(0).unwrap();

        let mut product = Product::default();
        Populator::new().populate(&row, &mut product).unwrap();
        assert_eq!(product.sku, "A");

        let err = Populator::new()
            .strict(true)
            .populate(&row, &mut Product::default())
            .unwrap_err();
        assert_eq!(
            err,
            PopulateError::UnmappedColumn {
                column: "MiddleName".into(),
            }
        );

        let skip: NameSet = ["middlename"].into_iter().collect();
        Populator::new()
            .strict(true)
            .skip(&skip)
            .populate(&row, &mut Product::default())
            .unwrap();
    }

    #[test]
    fn coercion_failure_aborts() {
        let mut table = DataTable::new().with_column("Price");
        table.push_row([Value::from("cheap")]).unwrap();

        let err = Populator::new()
            .populate(&table.row(0).unwrap(), &mut Product::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PopulateError::Coercion {
                member: "price",
                source: CoercionError::NotAssignable { .. },
                ..
            }
        ));
    }

    #[test]
    fn list_closes_source_on_success_and_failure() {
        let table = products();
        let mut reader = table.reader();
        let items: Vec<Product> = Populator::new().populate_list(&mut reader).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].sku, "XYZ9");
        assert!(reader.is_closed());

        let mut bad = products();
        bad.push_row([Value::from("Z"), Value::I64(3), Value::Null])
            .unwrap();
        let mut reader = bad.reader();
        let result = super::populate_list::<Product, _>(&mut reader, None, None);
        assert!(matches!(result, Err(PopulateError::Coercion { .. })));
        assert!(reader.is_closed());
    }

    #[test]
    fn closed_source_is_a_state_error() {
        let table = products();
        let mut reader = table.reader();
        reader.close();

        let result = Populator::new().populate_list::<Product, _>(&mut reader);
        assert_eq!(result, Err(PopulateError::Source(SourceError::Closed)));

        let reader = table.reader();
        let result = Populator::new().populate(&reader, &mut Product::default());
        assert_eq!(result, Err(PopulateError::Source(SourceError::NotPositioned)));
    }

    #[test]
    fn source_state_is_checked_without_matching_columns() {
        let mut table = DataTable::new().with_column("MiddleName");
        table.push_row([Value::String("Grace".into())]).unwrap();

        let reader = table.reader();
        let result = Populator::new().populate(&reader, &mut Product::default());
        assert_eq!(result, Err(PopulateError::Source(SourceError::NotPositioned)));

        let mut reader = table.reader();
        assert!(reader.advance().unwrap());
        assert_eq!(Populator::new().populate(&reader, &mut Product::default()), Ok(()));

        reader.close();
        let result = Populator::new().populate(&reader, &mut Product::default());
        assert_eq!(result, Err(PopulateError::Source(SourceError::Closed)));
    }

    #[test]
    fn mismatched_table_is_rejected() {
        let wrong = MemberTable::build::<Account>();
        let table = products();
        let mut reader = table.reader();

        let err = Populator::new()
            .with_table(&wrong)
            .populate_lazy::<Product, _>(&mut reader)
            .err();
        assert!(matches!(err, Some(PopulateError::MismatchedTable { .. })));
        assert!(reader.is_closed());

        let err = Populator::new()
            .with_table(&wrong)
            .populate(&table.row(0).unwrap(), &mut Product::default())
            .unwrap_err();
        assert!(matches!(err, PopulateError::MismatchedTable { .. }));
    }

    #[test]
    fn prebuilt_and_registry_tables() {
        let table = products();
        let members = MemberTable::build::<Product>();
        let registry = MappingRegistry::new();

        let a: Vec<Product> =
            super::populate_list(table.reader(), None, Some(&members)).unwrap();
        let b: Vec<Product> = Populator::new()
            .with_registry(&registry)
            .populate_list(table.reader())
            .unwrap();

        assert_eq!(a, b);
        assert!(registry.contains::<Product>());
    }

    #[test]
    fn lazy_yields_on_demand_and_closes_when_exhausted() {
        let table = products();
        let mut reader = table.reader();
        {
            let mut iter = Populator::new()
                .populate_lazy::<Product, _>(&mut reader)
                .unwrap();
            assert_eq!(iter.source().position(), None);

            let first = iter.next().unwrap().unwrap();
            assert_eq!(first.sku, "ABC123");
            assert_eq!(iter.source().position(), Some(0));

            assert!(iter.next().unwrap().is_ok());
            assert!(iter.next().is_none());
            assert!(iter.source().is_closed());
            assert!(iter.next().is_none());
        }
        assert!(reader.is_closed());
    }

    #[test]
    fn lazy_closes_on_early_drop_and_explicit_close() {
        let table = products();

        let mut reader = table.reader();
        let mut iter = super::populate_lazy::<Product, _>(&mut reader, None, None).unwrap();
        let _ = iter.next();
        drop(iter);
        assert!(reader.is_closed());

        let mut reader = table.reader();
        Populator::new()
            .populate_lazy::<Product, _>(&mut reader)
            .unwrap()
            .close();
        assert!(reader.is_closed());
    }

    #[test]
    fn lazy_stops_after_error() {
        let mut table = DataTable::new().with_column("Price");
        table.push_row([Value::from("cheap")]).unwrap();
        table.push_row([Value::Decimal(Decimal::ONE)]).unwrap();

        let items: Vec<_> = Populator::new()
            .populate_lazy::<Product, _>(table.reader())
            .unwrap()
            .collect();

        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[test]
    fn value_by_name_on_row() {
        let table = accounts();
        let row = table.row(0).unwrap();
        assert_eq!(row.value_by_name("isactive"), Ok(Value::I64(1)));
    }
}
