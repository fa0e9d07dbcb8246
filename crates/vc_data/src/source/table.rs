use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use vc_reflect::value::Value;

use crate::source::{Row, SourceError, TableReader};

// -----------------------------------------------------------------------------
// Column

/// A named column of a [`DataTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    name: Box<str>,
    ordinal: usize,
}

impl Column {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }
}

// -----------------------------------------------------------------------------
// DataTable

/// A fixed in-memory table.
///
/// Unlike a cursor, a table can be enumerated any number of times: each
/// [`DataRow`] is an independent, already positioned [`Row`]. Use
/// [`reader`](DataTable::reader) for a forward-only [`RecordSource`] view.
///
/// Serializes as a sequence of `column -> value` maps.
///
/// [`RecordSource`]: crate::RecordSource
///
/// # Examples
///
/// ```
/// use vc_data::{DataTable, Row};
/// use vc_reflect::value::Value;
///
/// let mut table = DataTable::new().with_column("Sku").with_column("Qty");
/// table.push_row([Value::from("A-1"), Value::I32(4)]).unwrap();
/// table.push_row([Value::from("B-2"), Value::Null]).unwrap();
///
/// assert!(table.push_row([Value::Null]).is_err());
///
/// let qty: Vec<Value> = table
///     .rows()
///     .map(|row| row.value_by_name("qty").unwrap())
///     .collect();
/// assert_eq!(qty, [Value::I32(4), Value::Null]);
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl DataTable {
    /// Creates an empty table without columns.
    #[inline]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Adds a column, see [`add_column`](DataTable::add_column).
    pub fn with_column(mut self, name: &str) -> Self {
        self.add_column(name);
        self
    }

    /// Adds a column and returns its ordinal.
    ///
    /// Rows already present get [`Value::Null`] in the new column.
    pub fn add_column(&mut self, name: &str) -> usize {
        let ordinal = self.columns.len();
        self.columns.push(Column {
            name: name.into(),
            ordinal,
        });
        for row in &mut self.rows {
            row.push(Value::Null);
        }
        ordinal
    }

    /// Appends a row, one value per column in column order.
    pub fn push_row(
        &mut self,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<&mut Self, SourceError> {
        let row: Vec<Value> = values.into_iter().collect();
        if row.len() != self.columns.len() {
            return Err(SourceError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(self)
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the row at `index`.
    pub fn row(&self, index: usize) -> Option<DataRow<'_>> {
        self.rows.get(index).map(|values| DataRow {
            columns: &self.columns,
            values,
        })
    }

    /// Iterates the rows in insertion order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = DataRow<'_>> + Clone {
        self.rows.iter().map(|values| DataRow {
            columns: &self.columns,
            values,
        })
    }

    /// Returns a forward-only cursor over the rows.
    #[inline]
    pub fn reader(&self) -> TableReader<'_> {
        TableReader::new(self)
    }

    #[inline]
    pub(super) fn row_values(&self, index: usize) -> Option<&[Value]> {
        self.rows.get(index).map(Vec::as_slice)
    }
}

impl fmt::Debug for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns.iter().map(Column::name).collect::<Vec<_>>())
            .field("rows", &self.rows.len())
            .finish()
    }
}

impl Serialize for DataTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

// -----------------------------------------------------------------------------
// DataRow

/// One row of a [`DataTable`].
#[derive(Clone, Copy)]
pub struct DataRow<'a> {
    columns: &'a [Column],
    values: &'a [Value],
}

impl<'a> DataRow<'a> {
    /// Returns the values in column order.
    #[inline]
    pub fn values(&self) -> &'a [Value] {
        self.values
    }
}

impl Row for DataRow<'_> {
    #[inline]
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    fn column_name(&self, ordinal: usize) -> Option<&str> {
        self.columns.get(ordinal).map(Column::name)
    }

    fn value(&self, ordinal: usize) -> Result<Value, SourceError> {
        match self.values.get(ordinal) {
            Some(value) => Ok(value.clone()),
            None => Err(SourceError::ColumnOutOfRange {
                ordinal,
                count: self.columns.len(),
            }),
        }
    }
}

impl fmt::Debug for DataRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.columns.iter().map(Column::name).zip(self.values))
            .finish()
    }
}

impl Serialize for DataRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(column.name(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use vc_reflect::rust_decimal::Decimal;
    use vc_reflect::value::Value;

    use super::DataTable;
    use crate::source::{Row, SourceError};

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

    #[test]
    fn rows_can_be_enumerated_twice() {
        let table = products();
        let first: Vec<_> = table.rows().map(|r| r.value(0).unwrap()).collect();
        let second: Vec<_> = table.rows().map(|r| r.value(0).unwrap()).collect();

        assert_eq!(first, second);
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn column_lookup_ignores_case() {
        let table = products();
        let row = table.row(0).unwrap();

        assert_eq!(row.ordinal("PRICE"), Some(2));
        assert_eq!(row.column_name(1), Some("Description"));
        assert_eq!(row.column_name(3), None);
        assert_eq!(
            row.value_by_name("price").unwrap(),
            Value::Decimal(Decimal::new(1999, 2))
        );
        assert!(matches!(
            row.value_by_name("Weight"),
            Err(SourceError::UnknownColumn { .. })
        ));
        assert_eq!(
            row.value(5),
            Err(SourceError::ColumnOutOfRange { ordinal: 5, count: 3 })
        );
    }

    #[test]
    fn row_width_is_checked() {
        let mut table = products();
        assert_eq!(
            table.push_row([Value::Null]).map(|_| ()),
            Err(SourceError::RowWidth {
                expected: 3,
                found: 1,
            })
        );
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn late_columns_are_null_filled() {
        let mut table = products();
        assert_eq!(table.add_column("Weight"), 3);
        assert_eq!(table.row(1).unwrap().value(3), Ok(Value::Null));
    }

    #[test]
    fn serializes_as_maps() {
        let json = serde_json::to_value(products()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "Sku": "ABC123", "Description": "Widget", "Price": "19.99" },
                { "Sku": "XYZ9", "Description": null, "Price": null }
            ])
        );
    }
}
