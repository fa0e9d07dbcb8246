use vc_reflect::value::Value;

use crate::source::{DataTable, RecordSource, Row, SourceError};

/// A forward-only [`RecordSource`] over a [`DataTable`].
///
/// # Examples
///
/// ```
/// use vc_data::{DataTable, RecordSource, Row, SourceError};
/// use vc_reflect::value::Value;
///
/// let mut table = DataTable::new().with_column("id");
/// table.push_row([Value::I64(1)]).unwrap();
///
/// let mut reader = table.reader();
/// assert_eq!(reader.value(0), Err(SourceError::NotPositioned));
///
/// assert!(reader.advance().unwrap());
/// assert_eq!(reader.value(0), Ok(Value::I64(1)));
/// assert!(!reader.advance().unwrap());
///
/// reader.close();
/// assert_eq!(reader.advance(), Err(SourceError::Closed));
/// ```
#[derive(Clone, Debug)]
pub struct TableReader<'a> {
    table: &'a DataTable,
    // `None` before the first row, `row_count` past the last one.
    position: Option<usize>,
    closed: bool,
}

impl<'a> TableReader<'a> {
    #[inline]
    pub(super) const fn new(table: &'a DataTable) -> Self {
        Self {
            table,
            position: None,
            closed: false,
        }
    }

    /// Returns the table being read.
    #[inline]
    pub const fn table(&self) -> &'a DataTable {
        self.table
    }

    /// Returns the index of the current row.
    #[inline]
    pub fn position(&self) -> Option<usize> {
        self.position.filter(|&p| p < self.table.row_count())
    }

    fn current(&self) -> Result<&'a [Value], SourceError> {
        if self.closed {
            return Err(SourceError::Closed);
        }
        self.position
            .and_then(|p| self.table.row_values(p))
            .ok_or(SourceError::NotPositioned)
    }
}

impl Row for TableReader<'_> {
    #[inline]
    fn column_count(&self) -> usize {
        self.table.column_count()
    }

    #[inline]
    fn column_name(&self, ordinal: usize) -> Option<&str> {
        self.table.columns().get(ordinal).map(|c| c.name())
    }

    fn value(&self, ordinal: usize) -> Result<Value, SourceError> {
        match self.current()?.get(ordinal) {
            Some(value) => Ok(value.clone()),
            None => Err(SourceError::ColumnOutOfRange {
                ordinal,
                count: self.table.column_count(),
            }),
        }
    }

    #[inline]
    fn check_readable(&self) -> Result<(), SourceError> {
        self.current().map(|_| ())
    }
}

impl RecordSource for TableReader<'_> {
    fn advance(&mut self) -> Result<bool, SourceError> {
        if self.closed {
            return Err(SourceError::Closed);
        }
        let rows = self.table.row_count();
        let next = self.position.map_or(0, |p| (p + 1).min(rows));
        self.position = Some(next);
        Ok(next < rows)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            log::debug!("table reader closed after {:?} rows", self.position);
        }
    }

    #[inline]
    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use vc_reflect::value::Value;

    use crate::source::{DataTable, RecordSource, Row, SourceError};

    fn table() -> DataTable {
        let mut table = DataTable::new().with_column("n");
        for n in 0..3 {
            table.push_row([Value::I32(n)]).unwrap();
        }
        table
    }

    #[test]
    fn reads_every_row_once() {
        let table = table();
        let mut reader = table.reader();
        let mut seen = Vec::new();
        while reader.advance().unwrap() {
            seen.push(reader.value(0).unwrap());
        }

        assert_eq!(seen, [Value::I32(0), Value::I32(1), Value::I32(2)]);
        assert_eq!(reader.position(), None);
        assert_eq!(reader.value(0), Err(SourceError::NotPositioned));
        assert!(!reader.advance().unwrap());
    }

    #[test]
    fn closed_reader_refuses_reads() {
        let table = table();
        let mut reader = table.reader();
        assert!(reader.advance().unwrap());

        reader.close();
        reader.close();

        assert!(reader.is_closed());
        assert_eq!(reader.value(0), Err(SourceError::Closed));
        assert_eq!(reader.check_readable(), Err(SourceError::Closed));
        assert_eq!(reader.column_name(0), Some("n"));
    }

    #[test]
    fn empty_table() {
        let table = DataTable::new().with_column("n");
        let mut reader = table.reader();
        assert!(!reader.advance().unwrap());
        assert_eq!(reader.value(0), Err(SourceError::NotPositioned));
        assert_eq!(reader.check_readable(), Err(SourceError::NotPositioned));
    }

    #[test]
    fn borrowed_reader_is_a_source() {
        fn drain(mut source: impl RecordSource) -> usize {
            let mut n = 0;
            while source.advance().unwrap() {
                n += 1;
            }
            source.close();
            n
        }

        let table = table();
        let mut reader = table.reader();
        assert_eq!(drain(&mut reader), 3);
        assert!(reader.is_closed());
    }
}
