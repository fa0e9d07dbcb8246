use vc_reflect::value::Value;

use crate::source::SourceError;

// -----------------------------------------------------------------------------
// Row

/// Column metadata and value access for one row.
///
/// Ordinals are zero-based. Values are owned copies, absent values are
/// [`Value::Null`].
pub trait Row {
    /// Returns the number of columns.
    fn column_count(&self) -> usize;

    /// Returns the name of the column at `ordinal`.
    fn column_name(&self, ordinal: usize) -> Option<&str>;

    /// Returns the value of the column at `ordinal` in the current row.
    fn value(&self, ordinal: usize) -> Result<Value, SourceError>;

    /// Returns the ordinal of the first column named `name`, ignoring case.
    fn ordinal(&self, name: &str) -> Option<usize> {
        (0..self.column_count()).find(|&ordinal| {
            self.column_name(ordinal)
                .is_some_and(|column| vc_utils::names_match(column, name))
        })
    }

    /// Checks that the current row can be read.
    ///
    /// Sources with a cursor report [`SourceError::Closed`] or
    /// [`SourceError::NotPositioned`] here even when no column is read.
    #[inline]
    fn check_readable(&self) -> Result<(), SourceError> {
        Ok(())
    }

    /// Returns the value of the column named `name`, ignoring case.
    fn value_by_name(&self, name: &str) -> Result<Value, SourceError> {
        match self.ordinal(name) {
            Some(ordinal) => self.value(ordinal),
            None => Err(SourceError::UnknownColumn { name: name.into() }),
        }
    }
}

impl<R: Row + ?Sized> Row for &R {
    #[inline]
    fn column_count(&self) -> usize {
        (**self).column_count()
    }

    #[inline]
    fn column_name(&self, ordinal: usize) -> Option<&str> {
        (**self).column_name(ordinal)
    }

    #[inline]
    fn value(&self, ordinal: usize) -> Result<Value, SourceError> {
        (**self).value(ordinal)
    }

    #[inline]
    fn check_readable(&self) -> Result<(), SourceError> {
        (**self).check_readable()
    }
}

impl<R: Row + ?Sized> Row for &mut R {
    #[inline]
    fn column_count(&self) -> usize {
        (**self).column_count()
    }

    #[inline]
    fn column_name(&self, ordinal: usize) -> Option<&str> {
        (**self).column_name(ordinal)
    }

    #[inline]
    fn value(&self, ordinal: usize) -> Result<Value, SourceError> {
        (**self).value(ordinal)
    }

    #[inline]
    fn check_readable(&self) -> Result<(), SourceError> {
        (**self).check_readable()
    }
}

// -----------------------------------------------------------------------------
// RecordSource

/// A forward-only cursor over rows.
///
/// A source starts before its first row, [`advance`](RecordSource::advance)
/// moves to the next one. The [`Row`] methods read the current row. Once
/// closed, a source refuses every further read with [`SourceError::Closed`].
///
/// A source has a single consumer, it is not meant to be shared.
pub trait RecordSource: Row {
    /// Moves to the next row, returns `false` past the last one.
    fn advance(&mut self) -> Result<bool, SourceError>;

    /// Releases the source. Closing twice is a no-op.
    fn close(&mut self);

    /// Returns `true` once the source is closed.
    fn is_closed(&self) -> bool;
}

impl<S: RecordSource + ?Sized> RecordSource for &mut S {
    #[inline]
    fn advance(&mut self) -> Result<bool, SourceError> {
        (**self).advance()
    }

    #[inline]
    fn close(&mut self) {
        (**self).close();
    }

    #[inline]
    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
