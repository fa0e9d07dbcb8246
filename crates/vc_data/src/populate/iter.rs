use core::iter::FusedIterator;
use core::marker::PhantomData;

use vc_reflect::Struct;

use crate::populate::{PopulateError, Populator};
use crate::source::RecordSource;
use crate::tables::TableRef;

/// A lazy, single-pass sequence of populated targets.
///
/// Created by [`Populator::populate_lazy`]. Each item is built when it is
/// consumed. The source is closed when the sequence is exhausted, when an
/// item fails, on [`close`](PopulateIter::close), and on drop, so
/// abandoning the sequence early never leaks the source. The iterator is
/// fused: it yields nothing after the source is closed.
pub struct PopulateIter<'a, T, S: RecordSource> {
    populator: Populator<'a>,
    table: TableRef<'a>,
    source: S,
    done: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: Struct + Default, S: RecordSource> PopulateIter<'a, T, S> {
    pub(super) fn new(populator: Populator<'a>, table: TableRef<'a>, source: S) -> Self {
        Self {
            populator,
            table,
            source,
            done: false,
            _marker: PhantomData,
        }
    }

    /// Stops the sequence and closes the source.
    #[inline]
    pub fn close(mut self) {
        self.finish();
    }

    /// Returns the underlying source.
    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    fn next_item(&mut self) -> Result<Option<T>, PopulateError> {
        if !self.source.advance()? {
            return Ok(None);
        }
        let mut item = T::default();
        self.populator.fill(&self.table, &self.source, &mut item)?;
        Ok(Some(item))
    }
}

impl<T, S: RecordSource> PopulateIter<'_, T, S> {
    fn finish(&mut self) {
        self.done = true;
        self.source.close();
    }
}

impl<T: Struct + Default, S: RecordSource> Iterator for PopulateIter<'_, T, S> {
    type Item = Result<T, PopulateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_item() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.finish();
                None
            }
            Err(err) => {
                self.finish();
                Some(Err(err))
            }
        }
    }
}

impl<T: Struct + Default, S: RecordSource> FusedIterator for PopulateIter<'_, T, S> {}

impl<T, S: RecordSource> Drop for PopulateIter<'_, T, S> {
    fn drop(&mut self) {
        if !self.done {
            log::warn!(
                "lazy population of `{}` dropped before exhaustion, closing its source",
                core::any::type_name::<T>()
            );
            self.finish();
        }
    }
}
