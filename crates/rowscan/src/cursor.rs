use crate::{Context, Mapper, Phases, Result, Row, RowSource};

/// Maps the rows of a [`RowSource`] one at a time.
///
/// The column list is read and the mapper's phases are built once, when the
/// cursor is created. Each call to `next` then binds a fresh destination,
/// scans the current row into it and materializes it. The first error ends
/// the iteration.
pub struct Cursor<T, S> {
    source: S,
    row: Row,
    phases: Phases<T>,

    /// Rows materialized so far
    count: usize,

    done: bool,
}

impl<T: 'static, S: RowSource> Cursor<T, S> {
    pub fn new<M>(cx: &Context, source: S, mapper: &M) -> Result<Cursor<T, S>>
    where
        M: Mapper<T> + ?Sized,
    {
        let columns = source.columns()?;
        let phases = mapper.phases(cx, &columns);
        let row = Row::new(columns, cx.allow_unknown_columns());

        Ok(Cursor {
            source,
            row,
            phases,
            count: 0,
            done: false,
        })
    }

    /// Number of rows materialized so far.
    pub fn rows_read(&self) -> usize {
        self.count
    }

    /// Returns the underlying row source.
    pub fn into_inner(self) -> S {
        self.source
    }

    fn advance(&mut self) -> Result<Option<T>> {
        if !self.source.next()? {
            tracing::trace!(rows = self.count, "cursor exhausted");
            return Ok(None);
        }

        let link = self.phases.bind(&mut self.row)?;
        self.row.scan(&mut self.source)?;
        let value = self.phases.materialize(link)?;

        self.count += 1;
        Ok(Some(value))
    }
}

impl<T: 'static, S: RowSource> Iterator for Cursor<T, S> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if self.done {
            return None;
        }

        match self.advance() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<T, S> core::fmt::Debug for Cursor<T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("row", &self.row)
            .field("count", &self.count)
            .field("done", &self.done)
            .finish()
    }
}
