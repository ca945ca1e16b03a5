use crate::{Context, Cursor, Error, Mapper, Result, Row, RowSource};

/// Maps the first row of `source`.
///
/// Fails with a no-rows error when the source is empty. Rows after the first
/// are left unread.
pub fn one<T, S, M>(cx: &Context, mut source: S, mapper: &M) -> Result<T>
where
    T: 'static,
    S: RowSource,
    M: Mapper<T> + ?Sized,
{
    let columns = source.columns()?;
    let phases = mapper.phases(cx, &columns);

    if !source.next()? {
        return Err(Error::no_rows());
    }

    let mut row = Row::new(columns, cx.allow_unknown_columns());
    let link = phases.bind(&mut row)?;
    row.scan(&mut source)?;
    phases.materialize(link)
}

/// Maps every row of `source`, stopping at the first error.
pub fn all<T, S, M>(cx: &Context, source: S, mapper: &M) -> Result<Vec<T>>
where
    T: 'static,
    S: RowSource,
    M: Mapper<T> + ?Sized,
{
    let values = Cursor::new(cx, source, mapper)?.collect::<Result<Vec<_>>>()?;
    tracing::trace!(rows = values.len(), "mapped all rows");
    Ok(values)
}
