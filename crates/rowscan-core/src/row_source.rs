use crate::{bail, Result, Scan, Value};

/// The result set a mapper reads from.
///
/// Implementations adapt a database client's rows. Errors they raise should
/// be wrapped with [`Error::driver`](crate::Error::driver).
pub trait RowSource {
    /// Column names, in result order.
    fn columns(&self) -> Result<Vec<String>>;

    /// Advances to the next row. Returns `false` once the rows are exhausted.
    fn next(&mut self) -> Result<bool>;

    /// Writes the current row into `targets`, one per column.
    fn scan(&mut self, targets: &mut [&mut dyn Scan]) -> Result<()>;
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    fn columns(&self) -> Result<Vec<String>> {
        (**self).columns()
    }

    fn next(&mut self) -> Result<bool> {
        (**self).next()
    }

    fn scan(&mut self, targets: &mut [&mut dyn Scan]) -> Result<()> {
        (**self).scan(targets)
    }
}

/// An in-memory result set.
#[derive(Debug, Clone, Default)]
pub struct MemoryRows {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,

    /// Index of the current row plus one; zero before the first `next`.
    position: usize,
}

impl MemoryRows {
    pub fn new<I, S>(columns: I) -> MemoryRows
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryRows {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: vec![],
            position: 0,
        }
    }

    /// Appends a row. Values are given in column order.
    pub fn row<I, V>(mut self, values: I) -> MemoryRows
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.rows.push(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn push(&mut self, values: Vec<Value>) {
        self.rows.push(values);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RowSource for MemoryRows {
    fn columns(&self) -> Result<Vec<String>> {
        Ok(self.columns.clone())
    }

    fn next(&mut self) -> Result<bool> {
        if self.position >= self.rows.len() {
            return Ok(false);
        }
        self.position += 1;
        Ok(true)
    }

    fn scan(&mut self, targets: &mut [&mut dyn Scan]) -> Result<()> {
        let Some(row) = self.position.checked_sub(1).and_then(|i| self.rows.get(i)) else {
            bail!("scan called without a current row");
        };

        if targets.len() != row.len() {
            bail!(
                "expected {} scan targets, got {}",
                row.len(),
                targets.len()
            );
        }

        for (target, value) in targets.iter_mut().zip(row) {
            target.scan(value.clone())?;
        }

        Ok(())
    }
}
