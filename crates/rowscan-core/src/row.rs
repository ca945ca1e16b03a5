use crate::{err, Error, Result, RowSource, Scan};
use crate::scan::Discard;

/// Per-query binding context.
///
/// Bind phases schedule a scan target for each column they want; the row
/// source then writes the current row through those targets. The same `Row`
/// is reused for every row of a query: scanning clears all scheduled targets.
pub struct Row {
    columns: Vec<String>,

    /// One pending target per column.
    targets: Vec<Option<Box<dyn Scan>>>,

    /// Names passed to [`Row::schedule_scan`] that match no column.
    unknown: Vec<String>,

    allow_unknown: bool,
}

impl Row {
    pub fn new(columns: Vec<String>, allow_unknown: bool) -> Row {
        let targets = columns.iter().map(|_| None).collect();
        Row {
            columns,
            targets,
            unknown: vec![],
            allow_unknown,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn allow_unknown(&self) -> bool {
        self.allow_unknown
    }

    /// Schedules `target` for the first column called `name`.
    ///
    /// A column scheduled twice keeps the last target. An unknown name is
    /// remembered and reported when the row is scanned.
    pub fn schedule_scan(&mut self, name: &str, target: impl Scan + 'static) {
        match self.columns.iter().position(|column| column == name) {
            Some(index) => self.targets[index] = Some(Box::new(target)),
            None => self.unknown.push(name.to_string()),
        }
    }

    pub fn schedule_scan_by_index(
        &mut self,
        index: usize,
        target: impl Scan + 'static,
    ) -> Result<()> {
        let count = self.columns.len();
        let slot = self
            .targets
            .get_mut(index)
            .ok_or_else(|| err!("column index {index} out of range for {count} columns"))?;
        *slot = Some(Box::new(target));
        Ok(())
    }

    /// Verifies every column has a target, filling gaps with [`Discard`]
    /// when unknown columns are allowed.
    pub fn check(&mut self) -> Result<()> {
        if !self.unknown.is_empty() {
            return Err(Error::unknown_columns(std::mem::take(&mut self.unknown)));
        }

        if self.allow_unknown {
            for target in &mut self.targets {
                if target.is_none() {
                    *target = Some(Box::new(Discard));
                }
            }
            return Ok(());
        }

        let unbound = self
            .columns
            .iter()
            .zip(&self.targets)
            .filter(|(_, target)| target.is_none())
            .map(|(column, _)| column.clone())
            .collect::<Vec<_>>();

        if !unbound.is_empty() {
            return Err(Error::no_destination(unbound));
        }

        Ok(())
    }

    /// Reads the current row of `source` into the scheduled targets.
    pub fn scan<S: RowSource + ?Sized>(&mut self, source: &mut S) -> Result<()> {
        let res = self.check().and_then(|_| {
            let mut targets = self
                .targets
                .iter_mut()
                .map(|target| {
                    target
                        .take()
                        .unwrap_or_else(|| Box::new(Discard) as Box<dyn Scan>)
                })
                .collect::<Vec<_>>();

            let mut targets = targets
                .iter_mut()
                .map(|target| &mut **target as &mut dyn Scan)
                .collect::<Vec<_>>();

            source.scan(&mut targets)
        });

        self.reset();
        res
    }

    /// Drops every scheduled target.
    pub fn reset(&mut self) {
        for target in &mut self.targets {
            *target = None;
        }
        self.unknown.clear();
    }
}

impl core::fmt::Debug for Row {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let scheduled = self
            .targets
            .iter()
            .filter(|target| target.is_some())
            .count();

        f.debug_struct("Row")
            .field("columns", &self.columns)
            .field("scheduled", &scheduled)
            .field("unknown", &self.unknown)
            .field("allow_unknown", &self.allow_unknown)
            .finish()
    }
}
