use crate::descriptor::{Descriptor, Leaf};

use std::sync::Arc;

/// A descriptor's leaves intersected with one query's columns.
#[derive(Debug, Clone)]
pub struct Mapping {
    descriptor: Arc<Descriptor>,
    entries: Vec<Entry>,
}

/// A leaf matched to a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Position of the column in the result set.
    pub index: usize,

    /// The column's name as reported by the row source, prefix included.
    pub column: String,

    /// Index into the descriptor's leaves.
    pub leaf: usize,
}

impl Mapping {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn leaf(&self, entry: &Entry) -> &Leaf {
        &self.descriptor.leaves[entry.leaf]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Entry, &Leaf)> + '_ {
        self.entries.iter().map(|entry| (entry, self.leaf(entry)))
    }

    /// Names of the matched columns, in result order.
    pub fn columns(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.column.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Matches `columns` against the leaves of `descriptor`.
///
/// With a non-empty `prefix`, columns not starting with it are skipped and the
/// prefix is stripped before matching. Each column matches the first leaf with
/// the same name. Columns matching no leaf are left out; whether that is an
/// error is decided when binding. Two columns naming the same leaf both stay.
pub fn reconcile(descriptor: &Arc<Descriptor>, columns: &[String], prefix: &str) -> Mapping {
    let mut entries = Vec::with_capacity(columns.len());

    for (index, column) in columns.iter().enumerate() {
        let name = if prefix.is_empty() {
            column.as_str()
        } else {
            match column.strip_prefix(prefix) {
                Some(name) => name,
                None => continue,
            }
        };

        if let Some(leaf) = descriptor.leaves.iter().position(|leaf| leaf.name == name) {
            entries.push(Entry {
                index,
                column: column.clone(),
                leaf,
            });
        }
    }

    tracing::trace!(
        type_name = descriptor.type_name,
        columns = columns.len(),
        matched = entries.len(),
        prefix,
        "reconciled columns"
    );

    Mapping {
        descriptor: descriptor.clone(),
        entries,
    }
}
