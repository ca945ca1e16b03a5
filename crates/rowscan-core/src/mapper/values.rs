use super::{Mapper, Phases};
use crate::{Context, Error, Link, Result, Row, Scan, Slot};

use indexmap::IndexMap;

/// Maps a result with exactly one column to its value.
pub fn single_column<T>() -> impl Mapper<T>
where
    T: Scan + Default + 'static,
{
    |_cx: &Context, columns: &[String]| {
        if columns.len() != 1 {
            return Phases::error(Error::wrong_column_count(1, columns.len()));
        }

        Phases::new(
            |row: &mut Row| {
                let slot = Slot::new(T::default());
                row.schedule_scan_by_index(0, slot.target())?;
                Ok(Link::new(slot))
            },
            |link| link.downcast::<Slot<T>>()?.into_inner(),
        )
    }
}

/// Maps the column called `name`.
///
/// Any other column is unbound and fails the row unless unknown columns are
/// allowed.
pub fn column<T>(name: impl Into<String>) -> impl Mapper<T>
where
    T: Scan + Default + 'static,
{
    let name = name.into();

    move |_cx: &Context, _columns: &[String]| {
        let name = name.clone();
        Phases::new(
            move |row: &mut Row| {
                let slot = Slot::new(T::default());
                row.schedule_scan(&name, slot.target());
                Ok(Link::new(slot))
            },
            |link| link.downcast::<Slot<T>>()?.into_inner(),
        )
    }
}

/// Maps every column, in result order, into a `Vec`.
pub fn slice<T>() -> impl Mapper<Vec<T>>
where
    T: Scan + Default + 'static,
{
    |_cx: &Context, columns: &[String]| {
        let count = columns.len();
        Phases::new(
            move |row: &mut Row| bind_each::<T>(row, count),
            |link| collect_slots::<T>(link),
        )
    }
}

/// Maps every column into a map keyed by column name, in result order.
///
/// When a name repeats, the last column's value is kept.
pub fn map<T>() -> impl Mapper<IndexMap<String, T>>
where
    T: Scan + Default + 'static,
{
    |_cx: &Context, columns: &[String]| {
        let count = columns.len();
        let names = columns.to_vec();
        Phases::new(
            move |row: &mut Row| bind_each::<T>(row, count),
            move |link| {
                let values = collect_slots::<T>(link)?;
                Ok(names.iter().cloned().zip(values).collect::<IndexMap<_, _>>())
            },
        )
    }
}

fn bind_each<T: Scan + Default + 'static>(row: &mut Row, count: usize) -> Result<Link> {
    let mut slots = Vec::with_capacity(count);
    for index in 0..count {
        let slot = Slot::new(T::default());
        row.schedule_scan_by_index(index, slot.target())?;
        slots.push(slot);
    }
    Ok(Link::new(slots))
}

fn collect_slots<T: 'static>(link: Link) -> Result<Vec<T>> {
    link.downcast::<Vec<Slot<T>>>()?
        .into_iter()
        .map(Slot::into_inner)
        .collect()
}
