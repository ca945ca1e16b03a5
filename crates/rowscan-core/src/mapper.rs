mod values;

pub use values::{column, map, single_column, slice};

use crate::{Context, Error, Link, Result, Row};

type BindFn = Box<dyn Fn(&mut Row) -> Result<Link>>;
type MaterializeFn<T> = Box<dyn Fn(Link) -> Result<T>>;

/// The two phases of mapping one row.
///
/// `bind` runs before a row is scanned and schedules scan targets on the
/// [`Row`]. Whatever it returns is handed to `materialize` after the scan,
/// which turns it into the final value.
pub struct Phases<T> {
    bind: BindFn,
    materialize: MaterializeFn<T>,
}

impl<T: 'static> Phases<T> {
    pub fn new(
        bind: impl Fn(&mut Row) -> Result<Link> + 'static,
        materialize: impl Fn(Link) -> Result<T> + 'static,
    ) -> Phases<T> {
        Phases {
            bind: Box::new(bind),
            materialize: Box::new(materialize),
        }
    }

    /// Phases that both fail with `err`.
    pub fn error(err: Error) -> Phases<T> {
        let materialize_err = err.clone();
        Phases::new(
            move |_| Err(err.clone()),
            move |_| Err(materialize_err.clone()),
        )
    }

    pub fn bind(&self, row: &mut Row) -> Result<Link> {
        (self.bind)(row)
    }

    pub fn materialize(&self, link: Link) -> Result<T> {
        (self.materialize)(link)
    }

    /// Transforms the materialized value.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Phases<U> {
        let Phases { bind, materialize } = self;
        Phases {
            bind,
            materialize: Box::new(move |link| materialize(link).map(&f)),
        }
    }

    pub fn try_map<U: 'static>(self, f: impl Fn(T) -> Result<U> + 'static) -> Phases<U> {
        let Phases { bind, materialize } = self;
        Phases {
            bind,
            materialize: Box::new(move |link| materialize(link).and_then(&f)),
        }
    }

    /// Runs `other` alongside these phases on the same row, producing both
    /// values. Several typed results can be collected from one query this way.
    pub fn zip<U: 'static>(self, other: Phases<U>) -> Phases<(T, U)> {
        let (bind_a, materialize_a) = self.into_parts();
        let (bind_b, materialize_b) = other.into_parts();

        Phases::new(
            move |row: &mut Row| {
                let a = bind_a(row)?;
                let b = bind_b(row)?;
                Ok(Link::new((a, b)))
            },
            move |link| {
                let (a, b) = link.downcast::<(Link, Link)>()?;
                Ok((materialize_a(a)?, materialize_b(b)?))
            },
        )
    }

    pub(crate) fn into_parts(self) -> (BindFn, MaterializeFn<T>) {
        (self.bind, self.materialize)
    }
}

impl<T> core::fmt::Debug for Phases<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("Phases(..)")
    }
}

/// Builds the phases for a query from its column list.
///
/// Mappers hold no per-row state; they are asked for phases once per query.
pub trait Mapper<T> {
    fn phases(&self, cx: &Context, columns: &[String]) -> Phases<T>;
}

impl<T, F> Mapper<T> for F
where
    F: Fn(&Context, &[String]) -> Phases<T>,
{
    fn phases(&self, cx: &Context, columns: &[String]) -> Phases<T> {
        self(cx, columns)
    }
}
