use crate::{Context, Link, Mapper, Phases, Result, Row};

use std::sync::Arc;

type BindFn = Box<dyn Fn(&mut Row) -> Result<Link>>;
type ApplyFn<T> = Box<dyn Fn(Link, &mut T) -> Result<()>>;

/// Bind and apply phases of a mod for one query.
///
/// `bind` runs after the base mapper's bind and may schedule its own scan
/// targets. `apply` receives the link `bind` returned and the value
/// materialized so far.
pub struct ModPhases<T> {
    bind: BindFn,
    apply: ApplyFn<T>,
}

impl<T: 'static> ModPhases<T> {
    pub fn new(
        bind: impl Fn(&mut Row) -> Result<Link> + 'static,
        apply: impl Fn(Link, &mut T) -> Result<()> + 'static,
    ) -> ModPhases<T> {
        ModPhases {
            bind: Box::new(bind),
            apply: Box::new(apply),
        }
    }

    /// A mod that binds nothing and only rewrites the value.
    pub fn mutate(f: impl Fn(&mut T) -> Result<()> + 'static) -> ModPhases<T> {
        ModPhases::new(|_| Ok(Link::none()), move |_, value| f(value))
    }
}

/// Builds a mod's phases from the query's column list.
pub trait Mod<T> {
    fn phases(&self, cx: &Context, columns: &[String]) -> ModPhases<T>;
}

impl<T, F> Mod<T> for F
where
    F: Fn(&Context, &[String]) -> ModPhases<T>,
{
    fn phases(&self, cx: &Context, columns: &[String]) -> ModPhases<T> {
        self(cx, columns)
    }
}

/// Wraps `base` so each mod runs after it, in order.
///
/// Binding runs the base first, then each mod; the first failure stops the
/// chain. Materializing runs the base, then hands the value to each mod in
/// turn, so a mod sees every earlier mod's changes.
pub fn compose<T: 'static>(base: Phases<T>, mods: Vec<ModPhases<T>>) -> Phases<T> {
    if mods.is_empty() {
        return base;
    }

    let (base_bind, base_materialize) = base.into_parts();
    let mods = Arc::new(mods);
    let apply_mods = mods.clone();

    Phases::new(
        move |row: &mut Row| {
            let base = base_bind(row)?;
            let mut links = Vec::with_capacity(mods.len() + 1);
            links.push(base);
            for m in mods.iter() {
                links.push((m.bind)(row)?);
            }
            Ok(Link::new(links))
        },
        move |link| {
            let mut links = link.downcast::<Vec<Link>>()?.into_iter();
            let base = links.next().unwrap_or_else(Link::none);
            let mut value = base_materialize(base)?;
            for (m, link) in apply_mods.iter().zip(links) {
                (m.apply)(link, &mut value)?;
            }
            Ok(value)
        },
    )
}

/// A mapper followed by a chain of mods.
pub struct Composed<M, T> {
    base: M,
    mods: Vec<Arc<dyn Mod<T> + Send + Sync>>,
}

impl<M, T> Composed<M, T> {
    pub fn new(base: M) -> Composed<M, T> {
        Composed { base, mods: vec![] }
    }

    pub fn with_mod(mut self, m: impl Mod<T> + Send + Sync + 'static) -> Composed<M, T> {
        self.mods.push(Arc::new(m));
        self
    }
}

impl<M, T> Mapper<T> for Composed<M, T>
where
    M: Mapper<T>,
    T: 'static,
{
    fn phases(&self, cx: &Context, columns: &[String]) -> Phases<T> {
        let base = self.base.phases(cx, columns);
        let mods = self.mods.iter().map(|m| m.phases(cx, columns)).collect();
        compose(base, mods)
    }
}
