use crate::{Context, Phases};

/// A destination that supplies its own phases.
///
/// Types deriving `Record` opt in with `#[record(self_mapping)]`, after which
/// [`StructMapper`](crate::StructMapper) calls [`SelfMapping::map_values`]
/// instead of matching columns to fields. The phases are used as returned,
/// mods included. `Option<T>` and `Box<T>` destinations reuse the phases of
/// `T` and wrap the materialized value.
pub trait SelfMapping: Sized {
    fn map_values(cx: &Context, columns: &[String]) -> Phases<Self>;
}
