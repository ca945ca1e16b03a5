mod agg;
pub use agg::{AggConverter, AggStructMapper, ListAgg};

mod bind;

use crate::modifier::{compose, Mod};
use crate::reconcile::reconcile;
use crate::reflect::{LeafType, Reflect};
use crate::{Context, Error, MapperSource, Mapper, Phases, Result};

use std::sync::Arc;

/// Substitutes the scan destination of a leaf, then recovers the leaf's
/// value from the substitute after the scan.
pub trait TypeConverter: Send + Sync {
    /// Allocates the value scanned in place of a leaf of type `ty`.
    fn convert_type(&self, ty: &LeafType) -> Box<dyn Reflect>;

    /// Turns the scanned substitute back into a value of the leaf's type, or
    /// of its inner type when the leaf is optional.
    fn original_value(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>>;
}

/// Decides, after a row is scanned, whether it is materialized at all.
///
/// Receives the matched column names and the scanned values in the same
/// order. A rejected row yields the destination's default value.
pub trait RowValidator: Send + Sync {
    fn validate(&self, columns: &[String], values: &[&dyn Reflect]) -> bool;
}

impl<F> RowValidator for F
where
    F: Fn(&[String], &[&dyn Reflect]) -> bool + Send + Sync,
{
    fn validate(&self, columns: &[String], values: &[&dyn Reflect]) -> bool {
        self(columns, values)
    }
}

/// Maps rows onto a record type, field by field.
///
/// The destination is either a record or an optional record. Its leaves come
/// from the [`MapperSource`], and each query's columns are matched against
/// them by name. A type implementing
/// [`SelfMapping`](crate::SelfMapping) bypasses all of this.
pub struct StructMapper<T> {
    source: Arc<MapperSource>,
    converter: Option<Arc<dyn TypeConverter>>,
    validator: Option<Arc<dyn RowValidator>>,
    tag_prefix: Option<String>,
    mods: Vec<Arc<dyn Mod<T> + Send + Sync>>,
}

impl<T: Reflect + Default> StructMapper<T> {
    pub fn new() -> StructMapper<T> {
        StructMapper {
            source: MapperSource::global(),
            converter: None,
            validator: None,
            tag_prefix: None,
            mods: vec![],
        }
    }

    pub fn with_source(mut self, source: Arc<MapperSource>) -> StructMapper<T> {
        self.source = source;
        self
    }

    pub fn type_converter(mut self, converter: impl TypeConverter + 'static) -> StructMapper<T> {
        self.converter = Some(Arc::new(converter));
        self
    }

    pub fn row_validator(mut self, validator: impl RowValidator + 'static) -> StructMapper<T> {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Only columns starting with `prefix` are mapped, with the prefix
    /// removed. Overrides the prefix from the [`Context`].
    pub fn tag_prefix(mut self, prefix: impl Into<String>) -> StructMapper<T> {
        self.tag_prefix = Some(prefix.into());
        self
    }

    /// Appends a mod run after every materialized value.
    pub fn with_mod(mut self, m: impl Mod<T> + Send + Sync + 'static) -> StructMapper<T> {
        self.mods.push(Arc::new(m));
        self
    }

    pub fn source(&self) -> &MapperSource {
        &self.source
    }

    fn base_phases(&self, cx: &Context, columns: &[String]) -> Phases<T> {
        if let Some(phases) = T::self_mapping(cx, columns) {
            return phases;
        }

        let shape = T::shape();
        if shape.strip_optional().0.as_record().is_none() {
            return Phases::error(Error::unsupported_destination(shape.type_name));
        }

        let descriptor = self.source.descriptor_for(&shape);
        let prefix = self
            .tag_prefix
            .as_deref()
            .or(cx.tag_prefix())
            .unwrap_or_default();

        let mapping = Arc::new(reconcile(&descriptor, columns, prefix));

        if self.converter.is_none() && self.validator.is_none() {
            bind::simple(mapping)
        } else {
            bind::extended(mapping, self.converter.clone(), self.validator.clone())
        }
    }
}

impl<T: Reflect + Default> Default for StructMapper<T> {
    fn default() -> StructMapper<T> {
        StructMapper::new()
    }
}

impl<T: Reflect + Default> Mapper<T> for StructMapper<T> {
    fn phases(&self, cx: &Context, columns: &[String]) -> Phases<T> {
        let base = self.base_phases(cx, columns);
        let mods = self.mods.iter().map(|m| m.phases(cx, columns)).collect();
        compose(base, mods)
    }
}

impl<T> core::fmt::Debug for StructMapper<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("StructMapper")
            .field("type_name", &std::any::type_name::<T>())
            .field("source", &self.source)
            .field("converter", &self.converter.is_some())
            .field("validator", &self.validator.is_some())
            .field("tag_prefix", &self.tag_prefix)
            .field("mods", &self.mods.len())
            .finish()
    }
}
