use super::bind::{assign_leaf, init_chain, new_root};
use crate::reconcile::{reconcile, Mapping};
use crate::reflect::{field_at, scan_into, LeafType, Reflect};
use crate::{bail, Context, Error, Link, MapperSource, Mapper, Phases, Result, Row, Slot, Value};

use std::marker::PhantomData;
use std::sync::Arc;

/// Converts between a leaf's type and the aggregate a row source delivers
/// for it, e.g. a database array holding that column for several records.
pub trait AggConverter: Send + Sync {
    /// Allocates the value an aggregated column of leaf type `ty` is scanned
    /// into.
    fn convert_to_agg(&self, ty: &LeafType) -> Box<dyn Reflect>;

    /// Splits a scanned aggregate into one value of type `ty` per record.
    fn convert_from_agg(
        &self,
        ty: &LeafType,
        value: Box<dyn Reflect>,
    ) -> Result<Vec<Box<dyn Reflect>>>;
}

/// Aggregates delivered as [`Value::List`]. A `NULL` aggregate holds no
/// values.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListAgg;

impl AggConverter for ListAgg {
    fn convert_to_agg(&self, _ty: &LeafType) -> Box<dyn Reflect> {
        Box::new(Value::Null)
    }

    fn convert_from_agg(
        &self,
        ty: &LeafType,
        value: Box<dyn Reflect>,
    ) -> Result<Vec<Box<dyn Reflect>>> {
        let value = match value.into_any().downcast::<Value>() {
            Ok(value) => *value,
            Err(_) => bail!("aggregate for `{}` was not scanned as a value", ty.type_name),
        };

        let items = match value {
            Value::List(items) => items,
            Value::Null => vec![],
            other => return Err(Error::type_conversion(&other, "List")),
        };

        items
            .into_iter()
            .map(|item| {
                let mut value = (ty.new)();
                scan_into(&mut *value, item)?;
                Ok(value)
            })
            .collect()
    }
}

/// Maps one row of aggregated columns onto several records.
///
/// Each matched column holds the values of one leaf for every record, in
/// record order. All columns must hold the same number of values.
pub struct AggStructMapper<T> {
    source: Arc<MapperSource>,
    converter: Arc<dyn AggConverter>,
    tag_prefix: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Reflect + Default> AggStructMapper<T> {
    pub fn new(converter: impl AggConverter + 'static) -> AggStructMapper<T> {
        AggStructMapper {
            source: MapperSource::global(),
            converter: Arc::new(converter),
            tag_prefix: None,
            _marker: PhantomData,
        }
    }

    pub fn with_source(mut self, source: Arc<MapperSource>) -> AggStructMapper<T> {
        self.source = source;
        self
    }

    /// Only columns starting with `prefix` are mapped, with the prefix
    /// removed. Overrides the prefix from the [`Context`].
    pub fn tag_prefix(mut self, prefix: impl Into<String>) -> AggStructMapper<T> {
        self.tag_prefix = Some(prefix.into());
        self
    }
}

impl<T: Reflect + Default> Mapper<Vec<T>> for AggStructMapper<T> {
    fn phases(&self, cx: &Context, columns: &[String]) -> Phases<Vec<T>> {
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

        bind(
            Arc::new(reconcile(&descriptor, columns, prefix)),
            self.converter.clone(),
        )
    }
}

impl<T> core::fmt::Debug for AggStructMapper<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("AggStructMapper")
            .field("type_name", &std::any::type_name::<T>())
            .field("source", &self.source)
            .field("tag_prefix", &self.tag_prefix)
            .finish()
    }
}

fn bind<T: Reflect + Default>(
    mapping: Arc<Mapping>,
    converter: Arc<dyn AggConverter>,
) -> Phases<Vec<T>> {
    let bind_mapping = mapping.clone();
    let bind_converter = converter.clone();

    Phases::new(
        move |row: &mut Row| {
            let mut aggregates = Vec::with_capacity(bind_mapping.len());
            for (entry, leaf) in bind_mapping.iter() {
                let slot = Slot::new(bind_converter.convert_to_agg(&leaf.ty));
                row.schedule_scan_by_index(entry.index, slot.target())?;
                aggregates.push(slot);
            }
            Ok(Link::new(aggregates))
        },
        move |link| {
            let aggregates = link.downcast::<Vec<Slot<Box<dyn Reflect>>>>()?;
            let mut records: Option<Vec<T>> = None;

            for ((entry, leaf), aggregate) in mapping.iter().zip(aggregates) {
                let values = converter.convert_from_agg(&leaf.ty, aggregate.into_inner()?)?;

                // The first column decides how many records there are.
                let all = records
                    .get_or_insert_with(|| values.iter().map(|_| new_root::<T>()).collect());
                if values.len() != all.len() {
                    return Err(Error::aggregate_length(&entry.column, values.len(), all.len()));
                }

                for (record, value) in all.iter_mut().zip(values) {
                    init_chain(&mut *record, leaf)?;
                    assign_leaf(field_at(&mut *record, &leaf.path)?, value)?;
                }
            }

            Ok(records.unwrap_or_default())
        },
    )
}
