use super::{RowValidator, TypeConverter};
use crate::descriptor::Leaf;
use crate::reconcile::Mapping;
use crate::reflect::{field_at, init_at, scan_into, Reflect, ReflectMut};
use crate::{err, Link, Phases, Result, Row, Scan, Slot, Value};

use std::cell::RefCell;
use std::rc::Weak;
use std::sync::Arc;

/// Scans straight into the fields of a destination allocated at bind time.
pub(super) fn simple<T: Reflect + Default>(mapping: Arc<Mapping>) -> Phases<T> {
    Phases::new(
        move |row: &mut Row| {
            let mut root = new_root::<T>();
            for (_, leaf) in mapping.iter() {
                init_chain(&mut root, leaf)?;
            }

            let slot = Slot::new(root);
            for (position, entry) in mapping.entries().iter().enumerate() {
                let target = FieldTarget {
                    dest: slot.downgrade(),
                    mapping: mapping.clone(),
                    position,
                };
                row.schedule_scan_by_index(entry.index, target)?;
            }

            Ok(Link::new(slot))
        },
        |link| link.downcast::<Slot<T>>()?.into_inner(),
    )
}

/// Scans into one scratch value per leaf and assembles the destination
/// afterwards, consulting the validator and converter.
pub(super) fn extended<T: Reflect + Default>(
    mapping: Arc<Mapping>,
    converter: Option<Arc<dyn TypeConverter>>,
    validator: Option<Arc<dyn RowValidator>>,
) -> Phases<T> {
    let bind_mapping = mapping.clone();
    let bind_converter = converter.clone();
    let columns = mapping.columns();

    Phases::new(
        move |row: &mut Row| {
            let mut scratch = Vec::with_capacity(bind_mapping.len());
            for (entry, leaf) in bind_mapping.iter() {
                let value = match &bind_converter {
                    Some(converter) => converter.convert_type(&leaf.ty),
                    None => (leaf.ty.new)(),
                };

                let slot = Slot::new(value);
                row.schedule_scan_by_index(entry.index, slot.target())?;
                scratch.push(slot);
            }
            Ok(Link::new(scratch))
        },
        move |link| {
            let values = link
                .downcast::<Vec<Slot<Box<dyn Reflect>>>>()?
                .into_iter()
                .map(Slot::into_inner)
                .collect::<Result<Vec<_>>>()?;

            if let Some(validator) = &validator {
                let scanned = values.iter().map(|value| &**value).collect::<Vec<_>>();
                if !validator.validate(&columns, &scanned) {
                    return Ok(T::default());
                }
            }

            let mut root = new_root::<T>();
            for ((_, leaf), value) in mapping.iter().zip(values) {
                init_chain(&mut root, leaf)?;

                let value = match &converter {
                    Some(converter) => converter.original_value(value)?,
                    None => value,
                };

                assign_leaf(field_at(&mut root, &leaf.path)?, value)?;
            }

            Ok(root)
        },
    )
}

/// A default destination; optional destinations start out allocated.
pub(super) fn new_root<T: Reflect + Default>() -> T {
    let mut root = T::default();
    if let ReflectMut::Optional(optional) = root.reflect_mut() {
        optional.get_or_init();
    }
    root
}

pub(super) fn init_chain(root: &mut dyn Reflect, leaf: &Leaf) -> Result<()> {
    for path in &leaf.init {
        init_at(&mut *root, path)?;
    }
    Ok(())
}

/// Writes `value` into `field`. An optional field also accepts a value of its
/// inner type.
pub(super) fn assign_leaf(field: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<()> {
    let same_type = (*field).as_any().type_id() == (*value).as_any().type_id();

    if !same_type {
        if let ReflectMut::Optional(optional) = field.reflect_mut() {
            return optional.get_or_init().assign(value);
        }
    }

    field.assign(value)
}

struct FieldTarget<T> {
    dest: Weak<RefCell<T>>,
    mapping: Arc<Mapping>,

    /// Position of the entry in the mapping.
    position: usize,
}

impl<T: Reflect> Scan for FieldTarget<T> {
    fn scan(&mut self, value: Value) -> Result<()> {
        let cell = self
            .dest
            .upgrade()
            .ok_or_else(|| err!("scan target outlived its destination"))?;
        let mut dest = cell.borrow_mut();

        let leaf = self.mapping.leaf(&self.mapping.entries()[self.position]);
        let field = field_at(&mut *dest, &leaf.path)?;
        scan_into(field, value)
    }
}
