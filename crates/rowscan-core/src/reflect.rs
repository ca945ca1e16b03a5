mod shape;

pub use shape::{FieldShape, LeafType, RecordShape, Shape, ShapeKind};

use crate::{err, Context, Phases, Result, Scan, Value};

use chrono::{DateTime, NaiveDateTime, Utc};
use std::any::{Any, TypeId};

/// Type-erased access to a value, implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Overwrites `self` with `value`, which must hold the same type.
    fn set_any(&mut self, value: Box<dyn Any>) -> Result<()>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn set_any(&mut self, value: Box<dyn Any>) -> Result<()> {
        match value.downcast::<T>() {
            Ok(value) => {
                *self = *value;
                Ok(())
            }
            Err(_) => Err(err!(
                "cannot assign a value of another type to `{}`",
                std::any::type_name::<T>()
            )),
        }
    }
}

/// A type the mapper can describe and write into at runtime.
///
/// Implemented for scalars, `Option<T>`, `Box<T>` and every type deriving
/// `Record`.
pub trait Reflect: AsAny {
    /// Static description of the type.
    fn shape() -> Shape
    where
        Self: Sized;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Bind and materialize phases supplied by the type itself, consulted
    /// before any structural mapping. `None` unless the type opts in.
    fn self_mapping(cx: &Context, columns: &[String]) -> Option<Phases<Self>>
    where
        Self: Sized,
    {
        let _ = (cx, columns);
        None
    }
}

impl dyn Reflect {
    pub fn is<T: Reflect>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Replaces `self` with the boxed value, which must hold the same type.
    pub fn assign(&mut self, value: Box<dyn Reflect>) -> Result<()> {
        self.set_any(value.into_any())
    }
}

/// Mutable view of a reflected value.
pub enum ReflectMut<'a> {
    /// A value that accepts a column directly.
    Scalar(&'a mut dyn Scan),

    /// An optional value that may need allocating before it is written through.
    Optional(&'a mut dyn OptionalMut),

    /// A record with addressable fields.
    Record(&'a mut dyn RecordMut),
}

pub trait OptionalMut {
    fn is_none(&self) -> bool;

    fn set_none(&mut self);

    /// Returns the inner value, allocating a default one first when unset.
    fn get_or_init(&mut self) -> &mut dyn Reflect;

    fn get_mut(&mut self) -> Option<&mut dyn Reflect>;
}

/// Field access on a record, by declaration index.
pub trait RecordMut {
    fn type_name(&self) -> &'static str;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Records scanned as a single value return themselves here.
    fn as_scan(&mut self) -> Option<&mut dyn Scan> {
        None
    }
}

pub(crate) fn new_boxed<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

macro_rules! impl_reflect_scalar {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape::scalar::<$ty>()
                }

                fn reflect_mut(&mut self) -> ReflectMut<'_> {
                    ReflectMut::Scalar(self)
                }
            }
        )*
    };
}

impl_reflect_scalar! {
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    usize,
    f64,
    String,
    Vec<u8>,
    Value,
    uuid::Uuid,
    DateTime<Utc>,
    NaiveDateTime,
}

impl<T: Reflect + Default> Reflect for Option<T> {
    fn shape() -> Shape {
        Shape {
            type_id: TypeId::of::<Option<T>>(),
            type_name: std::any::type_name::<Option<T>>(),
            kind: ShapeKind::Optional(Box::new(T::shape())),
            new: new_boxed::<Option<T>>,
        }
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Optional(self)
    }

    fn self_mapping(cx: &Context, columns: &[String]) -> Option<Phases<Option<T>>> {
        T::self_mapping(cx, columns).map(|phases| phases.map(Some))
    }
}

impl<T: Reflect + Default> OptionalMut for Option<T> {
    fn is_none(&self) -> bool {
        Option::is_none(self)
    }

    fn set_none(&mut self) {
        *self = None;
    }

    fn get_or_init(&mut self) -> &mut dyn Reflect {
        self.get_or_insert_with(T::default)
    }

    fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }
}

// Boxes are always allocated, so they describe themselves as their contents.
impl<T: Reflect + Default> Reflect for Box<T> {
    fn shape() -> Shape {
        let inner = T::shape();
        Shape {
            type_id: TypeId::of::<Box<T>>(),
            type_name: std::any::type_name::<Box<T>>(),
            kind: inner.kind,
            new: new_boxed::<Box<T>>,
        }
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        (**self).reflect_mut()
    }

    fn self_mapping(cx: &Context, columns: &[String]) -> Option<Phases<Box<T>>> {
        T::self_mapping(cx, columns).map(|phases| phases.map(Box::new))
    }
}

/// Writes one column value into a reflected destination.
pub fn scan_into(target: &mut dyn Reflect, value: Value) -> Result<()> {
    match target.reflect_mut() {
        ReflectMut::Scalar(scan) => scan.scan(value),
        ReflectMut::Optional(optional) => {
            if value.is_null() {
                optional.set_none();
                Ok(())
            } else {
                scan_into(optional.get_or_init(), value)
            }
        }
        ReflectMut::Record(record) => {
            let type_name = record.type_name();
            match record.as_scan() {
                Some(scan) => scan.scan(value),
                None => Err(err!("record `{}` cannot be scanned from a column", type_name)),
            }
        }
    }
}

impl Scan for Box<dyn Reflect> {
    fn scan(&mut self, value: Value) -> Result<()> {
        scan_into(&mut **self, value)
    }
}

/// Resolves `node` to its record view, looking through allocated optionals.
pub(crate) fn deref_record(node: &mut dyn Reflect) -> Result<&mut dyn RecordMut> {
    match node.reflect_mut() {
        ReflectMut::Record(record) => Ok(record),
        ReflectMut::Optional(optional) => match optional.get_mut() {
            Some(inner) => deref_record(inner),
            None => Err(err!("optional ancestor was not initialized")),
        },
        ReflectMut::Scalar(_) => Err(err!("cannot select a field of a scalar value")),
    }
}

/// Follows an access path of field indices from `root`.
pub(crate) fn field_at<'a>(root: &'a mut dyn Reflect, path: &[usize]) -> Result<&'a mut dyn Reflect> {
    let mut current = root;
    for &index in path {
        let record = deref_record(current)?;
        let type_name = record.type_name();
        current = record
            .field_mut(index)
            .ok_or_else(|| err!("record `{}` has no field at index {}", type_name, index))?;
    }
    Ok(current)
}

/// Allocates the optional value at `path` if it is still unset.
pub(crate) fn init_at(root: &mut dyn Reflect, path: &[usize]) -> Result<()> {
    let node = field_at(root, path)?;
    if let ReflectMut::Optional(optional) = node.reflect_mut() {
        optional.get_or_init();
    }
    Ok(())
}
