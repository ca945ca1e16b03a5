use super::{new_boxed, Reflect};

use std::any::TypeId;

/// Static description of a reflected type.
#[derive(Clone)]
pub struct Shape {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub kind: ShapeKind,

    /// Allocates a default value of the type.
    pub new: fn() -> Box<dyn Reflect>,
}

#[derive(Clone)]
pub enum ShapeKind {
    Scalar,

    /// `Option<T>`, carrying the shape of `T`.
    Optional(Box<Shape>),

    Record(RecordShape),
}

#[derive(Clone)]
pub struct RecordShape {
    /// Identity of the record type itself, shared by any `Box` wrapping it.
    pub type_id: TypeId,
    pub type_name: &'static str,

    /// Fields in declaration order. Skipped fields are absent.
    pub fields: Vec<FieldShape>,

    /// Capability markers declared by the record, e.g. `"scanner"`. A record
    /// declaring any marker implements [`Scan`](crate::Scan).
    pub capabilities: &'static [&'static str],
}

impl RecordShape {
    /// Whether the record can be written from a single column.
    pub fn scans_itself(&self) -> bool {
        !self.capabilities.is_empty()
    }
}

#[derive(Clone)]
pub struct FieldShape {
    /// Index passed to [`RecordMut::field_mut`](super::RecordMut::field_mut).
    pub index: usize,

    /// Rust identifier of the field.
    pub ident: &'static str,

    /// `(tag key, tag value)` pairs, e.g. `("db", "user_id")`.
    pub tags: &'static [(&'static str, &'static str)],

    /// Embedded fields contribute their leaves under the enclosing prefix.
    pub embedded: bool,

    /// Resolved lazily so records can refer to themselves.
    pub shape: fn() -> Shape,
}

impl Shape {
    pub fn scalar<T: Reflect + Default>() -> Shape {
        Shape {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            kind: ShapeKind::Scalar,
            new: new_boxed::<T>,
        }
    }

    pub fn record<T: Reflect + Default>(
        fields: Vec<FieldShape>,
        capabilities: &'static [&'static str],
    ) -> Shape {
        let type_name = std::any::type_name::<T>();
        Shape {
            type_id: TypeId::of::<T>(),
            type_name,
            kind: ShapeKind::Record(RecordShape {
                type_id: TypeId::of::<T>(),
                type_name,
                fields,
                capabilities,
            }),
            new: new_boxed::<T>,
        }
    }

    /// Returns the shape with any `Option` layers removed, and whether there
    /// were any.
    pub fn strip_optional(&self) -> (&Shape, bool) {
        let mut shape = self;
        let mut optional = false;
        while let ShapeKind::Optional(inner) = &shape.kind {
            shape = inner;
            optional = true;
        }
        (shape, optional)
    }

    pub fn as_record(&self) -> Option<&RecordShape> {
        match &self.kind {
            ShapeKind::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.kind, ShapeKind::Optional(_))
    }
}

impl FieldShape {
    /// Value of the field's tag under `key`, up to the first comma.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, v)| v.split(',').next().unwrap_or(v))
    }
}

impl core::fmt::Debug for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Shape")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl core::fmt::Debug for ShapeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            ShapeKind::Scalar => f.write_str("Scalar"),
            ShapeKind::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            ShapeKind::Record(record) => f
                .debug_struct("Record")
                .field("type_name", &record.type_name)
                .field("fields", &record.fields.len())
                .field("capabilities", &record.capabilities)
                .finish(),
        }
    }
}

/// Type information kept for every leaf, enough to allocate scratch values
/// for it without knowing the type statically.
#[derive(Clone, Copy)]
pub struct LeafType {
    pub type_id: TypeId,
    pub type_name: &'static str,

    /// The leaf is an `Option` and accepts its inner value by reference.
    pub optional: bool,

    pub new: fn() -> Box<dyn Reflect>,
}

impl LeafType {
    pub fn of(shape: &Shape) -> LeafType {
        LeafType {
            type_id: shape.type_id,
            type_name: shape.type_name,
            optional: shape.is_optional(),
            new: shape.new,
        }
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for LeafType {
    fn eq(&self, other: &LeafType) -> bool {
        self.type_id == other.type_id && self.optional == other.optional
    }
}

impl core::fmt::Debug for LeafType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("LeafType")
            .field("type_name", &self.type_name)
            .field("optional", &self.optional)
            .finish()
    }
}
