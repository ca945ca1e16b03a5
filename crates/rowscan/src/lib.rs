pub mod cursor;
pub use cursor::Cursor;

mod exec;
pub use exec::{all, one};

pub use rowscan_core::{
    bail, column, compose, descriptor, err, map, mapper, mapper_source, modifier, reconcile,
    reflect, scan, single_column, slice, struct_mapper, AggConverter, AggStructMapper, Composed,
    Context, Descriptor, Error, IntoError, Leaf, Link, ListAgg, Mapper, MapperSource,
    MappingError, MappingErrorKind, MemoryRows, Mod, ModPhases, Phases, RecordMut, Reflect,
    ReflectMut, Result, Row, RowSource, RowValidator, Scan, SelfMapping, Shape, Slot, SlotTarget,
    StructMapper, TypeConverter, Value,
};

pub use rowscan_macros::Record;

#[doc(hidden)]
pub mod codegen_support {
    pub use rowscan_core::{
        reflect::{FieldShape, Shape},
        Context, Phases, RecordMut, Reflect, ReflectMut, Scan, SelfMapping,
    };
    pub use std::{option::Option, string::String};
}
