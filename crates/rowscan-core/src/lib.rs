mod context;
pub use context::Context;

pub mod descriptor;
pub use descriptor::{Descriptor, Leaf};

mod error;
pub use error::{Error, IntoError, MappingError, MappingErrorKind};

pub mod mapper;
pub use mapper::{column, map, single_column, slice, Mapper, Phases};

pub mod mapper_source;
pub use mapper_source::MapperSource;

pub mod modifier;
pub use modifier::{compose, Composed, Mod, ModPhases};

pub mod reconcile;

pub mod reflect;
pub use reflect::{Reflect, ReflectMut, RecordMut, Shape};

mod row;
pub use row::Row;

mod row_source;
pub use row_source::{MemoryRows, RowSource};

pub mod scan;
pub use scan::Scan;

mod self_mapping;
pub use self_mapping::SelfMapping;

mod slot;
pub use slot::{Link, Slot, SlotTarget};

pub mod struct_mapper;
pub use struct_mapper::{
    AggConverter, AggStructMapper, ListAgg, RowValidator, StructMapper, TypeConverter,
};

mod value;
pub use value::Value;

/// A Result type alias that uses rowscan's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
