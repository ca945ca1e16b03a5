use tests::*;

use pretty_assertions::assert_eq;
use rowscan::{Context, MappingErrorKind, MemoryRows, Record, StructMapper, Value};

#[derive(Debug, Default, PartialEq, Record)]
struct OnlyId {
    id: i64,
}

#[derive(Debug, Default, PartialEq, Record)]
struct WithName {
    id: i64,
    name: String,
}

fn rows() -> MemoryRows {
    MemoryRows::new(["id", "extra"]).row([Value::I64(9), Value::from("ignored")])
}

#[test]
fn unknown_column_is_rejected_by_default() {
    let err = map_one::<OnlyId, _>(&StructMapper::new(), rows()).unwrap_err();

    let mapping = err.as_mapping().unwrap();
    assert_eq!(mapping.kind(), MappingErrorKind::NoDestination);
    assert_eq!(mapping.meta(), ["extra"]);
    assert_eq!(err.to_string(), "no destination for columns [extra]");
}

#[test]
fn every_unknown_column_is_reported() {
    let rows = MemoryRows::new(["first", "id", "second"]).row([
        Value::Null,
        Value::I64(1),
        Value::Null,
    ]);

    let err = map_one::<OnlyId, _>(&StructMapper::new(), rows).unwrap_err();
    assert_eq!(err.mapping_meta(), Some(&["first".to_string(), "second".to_string()][..]));
}

#[test]
fn unknown_column_is_discarded_when_allowed() {
    let cx = Context::new().with_allow_unknown_columns(true);

    let value = map_one_with::<OnlyId, _>(&cx, &StructMapper::new(), rows()).unwrap();
    assert_eq!(value, OnlyId { id: 9 });
}

#[test]
fn allowed_unknown_columns_leave_other_fields_default() {
    let cx = Context::new().with_allow_unknown_columns(true);

    let value = map_one_with::<WithName, _>(&cx, &StructMapper::new(), rows()).unwrap();
    assert_eq!(
        value,
        WithName {
            id: 9,
            name: String::new()
        }
    );
}

#[test]
fn mapping_errors_compare_by_metadata() {
    let first = map_one::<OnlyId, _>(&StructMapper::new(), rows()).unwrap_err();
    let second = map_one::<WithName, _>(&StructMapper::new(), rows()).unwrap_err();

    assert_eq!(first.as_mapping(), second.as_mapping());
}
