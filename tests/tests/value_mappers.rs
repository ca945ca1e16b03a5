use tests::*;

use pretty_assertions::assert_eq;
use rowscan::{column, map, single_column, slice, Context, MappingErrorKind, MemoryRows, Value};

#[test]
fn single_column_maps_scalars() {
    let rows = MemoryRows::new(["name"]).row(["a"]).row(["b"]);

    let names = map_all(&single_column::<String>(), rows).unwrap();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn single_column_rejects_other_counts() {
    let rows = MemoryRows::new(["a", "b"]).row([1_i64, 2]);

    let err = map_one(&single_column::<i64>(), rows).unwrap_err();
    let mapping = err.as_mapping().unwrap();
    assert_eq!(mapping.kind(), MappingErrorKind::WrongColumnCount);
    assert_eq!(mapping.meta(), ["1", "2"]);
    assert_eq!(err.to_string(), "expected 1 column but got 2 columns");
}

#[test]
fn single_column_optional() {
    let rows = MemoryRows::new(["n"]).row([Value::Null]).row([Value::I64(4)]);

    let values = map_all(&single_column::<Option<i64>>(), rows).unwrap();
    assert_eq!(values, [None, Some(4)]);
}

#[test]
fn named_column_needs_unknown_columns_allowed() {
    let rows = MemoryRows::new(["id", "name"]).row([Value::I64(1), Value::from("x")]);
    let err = map_one(&column::<String>("name"), rows.clone()).unwrap_err();
    assert_eq!(err.mapping_meta(), Some(&["id".to_string()][..]));

    let cx = Context::new().with_allow_unknown_columns(true);
    let name = map_one_with(&cx, &column::<String>("name"), rows).unwrap();
    assert_eq!(name, "x");
}

#[test]
fn named_column_missing_from_result() {
    let rows = MemoryRows::new(["id"]).row([1_i64]);

    let err = map_one(&column::<i64>("missing"), rows).unwrap_err();
    let mapping = err.as_mapping().unwrap();
    assert_eq!(mapping.kind(), MappingErrorKind::UnknownColumn);
    assert_eq!(mapping.meta(), ["missing"]);
}

#[test]
fn slice_keeps_column_order_and_duplicates() {
    let rows = MemoryRows::new(["b", "a", "b"]).row([1_i64, 2, 3]).row([4_i64, 5, 6]);

    let values = map_all(&slice::<i64>(), rows).unwrap();
    assert_eq!(values, [vec![1, 2, 3], vec![4, 5, 6]]);
}

#[test]
fn map_by_column_name() {
    let rows = MemoryRows::new(["id", "name", "id"]).row([
        Value::I64(1),
        Value::from("x"),
        Value::I64(2),
    ]);

    let row = map_one(&map::<Value>(), rows).unwrap();

    let keys: Vec<_> = row.keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "name"]);
    assert_eq!(row["id"], Value::I64(2));
    assert_eq!(row["name"], Value::from("x"));
}
