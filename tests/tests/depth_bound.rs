use tests::*;

use pretty_assertions::assert_eq;
use rowscan::{MapperSource, MemoryRows, Record, StructMapper, Value};

use std::sync::Arc;

#[derive(Debug, Default, PartialEq, Record)]
struct Category {
    id: i64,
    parent: Option<Box<Category>>,
}

#[test]
fn self_reference_is_truncated_silently() {
    let descriptor = MapperSource::global().descriptor::<Category>();
    let names: Vec<_> = descriptor.names().collect();

    assert_eq!(
        names,
        [
            "id",
            "parent.id",
            "parent.parent.id",
            "parent.parent.parent.id",
        ]
    );
}

#[test]
fn max_depth_is_configurable() {
    let source = MapperSource::builder().max_depth(1).build().unwrap();
    let names: Vec<String> = source
        .descriptor::<Category>()
        .names()
        .map(str::to_string)
        .collect();

    assert_eq!(names, ["id", "parent.id"]);
}

#[test]
fn self_referential_rows_map_to_the_bound() {
    let rows = MemoryRows::new(["id", "parent.id", "parent.parent.id"]).row([
        Value::I64(3),
        Value::I64(2),
        Value::I64(1),
    ]);

    let category = map_one::<Category, _>(&StructMapper::new(), rows).unwrap();
    assert_eq!(
        category,
        Category {
            id: 3,
            parent: Some(Box::new(Category {
                id: 2,
                parent: Some(Box::new(Category { id: 1, parent: None })),
            })),
        }
    );
}

#[test]
fn columns_past_the_bound_have_no_destination() {
    let source = Arc::new(MapperSource::builder().max_depth(0).build().unwrap());
    let rows = MemoryRows::new(["id", "parent.id"]).row([1_i64, 2]);

    let mapper = StructMapper::<Category>::new().with_source(source);
    let err = map_one(&mapper, rows).unwrap_err();
    assert_eq!(err.mapping_meta(), Some(&["parent.id".to_string()][..]));
}
