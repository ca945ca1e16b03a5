use tests::*;

use pretty_assertions::assert_eq;
use rowscan::{AggStructMapper, Context, ListAgg, MappingErrorKind, MemoryRows, Record, Value};

#[derive(Debug, Default, PartialEq, Record)]
struct Tag {
    id: i64,
    label: Option<String>,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Author {
    name: String,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Post {
    id: i64,
    author: Option<Author>,
}

fn list<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Value {
    Value::List(values.into_iter().map(Into::into).collect())
}

#[test]
fn aggregated_row_splits_into_records() {
    let rows = MemoryRows::new(["id", "label"]).row([
        list([1_i64, 2, 3]),
        list([Value::from("red"), Value::Null, Value::from("blue")]),
    ]);

    let tags: Vec<Tag> = map_one(&AggStructMapper::<Tag>::new(ListAgg), rows).unwrap();

    assert_eq!(
        tags,
        [
            Tag {
                id: 1,
                label: Some("red".to_string())
            },
            Tag { id: 2, label: None },
            Tag {
                id: 3,
                label: Some("blue".to_string())
            },
        ]
    );
}

#[test]
fn every_row_yields_its_own_records() {
    let rows = MemoryRows::new(["id"])
        .row([list([1_i64, 2])])
        .row([list([3_i64])]);

    let groups: Vec<Vec<Tag>> = map_all(&AggStructMapper::<Tag>::new(ListAgg), rows).unwrap();
    let ids: Vec<Vec<i64>> = groups
        .iter()
        .map(|tags| tags.iter().map(|tag| tag.id).collect())
        .collect();

    assert_eq!(ids, [vec![1, 2], vec![3]]);
}

#[test]
fn null_aggregates_yield_no_records() {
    let rows = MemoryRows::new(["id", "label"]).row([Value::Null, Value::Null]);

    let tags: Vec<Tag> = map_one(&AggStructMapper::<Tag>::new(ListAgg), rows).unwrap();
    assert!(tags.is_empty());
}

#[test]
fn aggregates_fill_optional_records() {
    let rows = MemoryRows::new(["id", "author.name"])
        .row([list([10_i64, 11]), list(["ann", "bob"])]);

    let posts: Vec<Post> = map_one(&AggStructMapper::<Post>::new(ListAgg), rows).unwrap();
    let authors: Vec<_> = posts
        .iter()
        .map(|post| post.author.as_ref().map(|author| author.name.as_str()))
        .collect();

    assert_eq!(authors, [Some("ann"), Some("bob")]);
    assert_eq!(posts[1].id, 11);
}

#[test]
fn aggregate_lengths_must_agree() {
    let rows = MemoryRows::new(["id", "label"]).row([list([1_i64, 2]), list(["only"])]);

    let err = map_one::<Vec<Tag>, _>(&AggStructMapper::<Tag>::new(ListAgg), rows).unwrap_err();
    let mapping = err.as_mapping().unwrap();

    assert_eq!(mapping.kind(), MappingErrorKind::AggregateLength);
    assert_eq!(mapping.meta(), ["label", "1", "2"]);
    assert_eq!(err.to_string(), "column `label` holds 1 values but expected 2");
}

#[test]
fn scalar_column_is_not_an_aggregate() {
    let rows = MemoryRows::new(["id"]).row([Value::I64(1)]);

    let err = map_one::<Vec<Tag>, _>(&AggStructMapper::<Tag>::new(ListAgg), rows).unwrap_err();
    assert!(err.is_type_conversion());
    assert_eq!(err.to_string(), "cannot convert I64 to List");
}

#[test]
fn unknown_aggregated_column_has_no_destination() {
    let rows = MemoryRows::new(["id", "extra"]).row([list([1_i64]), list([2_i64])]);

    let err = map_one::<Vec<Tag>, _>(&AggStructMapper::<Tag>::new(ListAgg), rows).unwrap_err();
    assert_eq!(err.mapping_meta(), Some(&["extra".to_string()][..]));
}

#[test]
fn prefixed_aggregates() {
    let cx = Context::default()
        .with_tag_prefix("tag.")
        .with_allow_unknown_columns(true);
    let rows = MemoryRows::new(["post_id", "tag.id"]).row([Value::I64(9), list([4_i64, 5])]);

    let tags: Vec<Tag> = map_one_with(&cx, &AggStructMapper::<Tag>::new(ListAgg), rows).unwrap();
    let ids: Vec<_> = tags.iter().map(|tag| tag.id).collect();
    assert_eq!(ids, [4, 5]);
}

#[test]
fn scalar_destination_is_unsupported() {
    let rows = MemoryRows::new(["n"]).row([list([1_i64])]);

    let err = map_one::<Vec<i64>, _>(&AggStructMapper::<i64>::new(ListAgg), rows).unwrap_err();
    assert_eq!(
        err.as_mapping().unwrap().kind(),
        MappingErrorKind::UnsupportedDestination
    );
}
