use tests::*;

use pretty_assertions::assert_eq;
use rowscan::{MemoryRows, Record, Reflect, StructMapper, Value};

#[derive(Debug, Default, PartialEq, Record)]
struct Ticket {
    id: i64,
    title: String,
}

/// Keeps rows whose `id` column scanned as 1.
fn only_id_one(columns: &[String], values: &[&dyn Reflect]) -> bool {
    columns
        .iter()
        .zip(values)
        .find(|(column, _)| *column == "id")
        .and_then(|(_, value)| value.downcast_ref::<i64>())
        .is_some_and(|id| *id == 1)
}

fn ticket_rows(id: i64) -> MemoryRows {
    MemoryRows::new(["id", "title"]).row([Value::I64(id), Value::from("broken build")])
}

#[test]
fn accepted_row_materializes_normally() {
    let mapper = StructMapper::<Ticket>::new().row_validator(only_id_one);

    let ticket = map_one(&mapper, ticket_rows(1)).unwrap();
    assert_eq!(
        ticket,
        Ticket {
            id: 1,
            title: "broken build".to_string()
        }
    );
}

#[test]
fn rejected_row_is_default_without_error() {
    let mapper = StructMapper::<Ticket>::new().row_validator(only_id_one);

    let ticket = map_one(&mapper, ticket_rows(0)).unwrap();
    assert_eq!(ticket, Ticket::default());
}

#[test]
fn validator_sees_matched_columns_in_order() {
    fn expect_columns(columns: &[String], values: &[&dyn Reflect]) -> bool {
        assert_eq!(columns, ["title", "id"]);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].downcast_ref::<String>().unwrap(), "broken build");
        true
    }

    let rows = MemoryRows::new(["title", "id"]).row([Value::from("broken build"), Value::I64(3)]);
    let mapper = StructMapper::<Ticket>::new().row_validator(expect_columns);

    let ticket: Ticket = map_one(&mapper, rows).unwrap();
    assert_eq!(ticket.id, 3);
}

#[test]
fn rejected_rows_keep_their_place_in_all() {
    let rows = MemoryRows::new(["id", "title"])
        .row([Value::I64(1), Value::from("kept")])
        .row([Value::I64(2), Value::from("dropped")]);
    let mapper = StructMapper::<Ticket>::new().row_validator(only_id_one);

    let tickets = map_all(&mapper, rows).unwrap();
    assert_eq!(
        tickets,
        [
            Ticket {
                id: 1,
                title: "kept".to_string()
            },
            Ticket::default(),
        ]
    );
}
