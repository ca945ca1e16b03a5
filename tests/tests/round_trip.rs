use tests::*;

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rowscan::{MemoryRows, Record, StructMapper, Value};
use uuid::Uuid;

#[derive(Debug, Default, PartialEq, Record)]
struct Account {
    id: i64,
    name: String,
    active: bool,
    balance: f64,
    visits: u32,
    token: Uuid,
    created_at: DateTime<Utc>,
    avatar: Vec<u8>,
}

#[test]
fn all_leaf_columns_round_trip() {
    let token = Uuid::new_v4();
    let created_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    let rows = MemoryRows::new([
        "id",
        "name",
        "active",
        "balance",
        "visits",
        "token",
        "created_at",
        "avatar",
    ])
    .row([
        Value::I64(7),
        Value::from("Ada"),
        Value::Bool(true),
        Value::F64(12.5),
        Value::I64(3),
        Value::Uuid(token),
        Value::Timestamp(created_at),
        Value::Bytes(vec![1, 2, 3]),
    ]);

    let account = map_one(&StructMapper::<Account>::new(), rows).unwrap();

    assert_eq!(
        account,
        Account {
            id: 7,
            name: "Ada".to_string(),
            active: true,
            balance: 12.5,
            visits: 3,
            token,
            created_at,
            avatar: vec![1, 2, 3],
        }
    );
}

#[test]
fn column_order_does_not_matter() {
    let rows = MemoryRows::new(["name", "id"])
        .row([Value::from("first"), Value::I64(1)])
        .row([Value::from("second"), Value::I64(2)]);

    #[derive(Debug, Default, PartialEq, Record)]
    struct Item {
        id: i64,
        name: String,
    }

    let items = map_all(&StructMapper::<Item>::new(), rows).unwrap();

    assert_eq!(
        items,
        [
            Item {
                id: 1,
                name: "first".to_string()
            },
            Item {
                id: 2,
                name: "second".to_string()
            },
        ]
    );
}

#[test]
fn subset_of_columns_leaves_other_fields_default() {
    let rows = MemoryRows::new(["name"]).row(["only name"]);

    let account: Account = map_one(&StructMapper::new(), rows).unwrap();

    assert_eq!(account.name, "only name");
    assert_eq!(account.id, 0);
    assert!(!account.active);
}

#[test]
fn optional_fields_take_null() {
    #[derive(Debug, Default, PartialEq, Record)]
    struct Profile {
        id: i64,
        bio: Option<String>,
        age: Option<i32>,
    }

    let rows = MemoryRows::new(["id", "bio", "age"])
        .row([Value::I64(1), Value::Null, Value::I32(30)])
        .row([Value::I64(2), Value::from("hello"), Value::Null]);

    let profiles = map_all(&StructMapper::<Profile>::new(), rows).unwrap();

    assert_eq!(
        profiles,
        [
            Profile {
                id: 1,
                bio: None,
                age: Some(30)
            },
            Profile {
                id: 2,
                bio: Some("hello".to_string()),
                age: None
            },
        ]
    );
}

#[test]
fn null_into_required_field_is_a_conversion_error() {
    let rows = MemoryRows::new(["id"]).row([Value::Null]);

    let err = map_one(&StructMapper::<Account>::new(), rows).unwrap_err();
    assert!(err.is_type_conversion());
    assert_eq!(err.to_string(), "cannot convert Null to i64");
}

#[test]
fn optional_and_boxed_destinations() {
    let rows = MemoryRows::new(["id", "name"]).row([Value::I64(5), Value::from("boxed")]);
    let boxed: Box<Account> = map_one(&StructMapper::new(), rows.clone()).unwrap();
    assert_eq!(boxed.id, 5);
    assert_eq!(boxed.name, "boxed");

    let optional: Option<Account> = map_one(&StructMapper::new(), rows).unwrap();
    let optional = optional.unwrap();
    assert_eq!(optional.id, 5);
    assert_eq!(optional.name, "boxed");
}

#[test]
fn duplicate_columns_last_scan_wins() {
    let rows = MemoryRows::new(["id", "id"]).row([1_i64, 2_i64]);

    let account: Account = map_one(&StructMapper::new(), rows).unwrap();
    assert_eq!(account.id, 2);
}
