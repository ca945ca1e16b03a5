use tests::*;

use pretty_assertions::assert_eq;
use rowscan::{MapperSource, MemoryRows, Record, Reflect, StructMapper, Value};

#[derive(Debug, Default, PartialEq, Record)]
struct Address {
    city: String,
    zip: Option<String>,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Customer {
    id: i64,
    address: Option<Address>,
    billing: Option<Box<Address>>,
}

#[test]
fn optional_records_record_init_chains() {
    let descriptor = MapperSource::global().descriptor::<Customer>();

    let leaves: Vec<_> = descriptor
        .leaves()
        .iter()
        .map(|leaf| (leaf.name.as_str(), leaf.init.clone()))
        .collect();

    assert_eq!(
        leaves,
        [
            ("id", vec![]),
            ("address.city", vec![vec![1]]),
            ("address.zip", vec![vec![1]]),
            ("billing.city", vec![vec![2]]),
            ("billing.zip", vec![vec![2]]),
        ]
    );
}

#[test]
fn optional_record_allocated_when_its_columns_are_present() {
    let rows = MemoryRows::new(["id", "address.city"]).row([Value::I64(1), Value::from("Oslo")]);

    let customer = map_one::<Customer, _>(&StructMapper::new(), rows).unwrap();
    assert_eq!(
        customer,
        Customer {
            id: 1,
            address: Some(Address {
                city: "Oslo".to_string(),
                zip: None,
            }),
            billing: None,
        }
    );
}

#[test]
fn optional_record_left_unset_without_columns() {
    let rows = MemoryRows::new(["id"]).row([7_i64]);

    let customer = map_one::<Customer, _>(&StructMapper::new(), rows).unwrap();
    assert_eq!(customer.address, None);
    assert_eq!(customer.billing, None);
}

#[test]
fn boxed_optional_record() {
    let rows = MemoryRows::new(["billing.city", "billing.zip"])
        .row([Value::from("Lima"), Value::from("15001")]);

    let customer = map_one::<Customer, _>(&StructMapper::new(), rows).unwrap();
    assert_eq!(
        customer.billing,
        Some(Box::new(Address {
            city: "Lima".to_string(),
            zip: Some("15001".to_string()),
        }))
    );
}

fn accept_all(_: &[String], _: &[&dyn Reflect]) -> bool {
    true
}

#[test]
fn optional_records_in_extended_binding() {
    let rows = MemoryRows::new(["id", "address.city"]).row([Value::I64(1), Value::from("Oslo")]);
    let mapper = StructMapper::<Customer>::new().row_validator(accept_all);

    let customer: Customer = map_one(&mapper, rows).unwrap();
    assert_eq!(
        customer.address,
        Some(Address {
            city: "Oslo".to_string(),
            zip: None,
        })
    );
}
