use tests::*;

use pretty_assertions::assert_eq;
use rowscan::{
    bail, single_column, Composed, Context, Link, MemoryRows, ModPhases, Record, Row, StructMapper,
    Value,
};

#[derive(Debug, Default, PartialEq, Record)]
struct Entry {
    id: i64,
    name: String,
}

fn entry_rows() -> MemoryRows {
    MemoryRows::new(["id", "name"]).row([Value::I64(2), Value::from("The Name")])
}

#[test]
fn mods_run_in_registration_order() {
    let mapper = StructMapper::<Entry>::new()
        .with_mod(|_: &Context, _: &[String]| {
            ModPhases::mutate(|entry: &mut Entry| {
                entry.id *= 200;
                entry.name.push_str(" modified");
                Ok(())
            })
        })
        .with_mod(|_: &Context, _: &[String]| {
            ModPhases::mutate(|entry: &mut Entry| {
                // Sees the first mod's changes.
                if !entry.name.ends_with(" modified") {
                    bail!("mods ran out of order");
                }
                Ok(())
            })
        });

    let entry = map_one(&mapper, entry_rows()).unwrap();
    assert_eq!(
        entry,
        Entry {
            id: 400,
            name: "The Name modified".to_string()
        }
    );
}

#[test]
fn failing_mod_short_circuits() {
    let mapper = StructMapper::<Entry>::new()
        .with_mod(|_: &Context, _: &[String]| {
            ModPhases::mutate(|_: &mut Entry| -> rowscan::Result<()> { bail!("rejected") })
        })
        .with_mod(|_: &Context, _: &[String]| {
            ModPhases::mutate(|entry: &mut Entry| {
                entry.id = -1;
                Ok(())
            })
        });

    let err = map_one(&mapper, entry_rows()).unwrap_err();
    assert_eq!(err.to_string(), "rejected");
}

#[test]
fn mod_can_bind_its_own_column() {
    let rows = MemoryRows::new(["id", "name", "bonus"]).row([
        Value::I64(1),
        Value::from("n"),
        Value::I64(41),
    ]);

    let mapper = StructMapper::<Entry>::new().with_mod(|_: &Context, columns: &[String]| {
        let index = columns.iter().position(|column| column == "bonus");
        ModPhases::new(
            move |row: &mut Row| {
                let Some(index) = index else {
                    return Ok(Link::none());
                };
                let bonus = rowscan::Slot::new(0_i64);
                row.schedule_scan_by_index(index, bonus.target())?;
                Ok(Link::new(bonus))
            },
            |link, entry: &mut Entry| {
                if link.is::<rowscan::Slot<i64>>() {
                    entry.id += link.downcast::<rowscan::Slot<i64>>()?.into_inner()?;
                }
                Ok(())
            },
        )
    });

    let entry: Entry = map_one(&mapper, rows).unwrap();
    assert_eq!(entry.id, 42);
}

#[test]
fn composed_value_mapper() {
    let mapper = Composed::new(single_column::<i64>()).with_mod(|_: &Context, _: &[String]| {
        ModPhases::mutate(|n: &mut i64| {
            *n = -*n;
            Ok(())
        })
    });

    let values = map_all(&mapper, MemoryRows::new(["n"]).row([1_i64]).row([2_i64])).unwrap();
    assert_eq!(values, [-1, -2]);
}
