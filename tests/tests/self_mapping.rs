use tests::*;

use pretty_assertions::assert_eq;
use rowscan::{
    bail, slice, Context, Mapper, MemoryRows, ModPhases, Phases, Record, SelfMapping, StructMapper,
};

/// Takes its two values from whatever columns the query has.
#[derive(Debug, Default, PartialEq, Record)]
#[record(self_mapping)]
struct Pair {
    left: i64,
    right: i64,
}

impl SelfMapping for Pair {
    fn map_values(cx: &Context, columns: &[String]) -> Phases<Pair> {
        slice::<i64>().phases(cx, columns).try_map(|values| match values[..] {
            [left, right] => Ok(Pair { left, right }),
            _ => bail!("expected two columns, got {}", values.len()),
        })
    }
}

fn pair_rows() -> MemoryRows {
    MemoryRows::new(["a", "b"]).row([1_i64, 2])
}

#[test]
fn self_mapping_bypasses_struct_mapping() {
    let pair = map_one::<Pair, _>(&StructMapper::new(), pair_rows()).unwrap();
    assert_eq!(pair, Pair { left: 1, right: 2 });
}

#[test]
fn self_mapping_by_reference() {
    let boxed = map_one::<Box<Pair>, _>(&StructMapper::new(), pair_rows()).unwrap();
    assert_eq!(*boxed, Pair { left: 1, right: 2 });

    let optional = map_one::<Option<Pair>, _>(&StructMapper::new(), pair_rows()).unwrap();
    assert_eq!(optional, Some(Pair { left: 1, right: 2 }));
}

#[test]
fn self_mapping_errors_surface() {
    let rows = MemoryRows::new(["a", "b", "c"]).row([1_i64, 2, 3]);

    let err = map_one::<Pair, _>(&StructMapper::new(), rows).unwrap_err();
    assert_eq!(err.to_string(), "expected two columns, got 3");
}

#[test]
fn self_mapping_takes_part_in_mods() {
    let mapper = StructMapper::<Pair>::new().with_mod(|_: &Context, _: &[String]| {
        ModPhases::mutate(|pair: &mut Pair| {
            std::mem::swap(&mut pair.left, &mut pair.right);
            Ok(())
        })
    });

    let pair = map_one(&mapper, pair_rows()).unwrap();
    assert_eq!(pair, Pair { left: 2, right: 1 });
}

#[test]
fn self_mapping_ignores_descriptor() {
    // The derived shape is still available for nesting in other records.
    let descriptor = rowscan::MapperSource::global().descriptor::<Pair>();
    let names: Vec<_> = descriptor.names().collect();
    assert_eq!(names, ["left", "right"]);
}
