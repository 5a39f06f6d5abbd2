use collectable::collection::{Collectable, Collection, IndexCollection};
use collectable::common::{SortOrder, Value};
use collectable::errors::ErrorKind;
use collectable::{arr, val};
use collectable_int_test::test_util::{create_test_context, is_sorted, random_numbers, run_test};

fn letters() -> IndexCollection {
    Collection::index(
        |array| {
            array.set(0, "a")?;
            array.set(1, "b")?;
            array.set(2, "c")
        },
        3,
    )
}

#[test]
fn test_growing_pads_with_nulls() {
    run_test(
        || create_test_context(),
        |_| {
            let mut collection = letters();
            collection.set_size(5)?;
            assert_eq!(collection.size()?, 5);
            assert_eq!(collection.get(3)?, &Value::Null);
            assert_eq!(collection.get(4)?, &Value::Null);
            assert!(!collection.isset(4)?);
            assert_eq!(collection.get(2)?, &val!("c"));
            Ok(())
        },
    )
}

#[test]
fn test_shrinking_drops_slots() {
    run_test(
        || create_test_context(),
        |_| {
            let mut collection = letters();
            collection.set_size(1)?;
            assert_eq!(collection.all()?, vec![val!("a")]);
            assert_eq!(collection.get(1).unwrap_err().kind(), &ErrorKind::KeyNotFound);
            assert_eq!(collection.get(2).unwrap_err().kind(), &ErrorKind::KeyNotFound);
            assert_eq!(collection.set(2, "z").unwrap_err().kind(), &ErrorKind::KeyNotFound);
            Ok(())
        },
    )
}

#[test]
fn test_factory_cannot_write_past_capacity() {
    run_test(
        || create_test_context(),
        |_| {
            let overfilled = Collection::index(|array| array.set(2, 1), 2);
            assert_eq!(overfilled.count().unwrap_err().kind(), &ErrorKind::KeyNotFound);
            Ok(())
        },
    )
}

#[test]
fn test_unset_keeps_the_slot() {
    run_test(
        || create_test_context(),
        |ctx| {
            let mut collection = ctx.counting_index(vec![val!(1), val!(2), val!(3)]);
            collection.unset(1)?;
            assert_eq!(collection.size()?, 3);
            assert!(!collection.isset(1)?);
            assert_eq!(collection.values().all()?, vec![val!(1), val!(3)]);
            assert_eq!(collection.push(4)?, 3);
            assert_eq!(collection.pop()?, Some(val!(4)));
            assert_eq!(ctx.calls(), 1);
            Ok(())
        },
    )
}

#[test]
fn test_transforms_keep_positional_keys() {
    run_test(
        || create_test_context(),
        |_| {
            let numbers = Collection::range(1, 10, 1)?.as_index();
            let evens = numbers.filter(|_, value| value.as_int().is_some_and(|n| n % 2 == 0));
            assert_eq!(evens.size()?, 5);
            assert_eq!(evens.get(0)?, &val!(2));
            assert_eq!(evens.search(10)?, Some(4));

            let tail = numbers
                .take(-3)
                .map(|index, value| val!(value.to_number() * 10.0 + index as f64));
            assert_eq!(tail.all()?, vec![val!(80.0), val!(91.0), val!(102.0)]);

            let sorted = numbers.reverse().sort(SortOrder::Ascending, None);
            let ints: Vec<i64> = sorted.all()?.iter().filter_map(Value::as_int).collect();
            assert!(is_sorted(ints, true));
            Ok(())
        },
    )
}

#[test]
fn test_to_array_collection() {
    run_test(
        || create_test_context(),
        |_| {
            let basic = letters().to_array_collection();
            assert_eq!(basic.all()?, arr!["a", "b", "c"]);
            assert_eq!(basic.search("c", None)?, Some(2.into()));
            Ok(())
        },
    )
}

#[test]
fn test_sort_random_slots() {
    run_test(
        || create_test_context(),
        |_| {
            let collection = IndexCollection::from_values(random_numbers(64));
            let descending = collection.sort(SortOrder::Descending, None);
            assert_eq!(descending.size()?, 64);
            let ints: Vec<i64> = descending.all()?.iter().filter_map(Value::as_int).collect();
            assert!(is_sorted(ints, false));
            Ok(())
        },
    )
}
