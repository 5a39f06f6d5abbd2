use collectable::collection::{ArrayCollection, Collectable, Collection};
use collectable::common::{ArrayMap, Comparison, Key, SortFlag, SortOrder, Value};
use collectable::errors::ErrorKind;
use collectable::{arr, assoc_map, key, val};
use collectable_int_test::test_util::{
    column_of, create_test_context, create_test_records, is_sorted, run_test,
};

fn employees() -> ArrayCollection {
    Collection::create(|| Ok(create_test_records()))
}

#[test]
fn test_push_assigns_sequential_keys() {
    run_test(
        || create_test_context(),
        |_| {
            let mut collection = Collection::create(|| Ok(ArrayMap::new()));
            let keys: Vec<Key> = ["x", "y", "z"]
                .into_iter()
                .map(|value| collection.push(value))
                .collect::<Result<_, _>>()?;
            assert_eq!(keys, vec![key!(0), key!(1), key!(2)]);
            assert_eq!(collection.get(0)?, &val!("x"));
            Ok(())
        },
    )
}

#[test]
fn test_filter_and_reject_partition_the_collection() {
    run_test(
        || create_test_context(),
        |_| {
            let active =
                |_: &Key, record: &Value| record.column(&key!("active")) == Some(&val!(true));
            let kept = employees().filter(active).all()?;
            let dropped = employees().reject(active).all()?;

            assert_eq!(kept.len() + dropped.len(), employees().count()?);
            assert!(kept.keys().all(|k| !dropped.contains_key(k)));
            let mut union: Vec<Key> = kept.keys().chain(dropped.keys()).cloned().collect();
            union.sort();
            assert_eq!(union, employees().all()?.keys().cloned().collect::<Vec<_>>());
            Ok(())
        },
    )
}

#[test]
fn test_combine() {
    run_test(
        || create_test_context(),
        |_| {
            let values = ArrayCollection::from_items(arr!["a", "b"]);
            let mismatched = ArrayCollection::from_items(arr![1, 2, 3]).combine(&values);
            assert_eq!(mismatched.all().unwrap_err().kind(), &ErrorKind::SizeMismatch);

            let combined = ArrayCollection::from_items(arr![1, 2]).combine(&values);
            assert_eq!(combined.all()?, assoc_map! { 1 => "a", 2 => "b" });
            Ok(())
        },
    )
}

#[test]
fn test_query_pipeline() {
    run_test(
        || create_test_context(),
        |_| {
            let names = employees()
                .where_("department", Comparison::NotEqual, "crypto")
                .where_between("salary", 5000, 6000)
                .sort_by_many([("salary", SortOrder::Descending)])
                .pluck("name", None);
            assert_eq!(names.all()?, arr!["Barbara", "Ada"]);
            Ok(())
        },
    )
}

#[test]
fn test_sort_by_many_is_stable_and_ordered() {
    run_test(
        || create_test_context(),
        |_| {
            let sorted = employees()
                .sort_by_many([
                    ("salary", SortOrder::Ascending),
                    ("department", SortOrder::Descending),
                ])
                .all()?;
            let salaries: Vec<i64> = column_of(&sorted, "salary")
                .iter()
                .filter_map(Value::as_int)
                .collect();
            assert!(is_sorted(salaries, true));
            assert_eq!(column_of(&sorted, "name")[..2], [val!("Linus"), val!("Alan")]);
            Ok(())
        },
    )
}

#[test]
fn test_sort_by_many_rejects_ragged_records() {
    run_test(
        || create_test_context(),
        |_| {
            let mut records = create_test_records();
            if let Some(record) = records.get_mut(&key!(3)).and_then(Value::as_array_mut) {
                record.shift_remove(&key!("salary"));
            }
            let ragged = ArrayCollection::from_items(records);
            let err = ragged.sort_by_many([("salary", SortOrder::Ascending)]).all().unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::SizeMismatch);

            let flat = Collection::create(|| Ok(arr![3, 1, 2]));
            let err = flat.sort_by_many([("salary", SortOrder::Ascending)]).all().unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidArgument);
            Ok(())
        },
    )
}

#[test]
fn test_sort_flags() {
    run_test(
        || create_test_context(),
        |_| {
            let files =
                Collection::create(|| Ok(arr!["img12.png", "img10.png", "IMG2.png", "img1.png"]));
            let natural = files.sort(SortOrder::Ascending, false, Some(SortFlag::NaturalFlagCase));
            assert_eq!(natural.all()?, arr!["img1.png", "IMG2.png", "img10.png", "img12.png"]);

            let numbers = Collection::create(|| Ok(arr!["10", "9", "100"]));
            let numeric = numbers.sort(SortOrder::Descending, false, Some(SortFlag::Numeric));
            assert_eq!(numeric.all()?, arr!["100", "10", "9"]);
            let textual = numbers.sort(SortOrder::Ascending, false, Some(SortFlag::String));
            assert_eq!(textual.all()?, arr!["10", "100", "9"]);
            Ok(())
        },
    )
}

#[test]
fn test_set_algebra_uses_string_forms() {
    run_test(
        || create_test_context(),
        |_| {
            let left = Collection::create(|| Ok(arr![1, "2", 3, 4]));
            let right = Collection::create(|| Ok(arr!["1", 2]));
            assert_eq!(left.difference(&[&right]).values().all()?, arr![3, 4]);
            assert_eq!(left.intersect(&[&right]).values().all()?, arr![1, "2"]);
            Ok(())
        },
    )
}

#[test]
fn test_unique_and_duplicates_are_complementary() {
    run_test(
        || create_test_context(),
        |_| {
            let collection = Collection::create(|| Ok(arr!["a", "b", "a", "c", "b", "a"]));
            let unique = collection.unique().all()?;
            let duplicates = collection.duplicates().all()?;
            assert_eq!(unique.len() + duplicates.len(), 6);
            assert_eq!(arr_values(&unique), vec![val!("a"), val!("b"), val!("c")]);
            assert!(unique.keys().all(|k| !duplicates.contains_key(k)));
            Ok(())
        },
    )
}

fn arr_values(items: &ArrayMap) -> Vec<Value> {
    items.values().cloned().collect()
}

#[test]
fn test_direct_access_errors() {
    run_test(
        || create_test_context(),
        |_| {
            let mut collection = Collection::create(|| Ok(assoc_map! { "a" => 1 }));
            assert_eq!(collection.get("missing").unwrap_err().kind(), &ErrorKind::KeyNotFound);
            assert_eq!(collection.add("a", 2).unwrap_err().kind(), &ErrorKind::KeyAlreadyExists);
            assert_eq!(collection.replace("b", 2).unwrap_err().kind(), &ErrorKind::KeyNotFound);
            assert_eq!(
                collection.flip().map(|_, v| v.clone()).all()?,
                arr!["a"]
            );
            Ok(())
        },
    )
}

#[test]
fn test_chunk_and_count_values() {
    run_test(
        || create_test_context(),
        |_| {
            let mut sizes = Vec::new();
            employees().chunk(2, |batch| sizes.push(batch.count().unwrap_or_default()))?;
            assert_eq!(sizes, vec![2, 2, 1]);

            let per_department = employees().count_values(Some(key!("department"))).all()?;
            assert_eq!(
                per_department,
                assoc_map! { "research" => 2, "kernel" => 2, "crypto" => 1 }
            );
            Ok(())
        },
    )
}
