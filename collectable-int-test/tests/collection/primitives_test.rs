use collectable::common::{ArrayMap, SortFlag, SortOrder, Value};
use collectable::errors::ErrorKind;
use collectable::primitives::{self, arr as array, iter};
use collectable::{arr, assoc_map, key, val};
use collectable_int_test::test_util::{
    column_of, create_test_context, create_test_records, run_test,
};

#[test]
fn test_column_projection() {
    run_test(
        || create_test_context(),
        |_| {
            let records = create_test_records();
            let names = array::column(&records, Some(&key!("name")), Some(&key!("id")));
            assert_eq!(names.get(&key!(3)), Some(&val!("Grace")));
            assert_eq!(names.len(), 5);

            let whole = array::column(&records, None, Some(&key!("name")));
            assert_eq!(
                whole.get(&key!("Ada")).and_then(|r| r.column(&key!("salary"))),
                Some(&val!(5200))
            );
            Ok(())
        },
    )
}

#[test]
fn test_merge_union_and_recursive() {
    run_test(
        || create_test_context(),
        |_| {
            let left = assoc_map! { "a" => 1, 0 => "x" };
            let right = assoc_map! { "a" => 2, 0 => "y" };
            assert_eq!(array::merge(&[&left, &right]), assoc_map! { "a" => 2, 0 => "x", 1 => "y" });
            assert_eq!(array::union(&[&left, &right]), left);
            let recursive = array::merge_recursive(&[&left, &right]);
            assert_eq!(recursive.get(&key!("a")), Some(&Value::Array(arr![1, 2])));
            Ok(())
        },
    )
}

#[test]
fn test_set_algebra() {
    run_test(
        || create_test_context(),
        |_| {
            let base = assoc_map! { "a" => "green", "b" => "brown", "c" => "blue", 0 => "red" };
            let other = assoc_map! { "a" => "green", 0 => "yellow", 1 => "red" };
            assert_eq!(
                array::difference(&base, &[&other]),
                assoc_map! { "b" => "brown", "c" => "blue" }
            );
            assert_eq!(
                array::difference_key(&base, &[&other]),
                assoc_map! { "b" => "brown", "c" => "blue" }
            );
            assert_eq!(
                array::difference_assoc(&base, &[&other]),
                assoc_map! { "b" => "brown", "c" => "blue", 0 => "red" }
            );
            assert_eq!(
                array::intersect(&base, &[&other]),
                assoc_map! { "a" => "green", 0 => "red" }
            );
            assert_eq!(
                array::intersect_key(&base, &[&other]),
                assoc_map! { "a" => "green", 0 => "red" }
            );
            assert_eq!(array::intersect_assoc(&base, &[&other]), assoc_map! { "a" => "green" });
            Ok(())
        },
    )
}

#[test]
fn test_flip_rejects_non_key_values() {
    run_test(
        || create_test_context(),
        |_| {
            assert_eq!(array::flip(&arr!["a", 7])?, assoc_map! { "a" => 0, 7 => 1 });
            assert_eq!(array::flip(&arr![1.5]).unwrap_err().kind(), &ErrorKind::InvalidKeyType);
            Ok(())
        },
    )
}

#[test]
fn test_slice_splice_and_pad() {
    run_test(
        || create_test_context(),
        |_| {
            let letters = arr!["a", "b", "c", "d", "e"];
            assert_eq!(array::slice(&letters, -2, None, false), arr!["d", "e"]);
            assert_eq!(
                array::slice(&letters, 1, Some(-1), true),
                assoc_map! { 1 => "b", 2 => "c", 3 => "d" }
            );

            let mut spliced = letters.clone();
            let removed = array::splice(&mut spliced, 1, Some(2), &arr!["X"]);
            assert_eq!(removed, arr!["b", "c"]);
            assert_eq!(spliced, arr!["a", "X", "d", "e"]);

            assert_eq!(array::pad(&arr![1], -3, &val!(0))?, arr![0, 0, 1]);
            assert_eq!(array::pad(&letters, 2, &val!(0))?, letters);
            Ok(())
        },
    )
}

#[test]
fn test_random_bounds() {
    run_test(
        || create_test_context(),
        |_| {
            let letters = arr!["a", "b", "c"];
            let picked = array::random(&letters, 2, true)?;
            assert_eq!(picked.len(), 2);
            assert!(picked.iter().all(|(key, value)| letters.get(key) == Some(value)));
            assert_eq!(
                array::random(&letters, 4, false).unwrap_err().kind(),
                &ErrorKind::CapacityExceeded
            );
            Ok(())
        },
    )
}

#[test]
fn test_sorting() {
    run_test(
        || create_test_context(),
        |_| {
            let records = create_test_records();
            let sorted = primitives::sort_by_many(
                &records,
                &[(key!("active"), SortOrder::Descending), (key!("name"), SortOrder::Ascending)],
            )?;
            assert_eq!(
                column_of(&sorted, "name"),
                vec![val!("Ada"), val!("Alan"), val!("Linus"), val!("Barbara"), val!("Grace")]
            );

            let mixed = arr!["10", 9, "8a"];
            let numeric = primitives::sort(&mixed, SortOrder::Ascending, false, SortFlag::Numeric)?;
            assert_eq!(numeric.get(&key!(2)), Some(&val!("10")));
            assert_eq!(
                primitives::sort_by_key(
                    &assoc_map! { "b" => 1, 2 => 2, "a" => 3 },
                    SortOrder::Ascending
                )
                .keys()
                .cloned()
                .collect::<Vec<_>>(),
                vec![key!(2), key!("a"), key!("b")]
            );
            Ok(())
        },
    )
}

#[test]
fn test_iterator_helpers() {
    run_test(
        || create_test_context(),
        |_| {
            let entries = || vec![(key!("a"), val!(1)), (key!("b"), val!(2)), (key!("a"), val!(3))];
            assert_eq!(iter::count(entries()), 3);
            assert!(!iter::is_empty(entries()));
            assert!(iter::is_empty(ArrayMap::new()));
            assert_eq!(iter::to_array(entries()), assoc_map! { "a" => 3, "b" => 2 });

            let mut seen = Vec::new();
            let visited = iter::apply(entries(), |key, _| {
                seen.push(key.clone());
                seen.len() < 2
            });
            assert_eq!(visited, 2);
            assert_eq!(seen, vec![key!("a"), key!("b")]);
            Ok(())
        },
    )
}
