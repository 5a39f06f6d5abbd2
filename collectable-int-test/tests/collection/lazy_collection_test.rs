use std::cell::Cell;
use std::rc::Rc;

use collectable::collection::{Collectable, Collection, LazyCollection};
use collectable::common::{Key, Value};
use collectable::errors::ErrorKind;
use collectable::{arr, key, val};
use collectable_int_test::test_util::{create_test_context, run_test};

#[test]
fn test_cursor_is_not_restartable() {
    run_test(
        || create_test_context(),
        |_| {
            let collection = Collection::lazy(|| vec![(key!("a"), val!(1)), (key!("b"), val!(2))]);
            assert_eq!(collection.all()?.len(), 2);
            assert_eq!(collection.count()?, 0);
            assert!(collection.all()?.is_empty());
            assert_eq!(collection.iter().count(), 2);
            Ok(())
        },
    )
}

#[test]
fn test_infinite_sequence_is_bounded_by_take() {
    run_test(
        || create_test_context(),
        |ctx| {
            let naturals = ctx.counting_naturals();
            let odd_squares = naturals
                .filter(|_, n| n.as_int().is_some_and(|n| n % 2 == 1))
                .map(|_, n| val!(n.as_int().unwrap_or_default().pow(2)))
                .values()
                .take(4);
            assert_eq!(ctx.calls(), 0);
            assert_eq!(odd_squares.to_array()?, arr![1, 9, 25, 49]);
            assert_eq!(ctx.calls(), 1);

            assert_eq!(
                naturals.skip_while(|_, n| n.as_int() < Some(1000)).first()?,
                Some(val!(1000))
            );
            assert!(naturals.contains(5)?);
            assert_eq!(naturals.first()?, Some(val!(6)));
            Ok(())
        },
    )
}

#[test]
fn test_duplicate_keys_are_kept_until_collected() {
    run_test(
        || create_test_context(),
        |_| {
            let entries = vec![(key!("k"), val!(1)), (key!("k"), val!(2)), (key!("j"), val!(3))];
            let collection = LazyCollection::from_entries(entries.clone());
            assert_eq!(collection.all()?, entries);

            let collapsed = LazyCollection::from_entries(entries).to_array()?;
            assert_eq!(collapsed.len(), 2);
            assert_eq!(collapsed.get(&key!("k")), Some(&val!(2)));
            Ok(())
        },
    )
}

#[test]
fn test_keys_values_and_unique() {
    run_test(
        || create_test_context(),
        |_| {
            let colors = || {
                Collection::lazy(|| {
                    vec![
                        (key!("apple"), val!("red")),
                        (key!("lime"), val!("green")),
                        (key!("cherry"), val!("red")),
                    ]
                })
            };
            assert_eq!(colors().keys(Some(val!("red"))).to_array()?, arr!["apple", "cherry"]);
            assert_eq!(colors().values().unique().to_array()?, arr!["red", "green"]);
            assert_eq!(colors().only(&[key!("lime")]).count()?, 1);
            assert_eq!(colors().except(&[key!("lime")]).count()?, 2);
            Ok(())
        },
    )
}

#[test]
fn test_is_empty_does_not_consume() {
    run_test(
        || create_test_context(),
        |_| {
            let collection = Collection::lazy(|| vec![(key!(0), val!("only"))]);
            assert!(!collection.is_empty()?);
            assert!(!collection.is_empty()?);
            assert_eq!(collection.first()?, Some(val!("only")));
            assert!(collection.is_empty()?);
            Ok(())
        },
    )
}

#[test]
fn test_reentrant_consumption_is_rejected() {
    run_test(
        || create_test_context(),
        |_| {
            let collection = Rc::new(Collection::lazy(|| {
                (0..3).map(|n: i64| (Key::from(n), Value::from(n)))
            }));
            let inner = Rc::clone(&collection);
            let failure = Cell::new(None);
            collection.each(|_, _| {
                failure.set(inner.count().err().map(|err| err.kind().clone()));
                false
            })?;
            assert_eq!(failure.take(), Some(ErrorKind::InvalidAttribute));
            Ok(())
        },
    )
}
