use collectable::collection::Collectable;
use collectable::{arr, assoc_map};
use collectable_int_test::test_util::{create_test_context, run_test};

#[test]
fn test_factory_not_called_until_accessed() {
    run_test(
        || create_test_context(),
        |ctx| {
            let collection = ctx.counting_collection(arr![1, 2, 3]);
            let _filtered = collection.filter(|_, _| true).reverse(false).values();
            assert_eq!(ctx.calls(), 0);
            assert!(!collection.is_materialized());
            Ok(())
        },
    )
}

#[test]
fn test_factory_called_once_for_repeated_access() {
    run_test(
        || create_test_context(),
        |ctx| {
            let collection = ctx.counting_collection(arr![1, 2, 3]);
            assert_eq!(collection.all()?, arr![1, 2, 3]);
            assert_eq!(collection.all()?, arr![1, 2, 3]);
            assert_eq!(collection.count()?, 3);
            assert_eq!(ctx.calls(), 1);
            Ok(())
        },
    )
}

#[test]
fn test_derived_collections_read_the_source_snapshot() {
    run_test(
        || create_test_context(),
        |ctx| {
            let mut collection = ctx.counting_collection(assoc_map! { "a" => 1 });
            collection.all()?;
            let copy = collection.filter(|_, _| true);
            collection.set("b", 2)?;

            assert_eq!(copy.all()?, assoc_map! { "a" => 1 });
            assert_eq!(collection.count()?, 2);
            assert_eq!(ctx.calls(), 1);
            Ok(())
        },
    )
}

#[test]
fn test_unmaterialized_source_runs_factory_per_derived_collection() {
    run_test(
        || create_test_context(),
        |ctx| {
            let collection = ctx.counting_collection(arr![1, 2, 3]);
            let first = collection.take(1);
            let last = collection.take(-1);
            assert_eq!(first.all()?, arr![1]);
            assert_eq!(last.all()?, assoc_map! { 2 => 3 });
            assert_eq!(ctx.calls(), 2);
            assert!(!collection.is_materialized());
            Ok(())
        },
    )
}

#[test]
fn test_index_and_lazy_are_deferred() {
    run_test(
        || create_test_context(),
        |ctx| {
            let index = ctx.counting_index(vec![1.into(), 2.into()]);
            let naturals = ctx.counting_naturals();
            let evens = naturals.filter(|_, v| v.as_int().is_some_and(|n| n % 2 == 0)).take(3);
            assert_eq!(ctx.calls(), 0);

            assert_eq!(index.count()?, 2);
            assert_eq!(ctx.calls(), 1);
            assert_eq!(evens.count()?, 3);
            assert_eq!(ctx.calls(), 2);
            Ok(())
        },
    )
}
