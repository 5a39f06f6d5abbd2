use collectable::collection::{Collectable, Collection};
use collectable::common::Value;
use collectable::errors::ErrorKind;
use collectable::{arr, assoc_map, key, val};
use collectable_int_test::test_util::{create_test_context, run_test};

#[test]
fn test_range_bounds() {
    run_test(
        || create_test_context(),
        |_| {
            assert_eq!(Collection::range(1, 5, 1)?.as_basic().all()?, arr![1, 2, 3, 4, 5]);
            assert_eq!(Collection::range(5, 1, 1).unwrap_err().kind(), &ErrorKind::InvalidRange);
            assert_eq!(Collection::range(1, 5, 0).unwrap_err().kind(), &ErrorKind::InvalidRange);
            assert_eq!(Collection::range(1, 5, 6).unwrap_err().kind(), &ErrorKind::InvalidRange);
            assert_eq!(Collection::range('a', 5, 1).unwrap_err().kind(), &ErrorKind::InvalidRange);
            Ok(())
        },
    )
}

#[test]
fn test_range_at_integer_limits() {
    run_test(
        || create_test_context(),
        |_| {
            let err = Collection::range(i64::MIN, i64::MAX, 1).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CapacityExceeded);
            let err = Collection::range(0.0, 1e300, 1.0).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CapacityExceeded);

            let evens = Collection::range(i64::MIN, i64::MAX, 2)?;
            assert_eq!(evens.len() as u64, 1u64 << 63);
            let head: Vec<Value> = evens.as_lazy().take(2).iter().map(|(_, value)| value).collect();
            assert_eq!(head, vec![val!(i64::MIN), val!(i64::MIN + 2)]);

            let wide = Collection::range(0.0, 1e12, 0.5)?;
            assert_eq!(wide.as_lazy().first()?, Some(val!(0.0)));
            Ok(())
        },
    )
}

#[test]
fn test_range_variants_agree() {
    run_test(
        || create_test_context(),
        |_| {
            let range = Collection::range(0, 20, 5)?;
            assert_eq!(range.len(), 5);
            let expected = vec![val!(0), val!(5), val!(10), val!(15), val!(20)];
            assert_eq!(range.as_index().all()?, expected);
            let lazy: Vec<Value> = range.as_lazy().iter().map(|(_, value)| value).collect();
            assert_eq!(lazy, expected);
            let basic: Vec<Value> = range.as_basic().all()?.into_values().collect();
            assert_eq!(basic, expected);

            let letters = Collection::range('x', 'z', 1)?;
            assert_eq!(letters.as_basic().all()?, arr!["x", "y", "z"]);
            Ok(())
        },
    )
}

#[test]
fn test_fill() {
    run_test(
        || create_test_context(),
        |_| {
            let fill = Collection::fill("?", 3).start_index(-1);
            assert_eq!(fill.as_basic().all()?, assoc_map! { -1 => "?", 0 => "?", 1 => "?" });
            assert_eq!(fill.as_index().all()?, vec![val!("?"); 3]);
            assert_eq!(fill.as_lazy().keys(None).to_array()?, arr![-1, 0, 1]);

            let empty = Collection::fill(0, 0);
            assert!(empty.as_basic().is_empty()?);
            assert!(empty.as_lazy().is_empty()?);
            Ok(())
        },
    )
}

#[test]
fn test_fill_keys() {
    run_test(
        || create_test_context(),
        |_| {
            let defaults =
                Collection::fill_keys(vec![key!("host"), key!("port"), key!(7)], Value::Null);
            let basic = defaults.as_basic();
            assert_eq!(basic.count()?, 3);
            assert!(basic.has("port")?);
            assert!(!basic.isset("port")?);
            assert_eq!(defaults.as_lazy().keys(None).to_array()?, arr!["host", "port", 7]);
            Ok(())
        },
    )
}

#[test]
fn test_fill_assoc() {
    run_test(
        || create_test_context(),
        |_| {
            let mismatched = Collection::fill_assoc(vec![1, 2, 3], vec!["a", "b"]);
            assert_eq!(mismatched.as_basic().all().unwrap_err().kind(), &ErrorKind::SizeMismatch);
            assert_eq!(mismatched.as_lazy().unwrap_err().kind(), &ErrorKind::SizeMismatch);

            let paired = Collection::fill_assoc(vec![1, 2], vec!["a", "b"]);
            assert_eq!(paired.as_basic().all()?, assoc_map! { 1 => "a", 2 => "b" });
            assert_eq!(paired.as_lazy()?.to_array()?, assoc_map! { 1 => "a", 2 => "b" });

            let invalid = Collection::fill_assoc(vec![true], vec!["a"]);
            assert_eq!(invalid.as_basic().all().unwrap_err().kind(), &ErrorKind::InvalidKeyType);
            Ok(())
        },
    )
}

#[test]
fn test_builders_are_deferred() {
    run_test(
        || create_test_context(),
        |_| {
            let huge = Collection::fill(1, usize::MAX).as_lazy();
            assert!(!huge.is_materialized());
            assert_eq!(huge.take(3).count()?, 3);

            let basic = Collection::range(1, 1_000, 1)?.as_basic();
            assert!(!basic.is_materialized());
            assert_eq!(basic.last()?, Some(&val!(1000)));
            assert!(basic.is_materialized());
            Ok(())
        },
    )
}
