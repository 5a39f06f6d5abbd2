//! Stable sorts over [ArrayMap]s. Ties always keep their input order.

use std::cmp::Ordering;

use itertools::Itertools;
use smallvec::SmallVec;

use crate::common::{ArrayMap, Key, SortFlag, SortOrder, Value};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};
use crate::primitives::arr::{list, reindex};

type ColumnVec<'a> = SmallVec<[Option<&'a Value>; 4]>;

/// Sorts by value using the comparator of `flag`.
///
/// Without `preserve_keys` the result is a list; with it every value keeps its key.
///
/// # Errors
///
/// Returns an error if the comparator for `flag` cannot be built.
pub fn sort(
    array: &ArrayMap,
    order: SortOrder,
    preserve_keys: bool,
    flag: SortFlag,
) -> CollectionResult<ArrayMap> {
    let comparator = flag.comparator()?;
    Ok(sort_by(array, |a, b| order.apply(comparator(a, b)), preserve_keys))
}

/// Sorts by key: integer keys first in numeric order, then string keys.
pub fn sort_by_key(array: &ArrayMap, order: SortOrder) -> ArrayMap {
    sort_key_by(array, |a, b| order.apply(a.cmp(b)))
}

/// Sorts by value with a custom comparator.
pub fn sort_by<F>(array: &ArrayMap, compare: F, preserve_keys: bool) -> ArrayMap
where
    F: Fn(&Value, &Value) -> Ordering,
{
    let entries = array
        .iter()
        .sorted_by(|(_, a), (_, b)| compare(a, b))
        .map(|(key, value)| (key.clone(), value.clone()));
    if preserve_keys {
        entries.collect()
    } else {
        list(entries.map(|(_, value)| value))
    }
}

/// Sorts by key with a custom comparator. Keys are kept.
pub fn sort_key_by<F>(array: &ArrayMap, compare: F) -> ArrayMap
where
    F: Fn(&Key, &Key) -> Ordering,
{
    array
        .iter()
        .sorted_by(|(a, _), (b, _)| compare(a, b))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Sorts a list of uniformly-shaped records by several columns.
///
/// Records are ordered by the first column, ties by the second column and so on.
/// Integer keys of the result are renumbered, string keys kept.
///
/// # Errors
///
/// * `InvalidArgument` if `fields` is empty or the data is not a list of records
/// * `KeyNotFound` if a column is absent from the first record
/// * `SizeMismatch` if a column is absent from any later record
pub fn sort_by_many(array: &ArrayMap, fields: &[(Key, SortOrder)]) -> CollectionResult<ArrayMap> {
    if fields.is_empty() {
        log::error!("Sorting by many requires at least one field");
        return Err(CollectionError::new(
            "Each field has to have both field name and sort value",
            ErrorKind::InvalidArgument,
        ));
    }
    if array.is_empty() {
        return Ok(ArrayMap::new());
    }

    let Some(first) = array.values().next().and_then(Value::as_array) else {
        log::error!("Sorting by many requires a 2-dimensional collection");
        return Err(CollectionError::new(
            "When sorting by many your collection must be 2-dimensional array",
            ErrorKind::InvalidArgument,
        ));
    };

    for (column, _) in fields {
        if !first.contains_key(column) {
            log::error!("Sort column {} does not exist in the first record", column);
            return Err(CollectionError::new(
                &format!("Key {} does not exist", column),
                ErrorKind::KeyNotFound,
            ));
        }
    }

    let mut rows: Vec<(&Key, &Value, ColumnVec)> = Vec::with_capacity(array.len());
    for (key, value) in array {
        let columns: ColumnVec = fields.iter().map(|(column, _)| value.column(column)).collect();
        if let Some(position) = columns.iter().position(Option::is_none) {
            log::error!("Sort column {} is missing in record {}", fields[position].0, key);
            return Err(CollectionError::new(
                &format!("Key {} is missing somewhere", fields[position].0),
                ErrorKind::SizeMismatch,
            ));
        }
        rows.push((key, value, columns));
    }

    rows.sort_by(|(_, _, a), (_, _, b)| {
        fields
            .iter()
            .zip(a.iter().zip(b.iter()))
            .map(|((_, order), (x, y))| order.apply(x.cmp(y)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    Ok(reindex(
        rows.into_iter()
            .map(|(key, value, _)| (key.clone(), value.clone())),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arr, assoc, assoc_map, key};

    fn people() -> ArrayMap {
        arr![
            assoc! { "name" => "Ada", "age" => 36, "city" => "London" },
            assoc! { "name" => "Linus", "age" => 28, "city" => "Helsinki" },
            assoc! { "name" => "Grace", "age" => 36, "city" => "Arlington" },
            assoc! { "name" => "Alan", "age" => 28, "city" => "London" },
        ]
    }

    fn names(array: &ArrayMap) -> Vec<String> {
        array
            .values()
            .filter_map(|v| v.column(&key!("name")))
            .map(|v| v.to_plain_string())
            .collect()
    }

    #[test]
    fn test_sort_values() {
        let items = assoc_map! { "a" => 3, "b" => 1, "c" => 2 };
        let sorted = sort(&items, SortOrder::Ascending, false, SortFlag::Regular).unwrap();
        assert_eq!(sorted, arr![1, 2, 3]);

        let sorted = sort(&items, SortOrder::Descending, true, SortFlag::Regular).unwrap();
        assert_eq!(
            sorted.keys().cloned().collect::<Vec<_>>(),
            vec![key!("a"), key!("c"), key!("b")]
        );
    }

    #[test]
    fn test_sort_with_flag() {
        let items = arr!["img12", "img10", "img2"];
        let sorted = sort(&items, SortOrder::Ascending, false, SortFlag::Natural).unwrap();
        assert_eq!(sorted, arr!["img2", "img10", "img12"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let items = assoc_map! { "x" => 1, "y" => 0, "z" => 1, "w" => 0 };
        let sorted = sort(&items, SortOrder::Ascending, true, SortFlag::Regular).unwrap();
        assert_eq!(
            sorted.keys().cloned().collect::<Vec<_>>(),
            vec![key!("y"), key!("w"), key!("x"), key!("z")]
        );
    }

    #[test]
    fn test_sort_by_key() {
        let items = assoc_map! { "b" => 1, 10 => 2, "a" => 3, 2 => 4 };
        let sorted = sort_by_key(&items, SortOrder::Ascending);
        assert_eq!(
            sorted.keys().cloned().collect::<Vec<_>>(),
            vec![key!(2), key!(10), key!("a"), key!("b")]
        );
        let sorted = sort_by_key(&items, SortOrder::Descending);
        assert_eq!(sorted.keys().next(), Some(&key!("b")));
    }

    #[test]
    fn test_custom_comparators() {
        let items = arr!["ccc", "a", "bb"];
        let sorted = sort_by(&items, |a, b| {
            a.to_plain_string().len().cmp(&b.to_plain_string().len())
        }, false);
        assert_eq!(sorted, arr!["a", "bb", "ccc"]);

        let sorted = sort_key_by(&items, |a, b| b.cmp(a));
        assert_eq!(sorted.keys().next(), Some(&key!(2)));
    }

    #[test]
    fn test_sort_by_many() {
        let sorted = sort_by_many(
            &people(),
            &[(key!("age"), SortOrder::Descending), (key!("name"), SortOrder::Ascending)],
        )
        .unwrap();
        assert_eq!(names(&sorted), vec!["Ada", "Grace", "Alan", "Linus"]);
        assert_eq!(
            sorted.keys().cloned().collect::<Vec<_>>(),
            vec![key!(0), key!(1), key!(2), key!(3)]
        );
    }

    #[test]
    fn test_sort_by_many_keeps_ties_in_order() {
        let sorted = sort_by_many(&people(), &[(key!("city"), SortOrder::Ascending)]).unwrap();
        assert_eq!(names(&sorted), vec!["Grace", "Linus", "Ada", "Alan"]);
    }

    #[test]
    fn test_sort_by_many_errors() {
        let err = sort_by_many(&people(), &[]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidArgument);

        let err = sort_by_many(&arr![1, 2], &[(key!("age"), SortOrder::Ascending)]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidArgument);

        let err = sort_by_many(&people(), &[(key!("email"), SortOrder::Ascending)]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::KeyNotFound);

        let mut ragged = people();
        ragged.insert(key!(4), assoc! { "name" => "Edsger" });
        let err = sort_by_many(&ragged, &[(key!("age"), SortOrder::Ascending)]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::SizeMismatch);
    }

    #[test]
    fn test_sort_by_many_empty() {
        let fields = [(key!("age"), SortOrder::Ascending)];
        let sorted = sort_by_many(&ArrayMap::new(), &fields).unwrap();
        assert!(sorted.is_empty());
    }
}
