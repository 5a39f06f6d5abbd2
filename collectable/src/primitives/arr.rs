//! Pure functions over [ArrayMap]s.
//!
//! Inputs are never modified (except by [splice], which works on a mutable map by
//! contract); every function returns a new map.
//!
//! Set algebra (`difference*`, `intersect*`, `unique`, `duplicates`) compares values by
//! their string form, so `1` and `"1"` are the same value; nested records compare by
//! their JSON form. Searches (`search`, `keys` with a filter) use strict equality.

use std::collections::HashSet;

use itertools::Itertools;
use rand::seq::SliceRandom;

use crate::common::{is_list, ArrayMap, Key, Value};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};

/// Builds a list (keys `0..n`) from values.
pub fn list<I: IntoIterator<Item = Value>>(values: I) -> ArrayMap {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| (Key::from(index), value))
        .collect()
}

/// Rebuilds a map from entries, renumbering integer keys from 0 and keeping string keys.
/// A repeated string key overwrites the earlier value in its original position.
pub fn reindex<I: IntoIterator<Item = (Key, Value)>>(entries: I) -> ArrayMap {
    let mut items = ArrayMap::new();
    let mut next = 0i64;
    for (key, value) in entries {
        match key {
            Key::Int(_) => {
                items.insert(Key::Int(next), value);
                next += 1;
            }
            key => {
                items.insert(key, value);
            }
        }
    }
    items
}

/// Returns the key `push` assigns next: one past the largest integer key, or 0.
///
/// # Errors
///
/// Returns `CapacityExceeded` when the largest integer key is `i64::MAX`.
pub fn next_index(array: &ArrayMap) -> CollectionResult<i64> {
    match array.keys().filter_map(Key::as_int).max() {
        None => Ok(0),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            log::error!("Cannot add element, the next integer key is already occupied");
            CollectionError::new(
                "Cannot add element, the next integer key is already occupied",
                ErrorKind::CapacityExceeded,
            )
        }),
    }
}

/// Appends a value under [next_index].
pub fn append(array: &mut ArrayMap, value: Value) -> CollectionResult<Key> {
    let key = Key::Int(next_index(array)?);
    array.insert(key.clone(), value);
    Ok(key)
}

pub fn is_empty(array: &ArrayMap) -> bool {
    array.is_empty()
}

/// Returns true if at least one value is itself an array.
pub fn is_multi_dimensional(array: &ArrayMap) -> bool {
    array.values().any(Value::is_array)
}

/// Returns true if the map is not empty and its keys are not exactly `0..n`.
pub fn is_associative(array: &ArrayMap) -> bool {
    !array.is_empty() && !is_list(array)
}

/// Counts the entries, including the entries of nested arrays when `recursive` is set.
pub fn count(array: &ArrayMap, recursive: bool) -> usize {
    if !recursive {
        return array.len();
    }
    array
        .values()
        .map(|value| match value {
            Value::Array(nested) => 1 + count(nested, true),
            _ => 1,
        })
        .sum()
}

/// Counts the occurrences of every integer or string value.
///
/// On 2-D data the values of `column` are counted instead.
///
/// # Errors
///
/// Returns `InvalidArgument` if the data is 2-D and no column is given.
pub fn count_values(array: &ArrayMap, column_key: Option<&Key>) -> CollectionResult<ArrayMap> {
    let source = match column_key {
        Some(key) => column(array, Some(key), None),
        None if is_multi_dimensional(array) => {
            log::error!("A column is required when counting values of multi-dimensional data");
            return Err(CollectionError::new(
                "You have to provide key when counting multidimensional array",
                ErrorKind::InvalidArgument,
            ));
        }
        None => array.clone(),
    };

    let mut counts = ArrayMap::new();
    for value in source.values() {
        match value.as_key() {
            Some(key) => {
                let entry = counts.entry(key).or_insert(Value::Int(0));
                if let Value::Int(count) = entry {
                    *count += 1;
                }
            }
            None => log::debug!(
                "Skipping value {:?}, only integers and strings can be counted",
                value
            ),
        }
    }
    Ok(counts)
}

/// Projects one column out of a list of records.
///
/// With `column_key = None` the whole record is taken. Rows that are not records or
/// lack the column are skipped. With an `index_key`, the value of that column becomes
/// the key of the row; rows without a usable index get the next integer key.
pub fn column(array: &ArrayMap, column_key: Option<&Key>, index_key: Option<&Key>) -> ArrayMap {
    let mut items = ArrayMap::new();
    let mut next = 0i64;
    for row in array.values() {
        let Some(record) = row.as_array() else {
            continue;
        };
        let value = match column_key {
            Some(key) => match record.get(key) {
                Some(value) => value.clone(),
                None => continue,
            },
            None => row.clone(),
        };
        let key = index_key
            .and_then(|index| record.get(index))
            .and_then(Value::as_key);
        match key {
            Some(key) => {
                if let Key::Int(k) = key {
                    next = next.max(k.saturating_add(1));
                }
                items.insert(key, value);
            }
            None => {
                items.insert(Key::Int(next), value);
                next += 1;
            }
        }
    }
    items
}

/// Merges maps left to right: string keys of later maps overwrite earlier ones,
/// integer keys are appended and renumbered.
pub fn merge(arrays: &[&ArrayMap]) -> ArrayMap {
    reindex(
        arrays
            .iter()
            .flat_map(|array| array.iter().map(|(key, value)| (key.clone(), value.clone()))),
    )
}

/// Key-preserving union: the first map that holds a key wins.
pub fn union(arrays: &[&ArrayMap]) -> ArrayMap {
    let mut items = ArrayMap::new();
    for array in arrays {
        for (key, value) in array.iter() {
            if !items.contains_key(key) {
                items.insert(key.clone(), value.clone());
            }
        }
    }
    items
}

/// Like [merge], but values under a shared string key are merged into a list
/// (recursively when both are arrays) instead of being overwritten.
pub fn merge_recursive(arrays: &[&ArrayMap]) -> ArrayMap {
    let mut items = ArrayMap::new();
    let mut next = 0i64;
    for array in arrays {
        for (key, value) in array.iter() {
            match key {
                Key::Int(_) => {
                    items.insert(Key::Int(next), value.clone());
                    next += 1;
                }
                Key::Str(_) => {
                    let merged = match items.get(key) {
                        Some(existing) => {
                            let left = as_list(existing);
                            let right = as_list(value);
                            Value::Array(merge_recursive(&[&left, &right]))
                        }
                        None => value.clone(),
                    };
                    items.insert(key.clone(), merged);
                }
            }
        }
    }
    items
}

fn as_list(value: &Value) -> ArrayMap {
    match value {
        Value::Array(array) => array.clone(),
        other => list([other.clone()]),
    }
}

/// Merges the nested arrays of a 2-D map into one map. Scalar values are dropped.
///
/// # Errors
///
/// Returns `InvalidArgument` if no value is an array.
pub fn collapse(array: &ArrayMap) -> CollectionResult<ArrayMap> {
    if !is_multi_dimensional(array) {
        log::error!("Array need to be multi-dimensional to be able to collapse");
        return Err(CollectionError::new(
            "Array need to be multi-dimensional to be able to collapse",
            ErrorKind::InvalidArgument,
        ));
    }
    let nested: Vec<&ArrayMap> = array.values().filter_map(Value::as_array).collect();
    Ok(merge(&nested))
}

/// Pairs the values of `keys` with the values of `values` by position.
///
/// # Errors
///
/// * `InvalidKeyType` if a value of `keys` is neither an integer nor a string
/// * `SizeMismatch` if both maps have a different number of entries
pub fn combine(keys: &ArrayMap, values: &ArrayMap) -> CollectionResult<ArrayMap> {
    let mut combined_keys = Vec::with_capacity(keys.len());
    for value in keys.values() {
        match value.as_key() {
            Some(key) => combined_keys.push(key),
            None => {
                log::error!("One of the original keys is neither string nor integer: {:?}", value);
                return Err(CollectionError::new(
                    "One of the original keys is neither string nor integer",
                    ErrorKind::InvalidKeyType,
                ));
            }
        }
    }

    if combined_keys.len() != values.len() {
        log::error!(
            "Cannot combine {} keys with {} values",
            combined_keys.len(),
            values.len()
        );
        return Err(CollectionError::new(
            "Current and combined array need to have the same number of items",
            ErrorKind::SizeMismatch,
        ));
    }

    Ok(combined_keys
        .into_iter()
        .zip(values.values().cloned())
        .collect())
}

/// Returns the first key whose value strictly equals `needle`.
///
/// With `column_key`, the value of that column of every record is compared instead.
pub fn search(array: &ArrayMap, needle: &Value, column_key: Option<&Key>) -> Option<Key> {
    array
        .iter()
        .find(|(_, value)| match column_key {
            Some(column) => value.column(column) == Some(needle),
            None => *value == needle,
        })
        .map(|(key, _)| key.clone())
}

/// Returns every key whose value strictly equals `needle`.
pub fn search_all(array: &ArrayMap, needle: &Value) -> Vec<Key> {
    keys(array, Some(needle))
}

/// Returns the keys, optionally only those whose value strictly equals `filter`.
pub fn keys(array: &ArrayMap, filter: Option<&Value>) -> Vec<Key> {
    array
        .iter()
        .filter(|(_, value)| filter.map_or(true, |expected| *value == expected))
        .map(|(key, _)| key.clone())
        .collect()
}

/// Returns the values as a list.
pub fn values(array: &ArrayMap) -> ArrayMap {
    list(array.values().cloned())
}

pub fn key_exists(key: &Key, array: &ArrayMap) -> bool {
    array.contains_key(key)
}

/// Keeps the entries matching the predicate, keys preserved.
pub fn filter<F>(array: &ArrayMap, predicate: F) -> ArrayMap
where
    F: Fn(&Key, &Value) -> bool,
{
    array
        .iter()
        .filter(|(key, value)| predicate(key, value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn value_set(arrays: &[&ArrayMap]) -> Vec<HashSet<String>> {
    arrays
        .iter()
        .map(|array| array.values().map(Value::to_plain_string).collect())
        .collect()
}

/// Entries of `array` whose value is present in none of `excludes`.
pub fn difference(array: &ArrayMap, excludes: &[&ArrayMap]) -> ArrayMap {
    let sets = value_set(excludes);
    filter(array, |_, value| {
        let needle = value.to_plain_string();
        sets.iter().all(|set| !set.contains(&needle))
    })
}

/// Entries of `array` whose key is present in none of `excludes`.
pub fn difference_key(array: &ArrayMap, excludes: &[&ArrayMap]) -> ArrayMap {
    filter(array, |key, _| excludes.iter().all(|other| !other.contains_key(key)))
}

/// Entries of `array` whose key and value pair is present in none of `excludes`.
pub fn difference_assoc(array: &ArrayMap, excludes: &[&ArrayMap]) -> ArrayMap {
    filter(array, |key, value| {
        let needle = value.to_plain_string();
        excludes.iter().all(|other| match other.get(key) {
            Some(candidate) => candidate.to_plain_string() != needle,
            None => true,
        })
    })
}

/// Entries of `array` whose value is present in every one of `others`.
pub fn intersect(array: &ArrayMap, others: &[&ArrayMap]) -> ArrayMap {
    let sets = value_set(others);
    filter(array, |_, value| {
        let needle = value.to_plain_string();
        sets.iter().all(|set| set.contains(&needle))
    })
}

/// Entries of `array` whose key is present in every one of `others`.
pub fn intersect_key(array: &ArrayMap, others: &[&ArrayMap]) -> ArrayMap {
    filter(array, |key, _| others.iter().all(|other| other.contains_key(key)))
}

/// Entries of `array` whose key and value pair is present in every one of `others`.
pub fn intersect_assoc(array: &ArrayMap, others: &[&ArrayMap]) -> ArrayMap {
    filter(array, |key, value| {
        let needle = value.to_plain_string();
        others.iter().all(|other| {
            other
                .get(key)
                .is_some_and(|candidate| candidate.to_plain_string() == needle)
        })
    })
}

/// Removes repeated values, the first occurrence wins and keeps its key.
pub fn unique(array: &ArrayMap) -> ArrayMap {
    array
        .iter()
        .unique_by(|(_, value)| value.to_plain_string())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Entries removed by [unique]: every repeated occurrence after the first.
pub fn duplicates(array: &ArrayMap) -> ArrayMap {
    difference_assoc(array, &[&unique(array)])
}

/// Exchanges keys and values.
///
/// # Errors
///
/// Returns `InvalidKeyType` if a value is neither an integer nor a string.
pub fn flip(array: &ArrayMap) -> CollectionResult<ArrayMap> {
    let mut items = ArrayMap::with_capacity(array.len());
    for (key, value) in array {
        match value.as_key() {
            Some(flipped) => {
                items.insert(flipped, Value::from(key));
            }
            None => {
                log::error!(
                    "Method flip requires that all values be either int or string, found {:?}",
                    value
                );
                return Err(CollectionError::new(
                    "Method flip requires that all values be either int or string",
                    ErrorKind::InvalidKeyType,
                ));
            }
        }
    }
    Ok(items)
}

/// Entries whose key is listed, in the order of `array`.
pub fn only(array: &ArrayMap, keys: &[Key]) -> ArrayMap {
    let wanted: HashSet<&Key> = keys.iter().collect();
    filter(array, |key, _| wanted.contains(key))
}

/// Entries whose key is not listed.
pub fn except(array: &ArrayMap, keys: &[Key]) -> ArrayMap {
    let unwanted: HashSet<&Key> = keys.iter().collect();
    filter(array, |key, _| !unwanted.contains(key))
}

/// Most entries a single [pad] call may add.
pub const MAX_PAD: usize = 1_048_576;

/// Pads the map to `size` entries with `value`: on the right for a positive size,
/// on the left for a negative one. Integer keys are renumbered when padding happens.
///
/// # Errors
///
/// Returns `CapacityExceeded` if more than [MAX_PAD] entries would be added.
pub fn pad(array: &ArrayMap, size: i64, value: &Value) -> CollectionResult<ArrayMap> {
    let target = size.unsigned_abs();
    let missing = target.saturating_sub(array.len() as u64);
    if missing == 0 {
        return Ok(array.clone());
    }
    if missing > MAX_PAD as u64 {
        log::error!("Cannot pad {} entries, at most {} may be added at a time", missing, MAX_PAD);
        return Err(CollectionError::new(
            &format!("Cannot pad {} entries, at most {} may be added at a time", missing, MAX_PAD),
            ErrorKind::CapacityExceeded,
        ));
    }
    let padding = list(std::iter::repeat(value.clone()).take(missing as usize));
    if size > 0 {
        Ok(merge(&[array, &padding]))
    } else {
        Ok(merge(&[&padding, array]))
    }
}

/// Picks `number` random entries, in their original order.
///
/// # Errors
///
/// * `CapacityExceeded` if more entries are requested than the map holds
/// * `InvalidArgument` if `number` is 0
pub fn random(array: &ArrayMap, number: usize, preserve_keys: bool) -> CollectionResult<ArrayMap> {
    if number > array.len() {
        log::error!(
            "Asked random values are {}, and are greater than total number of items {}",
            number,
            array.len()
        );
        return Err(CollectionError::new(
            &format!(
                "Asked random values are {}, and are greater then total number of items {}",
                number,
                array.len()
            ),
            ErrorKind::CapacityExceeded,
        ));
    }
    if number == 0 {
        log::error!("At least one random value has to be requested");
        return Err(CollectionError::new(
            "At least one random value has to be requested",
            ErrorKind::InvalidArgument,
        ));
    }

    let mut rng = rand::thread_rng();
    let mut picked = rand::seq::index::sample(&mut rng, array.len(), number).into_vec();
    picked.sort_unstable();

    let entries = picked
        .into_iter()
        .filter_map(|index| array.get_index(index))
        .map(|(key, value)| (key.clone(), value.clone()));

    if preserve_keys {
        Ok(entries.collect())
    } else {
        Ok(list(entries.map(|(_, value)| value)))
    }
}

/// Reverses the order. String keys are always kept, integer keys only with `preserve_keys`.
pub fn reverse(array: &ArrayMap, preserve_keys: bool) -> ArrayMap {
    let entries = array
        .iter()
        .rev()
        .map(|(key, value)| (key.clone(), value.clone()));
    if preserve_keys {
        entries.collect()
    } else {
        reindex(entries)
    }
}

/// Shuffles the entries. Without `preserve_keys` the result is a list.
pub fn shuffle(array: &ArrayMap, preserve_keys: bool) -> ArrayMap {
    let mut entries: Vec<(Key, Value)> = array
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    entries.shuffle(&mut rand::thread_rng());
    if preserve_keys {
        entries.into_iter().collect()
    } else {
        list(entries.into_iter().map(|(_, value)| value))
    }
}

/// Resolves an offset/length pair against a length the way slicing does:
/// negative offsets count from the end, negative lengths stop before the end.
pub(crate) fn window(len: usize, offset: i64, length: Option<i64>) -> (usize, usize) {
    let len_i = len as i64;
    let start = if offset < 0 {
        (len_i + offset).max(0)
    } else {
        offset.min(len_i)
    };
    let end = match length {
        None => len_i,
        Some(l) if l < 0 => (len_i + l).max(start),
        Some(l) => start.saturating_add(l).min(len_i),
    };
    (start as usize, end as usize)
}

/// Extracts a portion of the map.
///
/// String keys are always kept, integer keys are renumbered unless `preserve_keys`.
pub fn slice(array: &ArrayMap, offset: i64, length: Option<i64>, preserve_keys: bool) -> ArrayMap {
    let (start, end) = window(array.len(), offset, length);
    let entries = array
        .iter()
        .skip(start)
        .take(end - start)
        .map(|(key, value)| (key.clone(), value.clone()));
    if preserve_keys {
        entries.collect()
    } else {
        reindex(entries)
    }
}

/// Removes a portion of `array` and puts `replacement` values in its place.
/// Integer keys of `array` are renumbered. Returns the removed entries.
pub fn splice(
    array: &mut ArrayMap,
    offset: i64,
    length: Option<i64>,
    replacement: &ArrayMap,
) -> ArrayMap {
    let (start, end) = window(array.len(), offset, length);
    let mut entries = std::mem::take(array).into_iter();
    let before: Vec<(Key, Value)> = entries.by_ref().take(start).collect();
    let removed: Vec<(Key, Value)> = entries.by_ref().take(end - start).collect();

    let inserted = replacement
        .values()
        .map(|value| (Key::Int(0), value.clone()));
    *array = reindex(before.into_iter().chain(inserted).chain(entries));
    reindex(removed)
}

/// Skips the first `offset` entries, renumbering integer keys.
pub fn skip(array: &ArrayMap, offset: usize) -> ArrayMap {
    slice(array, i64::try_from(offset).unwrap_or(i64::MAX), None, false)
}
