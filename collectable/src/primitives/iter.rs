//! Helpers over key/value iterators. Every function consumes what it is given.

use crate::common::{ArrayMap, Key, Value};

/// Returns true if the iterator yields nothing. Advances it by at most one item.
pub fn is_empty<I>(iterator: I) -> bool
where
    I: IntoIterator<Item = (Key, Value)>,
{
    iterator.into_iter().next().is_none()
}

/// Drains the iterator and returns the number of items it yielded.
pub fn count<I>(iterator: I) -> usize
where
    I: IntoIterator<Item = (Key, Value)>,
{
    iterator.into_iter().count()
}

/// Drains the iterator into a map. A repeated key keeps the last value in its
/// first position.
pub fn to_array<I>(iterator: I) -> ArrayMap
where
    I: IntoIterator<Item = (Key, Value)>,
{
    iterator.into_iter().collect()
}

/// Calls `callback` for every item until it returns `false`.
///
/// Returns the number of items the callback was called with.
pub fn apply<I, F>(iterator: I, mut callback: F) -> usize
where
    I: IntoIterator<Item = (Key, Value)>,
    F: FnMut(&Key, &Value) -> bool,
{
    let mut calls = 0;
    for (key, value) in iterator {
        calls += 1;
        if !callback(&key, &value) {
            break;
        }
    }
    calls
}
