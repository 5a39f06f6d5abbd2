use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use serde::{Deserializer, Serializer};

use crate::collection::deferred::{DeferredStore, Source};
use crate::collection::{invalid_argument, key_already_exists, key_not_found, Collectable};
use crate::common::{
    deserialize_array_map, serialize_array_map, ArrayMap, Comparison, Key, Serializable, SortFlag,
    SortOrder, Value,
};
use crate::errors::CollectionResult;
use crate::primitives::{self, arr};

type Predicate = Rc<dyn Fn(&Key, &Value) -> bool>;

/// Dynamic map collection: an ordered mapping from integer or string keys to values.
///
/// Appending without a key assigns one past the largest integer key (0 when there is
/// none). Setting an existing key overwrites it in place, keeping its position.
///
/// # Examples
///
/// ```rust
/// use collectable::collection::{ArrayCollection, Collectable};
/// use collectable::{assoc_map, val};
///
/// let mut fruits = ArrayCollection::new(|| Ok(assoc_map! { "a" => "apple" }));
/// fruits.push("banana").unwrap();
/// fruits.set("c", "cherry").unwrap();
///
/// assert_eq!(fruits.get(0).unwrap(), &val!("banana"));
/// assert_eq!(fruits.count().unwrap(), 3);
/// ```
#[derive(Clone)]
pub struct ArrayCollection {
    store: DeferredStore<ArrayMap>,
}

impl ArrayCollection {
    /// Creates a collection populated by `factory` on first access.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> CollectionResult<ArrayMap> + 'static,
    {
        ArrayCollection {
            store: DeferredStore::new(factory),
        }
    }

    /// Creates a collection replaying `items`.
    pub fn from_items(items: ArrayMap) -> Self {
        ArrayCollection {
            store: DeferredStore::replay(items),
        }
    }

    pub(crate) fn source(&self) -> Source<ArrayMap> {
        self.store.source()
    }

    fn derive<F>(&self, transform: F) -> ArrayCollection
    where
        F: Fn(&ArrayMap) -> CollectionResult<ArrayMap> + 'static,
    {
        ArrayCollection {
            store: DeferredStore::derived(self.store.source(), transform),
        }
    }

    fn derive_with<F>(&self, others: &[&ArrayCollection], transform: F) -> ArrayCollection
    where
        F: Fn(&ArrayMap, &[&ArrayMap]) -> CollectionResult<ArrayMap> + 'static,
    {
        let source = self.store.source();
        let others: Vec<Source<ArrayMap>> = others.iter().map(|other| other.source()).collect();
        ArrayCollection::new(move || {
            let items = source()?;
            let loaded = others
                .iter()
                .map(|other| other())
                .collect::<CollectionResult<Vec<Rc<ArrayMap>>>>()?;
            let refs: Vec<&ArrayMap> = loaded.iter().map(|it| &**it).collect();
            transform(&items, &refs)
        })
    }

    /// Returns true once the factory has run.
    pub fn is_materialized(&self) -> bool {
        self.store.is_materialized()
    }

    /// Borrows the materialized contents.
    pub fn items(&self) -> CollectionResult<&ArrayMap> {
        self.store.get()
    }

    // direct access, operating on this collection

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if the key is absent.
    pub fn get(&self, key: impl Into<Key>) -> CollectionResult<&Value> {
        let key = key.into();
        self.items()?.get(&key).ok_or_else(|| key_not_found(&key))
    }

    /// Stores `value` under `key`, overwriting in place. An empty string key appends.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> CollectionResult<()> {
        let key = key.into();
        let items = self.store.get_mut()?;
        if key.is_empty() {
            arr::append(items, value.into())?;
        } else {
            items.insert(key, value.into());
        }
        Ok(())
    }

    /// Returns true if `key` is present and its value is not null.
    pub fn isset(&self, key: impl Into<Key>) -> CollectionResult<bool> {
        let key = key.into();
        Ok(self.items()?.get(&key).is_some_and(|value| !value.is_null()))
    }

    /// Returns true if `key` is present, even with a null value.
    pub fn has(&self, key: impl Into<Key>) -> CollectionResult<bool> {
        let key = key.into();
        Ok(self.items()?.contains_key(&key))
    }

    /// Removes `key`, returning its value. Order of the remaining entries is kept.
    pub fn unset(&mut self, key: impl Into<Key>) -> CollectionResult<Option<Value>> {
        let key = key.into();
        Ok(self.store.get_mut()?.shift_remove(&key))
    }

    /// Inserts a new entry.
    ///
    /// # Errors
    ///
    /// Returns `KeyAlreadyExists` if the key is present.
    pub fn add(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> CollectionResult<()> {
        let key = key.into();
        let items = self.store.get_mut()?;
        if items.contains_key(&key) {
            return Err(key_already_exists(&key));
        }
        items.insert(key, value.into());
        Ok(())
    }

    /// Overwrites an existing entry.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if the key is absent.
    pub fn replace(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> CollectionResult<()> {
        let key = key.into();
        let items = self.store.get_mut()?;
        match items.get_mut(&key) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(key_not_found(&key)),
        }
    }

    /// Appends `value` and returns the key it was given.
    pub fn push(&mut self, value: impl Into<Value>) -> CollectionResult<Key> {
        arr::append(self.store.get_mut()?, value.into())
    }

    /// Removes and returns the last value.
    pub fn pop(&mut self) -> CollectionResult<Option<Value>> {
        Ok(self.store.get_mut()?.pop().map(|(_, value)| value))
    }

    /// Removes and returns the first value. Integer keys are renumbered from 0.
    pub fn shift(&mut self) -> CollectionResult<Option<Value>> {
        let items = self.store.get_mut()?;
        let first = items.shift_remove_index(0).map(|(_, value)| value);
        *items = arr::reindex(std::mem::take(items));
        Ok(first)
    }

    /// Prepends `value`. Integer keys are renumbered from 0.
    pub fn unshift(&mut self, value: impl Into<Value>) -> CollectionResult<()> {
        let items = self.store.get_mut()?;
        let entries = std::iter::once((Key::Int(0), value.into())).chain(std::mem::take(items));
        *items = arr::reindex(entries);
        Ok(())
    }

    /// Puts `key` at the front with `value`, dropping any entry it had before.
    pub fn unshift_with_key(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> CollectionResult<()> {
        let key = key.into();
        let items = self.store.get_mut()?;
        let mut reordered = ArrayMap::with_capacity(items.len() + 1);
        reordered.insert(key.clone(), value.into());
        reordered.extend(std::mem::take(items).into_iter().filter(|(k, _)| *k != key));
        *items = reordered;
        Ok(())
    }

    /// Calls `callback` for every entry until it returns `false`.
    pub fn each<F>(&self, mut callback: F) -> CollectionResult<()>
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        for (key, value) in self.items()? {
            if !callback(key, value) {
                break;
            }
        }
        Ok(())
    }

    /// Transforms every value in place, keys untouched.
    pub fn walk<F>(&mut self, mut callback: F) -> CollectionResult<()>
    where
        F: FnMut(&Key, &mut Value),
    {
        for (key, value) in self.store.get_mut()?.iter_mut() {
            callback(key, value);
        }
        Ok(())
    }

    /// Removes a portion of this collection, puts `replacement` in its place and
    /// returns the removed entries as a new collection.
    ///
    /// Negative offsets count from the end; `length = None` removes everything after
    /// the offset. Integer keys are renumbered.
    pub fn splice(
        &mut self,
        offset: i64,
        length: Option<i64>,
        replacement: Vec<Value>,
    ) -> CollectionResult<ArrayCollection> {
        let items = self.store.get_mut()?;
        let removed = arr::splice(items, offset, length, &arr::list(replacement));
        Ok(ArrayCollection::from_items(removed))
    }

    /// Passes the entries to `callback` in batches of `size`, keys preserved.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `size` is 0.
    pub fn chunk<F>(&self, size: usize, mut callback: F) -> CollectionResult<()>
    where
        F: FnMut(ArrayCollection),
    {
        if size == 0 {
            return Err(invalid_argument("Chunk size has to be greater than zero"));
        }
        let items = self.items()?;
        let mut batch = ArrayMap::with_capacity(size);
        for (key, value) in items {
            batch.insert(key.clone(), value.clone());
            if batch.len() == size {
                callback(ArrayCollection::from_items(std::mem::take(&mut batch)));
            }
        }
        if !batch.is_empty() {
            callback(ArrayCollection::from_items(batch));
        }
        Ok(())
    }

    // queries

    /// Returns the first key whose value strictly equals `value`. With `column`, the
    /// value of that column of every record is compared instead.
    pub fn search(
        &self,
        value: impl Into<Value>,
        column: Option<Key>,
    ) -> CollectionResult<Option<Key>> {
        Ok(arr::search(self.items()?, &value.into(), column.as_ref()))
    }

    /// Returns every key whose value strictly equals `value`.
    pub fn search_all(&self, value: impl Into<Value>) -> CollectionResult<Vec<Key>> {
        Ok(arr::search_all(self.items()?, &value.into()))
    }

    /// Returns true if a value strictly equals `value`.
    pub fn contains(&self, value: impl Into<Value>) -> CollectionResult<bool> {
        let value = value.into();
        Ok(self.items()?.values().any(|it| *it == value))
    }

    /// Returns true if an entry matches `predicate`.
    pub fn contains_by<F>(&self, predicate: F) -> CollectionResult<bool>
    where
        F: Fn(&Key, &Value) -> bool,
    {
        Ok(self.items()?.iter().any(|(key, value)| predicate(key, value)))
    }

    /// Returns true if every entry matches `predicate`.
    pub fn every<F>(&self, predicate: F) -> CollectionResult<bool>
    where
        F: Fn(&Key, &Value) -> bool,
    {
        Ok(self.items()?.iter().all(|(key, value)| predicate(key, value)))
    }

    pub fn first(&self) -> CollectionResult<Option<&Value>> {
        Ok(self.items()?.first().map(|(_, value)| value))
    }

    pub fn last(&self) -> CollectionResult<Option<&Value>> {
        Ok(self.items()?.last().map(|(_, value)| value))
    }

    /// Returns true if the keys are not exactly `0..n`.
    pub fn is_associative(&self) -> CollectionResult<bool> {
        Ok(arr::is_associative(self.items()?))
    }

    /// Returns true if at least one value is an array.
    pub fn is_multi_dimensional(&self) -> CollectionResult<bool> {
        Ok(arr::is_multi_dimensional(self.items()?))
    }

    // new collections

    /// Transforms every entry into a value; the result is a list.
    pub fn map<F>(&self, callback: F) -> ArrayCollection
    where
        F: Fn(&Key, &Value) -> Value + 'static,
    {
        self.derive(move |items| {
            Ok(arr::list(
                items.iter().map(|(key, value)| callback(key, value)),
            ))
        })
    }

    /// String keys of later collections overwrite, integer keys are appended.
    pub fn merge(&self, others: &[&ArrayCollection]) -> ArrayCollection {
        self.derive_with(others, |items, others| {
            let mut all = vec![items];
            all.extend_from_slice(others);
            Ok(arr::merge(&all))
        })
    }

    /// Keys already present are kept, other keys added.
    pub fn union(&self, others: &[&ArrayCollection]) -> ArrayCollection {
        self.derive_with(others, |items, others| {
            let mut all = vec![items];
            all.extend_from_slice(others);
            Ok(arr::union(&all))
        })
    }

    /// Like [ArrayCollection::merge], values of shared string keys are merged into lists.
    pub fn merge_recursive(&self, others: &[&ArrayCollection]) -> ArrayCollection {
        self.derive_with(others, |items, others| {
            let mut all = vec![items];
            all.extend_from_slice(others);
            Ok(arr::merge_recursive(&all))
        })
    }

    /// Uses the values of this collection as keys for the values of `values`.
    ///
    /// Fails on first access with `SizeMismatch` if the lengths differ, or
    /// `InvalidKeyType` if a value of this collection is neither an integer nor a string.
    pub fn combine(&self, values: &ArrayCollection) -> ArrayCollection {
        self.derive_with(&[values], |keys, others| arr::combine(keys, others[0]))
    }

    /// Entries whose value is found in none of `others`.
    pub fn difference(&self, others: &[&ArrayCollection]) -> ArrayCollection {
        self.derive_with(others, |items, others| Ok(arr::difference(items, others)))
    }

    /// Entries whose key is found in none of `others`.
    pub fn difference_keys(&self, others: &[&ArrayCollection]) -> ArrayCollection {
        self.derive_with(others, |items, others| Ok(arr::difference_key(items, others)))
    }

    /// Entries whose key and value pair is found in none of `others`.
    pub fn difference_assoc(&self, others: &[&ArrayCollection]) -> ArrayCollection {
        self.derive_with(others, |items, others| Ok(arr::difference_assoc(items, others)))
    }

    pub fn intersect(&self, others: &[&ArrayCollection]) -> ArrayCollection {
        self.derive_with(others, |items, others| Ok(arr::intersect(items, others)))
    }

    pub fn intersect_key(&self, others: &[&ArrayCollection]) -> ArrayCollection {
        self.derive_with(others, |items, others| Ok(arr::intersect_key(items, others)))
    }

    pub fn intersect_assoc(&self, others: &[&ArrayCollection]) -> ArrayCollection {
        self.derive_with(others, |items, others| Ok(arr::intersect_assoc(items, others)))
    }

    /// Removes repeated values; the first occurrence wins.
    pub fn unique(&self) -> ArrayCollection {
        self.derive(|items| Ok(arr::unique(items)))
    }

    /// The entries [ArrayCollection::unique] removes.
    pub fn duplicates(&self) -> ArrayCollection {
        self.derive(|items| Ok(arr::duplicates(items)))
    }

    /// Exchanges keys and values. Fails on first access with `InvalidKeyType` if a
    /// value is neither an integer nor a string.
    pub fn flip(&self) -> ArrayCollection {
        self.derive(arr::flip)
    }

    /// Pads to `size` entries with `value`, on the left for a negative size.
    pub fn pad(&self, size: i64, value: impl Into<Value>) -> ArrayCollection {
        let value = value.into();
        self.derive(move |items| arr::pad(items, size, &value))
    }

    /// Splits the collection into the entries matching `predicate` and the rest.
    pub fn partition<F>(&self, predicate: F) -> (ArrayCollection, ArrayCollection)
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        let predicate: Predicate = Rc::new(predicate);
        let rejected = Rc::clone(&predicate);
        (
            self.filter(move |key, value| predicate(key, value)),
            self.reject(move |key, value| rejected(key, value)),
        )
    }

    /// Projects `column` out of every record, keyed by the `index` column when given.
    pub fn pluck(&self, column: impl Into<Key>, index: Option<Key>) -> ArrayCollection {
        let column = column.into();
        self.derive(move |items| Ok(arr::column(items, Some(&column), index.as_ref())))
    }

    /// Picks `number` random entries. Fails on first access with `CapacityExceeded` if
    /// fewer entries exist.
    pub fn random(&self, number: usize, preserve_keys: bool) -> ArrayCollection {
        self.derive(move |items| arr::random(items, number, preserve_keys))
    }

    pub fn reverse(&self, preserve_keys: bool) -> ArrayCollection {
        self.derive(move |items| Ok(arr::reverse(items, preserve_keys)))
    }

    pub fn shuffle(&self, preserve_keys: bool) -> ArrayCollection {
        self.derive(move |items| Ok(arr::shuffle(items, preserve_keys)))
    }

    /// Extracts a window of entries, keys preserved.
    pub fn slice(&self, offset: i64, length: Option<i64>) -> ArrayCollection {
        self.derive(move |items| Ok(arr::slice(items, offset, length, true)))
    }

    /// Drops the first `count` entries, keys preserved.
    pub fn skip(&self, count: usize) -> ArrayCollection {
        self.derive(move |items| {
            Ok(items
                .iter()
                .skip(count)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect())
        })
    }

    /// Drops entries until `predicate` holds for the first time.
    pub fn skip_until<F>(&self, predicate: F) -> ArrayCollection
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        self.skip_while(move |key, value| !predicate(key, value))
    }

    /// Drops entries while `predicate` holds.
    pub fn skip_while<F>(&self, predicate: F) -> ArrayCollection
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        self.derive(move |items| {
            Ok(items
                .iter()
                .skip_while(|(key, value)| predicate(key, value))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect())
        })
    }

    /// Keeps the first `limit` entries, or the last `-limit` ones for a negative limit.
    pub fn take(&self, limit: i64) -> ArrayCollection {
        if limit < 0 {
            self.slice(limit, None)
        } else {
            self.slice(0, Some(limit))
        }
    }

    /// Keeps entries until `predicate` holds for the first time.
    pub fn take_until<F>(&self, predicate: F) -> ArrayCollection
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        self.take_while(move |key, value| !predicate(key, value))
    }

    /// Keeps entries while `predicate` holds.
    pub fn take_while<F>(&self, predicate: F) -> ArrayCollection
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        self.derive(move |items| {
            Ok(items
                .iter()
                .take_while(|(key, value)| predicate(key, value))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect())
        })
    }

    /// The values under sequential integer keys.
    pub fn values(&self) -> ArrayCollection {
        self.derive(|items| Ok(arr::values(items)))
    }

    /// The keys as a list, optionally only those whose value strictly equals `filter`.
    pub fn keys(&self, filter: Option<Value>) -> ArrayCollection {
        self.derive(move |items| {
            Ok(arr::list(
                arr::keys(items, filter.as_ref()).into_iter().map(Value::from),
            ))
        })
    }

    /// Merges the nested arrays into one collection. Fails on first access with
    /// `InvalidArgument` if no value is an array.
    pub fn collapse(&self) -> ArrayCollection {
        self.derive(arr::collapse)
    }

    /// Counts the occurrences of every value (or of the values of `column` on 2-D data).
    pub fn count_values(&self, column: Option<Key>) -> ArrayCollection {
        self.derive(move |items| arr::count_values(items, column.as_ref()))
    }

    // sorting

    /// Sorts by value. `flag = None` uses the configured default flag.
    pub fn sort(
        &self,
        order: SortOrder,
        preserve_keys: bool,
        flag: Option<SortFlag>,
    ) -> ArrayCollection {
        let flag = flag.unwrap_or_else(|| crate::config().sort_flag());
        self.derive(move |items| primitives::sort(items, order, preserve_keys, flag))
    }

    /// Sorts by key, integer keys before string keys.
    pub fn sort_keys(&self, order: SortOrder) -> ArrayCollection {
        self.derive(move |items| Ok(primitives::sort_by_key(items, order)))
    }

    /// Sorts by value with a custom comparator.
    pub fn sort_by<F>(&self, compare: F, preserve_keys: bool) -> ArrayCollection
    where
        F: Fn(&Value, &Value) -> Ordering + 'static,
    {
        self.derive(move |items| Ok(primitives::sort_by(items, &compare, preserve_keys)))
    }

    /// Sorts by key with a custom comparator.
    pub fn sort_keys_by<F>(&self, compare: F) -> ArrayCollection
    where
        F: Fn(&Key, &Key) -> Ordering + 'static,
    {
        self.derive(move |items| Ok(primitives::sort_key_by(items, &compare)))
    }

    /// Sorts a list of records by several columns.
    ///
    /// Fails on first access with `InvalidArgument` (no fields, or not a list of
    /// records), `KeyNotFound` (column missing from the first record) or
    /// `SizeMismatch` (column missing from a later record).
    pub fn sort_by_many<I, K>(&self, fields: I) -> ArrayCollection
    where
        I: IntoIterator<Item = (K, SortOrder)>,
        K: Into<Key>,
    {
        let fields: Vec<(Key, SortOrder)> = fields
            .into_iter()
            .map(|(column, order)| (column.into(), order))
            .collect();
        self.derive(move |items| primitives::sort_by_many(items, &fields))
    }

    // filters over 2-D data

    /// Records whose `column` satisfies `operator` against `value`.
    pub fn where_(
        &self,
        column: impl Into<Key>,
        operator: Comparison,
        value: impl Into<Value>,
    ) -> ArrayCollection {
        self.filter(column_matches(column.into(), operator, value.into()))
    }

    /// Records not kept by [ArrayCollection::where_].
    pub fn where_not(
        &self,
        column: impl Into<Key>,
        operator: Comparison,
        value: impl Into<Value>,
    ) -> ArrayCollection {
        self.reject(column_matches(column.into(), operator, value.into()))
    }

    /// Records whose `column` lies between `min` and `max`, both inclusive.
    pub fn where_between(
        &self,
        column: impl Into<Key>,
        min: impl Into<Value>,
        max: impl Into<Value>,
    ) -> ArrayCollection {
        self.filter(column_between(column.into(), min.into(), max.into()))
    }

    /// Records not kept by [ArrayCollection::where_between].
    pub fn where_not_between(
        &self,
        column: impl Into<Key>,
        min: impl Into<Value>,
        max: impl Into<Value>,
    ) -> ArrayCollection {
        self.reject(column_between(column.into(), min.into(), max.into()))
    }

    /// Records whose `column` equals one of `values`.
    pub fn where_contains(&self, column: impl Into<Key>, values: Vec<Value>) -> ArrayCollection {
        self.filter(column_in(column.into(), values))
    }

    /// Records not kept by [ArrayCollection::where_contains].
    pub fn where_doesnt_contain(
        &self,
        column: impl Into<Key>,
        values: Vec<Value>,
    ) -> ArrayCollection {
        self.reject(column_in(column.into(), values))
    }
}

fn column_matches(
    column: Key,
    operator: Comparison,
    expected: Value,
) -> impl Fn(&Key, &Value) -> bool {
    move |_, record| {
        record
            .column(&column)
            .is_some_and(|actual| operator.compare(actual, &expected))
    }
}

fn column_between(column: Key, min: Value, max: Value) -> impl Fn(&Key, &Value) -> bool {
    move |_, record| {
        record.column(&column).is_some_and(|actual| {
            Comparison::GreaterOrEqual.compare(actual, &min)
                && Comparison::LessOrEqual.compare(actual, &max)
        })
    }
}

fn column_in(column: Key, values: Vec<Value>) -> impl Fn(&Key, &Value) -> bool {
    move |_, record| {
        record
            .column(&column)
            .is_some_and(|actual| {
                values
                    .iter()
                    .any(|value| Comparison::Equal.compare(actual, value))
            })
    }
}

impl Collectable for ArrayCollection {
    type Key = Key;
    type Items = ArrayMap;

    fn all(&self) -> CollectionResult<ArrayMap> {
        Ok(self.items()?.clone())
    }

    fn count(&self) -> CollectionResult<usize> {
        Ok(self.items()?.len())
    }

    fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        self.derive(move |items| Ok(arr::filter(items, &predicate)))
    }

    fn reject<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        self.derive(move |items| Ok(arr::filter(items, |key, value| !predicate(key, value))))
    }

    fn only(&self, keys: &[Key]) -> Self {
        let keys = keys.to_vec();
        self.derive(move |items| Ok(arr::only(items, &keys)))
    }

    fn except(&self, keys: &[Key]) -> Self {
        let keys = keys.to_vec();
        self.derive(move |items| Ok(arr::except(items, &keys)))
    }
}

impl From<ArrayMap> for ArrayCollection {
    fn from(items: ArrayMap) -> Self {
        ArrayCollection::from_items(items)
    }
}

impl FromIterator<(Key, Value)> for ArrayCollection {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        ArrayCollection::from_items(iter.into_iter().collect())
    }
}

impl Debug for ArrayCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayCollection")
            .field("items", &self.store)
            .finish()
    }
}

impl serde::Serialize for ArrayCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let items = self.items().map_err(serde::ser::Error::custom)?;
        serialize_array_map(items, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for ArrayCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(ArrayCollection::from_items(deserialize_array_map(deserializer)?))
    }
}

impl Serializable for ArrayCollection {}
