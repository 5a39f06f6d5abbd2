use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

use serde::{Deserializer, Serializer};

use crate::collection::deferred::DeferredStore;
use crate::collection::{ArrayCollection, Collectable};
use crate::common::{Serializable, SortFlag, SortOrder, Value};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};
use crate::primitives::arr;

/// Fixed-size array of value slots, indexed `0..size`.
///
/// Every slot starts out as [Value::Null]. Growing pads with nulls, shrinking drops
/// the slots past the new size.
#[derive(Clone, Default, PartialEq)]
pub struct FixedArray {
    slots: Vec<Value>,
}

impl FixedArray {
    pub fn new(size: usize) -> Self {
        FixedArray {
            slots: vec![Value::Null; size],
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn set_size(&mut self, size: usize) {
        self.slots.resize(size, Value::Null);
    }

    /// # Errors
    ///
    /// Returns `KeyNotFound` if `index` is past the end.
    pub fn get(&self, index: usize) -> CollectionResult<&Value> {
        self.slots.get(index).ok_or_else(|| out_of_range(index, self.size()))
    }

    /// # Errors
    ///
    /// Returns `KeyNotFound` if `index` is past the end.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> CollectionResult<()> {
        let size = self.size();
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(out_of_range(index, size)),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.slots.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.slots
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.slots
    }
}

impl From<Vec<Value>> for FixedArray {
    fn from(slots: Vec<Value>) -> Self {
        FixedArray { slots }
    }
}

impl Debug for FixedArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.slots.iter()).finish()
    }
}

fn out_of_range(index: usize, size: usize) -> CollectionError {
    log::error!("Index {} is out of range for a fixed array of size {}", index, size);
    CollectionError::new(
        &format!("Key {} does not exist", index),
        ErrorKind::KeyNotFound,
    )
}

/// Target of a transform: sized to the source length up front, shrunk to the number
/// of values actually written.
struct Filler {
    array: FixedArray,
    len: usize,
}

impl Filler {
    fn with_capacity(capacity: usize) -> Self {
        Filler {
            array: FixedArray::new(capacity),
            len: 0,
        }
    }

    fn put(&mut self, value: Value) -> CollectionResult<()> {
        if self.len >= self.array.size() {
            log::error!("Fixed array of size {} is full", self.array.size());
            return Err(CollectionError::new(
                "Cannot add more values than the collection capacity",
                ErrorKind::CapacityExceeded,
            ));
        }
        self.array.set(self.len, value)?;
        self.len += 1;
        Ok(())
    }

    fn extend<I: IntoIterator<Item = Value>>(&mut self, values: I) -> CollectionResult<()> {
        for value in values {
            self.put(value)?;
        }
        Ok(())
    }

    fn finish(mut self) -> FixedArray {
        self.array.set_size(self.len);
        self.array
    }
}

/// Fixed index collection: values in integer slots `0..size` with an explicit capacity.
///
/// The factory receives a [FixedArray] pre-sized to the declared capacity, every slot
/// null, and fills it in place.
///
/// # Examples
///
/// ```rust
/// use collectable::collection::{Collectable, IndexCollection};
/// use collectable::val;
///
/// let mut slots = IndexCollection::new(
///     |array| {
///         array.set(0, "first")?;
///         array.set(1, "second")
///     },
///     3,
/// );
/// assert_eq!(slots.get(1).unwrap(), &val!("second"));
/// assert!(!slots.isset(2).unwrap());
///
/// slots.set_size(5).unwrap();
/// assert_eq!(slots.count().unwrap(), 5);
/// ```
#[derive(Clone)]
pub struct IndexCollection {
    store: DeferredStore<FixedArray>,
}

impl IndexCollection {
    pub fn new<F>(factory: F, capacity: usize) -> Self
    where
        F: Fn(&mut FixedArray) -> CollectionResult<()> + 'static,
    {
        IndexCollection {
            store: DeferredStore::new(move || {
                let mut array = FixedArray::new(capacity);
                factory(&mut array)?;
                Ok(array)
            }),
        }
    }

    /// Creates a collection replaying `values`; the capacity is their number.
    pub fn from_values(values: Vec<Value>) -> Self {
        IndexCollection {
            store: DeferredStore::replay(FixedArray::from(values)),
        }
    }

    fn derive<F>(&self, transform: F) -> IndexCollection
    where
        F: Fn(&FixedArray) -> CollectionResult<FixedArray> + 'static,
    {
        IndexCollection {
            store: DeferredStore::derived(self.store.source(), transform),
        }
    }

    /// Derives a collection whose values `produce` writes straight into a target
    /// sized to the source.
    fn derive_values<F>(&self, produce: F) -> IndexCollection
    where
        F: Fn(&FixedArray, &mut Filler) -> CollectionResult<()> + 'static,
    {
        self.derive(move |array| {
            let mut target = Filler::with_capacity(array.size());
            produce(array, &mut target)?;
            Ok(target.finish())
        })
    }

    pub fn is_materialized(&self) -> bool {
        self.store.is_materialized()
    }

    pub fn items(&self) -> CollectionResult<&FixedArray> {
        self.store.get()
    }

    pub fn get(&self, index: usize) -> CollectionResult<&Value> {
        self.items()?.get(index)
    }

    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> CollectionResult<()> {
        self.store.get_mut()?.set(index, value)
    }

    /// Returns true if `index` is in range and its slot is not null.
    pub fn isset(&self, index: usize) -> CollectionResult<bool> {
        Ok(self.items()?.get(index).is_ok_and(|value| !value.is_null()))
    }

    /// Puts the slot back to null.
    pub fn unset(&mut self, index: usize) -> CollectionResult<()> {
        self.store.get_mut()?.set(index, Value::Null)
    }

    pub fn size(&self) -> CollectionResult<usize> {
        Ok(self.items()?.size())
    }

    /// Resizes the collection, truncating or padding with nulls.
    pub fn set_size(&mut self, size: usize) -> CollectionResult<()> {
        self.store.get_mut()?.set_size(size);
        Ok(())
    }

    /// Grows the collection by one slot holding `value`; returns its index.
    pub fn push(&mut self, value: impl Into<Value>) -> CollectionResult<usize> {
        let array = self.store.get_mut()?;
        let index = array.size();
        array.slots.push(value.into());
        Ok(index)
    }

    /// Removes the last slot and returns its value.
    pub fn pop(&mut self) -> CollectionResult<Option<Value>> {
        Ok(self.store.get_mut()?.slots.pop())
    }

    /// Calls `callback` for every slot until it returns `false`.
    pub fn each<F>(&self, mut callback: F) -> CollectionResult<()>
    where
        F: FnMut(usize, &Value) -> bool,
    {
        for (index, value) in self.items()?.iter().enumerate() {
            if !callback(index, value) {
                break;
            }
        }
        Ok(())
    }

    pub fn walk<F>(&mut self, mut callback: F) -> CollectionResult<()>
    where
        F: FnMut(usize, &mut Value),
    {
        for (index, value) in self.store.get_mut()?.slots.iter_mut().enumerate() {
            callback(index, value);
        }
        Ok(())
    }

    pub fn contains(&self, value: impl Into<Value>) -> CollectionResult<bool> {
        let value = value.into();
        Ok(self.items()?.iter().any(|it| *it == value))
    }

    pub fn every<F>(&self, predicate: F) -> CollectionResult<bool>
    where
        F: Fn(usize, &Value) -> bool,
    {
        Ok(self
            .items()?
            .iter()
            .enumerate()
            .all(|(index, value)| predicate(index, value)))
    }

    /// Returns the index of the first slot strictly equal to `value`.
    pub fn search(&self, value: impl Into<Value>) -> CollectionResult<Option<usize>> {
        let value = value.into();
        Ok(self.items()?.iter().position(|it| *it == value))
    }

    pub fn first(&self) -> CollectionResult<Option<&Value>> {
        Ok(self.items()?.as_slice().first())
    }

    pub fn last(&self) -> CollectionResult<Option<&Value>> {
        Ok(self.items()?.as_slice().last())
    }

    pub fn map<F>(&self, callback: F) -> IndexCollection
    where
        F: Fn(usize, &Value) -> Value + 'static,
    {
        self.derive_values(move |array, target| {
            target.extend(
                array
                    .iter()
                    .enumerate()
                    .map(|(index, value)| callback(index, value)),
            )
        })
    }

    pub fn reverse(&self) -> IndexCollection {
        self.derive_values(|array, target| target.extend(array.iter().rev().cloned()))
    }

    pub fn skip(&self, count: usize) -> IndexCollection {
        self.derive_values(move |array, target| target.extend(array.iter().skip(count).cloned()))
    }

    pub fn skip_until<F>(&self, predicate: F) -> IndexCollection
    where
        F: Fn(usize, &Value) -> bool + 'static,
    {
        self.skip_while(move |index, value| !predicate(index, value))
    }

    pub fn skip_while<F>(&self, predicate: F) -> IndexCollection
    where
        F: Fn(usize, &Value) -> bool + 'static,
    {
        self.derive_values(move |array, target| {
            target.extend(
                array
                    .iter()
                    .enumerate()
                    .skip_while(|(index, value)| predicate(*index, value))
                    .map(|(_, value)| value.clone()),
            )
        })
    }

    /// Keeps the first `limit` slots, or the last `-limit` for a negative limit.
    pub fn take(&self, limit: i64) -> IndexCollection {
        if limit < 0 {
            self.slice(limit, None)
        } else {
            self.slice(0, Some(limit))
        }
    }

    pub fn take_until<F>(&self, predicate: F) -> IndexCollection
    where
        F: Fn(usize, &Value) -> bool + 'static,
    {
        self.take_while(move |index, value| !predicate(index, value))
    }

    pub fn take_while<F>(&self, predicate: F) -> IndexCollection
    where
        F: Fn(usize, &Value) -> bool + 'static,
    {
        self.derive_values(move |array, target| {
            target.extend(
                array
                    .iter()
                    .enumerate()
                    .take_while(|(index, value)| predicate(*index, value))
                    .map(|(_, value)| value.clone()),
            )
        })
    }

    /// Extracts a window of slots. Negative offsets and lengths count from the end.
    pub fn slice(&self, offset: i64, length: Option<i64>) -> IndexCollection {
        self.derive_values(move |array, target| {
            let (start, end) = arr::window(array.size(), offset, length);
            target.extend(array.as_slice()[start..end].iter().cloned())
        })
    }

    /// Sorts the slots by value. `flag = None` uses the configured default flag.
    pub fn sort(&self, order: SortOrder, flag: Option<SortFlag>) -> IndexCollection {
        let flag = flag.unwrap_or_else(|| crate::config().sort_flag());
        self.derive_values(move |array, target| {
            let compare = flag.comparator()?;
            let mut values = array.as_slice().to_vec();
            values.sort_by(|a, b| order.apply(compare(a, b)));
            target.extend(values)
        })
    }

    pub fn sort_by<F>(&self, compare: F) -> IndexCollection
    where
        F: Fn(&Value, &Value) -> Ordering + 'static,
    {
        self.derive_values(move |array, target| {
            let mut values = array.as_slice().to_vec();
            values.sort_by(|a, b| compare(a, b));
            target.extend(values)
        })
    }

    /// Drops the null slots, compacting the rest.
    pub fn values(&self) -> IndexCollection {
        self.derive_values(|array, target| {
            target.extend(array.iter().filter(|value| !value.is_null()).cloned())
        })
    }

    /// Copies the slots into a dynamic map keyed by index.
    pub fn to_array_collection(&self) -> ArrayCollection {
        let source = self.store.source();
        ArrayCollection::new(move || Ok(arr::list(source()?.iter().cloned())))
    }
}

impl Collectable for IndexCollection {
    type Key = usize;
    type Items = Vec<Value>;

    fn all(&self) -> CollectionResult<Vec<Value>> {
        Ok(self.items()?.as_slice().to_vec())
    }

    fn count(&self) -> CollectionResult<usize> {
        self.size()
    }

    fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&usize, &Value) -> bool + 'static,
    {
        self.derive_values(move |array, target| {
            target.extend(
                array
                    .iter()
                    .enumerate()
                    .filter(|(index, value)| predicate(index, value))
                    .map(|(_, value)| value.clone()),
            )
        })
    }

    fn reject<F>(&self, predicate: F) -> Self
    where
        F: Fn(&usize, &Value) -> bool + 'static,
    {
        self.filter(move |index, value| !predicate(index, value))
    }

    fn only(&self, keys: &[usize]) -> Self {
        let keys = keys.to_vec();
        self.filter(move |index, _| keys.contains(index))
    }

    fn except(&self, keys: &[usize]) -> Self {
        let keys = keys.to_vec();
        self.filter(move |index, _| !keys.contains(index))
    }
}

impl Debug for IndexCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexCollection")
            .field("items", &self.store)
            .finish()
    }
}

impl serde::Serialize for IndexCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let array = self.items().map_err(serde::ser::Error::custom)?;
        serde::Serialize::serialize(array.as_slice(), serializer)
    }
}

impl<'de> serde::Deserialize<'de> for IndexCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values: Vec<Value> = serde::Deserialize::deserialize(deserializer)?;
        Ok(IndexCollection::from_values(values))
    }
}

impl Serializable for IndexCollection {}
