use std::rc::Rc;

use crate::collection::{
    ArrayCollection, Fill, FillAssoc, FillKeys, FixedArray, IndexCollection, LazyCollection,
    ObjectCollection, ObjectStorage, Range,
};
use crate::common::{ArrayMap, Key, Value};
use crate::errors::CollectionResult;
use crate::primitives::{RangeBound, ValueRange};

/// Entry point for building collections.
///
/// # Examples
///
/// ```rust
/// use collectable::collection::{Collectable, Collection};
/// use collectable::{arr, key, val};
///
/// let numbers = Collection::range(1, 5, 1).unwrap().as_basic();
/// assert_eq!(numbers.all().unwrap(), arr![1, 2, 3, 4, 5]);
///
/// let flags = Collection::fill_keys(["debug", "verbose"], false).as_basic();
/// assert_eq!(flags.get("verbose").unwrap(), &val!(false));
///
/// let zeros = Collection::fill(0, 3).start_index(10).as_lazy();
/// assert_eq!(zeros.keys(None).to_array().unwrap(), arr![10, 11, 12]);
/// ```
pub struct Collection;

impl Collection {
    /// Dynamic map collection populated by `factory` on first access.
    pub fn create<F>(factory: F) -> ArrayCollection
    where
        F: Fn() -> CollectionResult<ArrayMap> + 'static,
    {
        ArrayCollection::new(factory)
    }

    /// Fixed index collection of `capacity` slots, filled by `factory` on first access.
    pub fn index<F>(factory: F, capacity: usize) -> IndexCollection
    where
        F: Fn(&mut FixedArray) -> CollectionResult<()> + 'static,
    {
        IndexCollection::new(factory, capacity)
    }

    /// Lazy sequence collection pulling its entries from the iterator `factory` returns.
    pub fn lazy<F, I>(factory: F) -> LazyCollection
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = (Key, Value)>,
        I::IntoIter: 'static,
    {
        LazyCollection::new(factory)
    }

    /// Object-keyed collection populated by `factory` on first access.
    pub fn object<O, F>(factory: F) -> ObjectCollection<O>
    where
        O: 'static,
        F: Fn() -> CollectionResult<ObjectStorage<O>> + 'static,
    {
        ObjectCollection::new(factory)
    }

    /// Object-keyed collection attaching every object with the value `value_fn` gives it.
    pub fn object_from<O, F>(objects: Vec<Rc<O>>, value_fn: F) -> ObjectCollection<O>
    where
        O: 'static,
        F: Fn(&O) -> Value + 'static,
    {
        ObjectCollection::new(move || {
            Ok(objects
                .iter()
                .map(|object| (Rc::clone(object), value_fn(object)))
                .collect())
        })
    }

    /// `length` copies of `value`.
    pub fn fill(value: impl Into<Value>, length: usize) -> Fill {
        Fill::new(value.into(), length)
    }

    /// `value` under each of `keys`.
    pub fn fill_keys<I, K>(keys: I, value: impl Into<Value>) -> FillKeys
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        FillKeys::new(keys.into_iter().map(Into::into).collect(), value.into())
    }

    /// `values` keyed by the corresponding entries of `keys`.
    pub fn fill_assoc<K, V>(keys: Vec<K>, values: Vec<V>) -> FillAssoc
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        FillAssoc::new(
            keys.into_iter().map(Into::into).collect(),
            values.into_iter().map(Into::into).collect(),
        )
    }

    /// Elements from `start` to `end` inclusive, `step` apart.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if `start > end`, if `step` is greater than `end`, if
    /// `step <= 0`, or if characters and numbers are mixed.
    pub fn range(
        start: impl Into<RangeBound>,
        end: impl Into<RangeBound>,
        step: impl Into<RangeBound>,
    ) -> CollectionResult<Range> {
        Ok(Range::new(ValueRange::new(start, end, step)?))
    }
}
