use std::cell::{RefCell, RefMut};
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::iter::Peekable;
use std::rc::Rc;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserializer, Serializer};

use crate::collection::deferred::DeferredStore;
use crate::collection::sequence::{
    EntryMapper, EntryPredicate, FilteredSequence, IndexedSequence, MappedSequence, Projection,
    Sequence, UniqueSequence,
};
use crate::collection::Collectable;
use crate::common::{ArrayMap, Key, Serializable, Value};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};
use crate::primitives::iter;

type Generator = Rc<dyn Fn() -> Sequence>;
type Cursor = Peekable<Sequence>;

/// Lazy sequence collection: key/value pairs pulled one at a time from a generator.
///
/// Transformations compose new generators and never pull anything, so they are safe on
/// infinite sequences. Forcing operations ([Collectable::all], [Collectable::count],
/// [LazyCollection::each], ...) consume the single cursor of the instance: once it has
/// been advanced, earlier positions are gone, and after exhaustion every forcing
/// operation observes an empty sequence. [LazyCollection::iter] hands out a fresh
/// cursor from the generator.
///
/// # Examples
///
/// ```rust
/// use collectable::collection::{Collectable, LazyCollection};
/// use collectable::val;
///
/// let naturals = LazyCollection::from_values(|| (1..).map(|n: i64| val!(n)));
/// let squares = naturals.map(|_, n| val!(n.as_int().unwrap_or_default().pow(2))).take(4);
///
/// assert_eq!(squares.values().to_array().unwrap().len(), 4);
/// assert_eq!(squares.count().unwrap(), 4);
/// assert_eq!(squares.count().unwrap(), 0);
/// ```
pub struct LazyCollection {
    generator: Generator,
    cursor: DeferredStore<RefCell<Cursor>>,
}

impl LazyCollection {
    /// Creates a collection whose cursor is produced by `factory` on first access.
    pub fn new<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = (Key, Value)>,
        I::IntoIter: 'static,
    {
        LazyCollection::from_generator(Rc::new(move || Box::new(factory().into_iter()) as Sequence))
    }

    /// Creates a collection over values, keyed `0, 1, 2, ...`.
    pub fn from_values<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        LazyCollection::new(move || {
            factory()
                .into_iter()
                .enumerate()
                .map(|(index, value)| (Key::from(index), value))
        })
    }

    /// Creates a collection replaying `entries`, duplicates included.
    pub fn from_entries(entries: Vec<(Key, Value)>) -> Self {
        let entries = Rc::new(entries);
        LazyCollection::new(move || (*entries).clone())
    }

    fn from_generator(generator: Generator) -> Self {
        let source = Rc::clone(&generator);
        LazyCollection {
            generator,
            cursor: DeferredStore::new(move || Ok(RefCell::new(source().peekable()))),
        }
    }

    fn derive<F>(&self, adapt: F) -> LazyCollection
    where
        F: Fn(Sequence) -> Sequence + 'static,
    {
        let source = Rc::clone(&self.generator);
        LazyCollection::from_generator(Rc::new(move || adapt(source())))
    }

    fn cursor(&self) -> CollectionResult<RefMut<'_, Cursor>> {
        self.cursor.get()?.try_borrow_mut().map_err(|_| {
            log::error!("Lazy collection cursor is already being consumed");
            CollectionError::new(
                "Lazy collection cursor is already being consumed",
                ErrorKind::InvalidAttribute,
            )
        })
    }

    /// Returns true once the cursor has been created.
    pub fn is_materialized(&self) -> bool {
        self.cursor.is_materialized()
    }

    /// Returns a fresh cursor from the generator, independent of this instance's cursor.
    pub fn iter(&self) -> Sequence {
        (self.generator)()
    }

    // transformations

    pub fn skip(&self, count: usize) -> LazyCollection {
        self.derive(move |sequence| Box::new(sequence.skip(count)))
    }

    pub fn skip_until<F>(&self, predicate: F) -> LazyCollection
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        self.skip_while(move |key, value| !predicate(key, value))
    }

    pub fn skip_while<F>(&self, predicate: F) -> LazyCollection
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        let predicate: EntryPredicate = Rc::new(predicate);
        self.derive(move |sequence| {
            let predicate = Rc::clone(&predicate);
            Box::new(sequence.skip_while(move |(key, value)| predicate(key, value)))
        })
    }

    pub fn take(&self, limit: usize) -> LazyCollection {
        self.derive(move |sequence| Box::new(sequence.take(limit)))
    }

    pub fn take_until<F>(&self, predicate: F) -> LazyCollection
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        self.take_while(move |key, value| !predicate(key, value))
    }

    pub fn take_while<F>(&self, predicate: F) -> LazyCollection
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        let predicate: EntryPredicate = Rc::new(predicate);
        self.derive(move |sequence| {
            let predicate = Rc::clone(&predicate);
            Box::new(sequence.take_while(move |(key, value)| predicate(key, value)))
        })
    }

    /// The keys under sequential integer keys, optionally only those whose value
    /// strictly equals `filter`.
    pub fn keys(&self, filter: Option<Value>) -> LazyCollection {
        self.derive(move |sequence| {
            Box::new(IndexedSequence::new(sequence, Projection::Keys(filter.clone())))
        })
    }

    /// The values under sequential integer keys.
    pub fn values(&self) -> LazyCollection {
        self.derive(|sequence| Box::new(IndexedSequence::new(sequence, Projection::Values)))
    }

    /// Replaces every value with the callback's result, keys untouched.
    pub fn map<F>(&self, callback: F) -> LazyCollection
    where
        F: Fn(&Key, &Value) -> Value + 'static,
    {
        let mapper: EntryMapper = Rc::new(callback);
        self.derive(move |sequence| Box::new(MappedSequence::new(sequence, Rc::clone(&mapper))))
    }

    /// Drops values already seen; the first occurrence wins.
    pub fn unique(&self) -> LazyCollection {
        self.derive(|sequence| Box::new(UniqueSequence::new(sequence)))
    }

    // forcing operations

    /// Drains the cursor into a map. A repeated key keeps the last value.
    pub fn to_array(&self) -> CollectionResult<ArrayMap> {
        Ok(iter::to_array(self.cursor()?.by_ref()))
    }

    /// Calls `callback` for every entry until it returns `false`.
    pub fn each<F>(&self, callback: F) -> CollectionResult<()>
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        iter::apply(self.cursor()?.by_ref(), callback);
        Ok(())
    }

    /// Advances the cursor up to the first value strictly equal to `value`.
    pub fn contains(&self, value: impl Into<Value>) -> CollectionResult<bool> {
        let value = value.into();
        Ok(self.cursor()?.any(|(_, it)| it == value))
    }

    /// Takes the next value off the cursor.
    pub fn first(&self) -> CollectionResult<Option<Value>> {
        Ok(self.cursor()?.next().map(|(_, value)| value))
    }
}

impl Collectable for LazyCollection {
    type Key = Key;
    type Items = Vec<(Key, Value)>;

    /// Drains the cursor.
    fn all(&self) -> CollectionResult<Vec<(Key, Value)>> {
        Ok(self.cursor()?.by_ref().collect())
    }

    /// Drains the cursor; a second call on the same instance returns 0.
    fn count(&self) -> CollectionResult<usize> {
        Ok(iter::count(self.cursor()?.by_ref()))
    }

    fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        let predicate: EntryPredicate = Rc::new(predicate);
        self.derive(move |sequence| {
            Box::new(FilteredSequence::new(sequence, Rc::clone(&predicate), true))
        })
    }

    fn reject<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        let predicate: EntryPredicate = Rc::new(predicate);
        self.derive(move |sequence| {
            Box::new(FilteredSequence::new(sequence, Rc::clone(&predicate), false))
        })
    }

    fn only(&self, keys: &[Key]) -> Self {
        let keys: HashSet<Key> = keys.iter().cloned().collect();
        self.filter(move |key, _| keys.contains(key))
    }

    fn except(&self, keys: &[Key]) -> Self {
        let keys: HashSet<Key> = keys.iter().cloned().collect();
        self.reject(move |key, _| keys.contains(key))
    }

    /// Peeks at the cursor without consuming an entry.
    fn is_empty(&self) -> CollectionResult<bool> {
        Ok(self.cursor()?.peek().is_none())
    }
}

impl Debug for LazyCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyCollection")
            .field("materialized", &self.is_materialized())
            .finish()
    }
}

impl serde::Serialize for LazyCollection {
    /// Drains the cursor.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.all().map_err(serde::ser::Error::custom)?;
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in &entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = Vec<(Key, Value)>;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a map or a sequence of values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<Key, Value>()? {
            entries.push(entry);
        }
        Ok(entries)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<Value>()? {
            entries.push((Key::from(entries.len()), value));
        }
        Ok(entries)
    }
}

impl<'de> serde::Deserialize<'de> for LazyCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = if deserializer.is_human_readable() {
            deserializer.deserialize_any(EntriesVisitor)?
        } else {
            deserializer.deserialize_map(EntriesVisitor)?
        };
        Ok(LazyCollection::from_entries(entries))
    }
}

impl Serializable for LazyCollection {}
