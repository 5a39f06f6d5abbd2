use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserializer, Serializer};

use crate::collection::deferred::DeferredStore;
use crate::collection::{invalid_argument, Collectable};
use crate::common::{ArrayMap, Serializable, Value};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};
use crate::primitives::arr;

/// Identity of a shared object: two keys are equal only when they point to the same
/// allocation, whatever the objects contain.
struct ObjectKey<O>(Rc<O>);

impl<O> Clone for ObjectKey<O> {
    fn clone(&self) -> Self {
        ObjectKey(Rc::clone(&self.0))
    }
}

impl<O> PartialEq for ObjectKey<O> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<O> Eq for ObjectKey<O> {}

impl<O> Hash for ObjectKey<O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state)
    }
}

/// Ordered map from object identities to values.
///
/// Attaching an object that is already present replaces its value in place.
pub struct ObjectStorage<O> {
    entries: IndexMap<ObjectKey<O>, Value>,
}

impl<O> ObjectStorage<O> {
    pub fn new() -> Self {
        ObjectStorage {
            entries: IndexMap::new(),
        }
    }

    /// Attaches `object` with `value`, returning the value it replaced.
    pub fn attach(&mut self, object: Rc<O>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(ObjectKey(object), value.into())
    }

    /// Detaches `object`, keeping the order of the rest.
    pub fn detach(&mut self, object: &Rc<O>) -> Option<Value> {
        self.entries.shift_remove(&ObjectKey(Rc::clone(object)))
    }

    pub fn contains(&self, object: &Rc<O>) -> bool {
        self.entries.contains_key(&ObjectKey(Rc::clone(object)))
    }

    pub fn get(&self, object: &Rc<O>) -> Option<&Value> {
        self.entries.get(&ObjectKey(Rc::clone(object)))
    }

    pub fn get_mut(&mut self, object: &Rc<O>) -> Option<&mut Value> {
        self.entries.get_mut(&ObjectKey(Rc::clone(object)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Rc<O>, &Value)> {
        self.entries.iter().map(|(key, value)| (&key.0, value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Rc<O>, &mut Value)> {
        self.entries.iter_mut().map(|(key, value)| (&key.0, value))
    }

    pub fn objects(&self) -> impl Iterator<Item = &Rc<O>> {
        self.entries.keys().map(|key| &key.0)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<O> Default for ObjectStorage<O> {
    fn default() -> Self {
        ObjectStorage::new()
    }
}

impl<O> Clone for ObjectStorage<O> {
    fn clone(&self) -> Self {
        ObjectStorage {
            entries: self.entries.clone(),
        }
    }
}

impl<O> FromIterator<(Rc<O>, Value)> for ObjectStorage<O> {
    fn from_iter<T: IntoIterator<Item = (Rc<O>, Value)>>(iter: T) -> Self {
        ObjectStorage {
            entries: iter
                .into_iter()
                .map(|(object, value)| (ObjectKey(object), value))
                .collect(),
        }
    }
}

impl<O: Debug> Debug for ObjectStorage<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Object-keyed map collection: values attached to shared objects, looked up by
/// identity.
///
/// # Examples
///
/// ```rust
/// use std::rc::Rc;
/// use collectable::collection::{Collectable, ObjectCollection, ObjectStorage};
/// use collectable::val;
///
/// #[derive(Debug)]
/// struct User {
///     name: String,
/// }
///
/// let ada = Rc::new(User { name: "Ada".into() });
/// let twin = Rc::new(User { name: "Ada".into() });
///
/// let owner = Rc::clone(&ada);
/// let mut roles = ObjectCollection::new(move || {
///     let mut storage = ObjectStorage::new();
///     storage.attach(Rc::clone(&owner), "admin");
///     Ok(storage)
/// });
///
/// assert_eq!(roles.get(&ada).unwrap(), &val!("admin"));
/// assert!(!roles.contains(&twin).unwrap());
///
/// roles.attach(twin, "guest").unwrap();
/// assert_eq!(roles.count().unwrap(), 2);
/// ```
pub struct ObjectCollection<O: 'static> {
    store: DeferredStore<ObjectStorage<O>>,
}

impl<O: 'static> ObjectCollection<O> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> CollectionResult<ObjectStorage<O>> + 'static,
    {
        ObjectCollection {
            store: DeferredStore::new(factory),
        }
    }

    /// Creates a collection replaying `storage`.
    pub fn from_storage(storage: ObjectStorage<O>) -> Self {
        ObjectCollection {
            store: DeferredStore::replay(storage),
        }
    }

    fn derive<F>(&self, transform: F) -> ObjectCollection<O>
    where
        F: Fn(&ObjectStorage<O>) -> CollectionResult<ObjectStorage<O>> + 'static,
    {
        ObjectCollection {
            store: DeferredStore::derived(self.store.source(), transform),
        }
    }

    fn derive_filtered<F>(&self, keep: F) -> ObjectCollection<O>
    where
        F: Fn(&Rc<O>, &Value) -> bool + 'static,
    {
        self.derive(move |storage| {
            Ok(storage
                .iter()
                .filter(|(object, value)| keep(object, value))
                .map(|(object, value)| (Rc::clone(object), value.clone()))
                .collect())
        })
    }

    pub fn is_materialized(&self) -> bool {
        self.store.is_materialized()
    }

    pub fn items(&self) -> CollectionResult<&ObjectStorage<O>> {
        self.store.get()
    }

    /// # Errors
    ///
    /// Returns `KeyNotFound` if `object` is not attached.
    pub fn get(&self, object: &Rc<O>) -> CollectionResult<&Value> {
        self.items()?.get(object).ok_or_else(object_not_found)
    }

    /// Attaches `object`, replacing its value in place if it is already attached.
    pub fn set(&mut self, object: Rc<O>, value: impl Into<Value>) -> CollectionResult<()> {
        self.store.get_mut()?.attach(object, value);
        Ok(())
    }

    /// Same as [ObjectCollection::set].
    pub fn attach(&mut self, object: Rc<O>, value: impl Into<Value>) -> CollectionResult<()> {
        self.set(object, value)
    }

    /// # Errors
    ///
    /// Returns `KeyAlreadyExists` if `object` is attached.
    pub fn add(&mut self, object: Rc<O>, value: impl Into<Value>) -> CollectionResult<()> {
        let storage = self.store.get_mut()?;
        if storage.contains(&object) {
            log::error!("Object is already attached to the collection");
            return Err(CollectionError::new(
                "Object already exists in the collection",
                ErrorKind::KeyAlreadyExists,
            ));
        }
        storage.attach(object, value);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `KeyNotFound` if `object` is not attached.
    pub fn replace(&mut self, object: &Rc<O>, value: impl Into<Value>) -> CollectionResult<()> {
        match self.store.get_mut()?.get_mut(object) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(object_not_found()),
        }
    }

    /// Returns true if `object` is attached with a non-null value.
    pub fn isset(&self, object: &Rc<O>) -> CollectionResult<bool> {
        Ok(self.items()?.get(object).is_some_and(|value| !value.is_null()))
    }

    pub fn unset(&mut self, object: &Rc<O>) -> CollectionResult<Option<Value>> {
        Ok(self.store.get_mut()?.detach(object))
    }

    /// Same as [ObjectCollection::unset].
    pub fn detach(&mut self, object: &Rc<O>) -> CollectionResult<Option<Value>> {
        self.unset(object)
    }

    /// Calls `callback` for every entry until it returns `false`.
    pub fn each<F>(&self, mut callback: F) -> CollectionResult<()>
    where
        F: FnMut(&Rc<O>, &Value) -> bool,
    {
        for (object, value) in self.items()?.iter() {
            if !callback(object, value) {
                break;
            }
        }
        Ok(())
    }

    pub fn walk<F>(&mut self, mut callback: F) -> CollectionResult<()>
    where
        F: FnMut(&Rc<O>, &mut Value),
    {
        for (object, value) in self.store.get_mut()?.iter_mut() {
            callback(object, value);
        }
        Ok(())
    }

    pub fn map<F>(&self, callback: F) -> ObjectCollection<O>
    where
        F: Fn(&Rc<O>, &Value) -> Value + 'static,
    {
        self.derive(move |storage| {
            Ok(storage
                .iter()
                .map(|(object, value)| (Rc::clone(object), callback(object, value)))
                .collect())
        })
    }

    /// Passes the entries to `callback` in batches of `size`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `size` is 0.
    pub fn chunk<F>(&self, size: usize, mut callback: F) -> CollectionResult<()>
    where
        F: FnMut(ObjectCollection<O>),
    {
        if size == 0 {
            return Err(invalid_argument("Chunk size has to be greater than zero"));
        }
        let mut batch = ObjectStorage::new();
        for (object, value) in self.items()?.iter() {
            batch.attach(Rc::clone(object), value.clone());
            if batch.len() == size {
                callback(ObjectCollection::from_storage(std::mem::take(&mut batch)));
            }
        }
        if !batch.is_empty() {
            callback(ObjectCollection::from_storage(batch));
        }
        Ok(())
    }

    /// Hands the storage to `callback` for in-place changes.
    pub fn merge<F>(&mut self, callback: F) -> CollectionResult<()>
    where
        F: FnOnce(&mut ObjectStorage<O>),
    {
        callback(self.store.get_mut()?);
        Ok(())
    }

    /// Returns true if this very object is attached.
    pub fn contains(&self, object: &Rc<O>) -> CollectionResult<bool> {
        Ok(self.items()?.contains(object))
    }

    pub fn contains_by<F>(&self, predicate: F) -> CollectionResult<bool>
    where
        F: Fn(&Rc<O>, &Value) -> bool,
    {
        Ok(self.items()?.iter().any(|(object, value)| predicate(object, value)))
    }

    pub fn every<F>(&self, predicate: F) -> CollectionResult<bool>
    where
        F: Fn(&Rc<O>, &Value) -> bool,
    {
        Ok(self.items()?.iter().all(|(object, value)| predicate(object, value)))
    }

    /// Returns the value attached to this very object.
    pub fn search(&self, object: &Rc<O>) -> CollectionResult<Option<&Value>> {
        Ok(self.items()?.get(object))
    }

    /// The attached values, in order, as a list.
    pub fn to_array(&self) -> CollectionResult<ArrayMap> {
        Ok(arr::list(self.items()?.values().cloned()))
    }
}

fn object_not_found() -> CollectionError {
    log::error!("Object is not attached to the collection");
    CollectionError::new("Object does not exist in the collection", ErrorKind::KeyNotFound)
}

impl<O: 'static> Collectable for ObjectCollection<O> {
    type Key = Rc<O>;
    type Items = ObjectStorage<O>;

    fn all(&self) -> CollectionResult<ObjectStorage<O>> {
        Ok(self.items()?.clone())
    }

    fn count(&self) -> CollectionResult<usize> {
        Ok(self.items()?.len())
    }

    fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Rc<O>, &Value) -> bool + 'static,
    {
        self.derive_filtered(predicate)
    }

    fn reject<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Rc<O>, &Value) -> bool + 'static,
    {
        self.derive_filtered(move |object, value| !predicate(object, value))
    }

    fn only(&self, objects: &[Rc<O>]) -> Self {
        let objects = objects.to_vec();
        self.derive_filtered(move |object, _| objects.iter().any(|it| Rc::ptr_eq(it, object)))
    }

    fn except(&self, objects: &[Rc<O>]) -> Self {
        let objects = objects.to_vec();
        self.derive_filtered(move |object, _| !objects.iter().any(|it| Rc::ptr_eq(it, object)))
    }
}

impl<O: 'static> Clone for ObjectCollection<O> {
    fn clone(&self) -> Self {
        ObjectCollection {
            store: self.store.clone(),
        }
    }
}

impl<O: Debug + 'static> Debug for ObjectCollection<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectCollection")
            .field("items", &self.store)
            .finish()
    }
}

impl<O: serde::Serialize + 'static> serde::Serialize for ObjectCollection<O> {
    /// Writes the entries as a sequence of `(object, value)` pairs.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let storage = self.items().map_err(serde::ser::Error::custom)?;
        serializer.collect_seq(storage.iter().map(|(object, value)| (object.as_ref(), value)))
    }
}

impl<'de, O: DeserializeOwned + 'static> serde::Deserialize<'de> for ObjectCollection<O> {
    /// Every object is restored as a new allocation.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries: Vec<(O, Value)> = serde::Deserialize::deserialize(deserializer)?;
        Ok(ObjectCollection::from_storage(
            entries
                .into_iter()
                .map(|(object, value)| (Rc::new(object), value))
                .collect(),
        ))
    }
}

impl<O: serde::Serialize + DeserializeOwned + 'static> Serializable for ObjectCollection<O> {}
