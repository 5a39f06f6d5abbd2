//! Builders for collections with generated contents.
//!
//! Each builder is obtained from [Collection](crate::collection::Collection) and
//! finished into one of the variants. Finishing never materializes anything: the
//! contents are generated on first access of the resulting collection.

use std::rc::Rc;

use crate::collection::{ArrayCollection, IndexCollection, LazyCollection};
use crate::common::{Key, Value};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};
use crate::primitives::{self, arr, ValueRange};

/// `length` copies of one value.
#[derive(Debug, Clone)]
pub struct Fill {
    value: Value,
    length: usize,
    start_index: i64,
}

impl Fill {
    pub(crate) fn new(value: Value, length: usize) -> Self {
        Fill {
            value,
            length,
            start_index: 0,
        }
    }

    /// First integer key of the dynamic and lazy variants. Fixed index collections
    /// always start at 0.
    pub fn start_index(mut self, start_index: i64) -> Self {
        self.start_index = start_index;
        self
    }

    /// Fails on first access with `CapacityExceeded` if the keys would overflow.
    pub fn as_basic(&self) -> ArrayCollection {
        let Fill {
            value,
            length,
            start_index,
        } = self.clone();
        ArrayCollection::new(move || primitives::fill(start_index, length, &value))
    }

    pub fn as_index(&self) -> IndexCollection {
        let value = self.value.clone();
        IndexCollection::new(
            move |array| {
                for index in 0..array.size() {
                    array.set(index, value.clone())?;
                }
                Ok(())
            },
            self.length,
        )
    }

    /// Stops early instead of overflowing the integer keys.
    pub fn as_lazy(&self) -> LazyCollection {
        let Fill {
            value,
            length,
            start_index,
        } = self.clone();
        LazyCollection::new(move || {
            let value = value.clone();
            (0..length).map_while(move |offset| {
                let key = i64::try_from(offset).ok()?.checked_add(start_index)?;
                Some((Key::Int(key), value.clone()))
            })
        })
    }
}

/// One value under each of the given keys.
#[derive(Debug, Clone)]
pub struct FillKeys {
    keys: Rc<Vec<Key>>,
    value: Value,
}

impl FillKeys {
    pub(crate) fn new(keys: Vec<Key>, value: Value) -> Self {
        FillKeys {
            keys: Rc::new(keys),
            value,
        }
    }

    /// A repeated key is stored once.
    pub fn as_basic(&self) -> ArrayCollection {
        let FillKeys { keys, value } = self.clone();
        ArrayCollection::new(move || {
            Ok(keys.iter().map(|key| (key.clone(), value.clone())).collect())
        })
    }

    /// A repeated key is yielded every time it occurs.
    pub fn as_lazy(&self) -> LazyCollection {
        let FillKeys { keys, value } = self.clone();
        LazyCollection::new(move || {
            let value = value.clone();
            let keys = Rc::clone(&keys);
            (0..keys.len()).map(move |index| (keys[index].clone(), value.clone()))
        })
    }
}

/// Values of one list used as keys for the values of another.
#[derive(Debug, Clone)]
pub struct FillAssoc {
    keys: Rc<Vec<Value>>,
    values: Rc<Vec<Value>>,
}

impl FillAssoc {
    pub(crate) fn new(keys: Vec<Value>, values: Vec<Value>) -> Self {
        FillAssoc {
            keys: Rc::new(keys),
            values: Rc::new(values),
        }
    }

    /// Fails on first access with `InvalidKeyType` if a key is neither an integer nor a
    /// string, or `SizeMismatch` if the lists differ in length.
    pub fn as_basic(&self) -> ArrayCollection {
        let FillAssoc { keys, values } = self.clone();
        ArrayCollection::new(move || {
            arr::combine(
                &arr::list(keys.iter().cloned()),
                &arr::list(values.iter().cloned()),
            )
        })
    }

    /// Validates the lists right away, since a lazy sequence cannot fail later.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyType` if a key is neither an integer nor a string, or
    /// `SizeMismatch` if the lists differ in length.
    pub fn as_lazy(&self) -> CollectionResult<LazyCollection> {
        let keys = self
            .keys
            .iter()
            .map(|candidate| {
                candidate.as_key().ok_or_else(|| {
                    log::error!(
                        "Cannot use {:?} as key, keys have to be integers or strings",
                        candidate
                    );
                    CollectionError::new(
                        "Keys have to be integers or strings",
                        ErrorKind::InvalidKeyType,
                    )
                })
            })
            .collect::<CollectionResult<Vec<Key>>>()?;
        if keys.len() != self.values.len() {
            log::error!(
                "Cannot combine {} keys with {} values",
                keys.len(),
                self.values.len()
            );
            return Err(CollectionError::new(
                "Number of elements for each array has to be equal",
                ErrorKind::SizeMismatch,
            ));
        }
        let entries = keys.into_iter().zip(self.values.iter().cloned()).collect();
        Ok(LazyCollection::from_entries(entries))
    }
}

/// Numbers or characters from a start to an end, stepping by a fixed amount.
#[derive(Debug, Clone, Copy)]
pub struct Range {
    range: ValueRange,
}

impl Range {
    pub(crate) fn new(range: ValueRange) -> Self {
        Range { range }
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn as_basic(&self) -> ArrayCollection {
        let range = self.range;
        ArrayCollection::new(move || Ok(arr::list(range.values())))
    }

    pub fn as_index(&self) -> IndexCollection {
        let range = self.range;
        IndexCollection::new(
            move |array| {
                for (index, value) in range.values().enumerate() {
                    array.set(index, value)?;
                }
                Ok(())
            },
            range.len(),
        )
    }

    pub fn as_lazy(&self) -> LazyCollection {
        let range = self.range;
        LazyCollection::from_values(move || range.values())
    }
}
