use crate::common::Value;
use crate::errors::CollectionResult;

/// Operations shared by every collection variant.
///
/// A collection holds a factory until it is first read; reading runs the factory once
/// and keeps the result. Operations returning `Self` build a new collection around a
/// new factory: the source is never modified and the result stays unmaterialized until
/// it is read, so errors of a transform surface on that first read.
///
/// # Examples
///
/// ```rust
/// use collectable::collection::{Collectable, Collection};
/// use collectable::{assoc_map, key};
///
/// let scores = Collection::create(|| Ok(assoc_map! { "ada" => 91, "alan" => 78, "grace" => 85 }));
/// let passed = scores.filter(|_, score| score.as_int() >= Some(80));
/// let failed = scores.reject(|_, score| score.as_int() >= Some(80));
///
/// assert_eq!(passed.count().unwrap() + failed.count().unwrap(), scores.count().unwrap());
/// assert_eq!(scores.only(&[key!("alan")]).count().unwrap(), 1);
/// ```
pub trait Collectable: Sized {
    /// Key type of the variant.
    type Key;
    /// Materialized contents returned by [Collectable::all].
    type Items;

    /// Returns the materialized contents.
    fn all(&self) -> CollectionResult<Self::Items>;

    /// Returns the number of entries.
    fn count(&self) -> CollectionResult<usize>;

    /// Keeps the entries for which `predicate` holds, in order.
    fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Self::Key, &Value) -> bool + 'static;

    /// Drops the entries for which `predicate` holds, in order.
    fn reject<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Self::Key, &Value) -> bool + 'static;

    /// Keeps the entries whose key is listed.
    fn only(&self, keys: &[Self::Key]) -> Self;

    /// Drops the entries whose key is listed.
    fn except(&self, keys: &[Self::Key]) -> Self;

    /// Passes the collection to `callback` and returns it, for inspection inside a chain.
    fn tap<F>(&self, callback: F) -> &Self
    where
        F: FnOnce(&Self),
    {
        callback(self);
        self
    }

    fn is_empty(&self) -> CollectionResult<bool> {
        Ok(self.count()? == 0)
    }

    /// Applies `callback` when `condition` holds, otherwise returns the collection as is.
    fn when<F>(self, condition: bool, callback: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition {
            callback(self)
        } else {
            self
        }
    }

    /// Applies `callback` when `condition` holds, `otherwise` when it does not.
    fn when_else<F, G>(self, condition: bool, callback: F, otherwise: G) -> Self
    where
        F: FnOnce(Self) -> Self,
        G: FnOnce(Self) -> Self,
    {
        if condition {
            callback(self)
        } else {
            otherwise(self)
        }
    }

    /// Applies `callback` unless `condition` holds.
    fn unless<F>(self, condition: bool, callback: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.when(!condition, callback)
    }

    /// Applies `callback` unless `condition` holds, `otherwise` when it does.
    fn unless_else<F, G>(self, condition: bool, callback: F, otherwise: G) -> Self
    where
        F: FnOnce(Self) -> Self,
        G: FnOnce(Self) -> Self,
    {
        self.when_else(!condition, callback, otherwise)
    }
}
