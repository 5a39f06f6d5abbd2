use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

/// A value behind a read/write lock, seen by every clone of the handle.
///
/// Holds the mutable settings of a [CollectionConfig](crate::collection_config::CollectionConfig)
/// and the lazily resolved backtrace of a [CollectionError](crate::errors::CollectionError).
pub struct Shared<T> {
    cell: Arc<RwLock<T>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Shared {
            cell: Arc::new(RwLock::new(value)),
        }
    }

    /// Runs `f` under the read lock.
    #[inline]
    pub fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.cell.read())
    }

    /// Runs `f` under the write lock. Must not be called from inside `f`.
    #[inline]
    pub fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.cell.write())
    }

    /// Stores `value` and hands back the previous one.
    pub fn replace(&self, value: T) -> T {
        self.write_with(|current| std::mem::replace(current, value))
    }
}

impl<T: Clone> Shared<T> {
    pub fn get(&self) -> T {
        self.read_with(T::clone)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: Debug> Debug for Shared<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.read_with(|value| value.fmt(f))
    }
}
