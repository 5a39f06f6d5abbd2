//! Collection variants and the factory that builds them.
//!
//! Every variant is built around a factory closure and stays unmaterialized until it
//! is first read (see [DeferredStore]). Four variants share the [Collectable]
//! contract:
//!
//! | Variant | Keys | Storage |
//! |---------|------|---------|
//! | [ArrayCollection] | integers and strings | ordered map |
//! | [IndexCollection] | `0..size` | fixed array of slots |
//! | [LazyCollection] | integers and strings | single-pass sequence |
//! | [ObjectCollection] | shared objects, by identity | ordered identity map |
//!
//! Collections are single-threaded: they are built on [std::rc::Rc] and are not `Send`.

mod array_collection;
mod collectable;
mod collection_factory;
mod deferred;
mod index_collection;
mod lazy_collection;
mod object_collection;
mod predefined;
mod sequence;

pub use array_collection::*;
pub use collectable::*;
pub use collection_factory::*;
pub use deferred::*;
pub use index_collection::*;
pub use lazy_collection::*;
pub use object_collection::*;
pub use predefined::*;
pub use sequence::Sequence;

use crate::common::Key;
use crate::errors::{CollectionError, ErrorKind};

pub(crate) fn key_not_found(key: &Key) -> CollectionError {
    log::error!("Key {} does not exist in the collection", key);
    CollectionError::new(&format!("Key {} does not exist", key), ErrorKind::KeyNotFound)
}

pub(crate) fn key_already_exists(key: &Key) -> CollectionError {
    log::error!("Key {} already exists in the collection", key);
    CollectionError::new(&format!("Key {} already exists", key), ErrorKind::KeyAlreadyExists)
}

pub(crate) fn invalid_argument(message: &str) -> CollectionError {
    log::error!("{}", message);
    CollectionError::new(message, ErrorKind::InvalidArgument)
}
