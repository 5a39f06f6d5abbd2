//! Array and iterator primitives.
//!
//! Stateless functions over [ArrayMap](crate::common::ArrayMap)s and key/value
//! iterators. The collection variants delegate their heavier algorithms (set algebra,
//! multi-column sort, ranges) to this layer, and it can be used on its own:
//!
//! ```rust
//! use collectable::primitives::arr;
//! use collectable::{arr, assoc_map};
//!
//! let keys = arr![1, 2];
//! let values = arr!["a", "b"];
//! assert_eq!(arr::combine(&keys, &values).unwrap(), assoc_map! { 1 => "a", 2 => "b" });
//! ```

pub mod arr;
pub mod iter;
mod range;
mod sorting;

pub use range::*;
pub use sorting::*;
