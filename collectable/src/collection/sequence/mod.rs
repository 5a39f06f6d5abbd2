//! Pull-based adapters over key/value sequences, used by
//! [LazyCollection](crate::collection::LazyCollection).

mod filtered_sequence;
mod indexed_sequence;
mod mapped_sequence;
mod unique_sequence;

pub(crate) use filtered_sequence::*;
pub(crate) use indexed_sequence::*;
pub(crate) use mapped_sequence::*;
pub(crate) use unique_sequence::*;

use crate::common::{Key, Value};

/// A boxed, single-pass sequence of key/value pairs.
pub type Sequence = Box<dyn Iterator<Item = (Key, Value)>>;
