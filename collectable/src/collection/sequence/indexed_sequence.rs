use crate::collection::sequence::Sequence;
use crate::common::{Key, Value};

/// Emits a projection of every entry under sequential integer keys.
pub(crate) struct IndexedSequence {
    raw_sequence: Sequence,
    projection: Projection,
    next_index: i64,
}

pub(crate) enum Projection {
    Values,
    /// Keys, optionally only those whose value strictly equals the filter.
    Keys(Option<Value>),
}

impl IndexedSequence {
    pub fn new(raw_sequence: Sequence, projection: Projection) -> Self {
        IndexedSequence {
            raw_sequence,
            projection,
            next_index: 0,
        }
    }
}

impl Iterator for IndexedSequence {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (key, value) = self.raw_sequence.next()?;
            let projected = match &self.projection {
                Projection::Values => value,
                Projection::Keys(None) => Value::from(key),
                Projection::Keys(Some(filter)) if *filter == value => Value::from(key),
                Projection::Keys(Some(_)) => continue,
            };
            let index = self.next_index;
            self.next_index += 1;
            return Some((Key::Int(index), projected));
        }
    }
}
