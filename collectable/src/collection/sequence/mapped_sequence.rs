use std::rc::Rc;

use crate::collection::sequence::Sequence;
use crate::common::{Key, Value};

pub(crate) type EntryMapper = Rc<dyn Fn(&Key, &Value) -> Value>;

/// Replaces every value with the mapper's result, keys untouched.
pub(crate) struct MappedSequence {
    raw_sequence: Sequence,
    mapper: EntryMapper,
}

impl MappedSequence {
    pub fn new(raw_sequence: Sequence, mapper: EntryMapper) -> Self {
        MappedSequence {
            raw_sequence,
            mapper,
        }
    }
}

impl Iterator for MappedSequence {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.raw_sequence.next()?;
        let mapped = (self.mapper)(&key, &value);
        Some((key, mapped))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw_sequence.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key, val};

    #[test]
    fn test_keys_are_kept() {
        let raw: Sequence = Box::new(vec![(key!("a"), val!(1)), (key!("b"), val!(2))].into_iter());
        let mapper: EntryMapper = Rc::new(|k, v| val!(format!("{}{}", k, v)));
        let entries: Vec<(Key, Value)> = MappedSequence::new(raw, mapper).collect();
        assert_eq!(entries, vec![(key!("a"), val!("a1")), (key!("b"), val!("b2"))]);
    }
}
