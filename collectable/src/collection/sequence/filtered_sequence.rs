use std::rc::Rc;

use crate::collection::sequence::Sequence;
use crate::common::{Key, Value};

pub(crate) type EntryPredicate = Rc<dyn Fn(&Key, &Value) -> bool>;

/// Yields the entries for which the predicate equals `keep`.
pub(crate) struct FilteredSequence {
    raw_sequence: Sequence,
    predicate: EntryPredicate,
    keep: bool,
}

impl FilteredSequence {
    pub fn new(raw_sequence: Sequence, predicate: EntryPredicate, keep: bool) -> Self {
        FilteredSequence {
            raw_sequence,
            predicate,
            keep,
        }
    }
}

impl Iterator for FilteredSequence {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (key, value) = self.raw_sequence.next()?;
            if (self.predicate)(&key, &value) == self.keep {
                return Some((key, value));
            }
        }
    }
}
