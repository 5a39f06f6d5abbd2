use std::collections::HashSet;

use crate::collection::sequence::Sequence;
use crate::common::{Key, Value};

/// Yields each value the first time its string form is seen.
pub(crate) struct UniqueSequence {
    raw_sequence: Sequence,
    seen: HashSet<String>,
}

impl UniqueSequence {
    pub fn new(raw_sequence: Sequence) -> Self {
        UniqueSequence {
            raw_sequence,
            seen: HashSet::with_capacity(64),
        }
    }
}

impl Iterator for UniqueSequence {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (key, value) = self.raw_sequence.next()?;
            if self.seen.insert(value.to_plain_string()) {
                return Some((key, value));
            }
        }
    }
}
