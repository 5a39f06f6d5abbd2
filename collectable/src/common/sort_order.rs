use std::cmp::Ordering;

/// Specifies the direction for sorting collection entries.
///
/// # Variants
/// - `Ascending`: Sort from smallest to largest value (A to Z, 0 to 9)
/// - `Descending`: Sort from largest to smallest value (Z to A, 9 to 0)
///
/// # Usage
/// ```rust
/// use collectable::common::SortOrder;
/// use collectable::collection::Collection;
/// use collectable::assoc_map;
///
/// let people = Collection::create(|| Ok(assoc_map! { "b" => 2, "a" => 1 }));
/// let sorted = people.sort_keys(SortOrder::Ascending);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z)
    #[default]
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A)
    Descending,
}

impl SortOrder {
    /// Applies the direction to an ordering produced by an ascending comparator.
    #[inline]
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}
