use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use collectable::collection::{ArrayCollection, IndexCollection, LazyCollection};
use collectable::common::{ArrayMap, Key, Value};
use collectable::errors::CollectionResult;
use collectable::{arr, assoc};
use rand::Rng;

/// Runs a test body against a fresh context, failing with the error and the time it
/// took when either step returns an error.
pub fn run_test<B, T>(before: B, test: T)
where
    B: FnOnce() -> CollectionResult<TestContext>,
    T: FnOnce(TestContext) -> CollectionResult<()>,
{
    let start_time = Instant::now();
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };
    if let Err(e) = test(ctx) {
        panic!("Test failed after {:?}: {:?}", start_time.elapsed(), e);
    }
}

/// Counts how often the factories built through it are invoked.
#[derive(Clone, Default)]
pub struct TestContext {
    calls: Rc<Cell<usize>>,
}

impl TestContext {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Dynamic map collection replaying `items`, counting factory calls.
    pub fn counting_collection(&self, items: ArrayMap) -> ArrayCollection {
        let calls = Rc::clone(&self.calls);
        ArrayCollection::new(move || {
            calls.set(calls.get() + 1);
            Ok(items.clone())
        })
    }

    /// Fixed index collection holding `values`, counting factory calls.
    pub fn counting_index(&self, values: Vec<Value>) -> IndexCollection {
        let calls = Rc::clone(&self.calls);
        let capacity = values.len();
        IndexCollection::new(
            move |array| {
                calls.set(calls.get() + 1);
                for (index, value) in values.iter().enumerate() {
                    array.set(index, value.clone())?;
                }
                Ok(())
            },
            capacity,
        )
    }

    /// Lazy collection over `0, 1, 2, ...` without end, counting generator calls.
    pub fn counting_naturals(&self) -> LazyCollection {
        let calls = Rc::clone(&self.calls);
        LazyCollection::from_values(move || {
            calls.set(calls.get() + 1);
            (0..).map(|n: i64| Value::from(n))
        })
    }
}

pub fn create_test_context() -> CollectionResult<TestContext> {
    Ok(TestContext::default())
}

/// Employee records: `id`, `name`, `department`, `salary` and `active`.
pub fn create_test_records() -> ArrayMap {
    let employee = |id: i64, name: &str, department: &str, salary: i64, active: bool| {
        assoc! {
            "id" => id,
            "name" => name,
            "department" => department,
            "salary" => salary,
            "active" => active
        }
    };
    arr![
        employee(1, "Ada", "research", 5200, true),
        employee(2, "Linus", "kernel", 4800, true),
        employee(3, "Grace", "research", 6100, false),
        employee(4, "Alan", "crypto", 4800, true),
        employee(5, "Barbara", "kernel", 5600, false),
    ]
}

/// `count` random integers below 1000.
pub fn random_numbers(count: usize) -> Vec<Value> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| Value::from(rng.gen_range(0..1000i64))).collect()
}

/// The `column` value of every record, in order.
pub fn column_of(items: &ArrayMap, column: &str) -> Vec<Value> {
    let column = Key::from(column);
    items
        .values()
        .filter_map(|record| record.column(&column).cloned())
        .collect()
}

pub fn is_sorted<T: Ord>(iterable: impl IntoIterator<Item = T>, ascending: bool) -> bool {
    let mut iter = iterable.into_iter();
    if let Some(mut prev) = iter.next() {
        for current in iter {
            if (ascending && prev > current) || (!ascending && prev < current) {
                return false;
            }
            prev = current;
        }
    }
    true
}
