//! Data generators for benchmarks

use collectable::assoc;
use collectable::common::{ArrayMap, Value};
use collectable::primitives::arr;
use fake::faker::company::en::*;
use fake::faker::internet::en::*;
use fake::faker::name::en::*;
use fake::Fake;
use rand::Rng;

const DEPARTMENTS: [&str; 5] = ["research", "kernel", "crypto", "platform", "tooling"];

/// Generate employee records for filtering, projection and sorting benchmarks
pub fn generate_records(count: usize) -> ArrayMap {
    let mut rng = rand::thread_rng();
    arr::list((0..count).map(|i| {
        let first_name: String = FirstName().fake();
        let last_name: String = LastName().fake();
        let email: String = FreeEmail().fake();
        let company: String = CompanyName().fake();
        let department = DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())];
        let age: i64 = rng.gen_range(18..80);
        let salary: f64 = rng.gen_range(30000.0..200000.0);

        assoc! {
            "id" => i,
            "firstName" => first_name,
            "lastName" => last_name,
            "email" => email,
            "company" => company,
            "department" => department,
            "age" => age,
            "salary" => salary,
            "active" => rng.gen_bool(0.8)
        }
    }))
}

/// Generate a flat list of random integers
pub fn generate_numbers(count: usize) -> Vec<Value> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| Value::from(rng.gen_range(0..1_000_000i64)))
        .collect()
}

/// Generate a flat list of user names, with repeats
pub fn generate_names(count: usize) -> ArrayMap {
    arr::list((0..count).map(|_| {
        let name: String = FirstName().fake();
        Value::from(name)
    }))
}
