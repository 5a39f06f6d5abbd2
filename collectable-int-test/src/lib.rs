//! Shared fixtures for the `collectable` integration tests.

pub mod test_util;
