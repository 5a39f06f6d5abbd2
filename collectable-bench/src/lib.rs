//! Collectable Benchmark Library
//!
//! Provides record generators and size presets shared by the collection
//! benchmarks.

pub mod config;
pub mod data_gen;
