//! Benchmark configuration

/// Collection variant under measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Dynamic map collection
    Basic,
    /// Fixed index collection
    Index,
    /// Lazy sequence collection
    Lazy,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Basic => write!(f, "basic"),
            Variant::Index => write!(f, "index"),
            Variant::Lazy => write!(f, "lazy"),
        }
    }
}

/// Configuration for benchmark runs
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Record counts to benchmark
    pub record_counts: Vec<usize>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            record_counts: vec![100, 1_000, 10_000],
        }
    }
}

impl BenchmarkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quick config with smaller record counts for fast testing
    pub fn quick() -> Self {
        Self {
            record_counts: vec![100, 1_000],
        }
    }
}
