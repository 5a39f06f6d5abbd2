//! # Collectable - deferred key/value collections
//!
//! Collectable is a collection library built around one idea: a collection is a
//! factory closure plus the contents it produces the first time they are needed.
//! Four storage strategies share a common set of transformations (filtering,
//! mapping, aggregation, sorting, set algebra, slicing).
//!
//! ## Key Features
//!
//! - **Deferred**: contents are produced by a factory on first access, then cached
//! - **Four variants**: dynamic maps, fixed index arrays, lazy sequences and
//!   object-keyed maps
//! - **Non-destructive transforms**: every transformation returns a new, still
//!   unmaterialized collection
//! - **Array primitives**: the set algebra and sorting layer is usable on its own
//! - **Serialization**: binary (bincode) and JSON export of materialized contents
//!
//! ## Quick Start
//!
//! ```rust
//! use collectable::collection::{Collectable, Collection};
//! use collectable::common::{Comparison, SortOrder};
//! use collectable::{arr, assoc};
//!
//! let people = Collection::create(|| {
//!     Ok(arr![
//!         assoc! { "name" => "Ada", "age" => 36 },
//!         assoc! { "name" => "Linus", "age" => 28 },
//!         assoc! { "name" => "Grace", "age" => 45 },
//!     ])
//! });
//!
//! let seniors = people
//!     .where_("age", Comparison::GreaterOrEqual, 36)
//!     .sort_by_many([("age", SortOrder::Descending)])
//!     .pluck("name", None);
//!
//! assert!(!people.is_materialized());
//! assert_eq!(seniors.all().unwrap(), arr!["Grace", "Ada"]);
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Collection contract, the four variants and the factory
//! - [`collection_config`] - Library-wide defaults
//! - [`common`] - Keys, values, ordering and the serialization contract
//! - [`errors`] - Error types and result definitions
//! - [`primitives`] - Pure functions over arrays and iterators

use std::sync::{LazyLock, OnceLock};

use crate::collection_config::CollectionConfig;
use crate::errors::{CollectionError, CollectionResult, ErrorKind};

pub mod collection;
pub mod collection_config;
pub mod common;
pub mod errors;
pub mod primitives;

static CONFIG: OnceLock<CollectionConfig> = OnceLock::new();

static DEFAULT_CONFIG: LazyLock<CollectionConfig> = LazyLock::new(|| {
    let config = CollectionConfig::new();
    config.seal();
    config
});

/// Returns the active configuration: the one installed by [configure], or the
/// defaults.
pub fn config() -> CollectionConfig {
    CONFIG.get().unwrap_or(&DEFAULT_CONFIG).clone()
}

/// Installs `config` as the process-wide configuration and seals it.
///
/// # Errors
///
/// Returns `InvalidArgument` if a configuration was already installed.
///
/// # Examples
///
/// ```rust
/// use collectable::collection_config::CollectionConfig;
/// use collectable::common::SortFlag;
///
/// let config = CollectionConfig::new();
/// config.set_sort_flag(SortFlag::Natural).unwrap();
/// collectable::configure(config).unwrap();
///
/// assert_eq!(collectable::config().sort_flag(), SortFlag::Natural);
/// assert!(collectable::configure(CollectionConfig::new()).is_err());
/// ```
pub fn configure(config: CollectionConfig) -> CollectionResult<()> {
    config.seal();
    CONFIG.set(config).map_err(|_| {
        log::error!("Collection configuration is already installed");
        CollectionError::new(
            "Collection configuration is already installed",
            ErrorKind::InvalidArgument,
        )
    })
}
