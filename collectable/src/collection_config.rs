//! Configuration management for collections.

use icu_collator::options::CollatorOptions;
use icu_collator::CollatorPreferences;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::common::{Shared, SortFlag};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};

/// Process-wide defaults used by collection operations.
///
/// Settings can be changed until the configuration is installed with
/// [configure](crate::configure); after that every setter fails.
///
/// # Examples
///
/// ```rust
/// use collectable::collection_config::CollectionConfig;
/// use collectable::common::SortFlag;
///
/// let config = CollectionConfig::new();
/// config.set_sort_flag(SortFlag::Natural).unwrap();
/// config.set_pretty_json(true).unwrap();
/// assert_eq!(config.sort_flag(), SortFlag::Natural);
/// ```
#[derive(Clone)]
pub struct CollectionConfig {
    /// The pointer to implementation. Uses Arc for cheap cloning and thread safety.
    inner: Arc<CollectionConfigInner>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionConfig {
    /// Creates a new configuration instance with default values.
    pub fn new() -> Self {
        CollectionConfig {
            inner: Arc::new(CollectionConfigInner::new()),
        }
    }

    /// Returns the flag used by value sorts that do not pass one explicitly.
    pub fn sort_flag(&self) -> SortFlag {
        self.inner.sort_flag()
    }

    /// Sets the default sort flag.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is already installed.
    pub fn set_sort_flag(&self, flag: SortFlag) -> CollectionResult<()> {
        self.inner.set_sort_flag(flag)
    }

    /// Returns the collator preferences used by [SortFlag::LocaleString].
    pub fn collator_preferences(&self) -> CollatorPreferences {
        self.inner.collator_preferences()
    }

    /// Sets the collator preferences used by [SortFlag::LocaleString].
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is already installed.
    pub fn set_collator_preferences(
        &self,
        preferences: CollatorPreferences,
    ) -> CollectionResult<()> {
        self.inner.set_collator_preferences(preferences)
    }

    /// Returns the collator options used by [SortFlag::LocaleString].
    pub fn collator_options(&self) -> CollatorOptions {
        self.inner.collator_options()
    }

    /// Sets the collator options used by [SortFlag::LocaleString].
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is already installed.
    pub fn set_collator_options(&self, options: CollatorOptions) -> CollectionResult<()> {
        self.inner.set_collator_options(options)
    }

    /// Whether JSON export is pretty-printed.
    pub fn pretty_json(&self) -> bool {
        self.inner.pretty_json()
    }

    /// Enables or disables pretty-printed JSON export.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is already installed.
    pub fn set_pretty_json(&self, pretty: bool) -> CollectionResult<()> {
        self.inner.set_pretty_json(pretty)
    }

    /// Returns true once the configuration has been installed.
    pub fn is_sealed(&self) -> bool {
        self.inner.configured.load(Ordering::Relaxed)
    }

    /// Freezes the configuration. Called when it becomes the process-wide instance.
    pub(crate) fn seal(&self) {
        self.inner.configured.store(true, Ordering::Relaxed);
    }
}

/// Private implementation of the collection configuration.
struct CollectionConfigInner {
    /// Indicates whether this configuration has been installed
    configured: AtomicBool,
    sort_flag: Shared<SortFlag>,
    collator_preferences: Shared<CollatorPreferences>,
    collator_options: Shared<CollatorOptions>,
    pretty_json: AtomicBool,
}

impl CollectionConfigInner {
    fn new() -> Self {
        CollectionConfigInner {
            configured: AtomicBool::from(false),
            sort_flag: Shared::new(SortFlag::Regular),
            collator_preferences: Shared::new(CollatorPreferences::default()),
            collator_options: Shared::new(CollatorOptions::default()),
            pretty_json: AtomicBool::from(false),
        }
    }

    fn ensure_not_configured(&self, setting: &str) -> CollectionResult<()> {
        if self.configured.load(Ordering::Relaxed) {
            log::error!("{} cannot be changed after the configuration is installed", setting);
            return Err(CollectionError::new(
                &format!("{} cannot be changed after the configuration is installed", setting),
                ErrorKind::InvalidArgument,
            ));
        }
        Ok(())
    }

    fn sort_flag(&self) -> SortFlag {
        self.sort_flag.get()
    }

    fn set_sort_flag(&self, flag: SortFlag) -> CollectionResult<()> {
        self.ensure_not_configured("Sort flag")?;
        self.sort_flag.replace(flag);
        Ok(())
    }

    fn collator_preferences(&self) -> CollatorPreferences {
        self.collator_preferences.get()
    }

    fn set_collator_preferences(&self, preferences: CollatorPreferences) -> CollectionResult<()> {
        self.ensure_not_configured("Collator preferences")?;
        self.collator_preferences.replace(preferences);
        Ok(())
    }

    fn collator_options(&self) -> CollatorOptions {
        self.collator_options.get()
    }

    fn set_collator_options(&self, options: CollatorOptions) -> CollectionResult<()> {
        self.ensure_not_configured("Collator options")?;
        self.collator_options.replace(options);
        Ok(())
    }

    fn pretty_json(&self) -> bool {
        self.pretty_json.load(Ordering::Relaxed)
    }

    fn set_pretty_json(&self, pretty: bool) -> CollectionResult<()> {
        self.ensure_not_configured("Pretty json")?;
        self.pretty_json.store(pretty, Ordering::Relaxed);
        Ok(())
    }
}
