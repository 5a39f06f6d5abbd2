use std::cmp::Ordering;

use icu_collator::Collator;

use crate::common::value::num_cmp_float;
use crate::common::{natural_cmp, natural_cmp_ignore_case, Value};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};

/// Comparator over collection values, produced by [SortFlag::comparator].
pub type ValueComparator = Box<dyn Fn(&Value, &Value) -> Ordering>;

/// Selects how values are compared by value sorts.
///
/// # Variants
/// - `Regular`: the total order of [Value]
/// - `Numeric`: numeric interpretation of each value (non numeric strings count as 0)
/// - `String`: byte-wise comparison of the string forms
/// - `LocaleString`: locale aware comparison of the string forms, using the collator
///   settings of the active [CollectionConfig](crate::collection_config::CollectionConfig)
/// - `Natural`: natural ordering of the string forms (`"img2" < "img10"`)
/// - `StringFlagCase`: case-insensitive `String`
/// - `NaturalFlagCase`: case-insensitive `Natural`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortFlag {
    #[default]
    Regular,
    Numeric,
    String,
    LocaleString,
    Natural,
    StringFlagCase,
    NaturalFlagCase,
}

impl SortFlag {
    /// Builds the ascending comparator for this flag.
    ///
    /// # Errors
    ///
    /// Returns an `InternalError` if the locale collator cannot be created.
    pub fn comparator(&self) -> CollectionResult<ValueComparator> {
        let comparator: ValueComparator = match self {
            SortFlag::Regular => Box::new(|a: &Value, b: &Value| a.cmp(b)),
            SortFlag::Numeric => {
                Box::new(|a: &Value, b: &Value| num_cmp_float(a.to_number(), b.to_number()))
            }
            SortFlag::String => {
                Box::new(|a: &Value, b: &Value| a.to_plain_string().cmp(&b.to_plain_string()))
            }
            SortFlag::StringFlagCase => Box::new(|a: &Value, b: &Value| {
                a.to_plain_string()
                    .to_lowercase()
                    .cmp(&b.to_plain_string().to_lowercase())
            }),
            SortFlag::Natural => Box::new(|a: &Value, b: &Value| {
                natural_cmp(&a.to_plain_string(), &b.to_plain_string())
            }),
            SortFlag::NaturalFlagCase => Box::new(|a: &Value, b: &Value| {
                natural_cmp_ignore_case(&a.to_plain_string(), &b.to_plain_string())
            }),
            SortFlag::LocaleString => {
                let config = crate::config();
                let collator =
                    Collator::try_new(config.collator_preferences(), config.collator_options())
                        .map_err(|_| {
                            log::error!("Failed to create collator for locale string sorting");
                            CollectionError::new(
                                "Failed to create collator, check collator preferences",
                                ErrorKind::InternalError,
                            )
                        })?;
                Box::new(move |a: &Value, b: &Value| {
                    collator.compare(&a.to_plain_string(), &b.to_plain_string())
                })
            }
        };
        Ok(comparator)
    }
}
