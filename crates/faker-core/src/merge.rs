//! Locale fallback resolution.
//!
//! Merging walks a priority-ordered chain of definitions. For every category
//! the first locale that defines a key wins; keys it lacks fall through to later
//! locales. Metadata is an ordinary category here, so it merges per field.

use tracing::debug;

use crate::definition::LocaleDefinition;
use crate::error::ConfigurationError;

/// Merges a primary definition with an optional fallback.
///
/// Without a fallback the result equals `primary`.
///
/// # Errors
///
/// Returns [`ConfigurationError::NoLocales`] when both sides are absent.
///
/// # Example
///
/// ```
/// use faker_core::{LocaleDefinition, merge};
/// use serde_json::json;
///
/// let primary = LocaleDefinition::new().with_entry("numbers", "a", json!(1));
/// let fallback = LocaleDefinition::new()
///     .with_entry("numbers", "a", json!(2))
///     .with_entry("numbers", "b", json!(3));
///
/// let merged = merge(Some(&primary), Some(&fallback)).expect("merge");
/// let numbers = merged.category("numbers").expect("category");
/// assert_eq!(numbers.get("a"), Some(&json!(1)));
/// assert_eq!(numbers.get("b"), Some(&json!(3)));
/// ```
pub fn merge(
    primary: Option<&LocaleDefinition>,
    fallback: Option<&LocaleDefinition>,
) -> Result<LocaleDefinition, ConfigurationError> {
    let chain: Vec<&LocaleDefinition> = primary.into_iter().chain(fallback).collect();
    merge_chain(&chain)
}

/// Merges a chain of definitions, highest priority first.
///
/// # Errors
///
/// Returns [`ConfigurationError::NoLocales`] for an empty chain.
pub fn merge_locales(locales: &[LocaleDefinition]) -> Result<LocaleDefinition, ConfigurationError> {
    let chain: Vec<&LocaleDefinition> = locales.iter().collect();
    merge_chain(&chain)
}

pub(crate) fn merge_chain(chain: &[&LocaleDefinition]) -> Result<LocaleDefinition, ConfigurationError> {
    let Some((first, rest)) = chain.split_first() else {
        return Err(ConfigurationError::NoLocales);
    };

    let mut merged = (*first).clone();
    for locale in rest {
        for (name, category) in locale.categories() {
            let target = merged.category_entry(name);
            for (key, value) in category {
                target
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }
    }

    debug!(
        locales = chain.len(),
        categories = merged.len(),
        "merged locale definitions"
    );
    Ok(merged)
}
