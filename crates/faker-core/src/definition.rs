//! Locale definition trees.
//!
//! A locale definition maps category names to entry tables. Each entry is a
//! JSON value, typically a list of strings or structured records. The
//! reserved [`METADATA_CATEGORY`] holds scalar descriptive fields.
//!
//! An entry whose value is JSON `null` declares the data *not applicable*
//! to the locale: it shadows any fallback during merging and is reported as
//! absent by raw access.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RegistryError;

/// Name of the category holding locale metadata.
pub const METADATA_CATEGORY: &str = "metadata";

/// The entries of one category, keyed by entry name.
pub type CategoryDefinition = BTreeMap<String, Value>;

/// A locale's definition tree.
///
/// # Example
///
/// ```
/// use faker_core::LocaleDefinition;
///
/// let locale = LocaleDefinition::from_json(
///     r#"{"metadata": {"title": "German"}, "animal": {"cat": ["Korat"]}}"#,
/// )
/// .expect("valid locale");
///
/// assert!(locale.category("animal").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleDefinition {
    categories: BTreeMap<String, CategoryDefinition>,
}

impl LocaleDefinition {
    /// Creates an empty definition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an unnamed definition from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] if the JSON is malformed or is not an
    /// object of objects.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Self::from_json_named("<inline>", json)
    }

    pub(crate) fn from_json_named(locale: &str, json: &str) -> Result<Self, RegistryError> {
        serde_json::from_str(json).map_err(|e| RegistryError::Parse {
            locale: locale.to_owned(),
            message: e.to_string(),
        })
    }

    /// Adds (or replaces) a single entry, returning the updated definition.
    #[must_use]
    pub fn with_entry(mut self, category: &str, key: &str, value: Value) -> Self {
        self.categories
            .entry(category.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
        self
    }

    /// Adds (or replaces) a whole category, returning the updated definition.
    #[must_use]
    pub fn with_category(mut self, name: &str, category: CategoryDefinition) -> Self {
        self.categories.insert(name.to_owned(), category);
        self
    }

    /// Returns the named category, if present.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryDefinition> {
        self.categories.get(name)
    }

    /// Iterates categories in name order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryDefinition)> {
        self.categories
            .iter()
            .map(|(name, category)| (name.as_str(), category))
    }

    /// Returns the number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns `true` when the definition has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub(crate) fn category_entry(&mut self, name: &str) -> &mut CategoryDefinition {
        self.categories.entry(name.to_owned()).or_default()
    }
}

/// Typed view of a locale's metadata category.
///
/// Every field is optional so partial metadata can merge field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleMetadata {
    /// English name of the locale, e.g. `"English (Australia)"`.
    pub title: Option<String>,
    /// Separator placed between generated words.
    pub separator: Option<String>,
    /// Locale code, e.g. `"en_AU"`.
    pub code: Option<String>,
    /// ISO 639 language code.
    pub language: Option<String>,
    /// ISO 3166 country code, for country-specific locales.
    pub country: Option<String>,
    /// Name of the locale in its own language.
    pub endonym: Option<String>,
    /// Text direction, `"ltr"` or `"rtl"`.
    pub dir: Option<String>,
    /// ISO 15924 script code.
    pub script: Option<String>,
}

impl LocaleMetadata {
    /// Builds the typed view from a metadata category.
    ///
    /// Non-string values are ignored.
    #[must_use]
    pub fn from_category(category: Option<&CategoryDefinition>) -> Self {
        let field = |name: &str| {
            category
                .and_then(|entries| entries.get(name))
                .and_then(Value::as_str)
                .map(str::to_owned)
        };
        Self {
            title: field("title"),
            separator: field("separator"),
            code: field("code"),
            language: field("language"),
            country: field("country"),
            endonym: field("endonym"),
            dir: field("dir"),
            script: field("script"),
        }
    }
}
