//! Lenient and strict views over a merged definition tree.
//!
//! [`RawDefinitions`] never fails: anything missing, including entries the
//! locale marks as not applicable, comes back as `None`. [`Definitions`]
//! always yields a [`CategoryView`] (an empty placeholder for unknown
//! categories) so category-level probing is safe, but reading a key that
//! is not there is an error naming both the category and the key.

use serde_json::Value;

use crate::definition::{CategoryDefinition, LocaleDefinition, LocaleMetadata, METADATA_CATEGORY};
use crate::error::DefinitionError;

/// Lenient view over a definition tree.
#[derive(Debug, Clone, Copy)]
pub struct RawDefinitions<'a> {
    tree: &'a LocaleDefinition,
}

impl<'a> RawDefinitions<'a> {
    /// Wraps a definition tree.
    #[must_use]
    pub const fn new(tree: &'a LocaleDefinition) -> Self {
        Self { tree }
    }

    /// Returns the named category, or `None` if the locale chain lacks it.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<RawCategory<'a>> {
        self.tree.category(name).map(|entries| RawCategory { entries })
    }

    /// Returns `category.key`, or `None` if either level is absent.
    #[must_use]
    pub fn get(&self, category: &str, key: &str) -> Option<&'a Value> {
        self.category(category).and_then(|found| found.get(key))
    }

    /// Returns the typed metadata, empty when the locale has none.
    #[must_use]
    pub fn metadata(&self) -> LocaleMetadata {
        LocaleMetadata::from_category(self.tree.category(METADATA_CATEGORY))
    }
}

/// One category seen through [`RawDefinitions`].
#[derive(Debug, Clone, Copy)]
pub struct RawCategory<'a> {
    entries: &'a CategoryDefinition,
}

impl<'a> RawCategory<'a> {
    /// Returns the entry, or `None` if it is absent or not applicable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.entries.get(key).filter(|value| !value.is_null())
    }
}

/// Strict view over a definition tree.
///
/// # Example
///
/// ```
/// use faker_core::{Definitions, DefinitionError, LocaleDefinition};
/// use serde_json::json;
///
/// let tree = LocaleDefinition::new().with_entry("location", "city_name", json!(["Perth"]));
/// let definitions = Definitions::new(&tree);
///
/// let missing = definitions.category("missing");
/// assert!(missing.is_placeholder());
/// assert!(matches!(
///     missing.get("key"),
///     Err(DefinitionError::NotFound { .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Definitions<'a> {
    tree: &'a LocaleDefinition,
}

impl<'a> Definitions<'a> {
    /// Wraps a definition tree.
    #[must_use]
    pub const fn new(tree: &'a LocaleDefinition) -> Self {
        Self { tree }
    }

    /// Returns a view of the named category.
    ///
    /// Unknown categories yield an empty placeholder instead of failing.
    #[must_use]
    pub fn category<'n>(&self, name: &'n str) -> CategoryView<'a, 'n> {
        CategoryView {
            name,
            entries: self.tree.category(name),
        }
    }

    /// Returns `category.key`.
    ///
    /// # Errors
    ///
    /// See [`CategoryView::get`].
    pub fn get(&self, category: &str, key: &str) -> Result<&'a Value, DefinitionError> {
        self.category(category).get(key)
    }

    /// Returns the typed metadata, empty when the locale has none.
    #[must_use]
    pub fn metadata(&self) -> LocaleMetadata {
        LocaleMetadata::from_category(self.tree.category(METADATA_CATEGORY))
    }
}

/// One category seen through [`Definitions`], possibly a placeholder.
///
/// `'a` is the lifetime of the definition tree and `'n` that of the
/// requested name.
#[derive(Debug, Clone, Copy)]
pub struct CategoryView<'a, 'n> {
    name: &'n str,
    entries: Option<&'a CategoryDefinition>,
}

impl<'a, 'n> CategoryView<'a, 'n> {
    /// Returns the category name.
    #[must_use]
    pub const fn name(&self) -> &'n str {
        self.name
    }

    /// Returns `true` when no locale in the chain defines this category.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.entries.is_none()
    }

    /// Returns `true` when the entry exists and is applicable.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .and_then(|entries| entries.get(key))
            .is_some_and(|value| !value.is_null())
    }

    /// Returns the entry.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::NotFound`] when the key is absent, whether
    /// the category is real or a placeholder, and
    /// [`DefinitionError::NotApplicable`] when the locale sets it to `null`.
    pub fn get(&self, key: &str) -> Result<&'a Value, DefinitionError> {
        match self.entries.and_then(|entries| entries.get(key)) {
            None => Err(DefinitionError::NotFound {
                category: self.name.to_owned(),
                key: key.to_owned(),
            }),
            Some(Value::Null) => Err(DefinitionError::NotApplicable {
                category: self.name.to_owned(),
                key: key.to_owned(),
            }),
            Some(value) => Ok(value),
        }
    }

    /// Returns the entry as a list of strings.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::get`] failures and returns
    /// [`DefinitionError::NotAStringList`] when the entry has another shape.
    pub fn strings(&self, key: &str) -> Result<Vec<&'a str>, DefinitionError> {
        let not_strings = || DefinitionError::NotAStringList {
            category: self.name.to_owned(),
            key: key.to_owned(),
        };
        self.get(key)?
            .as_array()
            .ok_or_else(not_strings)?
            .iter()
            .map(|item| item.as_str().ok_or_else(not_strings))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn tree() -> LocaleDefinition {
        LocaleDefinition::new()
            .with_entry(METADATA_CATEGORY, "title", json!("English"))
            .with_entry("location", "city_name", json!(["Perth", "Hobart"]))
            .with_entry("location", "state", Value::Null)
            .with_entry("location", "postcode", json!({"format": "####"}))
    }

    #[rstest]
    fn raw_reads_present_entries(tree: LocaleDefinition) {
        let raw = RawDefinitions::new(&tree);
        assert_eq!(
            raw.get("location", "city_name"),
            Some(&json!(["Perth", "Hobart"]))
        );
        assert_eq!(raw.metadata().title.as_deref(), Some("English"));
    }

    #[rstest]
    #[case::missing_category("missing", "city_name")]
    #[case::missing_key_in_missing_category("missing", "missing")]
    #[case::missing_key_in_present_category("location", "missing")]
    #[case::not_applicable("location", "state")]
    fn raw_reports_absence_without_failing(
        tree: LocaleDefinition,
        #[case] category: &str,
        #[case] key: &str,
    ) {
        let raw = RawDefinitions::new(&tree);
        assert_eq!(raw.get(category, key), None);
    }

    #[rstest]
    fn raw_unknown_category_is_absent(tree: LocaleDefinition) {
        assert!(RawDefinitions::new(&tree).category("missing").is_none());
    }

    #[rstest]
    fn checked_unknown_category_is_a_placeholder(tree: LocaleDefinition) {
        let definitions = Definitions::new(&tree);
        let view = definitions.category("missing");
        assert!(view.is_placeholder());
        assert_eq!(view.name(), "missing");
        assert!(!view.contains("anything"));
    }

    #[rstest]
    #[case::placeholder_category("missing", "missing")]
    #[case::present_category("location", "missing")]
    fn checked_missing_key_fails_with_both_names(
        tree: LocaleDefinition,
        #[case] category: &str,
        #[case] key: &str,
    ) {
        let definitions = Definitions::new(&tree);
        assert_eq!(
            definitions.get(category, key),
            Err(DefinitionError::NotFound {
                category: category.to_owned(),
                key: key.to_owned(),
            })
        );
    }

    #[rstest]
    fn checked_null_entry_is_not_applicable(tree: LocaleDefinition) {
        let definitions = Definitions::new(&tree);
        assert!(!definitions.category("location").contains("state"));
        assert_eq!(
            definitions.get("location", "state"),
            Err(DefinitionError::NotApplicable {
                category: "location".to_owned(),
                key: "state".to_owned(),
            })
        );
    }

    #[rstest]
    fn strings_reads_string_lists(tree: LocaleDefinition) {
        let definitions = Definitions::new(&tree);
        assert_eq!(
            definitions.category("location").strings("city_name"),
            Ok(vec!["Perth", "Hobart"])
        );
    }

    #[rstest]
    fn strings_rejects_other_shapes(tree: LocaleDefinition) {
        let definitions = Definitions::new(&tree);
        assert_eq!(
            definitions.category("location").strings("postcode"),
            Err(DefinitionError::NotAStringList {
                category: "location".to_owned(),
                key: "postcode".to_owned(),
            })
        );
    }
}
