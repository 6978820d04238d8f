//! Locale registry types and loading.
//!
//! The registry maps locale identifiers to definition trees. A small set of
//! locales is embedded in the crate; more can be registered in code or loaded
//! from a directory of JSON files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use crate::definition::LocaleDefinition;
use crate::error::RegistryError;

const BUILTIN_LOCALES: [(&str, &str); 3] = [
    ("base", include_str!("../locales/base.json")),
    ("en", include_str!("../locales/en.json")),
    ("en_AU", include_str!("../locales/en_AU.json")),
];

/// A registry of named locale definitions.
///
/// # Example
///
/// ```
/// use faker_core::LocaleRegistry;
///
/// let registry = LocaleRegistry::builtin().expect("embedded locales parse");
/// assert!(registry.contains("en"));
/// assert!(registry.get("xx").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleRegistry {
    locales: BTreeMap<String, Arc<LocaleDefinition>>,
}

impl LocaleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the embedded `base`, `en` and `en_AU`
    /// locales.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] if an embedded locale is malformed.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for (id, json) in BUILTIN_LOCALES {
            let definition = LocaleDefinition::from_json_named(id, json)?;
            registry.register(id, definition)?;
        }
        Ok(registry)
    }

    /// Returns the process-wide built-in registry, parsing it on first use.
    pub(crate) fn shared_builtin() -> Result<&'static Self, RegistryError> {
        static BUILTIN: OnceLock<LocaleRegistry> = OnceLock::new();
        if let Some(registry) = BUILTIN.get() {
            return Ok(registry);
        }
        let registry = Self::builtin()?;
        Ok(BUILTIN.get_or_init(|| registry))
    }

    /// Registers `definition` under `id`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidLocaleId`] if `id` is not `base` and
    /// does not look like `xx` or `xx_YY`.
    pub fn register(&mut self, id: &str, definition: LocaleDefinition) -> Result<(), RegistryError> {
        if !is_valid_locale_id(id) {
            return Err(RegistryError::InvalidLocaleId { id: id.to_owned() });
        }
        self.locales.insert(id.to_owned(), Arc::new(definition));
        Ok(())
    }

    /// Loads every `*.json` file in `dir`, using the file stem as locale id.
    ///
    /// Other files and subdirectories are skipped. Returns the number of
    /// locales loaded. I/O errors report paths relative to `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the directory or a file cannot be read,
    /// a file stem is not a valid locale id, or a file is not valid JSON.
    pub fn load_dir(&mut self, dir: &Dir) -> Result<usize, RegistryError> {
        self.load_entries(dir, Path::new("."))
    }

    /// Opens the directory at `path` and loads it as [`Self::load_dir`] does.
    ///
    /// I/O errors report paths under `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Io`] if the directory cannot be opened, and
    /// otherwise the errors of [`Self::load_dir`].
    pub fn load_path(&mut self, path: &Path) -> Result<usize, RegistryError> {
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(|e| RegistryError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.load_entries(&dir, path)
    }

    fn load_entries(&mut self, dir: &Dir, root: &Path) -> Result<usize, RegistryError> {
        let io_error = |path: PathBuf, err: &std::io::Error| RegistryError::Io {
            path,
            message: err.to_string(),
        };

        let mut loaded = 0;
        for item in dir.entries().map_err(|e| io_error(root.to_path_buf(), &e))? {
            let entry = item.map_err(|e| io_error(root.to_path_buf(), &e))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let file = Utf8Path::new(name);
            let (Some(stem), Some("json")) = (file.file_stem(), file.extension()) else {
                continue;
            };
            if entry
                .file_type()
                .map_err(|e| io_error(root.join(name), &e))?
                .is_dir()
            {
                continue;
            }

            let contents = dir
                .read_to_string(name)
                .map_err(|e| io_error(root.join(name), &e))?;
            let definition = LocaleDefinition::from_json_named(stem, &contents)?;
            self.register(stem, definition)?;
            loaded += 1;
        }

        debug!(
            loaded,
            total = self.locales.len(),
            root = %root.display(),
            "loaded locale directory"
        );
        Ok(loaded)
    }

    /// Returns the definition registered under `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<LocaleDefinition>> {
        self.locales.get(id).cloned()
    }

    /// Returns `true` when `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.locales.contains_key(id)
    }

    /// Iterates registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }
}

/// Returns `true` for `base` and ids shaped like `en`, `en_AU` or `zh_Hant_TW`.
fn is_valid_locale_id(id: &str) -> bool {
    if id == "base" {
        return true;
    }
    let mut parts = id.split('_');
    let language_ok = parts.next().is_some_and(|language| {
        (2..=3).contains(&language.len()) && language.chars().all(|c| c.is_ascii_alphabetic())
    });
    language_ok
        && parts.all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()))
}
