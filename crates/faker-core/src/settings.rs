//! Faker configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `FAKER_*` environment variables or a
//! configuration file, in OrthoConfig's usual precedence order.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigurationError, RegistryError};
use crate::faker::Faker;
use crate::mersenne::Seed;
use crate::registry::LocaleRegistry;

const DEFAULT_LOCALE: &str = "en";

/// Configuration values controlling how a [`Faker`] is built.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FAKER")]
pub struct FakerSettings {
    /// Primary locale identifier.
    #[ortho_config(default = DEFAULT_LOCALE.to_owned())]
    pub locale: String,
    /// Fallback locale identifier.
    pub fallback_locale: Option<String>,
    /// Seed as `42`, `[1, 2, 3]` or `"1,2,3"`; fresh entropy when absent.
    pub seed: Option<Seed>,
    /// Directory of extra `*.json` locale files.
    pub locale_dir: Option<PathBuf>,
}

impl FakerSettings {
    /// Return the configured locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Return the configured seed, if any.
    pub fn seed(&self) -> Option<&Seed> {
        self.seed.as_ref()
    }
}

impl Faker {
    /// Builds a faker from settings, resolving ids through `registry`.
    ///
    /// When `locale_dir` is set its locales are loaded on top of a copy of
    /// `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the locale directory cannot be
    /// loaded or a locale id is unknown.
    pub fn from_settings(
        settings: &FakerSettings,
        registry: &LocaleRegistry,
    ) -> Result<Self, ConfigurationError> {
        let extended = settings
            .locale_dir
            .as_deref()
            .map(|path| extend_registry(registry, path))
            .transpose()?;

        let mut builder = Self::builder()
            .registry(extended.as_ref().unwrap_or(registry))
            .locale(settings.locale());
        if let Some(fallback) = &settings.fallback_locale {
            builder = builder.fallback(fallback.as_str());
        }
        if let Some(value) = settings.seed() {
            builder = builder.seed(value.clone());
        }

        debug!(locale = settings.locale(), "building faker from settings");
        builder.build()
    }
}

fn extend_registry(registry: &LocaleRegistry, path: &Path) -> Result<LocaleRegistry, RegistryError> {
    let mut extended = registry.clone();
    extended.load_path(path)?;
    Ok(extended)
}
