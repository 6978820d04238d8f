//! The generation context.
//!
//! A [`Faker`] bundles one merged locale tree, one random engine and one
//! reference-date provider. Cloning a `Faker` (via [`Clone`]) yields another
//! handle onto the *same* engine: draws through any handle advance the one
//! stream, interleaved in call order. [`Faker::derive`] instead copies the
//! engine state into a fresh engine, forking an isolated sub-stream.
//!
//! The engine sits behind a mutex, and every operation that consumes
//! randomness holds the lock for its whole duration, so a multi-draw value
//! is never split across handles.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::accessor::{Definitions, RawDefinitions};
use crate::definition::{LocaleDefinition, LocaleMetadata};
use crate::error::{ConfigurationError, GenerationError};
use crate::merge::merge_chain;
use crate::mersenne::{MersenneTwister, RngState, Seed};
use crate::ref_date::{RefDateProvider, default_provider};
use crate::registry::LocaleRegistry;

/// A locale source: a registry identifier or an inline definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleSource {
    /// Identifier resolved through a [`LocaleRegistry`].
    Id(String),
    /// A definition supplied directly.
    Inline(LocaleDefinition),
}

impl From<&str> for LocaleSource {
    fn from(id: &str) -> Self {
        Self::Id(id.to_owned())
    }
}

impl From<String> for LocaleSource {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<LocaleDefinition> for LocaleSource {
    fn from(definition: LocaleDefinition) -> Self {
        Self::Inline(definition)
    }
}

/// Builder for [`Faker`].
///
/// [`Self::locale`] sets the primary; [`Self::fallback`] appends fallbacks,
/// consulted in the order added.
///
/// # Example
///
/// ```
/// use faker_core::{Faker, Seed};
///
/// let faker = Faker::builder()
///     .locale("en_AU")
///     .fallback("en")
///     .seed(Seed::Single(1))
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(faker.metadata().title.as_deref(), Some("English (Australia)"));
/// ```
#[derive(Default)]
pub struct FakerBuilder<'r> {
    primary: Option<LocaleSource>,
    fallbacks: Vec<LocaleSource>,
    seed: Option<Seed>,
    ref_date: Option<RefDateProvider>,
    registry: Option<&'r LocaleRegistry>,
}

impl<'r> FakerBuilder<'r> {
    /// Sets the primary locale, replacing any earlier primary.
    #[must_use]
    pub fn locale(mut self, source: impl Into<LocaleSource>) -> Self {
        self.primary = Some(source.into());
        self
    }

    /// Appends a fallback locale.
    #[must_use]
    pub fn fallback(mut self, source: impl Into<LocaleSource>) -> Self {
        self.fallbacks.push(source.into());
        self
    }

    /// Seeds the engine explicitly instead of from entropy.
    #[must_use]
    pub fn seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the default ("now") reference-date provider.
    #[must_use]
    pub fn ref_date(mut self, provider: RefDateProvider) -> Self {
        self.ref_date = Some(provider);
        self
    }

    /// Resolves locale identifiers through `registry` instead of the
    /// built-in locales.
    #[must_use]
    pub fn registry(mut self, registry: &'r LocaleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builds the faker.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoLocales`] when no locale was given,
    /// [`ConfigurationError::UnknownLocale`] for an identifier the registry
    /// lacks, and any seeding failure.
    pub fn build(self) -> Result<Faker, ConfigurationError> {
        let locales: Vec<LocaleSource> = self.primary.into_iter().chain(self.fallbacks).collect();
        if locales.is_empty() {
            return Err(ConfigurationError::NoLocales);
        }

        let needs_registry = locales
            .iter()
            .any(|source| matches!(source, LocaleSource::Id(_)));
        let registry = match self.registry {
            None if needs_registry => Some(LocaleRegistry::shared_builtin()?),
            other => other,
        };

        let resolved = locales
            .into_iter()
            .map(|source| resolve(registry, source))
            .collect::<Result<Vec<_>, _>>()?;
        let chain: Vec<&LocaleDefinition> = resolved.iter().map(Arc::as_ref).collect();
        let definitions = Arc::new(merge_chain(&chain)?);

        let engine = match self.seed {
            Some(seed) => {
                debug!(seed = %seed, "building faker with explicit seed");
                MersenneTwister::with_seed(&seed)?
            }
            None => {
                let (engine, seed) = MersenneTwister::from_entropy()?;
                debug!(seed = %seed, "building faker with fresh seed");
                engine
            }
        };

        Ok(Faker {
            definitions,
            engine: Arc::new(Mutex::new(engine)),
            ref_date: self.ref_date.unwrap_or_else(default_provider),
        })
    }
}

fn resolve(
    registry: Option<&LocaleRegistry>,
    source: LocaleSource,
) -> Result<Arc<LocaleDefinition>, ConfigurationError> {
    match source {
        LocaleSource::Inline(definition) => Ok(Arc::new(definition)),
        LocaleSource::Id(id) => registry
            .and_then(|found| found.get(&id))
            .ok_or(ConfigurationError::UnknownLocale { id }),
    }
}

/// A seeded, locale-aware generation context.
///
/// `Clone` shares the engine; use [`Faker::derive`] for an isolated stream.
///
/// # Example
///
/// ```
/// use faker_core::{Faker, LocaleDefinition, Seed};
/// use serde_json::json;
///
/// let locale = LocaleDefinition::new().with_entry("animal", "cat", json!(["Korat", "Oriental"]));
/// let faker = Faker::builder()
///     .locale(locale)
///     .seed(Seed::Single(1))
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(faker.definition_element("animal", "cat"), Ok("Korat"));
/// ```
#[derive(Clone)]
pub struct Faker {
    definitions: Arc<LocaleDefinition>,
    engine: Arc<Mutex<MersenneTwister>>,
    ref_date: RefDateProvider,
}

impl fmt::Debug for Faker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Faker")
            .field("categories", &self.definitions.len())
            .field("draws", &self.engine.try_lock().ok().map(|engine| engine.draws()))
            .finish_non_exhaustive()
    }
}

impl Faker {
    /// Starts building a faker.
    #[must_use]
    pub fn builder<'r>() -> FakerBuilder<'r> {
        FakerBuilder::default()
    }

    fn engine(&self) -> MutexGuard<'_, MersenneTwister> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the engine.
    ///
    /// The engine implements [`rand::RngCore`], so `rand`-based code can
    /// draw from the shared stream here.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut MersenneTwister) -> R) -> R {
        f(&mut self.engine())
    }

    /// Forks an independent context from the current engine state.
    ///
    /// The derived context starts where this one stands; afterwards neither
    /// perturbs the other's future output.
    #[must_use]
    pub fn derive(&self) -> Self {
        let snapshot = self.engine().state();
        debug!(draws = snapshot.draws(), "deriving faker with independent engine");
        Self {
            definitions: Arc::clone(&self.definitions),
            engine: Arc::new(Mutex::new(MersenneTwister::from_state(snapshot))),
            ref_date: Arc::clone(&self.ref_date),
        }
    }

    /// Reseeds the engine and returns the seed that was applied.
    ///
    /// Every clone sharing the engine is reseeded; derived contexts are not.
    ///
    /// # Errors
    ///
    /// See [`MersenneTwister::seed`].
    pub fn seed(&self, value: Option<Seed>) -> Result<Seed, ConfigurationError> {
        self.engine().seed(value)
    }

    /// Returns `true` when both handles draw from one engine.
    #[must_use]
    pub fn shares_engine_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.engine, &other.engine)
    }

    /// Returns a snapshot of the engine registers.
    #[must_use]
    pub fn rng_state(&self) -> RngState {
        self.engine().state()
    }

    /// Returns the number of 32-bit draws the engine has produced.
    #[must_use]
    pub fn draws(&self) -> u64 {
        self.engine().draws()
    }

    /// Returns the next raw 32-bit value.
    pub fn next_u32(&self) -> u32 {
        self.engine().next_u32()
    }

    /// Returns a float in `[0, 1)`.
    pub fn float(&self) -> f64 {
        self.engine().next_f64()
    }

    /// Returns an integer in `min..=max`.
    ///
    /// # Errors
    ///
    /// See [`MersenneTwister::int_inclusive`].
    pub fn int(&self, min: i64, max: i64) -> Result<i64, GenerationError> {
        self.engine().int_inclusive(min, max)
    }

    /// Returns `true` with the given probability.
    ///
    /// A probability of zero or less returns `false` and one or more
    /// returns `true`, both without drawing; otherwise one float is drawn
    /// and compared.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidProbability`] for NaN.
    pub fn boolean(&self, probability: f64) -> Result<bool, GenerationError> {
        if probability.is_nan() {
            return Err(GenerationError::InvalidProbability);
        }
        if probability <= 0.0 {
            return Ok(false);
        }
        if probability >= 1.0 {
            return Ok(true);
        }
        Ok(self.float() < probability)
    }

    /// Picks one element uniformly.
    ///
    /// A one-element slice is returned without drawing.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptyArray`] for an empty slice.
    pub fn array_element<'a, T>(&self, items: &'a [T]) -> Result<&'a T, GenerationError> {
        let last = match items.len() {
            0 => return Err(GenerationError::EmptyArray),
            1 => return items.first().ok_or(GenerationError::EmptyArray),
            len => len - 1,
        };
        let max = i64::try_from(last).map_err(|_| GenerationError::RangeTooWide {
            min: 0,
            max: i64::MAX,
        })?;
        let index = self.int(0, max)?;
        usize::try_from(index)
            .ok()
            .and_then(|position| items.get(position))
            .ok_or(GenerationError::EmptyArray)
    }

    /// Picks one string from the locale entry `category.key`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Definition`] when the entry is missing, not
    /// applicable, or not a list of strings, and
    /// [`GenerationError::EmptyArray`] when the list is empty.
    pub fn definition_element(&self, category: &str, key: &str) -> Result<&str, GenerationError> {
        let entries = self.definitions().category(category).strings(key)?;
        self.array_element(&entries).copied()
    }

    /// Returns the strict view over the merged locale tree.
    #[must_use]
    pub fn definitions(&self) -> Definitions<'_> {
        Definitions::new(&self.definitions)
    }

    /// Returns the lenient view over the merged locale tree.
    #[must_use]
    pub fn raw_definitions(&self) -> RawDefinitions<'_> {
        RawDefinitions::new(&self.definitions)
    }

    /// Returns the merged locale metadata.
    #[must_use]
    pub fn metadata(&self) -> LocaleMetadata {
        self.raw_definitions().metadata()
    }

    /// Returns the reference date, queried from the provider on each call.
    #[must_use]
    pub fn default_ref_date(&self) -> DateTime<Utc> {
        self.ref_date.utc()
    }

    /// Replaces the reference-date provider for this handle.
    pub fn set_default_ref_date(&mut self, provider: RefDateProvider) {
        self.ref_date = provider;
    }
}
