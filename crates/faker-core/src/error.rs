//! Error types for the faker-core crate.
//!
//! This module defines semantic error enums for configuration, locale
//! definition access, value generation, and locale registry loading,
//! following the project's error handling conventions with `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring a [`crate::Faker`] or its engine.
///
/// None of these are retried: the caller has to fix the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No usable locale source was supplied.
    #[error("the locale option must contain at least one locale definition")]
    NoLocales,

    /// A locale identifier did not resolve in the registry.
    #[error("locale '{id}' is not registered")]
    UnknownLocale {
        /// The identifier that failed to resolve.
        id: String,
    },

    /// A sequence seed contained no values.
    #[error("a seed sequence must contain at least one value")]
    EmptySeedSequence,

    /// A textual seed could not be parsed.
    #[error("invalid seed '{value}': expected an unsigned 32-bit integer or a comma-separated list of them")]
    InvalidSeed {
        /// The rejected seed text.
        value: String,
    },

    /// The operating system entropy source could not provide a fresh seed.
    #[error("failed to draw a fresh seed from the OS entropy source: {message}")]
    Entropy {
        /// Description of the entropy failure.
        message: String,
    },

    /// The locale registry could not be loaded.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised by checked definition access.
///
/// These represent a data or programming error in a generator module and are
/// surfaced immediately instead of letting an absent value leak into output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// The entry is absent from every locale in the chain.
    #[error("the locale data for '{category}.{key}' are missing in this locale")]
    NotFound {
        /// Category that was queried.
        category: String,
        /// Entry key that was missing.
        key: String,
    },

    /// The locale declares the entry as not applicable (`null`).
    #[error("the locale data for '{category}.{key}' aren't applicable to this locale")]
    NotApplicable {
        /// Category that was queried.
        category: String,
        /// Entry key declared as not applicable.
        key: String,
    },

    /// The entry exists but is not a list of strings.
    #[error("the locale data for '{category}.{key}' is not a list of strings")]
    NotAStringList {
        /// Category that was queried.
        category: String,
        /// Entry key with the unexpected shape.
        key: String,
    },
}

/// Errors raised while deriving values from the random stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The upper bound is below the lower bound.
    #[error("max {max} should be greater than or equal to min {min}")]
    InvalidRange {
        /// Requested lower bound.
        min: i64,
        /// Requested upper bound.
        max: i64,
    },

    /// The range holds more than 2^53 values and cannot be scaled exactly.
    #[error("range {min}..={max} is wider than 2^53 values")]
    RangeTooWide {
        /// Requested lower bound.
        min: i64,
        /// Requested upper bound.
        max: i64,
    },

    /// The probability passed to a boolean draw was NaN.
    #[error("probability must be a number")]
    InvalidProbability,

    /// An element was requested from an empty slice.
    #[error("cannot pick an element from an empty array")]
    EmptyArray,

    /// A locale entry needed for generation could not be read.
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

/// Errors raised while loading locale definitions into a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A locale file or directory could not be read.
    #[error("failed to read locale data at '{path}': {message}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// Locale JSON is malformed or has the wrong shape.
    #[error("invalid locale JSON for '{locale}': {message}")]
    Parse {
        /// Locale identifier (or `<inline>` for unnamed input).
        locale: String,
        /// Description of the parse error.
        message: String,
    },

    /// A locale identifier does not follow the `xx` / `xx_YY` pattern.
    #[error("invalid locale identifier '{id}'")]
    InvalidLocaleId {
        /// The rejected identifier.
        id: String,
    },
}
