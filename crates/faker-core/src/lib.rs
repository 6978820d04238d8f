//! Seeded, locale-aware synthetic data generation core.
//!
//! This crate provides the engine that fake-data generators build on: a
//! reproducible random stream, locale definitions merged with fallbacks, and
//! lenient or strict access to the merged data. It contains no domain
//! generators of its own.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - A pinned MT19937 engine whose output is identical for a given seed on
//!   every platform ([`MersenneTwister`])
//! - Locale fallback merging, key by key ([`merge`], [`merge_locales`])
//! - Raw access that reports absence as `None` ([`RawDefinitions`]) and
//!   checked access that fails with the missing category and key
//!   ([`Definitions`])
//! - Generation contexts whose clones share one stream and whose derivations
//!   fork an isolated one ([`Faker`])
//! - Embedded and directory-loaded locales ([`LocaleRegistry`])
//!
//! # Example
//!
//! ```
//! use faker_core::{Faker, Seed};
//!
//! let faker = Faker::builder()
//!     .locale("en")
//!     .seed(Seed::Single(1))
//!     .build()
//!     .expect("valid configuration");
//!
//! let first = faker.definition_element("animal", "cat").expect("cats exist");
//! faker.seed(Some(Seed::Single(1))).expect("reseed");
//! assert_eq!(faker.definition_element("animal", "cat").expect("cats exist"), first);
//!
//! // Unknown categories are placeholders; unknown keys are errors.
//! assert!(faker.definitions().category("spaceship").is_placeholder());
//! assert!(faker.definitions().get("spaceship", "name").is_err());
//! assert!(faker.raw_definitions().get("spaceship", "name").is_none());
//! ```

mod accessor;
mod definition;
mod error;
mod faker;
pub mod global;
mod merge;
mod mersenne;
mod ref_date;
mod registry;
mod settings;

pub use accessor::{CategoryView, Definitions, RawCategory, RawDefinitions};
pub use definition::{CategoryDefinition, LocaleDefinition, LocaleMetadata, METADATA_CATEGORY};
pub use error::{ConfigurationError, DefinitionError, GenerationError, RegistryError};
pub use faker::{Faker, FakerBuilder, LocaleSource};
pub use merge::{merge, merge_locales};
pub use mersenne::{ALGORITHM_VERSION, MersenneTwister, RngState, Seed};
pub use ref_date::{FixedClock, RefDateProvider, default_provider};
pub use registry::LocaleRegistry;
pub use settings::FakerSettings;
