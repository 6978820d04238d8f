//! The process-wide default faker.
//!
//! Built lazily on first access from the embedded `en` locale with `base` as
//! fallback, seeded from fresh entropy. Code that needs reproducible output
//! or isolation should build its own [`Faker`] instead.

use std::sync::OnceLock;

use crate::error::ConfigurationError;
use crate::faker::Faker;

static GLOBAL: OnceLock<Faker> = OnceLock::new();

/// Returns the shared default faker, building it on first use.
///
/// Concurrent first calls may each build a candidate; exactly one is kept and
/// every caller receives that one.
///
/// # Errors
///
/// Returns [`ConfigurationError`] if the embedded locales or the entropy
/// source fail on first use. A failed call leaves the global unset, so a
/// later call retries.
///
/// # Example
///
/// ```
/// let faker = faker_core::global::faker().expect("default faker");
/// assert_eq!(faker.metadata().title.as_deref(), Some("English"));
/// ```
pub fn faker() -> Result<&'static Faker, ConfigurationError> {
    if let Some(existing) = GLOBAL.get() {
        return Ok(existing);
    }
    let built = Faker::builder().locale("en").fallback("base").build()?;
    Ok(GLOBAL.get_or_init(|| built))
}
