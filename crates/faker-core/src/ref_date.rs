//! Reference-date providers.
//!
//! Date-relative generators ask the owning [`crate::Faker`] for its reference
//! date. Providers implement [`mockable::Clock`] and are queried on every
//! call, so the default provider tracks wall-clock time.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use mockable::{Clock, DefaultClock};

/// Shared handle to a reference-date provider.
pub type RefDateProvider = Arc<dyn Clock + Send + Sync>;

/// Returns the default provider ("now" at call time).
#[must_use]
pub fn default_provider() -> RefDateProvider {
    Arc::new(DefaultClock)
}

/// A provider that always returns the same instant.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use faker_core::FixedClock;
/// use mockable::Clock;
///
/// let instant = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single().expect("valid date");
/// assert_eq!(FixedClock::new(instant).utc(), instant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Pins the provider to `instant`.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.instant.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn default_provider_reports_the_current_time() {
        let provider = default_provider();
        let start = Utc::now();
        let reported = provider.utc();
        let end = Utc::now();
        assert!(start <= reported && reported <= end);
    }

    #[test]
    fn fixed_clock_local_matches_utc_instant() {
        let instant = Utc
            .with_ymd_and_hms(2020, 2, 29, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        let clock = FixedClock::new(instant);
        assert_eq!(clock.local().with_timezone(&Utc), instant);
    }
}
