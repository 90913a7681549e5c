//! Timezone offset resolution
//!
//! Offsets are taken from the IANA database at a fixed instant, so
//! daylight-saving rules in effect at that instant apply. An unknown or
//! empty name resolves to UTC: a wrong offset only skews the proximity
//! part of the score, which is preferable to dropping the candidate.

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Anything that can turn a timezone name into hours east of UTC
pub trait OffsetResolver {
    fn offset_hours(&self, timezone: &str) -> f64;
}

/// Resolves offsets against the IANA database at one instant
#[derive(Debug, Clone, Copy)]
pub struct TimezoneOffsetResolver {
    at: DateTime<Utc>,
}

impl TimezoneOffsetResolver {
    /// Resolve offsets as they are right now
    pub fn now() -> Self {
        Self { at: Utc::now() }
    }

    /// Resolve offsets as they were (or will be) at `at`
    pub fn at(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.at
    }
}

impl Default for TimezoneOffsetResolver {
    fn default() -> Self {
        Self::now()
    }
}

impl OffsetResolver for TimezoneOffsetResolver {
    fn offset_hours(&self, timezone: &str) -> f64 {
        match timezone.trim().parse::<Tz>() {
            Ok(tz) => {
                let offset = tz.offset_from_utc_datetime(&self.at.naive_utc()).fix();
                f64::from(offset.local_minus_utc()) / 3600.0
            }
            Err(_) => {
                tracing::debug!(timezone, "unrecognized timezone, assuming UTC");
                0.0
            }
        }
    }
}

/// Whether `timezone` names a zone in the IANA database
pub fn is_known_timezone(timezone: &str) -> bool {
    timezone.parse::<Tz>().is_ok()
}
