//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Adds `secs`, or `None` if the result is out of range.
    pub fn checked_plus_secs(&self, secs: u64) -> Option<Self> {
        let delta = i64::try_from(secs).ok().and_then(Duration::try_seconds)?;
        self.0.checked_add_signed(delta).map(Self)
    }

    /// True once `ttl_secs` have elapsed since this timestamp, measured at `now`.
    ///
    /// A deadline past the representable range never expires.
    pub fn has_expired(&self, ttl_secs: u64, now: &Timestamp) -> bool {
        match self.checked_plus_secs(ttl_secs) {
            Some(deadline) => deadline <= *now,
            None => false,
        }
    }
}

#[cfg(test)]
impl Timestamp {
    pub fn minus_secs(&self, secs: u64) -> Self {
        Self(self.0 - Duration::seconds(secs as i64))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
