//! # Timestamp Value Object
//!
//! UTC point in time used for record creation times and the duplicate
//! submission window.
//!
//! # Examples
//!
//! ```
//! use otani::domain::value_objects::timestamp::Timestamp;
//!
//! let created = Timestamp::from_secs(1_000).unwrap();
//! let now = created.add_secs(3);
//! let since = now.saturating_sub(std::time::Duration::from_secs(5));
//!
//! assert!(!created.is_before(&since));
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp.
///
/// Wraps `chrono::DateTime<Utc>` and serializes as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is out of range.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Adds seconds to the timestamp (negative values move backwards).
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Subtracts a standard duration, saturating at the zero offset when the
    /// duration does not fit chrono's range.
    #[must_use]
    pub fn saturating_sub(&self, window: std::time::Duration) -> Self {
        let delta = Duration::from_std(window).unwrap_or(Duration::zero());
        Self(self.0.checked_sub_signed(delta).unwrap_or(self.0))
    }

    /// Returns true if this timestamp is before another.
    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Formats the timestamp as RFC 3339.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Returns the underlying DateTime.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
