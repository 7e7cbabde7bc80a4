//! Ordinal pickup timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// When an item was picked up.
///
/// Only the relative order matters (it is used as a sort key), so the value is
/// an opaque ordinal. Wall-clock stamps are milliseconds since the Unix epoch;
/// tests and seed files are free to use small ordinals instead.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PickupTime(u64);

impl PickupTime {
    /// Stamp taken from the system clock.
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    pub const fn from_ordinal(ordinal: u64) -> Self {
        Self(ordinal)
    }

    pub const fn as_ordinal(&self) -> u64 {
        self.0
    }
}

impl From<DateTime<Utc>> for PickupTime {
    fn from(value: DateTime<Utc>) -> Self {
        // Pre-epoch clocks clamp to zero.
        Self(u64::try_from(value.timestamp_millis()).unwrap_or(0))
    }
}

impl From<u64> for PickupTime {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for PickupTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
