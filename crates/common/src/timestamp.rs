//! Timestamp utilities.

use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};

/// A wrapper around the host's local time with consistent formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Local>);

impl Timestamp {
    /// Create a new timestamp from the current time.
    pub fn now() -> Self {
        Timestamp(Local::now())
    }

    /// Create a timestamp from a DateTime<Local>.
    pub fn from_datetime(dt: DateTime<Local>) -> Self {
        Timestamp(dt)
    }

    /// Get the inner DateTime<Local>.
    pub fn inner(&self) -> DateTime<Local> {
        self.0
    }

    /// Format as RFC 3339 with the local offset, second precision.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Compact stamp embedded in snapshot file names.
    pub fn to_file_stamp(&self) -> String {
        self.0.format("%Y%m%dT%H%M%S").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}
