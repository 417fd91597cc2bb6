//! Locations group nodes by region.

use super::Resource;
use chrono::{DateTime, Utc};
use ptero_core::id::LocationId;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// A location record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Location id.
    pub id: LocationId,
    /// Short code (e.g. `us.nyc`).
    pub short: String,
    /// Long description.
    pub long: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Location {
    const NAME: &'static str = "location";
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.short, self.long)
    }
}

/// Payload for `POST /locations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct NewLocation {
    /// Short code.
    #[validate(length(min = 1, max = 60, message = "short code must be 1-60 characters"))]
    pub short: String,
    /// Long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
}

impl NewLocation {
    /// Create a location payload with only a short code.
    pub fn new(short: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            long: None,
        }
    }

    /// Set the long description.
    #[must_use]
    pub fn with_long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }
}
