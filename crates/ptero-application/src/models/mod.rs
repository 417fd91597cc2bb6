//! Application API resource records and request payloads.
//!
//! Each record is produced by normalizing a raw response through the shared
//! envelope rules, so every accepted wrapper shape yields the same record.

use ptero_core::envelope;
use ptero_core::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

mod allocation;
mod egg;
mod location;
mod nest;
mod node;
mod server;
mod user;

pub use allocation::{Allocation, NewAllocation};
pub use egg::Egg;
pub use location::{Location, NewLocation};
pub use nest::Nest;
pub use node::{NewNode, Node};
pub use server::Server;
pub use user::{NewUser, User};

/// A record the Application API returns.
pub trait Resource: DeserializeOwned {
    /// Resource name used in error messages.
    const NAME: &'static str;

    /// Normalize a raw decoded payload into the record.
    ///
    /// # Errors
    ///
    /// Returns [`ptero_core::Error::UnexpectedResponse`] if the payload does
    /// not match an accepted envelope or lacks a required field.
    fn from_value(value: Value) -> Result<Self> {
        envelope::normalize(value, Self::NAME)
    }
}

/// Reads an optional field, mapping a malformed value to `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Displays an optional value, or `?` when absent.
pub(crate) struct OrUnknown<'a, T>(pub(crate) &'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrUnknown<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("?"),
        }
    }
}
