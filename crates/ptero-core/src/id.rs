//! Strongly-typed identifiers for panel resources.
//!
//! The Application API addresses every resource by a numeric id. Wrapping
//! each in its own type keeps a `NodeId` from being passed where a
//! `NestId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed numeric identifier types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw numeric identifier.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw numeric identifier.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Parses an identifier from a decimal string.
            ///
            /// # Errors
            ///
            /// Returns a validation error if the string is not an unsigned integer.
            pub fn parse_str(input: &str) -> Result<Self> {
                input
                    .trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| {
                        Error::ValidationError(format!(
                            concat!("Invalid ", stringify!($name), ": {}"),
                            input
                        ))
                    })
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(UserId, "Panel user identifier");
id_type!(ServerId, "Game server identifier");
id_type!(NodeId, "Node (daemon host) identifier");
id_type!(LocationId, "Location identifier");
id_type!(AllocationId, "Allocation (ip:port binding) identifier");
id_type!(NestId, "Nest identifier");
id_type!(EggId, "Egg identifier");
