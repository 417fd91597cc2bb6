//! Allocations: ip:port bindings available on a node.

use super::Resource;
use ptero_core::id::AllocationId;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// An allocation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Allocation id.
    pub id: AllocationId,
    /// Bound IP address.
    pub ip: String,
    /// Alias shown instead of the IP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Bound port.
    pub port: u16,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Whether a server currently uses the allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned: Option<bool>,
    /// Whether this is its server's primary allocation; absent means false.
    #[serde(default)]
    pub is_default: bool,
}

impl Resource for Allocation {
    const NAME: &'static str = "allocation";
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)?;
        if self.is_default {
            f.write_str(" (default)")?;
        }
        Ok(())
    }
}

/// Payload for `POST /nodes/{node}/allocations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct NewAllocation {
    /// IP address to bind.
    #[validate(length(min = 1, message = "ip is required"))]
    pub ip: String,
    /// Alias shown instead of the IP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Ports or port ranges (`"25565"`, `"25565-25570"`).
    #[validate(length(min = 1, message = "at least one port is required"))]
    pub ports: Vec<String>,
}

impl NewAllocation {
    /// Create an allocation payload.
    pub fn new<I, P>(ip: impl Into<String>, ports: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: ToString,
    {
        Self {
            ip: ip.into(),
            alias: None,
            ports: ports.into_iter().map(|port| port.to_string()).collect(),
        }
    }

    /// Set the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}
